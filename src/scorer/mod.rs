pub mod physics;

use crate::config::FitnessWeights;
use crate::error::{KeyGraphError, KgResult};
use crate::geometry::KeyboardGeometry;
use crate::model::TextModel;
pub use physics::CostMatrices;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreDetails {
    pub same_finger: f64,
    pub distance: f64,
    /// Already multiplied by the preferred-position weight; subtracted from the total
    pub preferred_reward: f64,
    pub total: f64,
}

/// Fitness of a layout (lower is better).
///
/// With `E[layout[i], i] = 1`:
/// `cost = Σ (E·P) ⊙ (w_sf·F + w_d·D) − w_p · Σ π[layout[i]] · R[i]`
#[derive(Debug, Clone)]
pub struct Scorer {
    pub key_count: usize,
    pub weights: FitnessWeights,
    pub matrices: CostMatrices,
    pairs: Vec<f64>,
    stationary: Vec<f64>,
}

impl Scorer {
    pub fn new(
        model: &TextModel,
        geometry: &KeyboardGeometry,
        weights: FitnessWeights,
    ) -> KgResult<Self> {
        let n = geometry.key_count();
        if model.size() != n {
            return Err(KeyGraphError::Validation(format!(
                "alphabet has {} symbols but the keyboard has {} slots",
                model.size(),
                n
            )));
        }

        let mut pairs = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                pairs.push(model.pair_probabilities[(i, j)]);
            }
        }

        Ok(Self {
            key_count: n,
            weights,
            matrices: CostMatrices::new(geometry),
            pairs,
            stationary: model.stationary.iter().copied().collect(),
        })
    }

    pub fn score(&self, layout: &[usize]) -> f64 {
        self.score_details(layout).total
    }

    pub fn score_details(&self, layout: &[usize]) -> ScoreDetails {
        let n = self.key_count;
        let m = &self.matrices;
        let mut sf = 0.0;
        let mut dist = 0.0;

        // Row k of (E·P) belongs to the symbol placed in slot k
        for (k, &symbol) in layout.iter().enumerate() {
            let p_row = &self.pairs[k * n..(k + 1) * n];
            let sf_row = &m.same_finger[symbol * n..(symbol + 1) * n];
            let d_row = &m.distance[symbol * n..(symbol + 1) * n];
            for c in 0..n {
                sf += p_row[c] * sf_row[c];
                dist += p_row[c] * d_row[c];
            }
        }

        let mut reward = 0.0;
        for (slot, &symbol) in layout.iter().enumerate() {
            reward += self.stationary[symbol] * m.preferred[slot];
        }

        let same_finger = self.weights.weight_same_finger * sf;
        let distance = self.weights.weight_distance * dist;
        let preferred_reward = self.weights.weight_preferred * reward;

        ScoreDetails {
            same_finger,
            distance,
            preferred_reward,
            total: same_finger + distance - preferred_reward,
        }
    }
}

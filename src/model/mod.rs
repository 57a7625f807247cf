pub mod stationary;

use crate::error::{KeyGraphError, KgResult};
use nalgebra::{DMatrix, DVector};
use tracing::info;

pub use stationary::stationary_distribution;

/// Distinct symbols of a text, sorted, each identified by its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn from_sequence(seq: &[char]) -> Self {
        let mut symbols = seq.to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        Self { symbols }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[inline(always)]
    pub fn symbol(&self, id: usize) -> char {
        self.symbols[id]
    }

    pub fn id_of(&self, c: char) -> Option<usize> {
        self.symbols.binary_search(&c).ok()
    }

    /// Maps a layout string (one symbol per slot) to ids.
    pub fn encode(&self, s: &str) -> KgResult<Vec<usize>> {
        s.chars()
            .map(|c| {
                self.id_of(c).ok_or_else(|| {
                    KeyGraphError::Validation(format!("symbol '{}' is not in the alphabet", c))
                })
            })
            .collect()
    }

    pub fn decode(&self, ids: &[usize]) -> String {
        ids.iter().map(|&id| self.symbols[id]).collect()
    }
}

/// First-order Markov statistics of a symbol stream.
#[derive(Debug, Clone)]
pub struct TextModel {
    pub alphabet: Alphabet,
    /// Raw ordered-pair counts
    pub counts: DMatrix<f64>,
    /// P: each pair's share of all observed pairs
    pub pair_probabilities: DMatrix<f64>,
    /// A: row-stochastic successor probabilities, zero rows for symbols never followed
    pub transitions: DMatrix<f64>,
    /// π: stationary distribution of A
    pub stationary: DVector<f64>,
    pub total_pairs: usize,
}

impl TextModel {
    pub fn from_symbols(seq: &[char], eigen_tolerance: f64) -> KgResult<Self> {
        let alphabet = Alphabet::from_sequence(seq);
        let n = alphabet.len();
        if n < 2 {
            return Err(KeyGraphError::DegenerateInput(format!(
                "alphabet has {} symbol(s), need at least 2",
                n
            )));
        }
        let total_pairs = seq.len().saturating_sub(1);
        if total_pairs < 2 {
            return Err(KeyGraphError::DegenerateInput(format!(
                "text yields {} symbol pair(s), need at least 2",
                total_pairs
            )));
        }

        // 1. Pair counts (every char is in the alphabet by construction)
        let ids: Vec<usize> = seq
            .iter()
            .filter_map(|&c| alphabet.id_of(c))
            .collect();
        let mut counts = DMatrix::<f64>::zeros(n, n);
        for w in ids.windows(2) {
            counts[(w[0], w[1])] += 1.0;
        }

        // 2. Global pair probabilities
        let pair_probabilities = &counts / total_pairs as f64;

        // 3. Row normalization, empty rows stay empty
        let mut transitions = counts.clone();
        for mut row in transitions.row_iter_mut() {
            let sum = row.sum();
            if sum > 0.0 {
                row /= sum;
            }
        }

        // 4. Stationary distribution
        let stationary = stationary_distribution(&transitions, eigen_tolerance)?;

        info!(
            "📊 Model built: {} symbols, {} pairs",
            n, total_pairs
        );

        Ok(Self {
            alphabet,
            counts,
            pair_probabilities,
            transitions,
            stationary,
            total_pairs,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.alphabet.len()
    }

    /// Symbol ids ordered by stationary probability, most frequent first.
    pub fn symbols_by_stationary(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = (0..self.size()).collect();
        ids.sort_by(|&a, &b| self.stationary[b].total_cmp(&self.stationary[a]));
        ids
    }
}

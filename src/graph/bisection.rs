use super::WeightedGraph;
use crate::config::BisectionParams;
use crate::error::{KeyGraphError, KgResult};
use crate::optimizer::is_permutation;
use fastrand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct BisectionOptions {
    pub max_iterations: usize,
    pub threshold: f64,
}

impl From<&BisectionParams> for BisectionOptions {
    fn from(p: &BisectionParams) -> Self {
        Self {
            max_iterations: p.bisection_max_iterations,
            threshold: p.bisection_threshold,
        }
    }
}

impl Default for BisectionOptions {
    fn default() -> Self {
        Self::from(&BisectionParams::default())
    }
}

/// Internal and crossing weights of a two-way split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceReport {
    pub left_internal: f64,
    pub right_internal: f64,
    pub crossing: f64,
    pub total: f64,
}

impl BalanceReport {
    pub fn measure(graph: &WeightedGraph, left: &[usize], right: &[usize]) -> Self {
        Self {
            left_internal: graph.sum_within(left),
            right_internal: graph.sum_within(right),
            crossing: graph.sum_between(left, right),
            total: graph.total_weight(),
        }
    }

    #[inline(always)]
    pub fn imbalance(&self) -> f64 {
        (self.left_internal - self.right_internal).abs()
    }
}

#[derive(Debug, Clone)]
pub struct Bisection {
    pub left: Vec<usize>,
    pub right: Vec<usize>,
    pub balance: BalanceReport,
    /// Imbalance seen at the start of every trial, then the final value
    pub history: Vec<f64>,
}

/// Splits the graph into two node sets with near-equal internal weight.
///
/// `ranked` must list every node once, most important first. It is dealt
/// alternately into the two sets; position 0 of each set stays put while
/// random swaps between the remaining positions are kept only when they
/// strictly lower the imbalance.
pub fn bisect(
    graph: &WeightedGraph,
    ranked: &[usize],
    options: &BisectionOptions,
    rng: &mut Rng,
) -> KgResult<Bisection> {
    let n = graph.node_count();
    if n < 2 {
        return Err(KeyGraphError::DegenerateInput(format!(
            "cannot bisect a graph with {} node(s)",
            n
        )));
    }
    if ranked.len() != n || !is_permutation(ranked) {
        return Err(KeyGraphError::Validation(format!(
            "ranking must list each of the {} nodes exactly once, got {:?}",
            n, ranked
        )));
    }

    // 1. Deal ranked nodes alternately
    let mut left: Vec<usize> = ranked.iter().copied().step_by(2).collect();
    let mut right: Vec<usize> = ranked.iter().copied().skip(1).step_by(2).collect();

    let mut diff = (graph.sum_within(&left) - graph.sum_within(&right)).abs();
    let mut history = Vec::with_capacity(options.max_iterations + 1);

    // 2. Hill-climb on random swaps
    for iteration in 0..options.max_iterations {
        history.push(diff);
        if diff < options.threshold {
            debug!("Bisection balanced after {} iterations", iteration);
            break;
        }
        if left.len() < 2 || right.len() < 2 {
            break;
        }

        let r1 = rng.usize(1..left.len());
        let r2 = rng.usize(1..right.len());
        std::mem::swap(&mut left[r1], &mut right[r2]);

        let candidate = (graph.sum_within(&left) - graph.sum_within(&right)).abs();
        if candidate < diff {
            diff = candidate;
        } else {
            std::mem::swap(&mut left[r1], &mut right[r2]);
        }
    }
    history.push(diff);

    let balance = BalanceReport::measure(graph, &left, &right);
    info!(
        "✂️  Bisection: {} | {} nodes, internal {:.4} vs {:.4}, crossing {:.4}",
        left.len(),
        right.len(),
        balance.left_internal,
        balance.right_internal,
        balance.crossing
    );

    Ok(Bisection {
        left,
        right,
        balance,
        history,
    })
}

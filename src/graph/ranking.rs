use super::WeightedGraph;
use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

const PAGERANK_ALPHA: f64 = 0.85;
const PAGERANK_MAX_ITER: usize = 100;
const PAGERANK_TOL: f64 = 1e-6;
const EIGENVECTOR_MAX_ITER: usize = 1000;
const EIGENVECTOR_TOL: f64 = 1e-9;
const PATH_EPS: f64 = 1e-12;

/// Orders graph nodes by importance.
pub trait NodeRanking {
    /// One score per node; higher means more important.
    fn scores(&self, graph: &WeightedGraph) -> Vec<f64>;

    /// `nodes` sorted by descending score, ties by ascending id.
    /// Nodes without a score sort last.
    fn rank(&self, graph: &WeightedGraph, nodes: &[usize]) -> Vec<usize> {
        let scores = self.scores(graph);
        let score = |u: usize| scores.get(u).copied().unwrap_or(f64::NEG_INFINITY);
        let mut ranked = nodes.to_vec();
        ranked.sort_by(|&a, &b| score(b).total_cmp(&score(a)).then(a.cmp(&b)));
        ranked
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Degree,
    Eigenvector,
    Betweenness,
    Closeness,
    PageRank,
    /// Mean position across all the other metrics
    Average,
}

impl Metric {
    /// Every metric that scores the graph directly.
    pub fn base_metrics() -> impl Iterator<Item = Metric> {
        Metric::iter().filter(|m| *m != Metric::Average)
    }
}

impl NodeRanking for Metric {
    fn scores(&self, graph: &WeightedGraph) -> Vec<f64> {
        match self {
            Metric::Degree => degree(graph),
            Metric::Eigenvector => eigenvector(graph),
            Metric::Betweenness => betweenness(graph),
            Metric::Closeness => closeness(graph),
            Metric::PageRank => pagerank(graph),
            Metric::Average => {
                // Negated so the lowest mean position scores highest
                average_positions(graph).into_iter().map(|p| -p).collect()
            }
        }
    }
}

/// 1-based position of each node under `metric` (1 = most important).
pub fn positions(metric: Metric, graph: &WeightedGraph) -> Vec<usize> {
    let all: Vec<usize> = (0..graph.node_count()).collect();
    let mut pos = vec![0; all.len()];
    for (rank, node) in metric.rank(graph, &all).into_iter().enumerate() {
        pos[node] = rank + 1;
    }
    pos
}

pub fn average_positions(graph: &WeightedGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut sum = vec![0.0; n];
    let mut count = 0.0;
    for metric in Metric::base_metrics() {
        for (node, p) in positions(metric, graph).into_iter().enumerate() {
            sum[node] += p as f64;
        }
        count += 1.0;
    }
    sum.into_iter().map(|s| s / count).collect()
}

fn degree(graph: &WeightedGraph) -> Vec<f64> {
    (0..graph.node_count()).map(|u| graph.degree(u)).collect()
}

/// Dominant eigenvector of the in-edge weights via shifted power iteration.
fn eigenvector(graph: &WeightedGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut x = vec![1.0 / n as f64; n];

    for _ in 0..EIGENVECTOR_MAX_ITER {
        let mut next = x.clone();
        for (u, v, w) in graph.edges() {
            next[v] += w * x[u];
        }
        let norm = next.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return next;
        }
        next.iter_mut().for_each(|v| *v /= norm);

        let delta: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
        x = next;
        if delta < n as f64 * EIGENVECTOR_TOL {
            break;
        }
    }
    x
}

/// Path cost used by the distance-based metrics: strong pairs are "close".
#[inline(always)]
fn path_cost(w: f64) -> f64 {
    1.0 - w
}

/// Brandes' algorithm on the `1 - w` path costs.
fn betweenness(graph: &WeightedGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut centrality = vec![0.0; n];

    for s in 0..n {
        let mut dist = vec![f64::INFINITY; n];
        let mut sigma = vec![0.0; n];
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut settled = vec![false; n];
        let mut order = Vec::with_capacity(n);

        dist[s] = 0.0;
        sigma[s] = 1.0;

        loop {
            let next = (0..n)
                .filter(|&u| !settled[u] && dist[u].is_finite())
                .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
            let Some(u) = next else { break };
            settled[u] = true;
            order.push(u);

            for v in 0..n {
                if v == u || settled[v] || graph.weight(u, v) <= 0.0 {
                    continue;
                }
                let alt = dist[u] + path_cost(graph.weight(u, v));
                if alt < dist[v] - PATH_EPS {
                    dist[v] = alt;
                    sigma[v] = sigma[u];
                    preds[v].clear();
                    preds[v].push(u);
                } else if (alt - dist[v]).abs() <= PATH_EPS {
                    sigma[v] += sigma[u];
                    preds[v].push(u);
                }
            }
        }

        let mut delta = vec![0.0; n];
        for &w in order.iter().rev() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        centrality.iter_mut().for_each(|c| *c *= scale);
    }
    centrality
}

/// Inverse of the summed shortest-path cost to every reachable node.
fn closeness(graph: &WeightedGraph) -> Vec<f64> {
    let costs = graph.reweighted(path_cost);
    (0..graph.node_count())
        .map(|u| {
            let reach = dijkstra(&costs, NodeIndex::new(u), None, |e| *e.weight());
            let total: f64 = reach.values().sum();
            if total > 0.0 {
                1.0 / total
            } else {
                0.0
            }
        })
        .collect()
}

/// PageRank over the `1 - w` weights with uniform teleport and dangling mass.
fn pagerank(graph: &WeightedGraph) -> Vec<f64> {
    let n = graph.node_count();
    let uniform = 1.0 / n as f64;

    let weights: Vec<Vec<f64>> = (0..n)
        .map(|u| {
            (0..n)
                .map(|v| {
                    let w = graph.weight(u, v);
                    if w > 0.0 {
                        path_cost(w).max(0.0)
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();
    let out_sums: Vec<f64> = weights.iter().map(|row| row.iter().sum()).collect();

    let mut x = vec![uniform; n];
    for _ in 0..PAGERANK_MAX_ITER {
        let dangling: f64 = (0..n).filter(|&u| out_sums[u] == 0.0).map(|u| x[u]).sum();
        let mut next = vec![(1.0 - PAGERANK_ALPHA) * uniform + PAGERANK_ALPHA * dangling * uniform; n];
        for u in 0..n {
            if out_sums[u] == 0.0 {
                continue;
            }
            for v in 0..n {
                next[v] += PAGERANK_ALPHA * x[u] * weights[u][v] / out_sums[u];
            }
        }
        let err: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
        x = next;
        if err < n as f64 * PAGERANK_TOL {
            break;
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn chain() -> WeightedGraph {
        // 0 -> 1 -> 2, strong first hop
        let p = DMatrix::from_row_slice(3, 3, &[0.0, 0.6, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0]);
        WeightedGraph::from_probabilities(&p)
    }

    #[test]
    fn test_middle_of_chain_has_all_betweenness() {
        let b = betweenness(&chain());
        assert_eq!(b[0], 0.0);
        assert!(b[1] > 0.0);
        assert_eq!(b[2], 0.0);
    }

    #[test]
    fn test_pagerank_is_a_distribution() {
        let pr = pagerank(&chain());
        let total: f64 = pr.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}

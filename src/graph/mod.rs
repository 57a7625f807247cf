pub mod bisection;
pub mod ranking;

use crate::model::TextModel;
use nalgebra::DMatrix;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// Directed symbol-adjacency graph weighted by pair probability.
///
/// Node `i` carries symbol id `i`. Edge weights are mirrored in a dense
/// table so lookups during bisection and placement are O(1).
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    graph: DiGraph<usize, f64>,
    weights: Vec<f64>,
    n: usize,
}

impl WeightedGraph {
    pub fn from_probabilities(p: &DMatrix<f64>) -> Self {
        let n = p.nrows();
        let mut graph = DiGraph::with_capacity(n, n * n);
        let nodes: Vec<NodeIndex> = (0..n).map(|id| graph.add_node(id)).collect();
        let mut weights = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..n {
                let w = p[(i, j)];
                if w > 0.0 {
                    graph.add_edge(nodes[i], nodes[j], w);
                    weights[i * n + j] = w;
                }
            }
        }

        Self { graph, weights, n }
    }

    pub fn from_model(model: &TextModel) -> Self {
        Self::from_probabilities(&model.pair_probabilities)
    }

    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn inner(&self) -> &DiGraph<usize, f64> {
        &self.graph
    }

    #[inline(always)]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.weights[from * self.n + to]
    }

    /// Weight of both directions between two nodes.
    #[inline(always)]
    pub fn mutual_weight(&self, a: usize, b: usize) -> f64 {
        self.weight(a, b) + self.weight(b, a)
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    pub fn out_weight(&self, node: usize) -> f64 {
        (0..self.n).map(|j| self.weight(node, j)).sum()
    }

    pub fn in_weight(&self, node: usize) -> f64 {
        (0..self.n).map(|i| self.weight(i, node)).sum()
    }

    /// Weighted in + out degree. Self-loops count in both directions.
    pub fn degree(&self, node: usize) -> f64 {
        self.out_weight(node) + self.in_weight(node)
    }

    pub fn total_weight(&self) -> f64 {
        self.edges().map(|(_, _, w)| w).sum()
    }

    /// Total weight of the subgraph induced by `nodes`.
    pub fn sum_within(&self, nodes: &[usize]) -> f64 {
        let mask = self.membership(nodes);
        self.edges()
            .filter(|&(u, v, _)| mask[u] && mask[v])
            .map(|(_, _, w)| w)
            .sum()
    }

    /// Weight of every edge running between the two sets, in either direction.
    pub fn sum_between(&self, a: &[usize], b: &[usize]) -> f64 {
        let in_a = self.membership(a);
        let in_b = self.membership(b);
        self.edges()
            .filter(|&(u, v, _)| (in_a[u] && in_b[v]) || (in_b[u] && in_a[v]))
            .map(|(_, _, w)| w)
            .sum()
    }

    /// Copy of the graph with every edge weight passed through `f`.
    pub fn reweighted<F: Fn(f64) -> f64>(&self, f: F) -> DiGraph<usize, f64> {
        self.graph.map(|_, &id| id, |_, &w| f(w))
    }

    fn membership(&self, nodes: &[usize]) -> Vec<bool> {
        let mut mask = vec![false; self.n];
        for &u in nodes {
            mask[u] = true;
        }
        mask
    }
}

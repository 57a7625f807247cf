pub mod plan;

use crate::error::{KeyGraphError, KgResult};
use crate::geometry::KeyboardGeometry;
use crate::graph::WeightedGraph;
use tracing::debug;

pub use plan::{Cell, PlacementPlan, PlacementStep, ScoringRule, Tier};

/// One hand's slot grid, `None` where nothing is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<usize>>,
}

impl HandGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.cells[row * self.cols + col]
    }

    #[inline(always)]
    pub fn set(&mut self, (row, col): Cell, node: usize) {
        self.cells[row * self.cols + col] = Some(node);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn placed(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().flatten().copied()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn column(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).filter_map(move |r| self.get(r, col))
    }
}

/// Fills a hand grid from `ranked` (most important first) following `plan`.
///
/// Nodes left over once the plan runs out of slots are not placed; slots
/// left over once the nodes run out stay empty.
pub fn place_hand(graph: &WeightedGraph, ranked: &[usize], plan: &PlacementPlan) -> HandGrid {
    let mut grid = HandGrid::new(plan.rows, plan.cols);
    let mut remaining: Vec<usize> = ranked.to_vec();

    for step in &plan.steps {
        if remaining.is_empty() {
            break;
        }

        let ordered = order_candidates(graph, &grid, plan, step.rule, &remaining);
        for (&cell, &node) in step.slots.iter().zip(&ordered) {
            grid.set(cell, node);
            debug!("{} tier: node {} -> {:?}", step.tier, node, cell);
        }

        let taken = step.slots.len().min(ordered.len());
        remaining.retain(|n| !ordered[..taken].contains(n));
    }

    grid
}

fn order_candidates(
    graph: &WeightedGraph,
    grid: &HandGrid,
    plan: &PlacementPlan,
    rule: ScoringRule,
    remaining: &[usize],
) -> Vec<usize> {
    let (targets, avoid): (Vec<usize>, Vec<usize>) = match rule {
        ScoringRule::Ranked => return remaining.to_vec(),
        ScoringRule::ColumnReach { column } => {
            let targets = plan
                .finger_columns()
                .filter(|&c| c != column)
                .filter_map(|c| grid.get(plan::HOME_ROW, c))
                .collect();
            let avoid = grid.get(plan::HOME_ROW, column).into_iter().collect();
            (targets, avoid)
        }
        ScoringRule::StretchColumn { index_column } => {
            let avoid: Vec<usize> = grid.column(index_column).collect();
            let targets = grid.placed().filter(|n| !avoid.contains(n)).collect();
            (targets, avoid)
        }
    };

    let mut scored: Vec<(usize, f64)> = remaining
        .iter()
        .map(|&c| {
            let pull: f64 = targets.iter().map(|&t| graph.mutual_weight(c, t)).sum();
            let push: f64 = avoid.iter().map(|&a| graph.mutual_weight(c, a)).sum();
            (c, pull - push)
        })
        .collect();
    // Stable: equal scores keep ranked order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(c, _)| c).collect()
}

/// Joins the two hand grids into a row-major layout over `geometry`.
///
/// The right hand is mirrored: its little-finger column lands on the outer
/// edge, its stretch column next to the left hand's.
pub fn assemble_layout(
    geometry: &KeyboardGeometry,
    left: &HandGrid,
    right: &HandGrid,
) -> KgResult<Vec<usize>> {
    let rows = geometry.rows();
    let columns = [geometry.hand_columns(0), geometry.hand_columns(1)];

    let mut layout = Vec::with_capacity(geometry.key_count());
    for (slot, key) in geometry.keys.iter().enumerate() {
        let hand = key.hand as usize;
        let grid = if hand == 0 { left } else { right };
        let row = rows.iter().position(|&r| r == key.row);
        let col = columns[hand].iter().position(|&c| c == key.col).map(|c| {
            if hand == 0 {
                c
            } else {
                columns[hand].len() - 1 - c
            }
        });

        let node = match (row, col) {
            (Some(r), Some(c)) if r < grid.rows() && c < grid.cols() => grid.get(r, c),
            _ => None,
        };
        layout.push(node.ok_or_else(|| {
            KeyGraphError::Validation(format!(
                "slot {} (row {}, col {}) was left empty by greedy placement",
                slot, key.row, key.col
            ))
        })?);
    }

    Ok(layout)
}

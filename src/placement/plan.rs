use crate::error::{KeyGraphError, KgResult};
use strum_macros::Display;

/// Hand-local `(row, col)`. Column 0 is the little finger, the last column is the stretch.
pub type Cell = (usize, usize);

pub const TOP_ROW: usize = 0;
pub const HOME_ROW: usize = 1;
pub const BOTTOM_ROW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Tier {
    Home,
    Reach,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringRule {
    /// Candidates keep their ranked order.
    Ranked,
    /// Links to the other fingers' home keys count for, links to this
    /// column's home key count against.
    ColumnReach { column: usize },
    /// Links to placed keys off the index column count for, links to the
    /// index column count against.
    StretchColumn { index_column: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementStep {
    pub tier: Tier,
    /// Filled in order: best candidate first.
    pub slots: Vec<Cell>,
    pub rule: ScoringRule,
}

/// Ordered placement policy for one hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPlan {
    pub rows: usize,
    pub cols: usize,
    pub steps: Vec<PlacementStep>,
}

impl PlacementPlan {
    /// 3x5 hand: four finger columns plus the stretch column.
    pub fn standard() -> Self {
        Self::build(5)
    }

    pub fn for_grid(rows: usize, cols: usize) -> KgResult<Self> {
        if rows != 3 {
            return Err(KeyGraphError::Validation(format!(
                "hand grids need top, home and bottom rows, got {} row(s)",
                rows
            )));
        }
        if cols < 2 {
            return Err(KeyGraphError::Validation(format!(
                "hand grids need a finger column and a stretch column, got {} column(s)",
                cols
            )));
        }
        Ok(Self::build(cols))
    }

    fn build(cols: usize) -> Self {
        let stretch = cols - 1;
        let index = cols - 2;
        // Index finger first, little finger last
        let fingers: Vec<usize> = (0..stretch).rev().collect();

        let mut steps = Vec::with_capacity(fingers.len() + 2);

        steps.push(PlacementStep {
            tier: Tier::Home,
            slots: fingers.iter().map(|&c| (HOME_ROW, c)).collect(),
            rule: ScoringRule::Ranked,
        });

        for &c in &fingers {
            steps.push(PlacementStep {
                tier: Tier::Reach,
                slots: vec![(TOP_ROW, c), (BOTTOM_ROW, c)],
                rule: ScoringRule::ColumnReach { column: c },
            });
        }

        steps.push(PlacementStep {
            tier: Tier::Stretch,
            slots: vec![(HOME_ROW, stretch), (TOP_ROW, stretch), (BOTTOM_ROW, stretch)],
            rule: ScoringRule::StretchColumn {
                index_column: index,
            },
        });

        Self {
            rows: 3,
            cols,
            steps,
        }
    }

    #[inline(always)]
    pub fn finger_columns(&self) -> std::ops::Range<usize> {
        0..self.cols - 1
    }
}

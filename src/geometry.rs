use crate::error::{KeyGraphError, KgResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyNode {
    pub hand: u8,   // 0 = Left, 1 = Right
    pub finger: u8, // 0=Thumb, 1=Index, 2=Middle, 3=Ring, 4=Pinky
    pub row: i8,    // 0=Top, 1=Home, 2=Bottom
    pub col: i8,    // Visual column index

    #[serde(default)]
    pub is_stretch: bool,

    /// Raw ergonomic weight of the slot. Higher is easier to reach.
    #[serde(default)]
    pub preference: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardGeometry {
    /// Slots in row-major order. A layout is indexed the same way.
    pub keys: Vec<KeyNode>,
    #[serde(default = "default_home_row")]
    pub home_row: i8,
}

fn default_home_row() -> i8 {
    1
}

const STANDARD_FINGERS: [u8; 10] = [4, 3, 2, 1, 1, 1, 1, 2, 3, 4];

#[rustfmt::skip]
const STANDARD_PREFERENCE: [[f64; 10]; 3] = [
    [2.0, 3.0, 4.0, 5.0, 1.0, 1.0, 5.0, 4.0, 3.0, 2.0],
    [6.0, 7.0, 8.0, 9.0, 2.0, 2.0, 9.0, 8.0, 7.0, 6.0],
    [2.0, 3.0, 4.0, 5.0, 1.0, 1.0, 5.0, 4.0, 3.0, 2.0],
];

impl KeyboardGeometry {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KgResult<Self> {
        let content = fs::read_to_string(path)?;
        let geom: Self = serde_json::from_str(&content)?;
        geom.validate()?;
        Ok(geom)
    }

    /// The 3x10 split grid: 5 columns per hand, inner column of each hand is a stretch.
    pub fn standard() -> Self {
        let mut keys = Vec::with_capacity(30);
        for (row, prefs) in STANDARD_PREFERENCE.iter().enumerate() {
            for col in 0..10 {
                keys.push(KeyNode {
                    hand: if col < 5 { 0 } else { 1 },
                    finger: STANDARD_FINGERS[col],
                    row: row as i8,
                    col: col as i8,
                    is_stretch: col == 4 || col == 5,
                    preference: prefs[col],
                });
            }
        }
        Self { keys, home_row: 1 }
    }

    pub fn validate(&self) -> KgResult<()> {
        if self.keys.is_empty() {
            return Err(KeyGraphError::Validation("geometry has no keys".into()));
        }
        let mut seen = HashSet::new();
        for (i, k) in self.keys.iter().enumerate() {
            if !seen.insert((k.row, k.col)) {
                return Err(KeyGraphError::Validation(format!(
                    "key {} duplicates position (row {}, col {})",
                    i, k.row, k.col
                )));
            }
            if k.hand > 1 {
                return Err(KeyGraphError::Validation(format!(
                    "key {} has hand {} (expected 0 or 1)",
                    i, k.hand
                )));
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn slot_at(&self, row: i8, col: i8) -> Option<usize> {
        self.keys.iter().position(|k| k.row == row && k.col == col)
    }

    #[inline(always)]
    pub fn is_same_finger(&self, a: usize, b: usize) -> bool {
        let (ka, kb) = (&self.keys[a], &self.keys[b]);
        ka.hand == kb.hand && ka.finger == kb.finger
    }

    /// Home-row slots outside the stretch columns.
    pub fn anchor_slots(&self) -> Vec<usize> {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.row == self.home_row && !k.is_stretch)
            .map(|(i, _)| i)
            .collect()
    }

    /// Distinct columns of one hand, ascending.
    pub fn hand_columns(&self, hand: u8) -> Vec<i8> {
        let mut cols: Vec<i8> = self
            .keys
            .iter()
            .filter(|k| k.hand == hand)
            .map(|k| k.col)
            .collect();
        cols.sort_unstable();
        cols.dedup();
        cols
    }

    pub fn rows(&self) -> Vec<i8> {
        let mut rows: Vec<i8> = self.keys.iter().map(|k| k.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}

#![allow(dead_code)] // Not every test binary uses every helper

use keygraph::geometry::{KeyNode, KeyboardGeometry};

/// Builder for KeyNode to clean up tests
pub struct KeyBuilder {
    node: KeyNode,
}

impl KeyBuilder {
    pub fn new(row: i8, col: i8) -> Self {
        Self {
            node: KeyNode {
                hand: 0,
                finger: 1,
                row,
                col,
                is_stretch: false,
                preference: 1.0,
            },
        }
    }

    pub fn hand(mut self, hand: u8) -> Self {
        self.node.hand = hand;
        self
    }

    pub fn finger(mut self, finger: u8) -> Self {
        self.node.finger = finger;
        self
    }

    pub fn stretch(mut self, is_stretch: bool) -> Self {
        self.node.is_stretch = is_stretch;
        self
    }

    pub fn preference(mut self, preference: f64) -> Self {
        self.node.preference = preference;
        self
    }

    pub fn build(self) -> KeyNode {
        self.node
    }
}

/// Split grid with `cols` columns per hand; the inner column of each hand is a stretch.
pub fn split_grid(rows: i8, cols: i8) -> KeyboardGeometry {
    let mut keys = Vec::new();
    for r in 0..rows {
        for c in 0..cols * 2 {
            let hand = if c < cols { 0 } else { 1 };
            let local = if hand == 0 { c } else { 2 * cols - 1 - c };
            keys.push(
                KeyBuilder::new(r, c)
                    .hand(hand)
                    .finger((cols - 1 - local).max(1) as u8)
                    .stretch(local == cols - 1)
                    .preference(if r == 1 { 2.0 } else { 1.0 })
                    .build(),
            );
        }
    }
    KeyboardGeometry { keys, home_row: 1 }
}

/// Two rows of three keys: slots 3..6 are the home row.
pub fn six_slot_geometry() -> KeyboardGeometry {
    let mut keys = Vec::new();
    for r in 0..2i8 {
        for c in 0..3i8 {
            keys.push(
                KeyBuilder::new(r, c)
                    .hand(if c < 2 { 0 } else { 1 })
                    .finger((c + 1) as u8)
                    .preference(if r == 1 { 3.0 } else { 1.0 })
                    .build(),
            );
        }
    }
    KeyboardGeometry { keys, home_row: 1 }
}

pub const ALLOWED: &str = "abcdefghijklmnopqrstuvwxyz,.-:";

/// Covers all 26 letters and `,.-:`.
pub fn pangram_text() -> String {
    "The quick brown fox jumps over the lazy dog. Pack my box with five dozen \
     liquor jugs, said Jim-Bob: how vexingly quick daft zebras jump. "
        .repeat(20)
}

/// Four symbols where `a -> b` dominates.
pub fn four_symbol_text() -> String {
    "abcabdab".repeat(50)
}

pub fn six_symbol_text() -> String {
    "abcdefacebdfadbecfaf".repeat(10)
}

pub fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

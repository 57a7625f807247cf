use crate::geometry::KeyboardGeometry;
use fastrand::Rng;

/// Partition of slots into home-row anchors and everything else.
///
/// Swaps only ever happen within one class, so a symbol on an anchor slot
/// can move to another anchor but never off the home row.
#[derive(Debug, Clone)]
pub struct SlotClasses {
    anchors: Vec<usize>,
    others: Vec<usize>,
    is_anchor: Vec<bool>,
}

impl SlotClasses {
    pub fn new(key_count: usize, anchors: &[usize]) -> Self {
        let mut is_anchor = vec![false; key_count];
        for &a in anchors {
            is_anchor[a] = true;
        }
        let others = (0..key_count).filter(|&s| !is_anchor[s]).collect();
        let mut anchors = anchors.to_vec();
        anchors.sort_unstable();
        anchors.dedup();
        Self {
            anchors,
            others,
            is_anchor,
        }
    }

    pub fn from_geometry(geom: &KeyboardGeometry) -> Self {
        Self::new(geom.key_count(), &geom.anchor_slots())
    }

    #[inline(always)]
    pub fn key_count(&self) -> usize {
        self.is_anchor.len()
    }

    #[inline(always)]
    pub fn is_anchor(&self, slot: usize) -> bool {
        self.is_anchor[slot]
    }

    pub fn anchors(&self) -> &[usize] {
        &self.anchors
    }

    pub fn class_of(&self, slot: usize) -> &[usize] {
        if self.is_anchor[slot] {
            &self.anchors
        } else {
            &self.others
        }
    }

    /// A uniformly random slot and a partner drawn from its class (possibly itself).
    pub fn sample_pair(&self, rng: &mut Rng) -> (usize, usize) {
        let a = rng.usize(0..self.key_count());
        let class = self.class_of(a);
        let b = class[rng.usize(0..class.len())];
        (a, b)
    }
}

/// Swaps two slots of the same class.
pub fn mutate(layout: &mut [usize], classes: &SlotClasses, rng: &mut Rng) {
    let (a, b) = classes.sample_pair(rng);
    layout.swap(a, b);
}

/// Checks that `layout` uses every id in `0..layout.len()` exactly once.
pub fn is_permutation(layout: &[usize]) -> bool {
    let mut seen = vec![false; layout.len()];
    for &s in layout {
        if s >= seen.len() || seen[s] {
            return false;
        }
        seen[s] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_anchor_class() {
        let classes = SlotClasses::from_geometry(&KeyboardGeometry::standard());
        assert_eq!(classes.anchors(), &[10, 11, 12, 13, 16, 17, 18, 19]);
        assert!(!classes.is_anchor(14));
        assert_eq!(classes.class_of(0).len(), 22);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1]));
        assert!(!is_permutation(&[0, 0, 1]));
        assert!(!is_permutation(&[0, 3, 1]));
    }
}

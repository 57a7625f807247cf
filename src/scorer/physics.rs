use crate::geometry::KeyboardGeometry;

/// Geometry-only cost tables, computed once per keyboard.
#[derive(Debug, Clone)]
pub struct CostMatrices {
    pub key_count: usize,
    /// Slot-to-slot distance scaled to [0, 1], row-major `n x n`
    pub distance: Vec<f64>,
    /// 1.0 where both slots belong to the same finger of the same hand
    pub same_finger: Vec<f64>,
    /// Per-slot preference scaled by the largest preference
    pub preferred: Vec<f64>,
}

#[inline(always)]
fn grid_distance(geom: &KeyboardGeometry, a: usize, b: usize) -> f64 {
    let (ka, kb) = (&geom.keys[a], &geom.keys[b]);
    let dr = f64::from(ka.row) - f64::from(kb.row);
    let dc = f64::from(ka.col) - f64::from(kb.col);
    (dr * dr + dc * dc).sqrt()
}

impl CostMatrices {
    pub fn new(geom: &KeyboardGeometry) -> Self {
        let n = geom.key_count();

        // 1. Raw distances, then scale by the farthest pair
        let mut distance = vec![0.0; n * n];
        let mut max_dist: f64 = 0.0;
        for i in 0..n {
            for j in 0..n {
                let d = grid_distance(geom, i, j);
                distance[i * n + j] = d;
                max_dist = max_dist.max(d);
            }
        }
        if max_dist > 0.0 {
            distance.iter_mut().for_each(|d| *d /= max_dist);
        }

        // 2. Same finger
        let mut same_finger = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if geom.is_same_finger(i, j) {
                    same_finger[i * n + j] = 1.0;
                }
            }
        }

        // 3. Preferred positions
        let max_pref = geom
            .keys
            .iter()
            .map(|k| k.preference)
            .fold(0.0_f64, f64::max);
        let preferred = geom
            .keys
            .iter()
            .map(|k| if max_pref > 0.0 { k.preference / max_pref } else { 0.0 })
            .collect();

        Self {
            key_count: n,
            distance,
            same_finger,
            preferred,
        }
    }

    #[inline(always)]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.distance[a * self.key_count + b]
    }

    #[inline(always)]
    pub fn same_finger(&self, a: usize, b: usize) -> f64 {
        self.same_finger[a * self.key_count + b]
    }
}

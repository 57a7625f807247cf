use crate::error::{KeyGraphError, KgResult};
use nalgebra::linalg::{Schur, SVD};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

const MAX_DECOMPOSITION_ITERATIONS: usize = 10_000;

/// Left eigenvector of `transitions` for the eigenvalue closest to 1, summing to 1.
///
/// The eigenvalues come from the real Schur form of `Aᵀ`; the eigenvector is
/// the null direction of `Aᵀ - λI`, read off the SVD as the right singular
/// vector with the smallest singular value.
pub fn stationary_distribution(
    transitions: &DMatrix<f64>,
    tolerance: f64,
) -> KgResult<DVector<f64>> {
    let n = transitions.nrows();
    let at = transitions.transpose();

    let schur = Schur::try_new(at.clone(), f64::EPSILON, MAX_DECOMPOSITION_ITERATIONS)
        .ok_or_else(|| KeyGraphError::Model("Schur decomposition did not converge".into()))?;

    let mut best: Option<(f64, f64)> = None; // (distance to 1, real part)
    for lambda in schur.complex_eigenvalues().iter() {
        let dist = ((lambda.re - 1.0).powi(2) + lambda.im.powi(2)).sqrt();
        if dist <= tolerance && best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, lambda.re));
        }
    }
    let (dist, lambda) = best.ok_or_else(|| {
        KeyGraphError::Model(format!(
            "no eigenvalue within {} of 1.0; the chain has no stationary distribution",
            tolerance
        ))
    })?;
    debug!("Selected eigenvalue {:.6} (|λ - 1| = {:.2e})", lambda, dist);

    let shifted = at - DMatrix::<f64>::identity(n, n) * lambda;
    let svd = SVD::try_new(shifted, false, true, f64::EPSILON, MAX_DECOMPOSITION_ITERATIONS)
        .ok_or_else(|| KeyGraphError::Model("SVD did not converge".into()))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| KeyGraphError::Model("SVD returned no right singular vectors".into()))?;

    let null_idx = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .ok_or_else(|| KeyGraphError::Model("empty transition matrix".into()))?;

    let vector = DVector::from_iterator(n, v_t.row(null_idx).iter().copied());
    let sum = vector.sum();
    if sum.abs() < 1e-12 {
        return Err(KeyGraphError::Model(
            "eigenvector sums to zero and cannot be normalized".into(),
        ));
    }

    Ok(vector / sum)
}

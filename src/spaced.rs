//! Increasing values with a guaranteed minimum gap.
//!
//! Draw `n` values `x_0 <= x_1 <= … <= x_{n-1}` in `[low, high)` such that
//! `x_{k+1} - x_k >= delta`.
//!
//! When the constraint is tight (`(n-1)·delta == high - low`) the region collapses
//! to the single point `x_k = low + k·delta`, and the last value equals `high`. This
//! is the only case in which `high` is reached.
//!
//! ## Construction
//!
//! Shrink the interval by the mandatory gaps, `space = (high - low) - (n-1)·delta`,
//! draw `n` i.i.d. uniforms on `[0, 1)`, sort them, scale by `space`, and re-inflate
//! with `low + k·delta`. Sorting is a bijection onto the order statistics, so the
//! result is exactly uniform over the constrained region.
//!
//! The k-th coordinate (0-indexed) follows a Beta(k+1, n-k) distribution on
//! `[low + k·delta, high - (n-1-k)·delta]`.

use ndarray::{Array1, Array2, Axis};
use rand::Rng;

use crate::error::{Result, SampleError};

/// One ordered tuple of `n` values with minimum spacing `delta`, using the thread RNG.
pub fn random_spaced(low: f64, high: f64, delta: f64, n: usize) -> Result<Array1<f64>> {
    let mut rng = rand::rng();
    random_spaced_with_rng(low, high, delta, n, &mut rng)
}

/// One ordered tuple of `n` values with minimum spacing `delta`.
///
/// Consumes the same randomness as a batch of size one.
pub fn random_spaced_with_rng<R: Rng + ?Sized>(
    low: f64,
    high: f64,
    delta: f64,
    n: usize,
    rng: &mut R,
) -> Result<Array1<f64>> {
    let batch = random_spaced_batch_with_rng(low, high, delta, n, 1, rng)?;
    Ok(batch.index_axis_move(Axis(0), 0))
}

/// `size` ordered tuples, shape `(size, n)`, using the thread RNG.
pub fn random_spaced_batch(
    low: f64,
    high: f64,
    delta: f64,
    n: usize,
    size: usize,
) -> Result<Array2<f64>> {
    let mut rng = rand::rng();
    random_spaced_batch_with_rng(low, high, delta, n, size, &mut rng)
}

/// `size` ordered tuples, shape `(size, n)`.
///
/// Values lie in `[low, high)`, except under tight packing, where the last
/// column is exactly `high`.
///
/// # Errors
///
/// - [`SampleError::Infeasible`] if `(n-1)·delta > high - low`.
/// - [`SampleError::Domain`] if `n == 0`, or a bound or `delta` is not finite,
///   or `delta < 0`.
pub fn random_spaced_batch_with_rng<R: Rng + ?Sized>(
    low: f64,
    high: f64,
    delta: f64,
    n: usize,
    size: usize,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let space = feasible_space(low, high, delta, n)?;

    let mut data = Vec::with_capacity(size * n);
    let mut row = vec![0.0f64; n];
    for _ in 0..size {
        for u in row.iter_mut() {
            *u = rng.random::<f64>();
        }
        row.sort_unstable_by(f64::total_cmp);
        data.extend(
            row.iter()
                .enumerate()
                .map(|(k, &u)| low + space * u + delta * k as f64),
        );
    }

    Ok(Array2::from_shape_vec((size, n), data)?)
}

/// Mean of the k-th coordinate (0-indexed) of [`random_spaced`].
///
/// That coordinate is Beta(k+1, n-k) on `[low + k·delta, high - (n-1-k)·delta]`,
/// so its mean is `low + k·delta + space·(k+1)/(n+1)`.
///
/// Returns `None` if the parameters are invalid or `k >= n`.
pub fn spaced_marginal_mean(low: f64, high: f64, delta: f64, n: usize, k: usize) -> Option<f64> {
    if k >= n {
        return None;
    }
    let space = feasible_space(low, high, delta, n).ok()?;
    Some(low + k as f64 * delta + space * (k as f64 + 1.0) / (n as f64 + 1.0))
}

fn feasible_space(low: f64, high: f64, delta: f64, n: usize) -> Result<f64> {
    if n == 0 {
        return Err(SampleError::Domain("n must be at least 1".into()));
    }
    if !low.is_finite() || !high.is_finite() {
        return Err(SampleError::Domain(format!(
            "interval bounds must be finite (got [{low}, {high}])"
        )));
    }
    if !delta.is_finite() || delta < 0.0 {
        return Err(SampleError::Domain(format!(
            "delta must be finite and non-negative (got {delta})"
        )));
    }

    let space = high - low - (n - 1) as f64 * delta;
    if space < 0.0 {
        return Err(SampleError::Infeasible {
            low,
            high,
            delta,
            n,
        });
    }
    Ok(space)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn shape_and_spacing() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x1ce1);
        let x = random_spaced_batch_with_rng(0.0, 1.0, 0.2, 3, 10, &mut rng).expect("feasible");
        assert_eq!(x.dim(), (10, 3));
        for row in x.rows() {
            assert!(row[0] >= 0.0);
            assert!(row[2] < 1.0);
            assert!(row[1] - row[0] >= 0.2 - 1e-12);
            assert!(row[2] - row[1] >= 0.2 - 1e-12);
        }
    }

    #[test]
    fn single_draw_matches_first_batch_row() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        let one = random_spaced_with_rng(-5.0, 5.0, 1.0, 4, &mut a).expect("feasible");
        let batch = random_spaced_batch_with_rng(-5.0, 5.0, 1.0, 4, 1, &mut b).expect("feasible");
        assert_eq!(one.len(), 4);
        assert_eq!(one, batch.row(0));
    }

    #[test]
    fn infeasible_spacing_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = random_spaced_with_rng(0.0, 10.0, 6.0, 3, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SampleError::Infeasible {
                low: 0.0,
                high: 10.0,
                delta: 6.0,
                n: 3
            }
        );
        // (3-1)*4 = 8 fits in 10.
        assert!(random_spaced_with_rng(0.0, 10.0, 4.0, 3, &mut rng).is_ok());
    }

    #[test]
    fn invalid_parameters_are_domain_errors() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for (low, high, delta, n) in [
            (0.0, 1.0, 0.1, 0),
            (0.0, 1.0, -0.1, 2),
            (0.0, f64::INFINITY, 0.1, 2),
            (f64::NAN, 1.0, 0.1, 2),
            (0.0, 1.0, f64::NAN, 2),
        ] {
            assert!(matches!(
                random_spaced_with_rng(low, high, delta, n, &mut rng),
                Err(SampleError::Domain(_))
            ));
        }
    }

    #[test]
    fn failed_call_does_not_touch_rng() {
        let mut a = ChaCha8Rng::seed_from_u64(77);
        let b = a.clone();
        assert!(random_spaced_batch_with_rng(0.0, 1.0, 1.0, 3, 100, &mut a).is_err());
        assert_eq!(a, b);
    }

    #[test]
    fn tight_packing_is_deterministic() {
        // space == 0: every draw is exactly low + k·delta, so the last value is high.
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let x = random_spaced_with_rng(0.0, 3.0, 1.5, 3, &mut rng).expect("feasible");
        assert_eq!(x.to_vec(), vec![0.0, 1.5, 3.0]);
    }

    #[test]
    fn empty_batch() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let x = random_spaced_batch_with_rng(0.0, 1.0, 0.1, 4, 0, &mut rng).expect("feasible");
        assert_eq!(x.dim(), (0, 4));
    }

    #[test]
    fn column_means_follow_beta_order_statistics() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x1ce1_ceba_b1e);
        let n = 3;
        let x = random_spaced_batch_with_rng(0.0, 1.0, 0.2, n, 50_000, &mut rng).expect("feasible");
        let means = x.mean_axis(Axis(0)).expect("non-empty batch");
        for k in 0..n {
            let expected = spaced_marginal_mean(0.0, 1.0, 0.2, n, k).expect("valid");
            assert!(
                (means[k] - expected).abs() < 5e-3,
                "column {k}: mean {} vs expected {expected}",
                means[k]
            );
        }
    }

    #[test]
    fn marginal_mean_values() {
        // space = 0.6; means are 0.15, 0.5, 0.85.
        let m: Vec<f64> = (0..3)
            .map(|k| spaced_marginal_mean(0.0, 1.0, 0.2, 3, k).expect("valid"))
            .collect();
        assert!((m[0] - 0.15).abs() < 1e-12);
        assert!((m[1] - 0.5).abs() < 1e-12);
        assert!((m[2] - 0.85).abs() < 1e-12);
        assert_eq!(spaced_marginal_mean(0.0, 1.0, 0.2, 3, 3), None);
        assert_eq!(spaced_marginal_mean(0.0, 1.0, 0.6, 3, 0), None);
    }
}

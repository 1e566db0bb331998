//! Draws that `rand` itself does not provide with a runtime dimension.
//!
//! - [`dirichlet_ones`]: one draw from the symmetric Dirichlet(1, …, 1), i.e.
//!   a point uniform on the standard (m-1)-simplex.
//! - [`multinomial`]: split a fixed count across categories.
//!
//! `rand_distr::Dirichlet` is parameterized by a const array length, which does
//! not fit vertex counts only known at runtime. Gamma(1, 1) is Exp(1), so
//! normalizing `m` independent `Exp1` variates gives the same law.

use rand::Rng;
use rand_distr::{Binomial, Distribution, Exp1};

use crate::error::{Result, SampleError};

/// Draw barycentric weights from Dirichlet(1, …, 1) with `m` components.
///
/// The weights are non-negative and sum to 1 (up to rounding).
/// For `m == 0` the result is empty.
pub fn dirichlet_ones<R: Rng + ?Sized>(m: usize, rng: &mut R) -> Vec<f64> {
    let mut w: Vec<f64> = (0..m).map(|_| Exp1.sample(rng)).collect();
    let total: f64 = w.iter().sum();
    if total > 0.0 {
        for x in &mut w {
            *x /= total;
        }
    } else if m > 0 {
        // Every Exp1 draw underflowed to zero; fall back to the barycenter.
        w.fill(1.0 / m as f64);
    }
    w
}

/// Draw multinomial counts: `total` trials over categories with probabilities `probs`.
///
/// `probs` need not be normalized but must be finite, non-negative and have a
/// positive sum. The returned counts always sum to exactly `total`.
///
/// Uses the conditional-binomial construction: category `i` receives
/// `Binomial(remaining, p_i / mass_left)`, and the last category with any mass
/// takes whatever remains.
pub fn multinomial<R: Rng + ?Sized>(total: u64, probs: &[f64], rng: &mut R) -> Result<Vec<u64>> {
    check_weights(probs)?;

    let mut counts = vec![0u64; probs.len()];
    let last = probs
        .iter()
        .rposition(|&p| p > 0.0)
        .ok_or_else(|| SampleError::Domain("probabilities must have a positive sum".into()))?;

    let mut remaining = total;
    let mut mass_left: f64 = probs.iter().sum();

    for (i, &p) in probs.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if i == last {
            counts[i] = remaining;
            break;
        }
        if p == 0.0 {
            continue;
        }
        // Rounding can push the ratio a hair past 1.
        let q = (p / mass_left).clamp(0.0, 1.0);
        let bin = Binomial::new(remaining, q).map_err(|e| SampleError::Domain(e.to_string()))?;
        let c = bin.sample(rng);
        counts[i] = c;
        remaining -= c;
        mass_left -= p;
    }

    Ok(counts)
}

/// Validate a weight vector: finite, non-negative, positive sum.
pub(crate) fn check_weights(w: &[f64]) -> Result<()> {
    if let Some(&bad) = w.iter().find(|x| !x.is_finite()) {
        return Err(SampleError::Domain(format!(
            "weights must be finite (got {bad})"
        )));
    }
    if let Some(&bad) = w.iter().find(|&&x| x < 0.0) {
        return Err(SampleError::Domain(format!(
            "weights must be non-negative (got {bad})"
        )));
    }
    let sum: f64 = w.iter().sum();
    if !(sum > 0.0 && sum.is_finite()) {
        return Err(SampleError::Domain(format!(
            "weights must have a positive, finite sum (got {sum})"
        )));
    }
    Ok(())
}

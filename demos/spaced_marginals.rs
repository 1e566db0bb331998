//! Empirical column means of `random_spaced` against their Beta order-statistic means.
//!
//! Each coordinate k of `random_spaced(low, high, delta, n)` is Beta(k+1, n-k) on
//! `[low + k·delta, high - (n-1-k)·delta]`.

use ndarray::Axis;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ransu::{random_spaced_batch_with_rng, spaced_marginal_mean};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (low, high, delta, n, size) = (0.0, 100.0, 10.0, 5, 50_000);

    let mut rng = ChaCha8Rng::seed_from_u64(0x1ce1_ceba_b1e);
    let x = random_spaced_batch_with_rng(low, high, delta, n, size, &mut rng)?;
    let means = x.mean_axis(Axis(0)).ok_or("empty batch")?;

    println!("random_spaced(low={low}, high={high}, delta={delta}, n={n}, size={size})");
    for (k, &m) in means.iter().enumerate() {
        let left = low + k as f64 * delta;
        let right = high - (n - 1 - k) as f64 * delta;
        let expected = spaced_marginal_mean(low, high, delta, n, k).ok_or("infeasible")?;
        println!("  k={k}  support=[{left:6.2}, {right:6.2}]  mean={m:8.4}  beta mean={expected:8.4}");
    }

    let min_gap = x
        .rows()
        .into_iter()
        .flat_map(|r| (1..r.len()).map(move |k| r[k] - r[k - 1]))
        .fold(f64::INFINITY, f64::min);
    println!();
    println!("smallest observed gap: {min_gap:.6} (delta = {delta})");

    Ok(())
}

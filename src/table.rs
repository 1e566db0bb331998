//! Random contingency tables with fixed marginals.
//!
//! Given the level counts of `m` categorical variables (all summing to the same
//! `N`), draw a random `m`-dimensional table whose axis-`k` marginal equals
//! `sums[k]`.
//!
//! Method: lay out `N` observations as `m` label rows, where row `k` repeats
//! level `j` exactly `sums[k][j]` times. Shuffle every row but the last (the last
//! is the reference order) and cross-tabulate the columns. Time and space per
//! table are O(m·N). This is simple rather than fast; there are far better
//! algorithms for large `N`.

use ndarray::{ArrayD, ArrayViewD, IxDyn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SampleError};

/// Random table with the given marginal sums, using the thread RNG.
pub fn random_table<S: AsRef<[u64]>>(sums: &[S], size: Option<usize>) -> Result<ArrayD<u64>> {
    let mut rng = rand::rng();
    random_table_with_rng(sums, size, &mut rng)
}

/// Random table with the given marginal sums.
///
/// The result has shape `(len(sums[0]), …, len(sums[m-1]))`, or that shape with
/// a leading `size` axis when `size` is given.
///
/// # Errors
///
/// - [`SampleError::Shape`] if `sums` is empty.
/// - [`SampleError::Domain`] if the sums disagree, `N` does not fit in memory,
///   or the number of output cells overflows `usize`.
pub fn random_table_with_rng<S: AsRef<[u64]>, R: Rng + ?Sized>(
    sums: &[S],
    size: Option<usize>,
    rng: &mut R,
) -> Result<ArrayD<u64>> {
    let sums: Vec<&[u64]> = sums.iter().map(AsRef::as_ref).collect();
    let first = sums
        .first()
        .ok_or_else(|| SampleError::Shape("at least one marginal is required".into()))?;
    let n: u64 = first.iter().sum();
    if let Some(bad) = sums.iter().position(|s| s.iter().sum::<u64>() != n) {
        return Err(SampleError::Domain(format!(
            "all marginals must have the same sum (marginal 0 sums to {n}, marginal {bad} does not)"
        )));
    }
    let n = usize::try_from(n)
        .map_err(|_| SampleError::Domain(format!("total count {n} is too large")))?;

    let table_shape: Vec<usize> = sums.iter().map(|s| s.len()).collect();
    let ntables = size.unwrap_or(1);
    let cells = table_shape
        .iter()
        .try_fold(1usize, |acc, &s| acc.checked_mul(s))
        .ok_or_else(|| SampleError::Domain(format!("table shape {table_shape:?} overflows usize")))?;
    let total_cells = ntables.checked_mul(cells).ok_or_else(|| {
        SampleError::Domain(format!(
            "{ntables} tables of shape {table_shape:?} overflow usize"
        ))
    })?;
    tracing::trace!(?table_shape, ntables, total = n, "drawing contingency tables");

    // Row-major strides of one table.
    let mut strides = vec![1usize; table_shape.len()];
    for k in (0..table_shape.len().saturating_sub(1)).rev() {
        strides[k] = strides[k + 1] * table_shape[k + 1];
    }

    let mut labels: Vec<Vec<usize>> = sums
        .iter()
        .map(|s| {
            s.iter()
                .enumerate()
                .flat_map(|(level, &count)| std::iter::repeat(level).take(count as usize))
                .collect()
        })
        .collect();

    let nvars = labels.len();
    let mut out = vec![0u64; total_cells];
    for table in out.chunks_mut(cells.max(1)).take(ntables) {
        for row in labels.iter_mut().take(nvars - 1) {
            row.shuffle(rng);
        }
        for j in 0..n {
            let cell: usize = labels
                .iter()
                .zip(&strides)
                .map(|(row, &stride)| row[j] * stride)
                .sum();
            table[cell] += 1;
        }
    }

    let mut shape = table_shape;
    if let Some(s) = size {
        shape.insert(0, s);
    }
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), out)?)
}

/// Random table with the same marginals as `table`, using the thread RNG.
pub fn random_table_from_table(
    table: ArrayViewD<'_, u64>,
    size: Option<usize>,
) -> Result<ArrayD<u64>> {
    let mut rng = rand::rng();
    random_table_from_table_with_rng(table, size, &mut rng)
}

/// Random table with the same marginals (and shape) as `table`.
pub fn random_table_from_table_with_rng<R: Rng + ?Sized>(
    table: ArrayViewD<'_, u64>,
    size: Option<usize>,
    rng: &mut R,
) -> Result<ArrayD<u64>> {
    random_table_with_rng(&marginals(table)?, size, rng)
}

/// Axis-`k` marginal sums of `table`, for every axis `k`.
pub fn marginals(table: ArrayViewD<'_, u64>) -> Result<Vec<Vec<u64>>> {
    if table.ndim() == 0 {
        return Err(SampleError::Shape(
            "table must have at least one dimension".into(),
        ));
    }
    let mut sums: Vec<Vec<u64>> = table.shape().iter().map(|&len| vec![0; len]).collect();
    for (idx, &v) in table.indexed_iter() {
        for (k, s) in sums.iter_mut().enumerate() {
            s[idx[k]] += v;
        }
    }
    Ok(sums)
}

//! Batched selection of items, with or without replacement.
//!
//! The caller picks the mode with [`Draw`]:
//!
//! - [`Draw::Item`]: each draw is one item. Draws are independent, so across
//!   the batch this is sampling *with* replacement. The result has shape `size`.
//! - [`Draw::Subset(k)`](Draw::Subset): each draw is `k` distinct items
//!   (sampling *without* replacement within the draw). The result has shape
//!   `size + [k]`. The trailing axis is present even for `k == 1`.
//!
//! `size == &[]` means a single draw: a 0-d array for `Item`, shape `(k,)` for
//! `Subset(k)`. A batch with any zero extent returns an empty array without
//! drawing.
//!
//! ## Algorithms
//!
//! - Unweighted subsets: `rand::seq::index::sample` (Floyd / partial
//!   Fisher–Yates, chosen by `rand` based on `k` and `n`).
//! - Weighted subsets: exponential clocks (Efraimidis & Spirakis, 2006), i.e. the
//!   Gumbel-top-k trick. Item `i` gets key `ln(w_i) + g_i` with `g_i ~ Gumbel(0, 1)`,
//!   and the `k` largest keys win. Returning them in descending key order has the
//!   same law as `k` successive draws, each proportional to the remaining weights
//!   (Plackett–Luce). Working in log space keeps subnormal weights distinguishable.
//! - Single items: uniform index, or `WeightedIndex` when weights are given.

use ndarray::{ArrayD, IxDyn};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::distr::check_weights;
use crate::error::{Result, SampleError};

/// What a single draw produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// One item per draw.
    Item,
    /// `k` distinct items per draw.
    Subset(usize),
}

/// The result of [`select`], tagged by the mode that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    /// One item per draw; shape equals the requested batch shape.
    Items(ArrayD<T>),
    /// `k` items per draw; shape is the batch shape followed by `k`.
    Subsets(ArrayD<T>),
}

impl<T> Selection<T> {
    /// Shape of the underlying array.
    pub fn shape(&self) -> &[usize] {
        self.as_array().shape()
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &ArrayD<T> {
        match self {
            Self::Items(a) | Self::Subsets(a) => a,
        }
    }

    /// Unwrap into the underlying array.
    pub fn into_array(self) -> ArrayD<T> {
        match self {
            Self::Items(a) | Self::Subsets(a) => a,
        }
    }
}

/// Select from `items` using the thread RNG. See [`select_with_rng`].
pub fn select<T: Clone>(
    items: &[T],
    draw: Draw,
    p: Option<&[f64]>,
    size: &[usize],
) -> Result<Selection<T>> {
    let mut rng = rand::rng();
    select_with_rng(items, draw, p, size, &mut rng)
}

/// Select from `items` with a caller-supplied RNG.
///
/// `p` holds optional per-item weights. They must be finite and non-negative
/// with a positive sum, and need not be normalized.
///
/// # Errors
///
/// - [`SampleError::Shape`] if `p` has a different length than `items`.
/// - [`SampleError::Domain`] if the weights are invalid, if `k > items.len()`,
///   if `k` exceeds the number of positively weighted items, or if a non-empty
///   `Item` batch is requested from an empty collection.
pub fn select_with_rng<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    draw: Draw,
    p: Option<&[f64]>,
    size: &[usize],
    rng: &mut R,
) -> Result<Selection<T>> {
    if let Some(w) = p {
        if w.len() != items.len() {
            return Err(SampleError::Shape(format!(
                "p must have the same length as items ({} != {})",
                w.len(),
                items.len()
            )));
        }
        check_weights(w)?;
    }

    let ndraws = batch_len(size)?;

    match draw {
        Draw::Item => {
            if ndraws > 0 && items.is_empty() {
                return Err(SampleError::Domain(
                    "cannot select from an empty collection".into(),
                ));
            }
            if ndraws == 0 {
                tracing::trace!(shape = ?size, "empty batch, no draws");
            }
            let picked = pick_items(items, p, ndraws, rng)?;
            Ok(Selection::Items(ArrayD::from_shape_vec(
                IxDyn(size),
                picked,
            )?))
        }
        Draw::Subset(k) => {
            if k > items.len() {
                return Err(SampleError::Domain(format!(
                    "nsample ({k}) must not exceed len(items) ({})",
                    items.len()
                )));
            }
            if let Some(w) = p {
                let positive = w.iter().filter(|&&x| x > 0.0).count();
                if k > positive {
                    return Err(SampleError::Domain(format!(
                        "nsample ({k}) exceeds the number of items with non-zero weight ({positive})"
                    )));
                }
            }

            let mut shape = size.to_vec();
            shape.push(k);
            if ndraws == 0 {
                tracing::trace!(?shape, "empty batch, no draws");
            }

            let mut picked = Vec::with_capacity(ndraws * k);
            for _ in 0..ndraws {
                let idx = match p {
                    Some(w) => weighted_subset(w, k, rng),
                    None => rand::seq::index::sample(rng, items.len(), k).into_vec(),
                };
                picked.extend(idx.into_iter().map(|i| items[i].clone()));
            }
            Ok(Selection::Subsets(ArrayD::from_shape_vec(
                IxDyn(&shape),
                picked,
            )?))
        }
    }
}

fn batch_len(size: &[usize]) -> Result<usize> {
    size.iter().try_fold(1usize, |acc, &s| acc.checked_mul(s)).ok_or_else(|| {
        SampleError::Domain(format!("batch shape {size:?} overflows usize"))
    })
}

fn pick_items<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    p: Option<&[f64]>,
    ndraws: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    if ndraws == 0 {
        return Ok(Vec::new());
    }
    match p {
        Some(w) => {
            let dist = WeightedIndex::new(w).map_err(|e| SampleError::Domain(e.to_string()))?;
            Ok((0..ndraws).map(|_| items[dist.sample(rng)].clone()).collect())
        }
        None => Ok((0..ndraws)
            .map(|_| items[rng.random_range(0..items.len())].clone())
            .collect()),
    }
}

/// Indices of `k` distinct items drawn proportionally to `w`, in draw order.
///
/// Zero-weight items are never chosen; the caller guarantees at least `k`
/// positive weights.
fn weighted_subset<R: Rng + ?Sized>(w: &[f64], k: usize, rng: &mut R) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }

    let mut keyed: Vec<(usize, f64)> = w
        .iter()
        .enumerate()
        .filter(|&(_, &wi)| wi > 0.0)
        .map(|(i, &wi)| {
            // u < 1, so -ln(u) > 0 and the Gumbel draw is finite.
            let u = rng.random::<f64>().max(f64::MIN_POSITIVE);
            (i, wi.ln() - (-u.ln()).ln())
        })
        .collect();

    let by_key_desc =
        |a: &(usize, f64), b: &(usize, f64)| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0));
    if k < keyed.len() {
        keyed.select_nth_unstable_by(k - 1, by_key_desc);
        keyed.truncate(k);
    }
    keyed.sort_unstable_by(by_key_desc);

    keyed.into_iter().map(|(i, _)| i).collect()
}

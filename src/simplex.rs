//! Uniform points inside a single simplex.
//!
//! A simplex with `m` vertices in `(m-1)`-dimensional space is the affine image of
//! the standard probability simplex. Dirichlet(1, …, 1) is uniform on the standard
//! simplex, and affine maps preserve uniformity, so drawing barycentric weights
//! `w ~ Dirichlet(1_m)` and returning `w · V` gives a uniform point inside `V`.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::Rng;

use crate::distr::dirichlet_ones;
use crate::error::{Result, SampleError};
use crate::linalg::solve;

/// One uniform point inside the simplex `vertices`, using the thread RNG.
pub fn uniform_simplex(vertices: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    let mut rng = rand::rng();
    uniform_simplex_with_rng(vertices, &mut rng)
}

/// One uniform point inside the simplex `vertices`, shape `(m-1,)`.
pub fn uniform_simplex_with_rng<R: Rng + ?Sized>(
    vertices: ArrayView2<'_, f64>,
    rng: &mut R,
) -> Result<Array1<f64>> {
    let batch = uniform_simplex_batch_with_rng(vertices, 1, rng)?;
    Ok(batch.index_axis_move(Axis(0), 0))
}

/// `size` uniform points inside the simplex `vertices`, using the thread RNG.
pub fn uniform_simplex_batch(vertices: ArrayView2<'_, f64>, size: usize) -> Result<Array2<f64>> {
    let mut rng = rand::rng();
    uniform_simplex_batch_with_rng(vertices, size, &mut rng)
}

/// `size` uniform points inside the simplex `vertices`, shape `(size, m-1)`.
///
/// `vertices` must have shape `(m, m-1)`: `m` points in `(m-1)`-dimensional space.
///
/// # Errors
///
/// [`SampleError::Shape`] if `vertices` is not `(m, m-1)`.
pub fn uniform_simplex_batch_with_rng<R: Rng + ?Sized>(
    vertices: ArrayView2<'_, f64>,
    size: usize,
    rng: &mut R,
) -> Result<Array2<f64>> {
    check_vertices(vertices)?;
    let m = vertices.nrows();

    let mut weights = Vec::with_capacity(size * m);
    for _ in 0..size {
        weights.extend(dirichlet_ones(m, rng));
    }
    let weights = Array2::from_shape_vec((size, m), weights)?;

    Ok(weights.dot(&vertices))
}

fn check_vertices(vertices: ArrayView2<'_, f64>) -> Result<()> {
    let (rows, cols) = vertices.dim();
    if rows != cols + 1 {
        return Err(SampleError::Shape(format!(
            "vertices must have shape (m, m - 1), representing m points in \
             (m - 1)-dimensional space (got ({rows}, {cols}))"
        )));
    }
    Ok(())
}

/// Barycentric coordinates of `point` with respect to the simplex `vertices`.
///
/// Solves `[V^T; 1^T] λ = [x; 1]`. Returns `None` for a degenerate simplex or
/// mismatched dimensions.
pub fn barycentric(vertices: ArrayView2<'_, f64>, point: &[f64]) -> Option<Vec<f64>> {
    let (m, d) = vertices.dim();
    if m != d + 1 || point.len() != d {
        return None;
    }

    // Row r < d holds coordinate r of every vertex; the last row is all ones.
    let a = Array2::from_shape_fn((m, m), |(r, c)| if r < d { vertices[[c, r]] } else { 1.0 });
    let rhs: Vec<f64> = point.iter().copied().chain(std::iter::once(1.0)).collect();
    solve(&a, &rhs)
}

//! Uniform points inside a triangle embedded in any dimension.
//!
//! Unlike [`crate::simplex`], the ambient space is free: the vertices form a
//! `(3, n)` array for any `n >= 1`. Uses the square-root construction
//! `s = sqrt(u1)`, `x = 1 - s`, `y = s·u2`, `p = v0 + x·(v1 - v0) + y·(v2 - v0)`.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::Rng;

use crate::error::{Result, SampleError};

/// One uniform point inside the triangle, using the thread RNG.
pub fn uniform_triangle(vertices: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    let mut rng = rand::rng();
    uniform_triangle_with_rng(vertices, &mut rng)
}

/// One uniform point inside the triangle, shape `(n,)`.
pub fn uniform_triangle_with_rng<R: Rng + ?Sized>(
    vertices: ArrayView2<'_, f64>,
    rng: &mut R,
) -> Result<Array1<f64>> {
    let batch = uniform_triangle_batch_with_rng(vertices, 1, rng)?;
    Ok(batch.index_axis_move(Axis(0), 0))
}

/// `size` uniform points inside the triangle, using the thread RNG.
pub fn uniform_triangle_batch(vertices: ArrayView2<'_, f64>, size: usize) -> Result<Array2<f64>> {
    let mut rng = rand::rng();
    uniform_triangle_batch_with_rng(vertices, size, &mut rng)
}

/// `size` uniform points inside the triangle `vertices`, shape `(size, n)`.
///
/// # Errors
///
/// [`SampleError::Shape`] unless `vertices` has exactly three rows and at least one column.
pub fn uniform_triangle_batch_with_rng<R: Rng + ?Sized>(
    vertices: ArrayView2<'_, f64>,
    size: usize,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let (rows, dim) = vertices.dim();
    if rows != 3 || dim == 0 {
        return Err(SampleError::Shape(format!(
            "vertices must have shape (3, n), representing 3 points in \
             n-dimensional space (got ({rows}, {dim}))"
        )));
    }

    let v0 = vertices.row(0);
    let e1 = &vertices.row(1) - &v0;
    let e2 = &vertices.row(2) - &v0;

    let mut out = Array2::zeros((size, dim));
    for mut p in out.rows_mut() {
        let s = rng.random::<f64>().sqrt();
        let x = 1.0 - s;
        let y = s * rng.random::<f64>();
        p.assign(&v0);
        p.scaled_add(x, &e1);
        p.scaled_add(y, &e2);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn triangle_in_3d_stays_in_plane() {
        // Triangle in the plane z = 1.
        let v = array![[0.0, 0.0, 1.0], [2.0, 0.0, 1.0], [0.0, 2.0, 1.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let pts = uniform_triangle_batch_with_rng(v.view(), 1_000, &mut rng).expect("valid");
        assert_eq!(pts.dim(), (1_000, 3));
        for p in pts.rows() {
            assert!((p[2] - 1.0).abs() < 1e-12);
            assert!(p[0] >= -1e-12 && p[1] >= -1e-12);
            assert!(p[0] + p[1] <= 2.0 + 1e-12);
        }
    }

    #[test]
    fn centroid_converges() {
        let v = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let pts = uniform_triangle_batch_with_rng(v.view(), 60_000, &mut rng).expect("valid");
        let c = pts.mean_axis(Axis(0)).expect("non-empty");
        assert!((c[0] - 1.0 / 3.0).abs() < 5e-3);
        assert!((c[1] - 1.0 / 3.0).abs() < 5e-3);
    }

    #[test]
    fn rejects_non_triangles() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let quad = array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert!(matches!(
            uniform_triangle_with_rng(quad.view(), &mut rng),
            Err(SampleError::Shape(_))
        ));
    }

    #[test]
    fn single_draw_shape() {
        let v = array![[0.0], [1.0], [3.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let p = uniform_triangle_with_rng(v.view(), &mut rng).expect("valid");
        assert_eq!(p.len(), 1);
        assert!((0.0..=3.0).contains(&p[0]));
    }
}

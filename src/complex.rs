//! Uniform points over a union of simplices.
//!
//! Sampling every simplex with the same count would over-weight small ones. Instead:
//!
//! 1. compute each simplex's d-volume, `|det([V | 1])| / d!`;
//! 2. split the requested total across simplices with one multinomial draw
//!    weighted by volume (the total is preserved exactly);
//! 3. sample each simplex that received a non-zero count with
//!    [`uniform_simplex_batch_with_rng`] and concatenate.
//!
//! The simplices are assumed to overlap at most on shared faces, so volumes add up.

use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::distr::multinomial;
use crate::error::{Result, SampleError};
use crate::linalg::determinant;
use crate::simplex::uniform_simplex_batch_with_rng;

/// `size` points uniform over the union of `simplices`, using the thread RNG.
pub fn uniform_simplices(
    points: ArrayView2<'_, f64>,
    simplices: ArrayView2<'_, usize>,
    size: usize,
) -> Result<Array2<f64>> {
    let mut rng = rand::rng();
    uniform_simplices_with_rng(points, simplices, size, &mut rng)
}

/// `size` points uniform over the union of `simplices`, shape `(size, d)`.
///
/// `points` has shape `(p, d)`; each row of `simplices` holds `d + 1` indices into
/// `points`. Rows of the output are grouped by simplex, in simplex order.
///
/// # Errors
///
/// - [`SampleError::Shape`] if `simplices` does not have `d + 1` columns or an
///   index is out of bounds.
/// - [`SampleError::Domain`] if `size > 0` and there are no simplices or their
///   total volume is zero.
pub fn uniform_simplices_with_rng<R: Rng + ?Sized>(
    points: ArrayView2<'_, f64>,
    simplices: ArrayView2<'_, usize>,
    size: usize,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let (npoints, d) = points.dim();
    let (nsimplices, width) = simplices.dim();
    if width != d + 1 {
        return Err(SampleError::Shape(format!(
            "each simplex must have d + 1 = {} indices for {d}-dimensional points (got {width})",
            d + 1
        )));
    }
    if let Some(&bad) = simplices.iter().find(|&&i| i >= npoints) {
        return Err(SampleError::Shape(format!(
            "simplex index {bad} out of bounds for {npoints} points"
        )));
    }

    if size == 0 {
        return Ok(Array2::zeros((0, d)));
    }
    if nsimplices == 0 {
        return Err(SampleError::Domain(
            "cannot draw points from an empty set of simplices".into(),
        ));
    }

    let vertex_sets: Vec<Array2<f64>> = simplices
        .rows()
        .into_iter()
        .map(|idx| points.select(ndarray::Axis(0), &idx.to_vec()))
        .collect();
    let volumes = vertex_sets
        .iter()
        .map(|v| simplex_volume(v.view()))
        .collect::<Result<Vec<f64>>>()?;

    let total: f64 = volumes.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(SampleError::Domain(format!(
            "total simplex volume must be positive and finite (got {total})"
        )));
    }

    let counts = multinomial(size as u64, &volumes, rng)?;
    tracing::debug!(
        simplices = nsimplices,
        size,
        ?counts,
        "allocated samples by simplex volume"
    );

    let mut data = Vec::with_capacity(size * d);
    for (vertices, &count) in vertex_sets.iter().zip(&counts) {
        if count == 0 {
            continue;
        }
        let pts = uniform_simplex_batch_with_rng(vertices.view(), count as usize, rng)?;
        data.extend(pts.iter().copied());
    }

    Ok(Array2::from_shape_vec((size, d), data)?)
}

/// Unsigned d-volume of the simplex with vertex rows `vertices` (shape `(d+1, d)`).
///
/// # Errors
///
/// [`SampleError::Shape`] if `vertices` is not `(d+1, d)`.
pub fn simplex_volume(vertices: ArrayView2<'_, f64>) -> Result<f64> {
    let (rows, d) = vertices.dim();
    if rows != d + 1 {
        return Err(SampleError::Shape(format!(
            "vertices must have shape (d + 1, d) (got ({rows}, {d}))"
        )));
    }

    let m = Array2::from_shape_fn((d + 1, d + 1), |(i, j)| {
        if j < d {
            vertices[[i, j]]
        } else {
            1.0
        }
    });

    let factorial: f64 = (1..=d).map(|k| k as f64).product();
    Ok(determinant(m).abs() / factorial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplex::barycentric;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn containing_simplex(points: &Array2<f64>, simplices: &Array2<usize>, p: &[f64]) -> usize {
        simplices
            .rows()
            .into_iter()
            .position(|idx| {
                let v = points.select(ndarray::Axis(0), &idx.to_vec());
                barycentric(v.view(), p)
                    .map(|lam| lam.iter().all(|&l| l >= -1e-9))
                    .unwrap_or(false)
            })
            .expect("sample outside every simplex")
    }

    #[test]
    fn volumes() {
        let tri = array![[0.0, 0.0], [2.0, 0.0], [0.0, 3.0]];
        assert!((simplex_volume(tri.view()).unwrap() - 3.0).abs() < 1e-12);

        let tet = array![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0]
        ];
        assert!((simplex_volume(tet.view()).unwrap() - 1.0 / 6.0).abs() < 1e-12);

        let seg = array![[5.0], [1.5]];
        assert!((simplex_volume(seg.view()).unwrap() - 3.5).abs() < 1e-12);

        let flat = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        assert!(simplex_volume(flat.view()).unwrap().abs() < 1e-12);

        assert!(matches!(
            simplex_volume(array![[0.0, 0.0], [1.0, 1.0]].view()),
            Err(SampleError::Shape(_))
        ));
    }

    #[test]
    fn fractions_follow_volumes() {
        // Three triangles of areas 2, 0.5 and 2 sharing vertex 6.
        let points = array![
            [0.0, 0.0],
            [1.0, 1.0],
            [2.0, 1.0],
            [2.0, 0.0],
            [4.0, 0.0],
            [0.0, 2.0],
            [2.0, 2.0]
        ];
        let simplices = array![[0usize, 5, 6], [2, 1, 6], [3, 6, 4]];
        let expected = [2.0 / 4.5, 0.5 / 4.5, 2.0 / 4.5];

        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let n = 30_000;
        let pts = uniform_simplices_with_rng(points.view(), simplices.view(), n, &mut rng)
            .expect("valid complex");
        assert_eq!(pts.dim(), (n, 2));

        let mut hits = [0usize; 3];
        for p in pts.rows() {
            hits[containing_simplex(&points, &simplices, &p.to_vec())] += 1;
        }
        for (h, e) in hits.iter().zip(expected) {
            let frac = *h as f64 / n as f64;
            assert!((frac - e).abs() < 0.015, "fraction {frac} vs volume fraction {e}");
        }
    }

    #[test]
    fn output_is_grouped_by_simplex() {
        let points = array![[0.0], [1.0], [5.0]];
        let simplices = array![[0usize, 1], [1, 2]];
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let pts = uniform_simplices_with_rng(points.view(), simplices.view(), 500, &mut rng)
            .expect("valid complex");
        let xs: Vec<f64> = pts.column(0).to_vec();
        let split = xs.iter().position(|&x| x > 1.0).unwrap_or(xs.len());
        assert!(xs[..split].iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!(xs[split..].iter().all(|&x| (1.0..=5.0).contains(&x)));
    }

    #[test]
    fn zero_volume_simplex_gets_no_samples() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [2.0, 0.0]];
        // Second simplex is degenerate (collinear).
        let simplices = array![[0usize, 1, 2], [0, 1, 3]];
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let pts = uniform_simplices_with_rng(points.view(), simplices.view(), 200, &mut rng)
            .expect("valid complex");
        assert_eq!(pts.nrows(), 200);
        assert!(pts.rows().into_iter().all(|p| p[1] >= 0.0 && p[0] + p[1] <= 1.0 + 1e-12));
    }

    #[test]
    fn validation_errors() {
        let mut rng = ChaCha8Rng::seed_from_u64(34);
        let before = rng.clone();
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

        let too_wide = array![[0usize, 1, 2, 0]];
        assert!(matches!(
            uniform_simplices_with_rng(points.view(), too_wide.view(), 10, &mut rng),
            Err(SampleError::Shape(_))
        ));

        let out_of_bounds = array![[0usize, 1, 7]];
        assert!(matches!(
            uniform_simplices_with_rng(points.view(), out_of_bounds.view(), 10, &mut rng),
            Err(SampleError::Shape(_))
        ));

        let none = Array2::<usize>::zeros((0, 3));
        assert!(matches!(
            uniform_simplices_with_rng(points.view(), none.view(), 10, &mut rng),
            Err(SampleError::Domain(_))
        ));

        let flat = array![[0usize, 0, 1]];
        assert!(matches!(
            uniform_simplices_with_rng(points.view(), flat.view(), 10, &mut rng),
            Err(SampleError::Domain(_))
        ));

        assert_eq!(rng, before);
    }

    #[test]
    fn zero_size_draws_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(35);
        let before = rng.clone();
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let simplices = array![[0usize, 1, 2]];
        let pts = uniform_simplices_with_rng(points.view(), simplices.view(), 0, &mut rng)
            .expect("valid complex");
        assert_eq!(pts.dim(), (0, 2));
        assert_eq!(rng, before);
    }
}

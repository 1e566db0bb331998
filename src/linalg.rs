//! Dense Gaussian elimination with partial pivoting.
//!
//! Only what the simplex code needs: a determinant for volumes and a linear
//! solve for barycentric coordinates. Both run the same forward pass.

use ndarray::Array2;

/// Forward elimination over the leading `n × n` block, `n = a.nrows()`.
///
/// Columns past `n` (right-hand sides) are carried along. Returns the determinant
/// of the leading block; `0.0` means it is singular and `a` is left partially reduced.
fn forward_eliminate(a: &mut Array2<f64>) -> f64 {
    let (n, width) = a.dim();
    let mut det = 1.0;
    for col in 0..n {
        let mut pivot = col;
        for r in col + 1..n {
            if a[[r, col]].abs() > a[[pivot, col]].abs() {
                pivot = r;
            }
        }
        if a[[pivot, col]] == 0.0 {
            return 0.0;
        }
        if pivot != col {
            for c in 0..width {
                a.swap([pivot, c], [col, c]);
            }
            det = -det;
        }
        let p = a[[col, col]];
        det *= p;
        for r in col + 1..n {
            let f = a[[r, col]] / p;
            if f != 0.0 {
                for c in col..width {
                    a[[r, c]] -= f * a[[col, c]];
                }
            }
        }
    }
    det
}

/// Determinant of a square matrix.
pub(crate) fn determinant(mut a: Array2<f64>) -> f64 {
    debug_assert_eq!(a.nrows(), a.ncols());
    forward_eliminate(&mut a)
}

/// Solve `a x = b` for square `a`. `None` if `a` is (numerically) singular.
pub(crate) fn solve(a: &Array2<f64>, b: &[f64]) -> Option<Vec<f64>> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return None;
    }
    let mut aug = Array2::from_shape_fn((n, n + 1), |(i, j)| if j < n { a[[i, j]] } else { b[i] });
    let det = forward_eliminate(&mut aug);
    if det == 0.0 || (0..n).any(|i| aug[[i, i]].abs() < 1e-300) {
        return None;
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let tail: f64 = (i + 1..n).map(|j| aug[[i, j]] * x[j]).sum();
        x[i] = (aug[[i, n]] - tail) / aug[[i, i]];
    }
    Some(x)
}

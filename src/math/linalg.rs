//! Vector and matrix primitives used by every layer computation.
//!
//! Shape preconditions are the caller's responsibility: mismatched lengths
//! are not checked here.

use crate::math::matrix::Matrix;

fn squared_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

/// Inner product via `(|a|² + |b|² - |a-b|²) / 2`.
///
/// Mathematically equal to [`dot_direct`], but rounds differently: the
/// result can differ from a sum of products in the last few bits, and more
/// when `a` and `b` are large and nearly equal.
pub fn dot_law_of_cosines(a: &[f64], b: &[f64]) -> f64 {
    let diff: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    (squared_norm(a) + squared_norm(b) - diff) / 2.0
}

/// Inner product as a plain sum of products.
pub fn dot_direct(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Inner product used throughout the crate.
///
/// Defaults to [`dot_law_of_cosines`]; the `direct-dot` feature switches it to
/// [`dot_direct`].
#[cfg(not(feature = "direct-dot"))]
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    dot_law_of_cosines(a, b)
}

#[cfg(feature = "direct-dot")]
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    dot_direct(a, b)
}

/// `M · v`: one dot product per row of `m`.
pub fn mat_vec(m: &Matrix, v: &[f64]) -> Vec<f64> {
    m.data.iter().map(|row| dot(row, v)).collect()
}

/// `A · B`. Each column of `b` is materialized before its dot products.
pub fn mat_mat(a: &Matrix, b: &Matrix) -> Matrix {
    let mut res = Matrix::zeros(a.rows, b.cols);

    for j in 0..b.cols {
        let column = b.column_vec(j);
        for i in 0..a.rows {
            res.data[i][j] = dot(&a.data[i], &column);
        }
    }

    res
}

/// Scales the single row of `m` by each element of `v`, giving a
/// `v.len() × m.cols` matrix.
pub fn outer(v: &[f64], m: &Matrix) -> Matrix {
    let row = m.data.first().map(Vec::as_slice).unwrap_or(&[]);
    Matrix::from_data(
        v.iter()
            .map(|&scale| row.iter().map(|x| x * scale).collect())
            .collect(),
    )
}

/// Swaps the row and column axes of `m`.
pub fn transpose(m: &Matrix) -> Matrix {
    m.transpose()
}

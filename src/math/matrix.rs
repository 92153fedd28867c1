use rand::Rng;
use std::ops::{AddAssign, RangeInclusive};

/// Dense row-major matrix stored as a vector of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a `rows × cols` matrix with values drawn uniformly from `range`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        range: RangeInclusive<f64>,
        rng: &mut R,
    ) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen_range(range.clone());
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, Vec::len),
            data,
        }
    }

    /// Treats `v` as an `n × 1` column matrix.
    pub fn column(v: &[f64]) -> Matrix {
        Matrix::from_data(v.iter().map(|&x| vec![x]).collect())
    }

    /// Treats `v` as a `1 × n` row matrix.
    pub fn row(v: &[f64]) -> Matrix {
        Matrix::from_data(vec![v.to_vec()])
    }

    /// Materializes column `j` as a vector.
    pub fn column_vec(&self, j: usize) -> Vec<f64> {
        self.data.iter().map(|row| row[j]).collect()
    }

    /// Flattens an `n × 1` column matrix back into a vector.
    pub fn into_column_vec(self) -> Vec<f64> {
        self.data.into_iter().filter_map(|row| row.first().copied()).collect()
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// True when the row count and every row length agree with `rows × cols`.
    pub fn has_shape(&self, rows: usize, cols: usize) -> bool {
        self.rows == rows
            && self.cols == cols
            && self.data.len() == rows
            && self.data.iter().all(|row| row.len() == cols)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, rhs_row) in self.data.iter_mut().zip(&rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x += y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn transpose_swaps_axes() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!(t.rows, 3);
        assert_eq!(t.cols, 2);
        assert_eq!(t.data, vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn column_and_row_helpers() {
        let v = [1.0, 2.0, 3.0];
        let c = Matrix::column(&v);
        assert!(c.has_shape(3, 1));
        assert_eq!(Matrix::row(&v).data, vec![v.to_vec()]);
        assert_eq!(c.transpose(), Matrix::row(&v));
        assert_eq!(c.into_column_vec(), v.to_vec());
    }

    #[test]
    fn random_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = Matrix::random_uniform(20, 30, -1.0..=1.0, &mut rng);
        assert!(m.has_shape(20, 30));
        assert!(m.data.iter().flatten().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn add_assign_is_elementwise() {
        let mut a = Matrix::from_data(vec![vec![1.0, 2.0]]);
        a += &Matrix::from_data(vec![vec![0.5, -2.0]]);
        assert_eq!(a.data, vec![vec![1.5, 0.0]]);
    }

    #[test]
    fn empty_data_has_zero_shape() {
        let m = Matrix::from_data(vec![]);
        assert!(m.has_shape(0, 0));
        assert_eq!(m, Matrix::default());
    }
}

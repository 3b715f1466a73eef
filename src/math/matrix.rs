use rand::prelude::*;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// Dense row-major matrix of `f64`. Row 0 is the first sample of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from nested rows. Panics if rows have unequal lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in &rows {
            assert_eq!(row.len(), n_cols, "rows must have equal length");
            data.extend_from_slice(row);
        }
        Matrix {
            rows: n_rows,
            cols: n_cols,
            data,
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both u1 and u2 must be uniform on (0, 1].
    fn sample_standard_normal(rng: &mut ThreadRng) -> f64 {
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// He initialization: samples from N(0, sqrt(2 / rows)).
    ///
    /// Recommended before ReLU layers, which zero half of their inputs on
    /// average. `rows` is the fan-in (number of input connections).
    pub fn he(rows: usize, cols: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let std_dev = (2.0 / rows as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for v in &mut res.data {
            *v = Matrix::sample_standard_normal(&mut rng) * std_dev;
        }
        res
    }

    /// Xavier (Glorot) initialization: samples from N(0, sqrt(1 / rows)).
    ///
    /// Recommended before Sigmoid/Tanh layers. Keeps the variance of
    /// activations and gradients roughly equal across layers.
    pub fn xavier(rows: usize, cols: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let std_dev = (1.0 / rows as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for v in &mut res.data {
            *v = Matrix::sample_standard_normal(&mut rng) * std_dev;
        }
        res
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                res[(j, i)] = self[(i, j)];
            }
        }
        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Element-wise (Hadamard) product with a same-shape matrix.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.rows, rhs.rows, "matrices are of incorrect sizes");
        assert_eq!(self.cols, rhs.cols, "matrices are of incorrect sizes");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(x, y)| x * y)
                .collect(),
        }
    }

    /// Collapses the batch dimension: returns a `[1, cols]` matrix whose
    /// entries are the column sums.
    pub fn sum_rows(&self) -> Matrix {
        let mut res = Matrix::zeros(1, self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                res[(0, j)] += self[(i, j)];
            }
        }
        res
    }

    /// Adds a `[1, cols]` row to every row of `self` (bias broadcast).
    pub fn add_row(&self, row: &Matrix) -> Matrix {
        assert_eq!(row.rows, 1, "broadcast row must have a single row");
        assert_eq!(self.cols, row.cols, "matrices are of incorrect sizes");
        let mut res = self.clone();
        for i in 0..res.rows {
            for j in 0..res.cols {
                res[(i, j)] += row[(0, j)];
            }
        }
        res
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.data.iter_mut()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::zeros(0, 0)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Matrix {
        assert_eq!(self.rows, rhs.rows, "matrices are of incorrect sizes");
        assert_eq!(self.cols, rhs.cols, "matrices are of incorrect sizes");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(x, y)| x + y)
                .collect(),
        }
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Matrix {
        assert_eq!(self.rows, rhs.rows, "matrices are of incorrect sizes");
        assert_eq!(self.cols, rhs.cols, "matrices are of incorrect sizes");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(x, y)| x - y)
                .collect(),
        }
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Matrix {
        assert_eq!(self.cols, rhs.rows, "matrices are of incorrect sizes");
        let mut res = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self[(i, k)] * rhs[(k, j)];
                }
                res[(i, j)] = sum;
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matmul_shapes_and_values() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = Matrix::from_rows(vec![vec![5.0], vec![6.0]]);
        let c = &a * &b;
        assert_eq!((c.rows, c.cols), (2, 1));
        assert_relative_eq!(c[(0, 0)], 17.0);
        assert_relative_eq!(c[(1, 0)], 39.0);
    }

    #[test]
    fn transpose_swaps_dimensions() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]);
        let t = a.transpose();
        assert_eq!((t.rows, t.cols), (3, 1));
        assert_relative_eq!(t[(2, 0)], 3.0);
    }

    #[test]
    fn sum_rows_collapses_batch() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let s = a.sum_rows();
        assert_eq!((s.rows, s.cols), (1, 2));
        assert_relative_eq!(s[(0, 0)], 9.0);
        assert_relative_eq!(s[(0, 1)], 12.0);
    }

    #[test]
    fn add_row_broadcasts_over_batch() {
        let a = Matrix::zeros(3, 2);
        let bias = Matrix::from_rows(vec![vec![0.5, -0.5]]);
        let b = a.add_row(&bias);
        for i in 0..3 {
            assert_relative_eq!(b[(i, 0)], 0.5);
            assert_relative_eq!(b[(i, 1)], -0.5);
        }
    }

    #[test]
    fn elementwise_add_and_sub() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0]]);
        let b = Matrix::from_rows(vec![vec![0.5, -0.5]]);
        let sum = &a + &b;
        let diff = &a - &b;
        assert_relative_eq!(sum[(0, 0)], 1.5);
        assert_relative_eq!(sum[(0, 1)], 1.5);
        assert_relative_eq!(diff[(0, 0)], 0.5);
        assert_relative_eq!(diff[(0, 1)], 2.5);
    }

    #[test]
    fn map_applies_elementwise() {
        let a = Matrix::from_rows(vec![vec![-2.0, 0.7]]);
        let clamped = a.map(|x| x.clamp(-0.5, 0.5));
        assert_relative_eq!(clamped[(0, 0)], -0.5);
        assert_relative_eq!(clamped[(0, 1)], 0.5);
    }

    #[test]
    fn serde_round_trip_preserves_shape() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let json = serde_json::to_string(&a).unwrap();
        let b: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(a, b);
    }
}

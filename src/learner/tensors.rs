//! Flat row-major buffers for the gradient dynamic programs.
//!
//! Both types support shrinking reuse: [`DenseMatrix::reuse_as`] and
//! [`DenseTensor::reuse_as`] re-shape an existing allocation without zeroing
//! it, so per-sample tables can share one allocation sized for the largest
//! sample. Callers that reuse a buffer must rewrite every cell they read.

use std::ops::{Index, IndexMut};

/// Row-major `f64` matrix.
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    num_columns: usize,
    buffer: Vec<f64>,
}

impl DenseMatrix {
    /// Allocates a zeroed `num_rows x num_columns` matrix.
    pub fn new(num_rows: usize, num_columns: usize) -> Self {
        Self {
            num_columns,
            buffer: vec![0.0; num_rows * num_columns],
        }
    }

    /// Re-shapes the matrix within its existing allocation.
    ///
    /// Does NOT zero the buffer; stale values from a previous shape survive.
    ///
    /// # Panics
    ///
    /// Panics if the new shape exceeds the allocated capacity.
    pub fn reuse_as(&mut self, num_rows: usize, num_columns: usize) {
        assert!(
            self.buffer.len() >= num_rows * num_columns,
            "matrix reuse exceeds allocated capacity"
        );
        self.num_columns = num_columns;
    }
}

impl Index<[usize; 2]> for DenseMatrix {
    type Output = f64;

    #[inline]
    fn index(&self, [row, column]: [usize; 2]) -> &f64 {
        &self.buffer[row * self.num_columns + column]
    }
}

impl IndexMut<[usize; 2]> for DenseMatrix {
    #[inline]
    fn index_mut(&mut self, [row, column]: [usize; 2]) -> &mut f64 {
        &mut self.buffer[row * self.num_columns + column]
    }
}

/// Row-major `f64` tensor of rank 3.
#[derive(Debug, Clone)]
pub struct DenseTensor {
    dim_2: usize,
    dim_3: usize,
    buffer: Vec<f64>,
}

impl DenseTensor {
    /// Allocates a zeroed `dim_1 x dim_2 x dim_3` tensor.
    pub fn new(dim_1: usize, dim_2: usize, dim_3: usize) -> Self {
        Self {
            dim_2,
            dim_3,
            buffer: vec![0.0; dim_1 * dim_2 * dim_3],
        }
    }

    /// Re-shapes the tensor within its existing allocation.
    ///
    /// Does NOT zero the buffer; stale values from a previous shape survive.
    ///
    /// # Panics
    ///
    /// Panics if the new shape exceeds the allocated capacity.
    pub fn reuse_as(&mut self, dim_1: usize, dim_2: usize, dim_3: usize) {
        assert!(
            self.buffer.len() >= dim_1 * dim_2 * dim_3,
            "tensor reuse exceeds allocated capacity"
        );
        self.dim_2 = dim_2;
        self.dim_3 = dim_3;
    }
}

impl Index<[usize; 3]> for DenseTensor {
    type Output = f64;

    #[inline]
    fn index(&self, [a, b, c]: [usize; 3]) -> &f64 {
        &self.buffer[(a * self.dim_2 + b) * self.dim_3 + c]
    }
}

impl IndexMut<[usize; 3]> for DenseTensor {
    #[inline]
    fn index_mut(&mut self, [a, b, c]: [usize; 3]) -> &mut f64 {
        &mut self.buffer[(a * self.dim_2 + b) * self.dim_3 + c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_round_trips_cells() {
        let mut m = DenseMatrix::new(4, 8);

        assert_eq!(m[[0, 0]], 0.0);
        assert_eq!(m[[3, 7]], 0.0);

        m[[2, 5]] = 3.5;
        assert_eq!(m[[2, 5]], 3.5);
    }

    #[test]
    fn matrix_reuse_keeps_allocation() {
        let mut m = DenseMatrix::new(10, 10);
        m[[9, 9]] = 1.0;

        m.reuse_as(4, 25);
        m[[3, 24]] = 2.0;
        assert_eq!(m[[3, 24]], 2.0);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn matrix_reuse_cannot_grow() {
        let mut m = DenseMatrix::new(2, 2);
        m.reuse_as(3, 3);
    }

    #[test]
    fn tensor_round_trips_cells() {
        let mut t = DenseTensor::new(3, 4, 5);

        t[[2, 3, 4]] = 7.0;
        t[[0, 0, 0]] = 1.0;

        assert_eq!(t[[2, 3, 4]], 7.0);
        assert_eq!(t[[0, 0, 0]], 1.0);
        assert_eq!(t[[1, 1, 1]], 0.0);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn tensor_reuse_cannot_grow() {
        let mut t = DenseTensor::new(2, 2, 2);
        t.reuse_as(2, 2, 3);
    }
}

use alloc::vec::Vec;
use core::ops::{Add, Index, IndexMut, Mul};

use crate::field::Zq;

/// A row-major matrix over any entry type with the right capabilities.
/// Addition needs `T: Add`, multiplication additionally needs `T: Mul` —
/// which for ring entries restricts products to the NTT domain at compile
/// time. Column vectors are just `k x 1` matrices.
///
/// Shape mismatches are bugs in the caller, not runtime conditions, and are
/// rejected with asserts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Matrix<T> {
    rows: usize,
    cols: usize,
    entries: Vec<T>,
}

impl<T> Matrix<T> {
    pub(crate) fn from_entries(rows: usize, cols: usize, entries: Vec<T>) -> Self {
        assert_eq!(entries.len(), rows * cols, "entry count does not match dimensions");
        Self { rows, cols, entries }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn entries(&self) -> &[T] {
        &self.entries
    }

    /// New matrix with swapped dimensions, entry (i, j) becoming (j, i).
    pub(crate) fn transpose(&self) -> Self
    where
        T: Clone,
    {
        let mut entries = Vec::with_capacity(self.rows * self.cols);
        for j in 0..self.cols {
            for i in 0..self.rows {
                entries.push(self[(i, j)].clone());
            }
        }
        Self { rows: self.cols, cols: self.rows, entries }
    }

    /// Scale every entry by a field element, via the entry type's scalar
    /// multiplication. The KEM algorithms themselves never scale whole
    /// matrices, so this only sees use from the algebra tests.
    #[allow(dead_code)]
    pub(crate) fn scalar_mul(&self, a: Zq) -> Self
    where
        T: Clone + Mul<Zq, Output = T>,
    {
        let entries = self.entries.iter().map(|e| e.clone() * a).collect();
        Self { rows: self.rows, cols: self.cols, entries }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        &self.entries[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        &mut self.entries[row * self.cols + col]
    }
}

impl<T> Add for Matrix<T>
where
    T: Add<Output = T>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        assert_eq!((self.rows, self.cols), (rhs.rows, rhs.cols), "shape mismatch in add");
        let entries =
            self.entries.into_iter().zip(rhs.entries).map(|(a, b)| a + b).collect();
        Self { rows: self.rows, cols: self.cols, entries }
    }
}

/// `(r, k) x (k, c)` product; entry (i, j) is the inner product of row i and
/// column j under the entry type's ring multiplication.
impl<T> Mul for &Matrix<T>
where
    T: Clone + Default + Add<Output = T> + Mul<Output = T>,
{
    type Output = Matrix<T>;

    fn mul(self, rhs: Self) -> Matrix<T> {
        assert_eq!(self.cols, rhs.rows, "shape mismatch in mul");
        let mut entries = Vec::with_capacity(self.rows * rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = T::default();
                for l in 0..self.cols {
                    acc = acc + self[(i, l)].clone() * rhs[(l, j)].clone();
                }
                entries.push(acc);
            }
        }
        Matrix { rows: self.rows, cols: rhs.cols, entries }
    }
}

//! Matrix operations over GF(256)
//!
//! Row-major matrices with Gauss–Jordan elimination, used by the decoders to
//! solve the interpolation systems. Two inversion flavors exist: the strict
//! one fails on singular input, the lenient one drops dependent trailing rows
//! and inverts the reduced system (erasure decoding feeds it redundant
//! equations when more shares than necessary are available).

use crate::gf256::{gf_inv, gf_mul, gf_sub};
use crate::MathError;

/// A matrix over GF(256).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GfMatrix {
    rows: Vec<Vec<u8>>,
}

impl GfMatrix {
    /// Create a matrix from row vectors.
    ///
    /// All rows must have the same non-zero length.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, MathError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(MathError::InvalidParameters("matrix must not be empty".into()));
        }
        if rows.iter().any(|r| r.len() != cols) {
            return Err(MathError::DimensionMismatch(
                "all matrix rows must have the same length".into(),
            ));
        }
        Ok(Self { rows })
    }

    /// The n×n identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut rows = vec![vec![0u8; n]; n];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1;
        }
        Self { rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.rows[0].len()
    }

    pub fn row(&self, i: usize) -> &[u8] {
        &self.rows[i]
    }

    /// Matrix–vector product.
    pub fn right_multiply(&self, vec: &[u8]) -> Result<Vec<u8>, MathError> {
        if vec.len() != self.num_cols() {
            return Err(MathError::DimensionMismatch(format!(
                "matrix has {} columns but vector has {} entries",
                self.num_cols(),
                vec.len()
            )));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(vec)
                    .fold(0u8, |acc, (&m, &v)| acc ^ gf_mul(m, v))
            })
            .collect())
    }

    /// Matrix–matrix product.
    pub fn multiply(&self, other: &GfMatrix) -> Result<GfMatrix, MathError> {
        if self.num_cols() != other.num_rows() {
            return Err(MathError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.num_rows(),
                self.num_cols(),
                other.num_rows(),
                other.num_cols()
            )));
        }
        let rows = self
            .rows
            .iter()
            .map(|row| {
                (0..other.num_cols())
                    .map(|j| {
                        row.iter()
                            .enumerate()
                            .fold(0u8, |acc, (l, &m)| acc ^ gf_mul(m, other.rows[l][j]))
                    })
                    .collect()
            })
            .collect();
        Ok(GfMatrix { rows })
    }

    /// Invert a square matrix, failing on singular input.
    pub fn inverse(&self) -> Result<GfMatrix, MathError> {
        self.gauss_jordan(false)
    }

    /// Invert, dropping dependent trailing rows instead of failing.
    ///
    /// The returned matrix inverts the reduced system: if `r` rows survive,
    /// `result * self` has the r×r identity as its leading block and zero
    /// rows below it. Callers that feed redundant equations use only the
    /// leading rows of the result. Never fails with [`MathError::Singular`];
    /// non-square input still fails with a dimension mismatch.
    pub fn inverse_elim_dep_rows(&self) -> Result<GfMatrix, MathError> {
        self.gauss_jordan(true)
    }

    /// Solve `self · x = rhs`, tolerating redundant equations.
    ///
    /// The system may be overdetermined or rank-deficient; free variables are
    /// pinned to zero. Fails with [`MathError::Unsolvable`] when the
    /// equations are inconsistent.
    pub fn solve(&self, rhs: &[u8]) -> Result<Vec<u8>, MathError> {
        let m = self.num_rows();
        let cols = self.num_cols();
        if rhs.len() != m {
            return Err(MathError::DimensionMismatch(format!(
                "matrix has {} rows but right-hand side has {} entries",
                m,
                rhs.len()
            )));
        }

        let mut a = self.rows.clone();
        let mut b = rhs.to_vec();
        let mut pivot_of_col = vec![None; cols];
        let mut row = 0;
        for col in 0..cols {
            if row >= m {
                break;
            }
            let Some(p) = (row..m).find(|&r| a[r][col] != 0) else {
                // free column
                continue;
            };
            a.swap(row, p);
            b.swap(row, p);
            let inv_pivot = gf_inv(a[row][col]);
            normalize_row(&mut a[row], inv_pivot);
            b[row] = gf_mul(b[row], inv_pivot);
            for r in 0..m {
                if r != row && a[r][col] != 0 {
                    let coef = a[r][col];
                    mul_and_subtract(&mut a, r, row, coef);
                    b[r] = gf_sub(b[r], gf_mul(b[row], coef));
                }
            }
            pivot_of_col[col] = Some(row);
            row += 1;
        }

        // Rows below the rank reduced to all-zero coefficients; a non-zero
        // right-hand side there means 0 = c with c != 0.
        if b[row..].iter().any(|&v| v != 0) {
            return Err(MathError::Unsolvable("inconsistent equations".into()));
        }

        let mut x = vec![0u8; cols];
        for (col, pivot) in pivot_of_col.iter().enumerate() {
            if let Some(r) = *pivot {
                x[col] = b[r];
            }
        }
        Ok(x)
    }

    fn gauss_jordan(&self, drop_dependent: bool) -> Result<GfMatrix, MathError> {
        let n = self.num_rows();
        if n != self.num_cols() {
            return Err(MathError::DimensionMismatch(format!(
                "cannot invert a {}x{} matrix",
                n,
                self.num_cols()
            )));
        }

        let mut tmp = self.rows.clone();
        let mut inv = GfMatrix::identity(n).rows;

        // Rows at index >= active are dependent and no longer take part.
        let mut active = n;
        let mut i = 0;
        while i < active {
            if tmp[i][i] == 0 {
                match (i + 1..active).find(|&j| tmp[j][i] != 0) {
                    Some(j) => {
                        tmp.swap(i, j);
                        inv.swap(i, j);
                    }
                    None if drop_dependent => {
                        // No pivot left for this column: the current row is a
                        // combination of the processed ones. Park it past the
                        // active window and retry the position.
                        active -= 1;
                        tmp.swap(i, active);
                        inv.swap(i, active);
                        continue;
                    }
                    None => return Err(MathError::Singular),
                }
            }

            let inv_pivot = gf_inv(tmp[i][i]);
            normalize_row(&mut tmp[i], inv_pivot);
            normalize_row(&mut inv[i], inv_pivot);

            for j in 0..n {
                if j != i && tmp[j][i] != 0 {
                    let coef = tmp[j][i];
                    mul_and_subtract(&mut tmp, j, i, coef);
                    mul_and_subtract(&mut inv, j, i, coef);
                }
            }
            i += 1;
        }

        Ok(GfMatrix { rows: inv })
    }
}

fn normalize_row(row: &mut [u8], factor: u8) {
    for v in row.iter_mut() {
        *v = gf_mul(*v, factor);
    }
}

/// rows[target] -= coef * rows[pivot]
fn mul_and_subtract(rows: &mut [Vec<u8>], target: usize, pivot: usize, coef: u8) {
    debug_assert_ne!(target, pivot);
    let (a, b) = if target < pivot {
        let (lo, hi) = rows.split_at_mut(pivot);
        (&mut lo[target], &hi[0])
    } else {
        let (lo, hi) = rows.split_at_mut(target);
        (&mut hi[0], &lo[pivot])
    };
    for (t, &p) in a.iter_mut().zip(b.iter()) {
        *t = gf_sub(*t, gf_mul(p, coef));
    }
}

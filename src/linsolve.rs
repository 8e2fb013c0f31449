//! Column-oriented Gaussian elimination over GF(2^m), used to recover the
//! secret (and, optionally, the full coefficient vector) from K shares.

use crate::error::{Error, Result};
use crate::field::{FieldElement, FieldParams};

/// A `k` x `k` matrix of field elements stored as a single contiguous
/// arena, per design note 9, rather than a 2-D array of bignum handles.
/// `AA[row][col]` lives at `row * k + col`.
pub struct Matrix {
    k: usize,
    cells: Vec<FieldElement>,
}

impl Matrix {
    pub fn zero(k: usize) -> Self {
        Matrix {
            k,
            cells: vec![FieldElement::zero(); k * k],
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> FieldElement {
        self.cells[row * self.k + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: FieldElement) {
        self.cells[row * self.k + col] = v;
    }

    pub fn swap_columns_from(&mut self, row_start: usize, col_a: usize, col_b: usize) {
        for row in row_start..self.k {
            let a = self.get(row, col_a);
            let b = self.get(row, col_b);
            self.set(row, col_a, b);
            self.set(row, col_b, a);
        }
    }

    fn zeroize(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.zeroize();
        }
    }
}

/// The matrix entries are derived together with the secret-bearing
/// right-hand side during elimination, so they are zeroized on every
/// exit path, success or error, via `Drop` rather than a manual call at
/// each return site.
impl Drop for Matrix {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Runs column-oriented Gaussian elimination, exactly as spec.md §4.8.
/// `aa` and `b` are consumed (triangularized) in place.
///
/// When `recover` is `false`, only `b[k-1]` is meaningful on return (it
/// holds the secret, `/ AA[k-1][k-1]` already applied). When `recover` is
/// `true`, full back-substitution is performed and `b` holds the entire
/// coefficient vector in descending order, usable to re-evaluate shares
/// via [`crate::poly::horner_r`].
pub fn solve(fp: &FieldParams, aa: &mut Matrix, b: &mut [FieldElement], recover: bool) -> Result<()> {
    let k = aa.k;
    debug_assert_eq!(b.len(), k);

    for i in 0..k {
        if aa.get(i, i).is_zero() {
            let mut found = None;
            for j in (i + 1)..k {
                if !aa.get(i, j).is_zero() {
                    found = Some(j);
                    break;
                }
            }
            match found {
                None => return Err(Error::Inconsistent),
                Some(j) => {
                    aa.swap_columns_from(i, i, j);
                    b.swap(i, j);
                }
            }
        }

        for j in (i + 1)..k {
            let aij = aa.get(i, j);
            if aij.is_zero() {
                continue;
            }
            let aii = aa.get(i, i);
            for kk in (i + 1)..k {
                let h = fp.mul(&aa.get(kk, i), &aij);
                let updated = fp.add(&fp.mul(&aa.get(kk, j), &aii), &h);
                aa.set(kk, j, updated);
            }
            let h = fp.mul(&b[i], &aij);
            b[j] = fp.add(&fp.mul(&b[j], &aii), &h);
        }
        debug!("gaussian elimination: pivot {} of {} complete", i + 1, k);
    }

    let inv_last = fp.inv(&aa.get(k - 1, k - 1));
    b[k - 1] = fp.mul(&b[k - 1], &inv_last);

    if recover {
        for i in (0..k.saturating_sub(1)).rev() {
            let mut acc = b[i];
            for j in (i + 1)..k {
                acc = fp.add(&acc, &fp.mul(&b[j], &aa.get(j, i)));
            }
            let inv_ii = fp.inv(&aa.get(i, i));
            b[i] = fp.mul(&acc, &inv_ii);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::horner;

    /// Builds the Vandermonde-style matrix/rhs for indices `xs` and
    /// payloads `ys` the way `combine` does, so unit tests can exercise
    /// `solve` directly without going through share text parsing.
    fn build_system(fp: &FieldParams, xs: &[u32], coeff: &[FieldElement]) -> (Matrix, Vec<FieldElement>) {
        let k = xs.len();
        let mut aa = Matrix::zero(k);
        let mut b = vec![FieldElement::zero(); k];
        for (i, &xi) in xs.iter().enumerate() {
            let x = FieldElement::from_u64(xi as u64);
            aa.set(k - 1, i, FieldElement::one());
            for j in (0..k - 1).rev() {
                let prev = aa.get(j + 1, i);
                aa.set(j, i, fp.mul(&prev, &x));
            }
            let y = horner(fp, &x, coeff);
            let x_k = fp.mul(&aa.get(0, i), &x);
            b[i] = fp.add(&y, &x_k);
        }
        (aa, b)
    }

    #[test]
    fn recovers_secret_from_k_shares() {
        let fp = FieldParams::new(16).unwrap();
        let coeff = [
            FieldElement::from_u64(0xBEEF),
            FieldElement::from_u64(0x1234),
            FieldElement::from_u64(0xCAFE),
        ];
        let xs = [1, 2, 3];
        let (mut aa, mut b) = build_system(&fp, &xs, &coeff);
        solve(&fp, &mut aa, &mut b, false).unwrap();
        assert_eq!(b[2], coeff[0]);
    }

    #[test]
    fn recovery_mode_reconstructs_full_coefficient_vector() {
        let fp = FieldParams::new(16).unwrap();
        let coeff = [
            FieldElement::from_u64(11),
            FieldElement::from_u64(22),
            FieldElement::from_u64(33),
        ];
        let xs = [4, 5, 6];
        let (mut aa, mut b) = build_system(&fp, &xs, &coeff);
        solve(&fp, &mut aa, &mut b, true).unwrap();
        // b now holds coefficients in descending order: [c2, c1, c0].
        assert_eq!(b[2], coeff[0]);
        assert_eq!(b[1], coeff[1]);
        assert_eq!(b[0], coeff[2]);
    }

    #[test]
    fn duplicate_index_is_inconsistent() {
        let fp = FieldParams::new(16).unwrap();
        let coeff = [FieldElement::from_u64(1), FieldElement::from_u64(2)];
        let xs = [3, 3];
        let (mut aa, mut b) = build_system(&fp, &xs, &coeff);
        assert!(matches!(solve(&fp, &mut aa, &mut b, false), Err(Error::Inconsistent)));
    }

    #[test]
    fn set_independence_any_three_of_five() {
        let fp = FieldParams::new(32).unwrap();
        let coeff = [
            FieldElement::from_u64(99),
            FieldElement::from_u64(7),
            FieldElement::from_u64(42),
        ];
        let subsets: [[u32; 3]; 3] = [[1, 2, 3], [2, 4, 5], [1, 3, 5]];
        for xs in subsets {
            let (mut aa, mut b) = build_system(&fp, &xs, &coeff);
            solve(&fp, &mut aa, &mut b, false).unwrap();
            assert_eq!(b[2], coeff[0]);
        }
    }
}

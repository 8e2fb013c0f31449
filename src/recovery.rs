//! Recovery mode: given the secret itself (treated as the virtual share
//! at `x = 0`) plus `threshold - 1` ordinary shares, reconstructs the
//! full coefficient vector and re-evaluates it at `1..=number` to print
//! a fresh, consistent set of shares. Used by both `ssss-split -r` (when
//! there was not enough entropy the first time around) and
//! `ssss-combine -r` (when some shares were lost).

use crate::combine::build_column;
use crate::error::Result;
use crate::field::{FieldElement, FieldParams};
use crate::linsolve::{self, Matrix};
use crate::poly::horner_r;
use crate::zeroizing::ZeroizingVec;

/// Solves for the degree-`(k-1)` polynomial passing through the virtual
/// share `(0, secret)` and the `k - 1` shares `(xs[i], ys[i])`, then
/// evaluates it at every index `1..=number`.
pub fn reconstruct(
    fp: &FieldParams,
    k: usize,
    number: u32,
    secret: FieldElement,
    xs: &[u32],
    ys: &[FieldElement],
) -> Result<Vec<(u32, FieldElement)>> {
    debug_assert_eq!(xs.len(), k - 1);
    debug_assert_eq!(ys.len(), k - 1);

    let mut aa = Matrix::zero(k);
    let mut b = ZeroizingVec::new(vec![FieldElement::zero(); k]);
    build_column(fp, &mut aa, 0, k, 0, secret, &mut b);
    for (col, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        build_column(fp, &mut aa, col + 1, k, x, y, &mut b);
    }

    linsolve::solve(fp, &mut aa, &mut b, true)?;

    let mut out = Vec::with_capacity(number as usize);
    for i in 1..=number {
        let x = FieldElement::from_u64(i as u64);
        let y = horner_r(fp, &x, &b);
        out.push((i, y));
    }
    Ok(out)
}

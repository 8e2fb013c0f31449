//! Horner-form polynomial evaluation over GF(2^m).

use crate::field::{FieldElement, FieldParams};

/// Evaluates `y = (((x + c[n-1])*x + c[n-2])*x + ... )*x + c[0]`.
///
/// The first step (`y = x`) adds an extra `x^n` term to the ordinary
/// polynomial `c[0] + c[1]*x + ... + c[n-1]*x^(n-1)`; this term is present
/// in every share and is subtracted back off during combination (see
/// [`crate::linsolve`]). Retained for interoperability with existing
/// share corpora, per spec.md §4.7.
pub fn horner(fp: &FieldParams, x: &FieldElement, coeff: &[FieldElement]) -> FieldElement {
    let n = coeff.len();
    let mut y = *x;
    for i in (1..n).rev() {
        y = fp.add(&y, &coeff[i]);
        y = fp.mul(&y, x);
    }
    fp.add(&y, &coeff[0])
}

/// Same evaluation with the coefficient vector read in reverse order;
/// used by recovery mode, which treats the solved back-substitution
/// vector as coefficients in descending order.
pub fn horner_r(fp: &FieldParams, x: &FieldElement, coeff_rev: &[FieldElement]) -> FieldElement {
    let n = coeff_rev.len();
    let reversed: Vec<FieldElement> = coeff_rev.iter().rev().copied().collect();
    horner(fp, x, &reversed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_matches_hand_evaluation() {
        let fp = FieldParams::new(16).unwrap();
        let c0 = FieldElement::from_u64(7);
        let c1 = FieldElement::from_u64(3);
        let coeff = [c0, c1];
        let x = FieldElement::from_u64(5);

        // y = (x + c1) * x + c0
        let expected = fp.add(&fp.mul(&fp.add(&x, &c1), &x), &c0);
        assert_eq!(horner(&fp, &x, &coeff), expected);
    }

    #[test]
    fn horner_r_reverses_coefficients() {
        let fp = FieldParams::new(16).unwrap();
        let coeff = [
            FieldElement::from_u64(1),
            FieldElement::from_u64(2),
            FieldElement::from_u64(3),
        ];
        let x = FieldElement::from_u64(9);
        let mut reversed = coeff;
        reversed.reverse();
        assert_eq!(horner_r(&fp, &x, &coeff), horner(&fp, &x, &reversed));
    }
}

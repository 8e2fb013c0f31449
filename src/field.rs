//! Finite-field arithmetic over GF(2^m), m a multiple of 8 in `[8, 1024]`.
//!
//! Per design note 9 in the specification, field elements are not backed
//! by an arbitrary-precision bignum library (that is an external
//! collaborator this crate does not depend on); instead each element is a
//! fixed-capacity bit-vector, which avoids heap churn on secret values and
//! makes zeroization deterministic.

use crate::error::{Error, Result};

/// Largest supported field degree.
pub const MAXDEGREE: u32 = 1024;

const LIMB_BITS: u32 = 64;
/// Capacity in 64-bit limbs: `MAXDEGREE` plus slack for the intermediate
/// shifts `mul`/`inv` perform before reducing modulo the field polynomial.
const LIMBS: usize = (MAXDEGREE as usize + 128) / 64;

/// The three "middle" nonzero exponents of the fixed irreducible
/// polynomial `P_m(x) = x^m + x^a + x^b + x^c + 1`, indexed by `m/8 - 1`.
/// Reproduced verbatim from the reference implementation.
pub const IRRED: [u8; 384] = [
    4, 3, 1, 5, 3, 1, 4, 3, 1, 7, 3, 2, 5, 4, 3, 5, 3, 2, 7, 4, 2, 4, 3, 1, 10, 9, 3, 9, 4, 2, 7,
    6, 2, 10, 9, 6, 4, 3, 1, 5, 4, 3, 4, 3, 1, 7, 2, 1, 5, 3, 2, 7, 4, 2, 6, 3, 2, 5, 3, 2, 15, 3,
    2, 11, 3, 2, 9, 8, 7, 7, 2, 1, 5, 3, 2, 9, 3, 1, 7, 3, 1, 9, 8, 3, 9, 4, 2, 8, 5, 3, 15, 14,
    10, 10, 5, 2, 9, 6, 2, 9, 3, 2, 9, 5, 2, 11, 10, 1, 7, 3, 2, 11, 2, 1, 9, 7, 4, 4, 3, 1, 8, 3,
    1, 7, 4, 1, 7, 2, 1, 13, 11, 6, 5, 3, 2, 7, 3, 2, 8, 7, 5, 12, 3, 2, 13, 10, 6, 5, 3, 2, 5, 3,
    2, 9, 5, 2, 9, 7, 2, 13, 4, 3, 4, 3, 1, 11, 6, 4, 18, 9, 6, 19, 18, 13, 11, 3, 2, 15, 9, 6, 4,
    3, 1, 16, 5, 2, 15, 14, 6, 8, 5, 2, 15, 11, 2, 11, 6, 2, 7, 5, 3, 8, 3, 1, 19, 16, 9, 11, 9, 6,
    15, 7, 6, 13, 4, 3, 14, 13, 3, 13, 6, 3, 9, 5, 2, 19, 13, 6, 19, 10, 3, 11, 6, 5, 9, 2, 1, 14,
    3, 2, 13, 3, 1, 7, 5, 4, 11, 9, 8, 11, 6, 5, 23, 16, 9, 19, 14, 6, 23, 10, 2, 8, 3, 2, 5, 4, 3,
    9, 6, 4, 4, 3, 2, 13, 8, 6, 13, 11, 1, 13, 10, 3, 11, 6, 5, 19, 17, 4, 15, 14, 7, 13, 9, 6, 9,
    7, 3, 9, 7, 1, 14, 3, 2, 11, 8, 2, 11, 6, 4, 13, 5, 2, 11, 5, 1, 11, 4, 1, 19, 10, 3, 21, 10,
    6, 13, 3, 1, 15, 7, 5, 19, 18, 10, 7, 5, 3, 12, 7, 2, 7, 5, 1, 14, 9, 6, 10, 3, 2, 15, 13, 12,
    12, 11, 9, 16, 9, 7, 12, 9, 3, 9, 5, 2, 17, 10, 6, 24, 9, 3, 17, 15, 13, 5, 4, 3, 19, 17, 8,
    15, 6, 3, 19, 6, 1,
];

/// Returns `true` if `deg` is a field width this crate supports.
pub fn field_size_valid(deg: u32) -> bool {
    (8..=MAXDEGREE).contains(&deg) && deg % 8 == 0
}

/// A fixed-capacity bit-vector, interpreted as the coefficients of a
/// polynomial over GF(2) of degree less than the active field's `m`. Plain
/// data with no ownership of secrets by itself: callers that hold secret
/// field elements zeroize them explicitly (see [`crate::split`] and
/// [`crate::combine`]), mirroring design note 9's "single contiguous
/// arena" guidance.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FieldElement {
    limbs: [u64; LIMBS],
}

impl std::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "FieldElement({})", hex::encode(self.to_bytes_be((self.bit_length() as usize + 7) / 8)))
    }
}

impl FieldElement {
    pub const fn zero() -> Self {
        FieldElement { limbs: [0; LIMBS] }
    }

    pub fn one() -> Self {
        let mut e = Self::zero();
        e.set_bit(0);
        e
    }

    pub fn from_u64(v: u64) -> Self {
        let mut e = Self::zero();
        e.limbs[0] = v;
        e
    }

    /// Overwrites every limb with zero via a volatile write, so the
    /// compiler cannot optimize the store away even though `self` may go
    /// out of scope immediately afterward.
    pub fn zeroize(&mut self) {
        for limb in self.limbs.iter_mut() {
            unsafe { std::ptr::write_volatile(limb, 0) };
        }
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    pub fn test_bit(&self, i: u32) -> bool {
        let idx = (i / LIMB_BITS) as usize;
        if idx >= LIMBS {
            return false;
        }
        (self.limbs[idx] >> (i % LIMB_BITS)) & 1 == 1
    }

    pub fn set_bit(&mut self, i: u32) {
        let idx = (i / LIMB_BITS) as usize;
        if idx < LIMBS {
            self.limbs[idx] |= 1u64 << (i % LIMB_BITS);
        }
    }

    pub fn clr_bit(&mut self, i: u32) {
        let idx = (i / LIMB_BITS) as usize;
        if idx < LIMBS {
            self.limbs[idx] &= !(1u64 << (i % LIMB_BITS));
        }
    }

    /// Index one past the highest set bit, or 0 if the element is zero.
    /// Equivalent to `mpz_sizeinbits` in the reference implementation.
    pub fn bit_length(&self) -> u32 {
        for (i, &limb) in self.limbs.iter().enumerate().rev() {
            if limb != 0 {
                return (i as u32) * LIMB_BITS + (LIMB_BITS - limb.leading_zeros());
            }
        }
        0
    }

    pub fn xor(&self, other: &FieldElement) -> FieldElement {
        let mut out = FieldElement::zero();
        for i in 0..LIMBS {
            out.limbs[i] = self.limbs[i] ^ other.limbs[i];
        }
        out
    }

    pub fn xor_assign(&mut self, other: &FieldElement) {
        for i in 0..LIMBS {
            self.limbs[i] ^= other.limbs[i];
        }
    }

    /// Shifts left by `n` bits, discarding bits that fall off the top of
    /// the fixed-capacity buffer.
    pub fn shl(&self, n: u32) -> FieldElement {
        let mut out = FieldElement::zero();
        let top = self.bit_length();
        if n == 0 {
            return *self;
        }
        for i in (0..top).rev() {
            if self.test_bit(i) {
                let dst = i + n;
                if (dst as usize) < LIMBS as usize * LIMB_BITS as usize {
                    out.set_bit(dst);
                }
            }
        }
        out
    }

    /// Imports a big-endian byte string, most significant byte first.
    pub fn from_bytes_be(bytes: &[u8]) -> FieldElement {
        let mut e = FieldElement::zero();
        let n = bytes.len();
        for (i, &b) in bytes.iter().enumerate() {
            let byte_index = n - 1 - i;
            let bit0 = (byte_index as u32) * 8;
            for bit in 0..8u32 {
                if (b >> bit) & 1 == 1 {
                    e.set_bit(bit0 + bit);
                }
            }
        }
        e
    }

    /// Exports exactly `nbytes` big-endian bytes (most significant first).
    pub fn to_bytes_be(&self, nbytes: usize) -> Vec<u8> {
        let mut out = vec![0u8; nbytes];
        for byte_index in 0..nbytes {
            let bit0 = (byte_index as u32) * 8;
            let mut byte = 0u8;
            for bit in 0..8u32 {
                if self.test_bit(bit0 + bit) {
                    byte |= 1 << bit;
                }
            }
            out[nbytes - 1 - byte_index] = byte;
        }
        out
    }

}

/// The field parameters active for one split/combine operation: the
/// degree `m` and the irreducible polynomial it selects. Scoped to the
/// function that needs it rather than kept as a process-wide global, per
/// design note 9.
#[derive(Clone, Copy)]
pub struct FieldParams {
    pub degree: u32,
    poly: FieldElement,
}

impl FieldParams {
    /// Builds field parameters for degree `deg`, setting bit `deg`, bit 0,
    /// and the three table-driven middle bits.
    pub fn new(deg: u32) -> Result<Self> {
        if !field_size_valid(deg) {
            return Err(Error::InvalidSecurityLevel);
        }
        let mut poly = FieldElement::zero();
        poly.set_bit(deg);
        let base = 3 * (deg / 8 - 1) as usize;
        poly.set_bit(IRRED[base] as u32);
        poly.set_bit(IRRED[base + 1] as u32);
        poly.set_bit(IRRED[base + 2] as u32);
        poly.set_bit(0);
        Ok(FieldParams { degree: deg, poly })
    }

    /// `z = x XOR y`. Subtraction is identical in characteristic 2.
    pub fn add(&self, x: &FieldElement, y: &FieldElement) -> FieldElement {
        x.xor(y)
    }

    /// Shift-and-add multiplication reducing modulo the active
    /// polynomial, exactly as `field_mult` in the reference.
    pub fn mul(&self, x: &FieldElement, y: &FieldElement) -> FieldElement {
        let mut b = *x;
        let mut z = if y.test_bit(0) { b } else { FieldElement::zero() };
        for i in 1..self.degree {
            b = b.shl(1);
            if b.test_bit(self.degree) {
                b.xor_assign(&self.poly);
            }
            if y.test_bit(i) {
                z.xor_assign(&b);
            }
        }
        z
    }

    /// Extended-binary-GCD inversion. `x` must be nonzero; this is a
    /// programming-error precondition the caller is responsible for, not
    /// a user-input validation (see spec.md §4.4).
    pub fn inv(&self, x: &FieldElement) -> FieldElement {
        debug_assert!(!x.is_zero(), "field inversion of zero");
        let mut u = *x;
        let mut v = self.poly;
        let mut g = FieldElement::zero();
        let mut z = FieldElement::one();
        while u != FieldElement::one() {
            let mut i = u.bit_length() as i64 - v.bit_length() as i64;
            if i < 0 {
                std::mem::swap(&mut u, &mut v);
                std::mem::swap(&mut z, &mut g);
                i = -i;
            }
            let h = v.shl(i as u32);
            u.xor_assign(&h);
            let h = g.shl(i as u32);
            z.xor_assign(&h);
        }
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_bytes() {
        let bytes = [0xde, 0xad, 0xbe, 0xef];
        let e = FieldElement::from_bytes_be(&bytes);
        assert_eq!(e.to_bytes_be(4), bytes);
    }

    #[test]
    fn add_is_involution() {
        let fp = FieldParams::new(128).unwrap();
        let a = FieldElement::from_u64(12345);
        let b = FieldElement::from_u64(9876);
        let s = fp.add(&a, &b);
        assert_eq!(fp.add(&s, &b), a);
    }

    #[test]
    fn mul_identity_and_inverse() {
        let fp = FieldParams::new(16).unwrap();
        let one = FieldElement::one();
        let a = FieldElement::from_u64(4242);
        assert_eq!(fp.mul(&a, &one), a);
        let inv_a = fp.inv(&a);
        assert_eq!(fp.mul(&a, &inv_a), one);
    }

    #[test]
    fn mul_commutes_and_distributes() {
        let fp = FieldParams::new(32).unwrap();
        let a = FieldElement::from_u64(111);
        let b = FieldElement::from_u64(222);
        let c = FieldElement::from_u64(333);
        assert_eq!(fp.mul(&a, &b), fp.mul(&b, &a));
        let lhs = fp.mul(&a, &fp.add(&b, &c));
        let rhs = fp.add(&fp.mul(&a, &b), &fp.mul(&a, &c));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn every_nonzero_element_has_an_inverse_gf256() {
        let fp = FieldParams::new(8).unwrap();
        for v in 1u64..256 {
            let a = FieldElement::from_u64(v);
            let inv_a = fp.inv(&a);
            assert_eq!(fp.mul(&a, &inv_a), FieldElement::one());
        }
    }

    #[test]
    fn invalid_degree_rejected() {
        assert!(FieldParams::new(7).is_err());
        assert!(FieldParams::new(2048).is_err());
    }
}

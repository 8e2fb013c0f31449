//! A small RAII guard that zeroizes a `Vec<FieldElement>` when it goes
//! out of scope, on every exit path including `?`-propagated errors —
//! the idiomatic Rust equivalent of the teacher's `Drop`-based
//! `SecretKey` zeroization.

use std::ops::{Deref, DerefMut};

use crate::field::FieldElement;

pub struct ZeroizingVec(Vec<FieldElement>);

impl ZeroizingVec {
    pub fn new(v: Vec<FieldElement>) -> Self {
        ZeroizingVec(v)
    }
}

impl Deref for ZeroizingVec {
    type Target = Vec<FieldElement>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ZeroizingVec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for ZeroizingVec {
    fn drop(&mut self) {
        for e in self.0.iter_mut() {
            e.zeroize();
        }
    }
}

//! Blocking entropy source used to sample random polynomial coefficients.
//!
//! The original `ssss` opens `/dev/random` directly; per the Non-goals in
//! `spec.md` the entropy source is an external collaborator, so here it is
//! the system CSPRNG reached through `rand::rngs::OsRng`, the same
//! cryptographic RNG the teacher crate uses for its own secret generation.

use errno::Errno;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Error, Result};

/// A handle to the system's cryptographically secure RNG. Cheap to
/// construct; holds no file descriptor, so there is nothing to close
/// explicitly, unlike the C original's `open`/`close` pair on
/// `/dev/random`.
pub struct Entropy {
    rng: OsRng,
}

impl Entropy {
    /// "Opens" the entropy stream. Mirrors `cprng_init` in spirit even
    /// though `OsRng` needs no setup, so call sites read the same way.
    pub fn open() -> Result<Self> {
        Ok(Entropy { rng: OsRng })
    }

    /// Fills `buf` with exactly `buf.len()` random bytes, failing with
    /// `EntropyIO` on any underlying error.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        self.rng.try_fill_bytes(buf).map_err(|_| Error::EntropyIO {
            errno: Errno(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_fills_the_whole_buffer() {
        let mut entropy = Entropy::open().expect("open");
        let mut buf = [0u8; 32];
        entropy.read(&mut buf).expect("read");
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn two_reads_differ() {
        let mut entropy = Entropy::open().expect("open");
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        entropy.read(&mut a).expect("read a");
        entropy.read(&mut b).expect("read b");
        assert_ne!(a, b);
    }
}

//! Fixed-capacity byte buffers that are guaranteed to be zeroed on release.
//!
//! Grounded on the teacher's `ContainsSecret`/`SecretKey` pattern: secret
//! material is locked into RAM with `memsec::mlock` on construction and
//! wiped with `memsec::memzero` (a volatile write the compiler cannot
//! elide) on every exit path, success or failure.

use std::env;
use std::fmt;
use std::mem::size_of_val;

use errno::errno;
use memsec::{memzero, mlock, munlock};

use crate::error::{Error, Result};

lazy_static! {
    /// Whether secret buffers should be `mlock`ed into RAM. Enabled by
    /// default; disabled by setting `SSSS_MLOCK=false`, which is useful on
    /// systems with a very small `RLIMIT_MEMLOCK` (containers, CI). The
    /// `-M` CLI flag promotes a failed lock from a warning into a fatal
    /// error; it does not affect whether locking is attempted.
    pub(crate) static ref SHOULD_MLOCK: bool = match env::var("SSSS_MLOCK") {
        Ok(s) => s.parse().unwrap_or(true),
        _ => true,
    };
}

/// A fixed-size byte buffer that locks its memory (best-effort) and zeroes
/// it on drop. Used for secrets, coefficients, and any other byte region
/// that must not outlive its owning stack frame in readable form.
pub struct SecureBuffer {
    data: Box<[u8]>,
    locked: bool,
}

impl fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SecureBuffer({} bytes, ...)", self.data.len())
    }
}

impl SecureBuffer {
    /// Allocates a zeroed buffer of `n` bytes and attempts to lock it into
    /// RAM. Locking failure is returned as an error only when `demand_lock`
    /// is set; otherwise it is logged as a warning and the buffer is
    /// returned unlocked.
    pub fn new(n: usize, demand_lock: bool) -> Result<Self> {
        let data = vec![0u8; n].into_boxed_slice();
        let mut buf = SecureBuffer {
            data,
            locked: false,
        };
        match buf.mlock() {
            Ok(()) => buf.locked = true,
            Err(e) => {
                if demand_lock {
                    buf.zero();
                    return Err(e);
                }
                warn!("{}; continuing without a memory lock", e);
            }
        }
        Ok(buf)
    }

    fn mlock(&self) -> Result<()> {
        if !*SHOULD_MLOCK || self.data.is_empty() {
            return Ok(());
        }
        let ptr = self.data.as_ptr() as *mut u8;
        let n_bytes = size_of_val(&*self.data);
        if unsafe { mlock(ptr, n_bytes) } {
            Ok(())
        } else {
            Err(Error::MlockFailed { errno: errno() })
        }
    }

    fn munlock(&self) {
        if !self.locked || self.data.is_empty() {
            return;
        }
        let ptr = self.data.as_ptr() as *mut u8;
        let n_bytes = size_of_val(&*self.data);
        if !unsafe { munlock(ptr, n_bytes) } {
            warn!(
                "{}",
                Error::MunlockFailed { errno: errno() }
            );
        }
    }

    fn zero(&mut self) {
        if self.data.is_empty() {
            return;
        }
        let ptr = self.data.as_mut_ptr();
        let n_bytes = size_of_val(&*self.data);
        unsafe {
            memzero(ptr, n_bytes);
        }
    }

    /// Returns a mutable view of the buffer's contents.
    pub fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns an immutable view of the buffer's contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.zero();
        self.munlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = SecureBuffer::new(32, false).expect("alloc");
        assert_eq!(buf.as_slice(), &[0u8; 32][..]);
    }

    #[test]
    fn as_mut_is_writable_and_readable() {
        let mut buf = SecureBuffer::new(4, false).expect("alloc");
        buf.as_mut().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn zero_length_buffer_is_fine() {
        let buf = SecureBuffer::new(0, false).expect("alloc");
        assert!(buf.is_empty());
    }
}

//! Terminal echo suppression and saved-set-UID dropping.
//!
//! These are thin `libc` shims reproducing the original `ssss`'s startup
//! behavior (see `SPEC_FULL.md`): `tcsetattr`/`ECHO` toggling while the
//! secret or shares are typed, and dropping a setuid privilege escalation
//! immediately on startup.

use std::io::IsTerminal;
use std::mem::MaybeUninit;

use crate::error::{Error, Result};

/// Drops effective UID back to the real UID if this binary is running
/// setuid, mirroring `if (getuid() != geteuid()) seteuid(getuid());`.
pub fn drop_setuid_privileges() {
    unsafe {
        let real = libc::getuid();
        let effective = libc::geteuid();
        if real != effective {
            libc::seteuid(real);
        }
    }
}

/// A guard that disables terminal echo on stdin for as long as it is
/// held, restoring the prior state on drop (including on panic), so a
/// typed secret is never reflected back to the screen.
pub struct EchoGuard {
    original: Option<libc::termios>,
}

impl EchoGuard {
    /// Disables echo on stdin, if stdin is a TTY. Returns a guard that
    /// restores the original terminal state when dropped.
    pub fn disable() -> Result<Self> {
        if !std::io::stdin().is_terminal() {
            return Ok(EchoGuard { original: None });
        }
        unsafe {
            let mut term = MaybeUninit::<libc::termios>::uninit();
            if libc::tcgetattr(libc::STDIN_FILENO, term.as_mut_ptr()) != 0 {
                return Err(Error::TerminalControl);
            }
            let original = term.assume_init();
            let mut off = original;
            off.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &off) != 0 {
                return Err(Error::TerminalControl);
            }
            Ok(EchoGuard {
                original: Some(original),
            })
        }
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        if let Some(original) = self.original {
            unsafe {
                libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &original);
            }
        }
    }
}

/// Writes a diagnostic line to stderr, prefixed with a bell character iff
/// stderr is a TTY, matching `isatty(2) ? "\a" : ""` in the reference.
pub fn diagnostic(prefix: &str, msg: &str) {
    let bell = if std::io::stderr().is_terminal() {
        "\u{7}"
    } else {
        ""
    };
    eprintln!("{bell}{prefix}: {msg}.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_setuid_does_not_panic_when_not_setuid() {
        drop_setuid_privileges();
    }
}

//! Error types returned by the core split/combine pipelines.
//!
//! Every fallible operation in this crate returns a typed [`Error`] rather
//! than panicking; only the CLI binaries convert a terminal `Err` into a
//! process exit.

use errno::Errno;
use failure::Fail;

/// The taxonomy of things that can go wrong while splitting or combining
/// shares.
#[derive(Debug, Fail)]
pub enum Error {
    /// A hex or ASCII secret/share payload was longer than the active
    /// field width allows.
    #[fail(display = "input string too long")]
    InputTooLong,

    /// A hex payload contained a non-hex-digit character, or a share line
    /// could not be parsed into `[token-]index-payload`.
    #[fail(display = "invalid syntax")]
    InvalidSyntax,

    /// The entropy source could not be opened.
    #[fail(display = "couldn't open entropy source: {}", errno)]
    EntropyOpen { errno: Errno },

    /// The entropy source could not be closed.
    #[fail(display = "couldn't close entropy source: {}", errno)]
    EntropyClose { errno: Errno },

    /// A read from the entropy source failed.
    #[fail(display = "couldn't read from entropy source: {}", errno)]
    EntropyIO { errno: Errno },

    /// Reading the secret or a share line from stdin failed.
    #[fail(display = "I/O error while reading secret")]
    SecretIO,

    /// The requested or derived security level `m` is not a multiple of 8
    /// in `[8, 1024]`.
    #[fail(display = "security level invalid (secret too long?)")]
    InvalidSecurityLevel,

    /// The threshold `K` was below the minimum of 2.
    #[fail(display = "invalid parameters: threshold must be at least 2")]
    InvalidThreshold,

    /// The number of shares requested was below the threshold.
    #[fail(display = "invalid parameters: number of shares must be at least the threshold")]
    InvalidShareCount,

    /// A `-w`/`--token` value was longer than 128 bytes.
    #[fail(display = "token too long")]
    TokenTooLong,

    /// Writing a share to stdout failed.
    #[fail(display = "I/O error while writing share")]
    ShareIO,

    /// A share's hex payload length does not correspond to a valid field
    /// width.
    #[fail(display = "share has illegal length")]
    IllegalShareLength,

    /// Two shares being combined were generated under different security
    /// levels.
    #[fail(display = "shares have different security levels")]
    ShareLevelMismatch,

    /// A share's index was not a valid positive decimal number, or a share
    /// line was otherwise malformed.
    #[fail(display = "invalid share")]
    InvalidShare,

    /// Gaussian elimination could not find a pivot: the shares are
    /// linearly dependent, typically because the same index was used
    /// twice.
    #[fail(display = "shares inconsistent. Perhaps a single share was used twice")]
    Inconsistent,

    /// Locking secret memory into RAM failed and `-M` demanded it succeed.
    #[fail(display = "couldn't get memory lock: {}", errno)]
    MlockFailed { errno: Errno },

    /// Unlocking secret memory failed during teardown.
    #[fail(display = "couldn't release memory lock: {}", errno)]
    MunlockFailed { errno: Errno },

    /// Adjusting the terminal's echo state failed.
    #[fail(display = "couldn't control terminal echo")]
    TerminalControl,

    /// A catch-all for conditions that do not fit the taxonomy above.
    #[fail(display = "{}", message)]
    Unknown { message: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Parsed configuration the core pipelines consume. Per spec.md §1, the
//! command-line argument parser itself is an external collaborator; the
//! core only ever sees the already-parsed values below.

/// Shared diagnostics verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    /// Print prompts and informational banners.
    Normal,
    /// Suppress informational banners, keep warnings.
    Quiet,
    /// Suppress informational banners and warnings.
    Silent,
}

impl Verbosity {
    pub fn prints_banners(&self) -> bool {
        matches!(self, Verbosity::Normal)
    }

    pub fn prints_warnings(&self) -> bool {
        !matches!(self, Verbosity::Silent)
    }
}

/// Configuration for `ssss-split`.
#[derive(Clone, Debug)]
pub struct SplitConfig {
    pub threshold: u32,
    pub number: u32,
    /// 0 means "derive from secret length".
    pub security: u32,
    pub token: Option<String>,
    pub hex: bool,
    pub diffusion: bool,
    pub verbosity: Verbosity,
    pub demand_mlock: bool,
    /// Recovery split: read the secret and `threshold - 1` existing
    /// shares, then re-emit all `number` shares consistent with them.
    pub recovery: bool,
}

/// Configuration for `ssss-combine`.
#[derive(Clone, Debug)]
pub struct CombineConfig {
    pub threshold: u32,
    pub hex: bool,
    pub diffusion: bool,
    pub verbosity: Verbosity,
    pub demand_mlock: bool,
    /// Recovery emit: reconstruct the full coefficient vector and print
    /// all `number` shares instead of just the secret.
    pub recovery: Option<u32>,
}

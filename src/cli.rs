//! Command-line argument definitions for `ssss-split` and `ssss-combine`,
//! translated into the plain [`SplitConfig`]/[`CombineConfig`] structs the
//! core pipelines consume.

use clap::Parser;

use crate::config::{CombineConfig, SplitConfig, Verbosity};

fn verbosity_from_flags(quiet: bool, silent: bool) -> Verbosity {
    if silent {
        Verbosity::Silent
    } else if quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    }
}

/// Split a secret into shares of a `(threshold, number)` scheme.
#[derive(Parser, Debug)]
#[command(name = "ssss-split", version, about = "Shamir secret sharing: split")]
pub struct SplitArgs {
    /// Number of shares needed to reconstruct the secret.
    #[arg(short = 't', long = "threshold")]
    pub threshold: u32,

    /// Total number of shares to generate.
    #[arg(short = 'n', long = "number")]
    pub number: u32,

    /// Security level in bits (a multiple of 8). Derived from the
    /// secret's length when omitted.
    #[arg(short = 's', long = "security", default_value_t = 0)]
    pub security: u32,

    /// Prefix every generated share with this token.
    #[arg(short = 'w', long = "token")]
    pub token: Option<String>,

    /// Treat the secret as a hex string rather than ASCII text.
    #[arg(short = 'x', long = "hex")]
    pub hex: bool,

    /// Disable the all-or-nothing diffusion transform.
    #[arg(short = 'D', long = "no-diffusion")]
    pub no_diffusion: bool,

    /// Suppress informational banners.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Suppress informational banners and warnings.
    #[arg(short = 'Q', long = "silent")]
    pub silent: bool,

    /// Fail if secret memory cannot be locked into RAM.
    #[arg(short = 'M', long = "mlock")]
    pub mlock: bool,

    /// Recovery split: read the secret plus `threshold - 1` existing
    /// shares, and re-emit all `number` shares consistent with them.
    #[arg(short = 'r', long = "recovery")]
    pub recovery: bool,
}

impl From<SplitArgs> for SplitConfig {
    fn from(a: SplitArgs) -> Self {
        SplitConfig {
            threshold: a.threshold,
            number: a.number,
            security: a.security,
            token: a.token,
            hex: a.hex,
            diffusion: !a.no_diffusion,
            verbosity: verbosity_from_flags(a.quiet, a.silent),
            demand_mlock: a.mlock,
            recovery: a.recovery,
        }
    }
}

/// Combine shares of a `(threshold, ...)` scheme back into the secret.
#[derive(Parser, Debug)]
#[command(name = "ssss-combine", version, about = "Shamir secret sharing: combine")]
pub struct CombineArgs {
    /// Number of shares required to reconstruct the secret.
    #[arg(short = 't', long = "threshold")]
    pub threshold: u32,

    /// Treat share and secret payloads as hex strings.
    #[arg(short = 'x', long = "hex")]
    pub hex: bool,

    /// Disable the all-or-nothing diffusion transform.
    #[arg(short = 'D', long = "no-diffusion")]
    pub no_diffusion: bool,

    /// Suppress informational banners.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Suppress informational banners and warnings.
    #[arg(short = 'Q', long = "silent")]
    pub silent: bool,

    /// Fail if secret memory cannot be locked into RAM.
    #[arg(short = 'M', long = "mlock")]
    pub mlock: bool,

    /// Recovery emit: reconstruct the full coefficient vector from the
    /// secret plus `threshold - 1` shares, and print this many shares.
    #[arg(short = 'r', long = "recovery", value_name = "N")]
    pub recovery: Option<u32>,
}

impl From<CombineArgs> for CombineConfig {
    fn from(a: CombineArgs) -> Self {
        CombineConfig {
            threshold: a.threshold,
            hex: a.hex,
            diffusion: !a.no_diffusion,
            verbosity: verbosity_from_flags(a.quiet, a.silent),
            demand_mlock: a.mlock,
            recovery: a.recovery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn split_cli_structure_is_valid() {
        SplitArgs::command().debug_assert();
    }

    #[test]
    fn combine_cli_structure_is_valid() {
        CombineArgs::command().debug_assert();
    }

    #[test]
    fn split_args_translate_into_config() {
        let args = SplitArgs::parse_from(["ssss-split", "-t", "3", "-n", "5", "-x"]);
        let cfg: SplitConfig = args.into();
        assert_eq!(cfg.threshold, 3);
        assert_eq!(cfg.number, 5);
        assert!(cfg.hex);
        assert!(cfg.diffusion);
    }

    #[test]
    fn combine_recovery_flag_carries_share_count() {
        let args = CombineArgs::parse_from(["ssss-combine", "-t", "3", "-r", "5"]);
        let cfg: CombineConfig = args.into();
        assert_eq!(cfg.recovery, Some(5));
    }
}

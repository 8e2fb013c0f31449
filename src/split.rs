//! Split orchestration (C9): secret → N shares of a random degree-(K-1)
//! polynomial, or, in recovery mode, secret + K-1 existing shares → a
//! consistent re-emission of all N shares.

use std::io::{BufRead, Write};

use crate::codec::{self, Warning};
use crate::combine::read_shares;
use crate::config::SplitConfig;
use crate::entropy::Entropy;
use crate::error::{Error, Result};
use crate::field::{FieldElement, FieldParams};
use crate::poly::horner;
use crate::recovery;
use crate::term;
use crate::zeroizing::ZeroizingVec;

/// Derives the field width from the secret text when `-s` was not given:
/// one bit per ASCII character, or 4 bits per hex digit, rounded up to
/// the next multiple of 8.
pub(crate) fn derive_degree(secret_text: &str, hex: bool) -> u32 {
    if hex {
        (4 * secret_text.len() as u32).next_multiple_of(8)
    } else {
        8 * secret_text.len() as u32
    }
}

fn print_share<W: Write>(
    out: &mut W,
    token: &Option<String>,
    index: u32,
    fmt_len: usize,
    payload: &FieldElement,
    degree: u32,
) -> Result<()> {
    let (hexed, _warn) = codec::print(payload, degree, true);
    match token {
        Some(t) => writeln!(out, "{}-{:0width$}-{}", t, index, hexed, width = fmt_len),
        None => writeln!(out, "{:0width$}-{}", index, hexed, width = fmt_len),
    }
    .map_err(|_| Error::ShareIO)
}

/// Plain split: read the secret, build a random degree-`(threshold-1)`
/// polynomial with it as the constant term, and print `number` shares.
pub fn run<R: BufRead, W: Write>(cfg: &SplitConfig, input: &mut R, out: &mut W) -> Result<()> {
    if cfg.threshold < 2 {
        return Err(Error::InvalidThreshold);
    }
    if cfg.number < cfg.threshold {
        return Err(Error::InvalidShareCount);
    }
    if let Some(token) = &cfg.token {
        if token.len() > 128 {
            return Err(Error::TokenTooLong);
        }
    }

    if cfg.verbosity.prints_banners() {
        eprint!(
            "Generating shares using a ({},{}) scheme. Enter the secret: ",
            cfg.threshold, cfg.number
        );
    }
    let echo_guard = term::EchoGuard::disable()?;
    let mut line = String::new();
    let read = input.read_line(&mut line);
    drop(echo_guard);
    read.map_err(|_| Error::SecretIO)?;
    if cfg.verbosity.prints_banners() {
        eprintln!();
    }
    let secret_text = line.trim_end_matches(['\r', '\n']);

    let degree = if cfg.security != 0 {
        cfg.security
    } else {
        derive_degree(secret_text, cfg.hex)
    };
    if !crate::field::field_size_valid(degree) {
        return Err(Error::InvalidSecurityLevel);
    }
    let fp = FieldParams::new(degree)?;

    let (mut secret, warn) = codec::import(secret_text, degree, cfg.hex)?;
    if let Some(w) = warn {
        if cfg.verbosity.prints_warnings() {
            term::diagnostic("WARNING", &w.to_string());
        }
    }

    if cfg.diffusion {
        if crate::diffusion::applies(degree) {
            secret = crate::diffusion::encode(&secret, degree);
        } else if cfg.verbosity.prints_warnings() {
            term::diagnostic("WARNING", &Warning::DiffusionSkipped.to_string());
        }
    }

    if cfg.recovery {
        return recover(cfg, &fp, secret, input, out);
    }

    // The coefficient table is the most sensitive data in this process
    // (it contains the secret itself at index 0): hold its raw bytes in
    // an mlock'd, zero-on-drop buffer before lifting them into the
    // field elements `horner` evaluates.
    let nbytes = (degree / 8) as usize;
    let mut raw = crate::secure_buffer::SecureBuffer::new(nbytes * cfg.threshold as usize, cfg.demand_mlock)?;
    raw.as_mut()[..nbytes].copy_from_slice(&secret.to_bytes_be(nbytes));
    if cfg.threshold > 1 {
        let mut entropy = Entropy::open()?;
        entropy.read(&mut raw.as_mut()[nbytes..])?;
    }
    let coeff = ZeroizingVec::new(
        raw.as_slice()
            .chunks(nbytes)
            .map(FieldElement::from_bytes_be)
            .collect(),
    );

    let fmt_len = format!("{}", cfg.number).len();
    for i in 1..=cfg.number {
        let x = FieldElement::from_u64(i as u64);
        let y = horner(&fp, &x, &coeff);
        print_share(out, &cfg.token, i, fmt_len, &y, degree)?;
    }
    Ok(())
}

/// Recovery split (`-r`): `secret` is the already-imported (and, if
/// requested, diffused) constant term. Reads `threshold - 1` further
/// shares consistent with it and re-emits all `number` shares.
fn recover<R: BufRead, W: Write>(
    cfg: &SplitConfig,
    fp: &FieldParams,
    secret: FieldElement,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    if cfg.verbosity.prints_banners() {
        eprintln!("Enter {} existing shares:", cfg.threshold - 1);
    }
    let quiet = !cfg.verbosity.prints_banners();
    let (read_fp, xs, ys) = read_shares(input, (cfg.threshold - 1) as usize, quiet)?;
    if read_fp.degree != fp.degree {
        return Err(Error::ShareLevelMismatch);
    }

    let shares = recovery::reconstruct(fp, cfg.threshold as usize, cfg.number, secret, &xs, &ys)?;
    let fmt_len = format!("{}", cfg.number).len();
    for (index, payload) in shares {
        print_share(out, &cfg.token, index, fmt_len, &payload, fp.degree)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Verbosity;

    fn cfg(threshold: u32, number: u32) -> SplitConfig {
        SplitConfig {
            threshold,
            number,
            security: 0,
            token: None,
            hex: false,
            diffusion: false,
            verbosity: Verbosity::Silent,
            demand_mlock: false,
            recovery: false,
        }
    }

    #[test]
    fn splits_then_combines_round_trips() {
        let mut input: &[u8] = b"password\n";
        let mut out = Vec::new();
        run(&cfg(3, 5), &mut input, &mut out).expect("split succeeds");

        let lines: Vec<&str> = std::str::from_utf8(&out).unwrap().lines().collect();
        assert_eq!(lines.len(), 5);

        let mut combine_input = format!("{}\n{}\n{}\n", lines[0], lines[2], lines[4]);
        let combine_cfg = crate::config::CombineConfig {
            threshold: 3,
            hex: false,
            diffusion: false,
            verbosity: Verbosity::Silent,
            demand_mlock: false,
            recovery: None,
        };
        let mut combine_out = Vec::new();
        crate::combine::run(
            &combine_cfg,
            &mut combine_input.as_bytes(),
            &mut combine_out,
        )
        .expect("combine succeeds");
        assert_eq!(
            String::from_utf8(combine_out).unwrap().trim_end(),
            "password"
        );
    }

    #[test]
    fn token_is_prefixed_on_every_share() {
        let mut c = cfg(2, 3);
        c.token = Some("mytoken".to_string());
        let mut input: &[u8] = b"ab\n";
        let mut out = Vec::new();
        run(&c, &mut input, &mut out).expect("split succeeds");
        for line in String::from_utf8(out).unwrap().lines() {
            assert!(line.starts_with("mytoken-"));
        }
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut input: &[u8] = b"\n";
        let mut out = Vec::new();
        assert!(matches!(
            run(&cfg(2, 3), &mut input, &mut out),
            Err(Error::InvalidSecurityLevel)
        ));
    }

    #[test]
    fn threshold_below_two_is_rejected() {
        let mut input: &[u8] = b"password\n";
        let mut out = Vec::new();
        assert!(matches!(
            run(&cfg(1, 5), &mut input, &mut out),
            Err(Error::InvalidThreshold)
        ));
    }

    #[test]
    fn share_count_below_threshold_is_rejected() {
        let mut input: &[u8] = b"password\n";
        let mut out = Vec::new();
        assert!(matches!(
            run(&cfg(3, 2), &mut input, &mut out),
            Err(Error::InvalidShareCount)
        ));
    }

    #[test]
    fn overlong_token_is_rejected() {
        let mut c = cfg(2, 3);
        c.token = Some("x".repeat(129));
        let mut input: &[u8] = b"password\n";
        let mut out = Vec::new();
        assert!(matches!(
            run(&c, &mut input, &mut out),
            Err(Error::TokenTooLong)
        ));
    }
}

//! Combine orchestration (C10): K shares → secret, or, in recovery mode,
//! K shares → the full coefficient vector → all N re-emitted shares.

use std::io::BufRead;

use crate::codec::{self, Warning};
use crate::config::CombineConfig;
use crate::error::{Error, Result};
use crate::field::{FieldElement, FieldParams};
use crate::linsolve::{self, Matrix};
use crate::recovery;
use crate::share::Share;
use crate::zeroizing::ZeroizingVec;

/// Reads `threshold` share lines from `input`, parsing each as
/// `[token-]index-payload` (spec.md §6) and checking that every share
/// agrees on the security level established by the first one.
pub(crate) fn read_shares<R: BufRead>(
    input: &mut R,
    threshold: usize,
    quiet: bool,
) -> Result<(FieldParams, Vec<u32>, Vec<FieldElement>)> {
    let mut degree = None;
    let mut xs = Vec::with_capacity(threshold);
    let mut ys = Vec::with_capacity(threshold);

    for i in 0..threshold {
        if !quiet {
            eprint!("Share [{}/{}]: ", i + 1, threshold);
        }
        let mut line = String::new();
        let n = input.read_line(&mut line).map_err(|_| Error::ShareIO)?;
        if n == 0 {
            return Err(Error::ShareIO);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let share = Share::parse(trimmed)?;
        let deg = 4 * share.payload_hex.len() as u32;
        match degree {
            None if !crate::field::field_size_valid(deg) => return Err(Error::IllegalShareLength),
            None => degree = Some(deg),
            Some(expected) if expected != deg => return Err(Error::ShareLevelMismatch),
            Some(_) => {}
        }
        let index: u32 = share.index.parse().map_err(|_| Error::InvalidShare)?;
        if index == 0 {
            return Err(Error::InvalidShare);
        }
        let (element, _warn) = codec::import(&share.payload_hex, deg, true)?;
        xs.push(index);
        ys.push(element);
    }

    let fp = FieldParams::new(degree.expect("threshold >= 1"))?;
    Ok((fp, xs, ys))
}

/// Builds the Vandermonde-style column for index `x` into column `col`
/// of `aa` (descending powers of `x`, row `k - 1` is the constant 1),
/// and folds the matching `x^k` right-hand-side adjustment into `b[col]`.
pub(crate) fn build_column(
    fp: &FieldParams,
    aa: &mut Matrix,
    col: usize,
    k: usize,
    x: u32,
    payload: FieldElement,
    b: &mut [FieldElement],
) {
    let xe = FieldElement::from_u64(x as u64);
    aa.set(k - 1, col, FieldElement::one());
    for j in (0..k - 1).rev() {
        let prev = aa.get(j + 1, col);
        aa.set(j, col, fp.mul(&prev, &xe));
    }
    let x_k = fp.mul(&aa.get(0, col), &xe);
    b[col] = fp.add(&payload, &x_k);
}

/// Plain combine: read `threshold` shares, solve, print the secret.
pub fn run<R: BufRead, W: std::io::Write>(
    cfg: &CombineConfig,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    if cfg.threshold < 2 {
        return Err(Error::InvalidThreshold);
    }
    if cfg.verbosity.prints_banners() {
        eprintln!("Enter {} shares separated by newlines:", cfg.threshold);
    }
    let quiet = !cfg.verbosity.prints_banners();
    let (fp, xs, ys) = read_shares(input, cfg.threshold as usize, quiet)?;
    let k = xs.len();

    let mut aa = Matrix::zero(k);
    let mut b = ZeroizingVec::new(vec![FieldElement::zero(); k]);
    for (col, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        build_column(&fp, &mut aa, col, k, x, y, &mut b);
    }

    linsolve::solve(&fp, &mut aa, &mut b, false)?;

    let mut secret = b[k - 1];
    if cfg.diffusion {
        if crate::diffusion::applies(fp.degree) {
            secret = crate::diffusion::decode(&secret, fp.degree);
        } else if cfg.verbosity.prints_warnings() {
            crate::term::diagnostic("WARNING", &Warning::DiffusionSkipped.to_string());
        }
    }

    let (text, warn) = codec::print(&secret, fp.degree, cfg.hex);
    if let Some(w) = warn {
        if cfg.verbosity.prints_warnings() {
            crate::term::diagnostic("WARNING", &w.to_string());
        }
    }
    writeln!(out, "{}", text).map_err(|_| Error::ShareIO)
}

/// Recovery emit (`-r -n N`): the first line is the secret itself (the
/// virtual share at `x = 0`); the remaining `threshold - 1` lines are
/// ordinary shares. Reconstructs the full coefficient vector and
/// re-emits all `number` shares via `horner_r`, exactly as spec.md
/// §4.10 describes.
pub fn recover<R: BufRead, W: std::io::Write>(
    cfg: &CombineConfig,
    number: u32,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    if cfg.threshold < 2 {
        return Err(Error::InvalidThreshold);
    }
    if number < cfg.threshold {
        return Err(Error::InvalidShareCount);
    }
    if cfg.verbosity.prints_banners() {
        eprintln!(
            "Enter the secret, followed by {} shares:",
            cfg.threshold - 1
        );
    }
    let quiet = !cfg.verbosity.prints_banners();

    let mut secret_line = String::new();
    input
        .read_line(&mut secret_line)
        .map_err(|_| Error::SecretIO)?;
    let secret_line = secret_line.trim_end_matches(['\r', '\n']);

    let deg = crate::split::derive_degree(secret_line, cfg.hex);
    if !crate::field::field_size_valid(deg) {
        return Err(Error::InvalidSecurityLevel);
    }
    let fp = FieldParams::new(deg)?;
    let (secret, _warn) = codec::import(secret_line, deg, cfg.hex)?;

    let (_fp2, xs, ys) = read_shares(input, (cfg.threshold - 1) as usize, quiet)?;

    let shares = recovery::reconstruct(&fp, cfg.threshold as usize, number, secret, &xs, &ys)?;

    let fmt_len = format!("{}", number).len();
    for (index, payload) in shares {
        let (hexed, _warn) = codec::print(&payload, fp.degree, true);
        writeln!(out, "{:0width$}-{}", index, hexed, width = fmt_len)
            .map_err(|_| Error::ShareIO)?;
    }
    Ok(())
}

//! `ssss-split` binary entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use ssss_rs::cli::SplitArgs;
use ssss_rs::config::SplitConfig;
use ssss_rs::term;

fn main() -> ExitCode {
    env_logger::init();
    term::drop_setuid_privileges();

    let args = SplitArgs::parse();
    let cfg: SplitConfig = args.into();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match ssss_rs::split::run(&cfg, &mut input, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("FATAL: {}.", e);
            ExitCode::FAILURE
        }
    }
}

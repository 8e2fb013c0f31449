//! `ssss-combine` binary entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use ssss_rs::cli::CombineArgs;
use ssss_rs::config::CombineConfig;
use ssss_rs::term;

fn main() -> ExitCode {
    env_logger::init();
    term::drop_setuid_privileges();

    let args = CombineArgs::parse();
    let cfg: CombineConfig = args.into();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let result = match cfg.recovery {
        Some(number) => ssss_rs::combine::recover(&cfg, number, &mut input, &mut out),
        None => ssss_rs::combine::run(&cfg, &mut input, &mut out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("FATAL: {}.", e);
            ExitCode::FAILURE
        }
    }
}

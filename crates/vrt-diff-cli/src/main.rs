//! vrt-diff - Visual regression diff engine for PNG screenshots
//!
//! Compares a directory of fresh captures against a directory of accepted
//! baselines and exits non-zero if any capture regressed.

use std::process::ExitCode;

use clap::Parser;
use vrt_diff_cli::cli_args::Cli;
use vrt_diff_cli::commands;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let options = cli.into_options();

    match commands::diff::run(&options) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

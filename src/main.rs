#![warn(clippy::pedantic)]

use std::process::ExitCode;

use clap::Parser;

use config::{Cli, Config};
use error::Error;

mod config;
mod error;

#[cfg(any(windows, test))]
mod logger;
#[cfg(any(windows, test))]
mod state;
#[cfg(any(windows, test))]
mod toggle;

#[cfg(windows)]
mod app;



#[cfg(windows)]
fn run(config: &Config) -> Result<u8, Error> {
    app::run(config)
}

#[cfg(not(windows))]
fn run(_config: &Config) -> Result<u8, Error> {
    Err(Error::UnsupportedPlatform)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _print_status = err.print();
            return ExitCode::from(Error::cli_exit_code(&err));
        }
    };

    match Config::from_cli(cli).and_then(|config| run(&config)) {
        Ok(exit_code) => ExitCode::from(exit_code),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

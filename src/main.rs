mod commands;
mod config;
mod connection;
mod errors;
mod fetcher;

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::config::{FetchConfig, DEFAULT_URL};

/// Downloads a fixed HTTPS resource and reports its size.
///
/// Exits non-zero if the connection fails (including TLS verification against
/// the system trust store) or the server answers with a non-2xx status.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = FetchConfig::new(DEFAULT_URL)?;

    // One request on one thread
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(crate::commands::run(&config))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the -v level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

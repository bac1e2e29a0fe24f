#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::FmtSubscriber;
use vpp_console::Config;
use vpp_console::cli::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load_or_init()?;

    // stdout carries protocol text only.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.logging.max_level()?)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    vpp_console::app::dispatch(cli, &config)
}

//! nobg - strip background shapes from SVG files, and fetch remote text assets.

mod cli;
mod config;
mod fetch;
mod logger;
mod svg;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::NobgConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = NobgConfig::load(&cli)?;

    match &cli.command {
        Commands::Strip { args } => cli::strip::run(args, &config),
        Commands::Fetch { .. } => cli::fetch::run(&config),
    }
}

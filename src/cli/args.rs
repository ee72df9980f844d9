//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Strip background shapes from SVG files, and fetch remote text assets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: nobg.toml, searched upward from the current directory)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Remove background shapes from an SVG file
    #[command(visible_alias = "s")]
    Strip {
        #[command(flatten)]
        args: StripArgs,
    },

    /// Download a file and print its content
    #[command(visible_alias = "f")]
    Fetch {
        #[command(flatten)]
        args: FetchArgs,
    },
}

/// Strip command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct StripArgs {
    /// SVG file to process. Prompts for all settings when omitted.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output file (default: `<input>_no_background.svg`)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Minimum area (width * height) of a sized background element
    #[arg(short = 't', long = "threshold", allow_negative_numbers = true)]
    pub size_threshold: Option<i64>,

    /// Background fill color as 6 hex digits (e.g. "#FFFFFF")
    #[arg(short, long)]
    pub fill: Option<String>,

    /// Maximum RGB distance from the fill color
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// SVG element names to scan (comma-separated)
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Report background elements without writing any file
    #[arg(short, long)]
    pub dry: bool,
}

/// Fetch command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct FetchArgs {
    /// URL to download (default: `fetch.url` from config)
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Ignore system proxy settings
    #[arg(long)]
    pub no_proxy: bool,
}

//! Configuration management for `nobg.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── fetch      # [fetch]
//! │   └── strip      # [strip]
//! ├── types/         # Utility types
//! │   └── error      # ConfigError, ConfigDiagnostics
//! ├── util           # Config file discovery
//! └── mod.rs         # NobgConfig (this file)
//! ```
//!
//! # Precedence
//!
//! Built-in defaults < `nobg.toml` < command-line flags.
//!
//! The config file is optional. Without `-C`, `nobg.toml` is searched
//! upward from the current directory and defaults apply when none is found.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{FetchConfig, StripConfig};
pub use types::{ConfigDiagnostics, ConfigError};

use crate::{
    cli::{Cli, Commands, FetchArgs, StripArgs},
    log,
};
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "nobg.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing nobg.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NobgConfig {
    /// Path of the loaded config file, `None` when running on defaults
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Background detection settings
    #[serde(default)]
    pub strip: StripConfig,

    /// Download settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl NobgConfig {
    /// Load configuration for the given command line.
    ///
    /// An explicit `-C` path must exist. Otherwise the nearest `nobg.toml`
    /// is used if there is one.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => Some(path.clone()),
            None => find_config_file(Path::new(CONFIG_FILE)),
        };

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.config_path = config_path;

        if let Some(path) = &config.config_path {
            crate::debug!("config"; "using {}", path.display());
        }

        config.apply_command_options(&cli.command);
        config.validate(&cli.command)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {field}");
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, command: &Commands) {
        match command {
            Commands::Strip { args } => self.apply_strip_args(args),
            Commands::Fetch { args } => self.apply_fetch_args(args),
        }
    }

    /// Apply strip arguments from CLI.
    fn apply_strip_args(&mut self, args: &StripArgs) {
        Self::update_option(&mut self.strip.size_threshold, args.size_threshold.as_ref());
        Self::update_option(&mut self.strip.fill, args.fill.as_ref());
        Self::update_option(&mut self.strip.tolerance, args.tolerance.as_ref());
        Self::update_option(&mut self.strip.tags, args.tags.as_ref());
    }

    /// Apply fetch arguments from CLI.
    fn apply_fetch_args(&mut self, args: &FetchArgs) {
        Self::update_option(&mut self.fetch.url, args.url.as_ref());
        if args.timeout.is_some() {
            self.fetch.timeout = args.timeout;
        }
        if args.no_proxy {
            self.fetch.system_proxy = false;
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the section used by `command`.
    ///
    /// Collects all validation errors and returns them at once.
    fn validate(&self, command: &Commands) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        match command {
            Commands::Strip { .. } => self.strip.validate(&mut diag),
            Commands::Fetch { .. } => self.fetch.validate(&mut diag),
        }

        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> NobgConfig {
    let (parsed, ignored) = NobgConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {ignored:?}"
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

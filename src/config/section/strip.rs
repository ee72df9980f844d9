//! `[strip]` section configuration.
//!
//! Background detection settings for SVG files.
//!
//! # Example
//!
//! ```toml
//! [strip]
//! size_threshold = 10000      # Sized elements must cover more than this area
//! fill = "#FFFFFF"            # Background fill color (6 hex digits)
//! tolerance = 10.0            # Max RGB distance from `fill`
//! tags = ["path"]             # SVG element names to scan
//! suffix = "_no_background"   # Appended to the input name for the default output
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::ConfigDiagnostics;
use crate::svg::{ColorError, Criteria, Rgb};

/// Background detection settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Area (width * height) a sized element must exceed.
    /// Elements without both dimensions are always size-eligible.
    /// A negative threshold makes every sized element eligible.
    pub size_threshold: i64,

    /// Target background fill, with or without `#`.
    pub fill: String,

    /// Maximum Euclidean RGB distance from `fill` (inclusive).
    pub tolerance: f64,

    /// Local names of SVG elements to scan.
    pub tags: Vec<String>,

    /// Suffix for the derived output file name.
    pub suffix: String,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            size_threshold: 10_000,
            fill: "#FFFFFF".to_string(),
            tolerance: 10.0,
            tags: vec!["path".to_string()],
            suffix: "_no_background".to_string(),
        }
    }
}

impl StripConfig {
    /// Scoring criteria. Fails if `fill` is not a 6-digit hex color.
    #[allow(clippy::cast_precision_loss)]
    pub fn criteria(&self) -> Result<Criteria, ColorError> {
        Ok(Criteria {
            size_threshold: self.size_threshold as f64,
            target: self.fill.parse()?,
            tolerance: self.tolerance,
        })
    }

    /// Default output path for `input`.
    ///
    /// `art/logo.svg` -> `art/logo_no_background.svg`. Inputs without an
    /// `.svg` extension keep their full name: `logo.xml` -> `logo.xml_no_background.svg`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let file_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = match file_name.strip_suffix(".svg") {
            Some(stem) if !stem.is_empty() => stem,
            _ => &file_name,
        };
        input.with_file_name(format!("{stem}{}.svg", self.suffix))
    }

    /// Validate strip configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(err) = Rgb::from_hex(&self.fill) {
            diag.error_with_hint(
                "strip.fill",
                err.to_string(),
                "use 6 hex digits, e.g. \"#FFFFFF\"",
            );
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            diag.error(
                "strip.tolerance",
                format!("must be a non-negative number, got {}", self.tolerance),
            );
        }

        if self.tags.is_empty() {
            diag.error_with_hint("strip.tags", "no element names to scan", "e.g. tags = [\"path\"]");
        } else if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            diag.error("strip.tags", "element names must not be empty");
        }

        if self.suffix.is_empty() {
            diag.error_with_hint(
                "strip.suffix",
                "empty suffix would overwrite the input file",
                "e.g. suffix = \"_no_background\"",
            );
        }
    }
}

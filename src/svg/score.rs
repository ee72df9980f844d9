//! Score stage: size and fill-color heuristic.

use std::fmt;

use super::color::{ColorError, Rgb};
use super::document::Element;

/// Thresholds an element is scored against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criteria {
    /// Area (`width * height`) an element must exceed.
    pub size_threshold: f64,
    /// Background fill color.
    pub target: Rgb,
    /// Maximum RGB distance from `target`, inclusive.
    pub tolerance: f64,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            size_threshold: 10_000.0,
            target: Rgb::WHITE,
            tolerance: 10.0,
        }
    }
}

/// Why an element was left out of scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// `width` or `height` is not a number.
    Dimension { width: String, height: String },
    /// `fill` is absent or not a 6-digit hex color.
    Fill(ColorError),
}

/// Scoring outcome for one element.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Background,
    Kept,
    Skipped(SkipReason),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension { width, height } => {
                write!(f, "non-numeric size `{width}` x `{height}`")
            }
            Self::Fill(err) => write!(f, "unusable fill: {err}"),
        }
    }
}

impl Verdict {
    pub fn is_background(&self) -> bool {
        matches!(self, Self::Background)
    }
}

/// Score an element.
///
/// Size check: when both `width` and `height` are present the area must exceed
/// the threshold; otherwise the element is size-eligible.
/// Color check: the decoded `fill` must lie within `tolerance` of the target.
///
/// Unparseable dimensions and missing or malformed fills skip the element. An
/// element with a size but no fill can therefore never be background.
pub fn classify(element: &Element<'_>, criteria: &Criteria) -> Verdict {
    let size_ok = match (element.attribute("width"), element.attribute("height")) {
        (Some(width), Some(height)) => match (parse_number(&width), parse_number(&height)) {
            (Some(w), Some(h)) => w * h > criteria.size_threshold,
            _ => return Verdict::Skipped(SkipReason::Dimension { width, height }),
        },
        _ => true,
    };

    let fill = element.attribute("fill").unwrap_or_default();
    let color = match Rgb::from_hex(&fill) {
        Ok(color) => color,
        Err(err) => return Verdict::Skipped(SkipReason::Fill(err)),
    };

    if size_ok && color.distance(&criteria.target) <= criteria.tolerance {
        Verdict::Background
    } else {
        Verdict::Kept
    }
}

#[inline]
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

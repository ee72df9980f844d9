//! SVG background removal.
//!
//! # Stages
//!
//! ```text
//!  file ──► parse ──► scan ──► score ──► remove ──► serialize ──► file
//!            │         │         │          │            │
//!         Document  candidates  Verdict   detached    UTF-8 + decl
//! ```
//!
//! Each stage is a plain function; callers chain them and report in between.
//!
//! # Modules
//!
//! - [`document`]: arena tree with element views
//! - [`parse`]: XML to [`Document`]
//! - [`scan`]: candidate selection by tag and attributes
//! - [`score`]: size and fill-color heuristic
//! - [`color`]: hex decoding and RGB distance
//! - [`serialize`]: [`Document`] to XML

pub mod color;
pub mod document;
pub mod parse;
pub mod scan;
pub mod score;
pub mod serialize;

use std::path::PathBuf;

use thiserror::Error;

pub use color::{ColorError, Rgb};
pub use document::{Document, NodeId};
pub use parse::{ParseError, parse_file};
pub use scan::scan;
pub use score::{Criteria, Verdict, classify};
pub use serialize::write_file;

/// Failure of a strip run.
#[derive(Debug, Error)]
pub enum StripError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to serialize SVG")]
    Serialize(#[from] quick_xml::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

/// One scored candidate.
#[derive(Debug, Clone)]
pub struct Scored {
    pub id: NodeId,
    /// Qualified tag name, for reporting.
    pub name: String,
    pub verdict: Verdict,
}

/// Scan and score. Every candidate is returned with its verdict.
pub fn score_candidates<S: AsRef<str>>(
    doc: &Document,
    tags: &[S],
    criteria: &Criteria,
) -> Vec<Scored> {
    scan(doc, tags)
        .filter_map(|id| {
            let element = doc.element(id)?;
            Some(Scored {
                id,
                name: element.name().into_owned(),
                verdict: classify(&element, criteria),
            })
        })
        .collect()
}

/// Detach every background element. Returns the number actually detached.
pub fn remove<'a>(doc: &mut Document, candidates: impl IntoIterator<Item = &'a Scored>) -> usize {
    candidates
        .into_iter()
        .filter(|scored| scored.verdict.is_background())
        .filter(|scored| doc.detach(scored.id))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300">
  <path id="bg" width="400" height="300" fill="#FFFFFF" d="M0 0h400v300H0z"/>
  <path id="almost-white" fill="#FEFEFE" d="M0 0h10v10H0z"/>
  <g id="layer">
    <path id="nested-bg" fill="FFFFFF" d="M5 5h1v1H5z"/>
    <path id="logo" fill="#000000" d="M1 1h2v2H1z"/>
  </g>
  <path id="small" width="50" height="50" fill="#FFFFFF"/>
  <path id="bad-size" width="auto" height="300" fill="#FFFFFF"/>
  <rect id="rect-bg" fill="#FFFFFF" width="400" height="300"/>
</svg>
"##;

    fn remaining_ids(doc: &Document) -> Vec<String> {
        doc.descendants(doc.root())
            .filter(|&id| doc.parent(id).is_some())
            .filter_map(|id| doc.element(id)?.attribute("id"))
            .collect()
    }

    #[test]
    fn test_score_and_remove() {
        let mut doc = Document::parse(SVG.as_bytes()).unwrap();
        let scored = score_candidates(&doc, &["path"], &Criteria::default());
        assert_eq!(scored.len(), 6);

        let removed = remove(&mut doc, &scored);
        assert_eq!(removed, 3);
        assert_eq!(
            remaining_ids(&doc),
            ["layer", "logo", "small", "bad-size", "rect-bg"]
        );
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut doc = Document::parse(SVG.as_bytes()).unwrap();
        let scored = score_candidates(&doc, &["path"], &Criteria::default());
        assert_eq!(remove(&mut doc, &scored), 3);
        assert_eq!(remove(&mut doc, &scored), 0);
    }

    #[test]
    fn test_duplicate_tags_remove_once() {
        let mut doc = Document::parse(SVG.as_bytes()).unwrap();
        let scored = score_candidates(&doc, &["path", "path"], &Criteria::default());
        assert_eq!(scored.len(), 12);
        assert_eq!(remove(&mut doc, &scored), 3);
    }
}

//! Parse stage: XML bytes to [`Document`].

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::escape::unescape;
use quick_xml::events::{BytesDecl, BytesRef, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use thiserror::Error;

use super::document::{Document, NodeId, NodeKind};

/// Malformed or unreadable SVG input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed XML at byte {position}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),

    #[error("unsupported encoding `{0}` (only UTF-8 is read)")]
    Encoding(String),

    #[error("undefined entity `&{0};`")]
    UnknownEntity(String),

    #[error("unbound namespace prefix `{0}`")]
    UnboundPrefix(String),

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("text content outside the root element")]
    TextOutsideRoot,

    #[error("element `{0}` is not closed")]
    Unclosed(String),

    #[error("unexpected closing tag `{0}`")]
    UnexpectedEnd(String),
}

/// Read and parse an SVG file.
pub fn parse_file(path: &Path) -> Result<Document, ParseError> {
    let bytes = fs::read(path).map_err(|err| ParseError::Io(path.to_path_buf(), err))?;
    Document::parse(&bytes)
}

impl Document {
    /// Parse an XML document held in memory.
    ///
    /// Input must be UTF-8 (a BOM is allowed). Attributes are checked for
    /// quoting, duplicates and entity references; references in text must be
    /// predefined entities or character references.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        if let Err(err) = std::str::from_utf8(bytes) {
            return Err(ParseError::InvalidUtf8(err.valid_up_to()));
        }

        let mut reader = NsReader::from_reader(bytes);
        let mut builder = Builder::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(source) => {
                    return Err(ParseError::Xml {
                        position: reader.error_position(),
                        source,
                    });
                }
            };
            let position = reader.buffer_position();

            match event {
                Event::Start(start) => {
                    check_attributes(&start, position)?;
                    let namespace = resolve_namespace(&reader, &start)?;
                    let id = builder.element(start.into_owned(), namespace)?;
                    builder.open.push(id);
                }
                Event::Empty(start) => {
                    check_attributes(&start, position)?;
                    let namespace = resolve_namespace(&reader, &start)?;
                    builder.element(start.into_owned(), namespace)?;
                }
                Event::End(end) => {
                    if builder.open.pop().is_none() {
                        let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                        return Err(ParseError::UnexpectedEnd(name));
                    }
                }
                // A fresh declaration is written on serialize
                Event::Decl(decl) => check_encoding(&decl, position)?,
                Event::GeneralRef(reference) => {
                    check_reference(&reference)?;
                    builder.markup(Event::GeneralRef(reference.into_owned()))?;
                }
                Event::Eof => break,
                markup => builder.markup(markup.into_owned())?,
            }
        }

        builder.finish()
    }
}

fn check_attributes(start: &BytesStart<'_>, position: u64) -> Result<(), ParseError> {
    let invalid = |source: quick_xml::Error| ParseError::Xml { position, source };

    // `attributes()` rejects duplicates and unquoted values
    for attr in start.attributes() {
        let attr = attr.map_err(|err| invalid(err.into()))?;
        let value = String::from_utf8_lossy(&attr.value);
        unescape(&value).map_err(|err| invalid(err.into()))?;
    }
    Ok(())
}

fn check_encoding(decl: &BytesDecl<'_>, position: u64) -> Result<(), ParseError> {
    match decl.encoding() {
        None => Ok(()),
        Some(Err(err)) => Err(ParseError::Xml {
            position,
            source: quick_xml::Error::from(err),
        }),
        Some(Ok(encoding)) => {
            let name = String::from_utf8_lossy(&encoding);
            let utf8 = ["utf-8", "utf8", "us-ascii", "ascii"]
                .iter()
                .any(|known| name.eq_ignore_ascii_case(known));
            if utf8 {
                Ok(())
            } else {
                Err(ParseError::Encoding(name.into_owned()))
            }
        }
    }
}

/// Accept the five predefined entities and character references.
fn check_reference(reference: &BytesRef<'_>) -> Result<(), ParseError> {
    let name = String::from_utf8_lossy(reference);
    match unescape(&format!("&{name};")) {
        Ok(_) => Ok(()),
        Err(_) => Err(ParseError::UnknownEntity(name.into_owned())),
    }
}

fn resolve_namespace(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Option<String>, ParseError> {
    match reader.resolve_element(start.name()).0 {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(String::from_utf8_lossy(uri).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

struct Builder {
    doc: Document,
    root: Option<NodeId>,
    open: Vec<NodeId>,
}

impl Builder {
    fn new() -> Self {
        Self {
            doc: Document {
                nodes: Vec::new(),
                top_level: Vec::new(),
                root: 0,
            },
            root: None,
            open: Vec::new(),
        }
    }

    fn element(
        &mut self,
        start: BytesStart<'static>,
        namespace: Option<String>,
    ) -> Result<NodeId, ParseError> {
        let kind = NodeKind::Element { start, namespace };
        match self.open.last().copied() {
            Some(parent) => Ok(self.doc.push(kind, Some(parent))),
            None if self.root.is_some() => Err(ParseError::MultipleRoots),
            None => {
                let id = self.doc.push(kind, None);
                self.doc.top_level.push(id);
                self.root = Some(id);
                Ok(id)
            }
        }
    }

    fn markup(&mut self, event: Event<'static>) -> Result<(), ParseError> {
        if let Some(&parent) = self.open.last() {
            self.doc.push(NodeKind::Markup(event), Some(parent));
            return Ok(());
        }

        // Outside the root only whitespace, comments, PIs and the doctype are allowed
        match &event {
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => return Ok(()),
            Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            _ => return Err(ParseError::TextOutsideRoot),
        }

        let id = self.doc.push(NodeKind::Markup(event), None);
        self.doc.top_level.push(id);
        Ok(())
    }

    fn finish(mut self) -> Result<Document, ParseError> {
        if let Some(&open) = self.open.last() {
            let name = self
                .doc
                .element(open)
                .map(|el| el.name().into_owned())
                .unwrap_or_default();
            return Err(ParseError::Unclosed(name));
        }
        self.doc.root = self.root.ok_or(ParseError::NoRoot)?;
        Ok(self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::document::SVG_NS;

    #[test]
    fn test_parse_minimal() {
        let doc = Document::parse(br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        let root = doc.element(doc.root()).unwrap();
        assert!(root.is(SVG_NS, "svg"));
        assert_eq!(doc.element_count(), 1);
    }

    #[test]
    fn test_parse_keeps_prolog_and_nested() {
        let svg = r#"<?xml version="1.0"?>
<!-- exported -->
<!DOCTYPE svg>
<svg xmlns="http://www.w3.org/2000/svg">
  <g><path d="M0 0"/><text>a &amp; b</text></g>
</svg>
"#;
        let doc = Document::parse(svg.as_bytes()).unwrap();
        assert_eq!(doc.element_count(), 4);
        // comment + doctype + root
        assert_eq!(doc.top_level.len(), 3);
    }

    #[test]
    fn test_parse_default_namespace_on_children() {
        let doc = Document::parse(
            br#"<svg xmlns="http://www.w3.org/2000/svg"><foreignObject><div xmlns="http://www.w3.org/1999/xhtml"/></foreignObject></svg>"#,
        )
        .unwrap();
        let namespaces: Vec<_> = doc
            .descendants(doc.root())
            .filter_map(|id| doc.element(id))
            .map(|el| el.namespace().map(str::to_owned))
            .collect();
        assert_eq!(
            namespaces,
            [
                Some(SVG_NS.to_string()),
                Some("http://www.w3.org/1999/xhtml".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_no_namespace() {
        let doc = Document::parse(b"<svg><path/></svg>").unwrap();
        let root = doc.element(doc.root()).unwrap();
        assert_eq!(root.namespace(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Document::parse(b"<svg><path></svg>"),
            Err(ParseError::Xml { .. })
        ));
        assert!(matches!(
            Document::parse(b"<svg><g>"),
            Err(ParseError::Unclosed(_) | ParseError::Xml { .. })
        ));
        assert!(matches!(Document::parse(b""), Err(ParseError::NoRoot)));
        assert!(matches!(
            Document::parse(b"<!-- only a comment -->"),
            Err(ParseError::NoRoot)
        ));
        assert!(matches!(
            Document::parse(b"<svg/><svg/>"),
            Err(ParseError::MultipleRoots)
        ));
        assert!(matches!(
            Document::parse(b"junk<svg/>"),
            Err(ParseError::TextOutsideRoot)
        ));
        assert!(matches!(
            Document::parse(b"<x:svg/>"),
            Err(ParseError::UnboundPrefix(prefix)) if prefix == "x"
        ));
    }

    #[test]
    fn test_parse_rejects_bad_attributes() {
        let duplicate = br##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#FFFFFF" fill="#000000"/></svg>"##;
        assert!(matches!(
            Document::parse(duplicate),
            Err(ParseError::Xml { .. })
        ));

        let unquoted = br##"<svg xmlns="http://www.w3.org/2000/svg"><path fill=#FFFFFF/></svg>"##;
        assert!(Document::parse(unquoted).is_err());

        let entity = br#"<svg xmlns="http://www.w3.org/2000/svg"><path id="a&bogus;b"/></svg>"#;
        assert!(matches!(
            Document::parse(entity),
            Err(ParseError::Xml { .. })
        ));
    }

    #[test]
    fn test_parse_references() {
        let doc = Document::parse(
            br#"<svg xmlns="http://www.w3.org/2000/svg"><text>&lt;&amp;&#233;&#x41;</text></svg>"#,
        );
        assert!(doc.is_ok());

        assert!(matches!(
            Document::parse(br#"<svg xmlns="http://www.w3.org/2000/svg"><text>&bogus;</text></svg>"#),
            Err(ParseError::UnknownEntity(name)) if name == "bogus"
        ));
    }

    #[test]
    fn test_parse_encoding() {
        let latin1 = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><svg><text>\xE9</text></svg>";
        assert!(matches!(
            Document::parse(latin1),
            Err(ParseError::InvalidUtf8(_))
        ));

        let declared = br#"<?xml version="1.0" encoding="ISO-8859-1"?><svg/>"#;
        assert!(matches!(
            Document::parse(declared),
            Err(ParseError::Encoding(name)) if name == "ISO-8859-1"
        ));

        let bom = b"\xEF\xBB\xBF<?xml version=\"1.0\" encoding=\"UTF-8\"?><svg>\xC3\xA9</svg>";
        let doc = Document::parse(bom).unwrap();
        let out = doc.to_bytes().unwrap();
        assert!(std::str::from_utf8(&out).unwrap().contains("<svg>é</svg>"));
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("missing.svg")).unwrap_err();
        assert!(matches!(err, ParseError::Io(..)));
        assert!(err.to_string().contains("missing.svg"));
    }
}

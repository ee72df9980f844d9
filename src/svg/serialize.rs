//! Serialize stage: [`Document`] back to UTF-8 XML.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use super::document::{Document, NodeId, NodeKind};

impl Document {
    /// Serialize with an `<?xml version="1.0" encoding="utf-8"?>` header.
    pub fn to_bytes(&self) -> Result<Vec<u8>, quick_xml::Error> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        for &id in &self.top_level {
            writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
            self.write_node(id, &mut writer)?;
        }
        writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;

        Ok(writer.into_inner().into_inner())
    }

    fn write_node(
        &self,
        id: NodeId,
        writer: &mut Writer<Cursor<Vec<u8>>>,
    ) -> Result<(), quick_xml::Error> {
        let node = &self.nodes[id];
        match &node.kind {
            NodeKind::Element { start, .. } if node.children.is_empty() => {
                writer.write_event(Event::Empty(start.borrow()))?;
            }
            NodeKind::Element { start, .. } => {
                writer.write_event(Event::Start(start.borrow()))?;
                for &child in &node.children {
                    self.write_node(child, writer)?;
                }
                writer.write_event(Event::End(start.to_end()))?;
            }
            NodeKind::Markup(event) => writer.write_event(event.borrow())?,
        }
        Ok(())
    }
}

/// Write a document to `path`, creating parent directories.
pub fn write_file(doc: &Document, path: &Path) -> Result<(), super::StripError> {
    let bytes = doc.to_bytes()?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|err| super::StripError::Write(path.to_path_buf(), err))?;
    }
    fs::write(path, bytes).map_err(|err| super::StripError::Write(path.to_path_buf(), err))
}

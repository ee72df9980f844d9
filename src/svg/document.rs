//! Mutable SVG document tree.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Elements keep
//! their original start tag, so untouched markup is written back as it was read.
//! Everything that is not an element (text, comments, CDATA, entity references,
//! processing instructions, doctype) is kept as an opaque owned event.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};

/// Namespace URI of SVG elements.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Index of a node in the document arena.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub(super) enum NodeKind {
    Element {
        start: BytesStart<'static>,
        namespace: Option<String>,
    },
    Markup(Event<'static>),
}

#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) kind: NodeKind,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

/// A parsed SVG document.
#[derive(Debug, Clone)]
pub struct Document {
    pub(super) nodes: Vec<Node>,
    /// Top-level nodes in order (comments, doctype, PIs and the root element).
    pub(super) top_level: Vec<NodeId>,
    pub(super) root: NodeId,
}

impl Document {
    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// View a node as an element. `None` for non-element nodes.
    pub fn element(&self, id: NodeId) -> Option<Element<'_>> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Element { start, namespace } => Some(Element {
                start,
                namespace: namespace.as_deref(),
            }),
            NodeKind::Markup(_) => None,
        }
    }

    /// Parent of a node, `None` for top-level and detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    /// All nodes below `id` in document order (pre-order), `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = self
            .nodes
            .get(id)
            .map(|node| node.children.iter().rev().copied().collect())
            .unwrap_or_default();
        Descendants { doc: self, stack }
    }

    /// Number of elements reachable from the root, root included.
    pub fn element_count(&self) -> usize {
        1 + self
            .descendants(self.root)
            .filter(|&id| self.element(id).is_some())
            .count()
    }

    /// Detach a node from its parent.
    ///
    /// Returns `false` if the node is the root, already detached, or unknown.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        self.nodes[parent].children.retain(|&child| child != id);
        self.nodes[id].parent = None;
        true
    }

    pub(super) fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }
}

/// Pre-order traversal, see [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.nodes[id].children.iter().rev().copied());
        Some(id)
    }
}

/// Borrowed view of an element.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    start: &'a BytesStart<'static>,
    namespace: Option<&'a str>,
}

impl<'a> Element<'a> {
    /// Qualified tag name as written (`svg:path`, `rect`).
    pub fn name(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.start.name().into_inner())
    }

    /// Tag name without prefix.
    pub fn local_name(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.start.local_name().into_inner())
    }

    /// Resolved namespace URI.
    pub fn namespace(&self) -> Option<&'a str> {
        self.namespace
    }

    /// Whether this element is `{namespace}local`.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace() == Some(namespace) && self.local_name() == local
    }

    /// Unescaped value of an unprefixed attribute.
    ///
    /// Malformed attribute syntax or values that fail to unescape read as absent.
    pub fn attribute(&self, name: &str) -> Option<String> {
        let attr = self.start.try_get_attribute(name).ok()??;
        let raw = std::str::from_utf8(&attr.value).ok()?;
        quick_xml::escape::unescape(raw)
            .ok()
            .map(Cow::into_owned)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        matches!(self.start.try_get_attribute(name), Ok(Some(_)))
    }
}

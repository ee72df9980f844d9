//! Scan stage: find candidate shape elements.

use super::document::{Document, NodeId, SVG_NS};

/// Lazily yield candidate elements for each tag, in tag order then document order.
///
/// A candidate is an SVG-namespaced descendant of the root whose local name is
/// one of `tags` and which has both `width` and `height`, or a `fill`.
/// The root itself is never yielded.
pub fn scan<'a, S>(doc: &'a Document, tags: &'a [S]) -> impl Iterator<Item = NodeId> + 'a
where
    S: AsRef<str>,
{
    tags.iter().flat_map(move |tag| {
        let tag = tag.as_ref();
        doc.descendants(doc.root()).filter(move |&id| {
            doc.element(id).is_some_and(|el| {
                el.is(SVG_NS, tag)
                    && ((el.has_attribute("width") && el.has_attribute("height"))
                        || el.has_attribute("fill"))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(doc: &Document, tags: &[&str]) -> Vec<String> {
        scan(doc, tags)
            .filter_map(|id| doc.element(id)?.attribute("id"))
            .collect()
    }

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:o="urn:other" width="10" height="10" fill="#FFFFFF">
  <path id="fill-only" fill="#FFFFFF"/>
  <path id="sized" width="10" height="10"/>
  <path id="width-only" width="10"/>
  <path id="bare" d="M0 0"/>
  <g><path id="nested" fill="#000000"/></g>
  <rect id="rect" fill="#FFFFFF"/>
  <o:path id="foreign" fill="#FFFFFF"/>
</svg>"##;

    #[test]
    fn test_scan_default_tag() {
        let doc = Document::parse(SVG.as_bytes()).unwrap();
        assert_eq!(ids(&doc, &["path"]), ["fill-only", "sized", "nested"]);
    }

    #[test]
    fn test_scan_tag_order() {
        let doc = Document::parse(SVG.as_bytes()).unwrap();
        assert_eq!(
            ids(&doc, &["rect", "path"]),
            ["rect", "fill-only", "sized", "nested"]
        );
    }

    #[test]
    fn test_scan_never_yields_root() {
        let doc = Document::parse(SVG.as_bytes()).unwrap();
        assert!(scan(&doc, &["svg"]).next().is_none());
    }

    #[test]
    fn test_scan_requires_svg_namespace() {
        let doc = Document::parse(br##"<svg><path fill="#FFFFFF"/></svg>"##).unwrap();
        assert_eq!(scan(&doc, &["path"]).count(), 0);
    }

    #[test]
    fn test_scan_prefixed_svg_namespace() {
        let doc = Document::parse(
            br##"<s:svg xmlns:s="http://www.w3.org/2000/svg"><s:path fill="#FFFFFF"/></s:svg>"##,
        )
        .unwrap();
        assert_eq!(scan(&doc, &["path"]).count(), 1);
    }
}

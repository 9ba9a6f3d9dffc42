//! Element lookup over a parsed HTML page.
//!
//! The page goes through the HTML5 tree builder, so an id resolves to the
//! same element `getElementById` would return: end tags may be implied,
//! attribute values may be unquoted, and the contents of comments, `<script>`
//! and `<textarea>` never produce elements.

use scraper::node::Text;
use scraper::{ElementRef, Html, Node};

const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A parsed HTML page.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Text of the `<script>` element with the given id, if the first element
    /// carrying that id is a script.
    #[must_use]
    pub fn json_block(&self, id: &str) -> Option<String> {
        self.first_with_id(id)
            .filter(|element| element.value().name() == "script")
            .map(|element| element.text().collect())
    }

    /// Whether the first element with the given id can hold contents.
    #[must_use]
    pub fn has_container(&self, id: &str) -> bool {
        self.container(id).is_some()
    }

    /// The serialized page with the contents of container `id` replaced by
    /// `markup`. `markup` is inserted as-is.
    #[must_use]
    pub fn replace_inner(&self, id: &str, markup: &str) -> Option<String> {
        let node = self.container(id)?.id();
        let slot = slot_marker(&self.html.html());

        let mut html = self.html.clone();
        let mut container = html.tree.get_mut(node)?;
        while let Some(mut child) = container.first_child() {
            child.detach();
        }
        container.append(Node::Text(Text {
            text: slot.as_str().into(),
        }));
        Some(html.html().replacen(&slot, markup, 1))
    }

    fn container(&self, id: &str) -> Option<ElementRef<'_>> {
        self.first_with_id(id)
            .filter(|element| !VOID.contains(&element.value().name()))
    }

    fn first_with_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().id() == Some(id))
    }
}

// A token absent from `page`, so the one inserted occurrence is unambiguous.
fn slot_marker(page: &str) -> String {
    let mut n = 0u32;
    loop {
        let marker = format!("gallery-slot-{n}");
        if !page.contains(&marker) {
            return marker;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head>
<script type="application/json" id="gconfigjson">{"emptytext": "<none> & </div>"}</script>
</head><body>
<!-- <div id="galdiv">commented out</div> -->
<div class='outer'><div id=galdiv class=grid><div>old</div> text</div><p>after</p></div>
</body></html>"#;

    #[test]
    fn reads_script_block_text_verbatim() {
        let doc = Document::parse(PAGE);
        assert_eq!(
            doc.json_block("gconfigjson").as_deref(),
            Some(r#"{"emptytext": "<none> & </div>"}"#)
        );
    }

    #[test]
    fn non_script_element_is_not_a_json_block() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.json_block("galdiv"), None);
        assert_eq!(doc.json_block("missing"), None);
    }

    #[test]
    fn replace_inner_swaps_only_the_container_contents() {
        let doc = Document::parse(PAGE);
        let out = doc.replace_inner("galdiv", "<b>NEW</b>").unwrap();
        assert!(out.contains(r#"<div id="galdiv" class="grid"><b>NEW</b></div><p>after</p></div>"#));
        assert!(out.contains(r#"<!-- <div id="galdiv">commented out</div> -->"#));
        assert!(!out.contains("old"));
        assert!(!out.contains("gallery-slot"));
    }

    #[test]
    fn void_elements_hold_no_contents() {
        let doc = Document::parse(r#"<img id="a"><span id="c"></span>"#);
        assert!(!doc.has_container("a"));
        assert_eq!(doc.replace_inner("a", "x"), None);
        assert!(doc.has_container("c"));
        assert!(!doc.has_container("missing"));
    }

    #[test]
    fn first_element_with_an_id_wins() {
        let doc = Document::parse(r#"<div id="g">one</div><div id="g">two</div>"#);
        let out = doc.replace_inner("g", "X").unwrap();
        assert!(out.contains(r#"<div id="g">X</div><div id="g">two</div>"#));
    }

    #[test]
    fn marker_avoids_text_already_in_the_page() {
        let doc = Document::parse(r#"<p>gallery-slot-0</p><div id="g"></div>"#);
        let out = doc.replace_inner("g", "X").unwrap();
        assert!(out.contains("<p>gallery-slot-0</p><div id=\"g\">X</div>"));
    }
}

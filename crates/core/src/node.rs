//! MJML document tree.
//!
//! The parsing stage produces a tree of [`MjmlNode`] values; the rendering
//! engine consumes it without ever re-parsing. Attributes keep document
//! order (first occurrence wins on lookup), children keep document order,
//! and interleaved character data is represented as text nodes so that
//! inner HTML can be reconstructed byte-faithfully.

/// HTML void elements, i.e. tags that never carry children.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns true if `tag` is an HTML void element.
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// A node of the parsed MJML document.
///
/// Two shapes exist: element nodes (`tag` non-empty) and text nodes
/// (`tag` empty, `text` set). Text nodes only appear as children; the
/// accessors below hide the distinction for the common cases.
#[derive(Debug, Clone, PartialEq)]
pub struct MjmlNode {
    /// Tag name, lowercase and case-sensitive (`mj-` prefix for MJML
    /// elements, anything else is embedded HTML). Empty for text nodes.
    pub tag: String,
    /// Ordered `(name, value)` attribute pairs as written in the source.
    pub attributes: Vec<(String, String)>,
    /// Character data for text nodes, raw inner content for the verbatim
    /// elements (`mj-raw`, `mj-style`, `mj-title`, `mj-preview`).
    pub text: Option<String>,
    /// Ordered children (elements and text runs).
    pub children: Vec<MjmlNode>,
    /// 1-indexed source line of the opening tag, if known.
    pub line: Option<usize>,
}

impl MjmlNode {
    /// Creates an empty element node.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            line: None,
        }
    }

    /// Creates a text node.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: Vec::new(),
            text: Some(text.into()),
            children: Vec::new(),
            line: None,
        }
    }

    /// Returns true for text nodes.
    pub fn is_text(&self) -> bool {
        self.tag.is_empty()
    }

    /// First-occurrence-wins attribute lookup.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated character data of the direct text-run children, plus
    /// the node's own captured text for verbatim elements.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            if let Some(text) = child.text.as_deref().filter(|_| child.is_text()) {
                out.push_str(text);
            }
        }
        out
    }

    /// Returns true if the node carries any non-whitespace character data.
    pub fn has_text(&self) -> bool {
        !self.inner_text().trim().is_empty()
    }

    /// Ordered element children (text runs skipped).
    pub fn element_children(&self) -> impl Iterator<Item = &MjmlNode> {
        self.children.iter().filter(|c| !c.is_text())
    }

    /// Finds the first element child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&MjmlNode> {
        self.element_children().find(|c| c.tag == tag)
    }

    /// Reconstructs the node's inner HTML from the parsed children.
    ///
    /// Element children are serialized as `(tag, attributes, text,
    /// children)` subtrees with XHTML void-tag rules: `<br>` is emitted
    /// bare with surrounding whitespace stripped, other void elements
    /// self-close with a single space before the slash. The content is
    /// never re-parsed.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        serialize_children(&self.children, &mut out);
        out
    }

    /// Like [`MjmlNode::inner_html`] with leading/trailing whitespace
    /// removed, the form `mj-raw` and text-carrying components emit.
    pub fn inner_html_trimmed(&self) -> String {
        self.inner_html().trim().to_string()
    }
}

fn serialize_children(children: &[MjmlNode], out: &mut String) {
    let mut strip_leading_ws = false;
    for child in children {
        if child.is_text() {
            let text = child.text.as_deref().unwrap_or_default();
            if strip_leading_ws {
                out.push_str(text.trim_start());
            } else {
                out.push_str(text);
            }
            strip_leading_ws = false;
            continue;
        }
        if child.tag == "br" {
            // <br> is emitted bare, whitespace collapsed on both sides.
            truncate_trailing_ws(out);
            out.push_str("<br>");
            strip_leading_ws = true;
            continue;
        }
        strip_leading_ws = false;
        out.push('<');
        out.push_str(&child.tag);
        for (name, value) in &child.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        if is_void_tag(&child.tag) {
            out.push_str(" />");
            continue;
        }
        out.push('>');
        if let Some(text) = &child.text {
            out.push_str(text);
        }
        serialize_children(&child.children, out);
        out.push_str("</");
        out.push_str(&child.tag);
        out.push('>');
    }
}

fn truncate_trailing_ws(out: &mut String) {
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
}

/// Normalizes void-tag spellings in an HTML string.
///
/// `<br/>` and `<br />` (with optional surrounding whitespace) become a
/// bare `<br>` with the whitespace stripped; self-closed void elements are
/// rewritten with a single space before the slash (`<img src="x"/>` ⇒
/// `<img src="x" />`). Unclosed forms pass through unchanged. The
/// operation is idempotent.
pub fn normalize_void_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let Some(close) = rest.find('>') else {
            out.push_str(rest);
            return out;
        };
        let inner = &rest[1..close];
        let name_len = inner
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count();
        let tag_name = &inner[..name_len];
        if tag_name.eq_ignore_ascii_case("br")
            && inner[name_len..].trim_end_matches('/').trim().is_empty()
        {
            truncate_trailing_ws(&mut out);
            out.push_str("<br>");
            rest = rest[close + 1..].trim_start();
            continue;
        }
        if is_void_tag(&tag_name.to_ascii_lowercase()) && inner.trim_end().ends_with('/') {
            let body = inner.trim_end();
            let body = body[..body.len() - 1].trim_end();
            out.push('<');
            out.push_str(body);
            out.push_str(" />");
            rest = &rest[close + 1..];
            continue;
        }
        out.push_str(&rest[..=close]);
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

//! Document driver.
//!
//! Orchestrates one render: parse, walk the head into the global store
//! and collected head parts, build the component tree, render the body
//! into a buffer, then wrap everything in the document skeleton with the
//! synthesized head.

use crate::component::{self, Body, Component};
use crate::context::RenderCx;
use crate::error::RenderError;
use crate::global::GlobalAttributes;
use crate::head;
use crate::options::RenderOpts;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

/// Compiles MJML source text to the final HTML document.
///
/// The first render error aborts; invalid-attribute reports flow through
/// the reporter configured on `opts` without affecting the result.
pub fn render(source: &str, opts: RenderOpts) -> Result<String, RenderError> {
    let root = mailcomb_core::parse(source)?;
    render_tree(&root, opts)
}

/// Compiles an already-parsed document tree (the AST-cache entry point).
pub fn render_tree(root: &MjmlNode, opts: RenderOpts) -> Result<String, RenderError> {
    let head_node = root.child("mj-head");
    let globals = GlobalAttributes::from_head(head_node);
    let (head_parts, inline_class_styles) = head::collect_head(head_node);
    let cx = RenderCx::new(opts, globals, inline_class_styles);

    let body_node = root.child("mj-body").ok_or(RenderError::MissingBody)?;
    let mut body = match component::build(body_node, &cx).into_body() {
        Some(body) => body,
        None => return Err(RenderError::MissingBody),
    };
    log::debug!("rendering document, body line {:?}", body_node.line);

    let mut buffer = String::with_capacity(4096);
    body.render(&cx, &mut buffer)?;

    Ok(assemble(&cx, &head_parts, &body, &buffer))
}

fn assemble(cx: &RenderCx, head_parts: &head::HeadParts, body: &Body<'_>, rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len() + 4096);
    out.push_str("<!doctype html>\n");
    out.push_str(
        "<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:v=\"urn:schemas-microsoft-com:vml\" xmlns:o=\"urn:schemas-microsoft-com:office:office\">\n",
    );
    out.push_str("<head>\n");
    out.push_str(&head::build_head(cx, head_parts));
    out.push_str("</head>\n");

    let body_tag = Tag::new("body")
        .style("word-spacing", "normal")
        .maybe_style("background-color", body.background_color(cx));
    body_tag.open(&mut out);
    out.push('\n');
    if let Some(preview) = &head_parts.preview {
        out.push_str(&head::preview_div(preview));
        out.push('\n');
    }
    out.push_str(rendered);
    out.push('\n');
    body_tag.close(&mut out);
    out.push_str("\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_body_is_an_error() {
        let err = render("<mjml><mj-head></mj-head></mjml>", RenderOpts::default()).unwrap_err();
        assert!(matches!(err, RenderError::MissingBody));
    }

    #[test]
    fn parse_failures_propagate() {
        let err = render("<mjml><mj-body>", RenderOpts::default()).unwrap_err();
        assert!(matches!(err, RenderError::Parse(_)));
    }

    #[test]
    fn unimplemented_component_aborts_with_its_tag() {
        let err = render(
            "<mjml><mj-body><mj-section><mj-column><mj-hero/></mj-column></mj-section></mj-body></mjml>",
            RenderOpts::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Unimplemented(tag) if tag == "mj-hero"));
    }

    #[test]
    fn skeleton_has_the_vml_namespaces() {
        let html = render("<mjml><mj-body></mj-body></mjml>", RenderOpts::default()).unwrap();
        assert!(html.starts_with("<!doctype html>\n"));
        assert!(html.contains("xmlns:v=\"urn:schemas-microsoft-com:vml\""));
        assert!(html.contains("xmlns:o=\"urn:schemas-microsoft-com:office:office\""));
        assert!(html.contains("<body style=\"word-spacing:normal;\">"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn body_background_reaches_the_body_tag() {
        let html = render(
            r##"<mjml><mj-body background-color="#e7e7e7"></mj-body></mjml>"##,
            RenderOpts::default(),
        )
        .unwrap();
        assert!(html.contains("<body style=\"word-spacing:normal;background-color:#e7e7e7;\">"));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let source = r#"<mjml><mj-head><mj-preview>Hi</mj-preview></mj-head><mj-body><mj-section><mj-column><mj-text>Hello</mj-text></mj-column></mj-section></mj-body></mjml>"#;
        let first = render(source, RenderOpts::default()).unwrap();
        let second = render(source, RenderOpts::default()).unwrap();
        assert_eq!(first, second);
    }
}

//! `mj-text`.

use super::{BaseState, Component};
use crate::context::RenderCx;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &[
    "align",
    "color",
    "container-background-color",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "height",
    "letter-spacing",
    "line-height",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "text-decoration",
    "text-transform",
    "vertical-align",
];

/// Paragraph-like rich text. The inner content is the node's own HTML,
/// reconstructed from the parsed children — never re-parsed.
pub struct Text<'a> {
    base: BaseState<'a>,
}

impl<'a> Text<'a> {
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }
}

impl<'a> Component<'a> for Text<'a> {
    fn tag_name(&self) -> &str {
        "mj-text"
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn allowed_attributes(&self) -> &'static [&'static str] {
        ALLOWED
    }

    fn default_attribute(&self, name: &str) -> &'static str {
        match name {
            "align" => "left",
            "color" => "#000000",
            "font-family" => "Ubuntu, Helvetica, Arial, sans-serif",
            "font-size" => "13px",
            "line-height" => "1",
            "padding" => "10px 25px",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let div = Tag::new("div")
            .maybe_style("font-family", self.attr_some(cx, "font-family"))
            .maybe_style("font-size", self.attr_some(cx, "font-size"))
            .maybe_style("font-style", self.attr_some(cx, "font-style"))
            .maybe_style("font-weight", self.attr_some(cx, "font-weight"))
            .maybe_style("letter-spacing", self.attr_some(cx, "letter-spacing"))
            .maybe_style("line-height", self.attr_some(cx, "line-height"))
            .maybe_style("text-align", self.attr_some(cx, "align"))
            .maybe_style("text-decoration", self.attr_some(cx, "text-decoration"))
            .maybe_style("text-transform", self.attr_some(cx, "text-transform"))
            .maybe_style("color", self.attr_some(cx, "color"));
        div.open(out);
        out.push_str(&self.base.node.inner_html_trimmed());
        div.close(out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::GlobalAttributes;
    use crate::options::RenderOpts;
    use mailcomb_core::parse;

    fn render_text(source: &str) -> String {
        let root = parse(source).unwrap();
        let node = &root.children[0].children[0];
        let cx = RenderCx::new(RenderOpts::default(), GlobalAttributes::default(), Vec::new());
        let mut component = Text::new(node);
        let mut out = String::new();
        component.render(&cx, &mut out).unwrap();
        out
    }

    #[test]
    fn default_style_order_matches_emission_sequence() {
        let html = render_text("<mjml><mj-body><mj-text>Hi</mj-text></mj-body></mjml>");
        assert_eq!(
            html,
            "<div style=\"font-family:Ubuntu, Helvetica, Arial, sans-serif;font-size:13px;line-height:1;text-align:left;color:#000000;\">Hi</div>"
        );
    }

    #[test]
    fn embedded_html_passes_through_verbatim() {
        let html = render_text(
            "<mjml><mj-body><mj-text>Hello <strong>world</strong>!</mj-text></mj-body></mjml>",
        );
        assert!(html.contains("Hello <strong>world</strong>!"));
    }

    #[test]
    fn br_children_are_normalized() {
        let html = render_text(
            "<mjml><mj-body><mj-text>one <br /> two</mj-text></mj-body></mjml>",
        );
        assert!(html.contains("one<br>two"));
    }
}

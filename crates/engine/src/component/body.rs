//! `mj-body`.

use super::{BODY_WIDTH, BaseState, BoxedComponent, Component, assign_layout, build_children};
use crate::context::RenderCx;
use crate::css;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &["background-color", "width"];

/// Root container: one wrapping `<div>` with the optional language and
/// background, from which the 600 px default width propagates down.
pub struct Body<'a> {
    base: BaseState<'a>,
    children: Vec<BoxedComponent<'a>>,
}

impl<'a> Body<'a> {
    /// Builds the body and its children by tag dispatch.
    pub fn new(node: &'a MjmlNode, cx: &RenderCx) -> Self {
        Self {
            base: BaseState::new(node),
            children: build_children(node, cx),
        }
    }

    /// The explicit background color, surfaced to the skeleton's
    /// `<body>` tag as well.
    pub fn background_color(&self, cx: &RenderCx) -> Option<String> {
        self.attr_some(cx, "background-color")
    }

    /// Pixel width every percentage below ultimately resolves against.
    pub fn width(&self, cx: &RenderCx) -> f32 {
        self.attr_some(cx, "width")
            .and_then(|w| css::parse_px(&w))
            .unwrap_or(BODY_WIDTH)
    }
}

impl<'a> Component<'a> for Body<'a> {
    fn tag_name(&self) -> &str {
        "mj-body"
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
            "width" => "600px",
            _ => "",
        }
    }

    fn into_body(self: Box<Self>) -> Option<Body<'a>> {
        Some(*self)
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let width = self.width(cx);
        let div = Tag::new("div")
            .maybe_attr("lang", cx.opts().lang.clone())
            .maybe_class(self.attr_some(cx, "css-class"))
            .maybe_style("background-color", self.attr_some(cx, "background-color"));
        div.open(out);
        assign_layout(&mut self.children, width);
        for child in self.children.iter_mut() {
            child.render(cx, out)?;
        }
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

    fn cx() -> RenderCx {
        RenderCx::new(RenderOpts::default(), GlobalAttributes::default(), Vec::new())
    }

    #[test]
    fn bare_body_is_a_plain_div() {
        let root = parse("<mjml><mj-body></mj-body></mjml>").unwrap();
        let node = &root.children[0];
        let cx = cx();
        let mut body = Body::new(node, &cx);
        let mut out = String::new();
        body.render(&cx, &mut out).unwrap();
        assert_eq!(out, "<div></div>");
    }

    #[test]
    fn background_color_and_lang_are_emitted() {
        let root =
            parse(r##"<mjml><mj-body background-color="#f0f0f0"></mj-body></mjml>"##).unwrap();
        let node = &root.children[0];
        let opts = RenderOpts {
            lang: Some("fr".to_string()),
            ..Default::default()
        };
        let cx = RenderCx::new(opts, GlobalAttributes::default(), Vec::new());
        let mut body = Body::new(node, &cx);
        let mut out = String::new();
        body.render(&cx, &mut out).unwrap();
        assert_eq!(
            out,
            r#"<div lang="fr" style="background-color:#f0f0f0;"></div>"#
        );
        assert_eq!(body.background_color(&cx), Some("#f0f0f0".to_string()));
    }

    #[test]
    fn width_defaults_to_600() {
        let root = parse("<mjml><mj-body></mj-body></mjml>").unwrap();
        let node = &root.children[0];
        let cx = cx();
        let body = Body::new(node, &cx);
        assert_eq!(body.width(&cx), 600.0);
    }
}

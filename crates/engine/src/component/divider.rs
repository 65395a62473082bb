//! `mj-divider`.

use super::{BaseState, Component, resolved_spacing};
use crate::conditional;
use crate::context::RenderCx;
use crate::css::{Width, parse_width};
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &[
    "align",
    "border-color",
    "border-style",
    "border-width",
    "container-background-color",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "width",
];

/// Horizontal rule drawn as a border-top paragraph, with an MSO-only
/// spacer table because Outlook refuses to honor the paragraph width.
pub struct Divider<'a> {
    base: BaseState<'a>,
}

impl<'a> Divider<'a> {
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }

    /// `style width color`, the canonical composite order.
    fn border_top(&self, cx: &RenderCx) -> String {
        format!(
            "{} {} {}",
            self.attr(cx, "border-style"),
            self.attr(cx, "border-width"),
            self.attr(cx, "border-color")
        )
    }

    /// Outlook cannot size the paragraph, so the spacer table gets the
    /// resolved pixel width: (container − horizontal padding) scaled by
    /// a percent width, or the explicit pixel width.
    fn outlook_width(&self, cx: &RenderCx) -> i32 {
        let padding = resolved_spacing(self, cx, "padding");
        let available = self.base.effective_width() - padding.horizontal();
        match parse_width(&self.attr(cx, "width")) {
            Some(Width::Px(px)) => px.round() as i32,
            Some(Width::Percent(pct)) => (available * pct / 100.0).round() as i32,
            None => available.round() as i32,
        }
    }
}

impl<'a> Component<'a> for Divider<'a> {
    fn tag_name(&self) -> &str {
        "mj-divider"
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
            "align" => "center",
            "border-color" => "#000000",
            "border-style" => "solid",
            "border-width" => "4px",
            "padding" => "10px 25px",
            "width" => "100%",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let border_top = self.border_top(cx);
        let p = Tag::new("p")
            .style("border-top", border_top.clone())
            .style("font-size", "1px")
            .style("margin", "0px auto")
            .style("width", self.attr(cx, "width"));
        p.open(out);
        p.close(out);

        let outlook_px = self.outlook_width(cx);
        let mut fragment = String::new();
        Tag::new("table")
            .attr("align", self.attr(cx, "align"))
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .attr("width", format!("{outlook_px}px"))
            .style("border-top", border_top)
            .style("font-size", "1px")
            .style("margin", "0px auto")
            .style("width", format!("{outlook_px}px"))
            .open(&mut fragment);
        fragment.push_str("<tr><td style=\"height:0;line-height:0;\">&nbsp;</td></tr></table>");
        conditional::mso(out, &fragment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::GlobalAttributes;
    use crate::options::RenderOpts;
    use mailcomb_core::parse;

    fn render_divider(body: &str) -> String {
        let root = parse(&format!("<mjml><mj-body>{body}</mj-body></mjml>")).unwrap();
        let node = &root.children[0].children[0];
        let cx = RenderCx::new(RenderOpts::default(), GlobalAttributes::default(), Vec::new());
        let mut divider = Divider::new(node);
        divider.base_mut().container_width = Some(600.0);
        let mut out = String::new();
        divider.render(&cx, &mut out).unwrap();
        out
    }

    #[test]
    fn border_top_composite_is_style_width_color() {
        let html = render_divider("<mj-divider/>");
        assert!(html.contains("border-top:solid 4px #000000;"), "got: {html}");
    }

    #[test]
    fn outlook_spacer_uses_550px_at_defaults() {
        let html = render_divider("<mj-divider/>");
        assert!(html.contains("width:550px;"), "got: {html}");
        assert!(html.contains(r#"width="550px""#), "got: {html}");
        assert!(html.contains("<!--[if mso | IE]><table"), "got: {html}");
    }

    #[test]
    fn percent_width_scales_the_spacer() {
        let html = render_divider(r#"<mj-divider width="50%"/>"#);
        assert!(html.contains("width:275px;"), "got: {html}");
        assert!(html.contains("width:50%;"), "got: {html}");
    }

    #[test]
    fn mso_comment_is_balanced() {
        let html = render_divider("<mj-divider/>");
        assert_eq!(
            html.matches("<!--[if mso | IE]>").count(),
            html.matches("<![endif]-->").count()
        );
    }
}

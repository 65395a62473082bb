//! `mj-wrapper`.

use super::{
    BODY_WIDTH, BaseState, BoxedComponent, Component, add_spacing_styles, apply_inline_styles,
    assign_layout, build_children, horizontal_border, resolved_spacing,
};
use crate::conditional;
use crate::context::RenderCx;
use crate::css;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &[
    "background-color",
    "background-position",
    "background-repeat",
    "background-size",
    "background-url",
    "border",
    "border-bottom",
    "border-left",
    "border-radius",
    "border-right",
    "border-top",
    "full-width",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "text-align",
];

/// A band that stacks whole sections inside one shared Outlook table.
/// The outer MSO cell is always the body width; only the inner width
/// shrinks by the wrapper's border, and children additionally lose the
/// horizontal padding.
pub struct Wrapper<'a> {
    base: BaseState<'a>,
    children: Vec<BoxedComponent<'a>>,
}

impl<'a> Wrapper<'a> {
    /// Builds the wrapper and its section children.
    pub fn new(node: &'a MjmlNode, cx: &RenderCx) -> Self {
        Self {
            base: BaseState::new(node),
            children: build_children(node, cx),
        }
    }
}

impl<'a> Component<'a> for Wrapper<'a> {
    fn tag_name(&self) -> &str {
        "mj-wrapper"
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
            "background-position" => "top center",
            "background-repeat" => "repeat",
            "background-size" => "auto",
            "direction" => "ltr",
            "padding" => "20px 0",
            "text-align" => "center",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let body_width = css::format_f32(BODY_WIDTH);
        let border = horizontal_border(self, cx);
        let padding = resolved_spacing(self, cx, "padding");
        let inner_width = BODY_WIDTH - border;
        let child_width = BODY_WIDTH - border - padding.horizontal();
        let css_class = self.attr_some(cx, "css-class");

        // Outer MSO cell: always the body width, borders notwithstanding.
        let mut fragment = String::new();
        Tag::new("table")
            .attr("align", "center")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .attr("width", body_width.clone())
            .maybe_class(css_class.as_ref().map(|c| format!("{c}-outlook")))
            .style("width", format!("{body_width}px"))
            .open(&mut fragment);
        fragment.push_str(
            "<tr><td style=\"line-height:0px;font-size:0px;mso-line-height-rule:exactly;\">",
        );
        conditional::mso(out, &fragment);

        let mut div = Tag::new("div").maybe_class(css_class.clone());
        if let Some(color) = self.attr_some(cx, "background-color") {
            div = div
                .style("background", color.clone())
                .style("background-color", color);
        }
        div = div
            .style("margin", "0px auto")
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"))
            .style("max-width", format!("{}px", css::format_f32(inner_width)));
        div = apply_inline_styles(div, cx, css_class.as_deref());
        div.open(out);

        let mut table = Tag::new("table")
            .attr("align", "center")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation");
        if let Some(color) = self.attr_some(cx, "background-color") {
            table = table
                .style("background", color.clone())
                .style("background-color", color);
        }
        table = table
            .style("width", "100%")
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"));
        table.open(out);
        out.push_str("<tbody><tr>");

        let mut td = Tag::new("td")
            .maybe_style("border", self.attr_some(cx, "border"))
            .maybe_style("border-bottom", self.attr_some(cx, "border-bottom"))
            .maybe_style("border-left", self.attr_some(cx, "border-left"))
            .maybe_style("border-right", self.attr_some(cx, "border-right"))
            .maybe_style("border-top", self.attr_some(cx, "border-top"))
            .style("direction", self.attr(cx, "direction"))
            .style("font-size", "0px");
        td = add_spacing_styles(td, self, cx, "padding");
        td = td.style("text-align", self.attr(cx, "text-align"));
        td.open(out);

        let wrapped_cx = cx.enter_wrapper();
        assign_layout(&mut self.children, child_width);

        // Sections share the outer MSO table: between two successive
        // sections the cell is closed and a fresh 600px row opened, with
        // any raw content carried inside that transition.
        let mut rendered_first = false;
        let mut pending_raw: Vec<usize> = Vec::new();
        for index in 0..self.children.len() {
            if self.children[index].is_raw_element() {
                if rendered_first {
                    pending_raw.push(index);
                } else {
                    self.children[index].render(&wrapped_cx, out)?;
                }
                continue;
            }
            if rendered_first {
                conditional::mso(out, "</td></tr>");
                for raw_index in pending_raw.drain(..) {
                    self.children[raw_index].render(&wrapped_cx, out)?;
                }
                conditional::mso(out, "<tr><td width=\"600px\">");
            }
            self.children[index].render(&wrapped_cx, out)?;
            rendered_first = true;
        }
        for raw_index in pending_raw {
            self.children[raw_index].render(&wrapped_cx, out)?;
        }

        td.close(out);
        out.push_str("</tr></tbody>");
        table.close(out);
        div.close(out);
        conditional::mso(out, "</td></tr></table>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::GlobalAttributes;
    use crate::options::RenderOpts;
    use mailcomb_core::parse;

    fn render_wrapper(body: &str) -> String {
        let root = parse(&format!("<mjml><mj-body>{body}</mj-body></mjml>")).unwrap();
        let node = &root.children[0].children[0];
        let cx = RenderCx::new(RenderOpts::default(), GlobalAttributes::default(), Vec::new());
        let mut wrapper = Wrapper::new(node, &cx);
        let mut out = String::new();
        wrapper.render(&cx, &mut out).unwrap();
        out
    }

    #[test]
    fn outer_mso_cell_is_body_width_despite_borders() {
        let html = render_wrapper(
            r#"<mj-wrapper border="10px solid #000"><mj-section><mj-column/></mj-section></mj-wrapper>"#,
        );
        assert!(
            html.contains(r#"width="600" style="width:600px;""#),
            "got: {html}"
        );
        // Inner non-MSO width loses both borders: 600 − 20.
        assert!(html.contains("max-width:580px;"), "got: {html}");
    }

    #[test]
    fn sections_inside_skip_their_own_outer_mso_table() {
        let html = render_wrapper(
            "<mj-wrapper><mj-section><mj-column/></mj-section></mj-wrapper>",
        );
        // Exactly one 600-wide MSO table: the wrapper's own.
        assert_eq!(
            html.matches(r#"width="600" style="width:600px;""#).count(),
            1,
            "got: {html}"
        );
    }

    #[test]
    fn transition_between_successive_sections() {
        let html = render_wrapper(
            "<mj-wrapper><mj-section><mj-column/></mj-section><mj-section><mj-column/></mj-section></mj-wrapper>",
        );
        assert!(
            html.contains(r#"<!--[if mso | IE]></td></tr><tr><td width="600px"><![endif]-->"#),
            "got: {html}"
        );
    }

    #[test]
    fn raw_between_sections_rides_inside_the_transition() {
        let html = render_wrapper(
            "<mj-wrapper><mj-section><mj-column/></mj-section><mj-raw><p>between</p></mj-raw><mj-section><mj-column/></mj-section></mj-wrapper>",
        );
        let expected = "<!--[if mso | IE]></td></tr><![endif]--><p>between</p><!--[if mso | IE]><tr><td width=\"600px\"><![endif]-->";
        assert!(html.contains(expected), "got: {html}");
    }

    #[test]
    fn children_width_loses_padding_and_borders() {
        let root = parse(
            r#"<mjml><mj-body><mj-wrapper border="5px solid #000" padding="20px 15px"><mj-section><mj-column/></mj-section></mj-wrapper></mj-body></mjml>"#,
        )
        .unwrap();
        let node = &root.children[0].children[0];
        let cx = RenderCx::new(RenderOpts::default(), GlobalAttributes::default(), Vec::new());
        let mut wrapper = Wrapper::new(node, &cx);
        let mut out = String::new();
        wrapper.render(&cx, &mut out).unwrap();
        // 600 − 2×5 − 2×15 = 560 becomes the section width.
        assert!(out.contains("max-width:560px;"), "got: {out}");
    }

    #[test]
    fn text_only_section_uses_the_split_pattern() {
        let html = render_wrapper(
            "<mj-wrapper><mj-section>loose text</mj-section></mj-wrapper>",
        );
        let expected = "<!--[if mso | IE]><table role=\"presentation\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\"><tr><![endif]-->loose text<!--[if mso | IE]></tr></table><![endif]-->";
        assert!(html.contains(expected), "got: {html}");
    }

    #[test]
    fn empty_section_uses_the_simple_pattern() {
        let html = render_wrapper("<mj-wrapper><mj-section></mj-section></mj-wrapper>");
        assert!(
            !html.contains("<tr><![endif]-->"),
            "empty section must not open the split pattern: {html}"
        );
    }

    #[test]
    fn mso_comments_are_balanced() {
        let html = render_wrapper(
            "<mj-wrapper><mj-section><mj-column/></mj-section><mj-raw>x</mj-raw><mj-section><mj-column/></mj-section></mj-wrapper>",
        );
        assert_eq!(
            html.matches("<!--[if mso | IE]>").count(),
            html.matches("<![endif]-->").count()
        );
    }
}

//! `mj-section`.

use super::{
    BaseState, BoxedComponent, Component, add_spacing_styles, apply_inline_styles, assign_layout,
    build_children, render_mso_cell_chain,
};
use crate::conditional;
use crate::context::RenderCx;
use crate::css::{self, parse_position, parse_size, background::vml_fill};
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
    "direction",
    "full-width",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "text-align",
];

/// The MSO table/row opener shared by a section's column chain.
pub(crate) const CHAIN_TABLE: &str =
    "<table role=\"presentation\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\"><tr>";

/// A horizontal band of columns. Background handling branches on
/// (image present?, full-width?); columns share one MSO table row via
/// the cross-sibling cell chain.
pub struct Section<'a> {
    base: BaseState<'a>,
    children: Vec<BoxedComponent<'a>>,
}

impl<'a> Section<'a> {
    /// Builds the section and its column children.
    pub fn new(node: &'a MjmlNode, cx: &RenderCx) -> Self {
        Self {
            base: BaseState::new(node),
            children: build_children(node, cx),
        }
    }

    fn is_full_width(&self, cx: &RenderCx) -> bool {
        self.attr_some(cx, "full-width").is_some()
    }

    fn background_url(&self, cx: &RenderCx) -> Option<String> {
        self.attr_some(cx, "background-url")
    }

    fn add_background_styles(&self, mut tag: Tag, cx: &RenderCx) -> Tag {
        if let Some(url) = self.background_url(cx) {
            let position = self.attr(cx, "background-position");
            let size = self.attr(cx, "background-size");
            let repeat = self.attr(cx, "background-repeat");
            let color = self
                .attr_some(cx, "background-color")
                .map(|c| format!("{c} "))
                .unwrap_or_default();
            tag = tag
                .style(
                    "background",
                    format!("{color}url('{url}') {position} / {size} {repeat}"),
                )
                .style("background-position", position)
                .style("background-repeat", repeat)
                .style("background-size", size);
        } else if let Some(color) = self.attr_some(cx, "background-color") {
            tag = tag
                .style("background", color.clone())
                .style("background-color", color);
        }
        tag
    }

    fn open_vml(&self, cx: &RenderCx, out: &mut String, url: &str, full_width: bool) {
        let size = parse_size(&self.attr(cx, "background-size"));
        let no_repeat = self.attr(cx, "background-repeat") == "no-repeat";
        let position = parse_position(&self.attr(cx, "background-position"));
        let fill = vml_fill(&size, no_repeat, position);
        let coords = format!(
            "{}, {}",
            css::format_f32(fill.origin.0),
            css::format_f32(fill.origin.1)
        );

        let mut fragment = String::new();
        let rect_style = if full_width {
            "mso-width-percent:1000;".to_string()
        } else {
            format!("width:{}px;", css::format_f32(self.base.effective_width()))
        };
        fragment.push_str(&format!(
            "<v:rect style=\"{rect_style}\" xmlns:v=\"urn:schemas-microsoft-com:vml\" fill=\"true\" stroke=\"false\">"
        ));
        Tag::new("v:fill")
            .attr("origin", coords.clone())
            .attr("position", coords)
            .attr("src", url)
            .maybe_attr("color", self.attr_some(cx, "background-color"))
            .maybe_attr("size", fill.size.clone())
            .maybe_attr("aspect", fill.aspect.map(String::from))
            .attr("type", fill.kind)
            .void(&mut fragment);
        fragment.push_str("<v:textbox style=\"mso-fit-shape-to-text:true\" inset=\"0,0,0,0\">");
        conditional::mso(out, &fragment);
    }

    fn close_vml(out: &mut String) {
        conditional::mso(out, "</v:textbox></v:rect>");
    }

    /// The section shell minus the full-width decoration. When
    /// `with_background` is false the caller has hoisted the background
    /// (and any VML) to an outer full-width table.
    fn render_section(
        &mut self,
        cx: &RenderCx,
        out: &mut String,
        with_background: bool,
    ) -> Result<(), RenderError> {
        let width = self.base.effective_width();
        let width_str = css::format_f32(width);
        let css_class = self.attr_some(cx, "css-class");
        let background_url = self.background_url(cx);

        if !cx.inside_wrapper {
            let mut fragment = String::new();
            Tag::new("table")
                .attr("align", "center")
                .attr("border", "0")
                .attr("cellpadding", "0")
                .attr("cellspacing", "0")
                .attr("role", "presentation")
                .attr("width", width_str.clone())
                .maybe_class(css_class.as_ref().map(|c| format!("{c}-outlook")))
                .style("width", format!("{width_str}px"))
                .open(&mut fragment);
            fragment.push_str(
                "<tr><td style=\"line-height:0px;font-size:0px;mso-line-height-rule:exactly;\">",
            );
            conditional::mso(out, &fragment);
        }
        if with_background && let Some(url) = &background_url {
            self.open_vml(cx, out, url, false);
        }

        let mut div = Tag::new("div").maybe_class(css_class.clone());
        if with_background {
            div = self.add_background_styles(div, cx);
        }
        div = div
            .style("margin", "0px auto")
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"))
            .style("max-width", format!("{width_str}px"));
        div = apply_inline_styles(div, cx, css_class.as_deref());
        if cx.opts().debug_tags && let Some(line) = self.base.node.line {
            div = div.attr("data-mj-debug-line", format!("{line}"));
        }
        div.open(out);

        let mut table = Tag::new("table")
            .attr("align", "center")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation");
        if with_background {
            table = self.add_background_styles(table, cx);
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

        self.render_content(cx, out)?;

        td.close(out);
        out.push_str("</tr></tbody>");
        table.close(out);
        div.close(out);

        if with_background && background_url.is_some() {
            Self::close_vml(out);
        }
        if !cx.inside_wrapper {
            conditional::mso(out, "</td></tr></table>");
        }
        Ok(())
    }

    fn render_content(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        if self.children.is_empty() {
            // Inside a wrapper, a section carrying bare text keeps the
            // split comment pattern; an empty one emits nothing. The
            // distinguishing predicate is "has text and no child
            // components".
            if cx.inside_wrapper && self.base.node.has_text() {
                conditional::mso(out, CHAIN_TABLE);
                out.push_str(self.base.node.inner_text().trim());
                conditional::mso(out, "</tr></table>");
            }
            return Ok(());
        }
        render_mso_cell_chain(&mut self.children, cx, out, CHAIN_TABLE)
    }

    fn render_full_width(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let background_url = self.background_url(cx);
        let mut outer = Tag::new("table").attr("align", "center");
        if let Some(url) = &background_url {
            outer = outer.attr("background", url.clone());
        }
        outer = outer
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .maybe_class(self.attr_some(cx, "css-class"));
        outer = self.add_background_styles(outer, cx);
        outer = outer.style("width", "100%");
        outer.open(out);
        out.push_str("<tbody><tr><td>");
        if let Some(url) = &background_url {
            self.open_vml(cx, out, url, true);
        }
        self.render_section(cx, out, false)?;
        if background_url.is_some() {
            Self::close_vml(out);
        }
        out.push_str("</td></tr></tbody>");
        outer.close(out);
        Ok(())
    }
}

impl<'a> Component<'a> for Section<'a> {
    fn tag_name(&self) -> &str {
        "mj-section"
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
        // Children size against the section's own effective width; the
        // section does not subtract its padding here.
        assign_layout(&mut self.children, self.base.effective_width());
        if self.is_full_width(cx) {
            self.render_full_width(cx, out)
        } else {
            self.render_section(cx, out, true)
        }
    }
}

//! `mj-column`.

use super::{
    BaseState, BoxedComponent, Component, assign_layout, build_children, cell_tag, column_width,
    horizontal_border, resolved_spacing,
};
use crate::context::RenderCx;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &[
    "background-color",
    "border",
    "border-bottom",
    "border-left",
    "border-radius",
    "border-right",
    "border-top",
    "direction",
    "inner-background-color",
    "inner-border",
    "inner-border-bottom",
    "inner-border-left",
    "inner-border-radius",
    "inner-border-right",
    "inner-border-top",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "vertical-align",
    "width",
];

/// A responsive column. Desktop width comes from the `mj-column-per-…` /
/// `mj-column-px-…` class and its media query; mobile falls back to the
/// inline 100% width. Children render as rows of the inner table.
pub struct Column<'a> {
    base: BaseState<'a>,
    children: Vec<BoxedComponent<'a>>,
}

impl<'a> Column<'a> {
    /// Builds the column and its children.
    pub fn new(node: &'a MjmlNode, cx: &RenderCx) -> Self {
        Self {
            base: BaseState::new(node),
            children: build_children(node, cx),
        }
    }

    fn has_gutter(&self, cx: &RenderCx) -> bool {
        super::PADDING_ATTRIBUTES
            .iter()
            .any(|attribute| self.attr_some(cx, attribute).is_some())
    }

    fn inner_table(&self, cx: &RenderCx) -> Tag {
        Tag::new("table")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .maybe_style("background-color", self.attr_some(cx, "background-color"))
            .maybe_style("border", self.attr_some(cx, "border"))
            .maybe_style("border-bottom", self.attr_some(cx, "border-bottom"))
            .maybe_style("border-left", self.attr_some(cx, "border-left"))
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"))
            .maybe_style("border-right", self.attr_some(cx, "border-right"))
            .maybe_style("border-top", self.attr_some(cx, "border-top"))
            .style("vertical-align", self.attr(cx, "vertical-align"))
            .attr("width", "100%")
    }
}

impl<'a> Component<'a> for Column<'a> {
    fn tag_name(&self) -> &str {
        "mj-column"
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
            "direction" => "ltr",
            "vertical-align" => "top",
            _ => "",
        }
    }

    fn conditional_td(&self, cx: &RenderCx) -> Option<Tag> {
        let width = column_width(self, cx);
        Some(
            Tag::new("td")
                .maybe_class(
                    self.attr_some(cx, "css-class")
                        .map(|class| format!("{class}-outlook")),
                )
                .style("vertical-align", self.attr(cx, "vertical-align"))
                .style("width", format!("{}px", width.outlook_px)),
        )
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let width = column_width(self, cx);
        cx.register_media_query(&width.class, &width.css_width);

        let inline_width = if cx.inside_group {
            width.css_width.clone()
        } else {
            "100%".to_string()
        };
        let css_class = self.attr_some(cx, "css-class");
        let mut div = Tag::new("div")
            .class(width.class.clone())
            .class("mj-outlook-group-fix")
            .maybe_class(css_class.clone())
            .style("font-size", "0px")
            .style("text-align", "left")
            .style("direction", self.attr(cx, "direction"))
            .style("display", "inline-block")
            .style("vertical-align", self.attr(cx, "vertical-align"))
            .style("width", inline_width);
        div = super::apply_inline_styles(div, cx, css_class.as_deref());
        if cx.opts().debug_tags {
            div = div.attr(
                "data-mj-debug-width",
                format!("{}", width.outlook_px),
            );
        }
        div.open(out);

        // Children see the column's inner pixel width.
        let padding = resolved_spacing(self, cx, "padding");
        let inner_width =
            width.outlook_px as f32 - padding.horizontal() - horizontal_border(self, cx);
        assign_layout(&mut self.children, inner_width);

        let gutter = self.has_gutter(cx);
        let (outer, gutter_td) = if gutter {
            let outer = Tag::new("table")
                .attr("border", "0")
                .attr("cellpadding", "0")
                .attr("cellspacing", "0")
                .attr("role", "presentation")
                .attr("width", "100%");
            let mut td = Tag::new("td");
            td = super::add_spacing_styles(td, self, cx, "padding");
            td = td.style("vertical-align", self.attr(cx, "vertical-align"));
            (Some(outer), Some(td))
        } else {
            (None, None)
        };
        if let (Some(outer), Some(td)) = (&outer, &gutter_td) {
            outer.open(out);
            out.push_str("<tbody><tr>");
            td.open(out);
        }

        let table = self.inner_table(cx);
        table.open(out);
        out.push_str("<tbody>");
        for child in self.children.iter_mut() {
            if child.is_raw_element() {
                child.render(cx, out)?;
                continue;
            }
            out.push_str("<tr>");
            let td = cell_tag(&**child, cx);
            td.open(out);
            child.render(cx, out)?;
            td.close(out);
            out.push_str("</tr>");
        }
        out.push_str("</tbody>");
        table.close(out);

        if let (Some(outer), Some(td)) = (&outer, &gutter_td) {
            td.close(out);
            out.push_str("</tr></tbody>");
            outer.close(out);
        }
        div.close(out);
        Ok(())
    }
}

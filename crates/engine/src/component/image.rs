//! `mj-image`.

use super::{BaseState, Component, resolved_spacing};
use crate::context::RenderCx;
use crate::css;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &[
    "align",
    "alt",
    "border",
    "border-radius",
    "container-background-color",
    "fluid-on-mobile",
    "font-size",
    "height",
    "href",
    "name",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "rel",
    "src",
    "srcset",
    "target",
    "title",
    "width",
];

/// A fixed-width image inside its own presentation table.
pub struct Image<'a> {
    base: BaseState<'a>,
}

impl<'a> Image<'a> {
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }

    /// The rendered pixel width: the container width minus horizontal
    /// padding and both borders, capped by an explicit `width` attribute.
    fn content_width(&self, cx: &RenderCx) -> f32 {
        let padding = resolved_spacing(self, cx, "padding");
        let border = css::border_width(&self.attr(cx, "border"));
        let box_width = self.base.effective_width() - padding.horizontal() - 2.0 * border;
        match self.attr_some(cx, "width").and_then(|w| css::parse_px(&w)) {
            Some(explicit) => explicit.min(box_width),
            None => box_width,
        }
    }
}

impl<'a> Component<'a> for Image<'a> {
    fn tag_name(&self) -> &str {
        "mj-image"
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
            "border" => "0",
            "font-size" => "13px",
            "height" => "auto",
            "padding" => "10px 25px",
            "target" => "_blank",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let src = self
            .attr_some(cx, "src")
            .ok_or_else(|| RenderError::missing_attribute("mj-image", "src"))?;
        let width = self.content_width(cx);
        let width_attr = css::format_f32(width.round());

        let table = Tag::new("table")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .style("border-collapse", "collapse")
            .style("border-spacing", "0px");
        table.open(out);
        out.push_str("<tbody><tr>");
        let td = Tag::new("td").style("width", format!("{width_attr}px"));
        td.open(out);

        let href = self.attr_some(cx, "href");
        let anchor = href.as_ref().map(|href| {
            Tag::new("a")
                .attr("href", href.clone())
                .maybe_attr("name", self.attr_some(cx, "name"))
                .maybe_attr("rel", self.attr_some(cx, "rel"))
                .attr("target", self.attr(cx, "target"))
        });
        if let Some(anchor) = &anchor {
            anchor.open(out);
        }

        // `alt` is always present for accessibility, even when empty.
        let height = self.attr(cx, "height");
        let mut img = Tag::new("img")
            .attr("alt", self.attr(cx, "alt"))
            .maybe_attr(
                "height",
                (!height.is_empty()).then(|| height.trim_end_matches("px").to_string()),
            )
            .attr("src", src)
            .maybe_attr("srcset", self.attr_some(cx, "srcset"))
            .maybe_attr("title", self.attr_some(cx, "title"))
            .attr("width", width_attr)
            .maybe_style("border", self.attr_some(cx, "border"))
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"))
            .style("display", "block")
            .style("outline", "none")
            .style("text-decoration", "none");
        if height == "auto" {
            img = img.style("height", "auto");
        } else if !height.is_empty() {
            img = img.style("height", height);
        }
        img = img
            .style("width", "100%")
            .maybe_style("font-size", self.attr_some(cx, "font-size"));
        img.void(out);

        if let Some(anchor) = &anchor {
            anchor.close(out);
        }
        td.close(out);
        out.push_str("</tr></tbody>");
        table.close(out);
        Ok(())
    }
}

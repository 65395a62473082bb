//! `mj-button`.

use super::{BaseState, Component, resolved_spacing};
use crate::context::RenderCx;
use crate::css;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &[
    "align",
    "background-color",
    "border",
    "border-bottom",
    "border-left",
    "border-radius",
    "border-right",
    "border-top",
    "color",
    "container-background-color",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "height",
    "href",
    "inner-padding",
    "letter-spacing",
    "line-height",
    "name",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "rel",
    "target",
    "text-decoration",
    "text-transform",
    "vertical-align",
    "width",
];

/// Bulletproof button: a single-cell table carrying the chrome with an
/// inline-block anchor inside it.
pub struct Button<'a> {
    base: BaseState<'a>,
}

impl<'a> Button<'a> {
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }

    /// Anchor width: the declared width minus both horizontal inner
    /// paddings. No declared width, no width style.
    fn anchor_width(&self, cx: &RenderCx) -> Option<f32> {
        let width = css::parse_px(&self.attr_some(cx, "width")?)?;
        let inner = resolved_spacing(self, cx, "inner-padding");
        Some(width - inner.horizontal())
    }
}

impl<'a> Component<'a> for Button<'a> {
    fn tag_name(&self) -> &str {
        "mj-button"
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
            "background-color" => "#414141",
            "border" => "none",
            "border-radius" => "3px",
            "color" => "#ffffff",
            "font-family" => "Ubuntu, Helvetica, Arial, sans-serif",
            "font-size" => "13px",
            "font-weight" => "normal",
            "inner-padding" => "10px 25px",
            "line-height" => "120%",
            "padding" => "10px 25px",
            "target" => "_blank",
            "text-decoration" => "none",
            "text-transform" => "none",
            "vertical-align" => "middle",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let background = self.attr(cx, "background-color");
        let has_background = !background.is_empty() && background != "none";
        let width = self.attr_some(cx, "width").and_then(|w| css::parse_px(&w));

        let mut table = Tag::new("table")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .style("border-collapse", "separate");
        if let Some(width) = width {
            table = table.style("width", format!("{}px", css::format_f32(width)));
        }
        table = table.style("line-height", "100%");
        table.open(out);
        out.push_str("<tbody><tr>");

        let mut td = Tag::new("td")
            .attr("align", "center");
        if has_background {
            td = td.attr("bgcolor", background.clone());
        }
        td = td
            .attr("role", "presentation")
            .maybe_style("border", self.attr_some(cx, "border"))
            .maybe_style("border-bottom", self.attr_some(cx, "border-bottom"))
            .maybe_style("border-left", self.attr_some(cx, "border-left"))
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"))
            .maybe_style("border-right", self.attr_some(cx, "border-right"))
            .maybe_style("border-top", self.attr_some(cx, "border-top"))
            .style("cursor", "auto")
            .maybe_style("font-style", self.attr_some(cx, "font-style"))
            .maybe_style("height", self.attr_some(cx, "height"))
            .maybe_style("mso-padding-alt", self.attr_some(cx, "inner-padding"));
        if has_background {
            td = td.style("background", background.clone());
        }
        td = td.attr("valign", self.attr(cx, "vertical-align"));
        td.open(out);

        let href = self.attr_some(cx, "href");
        let mut anchor = match &href {
            Some(href) => Tag::new("a")
                .attr("href", href.clone())
                .maybe_attr("name", self.attr_some(cx, "name"))
                .maybe_attr("rel", self.attr_some(cx, "rel"))
                .attr("target", self.attr(cx, "target")),
            None => Tag::new("p").maybe_attr("name", self.attr_some(cx, "name")),
        };
        anchor = anchor.style("display", "inline-block");
        if let Some(inner_width) = self.anchor_width(cx) {
            anchor = anchor.style("width", format!("{}px", css::format_f32(inner_width)));
        }
        if has_background {
            anchor = anchor.style("background", background);
        }
        anchor = anchor
            .maybe_style("color", self.attr_some(cx, "color"))
            .maybe_style("font-family", self.attr_some(cx, "font-family"))
            .maybe_style("font-size", self.attr_some(cx, "font-size"))
            .maybe_style("font-style", self.attr_some(cx, "font-style"))
            .maybe_style("font-weight", self.attr_some(cx, "font-weight"))
            .maybe_style("line-height", self.attr_some(cx, "line-height"))
            .maybe_style("letter-spacing", self.attr_some(cx, "letter-spacing"))
            .style("margin", "0")
            .maybe_style("text-decoration", self.attr_some(cx, "text-decoration"))
            .maybe_style("text-transform", self.attr_some(cx, "text-transform"));
        anchor = anchor
            .maybe_style("padding", self.attr_some(cx, "inner-padding"))
            .style("mso-padding-alt", "0px")
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"));
        anchor.open(out);
        out.push_str(&self.base.node.inner_html_trimmed());
        anchor.close(out);

        td.close(out);
        out.push_str("</tr></tbody>");
        table.close(out);
        Ok(())
    }
}

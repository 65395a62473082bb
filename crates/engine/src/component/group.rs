//! `mj-group`.

use super::{
    BaseState, BoxedComponent, Component, apply_inline_styles, assign_layout, build_children,
    column_width, render_mso_cell_chain, section::CHAIN_TABLE,
};
use crate::context::RenderCx;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &["background-color", "direction", "vertical-align", "width"];

/// Columns that refuse to stack on mobile. The group occupies one cell
/// of the section's MSO row and shares a single inner Outlook table
/// across its columns; each column keeps its real width inline so the
/// group stays side-by-side on small screens.
pub struct Group<'a> {
    base: BaseState<'a>,
    children: Vec<BoxedComponent<'a>>,
}

impl<'a> Group<'a> {
    /// Builds the group and its column children.
    pub fn new(node: &'a MjmlNode, cx: &RenderCx) -> Self {
        Self {
            base: BaseState::new(node),
            children: build_children(node, cx),
        }
    }
}

impl<'a> Component<'a> for Group<'a> {
    fn tag_name(&self) -> &str {
        "mj-group"
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

        let css_class = self.attr_some(cx, "css-class");
        let mut div = Tag::new("div")
            .class(width.class.clone())
            .class("mj-outlook-group-fix")
            .maybe_class(css_class.clone())
            .style("font-size", "0")
            .style("line-height", "0")
            .style("text-align", "left")
            .style("display", "inline-block")
            .style("width", "100%")
            .style("direction", self.attr(cx, "direction"))
            .style("vertical-align", self.attr(cx, "vertical-align"))
            .maybe_style("background-color", self.attr_some(cx, "background-color"));
        div = apply_inline_styles(div, cx, css_class.as_deref());
        div.open(out);

        // Columns split the group's own pixel width between themselves.
        assign_layout(&mut self.children, width.outlook_px as f32);
        let group_cx = cx.enter_group();
        render_mso_cell_chain(&mut self.children, &group_cx, out, CHAIN_TABLE)?;

        div.close(out);
        Ok(())
    }
}

//! `mj-spacer`.

use super::{BaseState, Component};
use crate::context::RenderCx;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const ALLOWED: &[&str] = &[
    "container-background-color",
    "height",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
];

/// Fixed-height vertical gap.
pub struct Spacer<'a> {
    base: BaseState<'a>,
}

impl<'a> Spacer<'a> {
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }
}

impl<'a> Component<'a> for Spacer<'a> {
    fn tag_name(&self) -> &str {
        "mj-spacer"
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
            "height" => "20px",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let height = self.attr(cx, "height");
        let div = Tag::new("div")
            .style("height", height.clone())
            .style("line-height", height);
        div.open(out);
        // Hair space keeps the div from collapsing in clients that strip
        // empty blocks.
        out.push_str("&#8202;");
        div.close(out);
        Ok(())
    }
}

//! Head-only placeholders and catalog entries without a body renderer.

use super::{BaseState, Component};
use crate::context::RenderCx;
use crate::error::RenderError;
use mailcomb_core::MjmlNode;

/// Head elements (`mj-head`, `mj-title`, `mj-font`, `mj-preview`,
/// `mj-style`, `mj-attributes`, `mj-all`, `mj-class`) produce no body
/// HTML; the document driver consults their nodes separately. They count
/// as raw elements so they never disturb sibling arithmetic.
pub struct HeadPlaceholder<'a> {
    base: BaseState<'a>,
}

impl<'a> HeadPlaceholder<'a> {
    /// Wraps a head-only node.
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }
}

impl<'a> Component<'a> for HeadPlaceholder<'a> {
    fn tag_name(&self) -> &str {
        &self.base.node.tag
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn is_raw_element(&self) -> bool {
        true
    }

    fn render(&mut self, _cx: &RenderCx, _out: &mut String) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Catalog entries whose render is unimplemented (`mj-hero`, the
/// `mj-accordion` family, `mj-table`) plus unknown tags. Rendering fails
/// with the tag name; the default-attribute sets are still served so
/// tooling can query them without rendering.
pub struct NotImplemented<'a> {
    base: BaseState<'a>,
}

impl<'a> NotImplemented<'a> {
    /// Wraps a node without a body renderer.
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }
}

impl<'a> Component<'a> for NotImplemented<'a> {
    fn tag_name(&self) -> &str {
        &self.base.node.tag
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn default_attribute(&self, name: &str) -> &'static str {
        match self.base.node.tag.as_str() {
            "mj-hero" => match name {
                "background-color" => "#ffffff",
                "background-position" => "center center",
                "height" => "0px",
                "mode" => "fixed-height",
                "padding" => "0px",
                "vertical-align" => "top",
                _ => "",
            },
            "mj-table" => match name {
                "align" => "left",
                "border" => "none",
                "cellpadding" => "0",
                "cellspacing" => "0",
                "color" => "#000000",
                "font-family" => "Ubuntu, Helvetica, Arial, sans-serif",
                "font-size" => "13px",
                "line-height" => "22px",
                "padding" => "10px 25px",
                "table-layout" => "auto",
                "width" => "100%",
                _ => "",
            },
            "mj-accordion" => match name {
                "border" => "2px solid black",
                "font-family" => "Ubuntu, Helvetica, Arial, sans-serif",
                "icon-align" => "middle",
                "icon-height" => "32px",
                "icon-position" => "right",
                "icon-unwrapped-alt" => "-",
                "icon-unwrapped-url" => "https://i.imgur.com/w4uTygT.png",
                "icon-width" => "32px",
                "icon-wrapped-alt" => "+",
                "icon-wrapped-url" => "https://i.imgur.com/bIXv1bk.png",
                "padding" => "10px 25px",
                _ => "",
            },
            "mj-accordion-title" => match name {
                "font-size" => "13px",
                "padding" => "16px",
                _ => "",
            },
            "mj-accordion-text" => match name {
                "font-size" => "13px",
                "line-height" => "1",
                "padding" => "16px",
                _ => "",
            },
            _ => "",
        }
    }

    fn render(&mut self, _cx: &RenderCx, _out: &mut String) -> Result<(), RenderError> {
        Err(RenderError::Unimplemented(self.base.node.tag.clone()))
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
    fn unimplemented_render_carries_the_tag_name() {
        let root = parse("<mjml><mj-body><mj-hero/></mj-body></mjml>").unwrap();
        let node = &root.children[0].children[0];
        let mut hero = NotImplemented::new(node);
        let mut out = String::new();
        let err = hero.render(&cx(), &mut out).unwrap_err();
        assert!(matches!(err, RenderError::Unimplemented(tag) if tag == "mj-hero"));
        assert!(out.is_empty());
    }

    #[test]
    fn defaults_are_served_without_rendering() {
        let root = parse(
            "<mjml><mj-body><mj-hero/><mj-table/><mj-accordion/></mj-body></mjml>",
        )
        .unwrap();
        let body = &root.children[0];
        let hero = NotImplemented::new(&body.children[0]);
        assert_eq!(hero.default_attribute("mode"), "fixed-height");
        assert_eq!(hero.default_attribute("background-color"), "#ffffff");
        let table = NotImplemented::new(&body.children[1]);
        assert_eq!(table.default_attribute("table-layout"), "auto");
        assert_eq!(table.default_attribute("cellpadding"), "0");
        let accordion = NotImplemented::new(&body.children[2]);
        assert_eq!(accordion.default_attribute("icon-position"), "right");
        assert_eq!(accordion.default_attribute("border"), "2px solid black");
    }

    #[test]
    fn head_placeholder_renders_nothing() {
        let root = parse("<mjml><mj-head><mj-title>t</mj-title></mj-head><mj-body/></mjml>")
            .unwrap();
        let node = root.children[0].child("mj-title").unwrap();
        let mut title = HeadPlaceholder::new(node);
        let mut out = String::new();
        title.render(&cx(), &mut out).unwrap();
        assert!(out.is_empty());
        assert!(title.is_raw_element());
    }
}

//! `mj-raw`.

use super::{BaseState, Component};
use crate::context::RenderCx;
use crate::error::RenderError;
use mailcomb_core::MjmlNode;

/// Opaque passthrough content. Excluded from sibling and width
/// arithmetic; the captured inner content is written verbatim, trimmed
/// of leading and trailing whitespace only.
pub struct Raw<'a> {
    base: BaseState<'a>,
}

impl<'a> Raw<'a> {
    /// Wraps a raw node.
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }
}

impl<'a> Component<'a> for Raw<'a> {
    fn tag_name(&self) -> &str {
        "mj-raw"
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

    fn render(&mut self, _cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        out.push_str(self.base.node.inner_text().trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::GlobalAttributes;
    use crate::options::RenderOpts;
    use mailcomb_core::parse;

    #[test]
    fn content_passes_through_verbatim_trimmed() {
        let root = parse(
            "<mjml><mj-body><mj-raw>\n  <table><tr><td>legacy</td></tr></table>\n</mj-raw></mj-body></mjml>",
        )
        .unwrap();
        let node = &root.children[0].children[0];
        let cx = RenderCx::new(RenderOpts::default(), GlobalAttributes::default(), Vec::new());
        let mut raw = Raw::new(node);
        let mut out = String::new();
        raw.render(&cx, &mut out).unwrap();
        assert_eq!(out, "<table><tr><td>legacy</td></tr></table>");
    }

    #[test]
    fn raw_is_a_raw_element() {
        let root = parse("<mjml><mj-body><mj-raw>x</mj-raw></mj-body></mjml>").unwrap();
        let node = &root.children[0].children[0];
        assert!(Raw::new(node).is_raw_element());
    }
}

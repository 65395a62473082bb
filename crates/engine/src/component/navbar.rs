//! `mj-navbar` and `mj-navbar-link`.

use super::{BaseState, BoxedComponent, Component, add_spacing_styles, build_children};
use crate::conditional;
use crate::context::RenderCx;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const NAVBAR_ALLOWED: &[&str] = &[
    "align",
    "base-url",
    "hamburger",
    "ico-align",
    "ico-close",
    "ico-color",
    "ico-font-family",
    "ico-font-size",
    "ico-line-height",
    "ico-open",
    "ico-padding",
    "ico-text-decoration",
    "ico-text-transform",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
];

const LINK_ALLOWED: &[&str] = &[
    "color",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "href",
    "letter-spacing",
    "line-height",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "rel",
    "target",
    "text-decoration",
    "text-transform",
];

/// Inline link bar with an optional checkbox-driven hamburger for small
/// screens. The per-document id ties the checkbox, its label, and the
/// head CSS block together.
pub struct Navbar<'a> {
    base: BaseState<'a>,
    children: Vec<BoxedComponent<'a>>,
}

impl<'a> Navbar<'a> {
    /// Builds the navbar and its link children.
    pub fn new(node: &'a MjmlNode, cx: &RenderCx) -> Self {
        Self {
            base: BaseState::new(node),
            children: build_children(node, cx),
        }
    }

    fn head_css(id: &str) -> String {
        format!(
            "<style type=\"text/css\">noinput.mj-menu-checkbox-{id} {{ display:block !important; max-height:none !important; visibility:visible !important; }}\n\
             @media only screen and (max-width:479px) {{\n\
             .mj-menu-checkbox-{id}[type=\"checkbox\"] ~ .mj-inline-links {{ display:none !important; }}\n\
             .mj-menu-checkbox-{id}[type=\"checkbox\"]:checked ~ .mj-inline-links,\n\
             .mj-menu-checkbox-{id}[type=\"checkbox\"] ~ .mj-menu-trigger {{ display:block !important; max-width:none !important; max-height:none !important; font-size:inherit !important; }}\n\
             .mj-menu-checkbox-{id}[type=\"checkbox\"] ~ .mj-inline-links > a {{ display:block !important; }}\n\
             .mj-menu-checkbox-{id}[type=\"checkbox\"]:checked ~ .mj-menu-trigger .mj-menu-icon-close {{ display:block !important; }}\n\
             .mj-menu-checkbox-{id}[type=\"checkbox\"]:checked ~ .mj-menu-trigger .mj-menu-icon-open {{ display:none !important; }}\n\
             }}</style>"
        )
    }

    fn render_hamburger(&self, cx: &RenderCx, out: &mut String, id: &str) {
        conditional::not_mso(
            out,
            &format!(
                "<input type=\"checkbox\" id=\"{id}\" class=\"mj-menu-checkbox mj-menu-checkbox-{id}\" style=\"display:none !important; max-height:0; visibility:hidden;\" />"
            ),
        );
        let trigger = Tag::new("div")
            .class("mj-menu-trigger")
            .style("display", "none")
            .style("max-height", "0px")
            .style("max-width", "0px")
            .style("font-size", "0px")
            .style("overflow", "hidden");
        trigger.open(out);
        let label = Tag::new("label")
            .attr("for", id.to_string())
            .attr("align", self.attr(cx, "ico-align"))
            .class("mj-menu-label")
            .style("display", "block")
            .style("cursor", "pointer")
            .style("mso-hide", "all")
            .style("-moz-user-select", "none")
            .style("user-select", "none")
            .style("color", self.attr(cx, "ico-color"))
            .style("font-size", self.attr(cx, "ico-font-size"))
            .style("font-family", self.attr(cx, "ico-font-family"))
            .style("text-transform", self.attr(cx, "ico-text-transform"))
            .style("text-decoration", self.attr(cx, "ico-text-decoration"))
            .style("line-height", self.attr(cx, "ico-line-height"))
            .style("padding", self.attr(cx, "ico-padding"));
        label.open(out);
        let open_icon = Tag::new("span")
            .class("mj-menu-icon-open")
            .style("mso-hide", "all");
        open_icon.open(out);
        out.push_str(&self.attr(cx, "ico-open"));
        open_icon.close(out);
        let close_icon = Tag::new("span")
            .class("mj-menu-icon-close")
            .style("display", "none")
            .style("mso-hide", "all");
        close_icon.open(out);
        out.push_str(&self.attr(cx, "ico-close"));
        close_icon.close(out);
        label.close(out);
        trigger.close(out);
    }
}

impl<'a> Component<'a> for Navbar<'a> {
    fn tag_name(&self) -> &str {
        "mj-navbar"
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn allowed_attributes(&self) -> &'static [&'static str] {
        NAVBAR_ALLOWED
    }

    fn default_attribute(&self, name: &str) -> &'static str {
        match name {
            "align" => "center",
            "ico-align" => "center",
            "ico-close" => "&#8855;",
            "ico-color" => "#000000",
            "ico-font-family" => "Ubuntu, Helvetica, Arial, sans-serif",
            "ico-font-size" => "30px",
            "ico-line-height" => "30px",
            "ico-open" => "&#9776;",
            "ico-padding" => "10px",
            "ico-text-decoration" => "none",
            "ico-text-transform" => "uppercase",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        super::assign_layout(&mut self.children, self.base.effective_width());
        let hamburger = self.attr(cx, "hamburger") == "hamburger";
        if hamburger {
            let id = cx.next_navbar_id();
            cx.add_head_style(Self::head_css(&id));
            self.render_hamburger(cx, out, &id);
        }

        let links_div = Tag::new("div").class("mj-inline-links");
        links_div.open(out);

        let mut fragment = String::new();
        Tag::new("table")
            .attr("role", "presentation")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("align", self.attr(cx, "align"))
            .open(&mut fragment);
        fragment.push_str("<tr>");
        conditional::mso(out, &fragment);

        let base_url = self.attr_some(cx, "base-url");
        for child in self.children.iter_mut() {
            if let Some(link) = child.as_navbar_link() {
                link.base_url = base_url.clone();
            }
            child.render(cx, out)?;
        }

        conditional::mso(out, "</tr></table>");
        links_div.close(out);
        Ok(())
    }
}

/// A single navbar link; the Outlook fallback wraps each link in its own
/// conditional `<td>`.
pub struct NavbarLink<'a> {
    base: BaseState<'a>,
    /// Prefix injected by the parent navbar.
    pub base_url: Option<String>,
}

impl<'a> NavbarLink<'a> {
    /// Builds a link; the parent injects `base-url` before rendering.
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
            base_url: None,
        }
    }

    fn full_href(&self, cx: &RenderCx) -> Option<String> {
        let href = self.attr_some(cx, "href")?;
        match &self.base_url {
            Some(base) => Some(format!("{base}{href}")),
            None => Some(href),
        }
    }
}

impl<'a> Component<'a> for NavbarLink<'a> {
    fn tag_name(&self) -> &str {
        "mj-navbar-link"
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn allowed_attributes(&self) -> &'static [&'static str] {
        LINK_ALLOWED
    }

    fn default_attribute(&self, name: &str) -> &'static str {
        match name {
            "color" => "#000000",
            "font-family" => "Ubuntu, Helvetica, Arial, sans-serif",
            "font-size" => "13px",
            "font-weight" => "normal",
            "line-height" => "22px",
            "padding" => "15px 10px",
            "target" => "_blank",
            "text-decoration" => "none",
            "text-transform" => "uppercase",
            _ => "",
        }
    }

    fn as_navbar_link(&mut self) -> Option<&mut NavbarLink<'a>> {
        Some(self)
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let mut fragment = String::new();
        let mut td = Tag::new("td");
        td = add_spacing_styles(td, self, cx, "padding");
        td = td.maybe_class(
            self.attr_some(cx, "css-class")
                .map(|class| format!("{class}-outlook")),
        );
        td.open(&mut fragment);
        conditional::mso(out, &fragment);

        let anchor = Tag::new("a")
            .class("mj-link")
            .maybe_class(self.attr_some(cx, "css-class"))
            .maybe_attr("href", self.full_href(cx))
            .maybe_attr("rel", self.attr_some(cx, "rel"))
            .attr("target", self.attr(cx, "target"))
            .style("display", "inline-block")
            .maybe_style("color", self.attr_some(cx, "color"))
            .maybe_style("font-family", self.attr_some(cx, "font-family"))
            .maybe_style("font-size", self.attr_some(cx, "font-size"))
            .maybe_style("font-style", self.attr_some(cx, "font-style"))
            .maybe_style("font-weight", self.attr_some(cx, "font-weight"))
            .maybe_style("letter-spacing", self.attr_some(cx, "letter-spacing"))
            .maybe_style("line-height", self.attr_some(cx, "line-height"))
            .maybe_style("text-decoration", self.attr_some(cx, "text-decoration"))
            .maybe_style("text-transform", self.attr_some(cx, "text-transform"));
        let anchor = add_spacing_styles(anchor, self, cx, "padding");
        anchor.open(out);
        out.push_str(self.base.node.inner_text().trim());
        anchor.close(out);

        conditional::mso(out, "</td>");
        Ok(())
    }
}

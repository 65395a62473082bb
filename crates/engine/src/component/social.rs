//! `mj-social` and `mj-social-element`.

use super::{BaseState, BoxedComponent, Component, add_spacing_styles, render_mso_cell_chain};
use crate::context::RenderCx;
use crate::css;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;

const SOCIAL_ALLOWED: &[&str] = &[
    "align",
    "border-radius",
    "color",
    "container-background-color",
    "font-family",
    "font-size",
    "icon-padding",
    "icon-size",
    "inner-padding",
    "line-height",
    "mode",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "text-decoration",
    "text-padding",
];

const ELEMENT_ALLOWED: &[&str] = &[
    "align",
    "alt",
    "background-color",
    "border-radius",
    "color",
    "font-family",
    "font-size",
    "href",
    "icon-size",
    "line-height",
    "name",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "rel",
    "src",
    "target",
    "text-decoration",
];

/// Attribute keys a social element inherits through the parent before
/// falling back to its own default.
const INHERITED: &[&str] = &[
    "color",
    "font-family",
    "font-size",
    "line-height",
    "text-decoration",
    "border-radius",
    "icon-size",
];

/// The fixed platform table: icon color, share-URL base, icon file.
struct Platform {
    name: &'static str,
    background_color: &'static str,
    share_url: Option<&'static str>,
}

const PLATFORMS: &[Platform] = &[
    Platform {
        name: "facebook",
        background_color: "#3b5998",
        share_url: Some("https://www.facebook.com/sharer/sharer.php?u="),
    },
    Platform {
        name: "twitter",
        background_color: "#55acee",
        share_url: Some("https://twitter.com/home?status="),
    },
    Platform {
        name: "linkedin",
        background_color: "#0077b5",
        share_url: Some("https://www.linkedin.com/shareArticle?mini=true&url="),
    },
    Platform {
        name: "google",
        background_color: "#dc4e41",
        share_url: Some("https://plus.google.com/share?url="),
    },
    Platform {
        name: "pinterest",
        background_color: "#bd081c",
        share_url: Some("https://pinterest.com/pin/create/button/?url="),
    },
    Platform {
        name: "tumblr",
        background_color: "#344356",
        share_url: Some("https://www.tumblr.com/widgets/share/tool?canonicalUrl="),
    },
    Platform {
        name: "github",
        background_color: "#000000",
        share_url: None,
    },
    Platform {
        name: "dribbble",
        background_color: "#D95988",
        share_url: None,
    },
    Platform {
        name: "instagram",
        background_color: "#3f729b",
        share_url: None,
    },
    Platform {
        name: "youtube",
        background_color: "#EB3323",
        share_url: None,
    },
    Platform {
        name: "medium",
        background_color: "#000000",
        share_url: None,
    },
    Platform {
        name: "vimeo",
        background_color: "#53B4E7",
        share_url: None,
    },
    Platform {
        name: "web",
        background_color: "#4BADE9",
        share_url: None,
    },
    Platform {
        name: "snapchat",
        background_color: "#FFFA54",
        share_url: None,
    },
    Platform {
        name: "soundcloud",
        background_color: "#EF7F31",
        share_url: None,
    },
];

const ICON_BASE_URL: &str = "https://www.mailjet.com/images/theme/v1/icons/ico-social/";

fn platform(name: &str) -> Option<&'static Platform> {
    let bare = name.strip_suffix("-noshare").unwrap_or(name);
    PLATFORMS.iter().find(|p| p.name == bare)
}

/// Default icon background for a platform name, the fixed table entry.
pub fn platform_background(name: &str) -> Option<&'static str> {
    platform(name).map(|p| p.background_color)
}

/// Default share-URL base for a platform name.
pub fn platform_share_url(name: &str) -> Option<&'static str> {
    platform(name).and_then(|p| p.share_url)
}

/// Row of social icons, horizontal by default.
pub struct Social<'a> {
    base: BaseState<'a>,
    children: Vec<BoxedComponent<'a>>,
}

impl<'a> Social<'a> {
    /// Builds the icon row; `mj-social-element` children get a back
    /// reference to the parent node for attribute inheritance.
    pub fn new(node: &'a MjmlNode, cx: &RenderCx) -> Self {
        let children = node
            .element_children()
            .map(|child| -> BoxedComponent<'a> {
                if child.tag == "mj-social-element" {
                    Box::new(SocialElement::new(child, Some(node)))
                } else {
                    super::build(child, cx)
                }
            })
            .collect();
        Self {
            base: BaseState::new(node),
            children,
        }
    }
}

impl<'a> Component<'a> for Social<'a> {
    fn tag_name(&self) -> &str {
        "mj-social"
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn allowed_attributes(&self) -> &'static [&'static str] {
        SOCIAL_ALLOWED
    }

    fn default_attribute(&self, name: &str) -> &'static str {
        match name {
            "align" => "center",
            "border-radius" => "3px",
            "color" => "#333333",
            "font-family" => "Ubuntu, Helvetica, Arial, sans-serif",
            "font-size" => "13px",
            "icon-size" => "20px",
            "line-height" => "22px",
            "mode" => "horizontal",
            "padding" => "10px 25px",
            "text-decoration" => "none",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        super::assign_layout(&mut self.children, self.base.effective_width());
        if self.attr(cx, "mode") == "vertical" {
            let table = Tag::new("table")
                .attr("border", "0")
                .attr("cellpadding", "0")
                .attr("cellspacing", "0")
                .attr("role", "presentation")
                .style("margin", "0px");
            table.open(out);
            out.push_str("<tbody>");
            for child in self.children.iter_mut() {
                out.push_str("<tr><td>");
                child.render(cx, out)?;
                out.push_str("</td></tr>");
            }
            out.push_str("</tbody>");
            table.close(out);
            return Ok(());
        }
        let open_table = format!(
            "<table align=\"{}\" border=\"0\" cellpadding=\"0\" cellspacing=\"0\" role=\"presentation\"><tr>",
            self.attr(cx, "align")
        );
        render_mso_cell_chain(&mut self.children, cx, out, &open_table)
    }
}

/// One social icon, optionally with trailing label text in the same row.
pub struct SocialElement<'a> {
    base: BaseState<'a>,
    parent: Option<&'a MjmlNode>,
}

impl<'a> SocialElement<'a> {
    /// Builds one element; `parent` is the `mj-social` node supplying
    /// the inherited keys.
    pub fn new(node: &'a MjmlNode, parent: Option<&'a MjmlNode>) -> Self {
        Self {
            base: BaseState::new(node),
            parent,
        }
    }

    fn platform_name(&self, cx: &RenderCx) -> Option<String> {
        self.attr_some(cx, "name")
    }

    /// Icon source: explicit `src` wins, else the platform icon.
    fn icon_src(&self, cx: &RenderCx) -> Result<String, RenderError> {
        if let Some(src) = self.attr_some(cx, "src") {
            return Ok(src);
        }
        let name = self
            .platform_name(cx)
            .ok_or_else(|| RenderError::missing_attribute("mj-social-element", "src"))?;
        let bare = name.strip_suffix("-noshare").unwrap_or(&name).to_string();
        Ok(format!("{ICON_BASE_URL}{bare}.png"))
    }

    /// Share links route the href through the platform's share URL; a
    /// bare `#` therefore expands to e.g.
    /// `https://twitter.com/home?status=#` for twitter.
    fn resolved_href(&self, cx: &RenderCx) -> Option<String> {
        let href = self.attr_some(cx, "href")?;
        let share = self
            .platform_name(cx)
            .and_then(|name| platform_share_url(&name));
        match share {
            Some(base) => Some(format!("{base}{href}")),
            None => Some(href),
        }
    }

    fn background_color(&self, cx: &RenderCx) -> Option<String> {
        self.attr_some(cx, "background-color").or_else(|| {
            self.platform_name(cx)
                .and_then(|name| platform_background(&name))
                .map(str::to_string)
        })
    }
}

impl<'a> Component<'a> for SocialElement<'a> {
    fn tag_name(&self) -> &str {
        "mj-social-element"
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn allowed_attributes(&self) -> &'static [&'static str] {
        ELEMENT_ALLOWED
    }

    fn default_attribute(&self, name: &str) -> &'static str {
        match name {
            "align" => "center",
            "alt" => "",
            "border-radius" => "3px",
            "color" => "#000000",
            "font-family" => "Ubuntu, Helvetica, Arial, sans-serif",
            "font-size" => "13px",
            "icon-size" => "20px",
            "line-height" => "22px",
            "padding" => "4px",
            "target" => "_blank",
            "text-decoration" => "none",
            _ => "",
        }
    }

    /// The inherited keys consult the parent `mj-social` element's own
    /// attribute between the global store and the local default.
    fn resolve_attribute(&self, cx: &RenderCx, name: &str) -> Option<String> {
        let standard =
            super::resolve_without_default(self.base.node, self.tag_name(), cx, name);
        if standard.is_some() {
            return standard;
        }
        if INHERITED.contains(&name)
            && let Some(parent) = self.parent
            && let Some(value) = parent.attribute(name)
            && !value.is_empty()
        {
            return Some(value.to_string());
        }
        let default = self.default_attribute(name);
        (!default.is_empty()).then(|| default.to_string())
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        let icon_size = self.attr(cx, "icon-size");
        let icon_px = css::parse_px(&icon_size).unwrap_or(20.0);
        let icon_attr = css::format_f32(icon_px.round());
        let href = self.resolved_href(cx);
        let background = self.background_color(cx);

        let outer = Tag::new("table")
            .attr("align", self.attr(cx, "align"))
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .style("float", "none")
            .style("display", "inline-table");
        outer.open(out);
        out.push_str("<tbody><tr>");

        let mut icon_td = Tag::new("td");
        icon_td = add_spacing_styles(icon_td, self, cx, "padding");
        icon_td = icon_td.style("vertical-align", "middle");
        icon_td.open(out);

        let icon_table = Tag::new("table")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .maybe_style("background", background)
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"))
            .style("width", icon_size.clone());
        icon_table.open(out);
        out.push_str("<tbody><tr>");
        let inner_td = Tag::new("td")
            .style("font-size", "0")
            .style("height", icon_size.clone())
            .style("vertical-align", "middle")
            .style("width", icon_size.clone());
        inner_td.open(out);

        let anchor = href.as_ref().map(|href| {
            Tag::new("a")
                .attr("href", href.clone())
                .maybe_attr("rel", self.attr_some(cx, "rel"))
                .attr("target", self.attr(cx, "target"))
        });
        if let Some(anchor) = &anchor {
            anchor.open(out);
        }
        Tag::new("img")
            .attr("alt", self.attr(cx, "alt"))
            .attr("height", icon_attr.clone())
            .attr("src", self.icon_src(cx)?)
            .maybe_style("border-radius", self.attr_some(cx, "border-radius"))
            .style("display", "block")
            .attr("width", icon_attr)
            .void(out);
        if let Some(anchor) = &anchor {
            anchor.close(out);
        }
        inner_td.close(out);
        out.push_str("</tr></tbody>");
        icon_table.close(out);
        icon_td.close(out);

        // Label text rides in the same row, next to the icon.
        if self.base.node.has_text() {
            let text_td = Tag::new("td").style("vertical-align", "middle");
            text_td.open(out);
            let label = Tag::new("a")
                .maybe_attr("href", href.clone())
                .maybe_attr(
                    "target",
                    href.as_ref().map(|_| self.attr(cx, "target")),
                )
                .maybe_style("color", self.attr_some(cx, "color"))
                .maybe_style("font-size", self.attr_some(cx, "font-size"))
                .maybe_style("font-family", self.attr_some(cx, "font-family"))
                .maybe_style("line-height", self.attr_some(cx, "line-height"))
                .maybe_style("text-decoration", self.attr_some(cx, "text-decoration"));
            label.open(out);
            out.push_str(self.base.node.inner_text().trim());
            label.close(out);
            text_td.close(out);
        }

        out.push_str("</tr></tbody>");
        outer.close(out);
        Ok(())
    }
}

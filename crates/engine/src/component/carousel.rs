//! `mj-carousel` and `mj-carousel-image`.
//!
//! The interactive version drives image switching with hidden radio
//! inputs and a per-document id woven through every class name and the
//! generated head CSS; Outlook gets a static fallback showing the first
//! image only.

use super::{BaseState, Component};
use crate::conditional;
use crate::context::RenderCx;
use crate::css;
use crate::error::RenderError;
use crate::tag::Tag;
use mailcomb_core::MjmlNode;
use std::fmt::Write;

const CAROUSEL_ALLOWED: &[&str] = &[
    "align",
    "border-radius",
    "container-background-color",
    "icon-width",
    "left-icon",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "right-icon",
    "tb-border",
    "tb-border-radius",
    "tb-hover-border-color",
    "tb-selected-border-color",
    "tb-width",
    "thumbnails",
];

const IMAGE_ALLOWED: &[&str] = &[
    "alt",
    "border-radius",
    "href",
    "rel",
    "src",
    "target",
    "thumbnails-src",
    "title",
];

/// Radio-driven image slider.
pub struct Carousel<'a> {
    base: BaseState<'a>,
    images: Vec<CarouselImage<'a>>,
}

impl<'a> Carousel<'a> {
    /// Builds the carousel from its `mj-carousel-image` children.
    pub fn new(node: &'a MjmlNode) -> Self {
        let images = node
            .element_children()
            .filter(|child| child.tag == "mj-carousel-image")
            .map(CarouselImage::new)
            .collect();
        Self {
            base: BaseState::new(node),
            images,
        }
    }

    fn thumbnail_width(&self, cx: &RenderCx) -> f32 {
        let count = self.images.len().max(1) as f32;
        match self
            .attr_some(cx, "tb-width")
            .and_then(|w| css::parse_px(&w))
        {
            Some(px) => px,
            None => (self.base.effective_width() / count).min(110.0),
        }
    }

    /// The carousel stylesheet: selector chains parameterized by the
    /// per-document id and the image count.
    fn head_css(&self, cx: &RenderCx, id: &str, count: usize) -> String {
        let icon_width = self.attr(cx, "icon-width");
        let hover = self.attr(cx, "tb-hover-border-color");
        let selected = self.attr(cx, "tb-selected-border-color");
        let mut css = String::new();
        css.push_str("<style type=\"text/css\">");
        css.push_str(
            ".mj-carousel { -webkit-user-select:none; -moz-user-select:none; user-select:none; }\n",
        );
        let _ = write!(
            css,
            ".mj-carousel-{id}-icons-cell {{ display:table-cell !important; width:{icon_width} !important; }}\n"
        );
        css.push_str(
            ".mj-carousel-radio, .mj-carousel-next, .mj-carousel-previous { display:none !important; }\n",
        );
        css.push_str(
            ".mj-carousel-thumbnail, .mj-carousel-next, .mj-carousel-previous { touch-action:manipulation; }\n",
        );
        for k in 1..=count {
            let gap = " + *".repeat(count - k);
            let _ = write!(
                css,
                ".mj-carousel-{id}-radio-{k}:checked{gap} + .mj-carousel-content .mj-carousel-image-{k} {{ display:block !important; }}\n"
            );
        }
        for k in 1..=count {
            let gap = " + *".repeat(count - k);
            let previous = if k == 1 { count } else { k - 1 };
            let next = if k == count { 1 } else { k + 1 };
            let _ = write!(
                css,
                ".mj-carousel-{id}-radio-{k}:checked{gap} + .mj-carousel-content .mj-carousel-previous-{previous}, .mj-carousel-{id}-radio-{k}:checked{gap} + .mj-carousel-content .mj-carousel-next-{next} {{ display:block !important; }}\n"
            );
        }
        for k in 1..=count {
            let gap = " + *".repeat(count - k);
            let _ = write!(
                css,
                ".mj-carousel-{id}-radio-{k}:checked{gap} + .mj-carousel-content .mj-carousel-{id}-thumbnail-{k} {{ border-color:{selected} !important; }}\n"
            );
        }
        let _ = write!(
            css,
            ".mj-carousel-{id}-thumbnail:hover {{ border-color:{hover} !important; }}\n"
        );
        css.push_str(
            ".mj-carousel-image img + div, .mj-carousel-thumbnail img + div { display:none !important; }\n",
        );
        css.push_str("</style>");
        css
    }

    fn render_radios(&self, out: &mut String, id: &str) {
        for k in 1..=self.images.len() {
            let mut input = Tag::new("input")
                .class("mj-carousel-radio")
                .class(format!("mj-carousel-{id}-radio"))
                .class(format!("mj-carousel-{id}-radio-{k}"));
            if k == 1 {
                input = input.attr("checked", "checked");
            }
            input = input
                .attr("type", "radio")
                .attr("name", format!("mj-carousel-radio-{id}"))
                .attr("id", format!("mj-carousel-{id}-radio-{k}"))
                .style("display", "none")
                .style("mso-hide", "all");
            input.void(out);
        }
    }

    fn render_thumbnails(&self, cx: &RenderCx, out: &mut String, id: &str) {
        let width = css::format_f32(self.thumbnail_width(cx).round());
        for (index, image) in self.images.iter().enumerate() {
            let k = index + 1;
            let link = Tag::new("a")
                .attr("href", format!("#{k}"))
                .class("mj-carousel-thumbnail")
                .class(format!("mj-carousel-{id}-thumbnail"))
                .class(format!("mj-carousel-{id}-thumbnail-{k}"))
                .style("border", self.attr(cx, "tb-border"))
                .style("border-radius", self.attr(cx, "tb-border-radius"))
                .style("display", "inline-block")
                .style("overflow", "hidden")
                .style("width", format!("{width}px"));
            link.open(out);
            let label = Tag::new("label").attr("for", format!("mj-carousel-{id}-radio-{k}"));
            label.open(out);
            Tag::new("img")
                .attr("src", image.thumbnail_src(cx).unwrap_or_default())
                .attr("alt", image.attr(cx, "alt"))
                .attr("width", width.clone())
                .style("display", "block")
                .style("width", "100%")
                .style("height", "auto")
                .void(out);
            label.close(out);
            link.close(out);
        }
    }

    fn render_icons(
        &self,
        cx: &RenderCx,
        out: &mut String,
        id: &str,
        direction: &str,
        icon: &str,
    ) {
        let count = self.images.len();
        let icon_width = self.attr(cx, "icon-width");
        let icon_px = css::format_f32(css::parse_px(&icon_width).unwrap_or(44.0).round());
        let div = Tag::new("div")
            .class(format!("mj-carousel-{direction}-icons"))
            .style("display", "none")
            .style("mso-hide", "all");
        div.open(out);
        for k in 1..=count {
            let target = if direction == "previous" {
                if k == 1 { count } else { k - 1 }
            } else if k == count {
                1
            } else {
                k + 1
            };
            let label = Tag::new("label")
                .attr("for", format!("mj-carousel-{id}-radio-{target}"))
                .class(format!("mj-carousel-{direction}"))
                .class(format!("mj-carousel-{direction}-{k}"));
            label.open(out);
            Tag::new("img")
                .attr("src", icon)
                .attr("alt", direction)
                .attr("width", icon_px.clone())
                .style("display", "block")
                .style("width", icon_width.clone())
                .style("height", "auto")
                .void(out);
            label.close(out);
        }
        div.close(out);
    }
}

impl<'a> Component<'a> for Carousel<'a> {
    fn tag_name(&self) -> &str {
        "mj-carousel"
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn allowed_attributes(&self) -> &'static [&'static str] {
        CAROUSEL_ALLOWED
    }

    fn default_attribute(&self, name: &str) -> &'static str {
        match name {
            "align" => "center",
            "border-radius" => "6px",
            "icon-width" => "44px",
            "left-icon" => "https://i.imgur.com/xTh3hln.png",
            "right-icon" => "https://i.imgur.com/os7o9kz.png",
            "tb-border" => "2px solid transparent",
            "tb-border-radius" => "6px",
            "tb-hover-border-color" => "#fead0d",
            "tb-selected-border-color" => "#ccc",
            "thumbnails" => "visible",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        if self.images.is_empty() {
            return Ok(());
        }
        let id = cx.next_carousel_id();
        let count = self.images.len();
        let container = self.base.effective_width();
        for image in self.images.iter_mut() {
            image.base_mut().container_width = Some(container);
        }
        cx.add_head_style(self.head_css(cx, &id, count));

        out.push_str(conditional::NOT_MSO_IF);
        let carousel_div = Tag::new("div").class("mj-carousel");
        carousel_div.open(out);
        self.render_radios(out, &id);
        let content = Tag::new("div")
            .class("mj-carousel-content")
            .class(format!("mj-carousel-{id}-content"))
            .style("display", "table")
            .style("width", "100%")
            .style("table-layout", "fixed")
            .style("text-align", "center")
            .style("font-size", "0px");
        content.open(out);
        if self.attr(cx, "thumbnails") == "visible" {
            self.render_thumbnails(cx, out, &id);
        }

        let table = Tag::new("table")
            .attr("border", "0")
            .attr("cellpadding", "0")
            .attr("cellspacing", "0")
            .attr("role", "presentation")
            .attr("width", "100%")
            .class("mj-carousel-main")
            .style("caption-side", "top")
            .style("display", "table-caption")
            .style("table-layout", "fixed")
            .style("width", "100%");
        table.open(out);
        out.push_str("<tbody><tr>");

        let icons_td = Tag::new("td")
            .class(format!("mj-carousel-{id}-icons-cell"))
            .style("display", "none")
            .style("font-size", "0px")
            .style("mso-hide", "all")
            .style("padding", "0px");
        icons_td.open(out);
        self.render_icons(cx, out, &id, "previous", &self.attr(cx, "left-icon"));
        icons_td.close(out);

        let images_td = Tag::new("td").style("padding", "0px");
        images_td.open(out);
        let images_div = Tag::new("div").class("mj-carousel-images");
        images_div.open(out);
        let border_radius = self.attr_some(cx, "border-radius");
        for index in 0..self.images.len() {
            self.images[index].render_at(cx, index, border_radius.clone(), out)?;
        }
        images_div.close(out);
        images_td.close(out);

        icons_td.open(out);
        self.render_icons(cx, out, &id, "next", &self.attr(cx, "right-icon"));
        icons_td.close(out);

        out.push_str("</tr></tbody>");
        table.close(out);
        content.close(out);
        carousel_div.close(out);
        out.push_str(conditional::NOT_MSO_END);

        // Outlook sees only the first image, statically.
        let mut fallback = String::new();
        self.images[0].render_at(cx, 0, border_radius, &mut fallback)?;
        conditional::mso(out, &fallback);
        Ok(())
    }
}

/// One slide of a carousel.
pub struct CarouselImage<'a> {
    base: BaseState<'a>,
}

impl<'a> CarouselImage<'a> {
    /// Wraps one slide node.
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            base: BaseState::new(node),
        }
    }

    fn thumbnail_src(&self, cx: &RenderCx) -> Option<String> {
        self.attr_some(cx, "thumbnails-src")
            .or_else(|| self.attr_some(cx, "src"))
    }

    /// Renders the slide at `index` (0-based); every slide but the first
    /// starts hidden.
    fn render_at(
        &self,
        cx: &RenderCx,
        index: usize,
        border_radius: Option<String>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let src = self
            .attr_some(cx, "src")
            .ok_or_else(|| RenderError::missing_attribute("mj-carousel-image", "src"))?;
        let width = css::format_f32(self.base.effective_width().round());

        let mut div = Tag::new("div")
            .class("mj-carousel-image")
            .class(format!("mj-carousel-image-{}", index + 1))
            .maybe_class(self.attr_some(cx, "css-class"));
        if index > 0 {
            div = div.style("display", "none").style("mso-hide", "all");
        }
        div.open(out);

        let anchor = self.attr_some(cx, "href").map(|href| {
            Tag::new("a")
                .attr("href", href)
                .maybe_attr("rel", self.attr_some(cx, "rel"))
                .attr("target", self.attr(cx, "target"))
        });
        if let Some(anchor) = &anchor {
            anchor.open(out);
        }
        Tag::new("img")
            .maybe_attr("title", self.attr_some(cx, "title"))
            .attr("src", src)
            .attr("alt", self.attr(cx, "alt"))
            .attr("width", width.clone())
            .maybe_style("border-radius", border_radius)
            .style("display", "block")
            .style("width", format!("{width}px"))
            .style("max-width", "100%")
            .style("height", "auto")
            .void(out);
        if let Some(anchor) = &anchor {
            anchor.close(out);
        }
        div.close(out);
        Ok(())
    }
}

impl<'a> Component<'a> for CarouselImage<'a> {
    fn tag_name(&self) -> &str {
        "mj-carousel-image"
    }

    fn base(&self) -> &BaseState<'a> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseState<'a> {
        &mut self.base
    }

    fn allowed_attributes(&self) -> &'static [&'static str] {
        IMAGE_ALLOWED
    }

    fn default_attribute(&self, name: &str) -> &'static str {
        match name {
            "target" => "_blank",
            _ => "",
        }
    }

    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError> {
        self.render_at(cx, 0, None, out)
    }
}

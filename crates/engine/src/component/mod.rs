//! Component registry and shared component behavior.
//!
//! Components are tag-keyed variants behind one object-safe trait; shared
//! behavior (attribute resolution, layout bookkeeping, the cross-sibling
//! MSO cell chain) lives in free functions and provided methods over a
//! small [`BaseState`] rather than an inheritance tree.

mod body;
mod button;
mod carousel;
mod column;
mod divider;
mod group;
mod image;
mod navbar;
mod placeholders;
mod raw;
mod section;
mod social;
mod spacer;
mod text;
mod wrapper;

pub use body::Body;
pub use carousel::{Carousel, CarouselImage};
pub use column::Column;
pub use group::Group;
pub use navbar::{Navbar, NavbarLink};
pub use placeholders::{HeadPlaceholder, NotImplemented};
pub use raw::Raw;
pub use section::Section;
pub use social::{Social, SocialElement};
pub use wrapper::Wrapper;

use crate::context::RenderCx;
use crate::css::{self, Width, parse_width};
use crate::error::RenderError;
use crate::tag::Tag;
use crate::{conditional, css::Spacing};
use mailcomb_core::MjmlNode;

/// Default body width in pixels; every percentage ultimately resolves
/// against a pixel width propagated down from here.
pub const BODY_WIDTH: f32 = 600.0;

/// Mutable layout state shared by every component variant.
#[derive(Debug, Clone, Copy)]
pub struct BaseState<'a> {
    /// The node this component was built from.
    pub node: &'a MjmlNode,
    /// Pixel width propagated by the parent; `None` means "body default".
    pub container_width: Option<f32>,
    /// Total sibling count, raw elements included.
    pub siblings: usize,
    /// Raw-element sibling count.
    pub raw_siblings: usize,
}

impl<'a> BaseState<'a> {
    /// Creates layout state for a freshly built component.
    pub fn new(node: &'a MjmlNode) -> Self {
        Self {
            node,
            container_width: None,
            siblings: 1,
            raw_siblings: 0,
        }
    }

    /// The component's own container width, defaulting to the body width.
    pub fn effective_width(&self) -> f32 {
        self.container_width.unwrap_or(BODY_WIDTH)
    }

    /// Siblings that participate in width arithmetic.
    pub fn non_raw_siblings(&self) -> usize {
        self.siblings.saturating_sub(self.raw_siblings).max(1)
    }
}

/// A boxed component variant.
pub type BoxedComponent<'a> = Box<dyn Component<'a> + 'a>;

/// The capability set shared by all component variants.
pub trait Component<'a> {
    /// Canonical tag string.
    fn tag_name(&self) -> &str;

    /// Shared layout state.
    fn base(&self) -> &BaseState<'a>;

    /// Shared layout state, mutable.
    fn base_mut(&mut self) -> &mut BaseState<'a>;

    /// Component-local default for `name`; empty string when there is
    /// none. Defined even for components whose render is unimplemented.
    fn default_attribute(&self, name: &str) -> &'static str {
        let _ = name;
        ""
    }

    /// Attribute allow-list used for invalid-attribute reporting. An
    /// empty list disables the check for this component.
    fn allowed_attributes(&self) -> &'static [&'static str] {
        &[]
    }

    /// True only for `mj-raw` and the head-only placeholders; raw
    /// elements are excluded from sibling and width arithmetic.
    fn is_raw_element(&self) -> bool {
        false
    }

    /// Emits the component's HTML into `out`.
    fn render(&mut self, cx: &RenderCx, out: &mut String) -> Result<(), RenderError>;

    /// The `<td>` this component occupies in a section/group MSO cell
    /// chain, when it participates in one.
    fn conditional_td(&self, cx: &RenderCx) -> Option<Tag> {
        let _ = cx;
        None
    }

    /// Downcast hook the navbar uses to inject its `base-url` into link
    /// children before rendering them.
    fn as_navbar_link(&mut self) -> Option<&mut NavbarLink<'a>> {
        None
    }

    /// Downcast hook for the driver, which needs the concrete body to
    /// read its background color back after the render.
    fn into_body(self: Box<Self>) -> Option<Body<'a>> {
        None
    }

    /// Resolves an attribute through the four-level pipeline and fires
    /// the lookup side effects (font tracking, debug trace). `None`
    /// means no level produced a value, which callers can distinguish
    /// from "resolved to empty".
    fn get_attribute(&self, cx: &RenderCx, name: &str) -> Option<String> {
        let resolved = self.resolve_attribute(cx, name);
        if let Some(value) = &resolved {
            if name == "font-family" && !value.is_empty() {
                cx.track_font(value);
            }
            if cx.opts().debug_tags {
                log::trace!(
                    target: "engine.attributes",
                    "<{}> {} = {:?}",
                    self.tag_name(),
                    name,
                    value
                );
            }
        }
        resolved
    }

    /// The resolution order without side effects: element attribute,
    /// `mj-class` bundles, global store, component default. Overridable
    /// for components with an extra fallback level (social elements).
    fn resolve_attribute(&self, cx: &RenderCx, name: &str) -> Option<String> {
        resolve_without_default(self.base().node, self.tag_name(), cx, name).or_else(|| {
            let default = self.default_attribute(name);
            (!default.is_empty()).then(|| default.to_string())
        })
    }

    /// Resolved attribute or the empty string.
    fn attr(&self, cx: &RenderCx, name: &str) -> String {
        self.get_attribute(cx, name).unwrap_or_default()
    }

    /// Resolved attribute filtered to non-empty values; the form used
    /// when a style is only emitted if explicitly set.
    fn attr_some(&self, cx: &RenderCx, name: &str) -> Option<String> {
        self.get_attribute(cx, name).filter(|v| !v.is_empty())
    }
}

/// Levels 1–3 of the pipeline: element attribute, `mj-class` bundles
/// (last class wins, `css-class` accumulates), then the global store
/// (per-tag before blanket).
pub(crate) fn resolve_without_default(
    node: &MjmlNode,
    tag: &str,
    cx: &RenderCx,
    name: &str,
) -> Option<String> {
    if name == "css-class" {
        return resolve_css_class(node, tag, cx);
    }
    if let Some(value) = node.attribute(name)
        && !value.is_empty()
    {
        return Some(value.to_string());
    }
    if let Some(class_list) = node.attribute("mj-class") {
        let mut found = None;
        for class in class_list.split_whitespace() {
            if let Some(bundle) = cx.globals().class_bundle(class)
                && let Some((_, value)) = bundle.iter().find(|(n, _)| n == name)
                && !value.is_empty()
            {
                found = Some(value.clone());
            }
        }
        if found.is_some() {
            return found;
        }
    }
    if let Some(value) = cx.globals().get_tag(tag, name)
        && !value.is_empty()
    {
        return Some(value.to_string());
    }
    if let Some(value) = cx.globals().get_all(name)
        && !value.is_empty()
    {
        return Some(value.to_string());
    }
    None
}

/// `css-class` accumulates across all levels instead of first-wins:
/// element value, referenced bundles, per-tag, then blanket, joined by
/// single spaces.
fn resolve_css_class(node: &MjmlNode, tag: &str, cx: &RenderCx) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(value) = node.attribute("css-class")
        && !value.is_empty()
    {
        parts.push(value);
    }
    if let Some(class_list) = node.attribute("mj-class") {
        for class in class_list.split_whitespace() {
            if let Some(bundle) = cx.globals().class_bundle(class)
                && let Some((_, value)) = bundle.iter().find(|(n, _)| n == "css-class")
                && !value.is_empty()
            {
                parts.push(value);
            }
        }
    }
    if let Some(value) = cx.globals().get_tag(tag, "css-class")
        && !value.is_empty()
    {
        parts.push(value);
    }
    if let Some(value) = cx.globals().get_all("css-class")
        && !value.is_empty()
    {
        parts.push(value);
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Builds the component for a node by tag-name dispatch.
pub fn build<'a>(node: &'a MjmlNode, cx: &RenderCx) -> BoxedComponent<'a> {
    let component: BoxedComponent<'a> = match node.tag.as_str() {
        "mj-body" => Box::new(Body::new(node, cx)),
        "mj-wrapper" => Box::new(Wrapper::new(node, cx)),
        "mj-section" => Box::new(Section::new(node, cx)),
        "mj-group" => Box::new(Group::new(node, cx)),
        "mj-column" => Box::new(Column::new(node, cx)),
        "mj-text" => Box::new(text::Text::new(node)),
        "mj-button" => Box::new(button::Button::new(node)),
        "mj-image" => Box::new(image::Image::new(node)),
        "mj-divider" => Box::new(divider::Divider::new(node)),
        "mj-spacer" => Box::new(spacer::Spacer::new(node)),
        "mj-social" => Box::new(Social::new(node, cx)),
        "mj-social-element" => Box::new(SocialElement::new(node, None)),
        "mj-navbar" => Box::new(Navbar::new(node, cx)),
        "mj-navbar-link" => Box::new(NavbarLink::new(node)),
        "mj-carousel" => Box::new(Carousel::new(node)),
        "mj-carousel-image" => Box::new(CarouselImage::new(node)),
        "mj-raw" => Box::new(Raw::new(node)),
        "mj-hero" | "mj-accordion" | "mj-accordion-element" | "mj-accordion-title"
        | "mj-accordion-text" | "mj-table" => Box::new(NotImplemented::new(node)),
        "mj-head" | "mj-title" | "mj-font" | "mj-preview" | "mj-style" | "mj-attributes"
        | "mj-all" | "mj-class" | "mj-breakpoint" => Box::new(HeadPlaceholder::new(node)),
        _ => Box::new(NotImplemented::new(node)),
    };
    validate_attributes(&*component, cx);
    component
}

/// Builds components for every element child of `node`.
pub fn build_children<'a>(node: &'a MjmlNode, cx: &RenderCx) -> Vec<BoxedComponent<'a>> {
    node.element_children().map(|child| build(child, cx)).collect()
}

/// Reports node attributes outside the component's allow-list. Never
/// fails the render.
fn validate_attributes(component: &dyn Component<'_>, cx: &RenderCx) {
    let allowed = component.allowed_attributes();
    if allowed.is_empty() {
        return;
    }
    let node = component.base().node;
    for (name, _) in &node.attributes {
        if name.starts_with("data-") || name == "mj-class" || name == "css-class" {
            continue;
        }
        if !allowed.contains(&name.as_str()) {
            cx.report_invalid(&node.tag, name, node.line);
        }
    }
}

/// Per-side spacing attributes commonly shared across the catalog.
pub(crate) const PADDING_ATTRIBUTES: &[&str] = &[
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
];

/// Resolves a spacing shorthand plus its per-side overrides into pixel
/// values for arithmetic.
pub(crate) fn resolved_spacing(
    component: &dyn Component<'_>,
    cx: &RenderCx,
    attribute: &str,
) -> Spacing {
    let mut spacing = Spacing::parse(&component.attr(cx, attribute));
    for (side, slot) in [
        ("top", 0usize),
        ("right", 1),
        ("bottom", 2),
        ("left", 3),
    ] {
        if let Some(value) = component.attr_some(cx, &format!("{attribute}-{side}"))
            && let Some(px) = css::parse_px(&value)
        {
            match slot {
                0 => spacing.top = px,
                1 => spacing.right = px,
                2 => spacing.bottom = px,
                _ => spacing.left = px,
            }
        }
    }
    spacing
}

/// Adds the spacing shorthand and its explicit per-side overrides to a
/// tag's style list, overrides in the order left, right, bottom, top.
pub(crate) fn add_spacing_styles(
    mut tag: Tag,
    component: &dyn Component<'_>,
    cx: &RenderCx,
    attribute: &str,
) -> Tag {
    tag = tag.maybe_style(attribute, component.attr_some(cx, attribute));
    for side in ["left", "right", "bottom", "top"] {
        let name = format!("{attribute}-{side}");
        tag = tag.maybe_style(name.clone(), component.attr_some(cx, &name));
    }
    tag
}

/// Horizontal border width resolved from the shorthand plus explicit
/// per-side overrides.
pub(crate) fn horizontal_border(component: &dyn Component<'_>, cx: &RenderCx) -> f32 {
    let shorthand = css::border_width(&component.attr(cx, "border"));
    let left = component
        .attr_some(cx, "border-left")
        .map(|v| css::border_width(&v))
        .unwrap_or(shorthand);
    let right = component
        .attr_some(cx, "border-right")
        .map(|v| css::border_width(&v))
        .unwrap_or(shorthand);
    left + right
}

/// Sets container width and sibling counts on every child before a
/// parent renders them.
pub(crate) fn assign_layout(children: &mut [BoxedComponent<'_>], width: f32) {
    let siblings = children.len();
    let raw_siblings = children.iter().filter(|c| c.is_raw_element()).count();
    for child in children.iter_mut() {
        let base = child.base_mut();
        base.container_width = Some(width);
        base.siblings = siblings;
        base.raw_siblings = raw_siblings;
    }
}

/// Width facts shared by columns and groups.
pub(crate) struct ColumnWidth {
    /// Responsive CSS class (`mj-column-per-…` / `mj-column-px-…`).
    pub class: String,
    /// CSS width the class stands for (`33.333332%`, `300px`).
    pub css_width: String,
    /// Rounded pixel width used in Outlook MSO cells.
    pub outlook_px: i32,
}

/// Computes the class and widths for a column-like component from its
/// explicit `width` attribute or its non-raw sibling count.
///
/// Percentages are 32-bit floats end to end: three implicit siblings
/// yield `mj-column-per-33-333332`, never the 64-bit tail.
pub(crate) fn column_width(component: &dyn Component<'_>, cx: &RenderCx) -> ColumnWidth {
    let base = component.base();
    let container = base.effective_width();
    match component
        .get_attribute(cx, "width")
        .as_deref()
        .and_then(parse_width)
    {
        Some(Width::Px(px)) => ColumnWidth {
            class: format!("mj-column-px-{}", px as i32),
            css_width: format!("{}px", css::format_f32(px)),
            outlook_px: px.round() as i32,
        },
        Some(Width::Percent(pct)) => ColumnWidth {
            class: format!("mj-column-per-{}", css::class_suffix(pct)),
            css_width: format!("{}%", css::format_f32(pct)),
            outlook_px: (container * pct / 100.0).round() as i32,
        },
        None => {
            let non_raw = base.non_raw_siblings();
            let pct = 100.0_f32 / non_raw as f32;
            ColumnWidth {
                class: format!("mj-column-per-{}", css::class_suffix(pct)),
                css_width: format!("{}%", css::format_f32(pct)),
                outlook_px: (container / non_raw as f32).round() as i32,
            }
        }
    }
}

/// Renders children through the cross-sibling MSO cell chain.
///
/// The first non-raw child opens `open_table` plus its own `<td>` inside
/// one conditional comment; every later one closes the previous cell and
/// opens its own within a single comment; the final comment closes the
/// cell, row and table. Raw children render outside the chain.
pub(crate) fn render_mso_cell_chain(
    children: &mut [BoxedComponent<'_>],
    cx: &RenderCx,
    out: &mut String,
    open_table: &str,
) -> Result<(), RenderError> {
    let mut opened = false;
    for child in children.iter_mut() {
        if child.is_raw_element() {
            child.render(cx, out)?;
            continue;
        }
        let mut fragment = String::new();
        if opened {
            fragment.push_str("</td>");
        } else {
            fragment.push_str(open_table);
        }
        match child.conditional_td(cx) {
            Some(td) => td.open(&mut fragment),
            None => fragment.push_str("<td>"),
        }
        conditional::mso(out, &fragment);
        opened = true;
        child.render(cx, out)?;
    }
    if opened {
        conditional::mso(out, "</td></tr></table>");
    }
    Ok(())
}

/// The standard `<tr><td …>` wrapper a column puts around each non-raw
/// child, with attributes pulled from the child itself.
pub(crate) fn cell_tag(child: &dyn Component<'_>, cx: &RenderCx) -> Tag {
    let css_class = child.attr_some(cx, "css-class");
    let mut td = Tag::new("td")
        .maybe_attr("align", child.attr_some(cx, "align"))
        .maybe_attr("vertical-align", child.attr_some(cx, "vertical-align"))
        .maybe_class(css_class.clone())
        .maybe_style("background", child.attr_some(cx, "container-background-color"))
        .style("font-size", "0px");
    td = add_spacing_styles(td, child, cx, "padding");
    td = td.style("word-break", "break-word");
    apply_inline_styles(td, cx, css_class.as_deref())
}

/// Appends the inline-class declarations registered for any of the
/// space-separated class names to the tag's style list, in collection
/// order.
pub(crate) fn apply_inline_styles(mut tag: Tag, cx: &RenderCx, css_class: Option<&str>) -> Tag {
    let Some(css_class) = css_class else {
        return tag;
    };
    for class in css_class.split_whitespace() {
        for declaration in cx.inline_styles_for(class) {
            if let Some((property, value)) = declaration.split_once(':') {
                tag = tag.style(property.trim(), value.trim());
            }
        }
    }
    tag
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

    fn cx_with_globals(globals: GlobalAttributes) -> RenderCx {
        RenderCx::new(RenderOpts::default(), globals, Vec::new())
    }

    #[test]
    fn element_attribute_beats_every_other_level() {
        let mut globals = GlobalAttributes::default();
        globals.add_tag("mj-text", "color", "#aaaaaa");
        globals.add_all("color", "#bbbbbb");
        globals.add_class("tinted", "color", "#cccccc");
        let root = parse(
            r##"<mjml><mj-body><mj-text mj-class="tinted" color="#123456">x</mj-text></mj-body></mjml>"##,
        )
        .unwrap();
        let node = &root.children[0].children[0];
        let cx = cx_with_globals(globals);
        let component = build(node, &cx);
        assert_eq!(component.attr(&cx, "color"), "#123456");
    }

    #[test]
    fn mj_class_beats_global_store_and_last_class_wins() {
        let mut globals = GlobalAttributes::default();
        globals.add_tag("mj-text", "color", "#aaaaaa");
        globals.add_class("one", "color", "#111111");
        globals.add_class("two", "color", "#222222");
        let root = parse(
            r#"<mjml><mj-body><mj-text mj-class="one two">x</mj-text></mj-body></mjml>"#,
        )
        .unwrap();
        let node = &root.children[0].children[0];
        let cx = cx_with_globals(globals);
        let component = build(node, &cx);
        assert_eq!(component.attr(&cx, "color"), "#222222");
    }

    #[test]
    fn per_tag_beats_blanket_global() {
        let mut globals = GlobalAttributes::default();
        globals.add_tag("mj-text", "color", "#aaaaaa");
        globals.add_all("color", "#bbbbbb");
        let root = parse("<mjml><mj-body><mj-text>x</mj-text></mj-body></mjml>").unwrap();
        let node = &root.children[0].children[0];
        let cx = cx_with_globals(globals);
        let component = build(node, &cx);
        assert_eq!(component.attr(&cx, "color"), "#aaaaaa");
    }

    #[test]
    fn component_default_is_last() {
        let root = parse("<mjml><mj-body><mj-text>x</mj-text></mj-body></mjml>").unwrap();
        let node = &root.children[0].children[0];
        let cx = cx();
        let component = build(node, &cx);
        assert_eq!(component.attr(&cx, "color"), "#000000");
        assert_eq!(component.attr(&cx, "align"), "left");
    }

    #[test]
    fn css_class_accumulates_across_levels() {
        let mut globals = GlobalAttributes::default();
        globals.add_class("pretty", "css-class", "from-class");
        globals.add_tag("mj-text", "css-class", "from-tag");
        let root = parse(
            r#"<mjml><mj-body><mj-text mj-class="pretty" css-class="from-element">x</mj-text></mj-body></mjml>"#,
        )
        .unwrap();
        let node = &root.children[0].children[0];
        let cx = cx_with_globals(globals);
        let component = build(node, &cx);
        assert_eq!(
            component.attr(&cx, "css-class"),
            "from-element from-class from-tag"
        );
    }

    #[test]
    fn font_family_lookup_feeds_the_tracker() {
        let root = parse("<mjml><mj-body><mj-text>x</mj-text></mj-body></mjml>").unwrap();
        let node = &root.children[0].children[0];
        let cx = cx();
        let component = build(node, &cx);
        let _ = component.attr(&cx, "font-family");
        assert_eq!(
            cx.opts().font_tracker.families(),
            vec!["Ubuntu, Helvetica, Arial, sans-serif".to_string()]
        );
    }

    #[test]
    fn unset_and_empty_are_distinguishable() {
        let root = parse("<mjml><mj-body><mj-text>x</mj-text></mj-body></mjml>").unwrap();
        let node = &root.children[0].children[0];
        let cx = cx();
        let component = build(node, &cx);
        assert_eq!(component.get_attribute(&cx, "container-background-color"), None);
        assert_eq!(component.attr(&cx, "container-background-color"), "");
    }

    #[test]
    fn implicit_column_widths_use_f32() {
        for (siblings, expected_class, expected_px) in [
            (1usize, "mj-column-per-100", 600),
            (2, "mj-column-per-50", 300),
            (3, "mj-column-per-33-333332", 200),
            (4, "mj-column-per-25", 150),
            (6, "mj-column-per-16-666666", 100),
        ] {
            let root = parse(
                "<mjml><mj-body><mj-section><mj-column/></mj-section></mj-body></mjml>",
            )
            .unwrap();
            let node = &root.children[0].children[0].children[0];
            let cx = cx();
            let mut component = build(node, &cx);
            {
                let base = component.base_mut();
                base.container_width = Some(600.0);
                base.siblings = siblings;
                base.raw_siblings = 0;
            }
            let width = column_width(&*component, &cx);
            assert_eq!(width.class, expected_class, "siblings = {siblings}");
            assert_eq!(width.outlook_px, expected_px, "siblings = {siblings}");
        }
    }

    #[test]
    fn explicit_pixel_width_yields_px_class() {
        let root = parse(
            r#"<mjml><mj-body><mj-section><mj-column width="300px"/></mj-section></mj-body></mjml>"#,
        )
        .unwrap();
        let node = &root.children[0].children[0].children[0];
        let cx = cx();
        let component = build(node, &cx);
        let width = column_width(&*component, &cx);
        assert_eq!(width.class, "mj-column-px-300");
        assert_eq!(width.css_width, "300px");
        assert_eq!(width.outlook_px, 300);
    }

    #[test]
    fn raw_siblings_do_not_count_toward_widths() {
        let root = parse(
            "<mjml><mj-body><mj-section><mj-column/><mj-raw>x</mj-raw><mj-column/></mj-section></mj-body></mjml>",
        )
        .unwrap();
        let section = &root.children[0].children[0];
        let cx = cx();
        let mut children = build_children(section, &cx);
        assign_layout(&mut children, 600.0);
        let width = column_width(&*children[0], &cx);
        assert_eq!(width.class, "mj-column-per-50");
        assert_eq!(width.outlook_px, 300);
    }

    #[test]
    fn invalid_attributes_are_reported_with_line() {
        use std::sync::{Arc, Mutex};
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let opts = RenderOpts {
            invalid_attribute_reporter: Some(Arc::new(move |report| {
                sink.lock().unwrap().push(report);
            })),
            ..Default::default()
        };
        let cx = RenderCx::new(opts, GlobalAttributes::default(), Vec::new());
        let root = parse(
            "<mjml><mj-body>\n<mj-text bogus-attribute=\"1\">x</mj-text></mj-body></mjml>",
        )
        .unwrap();
        let node = &root.children[0].children[0];
        let _ = build(node, &cx);
        let reports = seen.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].tag, "mj-text");
        assert_eq!(reports[0].attribute, "bogus-attribute");
        assert_eq!(reports[0].line, Some(2));
    }
}

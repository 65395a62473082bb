//! Head synthesis.
//!
//! Runs after the body render: reads the fonts the attribute pipeline
//! actually recorded, the media queries registered by columns, the
//! component-generated style blocks, and the head nodes collected by the
//! driver, and assembles the final `<head>` contents.

use crate::context::RenderCx;
use mailcomb_core::MjmlNode;
use std::fmt::Write;

/// Font families importable from Google Fonts. A tracked `font-family`
/// value triggers an import when it contains one of these names,
/// case-insensitively.
const GOOGLE_FONTS: &[&str] = &["Open Sans", "Droid Sans", "Lato", "Roboto", "Ubuntu"];

/// Client-reset CSS every document starts from.
const BASE_STYLES: &str = "#outlook a { padding:0; }\n\
body { margin:0;padding:0;-webkit-text-size-adjust:100%;-ms-text-size-adjust:100%; }\n\
table, td { border-collapse:collapse;mso-table-lspace:0pt;mso-table-rspace:0pt; }\n\
img { border:0;height:auto;line-height:100%; outline:none;text-decoration:none;-ms-interpolation-mode:bicubic; }\n\
p { display:block;margin:13px 0; }";

/// Outlook rendering hints.
const MSO_SETTINGS: &str = "<!--[if mso]>\n\
<noscript>\n\
<xml>\n\
<o:OfficeDocumentSettings>\n\
<o:AllowPNG/>\n\
<o:PixelsPerInch>96</o:PixelsPerInch>\n\
</o:OfficeDocumentSettings>\n\
</xml>\n\
</noscript>\n\
<![endif]-->";

const LTE_MSO_11_FIX: &str = "<!--[if lte mso 11]>\n\
<style type=\"text/css\">\n\
.mj-outlook-group-fix { width:100% !important; }\n\
</style>\n\
<![endif]-->";

/// Head material gathered from the document's `mj-head` subtree.
#[derive(Debug, Clone, Default)]
pub struct HeadParts {
    /// `mj-title` text.
    pub title: String,
    /// `mj-preview` text, when present.
    pub preview: Option<String>,
    /// `mj-font` registrations: `(name, href)` in document order.
    pub custom_fonts: Vec<(String, String)>,
    /// Non-inline `mj-style` contents in document order.
    pub styles: Vec<String>,
}

/// Walks the head subtree into [`HeadParts`] plus the class rules found
/// in inline `mj-style` blocks (`class name → ordered declarations`).
pub fn collect_head(head: Option<&MjmlNode>) -> (HeadParts, Vec<(String, Vec<String>)>) {
    let mut parts = HeadParts::default();
    let mut inline_class_styles = Vec::new();
    let Some(head) = head else {
        return (parts, inline_class_styles);
    };
    for child in head.element_children() {
        match child.tag.as_str() {
            "mj-title" => parts.title = child.inner_text().trim().to_string(),
            "mj-preview" => parts.preview = Some(child.inner_text().trim().to_string()),
            "mj-font" => {
                if let (Some(name), Some(href)) =
                    (child.attribute("name"), child.attribute("href"))
                {
                    parts
                        .custom_fonts
                        .push((name.to_string(), href.to_string()));
                }
            }
            "mj-style" => {
                let content = child.inner_text().trim().to_string();
                if child.attribute("inline") == Some("inline") {
                    collect_class_rules(&content, &mut inline_class_styles);
                } else {
                    parts.styles.push(content);
                }
            }
            // mj-attributes feeds the global store, handled by the driver.
            _ => {}
        }
    }
    (parts, inline_class_styles)
}

/// Extracts single-class rules (`.name { decls }`) from a style block.
fn collect_class_rules(css: &str, into: &mut Vec<(String, Vec<String>)>) {
    for rule in css.split('}') {
        let Some((selector, body)) = rule.split_once('{') else {
            continue;
        };
        let selector = selector.trim();
        let Some(class) = selector.strip_prefix('.') else {
            continue;
        };
        if class.is_empty() || class.contains([' ', '.', ',', ':', '>']) {
            continue;
        }
        let declarations: Vec<String> = body
            .split(';')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        if !declarations.is_empty() {
            into.push((class.to_string(), declarations));
        }
    }
}

/// Fonts to import: tracked families matched against the custom
/// registrations first, then the Google allowlist.
fn font_imports(cx: &RenderCx, parts: &HeadParts) -> Vec<(String, String)> {
    let tracked = cx.opts().font_tracker.families();
    let mut imports: Vec<(String, String)> = Vec::new();
    let used = |name: &str| {
        tracked
            .iter()
            .any(|family| family.to_lowercase().contains(&name.to_lowercase()))
    };
    for (name, href) in &parts.custom_fonts {
        if used(name) {
            imports.push((name.clone(), href.clone()));
        }
    }
    for name in GOOGLE_FONTS {
        if imports.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)) {
            continue;
        }
        if used(name) {
            let href = format!(
                "https://fonts.googleapis.com/css?family={}:300,400,500,700",
                name.replace(' ', "+")
            );
            imports.push(((*name).to_string(), href));
        }
    }
    imports
}

fn write_fonts(out: &mut String, imports: &[(String, String)]) {
    if imports.is_empty() {
        return;
    }
    out.push_str("<!--[if !mso]><!-->\n");
    for (_, href) in imports {
        let _ = writeln!(
            out,
            "<link href=\"{href}\" rel=\"stylesheet\" type=\"text/css\" />"
        );
    }
    out.push_str("<style type=\"text/css\">\n");
    for (_, href) in imports {
        let _ = writeln!(out, "@import url({href});");
    }
    out.push_str("</style>\n<!--<![endif]-->\n");
}

fn write_media_queries(out: &mut String, cx: &RenderCx) {
    let queries = cx.media_queries();
    if queries.is_empty() {
        return;
    }
    out.push_str("<style type=\"text/css\">\n@media only screen and (min-width:480px) {\n");
    for (class, width) in &queries {
        let _ = writeln!(out, ".{class} {{ width:{width} !important; max-width: {width}; }}");
    }
    out.push_str("}\n</style>\n");
    out.push_str("<style media=\"screen and (min-width:480px)\">\n");
    for (class, width) in &queries {
        let _ = writeln!(
            out,
            ".moz-text-html .{class} {{ width:{width} !important; max-width: {width}; }}"
        );
    }
    out.push_str("</style>\n");
}

/// Assembles the full `<head>` inner HTML.
pub fn build_head(cx: &RenderCx, parts: &HeadParts) -> String {
    let mut out = String::with_capacity(2048);
    let _ = writeln!(out, "<title>{}</title>", parts.title);
    out.push_str(
        "<!--[if !mso]><!--><meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\" /><!--<![endif]-->\n",
    );
    out.push_str("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\" />\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    out.push_str("<meta name=\"format-detection\" content=\"telephone=no\" />\n");
    let _ = writeln!(out, "<style type=\"text/css\">\n{BASE_STYLES}\n</style>");
    out.push_str(MSO_SETTINGS);
    out.push('\n');
    out.push_str(LTE_MSO_11_FIX);
    out.push('\n');
    write_fonts(&mut out, &font_imports(cx, parts));
    write_media_queries(&mut out, cx);
    for style in cx.head_styles() {
        out.push_str(&style);
        out.push('\n');
    }
    for style in &parts.styles {
        let _ = writeln!(out, "<style type=\"text/css\">\n{style}\n</style>");
    }
    out
}

/// The hidden preheater div carrying the inbox preview text.
pub fn preview_div(preview: &str) -> String {
    format!(
        "<div style=\"display:none;font-size:1px;color:#ffffff;line-height:1px;max-height:0px;max-width:0px;opacity:0;overflow:hidden;\">{preview}</div>"
    )
}

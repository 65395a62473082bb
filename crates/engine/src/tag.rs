//! Ordered tag emitter.
//!
//! Attributes, classes and style declarations are held in insertion
//! order and emitted exactly as inserted; re-adding an attribute or
//! style property updates the existing entry in place, classes may
//! repeat. Ordering is a visible part of the output contract, so the
//! builder never sorts or dedupes on its own.

use html_escape::encode_double_quoted_attribute;
use std::fmt::Write;

/// A single HTML tag under construction.
#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
}

impl Tag {
    /// Starts a tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Adds an attribute; a re-add updates the value in place.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Adds an attribute when `value` is `Some`.
    pub fn maybe_attr(self, name: impl Into<String>, value: Option<String>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Appends a class (duplicates permitted, order preserved).
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Appends a class when `value` is `Some`.
    pub fn maybe_class(self, class: Option<String>) -> Self {
        match class {
            Some(class) => self.class(class),
            None => self,
        }
    }

    /// Adds a style declaration; a re-add updates the value in place.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();
        match self.styles.iter_mut().find(|(p, _)| *p == property) {
            Some((_, existing)) => *existing = value,
            None => self.styles.push((property, value)),
        }
        self
    }

    /// Adds a style declaration when `value` is `Some`.
    pub fn maybe_style(self, property: impl Into<String>, value: Option<String>) -> Self {
        match value {
            Some(value) => self.style(property, value),
            None => self,
        }
    }

    /// True when at least one style declaration is registered.
    pub fn has_styles(&self) -> bool {
        !self.styles.is_empty()
    }

    /// The `prop:value;…` form of the registered declarations.
    pub fn styles_string(&self) -> String {
        let mut out = String::new();
        for (property, value) in &self.styles {
            let _ = write!(out, "{property}:{value};");
        }
        out
    }

    fn write_head(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&encode_double_quoted_attribute(value));
            out.push('"');
        }
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&encode_double_quoted_attribute(&self.classes.join(" ")));
            out.push('"');
        }
        if !self.styles.is_empty() {
            out.push_str(" style=\"");
            out.push_str(&encode_double_quoted_attribute(&self.styles_string()));
            out.push('"');
        }
    }

    /// Writes the opening form `<tag …>`.
    pub fn open(&self, out: &mut String) {
        self.write_head(out);
        out.push('>');
    }

    /// Writes the XHTML self-closing form `<tag … />`.
    pub fn void(&self, out: &mut String) {
        self.write_head(out);
        out.push_str(" />");
    }

    /// Writes the closing form `</tag>`.
    pub fn close(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    /// Renders opening tag, inner content, closing tag into a string.
    pub fn render(&self, inner: &str) -> String {
        let mut out = String::new();
        self.open(&mut out);
        out.push_str(inner);
        self.close(&mut out);
        out
    }
}

//! Global attribute store.
//!
//! Built once per render from the document's `mj-attributes` head block:
//! a blanket `mj-all` bundle, per-tag defaults, and named `mj-class`
//! bundles referenced from components via their `mj-class` attribute.
//! Lookup structures are ordered lists with linear scans; document order
//! is part of the observable contract.

use mailcomb_core::MjmlNode;

type Bundle = Vec<(String, String)>;

/// Per-document attribute defaults collected from `mj-attributes`.
#[derive(Debug, Clone, Default)]
pub struct GlobalAttributes {
    all: Bundle,
    per_tag: Vec<(String, Bundle)>,
    classes: Vec<(String, Bundle)>,
}

impl GlobalAttributes {
    /// Builds the store from an `mj-attributes` element, if present.
    pub fn from_head(head: Option<&MjmlNode>) -> Self {
        let mut store = Self::default();
        let Some(attributes) = head.and_then(|h| h.child("mj-attributes")) else {
            return store;
        };
        for child in attributes.element_children() {
            match child.tag.as_str() {
                "mj-all" => {
                    for (name, value) in &child.attributes {
                        store.add_all(name, value);
                    }
                }
                "mj-class" => {
                    let Some(class_name) = child.attribute("name") else {
                        log::warn!("mj-class without a name attribute, ignored");
                        continue;
                    };
                    let class_name = class_name.to_string();
                    for (name, value) in &child.attributes {
                        if name != "name" {
                            store.add_class(&class_name, name, value);
                        }
                    }
                }
                tag => {
                    for (name, value) in &child.attributes {
                        store.add_tag(tag, name, value);
                    }
                }
            }
        }
        store
    }

    /// Adds a blanket default.
    pub fn add_all(&mut self, name: &str, value: &str) {
        upsert(&mut self.all, name, value);
    }

    /// Adds a per-tag default.
    pub fn add_tag(&mut self, tag: &str, name: &str, value: &str) {
        let bundle = match self.per_tag.iter_mut().find(|(t, _)| t == tag) {
            Some((_, bundle)) => bundle,
            None => {
                self.per_tag.push((tag.to_string(), Vec::new()));
                &mut self.per_tag.last_mut().expect("just pushed").1
            }
        };
        upsert(bundle, name, value);
    }

    /// Adds an attribute to a named class bundle. The reserved key
    /// `css-class` accumulates (space-joined) rather than overwriting.
    pub fn add_class(&mut self, class: &str, name: &str, value: &str) {
        let bundle = match self.classes.iter_mut().find(|(c, _)| c == class) {
            Some((_, bundle)) => bundle,
            None => {
                self.classes.push((class.to_string(), Vec::new()));
                &mut self.classes.last_mut().expect("just pushed").1
            }
        };
        if name == "css-class" {
            if let Some((_, existing)) = bundle.iter_mut().find(|(n, _)| n == "css-class") {
                existing.push(' ');
                existing.push_str(value);
                return;
            }
        }
        upsert(bundle, name, value);
    }

    /// Blanket default for `name`, if any.
    pub fn get_all(&self, name: &str) -> Option<&str> {
        lookup(&self.all, name)
    }

    /// Per-tag default for `name` on `tag`, if any.
    pub fn get_tag(&self, tag: &str, name: &str) -> Option<&str> {
        self.per_tag
            .iter()
            .find(|(t, _)| t == tag)
            .and_then(|(_, bundle)| lookup(bundle, name))
    }

    /// The ordered contents of a class bundle, if the class is defined.
    pub fn class_bundle(&self, class: &str) -> Option<&[(String, String)]> {
        self.classes
            .iter()
            .find(|(c, _)| c == class)
            .map(|(_, bundle)| bundle.as_slice())
    }
}

fn upsert(bundle: &mut Bundle, name: &str, value: &str) {
    match bundle.iter_mut().find(|(n, _)| n == name) {
        Some((_, existing)) => *existing = value.to_string(),
        None => bundle.push((name.to_string(), value.to_string())),
    }
}

fn lookup<'a>(bundle: &'a Bundle, name: &str) -> Option<&'a str> {
    bundle
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcomb_core::parse;

    fn store_from(head_xml: &str) -> GlobalAttributes {
        let source = format!("<mjml><mj-head>{head_xml}</mj-head><mj-body/></mjml>");
        let root = parse(&source).unwrap();
        let head = root.child("mj-head").map(|h| h.clone());
        GlobalAttributes::from_head(head.as_ref())
    }

    #[test]
    fn collects_all_tag_and_class_bundles() {
        let store = store_from(
            r##"<mj-attributes>
                 <mj-all color="#222222"/>
                 <mj-text font-size="15px"/>
                 <mj-class name="blue" color="#0000ff"/>
               </mj-attributes>"##,
        );
        assert_eq!(store.get_all("color"), Some("#222222"));
        assert_eq!(store.get_tag("mj-text", "font-size"), Some("15px"));
        let bundle = store.class_bundle("blue").unwrap();
        assert_eq!(bundle, &[("color".to_string(), "#0000ff".to_string())]);
    }

    #[test]
    fn missing_head_yields_empty_store() {
        let store = GlobalAttributes::from_head(None);
        assert_eq!(store.get_all("color"), None);
        assert!(store.class_bundle("blue").is_none());
    }

    #[test]
    fn later_definitions_overwrite() {
        let mut store = GlobalAttributes::default();
        store.add_tag("mj-text", "color", "#111111");
        store.add_tag("mj-text", "color", "#222222");
        assert_eq!(store.get_tag("mj-text", "color"), Some("#222222"));
    }

    #[test]
    fn css_class_accumulates_in_class_bundles() {
        let mut store = GlobalAttributes::default();
        store.add_class("fancy", "css-class", "one");
        store.add_class("fancy", "css-class", "two");
        let bundle = store.class_bundle("fancy").unwrap();
        assert_eq!(bundle, &[("css-class".to_string(), "one two".to_string())]);
    }
}

//! Render context.
//!
//! One [`RenderCx`] exists per render call. The shared part (options,
//! global attribute store, font tracking, collected head material, id
//! generators) sits behind an `Arc`; the context itself is a cheap clone
//! carrying the subtree flags, so a wrapper can hand its children an
//! `inside_wrapper` view without touching anyone else's.

use crate::global::GlobalAttributes;
use crate::ids::IdGenerators;
use crate::options::{AttributeReport, RenderOpts};
use std::sync::{Arc, Mutex};

struct SharedCx {
    opts: RenderOpts,
    globals: GlobalAttributes,
    inline_class_styles: Vec<(String, Vec<String>)>,
    media_queries: Mutex<Vec<(String, String)>>,
    head_styles: Mutex<Vec<String>>,
    ids: IdGenerators,
}

/// Context handed to every component render.
#[derive(Clone)]
pub struct RenderCx {
    shared: Arc<SharedCx>,
    /// Set for subtrees below an `mj-wrapper`.
    pub inside_wrapper: bool,
    /// Set for subtrees below an `mj-hero`.
    pub inside_hero: bool,
    /// Set for columns directly below an `mj-group`.
    pub inside_group: bool,
}

impl RenderCx {
    /// Creates the context for one render call.
    ///
    /// `collected_inline_styles` are the class rules found in the
    /// document's own inline `mj-style` blocks; they are consulted after
    /// the ones supplied through the options.
    pub fn new(
        opts: RenderOpts,
        globals: GlobalAttributes,
        collected_inline_styles: Vec<(String, Vec<String>)>,
    ) -> Self {
        let inside_wrapper = opts.inside_wrapper;
        let inside_hero = opts.inside_hero;
        let mut inline_class_styles = opts.inline_class_styles.clone();
        inline_class_styles.extend(collected_inline_styles);
        let ids = IdGenerators::new();
        if opts.test_ids {
            ids.enable_test_ids();
        }
        Self {
            shared: Arc::new(SharedCx {
                opts,
                globals,
                inline_class_styles,
                media_queries: Mutex::new(Vec::new()),
                head_styles: Mutex::new(Vec::new()),
                ids,
            }),
            inside_wrapper,
            inside_hero,
            inside_group: false,
        }
    }

    /// The render options.
    pub fn opts(&self) -> &RenderOpts {
        &self.shared.opts
    }

    /// The per-document global attribute store.
    pub fn globals(&self) -> &GlobalAttributes {
        &self.shared.globals
    }

    /// Records a resolved `font-family` value on the shared tracker.
    pub fn track_font(&self, family: &str) {
        self.shared.opts.font_tracker.record(family);
    }

    /// Registers the responsive media query for a column class. The first
    /// registration wins; re-registration of the same class is a no-op so
    /// emission order follows first use.
    pub fn register_media_query(&self, class: &str, width_css: &str) {
        let mut queries = self
            .shared
            .media_queries
            .lock()
            .expect("media queries poisoned");
        if !queries.iter().any(|(c, _)| c == class) {
            queries.push((class.to_string(), width_css.to_string()));
        }
    }

    /// The registered media queries in first-use order.
    pub fn media_queries(&self) -> Vec<(String, String)> {
        self.shared
            .media_queries
            .lock()
            .expect("media queries poisoned")
            .clone()
    }

    /// Adds a component-generated head style block (carousel, navbar).
    pub fn add_head_style(&self, css: String) {
        self.shared
            .head_styles
            .lock()
            .expect("head styles poisoned")
            .push(css);
    }

    /// Component head styles in emission order.
    pub fn head_styles(&self) -> Vec<String> {
        self.shared
            .head_styles
            .lock()
            .expect("head styles poisoned")
            .clone()
    }

    /// Ordered inline CSS declarations registered for a class name.
    pub fn inline_styles_for(&self, class: &str) -> Vec<String> {
        self.shared
            .inline_class_styles
            .iter()
            .filter(|(c, _)| c == class)
            .flat_map(|(_, decls)| decls.iter().cloned())
            .collect()
    }

    /// Next deterministic carousel id.
    pub fn next_carousel_id(&self) -> String {
        self.shared.ids.next_carousel_id()
    }

    /// Next deterministic navbar id.
    pub fn next_navbar_id(&self) -> String {
        self.shared.ids.next_navbar_id()
    }

    /// Delivers an invalid-attribute report, if a reporter is configured.
    pub fn report_invalid(&self, tag: &str, attribute: &str, line: Option<usize>) {
        log::debug!("invalid attribute \"{attribute}\" on <{tag}>");
        if let Some(reporter) = &self.shared.opts.invalid_attribute_reporter {
            reporter(AttributeReport {
                tag: tag.to_string(),
                attribute: attribute.to_string(),
                line,
            });
        }
    }

    /// A view of this context for a wrapper's children.
    pub fn enter_wrapper(&self) -> Self {
        let mut cx = self.clone();
        cx.inside_wrapper = true;
        cx
    }

    /// A view of this context for a group's columns.
    pub fn enter_group(&self) -> Self {
        let mut cx = self.clone();
        cx.inside_group = true;
        cx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cx() -> RenderCx {
        RenderCx::new(RenderOpts::default(), GlobalAttributes::default(), Vec::new())
    }

    #[test]
    fn media_queries_keep_first_use_order_and_dedupe() {
        let cx = cx();
        cx.register_media_query("mj-column-per-50", "50%");
        cx.register_media_query("mj-column-per-100", "100%");
        cx.register_media_query("mj-column-per-50", "50%");
        assert_eq!(
            cx.media_queries(),
            vec![
                ("mj-column-per-50".to_string(), "50%".to_string()),
                ("mj-column-per-100".to_string(), "100%".to_string()),
            ]
        );
    }

    #[test]
    fn wrapper_view_only_affects_the_clone() {
        let cx = cx();
        let inner = cx.enter_wrapper();
        assert!(inner.inside_wrapper);
        assert!(!cx.inside_wrapper);
    }

    #[test]
    fn inline_styles_merge_options_and_collected() {
        let opts = RenderOpts {
            inline_class_styles: vec![("blue".to_string(), vec!["color:blue".to_string()])],
            ..Default::default()
        };
        let cx = RenderCx::new(
            opts,
            GlobalAttributes::default(),
            vec![("blue".to_string(), vec!["font-weight:bold".to_string()])],
        );
        assert_eq!(
            cx.inline_styles_for("blue"),
            vec!["color:blue".to_string(), "font-weight:bold".to_string()]
        );
    }

    #[test]
    fn test_ids_option_pins_the_generators() {
        let opts = RenderOpts {
            test_ids: true,
            ..Default::default()
        };
        let cx = RenderCx::new(opts, GlobalAttributes::default(), Vec::new());
        assert_eq!(cx.next_carousel_id(), "f01ab44896143632");
        assert_eq!(cx.next_navbar_id(), "00000000");
    }
}

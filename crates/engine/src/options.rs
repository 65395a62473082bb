//! Render options and their cross-cutting collaborators.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Mutex};

/// An invalid attribute observed on a known tag.
///
/// Reports are a side channel: they never fail the render and are
/// delivered through the reporter callback as they are found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeReport {
    /// Tag the attribute appeared on.
    pub tag: String,
    /// The offending attribute name.
    pub attribute: String,
    /// 1-indexed source line of the element, if the parser recorded one.
    pub line: Option<usize>,
}

/// Callback receiving invalid-attribute reports.
pub type InvalidAttributeReporter = Arc<dyn Fn(AttributeReport) + Send + Sync>;

/// Concurrency-safe set of font families requested during a render.
///
/// Attribute resolution records every non-empty `font-family` value here;
/// the head builder reads it back once the body render is complete. The
/// tracker is shared behind a mutex because a driver may fan subtree
/// renders out to worker tasks while keeping one tracker instance.
#[derive(Clone, Default)]
pub struct FontTracker {
    inner: Arc<Mutex<BTreeSet<String>>>,
}

impl FontTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a resolved `font-family` value.
    pub fn record(&self, family: &str) {
        if family.is_empty() {
            return;
        }
        self.inner
            .lock()
            .expect("font tracker poisoned")
            .insert(family.to_string());
    }

    /// Returns the recorded families in sorted order.
    pub fn families(&self) -> Vec<String> {
        self.inner
            .lock()
            .expect("font tracker poisoned")
            .iter()
            .cloned()
            .collect()
    }

    /// Returns true when no font has been recorded.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().expect("font tracker poisoned").is_empty()
    }
}

impl fmt::Debug for FontTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontTracker").field(&self.families()).finish()
    }
}

/// Options for one render call.
///
/// The recognized set is exactly `{debug_tags, inside_wrapper,
/// inside_hero, font_tracker, inline_class_styles,
/// invalid_attribute_reporter, lang, test_ids}`; there are no implicit
/// options. `inside_wrapper`/`inside_hero` seed the context flags and are
/// normally left false — the wrapper and hero components flip them for
/// their own subtrees. `test_ids` pins the carousel/navbar id generators
/// to their documented deterministic sequences; enabling it is one-way
/// for the life of the render context.
#[derive(Clone, Default)]
pub struct RenderOpts {
    /// Emit `data-mj-debug-*` attributes on structural tags.
    pub debug_tags: bool,
    /// Initial inside-wrapper flag for the render context.
    pub inside_wrapper: bool,
    /// Initial inside-hero flag for the render context.
    pub inside_hero: bool,
    /// Fonts requested during rendering; read by the head builder.
    pub font_tracker: FontTracker,
    /// `class name → ordered CSS declarations` collected from inline
    /// style blocks, merged with the ones found in the document head.
    pub inline_class_styles: Vec<(String, Vec<String>)>,
    /// Callback for invalid-attribute reports.
    pub invalid_attribute_reporter: Option<InvalidAttributeReporter>,
    /// `lang` attribute for the body wrapper div.
    pub lang: Option<String>,
    /// Use deterministic carousel/navbar ids (test mode, one-way).
    pub test_ids: bool,
}

impl fmt::Debug for RenderOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOpts")
            .field("debug_tags", &self.debug_tags)
            .field("inside_wrapper", &self.inside_wrapper)
            .field("inside_hero", &self.inside_hero)
            .field("font_tracker", &self.font_tracker)
            .field("inline_class_styles", &self.inline_class_styles)
            .field(
                "invalid_attribute_reporter",
                &self.invalid_attribute_reporter.as_ref().map(|_| "<fn>"),
            )
            .field("lang", &self.lang)
            .field("test_ids", &self.test_ids)
            .finish()
    }
}

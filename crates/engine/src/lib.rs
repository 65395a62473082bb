#![deny(missing_docs)]
//! mailcomb rendering engine: compiles the MJML component tree into
//! responsive, email-client-compatible HTML.
//!
//! The engine is a single depth-first pass over a typed component tree:
//! attribute resolution feeds an ordered tag emitter, layout widths
//! propagate parent to child, Outlook gets conditional-comment
//! fallbacks, and the head is synthesized last from what the body
//! actually used.

/// Component registry and the component catalog.
pub mod component;
/// MSO/IE conditional comment helpers.
pub mod conditional;
/// Per-render context.
pub mod context;
/// Shared CSS value primitives.
pub mod css;
/// Document driver.
pub mod document;
/// Render error types.
pub mod error;
/// Global attribute store.
pub mod global;
/// Head synthesis.
pub mod head;
/// Carousel/navbar id generators.
pub mod ids;
/// Render options and collaborators.
pub mod options;
/// Ordered tag emitter.
pub mod tag;

pub use component::{BODY_WIDTH, BaseState, BoxedComponent, Component, build};
pub use context::RenderCx;
pub use document::{render, render_tree};
pub use error::RenderError;
pub use global::GlobalAttributes;
pub use options::{AttributeReport, FontTracker, InvalidAttributeReporter, RenderOpts};
pub use tag::Tag;

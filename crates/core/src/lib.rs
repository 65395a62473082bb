#![deny(missing_docs)]
//! mailcomb core: the MJML document tree, the XML parsing stage, and the
//! fingerprinted AST cache consumed by the rendering engine.

/// Fingerprinted, TTL-bounded AST cache.
pub mod cache;
/// Core error types.
pub mod error;
/// MJML document tree types and inner-HTML reconstruction.
pub mod node;
/// XML parsing stage producing [`node::MjmlNode`] trees.
pub mod parser;

pub use cache::{AstCache, fingerprint, global_cache};
pub use error::ParseError;
pub use node::{MjmlNode, is_void_tag, normalize_void_tags};
pub use parser::parse;

use thiserror::Error;

/// Errors raised while rendering a document.
///
/// The first unrecoverable error aborts the render; invalid attributes on
/// known tags are *not* errors, they travel through the reporter channel
/// configured on [`crate::options::RenderOpts`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// The parsing stage rejected the source.
    #[error(transparent)]
    Parse(#[from] mailcomb_core::ParseError),
    /// A component exists in the catalog but has no body renderer.
    #[error("component <{0}> is not implemented")]
    Unimplemented(String),
    /// A component is missing an attribute it cannot render without.
    #[error("<{tag}> requires a \"{attribute}\" attribute")]
    MissingAttribute {
        /// Component tag.
        tag: String,
        /// Missing attribute name.
        attribute: String,
    },
    /// The document has no `mj-body` element.
    #[error("document has no <mj-body> element")]
    MissingBody,
    /// The output sink rejected a write.
    #[error("write error: {0}")]
    Write(#[from] std::fmt::Error),
}

impl RenderError {
    /// Convenience constructor for [`RenderError::MissingAttribute`].
    pub fn missing_attribute(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            tag: tag.into(),
            attribute: attribute.into(),
        }
    }
}

use thiserror::Error;

/// Errors raised by the MJML parsing stage.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying XML reader rejected the document.
    #[error("XML error at line {line}: {message}")]
    Xml {
        /// Reader error message.
        message: String,
        /// 1-indexed source line of the failure.
        line: usize,
    },
    /// The document root is not `<mjml>`.
    #[error("unexpected root element <{0}>, expected <mjml>")]
    UnexpectedRoot(String),
    /// The document ended before the root element was closed.
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),
    /// The document contains no element at all.
    #[error("document contains no root element")]
    Empty,
}

impl ParseError {
    /// Wrap a reader error with the line it occurred on.
    pub fn xml(message: impl Into<String>, line: usize) -> Self {
        Self::Xml {
            message: message.into(),
            line,
        }
    }
}

//! Error type shared by every term, literal and graph operation.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RdfError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfError {
    /// A URI without a scheme, with illegal characters, or a qualified name
    /// whose prefix is not registered.
    #[error("malformed URI '{uri}': {reason}")]
    MalformedUri { uri: String, reason: String },

    /// A lexical form rejected by a purely structural check (string family
    /// shapes, language tags, binary encodings).
    #[error("'{value}' is not a valid lexical form for {datatype}")]
    InvalidLexicalForm { value: String, datatype: String },

    /// Numeric, decimal, date or duration text that could not be parsed or
    /// falls outside the range of the requested datatype.
    #[error("cannot parse '{value}' as {datatype}: {reason}")]
    MalformedLiteral {
        value: String,
        datatype: String,
        reason: String,
    },

    /// Raised by format parsers layered on top of the graph.
    #[error("cannot construct a {format} parser: {reason}")]
    Parser { format: String, reason: String },

    /// Raised by format parsers when a document cannot be fetched.
    #[error("cannot retrieve document from {locator}")]
    Retrieval { locator: String },
}

impl RdfError {
    pub fn malformed_uri(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        RdfError::MalformedUri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_lexical(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        RdfError::InvalidLexicalForm {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    pub fn malformed_literal(
        value: impl Into<String>,
        datatype: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RdfError::MalformedLiteral {
            value: value.into(),
            datatype: datatype.into(),
            reason: reason.into(),
        }
    }

    /// The offending input carried by this error, if any.
    pub fn input(&self) -> Option<&str> {
        match self {
            RdfError::MalformedUri { uri, .. } => Some(uri),
            RdfError::InvalidLexicalForm { value, .. } => Some(value),
            RdfError::MalformedLiteral { value, .. } => Some(value),
            RdfError::Parser { .. } => None,
            RdfError::Retrieval { locator } => Some(locator),
        }
    }

    /// True for the structural "no value" outcome rather than a parse failure.
    pub fn is_structural(&self) -> bool {
        matches!(self, RdfError::InvalidLexicalForm { .. })
    }
}

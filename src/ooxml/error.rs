/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// Bytes or markup that cannot be interpreted, e.g. an unknown image format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Slide layout index outside the built-in set
    #[error("Slide layout not found: index {0}")]
    LayoutNotFound(usize),

    /// No placeholder with this idx on the slide
    #[error("Placeholder not found: idx {0}")]
    PlaceholderNotFound(u32),

    /// Text operation on a shape that has no text frame
    #[error("Shape '{0}' has no text frame")]
    NoTextFrame(String),

    /// The slide layout has no title placeholder
    #[error("Slide has no title placeholder")]
    MissingTitle,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for OoxmlError {
    fn from(err: std::str::Utf8Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<std::fmt::Error> for OoxmlError {
    fn from(err: std::fmt::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

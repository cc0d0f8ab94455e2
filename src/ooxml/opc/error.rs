//! Errors raised while reading or writing an OPC package.
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    /// The file does not exist or is not a ZIP archive
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// A part name without a leading slash, or a broken relative reference
    #[error("Invalid part name: {0}")]
    InvalidPackUri(String),

    #[error("No part named {0} in package")]
    PartNotFound(String),

    /// Lookup by rId or by relationship type found nothing
    #[error("No relationship {0}")]
    RelationshipNotFound(String),

    #[error("[Content_Types].xml has no entry for {0}")]
    ContentTypeNotFound(String),

    #[error("Malformed relationship: {0}")]
    InvalidRelationship(String),

    #[error("Malformed XML: {0}")]
    XmlError(String),

    #[error(transparent)]
    ZipError(#[from] zip::result::ZipError),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    QuickXmlError(#[from] quick_xml::Error),

    #[error("Part is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    #[error("Malformed attribute: {0}")]
    AttrError(String),
}

impl From<AttrError> for OpcError {
    fn from(err: AttrError) -> Self {
        OpcError::AttrError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;

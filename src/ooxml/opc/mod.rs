/// Open Packaging Conventions (OPC) implementation.
///
/// A .pptx file is a ZIP archive of parts tied together by relationships.
/// This module covers the parts of the OPC specification a presentation needs:
///
/// - Package structure (parts, relationships)
/// - Content type management
/// - ZIP-based physical packaging, both directions
///
/// Parts are kept in name order so that a package always serializes the same
/// way for the same content.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};

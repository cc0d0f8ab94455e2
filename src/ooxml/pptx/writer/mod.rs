//! Mutable presentation writer components for PPTX.

mod package;
pub mod pres;
pub(crate) mod relmap;
pub mod shape;
pub mod slide;
pub mod text;

// Re-export main types
pub use pres::{CoreProperties, MutablePresentation};
pub use shape::MutableShape;
pub use slide::MutableSlide;
pub use text::{Paragraph, TextFrame};

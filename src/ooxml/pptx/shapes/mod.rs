/// Shapes read from the slides of an existing presentation.
///
/// Only top-level shapes of the shape tree are listed; the children of a
/// group shape are not.
pub mod base;
pub mod textframe;

pub use base::{Shape, ShapeType};
pub use textframe::{Paragraph, TextFrame};

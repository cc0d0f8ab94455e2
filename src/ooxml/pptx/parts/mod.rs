/// Typed views over the PresentationML parts of an opened package.
pub mod presentation;
pub mod slide;

pub use presentation::PresentationPart;
pub use slide::SlidePart;

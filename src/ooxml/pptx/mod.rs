//! PowerPoint (.pptx) presentation support.
//!
//! Writing goes through [`MutablePresentation`]: every presentation carries
//! one slide master with the seven built-in layouts, and slides start with the
//! placeholders of their layout. Reading goes through [`Package`], which lists
//! the slides of an existing file with their shapes and text.
//!
//! ```rust,no_run
//! use deckweave::ooxml::pptx::{MutablePresentation, Package, SlideLayout};
//!
//! let mut pres = MutablePresentation::new();
//! let slide = pres.add_slide(SlideLayout::TitleSlide);
//! slide.title_mut()?.set_text("Quarterly review")?;
//! pres.save("review.pptx")?;
//!
//! let pkg = Package::open("review.pptx")?;
//! for slide in pkg.presentation()?.slides()? {
//!     println!("{}", slide.text()?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backgrounds;
pub mod format;
pub mod layout;
pub mod package;
pub mod parts;
pub mod presentation;
pub mod shapes;
pub mod slide;
pub(crate) mod template;
pub mod writer;

pub use backgrounds::SlideBackground;
pub use format::{Font, ImageFormat};
pub use layout::{PlaceholderDef, PlaceholderKind, SlideLayout};
pub use package::Package;
pub use presentation::Presentation;
pub use shapes::{Shape, ShapeType};
pub use slide::Slide;
pub use writer::{CoreProperties, MutablePresentation, MutableShape, MutableSlide};

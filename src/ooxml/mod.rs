//! Office Open XML (OOXML) presentation support.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **PresentationML** (`pptx`): the presentation writer and reader built on it
//!
//! # Example: Writing and reading a presentation
//!
//! ```rust,no_run
//! use deckweave::ooxml::pptx::{MutablePresentation, Package, SlideLayout};
//!
//! let mut pres = MutablePresentation::new();
//! pres.add_slide(SlideLayout::TitleOnly).title_mut()?.set_text("Summary")?;
//! pres.save("summary.pptx")?;
//!
//! let pkg = Package::open("summary.pptx")?;
//! println!("{} slides", pkg.presentation()?.slide_count()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

pub use error::{OoxmlError, Result};

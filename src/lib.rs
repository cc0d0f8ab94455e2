//! Deckweave - styled PowerPoint deck generation
//!
//! This library builds .pptx presentations from a deck description and reads
//! them back for verification. It carries its own small Office Open XML stack:
//!
//! - **OPC layer**: ZIP packaging, parts, relationships and content types
//! - **PresentationML writer**: slides from the seven built-in layouts,
//!   placeholders, text boxes, rectangles, pictures, fonts and backgrounds
//! - **PresentationML reader**: slides, shapes, text and run fonts
//! - **Styling helpers**: title and content fonts, slide backgrounds and the
//!   blue underline bar drawn beneath a title
//! - **Deck pipeline**: the five-slide research deck, YAML deck descriptions
//!   and the text inspector
//!
//! # Example - Generating the research deck
//!
//! ```no_run
//! use deckweave::deck::{self, DeckSpec, GenerateOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = GenerateOptions {
//!     skip_missing_images: true,
//!     ..GenerateOptions::default()
//! };
//! let (path, summary) = deck::generate(&DeckSpec::research_default(), &options)?;
//! println!("{} slides written to {}", summary.slide_count(), path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Styling a slide by hand
//!
//! ```no_run
//! use deckweave::common::RGBColor;
//! use deckweave::ooxml::pptx::{MutablePresentation, SlideLayout};
//! use deckweave::styling::{add_blue_underline, set_content_font, set_title_font};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pres = MutablePresentation::new();
//! let slide = pres.add_slide(SlideLayout::TitleAndContent);
//!
//! let title = slide.title_mut()?;
//! title.set_text("Findings")?;
//! set_title_font(title, 28.0, true, RGBColor::new(0, 51, 102), None)?;
//!
//! let body = slide.placeholder_mut(1)?;
//! body.set_text("First finding\nSecond finding")?;
//! set_content_font(body, 20.0, false, RGBColor::new(0x33, 0x33, 0x33), Some("Meiryo"))?;
//!
//! let title_geometry = slide.title()?.geometry();
//! add_blue_underline(slide, title_geometry);
//!
//! pres.save("findings.pptx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Listing the text of a deck
//!
//! ```no_run
//! use deckweave::deck::inspect;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! for texts in inspect::collect_text("research_presentation.pptx")? {
//!     for text in texts {
//!         println!("{}", text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Common types shared across the crate
pub mod common;

/// The deck pipeline and inspector
pub mod deck;

/// OOXML packaging, writer and reader
pub mod ooxml;

/// Slide-styling helpers
pub mod styling;

pub use common::{Geometry, RGBColor};
pub use deck::{DeckError, DeckSpec, DeckSummary, GenerateOptions};
pub use ooxml::pptx::{MutablePresentation, Package, SlideLayout};

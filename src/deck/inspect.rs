//! Re-read a saved deck and report its text.

use super::{DeckSummary, Result, SlideSummary};
use crate::ooxml::pptx::{Package, ShapeType};
use std::path::Path;

/// Text of every shape that can carry text, slide by slide.
///
/// Every `p:sp` is listed, including auto shapes with an empty text body;
/// pictures and graphic frames are not.
pub fn collect_text<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let pkg = Package::open(path)?;
    let pres = pkg.presentation()?;

    let mut slides = Vec::new();
    for slide in pres.slides()? {
        let texts = slide
            .shapes()?
            .iter()
            .filter(|shape| shape.shape_type() == ShapeType::Shape)
            .map(|shape| shape.text())
            .collect();
        slides.push(texts);
    }
    Ok(slides)
}

/// Slide count, titles and shape counts of a saved deck.
pub fn summarize<P: AsRef<Path>>(path: P) -> Result<DeckSummary> {
    let pkg = Package::open(path)?;
    let pres = pkg.presentation()?;

    let mut summary = DeckSummary::default();
    for slide in pres.slides()? {
        summary.slides.push(SlideSummary {
            title: slide.title()?,
            shape_count: slide.shapes()?.len(),
        });
    }
    Ok(summary)
}

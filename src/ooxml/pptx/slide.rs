/// Slides of an opened presentation.
use crate::common::RGBColor;
use crate::ooxml::error::Result;
use crate::ooxml::pptx::parts::SlidePart;
use crate::ooxml::pptx::shapes::Shape;

/// A slide in a presentation.
///
/// Provides access to slide content and properties.
pub struct Slide<'a> {
    /// The underlying slide part
    part: SlidePart<'a>,
}

impl<'a> Slide<'a> {
    #[inline]
    pub(crate) fn new(part: SlidePart<'a>) -> Self {
        Self { part }
    }

    /// Partname of the slide, e.g. "/ppt/slides/slide1.xml".
    pub fn partname(&self) -> &str {
        self.part.part().partname().as_str()
    }

    /// Top-level shapes in document order.
    pub fn shapes(&self) -> Result<Vec<Shape>> {
        self.part.shapes()
    }

    /// Solid background color, if the slide overrides the master background.
    pub fn background_color(&self) -> Result<Option<RGBColor>> {
        Ok(self.part.background()?.map(|bg| bg.color()))
    }

    /// Text of the title placeholder.
    pub fn title(&self) -> Result<Option<String>> {
        Ok(self
            .shapes()?
            .into_iter()
            .find(|s| s.placeholder_kind().is_some_and(|k| k.is_title()))
            .map(|s| s.text()))
    }

    /// Text of every shape that has a text frame, one shape per line.
    pub fn text(&self) -> Result<String> {
        let texts: Vec<String> = self
            .shapes()?
            .iter()
            .filter(|s| s.has_text_frame())
            .map(Shape::text)
            .collect();
        Ok(texts.join("\n"))
    }
}

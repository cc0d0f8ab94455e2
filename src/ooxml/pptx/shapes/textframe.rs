/// Text frames read back from slide XML.
use crate::ooxml::pptx::format::Font;

/// A paragraph of a text frame: its text and the font of its first run.
///
/// Line breaks (`<a:br>`) inside the paragraph read back as `\n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub(crate) text: String,
    pub(crate) font: Font,
}

impl Paragraph {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Font of the first run. Attributes the slide does not set are `None`.
    #[inline]
    pub fn font(&self) -> &Font {
        &self.font
    }
}

/// The `<p:txBody>` of a shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFrame {
    pub(crate) paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Text of all paragraphs joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

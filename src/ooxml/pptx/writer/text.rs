/// Text frames and paragraphs of writable shapes.
use crate::common::xml::escape_xml;
use crate::ooxml::pptx::format::Font;
use std::fmt::Write as FmtWrite;

/// A paragraph: its text and the font applied to its runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    text: String,
    font: Font,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. A `\n` or vertical tab inside a paragraph becomes a line break.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[inline]
    pub fn font(&self) -> &Font {
        &self.font
    }

    #[inline]
    pub fn font_mut(&mut self) -> &mut Font {
        &mut self.font
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> std::fmt::Result {
        xml.push_str("<a:p>");

        for (i, line) in self.text.split(['\n', '\u{b}']).enumerate() {
            if i > 0 {
                xml.push_str("<a:br>");
                self.font.write_run_properties(xml, "a:rPr")?;
                xml.push_str("</a:br>");
            }
            if line.is_empty() {
                continue;
            }
            xml.push_str("<a:r>");
            self.font.write_run_properties(xml, "a:rPr")?;
            write!(xml, "<a:t>{}</a:t>", escape_xml(line))?;
            xml.push_str("</a:r>");
        }

        self.font.write_run_properties(xml, "a:endParaRPr")?;
        xml.push_str("</a:p>");
        Ok(())
    }
}

/// The text body of a shape. Always holds at least one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    /// An empty frame with a single empty paragraph.
    pub fn new() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
        }
    }

    /// Frame holding one paragraph per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut frame = Self::new();
        frame.set_text(text);
        frame
    }

    /// Replace all paragraphs with one per line of `text`.
    ///
    /// Fonts set on existing paragraphs are discarded.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text.split('\n').map(Paragraph::new).collect();
    }

    /// Paragraph texts joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    #[inline]
    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    #[inline]
    pub fn first_paragraph(&self) -> &Paragraph {
        &self.paragraphs[0]
    }

    #[inline]
    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        &mut self.paragraphs[0]
    }

    /// Write `<p:txBody>` with the given `a:bodyPr` element.
    pub(crate) fn write_xml(&self, xml: &mut String, body_pr: &str) -> std::fmt::Result {
        xml.push_str("<p:txBody>");
        xml.push_str(body_pr);
        xml.push_str("<a:lstStyle/>");
        for paragraph in &self.paragraphs {
            paragraph.write_xml(xml)?;
        }
        xml.push_str("</p:txBody>");
        Ok(())
    }
}

impl Default for TextFrame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;

    #[test]
    fn test_new_frame_has_one_paragraph() {
        let frame = TextFrame::new();
        assert_eq!(frame.paragraphs().len(), 1);
        assert_eq!(frame.text(), "");
    }

    #[test]
    fn test_set_text_splits_lines() {
        let mut frame = TextFrame::new();
        frame.first_paragraph_mut().font_mut().bold = Some(true);
        frame.set_text("山田 太郎\n2025年3月20日");

        assert_eq!(frame.paragraphs().len(), 2);
        assert_eq!(frame.paragraphs()[1].text(), "2025年3月20日");
        assert_eq!(frame.first_paragraph().font().bold, None);
        assert_eq!(frame.text(), "山田 太郎\n2025年3月20日");

        frame.set_text("");
        assert_eq!(frame.paragraphs().len(), 1);
    }

    #[test]
    fn test_paragraph_xml() {
        let mut paragraph = Paragraph::new("a < b");
        paragraph.font_mut().color = Some(RGBColor::new(0x33, 0x33, 0x33));

        let mut xml = String::new();
        paragraph.write_xml(&mut xml).unwrap();

        assert!(xml.starts_with("<a:p><a:r><a:rPr"));
        assert!(xml.contains("<a:t>a &lt; b</a:t>"));
        assert!(xml.contains(r#"<a:endParaRPr lang="en-US" dirty="0"><a:solidFill>"#));
    }

    #[test]
    fn test_line_break_and_empty_paragraph() {
        let mut xml = String::new();
        Paragraph::new("one\ntwo").write_xml(&mut xml).unwrap();
        assert_eq!(xml.matches("<a:r>").count(), 2);
        assert!(xml.contains("<a:br>"));

        let mut xml = String::new();
        Paragraph::default().write_xml(&mut xml).unwrap();
        assert_eq!(xml, r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    }

    #[test]
    fn test_vertical_tab_and_control_characters() {
        let mut xml = String::new();
        Paragraph::new("line one\u{b}line two\u{1b}esc")
            .write_xml(&mut xml)
            .unwrap();

        assert_eq!(xml.matches("<a:br>").count(), 1);
        assert!(xml.contains("<a:t>line one</a:t>"));
        assert!(xml.contains("<a:t>line two_x001B_esc</a:t>"));
        assert!(!xml.bytes().any(|b| b < 0x20));
    }
}

//! Slide background support.
//!
//! A slide either inherits the master background or overrides it with a
//! solid fill written as `<p:bg><p:bgPr>`.

use crate::common::RGBColor;
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// A solid-color slide background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideBackground {
    color: RGBColor,
}

impl SlideBackground {
    /// Solid fill with the given color.
    pub fn solid(color: RGBColor) -> Self {
        Self { color }
    }

    #[inline]
    pub fn color(&self) -> RGBColor {
        self.color
    }

    /// Parse the `<p:bg>` of a slide.
    ///
    /// Returns `None` when the slide inherits its background or uses a fill
    /// other than an explicit sRGB solid fill.
    pub(crate) fn from_xml(xml: &[u8]) -> Result<Option<Self>> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        let mut in_bg = false;
        let mut in_solid_fill = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"bg" => in_bg = true,
                    b"solidFill" if in_bg => in_solid_fill = true,
                    b"srgbClr" if in_solid_fill => {
                        for attr in e.attributes() {
                            let attr = attr?;
                            if attr.key.as_ref() == b"val" {
                                let value = attr.unescape_value()?;
                                return Ok(RGBColor::from_hex(&value).map(Self::solid));
                            }
                        }
                    },
                    // Shapes start after the background
                    b"spTree" => break,
                    _ => {},
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"bg" => break,
                    b"solidFill" => in_solid_fill = false,
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(None)
    }

    /// Write this background. It must precede `<p:spTree>` inside `<p:cSld>`,
    /// and `<p:bgPr>` requires an effect list after the fill.
    pub(crate) fn write_xml(&self, xml: &mut String) {
        xml.push_str("<p:bg>");
        xml.push_str("<p:bgPr>");
        xml.push_str(r#"<a:solidFill><a:srgbClr val=""#);
        xml.push_str(&self.color.to_hex());
        xml.push_str(r#""/></a:solidFill>"#);
        xml.push_str("<a:effectLst/>");
        xml.push_str("</p:bgPr>");
        xml.push_str("</p:bg>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_background_xml() {
        let bg = SlideBackground::solid(RGBColor::new(0xF0, 0xF0, 0xF0));
        let mut xml = String::new();
        bg.write_xml(&mut xml);
        assert_eq!(
            xml,
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="F0F0F0"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#
        );
    }

    #[test]
    fn test_from_xml() {
        let xml = br#"<p:sld><p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="ffffff"/></a:solidFill><a:effectLst/></p:bgPr></p:bg><p:spTree/></p:cSld></p:sld>"#;
        let bg = SlideBackground::from_xml(xml).unwrap();
        assert_eq!(bg.map(|b| b.color()), Some(RGBColor::WHITE));
    }

    #[test]
    fn test_from_xml_ignores_shape_fills() {
        let xml = br#"<p:sld><p:cSld><p:spTree><p:sp><p:spPr><a:solidFill><a:srgbClr val="0070C0"/></a:solidFill></p:spPr></p:sp></p:spTree></p:cSld></p:sld>"#;
        assert_eq!(SlideBackground::from_xml(xml).unwrap(), None);

        let xml = br#"<p:sld><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree/></p:cSld></p:sld>"#;
        assert_eq!(SlideBackground::from_xml(xml).unwrap(), None);
    }
}

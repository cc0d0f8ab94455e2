//! Format types for PPTX presentations: image formats and run fonts.

use crate::common::RGBColor;
use crate::common::unit::pt_to_centipoints;
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::content_type as ct;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

/// Image format types supported by PPTX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Content type of a media part in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => ct::PNG,
            Self::Jpeg => ct::JPEG,
            Self::Gif => ct::GIF,
            Self::Bmp => ct::BMP,
            Self::Tiff => ct::TIFF,
        }
    }

    /// Extension used for media partnames.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Detect image format from magic bytes.
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF8
        if bytes.starts_with(b"GIF8") {
            return Some(Self::Gif);
        }

        // BM
        if bytes.starts_with(b"BM") {
            return Some(Self::Bmp);
        }

        // TIFF, little- or big-endian
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some(Self::Tiff);
        }

        None
    }
}

/// Character formatting applied to the runs of a paragraph.
///
/// Every attribute is optional; `None` means "inherit from the placeholder,
/// layout or master".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Size in points
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<RGBColor>,
    /// Typeface, applied to both Latin and East Asian text
    pub name: Option<String>,
}

impl Font {
    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.color.is_none()
            && self.name.is_none()
    }

    /// Write this font as a run-properties element such as `a:rPr` or
    /// `a:endParaRPr`.
    ///
    /// Children follow the CT_TextCharacterProperties order: fill before typefaces.
    pub(crate) fn write_run_properties(&self, xml: &mut String, tag: &str) -> std::fmt::Result {
        write!(xml, r#"<{} lang="en-US""#, tag)?;

        if let Some(size) = self.size {
            write!(xml, r#" sz="{}""#, pt_to_centipoints(size))?;
        }
        if let Some(bold) = self.bold {
            write!(xml, r#" b="{}""#, u8::from(bold))?;
        }
        if let Some(italic) = self.italic {
            write!(xml, r#" i="{}""#, u8::from(italic))?;
        }
        xml.push_str(r#" dirty="0""#);

        if self.color.is_none() && self.name.is_none() {
            xml.push_str("/>");
            return Ok(());
        }
        xml.push('>');

        if let Some(color) = self.color {
            write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.to_hex()
            )?;
        }

        if let Some(ref name) = self.name {
            let typeface = escape_xml(name);
            write!(
                xml,
                r#"<a:latin typeface="{0}"/><a:ea typeface="{0}"/>"#,
                typeface
            )?;
        }

        write!(xml, "</{}>", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_image_format() {
        assert_eq!(
            ImageFormat::detect_from_bytes(&[0x89, b'P', b'N', b'G', 0x0D]),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::detect_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::detect_from_bytes(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect_from_bytes(b"text"), None);
        assert_eq!(ImageFormat::detect_from_bytes(b"BM"), None);
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_empty_font_xml() {
        let mut xml = String::new();
        Font::default().write_run_properties(&mut xml, "a:rPr").unwrap();
        assert_eq!(xml, r#"<a:rPr lang="en-US" dirty="0"/>"#);
    }

    #[test]
    fn test_full_font_xml() {
        let font = Font {
            size: Some(40.0),
            bold: Some(true),
            italic: Some(false),
            color: Some(RGBColor::new(0x00, 0x33, 0x66)),
            name: Some("Meiryo & Co".to_string()),
        };

        let mut xml = String::new();
        font.write_run_properties(&mut xml, "a:rPr").unwrap();

        assert_eq!(
            xml,
            concat!(
                r#"<a:rPr lang="en-US" sz="4000" b="1" i="0" dirty="0">"#,
                r#"<a:solidFill><a:srgbClr val="003366"/></a:solidFill>"#,
                r#"<a:latin typeface="Meiryo &amp; Co"/><a:ea typeface="Meiryo &amp; Co"/>"#,
                r#"</a:rPr>"#
            )
        );
    }
}

/// Shape types and implementation for PPTX presentations.
use crate::common::xml::escape_xml;
use crate::common::{Geometry, RGBColor};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::format::ImageFormat;
use crate::ooxml::pptx::layout::{PlaceholderDef, PlaceholderKind, write_ph};
use crate::ooxml::pptx::writer::text::TextFrame;
use std::fmt::Write as FmtWrite;
use std::sync::Arc;

/// A shape on a slide: placeholder, text box, rectangle or picture.
#[derive(Debug, Clone)]
pub struct MutableShape {
    pub(crate) shape_id: u32,
    pub(crate) name: String,
    /// Explicit position; `None` inherits the layout position
    pub(crate) geometry: Option<Geometry>,
    pub(crate) shape_type: ShapeType,
    pub(crate) text_frame: Option<TextFrame>,
    pub(crate) fill: Option<RGBColor>,
    pub(crate) no_line: bool,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    Placeholder {
        kind: PlaceholderKind,
        idx: u32,
        /// Position declared by the layout
        inherited: Geometry,
    },
    TextBox,
    Rectangle,
    Picture {
        data: Arc<Vec<u8>>,
        format: ImageFormat,
        description: String,
    },
}

impl MutableShape {
    pub(crate) fn new_placeholder(shape_id: u32, def: &PlaceholderDef) -> Self {
        Self {
            shape_id,
            name: def.name.to_string(),
            geometry: None,
            shape_type: ShapeType::Placeholder {
                kind: def.kind,
                idx: def.idx,
                inherited: def.geometry,
            },
            text_frame: Some(TextFrame::new()),
            fill: None,
            no_line: false,
        }
    }

    pub(crate) fn new_text_box(shape_id: u32, text: &str, geometry: Geometry) -> Self {
        Self {
            shape_id,
            name: format!("TextBox {}", shape_id - 1),
            geometry: Some(geometry),
            shape_type: ShapeType::TextBox,
            text_frame: Some(TextFrame::from_text(text)),
            fill: None,
            no_line: false,
        }
    }

    pub(crate) fn new_rectangle(shape_id: u32, geometry: Geometry) -> Self {
        Self {
            shape_id,
            name: format!("Rectangle {}", shape_id - 1),
            geometry: Some(geometry),
            shape_type: ShapeType::Rectangle,
            text_frame: Some(TextFrame::new()),
            fill: None,
            no_line: false,
        }
    }

    pub(crate) fn new_picture(
        shape_id: u32,
        data: Arc<Vec<u8>>,
        format: ImageFormat,
        geometry: Geometry,
        description: String,
    ) -> Self {
        Self {
            shape_id,
            name: format!("Picture {}", shape_id - 1),
            geometry: Some(geometry),
            shape_type: ShapeType::Picture {
                data,
                format,
                description,
            },
            text_frame: None,
            fill: None,
            no_line: false,
        }
    }

    /// Shape id, unique within the slide.
    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.shape_type, ShapeType::Placeholder { .. })
    }

    pub fn is_picture(&self) -> bool {
        matches!(self.shape_type, ShapeType::Picture { .. })
    }

    pub fn placeholder_kind(&self) -> Option<PlaceholderKind> {
        match self.shape_type {
            ShapeType::Placeholder { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn placeholder_idx(&self) -> Option<u32> {
        match self.shape_type {
            ShapeType::Placeholder { idx, .. } => Some(idx),
            _ => None,
        }
    }

    /// Effective position and size: explicit, else inherited from the layout.
    pub fn geometry(&self) -> Geometry {
        match (self.geometry, &self.shape_type) {
            (Some(geometry), _) => geometry,
            (None, ShapeType::Placeholder { inherited, .. }) => *inherited,
            (None, _) => Geometry::default(),
        }
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(geometry);
    }

    #[inline]
    pub fn has_text_frame(&self) -> bool {
        self.text_frame.is_some()
    }

    pub fn text_frame(&self) -> Result<&TextFrame> {
        self.text_frame
            .as_ref()
            .ok_or_else(|| OoxmlError::NoTextFrame(self.name.clone()))
    }

    pub fn text_frame_mut(&mut self) -> Result<&mut TextFrame> {
        let name = &self.name;
        self.text_frame
            .as_mut()
            .ok_or_else(|| OoxmlError::NoTextFrame(name.clone()))
    }

    /// Replace the text, one paragraph per line.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.text_frame_mut()?.set_text(text);
        Ok(())
    }

    /// Text of the shape; empty for shapes without a text frame.
    pub fn text(&self) -> String {
        self.text_frame
            .as_ref()
            .map(TextFrame::text)
            .unwrap_or_default()
    }

    #[inline]
    pub fn fill(&self) -> Option<RGBColor> {
        self.fill
    }

    /// Fill the shape with a solid color.
    pub fn set_fill(&mut self, color: RGBColor) {
        self.fill = Some(color);
    }

    #[inline]
    pub fn no_line(&self) -> bool {
        self.no_line
    }

    /// Remove the outline.
    pub fn set_no_line(&mut self) {
        self.no_line = true;
    }

    /// Image bytes and format if this shape is a picture.
    pub(crate) fn image_data(&self) -> Option<(&Arc<Vec<u8>>, ImageFormat)> {
        match &self.shape_type {
            ShapeType::Picture { data, format, .. } => Some((data, *format)),
            _ => None,
        }
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need `rel_id`, the slide relationship to their media part.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::Placeholder { kind, idx, .. } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                self.write_c_nv_pr(xml, None)?;
                xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
                xml.push_str("<p:nvPr>");
                write_ph(xml, *kind, *idx)?;
                xml.push_str("</p:nvPr>");
                xml.push_str("</p:nvSpPr>");

                self.write_sp_pr(xml, None);
                self.write_text_body(xml, "<a:bodyPr/>")?;
                xml.push_str("</p:sp>");
            },
            ShapeType::TextBox => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                self.write_c_nv_pr(xml, None)?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                self.write_sp_pr(xml, Some("rect"));
                self.write_text_body(xml, r#"<a:bodyPr wrap="none" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#)?;
                xml.push_str("</p:sp>");
            },
            ShapeType::Rectangle => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                self.write_c_nv_pr(xml, None)?;
                xml.push_str("<p:cNvSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                self.write_sp_pr(xml, Some("rect"));

                xml.push_str("<p:style>");
                xml.push_str(r#"<a:lnRef idx="1"><a:schemeClr val="accent1"/></a:lnRef>"#);
                xml.push_str(r#"<a:fillRef idx="3"><a:schemeClr val="accent1"/></a:fillRef>"#);
                xml.push_str(r#"<a:effectRef idx="2"><a:schemeClr val="accent1"/></a:effectRef>"#);
                xml.push_str(r#"<a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef>"#);
                xml.push_str("</p:style>");

                self.write_text_body(xml, r#"<a:bodyPr rtlCol="0" anchor="ctr"/>"#)?;
                xml.push_str("</p:sp>");
            },
            ShapeType::Picture { description, .. } => {
                let rid = rel_id.ok_or_else(|| {
                    OoxmlError::Xml(format!("picture '{}' has no image relationship", self.name))
                })?;

                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                self.write_c_nv_pr(xml, Some(description))?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</p:blipFill>");

                self.write_sp_pr(xml, Some("rect"));
                xml.push_str("</p:pic>");
            },
        }

        Ok(())
    }

    fn write_c_nv_pr(&self, xml: &mut String, description: Option<&str>) -> std::fmt::Result {
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{}""#,
            self.shape_id,
            escape_xml(&self.name)
        )?;
        if let Some(descr) = description {
            write!(xml, r#" descr="{}""#, escape_xml(descr))?;
        }
        xml.push_str("/>");
        Ok(())
    }

    /// `<p:spPr>`: xfrm, preset geometry, fill, then line.
    fn write_sp_pr(&self, xml: &mut String, preset: Option<&str>) {
        if self.geometry.is_none() && preset.is_none() && self.fill.is_none() && !self.no_line {
            xml.push_str("<p:spPr/>");
            return;
        }

        xml.push_str("<p:spPr>");
        if let Some(geometry) = self.geometry {
            geometry.write_xfrm(xml);
        }
        if let Some(prst) = preset {
            xml.push_str(r#"<a:prstGeom prst=""#);
            xml.push_str(prst);
            xml.push_str(r#""><a:avLst/></a:prstGeom>"#);
        }
        match (self.fill, &self.shape_type) {
            (Some(color), _) => {
                xml.push_str(r#"<a:solidFill><a:srgbClr val=""#);
                xml.push_str(&color.to_hex());
                xml.push_str(r#""/></a:solidFill>"#);
            },
            (None, ShapeType::TextBox) => xml.push_str("<a:noFill/>"),
            _ => {},
        }
        if self.no_line {
            xml.push_str("<a:ln><a:noFill/></a:ln>");
        }
        xml.push_str("</p:spPr>");
    }

    fn write_text_body(&self, xml: &mut String, body_pr: &str) -> std::fmt::Result {
        match self.text_frame {
            Some(ref frame) => frame.write_xml(xml, body_pr),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::layout::SlideLayout;

    fn title_placeholder() -> MutableShape {
        MutableShape::new_placeholder(2, &SlideLayout::TitleAndContent.placeholders()[0])
    }

    #[test]
    fn test_placeholder_inherits_geometry() {
        let mut shape = title_placeholder();
        assert_eq!(shape.geometry(), Geometry::new(457200, 274638, 8229600, 1143000));
        assert_eq!(shape.placeholder_kind(), Some(PlaceholderKind::Title));
        assert_eq!(shape.placeholder_idx(), Some(0));

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains("<p:spPr/>"));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));

        shape.set_geometry(Geometry::new(1, 2, 3, 4));
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"<a:off x="1" y="2"/><a:ext cx="3" cy="4"/>"#));
    }

    #[test]
    fn test_rectangle_fill_and_line_order() {
        let mut shape = MutableShape::new_rectangle(4, Geometry::new(0, 0, 100, 10));
        shape.set_fill(RGBColor::new(0x00, 0x70, 0xC0));
        shape.set_no_line();

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        let prst = xml.find("<a:prstGeom").unwrap();
        let fill = xml.find(r#"<a:solidFill><a:srgbClr val="0070C0"/>"#).unwrap();
        let line = xml.find("<a:ln><a:noFill/></a:ln>").unwrap();
        assert!(prst < fill && fill < line);
        assert!(xml.contains(r#"name="Rectangle 3""#));
        assert!(xml.contains("<p:txBody>"));
    }

    #[test]
    fn test_picture_requires_rel_id() {
        let shape = MutableShape::new_picture(
            3,
            Arc::new(vec![0x89, b'P', b'N', b'G']),
            ImageFormat::Png,
            Geometry::new(0, 0, 10, 10),
            "chart.png".to_string(),
        );

        assert!(!shape.has_text_frame());
        assert!(matches!(shape.text_frame(), Err(OoxmlError::NoTextFrame(_))));
        assert_eq!(shape.text(), "");

        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, None).is_err());

        let mut xml = String::new();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"descr="chart.png""#));
    }

    #[test]
    fn test_text_box() {
        let mut shape = MutableShape::new_text_box(5, "note", Geometry::new(0, 0, 10, 10));
        assert_eq!(shape.text(), "note");
        shape.set_text("a\nb").unwrap();
        assert_eq!(shape.text_frame().unwrap().paragraphs().len(), 2);

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains("<a:noFill/>"));
    }
}

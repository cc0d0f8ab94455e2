/// Slide types and implementation for PPTX presentations.
use crate::common::{Geometry, RGBColor};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::backgrounds::SlideBackground;
use crate::ooxml::pptx::format::ImageFormat;
use crate::ooxml::pptx::layout::{SlideLayout, write_group_root};
use crate::ooxml::pptx::template::{PML_NAMESPACES, XML_DECLARATION};
use std::fmt::Write as FmtWrite;
use std::path::Path;
use std::sync::Arc;

use super::relmap::RelationshipMapper;
use super::shape::MutableShape;

/// A mutable slide in a presentation.
///
/// A slide starts with one placeholder per placeholder of its layout;
/// further shapes are appended in insertion order.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique identifier, 256 and up)
    pub(crate) slide_id: u32,
    pub(crate) layout: SlideLayout,
    pub(crate) shapes: Vec<MutableShape>,
    pub(crate) background: Option<SlideBackground>,
}

impl MutableSlide {
    /// Create a slide populated with the placeholders of `layout`.
    pub(crate) fn new(slide_id: u32, layout: SlideLayout) -> Self {
        // Shape id 1 is the group root of the shape tree.
        let shapes = layout
            .placeholders()
            .iter()
            .zip(2u32..)
            .map(|(def, id)| MutableShape::new_placeholder(id, def))
            .collect();

        Self {
            slide_id,
            layout,
            shapes,
            background: None,
        }
    }

    /// Get the slide ID.
    #[inline]
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    #[inline]
    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// The title placeholder (title or centered title).
    pub fn title(&self) -> Result<&MutableShape> {
        self.shapes
            .iter()
            .find(|s| s.placeholder_kind().is_some_and(|k| k.is_title()))
            .ok_or(OoxmlError::MissingTitle)
    }

    pub fn title_mut(&mut self) -> Result<&mut MutableShape> {
        self.shapes
            .iter_mut()
            .find(|s| s.placeholder_kind().is_some_and(|k| k.is_title()))
            .ok_or(OoxmlError::MissingTitle)
    }

    /// The placeholder with the given `idx`. Titles have idx 0.
    pub fn placeholder(&self, idx: u32) -> Result<&MutableShape> {
        self.shapes
            .iter()
            .find(|s| s.placeholder_idx() == Some(idx))
            .ok_or(OoxmlError::PlaceholderNotFound(idx))
    }

    pub fn placeholder_mut(&mut self, idx: u32) -> Result<&mut MutableShape> {
        self.shapes
            .iter_mut()
            .find(|s| s.placeholder_idx() == Some(idx))
            .ok_or(OoxmlError::PlaceholderNotFound(idx))
    }

    /// Add a picture read from `path`.
    ///
    /// The description of the picture is the file name.
    pub fn add_picture<P: AsRef<Path>>(
        &mut self,
        path: P,
        geometry: Geometry,
    ) -> Result<&mut MutableShape> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let description = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.push_picture(data, geometry, description)
    }

    /// Add a picture from image bytes. The format is sniffed from the content.
    pub fn add_picture_from_bytes(
        &mut self,
        data: Vec<u8>,
        geometry: Geometry,
    ) -> Result<&mut MutableShape> {
        self.push_picture(data, geometry, String::new())
    }

    fn push_picture(
        &mut self,
        data: Vec<u8>,
        geometry: Geometry,
        description: String,
    ) -> Result<&mut MutableShape> {
        let format = ImageFormat::detect_from_bytes(&data).ok_or_else(|| {
            OoxmlError::InvalidFormat(format!(
                "unrecognized image data{}",
                if description.is_empty() {
                    String::new()
                } else {
                    format!(" in '{}'", description)
                }
            ))
        })?;

        let shape_id = self.next_shape_id();
        let shape = MutableShape::new_picture(shape_id, Arc::new(data), format, geometry, description);
        Ok(self.push_shape(shape))
    }

    /// Add a rectangle auto shape.
    pub fn add_rectangle(&mut self, geometry: Geometry) -> &mut MutableShape {
        let shape = MutableShape::new_rectangle(self.next_shape_id(), geometry);
        self.push_shape(shape)
    }

    /// Add a text box holding `text`, one paragraph per line.
    pub fn add_text_box(&mut self, text: &str, geometry: Geometry) -> &mut MutableShape {
        let shape = MutableShape::new_text_box(self.next_shape_id(), text, geometry);
        self.push_shape(shape)
    }

    /// Fill the slide background with a solid color.
    pub fn set_background(&mut self, color: RGBColor) {
        self.background = Some(SlideBackground::solid(color));
    }

    #[inline]
    pub fn background(&self) -> Option<&SlideBackground> {
        self.background.as_ref()
    }

    #[inline]
    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    #[inline]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Next free shape id: one past the largest id in use.
    fn next_shape_id(&self) -> u32 {
        self.shapes.iter().map(|s| s.shape_id).max().unwrap_or(1) + 1
    }

    fn push_shape(&mut self, shape: MutableShape) -> &mut MutableShape {
        let index = self.shapes.len();
        self.shapes.push(shape);
        &mut self.shapes[index]
    }

    /// Image bytes of the pictures on this slide, in shape order.
    pub(crate) fn collect_images(&self) -> Vec<(&Arc<Vec<u8>>, ImageFormat)> {
        self.shapes.iter().filter_map(MutableShape::image_data).collect()
    }

    /// Generate slide XML with the image relationship IDs from `rel_mapper`.
    pub(crate) fn to_xml(&self, slide_index: usize, rel_mapper: &RelationshipMapper) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(XML_DECLARATION);
        write!(xml, "<p:sld {}>", PML_NAMESPACES)?;
        xml.push_str("<p:cSld>");

        // The background must come before spTree
        if let Some(ref background) = self.background {
            background.write_xml(&mut xml);
        }

        xml.push_str("<p:spTree>");
        write_group_root(&mut xml);

        let mut image_counter = 0;
        for shape in &self.shapes {
            let rel_id = if shape.is_picture() {
                let rid = rel_mapper.get_image_id(slide_index, image_counter);
                image_counter += 1;
                rid
            } else {
                None
            };
            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

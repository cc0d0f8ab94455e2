/// Presentation writer for PPTX.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::PackageWriter;
use crate::ooxml::pptx::layout::SlideLayout;
use crate::ooxml::pptx::template::XML_DECLARATION;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;
use std::path::Path;
use tracing::info;

use super::package::build_package;
use super::slide::MutableSlide;

/// First slide ID; lower values are reserved.
const FIRST_SLIDE_ID: u32 = 256;

/// Document metadata written to docProps/core.xml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// A mutable PowerPoint presentation for writing.
///
/// Provides methods to add and modify slides, set dimensions, and configure
/// document properties. Every presentation carries one slide master with the
/// seven built-in layouts.
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    core_properties: CoreProperties,
    next_slide_id: u32,
}

impl MutablePresentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: 9144000,  // 10 inches
            slide_height: 6858000, // 7.5 inches
            core_properties: CoreProperties::default(),
            next_slide_id: FIRST_SLIDE_ID,
        }
    }

    /// Append a slide created from `layout`.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut MutableSlide {
        let slide = MutableSlide::new(self.next_slide_id, layout);
        self.next_slide_id += 1;

        let index = self.slides.len();
        self.slides.push(slide);
        &mut self.slides[index]
    }

    /// Append a slide from the layout at `index` (0 = Title Slide, 1 = Title and Content, ...).
    pub fn add_slide_by_index(&mut self, index: usize) -> Result<&mut MutableSlide> {
        let layout = SlideLayout::try_from_index(index)?;
        Ok(self.add_slide(layout))
    }

    #[inline]
    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// Get a slide by index (0-based).
    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.slides.get(index)
    }

    /// Get a mutable reference to a slide by index (0-based).
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut MutableSlide> {
        self.slides.get_mut(index)
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Set the slide width in EMUs.
    pub fn set_slide_width(&mut self, width: i64) {
        self.slide_width = width;
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Set the slide height in EMUs.
    pub fn set_slide_height(&mut self, height: i64) {
        self.slide_height = height;
    }

    #[inline]
    pub fn core_properties(&self) -> &CoreProperties {
        &self.core_properties
    }

    #[inline]
    pub fn core_properties_mut(&mut self) -> &mut CoreProperties {
        &mut self.core_properties
    }

    /// Serialize to the bytes of a .pptx file.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = build_package(self, Utc::now())?;
        Ok(PackageWriter::to_bytes(&package)?)
    }

    /// Save the presentation to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let package = build_package(self, Utc::now())?;
        PackageWriter::write(path, &package)?;
        info!(
            path = %path.display(),
            slides = self.slide_count(),
            parts = package.part_count(),
            "saved presentation"
        );
        Ok(())
    }

    /// Generate presentation.xml with the relationship IDs of the master and the slides.
    pub(crate) fn generate_presentation_xml(
        &self,
        master_rel_id: &str,
        slide_rel_ids: &[String],
    ) -> Result<String> {
        if slide_rel_ids.len() != self.slides.len() {
            return Err(OoxmlError::Xml(format!(
                "{} slide relationship IDs for {} slides",
                slide_rel_ids.len(),
                self.slides.len()
            )));
        }

        let mut xml = String::with_capacity(2048);

        xml.push_str(XML_DECLARATION);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        // Write slide master ID list
        xml.push_str("<p:sldMasterIdLst>");
        write!(xml, r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#, master_rel_id)?;
        xml.push_str("</p:sldMasterIdLst>");

        // Write slide ID list
        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(xml, r#"<p:sldId id="{}" r:id="{}"/>"#, slide.slide_id(), rel_id)?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(xml, r#"<p:sldSz cx="{}" cy="{}""#, self.slide_width, self.slide_height)?;
        if let Some(size_type) = slide_size_type(self.slide_width, self.slide_height) {
            write!(xml, r#" type="{}""#, size_type)?;
        }
        xml.push_str("/>");
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("<p:defaultTextStyle>");
        xml.push_str(r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#);
        xml.push_str("</p:defaultTextStyle>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

/// `type` of `<p:sldSz>` for the standard on-screen aspect ratios.
///
/// Other sizes are written without a type, which PowerPoint reads as custom.
fn slide_size_type(width: i64, height: i64) -> Option<&'static str> {
    const RATIOS: [(i64, i64, &str); 3] =
        [(4, 3, "screen4x3"), (16, 9, "screen16x9"), (16, 10, "screen16x10")];

    if width <= 0 || height <= 0 {
        return None;
    }
    RATIOS
        .iter()
        .find(|(w, h, _)| width * h == height * w)
        .map(|(_, _, name)| *name)
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}

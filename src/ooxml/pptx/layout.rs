//! The built-in slide layouts.
//!
//! A new presentation carries one slide master and the seven layouts of the
//! classic 4:3 default template. Each layout declares which placeholders a
//! slide created from it starts with, and where they sit.

use crate::common::Geometry;
use crate::ooxml::error::{OoxmlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

/// Role of a placeholder, written as the `type` attribute of `<p:ph>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    Title,
    /// Centered title of a title slide
    CenterTitle,
    Subtitle,
    /// Text-only body
    Body,
    /// Generic content placeholder (the default when `type` is omitted)
    Object,
}

impl PlaceholderKind {
    /// Value of the `type` attribute; `None` for `Object`, which is implied.
    pub fn xml_type(&self) -> Option<&'static str> {
        match self {
            Self::Title => Some("title"),
            Self::CenterTitle => Some("ctrTitle"),
            Self::Subtitle => Some("subTitle"),
            Self::Body => Some("body"),
            Self::Object => None,
        }
    }

    /// Parse a `type` attribute; a missing attribute means `Object`.
    pub fn from_xml_type(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("obj") => Some(Self::Object),
            Some("title") => Some(Self::Title),
            Some("ctrTitle") => Some(Self::CenterTitle),
            Some("subTitle") => Some(Self::Subtitle),
            Some("body") => Some(Self::Body),
            Some(_) => None,
        }
    }

    #[inline]
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title | Self::CenterTitle)
    }
}

/// A placeholder declared by a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderDef {
    pub kind: PlaceholderKind,
    /// `idx` attribute; 0 for titles
    pub idx: u32,
    pub name: &'static str,
    pub geometry: Geometry,
}

const TITLE_GEOMETRY: Geometry = Geometry::new(457200, 274638, 8229600, 1143000);

const TITLE: PlaceholderDef = PlaceholderDef {
    kind: PlaceholderKind::Title,
    idx: 0,
    name: "Title 1",
    geometry: TITLE_GEOMETRY,
};

const TITLE_SLIDE_PLACEHOLDERS: &[PlaceholderDef] = &[
    PlaceholderDef {
        kind: PlaceholderKind::CenterTitle,
        idx: 0,
        name: "Title 1",
        geometry: Geometry::new(685800, 2130425, 7772400, 1470025),
    },
    PlaceholderDef {
        kind: PlaceholderKind::Subtitle,
        idx: 1,
        name: "Subtitle 2",
        geometry: Geometry::new(1371600, 3886200, 6400000, 1752600),
    },
];

const TITLE_AND_CONTENT_PLACEHOLDERS: &[PlaceholderDef] = &[
    TITLE,
    PlaceholderDef {
        kind: PlaceholderKind::Object,
        idx: 1,
        name: "Content Placeholder 2",
        geometry: Geometry::new(457200, 1600200, 8229600, 4525963),
    },
];

const SECTION_HEADER_PLACEHOLDERS: &[PlaceholderDef] = &[
    PlaceholderDef {
        kind: PlaceholderKind::Title,
        idx: 0,
        name: "Title 1",
        geometry: Geometry::new(722313, 4406900, 7772400, 1362075),
    },
    PlaceholderDef {
        kind: PlaceholderKind::Body,
        idx: 1,
        name: "Text Placeholder 2",
        geometry: Geometry::new(722313, 2906713, 7772400, 1500187),
    },
];

const TWO_CONTENT_PLACEHOLDERS: &[PlaceholderDef] = &[
    TITLE,
    PlaceholderDef {
        kind: PlaceholderKind::Object,
        idx: 1,
        name: "Content Placeholder 2",
        geometry: Geometry::new(457200, 1600200, 4038600, 4525963),
    },
    PlaceholderDef {
        kind: PlaceholderKind::Object,
        idx: 2,
        name: "Content Placeholder 3",
        geometry: Geometry::new(4648200, 1600200, 4038600, 4525963),
    },
];

const COMPARISON_PLACEHOLDERS: &[PlaceholderDef] = &[
    TITLE,
    PlaceholderDef {
        kind: PlaceholderKind::Body,
        idx: 1,
        name: "Text Placeholder 2",
        geometry: Geometry::new(457200, 1535113, 4040188, 639762),
    },
    PlaceholderDef {
        kind: PlaceholderKind::Object,
        idx: 2,
        name: "Content Placeholder 3",
        geometry: Geometry::new(457200, 2174875, 4040188, 3951288),
    },
    PlaceholderDef {
        kind: PlaceholderKind::Body,
        idx: 3,
        name: "Text Placeholder 4",
        geometry: Geometry::new(4645025, 1535113, 4041775, 639762),
    },
    PlaceholderDef {
        kind: PlaceholderKind::Object,
        idx: 4,
        name: "Content Placeholder 5",
        geometry: Geometry::new(4645025, 2174875, 4041775, 3951288),
    },
];

const TITLE_ONLY_PLACEHOLDERS: &[PlaceholderDef] = &[TITLE];

/// One of the seven built-in slide layouts.
///
/// Indices match the classic default template, so index 0 is the title slide
/// and index 1 is "Title and Content".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideLayout {
    TitleSlide,
    TitleAndContent,
    SectionHeader,
    TwoContent,
    Comparison,
    TitleOnly,
    Blank,
}

impl SlideLayout {
    /// All layouts in index order.
    pub const ALL: [SlideLayout; 7] = [
        Self::TitleSlide,
        Self::TitleAndContent,
        Self::SectionHeader,
        Self::TwoContent,
        Self::Comparison,
        Self::TitleOnly,
        Self::Blank,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Like [`from_index`](Self::from_index), failing with `LayoutNotFound`.
    pub fn try_from_index(index: usize) -> Result<Self> {
        Self::from_index(index).ok_or(OoxmlError::LayoutNotFound(index))
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Display name, as shown in PowerPoint's layout gallery.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TitleSlide => "Title Slide",
            Self::TitleAndContent => "Title and Content",
            Self::SectionHeader => "Section Header",
            Self::TwoContent => "Two Content",
            Self::Comparison => "Comparison",
            Self::TitleOnly => "Title Only",
            Self::Blank => "Blank",
        }
    }

    /// `type` attribute of `<p:sldLayout>`.
    fn xml_type(&self) -> &'static str {
        match self {
            Self::TitleSlide => "title",
            Self::TitleAndContent => "obj",
            Self::SectionHeader => "secHead",
            Self::TwoContent => "twoObj",
            Self::Comparison => "twoTxTwoObj",
            Self::TitleOnly => "titleOnly",
            Self::Blank => "blank",
        }
    }

    pub fn placeholders(&self) -> &'static [PlaceholderDef] {
        match self {
            Self::TitleSlide => TITLE_SLIDE_PLACEHOLDERS,
            Self::TitleAndContent => TITLE_AND_CONTENT_PLACEHOLDERS,
            Self::SectionHeader => SECTION_HEADER_PLACEHOLDERS,
            Self::TwoContent => TWO_CONTENT_PLACEHOLDERS,
            Self::Comparison => COMPARISON_PLACEHOLDERS,
            Self::TitleOnly => TITLE_ONLY_PLACEHOLDERS,
            Self::Blank => &[],
        }
    }

    /// Partname of this layout inside the package.
    pub(crate) fn partname(&self) -> String {
        format!("/ppt/slideLayouts/slideLayout{}.xml", self.index() + 1)
    }

    /// Render the slideLayout part.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            concat!(
                r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
                r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
                r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
                r#"type="{}" preserve="1">"#
            ),
            self.xml_type()
        )?;
        write!(xml, r#"<p:cSld name="{}">"#, self.name())?;
        xml.push_str("<p:spTree>");
        write_group_root(&mut xml);

        for (i, ph) in self.placeholders().iter().enumerate() {
            write_placeholder_stub(&mut xml, ph, i as u32 + 2)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sldLayout>");

        Ok(xml)
    }
}

/// Non-visual and group properties of the `spTree` root, shape id 1.
pub(crate) fn write_group_root(xml: &mut String) {
    xml.push_str("<p:nvGrpSpPr>");
    xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    xml.push_str("<p:cNvGrpSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr>");
    xml.push_str(r#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm>"#);
    xml.push_str("</p:grpSpPr>");
}

/// Write the `<p:ph>` element for a placeholder.
pub(crate) fn write_ph(xml: &mut String, kind: PlaceholderKind, idx: u32) -> std::fmt::Result {
    xml.push_str("<p:ph");
    if let Some(ty) = kind.xml_type() {
        write!(xml, r#" type="{}""#, ty)?;
    }
    if idx != 0 {
        write!(xml, r#" idx="{}""#, idx)?;
    }
    xml.push_str("/>");
    Ok(())
}

/// A layout-level placeholder: positioned, with an empty text body.
fn write_placeholder_stub(xml: &mut String, ph: &PlaceholderDef, shape_id: u32) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, shape_id, ph.name)?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str("<p:nvPr>");
    write_ph(xml, ph.kind, ph.idx)?;
    xml.push_str("</p:nvPr>");
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr>");
    ph.geometry.write_xfrm(xml);
    xml.push_str("</p:spPr>");
    xml.push_str(r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody>"#);
    xml.push_str("</p:sp>");
    Ok(())
}

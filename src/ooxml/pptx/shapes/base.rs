/// Shapes read back from slide XML.
use crate::common::unit::centipoints_to_pt;
use crate::common::{Geometry, RGBColor};
use crate::ooxml::error::Result;
use crate::ooxml::pptx::format::Font;
use crate::ooxml::pptx::layout::PlaceholderKind;
use crate::ooxml::pptx::shapes::textframe::{Paragraph, TextFrame};
use quick_xml::events::BytesStart;

/// Shape type enumeration, one per shape element of `<p:spTree>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// An auto shape, text box or placeholder (p:sp)
    Shape,
    /// A picture shape (p:pic)
    Picture,
    /// A graphic frame containing a table or chart (p:graphicFrame)
    GraphicFrame,
    /// A group shape (p:grpSp)
    GroupShape,
    /// A connector shape (p:cxnSp)
    Connector,
}

impl ShapeType {
    /// Shape type for the local name of an `spTree` child.
    pub(crate) fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"sp" => Some(Self::Shape),
            b"pic" => Some(Self::Picture),
            b"graphicFrame" => Some(Self::GraphicFrame),
            b"grpSp" => Some(Self::GroupShape),
            b"cxnSp" => Some(Self::Connector),
            _ => None,
        }
    }
}

/// A top-level shape of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    shape_type: ShapeType,
    id: u32,
    name: String,
    /// `(type, idx)` of `<p:ph>`; the kind is `None` for types outside the built-in layouts
    placeholder: Option<(Option<PlaceholderKind>, u32)>,
    geometry: Option<Geometry>,
    fill: Option<RGBColor>,
    text_frame: Option<TextFrame>,
}

impl Shape {
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn placeholder_kind(&self) -> Option<PlaceholderKind> {
        self.placeholder.and_then(|(kind, _)| kind)
    }

    pub fn placeholder_idx(&self) -> Option<u32> {
        self.placeholder.map(|(_, idx)| idx)
    }

    /// Position and size when the shape declares them. Placeholders usually
    /// inherit theirs from the layout and return `None`.
    #[inline]
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Solid fill of the shape itself.
    #[inline]
    pub fn fill(&self) -> Option<RGBColor> {
        self.fill
    }

    #[inline]
    pub fn has_text_frame(&self) -> bool {
        self.text_frame.is_some()
    }

    #[inline]
    pub fn text_frame(&self) -> Option<&TextFrame> {
        self.text_frame.as_ref()
    }

    /// Paragraph texts joined with `\n`; empty without a text frame.
    pub fn text(&self) -> String {
        self.text_frame
            .as_ref()
            .map(TextFrame::text)
            .unwrap_or_default()
    }
}

fn attr_i64(value: &[u8]) -> Option<i64> {
    atoi_simd::parse::<i64>(value).ok()
}

fn attr_bool(value: &[u8]) -> bool {
    matches!(value, b"1" | b"true" | b"on")
}

/// Builds a [`Shape`] from the events inside one shape element.
///
/// The slide parser feeds every event between the shape's start and end tags.
pub(crate) struct ShapeBuilder {
    shape: Shape,
    id_seen: bool,
    in_xfrm: bool,
    xfrm_done: bool,
    in_sp_pr: bool,
    in_ln: bool,
    in_solid_fill: bool,
    in_rpr: bool,
    font_seen: bool,
    in_text: bool,
    paragraph: Option<Paragraph>,
}

impl ShapeBuilder {
    pub(crate) fn new(shape_type: ShapeType) -> Self {
        Self {
            shape: Shape {
                shape_type,
                id: 0,
                name: String::new(),
                placeholder: None,
                geometry: None,
                fill: None,
                text_frame: None,
            },
            id_seen: false,
            in_xfrm: false,
            xfrm_done: false,
            in_sp_pr: false,
            in_ln: false,
            in_solid_fill: false,
            in_rpr: false,
            font_seen: false,
            in_text: false,
            paragraph: None,
        }
    }

    /// Text of a group lives in its children, which are not read.
    fn reads_text(&self) -> bool {
        self.shape.shape_type != ShapeType::GroupShape
    }

    /// A start or empty tag. `empty` tags get no matching [`end`](Self::end).
    pub(crate) fn start(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<()> {
        match e.local_name().as_ref() {
            b"cNvPr" if !self.id_seen => {
                self.id_seen = true;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.local_name().as_ref() {
                        b"id" => self.shape.id = attr_i64(&attr.value).unwrap_or(0) as u32,
                        b"name" => self.shape.name = attr.unescape_value()?.into_owned(),
                        _ => {},
                    }
                }
            },
            b"ph" if self.shape.placeholder.is_none() => {
                let mut kind = None;
                let mut idx = 0;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.local_name().as_ref() {
                        b"type" => kind = Some(attr.unescape_value()?.into_owned()),
                        b"idx" => idx = attr_i64(&attr.value).unwrap_or(0) as u32,
                        _ => {},
                    }
                }
                self.shape.placeholder = Some((PlaceholderKind::from_xml_type(kind.as_deref()), idx));
            },
            b"spPr" => self.in_sp_pr = !empty,
            b"ln" if self.in_sp_pr => self.in_ln = !empty,
            b"xfrm" if !self.xfrm_done => {
                self.in_xfrm = !empty;
                self.shape.geometry.get_or_insert_with(Geometry::default);
            },
            b"off" if self.in_xfrm => {
                if let Some(geometry) = self.shape.geometry.as_mut() {
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"x" => geometry.left = attr_i64(&attr.value).unwrap_or(0),
                            b"y" => geometry.top = attr_i64(&attr.value).unwrap_or(0),
                            _ => {},
                        }
                    }
                }
            },
            b"ext" if self.in_xfrm => {
                if let Some(geometry) = self.shape.geometry.as_mut() {
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"cx" => geometry.width = attr_i64(&attr.value).unwrap_or(0),
                            b"cy" => geometry.height = attr_i64(&attr.value).unwrap_or(0),
                            _ => {},
                        }
                    }
                }
            },
            b"solidFill" => self.in_solid_fill = !empty,
            b"srgbClr" if self.in_solid_fill => {
                let color = e
                    .try_get_attribute("val")?
                    .and_then(|attr| RGBColor::from_hex(std::str::from_utf8(&attr.value).ok()?));
                if self.in_rpr {
                    if let Some(paragraph) = self.paragraph.as_mut() {
                        paragraph.font.color = color;
                    }
                } else if self.in_sp_pr && !self.in_ln && self.paragraph.is_none() {
                    self.shape.fill = color;
                }
            },
            b"txBody" if self.reads_text() => {
                self.shape.text_frame.get_or_insert_with(TextFrame::default);
            },
            b"p" if self.shape.text_frame.is_some() => {
                self.paragraph = Some(Paragraph::default());
                self.font_seen = false;
                if empty {
                    self.finish_paragraph();
                }
            },
            b"rPr" | b"endParaRPr" if self.paragraph.is_some() => {
                if !self.font_seen {
                    self.font_seen = true;
                    self.in_rpr = !empty;
                    if let Some(paragraph) = self.paragraph.as_mut() {
                        read_run_properties(e, &mut paragraph.font)?;
                    }
                }
            },
            b"latin" if self.in_rpr => {
                if let Some(attr) = e.try_get_attribute("typeface")?
                    && let Some(paragraph) = self.paragraph.as_mut()
                {
                    paragraph.font.name = Some(attr.unescape_value()?.into_owned());
                }
            },
            b"br" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.text.push('\n');
                }
            },
            b"t" if self.paragraph.is_some() => self.in_text = !empty,
            _ => {},
        }
        Ok(())
    }

    pub(crate) fn end(&mut self, local_name: &[u8]) {
        match local_name {
            b"spPr" => self.in_sp_pr = false,
            b"ln" => self.in_ln = false,
            b"xfrm" if self.in_xfrm => {
                self.in_xfrm = false;
                self.xfrm_done = true;
            },
            b"solidFill" => self.in_solid_fill = false,
            b"rPr" | b"endParaRPr" => self.in_rpr = false,
            b"t" => self.in_text = false,
            b"p" => self.finish_paragraph(),
            _ => {},
        }
    }

    /// Character data, already unescaped.
    pub(crate) fn text(&mut self, text: &str) {
        if self.in_text
            && let Some(paragraph) = self.paragraph.as_mut()
        {
            paragraph.text.push_str(text);
        }
    }

    fn finish_paragraph(&mut self) {
        if let (Some(paragraph), Some(frame)) = (self.paragraph.take(), self.shape.text_frame.as_mut()) {
            frame.paragraphs.push(paragraph);
        }
        self.in_text = false;
        self.in_rpr = false;
    }

    pub(crate) fn finish(self) -> Shape {
        self.shape
    }
}

fn read_run_properties(e: &BytesStart<'_>, font: &mut Font) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"sz" => {
                font.size = atoi_simd::parse::<u32>(&attr.value)
                    .ok()
                    .map(centipoints_to_pt);
            },
            b"b" => font.bold = Some(attr_bool(&attr.value)),
            b"i" => font.italic = Some(attr_bool(&attr.value)),
            _ => {},
        }
    }
    Ok(())
}

/// Slide parts.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package.
use crate::common::xml::resolve_entity;
use crate::ooxml::error::Result;
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::backgrounds::SlideBackground;
use crate::ooxml::pptx::shapes::base::{Shape, ShapeBuilder, ShapeType};
use quick_xml::events::Event;

/// A slide part.
pub struct SlidePart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> SlidePart<'a> {
    /// Create a SlidePart from an OPC Part.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Get the XML bytes of the slide.
    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// Get the background for this slide.
    ///
    /// Returns `None` if the slide inherits the master background.
    pub fn background(&self) -> Result<Option<SlideBackground>> {
        SlideBackground::from_xml(self.xml_bytes())
    }

    /// Parse the top-level shapes of the shape tree, in document order.
    pub fn shapes(&self) -> Result<Vec<Shape>> {
        // Text is not trimmed: spaces inside `a:t` are content.
        let mut reader = quick_xml::Reader::from_reader(self.xml_bytes());
        let mut buf = Vec::new();

        let mut shapes = Vec::new();
        // Element depth inside spTree, outside any shape
        let mut tree_depth: Option<usize> = None;
        // Builder of the current shape and element depth inside it
        let mut current: Option<(ShapeBuilder, usize)> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    if let Some((builder, depth)) = current.as_mut() {
                        *depth += 1;
                        builder.start(e, false)?;
                    } else if let Some(depth) = tree_depth.as_mut() {
                        match ShapeType::from_local_name(e.local_name().as_ref()) {
                            Some(shape_type) if *depth == 0 => {
                                current = Some((ShapeBuilder::new(shape_type), 0));
                            },
                            _ => *depth += 1,
                        }
                    } else if e.local_name().as_ref() == b"spTree" {
                        tree_depth = Some(0);
                    }
                },
                Event::Empty(ref e) => {
                    if let Some((builder, _)) = current.as_mut() {
                        builder.start(e, true)?;
                    }
                },
                Event::End(ref e) => {
                    if let Some((builder, depth)) = current.as_mut() {
                        if *depth == 0 {
                            if let Some((builder, _)) = current.take() {
                                shapes.push(builder.finish());
                            }
                        } else {
                            *depth -= 1;
                            builder.end(e.local_name().as_ref());
                        }
                    } else if let Some(depth) = tree_depth.as_mut() {
                        if *depth == 0 {
                            break;
                        }
                        *depth -= 1;
                    }
                },
                Event::Text(ref e) => {
                    if let Some((builder, _)) = current.as_mut() {
                        builder.text(std::str::from_utf8(e)?);
                    }
                },
                Event::CData(ref e) => {
                    if let Some((builder, _)) = current.as_mut() {
                        builder.text(std::str::from_utf8(e)?);
                    }
                },
                Event::GeneralRef(ref e) => {
                    if let Some((builder, _)) = current.as_mut() {
                        let name = std::str::from_utf8(e)?;
                        match resolve_entity(name) {
                            Some(ch) => builder.text(ch.encode_utf8(&mut [0u8; 4])),
                            None => builder.text(&format!("&{};", name)),
                        }
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(shapes)
    }
}

//! Shape position and size.

use serde::{Deserialize, Serialize};

/// Position and size of a shape, all in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Distance from the slide's left edge
    pub left: i64,
    /// Distance from the slide's top edge
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl Geometry {
    #[inline]
    pub const fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Y coordinate of the bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.top + self.height
    }

    /// X coordinate of the right edge.
    #[inline]
    pub const fn right(&self) -> i64 {
        self.left + self.width
    }

    /// Write this geometry as an `<a:xfrm>` element.
    pub(crate) fn write_xfrm(&self, xml: &mut String) {
        use std::fmt::Write;
        // Writing into a String cannot fail
        let _ = write!(
            xml,
            r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
            self.left, self.top, self.width, self.height
        );
    }
}

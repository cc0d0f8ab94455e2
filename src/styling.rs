//! Slide-styling helpers.
//!
//! Small mutations applied to shapes and slides after their content is set:
//! run fonts, background fill and the accent bar drawn under a title.

use crate::common::unit::inches;
use crate::common::{Geometry, RGBColor};
use crate::ooxml::error::Result;
use crate::ooxml::pptx::format::Font;
use crate::ooxml::pptx::writer::{MutableShape, MutableSlide};

/// Height of the underline bar: 0.05in.
pub const UNDERLINE_HEIGHT: i64 = 45720;

/// Fill color of the underline bar.
pub const UNDERLINE_COLOR: RGBColor = RGBColor::new(0x00, 0x70, 0xC0);

fn apply(font: &mut Font, size: f64, bold: bool, color: RGBColor, font_name: Option<&str>) {
    font.size = Some(size);
    font.bold = Some(bold);
    font.color = Some(color);
    if let Some(name) = font_name {
        font.name = Some(name.to_string());
    }
}

/// Style the first paragraph of a title shape.
///
/// `font_name` of `None` leaves the typeface as it is. Fails with
/// `NoTextFrame` for shapes that hold no text.
pub fn set_title_font(
    shape: &mut MutableShape,
    size: f64,
    bold: bool,
    color: RGBColor,
    font_name: Option<&str>,
) -> Result<()> {
    let paragraph = shape.text_frame_mut()?.first_paragraph_mut();
    apply(paragraph.font_mut(), size, bold, color, font_name);
    Ok(())
}

/// Style every paragraph of a body shape.
pub fn set_content_font(
    shape: &mut MutableShape,
    size: f64,
    bold: bool,
    color: RGBColor,
    font_name: Option<&str>,
) -> Result<()> {
    for paragraph in shape.text_frame_mut()?.paragraphs_mut() {
        apply(paragraph.font_mut(), size, bold, color, font_name);
    }
    Ok(())
}

/// Fill the slide background with a solid color.
pub fn set_slide_background(slide: &mut MutableSlide, color: RGBColor) {
    slide.set_background(color);
}

/// Position of the underline bar for a title at `title`.
pub fn underline_geometry(title: Geometry) -> Geometry {
    Geometry::new(title.left, title.bottom(), title.width, UNDERLINE_HEIGHT)
}

/// Draw a blue bar along the bottom edge of the title.
///
/// The bar spans the title width, is [`UNDERLINE_HEIGHT`] high, filled with
/// [`UNDERLINE_COLOR`] and has no outline.
pub fn add_blue_underline(slide: &mut MutableSlide, title: Geometry) -> &mut MutableShape {
    let bar = slide.add_rectangle(underline_geometry(title));
    bar.set_fill(UNDERLINE_COLOR);
    bar.set_no_line();
    bar
}

/// Convenience for callers working in inches.
pub fn geometry_in_inches(left: f64, top: f64, width: f64, height: f64) -> Geometry {
    Geometry::new(inches(left), inches(top), inches(width), inches(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::layout::SlideLayout;
    use crate::ooxml::pptx::writer::MutablePresentation;

    #[test]
    fn test_underline_below_title() {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide(SlideLayout::TitleAndContent);
        let title = slide.title().unwrap().geometry();

        let bar = add_blue_underline(slide, title);
        let geometry = bar.geometry();
        assert_eq!(geometry.left, 457200);
        assert_eq!(geometry.top, 274638 + 1143000);
        assert_eq!(geometry.width, 8229600);
        assert_eq!(geometry.height, UNDERLINE_HEIGHT);
        assert_eq!(bar.fill(), Some(UNDERLINE_COLOR));
        assert!(bar.no_line());
        assert_eq!(bar.text(), "");
    }

    #[test]
    fn test_font_name_none_keeps_existing() {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide(SlideLayout::TitleSlide);
        let title = slide.title_mut().unwrap();

        set_title_font(title, 40.0, true, RGBColor::BLACK, Some("Arial")).unwrap();
        set_title_font(title, 36.0, false, RGBColor::WHITE, None).unwrap();

        let font = title.text_frame().unwrap().first_paragraph().font();
        assert_eq!(font.name.as_deref(), Some("Arial"));
        assert_eq!(font.size, Some(36.0));
        assert_eq!(font.bold, Some(false));
    }

    #[test]
    fn test_picture_has_no_text_frame() {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide(SlideLayout::Blank);
        let pic = slide
            .add_picture_from_bytes(vec![0x89, b'P', b'N', b'G', 0, 0], Geometry::default())
            .unwrap();
        assert!(set_title_font(pic, 12.0, false, RGBColor::BLACK, None).is_err());
        assert!(set_content_font(pic, 12.0, false, RGBColor::BLACK, None).is_err());
    }

    #[test]
    fn test_slide_background() {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide(SlideLayout::Blank);
        set_slide_background(slide, RGBColor::new(0xF0, 0xF0, 0xF0));
        assert_eq!(slide.background().map(|bg| bg.color().to_hex()), Some("F0F0F0".to_string()));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn color_strategy() -> impl Strategy<Value = RGBColor> {
            any::<(u8, u8, u8)>().prop_map(|(r, g, b)| RGBColor::new(r, g, b))
        }

        fn font_name_strategy() -> impl Strategy<Value = Option<String>> {
            proptest::option::of("[A-Za-z][A-Za-z ]{0,15}")
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_title_font_sets_first_paragraph_only(
                size in 8.0f64..96.0,
                bold in any::<bool>(),
                color in color_strategy(),
                font_name in font_name_strategy(),
                lines in 1usize..5,
            ) {
                let mut pres = MutablePresentation::new();
                let slide = pres.add_slide(SlideLayout::TitleAndContent);
                let title = slide.title_mut().unwrap();
                let text = (0..lines).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
                title.set_text(&text).unwrap();

                set_title_font(title, size, bold, color, font_name.as_deref()).unwrap();

                let paragraphs = title.text_frame().unwrap().paragraphs();
                let font = paragraphs[0].font();
                prop_assert_eq!(font.size, Some(size));
                prop_assert_eq!(font.bold, Some(bold));
                prop_assert_eq!(font.color, Some(color));
                prop_assert_eq!(font.name.clone(), font_name);
                for paragraph in &paragraphs[1..] {
                    prop_assert!(paragraph.font().is_empty());
                }
            }

            #[test]
            fn prop_content_font_sets_every_paragraph(
                size in 8.0f64..96.0,
                bold in any::<bool>(),
                color in color_strategy(),
                font_name in font_name_strategy(),
                lines in 1usize..8,
            ) {
                let mut pres = MutablePresentation::new();
                let slide = pres.add_slide(SlideLayout::TitleAndContent);
                let body = slide.placeholder_mut(1).unwrap();
                let text = (0..lines).map(|i| format!("item {}", i)).collect::<Vec<_>>().join("\n");
                body.set_text(&text).unwrap();

                set_content_font(body, size, bold, color, font_name.as_deref()).unwrap();

                let paragraphs = body.text_frame().unwrap().paragraphs();
                prop_assert_eq!(paragraphs.len(), lines);
                for paragraph in paragraphs {
                    let font = paragraph.font();
                    prop_assert_eq!(font.size, Some(size));
                    prop_assert_eq!(font.bold, Some(bold));
                    prop_assert_eq!(font.color, Some(color));
                    prop_assert_eq!(font.name.clone(), font_name.clone());
                }
            }

            #[test]
            fn prop_underline_tracks_title(
                left in 0i64..9_144_000,
                top in 0i64..6_858_000,
                width in 1i64..9_144_000,
                height in 1i64..6_858_000,
            ) {
                let title = Geometry::new(left, top, width, height);
                let mut pres = MutablePresentation::new();
                let slide = pres.add_slide(SlideLayout::TitleOnly);
                let before = slide.shape_count();

                let bar = add_blue_underline(slide, title).geometry();
                prop_assert_eq!(bar.left, left);
                prop_assert_eq!(bar.width, width);
                prop_assert_eq!(bar.top, top + height);
                prop_assert_eq!(bar.height, UNDERLINE_HEIGHT);
                prop_assert_eq!(slide.shape_count(), before + 1);
            }
        }
    }
}

//! The research deck pipeline.
//!
//! A [`DeckSpec`] describes every slide: layout, title, body text, fonts,
//! background, picture and the underline bar. [`build_presentation`] turns it
//! into a [`MutablePresentation`] by adding slides in order and applying the
//! styling helpers; [`generate`] also saves the file and reports a
//! [`DeckSummary`].

pub mod config;
pub mod inspect;

use crate::common::RGBColor;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::pptx::writer::{MutablePresentation, MutableShape, MutableSlide};
use crate::styling::{
    add_blue_underline, geometry_in_inches, set_content_font, set_slide_background, set_title_font,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// File written by the default deck.
pub const DEFAULT_OUTPUT: &str = "styled_research_presentation.pptx";

/// File read by `check` when no path is given.
pub const DEFAULT_CHECK_PATH: &str = "research_presentation.pptx";

/// Picture placed on the third slide of the default deck.
pub const DEFAULT_IMAGE: &str = "path_to_image.png";

/// Errors of the deck pipeline.
#[derive(Error, Debug)]
pub enum DeckError {
    #[error(transparent)]
    Ooxml(#[from] OoxmlError),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML deck description could not be parsed
    #[error("Invalid deck config: {0}")]
    Config(String),

    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, DeckError>;

/// Which paragraphs a font applies to.
///
/// Without an explicit scope, title fonts style the first paragraph and body
/// fonts style every paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontScope {
    /// Only the first paragraph
    First,
    All,
}

/// Font attributes applied by the styling helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Size in points
    pub size: f64,
    #[serde(default)]
    pub bold: bool,
    pub color: RGBColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<FontScope>,
}

impl FontSpec {
    pub fn new(size: f64, bold: bool, color: RGBColor) -> Self {
        Self {
            size,
            bold,
            color,
            name: None,
            scope: None,
        }
    }

    pub fn first_paragraph_only(mut self) -> Self {
        self.scope = Some(FontScope::First);
        self
    }

    fn apply(
        &self,
        shape: &mut MutableShape,
        default_scope: FontScope,
    ) -> crate::ooxml::error::Result<()> {
        let name = self.name.as_deref();
        match self.scope.unwrap_or(default_scope) {
            FontScope::First => set_title_font(shape, self.size, self.bold, self.color, name),
            FontScope::All => set_content_font(shape, self.size, self.bold, self.color, name),
        }
    }
}

/// A picture and its placement, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub path: PathBuf,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// One slide of a deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSpec {
    /// Index of the built-in layout (0 = Title Slide, 1 = Title and Content, ...)
    pub layout: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Title font; the first paragraph unless a scope is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_font: Option<FontSpec>,
    /// Text of the placeholder with idx 1 (subtitle or content), one paragraph per line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_font: Option<FontSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<RGBColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSpec>,
    /// Draw the blue bar under the title
    pub underline: bool,
}

/// A complete deck description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSpec {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub slides: Vec<SlideSpec>,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

const NAVY: RGBColor = RGBColor::new(0, 51, 102);
const GREY: RGBColor = RGBColor::new(102, 102, 102);
const LIGHT_GREY: RGBColor = RGBColor::new(240, 240, 240);
const BODY_TEXT: RGBColor = RGBColor::new(0x33, 0x33, 0x33);

impl DeckSpec {
    /// The five-slide research deck.
    pub fn research_default() -> Self {
        let section_title = FontSpec::new(28.0, true, NAVY);
        let body = FontSpec::new(20.0, false, BODY_TEXT);

        let slides = vec![
            SlideSpec {
                layout: 0,
                title: Some("XX技術の進化とその応用".to_string()),
                title_font: Some(FontSpec::new(40.0, true, NAVY)),
                body: Some("山田 太郎\n2025年3月20日".to_string()),
                body_font: Some(FontSpec::new(18.0, false, GREY).first_paragraph_only()),
                background: Some(LIGHT_GREY),
                ..SlideSpec::default()
            },
            SlideSpec {
                layout: 1,
                title: Some("研究の目的".to_string()),
                title_font: Some(section_title.clone()),
                body: Some(
                    "・XX技術の現状と課題\n・技術の進化に向けたニーズ\n・本研究の目的は、XX技術の応用を拡大すること"
                        .to_string(),
                ),
                body_font: Some(body.clone()),
                background: Some(RGBColor::WHITE),
                underline: true,
                ..SlideSpec::default()
            },
            SlideSpec {
                layout: 1,
                title: Some("研究の動機・課題設定".to_string()),
                image: Some(ImageSpec {
                    path: PathBuf::from(DEFAULT_IMAGE),
                    left: 1.0,
                    top: 1.5,
                    width: 6.0,
                    height: 3.5,
                }),
                underline: true,
                ..SlideSpec::default()
            },
            SlideSpec {
                layout: 1,
                title: Some("研究結果".to_string()),
                underline: true,
                ..SlideSpec::default()
            },
            SlideSpec {
                layout: 1,
                title: Some("結論".to_string()),
                title_font: Some(section_title),
                body: Some("・本研究の要点\n・XX技術の重要性\n・研究の意義と社会への貢献".to_string()),
                body_font: Some(body),
                underline: true,
                ..SlideSpec::default()
            },
        ];

        Self {
            output: default_output(),
            title: Some("XX技術の進化とその応用".to_string()),
            author: Some("山田 太郎".to_string()),
            slides,
        }
    }
}

/// Options of a generator run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Skip pictures whose file is missing instead of failing
    pub skip_missing_images: bool,
    /// Write here instead of the deck's own output path
    pub output: Option<PathBuf>,
}

/// Title and shape count of one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideSummary {
    pub title: Option<String>,
    pub shape_count: usize,
}

/// Structural content of a deck. Two runs over the same input yield equal summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckSummary {
    pub slides: Vec<SlideSummary>,
}

impl DeckSummary {
    pub fn from_presentation(pres: &MutablePresentation) -> Self {
        let slides = pres
            .slides()
            .iter()
            .map(|slide| SlideSummary {
                title: slide.title().ok().map(MutableShape::text),
                shape_count: slide.shape_count(),
            })
            .collect();
        Self { slides }
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Build the presentation described by `spec`, slide by slide.
pub fn build_presentation(spec: &DeckSpec, options: &GenerateOptions) -> Result<MutablePresentation> {
    let mut pres = MutablePresentation::new();
    let core = pres.core_properties_mut();
    core.title = spec.title.clone();
    core.author = spec.author.clone();

    for (index, slide_spec) in spec.slides.iter().enumerate() {
        let slide = pres.add_slide_by_index(slide_spec.layout)?;
        populate_slide(slide, slide_spec, options)?;
        info!(
            slide = index + 1,
            layout = slide.layout().name(),
            title = slide_spec.title.as_deref().unwrap_or(""),
            "added slide"
        );
    }

    Ok(pres)
}

fn populate_slide(slide: &mut MutableSlide, spec: &SlideSpec, options: &GenerateOptions) -> Result<()> {
    if let Some(ref text) = spec.title {
        let title = slide.title_mut()?;
        title.set_text(text)?;
        if let Some(ref font) = spec.title_font {
            font.apply(title, FontScope::First)?;
        }
    }

    if let Some(ref text) = spec.body {
        let body = slide.placeholder_mut(1)?;
        body.set_text(text)?;
        if let Some(ref font) = spec.body_font {
            font.apply(body, FontScope::All)?;
        }
    }

    if let Some(color) = spec.background {
        set_slide_background(slide, color);
    }

    if let Some(ref image) = spec.image {
        add_image(slide, image, options)?;
    }

    if spec.underline {
        let title = slide.title()?.geometry();
        add_blue_underline(slide, title);
    }

    Ok(())
}

fn add_image(slide: &mut MutableSlide, image: &ImageSpec, options: &GenerateOptions) -> Result<()> {
    if !image.path.is_file() {
        if options.skip_missing_images {
            warn!(path = %image.path.display(), "image not found, skipping picture");
            return Ok(());
        }
        return Err(DeckError::ImageNotFound(image.path.clone()));
    }

    let geometry = geometry_in_inches(image.left, image.top, image.width, image.height);
    slide.add_picture(&image.path, geometry)?;
    Ok(())
}

/// Build the deck and save it.
pub fn generate(spec: &DeckSpec, options: &GenerateOptions) -> Result<(PathBuf, DeckSummary)> {
    let pres = build_presentation(spec, options)?;
    let output = options.output.clone().unwrap_or_else(|| spec.output.clone());
    save(&pres, &output)?;
    Ok((output, DeckSummary::from_presentation(&pres)))
}

fn save(pres: &MutablePresentation, path: &Path) -> Result<()> {
    pres.save(path).map_err(|e| match e {
        OoxmlError::Io(source) | OoxmlError::Opc(OpcError::IoError(source)) => DeckError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => DeckError::Ooxml(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::layout::SlideLayout;
    use crate::styling::UNDERLINE_HEIGHT;

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    fn skip_images() -> GenerateOptions {
        GenerateOptions {
            skip_missing_images: true,
            output: None,
        }
    }

    #[test]
    fn test_default_deck_shape() {
        let spec = DeckSpec::research_default();
        assert_eq!(spec.slides.len(), 5);
        assert_eq!(spec.output, PathBuf::from(DEFAULT_OUTPUT));

        let pres = build_presentation(&spec, &skip_images()).unwrap();
        let summary = DeckSummary::from_presentation(&pres);
        let titles: Vec<&str> = summary.slides.iter().filter_map(|s| s.title.as_deref()).collect();
        assert_eq!(
            titles,
            vec!["XX技術の進化とその応用", "研究の目的", "研究の動機・課題設定", "研究結果", "結論"]
        );
        // title + subtitle; title + content + underline; the picture is skipped on slide 3
        let counts: Vec<usize> = summary.slides.iter().map(|s| s.shape_count).collect();
        assert_eq!(counts, vec![2, 3, 3, 3, 3]);
    }

    #[test]
    fn test_title_slide_styling() {
        let pres = build_presentation(&DeckSpec::research_default(), &skip_images()).unwrap();
        let slide = &pres.slides()[0];
        assert_eq!(slide.layout(), SlideLayout::TitleSlide);
        assert_eq!(slide.background().map(|bg| bg.color()), Some(LIGHT_GREY));

        let title_font = slide.title().unwrap().text_frame().unwrap().first_paragraph().font().clone();
        assert_eq!(title_font.size, Some(40.0));
        assert_eq!(title_font.bold, Some(true));
        assert_eq!(title_font.color, Some(NAVY));

        let subtitle = slide.placeholder(1).unwrap().text_frame().unwrap();
        assert_eq!(subtitle.paragraphs().len(), 2);
        assert_eq!(subtitle.paragraphs()[0].font().size, Some(18.0));
        assert_eq!(subtitle.paragraphs()[0].font().color, Some(GREY));
        assert!(subtitle.paragraphs()[1].font().is_empty());
    }

    #[test]
    fn test_title_font_scope() {
        let slide = |scope| SlideSpec {
            layout: 5,
            title: Some("Line one\nLine two".to_string()),
            title_font: Some(FontSpec {
                scope,
                ..FontSpec::new(30.0, true, NAVY)
            }),
            ..SlideSpec::default()
        };
        let spec = DeckSpec {
            output: default_output(),
            title: None,
            author: None,
            slides: vec![slide(None), slide(Some(FontScope::All))],
        };

        let pres = build_presentation(&spec, &skip_images()).unwrap();
        let sizes = |index: usize| -> Vec<Option<f64>> {
            let title = pres.slide(index).unwrap().title().unwrap();
            let frame = title.text_frame().unwrap();
            frame.paragraphs().iter().map(|p| p.font().size).collect()
        };
        assert_eq!(sizes(0), vec![Some(30.0), None]);
        assert_eq!(sizes(1), vec![Some(30.0), Some(30.0)]);
    }

    #[test]
    fn test_underline_follows_title() {
        let pres = build_presentation(&DeckSpec::research_default(), &skip_images()).unwrap();
        let slide = &pres.slides()[1];
        let title = slide.title().unwrap().geometry();
        let bar = slide.shapes().last().unwrap().geometry();
        assert_eq!(bar.top, title.bottom());
        assert_eq!(bar.left, title.left);
        assert_eq!(bar.width, title.width);
        assert_eq!(bar.height, UNDERLINE_HEIGHT);
    }

    #[test]
    fn test_missing_image_is_an_error_by_default() {
        let mut spec = DeckSpec::research_default();
        spec.slides[2].image.as_mut().unwrap().path = PathBuf::from("missing/figure.png");

        let err = build_presentation(&spec, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, DeckError::ImageNotFound(ref p) if p.ends_with("figure.png")));
    }

    #[test]
    fn test_image_is_placed_in_inches() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("figure.png");
        std::fs::write(&image, PNG_BYTES).unwrap();

        let mut spec = DeckSpec::research_default();
        spec.slides[2].image.as_mut().unwrap().path = image;

        let pres = build_presentation(&spec, &GenerateOptions::default()).unwrap();
        let slide = &pres.slides()[2];
        let picture = slide.shapes().iter().find(|s| s.is_picture()).unwrap();
        assert_eq!(picture.geometry(), geometry_in_inches(1.0, 1.5, 6.0, 3.5));
        assert_eq!(slide.shape_count(), 4);
    }

    #[test]
    fn test_bad_layout_index() {
        let spec = DeckSpec {
            output: default_output(),
            title: None,
            author: None,
            slides: vec![SlideSpec {
                layout: 11,
                ..SlideSpec::default()
            }],
        };
        let err = build_presentation(&spec, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, DeckError::Ooxml(OoxmlError::LayoutNotFound(11))));
    }

    #[test]
    fn test_title_on_blank_layout() {
        let spec = DeckSpec {
            output: default_output(),
            title: None,
            author: None,
            slides: vec![SlideSpec {
                layout: 6,
                title: Some("nowhere".to_string()),
                ..SlideSpec::default()
            }],
        };
        let err = build_presentation(&spec, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, DeckError::Ooxml(OoxmlError::MissingTitle)));
    }

    #[test]
    fn test_generate_twice_gives_equal_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let spec = DeckSpec::research_default();

        let first = GenerateOptions {
            skip_missing_images: true,
            output: Some(dir.path().join("a.pptx")),
        };
        let second = GenerateOptions {
            output: Some(dir.path().join("b.pptx")),
            ..first.clone()
        };

        let (path_a, summary_a) = generate(&spec, &first).unwrap();
        let (path_b, summary_b) = generate(&spec, &second).unwrap();
        assert_eq!(summary_a, summary_b);
        assert!(path_a.is_file() && path_b.is_file());
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let options = GenerateOptions {
            skip_missing_images: true,
            output: Some(dir.path().join("no/such/dir/deck.pptx")),
        };
        let err = generate(&DeckSpec::research_default(), &options).unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
    }
}

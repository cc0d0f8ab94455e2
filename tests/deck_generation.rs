//! End-to-end tests: generate decks to disk and read them back.

use std::path::Path;

use deckweave::common::RGBColor;
use deckweave::deck::{self, DeckError, DeckSpec, GenerateOptions, config, inspect};
use deckweave::ooxml::pptx::{Package, PlaceholderKind, ShapeType};
use deckweave::styling::{UNDERLINE_COLOR, UNDERLINE_HEIGHT};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

fn generate_into(dir: &Path, spec: &DeckSpec, skip_missing_images: bool) -> std::path::PathBuf {
    let options = GenerateOptions {
        skip_missing_images,
        output: Some(dir.join("deck.pptx")),
    };
    let (path, summary) = deck::generate(spec, &options).unwrap();
    assert_eq!(summary.slide_count(), spec.slides.len());
    path
}

#[test]
fn test_research_deck_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate_into(dir.path(), &DeckSpec::research_default(), true);

    let pkg = Package::open(&path).unwrap();
    let pres = pkg.presentation().unwrap();
    assert_eq!(pres.slide_count().unwrap(), 5);
    assert_eq!(pres.slide_width().unwrap(), Some(9_144_000));
    assert_eq!(pres.slide_height().unwrap(), Some(6_858_000));

    let slides = pres.slides().unwrap();
    let titles: Vec<_> = slides.iter().map(|s| s.title().unwrap()).collect();
    assert_eq!(
        titles,
        vec![
            Some("XX技術の進化とその応用".to_string()),
            Some("研究の目的".to_string()),
            Some("研究の動機・課題設定".to_string()),
            Some("研究結果".to_string()),
            Some("結論".to_string()),
        ]
    );

    assert_eq!(slides[0].background_color().unwrap(), Some(RGBColor::new(240, 240, 240)));
    assert_eq!(slides[1].background_color().unwrap(), Some(RGBColor::WHITE));
    assert_eq!(slides[2].background_color().unwrap(), None);
}

#[test]
fn test_fonts_survive_the_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate_into(dir.path(), &DeckSpec::research_default(), true);

    let pkg = Package::open(&path).unwrap();
    let slides = pkg.presentation().unwrap().slides().unwrap();

    // Title slide: 40pt bold navy title, subtitle styled on its first line only
    let shapes = slides[0].shapes().unwrap();
    let title = shapes
        .iter()
        .find(|s| s.placeholder_kind() == Some(PlaceholderKind::CenterTitle))
        .unwrap();
    let font = title.text_frame().unwrap().paragraphs()[0].font();
    assert_eq!(font.size, Some(40.0));
    assert_eq!(font.bold, Some(true));
    assert_eq!(font.color, Some(RGBColor::new(0, 51, 102)));

    let subtitle = shapes.iter().find(|s| s.placeholder_idx() == Some(1)).unwrap();
    let paragraphs = subtitle.text_frame().unwrap().paragraphs();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].text(), "山田 太郎");
    assert_eq!(paragraphs[0].font().size, Some(18.0));
    assert_eq!(paragraphs[0].font().color, Some(RGBColor::new(102, 102, 102)));
    assert_eq!(paragraphs[1].font().size, None);

    // Conclusion slide: every body paragraph at 20pt
    let body = slides[4]
        .shapes()
        .unwrap()
        .into_iter()
        .find(|s| s.placeholder_idx() == Some(1))
        .unwrap();
    let paragraphs = body.text_frame().unwrap().paragraphs();
    assert_eq!(paragraphs.len(), 3);
    for paragraph in paragraphs {
        assert_eq!(paragraph.font().size, Some(20.0));
        assert_eq!(paragraph.font().bold, Some(false));
        assert_eq!(paragraph.font().color, Some(RGBColor::new(0x33, 0x33, 0x33)));
    }
}

#[test]
fn test_underline_sits_below_title() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate_into(dir.path(), &DeckSpec::research_default(), true);

    let pkg = Package::open(&path).unwrap();
    let slides = pkg.presentation().unwrap().slides().unwrap();
    let shapes = slides[1].shapes().unwrap();

    let bar = shapes
        .iter()
        .find(|s| !s.is_placeholder() && s.fill() == Some(UNDERLINE_COLOR))
        .unwrap();
    let geometry = bar.geometry().unwrap();
    assert_eq!(geometry.height, UNDERLINE_HEIGHT);

    // The title inherits its position from the layout, so compare with the writer side
    let pres = deck::build_presentation(&DeckSpec::research_default(), &GenerateOptions {
        skip_missing_images: true,
        output: None,
    })
    .unwrap();
    let title = pres.slide(1).unwrap().title().unwrap().geometry();
    assert_eq!(geometry.left, title.left);
    assert_eq!(geometry.width, title.width);
    assert_eq!(geometry.top, title.top + title.height);
}

#[test]
fn test_picture_is_embedded_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("chart.png");
    std::fs::write(&image, PNG_BYTES).unwrap();

    let mut spec = DeckSpec::research_default();
    spec.slides[2].image.as_mut().unwrap().path = image;
    let path = generate_into(dir.path(), &spec, false);

    let pkg = Package::open(&path).unwrap();
    let slides = pkg.presentation().unwrap().slides().unwrap();
    let shapes = slides[2].shapes().unwrap();
    let picture = shapes
        .iter()
        .find(|s| s.shape_type() == ShapeType::Picture)
        .unwrap();
    let geometry = picture.geometry().unwrap();
    assert_eq!(geometry.left, 914_400);
    assert_eq!(geometry.top, 1_371_600);
    assert_eq!(geometry.width, 5_486_400);
    assert_eq!(geometry.height, 3_200_400);
}

#[test]
fn test_missing_picture_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut spec = DeckSpec::research_default();
    spec.slides[2].image.as_mut().unwrap().path = dir.path().join("absent.png");

    let options = GenerateOptions {
        skip_missing_images: false,
        output: Some(dir.path().join("deck.pptx")),
    };
    let err = deck::generate(&spec, &options).unwrap_err();
    assert!(matches!(err, DeckError::ImageNotFound(_)));
    assert!(!dir.path().join("deck.pptx").exists());
}

#[test]
fn test_inspector_lists_every_text_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate_into(dir.path(), &DeckSpec::research_default(), true);

    let slides = inspect::collect_text(&path).unwrap();
    assert_eq!(slides.len(), 5);
    assert_eq!(slides[0], vec!["XX技術の進化とその応用", "山田 太郎\n2025年3月20日"]);
    assert!(slides[1][1].starts_with("・XX技術の現状と課題"));
    assert_eq!(slides[4][0], "結論");
}

#[test]
fn test_runs_produce_equal_summaries() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let spec = DeckSpec::research_default();

    let a = inspect::summarize(generate_into(first.path(), &spec, true)).unwrap();
    let b = inspect::summarize(generate_into(second.path(), &spec, true)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.slide_count(), 5);
}

#[test]
fn test_yaml_deck_generates() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = r##"
output: from_yaml.pptx
slides:
  - layout: 5
    title: "Overview"
    title_font: { size: 32.0, bold: true, color: "#C00000" }
    background: "FFFFFF"
    underline: true
"##;
    let config_path = dir.path().join("deck.yaml");
    std::fs::write(&config_path, yaml).unwrap();

    let spec = config::load(&config_path).unwrap();
    let path = generate_into(dir.path(), &spec, false);

    let pkg = Package::open(&path).unwrap();
    let slides = pkg.presentation().unwrap().slides().unwrap();
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].title().unwrap().as_deref(), Some("Overview"));
    let shapes = slides[0].shapes().unwrap();
    let font = shapes[0].text_frame().unwrap().paragraphs()[0].font();
    assert_eq!(font.color, Some(RGBColor::new(0xC0, 0, 0)));
    assert_eq!(shapes.len(), 2);
}

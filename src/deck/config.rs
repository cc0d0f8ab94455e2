//! YAML deck descriptions.
//!
//! ```yaml
//! output: deck.pptx
//! slides:
//!   - layout: 0
//!     title: Quarterly review
//!     title_font: { size: 40, bold: true, color: "#003366" }
//!     background: F0F0F0
//!   - layout: 1
//!     title: Results
//!     body: "First point\nSecond point"
//!     underline: true
//! ```
//!
//! Colors are hex strings with or without `#`, lengths are inches and font
//! sizes are points. Relative image paths are resolved against the directory
//! of the YAML file.

use super::{DeckError, DeckSpec, Result};
use std::path::Path;
use tracing::debug;

/// Parse a deck description.
pub fn from_yaml_str(yaml: &str) -> Result<DeckSpec> {
    serde_saphyr::from_str(yaml).map_err(|e| DeckError::Config(e.to_string()))
}

/// Read and parse a deck description from `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DeckSpec> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut spec = from_yaml_str(&yaml)?;
    if let Some(base) = path.parent() {
        for image in spec.slides.iter_mut().filter_map(|s| s.image.as_mut()) {
            if image.path.is_relative() {
                image.path = base.join(&image.path);
            }
        }
    }

    debug!(path = %path.display(), slides = spec.slides.len(), "loaded deck config");
    Ok(spec)
}

/// Serialize a deck description, e.g. the default deck as a starting point.
pub fn to_yaml_string(spec: &DeckSpec) -> Result<String> {
    serde_saphyr::to_string(spec)
        .map_err(|e| DeckError::Config(format!("Failed to serialize deck to YAML: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::deck::{DEFAULT_OUTPUT, FontScope};
    use std::path::PathBuf;

    const DECK: &str = r##"
output: review.pptx
author: Analyst
slides:
  - layout: 0
    title: Quarterly review
    title_font: { size: 40, bold: true, color: "#003366" }
    body: "Team\n2025"
    body_font: { size: 18, color: "666666", scope: first }
    background: F0F0F0
  - layout: 1
    title: Results
    underline: true
    image: { path: img/chart.png, left: 1, top: 1.5, width: 6, height: 3.5 }
"##;

    #[test]
    fn test_parse_deck() {
        let spec = from_yaml_str(DECK).unwrap();
        assert_eq!(spec.output, PathBuf::from("review.pptx"));
        assert_eq!(spec.author.as_deref(), Some("Analyst"));
        assert_eq!(spec.title, None);
        assert_eq!(spec.slides.len(), 2);

        let first = &spec.slides[0];
        let title_font = first.title_font.as_ref().unwrap();
        assert_eq!(title_font.size, 40.0);
        assert!(title_font.bold);
        assert_eq!(title_font.color, RGBColor::new(0, 51, 102));
        assert_eq!(first.body.as_deref(), Some("Team\n2025"));
        let body_font = first.body_font.as_ref().unwrap();
        assert!(!body_font.bold);
        assert_eq!(body_font.scope, Some(FontScope::First));
        assert_eq!(first.background, Some(RGBColor::new(240, 240, 240)));
        assert!(!first.underline);

        let second = &spec.slides[1];
        assert!(second.underline);
        assert_eq!(second.image.as_ref().unwrap().top, 1.5);
    }

    #[test]
    fn test_defaults_and_errors() {
        let spec = from_yaml_str("slides: []").unwrap();
        assert_eq!(spec.output, PathBuf::from(DEFAULT_OUTPUT));

        assert!(matches!(from_yaml_str("output: x.pptx"), Err(DeckError::Config(_))));
        let bad_color = "slides:\n  - background: navy\n";
        assert!(matches!(from_yaml_str(bad_color), Err(DeckError::Config(_))));
    }

    #[test]
    fn test_load_resolves_images_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.yaml");
        std::fs::write(&path, DECK).unwrap();

        let spec = load(&path).unwrap();
        let image = spec.slides[1].image.as_ref().unwrap();
        assert_eq!(image.path, dir.path().join("img/chart.png"));

        assert!(matches!(load(dir.path().join("missing.yaml")), Err(DeckError::Io { .. })));
    }

    #[test]
    fn test_default_deck_survives_yaml() {
        let spec = DeckSpec::research_default();
        let yaml = to_yaml_string(&spec).unwrap();
        assert!(yaml.contains("研究の目的"));
        assert_eq!(from_yaml_str(&yaml).unwrap(), spec);
    }
}

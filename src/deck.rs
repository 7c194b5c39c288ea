// ABOUTME: Deck description files and the end-to-end build
// ABOUTME: Loads a JSON deck, renders every slide through the templates and writes the PPTX

use crate::components::BlockContext;
use crate::config::Config;
use crate::errors::{DeckError, Result};
use crate::icons::IconCatalog;
use crate::pptx;
use crate::slide::Slide;
use crate::templates::{SlideData, render_slides};
use crate::theme::{Theme, ThemeName};
use crate::utils;
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A deck description: `{ "title", "theme", "brand", "slides": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deck {
    pub title: Option<String>,
    pub theme: Option<ThemeName>,
    /// Footer brand for every slide that does not set its own.
    pub brand: Option<String>,
    pub slides: Vec<SlideData>,
}

impl Deck {
    /// Parse and validate a deck from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let deck: Deck = serde_json::from_str(text)?;
        if deck.slides.is_empty() {
            return Err(DeckError::ValidationError(
                "Deck has no slides".to_string(),
            ));
        }
        Ok(deck)
    }
}

/// Read a deck description from disk.
pub fn load_deck(path: &Path) -> Result<Deck> {
    utils::validate_file_exists(path)?;
    let text = fs::read_to_string(path)?;
    Deck::from_json(&text)
}

/// Render every slide of `deck`. `brand` overrides the deck's brand.
pub fn build_slides(
    deck: &Deck,
    theme: &Theme,
    icons: &IconCatalog,
    brand: Option<&str>,
) -> Vec<Slide> {
    let ctx = BlockContext::new(theme, icons).with_brand(brand.or(deck.brand.as_deref()));
    render_slides(&ctx, &deck.slides)
}

/// Load `input`, render it and write `output`. Returns the slide count.
pub fn generate_deck(input: &Path, output: &Path, config: &Config) -> Result<usize> {
    let deck = load_deck(input)?;
    let icons = IconCatalog::with_overrides(config.icon_dir.as_deref())?;
    let theme_name = config.resolve_theme(deck.theme);
    let theme = theme_name.theme();

    info!(
        "Building {:?} with the {} theme ({} slides)",
        input,
        theme_name,
        deck.slides.len()
    );

    let slides = build_slides(&deck, theme, &icons, config.brand.as_deref());
    let pptx_config = config.get_pptx_config(deck.title.as_deref(), theme);
    pptx::generate_pptx(&slides, output, &pptx_config)?;

    Ok(slides.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::SlideKind;
    use tempfile::TempDir;

    const DECK: &str = r#"{
        "title": "Quarterly Review",
        "theme": "light",
        "brand": "ACME",
        "slides": [
            {"type": "title", "title": "Q3", "subtitle": "Results"},
            {"type": "bullets", "title": "Wins", "items": [{"text": "Revenue up", "bold": true}], "brand": "SALES"}
        ]
    }"#;

    #[test]
    fn parses_deck_description() {
        let deck = Deck::from_json(DECK).unwrap();
        assert_eq!(deck.title.as_deref(), Some("Quarterly Review"));
        assert_eq!(deck.theme, Some(ThemeName::Light));
        assert_eq!(deck.slides.len(), 2);
        assert!(matches!(deck.slides[1].kind, SlideKind::Bullets(_)));
    }

    #[test]
    fn empty_deck_is_rejected() {
        let err = Deck::from_json(r#"{"slides": []}"#).unwrap_err();
        assert!(matches!(err, DeckError::ValidationError(_)));
    }

    #[test]
    fn unknown_slide_type_is_a_format_error() {
        let err = Deck::from_json(r#"{"slides": [{"type": "gantt", "title": "x"}]}"#).unwrap_err();
        assert!(matches!(err, DeckError::DeckFormatError(_)));
    }

    #[test]
    fn brand_precedence_is_override_then_slide_then_deck() {
        let deck = Deck::from_json(DECK).unwrap();
        let icons = IconCatalog::new();
        let theme = ThemeName::Light.theme();

        let slides = build_slides(&deck, theme, &icons, None);
        assert!(slides[0].texts().any(|t| t == "ACME"));
        assert!(slides[1].texts().any(|t| t == "SALES"));

        let slides = build_slides(&deck, theme, &icons, Some("OVERRIDE"));
        assert!(slides[0].texts().any(|t| t == "OVERRIDE"));
        assert!(slides[1].texts().any(|t| t == "SALES"));
    }

    #[test]
    fn generate_deck_writes_package() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("deck.json");
        let output = dir.path().join("out/deck.pptx");
        fs::write(&input, DECK).unwrap();

        let count = generate_deck(&input, &output, &Config::new()).unwrap();

        assert_eq!(count, 2);
        assert!(output.exists());
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = load_deck(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DeckError::PathNotFoundError(_)));
    }
}

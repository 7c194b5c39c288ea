// ABOUTME: Configuration module for the deck-blocks application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::errors::{DeckError, Result};
use crate::pptx::PptxConfig;
use crate::theme::{Theme, ThemeName};
use std::env;
use std::path::PathBuf;

const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_TITLE: &str = "Presentation";

/// Global configuration for the application.
///
/// Values set here override what a deck file declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub theme: Option<ThemeName>,
    pub brand: Option<String>,
    pub title: Option<String>,
    /// Directory of `<family>.json` files layered over the bundled icons.
    pub icon_dir: Option<PathBuf>,
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            brand: None,
            title: None,
            icon_dir: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let theme = get("DECK_THEME").map(|s| s.parse::<ThemeName>()).transpose()?;
        let debounce_ms = match get("WATCH_DEBOUNCE_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                DeckError::ConfigError(format!("WATCH_DEBOUNCE_MS is not a number: {}", raw))
            })?,
            None => DEFAULT_DEBOUNCE_MS,
        };

        Ok(Self {
            theme,
            brand: get("DECK_BRAND"),
            title: get("DECK_TITLE"),
            icon_dir: get("ICON_DIR").map(PathBuf::from),
            debounce_ms,
        })
    }

    /// Theme to render with: configured first, then the deck's own, then dark.
    pub fn resolve_theme(&self, deck_theme: Option<ThemeName>) -> ThemeName {
        self.theme.or(deck_theme).unwrap_or_default()
    }

    /// Get a PPTX configuration sized for `theme`
    pub fn get_pptx_config(&self, deck_title: Option<&str>, theme: &Theme) -> PptxConfig {
        PptxConfig {
            title: self
                .title
                .as_deref()
                .or(deck_title)
                .unwrap_or(DEFAULT_TITLE)
                .to_string(),
            slide_width: theme.layout.slide_w,
            slide_height: theme.layout.slide_h,
            ..PptxConfig::default()
        }
    }
}

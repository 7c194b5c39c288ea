// ABOUTME: Error types for the deck-blocks library
// ABOUTME: Separates recoverable icon extraction failures from deck build failures

use std::path::PathBuf;
use thiserror::Error;

/// Reasons an icon could not be turned into vector markup.
///
/// These never abort a deck build: the embedding adapter converts every
/// variant into a placeholder shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IconError {
    #[error("Icon family '{family}' is not available")]
    FamilyUnavailable { family: String },

    #[error("Icon {icon} not found in family '{family}'")]
    NotFound { family: String, icon: String },

    #[error("Cannot parse icon {icon}: {reason}")]
    UnparseableSource { icon: String, reason: String },
}

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Invalid deck description: {0}")]
    DeckFormatError(#[from] serde_json::Error),

    #[error("Icon catalog error: {0}")]
    IconCatalogError(String),

    #[error(transparent)]
    IconError(#[from] IconError),

    #[error("Media error: {0}")]
    MediaError(String),

    #[error("PPTX generation error: {0}")]
    PptxError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

// Implement conversion from anyhow::Error to our DeckError
impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        DeckError::UnknownError(err.to_string())
    }
}

// Implement conversion from zip errors
impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::PptxError(format!("ZIP operation failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;

// ABOUTME: Utility functions for the deck-blocks library
// ABOUTME: Path validation, temp paths and unit conversion helpers

use crate::errors::{DeckError, Result};
use std::path::{Path, PathBuf};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// English Metric Units per point.
pub const EMU_PER_POINT: f64 = 12_700.0;

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DeckError::PathNotFoundError(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DeckError::ValidationError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(DeckError::FileReadError)?;
    } else if !path.is_dir() {
        return Err(DeckError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}

/// Unique path next to `path`, for writing before an atomic rename.
pub fn temp_sibling_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
}

/// Get the absolute path
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| {
        DeckError::ValidationError(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}

pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

pub fn points_to_emu(points: f64) -> i64 {
    (points * EMU_PER_POINT).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_units() {
        assert_eq!(inches_to_emu(10.0), 9_144_000);
        assert_eq!(inches_to_emu(0.5), 457_200);
        assert_eq!(points_to_emu(1.5), 19_050);
    }

    #[test]
    fn temp_sibling_stays_in_the_same_directory() {
        let target = Path::new("/tmp/decks/out.pptx");
        let temp = temp_sibling_path(target);

        assert_eq!(temp.parent(), target.parent());
        assert_ne!(temp, target);
        assert!(temp.to_string_lossy().ends_with(".tmp"));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = validate_file_exists(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(DeckError::PathNotFoundError(_))));
    }
}

// ABOUTME: Watch module for monitoring deck changes and rebuilding the PPTX
// ABOUTME: Rebuilds whenever the deck description or an icon family file changes

use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::{DebouncedEvent, new_debouncer};

use crate::config::Config as AppConfig;
use crate::deck;
use crate::errors::{DeckError, Result};
use crate::utils;

/// Configuration for watch mode
pub struct WatchConfig {
    /// Path to the deck description to watch
    pub deck_path: PathBuf,

    /// Output PPTX file path
    pub output: PathBuf,

    /// Icon family directory, watched as well when set
    pub icon_dir: Option<PathBuf>,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,
}

impl WatchConfig {
    pub fn new(deck_path: PathBuf, output: PathBuf, app_config: &AppConfig) -> Self {
        Self {
            deck_path,
            output,
            icon_dir: app_config.icon_dir.clone(),
            debounce_ms: app_config.debounce_ms,
        }
    }
}

/// Build once, then rebuild the deck every time a relevant file changes.
///
/// Failed rebuilds are logged and the previous output is left in place.
pub fn watch_deck(config: WatchConfig, app_config: &AppConfig) -> Result<()> {
    utils::validate_file_exists(&config.deck_path)?;
    utils::ensure_parent_directory_exists(&config.output)?;

    let mut build_config = app_config.clone();
    build_config.icon_dir = config.icon_dir.clone();

    // Initial build; a broken deck should not stop the watcher from starting
    if let Err(e) = rebuild(&config, &build_config) {
        error!("Initial build failed: {}", e);
    }

    let (tx, rx) = mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| DeckError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    let deck_dir = match config.deck_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut watch_dirs = vec![utils::get_absolute_path(deck_dir)?];
    if let Some(icon_dir) = &config.icon_dir {
        let abs = utils::get_absolute_path(icon_dir)?;
        if !watch_dirs.iter().any(|d| abs.starts_with(d)) {
            watch_dirs.push(abs);
        }
    }

    for dir in &watch_dirs {
        debug!("Watching absolute path: {:?}", dir);
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::Recursive)
            .map_err(|e| {
                DeckError::WatchError(format!("Failed to start watching {:?}: {}", dir, e))
            })?;
    }

    info!("Watching for changes in {:?}", watch_dirs);
    println!(
        "Watching {:?} for changes (Press Ctrl+C to stop)",
        config.deck_path
    );

    // The debouncer already coalesces bursts, so every relevant batch rebuilds
    for result in rx {
        match result {
            Ok(events) => match process_batch(&events, &config, &build_config) {
                Some(Ok(count)) => info!("Rebuilt {} slides", count),
                Some(Err(e)) => error!("Failed to rebuild deck: {}", e),
                None => {}
            },
            Err(errors) => error!("Watch error: {:?}", errors),
        }
    }

    Ok(())
}

/// Rebuild if any event in the batch touches a relevant path.
///
/// Returns `None` when the batch was ignored.
fn process_batch(
    events: &[DebouncedEvent],
    config: &WatchConfig,
    app_config: &AppConfig,
) -> Option<Result<usize>> {
    let relevant = events.iter().any(|event| {
        event.paths.iter().any(|path| {
            let relevant = is_relevant_path(path, config);
            if relevant {
                debug!("Detected relevant change in {:?}", path);
            }
            relevant
        })
    });

    relevant.then(|| rebuild(config, app_config))
}

/// The deck file itself, or any `.json` family file inside the icon directory.
///
/// The output and its temp siblings never count, so writing the package
/// does not trigger another build.
pub fn is_relevant_path(path: &Path, config: &WatchConfig) -> bool {
    if same_file(path, &config.deck_path) {
        return true;
    }

    let Some(icon_dir) = &config.icon_dir else {
        return false;
    };
    let is_json = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if !is_json {
        return false;
    }

    match (path.parent(), utils::get_absolute_path(icon_dir)) {
        (Some(parent), Ok(icon_abs)) => {
            parent == icon_dir.as_path()
                || utils::get_absolute_path(parent)
                    .map(|p| p == icon_abs)
                    .unwrap_or(false)
        }
        (Some(parent), Err(_)) => parent == icon_dir.as_path(),
        _ => false,
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (utils::get_absolute_path(a), utils::get_absolute_path(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn rebuild(config: &WatchConfig, app_config: &AppConfig) -> Result<usize> {
    info!("Rebuilding {:?}...", config.deck_path);
    deck::generate_deck(&config.deck_path, &config.output, app_config)
}

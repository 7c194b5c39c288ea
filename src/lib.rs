// ABOUTME: Library module for the deck-blocks program.
// ABOUTME: Icon extraction, SVG embedding, slide building blocks and PPTX output.

// Reexport modules
pub mod components;
pub mod config;
pub mod deck;
pub mod embed;
pub mod errors;
pub mod icons;
pub mod media;
pub mod pptx;
pub mod sink;
pub mod slide;
pub mod svg;
pub mod templates;
pub mod theme;
pub mod utils;
pub mod watch;

// Reexport common types and functions
pub use components::BlockContext;
pub use config::Config;
pub use deck::{Deck, build_slides, generate_deck, load_deck};
pub use embed::{Placement, place_icon};
pub use errors::{DeckError, IconError, Result};
pub use icons::{IconCatalog, IconDocument, IconSource, Primitive, Shape};
pub use pptx::{PptxConfig, generate_pptx, write_pptx};
pub use sink::{Frame, SlideSink};
pub use slide::{Element, Slide};
pub use svg::{icon_data_uri, serialize, to_data_uri};
pub use templates::{SlideData, render_slides};
pub use theme::{Theme, ThemeName};
pub use watch::{WatchConfig, watch_deck};

#[cfg(test)]
mod tests;

// ABOUTME: Icon embedding adapter for slides
// ABOUTME: Places an icon image on a sink, or a colored circle when the icon cannot be produced

use crate::errors::IconError;
use crate::icons::IconCatalog;
use crate::sink::{Frame, ShapeKind, ShapeStyle, SlideSink};
use crate::svg;
use log::warn;

/// What `place_icon` ended up drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Image,
    Fallback(IconError),
}

impl Placement {
    pub fn is_image(&self) -> bool {
        matches!(self, Placement::Image)
    }
}

/// Draw icon `family`/`icon` in a `size`-inch square at (`x`, `y`).
///
/// `color` is a hex color without `#`. Exactly one draw call reaches the
/// sink: the icon image, or a filled ellipse of the same frame and color
/// when the icon cannot be extracted.
#[allow(clippy::too_many_arguments)]
pub fn place_icon<S: SlideSink + ?Sized>(
    sink: &mut S,
    icons: &IconCatalog,
    family: &str,
    icon: &str,
    x: f64,
    y: f64,
    size: f64,
    color: &str,
) -> Placement {
    let frame = Frame::square(x, y, size);
    match svg::icon_data_uri(icons, family, icon, &format!("#{}", color)) {
        Ok(data) => {
            sink.add_image(&data, frame);
            Placement::Image
        }
        Err(e) => {
            warn!("Using placeholder for icon {}/{}: {}", family, icon, e);
            sink.add_shape(ShapeKind::Ellipse, frame, ShapeStyle::filled(color));
            Placement::Fallback(e)
        }
    }
}

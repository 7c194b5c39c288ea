// ABOUTME: Vector markup serialization for extracted icons
// ABOUTME: Turns icon documents into standalone SVG and embeddable data URIs

use crate::errors::IconError;
use crate::icons::{IconCatalog, IconDocument, Primitive, Shape};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::escape::escape;

/// External width and height of every serialized icon.
pub const ICON_SIZE: u32 = 64;

/// Media-type marker prefixed to the base64 payload.
pub const DATA_URI_PREFIX: &str = "image/svg+xml;base64,";

const STROKE_WIDTH: u32 = 2;

fn or_zero(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("0")
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

/// Emit the element for a single primitive, without its children.
fn push_element(out: &mut String, shape: &Shape, color: &str) {
    let stroke_width = STROKE_WIDTH.to_string();
    match shape {
        Shape::Path {
            d,
            fill_rule,
            clip_rule,
        } => {
            out.push_str("<path");
            push_attr(out, "d", or_empty(d));
            // Empty rules are left out entirely
            if let Some(rule) = fill_rule.as_deref().filter(|r| !r.is_empty()) {
                push_attr(out, "fill-rule", rule);
            }
            if let Some(rule) = clip_rule.as_deref().filter(|r| !r.is_empty()) {
                push_attr(out, "clip-rule", rule);
            }
            push_attr(out, "fill", color);
        }
        Shape::Circle { cx, cy, r } => {
            out.push_str("<circle");
            push_attr(out, "cx", or_zero(cx));
            push_attr(out, "cy", or_zero(cy));
            push_attr(out, "r", or_zero(r));
            push_attr(out, "fill", color);
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
        } => {
            out.push_str("<rect");
            push_attr(out, "x", or_zero(x));
            push_attr(out, "y", or_zero(y));
            push_attr(out, "width", or_zero(width));
            push_attr(out, "height", or_zero(height));
            push_attr(out, "rx", or_zero(rx));
            push_attr(out, "fill", color);
        }
        Shape::Line { x1, y1, x2, y2 } => {
            out.push_str("<line");
            push_attr(out, "x1", or_zero(x1));
            push_attr(out, "y1", or_zero(y1));
            push_attr(out, "x2", or_zero(x2));
            push_attr(out, "y2", or_zero(y2));
            push_attr(out, "stroke", color);
            push_attr(out, "stroke-width", &stroke_width);
        }
        Shape::Polyline { points } => {
            out.push_str("<polyline");
            push_attr(out, "points", or_empty(points));
            push_attr(out, "fill", "none");
            push_attr(out, "stroke", color);
            push_attr(out, "stroke-width", &stroke_width);
        }
        Shape::Polygon { points } => {
            out.push_str("<polygon");
            push_attr(out, "points", or_empty(points));
            push_attr(out, "fill", color);
        }
        Shape::Unknown(_) => return,
    }
    out.push_str("/>");
}

/// Depth-first, pre-order: a node is emitted before its children.
fn push_tree(out: &mut String, nodes: &[Primitive], color: &str) {
    for node in nodes {
        push_element(out, &node.shape, color);
        push_tree(out, &node.children, color);
    }
}

/// Render an icon document as a standalone SVG document.
///
/// The output depends only on `doc` and `color`; every fill and stroke is
/// set to `color`, which is written verbatim (e.g. `#FFFFFF`).
pub fn serialize(doc: &IconDocument, color: &str) -> String {
    let mut body = String::new();
    push_tree(&mut body, &doc.children, color);

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}" width="{size}" height="{size}">{}</svg>"#,
        escape(doc.view_box.as_str()),
        body,
        size = ICON_SIZE
    )
}

/// Wrap SVG markup as an embeddable image reference.
pub fn to_data_uri(svg: &str) -> String {
    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(svg.as_bytes()))
}

/// Extract, serialize and encode one icon in a single step.
pub fn icon_data_uri(
    icons: &IconCatalog,
    family: &str,
    icon: &str,
    color: &str,
) -> Result<String, IconError> {
    let doc = icons.extract(family, icon)?;
    Ok(to_data_uri(&serialize(&doc, color)))
}

// ABOUTME: Reusable slide building blocks
// ABOUTME: Badges, metric cards, quadrants, card grids, comparison panels, flow charts and footers

use crate::embed::place_icon;
use crate::icons::{DEFAULT_ICON_FAMILY, IconCatalog};
use crate::sink::{Align, Frame, Shadow, ShapeKind, ShapeStyle, SlideSink, TextStyle, VAlign};
use crate::theme::Theme;
use serde::Deserialize;

/// Footer text used when neither the slide nor the deck sets a brand.
pub const DEFAULT_BRAND: &str = "PPTX-GEN";

/// Everything a block needs besides the sink it draws on.
#[derive(Debug, Clone, Copy)]
pub struct BlockContext<'a> {
    pub theme: &'a Theme,
    pub icons: &'a IconCatalog,
    /// Deck-wide footer brand.
    pub brand: Option<&'a str>,
}

impl<'a> BlockContext<'a> {
    pub fn new(theme: &'a Theme, icons: &'a IconCatalog) -> Self {
        Self {
            theme,
            icons,
            brand: None,
        }
    }

    pub fn with_brand(mut self, brand: Option<&'a str>) -> Self {
        self.brand = brand;
        self
    }

    fn title_text(&self, size: f64, color: &str) -> TextStyle {
        TextStyle::new(size, color, self.theme.fonts.title)
    }

    fn body_text(&self, size: f64, color: &str) -> TextStyle {
        TextStyle::new(size, color, self.theme.fonts.body)
    }

    /// Draw an optional icon; the family defaults to `hi`.
    #[allow(clippy::too_many_arguments)]
    fn icon<S: SlideSink + ?Sized>(
        &self,
        slide: &mut S,
        family: Option<&str>,
        name: &str,
        x: f64,
        y: f64,
        size: f64,
        color: &str,
    ) {
        place_icon(
            slide,
            self.icons,
            family.unwrap_or(DEFAULT_ICON_FAMILY),
            name,
            x,
            y,
            size,
            color,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantItem {
    pub title: String,
    #[serde(default)]
    pub text: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub icon_module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardItem {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub icon_module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub text: String,
    pub icon: Option<String>,
    pub icon_module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ComparisonSide {
    pub label: Option<String>,
    #[serde(default)]
    pub items: Vec<ComparisonItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlowNode {
    pub label: String,
    pub color: Option<String>,
}

/// Rounded rectangle with centered bold text.
pub fn add_badge<S: SlideSink + ?Sized>(
    slide: &mut S,
    ctx: &BlockContext,
    text: &str,
    frame: Frame,
    bg_color: &str,
    text_color: &str,
) {
    slide.add_shape(
        ShapeKind::RoundRect,
        frame,
        ShapeStyle::filled(bg_color).radius(0.08),
    );
    slide.add_text(
        text,
        frame,
        ctx.title_text(11.0, text_color).bold(true).centered(),
    );
}

/// Card with a large metric, a thin separator and a description.
pub fn add_metric_card<S: SlideSink + ?Sized>(
    slide: &mut S,
    ctx: &BlockContext,
    metric: &str,
    desc: &str,
    frame: Frame,
    accent: &str,
) {
    let c = &ctx.theme.colors;
    let Frame { x, y, w, h } = frame;

    slide.add_shape(
        ShapeKind::RoundRect,
        frame,
        ShapeStyle::filled(c.surface).outline(accent, 1.0).radius(0.06),
    );
    slide.add_text(
        metric,
        Frame::new(x, y + 0.1, w, h * 0.4),
        ctx.title_text(24.0, accent).bold(true).centered(),
    );
    // Separator line
    slide.add_shape(
        ShapeKind::Rect,
        Frame::new(x + w * 0.12, y + h * 0.45, w * 0.76, 0.02),
        ShapeStyle::filled(accent).transparency(50),
    );
    slide.add_text(
        desc,
        Frame::new(x + 0.1, y + h * 0.5, w - 0.2, h * 0.45),
        ctx.body_text(8.5, c.text_muted)
            .align(Align::Center)
            .line_spacing(1.4),
    );
}

/// 2x2 grid of panels. Only the first four items are drawn.
pub fn add_quadrant<S: SlideSink + ?Sized>(slide: &mut S, ctx: &BlockContext, items: &[QuadrantItem]) {
    let c = &ctx.theme.colors;
    let m = ctx.theme.layout.margin;
    let positions = [
        Frame::new(m, 0.85, 4.4, 1.8),
        Frame::new(5.2, 0.85, 4.4, 1.8),
        Frame::new(m, 2.85, 4.4, 1.8),
        Frame::new(5.2, 2.85, 4.4, 1.8),
    ];

    for (item, pos) in items.iter().zip(positions) {
        let color = item.color.as_deref().unwrap_or(c.accent1);
        slide.add_shape(
            ShapeKind::RoundRect,
            pos,
            ShapeStyle::filled(c.surface).outline(color, 1.0).radius(0.06),
        );
        if let Some(icon) = &item.icon {
            ctx.icon(
                slide,
                item.icon_module.as_deref(),
                icon,
                pos.x + 0.15,
                pos.y + 0.12,
                0.25,
                color,
            );
        }
        let title_x = pos.x + if item.icon.is_some() { 0.45 } else { 0.15 };
        slide.add_text(
            &item.title,
            Frame::new(title_x, pos.y + 0.1, pos.w - 0.6, 0.3),
            ctx.title_text(12.0, color).bold(true),
        );
        slide.add_text(
            &item.text,
            Frame::new(pos.x + 0.15, pos.y + 0.5, pos.w - 0.3, pos.h - 0.65),
            ctx.body_text(9.0, c.text_muted)
                .line_spacing(1.4)
                .valign(VAlign::Top),
        );
    }
}

/// Cards laid out in `cols` columns, wrapping into rows from `y_start`.
pub fn add_card_grid<S: SlideSink + ?Sized>(
    slide: &mut S,
    ctx: &BlockContext,
    items: &[CardItem],
    cols: usize,
    y_start: f64,
) {
    let c = &ctx.theme.colors;
    let m = ctx.theme.layout.margin;
    let gap = ctx.theme.layout.gutter;
    let cols = cols.max(1);
    let card_w = (ctx.theme.content_width() - gap * (cols - 1) as f64) / cols as f64;
    let card_h = 1.5;

    for (i, item) in items.iter().enumerate() {
        let col = (i % cols) as f64;
        let row = (i / cols) as f64;
        let x = m + col * (card_w + gap);
        let y = y_start + row * (card_h + gap);
        let color = item.color.as_deref().unwrap_or(c.accent1);

        slide.add_shape(
            ShapeKind::RoundRect,
            Frame::new(x, y, card_w, card_h),
            ShapeStyle::filled(c.surface).outline(color, 1.0).radius(0.06),
        );
        if let Some(icon) = &item.icon {
            ctx.icon(slide, item.icon_module.as_deref(), icon, x + 0.15, y + 0.12, 0.3, color);
        }
        let title_x = x + if item.icon.is_some() { 0.5 } else { 0.15 };
        slide.add_text(
            &item.title,
            Frame::new(title_x, y + 0.1, card_w - 0.6, 0.3),
            ctx.title_text(13.0, color).bold(true),
        );
        slide.add_text(
            &item.desc,
            Frame::new(x + 0.15, y + 0.5, card_w - 0.3, card_h - 0.65),
            ctx.body_text(9.0, c.text_muted).line_spacing(1.3),
        );
    }
}

/// Before and after boxes joined by an arrow.
pub fn add_comparison_panel<S: SlideSink + ?Sized>(
    slide: &mut S,
    ctx: &BlockContext,
    before: &ComparisonSide,
    after: &ComparisonSide,
    y_start: f64,
) {
    let c = &ctx.theme.colors;
    let panel_w = 3.8;
    let panel_h = 3.2;

    // Before box
    slide.add_shape(
        ShapeKind::RoundRect,
        Frame::new(0.6, y_start, panel_w, panel_h),
        ShapeStyle::filled(c.surface).outline(c.text_faint, 1.5).radius(0.08),
    );
    slide.add_text(
        before.label.as_deref().unwrap_or("BEFORE"),
        Frame::new(0.6, y_start, panel_w, 0.45),
        ctx.title_text(14.0, c.text_faint)
            .bold(true)
            .align(Align::Center),
    );
    for (i, item) in before.items.iter().enumerate() {
        let y = y_start + 0.7 + i as f64 * 0.7;
        if let Some(icon) = &item.icon {
            ctx.icon(slide, item.icon_module.as_deref(), icon, 1.0, y, 0.22, c.extra.red);
        }
        let x = if item.icon.is_some() { 1.3 } else { 1.0 };
        slide.add_text(
            &item.text,
            Frame::new(x, y, 2.8, 0.3),
            ctx.body_text(12.0, c.text_muted).valign(VAlign::Middle),
        );
    }

    // Arrow
    slide.add_shape(
        ShapeKind::RightArrow,
        Frame::new(4.55, y_start + panel_h / 2.0 - 0.3, 0.9, 0.6),
        ShapeStyle::filled(c.accent2),
    );

    // After box
    slide.add_shape(
        ShapeKind::RoundRect,
        Frame::new(5.6, y_start, panel_w, panel_h),
        ShapeStyle::filled(c.surface_alt)
            .outline(c.accent1, 2.0)
            .radius(0.08)
            .shadow(Shadow::outer(12.0, 4.0)),
    );
    slide.add_text(
        after.label.as_deref().unwrap_or("AFTER"),
        Frame::new(5.6, y_start, panel_w, 0.45),
        ctx.title_text(14.0, c.accent1).bold(true).align(Align::Center),
    );
    for (i, item) in after.items.iter().enumerate() {
        let y = y_start + 0.7 + i as f64 * 0.7;
        if let Some(icon) = &item.icon {
            ctx.icon(
                slide,
                item.icon_module.as_deref(),
                icon,
                6.0,
                y,
                0.22,
                c.semantic.success,
            );
        }
        let x = if item.icon.is_some() { 6.3 } else { 6.0 };
        slide.add_text(
            &item.text,
            Frame::new(x, y, 2.8, 0.3),
            ctx.body_text(12.0, c.text).bold(true).valign(VAlign::Middle),
        );
    }
}

/// Horizontal row of nodes with arrows in the gaps wide enough to hold one.
pub fn add_flow_chart<S: SlideSink + ?Sized>(
    slide: &mut S,
    ctx: &BlockContext,
    nodes: &[FlowNode],
    y_start: f64,
) {
    if nodes.is_empty() {
        return;
    }

    let c = &ctx.theme.colors;
    let m = ctx.theme.layout.margin;
    let total_w = ctx.theme.content_width();
    let n = nodes.len() as f64;
    let node_w = f64::min(2.0, (total_w - (n - 1.0) * 0.8) / n);
    let node_h = 0.6;
    let gap = (total_w - node_w * n) / (nodes.len().saturating_sub(1).max(1)) as f64;

    for (i, node) in nodes.iter().enumerate() {
        let x = m + i as f64 * (node_w + gap);
        slide.add_shape(
            ShapeKind::RoundRect,
            Frame::new(x, y_start, node_w, node_h),
            ShapeStyle::filled(node.color.as_deref().unwrap_or(c.accent1))
                .radius(0.06)
                .shadow(Shadow::outer(8.0, 3.0)),
        );
        slide.add_text(
            &node.label,
            Frame::new(x, y_start, node_w, node_h),
            ctx.title_text(10.0, c.background).bold(true).centered(),
        );

        if i + 1 < nodes.len() && gap > 0.2 {
            slide.add_shape(
                ShapeKind::RightArrow,
                Frame::new(
                    x + node_w + gap * 0.15,
                    y_start + node_h * 0.2,
                    gap * 0.7,
                    node_h * 0.6,
                ),
                ShapeStyle::filled(c.text_faint),
            );
        }
    }
}

/// Separator line, brand text and `num / total` page counter.
pub fn add_slide_footer<S: SlideSink + ?Sized>(
    slide: &mut S,
    ctx: &BlockContext,
    num: usize,
    total: usize,
    brand: Option<&str>,
) {
    let c = &ctx.theme.colors;
    let layout = &ctx.theme.layout;

    slide.add_shape(
        ShapeKind::Rect,
        Frame::new(0.0, layout.footer_y, layout.slide_w, 0.02),
        ShapeStyle::filled(c.accent1).transparency(60),
    );
    slide.add_text(
        brand.or(ctx.brand).unwrap_or(DEFAULT_BRAND),
        Frame::new(0.4, layout.footer_y + 0.1, 3.0, 0.3),
        ctx.body_text(7.0, c.text_faint).letter_spacing(2.0),
    );
    slide.add_text(
        &format!("{} / {}", num, total),
        Frame::new(9.0, layout.footer_y + 0.1, 1.0, 0.3),
        ctx.body_text(8.0, c.text_faint).align(Align::Right),
    );
}

// ABOUTME: Whole-slide templates for generated decks
// ABOUTME: Each template fills one slide from a deck description entry

use crate::components::{
    BlockContext, CardItem, ComparisonSide, FlowNode, QuadrantItem, add_badge, add_card_grid,
    add_comparison_panel, add_flow_chart, add_metric_card, add_quadrant, add_slide_footer,
};
use crate::embed::place_icon;
use crate::icons::DEFAULT_ICON_FAMILY;
use crate::sink::{
    Align, ChartKind, ChartSeries, ChartStyle, Frame, ShapeKind, ShapeStyle, SlideSink, TableStyle,
    TextStyle, VAlign,
};
use crate::slide::Slide;
use serde::Deserialize;

/// Bullets whose top would fall below this line are dropped.
const BULLET_CUTOFF_Y: f64 = 4.8;

/// Metric cards beyond this count are not drawn.
const MAX_METRIC_COLUMNS: usize = 5;

/// Action rows beyond this count are not drawn.
const MAX_ACTIONS: usize = 4;

fn default_family() -> String {
    DEFAULT_ICON_FAMILY.to_string()
}

fn default_cols() -> usize {
    3
}

/// Icon named on slide level: `{ "module": "fi", "name": "FiTarget" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IconRef {
    #[serde(default = "default_family", alias = "module")]
    pub family: String,
    pub name: String,
}

/// Fields shared by every slide type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideHeader {
    pub badge: Option<String>,
    pub badge_color: Option<String>,
    pub badge_text_color: Option<String>,
    /// Footer brand for this slide only.
    pub brand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TitleData {
    pub title: String,
    pub subtitle: Option<String>,
    pub formula: Option<String>,
    pub source: Option<String>,
    pub icon: Option<IconRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionData {
    pub title: String,
    pub subtitle: Option<String>,
    pub icon: Option<IconRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BulletItem {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BulletData {
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<BulletItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metric {
    pub value: String,
    #[serde(default)]
    pub desc: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricGridData {
    pub title: Option<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonData {
    #[serde(default)]
    pub before: ComparisonSide,
    #[serde(default)]
    pub after: ComparisonSide,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub title: Option<String>,
    pub rows: Vec<Vec<String>>,
    pub col_w: Option<Vec<f64>>,
}

/// Table drawn to the right of a chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideTable {
    pub rows: Vec<Vec<String>>,
    pub col_w: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub title: Option<String>,
    #[serde(default)]
    pub chart_type: ChartKind,
    #[serde(default)]
    pub chart_data: Vec<ChartSeries>,
    pub table_data: Option<SideTable>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub num: Option<String>,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub icon_module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionData {
    #[serde(default)]
    pub actions: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuadrantData {
    pub title: Option<String>,
    pub items: Vec<QuadrantItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardsData {
    pub title: Option<String>,
    #[serde(default = "default_cols")]
    pub cols: usize,
    pub items: Vec<CardItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlowData {
    pub title: Option<String>,
    pub nodes: Vec<FlowNode>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SlideKind {
    Title(TitleData),
    Section(SectionData),
    Bullets(BulletData),
    MetricGrid(MetricGridData),
    Comparison(ComparisonData),
    Chart(ChartData),
    Table(TableData),
    Actions(ActionData),
    Quadrant(QuadrantData),
    Cards(CardsData),
    Flow(FlowData),
}

/// One entry of a deck description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlideData {
    #[serde(flatten)]
    pub header: SlideHeader,
    #[serde(flatten)]
    pub kind: SlideKind,
}

impl SlideData {
    /// Render this entry as slide `num` of `total`.
    pub fn render(&self, ctx: &BlockContext, num: usize, total: usize) -> Slide {
        let mut slide = Slide::new();
        slide.set_background(ctx.theme.colors.background);

        let h = &self.header;
        match &self.kind {
            SlideKind::Title(data) => title_slide(&mut slide, ctx, h, data),
            SlideKind::Section(data) => section_slide(&mut slide, ctx, h, data),
            SlideKind::Bullets(data) => bullet_slide(&mut slide, ctx, h, data),
            SlideKind::MetricGrid(data) => metric_grid_slide(&mut slide, ctx, h, data),
            SlideKind::Comparison(data) => comparison_slide(&mut slide, ctx, h, data),
            SlideKind::Chart(data) => chart_slide(&mut slide, ctx, h, data),
            SlideKind::Table(data) => table_slide(&mut slide, ctx, h, data),
            SlideKind::Actions(data) => action_slide(&mut slide, ctx, h, data),
            SlideKind::Quadrant(data) => quadrant_slide(&mut slide, ctx, h, data),
            SlideKind::Cards(data) => cards_slide(&mut slide, ctx, h, data),
            SlideKind::Flow(data) => flow_slide(&mut slide, ctx, h, data),
        }

        add_slide_footer(&mut slide, ctx, num, total, h.brand.as_deref());
        slide
    }
}

/// Top-left badge whose width grows with its label.
fn header_badge<S: SlideSink + ?Sized>(
    slide: &mut S,
    ctx: &BlockContext,
    header: &SlideHeader,
    default_bg: &str,
    default_fg: &str,
) {
    let Some(badge) = &header.badge else {
        return;
    };
    let width = f64::max(2.0, badge.chars().count() as f64 * 0.15 + 0.8);
    add_badge(
        slide,
        ctx,
        badge,
        Frame::new(0.3, 0.25, width, 0.4),
        header.badge_color.as_deref().unwrap_or(default_bg),
        header.badge_text_color.as_deref().unwrap_or(default_fg),
    );
}

/// Bold heading of height `h` under the badge; returns where content should start.
fn heading<S: SlideSink + ?Sized>(
    slide: &mut S,
    ctx: &BlockContext,
    title: Option<&str>,
    size: f64,
    h: f64,
    with_title_y: f64,
    without_title_y: f64,
) -> f64 {
    match title {
        Some(title) => {
            slide.add_text(
                title,
                Frame::new(0.4, 0.8, 9.2, h),
                TextStyle::new(size, ctx.theme.colors.text, ctx.theme.fonts.title)
                    .bold(true),
            );
            with_title_y
        }
        None => without_title_y,
    }
}

fn title_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &TitleData) {
    let c = &ctx.theme.colors;
    let fonts = &ctx.theme.fonts;
    let has_icon = data.icon.is_some();

    // Top accent line
    slide.add_shape(
        ShapeKind::Rect,
        Frame::new(0.0, 0.0, 10.0, 0.06),
        ShapeStyle::filled(c.accent1),
    );

    if let Some(badge) = &header.badge {
        add_badge(
            slide,
            ctx,
            badge,
            Frame::new(0.5, 0.5, 1.8, 0.45),
            header.badge_color.as_deref().unwrap_or(c.accent1),
            header.badge_text_color.as_deref().unwrap_or(c.background),
        );
    }

    if let Some(icon) = &data.icon {
        place_icon(slide, ctx.icons, &icon.family, &icon.name, 0.5, 1.5, 0.6, c.accent2);
    }

    slide.add_text(
        &data.title,
        Frame::new(0.5, if has_icon { 2.0 } else { 1.5 }, 9.0, 0.8),
        TextStyle::new(36.0, c.text, fonts.title).bold(true),
    );

    if let Some(subtitle) = &data.subtitle {
        slide.add_text(
            subtitle,
            Frame::new(0.5, if has_icon { 2.7 } else { 2.3 }, 9.0, 0.6),
            TextStyle::new(22.0, c.accent1, fonts.title),
        );
    }

    if let Some(formula) = &data.formula {
        let formula_y = if has_icon { 3.6 } else { 3.2 };
        let frame = Frame::new(0.5, formula_y, 9.0, 0.7);
        slide.add_shape(
            ShapeKind::RoundRect,
            frame,
            ShapeStyle::filled(c.surface_alt)
                .outline(c.accent1, 1.5)
                .radius(0.05),
        );
        slide.add_text(
            formula,
            frame,
            TextStyle::new(18.0, c.accent2, fonts.mono)
                .bold(true)
                .centered(),
        );
    }

    if let Some(source) = &data.source {
        slide.add_text(
            source,
            Frame::new(0.5, 4.6, 9.0, 0.3),
            TextStyle::new(9.0, c.text_faint, fonts.body),
        );
    }
}

fn section_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &SectionData) {
    let c = &ctx.theme.colors;
    let fonts = &ctx.theme.fonts;

    header_badge(slide, ctx, header, c.accent1, c.background);

    if let Some(icon) = &data.icon {
        place_icon(slide, ctx.icons, &icon.family, &icon.name, 0.4, 0.85, 0.35, c.accent2);
    }

    slide.add_text(
        &data.title,
        Frame::new(if data.icon.is_some() { 0.85 } else { 0.4 }, 0.85, 6.0, 0.4),
        TextStyle::new(18.0, c.accent2, fonts.title).bold(true),
    );

    if let Some(subtitle) = &data.subtitle {
        slide.add_text(
            subtitle,
            Frame::new(0.4, 1.4, 9.2, 0.4),
            TextStyle::new(12.0, c.text_muted, fonts.body),
        );
    }
}

fn bullet_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &BulletData) {
    let c = &ctx.theme.colors;

    header_badge(slide, ctx, header, c.accent1, c.background);
    let start_y = heading(slide, ctx, data.title.as_deref(), 16.0, 0.4, 1.4, 0.8);

    for (i, item) in data.items.iter().enumerate() {
        let y = start_y + i as f64 * 0.45;
        if y > BULLET_CUTOFF_Y {
            break;
        }

        slide.add_shape(
            ShapeKind::Ellipse,
            Frame::square(0.5, y + 0.1, 0.12),
            ShapeStyle::filled(item.color.as_deref().unwrap_or(c.accent1)),
        );
        slide.add_text(
            &item.text,
            Frame::new(0.8, y, 8.6, 0.4),
            TextStyle::new(
                12.0,
                if item.bold { c.text } else { c.text_muted },
                ctx.theme.fonts.body,
            )
            .bold(item.bold)
            .valign(VAlign::Middle),
        );
    }
}

fn metric_grid_slide(
    slide: &mut Slide,
    ctx: &BlockContext,
    header: &SlideHeader,
    data: &MetricGridData,
) {
    let c = &ctx.theme.colors;
    let layout = &ctx.theme.layout;

    header_badge(slide, ctx, header, c.accent1, c.background);
    let start_y = heading(slide, ctx, data.title.as_deref(), 14.0, 0.35, 1.3, 0.9);

    let metrics = &data.metrics[..data.metrics.len().min(MAX_METRIC_COLUMNS)];
    if metrics.is_empty() {
        return;
    }

    let cols = metrics.len() as f64;
    let card_w = (ctx.theme.content_width() - layout.gutter * (cols - 1.0)) / cols;
    let card_h = 2.7;

    for (i, metric) in metrics.iter().enumerate() {
        let x = layout.margin + i as f64 * (card_w + layout.gutter);
        add_metric_card(
            slide,
            ctx,
            &metric.value,
            &metric.desc,
            Frame::new(x, start_y, card_w, card_h),
            metric.color.as_deref().unwrap_or(c.accent1),
        );
    }
}

fn comparison_slide(
    slide: &mut Slide,
    ctx: &BlockContext,
    header: &SlideHeader,
    data: &ComparisonData,
) {
    let c = &ctx.theme.colors;

    header_badge(slide, ctx, header, c.accent2, c.background);
    add_comparison_panel(slide, ctx, &data.before, &data.after, 1.0);

    if let Some(summary) = &data.summary {
        let frame = Frame::new(1.0, 4.4, 8.0, 0.5);
        slide.add_shape(
            ShapeKind::RoundRect,
            frame,
            ShapeStyle::filled(c.surface_alt)
                .outline(c.accent2, 1.0)
                .radius(0.05),
        );
        slide.add_text(
            summary,
            frame,
            TextStyle::new(11.0, c.accent2, ctx.theme.fonts.body)
                .italic()
                .centered(),
        );
    }
}

fn chart_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &ChartData) {
    let c = &ctx.theme.colors;
    let fonts = &ctx.theme.fonts;

    header_badge(slide, ctx, header, c.accent1, c.background);
    if let Some(title) = &data.title {
        slide.add_text(
            title,
            Frame::new(0.4, 0.8, 5.0, 0.3),
            TextStyle::new(12.0, c.text, fonts.title).bold(true),
        );
    }

    // The chart yields the right half to a side table
    let chart_w = if data.table_data.is_some() { 4.8 } else { 9.2 };
    slide.add_chart(
        data.chart_type,
        &data.chart_data,
        Frame::new(0.4, 1.2, chart_w, 3.5),
        ChartStyle {
            colors: vec![c.accent1.to_string(), c.accent2.to_string(), c.accent3.to_string()],
            plot_fill: c.surface.to_string(),
            axis_label_color: c.text_muted.to_string(),
            grid_color: c.surface_alt.to_string(),
            data_label_color: c.text.to_string(),
            font_face: fonts.body.to_string(),
            show_values: true,
            value_font_size: 9.0,
            axis_font_size: 9.0,
        },
    );

    if let Some(table) = &data.table_data {
        slide.add_table(
            &table.rows,
            Frame::new(5.5, 1.2, 4.2, 0.35 * table.rows.len() as f64),
            TableStyle {
                col_widths: table.col_w.clone(),
                row_height: 0.35,
                border_color: c.surface_alt.to_string(),
                border_width: 0.5,
                fill: c.surface.to_string(),
                header_color: c.text.to_string(),
                text_color: c.text.to_string(),
                font_face: fonts.body.to_string(),
                font_size: 9.0,
                margin: [3.0, 5.0, 3.0, 5.0],
            },
        );
    }
}

fn table_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &TableData) {
    let c = &ctx.theme.colors;

    header_badge(slide, ctx, header, c.accent1, c.background);
    let start_y = heading(slide, ctx, data.title.as_deref(), 14.0, 0.35, 1.3, 0.8);

    slide.add_table(
        &data.rows,
        Frame::new(0.4, start_y, 9.2, 0.4 * data.rows.len() as f64),
        TableStyle {
            col_widths: data.col_w.clone(),
            row_height: 0.4,
            border_color: c.surface_alt.to_string(),
            border_width: 0.5,
            fill: c.surface.to_string(),
            header_color: c.accent1.to_string(),
            text_color: c.text.to_string(),
            font_face: ctx.theme.fonts.body.to_string(),
            font_size: 10.0,
            margin: [4.0, 6.0, 4.0, 6.0],
        },
    );
}

fn action_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &ActionData) {
    let c = &ctx.theme.colors;
    let fonts = &ctx.theme.fonts;

    header_badge(slide, ctx, header, c.extra.red, c.text);

    for (i, action) in data.actions.iter().take(MAX_ACTIONS).enumerate() {
        let y = 0.9 + i as f64 * 1.1;
        let color = action.color.as_deref().unwrap_or(c.accent1);

        // Number badge
        let number_frame = Frame::square(0.5, y + 0.1, 0.55);
        slide.add_shape(ShapeKind::Ellipse, number_frame, ShapeStyle::filled(color));
        let number = action
            .num
            .clone()
            .unwrap_or_else(|| format!("{:02}", i + 1));
        slide.add_text(
            &number,
            number_frame,
            TextStyle::new(16.0, c.background, fonts.title)
                .bold(true)
                .centered(),
        );

        // Content card
        slide.add_shape(
            ShapeKind::RoundRect,
            Frame::new(1.3, y, 8.3, 0.9),
            ShapeStyle::filled(c.surface).outline(color, 1.0).radius(0.06),
        );
        if let Some(icon) = &action.icon {
            place_icon(
                slide,
                ctx.icons,
                action.icon_module.as_deref().unwrap_or(DEFAULT_ICON_FAMILY),
                icon,
                1.5,
                y + 0.08,
                0.28,
                color,
            );
        }
        slide.add_text(
            &action.title,
            Frame::new(if action.icon.is_some() { 1.85 } else { 1.5 }, y + 0.05, 5.0, 0.3),
            TextStyle::new(13.0, color, fonts.title).bold(true),
        );
        slide.add_text(
            &action.desc,
            Frame::new(1.5, y + 0.4, 7.9, 0.45),
            TextStyle::new(9.5, c.text_muted, fonts.body)
                .line_spacing(1.4)
                .valign(VAlign::Top),
        );
    }
}

fn quadrant_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &QuadrantData) {
    let c = &ctx.theme.colors;

    header_badge(slide, ctx, header, c.accent1, c.background);
    if let Some(title) = &data.title {
        slide.add_text(
            title,
            Frame::new(3.0, 0.25, 6.6, 0.4),
            TextStyle::new(14.0, c.text, ctx.theme.fonts.title)
                .bold(true)
                .align(Align::Right),
        );
    }
    add_quadrant(slide, ctx, &data.items);
}

fn cards_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &CardsData) {
    let c = &ctx.theme.colors;

    header_badge(slide, ctx, header, c.accent1, c.background);
    let start_y = heading(slide, ctx, data.title.as_deref(), 14.0, 0.35, 1.3, 0.9);
    add_card_grid(slide, ctx, &data.items, data.cols, start_y);
}

fn flow_slide(slide: &mut Slide, ctx: &BlockContext, header: &SlideHeader, data: &FlowData) {
    let c = &ctx.theme.colors;

    header_badge(slide, ctx, header, c.accent1, c.background);
    heading(slide, ctx, data.title.as_deref(), 14.0, 0.35, 1.3, 0.9);
    add_flow_chart(slide, ctx, &data.nodes, 2.2);

    if let Some(caption) = &data.caption {
        slide.add_text(
            caption,
            Frame::new(0.4, 3.2, 9.2, 0.8),
            TextStyle::new(11.0, c.text_muted, ctx.theme.fonts.body)
                .align(Align::Center)
                .line_spacing(1.4),
        );
    }
}

/// Render entries as a numbered deck.
pub fn render_slides(ctx: &BlockContext, entries: &[SlideData]) -> Vec<Slide> {
    let total = entries.len();
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.render(ctx, i + 1, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconCatalog;
    use crate::slide::Element;
    use crate::theme::ThemeName;

    fn parse(json: &str) -> SlideData {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_tagged_entries_with_shared_header() {
        let entry = parse(
            r#"{"type": "section", "badge": "PART 2", "badgeColor": "805AD5", "title": "Execution",
                "icon": {"module": "fi", "name": "FiTarget"}}"#,
        );

        assert_eq!(entry.header.badge.as_deref(), Some("PART 2"));
        assert_eq!(entry.header.badge_color.as_deref(), Some("805AD5"));
        match entry.kind {
            SlideKind::Section(data) => {
                let icon = data.icon.unwrap();
                assert_eq!(icon.family, "fi");
                assert_eq!(icon.name, "FiTarget");
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn icon_family_defaults_to_hi() {
        let entry = parse(r#"{"type": "title", "title": "Q3", "icon": {"name": "HiCheck"}}"#);
        match entry.kind {
            SlideKind::Title(data) => assert_eq!(data.icon.unwrap().family, "hi"),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn title_slide_with_icon_moves_title_down() {
        let icons = IconCatalog::builtin().unwrap();
        let ctx = BlockContext::new(ThemeName::Dark.theme(), &icons);
        let entry = parse(
            r#"{"type": "title", "title": "Roadmap", "subtitle": "2025", "icon": {"name": "HiLightBulb"}}"#,
        );

        let slide = entry.render(&ctx, 1, 5);

        assert_eq!(slide.background.as_deref(), Some("0D1B2A"));
        assert_eq!(slide.images().count(), 1);
        let title_y = slide
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Text { text, frame, .. } if text == "Roadmap" => Some(frame.y),
                _ => None,
            })
            .unwrap();
        assert!((title_y - 2.0).abs() < 1e-9);
        assert!(slide.texts().any(|t| t == "1 / 5"));
    }

    #[test]
    fn bullets_stop_before_overflow() {
        let icons = IconCatalog::new();
        let ctx = BlockContext::new(ThemeName::Light.theme(), &icons);
        let items: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"text": "Point {}"}}"#, i))
            .collect();
        let entry = parse(&format!(
            r#"{{"type": "bullets", "title": "Findings", "items": [{}]}}"#,
            items.join(",")
        ));

        let slide = entry.render(&ctx, 2, 2);

        // start 1.4, step 0.45: rows 0..=7 fit above 4.8
        let dots = slide
            .shapes()
            .filter(|(kind, _, _)| *kind == ShapeKind::Ellipse)
            .count();
        assert_eq!(dots, 8);
        assert!(!slide.texts().any(|t| t == "Point 8"));
    }

    #[test]
    fn metric_grid_caps_columns() {
        let icons = IconCatalog::new();
        let ctx = BlockContext::new(ThemeName::Corporate.theme(), &icons);
        let metrics: Vec<String> = (0..7)
            .map(|i| format!(r#"{{"value": "{}%", "desc": "metric"}}"#, i * 10))
            .collect();
        let entry = parse(&format!(
            r#"{{"type": "metric-grid", "metrics": [{}]}}"#,
            metrics.join(",")
        ));

        let slide = entry.render(&ctx, 1, 1);

        assert!(slide.texts().any(|t| t == "40%"));
        assert!(!slide.texts().any(|t| t == "50%"));
    }

    #[test]
    fn actions_are_numbered_and_capped() {
        let icons = IconCatalog::builtin().unwrap();
        let ctx = BlockContext::new(ThemeName::Dark.theme(), &icons);
        let entry = parse(
            r#"{"type": "actions", "badge": "NEXT", "actions": [
                {"title": "Hire", "desc": "Two engineers", "icon": "HiUserGroup"},
                {"num": "B", "title": "Ship", "desc": "Beta"},
                {"title": "Measure"}, {"title": "Iterate"}, {"title": "Extra"}
            ]}"#,
        );

        let slide = entry.render(&ctx, 1, 1);
        let texts: Vec<&str> = slide.texts().collect();

        assert!(texts.contains(&"01"));
        assert!(texts.contains(&"B"));
        assert!(texts.contains(&"04"));
        assert!(!texts.contains(&"Extra"));
        assert_eq!(slide.images().count(), 1);
    }

    #[test]
    fn table_slide_records_rows() {
        let icons = IconCatalog::new();
        let ctx = BlockContext::new(ThemeName::Minimal.theme(), &icons);
        let entry = parse(
            r#"{"type": "table", "title": "Costs", "rows": [["Item", "Cost"], ["Cloud", "$4k"]], "colW": [6.0, 3.2]}"#,
        );

        let slide = entry.render(&ctx, 1, 1);
        let table = slide
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Table { rows, frame, style } => Some((rows, frame, style)),
                _ => None,
            })
            .unwrap();

        assert_eq!(table.0.len(), 2);
        assert!((table.1.y - 1.3).abs() < 1e-9);
        assert_eq!(table.2.col_widths, Some(vec![6.0, 3.2]));
    }

    fn text_frame<'a>(slide: &'a Slide, wanted: &str) -> &'a Frame {
        slide
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Text { text, frame, .. } if text == wanted => Some(frame),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn headings_keep_per_template_heights() {
        let icons = IconCatalog::new();
        let ctx = BlockContext::new(ThemeName::Dark.theme(), &icons);

        let bullets = parse(r#"{"type": "bullets", "title": "Findings", "items": []}"#).render(&ctx, 1, 1);
        let grid = parse(r#"{"type": "metric-grid", "title": "Numbers", "metrics": []}"#).render(&ctx, 1, 1);

        assert!((text_frame(&bullets, "Findings").h - 0.4).abs() < 1e-9);
        assert!((text_frame(&grid, "Numbers").h - 0.35).abs() < 1e-9);
    }

    #[test]
    fn chart_slide_narrows_for_side_table() {
        let icons = IconCatalog::new();
        let ctx = BlockContext::new(ThemeName::Dark.theme(), &icons);
        let entry = parse(
            r#"{"type": "chart", "title": "Revenue", "chartType": "line",
                "chartData": [{"name": "ARR", "labels": ["Q1", "Q2"], "values": [1.5, 2.5]}],
                "tableData": {"rows": [["Quarter", "ARR"], ["Q2", "2.5"]], "colW": [2.1, 2.1]}}"#,
        );

        let slide = entry.render(&ctx, 1, 1);

        let (kind, series, frame, style) = slide
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Chart {
                    kind,
                    series,
                    frame,
                    style,
                } => Some((kind, series, frame, style)),
                _ => None,
            })
            .unwrap();
        assert_eq!(*kind, ChartKind::Line);
        assert_eq!(series[0].values, vec![1.5, 2.5]);
        assert_eq!((frame.x, frame.y, frame.w, frame.h), (0.4, 1.2, 4.8, 3.5));
        assert_eq!(style.colors.len(), 3);
        assert_eq!(style.plot_fill, ctx.theme.colors.surface);

        let (rows, table_frame) = slide
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Table { rows, frame, .. } => Some((rows, frame)),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!((table_frame.x, table_frame.y, table_frame.w), (5.5, 1.2, 4.2));
        assert!((text_frame(&slide, "Revenue").w - 5.0).abs() < 1e-9);
    }

    #[test]
    fn chart_slide_defaults_to_full_width_bar() {
        let icons = IconCatalog::new();
        let ctx = BlockContext::new(ThemeName::Light.theme(), &icons);
        let entry = parse(
            r#"{"type": "chart", "chartData": [{"name": "Users", "labels": ["Jan"], "values": [3]}]}"#,
        );

        let slide = entry.render(&ctx, 1, 1);

        let chart = slide
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Chart { kind, frame, .. } => Some((*kind, frame.w)),
                _ => None,
            })
            .unwrap();
        assert_eq!(chart, (ChartKind::Bar, 9.2));
        assert!(!slide.elements.iter().any(|e| matches!(e, Element::Table { .. })));
    }

    #[test]
    fn render_slides_numbers_each_slide() {
        let icons = IconCatalog::new();
        let ctx = BlockContext::new(ThemeName::Dark.theme(), &icons);
        let entries = vec![
            parse(r#"{"type": "section", "title": "One"}"#),
            parse(r#"{"type": "flow", "nodes": [{"label": "A"}, {"label": "B"}], "brand": "OPS"}"#),
        ];

        let slides = render_slides(&ctx, &entries);

        assert_eq!(slides.len(), 2);
        assert!(slides[0].texts().any(|t| t == "1 / 2"));
        assert!(slides[1].texts().any(|t| t == "2 / 2"));
        assert!(slides[1].texts().any(|t| t == "OPS"));
    }
}

// ABOUTME: Rendering sink contract for slide building blocks
// ABOUTME: Geometry and style value types shared by components, templates and the PPTX writer

use serde::Deserialize;

/// Position and size of an element, in inches from the slide's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A square frame, as used for icons and number badges.
    pub fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }
}

/// Preset geometries the blocks draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    RoundRect,
    Ellipse,
    RightArrow,
}

impl ShapeKind {
    /// DrawingML preset geometry name.
    pub fn preset(self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::RoundRect => "roundRect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::RightArrow => "rightArrow",
        }
    }
}

/// Solid fill. `transparency` is a percentage, 0 being opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub color: String,
    pub transparency: u8,
}

/// Outline; `width` is in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub color: String,
    pub width: f64,
}

/// Outer drop shadow. `blur` and `offset` are in points, `opacity` in 0..=1.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub blur: f64,
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

impl Shadow {
    pub fn outer(blur: f64, offset: f64) -> Self {
        Self {
            blur,
            offset,
            color: "000000".to_string(),
            opacity: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeStyle {
    pub fill: Option<Fill>,
    pub line: Option<Line>,
    /// Corner radius in inches, only meaningful for `RoundRect`.
    pub rect_radius: Option<f64>,
    pub shadow: Option<Shadow>,
}

impl ShapeStyle {
    pub fn filled(color: &str) -> Self {
        Self {
            fill: Some(Fill {
                color: color.to_string(),
                transparency: 0,
            }),
            ..Self::default()
        }
    }

    pub fn transparency(mut self, percent: u8) -> Self {
        if let Some(fill) = self.fill.as_mut() {
            fill.transparency = percent.min(100);
        }
        self
    }

    pub fn outline(mut self, color: &str, width: f64) -> Self {
        self.line = Some(Line {
            color: color.to_string(),
            width,
        });
        self
    }

    pub fn radius(mut self, inches: f64) -> Self {
        self.rect_radius = Some(inches);
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Points.
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub color: String,
    pub font_face: String,
    pub align: Align,
    pub valign: VAlign,
    pub line_spacing: Option<f64>,
    /// Points of extra spacing between characters.
    pub letter_spacing: Option<f64>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            bold: false,
            italic: false,
            color: "000000".to_string(),
            font_face: "Arial".to_string(),
            align: Align::Left,
            valign: VAlign::Top,
            line_spacing: None,
            letter_spacing: None,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: f64, color: &str, font_face: &str) -> Self {
        Self {
            font_size,
            color: color.to_string(),
            font_face: font_face.to_string(),
            ..Self::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn centered(self) -> Self {
        self.align(Align::Center).valign(VAlign::Middle)
    }

    pub fn line_spacing(mut self, multiple: f64) -> Self {
        self.line_spacing = Some(multiple);
        self
    }

    pub fn letter_spacing(mut self, points: f64) -> Self {
        self.letter_spacing = Some(points);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Column widths in inches; evenly split when absent.
    pub col_widths: Option<Vec<f64>>,
    pub row_height: f64,
    pub border_color: String,
    /// Border width in points.
    pub border_width: f64,
    pub fill: String,
    pub header_color: String,
    pub text_color: String,
    pub font_face: String,
    pub font_size: f64,
    /// Cell margins in points: top, right, bottom, left.
    pub margin: [f64; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

/// One data series: `labels[i]` names the category of `values[i]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Series colors, cycled; pie charts color each slice instead.
    pub colors: Vec<String>,
    pub plot_fill: String,
    pub axis_label_color: String,
    pub grid_color: String,
    pub data_label_color: String,
    pub font_face: String,
    pub show_values: bool,
    /// Points.
    pub value_font_size: f64,
    /// Points.
    pub axis_font_size: f64,
}

/// Destination for everything a building block draws.
///
/// Calls are made in z-order: later calls paint above earlier ones.
pub trait SlideSink {
    fn set_background(&mut self, color: &str);

    fn add_shape(&mut self, kind: ShapeKind, frame: Frame, style: ShapeStyle);

    fn add_text(&mut self, text: &str, frame: Frame, style: TextStyle);

    /// Place an image given as a data URI (`image/svg+xml;base64,...`).
    fn add_image(&mut self, data: &str, frame: Frame);

    fn add_table(&mut self, rows: &[Vec<String>], frame: Frame, style: TableStyle);

    fn add_chart(&mut self, kind: ChartKind, series: &[ChartSeries], frame: Frame, style: ChartStyle);
}

// ABOUTME: In-memory slide used as the rendering sink
// ABOUTME: Records every draw call in order so it can be written to PPTX or inspected

use crate::sink::{
    ChartKind, ChartSeries, ChartStyle, Frame, ShapeKind, ShapeStyle, SlideSink, TableStyle,
    TextStyle,
};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape {
        kind: ShapeKind,
        frame: Frame,
        style: ShapeStyle,
    },
    Text {
        text: String,
        frame: Frame,
        style: TextStyle,
    },
    Image {
        data: String,
        frame: Frame,
    },
    Table {
        rows: Vec<Vec<String>>,
        frame: Frame,
        style: TableStyle,
    },
    Chart {
        kind: ChartKind,
        series: Vec<ChartSeries>,
        frame: Frame,
        style: ChartStyle,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub background: Option<String>,
    pub elements: Vec<Element>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> impl Iterator<Item = (&str, &Frame)> {
        self.elements.iter().filter_map(|e| match e {
            Element::Image { data, frame } => Some((data.as_str(), frame)),
            _ => None,
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = (ShapeKind, &Frame, &ShapeStyle)> {
        self.elements.iter().filter_map(|e| match e {
            Element::Shape { kind, frame, style } => Some((*kind, frame, style)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl SlideSink for Slide {
    fn set_background(&mut self, color: &str) {
        self.background = Some(color.to_string());
    }

    fn add_shape(&mut self, kind: ShapeKind, frame: Frame, style: ShapeStyle) {
        self.elements.push(Element::Shape { kind, frame, style });
    }

    fn add_text(&mut self, text: &str, frame: Frame, style: TextStyle) {
        self.elements.push(Element::Text {
            text: text.to_string(),
            frame,
            style,
        });
    }

    fn add_image(&mut self, data: &str, frame: Frame) {
        self.elements.push(Element::Image {
            data: data.to_string(),
            frame,
        });
    }

    fn add_table(&mut self, rows: &[Vec<String>], frame: Frame, style: TableStyle) {
        self.elements.push(Element::Table {
            rows: rows.to_vec(),
            frame,
            style,
        });
    }

    fn add_chart(&mut self, kind: ChartKind, series: &[ChartSeries], frame: Frame, style: ChartStyle) {
        self.elements.push(Element::Chart {
            kind,
            series: series.to_vec(),
            frame,
            style,
        });
    }
}

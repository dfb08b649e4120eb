//! # primitives
//!
//! Declarative renderer contract: every layout flattens into a `ChartFrame`
//! of primitives in paint order. Also hosts the dataset dispatch.

use crate::{
    BarGroupGeometry, BarGroupLayout, ChartDimensions, KeyStatsPanel, LineSeriesGeometry,
    LineSeriesLayout, PieGeometry, PieLayout, RadarGeometry, RadarLayout, StackedBarGeometry,
    StackedBarLayout, ValueFloor,
};
use fin_core::{ChartResult, Dataset};
use serde::Serialize;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// A single paintable shape in absolute pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Primitive {
    Path {
        d: String,
        fill: Option<String>,
        stroke: Option<String>,
        stroke_width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Wedge {
        d: String,
        fill: String,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: String,
        stroke: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Option<String>,
        stroke: Option<String>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: TextAnchor,
        size: f64,
        fill: String,
    },
}

impl Primitive {
    pub fn stroke_path(d: String, stroke: &str, stroke_width: f64) -> Self {
        Self::Path {
            d,
            fill: None,
            stroke: Some(stroke.to_string()),
            stroke_width,
        }
    }

    pub fn fill_path(d: String, fill: impl Into<String>) -> Self {
        Self::Path {
            d,
            fill: Some(fill.into()),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64, fill: &str) -> Self {
        Self::Rect {
            x,
            y,
            width,
            height,
            fill: fill.to_string(),
        }
    }

    pub fn line(from: (f64, f64), to: (f64, f64), stroke: &str) -> Self {
        Self::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            stroke: stroke.to_string(),
        }
    }

    pub fn dot(cx: f64, cy: f64, r: f64, fill: &str) -> Self {
        Self::Circle {
            cx,
            cy,
            r,
            fill: Some(fill.to_string()),
            stroke: None,
        }
    }

    pub fn ring(cx: f64, cy: f64, r: f64, stroke: &str) -> Self {
        Self::Circle {
            cx,
            cy,
            r,
            fill: None,
            stroke: Some(stroke.to_string()),
        }
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>, anchor: TextAnchor) -> Self {
        Self::Text {
            x,
            y,
            text: text.into(),
            anchor,
            size: 12.0,
            fill: fin_core::colors::TEXT_PRIMARY.to_string(),
        }
    }

    /// Same primitive with a different font size (text only)
    pub fn sized(mut self, new_size: f64) -> Self {
        if let Self::Text { size, .. } = &mut self {
            *size = new_size;
        }
        self
    }

    /// Same primitive with a different text color (text only)
    pub fn colored(mut self, color: &str) -> Self {
        if let Self::Text { fill, .. } = &mut self {
            *fill = color.to_string();
        }
        self
    }
}

/// Everything a renderer needs to paint one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
    /// Summary line shown under the chart
    pub caption: Option<String>,
}

impl ChartFrame {
    pub fn new(width: f64, height: f64, primitives: Vec<Primitive>) -> Self {
        Self {
            width,
            height,
            primitives,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// SVG `viewBox` covering the whole canvas
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

// ============================================================================
// STRATEGY PATTERN: Layout / Geometry traits
// ============================================================================

/// Pure dataset -> geometry transformation for one chart family
pub trait ChartLayout {
    type Input: ?Sized;
    type Output: Geometry;

    fn layout(&self, input: &Self::Input) -> ChartResult<Self::Output>;
}

/// Computed geometry that can be flattened into paint order
pub trait Geometry {
    fn dimensions(&self) -> ChartDimensions;

    fn primitives(&self) -> Vec<Primitive>;

    fn frame(&self) -> ChartFrame {
        let dims = self.dimensions();
        ChartFrame::new(dims.width, dims.height, self.primitives())
    }
}

// ============================================================================
// DATASET DISPATCH
// ============================================================================

/// Per-family layout configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub price: ChartDimensions,
    pub price_floor: ValueFloor,
    pub price_area: bool,
    pub bars: ChartDimensions,
    pub pie_size: f64,
    pub radar_size: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            price: ChartDimensions::price(),
            price_floor: ValueFloor::Zero,
            price_area: true,
            bars: ChartDimensions::bars(),
            pie_size: 300.0,
            radar_size: 300.0,
        }
    }
}

/// Geometry of whichever layout a dataset was routed to
#[derive(Debug, Clone, PartialEq)]
pub enum ChartGeometry {
    Line(LineSeriesGeometry),
    Bars(BarGroupGeometry),
    Stacked(StackedBarGeometry),
    Pie(PieGeometry),
    Radar(RadarGeometry),
    KeyStats(KeyStatsPanel),
}

impl Geometry for ChartGeometry {
    fn dimensions(&self) -> ChartDimensions {
        match self {
            Self::Line(g) => g.dimensions(),
            Self::Bars(g) => g.dimensions(),
            Self::Stacked(g) => g.dimensions(),
            Self::Pie(g) => g.dimensions(),
            Self::Radar(g) => g.dimensions(),
            Self::KeyStats(g) => g.dimensions(),
        }
    }

    fn primitives(&self) -> Vec<Primitive> {
        match self {
            Self::Line(g) => g.primitives(),
            Self::Bars(g) => g.primitives(),
            Self::Stacked(g) => g.primitives(),
            Self::Pie(g) => g.primitives(),
            Self::Radar(g) => g.primitives(),
            Self::KeyStats(g) => g.primitives(),
        }
    }

    fn frame(&self) -> ChartFrame {
        let dims = self.dimensions();
        let frame = ChartFrame::new(dims.width, dims.height, self.primitives());
        match self {
            Self::Line(g) => frame.with_caption(g.summary.caption()),
            Self::Bars(g) => frame.with_caption(g.summary.caption()),
            Self::Stacked(g) => frame.with_caption(g.summary.caption()),
            _ => frame,
        }
    }
}

/// Route one dataset to exactly one layout
pub fn render_dataset(dataset: &Dataset, options: &LayoutOptions) -> ChartResult<ChartGeometry> {
    tracing::debug!(kind = ?dataset.kind(), records = dataset.len(), "laying out dataset");

    let geometry = match dataset {
        Dataset::Prices(points) => ChartGeometry::Line(
            LineSeriesLayout::new(options.price)
                .floor(options.price_floor)
                .area(options.price_area)
                .layout(points.as_slice())?,
        ),
        Dataset::CashFlow(records) => {
            ChartGeometry::Bars(BarGroupLayout::new(options.bars).layout(records.as_slice())?)
        }
        Dataset::Expenses(records) => {
            ChartGeometry::Stacked(StackedBarLayout::new(options.bars).layout(records.as_slice())?)
        }
        Dataset::Assets(breakdown) => {
            ChartGeometry::Pie(PieLayout::new(options.pie_size).layout(breakdown)?)
        }
        Dataset::Ratios(snapshot) => {
            ChartGeometry::Radar(RadarLayout::new(options.radar_size).layout(snapshot)?)
        }
        Dataset::KeyStats(stats) => ChartGeometry::KeyStats(KeyStatsPanel::from_stats(stats)),
    };

    Ok(geometry)
}

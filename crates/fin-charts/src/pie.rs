//! Asset breakdown pie (donut) chart

use crate::{
    chartkit::{path_data, polar_point, PathBuilder, PathCommand},
    colors, ChartDimensions, ChartLayout, ChartMargin, Geometry, Primitive, TextAnchor,
};
use fin_core::{AssetBreakdown, AssetCategory, ChartError, ChartResult, MagnitudeFormatter};
use serde::Serialize;

/// First wedge starts at 12 o'clock
pub const START_ANGLE: f64 = -90.0;
/// Radius as a share of the canvas size
pub const RADIUS_RATIO: f64 = 0.35;
/// Center hole radius as a share of the pie radius
pub const HOLE_RATIO: f64 = 0.3;

/// Pie chart configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieLayout {
    size: f64,
    unit: f64,
}

impl PieLayout {
    pub fn new(size: f64) -> Self {
        Self { size, unit: 1e9 }
    }

    /// Multiplier from breakdown values to currency (breakdowns are in billions)
    pub fn unit(mut self, unit: f64) -> Self {
        self.unit = unit;
        self
    }
}

impl Default for PieLayout {
    fn default() -> Self {
        Self::new(300.0)
    }
}

/// One angular segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wedge {
    pub category: AssetCategory,
    pub value: f64,
    /// Degrees, SVG orientation (clockwise from 3 o'clock)
    pub start_angle: f64,
    pub end_angle: f64,
    pub sweep: f64,
    pub large_arc: bool,
    pub percentage: f64,
    /// `"NN.NN%"`
    pub label: String,
    /// Currency text for the legend
    pub value_label: String,
    pub color: &'static str,
    pub commands: Vec<PathCommand>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieGeometry {
    pub size: f64,
    pub center: (f64, f64),
    pub radius: f64,
    pub total: f64,
    pub total_label: String,
    pub wedges: Vec<Wedge>,
}

impl PieGeometry {
    /// Sum of all sweeps, 360 for any non-empty pie
    pub fn total_sweep(&self) -> f64 {
        self.wedges.iter().map(|w| w.sweep).sum()
    }
}

/// Wedge outline: center, out to the arc start, around, back to center.
/// A full circle is split into two half arcs since an arc whose end equals
/// its start draws nothing.
fn wedge_commands(center: (f64, f64), radius: f64, start: f64, sweep: f64) -> Vec<PathCommand> {
    let (sx, sy) = polar_point(center, radius, start);
    let builder = PathBuilder::new().move_to(center.0, center.1).line_to(sx, sy);

    let builder = if sweep >= 360.0 {
        let (mx, my) = polar_point(center, radius, start + 180.0);
        builder
            .arc_to(radius, radius, 0.0, false, true, mx, my)
            .arc_to(radius, radius, 0.0, false, true, sx, sy)
    } else {
        let (ex, ey) = polar_point(center, radius, start + sweep);
        builder.arc_to(radius, radius, 0.0, sweep > 180.0, true, ex, ey)
    };

    builder.close().into_commands()
}

impl ChartLayout for PieLayout {
    type Input = AssetBreakdown;
    type Output = PieGeometry;

    fn layout(&self, breakdown: &AssetBreakdown) -> ChartResult<PieGeometry> {
        let total = breakdown.total();
        if total <= 0.0 {
            tracing::debug!(class = ?breakdown.class(), "breakdown sums to zero");
            return Err(ChartError::EmptyDataset);
        }

        let center = (self.size / 2.0, self.size / 2.0);
        let radius = self.size * RADIUS_RATIO;
        let formatter = MagnitudeFormatter::currency();

        let mut cursor = START_ANGLE;
        let wedges = breakdown
            .non_zero()
            .map(|slice| {
                let sweep = slice.value / total * 360.0;
                let start = cursor;
                cursor += sweep;

                let percentage = slice.value / total * 100.0;
                let commands = wedge_commands(center, radius, start, sweep);
                Wedge {
                    category: slice.category,
                    value: slice.value,
                    start_angle: start,
                    end_angle: cursor,
                    sweep,
                    large_arc: sweep > 180.0,
                    percentage,
                    label: format!("{:.2}%", percentage),
                    value_label: formatter.format(Some(slice.value * self.unit)),
                    color: slice.category.color(),
                    path: path_data(&commands),
                    commands,
                }
            })
            .collect();

        Ok(PieGeometry {
            size: self.size,
            center,
            radius,
            total,
            total_label: formatter.format(Some(total * self.unit)),
            wedges,
        })
    }
}

impl Geometry for PieGeometry {
    fn dimensions(&self) -> ChartDimensions {
        ChartDimensions::new(self.size, self.size).with_margin(ChartMargin::uniform(0.0))
    }

    fn primitives(&self) -> Vec<Primitive> {
        let (cx, cy) = self.center;
        let mut out: Vec<Primitive> = self
            .wedges
            .iter()
            .map(|w| Primitive::Wedge {
                d: w.path.clone(),
                fill: w.color.to_string(),
            })
            .collect();

        out.push(Primitive::Circle {
            cx,
            cy,
            r: self.radius * HOLE_RATIO,
            fill: Some(colors::BG_PANEL.to_string()),
            stroke: Some(colors::SPOKE.to_string()),
        });
        out.push(Primitive::text(cx, cy - 8.0, "Total", TextAnchor::Middle).sized(16.0));
        out.push(
            Primitive::text(cx, cy + 12.0, &self.total_label, TextAnchor::Middle)
                .sized(14.0)
                .colored(colors::PRIMARY),
        );
        out
    }
}

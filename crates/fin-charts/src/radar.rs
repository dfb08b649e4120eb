//! Valuation ratio radar chart

use crate::{
    chartkit::{path_data, polar_point, polygon_commands, PathCommand},
    colors, ChartDimensions, ChartLayout, ChartMargin, Geometry, Primitive, TextAnchor,
};
use fin_core::{ChartResult, MagnitudeFormatter, RatioMetric, RatioSnapshot};
use serde::Serialize;

/// Reference ring fractions of the outer radius
pub const RING_RATIOS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];
/// Axis label distance beyond the outer ring
pub const LABEL_OFFSET: f64 = 30.0;

/// Radar chart configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarLayout {
    size: f64,
}

impl RadarLayout {
    pub fn new(size: f64) -> Self {
        Self { size }
    }
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self::new(300.0)
    }
}

/// Geometry of one metric axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub metric: RatioMetric,
    /// Degrees, 0 at 3 o'clock, clockwise
    pub angle: f64,
    pub value: f64,
    /// `value / max` clamped to `[0, 1]`
    pub normalized: f64,
    pub vertex: (f64, f64),
    pub spoke_end: (f64, f64),
    pub label_anchor: (f64, f64),
    pub label: &'static str,
    pub value_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarRing {
    pub ratio: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarGeometry {
    pub size: f64,
    pub center: (f64, f64),
    pub max_radius: f64,
    pub axes: Vec<RadarAxis>,
    pub rings: Vec<RadarRing>,
    pub commands: Vec<PathCommand>,
    pub path: String,
}

impl RadarGeometry {
    /// Polygon vertices in metric order
    pub fn vertices(&self) -> Vec<(f64, f64)> {
        self.axes.iter().map(|a| a.vertex).collect()
    }
}

impl ChartLayout for RadarLayout {
    type Input = RatioSnapshot;
    type Output = RadarGeometry;

    fn layout(&self, snapshot: &RatioSnapshot) -> ChartResult<RadarGeometry> {
        let center = (self.size / 2.0, self.size / 2.0);
        let max_radius = self.size * crate::pie::RADIUS_RATIO;
        let count = RatioMetric::ALL.len() as f64;

        let axes = RatioMetric::ALL
            .iter()
            .enumerate()
            .map(|(i, &metric)| {
                let value = snapshot.require(metric)?;
                let angle = i as f64 * 360.0 / count - 90.0;

                let ratio = value / metric.ceiling();
                if !(0.0..=1.0).contains(&ratio) {
                    tracing::debug!(metric = metric.key(), value, "radar value clamped");
                }
                let normalized = ratio.clamp(0.0, 1.0);

                Ok(RadarAxis {
                    metric,
                    angle,
                    value,
                    normalized,
                    vertex: polar_point(center, normalized * max_radius, angle),
                    spoke_end: polar_point(center, max_radius, angle),
                    label_anchor: polar_point(center, max_radius + LABEL_OFFSET, angle),
                    label: metric.label(),
                    value_label: MagnitudeFormatter::new(metric.kind()).format(Some(value)),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let vertices: Vec<(f64, f64)> = axes.iter().map(|a| a.vertex).collect();
        let commands = polygon_commands(&vertices);

        Ok(RadarGeometry {
            size: self.size,
            center,
            max_radius,
            rings: RING_RATIOS
                .iter()
                .map(|&ratio| RadarRing {
                    ratio,
                    radius: max_radius * ratio,
                })
                .collect(),
            path: path_data(&commands),
            commands,
            axes,
        })
    }
}

impl Geometry for RadarGeometry {
    fn dimensions(&self) -> ChartDimensions {
        ChartDimensions::new(self.size, self.size).with_margin(ChartMargin::uniform(0.0))
    }

    fn primitives(&self) -> Vec<Primitive> {
        let (cx, cy) = self.center;
        let mut out: Vec<Primitive> = self
            .rings
            .iter()
            .map(|ring| Primitive::ring(cx, cy, ring.radius, colors::RING))
            .collect();

        out.extend(
            self.axes
                .iter()
                .map(|axis| Primitive::line(self.center, axis.spoke_end, colors::SPOKE)),
        );

        out.push(Primitive::Polygon {
            points: self.vertices(),
            fill: colors::primary_alpha(0.2),
            stroke: colors::PRIMARY.to_string(),
        });

        for axis in &self.axes {
            let (vx, vy) = axis.vertex;
            out.push(Primitive::dot(vx, vy, 6.0, colors::PRIMARY));

            let (lx, ly) = axis.label_anchor;
            out.push(Primitive::text(lx, ly, axis.label, TextAnchor::Middle));
            out.push(
                Primitive::text(lx, ly + 14.0, &axis.value_label, TextAnchor::Middle)
                    .sized(10.0)
                    .colored(colors::PRIMARY),
            );
        }

        out
    }
}

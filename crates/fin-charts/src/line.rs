//! Price time-series line chart with optional area fill

use crate::{
    axis::{AxisTick, AxisTickGenerator},
    chartkit::{area_commands, line_commands, path_data, LinearScale, PathCommand, Scale},
    colors, ChartDimensions, ChartLayout, Geometry, Primitive, TextAnchor,
};
use fin_core::{price_range, ChartError, ChartResult, TimeSeriesPoint, Validate};
use serde::{Deserialize, Serialize};

/// Headroom above the largest price
const HEADROOM: f64 = 1.1;

/// Lower bound of the value axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueFloor {
    /// Axis always starts at 0
    #[default]
    Zero,
    /// Axis starts at the smallest price in the series
    SeriesMin,
}

/// Line chart configuration
#[derive(Debug, Clone, Copy)]
pub struct LineSeriesLayout {
    dims: ChartDimensions,
    floor: ValueFloor,
    area: bool,
    ticks: AxisTickGenerator,
}

impl LineSeriesLayout {
    pub fn new(dims: ChartDimensions) -> Self {
        Self {
            dims,
            floor: ValueFloor::Zero,
            area: false,
            ticks: AxisTickGenerator::new(),
        }
    }

    pub fn floor(mut self, floor: ValueFloor) -> Self {
        self.floor = floor;
        self
    }

    /// Also emit a closed area under the line
    pub fn area(mut self, area: bool) -> Self {
        self.area = area;
        self
    }

    pub fn ticks(mut self, ticks: AxisTickGenerator) -> Self {
        self.ticks = ticks;
        self
    }
}

impl Default for LineSeriesLayout {
    fn default() -> Self {
        Self::new(ChartDimensions::price())
    }
}

/// Pixel position of one data point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineMarker {
    pub year: i32,
    pub price: f64,
    pub x: f64,
    pub y: f64,
}

/// Closed fill under the line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaFill {
    /// Floor points under the last and then the first x position
    pub closing: [(f64, f64); 2],
    pub commands: Vec<PathCommand>,
    pub path: String,
}

/// Year span and price extremes shown under the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub first_year: i32,
    pub last_year: i32,
    pub min_price: f64,
    pub max_price: f64,
}

impl SeriesSummary {
    pub fn caption(&self) -> String {
        format!(
            "Historical stock prices from {} to {} | Price range: ${:.2} - ${:.2}",
            self.first_year, self.last_year, self.min_price, self.max_price
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeriesGeometry {
    pub dims: ChartDimensions,
    pub commands: Vec<PathCommand>,
    pub path: String,
    pub markers: Vec<LineMarker>,
    pub area: Option<AreaFill>,
    pub value_ticks: Vec<AxisTick>,
    pub year_ticks: Vec<AxisTick>,
    pub summary: SeriesSummary,
}

impl ChartLayout for LineSeriesLayout {
    type Input = [TimeSeriesPoint];
    type Output = LineSeriesGeometry;

    fn layout(&self, points: &[TimeSeriesPoint]) -> ChartResult<LineSeriesGeometry> {
        let Some((min_price, max_price)) = price_range(points) else {
            return Err(ChartError::invalid("price series is empty"));
        };
        points.validate()?;

        // Stable: duplicate years keep their input order
        let mut sorted = points.to_vec();
        sorted.sort_by_key(|p| p.year);

        let first_year = sorted[0].year;
        let last_year = sorted[sorted.len() - 1].year;

        let dims = self.dims;
        let x_scale = LinearScale::new()
            .domain(f64::from(first_year), f64::from(last_year))
            .range(dims.plot_left(), dims.plot_right());

        let floor = match self.floor {
            ValueFloor::Zero => 0.0,
            ValueFloor::SeriesMin => min_price,
        };
        let y_scale = LinearScale::new()
            .domain(floor, max_price * HEADROOM)
            .range(dims.axis_bottom(), dims.plot_top());

        if x_scale.is_degenerate() {
            tracing::debug!(year = first_year, "single-year series, centering markers");
        }
        if y_scale.is_degenerate() {
            tracing::debug!(floor, "flat value domain, centering line vertically");
        }

        let markers: Vec<LineMarker> = sorted
            .iter()
            .map(|p| LineMarker {
                year: p.year,
                price: p.price,
                x: x_scale.scale(f64::from(p.year)),
                y: y_scale.scale(p.price),
            })
            .collect();

        let vertices: Vec<(f64, f64)> = markers.iter().map(|m| (m.x, m.y)).collect();
        let commands = line_commands(&vertices);
        let path = path_data(&commands);

        let area = self.area.then(|| {
            let floor_y = y_scale.scale(floor);
            let commands = area_commands(&vertices, floor_y);
            AreaFill {
                closing: [
                    (markers[markers.len() - 1].x, floor_y),
                    (markers[0].x, floor_y),
                ],
                path: path_data(&commands),
                commands,
            }
        });

        Ok(LineSeriesGeometry {
            dims,
            commands,
            path,
            value_ticks: self.ticks.value_ticks(&y_scale),
            year_ticks: self.ticks.year_ticks(&x_scale, sorted.iter().map(|p| p.year)),
            markers,
            area,
            summary: SeriesSummary {
                first_year,
                last_year,
                min_price,
                max_price,
            },
        })
    }
}

impl Geometry for LineSeriesGeometry {
    fn dimensions(&self) -> ChartDimensions {
        self.dims
    }

    fn primitives(&self) -> Vec<Primitive> {
        let dims = self.dims;
        let mut out = Vec::with_capacity(self.markers.len() + self.value_ticks.len() * 2 + 8);

        if let Some(area) = &self.area {
            out.push(Primitive::fill_path(area.path.clone(), colors::primary_alpha(0.1)));
        }

        // Grid + value labels
        for tick in &self.value_ticks {
            out.push(Primitive::line(
                (dims.plot_left(), tick.position),
                (dims.plot_right(), tick.position),
                colors::GRID,
            ));
            out.push(
                Primitive::text(dims.plot_left() - 16.0, tick.position, &tick.label, TextAnchor::End)
                    .colored(colors::TEXT_MUTED),
            );
        }

        for tick in &self.year_ticks {
            out.push(
                Primitive::text(tick.position, dims.axis_bottom() + 22.0, &tick.label, TextAnchor::Middle)
                    .colored(colors::TEXT_MUTED),
            );
        }

        out.push(Primitive::stroke_path(self.path.clone(), colors::PRIMARY, 4.0));

        for marker in &self.markers {
            out.push(Primitive::dot(marker.x, marker.y, 5.0, colors::PRIMARY));
        }

        out
    }
}

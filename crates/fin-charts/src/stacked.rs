//! Stacked expense bars

use crate::{
    axis::{AxisTick, AxisTickGenerator},
    bars::{legend, value_axis, year_labels, year_span},
    chartkit::{BandScale, LinearScale, Scale},
    ChartDimensions, ChartLayout, Geometry, Primitive,
};
use fin_core::{ChartError, ChartResult, ExpenseCategory, ExpenseRecord, Validate};
use serde::Serialize;

/// Share of each slot taken by its stack
pub const STACK_FILL: f64 = 0.6;
/// Smallest drawn height of a nonzero segment
pub const MIN_SEGMENT_HEIGHT: f64 = 4.0;

/// Stacked bar chart configuration
#[derive(Debug, Clone, Copy)]
pub struct StackedBarLayout {
    dims: ChartDimensions,
    ticks: AxisTickGenerator,
}

impl StackedBarLayout {
    pub fn new(dims: ChartDimensions) -> Self {
        Self {
            dims,
            ticks: AxisTickGenerator::new(),
        }
    }

    pub fn ticks(mut self, ticks: AxisTickGenerator) -> Self {
        self.ticks = ticks;
        self
    }
}

impl Default for StackedBarLayout {
    fn default() -> Self {
        Self::new(ChartDimensions::bars())
    }
}

/// One category layer of a stack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSegment {
    pub category: ExpenseCategory,
    pub value: f64,
    pub y: f64,
    pub height: f64,
    pub color: &'static str,
}

/// All segments of one year, bottom first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub year: i32,
    pub x: f64,
    pub width: f64,
    pub total: f64,
    pub segments: Vec<StackSegment>,
}

impl Stack {
    /// Sum of drawn segment heights
    pub fn height(&self) -> f64 {
        self.segments.iter().map(|s| s.height).sum()
    }
}

/// Year span shown under the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub first_year: i32,
    pub last_year: i32,
}

impl ExpenseSummary {
    pub fn caption(&self) -> String {
        format!("Annual expense breakdown from {} to {}", self.first_year, self.last_year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedBarGeometry {
    pub dims: ChartDimensions,
    pub stacks: Vec<Stack>,
    /// Largest record total; the top of the value axis
    pub max_total: f64,
    pub value_ticks: Vec<AxisTick>,
    pub year_ticks: Vec<AxisTick>,
    pub summary: ExpenseSummary,
}

impl ChartLayout for StackedBarLayout {
    type Input = [ExpenseRecord];
    type Output = StackedBarGeometry;

    fn layout(&self, records: &[ExpenseRecord]) -> ChartResult<StackedBarGeometry> {
        if records.is_empty() {
            return Err(ChartError::invalid("expense series is empty"));
        }
        records.validate()?;

        let dims = self.dims;
        let bottom = dims.axis_bottom();

        let max_total = records.iter().map(ExpenseRecord::total).fold(0.0_f64, f64::max);
        if max_total == 0.0 {
            tracing::debug!(records = records.len(), "all expenses are zero, stacks flattened");
        }

        let y_scale = LinearScale::new()
            .domain(0.0, max_total)
            .range(bottom, dims.plot_top());
        let band = BandScale::new(records.len())
            .range(dims.plot_left(), dims.plot_right())
            .fill(STACK_FILL);

        let stacks = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut cumulative = 0.0;
                let segments = ExpenseCategory::STACK_ORDER
                    .iter()
                    .map(|&category| {
                        let value = record.value(category);
                        let height = if value > 0.0 {
                            (bottom - y_scale.scale(value)).max(MIN_SEGMENT_HEIGHT)
                        } else {
                            0.0
                        };
                        cumulative += height;
                        StackSegment {
                            category,
                            value,
                            y: bottom - cumulative,
                            height,
                            color: category.color(),
                        }
                    })
                    .collect();

                Stack {
                    year: record.year,
                    x: band.scale(i),
                    width: band.bandwidth(),
                    total: record.total(),
                    segments,
                }
            })
            .collect();

        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        let (first_year, last_year) = year_span(&years);

        Ok(StackedBarGeometry {
            dims,
            stacks,
            max_total,
            value_ticks: self.ticks.value_ticks(&y_scale),
            year_ticks: self.ticks.band_ticks(&band, &years),
            summary: ExpenseSummary {
                first_year,
                last_year,
            },
        })
    }
}

impl Geometry for StackedBarGeometry {
    fn dimensions(&self) -> ChartDimensions {
        self.dims
    }

    fn primitives(&self) -> Vec<Primitive> {
        let mut out = value_axis(self.dims, &self.value_ticks);

        for stack in &self.stacks {
            out.extend(
                stack
                    .segments
                    .iter()
                    .filter(|s| s.height > 0.0)
                    .map(|s| Primitive::rect(stack.x, s.y, stack.width, s.height, s.color)),
            );
        }

        out.extend(year_labels(self.dims, &self.year_ticks));
        out.extend(legend(
            self.dims,
            ExpenseCategory::STACK_ORDER.iter().map(|c| (c.label(), c.color())),
        ));
        out
    }
}

//! Grouped (side-by-side) cash flow bars

use crate::{
    axis::{AxisTick, AxisTickGenerator},
    chartkit::{BandScale, LinearScale, Scale},
    colors, ChartDimensions, ChartLayout, Geometry, Primitive, TextAnchor,
};
use fin_core::{CashFlowRecord, CashFlowSeries, ChartError, ChartResult, MagnitudeFormatter, Validate};
use serde::Serialize;

/// Share of each slot taken by its bar group
pub const GROUP_FILL: f64 = 0.8;
/// Horizontal gap between bars of one group
pub const BAR_GAP: f64 = 5.0;
/// Distance of a value label above its bar
pub const VALUE_LABEL_OFFSET: f64 = 5.0;

/// Grouped bar chart configuration
#[derive(Debug, Clone, Copy)]
pub struct BarGroupLayout {
    dims: ChartDimensions,
    ticks: AxisTickGenerator,
}

impl BarGroupLayout {
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

impl Default for BarGroupLayout {
    fn default() -> Self {
        Self::new(ChartDimensions::bars())
    }
}

/// One bar rectangle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub series: CashFlowSeries,
    /// Signed input value
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    /// Magnitude label anchored above the bar
    pub label: String,
    pub label_y: f64,
}

impl Bar {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Bars of one year, left to right in series order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroup {
    pub year: i32,
    pub x: f64,
    pub width: f64,
    pub bars: Vec<Bar>,
}

/// Year span shown under the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashFlowSummary {
    pub first_year: i32,
    pub last_year: i32,
}

impl CashFlowSummary {
    pub fn caption(&self) -> String {
        format!("Cash flow analysis from {} to {}", self.first_year, self.last_year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroupGeometry {
    pub dims: ChartDimensions,
    pub groups: Vec<BarGroup>,
    /// Largest magnitude across every record and series
    pub max_value: f64,
    pub value_ticks: Vec<AxisTick>,
    pub year_ticks: Vec<AxisTick>,
    pub summary: CashFlowSummary,
}

impl ChartLayout for BarGroupLayout {
    type Input = [CashFlowRecord];
    type Output = BarGroupGeometry;

    fn layout(&self, records: &[CashFlowRecord]) -> ChartResult<BarGroupGeometry> {
        if records.is_empty() {
            return Err(ChartError::invalid("cash flow series is empty"));
        }
        records.validate()?;

        let dims = self.dims;
        let bottom = dims.axis_bottom();

        let max_value = records
            .iter()
            .flat_map(|r| r.magnitudes())
            .fold(0.0_f64, f64::max);

        let y_scale = LinearScale::new()
            .domain(0.0, max_value)
            .range(bottom, dims.plot_top());
        let band = BandScale::new(records.len())
            .range(dims.plot_left(), dims.plot_right())
            .fill(GROUP_FILL);

        if max_value == 0.0 {
            tracing::debug!(records = records.len(), "all cash flow values are zero, bars flattened");
        }

        let series_count = CashFlowSeries::ORDER.len() as f64;
        let group_width = band.bandwidth();
        let bar_width = group_width / (series_count + 0.5);
        let formatter = MagnitudeFormatter::currency();

        let groups = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let group_x = band.scale(i);
                let bars = CashFlowSeries::ORDER
                    .iter()
                    .zip(record.magnitudes())
                    .enumerate()
                    .map(|(j, (&series, magnitude))| {
                        let height = if max_value == 0.0 {
                            0.0
                        } else {
                            bottom - y_scale.scale(magnitude)
                        };
                        let y = bottom - height;
                        Bar {
                            series,
                            value: match series {
                                CashFlowSeries::FreeCashFlow => record.free_cash_flow,
                                CashFlowSeries::CapitalExpenditure => record.capital_expenditure,
                            },
                            x: group_x + j as f64 * (bar_width + BAR_GAP),
                            y,
                            width: bar_width,
                            height,
                            color: series.color(),
                            label: formatter.format(Some(magnitude)),
                            label_y: y - VALUE_LABEL_OFFSET,
                        }
                    })
                    .collect();

                BarGroup {
                    year: record.year,
                    x: group_x,
                    width: group_width,
                    bars,
                }
            })
            .collect();

        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        let (first_year, last_year) = year_span(&years);

        Ok(BarGroupGeometry {
            dims,
            groups,
            max_value,
            value_ticks: self.ticks.value_ticks(&y_scale),
            year_ticks: self.ticks.band_ticks(&band, &years),
            summary: CashFlowSummary {
                first_year,
                last_year,
            },
        })
    }
}

impl Geometry for BarGroupGeometry {
    fn dimensions(&self) -> ChartDimensions {
        self.dims
    }

    fn primitives(&self) -> Vec<Primitive> {
        let dims = self.dims;
        let mut out = value_axis(dims, &self.value_ticks);

        for group in &self.groups {
            for bar in &group.bars {
                out.push(Primitive::rect(bar.x, bar.y, bar.width, bar.height, bar.color));
                out.push(
                    Primitive::text(bar.center_x(), bar.label_y, &bar.label, TextAnchor::Middle)
                        .sized(10.0),
                );
            }
        }

        out.extend(year_labels(dims, &self.year_ticks));
        out.extend(legend(
            dims,
            CashFlowSeries::ORDER.iter().map(|s| (s.label(), s.color())),
        ));
        out
    }
}

// ============================================================================
// SHARED BAR DECORATIONS
// ============================================================================

/// Smallest and largest year; bars keep input order so the ends may differ
pub(crate) fn year_span(years: &[i32]) -> (i32, i32) {
    years
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &year| (lo.min(year), hi.max(year)))
}

/// Axis lines, grid and currency labels for a vertical value axis
pub(crate) fn value_axis(dims: ChartDimensions, ticks: &[AxisTick]) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(ticks.len() * 2 + 2);
    for tick in ticks {
        out.push(Primitive::line(
            (dims.plot_left(), tick.position),
            (dims.plot_right(), tick.position),
            colors::GRID,
        ));
        out.push(
            Primitive::text(dims.plot_left() - 10.0, tick.position, &tick.label, TextAnchor::End)
                .sized(10.0)
                .colored(colors::TEXT_MUTED),
        );
    }
    out.push(Primitive::line(
        (dims.plot_left(), dims.plot_top()),
        (dims.plot_left(), dims.axis_bottom()),
        colors::AXIS,
    ));
    out.push(Primitive::line(
        (dims.plot_left(), dims.axis_bottom()),
        (dims.plot_right(), dims.axis_bottom()),
        colors::AXIS,
    ));
    out
}

/// Category labels under each group/stack
pub(crate) fn year_labels(dims: ChartDimensions, ticks: &[AxisTick]) -> Vec<Primitive> {
    ticks
        .iter()
        .map(|tick| {
            Primitive::text(tick.position, dims.axis_bottom() + 20.0, &tick.label, TextAnchor::Middle)
        })
        .collect()
}

/// Swatch + label row along the top edge
pub(crate) fn legend<'a>(
    dims: ChartDimensions,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> Vec<Primitive> {
    let mut out = Vec::new();
    let mut x = dims.plot_left();
    for (label, color) in entries {
        out.push(Primitive::rect(x, 4.0, 10.0, 10.0, color));
        out.push(Primitive::text(x + 14.0, 13.0, label, TextAnchor::Start).sized(10.0));
        x += 14.0 + label.len() as f64 * 6.0 + 16.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn microsoft() -> Vec<CashFlowRecord> {
        vec![
            CashFlowRecord::new(2021, 74_071_000_000.0, -44_477_000_000.0),
            CashFlowRecord::new(2022, 59_475_000_000.0, -28_107_000_000.0),
            CashFlowRecord::new(2023, 65_149_000_000.0, -23_886_000_000.0),
            CashFlowRecord::new(2024, 56_118_000_000.0, -20_622_000_000.0),
        ]
    }

    #[test]
    fn test_group_and_bar_widths() {
        let geometry = BarGroupLayout::default().layout(microsoft().as_slice()).unwrap();

        // inner width 720 over 4 slots
        let group = &geometry.groups[0];
        assert_relative_eq!(group.width, 144.0, epsilon = 1e-9);
        assert_relative_eq!(group.x, 78.0, epsilon = 1e-9);
        assert_relative_eq!(group.bars[0].width, 57.6, epsilon = 1e-9);
        assert_relative_eq!(group.bars[1].x, 78.0 + 57.6 + 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_heights_use_chart_local_magnitude() {
        let geometry = BarGroupLayout::default().layout(microsoft().as_slice()).unwrap();

        assert_eq!(geometry.max_value, 74_071_000_000.0);
        let tallest = &geometry.groups[0].bars[0];
        assert_eq!(tallest.height, 240.0);
        assert_eq!(tallest.y, 20.0);

        // Negative capex plots its magnitude
        let capex = &geometry.groups[0].bars[1];
        assert!(capex.height > 0.0);
        assert_eq!(capex.value, -44_477_000_000.0);
        assert_eq!(capex.label, "$44.5B");
        assert_eq!(capex.label_y, capex.y - 5.0);
    }

    #[test]
    fn test_zero_magnitude_has_zero_height() {
        let records = vec![
            CashFlowRecord::new(2020, 6_373_000_000.0, 0.0),
            CashFlowRecord::new(2021, 6_991_000_000.0, 1_184_000_000.0),
        ];
        let geometry = BarGroupLayout::default().layout(records.as_slice()).unwrap();

        let bar = &geometry.groups[0].bars[1];
        assert_eq!(bar.height, 0.0);
        assert_eq!(bar.y, 260.0);
    }

    #[test]
    fn test_all_zero_values_flatten() {
        let records = vec![CashFlowRecord::new(2020, 0.0, 0.0)];
        let geometry = BarGroupLayout::default().layout(records.as_slice()).unwrap();

        assert!(geometry.groups[0].bars.iter().all(|b| b.height == 0.0));
        assert_eq!(geometry.value_ticks.len(), 1);
    }

    #[test]
    fn test_year_labels_centered_under_groups() {
        let geometry = BarGroupLayout::default().layout(microsoft().as_slice()).unwrap();

        let labels: Vec<_> = geometry.year_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["2021", "2022", "2023", "2024"]);
        let group = &geometry.groups[2];
        assert_relative_eq!(
            geometry.year_ticks[2].position,
            group.x + group.width / 2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_empty_records_are_invalid() {
        let err = BarGroupLayout::default().layout(&[]).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_summary_caption_spans_years() {
        let records = vec![
            CashFlowRecord::new(2023, 65_149_000_000.0, -23_886_000_000.0),
            CashFlowRecord::new(2020, 45_234_000_000.0, -15_441_000_000.0),
            CashFlowRecord::new(2024, 56_118_000_000.0, -20_622_000_000.0),
        ];
        let geometry = BarGroupLayout::default().layout(records.as_slice()).unwrap();

        assert_eq!(geometry.summary.first_year, 2020);
        assert_eq!(geometry.summary.last_year, 2024);
        assert_eq!(geometry.summary.caption(), "Cash flow analysis from 2020 to 2024");
    }

    #[test]
    fn test_primitives_one_rect_per_bar() {
        let geometry = BarGroupLayout::default().layout(microsoft().as_slice()).unwrap();
        let rects = geometry
            .primitives()
            .into_iter()
            .filter(|p| matches!(p, Primitive::Rect { height, .. } if *height > 10.0))
            .count();
        assert_eq!(rects, 8);
    }
}

//! Axis tick generation for value, year and band axes

use crate::chartkit::{BandScale, LinearScale, Scale};
use fin_core::MagnitudeFormatter;
use serde::Serialize;

/// Default value-axis interval count (five ticks)
pub const DEFAULT_TICK_COUNT: usize = 4;

/// A labeled tick: domain value, pixel position along its axis, text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Derives labeled ticks for chart axes
#[derive(Debug, Clone, Copy)]
pub struct AxisTickGenerator {
    count: usize,
    formatter: MagnitudeFormatter,
}

impl AxisTickGenerator {
    pub fn new() -> Self {
        Self {
            count: DEFAULT_TICK_COUNT,
            formatter: MagnitudeFormatter::currency(),
        }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn formatter(mut self, formatter: MagnitudeFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Evenly spaced ticks over the scale's domain, labeled as magnitudes
    pub fn value_ticks(&self, scale: &LinearScale) -> Vec<AxisTick> {
        scale
            .ticks(self.count)
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: scale.scale(value),
                label: self.formatter.format(Some(value)),
            })
            .collect()
    }

    /// One tick per distinct year, ascending, labeled with the raw year
    pub fn year_ticks(
        &self,
        scale: &LinearScale,
        years: impl IntoIterator<Item = i32>,
    ) -> Vec<AxisTick> {
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        years.dedup();

        years
            .into_iter()
            .map(|year| {
                let value = f64::from(year);
                AxisTick {
                    value,
                    position: scale.scale(value),
                    label: year.to_string(),
                }
            })
            .collect()
    }

    /// One tick per band slot, centered, in input order
    pub fn band_ticks<S: ToString>(&self, scale: &BandScale, keys: &[S]) -> Vec<AxisTick> {
        keys.iter()
            .enumerate()
            .map(|(i, key)| AxisTick {
                value: i as f64,
                position: scale.scale_center(i),
                label: key.to_string(),
            })
            .collect()
    }
}

impl Default for AxisTickGenerator {
    fn default() -> Self {
        Self::new()
    }
}

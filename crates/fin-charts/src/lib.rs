//! # fin-charts
//!
//! Pure chart geometry engine for company financials.
//! Turns parsed datasets into pixel-space primitives (paths, rectangles,
//! wedges, polygons) plus axis ticks and magnitude labels.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, band)
//! - Layout per chart family (`ChartLayout`)
//! - Primitive emission (`Geometry`)
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, path commands, path builder
//! - `axis` - Value, year and band tick generation
//! - `line` - Price time-series line/area layout
//! - `bars` - Grouped cash flow bars
//! - `stacked` - Stacked expense bars
//! - `pie` - Asset breakdown wedges
//! - `radar` - Valuation ratio polygon
//! - `keystats` - Key statistics cards
//! - `primitives` - Renderer contract and dataset dispatch
//!
//! Every layout is a pure function of its input and dimensions.

pub mod axis;
pub mod bars;
pub mod chartkit;
pub mod keystats;
pub mod line;
pub mod pie;
pub mod primitives;
pub mod radar;
pub mod stacked;

pub use axis::*;
pub use bars::*;
pub use chartkit::*;
pub use keystats::*;
pub use line::*;
pub use pie::*;
pub use primitives::*;
pub use radar::*;
pub use stacked::*;

// Re-export colors from fin-core for convenience
pub use fin_core::colors;

use serde::{Deserialize, Serialize};

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Price line chart padding
    pub const fn price() -> Self {
        Self::new(10.0, 16.0, 30.0, 50.0)
    }

    /// Bar chart padding (room for currency labels on the left)
    pub const fn bars() -> Self {
        Self::new(20.0, 20.0, 40.0, 60.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::bars()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// 800x260 price canvas
    pub fn price() -> Self {
        Self::new(800.0, 260.0).with_margin(ChartMargin::price())
    }

    /// 800x300 bar canvas
    pub fn bars() -> Self {
        Self::new(800.0, 300.0).with_margin(ChartMargin::bars())
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Pixel x of the left edge of the plot area
    pub fn plot_left(&self) -> f64 {
        self.margin.left
    }

    pub fn plot_right(&self) -> f64 {
        self.margin.left + self.inner_width()
    }

    pub fn plot_top(&self) -> f64 {
        self.margin.top
    }

    /// Pixel y of the value axis baseline
    pub fn axis_bottom(&self) -> f64 {
        self.margin.top + self.inner_height()
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::bars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_dimensions() {
        let dims = ChartDimensions::price();
        assert_eq!(dims.inner_width(), 734.0);
        assert_eq!(dims.inner_height(), 220.0);
        assert_eq!(dims.axis_bottom(), 230.0);
        assert_eq!(dims.plot_right(), 784.0);
    }

    #[test]
    fn test_inner_size_never_negative() {
        let dims = ChartDimensions::new(40.0, 30.0).with_margin(ChartMargin::bars());
        assert_eq!(dims.inner_width(), 0.0);
        assert_eq!(dims.inner_height(), 0.0);
    }
}

//! # chartkit
//!
//! Core chart primitives: scales, path commands, path builders.
//! Implements Strategy pattern for flexible scale behaviors.

use serde::Serialize;
use std::fmt;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// `count + 1` evenly spaced domain values, both bounds included
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale).
///
/// A collapsed domain (`min == max`) maps every value to the middle of the
/// range instead of dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// True when the domain has collapsed to a single value
    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    fn midpoint(&self) -> f64 {
        (self.range.0 + self.range.1) / 2.0
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if self.is_degenerate() {
            return self.midpoint();
        }

        let mut t = (value - d_min) / (d_max - d_min);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }

        // Weighted form keeps both endpoints exact
        r_min * (1.0 - t) + r_max * t
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if r_min == r_max {
            return (d_min + d_max) / 2.0;
        }

        let t = (value - r_min) / (r_max - r_min);
        d_min * (1.0 - t) + d_max * t
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count == 0 || self.is_degenerate() {
            return vec![min];
        }

        let n = count as f64;
        (0..=count)
            .map(|i| {
                let t = i as f64 / n;
                min * (1.0 - t) + max * t
            })
            .collect()
    }
}

// ============================================================================
// BAND SCALE (categorical slots for bar groups and stacks)
// ============================================================================

/// Band scale: `count` equal slots over the range, each holding one band
/// of `step * fill` width centered in its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain_count: usize,
    range: (f64, f64),
    fill: f64,
}

impl BandScale {
    pub fn new(count: usize) -> Self {
        Self {
            domain_count: count,
            range: (0.0, 1.0),
            fill: 1.0,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Fraction of each slot covered by its band
    pub fn fill(mut self, ratio: f64) -> Self {
        self.fill = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn count(&self) -> usize {
        self.domain_count
    }

    /// Get step size (slot width)
    pub fn step(&self) -> f64 {
        if self.domain_count == 0 {
            return 0.0;
        }

        let (r_min, r_max) = self.range;
        (r_max - r_min) / self.domain_count as f64
    }

    /// Get band width (width of each group/stack)
    pub fn bandwidth(&self) -> f64 {
        self.step() * self.fill
    }

    /// Left edge of the band at `index`
    pub fn scale(&self, index: usize) -> f64 {
        let step = self.step();
        self.range.0 + index as f64 * step + (step - self.bandwidth()) / 2.0
    }

    /// Get center position for index
    pub fn scale_center(&self, index: usize) -> f64 {
        self.range.0 + (index as f64 + 0.5) * self.step()
    }
}

impl Default for BandScale {
    fn default() -> Self {
        Self::new(1)
    }
}

// ============================================================================
// PATH COMMANDS
// ============================================================================

/// One SVG path-data command in absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathCommand {
    /// End point of the command, `None` for `Close`
    pub fn point(&self) -> Option<(f64, f64)> {
        match *self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } | Self::ArcTo { x, y, .. } => {
                Some((x, y))
            }
            Self::Close => None,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveTo { x, y } => write!(f, "M{:.2},{:.2}", x, y),
            Self::LineTo { x, y } => write!(f, "L{:.2},{:.2}", x, y),
            Self::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => write!(
                f,
                "A{:.2},{:.2},{:.2},{},{},{:.2},{:.2}",
                rx, ry, rotation, large_arc as u8, sweep as u8, x, y
            ),
            Self::Close => f.write_str("Z"),
        }
    }
}

/// Render a command list as SVG path data
pub fn path_data(commands: &[PathCommand]) -> String {
    use fmt::Write;

    let mut path = String::with_capacity(commands.len() * 16);
    for command in commands {
        // Writing into a String cannot fail
        let _ = write!(path, "{command}");
    }
    path
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo { x, y });
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo { x, y });
        self
    }

    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        self.commands.push(PathCommand::ArcTo {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            x,
            y,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PathCommand> {
        self.commands
    }

    pub fn build(self) -> String {
        path_data(&self.commands)
    }
}

// ============================================================================
// LINE / AREA / POLYGON GENERATORS
// ============================================================================

/// Open polyline: one `moveTo`, then `lineTo` per remaining point
pub fn line_commands(points: &[(f64, f64)]) -> Vec<PathCommand> {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return Vec::new();
    };

    rest.iter()
        .fold(PathBuilder::new().move_to(x0, y0), |b, &(x, y)| b.line_to(x, y))
        .into_commands()
}

/// Closed area under a polyline, dropped to `baseline_y` under the last
/// and then the first point
pub fn area_commands(points: &[(f64, f64)], baseline_y: f64) -> Vec<PathCommand> {
    let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) else {
        return Vec::new();
    };

    let mut commands = line_commands(points);
    commands.push(PathCommand::LineTo { x: last_x, y: baseline_y });
    commands.push(PathCommand::LineTo { x: first_x, y: baseline_y });
    commands.push(PathCommand::Close);
    commands
}

/// Closed polygon through every vertex
pub fn polygon_commands(points: &[(f64, f64)]) -> Vec<PathCommand> {
    let mut commands = line_commands(points);
    if !commands.is_empty() {
        commands.push(PathCommand::Close);
    }
    commands
}

/// Point on a circle at `angle_deg`, 0° pointing right, clockwise in SVG space
pub fn polar_point(center: (f64, f64), radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (center.0 + radius * rad.cos(), center.1 + radius * rad.sin())
}

// ============================================================================
// TESTS
// ============================================================================

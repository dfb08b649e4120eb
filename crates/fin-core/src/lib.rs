//! # fin-core
//!
//! Core domain types for the company financials dashboard.
//! Implements Strategy pattern for magnitude formatting.

pub mod breakdown;
pub mod dataset;
pub mod error;
pub mod ratio;
pub mod records;

pub use breakdown::*;
pub use dataset::*;
pub use error::{ChartError, ChartResult};
pub use ratio::*;
pub use records::*;

use serde::{Deserialize, Serialize};

/// Placeholder for values that are missing or not numeric
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for turning a finite number into display text
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Round to `decimals` places with ties away from zero; `{:.N}` alone
/// rounds exact ties to even.
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `$X.YB` / `$X.YM` / `$X.YK` / `$X.YY`. Magnitude only unless `signed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyFormatter {
    pub signed: bool,
}

impl ValueFormatter for CurrencyFormatter {
    fn format(&self, value: f64) -> String {
        let abs = value.abs();
        let sign = if self.signed && value < 0.0 { "-" } else { "" };

        if abs >= 1_000_000_000.0 {
            format!("{sign}${:.1}B", round_half_up(abs / 1_000_000_000.0, 1))
        } else if abs >= 1_000_000.0 {
            format!("{sign}${:.1}M", round_half_up(abs / 1_000_000.0, 1))
        } else if abs >= 1_000.0 {
            format!("{sign}${:.1}K", round_half_up(abs / 1_000.0, 1))
        } else {
            format!("{sign}${:.2}", round_half_up(abs, 2))
        }
    }
}

/// Fraction rendered as a percentage with two decimals
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentageFormatter;

impl ValueFormatter for PercentageFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.2}%", round_half_up(value * 100.0, 2))
    }
}

/// Plain two-decimal ratio
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioFormatter;

impl ValueFormatter for RatioFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.2}", round_half_up(value, 2))
    }
}

/// How a raw number should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Currency,
    Percentage,
    Ratio,
}

/// Abbreviated label for a raw magnitude, `"N/A"` for missing input
#[derive(Debug, Clone, Copy)]
pub struct MagnitudeFormatter {
    kind: ValueKind,
    signed: bool,
}

impl MagnitudeFormatter {
    pub const fn new(kind: ValueKind) -> Self {
        Self { kind, signed: false }
    }

    pub const fn currency() -> Self {
        Self::new(ValueKind::Currency)
    }

    pub const fn percentage() -> Self {
        Self::new(ValueKind::Percentage)
    }

    pub const fn ratio() -> Self {
        Self::new(ValueKind::Ratio)
    }

    /// Keep the sign on currency output (`-$1.5B`)
    pub const fn signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn format(&self, value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => self.format_with(v),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// Format an untyped JSON value; numeric strings are accepted
    pub fn format_json(&self, value: &serde_json::Value) -> String {
        let number = match value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        self.format(number)
    }

    fn format_with(&self, value: f64) -> String {
        match self.kind {
            ValueKind::Currency => CurrencyFormatter { signed: self.signed }.format(value),
            ValueKind::Percentage => PercentageFormatter.format(value),
            ValueKind::Ratio => RatioFormatter.format(value),
        }
    }
}

impl Default for MagnitudeFormatter {
    fn default() -> Self {
        Self::currency()
    }
}

/// Shorthand for `MagnitudeFormatter::new(kind).format(value)`
pub fn format_magnitude(value: Option<f64>, kind: ValueKind) -> String {
    MagnitudeFormatter::new(kind).format(value)
}

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// Companies the dashboard ships with
pub const FEATURED_COMPANIES: [&str; 3] = ["Microsoft", "PepsiCo", "BlackRock"];

/// Company identifier as used in API paths (e.g., "Microsoft")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company(pub String);

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive identity (the source data mixes "PepsiCo"/"Pepsico")
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }

    pub fn featured() -> Vec<Self> {
        FEATURED_COMPANIES.iter().map(|&name| Self::new(name)).collect()
    }
}

impl Default for Company {
    fn default() -> Self {
        Self(FEATURED_COMPANIES[0].to_string())
    }
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Company {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Chart families, one API endpoint each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Prices,
    CashFlow,
    Expenses,
    CurrentAssets,
    NonCurrentAssets,
    Ratios,
    KeyStats,
}

impl ChartKind {
    pub fn all() -> &'static [Self] {
        &[
            Self::KeyStats,
            Self::Prices,
            Self::CashFlow,
            Self::Expenses,
            Self::CurrentAssets,
            Self::NonCurrentAssets,
            Self::Ratios,
        ]
    }

    /// Path segment of the metric family endpoint
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Prices => "prices",
            Self::CashFlow => "flow",
            Self::Expenses => "stacked",
            Self::CurrentAssets => "curr",
            Self::NonCurrentAssets => "noncurr",
            Self::Ratios => "ratio",
            Self::KeyStats => "key",
        }
    }

    pub fn from_endpoint(segment: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.endpoint().eq_ignore_ascii_case(segment))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Prices => "Stock Price Trend",
            Self::CashFlow => "Cash Flow vs Capital Expenditure",
            Self::Expenses => "Expense Breakdown",
            Self::CurrentAssets => "Current Assets",
            Self::NonCurrentAssets => "Non-Current Assets",
            Self::Ratios => "Financial Ratios",
            Self::KeyStats => "Key Statistics",
        }
    }

    /// Subject used in "Loading …" / "No … data" placeholders
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Prices => "price",
            Self::CashFlow => "cash flow",
            Self::Expenses => "expense",
            Self::CurrentAssets => "current assets",
            Self::NonCurrentAssets => "non-current assets",
            Self::Ratios => "ratio",
            Self::KeyStats => "key statistics",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const PRIMARY: &str = "#1976d2";
    pub const RED: &str = "#e74c3c";
    pub const BLUE: &str = "#3498db";
    pub const GREEN: &str = "#2ecc71";
    pub const ORANGE: &str = "#f39c12";
    pub const PURPLE: &str = "#9b59b6";
    pub const BG_PANEL: &str = "#ffffff";
    pub const AXIS: &str = "#d1d5db";
    pub const GRID: &str = "#f3f4f6";
    pub const RING: &str = "#f0f0f0";
    pub const SPOKE: &str = "#e0e0e0";
    pub const TEXT_PRIMARY: &str = "#2c3e50";
    pub const TEXT_MUTED: &str = "#6b7280";

    pub fn primary_alpha(alpha: f64) -> String {
        format!("rgba(25, 118, 210, {:.2})", alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_thresholds() {
        let f = MagnitudeFormatter::currency();
        assert_eq!(f.format(Some(1_500_000_000.0)), "$1.5B");
        assert_eq!(f.format(Some(2_500_000.0)), "$2.5M");
        assert_eq!(f.format(Some(7_250.0)), "$7.3K");
        assert_eq!(f.format(Some(42.5)), "$42.50");
        assert_eq!(f.format(Some(0.0)), "$0.00");
    }

    #[test]
    fn test_currency_ties_round_up() {
        let f = MagnitudeFormatter::currency();
        assert_eq!(f.format(Some(1_250_000_000.0)), "$1.3B");
        assert_eq!(f.format(Some(7_250_000.0)), "$7.3M");
        assert_eq!(f.format(Some(0.125)), "$0.13");
        assert_eq!(f.format(Some(-0.125)), "$0.13");
        assert_eq!(MagnitudeFormatter::currency().signed(true).format(Some(-1_250.0)), "-$1.3K");
        assert_eq!(format_magnitude(Some(0.625), ValueKind::Ratio), "0.63");
    }

    #[test]
    fn test_currency_sign_dropped_unless_requested() {
        assert_eq!(format_magnitude(Some(-44_477_000_000.0), ValueKind::Currency), "$44.5B");
        let signed = MagnitudeFormatter::currency().signed(true);
        assert_eq!(signed.format(Some(-44_477_000_000.0)), "-$44.5B");
        assert_eq!(signed.format(Some(12.0)), "$12.00");
    }

    #[test]
    fn test_percentage_and_ratio() {
        assert_eq!(format_magnitude(Some(0.021), ValueKind::Percentage), "2.10%");
        assert_eq!(format_magnitude(Some(1.7805), ValueKind::Ratio), "1.78");
    }

    #[test]
    fn test_not_available() {
        assert_eq!(format_magnitude(None, ValueKind::Currency), "N/A");
        assert_eq!(format_magnitude(Some(f64::NAN), ValueKind::Ratio), "N/A");

        let f = MagnitudeFormatter::percentage();
        assert_eq!(f.format_json(&serde_json::Value::Null), "N/A");
        assert_eq!(f.format_json(&serde_json::json!("abc")), "N/A");
        assert_eq!(f.format_json(&serde_json::json!("0.5")), "50.00%");
        assert_eq!(f.format_json(&serde_json::json!(0.18)), "18.00%");
    }

    #[test]
    fn test_company_identity() {
        let company = Company::new("PepsiCo");
        assert!(company.matches("pepsico"));
        assert_eq!(Company::featured().len(), 3);
        assert_eq!(Company::default().as_str(), "Microsoft");
    }

    #[test]
    fn test_chart_kind_endpoints() {
        for kind in ChartKind::all() {
            assert_eq!(ChartKind::from_endpoint(kind.endpoint()), Some(*kind));
        }
        assert_eq!(ChartKind::Expenses.endpoint(), "stacked");
    }
}

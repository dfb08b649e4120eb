//! Year-indexed financial records (price series, cash flow, expenses)

use crate::{
    colors,
    error::{ensure_finite, ensure_non_negative},
    ChartResult,
};
use serde::{de, Deserialize, Deserializer, Serialize};

// ============================================================================
// VALIDATION
// ============================================================================

/// Record-level precondition check run once after parsing
pub trait Validate {
    fn validate(&self) -> ChartResult<()>;
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> ChartResult<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

/// Years arrive as integers or, from VARCHAR(4) columns, as numeric strings
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearRepr {
        Int(i64),
        Text(String),
    }

    match YearRepr::deserialize(deserializer)? {
        YearRepr::Int(year) => i32::try_from(year)
            .map_err(|_| de::Error::custom(format!("year {year} out of range"))),
        YearRepr::Text(text) => text
            .trim()
            .parse::<i32>()
            .map_err(|_| de::Error::custom(format!("invalid year {text:?}"))),
    }
}

// ============================================================================
// PRICE SERIES
// ============================================================================

/// Yearly closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i32,
    pub price: f64,
}

impl TimeSeriesPoint {
    pub fn new(year: i32, price: f64) -> Self {
        Self { year, price }
    }
}

impl Validate for TimeSeriesPoint {
    fn validate(&self) -> ChartResult<()> {
        ensure_non_negative("price", self.price)
    }
}

/// (min, max) of a slice of prices, `None` when empty
pub fn price_range(points: &[TimeSeriesPoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }

    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for point in points {
        min = min.min(point.price);
        max = max.max(point.price);
    }

    Some((min, max))
}

// ============================================================================
// CASH FLOW
// ============================================================================

/// Free cash flow vs capital expenditure for one fiscal year.
/// Either value may be negative; charts plot magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowRecord {
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i32,
    pub free_cash_flow: f64,
    pub capital_expenditure: f64,
}

impl CashFlowRecord {
    pub fn new(year: i32, free_cash_flow: f64, capital_expenditure: f64) -> Self {
        Self {
            year,
            free_cash_flow,
            capital_expenditure,
        }
    }

    /// Absolute values in series order (free cash flow, capex)
    pub fn magnitudes(&self) -> [f64; 2] {
        [self.free_cash_flow.abs(), self.capital_expenditure.abs()]
    }
}

impl Validate for CashFlowRecord {
    fn validate(&self) -> ChartResult<()> {
        ensure_finite("freeCashFlow", self.free_cash_flow)?;
        ensure_finite("capitalExpenditure", self.capital_expenditure)
    }
}

/// Series drawn side by side in a cash flow group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowSeries {
    FreeCashFlow,
    CapitalExpenditure,
}

impl CashFlowSeries {
    pub const ORDER: [Self; 2] = [Self::FreeCashFlow, Self::CapitalExpenditure];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FreeCashFlow => "Free Cash Flow",
            Self::CapitalExpenditure => "Capital Expenditure",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::FreeCashFlow => colors::GREEN,
            Self::CapitalExpenditure => colors::RED,
        }
    }
}

// ============================================================================
// EXPENSES
// ============================================================================

/// Expense category in stack order (bottom to top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    CostOfRevenue,
    OperatingExpense,
    ResearchDevelopment,
    Sga,
}

impl ExpenseCategory {
    /// Fixed stack order, bottom first
    pub const STACK_ORDER: [Self; 4] = [
        Self::CostOfRevenue,
        Self::OperatingExpense,
        Self::ResearchDevelopment,
        Self::Sga,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::CostOfRevenue => "costOfRevenue",
            Self::OperatingExpense => "operatingExpense",
            Self::ResearchDevelopment => "researchDevelopment",
            Self::Sga => "sga",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CostOfRevenue => "Cost of Revenue",
            Self::OperatingExpense => "Operating Expense",
            Self::ResearchDevelopment => "R&D",
            Self::Sga => "SGA",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::CostOfRevenue => colors::RED,
            Self::OperatingExpense => colors::BLUE,
            Self::ResearchDevelopment => colors::GREEN,
            Self::Sga => colors::ORANGE,
        }
    }
}

/// Annual expense breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i32,
    pub cost_of_revenue: f64,
    pub operating_expense: f64,
    pub research_development: f64,
    pub sga: f64,
}

impl ExpenseRecord {
    pub fn new(
        year: i32,
        cost_of_revenue: f64,
        operating_expense: f64,
        research_development: f64,
        sga: f64,
    ) -> Self {
        Self {
            year,
            cost_of_revenue,
            operating_expense,
            research_development,
            sga,
        }
    }

    pub fn value(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::CostOfRevenue => self.cost_of_revenue,
            ExpenseCategory::OperatingExpense => self.operating_expense,
            ExpenseCategory::ResearchDevelopment => self.research_development,
            ExpenseCategory::Sga => self.sga,
        }
    }

    /// Sum of all categories
    pub fn total(&self) -> f64 {
        ExpenseCategory::STACK_ORDER
            .iter()
            .map(|c| self.value(*c))
            .sum()
    }
}

impl Validate for ExpenseRecord {
    fn validate(&self) -> ChartResult<()> {
        for category in ExpenseCategory::STACK_ORDER {
            ensure_non_negative(category.key(), self.value(category))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_accepts_numeric_string() {
        let point: TimeSeriesPoint = serde_json::from_str(r#"{"year":"2021","price":137.18}"#).unwrap();
        assert_eq!(point, TimeSeriesPoint::new(2021, 137.18));

        let bad = serde_json::from_str::<TimeSeriesPoint>(r#"{"year":"twenty","price":1.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let res = serde_json::from_str::<CashFlowRecord>(r#"{"year":2020,"freeCashFlow":1.0}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_cash_flow_magnitudes() {
        let record = CashFlowRecord::new(2024, 74_071_000_000.0, -44_477_000_000.0);
        assert_eq!(record.magnitudes(), [74_071_000_000.0, 44_477_000_000.0]);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_expense_total_and_validation() {
        let record = ExpenseRecord::new(2021, 7.97e9, 1.67e9, 0.354e9, 1.564e9);
        assert!((record.total() - 11.558e9).abs() < 1.0);
        assert!(record.validate().is_ok());

        let negative = ExpenseRecord::new(2021, -1.0, 0.0, 0.0, 0.0);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_price_validation_and_range() {
        let points = [TimeSeriesPoint::new(2014, 41.17), TimeSeriesPoint::new(2015, 38.77)];
        assert!(points.validate().is_ok());
        assert_eq!(price_range(&points), Some((38.77, 41.17)));
        assert_eq!(price_range(&[]), None);

        assert!(TimeSeriesPoint::new(2014, f64::NAN).validate().is_err());
    }
}

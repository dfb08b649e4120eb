//! Closed set of datasets a chart can be asked to draw

use crate::{
    AssetBreakdown, AssetClass, CashFlowRecord, ChartKind, ChartResult, ExpenseRecord, KeyStats,
    RatioSnapshot, TimeSeriesPoint, Validate,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// One parsed API response, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Prices(Vec<TimeSeriesPoint>),
    CashFlow(Vec<CashFlowRecord>),
    Expenses(Vec<ExpenseRecord>),
    Assets(AssetBreakdown),
    Ratios(RatioSnapshot),
    KeyStats(KeyStats),
}

impl Dataset {
    /// Parse a response body for the given chart kind
    pub fn parse(kind: ChartKind, body: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(kind, value)
    }

    /// Convert a JSON document into the typed dataset for `kind`.
    /// Missing fields, unknown keys and out-of-range numbers are `InvalidInput`.
    pub fn from_value(kind: ChartKind, value: Value) -> ChartResult<Self> {
        let dataset = match kind {
            ChartKind::Prices => Self::Prices(serde_json::from_value(value)?),
            ChartKind::CashFlow => Self::CashFlow(serde_json::from_value(value)?),
            ChartKind::Expenses => Self::Expenses(serde_json::from_value(value)?),
            ChartKind::CurrentAssets => {
                let map: BTreeMap<String, f64> = serde_json::from_value(value)?;
                Self::Assets(AssetBreakdown::from_map(AssetClass::Current, &map)?)
            }
            ChartKind::NonCurrentAssets => {
                let map: BTreeMap<String, f64> = serde_json::from_value(value)?;
                Self::Assets(AssetBreakdown::from_map(AssetClass::NonCurrent, &map)?)
            }
            ChartKind::Ratios => {
                let map: BTreeMap<String, f64> = serde_json::from_value(value)?;
                Self::Ratios(RatioSnapshot::from_map(&map)?)
            }
            ChartKind::KeyStats => Self::KeyStats(serde_json::from_value(value)?),
        };

        dataset.validate()?;
        Ok(dataset)
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Prices(_) => ChartKind::Prices,
            Self::CashFlow(_) => ChartKind::CashFlow,
            Self::Expenses(_) => ChartKind::Expenses,
            Self::Assets(b) => match b.class() {
                AssetClass::Current => ChartKind::CurrentAssets,
                AssetClass::NonCurrent => ChartKind::NonCurrentAssets,
            },
            Self::Ratios(_) => ChartKind::Ratios,
            Self::KeyStats(_) => ChartKind::KeyStats,
        }
    }

    /// Zero records or nothing to draw
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Prices(points) => points.is_empty(),
            Self::CashFlow(records) => records.is_empty(),
            Self::Expenses(records) => records.is_empty(),
            Self::Assets(breakdown) => breakdown.is_empty(),
            Self::Ratios(snapshot) => snapshot.is_empty(),
            Self::KeyStats(stats) => stats.is_empty(),
        }
    }

    /// Number of records (categories/metrics for snapshot datasets)
    pub fn len(&self) -> usize {
        match self {
            Self::Prices(points) => points.len(),
            Self::CashFlow(records) => records.len(),
            Self::Expenses(records) => records.len(),
            Self::Assets(breakdown) => breakdown.non_zero().count(),
            Self::Ratios(snapshot) => snapshot.len(),
            Self::KeyStats(stats) => stats.entries().iter().filter(|e| e.1.is_some()).count(),
        }
    }
}

impl Validate for Dataset {
    fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Prices(points) => points.validate(),
            Self::CashFlow(records) => records.validate(),
            Self::Expenses(records) => records.validate(),
            // Breakdowns and snapshots validate on construction
            Self::Assets(_) | Self::Ratios(_) | Self::KeyStats(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartError;

    #[test]
    fn test_parse_price_series() {
        let body = r#"[{"year":2021,"price":100},{"year":"2022","price":150.5}]"#;
        let dataset = Dataset::parse(ChartKind::Prices, body).unwrap();
        assert_eq!(dataset.kind(), ChartKind::Prices);
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_parse_rejects_negative_price() {
        let body = r#"[{"year":2021,"price":-1}]"#;
        let err = Dataset::parse(ChartKind::Prices, body).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_assets_by_variant() {
        let body = r#"{"ppe":40.7,"intangibles":44.4,"investments":5.9,"otherNonCurrentAssets":9.0}"#;
        let dataset = Dataset::parse(ChartKind::NonCurrentAssets, body).unwrap();
        assert_eq!(dataset.kind(), ChartKind::NonCurrentAssets);

        // Same body under the wrong variant carries unknown keys
        assert!(Dataset::parse(ChartKind::CurrentAssets, body).is_err());
    }

    #[test]
    fn test_empty_payloads() {
        assert!(Dataset::parse(ChartKind::Expenses, "[]").unwrap().is_empty());
        assert!(Dataset::parse(ChartKind::Ratios, "{}").unwrap().is_empty());
        assert!(Dataset::parse(ChartKind::CurrentAssets, r#"{"shortTerm":0}"#).unwrap().is_empty());
        assert!(Dataset::parse(ChartKind::KeyStats, "{}").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_invalid_input() {
        let err = Dataset::parse(ChartKind::CashFlow, r#"{"year":2020}"#).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }
}

//! Valuation ratios and key statistics snapshots

use crate::{error::ensure_finite, ChartError, ChartResult, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// RATIO METRICS
// ============================================================================

/// Radar chart metric with its normalization ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatioMetric {
    PayoutRatio,
    ForwardPe,
    TrailingPe,
    ShortRatio,
    QuickRatio,
    CurrentRatio,
    PegRatio,
}

impl RatioMetric {
    /// Axis order around the radar, clockwise from the top
    pub const ALL: [Self; 7] = [
        Self::PayoutRatio,
        Self::ForwardPe,
        Self::TrailingPe,
        Self::ShortRatio,
        Self::QuickRatio,
        Self::CurrentRatio,
        Self::PegRatio,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::PayoutRatio => "payoutRatio",
            Self::ForwardPe => "forwardPE",
            Self::TrailingPe => "trailingPE",
            Self::ShortRatio => "shortRatio",
            Self::QuickRatio => "quickRatio",
            Self::CurrentRatio => "currentRatio",
            Self::PegRatio => "pegRatio",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PayoutRatio => "Payout Ratio",
            Self::ForwardPe => "Forward P/E",
            Self::TrailingPe => "Trailing P/E",
            Self::ShortRatio => "Short Ratio",
            Self::QuickRatio => "Quick Ratio",
            Self::CurrentRatio => "Current Ratio",
            Self::PegRatio => "PEG Ratio",
        }
    }

    /// Value that maps onto the outer ring. Positioning only, never display.
    pub fn ceiling(&self) -> f64 {
        match self {
            Self::PayoutRatio => 1.0,
            Self::ForwardPe | Self::TrailingPe => 40.0,
            Self::ShortRatio => 5.0,
            Self::QuickRatio | Self::CurrentRatio | Self::PegRatio => 3.0,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::PayoutRatio => ValueKind::Percentage,
            _ => ValueKind::Ratio,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

/// Metric -> value mapping as returned by the ratio endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatioSnapshot {
    values: BTreeMap<RatioMetric, f64>,
}

impl RatioSnapshot {
    pub fn new(entries: impl IntoIterator<Item = (RatioMetric, f64)>) -> ChartResult<Self> {
        let mut values = BTreeMap::new();
        for (metric, value) in entries {
            ensure_finite(metric.key(), value)?;
            values.insert(metric, value);
        }
        Ok(Self { values })
    }

    /// Unknown metric keys are `InvalidInput`
    pub fn from_map(map: &BTreeMap<String, f64>) -> ChartResult<Self> {
        let entries = map
            .iter()
            .map(|(key, &value)| {
                RatioMetric::from_key(key)
                    .map(|metric| (metric, value))
                    .ok_or_else(|| ChartError::invalid(format!("unknown ratio key {key:?}")))
            })
            .collect::<ChartResult<Vec<_>>>()?;

        Self::new(entries)
    }

    pub fn get(&self, metric: RatioMetric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    /// Value for a metric the chart requires
    pub fn require(&self, metric: RatioMetric) -> ChartResult<f64> {
        self.get(metric)
            .ok_or_else(|| ChartError::invalid(format!("missing ratio {}", metric.key())))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// KEY STATISTICS
// ============================================================================

/// Headline statistics card for a company. Every field is optional;
/// missing values display as "N/A".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStats {
    #[serde(default, alias = "currentprice")]
    pub current_price: Option<f64>,
    #[serde(default, alias = "dividendrate")]
    pub dividend_rate: Option<f64>,
    #[serde(default, alias = "bidaskspread")]
    pub bid_ask_spread: Option<f64>,
    #[serde(default, alias = "fiftytwoweekhigh")]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default, alias = "fiftytwoweeklow")]
    pub fifty_two_week_low: Option<f64>,
    #[serde(default, alias = "marketcap")]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub roe: Option<f64>,
    #[serde(default, alias = "pegratio")]
    pub peg_ratio: Option<f64>,
}

impl KeyStats {
    /// (label, value, kind) in card order
    pub fn entries(&self) -> [(&'static str, Option<f64>, ValueKind); 8] {
        [
            ("Current Price", self.current_price, ValueKind::Currency),
            ("Dividend Rate", self.dividend_rate, ValueKind::Percentage),
            ("Bid-Ask Spread", self.bid_ask_spread, ValueKind::Currency),
            ("52 Week High", self.fifty_two_week_high, ValueKind::Currency),
            ("52 Week Low", self.fifty_two_week_low, ValueKind::Currency),
            ("Market Cap", self.market_cap, ValueKind::Currency),
            ("ROE", self.roe, ValueKind::Percentage),
            ("PEG Ratio", self.peg_ratio, ValueKind::Ratio),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, value, _)| value.is_none())
    }
}

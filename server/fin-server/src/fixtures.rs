//! Fixture data for the featured companies

use fin_core::{CashFlowRecord, ChartKind, Company, ExpenseRecord, KeyStats, TimeSeriesPoint};
use serde_json::{json, Value};

/// A company with fixture data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issuer {
    Microsoft,
    PepsiCo,
    BlackRock,
}

impl Issuer {
    pub const ALL: [Self; 3] = [Self::Microsoft, Self::PepsiCo, Self::BlackRock];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Microsoft => "Microsoft",
            Self::PepsiCo => "PepsiCo",
            Self::BlackRock => "BlackRock",
        }
    }

    /// Case-insensitive lookup
    pub fn resolve(company: &Company) -> Option<Self> {
        Self::ALL.into_iter().find(|issuer| company.matches(issuer.name()))
    }
}

/// JSON document served for one (issuer, chart kind)
pub fn document(issuer: Issuer, kind: ChartKind) -> serde_json::Result<Value> {
    match kind {
        ChartKind::Prices => serde_json::to_value(prices(issuer)),
        ChartKind::CashFlow => serde_json::to_value(cash_flow(issuer)),
        ChartKind::Expenses => serde_json::to_value(expenses(issuer)),
        ChartKind::CurrentAssets => Ok(current_assets(issuer)),
        ChartKind::NonCurrentAssets => Ok(non_current_assets(issuer)),
        ChartKind::Ratios => Ok(ratios(issuer)),
        ChartKind::KeyStats => serde_json::to_value(key_stats(issuer)),
    }
}

// ============================================================================
// SERIES
// ============================================================================

fn prices(issuer: Issuer) -> Vec<TimeSeriesPoint> {
    let closes: [f64; 11] = match issuer {
        Issuer::Microsoft => [
            41.167, 38.765, 49.549, 66.172, 94.660, 124.150, 186.04, 268.531, 263.749, 311.033,
            417.528,
        ],
        Issuer::PepsiCo => [
            71.061, 74.952, 81.53, 91.399, 92.251, 110.09, 120.637, 137.18, 160.91, 170.46, 168.93,
        ],
        Issuer::BlackRock => [
            272.33, 281.99, 349.96, 415.73, 389.42, 499.60, 773.49, 643.11, 666.24, 856.88, 1019.1,
        ],
    };

    (2014..).zip(closes).map(|(year, price)| TimeSeriesPoint::new(year, price)).collect()
}

fn cash_flow(issuer: Issuer) -> Vec<CashFlowRecord> {
    let (first_year, rows): (i32, [(f64, f64); 4]) = match issuer {
        Issuer::Microsoft => (
            2021,
            [
                (74.071e9, -44.477e9),
                (59.475e9, -28.107e9),
                (65.149e9, -23.886e9),
                (56.118e9, -20.622e9),
            ],
        ),
        Issuer::PepsiCo => (
            2020,
            [
                (6.373e9, 1.156e9),
                (6.991e9, 1.184e9),
                (5.604e9, 1.043e9),
                (7.924e9, 1.401e9),
            ],
        ),
        Issuer::BlackRock => (
            2020,
            [
                (3.549e9, 0.183e9),
                (4.603e9, 0.189e9),
                (4.423e9, 0.177e9),
                (3.821e9, 0.2e9),
            ],
        ),
    };

    (first_year..)
        .zip(rows)
        .map(|(year, (fcf, capex))| CashFlowRecord::new(year, fcf, capex))
        .collect()
}

fn expenses(issuer: Issuer) -> Vec<ExpenseRecord> {
    let rows: [[f64; 4]; 4] = match issuer {
        Issuer::Microsoft => [
            [52.232e9, 5.107e9, 7.575e9, 171.008e9],
            [62.65e9, 5.9e9, 7.575e9, 171.008e9],
            [65.863e9, 7.575e9, 7.575e9, 171.008e9],
            [74.114e9, 7.609e9, 7.609e9, 171.008e9],
        ],
        Issuer::PepsiCo => [
            [31.798e9, 28.453e9, 0.117e9, 28.453e9],
            [37.076e9, 31.237e9, 0.522e9, 31.237e9],
            [40.576e9, 34.459e9, 0.132e9, 34.459e9],
            [41.881e9, 36.677e9, 0.25e9, 36.677e9],
        ],
        Issuer::BlackRock => [
            [7.97e9, 1.67e9, 0.354e9, 1.564e9],
            [9.65e9, 9.65e9, 0.803e9, 1.821e9],
            [9.179e9, 1.938e9, 7.575e9, 1.787e9],
            [9.236e9, 2.014e9, 0.641e9, 1.863e9],
        ],
    };

    (2021..)
        .zip(rows)
        .map(|(year, [cost, opex, rnd, sga])| ExpenseRecord::new(year, cost, opex, rnd, sga))
        .collect()
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

fn current_assets(issuer: Issuer) -> Value {
    let [short_term, receivables, inventory, hedging, other] = match issuer {
        Issuer::Microsoft => [47.3, 35.6, 0.8, 0.0075, 16.3],
        Issuer::PepsiCo => [37.1, 40.1, 0.8, 19.8, 3.0],
        Issuer::BlackRock => [35.6, 42.3, 0.9, 18.5, 3.5],
    };

    json!({
        "shortTerm": short_term,
        "receivables": receivables,
        "inventory": inventory,
        "hedgingAssetsCurrently": hedging,
        "otherCurrentAssets": other,
    })
}

fn non_current_assets(issuer: Issuer) -> Value {
    let [ppe, intangibles, investments, other] = match issuer {
        Issuer::Microsoft => [43.9, 41.7, 4.1, 10.3],
        Issuer::PepsiCo => [40.7, 44.4, 5.9, 9.0],
        Issuer::BlackRock => [38.5, 46.2, 6.3, 10.1],
    };

    json!({
        "ppe": ppe,
        "intangibles": intangibles,
        "investments": investments,
        "otherNonCurrentAssets": other,
    })
}

fn ratios(issuer: Issuer) -> Value {
    let [payout, forward_pe, trailing_pe, short, quick, current, peg] = match issuer {
        Issuer::Microsoft => [0.2477, 28.430958, 35.37107, 3.28, 1.163, 1.301, 2.2141],
        Issuer::PepsiCo => [0.7729, 17.3818, 22.07227, 3.46, 0.664, 0.886, 1.7805],
        Issuer::BlackRock => [0.501, 21.083, 25.187, 2.17, 1.889, 2.559, 1.7735],
    };

    json!({
        "payoutRatio": payout,
        "forwardPE": forward_pe,
        "trailingPE": trailing_pe,
        "shortRatio": short,
        "quickRatio": quick,
        "currentRatio": current,
        "pegRatio": peg,
    })
}

fn key_stats(issuer: Issuer) -> KeyStats {
    // Dividend rates are stored in percentage points; the card expects a fraction.
    let [price, dividend, spread, high, low, market_cap, roe, peg] = match issuer {
        Issuer::Microsoft => [427.99, 3.32, 22.2, 468.35, 362.9, 3_182_054_342_656.0, 0.35604, 2.2141],
        Issuer::PepsiCo => [145.4, 5.42, 0.24, 183.41, 145.34, 199_487_340_544.0, 0.48819, 1.7403],
        Issuer::BlackRock => [980.76, 20.4, 1.95, 1082.45, 745.55, 151_899_144_192.0, 0.1505, 1.7594],
    };

    KeyStats {
        current_price: Some(price),
        dividend_rate: Some(dividend / 100.0),
        bid_ask_spread: Some(spread),
        fifty_two_week_high: Some(high),
        fifty_two_week_low: Some(low),
        market_cap: Some(market_cap),
        roe: Some(roe),
        peg_ratio: Some(peg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fin_core::Dataset;

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(Issuer::resolve(&Company::new("pepsico")), Some(Issuer::PepsiCo));
        assert_eq!(Issuer::resolve(&Company::new("BLACKROCK")), Some(Issuer::BlackRock));
        assert_eq!(Issuer::resolve(&Company::new("Apple")), None);
    }

    #[test]
    fn test_every_document_parses() {
        for issuer in Issuer::ALL {
            for &kind in ChartKind::all() {
                let value = document(issuer, kind).unwrap();
                let dataset = Dataset::from_value(kind, value)
                    .unwrap_or_else(|e| panic!("{} {:?}: {e}", issuer.name(), kind));
                assert_eq!(dataset.kind(), kind);
                assert!(!dataset.is_empty());
            }
        }
    }

    #[test]
    fn test_price_history_years() {
        let points = prices(Issuer::BlackRock);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].year, 2014);
        assert_eq!(points[10].year, 2024);
        assert_eq!(points[10].price, 1019.1);
    }

    #[test]
    fn test_cash_flow_years_per_issuer() {
        assert_eq!(cash_flow(Issuer::Microsoft)[0].year, 2021);
        assert_eq!(cash_flow(Issuer::PepsiCo)[0].year, 2020);
        assert!(cash_flow(Issuer::Microsoft)[0].capital_expenditure < 0.0);
    }
}

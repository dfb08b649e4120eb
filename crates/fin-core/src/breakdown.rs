//! Balance-sheet asset breakdowns (current / non-current)

use crate::{colors, error::ensure_non_negative, ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which half of the balance sheet a breakdown describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    Current,
    NonCurrent,
}

impl AssetClass {
    /// Categories in wedge order
    pub fn categories(&self) -> &'static [AssetCategory] {
        match self {
            Self::Current => &[
                AssetCategory::ShortTerm,
                AssetCategory::Receivables,
                AssetCategory::Inventory,
                AssetCategory::HedgingAssets,
                AssetCategory::OtherCurrent,
            ],
            Self::NonCurrent => &[
                AssetCategory::Ppe,
                AssetCategory::Intangibles,
                AssetCategory::Investments,
                AssetCategory::OtherNonCurrent,
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "Current Assets",
            Self::NonCurrent => "Non-Current Assets",
        }
    }
}

/// Fixed category keys of both breakdown variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetCategory {
    ShortTerm,
    Receivables,
    Inventory,
    HedgingAssets,
    OtherCurrent,
    Ppe,
    Intangibles,
    Investments,
    OtherNonCurrent,
}

impl AssetCategory {
    /// Wire key as emitted by the API
    pub fn key(&self) -> &'static str {
        match self {
            Self::ShortTerm => "shortTerm",
            Self::Receivables => "receivables",
            Self::Inventory => "inventory",
            Self::HedgingAssets => "hedgingAssetsCurrently",
            Self::OtherCurrent => "otherCurrentAssets",
            Self::Ppe => "ppe",
            Self::Intangibles => "intangibles",
            Self::Investments => "investments",
            Self::OtherNonCurrent => "otherNonCurrentAssets",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ShortTerm => "Short Term",
            Self::Receivables => "Receivables",
            Self::Inventory => "Inventory",
            Self::HedgingAssets => "Hedging Assets",
            Self::OtherCurrent => "Other Current",
            Self::Ppe => "PPE",
            Self::Intangibles => "Intangibles",
            Self::Investments => "Investments",
            Self::OtherNonCurrent => "Other Non-Current",
        }
    }

    /// Palette position within the variant
    pub fn color(&self) -> &'static str {
        match self {
            Self::ShortTerm | Self::Ppe => colors::RED,
            Self::Receivables | Self::Intangibles => colors::BLUE,
            Self::Inventory | Self::Investments => colors::GREEN,
            Self::HedgingAssets | Self::OtherNonCurrent => colors::ORANGE,
            Self::OtherCurrent => colors::PURPLE,
        }
    }

    pub fn class(&self) -> AssetClass {
        match self {
            Self::ShortTerm
            | Self::Receivables
            | Self::Inventory
            | Self::HedgingAssets
            | Self::OtherCurrent => AssetClass::Current,
            Self::Ppe | Self::Intangibles | Self::Investments | Self::OtherNonCurrent => {
                AssetClass::NonCurrent
            }
        }
    }

    /// Resolve a wire key within a variant
    pub fn from_key(class: AssetClass, key: &str) -> Option<Self> {
        class.categories().iter().copied().find(|c| c.key() == key)
    }
}

/// One category value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssetSlice {
    pub category: AssetCategory,
    pub value: f64,
}

/// Category -> value mapping for one variant, held in fixed category order.
/// Absent categories are stored as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetBreakdown {
    class: AssetClass,
    slices: Vec<AssetSlice>,
}

impl AssetBreakdown {
    /// Build from category/value pairs; categories of the other variant are rejected
    pub fn new(
        class: AssetClass,
        entries: impl IntoIterator<Item = (AssetCategory, f64)>,
    ) -> ChartResult<Self> {
        let mut slices: Vec<AssetSlice> = class
            .categories()
            .iter()
            .map(|&category| AssetSlice { category, value: 0.0 })
            .collect();

        for (category, value) in entries {
            if category.class() != class {
                return Err(ChartError::invalid(format!(
                    "{} is not a {} category",
                    category.key(),
                    class.label()
                )));
            }
            ensure_non_negative(category.key(), value)?;
            if let Some(slice) = slices.iter_mut().find(|s| s.category == category) {
                slice.value = value;
            }
        }

        Ok(Self { class, slices })
    }

    /// Build from the raw JSON object; unknown keys are `InvalidInput`
    pub fn from_map(class: AssetClass, map: &BTreeMap<String, f64>) -> ChartResult<Self> {
        let entries = map
            .iter()
            .map(|(key, &value)| {
                AssetCategory::from_key(class, key)
                    .map(|category| (category, value))
                    .ok_or_else(|| {
                        ChartError::invalid(format!("unknown {} key {key:?}", class.label()))
                    })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        Self::new(class, entries)
    }

    pub fn class(&self) -> AssetClass {
        self.class
    }

    /// All categories in fixed order, zeros included
    pub fn slices(&self) -> &[AssetSlice] {
        &self.slices
    }

    pub fn value(&self, category: AssetCategory) -> f64 {
        self.slices
            .iter()
            .find(|s| s.category == category)
            .map_or(0.0, |s| s.value)
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Renderable categories: zero values dropped, order kept
    pub fn non_zero(&self) -> impl Iterator<Item = &AssetSlice> {
        self.slices.iter().filter(|s| s.value > 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.non_zero().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_keeps_fixed_order() {
        let map: BTreeMap<String, f64> = serde_json::from_str(
            r#"{"otherCurrentAssets":3.0,"shortTerm":37.1,"receivables":40.1}"#,
        )
        .unwrap();
        let breakdown = AssetBreakdown::from_map(AssetClass::Current, &map).unwrap();

        let order: Vec<_> = breakdown.slices().iter().map(|s| s.category).collect();
        assert_eq!(order, AssetClass::Current.categories());
        assert_eq!(breakdown.value(AssetCategory::Inventory), 0.0);
        assert!((breakdown.total() - 80.2).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_key_is_invalid() {
        let mut map = BTreeMap::new();
        map.insert("ppe".to_string(), 1.0);
        let err = AssetBreakdown::from_map(AssetClass::Current, &map).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_negative_value_is_invalid() {
        let res = AssetBreakdown::new(AssetClass::NonCurrent, [(AssetCategory::Ppe, -4.0)]);
        assert!(res.is_err());
    }

    #[test]
    fn test_non_zero_drops_empty_categories() {
        let breakdown = AssetBreakdown::new(
            AssetClass::Current,
            [(AssetCategory::ShortTerm, 0.0), (AssetCategory::Inventory, 5.0)],
        )
        .unwrap();
        let kept: Vec<_> = breakdown.non_zero().map(|s| s.category).collect();
        assert_eq!(kept, vec![AssetCategory::Inventory]);
        assert!(!breakdown.is_empty());

        let empty = AssetBreakdown::new(AssetClass::Current, Vec::new()).unwrap();
        assert!(empty.is_empty());
    }
}

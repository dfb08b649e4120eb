//! Key statistics cards

use crate::{colors, ChartDimensions, ChartMargin, Geometry, Primitive, TextAnchor};
use fin_core::{KeyStats, MagnitudeFormatter};
use serde::Serialize;

const COLUMNS: usize = 4;
const CARD_WIDTH: f64 = 190.0;
const CARD_HEIGHT: f64 = 64.0;
const CARD_GAP: f64 = 10.0;

/// One labelled statistic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub text: String,
}

/// Ordered cards for a key statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyStatsPanel {
    pub cards: Vec<StatCard>,
}

impl KeyStatsPanel {
    pub fn from_stats(stats: &KeyStats) -> Self {
        let cards = stats
            .entries()
            .into_iter()
            .map(|(label, value, kind)| StatCard {
                label,
                text: MagnitudeFormatter::new(kind).format(value),
            })
            .collect();

        Self { cards }
    }

    pub fn card(&self, label: &str) -> Option<&StatCard> {
        self.cards.iter().find(|c| c.label == label)
    }

    fn rows(&self) -> usize {
        self.cards.len().div_ceil(COLUMNS)
    }
}

impl Geometry for KeyStatsPanel {
    fn dimensions(&self) -> ChartDimensions {
        let width = COLUMNS as f64 * (CARD_WIDTH + CARD_GAP) + CARD_GAP;
        let height = self.rows() as f64 * (CARD_HEIGHT + CARD_GAP) + CARD_GAP;
        ChartDimensions::new(width, height).with_margin(ChartMargin::uniform(0.0))
    }

    fn primitives(&self) -> Vec<Primitive> {
        let mut out = Vec::with_capacity(self.cards.len() * 3);

        for (i, card) in self.cards.iter().enumerate() {
            let x = CARD_GAP + (i % COLUMNS) as f64 * (CARD_WIDTH + CARD_GAP);
            let y = CARD_GAP + (i / COLUMNS) as f64 * (CARD_HEIGHT + CARD_GAP);

            out.push(Primitive::rect(x, y, CARD_WIDTH, CARD_HEIGHT, colors::GRID));
            out.push(
                Primitive::text(x + 12.0, y + 22.0, card.label, TextAnchor::Start)
                    .colored(colors::TEXT_MUTED),
            );
            out.push(
                Primitive::text(x + 12.0, y + 48.0, &card.text, TextAnchor::Start)
                    .sized(18.0)
                    .colored(colors::PRIMARY),
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_formatted_by_kind() {
        let stats = KeyStats {
            current_price: Some(427.99),
            dividend_rate: Some(0.0332),
            market_cap: Some(3_182_054_342_656.0),
            roe: Some(0.35604),
            peg_ratio: Some(2.2141),
            ..KeyStats::default()
        };
        let panel = KeyStatsPanel::from_stats(&stats);

        assert_eq!(panel.cards.len(), 8);
        assert_eq!(panel.card("Current Price").unwrap().text, "$427.99");
        assert_eq!(panel.card("Dividend Rate").unwrap().text, "3.32%");
        assert_eq!(panel.card("Market Cap").unwrap().text, "$3182.1B");
        assert_eq!(panel.card("ROE").unwrap().text, "35.60%");
        assert_eq!(panel.card("PEG Ratio").unwrap().text, "2.21");
        assert_eq!(panel.card("52 Week Low").unwrap().text, "N/A");
    }

    #[test]
    fn test_grid_dimensions() {
        let panel = KeyStatsPanel::from_stats(&KeyStats::default());
        let dims = panel.dimensions();

        assert_eq!(dims.width, 810.0);
        assert_eq!(dims.height, 158.0);
        assert_eq!(panel.primitives().len(), 24);
    }
}

//! Fetch-then-layout sequence for one chart instance

use crate::{ChartSlot, DataProvider, FeedConfig, HttpProvider, Ticket};
use fin_charts::{render_dataset, ChartFrame, Geometry, LayoutOptions};
use fin_core::{ChartError, ChartKind, ChartResult, Company};
use fin_state::{AppState, ChartState};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Result of one load attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Ready(ChartFrame),
    Empty,
    Failed(ChartError),
    /// A newer fetch or teardown superseded this one; nothing is applied
    Stale,
}

impl LoadOutcome {
    /// `None` for stale outcomes, which must not touch chart state
    pub fn into_result(self) -> Option<ChartResult<ChartFrame>> {
        match self {
            Self::Ready(frame) => Some(Ok(frame)),
            Self::Empty => Some(Err(ChartError::EmptyDataset)),
            Self::Failed(err) => Some(Err(err)),
            Self::Stale => None,
        }
    }
}

// ============================================================================
// CHART LOADER
// ============================================================================

/// Runs fetch, staleness check and layout for a single chart kind
#[derive(Debug, Clone)]
pub struct ChartLoader<P> {
    provider: P,
    options: LayoutOptions,
}

impl<P: DataProvider> ChartLoader<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            options: LayoutOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch, then lay out only if `ticket` is still current on `slot`
    pub async fn load(
        &self,
        slot: &ChartSlot,
        ticket: Ticket,
        company: &Company,
        kind: ChartKind,
    ) -> LoadOutcome {
        tracing::info!(%company, ?kind, "loading chart");
        let fetched = self.provider.fetch(company, kind).await;

        if !slot.is_current(ticket) {
            tracing::debug!(%company, ?kind, "discarding stale response");
            return LoadOutcome::Stale;
        }

        let dataset = match fetched {
            Ok(dataset) => dataset,
            Err(err) => {
                tracing::error!(%company, ?kind, error = %err, "fetch failed");
                return LoadOutcome::Failed(err);
            }
        };

        if dataset.is_empty() {
            tracing::info!(%company, ?kind, "empty dataset");
            return LoadOutcome::Empty;
        }

        match render_dataset(&dataset, &self.options) {
            Ok(geometry) => {
                tracing::info!(%company, ?kind, records = dataset.len(), "chart ready");
                LoadOutcome::Ready(geometry.frame())
            }
            Err(ChartError::EmptyDataset) => LoadOutcome::Empty,
            Err(err) => {
                tracing::warn!(%company, ?kind, error = %err, "layout rejected dataset");
                LoadOutcome::Failed(err)
            }
        }
    }
}

// ============================================================================
// LEPTOS INTEGRATION
// ============================================================================

/// Hook binding one chart kind to the selected company. Re-fetches on every
/// company change; the slot is torn down with the owning component.
pub fn use_chart(state: AppState, kind: ChartKind, config: FeedConfig) -> ChartState {
    use_chart_with_loader(state, kind, ChartLoader::new(HttpProvider::new(config)))
}

/// Hook with a custom loader (alternate provider or layout options)
pub fn use_chart_with_loader<P>(state: AppState, kind: ChartKind, loader: ChartLoader<P>) -> ChartState
where
    P: DataProvider + Clone + 'static,
{
    let chart = ChartState::new(kind);
    let slot = ChartSlot::new();

    let teardown = slot.clone();
    on_cleanup(move || teardown.teardown());

    Effect::new(move |_| {
        let company = state.company();
        let ticket = slot.begin();
        chart.set_loading();

        let loader = loader.clone();
        let slot = slot.clone();
        spawn_local(async move {
            if let Some(result) = loader.load(&slot, ticket, &company, kind).await.into_result() {
                chart.apply(result);
            }
        });
    });

    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use fin_core::{AssetBreakdown, AssetClass, Dataset, TimeSeriesPoint};
    use futures::executor::block_on;
    use std::cell::Cell;

    /// In-memory provider returning a canned response
    struct StaticProvider(ChartResult<Dataset>);

    impl DataProvider for StaticProvider {
        async fn fetch(&self, _company: &Company, _kind: ChartKind) -> ChartResult<Dataset> {
            self.0.clone()
        }
    }

    /// Provider whose response arrives after the slot moved on
    struct SupersededProvider {
        slot: ChartSlot,
        calls: Cell<u32>,
    }

    impl DataProvider for SupersededProvider {
        async fn fetch(&self, _company: &Company, _kind: ChartKind) -> ChartResult<Dataset> {
            self.calls.set(self.calls.get() + 1);
            self.slot.begin();
            Ok(Dataset::Prices(vec![TimeSeriesPoint::new(2021, 100.0)]))
        }
    }

    fn run(provider: StaticProvider, kind: ChartKind) -> LoadOutcome {
        let slot = ChartSlot::new();
        let ticket = slot.begin();
        let loader = ChartLoader::new(provider);
        block_on(loader.load(&slot, ticket, &Company::default(), kind))
    }

    #[test]
    fn test_ready_outcome_carries_frame() {
        let dataset = Dataset::Prices(vec![
            TimeSeriesPoint::new(2021, 100.0),
            TimeSeriesPoint::new(2022, 150.0),
        ]);
        let outcome = run(StaticProvider(Ok(dataset)), ChartKind::Prices);

        let LoadOutcome::Ready(frame) = outcome else {
            panic!("expected ready outcome, got {outcome:?}");
        };
        assert_eq!(frame.width, 800.0);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_zero_records_are_empty_not_invalid() {
        let outcome = run(StaticProvider(Ok(Dataset::Prices(Vec::new()))), ChartKind::Prices);
        assert_eq!(outcome, LoadOutcome::Empty);

        let zero = AssetBreakdown::new(AssetClass::Current, Vec::new()).unwrap();
        let outcome = run(StaticProvider(Ok(Dataset::Assets(zero))), ChartKind::CurrentAssets);
        assert_eq!(outcome, LoadOutcome::Empty);
    }

    #[test]
    fn test_fetch_failure_skips_layout() {
        let outcome = run(StaticProvider(Err(ChartError::fetch("HTTP 404"))), ChartKind::Ratios);
        assert_eq!(outcome, LoadOutcome::Failed(ChartError::fetch("HTTP 404")));
        assert!(matches!(outcome.into_result(), Some(Err(ChartError::FetchFailure(_)))));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let slot = ChartSlot::new();
        let ticket = slot.begin();
        let provider = SupersededProvider {
            slot: slot.clone(),
            calls: Cell::new(0),
        };
        let loader = ChartLoader::new(provider);

        let outcome = block_on(loader.load(&slot, ticket, &Company::default(), ChartKind::Prices));
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(outcome.into_result(), None);
        assert_eq!(loader.provider.calls.get(), 1);
    }

    #[test]
    fn test_teardown_discards_in_flight_response() {
        let slot = ChartSlot::new();
        let ticket = slot.begin();
        slot.teardown();

        let dataset = Dataset::Prices(vec![TimeSeriesPoint::new(2021, 1.0)]);
        let loader = ChartLoader::new(StaticProvider(Ok(dataset)));
        let outcome = block_on(loader.load(&slot, ticket, &Company::default(), ChartKind::Prices));
        assert_eq!(outcome, LoadOutcome::Stale);
    }
}

//! # fin-state
//!
//! Reactive state management for the company financials dashboard.
//! Uses Leptos signals so each chart repaints independently.

pub mod charts;

pub use charts::*;

use fin_core::{ChartKind, Company};
use leptos::prelude::*;

// ============================================================================
// SELECTION
// ============================================================================

/// Sidebar selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub company: Company,
    /// Chart families shown for the company, in page order
    pub kinds: Vec<ChartKind>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            company: Company::default(),
            kinds: ChartKind::all().to_vec(),
        }
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state with reactive signals
#[derive(Clone)]
pub struct AppState {
    /// Company and chart selection
    pub selection: RwSignal<Selection>,
    /// Companies offered in the sidebar
    pub companies: RwSignal<Vec<Company>>,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self {
            selection: RwSignal::new(Selection::default()),
            companies: RwSignal::new(Company::featured()),
        }
    }

    /// Switch the active company; charts re-fetch on change
    pub fn select_company(&self, company: Company) {
        if self.selection.with_untracked(|s| s.company == company) {
            return;
        }
        tracing::info!(%company, "company selected");
        self.selection.update(|s| s.company = company);
    }

    pub fn company(&self) -> Company {
        self.selection.with(|s| s.company.clone())
    }

    pub fn is_selected(&self, company: &Company) -> bool {
        self.selection.with(|s| &s.company == company)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide app state context to component tree
pub fn provide_app_state() -> AppState {
    let state = AppState::new();
    provide_context(state.clone());
    state
}

/// Use app state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = Selection::default();
        assert_eq!(selection.company.as_str(), "Microsoft");
        assert_eq!(selection.kinds.len(), 7);
        assert_eq!(selection.kinds[0], ChartKind::KeyStats);
    }
}

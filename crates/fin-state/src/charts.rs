//! Per-chart reactive state

use fin_charts::ChartFrame;
use fin_core::{ChartError, ChartKind, ChartResult};
use leptos::prelude::*;

/// Where one chart instance is in its fetch-then-layout cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChartPhase {
    /// Not yet requested
    #[default]
    Idle,
    Loading,
    Ready(ChartFrame),
    /// Neutral placeholder, not an error
    Empty,
    Failed(ChartError),
}

impl ChartPhase {
    /// Map a load result; an empty dataset is a phase of its own
    pub fn from_result(result: ChartResult<ChartFrame>) -> Self {
        match result {
            Ok(frame) => Self::Ready(frame),
            Err(ChartError::EmptyDataset) => Self::Empty,
            Err(err) => Self::Failed(err),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn frame(&self) -> Option<&ChartFrame> {
        match self {
            Self::Ready(frame) => Some(frame),
            _ => None,
        }
    }

    /// Placeholder text for non-ready phases
    pub fn message(&self, kind: ChartKind) -> Option<String> {
        match self {
            Self::Idle | Self::Ready(_) => None,
            Self::Loading => Some(format!("Loading {}…", kind.subject())),
            Self::Empty => Some(format!("No {} data available.", kind.subject())),
            Self::Failed(err) => Some(format!("{}: {}", err.label(), detail(err))),
        }
    }
}

fn detail(err: &ChartError) -> String {
    match err {
        ChartError::FetchFailure(msg) | ChartError::InvalidInput(msg) => msg.clone(),
        ChartError::EmptyDataset => err.to_string(),
    }
}

/// Reactive state of a single chart instance
#[derive(Clone, Copy)]
pub struct ChartState {
    pub kind: ChartKind,
    pub phase: RwSignal<ChartPhase>,
}

impl ChartState {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            phase: RwSignal::new(ChartPhase::Idle),
        }
    }

    pub fn set_loading(&self) {
        self.phase.set(ChartPhase::Loading);
    }

    /// Apply a finished load
    pub fn apply(&self, result: ChartResult<ChartFrame>) {
        let phase = ChartPhase::from_result(result);
        if let ChartPhase::Failed(err) = &phase {
            tracing::warn!(kind = ?self.kind, error = %err, "chart failed");
        }
        self.phase.set(phase);
    }

    pub fn is_loading(&self) -> bool {
        self.phase.with(ChartPhase::is_loading)
    }
}

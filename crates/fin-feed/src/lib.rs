//! # fin-feed
//!
//! Dataset retrieval for chart instances.
//! Uses Strategy pattern for the data source (`DataProvider`) and a
//! per-chart generation token so late responses are never applied.

pub mod loader;
pub mod provider;

pub use loader::*;
pub use provider::*;

use fin_core::{ChartKind, ChartResult, Company, Dataset};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default metrics API base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Characters left intact in a path segment (same set as `encodeURIComponent`)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ============================================================================
// STRATEGY PATTERN: Data Provider
// ============================================================================

/// Strategy trait for resolving a dataset for one (company, chart kind)
#[allow(async_fn_in_trait)]
pub trait DataProvider {
    async fn fetch(&self, company: &Company, kind: ChartKind) -> ChartResult<Dataset>;
}

// ============================================================================
// FEED CONFIGURATION
// ============================================================================

/// HTTP feed configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub base_url: String,
    /// Request timeout in milliseconds (0 = disabled)
    pub timeout_ms: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: 10000,
        }
    }
}

impl FeedConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// `{base}/{family}/{company}` with the company percent-encoded
    pub fn endpoint(&self, company: &Company, kind: ChartKind) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            kind.endpoint(),
            utf8_percent_encode(company.as_str(), PATH_SEGMENT)
        )
    }
}

// ============================================================================
// GENERATION TOKEN (Send + Sync)
// ============================================================================

/// Generation captured when a fetch starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Per-chart generation counter. Every new fetch, company change and
/// teardown moves the generation on; a response is applied only while
/// its ticket is still current.
#[derive(Debug, Clone, Default)]
pub struct ChartSlot {
    generation: Arc<AtomicU64>,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding any in flight
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersede in-flight fetches without starting a new one
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Component teardown
    pub fn teardown(&self) {
        self.invalidate();
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_company() {
        let config = FeedConfig::new("http://localhost:5000/");
        assert_eq!(
            config.endpoint(&Company::new("Microsoft"), ChartKind::Prices),
            "http://localhost:5000/prices/Microsoft"
        );
        assert_eq!(
            config.endpoint(&Company::new("Procter & Gamble"), ChartKind::NonCurrentAssets),
            "http://localhost:5000/noncurr/Procter%20%26%20Gamble"
        );
    }

    #[test]
    fn test_feed_config() {
        let config = FeedConfig::default().timeout(2500);
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_ms, 2500);
    }

    #[test]
    fn test_slot_generations() {
        let slot = ChartSlot::new();
        let first = slot.begin();
        assert!(slot.is_current(first));

        let second = slot.begin();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));

        slot.teardown();
        assert!(!slot.is_current(second));
    }

    #[test]
    fn test_slot_clones_share_generation() {
        let slot = ChartSlot::new();
        let ticket = slot.begin();
        slot.clone().invalidate();
        assert!(!slot.is_current(ticket));
    }
}

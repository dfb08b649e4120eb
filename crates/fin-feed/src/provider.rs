//! HTTP data provider over the metrics JSON API

use crate::{DataProvider, FeedConfig};
use fin_core::{ChartError, ChartKind, ChartResult, Company, Dataset};
use futures::future::{self, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

/// Fetches one JSON document per chart kind. Failures are reported once,
/// never retried.
#[derive(Debug, Clone, Default)]
pub struct HttpProvider {
    config: FeedConfig,
}

impl HttpProvider {
    pub fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> ChartResult<String> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ChartError::fetch(format!("request to {url} failed: {e}")))?;

        if !response.ok() {
            return Err(ChartError::fetch(format!(
                "HTTP {} {} from {url}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ChartError::fetch(format!("reading body from {url} failed: {e}")))
    }
}

impl DataProvider for HttpProvider {
    async fn fetch(&self, company: &Company, kind: ChartKind) -> ChartResult<Dataset> {
        let url = self.config.endpoint(company, kind);
        tracing::debug!(%url, "fetching dataset");

        let body = if self.config.timeout_ms == 0 {
            self.get_text(&url).await?
        } else {
            let request = Box::pin(self.get_text(&url));
            let timeout = Box::pin(TimeoutFuture::new(self.config.timeout_ms));
            match future::select(request, timeout).await {
                Either::Left((result, _)) => result?,
                Either::Right(_) => {
                    return Err(ChartError::fetch(format!(
                        "request to {url} timed out after {}ms",
                        self.config.timeout_ms
                    )));
                }
            }
        };

        Dataset::parse(kind, &body)
    }
}

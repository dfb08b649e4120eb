//! Company Financials Dashboard - WASM entry point

use fin_components::Dashboard;
use fin_feed::{FeedConfig, DEFAULT_API_URL};
use fin_state::provide_app_state;
use leptos::prelude::*;

/// Metrics API base URL, overridable at build time
fn api_url() -> &'static str {
    option_env!("FIN_API_URL").unwrap_or(DEFAULT_API_URL)
}

#[component]
fn App() -> impl IntoView {
    provide_app_state();
    provide_context(FeedConfig::new(api_url()));

    view! { <Dashboard /> }
}

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!(api = api_url(), "starting dashboard");
    leptos::mount::mount_to_body(App);
}

//! Main dashboard layout component

use fin_core::ChartKind;
use fin_state::use_app_state;
use leptos::prelude::*;

use crate::{ChartPanel, Sidebar};

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_app_state();
    let selection = state.selection;
    // Panels stay mounted across company changes; each re-fetches on its own.
    let kinds = selection.with_untracked(|s| s.kinds.clone());
    let (summary, charts): (Vec<ChartKind>, Vec<ChartKind>) =
        kinds.into_iter().partition(|k| *k == ChartKind::KeyStats);

    view! {
        <div class="dashboard">
            <header class="dash-header">
                <span class="dash-title">"Company Financials"</span>
                <span class="dash-company">{move || selection.with(|s| s.company.to_string())}</span>
            </header>

            <main class="dash-main">
                <aside class="dash-sidebar">
                    <Sidebar />
                </aside>

                <section class="dash-center">
                    {summary.into_iter().map(|kind| view! { <ChartPanel kind=kind /> }).collect_view()}
                    <div class="chart-grid">
                        {charts.into_iter().map(|kind| view! { <ChartPanel kind=kind /> }).collect_view()}
                    </div>
                </section>
            </main>

            <footer class="dash-footer">
                <span class="sb-version">"v0.1.0"</span>
            </footer>
        </div>
    }
}

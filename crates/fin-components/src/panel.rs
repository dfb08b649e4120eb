//! One chart instance: title, placeholder or painted frame

use fin_core::ChartKind;
use fin_feed::{use_chart, FeedConfig};
use fin_state::{use_app_state, ChartPhase};
use leptos::prelude::*;

use crate::ChartView;

/// CSS modifier for the placeholder of a non-ready phase
pub fn placeholder_class(phase: &ChartPhase) -> &'static str {
    match phase {
        ChartPhase::Failed(_) => "chart-placeholder error",
        ChartPhase::Empty => "chart-placeholder empty",
        _ => "chart-placeholder",
    }
}

#[component]
pub fn ChartPanel(kind: ChartKind) -> impl IntoView {
    let state = use_app_state();
    let config = use_context::<FeedConfig>().unwrap_or_default();
    let chart = use_chart(state, kind, config);
    let phase = chart.phase;

    view! {
        <div class=format!("panel chart-panel {}", kind.endpoint())>
            <div class="panel-header">
                <span class="panel-title">{kind.title()}</span>
            </div>
            <div class="panel-content">
                {move || {
                    phase.with(|p| match p.frame() {
                        Some(frame) => view! { <ChartView frame=frame.clone() /> }.into_any(),
                        None => {
                            let message = p.message(kind).unwrap_or_default();
                            view! { <div class=placeholder_class(p)>{message}</div> }.into_any()
                        }
                    })
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fin_core::ChartError;

    #[test]
    fn test_placeholder_class() {
        assert_eq!(
            placeholder_class(&ChartPhase::Failed(ChartError::fetch("HTTP 500"))),
            "chart-placeholder error"
        );
        assert_eq!(placeholder_class(&ChartPhase::Empty), "chart-placeholder empty");
        assert_eq!(placeholder_class(&ChartPhase::Loading), "chart-placeholder");
    }
}

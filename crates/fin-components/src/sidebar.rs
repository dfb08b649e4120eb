//! Company selector

use fin_core::Company;
use fin_state::use_app_state;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_app_state();
    let companies = state.companies;

    view! {
        <nav class="sidebar">
            <div class="sidebar-title">"Companies"</div>
            <ul class="company-list">
                {move || {
                    companies
                        .get()
                        .into_iter()
                        .map(|company| view! { <CompanyButton company=company /> })
                        .collect_view()
                }}
            </ul>
        </nav>
    }
}

#[component]
fn CompanyButton(company: Company) -> impl IntoView {
    let state = use_app_state();
    let label = company.to_string();
    let selected = {
        let state = state.clone();
        let company = company.clone();
        move || state.is_selected(&company)
    };

    view! {
        <li>
            <button
                class=move || if selected() { "company-btn active" } else { "company-btn" }
                on:click=move |_| state.select_company(company.clone())
            >
                {label}
            </button>
        </li>
    }
}

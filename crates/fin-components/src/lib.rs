//! # fin-components
//!
//! Leptos UI components for the company financials dashboard.
//! Charts arrive as laid-out frames and are painted as SVG.

pub mod chart_view;
pub mod dashboard;
pub mod panel;
pub mod sidebar;

pub use chart_view::*;
pub use dashboard::*;
pub use panel::*;
pub use sidebar::*;

//! Shared Dioxus components, pipeline hooks and D3.js bridge for the dashboards.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for D3.js chart functions via `js_sys::eval()`,
//!   plus the browser-side CSV fetch
//! - `state`: Reactive AppState with Dioxus Signals
//! - `pipeline`: memo hooks that re-filter and re-render when a control changes
//! - `components`: Reusable RSX components (selectors, table, containers, etc.)

pub mod components;
pub mod js_bridge;
pub mod pipeline;
pub mod state;

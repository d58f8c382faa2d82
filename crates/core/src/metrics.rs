//! Metrics definitions for pagination.
//!
//! Metrics are collected using the `metrics` crate. Nothing is recorded
//! until the host application installs a recorder (for example
//! `metrics-exporter-prometheus`).

use metrics::{counter, describe_counter, describe_histogram, histogram};

use crate::error::PaginationError;

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "pagination_rejections_total",
        "Total number of pagination requests rejected during resolution"
    );
    describe_counter!(
        "pages_built_total",
        "Total number of connection pages assembled"
    );
    describe_histogram!("page_edges", "Number of edges in each assembled page");
}

/// Record a rejected pagination request.
///
/// # Arguments
/// * `strategy` - The paging strategy ("cursor" or "offset")
/// * `error` - The rejection reason
pub fn record_rejection(strategy: &'static str, error: &PaginationError) {
    counter!("pagination_rejections_total", "strategy" => strategy, "kind" => error.kind())
        .increment(1);
}

/// Record an assembled page.
pub fn record_page_built(strategy: &'static str, edges: usize) {
    counter!("pages_built_total", "strategy" => strategy).increment(1);
    histogram!("page_edges", "strategy" => strategy).record(edges as f64);
}

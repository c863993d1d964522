//! Prometheus metrics for the detail page.
//!
//! This module provides metrics for:
//! - Page loads (loaded, failed, discarded as stale)
//! - Load-time reconciliation (remote answer or cache fallback)
//! - Library mutations (bookmarks and watched list)

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts, Registry};

/// Page loads total by result.
pub static PAGE_LOADS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinelog_page_loads_total", "Total movie detail page loads"),
        &["result"], // "loaded", "failed", "stale"
    )
    .expect("valid page load metric")
});

/// Reconciliations total by the source the flags came from.
pub static RECONCILIATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cinelog_reconciliations_total",
            "Total viewer flag reconciliations",
        ),
        &["source"], // "remote", "cache"
    )
    .expect("valid reconciliation metric")
});

/// Library mutations by action and result.
pub static LIBRARY_MUTATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cinelog_library_mutations_total",
            "Total bookmark and watched list mutations",
        ),
        &["action", "result"], // result: "success", "failure"
    )
    .expect("valid library mutation metric")
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PAGE_LOADS.clone()),
        Box::new(RECONCILIATIONS.clone()),
        Box::new(LIBRARY_MUTATIONS.clone()),
    ]
}

/// Register all core metrics with `registry`.
pub fn register_metrics(registry: &Registry) -> prometheus::Result<()> {
    for metric in all_metrics() {
        registry.register(metric)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics() {
        let registry = Registry::new();
        register_metrics(&registry).unwrap();

        PAGE_LOADS.with_label_values(&["loaded"]).inc();
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|f| f.get_name().to_string())
            .collect();
        assert!(names.contains(&"cinelog_page_loads_total".to_string()));

        // Registering the same collectors twice is rejected.
        assert!(register_metrics(&registry).is_err());
    }
}

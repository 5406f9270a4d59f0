//! Prometheus counters for routing and the ledger
//!
//! Registered in the default registry; the bot serves them on `/metrics`.

// Registration only fails on duplicate metric names.
#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

/// Inbound events by selected route
/// Labels: route (welcome/play_game/fallback/...)
pub static UPDATES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!("coinbot_updates_total", "Inbound events by selected route", &["route"])
        .expect("coinbot_updates_total registers once")
});

/// Handler failures converted into replies
/// Labels: kind (validation/unauthorized/not_found/panic)
pub static HANDLER_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "coinbot_handler_failures_total",
        "Handler failures converted into replies",
        &["kind"]
    )
    .expect("coinbot_handler_failures_total registers once")
});

/// Accounts created on first contact
pub static ACCOUNTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("coinbot_accounts_created_total", "Accounts created on first contact")
        .expect("coinbot_accounts_created_total registers once")
});

/// Records a handler failure of the given kind.
pub fn record_failure(kind: &str) {
    HANDLER_FAILURES_TOTAL.with_label_values(&[kind]).inc();
}

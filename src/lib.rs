#![doc(test(attr(deny(warnings))))]

//! Quincena Core offers the ledger, recurrence-expansion, and summary
//! primitives that power a half-month oriented personal finance tracker.

pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber (env-filtered, info level for this
/// crate) and emits a startup log. Safe to call more than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = concat!(env!("CARGO_PKG_NAME"), "=info")
            .parse()
            .expect("valid filter directive");
        fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
            .init();
        tracing::info!("Quincena Core tracing initialized.");
    });
}

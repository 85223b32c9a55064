// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup for the CLI.
//!
//! Logs go to stderr so stdout carries only the run's output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber, filtered by `CX_LOG` (default `warn`).
pub fn init() {
    let filter = EnvFilter::try_new(cx_core::env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(cx_core::env::DEFAULT_LOG_FILTER));
    // A subscriber already installed (tests) is left in place.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

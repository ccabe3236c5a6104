// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tracing subscriber setup for the binary.
//!
//! Events go to stderr so stdout carries only results. `RUST_LOG` overrides
//! the default filter.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// The filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "job_coverage=debug"
    } else {
        "job_coverage=info"
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

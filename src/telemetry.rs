//! Telemetry helpers for applications embedding `gantt-rs`.
//!
//! This module keeps tracing setup explicit and opt-in.
//! Consumers can either call `init_default_tracing` once at startup or wire
//! their own `tracing` subscriber and filters.

use std::sync::atomic::{AtomicBool, Ordering};

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when this process has a subscriber installed by this
/// function, including on repeated calls after a successful first one.
/// Returns `false` when the feature is disabled or a global subscriber was
/// already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    if TRACING_INITIALIZED.load(Ordering::Acquire) {
        return true;
    }

    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        let installed = builder.try_init().is_ok();
        if installed {
            TRACING_INITIALIZED.store(true, Ordering::Release);
        }
        return installed;
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[must_use]
pub fn is_tracing_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::Acquire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_stable() {
        let first = init_default_tracing();
        let second = init_default_tracing();
        assert_eq!(first, second);
        assert_eq!(is_tracing_initialized(), first);
    }
}

//! # Logging
//!
//! Structured logging setup for binaries and tests embedding the codec.
//!
//! The crate itself only emits `tracing` events (decode rejections at
//! `warn!`); installing a subscriber is the embedder's choice. This module
//! wires one up from [`LoggingConfig`] for hosts that don't bring their own.

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber according to the configuration.
///
/// Respects `RUST_LOG` when set; falls back to the configured level.
/// Returns quietly if a subscriber is already installed, so tests can call
/// it repeatedly.
pub fn init(config: &LoggingConfig) {
    if !config.log_to_console {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), config.log_level))
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

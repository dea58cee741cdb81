// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use credfill_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered at the configured level.
///
/// `RUST_LOG` takes precedence over the config. Returns `false` when a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("credfill={},warn", config.level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init()
        .is_ok()
}

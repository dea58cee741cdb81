// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for credfill.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level credfill configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredfillConfig {
    /// One-time code generation settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Placeholder substitution settings.
    #[serde(default)]
    pub substitution: SubstitutionConfig,

    /// Payload redaction settings.
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Vault configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Number of digits in generated one-time codes (default: 6).
    #[serde(default = "default_totp_digits")]
    pub totp_digits: u32,

    /// Length of a one-time code time step in seconds (default: 30).
    #[serde(default = "default_totp_period_secs")]
    pub totp_period_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            totp_digits: default_totp_digits(),
            totp_period_secs: default_totp_period_secs(),
        }
    }
}

fn default_totp_digits() -> u32 {
    6
}

fn default_totp_period_secs() -> u64 {
    30
}

/// Substitution configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubstitutionConfig {
    /// Fill a requested email with the stored username (and vice versa) when
    /// the requested one is missing.
    #[serde(default = "default_true")]
    pub identity_fallback: bool,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            identity_fallback: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Redaction configuration.
///
/// A mapping whose `binary_marker_key` field equals `binary_marker_value`
/// is an embedded binary payload and is never rewritten.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RedactionConfig {
    #[serde(default = "default_binary_marker_key")]
    pub binary_marker_key: String,

    #[serde(default = "default_binary_marker_value")]
    pub binary_marker_value: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            binary_marker_key: default_binary_marker_key(),
            binary_marker_value: default_binary_marker_value(),
        }
    }
}

fn default_binary_marker_key() -> String {
    "type".to_string()
}

fn default_binary_marker_value() -> String {
    "image_url".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

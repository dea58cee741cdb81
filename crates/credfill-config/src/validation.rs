// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.

use crate::diagnostic::ConfigError;
use crate::model::CredfillConfig;

/// Levels accepted by `logging.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CredfillConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !(6..=8).contains(&config.vault.totp_digits) {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.totp_digits must be between 6 and 8, got {}",
                config.vault.totp_digits
            ),
        });
    }

    if config.vault.totp_period_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "vault.totp_period_secs must be greater than zero".to_string(),
        });
    }

    if config.redaction.binary_marker_key.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "redaction.binary_marker_key must not be empty".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

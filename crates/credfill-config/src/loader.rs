// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./credfill.toml` > `~/.config/credfill/credfill.toml` > `/etc/credfill/credfill.toml`
//! with environment variable overrides via `CREDFILL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CredfillConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/credfill/credfill.toml` (system-wide)
/// 3. `~/.config/credfill/credfill.toml` (user XDG config)
/// 4. `./credfill.toml` (local directory)
/// 5. `CREDFILL_*` environment variables
pub fn load_config() -> Result<CredfillConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<CredfillConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredfillConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CredfillConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CredfillConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CredfillConfig::default()))
        .merge(Toml::file("/etc/credfill/credfill.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("credfill/credfill.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("credfill.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `CREDFILL_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `CREDFILL_VAULT_TOTP_PERIOD_SECS` must map to
/// `vault.totp_period_secs`. Figment hands the key over with its original
/// case, so it is lowercased before the section prefix is rewritten.
fn env_provider() -> Env {
    Env::prefixed("CREDFILL_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("vault_", "vault.", 1)
            .replacen("substitution_", "substitution.", 1)
            .replacen("redaction_", "redaction.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}

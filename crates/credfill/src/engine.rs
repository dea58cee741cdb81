// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of configuration, vault, substitution and redaction.

use std::sync::Arc;

use credfill_config::CredfillConfig;
use credfill_core::{Action, CredfillError, LocatorAttributes, VaultBackend, instructions};
use credfill_security::{Redactor, Substituter, contains_credentials};
use credfill_vault::Vault;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// One agent session's view of the vault.
///
/// Shares the single-caller precondition of [`Vault`]: run one substitution
/// at a time.
#[derive(Debug, Clone)]
pub struct CredentialEngine {
    config: CredfillConfig,
    vault: Arc<Vault>,
    substituter: Substituter,
}

impl CredentialEngine {
    pub fn new(backend: Arc<dyn VaultBackend>, config: CredfillConfig) -> Self {
        debug!(
            backend = backend.name(),
            digits = config.vault.totp_digits,
            identity_fallback = config.substitution.identity_fallback,
            "credential engine created"
        );
        let vault = Arc::new(Vault::with_config(backend, &config.vault));
        Self::with_vault(vault, config)
    }

    /// Use an already built vault, e.g. one with a custom clock.
    pub fn with_vault(vault: Arc<Vault>, config: CredfillConfig) -> Self {
        Self {
            substituter: Substituter::new(&config.substitution),
            config,
            vault,
        }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn config(&self) -> &CredfillConfig {
        &self.config
    }

    /// Whether `action` mentions any placeholder.
    pub fn contains_credentials(&self, action: &Action) -> bool {
        contains_credentials(action)
    }

    /// Replace the placeholders of `action` with secrets for `page_url`.
    pub async fn substitute(
        &self,
        action: Action,
        attrs: Option<&LocatorAttributes>,
        page_url: &str,
    ) -> Result<Action, CredfillError> {
        self.substituter
            .substitute(&self.vault, action, attrs, page_url)
            .await
    }

    /// Redactor reflecting every value retrieved so far.
    pub fn redactor(&self) -> Result<Redactor, CredfillError> {
        Redactor::from_vault(&self.vault, &self.config.redaction)
    }

    pub fn redact(&self, payload: Value) -> Result<Value, CredfillError> {
        Ok(self.redactor()?.redact_value(payload))
    }

    pub fn redact_serializable<T: Serialize + ?Sized>(
        &self,
        payload: &T,
    ) -> Result<Value, CredfillError> {
        self.redactor()?.redact_serializable(payload)
    }

    pub fn system_instructions(&self) -> &'static str {
        instructions::system_instructions()
    }

    pub fn instructions(&self) -> String {
        instructions::instructions()
    }
}

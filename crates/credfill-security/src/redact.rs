// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for payloads leaving the process.
//!
//! Every value the vault handed out is replaced by the placeholder of its
//! field kind, so the agent only ever sees placeholders. Replacement is a
//! single left-to-right pass preferring the longest secret at each position,
//! which keeps a short secret from matching inside a longer one or inside an
//! inserted placeholder.
//!
//! Mapping keys are never rewritten. A mapping whose marker field announces
//! an embedded binary payload is returned untouched.

use std::collections::HashMap;

use credfill_config::RedactionConfig;
use credfill_core::{CredfillError, FieldKind};
use credfill_vault::Vault;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Rewrites real secret values back into placeholders.
#[derive(Debug, Clone)]
pub struct Redactor {
    /// Alternation of every secret, longest first. `None` when there is
    /// nothing to redact.
    matcher: Option<Regex>,
    placeholders: HashMap<String, &'static str>,
    marker_key: String,
    marker_value: String,
}

impl Redactor {
    /// Build from a secret value -> field kind map.
    pub fn new(
        replacements: HashMap<String, FieldKind>,
        config: &RedactionConfig,
    ) -> Result<Self, CredfillError> {
        let placeholders: HashMap<String, &'static str> = replacements
            .into_iter()
            .filter(|(secret, _)| !secret.is_empty())
            .map(|(secret, kind)| (secret, kind.placeholder()))
            .collect();

        let matcher = if placeholders.is_empty() {
            None
        } else {
            let mut secrets: Vec<&str> = placeholders.keys().map(String::as_str).collect();
            secrets.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            let alternation = secrets
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&alternation).map_err(|e| {
                CredfillError::Internal(format!("failed to build redaction matcher: {e}"))
            })?;
            Some(regex)
        };

        debug!(secrets = placeholders.len(), "redactor built");
        Ok(Self {
            matcher,
            placeholders,
            marker_key: config.binary_marker_key.clone(),
            marker_value: config.binary_marker_value.clone(),
        })
    }

    /// Redactor covering everything `vault` has handed out so far.
    pub fn from_vault(vault: &Vault, config: &RedactionConfig) -> Result<Self, CredfillError> {
        Self::new(vault.replacement_map(), config)
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }

    pub fn redact_str(&self, input: &str) -> String {
        let Some(matcher) = &self.matcher else {
            return input.to_string();
        };
        matcher
            .replace_all(input, |caps: &regex::Captures<'_>| {
                let secret = &caps[0];
                self.placeholders
                    .get(secret)
                    .copied()
                    .unwrap_or(secret)
                    .to_string()
            })
            .into_owned()
    }

    /// Redact every string leaf of `value`.
    pub fn redact_value(&self, value: Value) -> Value {
        match value {
            Value::String(text) => Value::String(self.redact_str(&text)),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.redact_value(v)).collect())
            }
            Value::Object(map) if self.is_binary_payload(&map) => Value::Object(map),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, v)| (key, self.redact_value(v)))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Serialize `payload` and redact the resulting tree.
    pub fn redact_serializable<T: Serialize + ?Sized>(
        &self,
        payload: &T,
    ) -> Result<Value, CredfillError> {
        let value = serde_json::to_value(payload)?;
        Ok(self.redact_value(value))
    }

    fn is_binary_payload(&self, map: &Map<String, Value>) -> bool {
        matches!(map.get(&self.marker_key), Some(Value::String(v)) if *v == self.marker_value)
    }
}

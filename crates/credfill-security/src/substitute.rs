// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placeholder substitution for agent actions.
//!
//! Every value of a fill-like action must be a registered placeholder. Login
//! kinds resolve against the vault record for the page url, payment kinds
//! against the vault-wide credit card. When the agent picked the target
//! element itself, the element must accept the field kind; otherwise the
//! placeholder is kept and a warning is emitted so the caller can retry with
//! another element.

use std::collections::BTreeMap;

use credfill_config::SubstitutionConfig;
use credfill_core::{
    Action, ActionValue, CredfillError, FieldKind, LocatorAttributes, SecretRecord,
    ValueWithPlaceholder, all_placeholders, lookup_by_placeholder,
};
use credfill_vault::Vault;
use tracing::{trace, warn};

/// Value for `kind` in `record`, falling back between email and username.
///
/// A present value always wins. With `allow_fallback`, a missing email is
/// answered with the username and vice versa. Returns the kind actually used.
pub fn get_with_fallback<R>(
    record: &R,
    kind: FieldKind,
    allow_fallback: bool,
) -> Option<(FieldKind, &str)>
where
    R: SecretRecord + ?Sized,
{
    if let Some(value) = record.get(kind) {
        return Some((kind, value));
    }
    if !allow_fallback {
        return None;
    }
    let counterpart = match kind {
        FieldKind::Email => FieldKind::Username,
        FieldKind::Username => FieldKind::Email,
        _ => return None,
    };
    let value = record.get(counterpart)?;
    trace!(
        requested = kind.alias(),
        used = counterpart.alias(),
        "credential missing, using fallback"
    );
    Some((counterpart, value))
}

/// Whether the action text mentions any placeholder.
///
/// Cheap pre-check so ordinary actions can skip the vault entirely.
pub fn contains_credentials(action: &Action) -> bool {
    let placeholders = all_placeholders();
    let mentions = |text: &str| placeholders.iter().any(|p| text.contains(p));

    if mentions(action.id()) {
        return true;
    }
    match action {
        Action::FormFill { value, .. } => value
            .iter()
            .any(|(key, v)| mentions(key) || mentions(v.as_str())),
        other => other.scalar_value().is_some_and(|v| mentions(v.as_str())),
    }
}

/// Replaces placeholders in actions with secrets read from a [`Vault`].
#[derive(Debug, Clone)]
pub struct Substituter {
    identity_fallback: bool,
}

impl Default for Substituter {
    fn default() -> Self {
        Self::new(&SubstitutionConfig::default())
    }
}

impl Substituter {
    pub fn new(config: &SubstitutionConfig) -> Self {
        Self {
            identity_fallback: config.identity_fallback,
        }
    }

    /// Substitute every placeholder in `action`.
    ///
    /// `attrs` describes the element the agent chose. It is ignored for form
    /// fills, whose targets were matched structurally; for other actions a
    /// missing `attrs` is validated as an element with no attributes.
    /// `page_url` selects the login record.
    pub async fn substitute(
        &self,
        vault: &Vault,
        action: Action,
        attrs: Option<&LocatorAttributes>,
        page_url: &str,
    ) -> Result<Action, CredfillError> {
        if !action.is_substitutable() {
            return Err(CredfillError::UnsupportedActionType {
                action_type: action.name().to_string(),
            });
        }

        match action {
            Action::FormFill { id, value } => {
                let mut filled = BTreeMap::new();
                for (key, original) in value {
                    let placeholder = original.placeholder_text();
                    let (_, secret) = self.resolve(vault, placeholder, page_url).await?;
                    let substituted = ValueWithPlaceholder::new(secret, placeholder);
                    filled.insert(key, ActionValue::from(substituted));
                }
                Ok(Action::FormFill { id, value: filled })
            }
            mut action => {
                let placeholder = action
                    .scalar_value()
                    .map(|v| v.placeholder_text().to_string())
                    .ok_or_else(|| {
                        CredfillError::Internal(format!(
                            "`{}` action carries no value",
                            action.name()
                        ))
                    })?;
                let (kind, secret) = self.resolve(vault, &placeholder, page_url).await?;

                let default_attrs = LocatorAttributes::default();
                let attrs = attrs.unwrap_or(&default_attrs);
                if !kind.accepts(attrs) {
                    warn!(
                        field = kind.alias(),
                        action = action.name(),
                        element_type = attrs.input_type.as_deref().unwrap_or("-"),
                        autocomplete = attrs.autocomplete.as_deref().unwrap_or("-"),
                        "target element does not accept this field, placeholder kept"
                    );
                    return Ok(action);
                }

                if let Some(slot) = action.scalar_value_mut() {
                    *slot = ValueWithPlaceholder::new(secret, placeholder).into();
                }

                Ok(match action {
                    Action::Fill { id, value } if kind == FieldKind::Mfa => {
                        trace!(id = %id, "upgrading fill to multi-factor fill");
                        Action::MultiFactorFill { id, value }
                    }
                    other => other,
                })
            }
        }
    }

    /// Look up the field kind behind `placeholder` and fetch its value.
    async fn resolve(
        &self,
        vault: &Vault,
        placeholder: &str,
        page_url: &str,
    ) -> Result<(FieldKind, String), CredfillError> {
        let kind =
            lookup_by_placeholder(placeholder).ok_or_else(|| CredfillError::UnknownPlaceholder {
                placeholder: placeholder.to_string(),
            })?;

        let value = if kind.is_payment() {
            let card = vault.get_credit_card().await?;
            self.pick(&card, kind)?
        } else {
            let creds = vault.get_credentials(page_url).await?.ok_or_else(|| {
                CredfillError::NoCredentialsForUrl {
                    url: page_url.to_string(),
                }
            })?;
            self.pick(&creds, kind)?
        };
        Ok((kind, value))
    }

    fn pick<R: SecretRecord>(&self, record: &R, kind: FieldKind) -> Result<String, CredfillError> {
        get_with_fallback(record, kind, self.identity_fallback)
            .map(|(_, value)| value.to_string())
            .ok_or_else(|| CredfillError::NoCredentialOfRequestedKind {
                alias: kind.alias().to_string(),
            })
    }
}

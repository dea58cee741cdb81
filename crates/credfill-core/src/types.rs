// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential records and DOM signals shared across the workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CredfillError;
use crate::field::{self, FieldKind};

const REDACTED: &str = "[REDACTED]";

/// Read-only attributes of the DOM element an agent chose to fill.
///
/// Used only for validation, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorAttributes {
    #[serde(rename = "type", default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub autocomplete: Option<String>,
    #[serde(rename = "outerHTML", default)]
    pub outer_html: Option<String>,
}

impl LocatorAttributes {
    /// Attributes of an `<input type="...">` element.
    pub fn input(input_type: &str) -> Self {
        Self {
            input_type: Some(input_type.to_string()),
            ..Self::default()
        }
    }
}

/// Listing-only summary of a stored credential. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: Option<String>,
    pub email: Option<String>,
    pub url: String,
}

/// Any record the engine can read secret values from by field kind.
pub trait SecretRecord {
    fn get(&self, kind: FieldKind) -> Option<&str>;

    /// Present `(kind, value)` pairs, in field table order.
    fn entries(&self) -> Vec<(FieldKind, &str)> {
        FieldKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|value| (kind, value)))
            .collect()
    }
}

/// A login record for one url.
///
/// Every slot is optional structurally; [`CredentialsDict::validate`] enforces
/// the ingestion rules. `mfa_secret` holds the shared seed when stored and the
/// current one-time code once retrieved through the vault.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsDict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_secret: Option<String>,
}

impl CredentialsDict {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_mfa_secret(mut self, seed: impl Into<String>) -> Self {
        self.mfa_secret = Some(seed.into());
        self
    }

    /// Build a record from loose `(alias, value)` pairs.
    ///
    /// Fails with `UnknownFieldKind` for an unregistered alias and with
    /// `InvalidCredentials` for a payment alias, which belongs to the credit
    /// card slot instead.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, CredfillError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut dict = Self::default();
        for (key, value) in entries {
            let kind = field::lookup_by_alias(key.as_ref())?;
            dict.set(kind, value)?;
        }
        Ok(dict)
    }

    pub fn set(&mut self, kind: FieldKind, value: impl Into<String>) -> Result<(), CredfillError> {
        let slot = match kind {
            FieldKind::Email => &mut self.email,
            FieldKind::Username => &mut self.username,
            FieldKind::Password => &mut self.password,
            FieldKind::Mfa => &mut self.mfa_secret,
            other => {
                return Err(CredfillError::InvalidCredentials(format!(
                    "`{other}` is a credit card field, not a login credential"
                )));
            }
        };
        *slot = Some(value.into());
        Ok(())
    }

    /// Enforce the ingestion rules: a non-empty password and no empty values.
    pub fn validate(&self) -> Result<(), CredfillError> {
        match self.password.as_deref() {
            None => {
                return Err(CredfillError::InvalidCredentials(
                    "password is required".to_string(),
                ));
            }
            Some("") => {
                return Err(CredfillError::InvalidCredentials(
                    "password must not be empty".to_string(),
                ));
            }
            Some(_) => {}
        }
        if let Some((kind, _)) = self.entries().into_iter().find(|(_, v)| v.is_empty()) {
            return Err(CredfillError::InvalidCredentials(format!(
                "`{kind}` must not be empty"
            )));
        }
        Ok(())
    }

    /// Listing summary for `url`.
    pub fn summary(&self, url: &str) -> Credential {
        Credential {
            username: self.username.clone(),
            email: self.email.clone(),
            url: url.to_string(),
        }
    }
}

impl SecretRecord for CredentialsDict {
    fn get(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Email => self.email.as_deref(),
            FieldKind::Username => self.username.as_deref(),
            FieldKind::Password => self.password.as_deref(),
            FieldKind::Mfa => self.mfa_secret.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Debug for CredentialsDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| REDACTED);
        f.debug_struct("CredentialsDict")
            .field("email", &mask(&self.email))
            .field("username", &mask(&self.username))
            .field("password", &mask(&self.password))
            .field("mfa_secret", &mask(&self.mfa_secret))
            .finish()
    }
}

/// The single credit card slot of a vault.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreditCardDict {
    pub card_holder_name: String,
    pub card_number: String,
    pub card_cvv: String,
    /// `MM/YY` or `MM/YYYY`.
    pub card_full_expiration: String,
}

impl SecretRecord for CreditCardDict {
    fn get(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::CardHolder => Some(&self.card_holder_name),
            FieldKind::CardNumber => Some(&self.card_number),
            FieldKind::CardCvv => Some(&self.card_cvv),
            FieldKind::CardExpiration => Some(&self.card_full_expiration),
            _ => None,
        }
    }
}

impl fmt::Debug for CreditCardDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCardDict")
            .field("card_holder_name", &REDACTED)
            .field("card_number", &REDACTED)
            .field("card_cvv", &REDACTED)
            .field("card_full_expiration", &REDACTED)
            .finish()
    }
}

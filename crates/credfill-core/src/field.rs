// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static registry of credential and payment field kinds.
//!
//! Each [`FieldKind`] carries plain metadata: the alias used as a storage key,
//! the placeholder sentinel shown to the agent in place of the real value, an
//! "exposed" flag and a rule deciding which DOM elements may receive the value.
//! The table is enumerated exhaustively and built once; there is no runtime
//! registration.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::CredfillError;
use crate::types::LocatorAttributes;

/// One of the closed set of credential or payment slot types.
///
/// `Display` and `FromStr` use the field alias (`"mfa_secret"`, `"card_number"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum FieldKind {
    #[strum(serialize = "email")]
    #[serde(rename = "email")]
    Email,
    #[strum(serialize = "username")]
    #[serde(rename = "username")]
    Username,
    #[strum(serialize = "password")]
    #[serde(rename = "password")]
    Password,
    #[strum(serialize = "mfa_secret")]
    #[serde(rename = "mfa_secret")]
    Mfa,
    #[strum(serialize = "card_holder_name")]
    #[serde(rename = "card_holder_name")]
    CardHolder,
    #[strum(serialize = "card_number")]
    #[serde(rename = "card_number")]
    CardNumber,
    #[strum(serialize = "card_cvv")]
    #[serde(rename = "card_cvv")]
    CardCvv,
    #[strum(serialize = "card_full_expiration")]
    #[serde(rename = "card_full_expiration")]
    CardExpiration,
}

/// Rule deciding whether a DOM element may receive a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Any element is accepted.
    Always,
    /// The element's `type` attribute must equal the given value.
    InputType(&'static str),
    /// The element's `autocomplete` attribute equals the token, or its
    /// outerHTML matches the case-insensitive pattern.
    AutocompleteOrPattern {
        token: &'static str,
        pattern: &'static str,
    },
}

/// Metadata for one field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub alias: &'static str,
    pub placeholder: &'static str,
    /// The page may overwrite the placeholder with formatted real data after
    /// a fill. The agent must be told this is expected.
    pub exposed: bool,
    /// Autocomplete token typically carried by inputs for this field.
    pub autocomplete: Option<&'static str>,
    pub acceptance: Acceptance,
    /// Noun phrase used in the per-field instruction line.
    pub label: &'static str,
}

/// The field table, in [`FieldKind`] declaration order.
pub static FIELDS: [FieldDescriptor; 8] = [
    FieldDescriptor {
        kind: FieldKind::Email,
        alias: "email",
        placeholder: "user@example.org",
        exposed: false,
        autocomplete: Some("username"),
        acceptance: Acceptance::Always,
        label: "an email",
    },
    FieldDescriptor {
        kind: FieldKind::Username,
        alias: "username",
        placeholder: "cooljohnny1567",
        exposed: false,
        autocomplete: None,
        acceptance: Acceptance::Always,
        label: "a username",
    },
    FieldDescriptor {
        kind: FieldKind::Password,
        alias: "password",
        placeholder: "mycoolpassword",
        exposed: false,
        autocomplete: Some("current-password"),
        acceptance: Acceptance::InputType("password"),
        label: "a password",
    },
    FieldDescriptor {
        kind: FieldKind::Mfa,
        alias: "mfa_secret",
        placeholder: "999779",
        exposed: false,
        autocomplete: Some("one-time-code"),
        acceptance: Acceptance::Always,
        label: "a 2FA code",
    },
    FieldDescriptor {
        kind: FieldKind::CardHolder,
        alias: "card_holder_name",
        placeholder: "John Doe",
        exposed: false,
        autocomplete: Some("cc-name"),
        acceptance: Acceptance::AutocompleteOrPattern {
            token: "cc-name",
            pattern: r#"(cc|card).*-name|(cardholder)(?:name)?|autocomplete="name""#,
        },
        label: "a payment form cardholder name",
    },
    FieldDescriptor {
        kind: FieldKind::CardNumber,
        alias: "card_number",
        placeholder: "4242 4242 4242 4242",
        exposed: false,
        autocomplete: Some("cc-number"),
        acceptance: Acceptance::AutocompleteOrPattern {
            token: "cc-number",
            pattern: r"(cc|card).*-?(num|number|no)|number|card-no",
        },
        label: "a payment form card number",
    },
    FieldDescriptor {
        kind: FieldKind::CardCvv,
        alias: "card_cvv",
        placeholder: "[CardCVVPlaceholder]",
        exposed: true,
        autocomplete: Some("cc-csc"),
        acceptance: Acceptance::AutocompleteOrPattern {
            token: "cc-csc",
            pattern: r"(cc|card|security|verification).*-(code|cvv|cvc|csc)|cvv|cvc|csc",
        },
        label: "a payment form card CVV",
    },
    FieldDescriptor {
        kind: FieldKind::CardExpiration,
        alias: "card_full_expiration",
        placeholder: "[CardExpirationPlaceholder]",
        exposed: true,
        autocomplete: Some("cc-exp"),
        acceptance: Acceptance::AutocompleteOrPattern {
            token: "cc-exp",
            pattern: r"(cc|card).*-(exp|expiry|mm-yy|mm-yyyy)|expiration-date",
        },
        label: "a payment form expiration date with month and year",
    },
];

/// Compiled outerHTML patterns, keyed by field kind.
static PATTERNS: LazyLock<HashMap<FieldKind, Regex>> = LazyLock::new(|| {
    FIELDS
        .iter()
        .filter_map(|d| match d.acceptance {
            Acceptance::AutocompleteOrPattern { pattern, .. } => Some((
                d.kind,
                Regex::new(&format!("(?i){pattern}")).unwrap(),
            )),
            _ => None,
        })
        .collect()
});

impl FieldKind {
    /// Every field kind, in table order.
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Email,
        FieldKind::Username,
        FieldKind::Password,
        FieldKind::Mfa,
        FieldKind::CardHolder,
        FieldKind::CardNumber,
        FieldKind::CardCvv,
        FieldKind::CardExpiration,
    ];

    /// The four kinds stored in the vault-wide credit card slot.
    pub const PAYMENT: [FieldKind; 4] = [
        FieldKind::CardHolder,
        FieldKind::CardNumber,
        FieldKind::CardCvv,
        FieldKind::CardExpiration,
    ];

    pub fn descriptor(self) -> &'static FieldDescriptor {
        &FIELDS[self as usize]
    }

    /// Stable storage key.
    pub fn alias(self) -> &'static str {
        self.descriptor().alias
    }

    /// Sentinel shown to the agent in place of the secret.
    pub fn placeholder(self) -> &'static str {
        self.descriptor().placeholder
    }

    pub fn is_exposed(self) -> bool {
        self.descriptor().exposed
    }

    pub fn is_payment(self) -> bool {
        Self::PAYMENT.contains(&self)
    }

    pub fn autocomplete(self) -> Option<&'static str> {
        self.descriptor().autocomplete
    }

    /// Whether the element described by `attrs` may receive this field's value.
    pub fn accepts(self, attrs: &LocatorAttributes) -> bool {
        match self.descriptor().acceptance {
            Acceptance::Always => true,
            Acceptance::InputType(expected) => attrs.input_type.as_deref() == Some(expected),
            Acceptance::AutocompleteOrPattern { token, .. } => {
                if attrs.autocomplete.as_deref() == Some(token) {
                    return true;
                }
                let outer_html = attrs.outer_html.as_deref().unwrap_or_default();
                PATTERNS
                    .get(&self)
                    .is_some_and(|re| re.is_match(outer_html))
            }
        }
    }

    /// One-line instruction telling the agent which placeholder to type.
    pub fn instruction(self) -> String {
        let d = self.descriptor();
        format!("To fill in {}, use the value '{}'", d.label, d.placeholder)
    }
}

/// Resolve a field kind from its alias.
pub fn lookup_by_alias(alias: &str) -> Result<FieldKind, CredfillError> {
    FieldKind::from_str(alias).map_err(|_| CredfillError::UnknownFieldKind {
        alias: alias.to_string(),
        valid: all_aliases().join(", "),
    })
}

/// Resolve a field kind from its placeholder text.
pub fn lookup_by_placeholder(text: &str) -> Option<FieldKind> {
    FIELDS
        .iter()
        .find(|d| d.placeholder == text)
        .map(|d| d.kind)
}

pub fn all_placeholders() -> HashSet<&'static str> {
    FIELDS.iter().map(|d| d.placeholder).collect()
}

/// Aliases in table order.
pub fn all_aliases() -> Vec<&'static str> {
    FIELDS.iter().map(|d| d.alias).collect()
}

// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent action shapes consumed and produced by the substitution engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::IntoStaticStr;

/// A real secret value that remembers which placeholder it replaced.
///
/// The redaction pass uses the placeholder to reverse the substitution.
#[derive(Clone, PartialEq, Eq)]
pub struct ValueWithPlaceholder {
    value: String,
    placeholder: String,
}

impl ValueWithPlaceholder {
    pub fn new(value: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl fmt::Debug for ValueWithPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueWithPlaceholder")
            .field("value", &"[REDACTED]")
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

/// The value carried by a fill-like action.
///
/// Serializes as the string the page should receive: the real value once
/// substituted. Deserializes as [`ActionValue::Plain`].
#[derive(Clone, PartialEq, Eq)]
pub enum ActionValue {
    Plain(String),
    Substituted(ValueWithPlaceholder),
}

impl ActionValue {
    /// The text to type into the page.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Substituted(v) => v.value(),
        }
    }

    /// The placeholder this value stands for: the placeholder remembered by
    /// a substituted value, otherwise the text itself.
    pub fn placeholder_text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Substituted(v) => v.placeholder(),
        }
    }

    pub fn is_substituted(&self) -> bool {
        matches!(self, Self::Substituted(_))
    }
}

impl fmt::Debug for ActionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(text) => f.debug_tuple("Plain").field(text).finish(),
            Self::Substituted(v) => f.debug_tuple("Substituted").field(v).finish(),
        }
    }
}

impl From<&str> for ActionValue {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for ActionValue {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<ValueWithPlaceholder> for ActionValue {
    fn from(v: ValueWithPlaceholder) -> Self {
        Self::Substituted(v)
    }
}

impl Serialize for ActionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Plain)
    }
}

/// An action chosen by the agent.
///
/// Only the fill-like variants can carry credentials; see
/// [`Action::is_substitutable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    /// Generic single-value fill.
    Fill { id: String, value: ActionValue },
    /// Dedicated one-time-code fill.
    MultiFactorFill { id: String, value: ActionValue },
    /// Fill used when the regular fill path failed.
    FallbackFill { id: String, value: ActionValue },
    /// Multi-field fill whose targets were selected by structural pattern
    /// matching rather than by the agent.
    FormFill {
        #[serde(default)]
        id: String,
        value: BTreeMap<String, ActionValue>,
    },
    SelectDropdownOption { id: String, value: ActionValue },
    Click { id: String },
    Goto { url: String },
}

impl Action {
    pub fn fill(id: impl Into<String>, value: impl Into<ActionValue>) -> Self {
        Self::Fill {
            id: id.into(),
            value: value.into(),
        }
    }

    pub fn form_fill<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ActionValue>,
    {
        Self::FormFill {
            id: String::new(),
            value: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Snake-case variant name, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Target element id; the url for navigation.
    pub fn id(&self) -> &str {
        match self {
            Self::Fill { id, .. }
            | Self::MultiFactorFill { id, .. }
            | Self::FallbackFill { id, .. }
            | Self::FormFill { id, .. }
            | Self::SelectDropdownOption { id, .. }
            | Self::Click { id } => id,
            Self::Goto { url } => url,
        }
    }

    /// Whether this variant may carry placeholders for substitution.
    pub fn is_substitutable(&self) -> bool {
        !matches!(self, Self::Click { .. } | Self::Goto { .. })
    }

    /// The single value of a scalar fill-like action.
    pub fn scalar_value(&self) -> Option<&ActionValue> {
        match self {
            Self::Fill { value, .. }
            | Self::MultiFactorFill { value, .. }
            | Self::FallbackFill { value, .. }
            | Self::SelectDropdownOption { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn scalar_value_mut(&mut self) -> Option<&mut ActionValue> {
        match self {
            Self::Fill { value, .. }
            | Self::MultiFactorFill { value, .. }
            | Self::FallbackFill { value, .. }
            | Self::SelectDropdownOption { value, .. } => Some(value),
            _ => None,
        }
    }
}

// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the credfill substitution engine.

use thiserror::Error;

/// The primary error type used across the vault, substitution and redaction layers.
///
/// Every variant propagates to the immediate caller. The only non-fatal
/// condition in the engine (a DOM validation mismatch during substitution)
/// is reported through tracing and never surfaces as an error.
#[derive(Debug, Error)]
pub enum CredfillError {
    /// A key does not name any registered field kind.
    #[error("unknown field kind `{alias}`, valid kinds are: {valid}")]
    UnknownFieldKind { alias: String, valid: String },

    /// An MFA seed could not be used to generate a code.
    #[error("invalid MFA secret: {reason} (did you try to store a one-time code instead of the seed?)")]
    InvalidSecret { reason: String },

    /// Environment ingestion found none of the expected variables.
    #[error("no credentials found in the environment for {url}, set any of: {}", expected.join(", "))]
    NoCredentialsFound { url: String, expected: Vec<String> },

    /// The action cannot carry credentials.
    #[error("cannot substitute credentials into a `{action_type}` action")]
    UnsupportedActionType { action_type: String },

    /// The action value is not one of the registered placeholders.
    #[error("`{placeholder}` is not a known credential placeholder")]
    UnknownPlaceholder { placeholder: String },

    /// The vault holds no credential record for the page url.
    #[error("no credentials found in vault for url={url}")]
    NoCredentialsForUrl { url: String },

    /// The vault holds no credit card.
    #[error("no credit card stored in vault")]
    NoPaymentRecord,

    /// The record exists but lacks the requested field (and any fallback).
    #[error("no credential of type `{alias}` found in vault")]
    NoCredentialOfRequestedKind { alias: String },

    /// A credential record failed ingestion-time validation.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A url from which no root domain can be derived.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Storage backend errors, propagated uncaught.
    #[error("backend error: {source}")]
    Backend {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A payload could not be turned into a redactable tree.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CredfillError {
    /// Wrap any backend failure.
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Backend { source: err.into() }
    }
}

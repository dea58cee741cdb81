// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage backend capability trait.

use async_trait::async_trait;

use crate::error::CredfillError;
use crate::types::{Credential, CredentialsDict, CreditCardDict};

/// The primitives a vault storage backend provides.
///
/// This is the sole extension point for new vault types. The vault layer
/// derives validation, MFA code generation, environment ingestion and the
/// retrieval cache from these operations. Backends store the MFA seed as
/// given and never see generated codes.
///
/// Backends own their atomicity: a failure between two calls must not leave
/// the store corrupted. Failures are reported as [`CredfillError::Backend`]
/// and propagate uncaught.
#[async_trait]
pub trait VaultBackend: Send + Sync + 'static {
    /// Human-readable name of this backend instance.
    fn name(&self) -> &str;

    /// Store or replace the credentials for `url`.
    async fn add_credentials(&self, url: &str, creds: &CredentialsDict)
    -> Result<(), CredfillError>;

    /// Fetch the stored record for `url`, if any.
    async fn get_credentials(&self, url: &str) -> Result<Option<CredentialsDict>, CredfillError>;

    /// Remove the record for `url`. Removing a missing record is not an error.
    async fn delete_credentials(&self, url: &str) -> Result<(), CredfillError>;

    /// Summaries of every stored record.
    async fn list_credentials(&self) -> Result<Vec<Credential>, CredfillError>;

    /// Store or replace the vault-wide credit card.
    async fn set_credit_card(&self, card: &CreditCardDict) -> Result<(), CredfillError>;

    async fn get_credit_card(&self) -> Result<Option<CreditCardDict>, CredfillError>;

    async fn delete_credit_card(&self) -> Result<(), CredfillError>;
}

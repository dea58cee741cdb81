// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous entry points for callers without an async runtime.
//!
//! Each call drives one vault operation to completion on a private
//! current-thread runtime. Calling these from inside an async runtime
//! panics; use [`Vault`] directly there.

use credfill_core::{Credential, CredentialsDict, CredfillError, CreditCardDict};
use tokio::runtime::{Builder, Runtime};

use crate::vault::Vault;

/// A [`Vault`] paired with its own single-threaded runtime.
#[derive(Debug)]
pub struct BlockingVault {
    vault: Vault,
    runtime: Runtime,
}

impl BlockingVault {
    pub fn new(vault: Vault) -> Result<Self, CredfillError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CredfillError::Internal(format!("failed to start runtime: {e}")))?;
        Ok(Self { vault, runtime })
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn into_inner(self) -> Vault {
        self.vault
    }

    pub fn add_credentials(&self, url: &str, creds: &CredentialsDict) -> Result<(), CredfillError> {
        self.runtime.block_on(self.vault.add_credentials(url, creds))
    }

    pub fn get_credentials(&self, url: &str) -> Result<Option<CredentialsDict>, CredfillError> {
        self.runtime.block_on(self.vault.get_credentials(url))
    }

    pub fn delete_credentials(&self, url: &str) -> Result<(), CredfillError> {
        self.runtime.block_on(self.vault.delete_credentials(url))
    }

    pub fn list_credentials(&self) -> Result<Vec<Credential>, CredfillError> {
        self.runtime.block_on(self.vault.list_credentials())
    }

    pub fn has_credential(&self, url: &str) -> Result<bool, CredfillError> {
        self.runtime.block_on(self.vault.has_credential(url))
    }

    pub fn set_credit_card(&self, card: &CreditCardDict) -> Result<(), CredfillError> {
        self.runtime.block_on(self.vault.set_credit_card(card))
    }

    pub fn get_credit_card(&self) -> Result<CreditCardDict, CredfillError> {
        self.runtime.block_on(self.vault.get_credit_card())
    }

    pub fn delete_credit_card(&self) -> Result<(), CredfillError> {
        self.runtime.block_on(self.vault.delete_credit_card())
    }

    pub fn add_credentials_from_env(&self, url: &str) -> Result<(), CredfillError> {
        self.runtime.block_on(self.vault.add_credentials_from_env(url))
    }
}

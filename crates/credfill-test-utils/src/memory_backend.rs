// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage backends for deterministic testing.
//!
//! `MemoryBackend` implements `VaultBackend` over mutex-protected maps and
//! records what was stored so tests can assert that generated codes never
//! reach storage.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use credfill_core::{Credential, CredentialsDict, CredfillError, CreditCardDict, VaultBackend};

/// A vault backend holding everything in process memory.
///
/// Credentials are keyed by url exactly as given. Listing is ordered by url.
pub struct MemoryBackend {
    credentials: Arc<Mutex<BTreeMap<String, CredentialsDict>>>,
    card: Arc<Mutex<Option<CreditCardDict>>>,
    get_calls: AtomicUsize,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(Mutex::new(BTreeMap::new())),
            card: Arc::new(Mutex::new(None)),
            get_calls: AtomicUsize::new(0),
        }
    }

    /// Seed a record directly, bypassing vault-level validation.
    pub async fn insert_raw(&self, url: &str, creds: CredentialsDict) {
        self.credentials.lock().await.insert(url.to_string(), creds);
    }

    /// The record exactly as stored.
    pub async fn stored(&self, url: &str) -> Option<CredentialsDict> {
        self.credentials.lock().await.get(url).cloned()
    }

    pub async fn stored_card(&self) -> Option<CreditCardDict> {
        self.card.lock().await.clone()
    }

    /// Number of `get_credentials` calls served.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VaultBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn add_credentials(
        &self,
        url: &str,
        creds: &CredentialsDict,
    ) -> Result<(), CredfillError> {
        self.credentials
            .lock()
            .await
            .insert(url.to_string(), creds.clone());
        Ok(())
    }

    async fn get_credentials(&self, url: &str) -> Result<Option<CredentialsDict>, CredfillError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.credentials.lock().await.get(url).cloned())
    }

    async fn delete_credentials(&self, url: &str) -> Result<(), CredfillError> {
        self.credentials.lock().await.remove(url);
        Ok(())
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>, CredfillError> {
        Ok(self
            .credentials
            .lock()
            .await
            .iter()
            .map(|(url, creds)| creds.summary(url))
            .collect())
    }

    async fn set_credit_card(&self, card: &CreditCardDict) -> Result<(), CredfillError> {
        *self.card.lock().await = Some(card.clone());
        Ok(())
    }

    async fn get_credit_card(&self) -> Result<Option<CreditCardDict>, CredfillError> {
        Ok(self.card.lock().await.clone())
    }

    async fn delete_credit_card(&self) -> Result<(), CredfillError> {
        *self.card.lock().await = None;
        Ok(())
    }
}

/// A backend whose every primitive fails with a backend error.
#[derive(Debug, Default)]
pub struct FailingBackend;

impl FailingBackend {
    fn unavailable() -> CredfillError {
        CredfillError::backend(std::io::Error::other("vault service unavailable"))
    }
}

#[async_trait]
impl VaultBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn add_credentials(
        &self,
        _url: &str,
        _creds: &CredentialsDict,
    ) -> Result<(), CredfillError> {
        Err(Self::unavailable())
    }

    async fn get_credentials(&self, _url: &str) -> Result<Option<CredentialsDict>, CredfillError> {
        Err(Self::unavailable())
    }

    async fn delete_credentials(&self, _url: &str) -> Result<(), CredfillError> {
        Err(Self::unavailable())
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>, CredfillError> {
        Err(Self::unavailable())
    }

    async fn set_credit_card(&self, _card: &CreditCardDict) -> Result<(), CredfillError> {
        Err(Self::unavailable())
    }

    async fn get_credit_card(&self) -> Result<Option<CreditCardDict>, CredfillError> {
        Err(Self::unavailable())
    }

    async fn delete_credit_card(&self) -> Result<(), CredfillError> {
        Err(Self::unavailable())
    }
}

// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault orchestration over a pluggable storage backend.
//!
//! The backend stores raw records. The vault adds validation on the way in,
//! resolves MFA seeds to current one-time codes on the way out and remembers
//! every value it handed out so outbound payloads can be redacted.
//!
//! Callers must not run overlapping operations against the same vault
//! instance. The retrieval cache is only locked for the instant it is
//! written, never across a backend call, so two concurrent retrievals for the
//! same url race and the later write wins.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use credfill_config::VaultConfig;
use credfill_core::{
    Credential, CredentialsDict, CredfillError, CreditCardDict, FieldKind, VaultBackend,
};
use secrecy::SecretString;
use tracing::{debug, trace};

use crate::cache::RetrievedCredentialsCache;
use crate::env;
use crate::totp::{self, Clock, SystemClock, TotpParams};

/// Credential vault bound to one storage backend.
///
/// Debug output omits every cached value.
pub struct Vault {
    backend: Arc<dyn VaultBackend>,
    params: TotpParams,
    clock: Arc<dyn Clock>,
    retrieved: RwLock<RetrievedCredentialsCache>,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("backend", &self.backend.name())
            .field("params", &self.params)
            .field("retrieved", &"[REDACTED]")
            .finish()
    }
}

impl Vault {
    /// Vault with default code parameters and the wall clock.
    pub fn new(backend: Arc<dyn VaultBackend>) -> Self {
        Self {
            backend,
            params: TotpParams::default(),
            clock: Arc::new(SystemClock),
            retrieved: RwLock::new(RetrievedCredentialsCache::new()),
        }
    }

    pub fn with_config(backend: Arc<dyn VaultBackend>, config: &VaultConfig) -> Self {
        Self {
            params: TotpParams::from(config),
            ..Self::new(backend)
        }
    }

    /// Replace the time source used for one-time codes.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn totp_params(&self) -> TotpParams {
        self.params
    }

    fn cache(&self) -> RwLockReadGuard<'_, RetrievedCredentialsCache> {
        self.retrieved.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache_mut(&self) -> RwLockWriteGuard<'_, RetrievedCredentialsCache> {
        self.retrieved.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The one-time code for `seed` at the current time.
    pub fn current_code(&self, seed: &SecretString) -> Result<String, CredfillError> {
        totp::generate(seed, self.params, self.clock.unix_time())
    }

    /// Validate and store a login record for `url`.
    ///
    /// An MFA seed is test-driven once before anything is stored: a seed that
    /// cannot produce a code fails with `InvalidSecret`.
    pub async fn add_credentials(
        &self,
        url: &str,
        creds: &CredentialsDict,
    ) -> Result<(), CredfillError> {
        creds.validate()?;
        if let Some(seed) = &creds.mfa_secret {
            self.current_code(&SecretString::from(seed.clone()))?;
        }
        self.backend.add_credentials(url, creds).await?;
        debug!(url = %url, backend = self.backend.name(), "credentials stored");
        Ok(())
    }

    /// Fetch the record for `url` with any MFA seed replaced by the current
    /// code, and remember it for redaction.
    pub async fn get_credentials(
        &self,
        url: &str,
    ) -> Result<Option<CredentialsDict>, CredfillError> {
        let Some(mut creds) = self.backend.get_credentials(url).await? else {
            trace!(url = %url, "no credentials stored");
            return Ok(None);
        };
        if let Some(seed) = creds.mfa_secret.take() {
            let code = self.current_code(&SecretString::from(seed))?;
            creds.mfa_secret = Some(code);
        }
        self.cache_mut().record(url, creds.clone());
        trace!(url = %url, "credentials retrieved");
        Ok(Some(creds))
    }

    /// Remove the stored record. Values already handed out stay in the
    /// retrieval cache.
    pub async fn delete_credentials(&self, url: &str) -> Result<(), CredfillError> {
        self.backend.delete_credentials(url).await?;
        debug!(url = %url, "credentials deleted");
        Ok(())
    }

    pub async fn list_credentials(&self) -> Result<Vec<Credential>, CredfillError> {
        self.backend.list_credentials().await
    }

    pub async fn has_credential(&self, url: &str) -> Result<bool, CredfillError> {
        Ok(self
            .list_credentials()
            .await?
            .iter()
            .any(|credential| credential.url == url))
    }

    pub async fn set_credit_card(&self, card: &CreditCardDict) -> Result<(), CredfillError> {
        self.backend.set_credit_card(card).await?;
        debug!("credit card stored");
        Ok(())
    }

    /// Fetch the vault-wide credit card, remembering it for redaction.
    pub async fn get_credit_card(&self) -> Result<CreditCardDict, CredfillError> {
        let card = self
            .backend
            .get_credit_card()
            .await?
            .ok_or(CredfillError::NoPaymentRecord)?;
        self.cache_mut().record_card(card.clone());
        trace!("credit card retrieved");
        Ok(card)
    }

    pub async fn delete_credit_card(&self) -> Result<(), CredfillError> {
        self.backend.delete_credit_card().await?;
        debug!("credit card deleted");
        Ok(())
    }

    /// Store credentials for `url` read from the process environment.
    ///
    /// See [`crate::env`] for the variable naming scheme.
    pub async fn add_credentials_from_env(&self, url: &str) -> Result<(), CredfillError> {
        self.add_credentials_from_lookup(url, |name| std::env::var(name).ok())
            .await
    }

    /// Like [`Vault::add_credentials_from_env`] with a custom variable source.
    pub async fn add_credentials_from_lookup<F>(
        &self,
        url: &str,
        lookup: F,
    ) -> Result<(), CredfillError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let creds = env::collect_credentials(url, lookup)?;
        self.add_credentials(url, &creds).await
    }

    /// Copy of every record retrieved so far, by url.
    pub fn past_credentials(&self) -> BTreeMap<String, CredentialsDict> {
        self.cache().snapshot()
    }

    /// Secret value -> field kind for every value retrieved so far.
    pub fn replacement_map(&self) -> HashMap<String, FieldKind> {
        self.cache().replacement_map()
    }

    /// Forget every retrieved value.
    pub fn clear_retrieved(&self) {
        self.cache_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credfill_test_utils::{FailingBackend, MemoryBackend, fixtures};
    use tracing_test::traced_test;

    use crate::totp::ManualClock;

    fn vault_with(backend: Arc<MemoryBackend>, clock: Arc<ManualClock>) -> Vault {
        Vault::new(backend).with_clock(clock)
    }

    fn seed() -> SecretString {
        SecretString::from(fixtures::MFA_SEED)
    }

    #[tokio::test]
    async fn add_then_get_returns_record() {
        let backend = Arc::new(MemoryBackend::new());
        let vault = Vault::new(backend.clone());
        vault.add_credentials("site.com", &fixtures::alice()).await.unwrap();

        let creds = vault.get_credentials("site.com").await.unwrap().unwrap();
        assert_eq!(creds.password.as_deref(), Some("hunter2"));
        assert_eq!(creds.username.as_deref(), Some("alice"));
        assert_eq!(vault.past_credentials().len(), 1);
    }

    #[tokio::test]
    async fn get_missing_url_is_none_and_not_cached() {
        let vault = Vault::new(Arc::new(MemoryBackend::new()));
        assert!(vault.get_credentials("nowhere.com").await.unwrap().is_none());
        assert!(vault.past_credentials().is_empty());
    }

    #[tokio::test]
    async fn mfa_seed_is_replaced_by_current_code() {
        let backend = Arc::new(MemoryBackend::new());
        let clock = Arc::new(ManualClock::new(59));
        let vault = vault_with(backend.clone(), clock.clone());
        vault
            .add_credentials("site.com", &fixtures::full_login())
            .await
            .unwrap();

        let creds = vault.get_credentials("site.com").await.unwrap().unwrap();
        let code = creds.mfa_secret.unwrap();
        assert_eq!(code, totp::generate(&seed(), TotpParams::default(), 59).unwrap());
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        // The stored record keeps the seed, never the code.
        let stored = backend.stored("site.com").await.unwrap();
        assert_eq!(stored.mfa_secret.as_deref(), Some(fixtures::MFA_SEED));
    }

    #[tokio::test]
    async fn codes_follow_the_time_step() {
        let backend = Arc::new(MemoryBackend::new());
        let clock = Arc::new(ManualClock::new(59));
        let vault = vault_with(backend, clock.clone());
        vault
            .add_credentials("site.com", &fixtures::full_login())
            .await
            .unwrap();

        let first = vault.get_credentials("site.com").await.unwrap().unwrap();
        clock.advance(31);
        let second = vault.get_credentials("site.com").await.unwrap().unwrap();

        let params = TotpParams::default();
        assert_eq!(
            first.mfa_secret.unwrap(),
            totp::generate(&seed(), params, 59).unwrap()
        );
        assert_eq!(
            second.mfa_secret.clone().unwrap(),
            totp::generate(&seed(), params, 90).unwrap()
        );
        // Only the latest code is cached for the url.
        assert_eq!(
            vault.past_credentials()["site.com"].mfa_secret,
            second.mfa_secret
        );
    }

    #[tokio::test]
    async fn configured_digits_are_used() {
        let config = VaultConfig {
            totp_digits: 8,
            totp_period_secs: 30,
        };
        let vault = Vault::with_config(Arc::new(MemoryBackend::new()), &config)
            .with_clock(Arc::new(ManualClock::new(59)));
        vault
            .add_credentials("site.com", &fixtures::full_login())
            .await
            .unwrap();
        let creds = vault.get_credentials("site.com").await.unwrap().unwrap();
        let expected = totp::generate(&seed(), TotpParams::from(&config), 59).unwrap();
        assert_eq!(creds.mfa_secret.as_deref(), Some(expected.as_str()));
        assert_eq!(expected.len(), 8);
    }

    #[tokio::test]
    async fn storing_a_code_instead_of_a_seed_fails() {
        let backend = Arc::new(MemoryBackend::new());
        let vault = Vault::new(backend.clone());
        let creds = CredentialsDict::new("pw").with_mfa_secret("123456");

        let err = vault.add_credentials("site.com", &creds).await.unwrap_err();
        assert!(matches!(err, CredfillError::InvalidSecret { .. }));
        assert!(backend.stored("site.com").await.is_none());
    }

    #[tokio::test]
    async fn missing_password_is_rejected() {
        let vault = Vault::new(Arc::new(MemoryBackend::new()));
        let creds = CredentialsDict::default().with_username("alice");
        let err = vault.add_credentials("site.com", &creds).await.unwrap_err();
        assert!(matches!(err, CredfillError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn list_and_has_credential() {
        let vault = Vault::new(Arc::new(MemoryBackend::new()));
        vault.add_credentials("a.com", &fixtures::alice()).await.unwrap();
        vault
            .add_credentials("b.com", &fixtures::full_login())
            .await
            .unwrap();

        let listed = vault.list_credentials().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].username.as_deref(), Some("alice"));
        assert!(vault.has_credential("b.com").await.unwrap());
        assert!(!vault.has_credential("c.com").await.unwrap());

        vault.delete_credentials("b.com").await.unwrap();
        assert!(!vault.has_credential("b.com").await.unwrap());
    }

    #[tokio::test]
    async fn delete_keeps_retrieved_values_for_redaction() {
        let vault = Vault::new(Arc::new(MemoryBackend::new()));
        vault.add_credentials("a.com", &fixtures::alice()).await.unwrap();
        vault.get_credentials("a.com").await.unwrap();
        vault.delete_credentials("a.com").await.unwrap();

        assert_eq!(
            vault.replacement_map().get("hunter2"),
            Some(&FieldKind::Password)
        );
        vault.clear_retrieved();
        assert!(vault.replacement_map().is_empty());
    }

    #[tokio::test]
    async fn credit_card_slot_round_trip() {
        let vault = Vault::new(Arc::new(MemoryBackend::new()));
        assert!(matches!(
            vault.get_credit_card().await,
            Err(CredfillError::NoPaymentRecord)
        ));

        vault.set_credit_card(&fixtures::card()).await.unwrap();
        let card = vault.get_credit_card().await.unwrap();
        assert_eq!(card.card_cvv, "737");
        assert_eq!(
            vault.replacement_map().get("4111 1111 1111 1111"),
            Some(&FieldKind::CardNumber)
        );

        vault.delete_credit_card().await.unwrap();
        assert!(matches!(
            vault.get_credit_card().await,
            Err(CredfillError::NoPaymentRecord)
        ));
    }

    #[tokio::test]
    async fn backend_errors_propagate() {
        let vault = Vault::new(Arc::new(FailingBackend));
        let err = vault.get_credentials("a.com").await.unwrap_err();
        assert!(matches!(err, CredfillError::Backend { .. }));
        let err = vault.add_credentials("a.com", &fixtures::alice()).await.unwrap_err();
        assert!(matches!(err, CredfillError::Backend { .. }));
    }

    #[tokio::test]
    async fn lookup_ingestion_stores_found_fields() {
        let backend = Arc::new(MemoryBackend::new());
        let vault = Vault::new(backend.clone());
        vault
            .add_credentials_from_lookup("https://github.com/login", |name| {
                (name == "GITHUB_COM_PASSWORD").then(|| "pw".to_string())
            })
            .await
            .unwrap();
        assert_eq!(
            backend.stored("https://github.com/login").await,
            Some(CredentialsDict::new("pw"))
        );
    }

    #[tokio::test]
    async fn lookup_ingestion_validates_the_seed() {
        let vault = Vault::new(Arc::new(MemoryBackend::new()));
        let err = vault
            .add_credentials_from_lookup("github.com", |name| match name {
                "GITHUB_COM_PASSWORD" => Some("pw".to_string()),
                "GITHUB_COM_MFA_SECRET" => Some("not a seed!".to_string()),
                _ => None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CredfillError::InvalidSecret { .. }));
    }

    #[tokio::test]
    #[traced_test]
    async fn mutations_are_logged_without_values() {
        let vault = Vault::new(Arc::new(MemoryBackend::new()));
        vault.add_credentials("a.com", &fixtures::alice()).await.unwrap();
        vault.get_credentials("a.com").await.unwrap();

        assert!(logs_contain("credentials stored"));
        assert!(!logs_contain("hunter2"));
    }

    #[test]
    fn debug_is_redacted() {
        let vault = Vault::new(Arc::new(MemoryBackend::new()));
        let out = format!("{vault:?}");
        assert!(out.contains("memory"));
        assert!(out.contains("[REDACTED]"));
    }
}

// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History of secret values handed out by a vault.
//!
//! Every retrieval is recorded so the redaction pass can later recognise the
//! real values in outbound payloads. The cache grows for the lifetime of its
//! vault: re-fetching a url overwrites that url's entry, nothing is evicted.
//! Values are wiped from memory when the cache is cleared or dropped.

use std::collections::{BTreeMap, HashMap};

use credfill_core::{CredentialsDict, CreditCardDict, FieldKind, SecretRecord};
use zeroize::Zeroize;

#[derive(Clone)]
struct Entry<T> {
    seq: u64,
    record: T,
}

/// Url -> last retrieved login record, plus the last retrieved credit card.
#[derive(Default)]
pub struct RetrievedCredentialsCache {
    next_seq: u64,
    credentials: BTreeMap<String, Entry<CredentialsDict>>,
    card: Option<Entry<CreditCardDict>>,
}

impl RetrievedCredentialsCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Record `creds` as the latest retrieval for `url`.
    pub fn record(&mut self, url: &str, creds: CredentialsDict) {
        let seq = self.bump();
        if let Some(mut old) = self
            .credentials
            .insert(url.to_string(), Entry { seq, record: creds })
        {
            wipe_credentials(&mut old.record);
        }
    }

    pub fn record_card(&mut self, card: CreditCardDict) {
        let seq = self.bump();
        if let Some(mut old) = self.card.replace(Entry { seq, record: card }) {
            wipe_card(&mut old.record);
        }
    }

    pub fn get(&self, url: &str) -> Option<&CredentialsDict> {
        self.credentials.get(url).map(|entry| &entry.record)
    }

    pub fn card(&self) -> Option<&CreditCardDict> {
        self.card.as_ref().map(|entry| &entry.record)
    }

    /// Copy of every url entry.
    pub fn snapshot(&self) -> BTreeMap<String, CredentialsDict> {
        self.credentials
            .iter()
            .map(|(url, entry)| (url.clone(), entry.record.clone()))
            .collect()
    }

    /// Map from every recorded secret value to the field kind it belongs to.
    ///
    /// When the same value was handed out under several kinds, the most
    /// recent retrieval decides. Empty values are skipped.
    pub fn replacement_map(&self) -> HashMap<String, FieldKind> {
        let mut recorded: Vec<(u64, FieldKind, &str)> = self
            .credentials
            .values()
            .flat_map(|entry| {
                entry
                    .record
                    .entries()
                    .into_iter()
                    .map(move |(kind, value)| (entry.seq, kind, value))
            })
            .collect();
        if let Some(entry) = &self.card {
            recorded.extend(
                entry
                    .record
                    .entries()
                    .into_iter()
                    .map(|(kind, value)| (entry.seq, kind, value)),
            );
        }
        recorded.sort_by_key(|(seq, _, _)| *seq);

        let mut map = HashMap::with_capacity(recorded.len());
        for (_, kind, value) in recorded {
            if !value.is_empty() {
                map.insert(value.to_string(), kind);
            }
        }
        map
    }

    /// Number of recorded urls (the card slot is not counted).
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty() && self.card.is_none()
    }

    pub fn clear(&mut self) {
        for entry in self.credentials.values_mut() {
            wipe_credentials(&mut entry.record);
        }
        self.credentials.clear();
        if let Some(mut entry) = self.card.take() {
            wipe_card(&mut entry.record);
        }
    }
}

impl Drop for RetrievedCredentialsCache {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for RetrievedCredentialsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievedCredentialsCache")
            .field("urls", &self.credentials.keys().collect::<Vec<_>>())
            .field("card", &self.card.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn wipe_credentials(creds: &mut CredentialsDict) {
    creds.email.zeroize();
    creds.username.zeroize();
    creds.password.zeroize();
    creds.mfa_secret.zeroize();
}

fn wipe_card(card: &mut CreditCardDict) {
    card.card_holder_name.zeroize();
    card.card_number.zeroize();
    card.card_cvv.zeroize();
    card.card_full_expiration.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use credfill_test_utils::fixtures;

    #[test]
    fn record_overwrites_per_url() {
        let mut cache = RetrievedCredentialsCache::new();
        cache.record("site.com", CredentialsDict::new("old"));
        cache.record("site.com", CredentialsDict::new("new"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("site.com").unwrap().password.as_deref(), Some("new"));
    }

    #[test]
    fn replacement_map_covers_history_and_card() {
        let mut cache = RetrievedCredentialsCache::new();
        cache.record("a.com", fixtures::alice());
        cache.record("b.com", CredentialsDict::new("pw-b").with_email("b@b.com"));
        cache.record_card(fixtures::card());

        let map = cache.replacement_map();
        assert_eq!(map.get("hunter2"), Some(&FieldKind::Password));
        assert_eq!(map.get("alice"), Some(&FieldKind::Username));
        assert_eq!(map.get("b@b.com"), Some(&FieldKind::Email));
        assert_eq!(map.get("737"), Some(&FieldKind::CardCvv));
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn most_recent_retrieval_wins_on_collision() {
        let mut cache = RetrievedCredentialsCache::new();
        cache.record("b.com", CredentialsDict::new("pw").with_username("shared"));
        cache.record("a.com", CredentialsDict::new("pw2").with_email("shared"));
        assert_eq!(cache.replacement_map().get("shared"), Some(&FieldKind::Email));

        cache.record("b.com", CredentialsDict::new("pw").with_username("shared"));
        assert_eq!(
            cache.replacement_map().get("shared"),
            Some(&FieldKind::Username)
        );
    }

    #[test]
    fn empty_values_are_not_mapped() {
        let mut cache = RetrievedCredentialsCache::new();
        cache.record("a.com", CredentialsDict::new("pw").with_username(""));
        let map = cache.replacement_map();
        assert!(!map.contains_key(""));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cache = RetrievedCredentialsCache::new();
        cache.record("a.com", fixtures::alice());
        cache.record_card(fixtures::card());
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.replacement_map().is_empty());
        assert!(cache.snapshot().is_empty());
    }

    #[test]
    fn debug_lists_urls_only() {
        let mut cache = RetrievedCredentialsCache::new();
        cache.record("a.com", fixtures::alice());
        cache.record_card(fixtures::card());
        let out = format!("{cache:?}");
        assert!(out.contains("a.com"));
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("4111"));
    }
}

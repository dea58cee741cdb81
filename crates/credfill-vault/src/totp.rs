// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RFC 6238 time-based one-time codes (HMAC-SHA1).
//!
//! Storage holds the shared seed, never a code. A code is derived from the
//! seed and the current time step on every retrieval.

use std::sync::atomic::{AtomicU64, Ordering};

use credfill_config::VaultConfig;
use credfill_core::CredfillError;
use data_encoding::BASE32_NOPAD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use zeroize::Zeroizing;

type HmacSha1 = Hmac<Sha1>;

/// Code length and time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotpParams {
    pub digits: u32,
    pub period_secs: u64,
}

impl Default for TotpParams {
    fn default() -> Self {
        Self {
            digits: 6,
            period_secs: 30,
        }
    }
}

impl From<&VaultConfig> for TotpParams {
    fn from(config: &VaultConfig) -> Self {
        Self {
            digits: config.totp_digits,
            period_secs: config.totp_period_secs,
        }
    }
}

/// Source of the current unix time in seconds.
pub trait Clock: Send + Sync + 'static {
    fn unix_time(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_time(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(unix_time: u64) -> Self {
        Self {
            now: AtomicU64::new(unix_time),
        }
    }

    pub fn set(&self, unix_time: u64) {
        self.now.store(unix_time, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn unix_time(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Decode a base32 seed. Whitespace, case and trailing padding are ignored.
pub fn decode_seed(seed: &SecretString) -> Result<Zeroizing<Vec<u8>>, CredfillError> {
    let normalized: Zeroizing<String> = Zeroizing::new(
        seed.expose_secret()
            .chars()
            .filter(|ch| !ch.is_ascii_whitespace())
            .map(|ch| ch.to_ascii_uppercase())
            .collect(),
    );
    let normalized = normalized.trim_end_matches('=');
    if normalized.is_empty() {
        return Err(CredfillError::InvalidSecret {
            reason: "seed is empty".to_string(),
        });
    }
    BASE32_NOPAD
        .decode(normalized.as_bytes())
        .map(Zeroizing::new)
        .map_err(|e| CredfillError::InvalidSecret {
            reason: format!("seed is not valid base32: {e}"),
        })
}

/// Index of the time step containing `unix_time`.
pub fn time_step(params: TotpParams, unix_time: u64) -> u64 {
    unix_time / params.period_secs.max(1)
}

/// Generate the code for `seed` at `unix_time`.
pub fn generate(
    seed: &SecretString,
    params: TotpParams,
    unix_time: u64,
) -> Result<String, CredfillError> {
    if !(6..=8).contains(&params.digits) {
        return Err(CredfillError::Config(format!(
            "one-time codes must have 6 to 8 digits, got {}",
            params.digits
        )));
    }
    if params.period_secs == 0 {
        return Err(CredfillError::Config(
            "one-time code period must be greater than zero".to_string(),
        ));
    }

    let key = decode_seed(seed)?;
    let mut mac = HmacSha1::new_from_slice(&key).map_err(|e| CredfillError::InvalidSecret {
        reason: e.to_string(),
    })?;
    mac.update(&time_step(params, unix_time).to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // Dynamic truncation, RFC 4226 section 5.3.
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);
    let code = binary % 10u32.pow(params.digits);
    Ok(format!("{code:0width$}", width = params.digits as usize))
}

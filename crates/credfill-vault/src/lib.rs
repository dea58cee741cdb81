// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential vault for the credfill substitution engine.
//!
//! Provides the [`Vault`] orchestrator over a [`credfill_core::VaultBackend`],
//! RFC 6238 one-time code generation, credential discovery from environment
//! variables and the cache of retrieved values that feeds redaction.

pub mod blocking;
pub mod cache;
pub mod env;
pub mod totp;
pub mod vault;

pub use blocking::BlockingVault;
pub use cache::RetrievedCredentialsCache;
pub use env::{env_prefix, env_var_names, root_domain};
pub use totp::{Clock, ManualClock, SystemClock, TotpParams};
pub use vault::Vault;

// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secure credential substitution for autonomous browsing agents.
//!
//! The agent only ever sees placeholders such as `mycoolpassword`. Right
//! before an action runs, [`CredentialEngine::substitute`] swaps them for the
//! real values held in a [`Vault`]; before any payload goes back to the agent,
//! [`CredentialEngine::redact`] swaps real values back for placeholders.
//!
//! ```no_run
//! # async fn demo(backend: std::sync::Arc<dyn credfill::VaultBackend>) -> Result<(), credfill::CredfillError> {
//! use credfill::{Action, CredentialEngine, CredfillConfig, CredentialsDict, LocatorAttributes};
//!
//! let engine = CredentialEngine::new(backend, CredfillConfig::default());
//! engine
//!     .vault()
//!     .add_credentials("site.com", &CredentialsDict::new("hunter2").with_username("alice"))
//!     .await?;
//!
//! let action = Action::fill("I1", "mycoolpassword");
//! let attrs = LocatorAttributes::input("password");
//! let ready = engine.substitute(action, Some(&attrs), "site.com").await?;
//! let for_agent = engine.redact_serializable(&ready)?;
//! # Ok(()) }
//! ```

mod engine;
mod logging;

pub use engine::CredentialEngine;
pub use logging::init_tracing;

pub use credfill_config::{CredfillConfig, load_and_validate, load_and_validate_str};
pub use credfill_core::instructions::{instructions, system_instructions};
pub use credfill_core::{
    Action, ActionValue, Credential, CredentialsDict, CredfillError, CreditCardDict, FieldKind,
    LocatorAttributes, ValueWithPlaceholder, VaultBackend,
};
pub use credfill_security::{Redactor, Substituter, contains_credentials};
pub use credfill_vault::{BlockingVault, Vault};

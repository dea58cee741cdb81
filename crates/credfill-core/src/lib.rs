// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the credfill credential substitution engine.
//!
//! This crate provides the field registry, the credential data model, the
//! agent action shapes, the prompt instruction text and the storage backend
//! trait used throughout the credfill workspace.

pub mod action;
pub mod error;
pub mod field;
pub mod instructions;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use action::{Action, ActionValue, ValueWithPlaceholder};
pub use error::CredfillError;
pub use field::{FieldKind, all_placeholders, lookup_by_alias, lookup_by_placeholder};
pub use traits::VaultBackend;
pub use types::{Credential, CredentialsDict, CreditCardDict, LocatorAttributes, SecretRecord};

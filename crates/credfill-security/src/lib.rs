// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret handling at the agent boundary.
//!
//! Substitution swaps placeholders for real values right before an action
//! runs. Redaction swaps real values back for placeholders before any payload
//! leaves the process.

pub mod redact;
pub mod substitute;

pub use redact::Redactor;
pub use substitute::{Substituter, contains_credentials, get_with_fallback};

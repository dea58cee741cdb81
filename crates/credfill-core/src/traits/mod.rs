// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension points of the engine.
//!
//! Storage backends implement [`VaultBackend`] and use `#[async_trait]` for
//! dynamic dispatch compatibility.

pub mod backend;

pub use backend::VaultBackend;

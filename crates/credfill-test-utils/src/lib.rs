// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for credfill tests.
//!
//! Provides storage backends and fixtures for fast, deterministic tests
//! without a remote vault service.
//!
//! # Components
//!
//! - [`MemoryBackend`] - in-memory backend with call counting
//! - [`FailingBackend`] - backend whose every primitive fails
//! - [`fixtures`] - sample records and DOM attributes

pub mod fixtures;
pub mod memory_backend;

pub use memory_backend::{FailingBackend, MemoryBackend};

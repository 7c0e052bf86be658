// SPDX-License-Identifier: MPL-2.0
//! Navigation context storage.
//!
//! - [`navigation`]: ordered items plus per-item load state
//!   ([`NavigationContextStore`])
//!
//! The store is written by the windowing engine (load resolution, eviction)
//! and by the orchestrator (context replacement and paging). Everything else
//! only reads it.

pub mod navigation;

pub use navigation::{ContextUpdate, NavigationContextStore};

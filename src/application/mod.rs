// SPDX-License-Identifier: MPL-2.0
//! Application layer - Contracts with collaborators and the context store.
//!
//! - [`port`]: Trait definitions for the collaborators the core calls
//!   (image loader, page source, render surface, dismissal, overlay lifecycle)
//! - [`query`]: The navigation context store, single source of truth for
//!   "what is at position i"
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Adapters (HTTP clients, widget code) implement application layer ports
//! - The viewer orchestrator uses application layer services
//!
//! # Example
//!
//! ```
//! use iced_slideshow::application::query::NavigationContextStore;
//! use iced_slideshow::domain::navigation::NavigationContextItem;
//!
//! let mut store = NavigationContextStore::new();
//! store.set_context(vec![
//!     NavigationContextItem::new("a", "thumbs/a.jpg"),
//!     NavigationContextItem::new("b", "thumbs/b.jpg"),
//! ]);
//! assert_eq!(store.index_of(&"b".into()), Some(1));
//! ```

pub mod port;
pub mod query;

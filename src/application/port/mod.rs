// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! The viewer core talks to its collaborators only through these traits.
//! HTTP clients, widget trees and window managers implement them.
//!
//! # Available Ports
//!
//! - [`loader`]: Image resolution and context paging
//! - [`surface`]: Render surface and dismissal callback
//! - [`notifier`]: User notices (failed loads, paging problems)
//! - [`overlay`]: Overlay lifecycle notifications
//!
//! # Design Notes
//!
//! - Traits use domain types only (no widget handles, no HTTP types)
//! - Async operations return boxed `'static` futures so the runtime can spawn
//!   them and deliver their result later as a message
//! - Failures are values ([`LoadFailure`](crate::error::LoadFailure)), never panics

pub mod loader;
pub mod notifier;
pub mod overlay;
pub mod surface;

pub use loader::{ImageLoader, Page, PageSource};
pub use notifier::{Notice, Notifier, PAGE_FETCH_FAILED_KEY};
pub use overlay::{
    OverlayEvent, OverlayId, OverlayKind, OverlayNotifier, OverlayObserver, SubscriptionId,
};
pub use surface::{Dismissal, RenderSurface};

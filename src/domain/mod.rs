// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with no I/O and no runtime dependencies.
//!
//! This module contains pure domain types, value objects, and invariants.
//! Apart from `serde` derives on configuration-facing values it only depends
//! on `std`, which keeps it trivially testable.
//!
//! # Modules
//!
//! - [`gesture`]: Swipe directions, gesture contexts and validated thresholds
//!   ([`SwipeDirection`](gesture::SwipeDirection), [`SwipeThreshold`](gesture::SwipeThreshold))
//! - [`navigation`]: Navigable items ([`ItemId`](navigation::ItemId),
//!   [`NavigationContextItem`](navigation::NavigationContextItem),
//!   [`ImageResource`](navigation::ImageResource))

pub mod gesture;
pub mod navigation;

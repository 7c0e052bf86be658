// SPDX-License-Identifier: MPL-2.0
//! Navigation domain types.
//!
//! This module provides the value types that make up a navigation context:
//! - [`ItemId`]: Opaque, stable identifier of a navigable item
//! - [`ImageResource`]: Fully-resolved image descriptor
//! - [`NavigationContextItem`]: One entry of the ordered context
//! - [`ContextEdge`]: Which end of the context a page extends

mod types;

pub use types::{ContextEdge, ImageResource, ItemId, NavigationContextItem, PageCursor};

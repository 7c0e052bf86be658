// SPDX-License-Identifier: MPL-2.0
//! Window arithmetic over a navigation context.
//!
//! Three windows are derived from the active index, none of them persisted:
//!
//! - **visible**: what the carousel renders, `[idx-1, idx+1]` clipped, so one
//!   to three items
//! - **loaded**: what must hold a resource, `[idx-buffer, idx+buffer]`
//! - **retained**: what may keep a resource, `[idx-radius, idx+radius]`;
//!   anything outside is unloaded
//!
//! Windows never wrap around the ends of the context.

use crate::application::query::NavigationContextStore;
use crate::domain::navigation::{ItemId, NavigationContextItem};
use std::ops::Range;

/// Returns `[index - radius, index + radius]` clipped to `0..len`.
#[must_use]
pub fn clipped_range(index: usize, len: usize, radius: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let index = index.min(len - 1);
    let start = index.saturating_sub(radius);
    let end = index.saturating_add(radius).saturating_add(1).min(len);
    start..end
}

/// Indices the carousel renders for `index`.
///
/// One item for a single-item context, the first two at the start, the last
/// two at the end, the triple otherwise.
#[must_use]
pub fn visible_range(index: usize, len: usize) -> Range<usize> {
    clipped_range(index, len, 1)
}

/// Indices that must be loaded for `index`.
#[must_use]
pub fn loaded_range(index: usize, len: usize, buffer: usize) -> Range<usize> {
    clipped_range(index, len, buffer)
}

/// Indices allowed to keep their resource for `index`.
#[must_use]
pub fn retained_range(index: usize, len: usize, drop_radius: usize) -> Range<usize> {
    clipped_range(index, len, drop_radius)
}

/// Snapshot of the items the carousel renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisibleWindow {
    /// Index of the active item in the context.
    pub active_index: usize,
    /// Context indices covered by `items`.
    pub range: Range<usize>,
    /// Items in navigation order.
    pub items: Vec<NavigationContextItem>,
}

impl VisibleWindow {
    /// Builds the visible window around `active_index`.
    #[must_use]
    pub fn from_store(store: &NavigationContextStore, active_index: usize) -> Self {
        let range = visible_range(active_index, store.len());
        let items = range
            .clone()
            .filter_map(|i| store.item_at(i).cloned())
            .collect();
        Self {
            active_index: active_index.min(store.len().saturating_sub(1)),
            range,
            items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids in render order, usable as stable render keys.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// The active item, if the context is not empty.
    #[must_use]
    pub fn active(&self) -> Option<&NavigationContextItem> {
        self.items
            .get(self.active_index.checked_sub(self.range.start)?)
    }
}

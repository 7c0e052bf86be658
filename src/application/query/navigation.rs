// SPDX-License-Identifier: MPL-2.0
//! Navigation context store.
//!
//! Holds the ordered sequence of navigable items and their load state. The
//! context is replaced wholesale or extended at either end; it is never
//! spliced by index, so positions only shift when a page is prepended.
//!
//! Records are swapped whole: a resolve or unload builds a new
//! [`NavigationContextItem`] and replaces the old one, so a reader never sees
//! a half-updated item.

use crate::domain::navigation::{ContextEdge, ImageResource, ItemId, NavigationContextItem};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Summary of a context replacement or extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextUpdate {
    /// Items added to the context.
    pub added: usize,
    /// Items whose already-resolved resource was carried over.
    pub preserved: usize,
    /// Ids that appeared more than once in the incoming list (first one wins)
    /// or, for extensions, ids already present in the context.
    pub skipped: Vec<ItemId>,
}

/// Ordered navigation context with per-item load state.
#[derive(Debug, Clone, Default)]
pub struct NavigationContextStore {
    items: Vec<NavigationContextItem>,
    positions: HashMap<ItemId, usize>,
    /// Bumped on every wholesale replacement.
    generation: u64,
}

impl NavigationContextStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the item with the given id, or `None` if it is not in the context.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&NavigationContextItem> {
        self.positions.get(id).and_then(|&i| self.items.get(i))
    }

    /// Returns the position of an id in the context.
    #[must_use]
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Returns the item at a position.
    #[must_use]
    pub fn item_at(&self, index: usize) -> Option<&NavigationContextItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = &NavigationContextItem> {
        self.items.iter()
    }

    /// Number of items currently holding a resource.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_loaded()).count()
    }

    /// Generation of the current context; increases on every replacement.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the whole context.
    ///
    /// An incoming item without a resource inherits the resource of the
    /// existing item with the same id, so images the window already resolved
    /// are not fetched again. Duplicate ids keep their first occurrence.
    pub fn set_context(&mut self, items: Vec<NavigationContextItem>) -> ContextUpdate {
        let (incoming, skipped) = dedup_by_id(items);
        let mut preserved = 0;

        let merged: Vec<NavigationContextItem> = incoming
            .into_iter()
            .map(|item| {
                if item.resource.is_some() {
                    return item;
                }
                match self.get(&item.id).and_then(|old| old.resource.clone()) {
                    Some(resource) => {
                        preserved += 1;
                        item.with_resource(resource)
                    }
                    None => item,
                }
            })
            .collect();

        let added = merged.len();
        self.items = merged;
        self.rebuild_positions();
        self.generation += 1;

        ContextUpdate {
            added,
            preserved,
            skipped,
        }
    }

    /// Merges a page of items at one end of the context.
    ///
    /// Ids already present are skipped so that resolved neighbors are never
    /// replaced. Prepending shifts every existing position.
    pub fn extend(&mut self, edge: ContextEdge, items: Vec<NavigationContextItem>) -> ContextUpdate {
        let (incoming, mut skipped) = dedup_by_id(items);
        let mut fresh = Vec::with_capacity(incoming.len());
        for item in incoming {
            if self.positions.contains_key(&item.id) {
                skipped.push(item.id);
            } else {
                fresh.push(item);
            }
        }

        let added = fresh.len();
        match edge {
            ContextEdge::End => self.items.extend(fresh),
            ContextEdge::Start => {
                fresh.append(&mut self.items);
                self.items = fresh;
            }
        }
        self.rebuild_positions();

        ContextUpdate {
            added,
            preserved: 0,
            skipped,
        }
    }

    /// Marks an item as loaded.
    ///
    /// Returns `false` without doing anything if the id is no longer in the
    /// context (the context was replaced while the load was in flight).
    pub fn resolve(&mut self, id: &ItemId, resource: Arc<ImageResource>) -> bool {
        let Some(&index) = self.positions.get(id) else {
            return false;
        };
        self.items[index] = self.items[index].with_resource(resource);
        true
    }

    /// Clears the resource of an item.
    ///
    /// Idempotent. Returns `true` only if a resource was actually dropped.
    pub fn unload(&mut self, id: &ItemId) -> bool {
        let Some(&index) = self.positions.get(id) else {
            return false;
        };
        if !self.items[index].is_loaded() {
            return false;
        }
        self.items[index] = self.items[index].unloaded();
        true
    }

    fn rebuild_positions(&mut self) {
        self.positions = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();
    }
}

fn dedup_by_id(items: Vec<NavigationContextItem>) -> (Vec<NavigationContextItem>, Vec<ItemId>) {
    let mut seen = HashSet::with_capacity(items.len());
    let mut unique = Vec::with_capacity(items.len());
    let mut duplicates = Vec::new();
    for item in items {
        if seen.insert(item.id.clone()) {
            unique.push(item);
        } else {
            duplicates.push(item.id);
        }
    }
    (unique, duplicates)
}

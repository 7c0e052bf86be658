// SPDX-License-Identifier: MPL-2.0
//! Windowed prefetch engine for smooth slideshow navigation.
//!
//! Keeps exactly the right items of a navigation context loaded: the active
//! item and its neighbors are requested, items far from the active position
//! are unloaded. Distance from the active index is the only eviction signal;
//! navigation is overwhelmingly sequential, so there is no byte budget and
//! no recency tracking.
//!
//! # Design
//!
//! - **Staggered loads**: each request carries a delay proportional to its
//!   distance from the active item, so the active item is never queued
//!   behind its neighbors
//! - **Id-keyed resolution**: a completion is applied to whatever item has
//!   that id, even if it left the window meanwhile; stale completions for
//!   ids that are gone are counted and dropped
//! - **No duplicate requests**: ids with a request in flight are skipped;
//!   ids whose last load failed are skipped until retried
//!
//! # Usage
//!
//! ```
//! use iced_slideshow::application::query::NavigationContextStore;
//! use iced_slideshow::domain::navigation::{ItemId, NavigationContextItem};
//! use iced_slideshow::media::prefetch::{PrefetchConfig, PrefetchEngine};
//!
//! let mut store = NavigationContextStore::new();
//! store.set_context(vec![
//!     NavigationContextItem::new("a", "t/a"),
//!     NavigationContextItem::new("b", "t/b"),
//!     NavigationContextItem::new("c", "t/c"),
//! ]);
//!
//! let mut engine = PrefetchEngine::new(PrefetchConfig::default());
//! let plan = engine.refresh(&mut store, Some(&ItemId::from("b")));
//! assert_eq!(plan.loads.len(), 3);
//! assert_eq!(plan.loads[0].id, ItemId::from("b"));
//! ```

use crate::application::query::NavigationContextStore;
use crate::config::{
    DEFAULT_DROP_RADIUS, DEFAULT_LOAD_BUFFER, DEFAULT_STAGGER_STEP_MS, MAX_DROP_RADIUS,
    MAX_LOAD_BUFFER, MAX_STAGGER_STEP_MS,
};
use crate::domain::navigation::{ImageResource, ItemId};
use crate::media::window::{loaded_range, retained_range, VisibleWindow};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the prefetch engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefetchConfig {
    /// Neighbors loaded on each side of the active item.
    pub load_buffer: usize,

    /// Loaded items farther than this from the active item are unloaded.
    /// Never smaller than `load_buffer`.
    pub drop_radius: usize,

    /// Delay added per step of distance from the active item.
    pub stagger_step: Duration,

    /// Whether neighbors are prefetched. The active item is always loaded.
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            load_buffer: DEFAULT_LOAD_BUFFER,
            drop_radius: DEFAULT_DROP_RADIUS,
            stagger_step: Duration::from_millis(DEFAULT_STAGGER_STEP_MS),
            enabled: true,
        }
    }
}

impl PrefetchConfig {
    /// Creates a new configuration, clamping values to their valid ranges.
    #[must_use]
    pub fn new(load_buffer: usize, drop_radius: usize, stagger_step: Duration) -> Self {
        let load_buffer = load_buffer.min(MAX_LOAD_BUFFER);
        Self {
            load_buffer,
            drop_radius: drop_radius.clamp(load_buffer.max(1), MAX_DROP_RADIUS),
            stagger_step: stagger_step.min(Duration::from_millis(MAX_STAGGER_STEP_MS)),
            enabled: true,
        }
    }

    /// Creates a configuration that only ever loads the active item.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Delay for a load `distance` steps away from the active item.
    #[must_use]
    pub fn delay_for(&self, distance: usize) -> Duration {
        self.stagger_step
            .saturating_mul(u32::try_from(distance).unwrap_or(u32::MAX))
    }
}

/// A load the runtime should start after `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: ItemId,
    /// Distance from the active index.
    pub distance: usize,
    pub delay: Duration,
}

/// Outcome of a window refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowPlan {
    /// Index the window was computed for.
    pub active_index: usize,
    /// Whether the requested active id was absent and index 0 was used.
    pub fell_back: bool,
    /// Loads to start, closest first.
    pub loads: Vec<LoadRequest>,
    /// Items unloaded by this refresh.
    pub evicted: Vec<ItemId>,
    /// What the carousel should render now.
    pub visible: VisibleWindow,
}

/// Statistics about prefetch engine activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    /// Load requests issued.
    pub requests: u64,
    /// Completions applied to the store.
    pub resolutions: u64,
    /// Completions dropped because the id left the context.
    pub stale_resolutions: u64,
    /// Loads that failed.
    pub failures: u64,
    /// Resources unloaded for being outside the retained window.
    pub evictions: u64,
}

/// Decides which items of the context are loaded, evicted and rendered.
pub struct PrefetchEngine {
    config: PrefetchConfig,
    in_flight: HashSet<ItemId>,
    failed: HashSet<ItemId>,
    stats: PrefetchStats,
}

impl PrefetchEngine {
    #[must_use]
    pub fn new(config: PrefetchConfig) -> Self {
        Self {
            config,
            in_flight: HashSet::new(),
            failed: HashSet::new(),
            stats: PrefetchStats::default(),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PrefetchConfig::default())
    }

    /// Recomputes the windows around `active` and applies evictions.
    ///
    /// An `active` id missing from the context falls back to index 0 and sets
    /// [`WindowPlan::fell_back`]; `None` means no active item yet and uses
    /// index 0 silently.
    pub fn refresh(
        &mut self,
        store: &mut NavigationContextStore,
        active: Option<&ItemId>,
    ) -> WindowPlan {
        let len = store.len();
        if len == 0 {
            return WindowPlan::default();
        }

        let (active_index, fell_back) = match active {
            Some(id) => match store.index_of(id) {
                Some(index) => (index, false),
                None => (0, true),
            },
            None => (0, false),
        };

        let loads = self.plan_loads(store, active_index);
        let evicted = self.evict_outside(store, active_index);

        WindowPlan {
            active_index,
            fell_back,
            loads,
            evicted,
            visible: VisibleWindow::from_store(store, active_index),
        }
    }

    fn plan_loads(&mut self, store: &NavigationContextStore, active_index: usize) -> Vec<LoadRequest> {
        let buffer = if self.config.enabled {
            self.config.load_buffer
        } else {
            0
        };

        let mut candidates: Vec<(usize, usize)> = loaded_range(active_index, store.len(), buffer)
            .map(|i| (i.abs_diff(active_index), i))
            .collect();
        // Closest first; ties keep navigation order (previous before next).
        candidates.sort_unstable();

        let mut loads = Vec::new();
        for (distance, index) in candidates {
            let Some(item) = store.item_at(index) else {
                continue;
            };
            if item.is_loaded() || self.in_flight.contains(&item.id) || self.failed.contains(&item.id)
            {
                continue;
            }
            self.in_flight.insert(item.id.clone());
            self.stats.requests += 1;
            loads.push(LoadRequest {
                id: item.id.clone(),
                distance,
                delay: self.config.delay_for(distance),
            });
        }
        loads
    }

    fn evict_outside(&mut self, store: &mut NavigationContextStore, active_index: usize) -> Vec<ItemId> {
        let retained = retained_range(active_index, store.len(), self.config.drop_radius);
        let doomed: Vec<ItemId> = store
            .iter()
            .enumerate()
            .filter(|(i, item)| !retained.contains(i) && item.is_loaded())
            .map(|(_, item)| item.id.clone())
            .collect();

        for id in &doomed {
            if store.unload(id) {
                self.stats.evictions += 1;
            }
        }
        doomed
    }

    /// Applies a successful load. Returns `false` for a stale completion.
    pub fn on_loaded(
        &mut self,
        store: &mut NavigationContextStore,
        id: &ItemId,
        resource: Arc<ImageResource>,
    ) -> bool {
        self.in_flight.remove(id);
        self.failed.remove(id);
        if store.resolve(id, resource) {
            self.stats.resolutions += 1;
            true
        } else {
            self.stats.stale_resolutions += 1;
            false
        }
    }

    /// Records a failed load. The id is not requested again until
    /// [`PrefetchEngine::retry`] or [`PrefetchEngine::forget_failures`].
    pub fn on_failed(&mut self, id: &ItemId) {
        self.in_flight.remove(id);
        self.failed.insert(id.clone());
        self.stats.failures += 1;
    }

    /// Allows a previously failed id to be requested again.
    pub fn retry(&mut self, id: &ItemId) -> bool {
        self.failed.remove(id)
    }

    /// Forgets every recorded failure, e.g. after the context was replaced.
    pub fn forget_failures(&mut self) {
        self.failed.clear();
    }

    #[must_use]
    pub fn is_in_flight(&self, id: &ItemId) -> bool {
        self.in_flight.contains(id)
    }

    #[must_use]
    pub fn has_failed(&self, id: &ItemId) -> bool {
        self.failed.contains(id)
    }

    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.stats
    }

    #[must_use]
    pub fn config(&self) -> &PrefetchConfig {
        &self.config
    }
}

impl std::fmt::Debug for PrefetchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefetchEngine")
            .field("enabled", &self.config.enabled)
            .field("load_buffer", &self.config.load_buffer)
            .field("drop_radius", &self.config.drop_radius)
            .field("in_flight", &self.in_flight.len())
            .field("failed", &self.failed.len())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation::NavigationContextItem;

    fn store_with(ids: &[&str]) -> NavigationContextStore {
        let mut store = NavigationContextStore::new();
        store.set_context(
            ids.iter()
                .map(|id| NavigationContextItem::new(*id, format!("t/{id}")))
                .collect(),
        );
        store
    }

    fn resource(id: &str) -> Arc<ImageResource> {
        Arc::new(ImageResource::new(ItemId::from(id), format!("f/{id}"), 4, 3))
    }

    fn ids(loads: &[LoadRequest]) -> Vec<&str> {
        loads.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn middle_item_requests_self_then_neighbors_staggered() {
        let mut store = store_with(&["A", "B", "C"]);
        let mut engine = PrefetchEngine::with_defaults();

        let plan = engine.refresh(&mut store, Some(&ItemId::from("B")));

        assert_eq!(ids(&plan.loads), vec!["B", "A", "C"]);
        assert_eq!(plan.loads[0].delay, Duration::ZERO);
        assert_eq!(plan.loads[1].delay, Duration::from_millis(100));
        assert_eq!(plan.loads[2].delay, Duration::from_millis(100));
        let visible: Vec<_> = plan.visible.ids().map(ItemId::as_str).collect();
        assert_eq!(visible, vec!["A", "B", "C"]);
    }

    #[test]
    fn in_flight_items_are_not_requested_twice() {
        let mut store = store_with(&["A", "B", "C"]);
        let mut engine = PrefetchEngine::with_defaults();

        engine.refresh(&mut store, Some(&ItemId::from("B")));
        let again = engine.refresh(&mut store, Some(&ItemId::from("B")));

        assert!(again.loads.is_empty());
        assert_eq!(engine.in_flight_count(), 3);
        assert_eq!(engine.stats().requests, 3);
    }

    #[test]
    fn far_items_are_evicted_but_active_never() {
        let mut store = store_with(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let mut engine = PrefetchEngine::with_defaults();
        for id in ["A", "D", "G", "H"] {
            store.resolve(&ItemId::from(id), resource(id));
        }

        let plan = engine.refresh(&mut store, Some(&ItemId::from("D")));

        assert_eq!(plan.evicted, vec![ItemId::from("H")]);
        assert!(store.get(&ItemId::from("A")).unwrap().is_loaded());
        assert!(store.get(&ItemId::from("G")).unwrap().is_loaded());
        assert!(store.get(&ItemId::from("D")).unwrap().is_loaded());
        assert!(!store.get(&ItemId::from("H")).unwrap().is_loaded());
        assert_eq!(engine.stats().evictions, 1);
    }

    #[test]
    fn eviction_never_unloads_active_index_for_any_position() {
        let names: Vec<String> = (0..10).map(|i| format!("i{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        for active in &refs {
            let mut store = store_with(&refs);
            for id in &refs {
                store.resolve(&ItemId::from(*id), resource(id));
            }
            let mut engine = PrefetchEngine::with_defaults();
            engine.refresh(&mut store, Some(&ItemId::from(*active)));
            assert!(store.get(&ItemId::from(*active)).unwrap().is_loaded());
        }
    }

    #[test]
    fn missing_active_falls_back_to_first_item() {
        let mut store = store_with(&["A", "B", "C"]);
        let mut engine = PrefetchEngine::with_defaults();

        let plan = engine.refresh(&mut store, Some(&ItemId::from("nope")));

        assert!(plan.fell_back);
        assert_eq!(plan.active_index, 0);
        assert_eq!(ids(&plan.loads), vec!["A", "B"]);
        assert_eq!(plan.visible.len(), 2);
    }

    #[test]
    fn single_item_context_has_no_neighbors() {
        let mut store = store_with(&["only"]);
        let mut engine = PrefetchEngine::with_defaults();

        let plan = engine.refresh(&mut store, Some(&ItemId::from("only")));

        assert_eq!(ids(&plan.loads), vec!["only"]);
        assert_eq!(plan.visible.len(), 1);
    }

    #[test]
    fn empty_context_yields_empty_plan() {
        let mut store = NavigationContextStore::new();
        let mut engine = PrefetchEngine::with_defaults();
        let plan = engine.refresh(&mut store, Some(&ItemId::from("x")));
        assert_eq!(plan, WindowPlan::default());
    }

    #[test]
    fn stale_resolution_is_counted_and_dropped() {
        let mut store = store_with(&["A"]);
        let mut engine = PrefetchEngine::with_defaults();
        engine.refresh(&mut store, Some(&ItemId::from("A")));
        store.set_context(vec![NavigationContextItem::new("Z", "t/Z")]);

        assert!(!engine.on_loaded(&mut store, &ItemId::from("A"), resource("A")));
        assert_eq!(engine.stats().stale_resolutions, 1);
        assert!(!engine.is_in_flight(&ItemId::from("A")));
    }

    #[test]
    fn resolution_outside_loaded_window_still_applies() {
        let mut store = store_with(&["A", "B", "C", "D", "E"]);
        let mut engine = PrefetchEngine::with_defaults();
        engine.refresh(&mut store, Some(&ItemId::from("A")));
        engine.refresh(&mut store, Some(&ItemId::from("D")));

        assert!(engine.on_loaded(&mut store, &ItemId::from("B"), resource("B")));
        assert!(store.get(&ItemId::from("B")).unwrap().is_loaded());
    }

    #[test]
    fn failed_items_wait_for_retry() {
        let mut store = store_with(&["A", "B"]);
        let mut engine = PrefetchEngine::with_defaults();
        engine.refresh(&mut store, Some(&ItemId::from("A")));
        engine.on_failed(&ItemId::from("A"));

        let plan = engine.refresh(&mut store, Some(&ItemId::from("A")));
        assert!(plan.loads.is_empty());
        assert!(engine.has_failed(&ItemId::from("A")));

        assert!(engine.retry(&ItemId::from("A")));
        let plan = engine.refresh(&mut store, Some(&ItemId::from("A")));
        assert_eq!(ids(&plan.loads), vec!["A"]);
    }

    #[test]
    fn disabled_prefetch_loads_only_active_item() {
        let mut store = store_with(&["A", "B", "C"]);
        let mut engine = PrefetchEngine::new(PrefetchConfig::disabled());
        let plan = engine.refresh(&mut store, Some(&ItemId::from("B")));
        assert_eq!(ids(&plan.loads), vec!["B"]);
    }

    #[test]
    fn config_clamps_values() {
        let config = PrefetchConfig::new(99, 0, Duration::from_secs(60));
        assert_eq!(config.load_buffer, MAX_LOAD_BUFFER);
        assert_eq!(config.drop_radius, MAX_LOAD_BUFFER);
        assert_eq!(config.stagger_step, Duration::from_millis(MAX_STAGGER_STEP_MS));

        let config = PrefetchConfig::new(1, 1_000, Duration::ZERO);
        assert_eq!(config.drop_radius, MAX_DROP_RADIUS);
    }

    #[test]
    fn delay_grows_with_distance() {
        let config = PrefetchConfig::default();
        assert_eq!(config.delay_for(0), Duration::ZERO);
        assert_eq!(config.delay_for(2), Duration::from_millis(200));
    }
}

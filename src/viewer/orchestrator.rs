// SPDX-License-Identifier: MPL-2.0
//! Viewer state and its update function.

use super::{Effect, Message, ViewerConfig, ViewerStatus};
use crate::application::port::{Notice, Page};
use crate::application::query::NavigationContextStore;
use crate::diagnostics::{
    DiagnosticsHandle, ErrorEvent, ErrorType, ViewerAction, WarningEvent, WarningType,
};
use crate::domain::gesture::{GestureContext, SwipeDirection};
use crate::domain::navigation::{ContextEdge, ImageResource, ItemId, NavigationContextItem, PageCursor};
use crate::error::{LoadFailure, ViewerError};
use crate::gesture::{
    GestureHost, GestureOutcome, GesturePhase, HostResponse, PointerId, ScrollRegion,
};
use crate::animation::{AnimationCompletion, Transform, TransitionKind};
use crate::media::prefetch::{PrefetchEngine, PrefetchStats};
use crate::media::window::VisibleWindow;
use iced_core::{Point, Size};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Pointer input routed to the viewer's own dismissal gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Down {
        pointer: PointerId,
        position: Point,
        /// Scrollable regions between the touch target and the viewer,
        /// innermost first.
        scroll_chain: Vec<ScrollRegion>,
    },
    Move {
        pointer: PointerId,
        position: Point,
    },
    Up {
        pointer: PointerId,
    },
    Cancel {
        pointer: PointerId,
    },
}

/// Cursor and request state of one end of the context.
#[derive(Debug, Clone, Default)]
struct EdgePaging {
    cursor: Option<PageCursor>,
    in_flight: bool,
}

/// The full-screen viewer.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    store: NavigationContextStore,
    engine: PrefetchEngine,
    active: Option<ItemId>,
    window: VisibleWindow,
    status: ViewerStatus,
    start_paging: EdgePaging,
    end_paging: EdgePaging,
    gesture: GestureHost,
    /// Completion of the exit animation of a committed swipe, until the
    /// runtime takes it.
    exit: Option<AnimationCompletion>,
    /// Items with a failure notice the user has not seen cleared yet.
    reported: HashSet<ItemId>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Viewer {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            store: NavigationContextStore::new(),
            engine: PrefetchEngine::new(config.prefetch),
            active: None,
            window: VisibleWindow::default(),
            status: ViewerStatus::Ready,
            start_paging: EdgePaging::default(),
            end_paging: EdgePaging::default(),
            gesture: GestureHost::new(GestureContext::Viewer, config.gesture, config.animation),
            exit: None,
            reported: HashSet::new(),
            diagnostics: None,
        }
    }

    /// Routes diagnostic events to `handle`.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Replaces the navigation context.
    pub fn set_navigation_context(&mut self, items: Vec<NavigationContextItem>) -> Vec<Effect> {
        self.update(Message::SetContext(items))
    }

    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        if self.status == ViewerStatus::Dismissed {
            return Vec::new();
        }

        match message {
            Message::SetContext(items) => self.replace_context(items),
            Message::SetPageCursor { edge, cursor } => {
                self.paging_mut(edge).cursor = cursor;
                self.refresh(true)
            }
            Message::ActiveChanged(id) => {
                if self.active.as_ref() == Some(&id) {
                    return Vec::new();
                }
                self.activate(id)
            }
            Message::SlideCommitted(id) => self.activate(id),
            Message::ImageLoaded { id, result } => match result {
                Ok(resource) => self.image_loaded(id, resource),
                Err(failure) => self.image_failed(failure),
            },
            Message::PageLoaded {
                edge,
                generation,
                result,
            } => self.page_loaded(edge, generation, result),
            Message::RetryLoad(id) => {
                if self.engine.retry(&id) {
                    if self.status == (ViewerStatus::LoadFailed { id }) {
                        self.status = ViewerStatus::Ready;
                    }
                    self.refresh(false)
                } else {
                    Vec::new()
                }
            }
            Message::Close => self.begin_dismissal(std::time::Duration::ZERO),
            Message::DismissDue => {
                self.status = ViewerStatus::Dismissed;
                self.exit = None;
                self.log_action(ViewerAction::Dismissed);
                tracing::info!("viewer dismissed");
                vec![Effect::Teardown]
            }
        }
    }

    fn replace_context(&mut self, items: Vec<NavigationContextItem>) -> Vec<Effect> {
        let update = self.store.set_context(items);
        if !update.skipped.is_empty() {
            tracing::warn!(
                count = update.skipped.len(),
                "duplicate ids in navigation context, keeping first occurrences"
            );
            self.log_warning(
                WarningType::DuplicateItem,
                format!("{} duplicate ids dropped", update.skipped.len()),
            );
        }
        tracing::debug!(
            len = update.added,
            preserved = update.preserved,
            "navigation context replaced"
        );
        self.log_action(ViewerAction::ContextReplaced { len: update.added });

        // Pages requested for the previous context are dropped on arrival.
        self.start_paging = EdgePaging::default();
        self.end_paging = EdgePaging::default();
        self.engine.forget_failures();
        self.reported.retain(|id| self.store.get(id).is_some());
        if matches!(self.status, ViewerStatus::LoadFailed { .. }) {
            self.status = ViewerStatus::Ready;
        }
        self.refresh(true)
    }

    fn activate(&mut self, id: ItemId) -> Vec<Effect> {
        if matches!(self.status, ViewerStatus::Dismissing) {
            return Vec::new();
        }
        if matches!(&self.status, ViewerStatus::LoadFailed { id: failed } if *failed != id) {
            self.status = ViewerStatus::Ready;
        }
        self.active = Some(id);
        let effects = self.refresh(true);
        self.log_action(ViewerAction::Navigate {
            index: self.window.active_index,
            len: self.store.len(),
        });
        effects
    }

    fn image_loaded(&mut self, id: ItemId, resource: ImageResource) -> Vec<Effect> {
        if !self.engine.on_loaded(&mut self.store, &id, Arc::new(resource)) {
            tracing::debug!(%id, "dropping load result for an item no longer in context");
            return Vec::new();
        }
        if self.status == (ViewerStatus::LoadFailed { id: id.clone() }) {
            self.status = ViewerStatus::Ready;
        }
        let recovered = self.reported.remove(&id);
        let mut effects = self.refresh(false);
        if recovered {
            effects.push(Effect::Notify(Notice::LoadRecovered { id }));
        }
        effects
    }

    fn image_failed(&mut self, failure: LoadFailure) -> Vec<Effect> {
        self.engine.on_failed(&failure.id);
        if self.store.get(&failure.id).is_none() {
            tracing::debug!(id = %failure.id, "ignoring failure for an item no longer in context");
            return Vec::new();
        }

        let id = failure.id.clone();
        let active = self.active.as_ref() == Some(&id);
        let error = ViewerError::LoadFailure(failure.clone());
        tracing::warn!(%error, active, "image load failed");
        if let Some(handle) = &self.diagnostics {
            handle.log_error(ErrorEvent::new(ErrorType::LoadFailure, error.to_string()));
        }

        self.reported.insert(id.clone());
        if active {
            self.status = ViewerStatus::LoadFailed { id };
        }
        vec![Effect::Notify(Notice::LoadFailed { failure, active })]
    }

    fn page_loaded(
        &mut self,
        edge: ContextEdge,
        generation: u64,
        result: Result<Page, LoadFailure>,
    ) -> Vec<Effect> {
        if generation != self.store.generation() {
            tracing::debug!(?edge, "dropping page fetched for a replaced context");
            return Vec::new();
        }
        self.paging_mut(edge).in_flight = false;

        match result {
            Ok(page) => {
                self.paging_mut(edge).cursor = page.next_cursor;
                let update = self.store.extend(edge, page.items);
                if !update.skipped.is_empty() {
                    self.log_warning(
                        WarningType::DuplicateItem,
                        format!("{} paged ids already in context", update.skipped.len()),
                    );
                }
                tracing::debug!(?edge, added = update.added, "page merged into context");
                self.log_action(ViewerAction::ContextExtended {
                    added: update.added,
                    at_start: edge == ContextEdge::Start,
                });
                // An empty page must not immediately trigger another request.
                self.refresh(update.added > 0)
            }
            Err(failure) => {
                tracing::warn!(?edge, %failure, "page fetch failed");
                self.log_warning(WarningType::PageFetchFailed, failure.to_string());
                vec![Effect::Notify(Notice::PageFetchFailed { edge, failure })]
            }
        }
    }

    /// Recomputes the windows around the active item. Nothing is loaded or
    /// rendered before the first item is activated.
    fn refresh(&mut self, page: bool) -> Vec<Effect> {
        if self.active.is_none() {
            return Vec::new();
        }
        let plan = self.engine.refresh(&mut self.store, self.active.as_ref());

        if plan.fell_back {
            if let Some(missing) = self.active.take() {
                let error = ViewerError::ItemNotFound(missing);
                tracing::warn!(%error, "falling back to the first item");
                self.log_warning(WarningType::ItemNotFound, error.to_string());
            }
            self.active = self.store.item_at(0).map(|item| item.id.clone());
        }
        if !plan.evicted.is_empty() {
            tracing::trace!(count = plan.evicted.len(), "unloaded items outside retained window");
        }

        let mut effects: Vec<Effect> = plan.loads.into_iter().map(Effect::Load).collect();
        self.window = plan.visible;
        effects.push(Effect::Render(self.window.clone()));

        if page && !self.store.is_empty() {
            effects.extend(self.request_pages(plan.active_index));
        }
        effects
    }

    fn request_pages(&mut self, active_index: usize) -> Vec<Effect> {
        let last = self.store.len() - 1;
        let margin = self.config.near_end_margin;
        let generation = self.store.generation();
        let mut effects = Vec::new();

        for (edge, distance) in [
            (ContextEdge::Start, active_index),
            (ContextEdge::End, last.saturating_sub(active_index)),
        ] {
            if distance > margin {
                continue;
            }
            let paging = self.paging_mut(edge);
            if paging.in_flight {
                continue;
            }
            let Some(cursor) = paging.cursor.clone() else {
                continue;
            };
            paging.in_flight = true;
            self.log_action(ViewerAction::PageRequested {
                at_start: edge == ContextEdge::Start,
            });
            effects.push(Effect::FetchPage {
                edge,
                cursor,
                generation,
            });
        }
        effects
    }

    fn paging_mut(&mut self, edge: ContextEdge) -> &mut EdgePaging {
        match edge {
            ContextEdge::Start => &mut self.start_paging,
            ContextEdge::End => &mut self.end_paging,
        }
    }

    fn begin_dismissal(&mut self, after: std::time::Duration) -> Vec<Effect> {
        if matches!(self.status, ViewerStatus::Dismissing) {
            return Vec::new();
        }
        self.status = ViewerStatus::Dismissing;
        vec![Effect::Dismiss { after }]
    }

    // =========================================================================
    // Gesture
    // =========================================================================

    /// Feeds pointer input to the viewer's dismissal gesture.
    pub fn pointer(&mut self, input: PointerInput, now: Instant) -> (HostResponse, Vec<Effect>) {
        if self.status == ViewerStatus::Dismissed {
            return (HostResponse::default(), Vec::new());
        }

        let was_rejected = matches!(self.gesture.phase(), GesturePhase::Rejected { .. });
        let response = match input {
            PointerInput::Down {
                pointer,
                position,
                scroll_chain,
            } => self.gesture.touch_start(pointer, position, &scroll_chain),
            PointerInput::Move { pointer, position } => self.gesture.touch_move(pointer, position),
            PointerInput::Up { pointer } => self.gesture.touch_end(pointer, now),
            PointerInput::Cancel { pointer } => self.gesture.touch_cancel(pointer, now),
        };

        if let GesturePhase::Rejected { direction } = *self.gesture.phase() {
            if !was_rejected {
                self.gesture_rejected(direction);
            }
        }

        let effects = self.gesture_outcome(response.outcome);
        (response, effects)
    }

    /// Cancels a swipe in progress, e.g. when the host enters fullscreen.
    pub fn external_cancel(&mut self, now: Instant) -> (HostResponse, Vec<Effect>) {
        if self.status == ViewerStatus::Dismissed {
            return (HostResponse::default(), Vec::new());
        }
        let response = self.gesture.external_cancel(now);
        let effects = self.gesture_outcome(response.outcome);
        (response, effects)
    }

    fn gesture_rejected(&self, actual: SwipeDirection) {
        let error = ViewerError::InvalidGestureContext {
            expected: self.gesture.context().accepted_direction(),
            actual,
        };
        tracing::debug!(%error, "swipe left to native handling");
        self.log_action(ViewerAction::GestureRejected { direction: actual });
    }

    fn gesture_outcome(&mut self, outcome: Option<GestureOutcome>) -> Vec<Effect> {
        match outcome {
            Some(GestureOutcome::Commit(direction)) => {
                tracing::debug!(%direction, "dismiss swipe committed");
                self.log_action(ViewerAction::GestureCommitted { direction });
                let effects = self.begin_dismissal(self.config.dismiss_delay);
                if !effects.is_empty() {
                    self.exit = self.gesture.take_completion();
                }
                effects
            }
            Some(GestureOutcome::Cancel) => {
                self.log_action(ViewerAction::GestureCancelled);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Advances the gesture animations. Returns the transition that finished
    /// during this tick.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionKind> {
        self.gesture.tick(now)
    }

    /// Takes the completion signal of the exit animation of the committed
    /// swipe. `None` when the dismissal did not come from a swipe.
    pub fn take_exit_completion(&mut self) -> Option<AnimationCompletion> {
        self.exit.take()
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.gesture.set_viewport(viewport);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn status(&self) -> &ViewerStatus {
        &self.status
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&ItemId> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &NavigationContextStore {
        &self.store
    }

    /// The window last sent to the render surface.
    #[must_use]
    pub fn visible_window(&self) -> &VisibleWindow {
        &self.window
    }

    #[must_use]
    pub fn transform(&self, now: Instant) -> Transform {
        self.gesture.transform(now)
    }

    #[must_use]
    pub fn gesture(&self) -> &GestureHost {
        &self.gesture
    }

    #[must_use]
    pub fn prefetch_stats(&self) -> PrefetchStats {
        self.engine.stats()
    }

    #[must_use]
    pub fn page_cursor(&self, edge: ContextEdge) -> Option<&PageCursor> {
        match edge {
            ContextEdge::Start => self.start_paging.cursor.as_ref(),
            ContextEdge::End => self.end_paging.cursor.as_ref(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    fn log_action(&self, action: ViewerAction) {
        if let Some(handle) = &self.diagnostics {
            handle.log_action(action);
        }
    }

    fn log_warning(&self, warning_type: WarningType, message: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(WarningEvent::new(warning_type, message));
        }
    }
}

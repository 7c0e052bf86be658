// SPDX-License-Identifier: MPL-2.0
//! Gesture host: the touch handlers a container registers.
//!
//! A [`GestureHost`] glues the scroll guard, the motion sampler, the
//! classifier and the animation driver together for one container. Every
//! handler runs synchronously and tells the caller whether the platform's
//! default handling of the pointer sequence must be suppressed.

use super::classifier::{GestureClassifier, GestureConfig, GestureEvent, GesturePhase, GestureSignal, SwipeState};
use super::sampler::{MotionSampler, PointerId};
use super::scroll_guard::{touch_allowed, ScrollRegion};
use crate::animation::{AnimationCompletion, AnimationConfig, AnimationDriver, Transform, TransitionKind};
use crate::application::port::{OverlayEvent, OverlayId, OverlayKind, OverlayObserver};
use crate::domain::gesture::{GestureContext, SwipeDirection};
use iced_core::{Point, Size};
use std::collections::HashMap;
use std::time::Instant;

/// Terminal outcome of a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Close/advance toward `direction`; the exit animation has started.
    Commit(SwipeDirection),
    /// Revert to neutral; the snap-back animation has started.
    Cancel,
}

/// What a touch handler asks of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostResponse {
    /// Prevent the platform's default handling (scrolling, text selection)
    /// for this event.
    pub suppress_default: bool,
    pub outcome: Option<GestureOutcome>,
}

impl HostResponse {
    fn pass_through() -> Self {
        Self::default()
    }
}

/// Touch handling for one gesture container.
#[derive(Debug)]
pub struct GestureHost {
    classifier: GestureClassifier,
    sampler: MotionSampler,
    driver: AnimationDriver,
    completion: Option<AnimationCompletion>,
}

impl GestureHost {
    #[must_use]
    pub fn new(context: GestureContext, gesture: GestureConfig, animation: AnimationConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(context, gesture),
            sampler: MotionSampler::new(),
            driver: AnimationDriver::new(animation, gesture.threshold),
            completion: None,
        }
    }

    /// Pointer pressed. `scroll_chain` lists the scrollable regions between
    /// the touch target and this container, innermost first.
    pub fn touch_start(
        &mut self,
        pointer: PointerId,
        position: Point,
        scroll_chain: &[ScrollRegion],
    ) -> HostResponse {
        if self.classifier.phase().is_animating() || self.sampler.is_tracking() {
            return HostResponse::pass_through();
        }

        let direction = self.classifier.context().accepted_direction();
        if !touch_allowed(scroll_chain, direction) {
            tracing::trace!(%direction, "touch starts in scrollable content, left to native scrolling");
            return HostResponse::pass_through();
        }

        self.sampler.begin(pointer, position);
        self.classifier.handle(GestureEvent::Start(position));
        HostResponse::pass_through()
    }

    /// Pointer moved.
    pub fn touch_move(&mut self, pointer: PointerId, position: Point) -> HostResponse {
        let Some(sample) = self.sampler.sample(pointer, position) else {
            return HostResponse::pass_through();
        };

        match self.classifier.handle(GestureEvent::Move(sample.position)) {
            Some(
                GestureSignal::Locked {
                    direction,
                    progress,
                }
                | GestureSignal::Progress {
                    direction,
                    progress,
                },
            ) => self.driver.follow(direction, progress),
            Some(GestureSignal::Rejected { expected, actual }) => {
                tracing::debug!(%expected, %actual, "swipe direction not accepted by container");
            }
            _ => {}
        }

        HostResponse {
            suppress_default: self.classifier.phase().suppresses_default(),
            outcome: None,
        }
    }

    /// Pointer released.
    pub fn touch_end(&mut self, pointer: PointerId, now: Instant) -> HostResponse {
        if !self.sampler.end(pointer) {
            return HostResponse::pass_through();
        }
        self.finish(GestureEvent::End, now)
    }

    /// Pointer sequence cancelled by the platform.
    pub fn touch_cancel(&mut self, pointer: PointerId, now: Instant) -> HostResponse {
        if !self.sampler.end(pointer) {
            return HostResponse::pass_through();
        }
        self.finish(GestureEvent::ExternalCancel, now)
    }

    /// Cancels a gesture in progress for a reason outside the pointer
    /// stream, such as entering fullscreen. Progress stops updating at once
    /// and the snap-back starts.
    pub fn external_cancel(&mut self, now: Instant) -> HostResponse {
        self.sampler.reset();
        self.finish(GestureEvent::ExternalCancel, now)
    }

    fn finish(&mut self, event: GestureEvent, now: Instant) -> HostResponse {
        let suppress_default = self.classifier.phase().suppresses_default();
        let outcome = match self.classifier.handle(event) {
            Some(GestureSignal::Commit { direction }) => {
                self.completion = Some(self.driver.start_exit(direction, now));
                Some(GestureOutcome::Commit(direction))
            }
            Some(GestureSignal::Cancel { direction, progress }) => {
                tracing::debug!(%direction, progress, "swipe cancelled");
                self.completion = Some(self.driver.start_snap_back(direction, now));
                Some(GestureOutcome::Cancel)
            }
            _ => None,
        };

        HostResponse {
            suppress_default,
            outcome,
        }
    }

    /// Advances animations. Returns the transition that finished during this
    /// tick; the host accepts new gestures again afterwards.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionKind> {
        let finished = self.driver.tick(now)?;
        self.classifier.handle(GestureEvent::AnimationFinished);
        Some(finished)
    }

    /// Takes the completion signal of the transition started by the last
    /// commit or cancel.
    pub fn take_completion(&mut self) -> Option<AnimationCompletion> {
        self.completion.take()
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.driver.set_viewport(viewport);
    }

    #[must_use]
    pub fn transform(&self, now: Instant) -> Transform {
        self.driver.transform(now)
    }

    #[must_use]
    pub fn phase(&self) -> &GesturePhase {
        self.classifier.phase()
    }

    #[must_use]
    pub fn swipe_state(&self) -> SwipeState {
        self.classifier.swipe_state()
    }

    #[must_use]
    pub fn context(&self) -> GestureContext {
        self.classifier.context()
    }

    /// Whether an exit or snap-back is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.classifier.phase().is_animating()
    }
}

/// Gesture hosts attached to the overlays currently open.
///
/// Registered with an [`OverlayNotifier`](crate::application::port::OverlayNotifier);
/// a host is attached when an overlay opens and dropped when it closes.
#[derive(Debug, Default)]
pub struct GestureAttachments {
    gesture: GestureConfig,
    animation: AnimationConfig,
    hosts: HashMap<OverlayId, GestureHost>,
}

impl GestureAttachments {
    #[must_use]
    pub fn new(gesture: GestureConfig, animation: AnimationConfig) -> Self {
        Self {
            gesture,
            animation,
            hosts: HashMap::new(),
        }
    }

    #[must_use]
    pub fn host(&self, id: OverlayId) -> Option<&GestureHost> {
        self.hosts.get(&id)
    }

    pub fn host_mut(&mut self, id: OverlayId) -> Option<&mut GestureHost> {
        self.hosts.get_mut(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    fn attach(&mut self, id: OverlayId, kind: OverlayKind) {
        let host = GestureHost::new(kind.gesture_context(), self.gesture, self.animation);
        if self.hosts.insert(id, host).is_some() {
            tracing::debug!(overlay = id.0, "overlay reopened, gesture host replaced");
        }
    }
}

impl OverlayObserver for GestureAttachments {
    fn on_overlay_event(&mut self, event: &OverlayEvent) {
        match *event {
            OverlayEvent::Opened { id, kind } => self.attach(id, kind),
            OverlayEvent::Closed { id } => {
                self.hosts.remove(&id);
            }
        }
    }
}

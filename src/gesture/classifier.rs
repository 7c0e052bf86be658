// SPDX-License-Identifier: MPL-2.0
//! Swipe classification and the commit/cancel state machine.
//!
//! The recognizer is a plain value, [`GesturePhase`], advanced by the pure
//! [`transition`] function. Every phase has a defined transition for every
//! event; events that make no sense in a phase leave it unchanged.
//!
//! ```text
//! Idle ──Start──▶ Sampling ──slop exceeded──▶ Locked ──End──▶ Committed ─┐
//!                    │                          │                        │
//!                    │                          └──End/Cancel──▶ Cancelled ┤
//!                    └──wrong direction──▶ Rejected ──End──▶ Idle          │
//!                                                                         │
//! Idle ◀──────────────────── AnimationFinished ───────────────────────────┘
//! ```
//!
//! Commit is distance based: release commits only when progress reached
//! `1.0` and the pointer was still moving along the locked direction.

use crate::domain::gesture::{
    AxisSlop, GestureContext, ReversalRecovery, SwipeDirection, SwipeThreshold,
};
use iced_core::{Point, Vector};

/// Recognizer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureConfig {
    /// Horizontal motion required before a direction is decided.
    pub min_horizontal: AxisSlop,
    /// Vertical motion required before a direction is decided.
    pub min_vertical: AxisSlop,
    /// Distance that equals full progress.
    pub threshold: SwipeThreshold,
    /// Forward motion that restores a maintained direction after a reversal.
    pub reversal_recovery: ReversalRecovery,
}

impl GestureConfig {
    /// Creates a configuration, clamping each distance to its valid range.
    #[must_use]
    pub fn new(min_horizontal: f32, min_vertical: f32, threshold: f32, recovery: f32) -> Self {
        Self {
            min_horizontal: AxisSlop::new(min_horizontal),
            min_vertical: AxisSlop::new(min_vertical),
            threshold: SwipeThreshold::new(threshold),
            reversal_recovery: ReversalRecovery::new(recovery),
        }
    }

    fn exceeds_slop(&self, total: Vector) -> bool {
        self.min_horizontal.exceeded_by(total.x) || self.min_vertical.exceeded_by(total.y)
    }
}

/// Snapshot of a gesture as seen by the animation layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeState {
    pub is_active: bool,
    pub direction: Option<SwipeDirection>,
    pub progress: f32,
    pub direction_maintained: bool,
}

/// A gesture locked onto the accepted direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockedGesture {
    pub direction: SwipeDirection,
    pub origin: Point,
    pub last: Point,
    pub progress: f32,
    pub direction_maintained: bool,
    /// Forward motion accumulated since the last reversal.
    pub recovered: f32,
}

impl LockedGesture {
    fn advance(mut self, position: Point, config: &GestureConfig) -> Self {
        let step = self.direction.along(position.x - self.last.x, position.y - self.last.y);
        let total = self
            .direction
            .along(position.x - self.origin.x, position.y - self.origin.y);

        if step < 0.0 {
            self.direction_maintained = false;
            self.recovered = 0.0;
        } else if step > 0.0 && !self.direction_maintained {
            self.recovered += step;
            if self.recovered >= config.reversal_recovery.value() {
                self.direction_maintained = true;
                self.recovered = 0.0;
            }
        }

        self.progress = config.threshold.progress(total);
        self.last = position;
        self
    }

    fn commits(&self) -> bool {
        self.direction_maintained && self.progress >= 1.0
    }
}

/// Recognizer phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pointer down, direction not decidable yet.
    Sampling { origin: Point, last: Point },
    /// Locked onto the direction the context accepts. Default handling of
    /// the pointer sequence is suppressed from here on.
    Locked(LockedGesture),
    /// Locked onto a direction the context does not accept. Ignored until
    /// release; native handling proceeds.
    Rejected { direction: SwipeDirection },
    /// Exit animation running.
    Committed { direction: SwipeDirection },
    /// Snap-back animation running.
    Cancelled { direction: SwipeDirection },
}

impl GesturePhase {
    /// Whether default handling of the current pointer sequence is
    /// suppressed.
    #[must_use]
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    /// Whether an exit or snap-back animation owns the gesture.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Committed { .. } | Self::Cancelled { .. })
    }

    #[must_use]
    pub fn swipe_state(&self) -> SwipeState {
        match self {
            Self::Locked(locked) => SwipeState {
                is_active: true,
                direction: Some(locked.direction),
                progress: locked.progress,
                direction_maintained: locked.direction_maintained,
            },
            Self::Sampling { .. } => SwipeState {
                is_active: true,
                ..SwipeState::default()
            },
            _ => SwipeState::default(),
        }
    }
}

/// Input to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Primary pointer pressed.
    Start(Point),
    /// Primary pointer moved.
    Move(Point),
    /// Primary pointer released.
    End,
    /// Host-initiated cancellation (pointer cancel, entering fullscreen).
    ExternalCancel,
    /// The exit or snap-back animation completed.
    AnimationFinished,
}

/// Signal emitted by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSignal {
    /// Direction accepted; suppress default handling from now on.
    Locked {
        direction: SwipeDirection,
        progress: f32,
    },
    /// Direction not accepted by the context.
    Rejected {
        expected: SwipeDirection,
        actual: SwipeDirection,
    },
    /// Live-follow update while locked.
    Progress {
        direction: SwipeDirection,
        progress: f32,
    },
    /// Start the exit animation.
    Commit { direction: SwipeDirection },
    /// Start the snap-back animation from `progress`.
    Cancel {
        direction: SwipeDirection,
        progress: f32,
    },
    /// Animation done, recognizer idle again.
    Settled,
}

/// Result of [`transition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub phase: GesturePhase,
    pub output: Option<GestureSignal>,
}

impl Transition {
    fn quiet(phase: GesturePhase) -> Self {
        Self {
            phase,
            output: None,
        }
    }

    fn emit(phase: GesturePhase, signal: GestureSignal) -> Self {
        Self {
            phase,
            output: Some(signal),
        }
    }
}

/// Advances the recognizer by one event.
#[must_use]
pub fn transition(
    phase: GesturePhase,
    event: GestureEvent,
    context: GestureContext,
    config: &GestureConfig,
) -> Transition {
    use GestureEvent as E;
    use GesturePhase as P;

    match (phase, event) {
        (P::Idle, E::Start(position)) => Transition::quiet(P::Sampling {
            origin: position,
            last: position,
        }),

        (P::Sampling { origin, .. }, E::Move(position)) => {
            let total = position - origin;
            if !config.exceeds_slop(total) {
                return Transition::quiet(P::Sampling {
                    origin,
                    last: position,
                });
            }
            // Exceeding the slop guarantees a non-zero delta.
            let Some(direction) = SwipeDirection::from_delta(total.x, total.y) else {
                return Transition::quiet(P::Sampling {
                    origin,
                    last: position,
                });
            };

            let expected = context.accepted_direction();
            if direction != expected {
                return Transition::emit(
                    P::Rejected { direction },
                    GestureSignal::Rejected {
                        expected,
                        actual: direction,
                    },
                );
            }

            let progress = config.threshold.progress(direction.along(total.x, total.y));
            Transition::emit(
                P::Locked(LockedGesture {
                    direction,
                    origin,
                    last: position,
                    progress,
                    direction_maintained: true,
                    recovered: 0.0,
                }),
                GestureSignal::Locked {
                    direction,
                    progress,
                },
            )
        }

        (P::Sampling { .. } | P::Rejected { .. }, E::End | E::ExternalCancel) => {
            Transition::quiet(P::Idle)
        }

        (P::Locked(locked), E::Move(position)) => {
            let locked = locked.advance(position, config);
            Transition::emit(
                P::Locked(locked),
                GestureSignal::Progress {
                    direction: locked.direction,
                    progress: locked.progress,
                },
            )
        }

        (P::Locked(locked), E::End) if locked.commits() => Transition::emit(
            P::Committed {
                direction: locked.direction,
            },
            GestureSignal::Commit {
                direction: locked.direction,
            },
        ),

        (P::Locked(locked), E::End | E::ExternalCancel) => Transition::emit(
            P::Cancelled {
                direction: locked.direction,
            },
            GestureSignal::Cancel {
                direction: locked.direction,
                progress: locked.progress,
            },
        ),

        (P::Committed { .. } | P::Cancelled { .. }, E::AnimationFinished) => {
            Transition::emit(P::Idle, GestureSignal::Settled)
        }

        (phase, _) => Transition::quiet(phase),
    }
}

/// Owner of a recognizer phase for one gesture context.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    context: GestureContext,
    config: GestureConfig,
    phase: GesturePhase,
}

impl GestureClassifier {
    #[must_use]
    pub fn new(context: GestureContext, config: GestureConfig) -> Self {
        Self {
            context,
            config,
            phase: GesturePhase::Idle,
        }
    }

    /// Applies an event and returns the emitted signal, if any.
    pub fn handle(&mut self, event: GestureEvent) -> Option<GestureSignal> {
        let next = transition(self.phase, event, self.context, &self.config);
        self.phase = next.phase;
        next.output
    }

    #[must_use]
    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    #[must_use]
    pub fn context(&self) -> GestureContext {
        self.context
    }

    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    #[must_use]
    pub fn swipe_state(&self) -> SwipeState {
        self.phase.swipe_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gesture::PanelAnchor;

    const START_PANEL: GestureContext = GestureContext::Panel(PanelAnchor::Start);

    fn run(context: GestureContext, events: &[GestureEvent]) -> (GesturePhase, Vec<GestureSignal>) {
        let mut classifier = GestureClassifier::new(context, GestureConfig::default());
        let signals = events
            .iter()
            .filter_map(|event| classifier.handle(*event))
            .collect();
        (*classifier.phase(), signals)
    }

    fn at(dx: f32, dy: f32) -> GestureEvent {
        GestureEvent::Move(Point::new(200.0 + dx, 300.0 + dy))
    }

    fn start() -> GestureEvent {
        GestureEvent::Start(Point::new(200.0, 300.0))
    }

    #[test]
    fn small_motion_stays_in_sampling() {
        let (phase, signals) = run(START_PANEL, &[start(), at(-10.0, 5.0), at(-15.0, -15.0)]);
        assert!(matches!(phase, GesturePhase::Sampling { .. }));
        assert!(signals.is_empty());
    }

    #[test]
    fn release_before_lock_returns_to_idle_silently() {
        let (phase, signals) = run(START_PANEL, &[start(), at(-5.0, 0.0), GestureEvent::End]);
        assert_eq!(phase, GesturePhase::Idle);
        assert!(signals.is_empty());
    }

    #[test]
    fn left_panel_swipe_past_threshold_commits() {
        let (phase, signals) = run(
            START_PANEL,
            &[start(), at(-20.0, 2.0), at(-150.0, 4.0), GestureEvent::End],
        );

        assert_eq!(
            signals[0],
            GestureSignal::Locked {
                direction: SwipeDirection::Left,
                progress: 0.25,
            }
        );
        let GestureSignal::Progress { progress, .. } = signals[1] else {
            panic!("expected progress, got {:?}", signals[1]);
        };
        assert!((progress - 1.875).abs() < 1e-6);
        assert_eq!(
            signals[2],
            GestureSignal::Commit {
                direction: SwipeDirection::Left
            }
        );
        assert_eq!(
            phase,
            GesturePhase::Committed {
                direction: SwipeDirection::Left
            }
        );
    }

    #[test]
    fn reversal_before_release_cancels_despite_peak_progress() {
        let (phase, signals) = run(
            START_PANEL,
            &[
                start(),
                at(-20.0, 2.0),
                at(-150.0, 4.0),
                at(-40.0, 4.0),
                GestureEvent::End,
            ],
        );

        assert!(matches!(
            signals.last(),
            Some(GestureSignal::Cancel {
                direction: SwipeDirection::Left,
                ..
            })
        ));
        assert!(matches!(phase, GesturePhase::Cancelled { .. }));
    }

    #[test]
    fn overshoot_and_bounce_cancels_even_above_threshold() {
        let mut classifier = GestureClassifier::new(START_PANEL, GestureConfig::default());
        for event in [start(), at(-20.0, 0.0), at(-200.0, 0.0), at(-195.0, 0.0)] {
            classifier.handle(event);
        }

        let state = classifier.swipe_state();
        assert!(state.progress >= 1.0);
        assert!(!state.direction_maintained);
        assert!(matches!(
            classifier.handle(GestureEvent::End),
            Some(GestureSignal::Cancel { .. })
        ));
    }

    #[test]
    fn forward_motion_restores_maintained_after_recovery_distance() {
        let mut classifier = GestureClassifier::new(START_PANEL, GestureConfig::default());
        for event in [start(), at(-20.0, 0.0), at(-120.0, 0.0), at(-115.0, 0.0)] {
            classifier.handle(event);
        }
        assert!(!classifier.swipe_state().direction_maintained);

        classifier.handle(at(-120.0, 0.0));
        assert!(!classifier.swipe_state().direction_maintained);

        classifier.handle(at(-126.0, 0.0));
        assert!(classifier.swipe_state().direction_maintained);
        assert!(matches!(
            classifier.handle(GestureEvent::End),
            Some(GestureSignal::Commit { .. })
        ));
    }

    #[test]
    fn perpendicular_motion_does_not_break_maintained() {
        let mut classifier = GestureClassifier::new(GestureContext::Viewer, GestureConfig::default());
        for event in [start(), at(0.0, 30.0), at(25.0, 30.0), at(-25.0, 30.0)] {
            classifier.handle(event);
        }
        assert!(classifier.swipe_state().direction_maintained);
    }

    #[test]
    fn wrong_direction_is_rejected_and_never_suppressed() {
        let mut classifier = GestureClassifier::new(
            GestureContext::Panel(PanelAnchor::End),
            GestureConfig::default(),
        );
        classifier.handle(start());
        let signal = classifier.handle(at(-30.0, 0.0));

        assert_eq!(
            signal,
            Some(GestureSignal::Rejected {
                expected: SwipeDirection::Right,
                actual: SwipeDirection::Left,
            })
        );
        assert!(!classifier.phase().suppresses_default());
        assert_eq!(classifier.handle(at(200.0, 0.0)), None);
        assert_eq!(classifier.handle(GestureEvent::End), None);
        assert_eq!(*classifier.phase(), GesturePhase::Idle);
    }

    #[test]
    fn dominant_axis_decides_lock_with_ties_horizontal() {
        let (phase, _) = run(START_PANEL, &[start(), at(-16.0, 16.0)]);
        assert!(matches!(
            phase,
            GesturePhase::Locked(LockedGesture {
                direction: SwipeDirection::Left,
                ..
            })
        ));

        let (phase, _) = run(START_PANEL, &[start(), at(-5.0, 16.0)]);
        assert_eq!(
            phase,
            GesturePhase::Rejected {
                direction: SwipeDirection::Down
            }
        );
    }

    #[test]
    fn progress_is_monotonic_while_moving_forward() {
        let mut classifier = GestureClassifier::new(GestureContext::Viewer, GestureConfig::default());
        classifier.handle(start());
        let mut previous = 0.0_f32;
        for step in 1..60 {
            let y = 16.0 + step as f32 * 3.0;
            let x = if step % 2 == 0 { 4.0 } else { -4.0 };
            classifier.handle(at(x, y));
            let state = classifier.swipe_state();
            assert!(state.direction_maintained);
            assert!(state.progress >= previous);
            previous = state.progress;
        }
    }

    #[test]
    fn reversal_never_flips_direction_and_only_lowers_progress() {
        let mut classifier = GestureClassifier::new(GestureContext::Viewer, GestureConfig::default());
        for event in [start(), at(0.0, 20.0), at(0.0, 100.0)] {
            classifier.handle(event);
        }
        let peak = classifier.swipe_state().progress;

        for y in [80.0, 40.0, 0.0, -60.0] {
            classifier.handle(at(0.0, y));
            let state = classifier.swipe_state();
            assert_eq!(state.direction, Some(SwipeDirection::Down));
            assert!(state.progress <= peak);
        }
        assert_eq!(classifier.swipe_state().progress, 0.0);
    }

    #[test]
    fn maintained_false_with_full_progress_always_cancels() {
        for overshoot in [80.0_f32, 100.0, 160.0, 320.0] {
            let mut classifier =
                GestureClassifier::new(GestureContext::Viewer, GestureConfig::default());
            for event in [start(), at(0.0, 20.0), at(0.0, overshoot + 5.0), at(0.0, overshoot)] {
                classifier.handle(event);
            }
            assert!(classifier.swipe_state().progress >= 1.0);
            assert!(matches!(
                classifier.handle(GestureEvent::End),
                Some(GestureSignal::Cancel { .. })
            ));
        }
    }

    #[test]
    fn external_cancel_stops_progress_and_snaps_back() {
        let mut classifier = GestureClassifier::new(GestureContext::Viewer, GestureConfig::default());
        for event in [start(), at(0.0, 20.0), at(0.0, 60.0)] {
            classifier.handle(event);
        }

        let signal = classifier.handle(GestureEvent::ExternalCancel);
        assert!(matches!(signal, Some(GestureSignal::Cancel { progress, .. }) if progress > 0.0));

        assert_eq!(classifier.handle(at(0.0, 200.0)), None);
        assert_eq!(classifier.handle(GestureEvent::End), None);
        assert!(classifier.phase().is_animating());
    }

    #[test]
    fn inputs_are_ignored_until_animation_finishes() {
        let mut classifier = GestureClassifier::new(START_PANEL, GestureConfig::default());
        for event in [start(), at(-20.0, 0.0), at(-100.0, 0.0), GestureEvent::End] {
            classifier.handle(event);
        }

        assert_eq!(classifier.handle(start()), None);
        assert!(classifier.phase().is_animating());

        assert_eq!(
            classifier.handle(GestureEvent::AnimationFinished),
            Some(GestureSignal::Settled)
        );
        assert_eq!(*classifier.phase(), GesturePhase::Idle);
        classifier.handle(start());
        assert!(matches!(classifier.phase(), GesturePhase::Sampling { .. }));
    }

    #[test]
    fn config_new_clamps_distances() {
        let config = GestureConfig::new(0.0, 1_000.0, 5.0, -1.0);
        assert_eq!(config.min_horizontal.value(), 4.0);
        assert_eq!(config.min_vertical.value(), 64.0);
        assert_eq!(config.threshold.value(), 20.0);
        assert_eq!(config.reversal_recovery.value(), 0.0);
    }
}

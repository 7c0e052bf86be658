// SPDX-License-Identifier: MPL-2.0
//! Animation driver for swiped content.
//!
//! The driver is sampled, never scheduled: the host calls
//! [`AnimationDriver::tick`] once per frame with the frame time and reads
//! [`AnimationDriver::transform`]. There are no timers, so nothing keeps
//! mutating the transform after a transition was replaced.
//!
//! # Invariants
//!
//! - Each started transition reports exactly one [`AnimationOutcome`]:
//!   `Finished` when a tick observes its end, `Superseded` when another
//!   transition starts first, the driver is reset, or it is dropped
//! - Live-follow updates are ignored while a timed transition runs

use super::{AnimationConfig, Transform, TransitionKind};
use crate::domain::gesture::{SwipeAxis, SwipeDirection, SwipeThreshold};
use iced_core::{Size, Vector};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// How a timed transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Finished(TransitionKind),
    Superseded(TransitionKind),
}

/// Receiving end of a transition's completion signal.
pub type AnimationCompletion = oneshot::Receiver<AnimationOutcome>;

/// A running exit or snap-back, expressed as a distance along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedTransition {
    pub kind: TransitionKind,
    pub direction: SwipeDirection,
    pub from: f32,
    pub to: f32,
    pub started: Instant,
    pub duration: Duration,
    pub easing: super::Easing,
}

impl TimedTransition {
    /// Normalized elapsed time, `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Distance along the direction at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> f32 {
        let t = self.easing.apply(self.fraction(now));
        self.from + (self.to - self.from) * t
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.fraction(now) >= 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Rest,
    Following {
        direction: SwipeDirection,
        distance: f32,
    },
    Running(TimedTransition),
    /// Exit finished; content stays off-screen until reset.
    Gone {
        direction: SwipeDirection,
        distance: f32,
    },
}

/// Turns gesture progress and release decisions into transforms.
#[derive(Debug)]
pub struct AnimationDriver {
    config: AnimationConfig,
    threshold: SwipeThreshold,
    viewport: Size,
    motion: Motion,
    completion: Option<(TransitionKind, oneshot::Sender<AnimationOutcome>)>,
}

impl AnimationDriver {
    #[must_use]
    pub fn new(config: AnimationConfig, threshold: SwipeThreshold) -> Self {
        Self {
            config,
            threshold,
            viewport: Size::new(0.0, 0.0),
            motion: Motion::Rest,
            completion: None,
        }
    }

    /// Sets the size of the area the content exits from.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Live-follow update while the finger is down.
    pub fn follow(&mut self, direction: SwipeDirection, progress: f32) {
        if matches!(self.motion, Motion::Running(_)) {
            return;
        }
        self.motion = Motion::Following {
            direction,
            distance: progress.max(0.0) * self.threshold.value(),
        };
    }

    /// Starts the exit toward `direction`.
    pub fn start_exit(&mut self, direction: SwipeDirection, now: Instant) -> AnimationCompletion {
        self.start(TransitionKind::Exit, direction, now)
    }

    /// Starts the return to neutral.
    pub fn start_snap_back(
        &mut self,
        direction: SwipeDirection,
        now: Instant,
    ) -> AnimationCompletion {
        self.start(TransitionKind::SnapBack, direction, now)
    }

    fn start(
        &mut self,
        kind: TransitionKind,
        direction: SwipeDirection,
        now: Instant,
    ) -> AnimationCompletion {
        let from = self.distance(now);
        let to = match kind {
            TransitionKind::Exit => self.exit_distance(direction).max(from),
            TransitionKind::SnapBack => 0.0,
        };

        self.supersede();
        self.motion = Motion::Running(TimedTransition {
            kind,
            direction,
            from,
            to,
            started: now,
            duration: self.config.duration(kind),
            easing: self.config.easing(kind),
        });

        let (sender, receiver) = oneshot::channel();
        self.completion = Some((kind, sender));
        receiver
    }

    /// Advances the running transition. Returns its kind when it finished
    /// during this tick.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionKind> {
        let Motion::Running(transition) = self.motion else {
            return None;
        };
        if !transition.is_finished(now) {
            return None;
        }

        self.motion = match transition.kind {
            TransitionKind::Exit => Motion::Gone {
                direction: transition.direction,
                distance: transition.to,
            },
            TransitionKind::SnapBack => Motion::Rest,
        };
        if let Some((kind, sender)) = self.completion.take() {
            // The receiver may have been dropped; nobody is waiting then.
            let _ = sender.send(AnimationOutcome::Finished(kind));
        }
        Some(transition.kind)
    }

    /// Returns to neutral immediately, superseding any running transition.
    pub fn reset(&mut self) {
        self.supersede();
        self.motion = Motion::Rest;
    }

    fn supersede(&mut self) {
        if let Some((kind, sender)) = self.completion.take() {
            let _ = sender.send(AnimationOutcome::Superseded(kind));
        }
    }

    /// Transform of the content at `now`.
    #[must_use]
    pub fn transform(&self, now: Instant) -> Transform {
        let Some(direction) = self.direction() else {
            return Transform::IDENTITY;
        };
        let distance = self.distance(now);
        let (ux, uy) = direction.unit();
        let reference = self.exit_distance(direction);
        Transform {
            offset: Vector::new(ux * distance, uy * distance),
            backdrop_opacity: 1.0 - (distance / reference).clamp(0.0, 1.0),
        }
    }

    /// The running transition, if any.
    #[must_use]
    pub fn running(&self) -> Option<&TimedTransition> {
        match &self.motion {
            Motion::Running(transition) => Some(transition),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running().is_some()
    }

    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    fn direction(&self) -> Option<SwipeDirection> {
        match self.motion {
            Motion::Rest => None,
            Motion::Following { direction, .. } | Motion::Gone { direction, .. } => {
                Some(direction)
            }
            Motion::Running(transition) => Some(transition.direction),
        }
    }

    fn distance(&self, now: Instant) -> f32 {
        match self.motion {
            Motion::Rest => 0.0,
            Motion::Following { distance, .. } | Motion::Gone { distance, .. } => distance,
            Motion::Running(transition) => transition.sample(now),
        }
    }

    /// Distance that takes the content fully out of the viewport. Falls
    /// back to twice the threshold before the viewport is known.
    fn exit_distance(&self, direction: SwipeDirection) -> f32 {
        let extent = match direction.axis() {
            SwipeAxis::Horizontal => self.viewport.width,
            SwipeAxis::Vertical => self.viewport.height,
        };
        extent.max(self.threshold.value() * 2.0)
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.supersede();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot::error::TryRecvError;

    fn driver() -> AnimationDriver {
        let mut driver = AnimationDriver::new(AnimationConfig::default(), SwipeThreshold::new(80.0));
        driver.set_viewport(Size::new(400.0, 800.0));
        driver
    }

    #[test]
    fn follow_maps_progress_to_offset() {
        let mut driver = driver();
        let now = Instant::now();

        driver.follow(SwipeDirection::Down, 0.5);
        let transform = driver.transform(now);

        assert_eq!(transform.offset, Vector::new(0.0, 40.0));
        assert!((transform.backdrop_opacity - 0.95).abs() < 1e-6);
    }

    #[test]
    fn exit_runs_to_viewport_edge_and_completes_once() {
        let mut driver = driver();
        let start = Instant::now();
        driver.follow(SwipeDirection::Left, 1.5);

        let mut completion = driver.start_exit(SwipeDirection::Left, start);
        assert_eq!(driver.transform(start).offset, Vector::new(-120.0, 0.0));
        assert_eq!(driver.tick(start + Duration::from_millis(100)), None);
        assert_eq!(completion.try_recv(), Err(TryRecvError::Empty));

        let end = start + Duration::from_millis(250);
        assert_eq!(driver.tick(end), Some(TransitionKind::Exit));
        assert_eq!(
            completion.try_recv(),
            Ok(AnimationOutcome::Finished(TransitionKind::Exit))
        );
        assert_eq!(driver.transform(end).offset, Vector::new(-400.0, 0.0));
        assert_eq!(driver.transform(end).backdrop_opacity, 0.0);
        assert_eq!(driver.tick(end + Duration::from_secs(1)), None);
    }

    #[test]
    fn snap_back_returns_to_identity() {
        let mut driver = driver();
        let start = Instant::now();
        driver.follow(SwipeDirection::Down, 0.75);

        let mut completion = driver.start_snap_back(SwipeDirection::Down, start);
        let mid = driver.transform(start + Duration::from_millis(100)).offset.y;
        assert!(mid > 0.0 && mid < 60.0);

        assert_eq!(
            driver.tick(start + Duration::from_millis(200)),
            Some(TransitionKind::SnapBack)
        );
        assert!(driver.transform(start + Duration::from_millis(200)).is_identity());
        assert_eq!(
            completion.try_recv(),
            Ok(AnimationOutcome::Finished(TransitionKind::SnapBack))
        );
    }

    #[test]
    fn starting_a_new_transition_supersedes_the_old_one() {
        let mut driver = driver();
        let start = Instant::now();
        driver.follow(SwipeDirection::Down, 1.0);

        let mut first = driver.start_snap_back(SwipeDirection::Down, start);
        let _second = driver.start_exit(SwipeDirection::Down, start + Duration::from_millis(50));

        assert_eq!(
            first.try_recv(),
            Ok(AnimationOutcome::Superseded(TransitionKind::SnapBack))
        );
    }

    #[test]
    fn follow_is_ignored_while_running() {
        let mut driver = driver();
        let start = Instant::now();
        driver.follow(SwipeDirection::Down, 1.0);
        let _completion = driver.start_snap_back(SwipeDirection::Down, start);

        driver.follow(SwipeDirection::Down, 3.0);
        assert!(driver.is_running());
        assert_eq!(driver.transform(start).offset, Vector::new(0.0, 80.0));
    }

    #[test]
    fn dropping_the_driver_releases_waiters() {
        let mut driver = driver();
        let mut completion = driver.start_snap_back(SwipeDirection::Up, Instant::now());
        drop(driver);
        assert_eq!(
            completion.try_recv(),
            Ok(AnimationOutcome::Superseded(TransitionKind::SnapBack))
        );
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut driver = AnimationDriver::new(
            AnimationConfig::new(Duration::ZERO, Duration::ZERO),
            SwipeThreshold::default(),
        );
        let now = Instant::now();
        let _completion = driver.start_exit(SwipeDirection::Right, now);
        assert_eq!(driver.tick(now), Some(TransitionKind::Exit));
    }
}

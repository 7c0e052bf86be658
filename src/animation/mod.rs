// SPDX-License-Identifier: MPL-2.0
//! Gesture animations.
//!
//! Maps swipe progress to a transform while the finger is down, then runs
//! one of two timed transitions after release: the exit toward the swipe
//! direction on commit, or the snap-back to neutral on cancel. Completion of
//! a transition is reported once through a [`tokio::sync::oneshot`] channel.

mod driver;

pub use driver::{AnimationCompletion, AnimationDriver, AnimationOutcome, TimedTransition};

use crate::config::MAX_ANIMATION_DURATION_MS;
use crate::config::{DEFAULT_EXIT_DURATION_MS, DEFAULT_SNAP_BACK_DURATION_MS};
use iced_core::Vector;
use std::time::Duration;

/// Easing curve applied to a transition's normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Accelerating; used for the exit so the image leaves decisively.
    EaseIn,
    /// Decelerating; used for the snap-back so the image settles softly.
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Applies the curve to `t`, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// Which timed transition is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Leaving the screen after a commit.
    Exit,
    /// Returning to neutral after a cancel.
    SnapBack,
}

/// Animation timings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub exit_duration: Duration,
    pub snap_back_duration: Duration,
    pub exit_easing: Easing,
    pub snap_back_easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            exit_duration: Duration::from_millis(DEFAULT_EXIT_DURATION_MS),
            snap_back_duration: Duration::from_millis(DEFAULT_SNAP_BACK_DURATION_MS),
            exit_easing: Easing::EaseIn,
            snap_back_easing: Easing::EaseOut,
        }
    }
}

impl AnimationConfig {
    /// Creates a configuration with default easings, capping durations.
    #[must_use]
    pub fn new(exit_duration: Duration, snap_back_duration: Duration) -> Self {
        let max = Duration::from_millis(MAX_ANIMATION_DURATION_MS);
        Self {
            exit_duration: exit_duration.min(max),
            snap_back_duration: snap_back_duration.min(max),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn duration(&self, kind: TransitionKind) -> Duration {
        match kind {
            TransitionKind::Exit => self.exit_duration,
            TransitionKind::SnapBack => self.snap_back_duration,
        }
    }

    #[must_use]
    pub fn easing(&self, kind: TransitionKind) -> Easing {
        match kind {
            TransitionKind::Exit => self.exit_easing,
            TransitionKind::SnapBack => self.snap_back_easing,
        }
    }
}

/// Visual state of the swiped content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation of the content, in logical pixels.
    pub offset: Vector,
    /// Opacity of the backdrop behind the content.
    pub backdrop_opacity: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        offset: Vector::new(0.0, 0.0),
        backdrop_opacity: 1.0,
    };

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

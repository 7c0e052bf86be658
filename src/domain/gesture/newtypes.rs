// SPDX-License-Identifier: MPL-2.0
//! Gesture newtypes.
//!
//! Type-safe wrappers for gesture distances in logical pixels, clamped to
//! sane ranges so that a hand-edited settings file cannot produce a swipe
//! that commits on jitter or never commits at all.

// =============================================================================
// Bounds
// =============================================================================

/// Gesture distance bounds, in logical pixels.
pub mod gesture_bounds {
    /// Minimum commit threshold.
    pub const MIN_THRESHOLD: f32 = 20.0;
    /// Maximum commit threshold.
    pub const MAX_THRESHOLD: f32 = 400.0;
    /// Default commit threshold.
    pub const DEFAULT_THRESHOLD: f32 = 80.0;
    /// Minimum lock slop per axis.
    pub const MIN_SLOP: f32 = 4.0;
    /// Maximum lock slop per axis.
    pub const MAX_SLOP: f32 = 64.0;
    /// Default lock slop per axis.
    pub const DEFAULT_SLOP: f32 = 15.0;
    /// Minimum recovery distance after a reversal.
    pub const MIN_RECOVERY: f32 = 0.0;
    /// Maximum recovery distance after a reversal.
    pub const MAX_RECOVERY: f32 = 100.0;
    /// Default recovery distance after a reversal.
    pub const DEFAULT_RECOVERY: f32 = 10.0;
}

fn clamp_finite(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

// =============================================================================
// SwipeThreshold
// =============================================================================

/// Distance along the locked direction that corresponds to `progress == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThreshold(f32);

impl SwipeThreshold {
    /// Creates a new threshold, clamping the value to the valid range.
    #[must_use]
    pub fn new(px: f32) -> Self {
        Self(clamp_finite(
            px,
            gesture_bounds::MIN_THRESHOLD,
            gesture_bounds::MAX_THRESHOLD,
            gesture_bounds::DEFAULT_THRESHOLD,
        ))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Normalizes a distance into progress (`0.0` and up).
    #[must_use]
    pub fn progress(self, distance: f32) -> f32 {
        distance.max(0.0) / self.0
    }
}

impl Default for SwipeThreshold {
    fn default() -> Self {
        Self(gesture_bounds::DEFAULT_THRESHOLD)
    }
}

// =============================================================================
// AxisSlop
// =============================================================================

/// Motion that must be exceeded on an axis before a direction is decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSlop(f32);

impl AxisSlop {
    #[must_use]
    pub fn new(px: f32) -> Self {
        Self(clamp_finite(
            px,
            gesture_bounds::MIN_SLOP,
            gesture_bounds::MAX_SLOP,
            gesture_bounds::DEFAULT_SLOP,
        ))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the absolute delta exceeds this slop.
    #[must_use]
    pub fn exceeded_by(self, delta: f32) -> bool {
        delta.abs() > self.0
    }
}

impl Default for AxisSlop {
    fn default() -> Self {
        Self(gesture_bounds::DEFAULT_SLOP)
    }
}

// =============================================================================
// ReversalRecovery
// =============================================================================

/// Forward motion needed after a reversal before the direction counts as
/// maintained again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReversalRecovery(f32);

impl ReversalRecovery {
    #[must_use]
    pub fn new(px: f32) -> Self {
        Self(clamp_finite(
            px,
            gesture_bounds::MIN_RECOVERY,
            gesture_bounds::MAX_RECOVERY,
            gesture_bounds::DEFAULT_RECOVERY,
        ))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ReversalRecovery {
    fn default() -> Self {
        Self(gesture_bounds::DEFAULT_RECOVERY)
    }
}

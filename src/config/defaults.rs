// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Navigation**: window sizes, prefetch stagger, paging margin
//! - **Gesture**: lock slop, commit threshold, reversal recovery
//! - **Animation**: exit, snap-back and dismissal timings

use crate::domain::gesture::gesture_bounds;

// ==========================================================================
// Navigation Defaults
// ==========================================================================

/// Neighbors loaded on each side of the active item.
pub const DEFAULT_LOAD_BUFFER: usize = 1;

/// Maximum neighbors loaded on each side of the active item.
pub const MAX_LOAD_BUFFER: usize = 3;

/// Distance beyond which loaded items are unloaded.
pub const DEFAULT_DROP_RADIUS: usize = 3;

/// Largest accepted drop radius.
pub const MAX_DROP_RADIUS: usize = 16;

/// Delay added per step of distance from the active item before a load starts.
pub const DEFAULT_STAGGER_STEP_MS: u64 = 100;

/// Largest accepted stagger step.
pub const MAX_STAGGER_STEP_MS: u64 = 1_000;

/// Distance from either end of the context at which another page is requested.
pub const DEFAULT_NEAR_END_MARGIN: usize = 2;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Horizontal motion required before a direction is decided.
pub const DEFAULT_MIN_HORIZONTAL_PX: f32 = gesture_bounds::DEFAULT_SLOP;

/// Vertical motion required before a direction is decided.
pub const DEFAULT_MIN_VERTICAL_PX: f32 = gesture_bounds::DEFAULT_SLOP;

/// Distance along the locked direction that equals full progress.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = gesture_bounds::DEFAULT_THRESHOLD;

/// Forward motion needed after a reversal to count as maintained again.
pub const DEFAULT_REVERSAL_RECOVERY_PX: f32 = gesture_bounds::DEFAULT_RECOVERY;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Duration of the exit animation after a commit.
pub const DEFAULT_EXIT_DURATION_MS: u64 = 250;

/// Duration of the snap-back animation after a cancel.
pub const DEFAULT_SNAP_BACK_DURATION_MS: u64 = 200;

/// Delay between the end of the exit animation and the dismissal callback.
pub const DEFAULT_DISMISS_DELAY_MS: u64 = 300;

/// Upper bound for any animation duration.
pub const MAX_ANIMATION_DURATION_MS: u64 = 2_000;

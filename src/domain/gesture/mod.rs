// SPDX-License-Identifier: MPL-2.0
//! Gesture domain types.
//!
//! - [`SwipeDirection`] and [`SwipeAxis`]: the four recognizable directions
//! - [`GestureContext`] / [`PanelAnchor`]: which single direction a container accepts
//! - [`SwipeThreshold`], [`AxisSlop`], [`ReversalRecovery`]: validated distances

mod direction;
mod newtypes;

pub use direction::{GestureContext, PanelAnchor, SwipeAxis, SwipeDirection};
pub use newtypes::{gesture_bounds, AxisSlop, ReversalRecovery, SwipeThreshold};

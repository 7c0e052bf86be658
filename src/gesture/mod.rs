// SPDX-License-Identifier: MPL-2.0
//! Swipe gesture recognition.
//!
//! Raw pointer events flow through four stages:
//!
//! 1. [`scroll_guard`] decides whether a touch may become a swipe at all
//! 2. [`sampler`] follows the primary pointer and produces deltas
//! 3. [`classifier`] locks a direction, tracks progress and decides
//!    commit or cancel on release
//! 4. [`host`] wires the stages to the animation driver and exposes the
//!    touch handlers a container registers

pub mod classifier;
pub mod host;
pub mod sampler;
pub mod scroll_guard;

pub use classifier::{
    transition, GestureClassifier, GestureConfig, GestureEvent, GesturePhase, GestureSignal,
    LockedGesture, SwipeState, Transition,
};
pub use host::{GestureAttachments, GestureHost, GestureOutcome, HostResponse};
pub use sampler::{MotionSample, MotionSampler, PointerId};
pub use scroll_guard::{touch_allowed, ScrollRegion};

// SPDX-License-Identifier: MPL-2.0
//! Windowing over the navigation context.
//!
//! [`window`] holds the pure index arithmetic, [`prefetch`] the engine that
//! turns an active position into load requests and evictions.

pub mod prefetch;
pub mod window;

pub use prefetch::{LoadRequest, PrefetchConfig, PrefetchEngine, PrefetchStats, WindowPlan};
pub use window::VisibleWindow;

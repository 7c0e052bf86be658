// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording what the viewer did and what went wrong.
//!
//! Viewer activity (navigation, context changes, gesture outcomes) and soft
//! errors (unknown active ids, failed loads) are captured as timestamped
//! events in a bounded store that evicts the oldest first. Producers hold a
//! cheap, non-blocking [`DiagnosticsHandle`]; the owner drains pending events
//! with [`DiagnosticsCollector::process_pending`].
//!
//! Log lines go through `tracing`; this store is the structured record that
//! tests and bug reports inspect.

mod collector;
mod events;

pub use collector::{capacity_bounds, BufferCapacity, DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, ErrorEvent, ErrorType, ViewerAction, WarningEvent,
    WarningType,
};

// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for viewer activity tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::domain::gesture::SwipeDirection;

/// Viewer activity worth keeping in the diagnostic record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewerAction {
    // ==========================================================================
    // Navigation
    // ==========================================================================
    /// The active item moved to a new position.
    Navigate {
        /// Resolved index of the active item.
        index: usize,
        /// Number of items in the context.
        len: usize,
    },

    /// The whole context was replaced.
    ContextReplaced {
        len: usize,
    },

    /// A page was merged at one end of the context.
    ContextExtended {
        /// Items actually added (duplicates are skipped).
        added: usize,
        /// Whether the page was prepended.
        at_start: bool,
    },

    /// A page was requested from the page source.
    PageRequested {
        at_start: bool,
    },

    // ==========================================================================
    // Gestures
    // ==========================================================================
    /// A swipe committed.
    GestureCommitted {
        direction: SwipeDirection,
    },

    /// A locked swipe was cancelled (released short, reversed, or interrupted).
    GestureCancelled,

    /// A swipe locked onto a direction the container does not accept.
    GestureRejected {
        direction: SwipeDirection,
    },

    /// The viewer was dismissed.
    Dismissed,
}

/// Categories of non-critical issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// The active id did not resolve; the viewer fell back to the first item.
    ItemNotFound,
    /// An incoming context contained the same id twice.
    DuplicateItem,
    /// A page request failed; paging at that edge stops.
    PageFetchFailed,
    Other,
}

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// An image resource failed to load.
    LoadFailure,
    Other,
}

/// A warning with its category and message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// An error with its category and message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
}

impl ErrorEvent {
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock).
    pub timestamp: Instant,
    /// The type and data of the event.
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// Viewer activity.
    Action {
        action: ViewerAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Non-critical warning.
    Warning { event: WarningEvent },

    /// Error surfaced to the user.
    Error { event: ErrorEvent },
}

impl DiagnosticEventKind {
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, DiagnosticEventKind::Warning { .. })
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, DiagnosticEventKind::Error { .. })
    }
}

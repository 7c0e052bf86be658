// SPDX-License-Identifier: MPL-2.0
//! Bounded store of viewer diagnostic events.

use std::collections::VecDeque;

use tokio::sync::mpsc::{self, Receiver, Sender};

use super::{DiagnosticEvent, DiagnosticEventKind, ErrorEvent, ViewerAction, WarningEvent};

/// Events queued between a handle and the collector before new ones are
/// dropped.
const CHANNEL_CAPACITY: usize = 128;

/// Capacity bounds for the event store.
pub mod capacity_bounds {
    pub const MIN: usize = 64;
    pub const MAX: usize = 4096;
    pub const DEFAULT: usize = 512;
}

/// Number of events the collector keeps, clamped to [`capacity_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(capacity_bounds::MIN, capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(capacity_bounds::DEFAULT)
    }
}

/// Non-blocking sender held by the viewer.
///
/// Events are dropped when the channel is full or the collector is gone.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_action(&self, action: ViewerAction) {
        self.send(DiagnosticEventKind::Action {
            action,
            details: None,
        });
    }

    pub fn log_warning(&self, event: WarningEvent) {
        self.send(DiagnosticEventKind::Warning { event });
    }

    pub fn log_error(&self, event: ErrorEvent) {
        self.send(DiagnosticEventKind::Error { event });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        if self.event_tx.try_send(DiagnosticEvent::new(kind)).is_err() {
            tracing::trace!("diagnostic event dropped");
        }
    }
}

/// Owner side of the diagnostics channel.
///
/// Keeps the most recent events, oldest first; [`evicted`](Self::evicted)
/// counts what fell off the front.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    events: VecDeque<DiagnosticEvent>,
    capacity: usize,
    evicted: usize,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            events: VecDeque::with_capacity(capacity.value()),
            capacity: capacity.value(),
            evicted: 0,
            event_rx,
            event_tx,
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves queued events into the store. Returns how many were received.
    pub fn process_pending(&mut self) -> usize {
        let mut received = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            if self.events.len() == self.capacity {
                self.events.pop_front();
                self.evicted += 1;
            }
            self.events.push_back(event);
            received += 1;
        }
        received
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    pub fn actions(&self) -> impl Iterator<Item = &ViewerAction> {
        self.iter().filter_map(|event| match &event.kind {
            DiagnosticEventKind::Action { action, .. } => Some(action),
            _ => None,
        })
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.iter().filter(|e| e.kind.is_warning()).count()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.iter().filter(|e| e.kind.is_error()).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.evicted = 0;
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

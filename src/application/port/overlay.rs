// SPDX-License-Identifier: MPL-2.0
//! Overlay lifecycle notifications.
//!
//! Overlays (the full-screen viewer, sliding panels) are created dynamically
//! by the host. Instead of watching the widget tree for new nodes, the host
//! announces them through an [`OverlayNotifier`]; interested parties, such as
//! the gesture attachment registry, subscribe and react.

use crate::domain::gesture::{GestureContext, PanelAnchor};
use std::cell::RefCell;
use std::rc::Rc;

/// Identifier of an overlay instance, chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// Kind of overlay, which decides the gesture it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// A sliding panel anchored to a screen edge.
    Panel(PanelAnchor),
    /// The full-screen image viewer.
    Viewer,
}

impl OverlayKind {
    #[must_use]
    pub fn gesture_context(self) -> GestureContext {
        match self {
            OverlayKind::Panel(anchor) => GestureContext::Panel(anchor),
            OverlayKind::Viewer => GestureContext::Viewer,
        }
    }
}

/// Lifecycle event of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Opened { id: OverlayId, kind: OverlayKind },
    Closed { id: OverlayId },
}

/// Receiver of overlay lifecycle events.
pub trait OverlayObserver {
    fn on_overlay_event(&mut self, event: &OverlayEvent);
}

/// Token returned by [`OverlayNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&OverlayEvent)>;

/// Fans overlay lifecycle events out to subscribers.
///
/// Single-threaded: listeners run synchronously, in subscription order,
/// inside [`OverlayNotifier::notify`].
#[derive(Default)]
pub struct OverlayNotifier {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl OverlayNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&OverlayEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Registers a shared observer.
    pub fn observe<O>(&mut self, observer: Rc<RefCell<O>>) -> SubscriptionId
    where
        O: OverlayObserver + 'static,
    {
        self.subscribe(move |event| observer.borrow_mut().on_overlay_event(event))
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Delivers an event to every listener.
    pub fn notify(&mut self, event: OverlayEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for OverlayNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Render surface and dismissal ports.

use crate::media::window::VisibleWindow;

/// The carousel the viewer renders into.
///
/// The carousel reports user-driven slide changes back to the viewer as
/// [`Message::ActiveChanged`](crate::viewer::Message::ActiveChanged) and
/// [`Message::SlideCommitted`](crate::viewer::Message::SlideCommitted).
pub trait RenderSurface {
    /// Renders the given window. Called after every change to the visible
    /// items or their load state.
    fn render_window(&mut self, window: &VisibleWindow);
}

/// Host callback tearing the viewer down after a committed dismissal.
///
/// Implementations also remove any backdrop or overlay state the host owns.
pub trait Dismissal {
    fn dismiss(&mut self);
}

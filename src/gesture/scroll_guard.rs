// SPDX-License-Identifier: MPL-2.0
//! Touch-start guard for scrollable content.
//!
//! A swipe-to-close container must not steal scroll gestures: a touch that
//! starts inside scrollable content which can still scroll in the swipe's
//! direction is left to the content.

use crate::domain::gesture::{SwipeAxis, SwipeDirection};
use iced_core::{Size, Vector};

/// Tolerance for fractional scroll offsets reported by the host.
const EDGE_EPSILON: f32 = 1.0;

/// Scroll geometry of one scrollable ancestor of the touch target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    /// Current scroll offset (`scroll_left`, `scroll_top`).
    pub offset: Vector,
    /// Full size of the scrolled content.
    pub content: Size,
    /// Size of the visible viewport.
    pub viewport: Size,
}

impl ScrollRegion {
    #[must_use]
    pub fn new(offset: Vector, content: Size, viewport: Size) -> Self {
        Self {
            offset,
            content,
            viewport,
        }
    }

    /// Whether the content overflows the viewport on `axis`.
    #[must_use]
    pub fn is_scrollable(&self, axis: SwipeAxis) -> bool {
        match axis {
            SwipeAxis::Horizontal => self.content.width - self.viewport.width > EDGE_EPSILON,
            SwipeAxis::Vertical => self.content.height - self.viewport.height > EDGE_EPSILON,
        }
    }

    /// Whether the region sits at the edge a swipe toward `direction`
    /// would be pulling from.
    ///
    /// A left swipe needs the content scrolled fully left, a right swipe
    /// fully right, a down swipe at the top, an up swipe at the bottom.
    #[must_use]
    pub fn is_at_boundary(&self, direction: SwipeDirection) -> bool {
        match direction {
            SwipeDirection::Left => self.offset.x <= EDGE_EPSILON,
            SwipeDirection::Right => {
                self.offset.x + self.viewport.width >= self.content.width - EDGE_EPSILON
            }
            SwipeDirection::Down => self.offset.y <= EDGE_EPSILON,
            SwipeDirection::Up => {
                self.offset.y + self.viewport.height >= self.content.height - EDGE_EPSILON
            }
        }
    }

    /// Whether this region lets a swipe toward `direction` start inside it.
    #[must_use]
    pub fn allows(&self, direction: SwipeDirection) -> bool {
        !self.is_scrollable(direction.axis()) || self.is_at_boundary(direction)
    }
}

/// Returns whether a touch starting inside `ancestors` may become a swipe
/// toward `direction`.
///
/// `ancestors` lists the scrollable regions between the touch target and
/// the gesture container, innermost first.
#[must_use]
pub fn touch_allowed(ancestors: &[ScrollRegion], direction: SwipeDirection) -> bool {
    ancestors.iter().all(|region| region.allows(direction))
}

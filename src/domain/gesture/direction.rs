// SPDX-License-Identifier: MPL-2.0
//! Swipe directions and the containers that accept them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis a swipe moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeAxis {
    Horizontal,
    Vertical,
}

/// Direction of a recognized swipe, in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Classifies a cumulative delta into a direction.
    ///
    /// The larger absolute component picks the axis and its sign picks the
    /// direction. Ties go to the horizontal axis. Returns `None` for a zero
    /// delta.
    #[must_use]
    pub fn from_delta(dx: f32, dy: f32) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(if dx < 0.0 { Self::Left } else { Self::Right })
        } else {
            Some(if dy < 0.0 { Self::Up } else { Self::Down })
        }
    }

    #[must_use]
    pub fn axis(self) -> SwipeAxis {
        match self {
            Self::Left | Self::Right => SwipeAxis::Horizontal,
            Self::Up | Self::Down => SwipeAxis::Vertical,
        }
    }

    /// Signed projection of a delta onto this direction.
    ///
    /// Positive when moving along the direction, negative when moving against
    /// it. The perpendicular component is ignored.
    #[must_use]
    pub fn along(self, dx: f32, dy: f32) -> f32 {
        match self {
            Self::Left => -dx,
            Self::Right => dx,
            Self::Up => -dy,
            Self::Down => dy,
        }
    }

    /// Unit vector `(x, y)` pointing in this direction.
    #[must_use]
    pub fn unit(self) -> (f32, f32) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Screen edge a sliding panel is attached to.
///
/// `Start`/`End` are the logical left/right edges in a left-to-right layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelAnchor {
    Start,
    End,
    Top,
    Bottom,
}

/// The gesture context of a container: the single direction it accepts.
///
/// Panels close by being pushed back toward the edge they are anchored to;
/// the full-screen viewer is dismissed by pulling the image down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureContext {
    /// A sliding panel anchored to a screen edge.
    Panel(PanelAnchor),
    /// The full-screen image viewer.
    Viewer,
}

impl GestureContext {
    /// Direction that closes or dismisses this container.
    #[must_use]
    pub fn accepted_direction(self) -> SwipeDirection {
        match self {
            Self::Panel(PanelAnchor::Start) => SwipeDirection::Left,
            Self::Panel(PanelAnchor::End) => SwipeDirection::Right,
            Self::Panel(PanelAnchor::Top) => SwipeDirection::Up,
            Self::Panel(PanelAnchor::Bottom) | Self::Viewer => SwipeDirection::Down,
        }
    }

    #[must_use]
    pub fn accepts(self, direction: SwipeDirection) -> bool {
        self.accepted_direction() == direction
    }
}

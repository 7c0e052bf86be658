// SPDX-License-Identifier: MPL-2.0
//! Pointer motion sampling.
//!
//! Follows a single primary pointer from press to release and reports its
//! position along with the incremental and cumulative deltas. Secondary
//! pointers (a second finger, a stylus hovering) are ignored while a primary
//! pointer is tracked.

use iced_core::{Point, Vector};

/// Identifier of a pointer, as reported by the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// A single motion sample of the tracked pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Current position.
    pub position: Point,
    /// Motion since the previous sample.
    pub delta: Vector,
    /// Motion since the press.
    pub total: Vector,
}

/// Tracks the primary pointer of a touch sequence.
#[derive(Debug, Clone, Default)]
pub struct MotionSampler {
    pointer: Option<PointerId>,
    origin: Option<Point>,
    last: Option<Point>,
}

impl MotionSampler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `pointer`. Returns `false` if another pointer is
    /// already tracked.
    pub fn begin(&mut self, pointer: PointerId, position: Point) -> bool {
        if self.pointer.is_some_and(|tracked| tracked != pointer) {
            return false;
        }
        self.pointer = Some(pointer);
        self.origin = Some(position);
        self.last = Some(position);
        true
    }

    /// Records a move of `pointer`. Returns `None` for untracked pointers.
    pub fn sample(&mut self, pointer: PointerId, position: Point) -> Option<MotionSample> {
        if self.pointer != Some(pointer) {
            return None;
        }
        let origin = self.origin?;
        let last = self.last.replace(position)?;
        Some(MotionSample {
            position,
            delta: position - last,
            total: position - origin,
        })
    }

    /// Stops tracking `pointer`. Returns `false` for untracked pointers.
    pub fn end(&mut self, pointer: PointerId) -> bool {
        if self.pointer != Some(pointer) {
            return false;
        }
        self.reset();
        true
    }

    pub fn reset(&mut self) {
        self.pointer = None;
        self.origin = None;
        self.last = None;
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }

    #[must_use]
    pub fn tracked_pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Position of the press, while tracking.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_reports_incremental_and_total_delta() {
        let mut sampler = MotionSampler::new();
        assert!(sampler.begin(PointerId(1), Point::new(100.0, 100.0)));

        let first = sampler
            .sample(PointerId(1), Point::new(90.0, 102.0))
            .expect("tracked pointer");
        assert_eq!(first.delta, Vector::new(-10.0, 2.0));
        assert_eq!(first.total, Vector::new(-10.0, 2.0));

        let second = sampler
            .sample(PointerId(1), Point::new(70.0, 101.0))
            .expect("tracked pointer");
        assert_eq!(second.delta, Vector::new(-20.0, -1.0));
        assert_eq!(second.total, Vector::new(-30.0, 1.0));
    }

    #[test]
    fn secondary_pointer_is_ignored() {
        let mut sampler = MotionSampler::new();
        sampler.begin(PointerId(1), Point::new(0.0, 0.0));

        assert!(!sampler.begin(PointerId(2), Point::new(50.0, 50.0)));
        assert!(sampler.sample(PointerId(2), Point::new(60.0, 60.0)).is_none());
        assert!(!sampler.end(PointerId(2)));
        assert_eq!(sampler.tracked_pointer(), Some(PointerId(1)));
    }

    #[test]
    fn end_releases_the_pointer() {
        let mut sampler = MotionSampler::new();
        sampler.begin(PointerId(7), Point::new(0.0, 0.0));
        assert!(sampler.end(PointerId(7)));
        assert!(!sampler.is_tracking());
        assert!(sampler.origin().is_none());
        assert!(sampler.begin(PointerId(8), Point::new(1.0, 1.0)));
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// One pointer gesture on a viewport, from pointer-down to release.
///
/// A session starts out *pending*: it only records where the pointer went
/// down and the scroll offset at that moment. It becomes *dragging* once the
/// controller sees enough displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Identifier of the pointer that owns this session.
    pub pointer_id: i32,
    /// Pointer position at pointer-down, in screen (client) coordinates.
    pub start: Point,
    /// Viewport scroll offset at pointer-down.
    pub start_scroll: Vec2,
    /// Whether movement has crossed the drag threshold.
    pub dragging: bool,
}

impl DragSession {
    /// Starts a pending session.
    #[must_use]
    pub fn new(pointer_id: i32, start: Point, start_scroll: Vec2) -> Self {
        Self {
            pointer_id,
            start,
            start_scroll,
            dragging: false,
        }
    }

    /// Displacement of `position` from the start point.
    #[must_use]
    pub fn displacement(&self, position: Point) -> Vec2 {
        position - self.start
    }

    /// Scroll offset for a pointer at `position`: start scroll minus
    /// displacement, so content follows the pointer.
    #[must_use]
    pub fn scroll_for(&self, position: Point) -> Vec2 {
        self.start_scroll - self.displacement(position)
    }

    /// Returns `true` if `pointer_id` owns this session.
    #[must_use]
    pub fn owns(&self, pointer_id: i32) -> bool {
        self.pointer_id == pointer_id
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::DragSession;

    #[test]
    fn new_session_is_pending() {
        let session = DragSession::new(7, Point::new(10.0, 20.0), Vec2::new(1.0, 2.0));
        assert!(!session.dragging);
        assert!(session.owns(7));
        assert!(!session.owns(8));
    }

    #[test]
    fn displacement_is_measured_from_start() {
        let session = DragSession::new(1, Point::new(10.0, 20.0), Vec2::ZERO);
        assert_eq!(session.displacement(Point::new(15.0, 12.0)), Vec2::new(5.0, -8.0));
    }

    #[test]
    fn scroll_moves_against_pointer() {
        let session = DragSession::new(1, Point::new(100.0, 100.0), Vec2::new(50.0, 60.0));
        assert_eq!(session.scroll_for(Point::new(110.0, 110.0)), Vec2::new(40.0, 50.0));
        assert_eq!(session.scroll_for(Point::new(90.0, 95.0)), Vec2::new(60.0, 65.0));
    }

    #[test]
    fn fractional_coordinates() {
        let session = DragSession::new(1, Point::new(1.5, 2.7), Vec2::ZERO);
        let d = session.displacement(Point::new(3.2, 4.1));
        assert!((d.x - 1.7).abs() < f64::EPSILON * 10.0);
        assert!((d.y - 1.4).abs() < f64::EPSILON * 10.0);
    }
}

//! Multi-touch events.

use novatile_core::Point;

use super::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// The finger was lifted.
    Up,
    /// The finger touched down.
    Down,
    /// The finger moved, or stayed while another one changed.
    Change,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub id: i32,
    pub action: TouchAction,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: i32, action: TouchAction, position: Point) -> Self {
        Self { id, action, position }
    }
}

/// The state of every finger currently on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TouchEvent {
    pub points: Vec<TouchPoint>,
    pub modifiers: Modifiers,
}

impl TouchEvent {
    pub fn new(points: Vec<TouchPoint>) -> Self {
        Self {
            points,
            modifiers: Modifiers::empty(),
        }
    }

    /// Average position of all points, truncated toward zero. `None` without points.
    pub fn centroid(&self) -> Option<Point> {
        let count = self.points.len() as i64;
        if count == 0 {
            return None;
        }
        let (total_x, total_y) = self.points.iter().fold((0i64, 0i64), |(x, y), point| {
            (x + point.position.x as i64, y + point.position.y as i64)
        });
        Some(Point::new((total_x / count) as i32, (total_y / count) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_truncates() {
        let event = TouchEvent::new(vec![
            TouchPoint::new(0, TouchAction::Change, Point::new(0, 0)),
            TouchPoint::new(1, TouchAction::Change, Point::new(10, 5)),
            TouchPoint::new(2, TouchAction::Change, Point::new(21, 0)),
        ]);
        assert_eq!(event.centroid(), Some(Point::new(10, 1)));
    }

    #[test]
    fn no_points_no_centroid() {
        assert_eq!(TouchEvent::default().centroid(), None);
    }
}

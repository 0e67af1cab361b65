//! Selection handles and drag/resize manipulation.

use crate::geometry::{Element, ElementId, Position};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle (resizes two sides).
    Corner(Corner),
    /// Edge midpoint handle (resizes one side).
    Edge(Edge),
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point hits this handle (square hit area).
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }
}

/// Get the resize handles for an element's bounds.
pub fn get_handles(bounds: Rect) -> Vec<Handle> {
    let center = bounds.center();
    vec![
        Handle::new(Point::new(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
        Handle::new(Point::new(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(Point::new(center.x, bounds.y0), HandleKind::Edge(Edge::Top)),
        Handle::new(Point::new(bounds.x1, center.y), HandleKind::Edge(Edge::Right)),
        Handle::new(Point::new(center.x, bounds.y1), HandleKind::Edge(Edge::Bottom)),
        Handle::new(Point::new(bounds.x0, center.y), HandleKind::Edge(Edge::Left)),
    ]
}

/// Find which handle (if any) is hit at the given point.
///
/// Corners are tested before edges so small elements stay resizable diagonally.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(bounds)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// State of an active drag or resize.
#[derive(Debug, Clone)]
pub struct ManipulationState {
    /// The element being manipulated.
    pub id: ElementId,
    /// The handle being dragged (None = moving the whole element).
    pub handle: Option<HandleKind>,
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
    /// Geometry at the start of the drag.
    pub original: Element,
}

impl ManipulationState {
    /// Create a new manipulation state.
    pub fn new(id: ElementId, handle: Option<HandleKind>, start_point: Point, original: Element) -> Self {
        Self {
            id,
            handle,
            start_point,
            current_point: start_point,
            original,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Whether this manipulation resizes rather than moves.
    pub fn is_resize(&self) -> bool {
        self.handle.is_some()
    }

    /// Geometry the element should have at the current pointer position.
    pub fn current_element(&self) -> Element {
        apply_manipulation(&self.original, self.handle, self.delta())
    }
}

/// Apply a drag or resize to an element.
///
/// Without a handle the position is translated by `delta` and the size is
/// kept. With a handle the grabbed sides follow the pointer; a rectangle
/// dragged past its opposite side is flipped, sizes are never clamped.
pub fn apply_manipulation(element: &Element, handle: Option<HandleKind>, delta: Vec2) -> Element {
    match handle {
        None => {
            let mut moved = *element;
            moved.style.position = Position::from_point(element.position().to_point() + delta);
            moved
        }
        Some(kind) => Element::from_rect(resize_rect(element.rect(), kind, delta)),
    }
}

fn resize_rect(bounds: Rect, kind: HandleKind, delta: Vec2) -> Rect {
    let (x0, y0, x1, y1) = match kind {
        HandleKind::Corner(Corner::TopLeft) => (bounds.x0 + delta.x, bounds.y0 + delta.y, bounds.x1, bounds.y1),
        HandleKind::Corner(Corner::TopRight) => (bounds.x0, bounds.y0 + delta.y, bounds.x1 + delta.x, bounds.y1),
        HandleKind::Corner(Corner::BottomLeft) => (bounds.x0 + delta.x, bounds.y0, bounds.x1, bounds.y1 + delta.y),
        HandleKind::Corner(Corner::BottomRight) => (bounds.x0, bounds.y0, bounds.x1 + delta.x, bounds.y1 + delta.y),
        HandleKind::Edge(Edge::Top) => (bounds.x0, bounds.y0 + delta.y, bounds.x1, bounds.y1),
        HandleKind::Edge(Edge::Right) => (bounds.x0, bounds.y0, bounds.x1 + delta.x, bounds.y1),
        HandleKind::Edge(Edge::Bottom) => (bounds.x0, bounds.y0, bounds.x1, bounds.y1 + delta.y),
        HandleKind::Edge(Edge::Left) => (bounds.x0 + delta.x, bounds.y0, bounds.x1, bounds.y1),
    };
    // Rect::new keeps the coordinates as given; abs() swaps inverted sides
    Rect::new(x0, y0, x1, y1).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn element(left: f64, top: f64, width: f64, height: f64) -> Element {
        Element::new(Position::new(top, left), Size::new(width, height))
    }

    #[test]
    fn test_handles() {
        let handles = get_handles(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(handles.len(), 8);
        assert!(matches!(handles[0].kind, HandleKind::Corner(Corner::TopLeft)));
        assert_eq!(handles[3].position, Point::new(100.0, 50.0));
        assert_eq!(handles[5].position, Point::new(100.0, 25.0));
    }

    #[test]
    fn test_handle_hit_test() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            hit_test_handles(bounds, Point::new(98.0, 103.0), HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        assert_eq!(
            hit_test_handles(bounds, Point::new(50.0, -2.0), HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Edge(Edge::Top))
        );
        assert_eq!(hit_test_handles(bounds, Point::new(50.0, 50.0), HANDLE_HIT_TOLERANCE), None);
    }

    #[test]
    fn test_drag_changes_only_position() {
        let original = element(10.0, 20.0, 80.0, 40.0);
        let moved = apply_manipulation(&original, None, Vec2::new(5.0, -10.0));

        assert_eq!(moved.position(), Position::new(10.0, 15.0));
        assert_eq!(moved.size(), original.size());
    }

    #[test]
    fn test_corner_resize() {
        let original = element(0.0, 0.0, 100.0, 100.0);
        let resized = apply_manipulation(
            &original,
            Some(HandleKind::Corner(Corner::BottomRight)),
            Vec2::new(50.0, 50.0),
        );
        assert_eq!(resized.position(), Position::new(0.0, 0.0));
        assert!((resized.size().width - 150.0).abs() < f64::EPSILON);
        assert!((resized.size().height - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_left_resize_moves_position() {
        let original = element(10.0, 10.0, 100.0, 100.0);
        let resized = apply_manipulation(
            &original,
            Some(HandleKind::Corner(Corner::TopLeft)),
            Vec2::new(20.0, 30.0),
        );
        assert_eq!(resized.position(), Position::new(40.0, 30.0));
        assert_eq!(resized.size(), Size::new(80.0, 70.0));
    }

    #[test]
    fn test_edge_resize_affects_one_axis() {
        let original = element(0.0, 0.0, 100.0, 100.0);
        let resized = apply_manipulation(&original, Some(HandleKind::Edge(Edge::Left)), Vec2::new(30.0, 99.0));
        assert_eq!(resized.position(), Position::new(0.0, 30.0));
        assert_eq!(resized.size(), Size::new(70.0, 100.0));
    }

    #[test]
    fn test_resize_past_opposite_side_flips() {
        let original = element(0.0, 0.0, 50.0, 50.0);
        let resized = apply_manipulation(&original, Some(HandleKind::Edge(Edge::Right)), Vec2::new(-80.0, 0.0));
        assert_eq!(resized.position(), Position::new(0.0, -30.0));
        assert_eq!(resized.size(), Size::new(30.0, 50.0));
    }

    #[test]
    fn test_resize_to_zero_is_not_clamped() {
        let original = element(0.0, 0.0, 50.0, 50.0);
        let resized = apply_manipulation(&original, Some(HandleKind::Edge(Edge::Bottom)), Vec2::new(0.0, -50.0));
        assert!(resized.size().height.abs() < f64::EPSILON);
    }

    #[test]
    fn test_manipulation_state() {
        let original = element(0.0, 0.0, 50.0, 50.0);
        let mut state = ManipulationState::new(ElementId(0), None, Point::new(10.0, 10.0), original);
        state.current_point = Point::new(30.0, 15.0);

        assert_eq!(state.delta(), Vec2::new(20.0, 5.0));
        assert!(!state.is_resize());
        assert_eq!(state.current_element().position(), Position::new(5.0, 20.0));
    }
}

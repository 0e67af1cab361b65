//! Element identity and geometry.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an element on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Offset of an element's top-left corner from the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

impl Position {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    /// The position as a point (x = left, y = top).
    pub fn to_point(self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn from_point(point: Point) -> Self {
        Self::new(point.y, point.x)
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(Element::DEFAULT_SIZE, Element::DEFAULT_SIZE)
    }
}

/// Position and size of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementStyle {
    pub position: Position,
    pub size: Size,
}

/// A rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    pub style: ElementStyle,
}

impl Element {
    /// Side length of a freshly added element.
    pub const DEFAULT_SIZE: f64 = 50.0;

    /// Create an element at `position` with `size`.
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            style: ElementStyle { position, size },
        }
    }

    /// Build an element covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            Position::new(rect.y0, rect.x0),
            Size::new(rect.width(), rect.height()),
        )
    }

    pub fn position(&self) -> Position {
        self.style.position
    }

    pub fn size(&self) -> Size {
        self.style.size
    }

    /// The element's bounds.
    pub fn rect(&self) -> Rect {
        let Position { top, left } = self.style.position;
        let Size { width, height } = self.style.size;
        Rect::new(left, top, left + width, top + height)
    }

    /// Check whether `point` lies inside the element (edges included).
    pub fn contains(&self, point: Point) -> bool {
        let rect = self.rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }
}

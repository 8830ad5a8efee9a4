//! Geometric primitives: points, sizes, displacements and rectangles.
//!
//! All coordinates are integer logical pixels. Differences between points are
//! [`Displacement`]s, so a position can only be moved by a displacement, never by
//! another position.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A 2D position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// The x-coordinate.
    pub x: i32,
    /// The y-coordinate.
    pub y: i32,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Point = Point::new(0, 0);

    /// Creates a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 2D extent.
///
/// Dimensions are signed so that clipping arithmetic can be carried out without
/// wrapping; a non-positive dimension describes an empty area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// The width.
    pub width: i32,
    /// The height.
    pub height: i32,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }

    /// The displacement from a rectangle's top-left to its bottom-right.
    pub const fn as_displacement(self) -> Displacement {
        Displacement::new(self.width, self.height)
    }

    /// Returns `true` if either dimension is non-positive.
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The difference between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Displacement {
    /// Horizontal component.
    pub dx: i32,
    /// Vertical component.
    pub dy: i32,
}

impl Displacement {
    /// Creates a new displacement.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Displacement { dx, dy }
    }

    /// Scales both components, truncating toward zero.
    pub fn scaled(self, factor: f32) -> Displacement {
        Displacement::new(
            (factor * self.dx as f32) as i32,
            (factor * self.dy as f32) as i32,
        )
    }

    /// Reinterprets the displacement as a size.
    pub const fn as_size(self) -> Size {
        Size::new(self.dx, self.dy)
    }
}

impl Add for Displacement {
    type Output = Displacement;
    fn add(self, other: Displacement) -> Displacement {
        Displacement::new(self.dx + other.dx, self.dy + other.dy)
    }
}

impl Sub for Displacement {
    type Output = Displacement;
    fn sub(self, other: Displacement) -> Displacement {
        Displacement::new(self.dx - other.dx, self.dy - other.dy)
    }
}

impl Neg for Displacement {
    type Output = Displacement;
    fn neg(self) -> Displacement {
        Displacement::new(-self.dx, -self.dy)
    }
}

impl Sub for Point {
    type Output = Displacement;
    fn sub(self, other: Point) -> Displacement {
        Displacement::new(self.x - other.x, self.y - other.y)
    }
}

impl Add<Displacement> for Point {
    type Output = Point;
    fn add(self, d: Displacement) -> Point {
        Point::new(self.x + d.dx, self.y + d.dy)
    }
}

impl Sub<Displacement> for Point {
    type Output = Point;
    fn sub(self, d: Displacement) -> Point {
        Point::new(self.x - d.dx, self.y - d.dy)
    }
}

impl AddAssign<Displacement> for Point {
    fn add_assign(&mut self, d: Displacement) {
        self.x += d.dx;
        self.y += d.dy;
    }
}

impl SubAssign<Displacement> for Point {
    fn sub_assign(&mut self, d: Displacement) {
        self.x -= d.dx;
        self.y -= d.dy;
    }
}

/// An axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    /// The top-left corner.
    pub top_left: Point,
    /// The extent.
    pub size: Size,
}

impl Rectangle {
    /// Creates a new rectangle.
    pub const fn new(top_left: Point, size: Size) -> Self {
        Rectangle { top_left, size }
    }

    /// Shorthand for `Rectangle::new(Point::new(x, y), Size::new(width, height))`.
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
    }

    /// The first point past the rectangle on both axes.
    pub fn bottom_right(&self) -> Point {
        self.top_left + self.size.as_displacement()
    }

    /// The first point past the rectangle horizontally, on the top edge.
    pub fn top_right(&self) -> Point {
        Point::new(self.top_left.x + self.size.width, self.top_left.y)
    }

    /// The first point past the rectangle vertically, on the left edge.
    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x, self.top_left.y + self.size.height)
    }

    /// Returns `true` if the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Half-open containment: the top and left edges are inside, the bottom and
    /// right edges are not. An empty rectangle contains nothing.
    pub fn contains(&self, p: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        let br = self.bottom_right();
        p.x >= self.top_left.x && p.x < br.x && p.y >= self.top_left.y && p.y < br.y
    }

    /// Returns `true` if the two rectangles share any area.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a, b) = (self.bottom_right(), other.bottom_right());
        self.top_left.x < b.x
            && other.top_left.x < a.x
            && self.top_left.y < b.y
            && other.top_left.y < a.y
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.size, self.top_left)
    }
}

/// A set of display areas.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rectangles {
    rectangles: Vec<Rectangle>,
}

impl Rectangles {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rectangle. Duplicates are kept, as two outputs may mirror the same area.
    pub fn add(&mut self, rect: Rectangle) {
        self.rectangles.push(rect);
    }

    /// Removes one occurrence of `rect`. Returns `false` if it was not present.
    pub fn remove(&mut self, rect: &Rectangle) -> bool {
        match self.rectangles.iter().position(|r| r == rect) {
            Some(index) => {
                self.rectangles.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rectangle> {
        self.rectangles.iter()
    }

    /// The smallest rectangle containing every member, or the zero rectangle if the
    /// set is empty.
    pub fn bounding_rectangle(&self) -> Rectangle {
        let mut iter = self.rectangles.iter();
        let Some(first) = iter.next() else {
            return Rectangle::default();
        };

        let (mut min, mut max) = (first.top_left, first.bottom_right());
        for rect in iter {
            let br = rect.bottom_right();
            min = Point::new(min.x.min(rect.top_left.x), min.y.min(rect.top_left.y));
            max = Point::new(max.x.max(br.x), max.y.max(br.y));
        }
        Rectangle::new(min, (max - min).as_size())
    }
}

impl FromIterator<Rectangle> for Rectangles {
    fn from_iter<I: IntoIterator<Item = Rectangle>>(iter: I) -> Self {
        Rectangles {
            rectangles: iter.into_iter().collect(),
        }
    }
}

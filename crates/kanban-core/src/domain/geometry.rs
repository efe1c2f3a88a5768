//! Screen-space geometry primitives.
//!
//! All coordinates are `f64` screen units with the origin at the top-left
//! and `y` growing downwards.  Rectangles are half-open: a point on the
//! right or bottom edge is outside.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Sub<Offset> for Point {
    type Output = Point;

    fn sub(self, rhs: Offset) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the top-left corner.
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the vertical midpoint.
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Returns `true` if `p` lies inside the rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

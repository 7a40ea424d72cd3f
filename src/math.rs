//! Integer and float 2D points shared by every coordinate space.
//!
//! Tile coordinates are [`Point`]s; pixel and screen coordinates are
//! [`Vector2`]s. Converting a float position to a tile always floors, so a
//! position sitting exactly on a boundary belongs to the tile on its positive
//! side.

use std::ops::{Add, Mul, Neg, Sub};

/// Integer 2D point, used for tile coordinates and pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Point from its components.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Floors both components towards negative infinity.
    #[inline]
    pub fn floor(x: f64, y: f64) -> Self {
        Point {
            x: x.floor() as i32,
            y: y.floor() as i32,
        }
    }

    /// Squared distance, exact over the whole `i32` range.
    #[inline]
    pub fn distance_squared(self, other: Point) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        (dx * dx).saturating_add(dy * dy)
    }

    /// Componentwise addition that sticks at the ends of the `i32` range.
    #[inline]
    pub fn saturating_add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }

    /// Same position as a float vector.
    #[inline]
    pub fn as_vector(self) -> Vector2 {
        Vector2::new(self.x as f64, self.y as f64)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Float 2D vector, used for pixel and screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };

    /// Vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    #[inline]
    pub fn distance_squared(self, other: Vector2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Vector2) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Component-wise product.
    #[inline]
    pub fn scale(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x * other.x, self.y * other.y)
    }

    /// Rotates clockwise (y axis pointing down) by `degrees` around the origin.
    pub fn rotate_deg(self, degrees: f64) -> Vector2 {
        if degrees == 0.0 {
            return self;
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2::new(x, y)
    }
}

impl From<Vector2> for macroquad::math::Vec2 {
    fn from(v: Vector2) -> Self {
        macroquad::math::vec2(v.x as f32, v.y as f32)
    }
}

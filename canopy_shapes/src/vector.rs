// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A plane vector.

use canopy_index::Point;

use crate::util::sqrt;

/// A 2D vector.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vector {
    /// The component along the x axis.
    pub dx: f64,
    /// The component along the y axis.
    pub dy: f64,
}

impl Vector {
    /// Creates a vector from its components.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Creates the vector pointing from one point to another.
    pub fn between(from: Point, to: Point) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    /// The length of this vector.
    pub fn length(&self) -> f64 {
        sqrt(self.dx * self.dx + self.dy * self.dy)
    }

    /// The cross product with another vector.
    pub fn cross(&self, other: Self) -> f64 {
        self.dx * other.dy - other.dx * self.dy
    }

    /// The sum of this vector and another.
    pub fn add(&self, other: Self) -> Self {
        Self::new(self.dx + other.dx, self.dy + other.dy)
    }

    /// This vector pointing the other way.
    pub fn reverse(&self) -> Self {
        Self::new(-self.dx, -self.dy)
    }

    /// This vector scaled to length one.
    ///
    /// A zero vector has no direction and is returned unchanged.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 1.0 || length <= 0.0 {
            *self
        } else {
            Self::new(self.dx / length, self.dy / length)
        }
    }

    /// This vector turned 90 degrees clockwise.
    pub fn turn_right(&self) -> Self {
        Self::new(self.dy, -self.dx)
    }

    /// This vector turned 90 degrees counter-clockwise.
    pub fn turn_left(&self) -> Self {
        Self::new(-self.dy, self.dx)
    }

    /// This vector scaled by a factor.
    pub fn scale(&self, value: f64) -> Self {
        Self::new(self.dx * value, self.dy * value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_normalize() {
        let v = Vector::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        let unit = v.normalize();
        assert_eq!(unit, Vector::new(0.6, 0.8));
        assert_eq!(unit.normalize(), unit);

        let zero = Vector::new(0.0, 0.0);
        assert_eq!(zero.normalize(), zero);
    }

    #[test]
    fn cross_and_turns() {
        let v = Vector::new(1.0, 0.0);
        let w = Vector::new(0.0, 1.0);
        assert_eq!(v.cross(w), 1.0);
        assert_eq!(w.cross(v), -1.0);
        assert_eq!(v.cross(v), 0.0);

        assert_eq!(v.turn_left(), w);
        assert_eq!(v.turn_right(), Vector::new(0.0, -1.0));
        assert_eq!(v.turn_left().turn_left(), v.reverse());
    }

    #[test]
    fn add_and_scale() {
        let v = Vector::between(Point::new(1.0, 1.0), Point::new(3.0, 2.0));
        assert_eq!(v, Vector::new(2.0, 1.0));
        assert_eq!(v.add(v.reverse()), Vector::new(0.0, 0.0));
        assert_eq!(v.scale(-2.0), Vector::new(-4.0, -2.0));
        assert_eq!(v.scale(-2.0).length(), v.length() * 2.0);
    }
}

//! Geometric primitives for 3D scene placement.
//!
//! # Overview
//!
//! - [`Point3`] - A 3D coordinate in scene space
//! - [`Bounds3`] - An axis-aligned bounding box defined by minimum and maximum corners
//!
//! # Coordinate System
//!
//! Stratum uses a right-handed, Y-up coordinate system matching glTF:
//!
//! ```text
//!        +Y
//!         │
//!         │
//!         └──────► +X
//!        ╱
//!       ╱
//!     +Z
//! ```
//!
//! Diagram columns advance along +X, rows descend along -Y, and semantic
//! depth bands are separated along Z.

use serde::Serialize;

/// A 3D point in scene coordinate space.
///
/// Coordinates are stored as `f64` so that layout arithmetic and the text
/// mesh output keep full precision. Binary buffers narrow to `f32` at
/// packing time.
///
/// # Examples
///
/// ```
/// # use stratum_core::geometry::Point3;
/// let p = Point3::new(4.0, -3.0, 1.0);
/// let moved = p.offset(0.5, 0.5, 0.5);
///
/// assert_eq!(moved.x(), 4.5);
/// assert_eq!(moved.y(), -2.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(into = "[f64; 3]")]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-coordinate of the point
    pub fn z(self) -> f64 {
        self.z
    }

    /// Returns a new point translated by the given deltas
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Returns the coordinates as an `[x, y, z]` array
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3> for [f64; 3] {
    fn from(point: Point3) -> Self {
        point.to_array()
    }
}

/// An axis-aligned bounding box over a set of points.
///
/// An empty box has no extent; [`Bounds3::include`] on an empty box
/// collapses it onto the included point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    min: [f32; 3],
    max: [f32; 3],
}

impl Bounds3 {
    /// Creates an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
        }
    }

    /// Computes the bounds of a sequence of `f32` triples.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stratum_core::geometry::Bounds3;
    /// let bounds = Bounds3::from_components([[0.0, 2.0, -1.0], [1.0, -2.0, 3.0]]);
    ///
    /// assert_eq!(bounds.min(), [0.0, -2.0, -1.0]);
    /// assert_eq!(bounds.max(), [1.0, 2.0, 3.0]);
    /// ```
    pub fn from_components(components: impl IntoIterator<Item = [f32; 3]>) -> Self {
        components
            .into_iter()
            .fold(Self::empty(), |bounds, point| bounds.include(point))
    }

    /// Returns a new box grown to contain `point`.
    pub fn include(self, point: [f32; 3]) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        for axis in 0..3 {
            min[axis] = min[axis].min(point[axis]);
            max[axis] = max[axis].max(point[axis]);
        }
        Self { min, max }
    }

    /// Returns `true` if no point has been included.
    pub fn is_empty(&self) -> bool {
        self.min[0] > self.max[0]
    }

    /// Minimum corner
    pub fn min(&self) -> [f32; 3] {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> [f32; 3] {
        self.max
    }
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_offset() {
        let p = Point3::new(1.2, -3.0, 0.0).offset(-0.8, 0.8, 0.8);

        assert_approx_eq!(f64, p.x(), 0.4, epsilon = 1e-9);
        assert_approx_eq!(f64, p.y(), -2.2, epsilon = 1e-9);
        assert_approx_eq!(f64, p.z(), 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_point_array_roundtrip() {
        let p = Point3::from([1.0, 2.0, 3.0]);
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_bounds_empty() {
        let bounds = Bounds3::empty();
        assert!(bounds.is_empty());
        assert!(Bounds3::from_components([]).is_empty());
    }

    #[test]
    fn test_bounds_single_point() {
        let bounds = Bounds3::empty().include([1.0, -1.0, 0.5]);

        assert!(!bounds.is_empty());
        assert_eq!(bounds.min(), [1.0, -1.0, 0.5]);
        assert_eq!(bounds.max(), [1.0, -1.0, 0.5]);
    }

    #[test]
    fn test_bounds_unit_cube() {
        let corners = [
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, 0.5],
        ];
        let bounds = Bounds3::from_components(corners);

        assert_eq!(bounds.min(), [-0.5, -0.5, -0.5]);
        assert_eq!(bounds.max(), [0.5, 0.5, 0.5]);
    }
}

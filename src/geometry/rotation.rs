//! Provides hinge rotation helpers using glam.
//!
//! A fold swings a point about a hinge line parallel to a lattice axis.
//! Only the two components orthogonal to the hinge change, so the swing is a
//! plain 2D rotation in that plane.
//!
//! # Examples
//! ```
//! use glam::Vec2;
//! use wrapped_cube::geometry::rotation::rotate_2d;
//!
//! let p = rotate_2d(Vec2::ZERO, std::f32::consts::FRAC_PI_2, Vec2::X);
//! assert!(p.abs_diff_eq(Vec2::Y, 1e-6));
//! ```

use glam::{Quat, Vec2, Vec3};

use crate::geometry::Direction;

/// Rotates `point` by `angle` radians about `center`.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use wrapped_cube::geometry::rotation::rotate_2d;
///
/// let p = rotate_2d(Vec2::new(1.0, 1.0), std::f32::consts::PI, Vec2::new(2.0, 1.0));
/// assert!(p.abs_diff_eq(Vec2::new(0.0, 1.0), 1e-6));
/// ```
pub fn rotate_2d(center: Vec2, angle: f32, point: Vec2) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - center;
    Vec2::new(
        center.x + d.x * cos - d.y * sin,
        center.y + d.y * cos + d.x * sin,
    )
}

/// The two component indices orthogonal to `axis`, in ascending order.
///
/// # Examples
/// ```
/// use wrapped_cube::geometry::{rotation::plane_of, Direction};
///
/// assert_eq!(plane_of(Direction::NegY), (0, 2));
/// ```
#[inline]
pub fn plane_of(axis: Direction) -> (usize, usize) {
    match axis.index() {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// A hinge line through a lattice point, parallel to a lattice axis.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use wrapped_cube::geometry::{rotation::Hinge, Direction};
///
/// let hinge = Hinge::new(Vec3::ZERO, Direction::PosZ);
/// let p = hinge.swing(Vec3::new(1.0, 0.0, 5.0), std::f32::consts::FRAC_PI_2);
/// assert!(p.abs_diff_eq(Vec3::new(0.0, 1.0, 5.0), 1e-6));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hinge {
    /// Any point on the hinge line.
    pub origin: Vec3,
    /// Hinge direction.
    pub axis: Direction,
}

impl Hinge {
    pub fn new(origin: Vec3, axis: Direction) -> Self {
        Self { origin, axis }
    }

    /// Swings `point` by `angle` in the plane orthogonal to the hinge.
    ///
    /// The angle is measured from the lower to the higher remaining
    /// component index, regardless of the hinge sign.
    pub fn swing(&self, point: Vec3, angle: f32) -> Vec3 {
        let (d1, d2) = plane_of(self.axis);
        let swung = rotate_2d(
            Vec2::new(self.origin[d1], self.origin[d2]),
            angle,
            Vec2::new(point[d1], point[d2]),
        );
        let mut result = point;
        result[d1] = swung.x;
        result[d2] = swung.y;
        result
    }
}

/// Composes `delta` in world space on top of `current`.
///
/// The new rotation is applied after the accumulated one, so repeated small
/// steps about a fixed world axis add up to one continuous turn.
///
/// # Examples
/// ```
/// use glam::{Quat, Vec3};
/// use wrapped_cube::geometry::rotation::premultiply;
///
/// let q = premultiply(Quat::from_rotation_x(0.3), Quat::from_rotation_y(0.2));
/// assert!(q.abs_diff_eq(Quat::from_rotation_y(0.2) * Quat::from_rotation_x(0.3), 1e-6));
/// ```
#[inline]
pub fn premultiply(current: Quat, delta: Quat) -> Quat {
    (delta * current).normalize()
}

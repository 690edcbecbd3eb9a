//! Provides the axis-aligned unit direction used as face normal and hinge axis.
//!
//! # Examples
//! ```
//! use wrapped_cube::geometry::Direction;
//!
//! let mut normal = Direction::NegZ;
//! normal.rotate_half_pi(Direction::PosY);
//! assert_eq!(normal, Direction::NegX);
//! ```

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A vector in `{-1, 0, 1}³` with exactly one non-zero component.
///
/// Every value is one of the six canonical directions, so a tile holding a
/// `Direction` always owns a copy and never aliases a shared constant.
///
/// # Examples
/// ```
/// use wrapped_cube::geometry::Direction;
///
/// assert_eq!(Direction::new(0, -1, 0).unwrap(), Direction::NegY);
/// assert!(Direction::new(1, 1, 0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    /// All six directions, in declaration order.
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Creates a direction from integer components.
    ///
    /// # Errors
    /// Returns [`GeometryError::InvalidDirection`] unless exactly one
    /// component is ±1 and the others are 0.
    ///
    /// # Examples
    /// ```
    /// use wrapped_cube::geometry::Direction;
    ///
    /// assert_eq!(Direction::new(1, 0, 0).unwrap(), Direction::PosX);
    /// assert!(Direction::new(0, 0, 0).is_err());
    /// assert!(Direction::new(2, 0, 0).is_err());
    /// ```
    pub fn new(x: i32, y: i32, z: i32) -> Result<Self, GeometryError> {
        match (x, y, z) {
            (1, 0, 0) => Ok(Direction::PosX),
            (-1, 0, 0) => Ok(Direction::NegX),
            (0, 1, 0) => Ok(Direction::PosY),
            (0, -1, 0) => Ok(Direction::NegY),
            (0, 0, 1) => Ok(Direction::PosZ),
            (0, 0, -1) => Ok(Direction::NegZ),
            _ => Err(GeometryError::InvalidDirection { x, y, z }),
        }
    }

    /// Builds a direction from a component index (0=X, 1=Y, 2=Z) and a sign.
    #[inline]
    pub fn from_index_sign(index: usize, sign: i32) -> Self {
        const TABLE: [Direction; 6] = [
            Direction::NegX,
            Direction::PosX,
            Direction::NegY,
            Direction::PosY,
            Direction::NegZ,
            Direction::PosZ,
        ];
        TABLE[index * 2 + usize::from(sign > 0)]
    }

    /// Component index of the non-zero component: 0=X, 1=Y, 2=Z.
    #[inline]
    pub fn index(self) -> usize {
        (self as usize) >> 1
    }

    /// Sign of the non-zero component: 1 for `Pos*`, -1 for `Neg*`.
    #[inline]
    pub fn sign(self) -> i32 {
        1 - ((self as i32) & 1) * 2
    }

    /// Integer unit vector.
    #[inline]
    pub fn to_ivec3(self) -> IVec3 {
        const TABLE: [IVec3; 6] = [
            IVec3::X,
            IVec3::NEG_X,
            IVec3::Y,
            IVec3::NEG_Y,
            IVec3::Z,
            IVec3::NEG_Z,
        ];
        TABLE[self as usize]
    }

    /// Float unit vector.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        const TABLE: [Vec3; 6] = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        TABLE[self as usize]
    }

    /// Returns the negated direction.
    ///
    /// # Examples
    /// ```
    /// use wrapped_cube::geometry::Direction;
    ///
    /// assert_eq!(Direction::PosZ.opposite(), Direction::NegZ);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    /// Returns true when both directions lie on the same axis.
    #[inline]
    pub fn is_parallel(self, other: Direction) -> bool {
        self.index() == other.index()
    }

    /// Turns this direction a quarter turn about `axis`.
    ///
    /// The new non-zero component is the remaining axis, signed by the
    /// product of the two signs and negated for the (X:z→y), (Y:x→z) and
    /// (Z:y→x) pairs. A direction parallel to `axis` is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use wrapped_cube::geometry::Direction;
    ///
    /// let mut d = Direction::PosY;
    /// d.rotate_half_pi(Direction::PosX);
    /// assert_eq!(d, Direction::PosZ);
    ///
    /// let mut parallel = Direction::NegX;
    /// parallel.rotate_half_pi(Direction::PosX);
    /// assert_eq!(parallel, Direction::NegX);
    /// ```
    pub fn rotate_half_pi(&mut self, axis: Direction) {
        let a = axis.sign();
        let s = self.sign();
        let (index, sign) = match (axis.index(), self.index()) {
            (0, 1) => (2, a * s),
            (0, 2) => (1, -a * s),
            (1, 0) => (2, -a * s),
            (1, 2) => (0, a * s),
            (2, 0) => (1, a * s),
            (2, 1) => (0, -a * s),
            _ => return,
        };
        *self = Direction::from_index_sign(index, sign);
    }

    /// By-value form of [`Direction::rotate_half_pi`].
    #[inline]
    pub fn rotated_half_pi(mut self, axis: Direction) -> Self {
        self.rotate_half_pi(axis);
        self
    }
}

impl TryFrom<IVec3> for Direction {
    type Error = GeometryError;

    fn try_from(v: IVec3) -> Result<Self, Self::Error> {
        Direction::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_unit_vectors() {
        for (x, y, z) in [(0, 0, 0), (1, 1, 0), (2, 0, 0), (0, -1, 1), (1, 1, 1)] {
            assert_eq!(
                Direction::new(x, y, z),
                Err(GeometryError::InvalidDirection { x, y, z })
            );
        }
    }

    #[test]
    fn test_round_trips_through_ivec3() {
        for d in Direction::ALL {
            assert_eq!(Direction::try_from(d.to_ivec3()).unwrap(), d);
            assert_eq!(d.to_vec3(), d.to_ivec3().as_vec3());
            assert_eq!(d.to_ivec3()[d.index()], d.sign());
        }
    }

    #[test]
    fn test_opposite_negates() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().to_ivec3(), -d.to_ivec3());
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn test_rotate_half_pi_is_right_handed() {
        // Quarter turn about +axis follows the cross product axis × v.
        for axis in Direction::ALL {
            for d in Direction::ALL {
                if d.is_parallel(axis) {
                    continue;
                }
                let expected = axis.to_ivec3().cross(d.to_ivec3());
                assert_eq!(d.rotated_half_pi(axis).to_ivec3(), expected, "{d:?} about {axis:?}");
            }
        }
    }

    #[test]
    fn test_rotate_half_pi_four_times_is_identity() {
        for axis in Direction::ALL {
            for d in Direction::ALL {
                let mut turned = d;
                for _ in 0..4 {
                    turned.rotate_half_pi(axis);
                }
                assert_eq!(turned, d);
            }
        }
    }

    #[test]
    fn test_parallel_direction_is_unchanged() {
        assert_eq!(Direction::PosZ.rotated_half_pi(Direction::NegZ), Direction::PosZ);
        assert_eq!(Direction::NegY.rotated_half_pi(Direction::NegY), Direction::NegY);
    }
}

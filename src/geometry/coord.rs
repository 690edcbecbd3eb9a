//! Provides integer lattice slots and their mapping to continuous positions.
//!
//! A tile lies flush on a lattice plane along its normal axis, so that
//! component maps to `coord * tile_size`. Along the two other axes the tile
//! centre sits between lattice planes, at `(coord + 0.5) * tile_size`.
//!
//! # Examples
//! ```
//! use glam::Vec3;
//! use wrapped_cube::geometry::{coord_from_position, position_from_coord, Coord, Direction};
//!
//! let p = position_from_coord(Coord::new(0, 0, -1), Direction::NegZ, 2.0);
//! assert_eq!(p, Vec3::new(1.0, 1.0, -2.0));
//! assert_eq!(coord_from_position(p, Direction::NegZ, 2.0).unwrap(), Coord::new(0, 0, -1));
//! ```

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::Direction;

/// Largest distance from the lattice, as a fraction of the tile size, that
/// [`coord_from_position`] still rounds.
pub const LATTICE_TOLERANCE: f32 = 1e-3;

/// An integer grid slot, independent of the tile size.
///
/// # Examples
/// ```
/// use wrapped_cube::geometry::Coord;
///
/// assert_eq!(Coord::P101, Coord::new(1, 0, 1));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    pub const P000: Coord = Coord::new(0, 0, 0);
    pub const P001: Coord = Coord::new(0, 0, 1);
    pub const P010: Coord = Coord::new(0, 1, 0);
    pub const P100: Coord = Coord::new(1, 0, 0);
    pub const P011: Coord = Coord::new(0, 1, 1);
    pub const P101: Coord = Coord::new(1, 0, 1);
    pub const P110: Coord = Coord::new(1, 1, 0);
    pub const P111: Coord = Coord::new(1, 1, 1);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// The lattice point itself in continuous space, scaled by `tile_size`.
    /// Used for hinge lines, which run along cube edges.
    #[inline]
    pub fn scaled(self, tile_size: f32) -> Vec3 {
        self.to_ivec3().as_vec3() * tile_size
    }
}

impl From<IVec3> for Coord {
    fn from(v: IVec3) -> Self {
        Coord::new(v.x, v.y, v.z)
    }
}

/// Returns the centre position of a tile in slot `coord` facing `normal`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use wrapped_cube::geometry::{position_from_coord, Coord, Direction};
///
/// let p = position_from_coord(Coord::P100, Direction::PosX, 2.0);
/// assert_eq!(p, Vec3::new(2.0, 1.0, 1.0));
/// ```
pub fn position_from_coord(coord: Coord, normal: Direction, tile_size: f32) -> Vec3 {
    let flat = normal.index();
    let mut position = coord.to_ivec3().as_vec3() + Vec3::splat(0.5);
    position[flat] -= 0.5;
    position * tile_size
}

/// Returns the slot of a grid-aligned tile at `position` facing `normal`.
///
/// Only meaningful when the tile sits on the lattice, which is the case at
/// the final tick of a move.
///
/// # Errors
/// Returns [`GeometryError::OffLattice`] when `position` is further than
/// [`LATTICE_TOLERANCE`] tiles from the position of the rounded slot, or is
/// not finite.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use wrapped_cube::geometry::{coord_from_position, Coord, Direction};
///
/// let c = coord_from_position(Vec3::new(3.0, 1.0, 0.0), Direction::PosZ, 2.0).unwrap();
/// assert_eq!(c, Coord::new(1, 0, 0));
/// assert!(coord_from_position(Vec3::new(2.2, 1.0, 0.0), Direction::PosZ, 2.0).is_err());
/// ```
pub fn coord_from_position(
    position: Vec3,
    normal: Direction,
    tile_size: f32,
) -> Result<Coord, GeometryError> {
    let flat = normal.index();
    let mut grid = position / tile_size - Vec3::splat(0.5);
    grid[flat] += 0.5;
    let coord = Coord::from(grid.round().as_ivec3());

    let drift = position.distance(position_from_coord(coord, normal, tile_size));
    if !drift.is_finite() || drift > LATTICE_TOLERANCE * tile_size {
        return Err(GeometryError::OffLattice {
            position: position.to_array(),
            normal,
        });
    }
    Ok(coord)
}

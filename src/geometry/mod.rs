//! Provides the lattice geometry shared by tiles and choreographies.
//!
//! This module provides:
//! - Axis-aligned directions (face normals and hinge axes)
//! - Integer lattice slots and the slot ↔ position mapping
//! - Hinge rotation and world-space quaternion composition
//!
//! # Examples
//! ```
//! use wrapped_cube::geometry::{position_from_coord, Coord, Direction};
//!
//! let p = position_from_coord(Coord::P000, Direction::NegZ, 2.0);
//! assert_eq!(p.to_array(), [1.0, 1.0, 0.0]);
//! ```

pub mod coord;
pub mod direction;
pub mod rotation;

pub use coord::{coord_from_position, position_from_coord, Coord, LATTICE_TOLERANCE};
pub use direction::Direction;
pub use rotation::{premultiply, rotate_2d, Hinge};

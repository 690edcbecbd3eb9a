//! Provides the wrapper tile: one movable face of the cube.
//!
//! A tile keeps a discrete slot (`coord` + `normal`) that is authoritative at
//! phase boundaries, and a continuous pose that is updated every tick. The
//! last tick of every move snaps the pose back onto the lattice.
//!
//! # Examples
//! ```
//! use wrapped_cube::geometry::{Coord, Direction};
//! use wrapped_cube::tile::Tile;
//!
//! let mut tile = Tile::new(Coord::P100, Direction::NegZ, 2.0);
//! for step in 1..=10 {
//!     tile.rotate(Coord::P100, Direction::PosY, true, step, 10).unwrap();
//! }
//! assert_eq!(tile.coord(), Coord::P100);
//! assert_eq!(tile.normal(), Direction::NegX);
//! ```

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{
    coord_from_position, position_from_coord, premultiply, Coord, Direction, Hinge,
};

/// Continuous placement of a rigid object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

/// One piece of wrapper that covers a single face of the cube.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    coord: Coord,
    normal: Direction,
    position: Vec3,
    orientation: Quat,
    tile_size: f32,
}

impl Default for Tile {
    fn default() -> Self {
        Tile::new(Coord::P000, Direction::NegZ, 1.0)
    }
}

impl Tile {
    /// Creates a tile snapped to `coord` with identity orientation.
    pub fn new(coord: Coord, normal: Direction, tile_size: f32) -> Self {
        Self {
            coord,
            normal,
            position: position_from_coord(coord, normal, tile_size),
            orientation: Quat::IDENTITY,
            tile_size,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn normal(&self) -> Direction {
        self.normal
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            orientation: self.orientation,
        }
    }

    /// Moves the tile to a slot without interpolation and clears its rotation.
    pub fn place(&mut self, coord: Coord, normal: Direction) {
        self.coord = coord;
        self.normal = normal;
        self.orientation = Quat::IDENTITY;
        self.reset_position_from_coord();
    }

    /// Recomputes the position from the current slot.
    pub fn reset_position_from_coord(&mut self) {
        self.position = position_from_coord(self.coord, self.normal, self.tile_size);
    }

    /// Recomputes the slot from the current position.
    ///
    /// # Errors
    /// Returns [`GeometryError::OffLattice`] if the tile is mid-move.
    pub fn reset_coord_from_position(&mut self) -> Result<(), GeometryError> {
        self.coord = coord_from_position(self.position, self.normal, self.tile_size)?;
        Ok(())
    }

    fn snap(&mut self) -> Result<(), GeometryError> {
        self.reset_coord_from_position()?;
        self.reset_position_from_coord();
        tracing::trace!(coord = ?self.coord, normal = ?self.normal, "tile snapped");
        Ok(())
    }

    /// Interpolates the position from the current slot towards `target`.
    ///
    /// `step / steps` is the fraction of the move completed after this call.
    /// The slot only changes on the final step, where the tile snaps exactly
    /// onto `target`.
    ///
    /// # Errors
    /// Returns [`GeometryError::StepRange`] unless `1 <= step <= steps`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use wrapped_cube::geometry::{Coord, Direction};
    /// use wrapped_cube::tile::Tile;
    ///
    /// let mut tile = Tile::new(Coord::P000, Direction::NegZ, 2.0);
    /// tile.translate(Coord::P100, 5, 10).unwrap();
    /// assert_eq!(tile.position(), Vec3::new(2.0, 1.0, 0.0));
    /// assert_eq!(tile.coord(), Coord::P000);
    /// ```
    pub fn translate(&mut self, target: Coord, step: u32, steps: u32) -> Result<(), GeometryError> {
        check_step(step, steps)?;
        let from = position_from_coord(self.coord, self.normal, self.tile_size);
        let to = position_from_coord(target, self.normal, self.tile_size);
        let t = step as f32 / steps as f32;
        self.position = from * (1.0 - t) + to * t;

        if step == steps {
            self.snap()?;
        }
        Ok(())
    }

    /// Folds the tile one step about the hinge line through `hinge` along `axis`.
    ///
    /// A full move of `steps` calls sweeps a quarter turn. `opening` selects
    /// the sense of the swing. Each call both swings the position about the
    /// hinge and composes the matching world-space rotation onto the
    /// orientation, so the visible face turns with the swing. On the final
    /// step the normal turns a quarter about `axis` and the tile snaps.
    ///
    /// # Errors
    /// Returns [`GeometryError::StepRange`] unless `1 <= step <= steps`, or
    /// [`GeometryError::OffLattice`] if the swing does not end on the lattice.
    pub fn rotate(
        &mut self,
        hinge: Coord,
        axis: Direction,
        opening: bool,
        step: u32,
        steps: u32,
    ) -> Result<(), GeometryError> {
        check_step(step, steps)?;
        let theta_close = if opening { 1.0 } else { -1.0 };
        let theta = axis.sign() as f32 * FRAC_PI_2 / steps as f32;

        let line = Hinge::new(hinge.scaled(self.tile_size), axis);
        self.position = line.swing(self.position, theta_close * theta);

        let delta = Quat::from_axis_angle(axis.to_vec3(), -theta * theta_close);
        self.orientation = premultiply(self.orientation, delta);

        if step == steps {
            self.normal.rotate_half_pi(axis);
            self.snap()?;
        }
        Ok(())
    }
}

fn check_step(step: u32, steps: u32) -> Result<(), GeometryError> {
    if step < 1 || step > steps {
        return Err(GeometryError::StepRange { step, steps });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_sits_on_its_slot() {
        let tile = Tile::new(Coord::new(-1, 0, 0), Direction::NegZ, 2.0);
        assert_eq!(tile.position(), Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(tile.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn test_step_range_is_checked() {
        let mut tile = Tile::default();
        assert_eq!(
            tile.translate(Coord::P100, 0, 10),
            Err(GeometryError::StepRange { step: 0, steps: 10 })
        );
        assert_eq!(
            tile.rotate(Coord::P000, Direction::PosX, true, 11, 10),
            Err(GeometryError::StepRange { step: 11, steps: 10 })
        );
        assert!(tile.translate(Coord::P100, 0, 0).is_err());
        // A rejected call leaves the tile untouched.
        assert_eq!(tile, Tile::default());
    }

    #[test]
    fn test_translate_first_and_last_step() {
        let mut tile = Tile::new(Coord::P000, Direction::NegZ, 2.0);
        let target = Coord::new(3, -2, 0);
        tile.translate(target, 1, 10).unwrap();
        let from = position_from_coord(Coord::P000, Direction::NegZ, 2.0);
        let to = position_from_coord(target, Direction::NegZ, 2.0);
        assert!(tile.position().abs_diff_eq(from.lerp(to, 0.1), 1e-6));
        assert_eq!(tile.coord(), Coord::P000);

        tile.translate(target, 10, 10).unwrap();
        assert_eq!(tile.position(), to);
        assert_eq!(tile.coord(), target);
    }

    #[test]
    fn test_translate_keeps_normal_axis_flush() {
        let mut tile = Tile::new(Coord::P000, Direction::PosY, 2.0);
        tile.translate(Coord::new(0, 2, 0), 10, 10).unwrap();
        assert_eq!(tile.position(), Vec3::new(1.0, 4.0, 1.0));
    }

    #[test]
    fn test_place_resets_orientation() {
        let mut tile = Tile::new(Coord::P000, Direction::NegZ, 2.0);
        tile.rotate(Coord::P000, Direction::PosX, true, 1, 4).unwrap();
        assert_ne!(tile.orientation(), Quat::IDENTITY);
        tile.place(Coord::P010, Direction::NegZ);
        assert_eq!(tile.orientation(), Quat::IDENTITY);
        assert_eq!(tile.position(), Vec3::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn test_rotate_and_reverse_restores_slot() {
        let mut tile = Tile::new(Coord::new(0, -1, 0), Direction::NegZ, 2.0);
        for step in 1..=25 {
            tile.rotate(Coord::P000, Direction::NegX, true, step, 25).unwrap();
        }
        assert_eq!(tile.coord(), Coord::P000);
        assert!(tile.normal().is_parallel(Direction::PosY));

        for step in 1..=25 {
            tile.rotate(Coord::P000, Direction::NegX, false, step, 25).unwrap();
        }
        assert_eq!(tile.coord(), Coord::new(0, -1, 0));
        assert!(tile.normal().is_parallel(Direction::PosZ));
        assert!(tile.orientation().abs_diff_eq(Quat::IDENTITY, 1e-5));
    }

    #[test]
    fn test_reset_coord_mid_rotation_is_rejected() {
        let mut tile = Tile::new(Coord::P100, Direction::NegZ, 2.0);
        tile.rotate(Coord::P100, Direction::PosY, true, 3, 10).unwrap();
        assert!(matches!(
            tile.reset_coord_from_position(),
            Err(GeometryError::OffLattice { .. })
        ));
    }
}

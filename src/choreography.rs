//! Provides the per-sequence fold tables driving the wrapper tiles.
//!
//! Both choreographies share one engine; they differ only in data: the
//! starting net of six tiles on the `z = 0` plane and the five folds that
//! close it into a cube.
//!
//! # Examples
//! ```
//! use wrapped_cube::choreography::Choreography;
//! use wrapped_cube::geometry::{Coord, Direction};
//!
//! let cube1 = Choreography::cube1();
//! assert_eq!(cube1.start_slot(1), (Coord::new(1, 0, 0), Direction::NegZ));
//! assert_eq!(cube1.fold(-1).unwrap().tiles, &[1]);
//! ```

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec3};

use crate::geometry::{Coord, Direction};
use crate::timeline::FOLD_COUNT;

/// Number of wrapper tiles.
pub const TILE_COUNT: usize = 6;

/// Normal shared by every tile of a starting net.
pub const START_NORMAL: Direction = Direction::NegZ;

/// Wrapper offset, in tiles, while the net lies apart from the cube.
pub const EXPLODED_OFFSET: f32 = -1.0;

/// Wrapper offset, in tiles, once the folded cube encloses the solid volume.
pub const FOLDED_OFFSET: f32 = -0.5;

/// Axis of the free spin between folding and unfolding (normalized on use).
pub const SPIN_AXIS: Vec3 = Vec3::new(1.0, 2.0, 3.0);

/// Assembly orientation at `Init`.
pub fn initial_assembly() -> Quat {
    Quat::from_euler(EulerRot::XYZ, 0.2, PI - 0.2, 0.0)
}

/// One fold: a subset of tiles swinging a quarter turn about a hinge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fold {
    /// Indices of the moving tiles.
    pub tiles: &'static [usize],
    /// Lattice point on the hinge line.
    pub hinge: Coord,
    pub axis: Direction,
    /// Swing sense when folding; unfolding uses the opposite.
    pub opening: bool,
    /// World axis the assembly turns about while a `Flip` runs.
    pub compensation: Vec3,
}

impl Fold {
    const fn new(
        tiles: &'static [usize],
        hinge: Coord,
        axis: Direction,
        opening: bool,
        compensation: Vec3,
    ) -> Self {
        Self {
            tiles,
            hinge,
            axis,
            opening,
            compensation,
        }
    }

    /// Swing sense for a signed fold param: folds (`> 0`) keep `opening`,
    /// unfolds invert it.
    pub fn opening_for(&self, param: i32) -> bool {
        self.opening == (param > 0)
    }
}

/// Static data of one fold sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Choreography {
    pub name: &'static str,
    /// `(x, y)` slot of each tile on the `z = 0` plane.
    pub layout: [(i32, i32); TILE_COUNT],
    pub folds: [Fold; FOLD_COUNT],
}

const CUBE1: Choreography = Choreography {
    name: "cube1",
    layout: [(0, 0), (1, 0), (0, 1), (-1, 0), (0, -1), (0, -2)],
    folds: [
        Fold::new(&[1], Coord::P100, Direction::PosY, true, Vec3::new(0.0, 1.0, 0.0)),
        Fold::new(&[2], Coord::P010, Direction::NegX, false, Vec3::new(0.5, 0.0, 0.0)),
        Fold::new(&[3], Coord::P000, Direction::PosY, false, Vec3::new(1.0, 0.0, 0.0)),
        Fold::new(&[4, 5], Coord::P000, Direction::NegX, true, Vec3::new(1.0, 0.0, 0.0)),
        Fold::new(&[5], Coord::P001, Direction::NegX, true, Vec3::new(0.0, 1.0, 0.0)),
    ],
};

const CUBE2: Choreography = Choreography {
    name: "cube2",
    layout: [(0, 0), (0, 1), (0, 2), (1, 0), (1, -1), (1, -2)],
    folds: [
        Fold::new(&[3, 4, 5], Coord::P100, Direction::PosY, true, Vec3::new(-1.0, 0.0, 0.0)),
        Fold::new(&[4, 5], Coord::P100, Direction::NegZ, true, Vec3::new(1.0, -1.0, 0.0)),
        Fold::new(&[5], Coord::P000, Direction::NegZ, true, Vec3::new(1.0, 0.0, 0.0)),
        Fold::new(&[1, 2], Coord::P010, Direction::NegX, false, Vec3::new(1.0, 0.0, 0.0)),
        Fold::new(&[2], Coord::P011, Direction::NegX, false, Vec3::new(0.0, -1.0, 0.0)),
    ],
};

impl Choreography {
    /// A cross-shaped net folding around tile 0.
    pub fn cube1() -> Self {
        CUBE1
    }

    /// Two columns of three tiles.
    pub fn cube2() -> Self {
        CUBE2
    }

    /// Both sequences, in the order the clock alternates between them.
    pub fn pair() -> [Self; 2] {
        [CUBE1, CUBE2]
    }

    /// Starting slot of tile `index`.
    pub fn start_slot(&self, index: usize) -> (Coord, Direction) {
        let (x, y) = self.layout[index];
        (Coord::new(x, y, 0), START_NORMAL)
    }

    /// Fold for a signed param (`±1..=±FOLD_COUNT`); `None` when out of range.
    pub fn fold(&self, param: i32) -> Option<&Fold> {
        let index = (param.unsigned_abs() as usize).checked_sub(1)?;
        self.folds.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_lookup_is_sign_agnostic() {
        let cube2 = Choreography::cube2();
        assert_eq!(cube2.fold(2), cube2.fold(-2));
        assert_eq!(cube2.fold(3).unwrap().tiles, &[5]);
        assert!(cube2.fold(0).is_none());
        assert!(cube2.fold(6).is_none());
    }

    #[test]
    fn test_every_flow_param_has_a_fold() {
        let bound = FOLD_COUNT as i32;
        for choreography in Choreography::pair() {
            for param in (-bound..=bound).filter(|&p| p != 0) {
                assert!(choreography.fold(param).is_some(), "{} {param}", choreography.name);
            }
        }
    }

    #[test]
    fn test_opening_inverts_on_unfold() {
        let fold = Choreography::cube1().folds[1];
        assert!(!fold.opening_for(2));
        assert!(fold.opening_for(-2));
    }

    #[test]
    fn test_layouts_have_distinct_slots() {
        for choreography in Choreography::pair() {
            for i in 0..TILE_COUNT {
                for j in i + 1..TILE_COUNT {
                    assert_ne!(choreography.layout[i], choreography.layout[j], "{}", choreography.name);
                }
            }
        }
    }

    #[test]
    fn test_fold_tiles_are_valid_indices() {
        for choreography in Choreography::pair() {
            for fold in &choreography.folds {
                assert!(fold.tiles.iter().all(|&t| t < TILE_COUNT));
                assert!(fold.compensation.length() > 0.0);
            }
        }
    }
}

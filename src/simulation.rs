//! Provides the simulation context: clock, six tiles and the assembly pose.
//!
//! Each call to [`Simulation::advance`] processes exactly one tick: it looks
//! up the step at the current clock, applies its effect, then moves the
//! clock forward by one. Because the clock never skips, the final tick of
//! every move (where tiles snap) is always visited.
//!
//! # Examples
//! ```
//! use wrapped_cube::config::CubeConfig;
//! use wrapped_cube::simulation::Simulation;
//!
//! let mut sim = Simulation::new(CubeConfig::default()).unwrap();
//! sim.run_until(251).unwrap();
//! // Folded: every tile now covers a face of the unit lattice cube.
//! let faces: Vec<_> = sim.tiles().iter().map(|t| t.normal().index()).collect();
//! assert_eq!(faces.iter().filter(|&&axis| axis == 0).count(), 2);
//! ```

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::choreography::{self, Choreography, TILE_COUNT};
use crate::config::CubeConfig;
use crate::error::{ConfigError, GeometryError};
use crate::geometry::{premultiply, Coord, Direction};
use crate::tile::{Pose, Tile};
use crate::timeline::{PhaseKind, Step, Timeline};

/// Discrete and continuous state of one tile in a [`Frame`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TileState {
    pub coord: Coord,
    pub normal: Direction,
    pub pose: Pose,
}

/// Everything a renderer needs to draw one tick.
///
/// Tile poses are relative to the wrapper, which is offset by
/// `wrapper_offset` inside the assembly; the assembly is rotated by
/// `assembly` about the world origin.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    /// Clock of the next tick; the poses include every tick before it.
    pub clock: u64,
    pub tile_size: f32,
    pub tiles: [TileState; TILE_COUNT],
    pub wrapper_offset: Vec3,
    pub assembly: Quat,
}

/// Owns all mutable animation state.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: CubeConfig,
    timeline: Timeline,
    choreographies: [Choreography; 2],
    clock: u64,
    tiles: [Tile; TILE_COUNT],
    wrapper_offset: Vec3,
    assembly: Quat,
}

impl Simulation {
    /// Creates a simulation on the standard flow, in the `Init` state of the
    /// first choreography, with the clock at 0.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `config` does not validate.
    pub fn new(config: CubeConfig) -> Result<Self, ConfigError> {
        let timeline = Timeline::standard(config.durations)?;
        Self::with_timeline(config, timeline, Choreography::pair())
    }

    /// Creates a simulation on a custom flow and choreography pair.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `config` does not validate or the
    /// timeline was built from different durations.
    pub fn with_timeline(
        config: CubeConfig,
        timeline: Timeline,
        choreographies: [Choreography; 2],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if *timeline.durations() != config.durations {
            return Err(ConfigError::Invalid(
                "timeline durations differ from the configured ones".into(),
            ));
        }
        let tile = Tile::new(Coord::P000, choreography::START_NORMAL, config.tile_size);
        let mut sim = Self {
            config,
            timeline,
            choreographies,
            clock: 0,
            tiles: std::array::from_fn(|_| tile.clone()),
            wrapper_offset: Vec3::ZERO,
            assembly: Quat::IDENTITY,
        };
        sim.reset(0);
        Ok(sim)
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn config(&self) -> &CubeConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    pub fn wrapper_offset(&self) -> Vec3 {
        self.wrapper_offset
    }

    pub fn assembly(&self) -> Quat {
        self.assembly
    }

    /// The choreography the current clock belongs to.
    pub fn current_choreography(&self) -> &Choreography {
        let step = self.timeline.step_at(self.clock);
        &self.choreographies[step.sequence.index()]
    }

    /// Applies the step at the current clock, then advances the clock by one
    /// tick, wrapping at the timeline period.
    ///
    /// # Errors
    /// Propagates [`GeometryError`] from tile moves; with a validated
    /// timeline this indicates a bug in the fold tables.
    pub fn advance(&mut self) -> Result<Step, GeometryError> {
        let step = self.timeline.step_at(self.clock);
        self.apply(&step)?;
        self.clock = (self.clock + 1) % self.timeline.period();
        Ok(step)
    }

    /// Advances until the clock reads `clock` (modulo the period).
    ///
    /// # Errors
    /// As [`Simulation::advance`].
    pub fn run_until(&mut self, clock: u64) -> Result<(), GeometryError> {
        let target = clock % self.timeline.period();
        while self.clock != target {
            self.advance()?;
        }
        Ok(())
    }

    /// Snapshot of the current poses.
    pub fn frame(&self) -> Frame {
        Frame {
            clock: self.clock,
            tile_size: self.config.tile_size,
            tiles: std::array::from_fn(|i| TileState {
                coord: self.tiles[i].coord(),
                normal: self.tiles[i].normal(),
                pose: self.tiles[i].pose(),
            }),
            wrapper_offset: self.wrapper_offset,
            assembly: self.assembly,
        }
    }

    fn reset(&mut self, sequence: usize) {
        let choreography = self.choreographies[sequence];
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            let (coord, normal) = choreography.start_slot(i);
            tile.place(coord, normal);
        }
        self.wrapper_offset = Vec3::splat(choreography::EXPLODED_OFFSET * self.config.tile_size);
        self.assembly = choreography::initial_assembly();
        tracing::debug!(choreography = choreography.name, "init");
    }

    fn apply(&mut self, step: &Step) -> Result<(), GeometryError> {
        if step.tick == 1 {
            tracing::debug!(
                clock = self.clock,
                kind = ?step.kind,
                param = step.param,
                duration = step.duration,
                "phase start"
            );
        }

        match step.kind {
            PhaseKind::Init => self.reset(step.sequence.index()),
            PhaseKind::Begin | PhaseKind::End | PhaseKind::Sleep => {}
            PhaseKind::Translate => {
                let exploded = Vec3::splat(choreography::EXPLODED_OFFSET * self.config.tile_size);
                let folded = Vec3::splat(choreography::FOLDED_OFFSET * self.config.tile_size);
                let (from, to) = if step.param > 0 {
                    (exploded, folded)
                } else {
                    (folded, exploded)
                };
                self.wrapper_offset = if step.is_final() {
                    to
                } else {
                    from.lerp(to, step.rate())
                };
            }
            PhaseKind::Flip | PhaseKind::Rotate => {
                let choreography = &self.choreographies[step.sequence.index()];
                let fold = *choreography
                    .fold(step.param)
                    .unwrap_or_else(|| unreachable!("Timeline::new bounds fold params by FOLD_COUNT"));
                let opening = fold.opening_for(step.param);
                for &index in fold.tiles {
                    self.tiles[index].rotate(
                        fold.hinge,
                        fold.axis,
                        opening,
                        step.tick,
                        step.duration,
                    )?;
                }
                if step.kind == PhaseKind::Flip {
                    let delta = Quat::from_axis_angle(
                        fold.compensation.normalize(),
                        FRAC_PI_2 / step.duration as f32,
                    );
                    self.assembly = premultiply(self.assembly, delta);
                }
            }
            PhaseKind::Spin => {
                let delta = Quat::from_axis_angle(
                    choreography::SPIN_AXIS.normalize(),
                    TAU / step.duration as f32,
                );
                self.assembly = premultiply(self.assembly, delta);
            }
        }
        Ok(())
    }
}

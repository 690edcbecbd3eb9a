//! Provides the deterministic fold/unfold timeline of a cube wrapped in six
//! hinged tiles.
//!
//! Given a single tick counter, the crate computes the exact pose of every
//! wrapper tile and of the whole assembly: tiles fold away from a flat net
//! around the cube, the cube spins, and the tiles unfold again. Tile slots
//! are integral at every phase boundary; in between, poses are continuous.
//! Two fold sequences alternate forever.
//!
//! Drawing is left to a sink that consumes [`simulation::Frame`]s; a CPU
//! reference rasterizer lives in [`renderer`].
//!
//! # Examples
//! ```
//! use wrapped_cube::config::CubeConfig;
//! use wrapped_cube::simulation::Simulation;
//!
//! let mut sim = Simulation::new(CubeConfig::default()).unwrap();
//! let step = sim.advance().unwrap();
//! assert_eq!(step.tick, 0);
//! assert_eq!(sim.clock(), 1);
//! ```

pub mod choreography;
pub mod config;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod simulation;
pub mod tile;
pub mod timeline;

pub use config::CubeConfig;
pub use error::{ConfigError, GeometryError};
pub use simulation::{Frame, Simulation};

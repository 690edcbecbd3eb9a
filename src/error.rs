//! Provides the error types raised by the geometry model and configuration.
//!
//! Geometry errors are contract violations: the timeline only ever emits
//! in-range progress values, so in a running simulation they indicate a
//! driver bug rather than bad user input.
//!
//! # Examples
//! ```
//! use wrapped_cube::error::GeometryError;
//!
//! let err = GeometryError::StepRange { step: 0, steps: 10 };
//! assert_eq!(err.to_string(), "step 0 is outside 1..=10");
//! ```

use crate::geometry::Direction;

/// Errors raised by [`Direction`] construction and tile operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The vector is not a unit axis vector.
    #[error("invalid direction ({x}, {y}, {z}): expected exactly one ±1 component")]
    InvalidDirection { x: i32, y: i32, z: i32 },

    /// A progress numerator outside `1..=steps`.
    #[error("step {step} is outside 1..={steps}")]
    StepRange { step: u32, steps: u32 },

    /// The inverse lattice mapping was asked to round a position that is
    /// not aligned to the grid.
    #[error("position {position:?} is off the lattice for normal {normal:?}")]
    OffLattice { position: [f32; 3], normal: Direction },
}

/// Errors raised while loading or validating a [`crate::config::CubeConfig`]
/// or a timeline flow.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

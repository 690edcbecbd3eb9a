//! Provides the load-time constants of the animation: tile size and phase
//! durations.
//!
//! Nothing here changes while a simulation runs. The defaults reproduce the
//! reference choreography; a JSON file may override any subset of fields.
//!
//! # Examples
//! ```
//! use wrapped_cube::config::CubeConfig;
//!
//! let config = CubeConfig::from_json_str(r#"{ "durations": { "flip": 10 } }"#).unwrap();
//! assert_eq!(config.durations.flip, 10);
//! assert_eq!(config.durations.spin, 100);
//! assert_eq!(config.tile_size, 2.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::timeline::PhaseKind;

/// Number of ticks each phase kind lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub begin: u32,
    pub translate: u32,
    pub rotate: u32,
    pub flip: u32,
    pub spin: u32,
    pub end: u32,
    pub sleep: u32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            begin: 100,
            translate: 25,
            rotate: 25,
            flip: 25,
            spin: 100,
            end: 100,
            sleep: 50,
        }
    }
}

impl PhaseDurations {
    /// Duration of one entry of `kind`. `Init` is instantaneous.
    ///
    /// # Examples
    /// ```
    /// use wrapped_cube::config::PhaseDurations;
    /// use wrapped_cube::timeline::PhaseKind;
    ///
    /// let durations = PhaseDurations::default();
    /// assert_eq!(durations.of(PhaseKind::Init), 0);
    /// assert_eq!(durations.of(PhaseKind::Flip), 25);
    /// ```
    pub fn of(&self, kind: PhaseKind) -> u32 {
        match kind {
            PhaseKind::Init => 0,
            PhaseKind::Begin => self.begin,
            PhaseKind::Translate => self.translate,
            PhaseKind::Rotate => self.rotate,
            PhaseKind::Flip => self.flip,
            PhaseKind::Spin => self.spin,
            PhaseKind::End => self.end,
            PhaseKind::Sleep => self.sleep,
        }
    }
}

/// Top-level animation configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Edge length of one tile (and of the solid cube) in world units.
    pub tile_size: f32,
    pub durations: PhaseDurations,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            tile_size: 2.0,
            durations: PhaseDurations::default(),
        }
    }
}

impl CubeConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CubeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`CubeConfig::from_json_str`].
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    ///
    /// use wrapped_cube::config::CubeConfig;
    ///
    /// assert!(CubeConfig::from_path(Path::new("does_not_exist.json")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that the tile size is usable and every duration is positive.
    ///
    /// A zero-length phase would never reach its final tick, so a tile
    /// moving in it would never snap.
    ///
    /// # Examples
    /// ```
    /// use wrapped_cube::config::CubeConfig;
    ///
    /// let mut config = CubeConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.durations.spin = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        let d = &self.durations;
        for (name, ticks) in [
            ("begin", d.begin),
            ("translate", d.translate),
            ("rotate", d.rotate),
            ("flip", d.flip),
            ("spin", d.spin),
            ("end", d.end),
            ("sleep", d.sleep),
        ] {
            if ticks == 0 {
                return Err(ConfigError::Invalid(format!("{name} duration must be at least 1 tick")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_timing() {
        let d = PhaseDurations::default();
        assert_eq!((d.begin, d.translate, d.flip, d.spin, d.end), (100, 25, 25, 100, 100));
        assert_eq!(CubeConfig::default().tile_size, 2.0);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(CubeConfig::from_json_str("{}").unwrap(), CubeConfig::default());
    }

    #[test]
    fn test_rejects_bad_tile_size() {
        for json in [r#"{"tile_size": 0.0}"#, r#"{"tile_size": -1.0}"#] {
            assert!(matches!(
                CubeConfig::from_json_str(json),
                Err(ConfigError::Invalid(_))
            ));
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            CubeConfig::from_json_str("{ tile_size: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = CubeConfig::from_json_str(r#"{"durations": {"translate": 0}}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: translate duration must be at least 1 tick"
        );
    }
}

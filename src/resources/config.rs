//! Coordinator configuration resource.
//!
//! Ignite tuning is read from a JSON file below the configuration root:
//!
//! ```json
//! {
//!   "IgniteVelocity": 0.45,
//!   "IgniteRepeat": 0.5,
//!   "IgniteDamage": 1,
//!   "IgniteParticle": "particles/burning_fx/env_fire_small.vpcf"
//! }
//! ```
//!
//! Every key is optional. Values outside their accepted range fall back to
//! the default individually, so one typo does not discard the whole file.
//! A missing or malformed file leaves the defaults in place; configuration
//! problems are logged, never fatal.

use bevy_ecs::prelude::*;
use log::{info, warn};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default safe values
pub const DEFAULT_IGNITE_VELOCITY: f32 = 0.45;
pub const DEFAULT_IGNITE_REPEAT: f32 = 0.5;
pub const DEFAULT_IGNITE_DAMAGE: i32 = 1;
pub const DEFAULT_IGNITE_PARTICLE: &str = "particles/burning_fx/env_fire_small.vpcf";

const IGNITE_VELOCITY_RANGE: (f32, f32) = (0.001, 1.0);
const IGNITE_REPEAT_RANGE: (f32, f32) = (0.1, 1.0);
const IGNITE_DAMAGE_RANGE: (i32, i32) = (1, 1000);

const CONFIG_FILE: &str = "resources/config/config.json";
const MAPS_DIR: &str = "resources/maps";

/// Failure to read or parse a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory the configuration and per-map tables are read from.
#[derive(Resource, Debug, Clone)]
pub struct ConfigRoot(pub PathBuf);

impl ConfigRoot {
    pub fn config_file(&self) -> PathBuf {
        self.0.join(CONFIG_FILE)
    }

    pub fn map_file(&self, map: &str) -> PathBuf {
        self.0.join(MAPS_DIR).join(format!("{map}.json"))
    }
}

/// On-disk shape of the configuration file. Missing keys stay `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawConfig {
    ignite_velocity: Option<f32>,
    ignite_repeat: Option<f32>,
    ignite_damage: Option<i32>,
    ignite_particle: Option<String>,
}

/// Validated ignite tuning.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EntityFixConfig {
    /// Velocity modifier multiplier applied per ignite tick.
    pub ignite_velocity: f32,
    /// Seconds between ignite ticks.
    pub ignite_repeat: f32,
    /// Health removed per ignite tick.
    pub ignite_damage: i32,
    /// Effect path of the burning visual.
    pub ignite_particle: String,
}

impl Default for EntityFixConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityFixConfig {
    pub fn new() -> Self {
        Self {
            ignite_velocity: DEFAULT_IGNITE_VELOCITY,
            ignite_repeat: DEFAULT_IGNITE_REPEAT,
            ignite_damage: DEFAULT_IGNITE_DAMAGE,
            ignite_particle: DEFAULT_IGNITE_PARTICLE.to_string(),
        }
    }

    /// Load from `path`, validating each value.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = read_json(path)?;
        let config = Self::from_raw(raw);
        info!(
            "Loaded config: ignite velocity={}, repeat={}s, damage={}, particle={}",
            config.ignite_velocity, config.ignite_repeat, config.ignite_damage, config.ignite_particle
        );
        Ok(config)
    }

    /// Load from the configuration root, degrading to defaults on any error.
    pub fn load_or_default(root: &ConfigRoot) -> Self {
        let path = root.config_file();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::new();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using defaults");
                Self::new()
            }
        }
    }

    fn from_raw(raw: RawConfig) -> Self {
        let defaults = Self::new();
        Self {
            ignite_velocity: in_range(
                "IgniteVelocity",
                raw.ignite_velocity,
                IGNITE_VELOCITY_RANGE,
                defaults.ignite_velocity,
            ),
            ignite_repeat: in_range(
                "IgniteRepeat",
                raw.ignite_repeat,
                IGNITE_REPEAT_RANGE,
                defaults.ignite_repeat,
            ),
            ignite_damage: in_range(
                "IgniteDamage",
                raw.ignite_damage,
                IGNITE_DAMAGE_RANGE,
                defaults.ignite_damage,
            ),
            ignite_particle: match raw.ignite_particle {
                Some(path) if !path.trim().is_empty() => path,
                Some(_) => {
                    warn!("IgniteParticle is blank, using default");
                    defaults.ignite_particle
                }
                None => defaults.ignite_particle,
            },
        }
    }
}

fn in_range<T: PartialOrd + Copy + fmt::Display>(
    key: &str,
    value: Option<T>,
    (min, max): (T, T),
    default: T,
) -> T {
    match value {
        Some(v) if v >= min && v <= max => v,
        Some(v) => {
            warn!("{key}={v} outside [{min}, {max}], using {default}");
            default
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(json: &str) -> EntityFixConfig {
        EntityFixConfig::from_raw(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn defaults_match_constants() {
        let config = EntityFixConfig::default();
        assert_eq!(config.ignite_velocity, DEFAULT_IGNITE_VELOCITY);
        assert_eq!(config.ignite_repeat, DEFAULT_IGNITE_REPEAT);
        assert_eq!(config.ignite_damage, DEFAULT_IGNITE_DAMAGE);
        assert_eq!(config.ignite_particle, DEFAULT_IGNITE_PARTICLE);
    }

    #[test]
    fn in_range_values_are_kept() {
        let config = parse(
            r#"{"IgniteVelocity":0.9,"IgniteRepeat":0.25,"IgniteDamage":7,"IgniteParticle":"fx/flame.vpcf"}"#,
        );
        assert_eq!(config.ignite_velocity, 0.9);
        assert_eq!(config.ignite_repeat, 0.25);
        assert_eq!(config.ignite_damage, 7);
        assert_eq!(config.ignite_particle, "fx/flame.vpcf");
    }

    #[test]
    fn out_of_range_values_fall_back_individually() {
        let config = parse(r#"{"IgniteVelocity":2.0,"IgniteRepeat":0.3,"IgniteDamage":0}"#);
        assert_eq!(config.ignite_velocity, DEFAULT_IGNITE_VELOCITY);
        assert_eq!(config.ignite_repeat, 0.3);
        assert_eq!(config.ignite_damage, DEFAULT_IGNITE_DAMAGE);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let config = parse(r#"{"IgniteVelocity":0.001,"IgniteRepeat":1.0,"IgniteDamage":1000}"#);
        assert_eq!(config.ignite_velocity, 0.001);
        assert_eq!(config.ignite_repeat, 1.0);
        assert_eq!(config.ignite_damage, 1000);
    }

    #[test]
    fn blank_particle_falls_back() {
        let config = parse(r#"{"IgniteParticle":"   "}"#);
        assert_eq!(config.ignite_particle, DEFAULT_IGNITE_PARTICLE);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let root = ConfigRoot(dir.path().to_path_buf());
        assert_eq!(EntityFixConfig::load_or_default(&root), EntityFixConfig::new());
    }

    #[test]
    fn malformed_file_yields_defaults_and_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = ConfigRoot(dir.path().to_path_buf());
        let path = root.config_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(matches!(
            EntityFixConfig::load_from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(EntityFixConfig::load_or_default(&root), EntityFixConfig::new());
    }
}

//! Configuration types for loading particle field scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – seed and headless run length
//! - [`ParametersConfig`] – the runtime knobs (gravity, radius, damping, ...)
//! - [`PaletteConfig`]    – idle and highlight colours
//! - [`SpawnConfig`]      – box fresh particles are drawn from
//! - [`CameraConfig`]     – perspective camera and probe depth
//! - [`AudioConfig`]      – gain range the orbit fraction is mapped onto
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! Every section and every field is optional; anything left out takes the
//! value of the cursor demo.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   seed: 42
//!   frames: 600             # headless run length
//!
//! parameters:
//!   gravity: 2.0            # G
//!   influence_radius: 1.0   # R
//!   damping: 0.99
//!   dt: 0.016
//!   max_distance: 10.0      # M
//!   escape_velocity: 0.25
//!   particle_size: 0.005
//!   particle_count: 100000
//!
//! palette:
//!   idle: [0.1, 0.1, 0.2]
//!   highlight: [0.8, 0.7, 0.7]
//!
//! spawn:
//!   half_extents: [5.0, 5.0, 0.25]
//!   velocity_jitter: [0.05, 0.05, 0.0025]
//!
//! camera:
//!   eye: [0.0, 0.0, 5.0]
//!   target: [0.0, 0.0, 0.0]
//!   up: [0.0, 1.0, 0.0]
//!   fov_y_degrees: 75.0
//!   aspect: 1.7778
//!   probe_depth: 5.0        # defaults to eye.z
//!
//! audio:
//!   min_gain: 0.01
//!   max_gain: 1.0
//! ```
//!
//! Knob values outside their range are clamped when the scenario is built.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::params::{Palette, SimParams, SpawnVolume};
use crate::simulation::probe::CameraRig;
use crate::simulation::signal::OrbitGain;
use crate::simulation::states::NVec3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Engine-level options
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub seed: u64,   // rng seed so spawns are reproducible
    pub frames: u64, // frames to run in headless mode
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { seed: 42, frames: 600 }
    }
}

/// Runtime knobs, see [`SimParams`]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub gravity: f32,
    pub influence_radius: f32,
    pub damping: f32,
    pub dt: f32,
    pub max_distance: f32,
    pub escape_velocity: f32,
    pub particle_size: f32,
    pub particle_count: usize,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = SimParams::default();
        Self {
            gravity: p.gravity,
            influence_radius: p.influence_radius,
            damping: p.damping,
            dt: p.dt,
            max_distance: p.max_distance,
            escape_velocity: p.escape_velocity,
            particle_size: p.particle_size,
            particle_count: p.particle_count,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub idle: [f32; 3],
    pub highlight: [f32; 3],
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let p = Palette::default();
        Self {
            idle: p.idle.into(),
            highlight: p.highlight.into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub half_extents: [f32; 3],
    pub velocity_jitter: [f32; 3],
}

impl Default for SpawnConfig {
    fn default() -> Self {
        let s = SpawnVolume::default();
        Self {
            half_extents: s.half_extents.into(),
            velocity_jitter: s.velocity_jitter.into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub probe_depth: Option<f32>, // distance down the pointer ray, eye.z when absent
}

impl Default for CameraConfig {
    fn default() -> Self {
        let c = CameraRig::default();
        Self {
            eye: c.eye.into(),
            target: c.target.into(),
            up: c.up.into(),
            fov_y_degrees: c.fov_y_degrees,
            aspect: c.aspect,
            probe_depth: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub min_gain: f32,
    pub max_gain: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        let g = OrbitGain::default();
        Self {
            min_gain: g.min,
            max_gain: g.max,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub palette: PaletteConfig,
    pub spawn: SpawnConfig,
    pub camera: CameraConfig,
    pub audio: AudioConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }

    /// Runtime parameters, every knob clamped to its range
    pub fn sim_params(&self) -> SimParams {
        let p = &self.parameters;
        SimParams {
            gravity: p.gravity,
            influence_radius: p.influence_radius,
            damping: p.damping,
            dt: p.dt,
            max_distance: p.max_distance,
            escape_velocity: p.escape_velocity,
            particle_size: p.particle_size,
            particle_count: p.particle_count,
            palette: Palette {
                idle: NVec3::from(self.palette.idle),
                highlight: NVec3::from(self.palette.highlight),
            },
            spawn: SpawnVolume {
                half_extents: NVec3::from(self.spawn.half_extents),
                velocity_jitter: NVec3::from(self.spawn.velocity_jitter),
            },
        }
        .clamped()
    }

    pub fn camera_rig(&self) -> CameraRig {
        let c = &self.camera;
        CameraRig {
            eye: NVec3::from(c.eye),
            target: NVec3::from(c.target),
            up: NVec3::from(c.up),
            fov_y_degrees: c.fov_y_degrees,
            aspect: c.aspect,
        }
    }

    pub fn probe_depth(&self) -> f32 {
        self.camera.probe_depth.unwrap_or(self.camera.eye[2])
    }

    pub fn orbit_gain(&self) -> OrbitGain {
        OrbitGain {
            min: self.audio.min_gain,
            max: self.audio.max_gain,
        }
    }
}

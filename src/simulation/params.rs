//! Runtime parameters for the particle field
//!
//! `SimParams` is a plain value owned by the host loop and handed to the
//! kernel by reference every frame. Runtime changes go through
//! [`SimParams::set`], which clamps each [`Knob`] to its range and tells the
//! caller whether the field has to be reallocated.

use log::{debug, warn};

use crate::simulation::states::NVec3;

pub const DEFAULT_GRAVITY: f32 = 2.0;
pub const DEFAULT_ESCAPE_VELOCITY: f32 = 0.25;
pub const DEFAULT_INFLUENCE_RADIUS: f32 = 1.0;
pub const DEFAULT_DAMPING: f32 = 0.99;
pub const DEFAULT_DT: f32 = 0.016;
pub const DEFAULT_MAX_DISTANCE: f32 = 10.0;
pub const DEFAULT_PARTICLE_SIZE: f32 = 0.005;
pub const DEFAULT_PARTICLE_COUNT: usize = 100_000;

/// Idle and highlight colours particles blend between
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub idle: NVec3,      // outside the influence radius
    pub highlight: NVec3, // right on top of the probe
}

impl Palette {
    /// Colour for influence `k` (0 = idle, 1 = highlight), clamped to [0, 1]
    pub fn blend(&self, k: f32) -> NVec3 {
        let c = self.idle * (1.0 - k) + self.highlight * k;
        c.map(|x| x.clamp(0.0, 1.0))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            idle: NVec3::new(0.1, 0.1, 0.2),
            highlight: NVec3::new(0.8, 0.7, 0.7),
        }
    }
}

/// Box that fresh particles are drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnVolume {
    pub half_extents: NVec3,    // positions uniform in [-h, h] per axis
    pub velocity_jitter: NVec3, // velocities uniform in [-j, j] per axis
}

impl Default for SpawnVolume {
    fn default() -> Self {
        Self {
            half_extents: NVec3::new(5.0, 5.0, 0.25),
            velocity_jitter: NVec3::new(0.05, 0.05, 0.0025),
        }
    }
}

/// Every parameter a host UI can turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Knob {
    Gravity,
    EscapeVelocity,
    InfluenceRadius,
    ParticleSize,
    ParticleCount,
    Damping,
    TimeStep,
    MaxDistance,
}

impl Knob {
    pub const ALL: [Knob; 8] = [
        Knob::Gravity,
        Knob::EscapeVelocity,
        Knob::InfluenceRadius,
        Knob::ParticleSize,
        Knob::ParticleCount,
        Knob::Damping,
        Knob::TimeStep,
        Knob::MaxDistance,
    ];

    /// Inclusive (min, max)
    pub fn range(self) -> (f32, f32) {
        match self {
            Knob::Gravity => (0.0, 10.0),
            Knob::EscapeVelocity => (0.0, 1.0),
            Knob::InfluenceRadius => (0.1, 10.0),
            Knob::ParticleSize => (0.0001, 0.05),
            Knob::ParticleCount => (1000.0, 200_000.0),
            Knob::Damping => (0.0, 0.9999),
            Knob::TimeStep => (0.0001, 0.1),
            Knob::MaxDistance => (0.1, 1000.0),
        }
    }

    /// Slider increment
    pub fn step(self) -> f32 {
        match self {
            Knob::Gravity => 0.1,
            Knob::EscapeVelocity => 0.01,
            Knob::InfluenceRadius => 0.1,
            Knob::ParticleSize => 0.001,
            Knob::ParticleCount => 1000.0,
            Knob::Damping => 0.001,
            Knob::TimeStep => 0.001,
            Knob::MaxDistance => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Knob::Gravity => "Gravity",
            Knob::EscapeVelocity => "Escape Velocity",
            Knob::InfluenceRadius => "Mouse Influence Radius",
            Knob::ParticleSize => "Particle Size",
            Knob::ParticleCount => "Particle Count",
            Knob::Damping => "Damping",
            Knob::TimeStep => "Time Step",
            Knob::MaxDistance => "Max Distance",
        }
    }

    pub fn clamp(self, value: f32) -> f32 {
        let (lo, hi) = self.range();
        value.clamp(lo, hi)
    }
}

/// What a call to [`SimParams::set`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamChange {
    Unchanged,
    Updated,
    Reallocate(usize), // particle count changed, field needs this many particles
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    pub gravity: f32,          // G
    pub influence_radius: f32, // R
    pub damping: f32,          // velocity multiplier per step, 0 < d < 1
    pub dt: f32,               // fixed step
    pub max_distance: f32,     // M, clamp radius around the origin
    pub escape_velocity: f32,  // UI knob, not read by the kernel
    pub particle_size: f32,    // presentation only
    pub particle_count: usize,
    pub palette: Palette,
    pub spawn: SpawnVolume,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            damping: DEFAULT_DAMPING,
            dt: DEFAULT_DT,
            max_distance: DEFAULT_MAX_DISTANCE,
            escape_velocity: DEFAULT_ESCAPE_VELOCITY,
            particle_size: DEFAULT_PARTICLE_SIZE,
            particle_count: DEFAULT_PARTICLE_COUNT,
            palette: Palette::default(),
            spawn: SpawnVolume::default(),
        }
    }
}

impl SimParams {
    pub fn get(&self, knob: Knob) -> f32 {
        match knob {
            Knob::Gravity => self.gravity,
            Knob::EscapeVelocity => self.escape_velocity,
            Knob::InfluenceRadius => self.influence_radius,
            Knob::ParticleSize => self.particle_size,
            Knob::ParticleCount => self.particle_count as f32,
            Knob::Damping => self.damping,
            Knob::TimeStep => self.dt,
            Knob::MaxDistance => self.max_distance,
        }
    }

    /// Set one knob, clamped to its range
    ///
    /// Non-finite values are ignored. A new particle count is rounded to the
    /// nearest whole particle and reported as [`ParamChange::Reallocate`].
    pub fn set(&mut self, knob: Knob, value: f32) -> ParamChange {
        if !value.is_finite() {
            warn!("ignoring non-finite value {value} for {}", knob.label());
            return ParamChange::Unchanged;
        }

        let value = knob.clamp(value);
        if knob == Knob::ParticleCount {
            let count = value.round() as usize;
            if count == self.particle_count {
                return ParamChange::Unchanged;
            }
            debug!("{}: {} -> {}", knob.label(), self.particle_count, count);
            self.particle_count = count;
            return ParamChange::Reallocate(count);
        }

        let current = self.get(knob);
        if current == value {
            return ParamChange::Unchanged;
        }
        debug!("{}: {} -> {}", knob.label(), current, value);
        self.set_unchecked(knob, value);
        ParamChange::Updated
    }

    /// Copy with every knob pulled into its range
    ///
    /// Non-finite values fall back to the defaults.
    pub fn clamped(mut self) -> Self {
        let defaults = SimParams::default();
        for knob in Knob::ALL {
            let v = self.get(knob);
            let v = if v.is_finite() { v } else { defaults.get(knob) };
            self.set_unchecked(knob, knob.clamp(v));
        }
        self
    }

    fn set_unchecked(&mut self, knob: Knob, value: f32) {
        match knob {
            Knob::Gravity => self.gravity = value,
            Knob::EscapeVelocity => self.escape_velocity = value,
            Knob::InfluenceRadius => self.influence_radius = value,
            Knob::ParticleSize => self.particle_size = value,
            Knob::ParticleCount => self.particle_count = value.round() as usize,
            Knob::Damping => self.damping = value,
            Knob::TimeStep => self.dt = value,
            Knob::MaxDistance => self.max_distance = value,
        }
    }
}

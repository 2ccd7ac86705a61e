//! Core state types for the particle field.
//!
//! The field is a structure-of-arrays: three flat `f32` buffers holding
//! positions, velocities and colours, with particle `i` stored at
//! `3*i..3*i + 3` in every buffer. The three buffers always describe the
//! same number of particles; the only ways to change that number are
//! [`ParticleField::new`], [`ParticleField::from_buffers`] and
//! [`ParticleField::respawn`].

use nalgebra::{Vector2, Vector3};
use rand::Rng;
use thiserror::Error;

use crate::simulation::params::SpawnVolume;

pub type NVec2 = Vector2<f32>;
pub type NVec3 = Vector3<f32>;

/// Reasons raw buffers can't be adopted as a field
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("buffer lengths differ (positions {positions}, velocities {velocities}, colors {colors})")]
    LengthMismatch {
        positions: usize,
        velocities: usize,
        colors: usize,
    },

    #[error("buffer length {0} is not a multiple of 3")]
    NotTriples(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    positions: Vec<f32>,  // x, y, z per particle
    velocities: Vec<f32>, // vx, vy, vz per particle
    colors: Vec<f32>,     // r, g, b per particle
}

impl ParticleField {
    /// Field of `count` particles at the origin, at rest, black
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![0.0; 3 * count],
            velocities: vec![0.0; 3 * count],
            colors: vec![0.0; 3 * count],
        }
    }

    /// Adopt existing buffers, checking they describe the same particles
    pub fn from_buffers(positions: Vec<f32>, velocities: Vec<f32>, colors: Vec<f32>) -> Result<Self, FieldError> {
        if positions.len() != velocities.len() || positions.len() != colors.len() {
            return Err(FieldError::LengthMismatch {
                positions: positions.len(),
                velocities: velocities.len(),
                colors: colors.len(),
            });
        }
        if positions.len() % 3 != 0 {
            return Err(FieldError::NotTriples(positions.len()));
        }

        Ok(Self {
            positions,
            velocities,
            colors,
        })
    }

    /// Field of `count` freshly spawned particles
    pub fn spawn<R: Rng + ?Sized>(count: usize, volume: &SpawnVolume, idle: &NVec3, rng: &mut R) -> Self {
        let mut field = Self::new(0);
        field.respawn(count, volume, idle, rng);
        field
    }

    /// Throw away every particle and allocate `count` new ones
    ///
    /// Positions are uniform inside the spawn box, velocities uniform inside
    /// the jitter box, colours set to `idle`. Nothing of the previous state is
    /// carried over, whatever the old count was.
    pub fn respawn<R: Rng + ?Sized>(&mut self, count: usize, volume: &SpawnVolume, idle: &NVec3, rng: &mut R) {
        let mut positions = Vec::with_capacity(3 * count);
        let mut velocities = Vec::with_capacity(3 * count);
        let mut colors = Vec::with_capacity(3 * count);

        for _ in 0..count {
            for axis in 0..3 {
                positions.push(symmetric(rng, volume.half_extents[axis]));
                velocities.push(symmetric(rng, volume.velocity_jitter[axis]));
                colors.push(idle[axis]);
            }
        }

        self.positions = positions;
        self.velocities = velocities;
        self.colors = colors;
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Mutable view of all three buffers at once
    ///
    /// Slices can be rewritten but never resized, so the equal-length
    /// invariant survives whatever the caller does with them.
    pub fn buffers_mut(&mut self) -> (&mut [f32], &mut [f32], &mut [f32]) {
        (&mut self.positions, &mut self.velocities, &mut self.colors)
    }

    pub fn position(&self, i: usize) -> NVec3 {
        NVec3::from_column_slice(&self.positions[3 * i..3 * i + 3])
    }

    pub fn velocity(&self, i: usize) -> NVec3 {
        NVec3::from_column_slice(&self.velocities[3 * i..3 * i + 3])
    }

    pub fn color(&self, i: usize) -> NVec3 {
        NVec3::from_column_slice(&self.colors[3 * i..3 * i + 3])
    }

    pub fn set_position(&mut self, i: usize, x: NVec3) {
        self.positions[3 * i..3 * i + 3].copy_from_slice(x.as_slice());
    }

    pub fn set_velocity(&mut self, i: usize, v: NVec3) {
        self.velocities[3 * i..3 * i + 3].copy_from_slice(v.as_slice());
    }

    pub fn set_color(&mut self, i: usize, c: NVec3) {
        self.colors[3 * i..3 * i + 3].copy_from_slice(c.as_slice());
    }
}

// uniform in [-half, half]
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0 * half
}

//! Cloud volume
//!
//! Density texture for the volumetric cloud box: one byte per voxel of a
//! `size³` cube, Perlin noise faded out toward the corners so the cloud
//! doesn't touch the box walls. Voxels are laid out x fastest, then y, then z.

use log::debug;
use noise::{NoiseFn, Perlin};

pub const DEFAULT_SIZE: usize = 128;
pub const DEFAULT_SCALE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudVolume {
    size: usize,
    data: Vec<u8>,
}

impl CloudVolume {
    pub fn generate(size: usize, scale: f64, seed: u32) -> Self {
        let perlin = Perlin::new(seed);
        let mut data = Vec::with_capacity(size * size * size);
        let half = size as f64 / 2.0;
        let extent = size.max(1) as f64;

        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    let (xf, yf, zf) = (x as f64, y as f64, z as f64);

                    // 1 at the centre, ~0.13 in the corners
                    let offset = [(xf - half) / extent, (yf - half) / extent, (zf - half) / extent];
                    let fade = 1.0 - (offset[0] * offset[0] + offset[1] * offset[1] + offset[2] * offset[2]).sqrt();

                    let n = perlin.get([xf * scale / 1.5, yf * scale, zf * scale / 1.5]);
                    let value = (128.0 + 128.0 * n) * fade * fade;
                    data.push(value.round().clamp(0.0, 255.0) as u8);
                }
            }
        }

        debug!("cloud volume: {size}^3 voxels, scale {scale}, seed {seed}");
        Self { size, data }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn density(&self, x: usize, y: usize, z: usize) -> u8 {
        self.data[(z * self.size + y) * self.size + x]
    }
}

impl Default for CloudVolume {
    fn default() -> Self {
        Self::generate(DEFAULT_SIZE, DEFAULT_SCALE, 0)
    }
}

/// Raymarch settings for the cloud shader
#[derive(Debug, Clone, PartialEq)]
pub struct CloudParams {
    pub threshold: f32, // 0..1
    pub opacity: f32,   // 0..1
    pub range: f32,     // 0..1
    pub steps: u32,     // 0..200
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            threshold: 0.25,
            opacity: 0.25,
            range: 0.1,
            steps: 100,
        }
    }
}

impl CloudParams {
    pub fn clamped(self) -> Self {
        Self {
            threshold: self.threshold.clamp(0.0, 1.0),
            opacity: self.opacity.clamp(0.0, 1.0),
            range: self.range.clamp(0.0, 1.0),
            steps: self.steps.min(200),
        }
    }
}

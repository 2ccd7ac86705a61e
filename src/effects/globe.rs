//! Noise globe uniforms
//!
//! The globe is a displaced icosphere whose shader reads a handful of
//! uniforms. The GUI exposes friendlier numbers ([`GlobeOptions`]); this
//! module turns them into what the shader expects ([`GlobeUniforms`]) and
//! keeps the slow spin going.

use crate::effects::scroll::GlobeScroll;

#[derive(Debug, Clone, PartialEq)]
pub struct PerlinOptions {
    pub time: f32,   // animation speed, 0..10
    pub morph: f32,  // displacement, 0..20 (scroll drives it up to 24)
    pub dnoise: f32, // dark noise, 0..1000
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChromaOptions {
    pub red: f32,    // 0..10
    pub green: f32,  // 0..10
    pub blue: f32,   // 0..10
    pub black: f32,  // 0..3
    pub chroma: f32, // 0..1
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitOptions {
    pub zoom: f32,    // 50..250
    pub speed_y: f32, // -1..1
    pub speed_x: f32, // 0..1
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobeOptions {
    pub perlin: PerlinOptions,
    pub chroma: ChromaOptions,
    pub orbit: OrbitOptions,
    pub point_size: f32, // 1..10
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            perlin: PerlinOptions {
                time: 5.0,
                morph: 0.0,
                dnoise: 2.5,
            },
            chroma: ChromaOptions {
                red: 4.5,
                green: 0.0,
                blue: 3.0,
                black: 0.3,
                chroma: 1.0,
            },
            orbit: OrbitOptions {
                zoom: 150.0,
                speed_y: 0.6,
                speed_x: 0.0,
            },
            point_size: 3.0,
        }
    }
}

impl GlobeOptions {
    /// Take over the scroll-driven values
    pub fn apply_scroll(&mut self, scroll: &GlobeScroll) {
        self.perlin.morph = scroll.morph;
        self.orbit.zoom = scroll.zoom;
    }
}

/// Values handed to the globe shader each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeUniforms {
    pub time: f32,
    pub morph: f32,
    pub dnoise: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub black: f32,
    pub chroma: f32,
    pub point_size: f32,
    pub alpha: f32,
}

impl GlobeUniforms {
    /// `elapsed_ms` is wall time since the page started
    pub fn derive(options: &GlobeOptions, elapsed_ms: f32, alpha: f32) -> Self {
        Self {
            time: options.perlin.time / 10_000.0 * elapsed_ms,
            morph: options.perlin.morph,
            dnoise: options.perlin.dnoise,
            red: options.chroma.red / 10.0,
            green: options.chroma.green / 10.0,
            blue: options.chroma.blue / 10.0,
            black: options.chroma.black / 100.0,
            chroma: options.chroma.chroma,
            point_size: options.point_size,
            alpha,
        }
    }
}

/// Accumulated rotation of the globe, advanced once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobeSpin {
    pub y: f32,
    pub z: f32,
}

impl GlobeSpin {
    pub fn advance(&mut self, orbit: &OrbitOptions) {
        self.y += orbit.speed_y / 100.0;
        self.z += orbit.speed_x / 100.0;
    }
}

//! Pointer to probe projection
//!
//! The probe is where the pointer "is" in the simulation: a point a fixed
//! distance down the camera ray through the pointer. Pixel coordinates are
//! first mapped to normalized device coordinates (x right, y up, both in
//! [-1, 1]), then pushed through a perspective camera.

use crate::simulation::states::{NVec2, NVec3};

const MIN_NORM: f32 = 1.0e-6;

/// Pixel position to NDC, `None` for a zero-sized viewport
pub fn ndc_from_pixels(x: f32, y: f32, width: f32, height: f32) -> Option<NVec2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    Some(NVec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0))
}

/// Latest pointer position, written by input handlers between frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pointer {
    pub ndc: NVec2,
}

impl Pointer {
    /// Move to a pixel position; ignored for a zero-sized viewport
    pub fn move_to_pixels(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(ndc) = ndc_from_pixels(x, y, width, height) {
            self.ndc = ndc;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub origin: NVec3,
    pub direction: NVec3, // unit length
}

impl Ray {
    pub fn at(&self, t: f32) -> NVec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera the pointer is seen through
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub eye: NVec3,
    pub target: NVec3,
    pub up: NVec3,
    pub fov_y_degrees: f32, // vertical field of view
    pub aspect: f32,        // width / height
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            eye: NVec3::new(0.0, 0.0, 5.0),
            target: NVec3::zeros(),
            up: NVec3::y(),
            fov_y_degrees: 75.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl CameraRig {
    /// Ray from the eye through the NDC point on the image plane
    pub fn ray(&self, ndc: &NVec2) -> Ray {
        let forward = (self.target - self.eye)
            .try_normalize(MIN_NORM)
            .unwrap_or_else(|| -NVec3::z());
        let right = forward
            .cross(&self.up)
            .try_normalize(MIN_NORM)
            .unwrap_or_else(NVec3::x);
        let up = right.cross(&forward);

        let half_height = (self.fov_y_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * self.aspect;

        let direction = (forward + right * (ndc.x * half_width) + up * (ndc.y * half_height))
            .try_normalize(MIN_NORM)
            .unwrap_or(forward);

        Ray {
            origin: self.eye,
            direction,
        }
    }

    /// Point `depth` units down the ray through `ndc`
    pub fn probe(&self, ndc: &NVec2, depth: f32) -> NVec3 {
        self.ray(ndc).at(depth)
    }
}

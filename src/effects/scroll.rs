//! Scroll-driven globe settings
//!
//! The globe page is three viewports tall and scrolling through it morphs
//! the sphere, pulls the camera back and fades the surface in. Everything
//! is a linear function of the scroll fraction.

use std::collections::VecDeque;

/// Fraction of the scrollable distance covered, in [0, 1]
///
/// The scroll offset is counted one pixel ahead. A page that cannot scroll
/// reports 0.
pub fn scroll_fraction(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let max_scroll = document_height - viewport_height;
    if !(max_scroll > 0.0) {
        return 0.0;
    }
    ((scroll_y + 1.0) / max_scroll).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeScroll {
    pub morph: f32,    // perlin morph amount
    pub zoom: f32,     // camera zoom option
    pub alpha: f32,    // surface opacity
    pub camera_z: f32, // where the camera eases to
    pub plane_z: f32,  // depth of the flying planes
}

impl GlobeScroll {
    pub fn from_fraction(f: f32) -> Self {
        let zoom = 50.0 + f * 300.0;
        Self {
            morph: f * 24.0,
            zoom,
            alpha: f,
            camera_z: 300.0 - zoom,
            plane_z: -200.0 + f * 250.0,
        }
    }
}

/// Maximum number of flying planes on screen
pub const MAX_PLANES: usize = 7;

/// Fixed-capacity queue of flying planes, oldest dropped first
#[derive(Debug, Clone)]
pub struct PlaneQueue<T> {
    capacity: usize,
    planes: VecDeque<T>,
}

impl<T> PlaneQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            planes: VecDeque::with_capacity(capacity),
        }
    }

    /// Add a plane, handing back the one evicted to make room
    pub fn push(&mut self, plane: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(plane);
        }
        let evicted = if self.planes.len() >= self.capacity {
            self.planes.pop_front()
        } else {
            None
        };
        self.planes.push_back(plane);
        evicted
    }

    pub fn is_full(&self) -> bool {
        self.planes.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.planes.iter()
    }
}

//! Orbit signal
//!
//! The in-orbit share of a frame is the one value the demo feeds outward,
//! as the gain of a background track.

use crate::simulation::engine::StepReport;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitGain {
    pub min: f32, // nothing in orbit
    pub max: f32, // everything in orbit
}

impl Default for OrbitGain {
    fn default() -> Self {
        Self { min: 0.01, max: 1.0 }
    }
}

impl OrbitGain {
    /// Linear map of the orbit fraction onto [min, max]
    pub fn gain(&self, report: &StepReport) -> f32 {
        self.min + (self.max - self.min) * report.fraction()
    }
}

//! One frame of the particle field
//!
//! Glues the two passes together: forces for every particle first, then
//! motion for every particle. The passes are kept apart so the force pass
//! always sees the positions the frame started with.

use crate::simulation::forces::apply_probe_forces;
use crate::simulation::integrator::integrate;
use crate::simulation::params::SimParams;
use crate::simulation::states::{NVec3, ParticleField};

/// What the kernel tells its caller about a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub in_orbit: usize, // particles inside the influence radius
    pub total: usize,    // particles in the field
}

impl StepReport {
    /// Share of particles in orbit, 0 for an empty field
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.in_orbit as f32 / self.total as f32).min(1.0)
    }
}

/// Advance the field by one frame around `probe`
pub fn step(field: &mut ParticleField, probe: &NVec3, params: &SimParams) -> StepReport {
    let in_orbit = apply_probe_forces(field, probe, params);
    integrate(field, params);

    StepReport {
        in_orbit,
        total: field.len(),
    }
}

//! Probe force pass
//!
//! First half of a frame: every particle inside the influence radius gets an
//! inverse-square kick, split into an orbital part (perpendicular to the
//! probe direction, in the XY plane) and a pull back toward the probe.
//! Colours are rewritten for every particle on the way.

use crate::simulation::params::SimParams;
use crate::simulation::states::{NVec3, ParticleField};

/// Apply the probe's force to every particle in range
///
/// Returns how many particles were inside the influence radius ("in orbit").
/// A particle sitting exactly on the probe is in orbit and fully highlighted
/// but gets no kick, since its direction and force are undefined.
pub fn apply_probe_forces(field: &mut ParticleField, probe: &NVec3, params: &SimParams) -> usize {
    let radius = params.influence_radius;
    let palette = &params.palette;
    let (positions, velocities, colors) = field.buffers_mut();

    let mut in_orbit = 0;

    for ((x, v), c) in positions
        .chunks_exact(3)
        .zip(velocities.chunks_exact_mut(3))
        .zip(colors.chunks_exact_mut(3))
    {
        // d points from the probe to the particle
        let d = NVec3::from_column_slice(x) - probe;
        let dist2 = d.norm_squared();
        let dist = dist2.sqrt();

        // also false for NaN
        if !(dist < radius) {
            c.copy_from_slice(palette.idle.as_slice());
            continue;
        }

        in_orbit += 1;

        let influence = 1.0 - dist / radius;
        c.copy_from_slice(palette.blend(influence).as_slice());

        if dist2 == 0.0 {
            continue;
        }

        // G / r^2 scaled by the step
        let accel = params.gravity / dist2 * params.dt;
        if !accel.is_finite() {
            continue;
        }

        let dv = orbital_direction(&d) * accel - d * (accel * 0.5);
        v[0] += dv.x;
        v[1] += dv.y;
        v[2] += dv.z;
    }

    in_orbit
}

/// normalize((-d.y, d.x, 0)), zero when d is parallel to Z
pub fn orbital_direction(d: &NVec3) -> NVec3 {
    let planar = (d.x * d.x + d.y * d.y).sqrt();
    if planar > 0.0 {
        NVec3::new(-d.y / planar, d.x / planar, 0.0)
    } else {
        NVec3::zeros()
    }
}

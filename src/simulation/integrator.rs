//! Motion pass
//!
//! Second half of a frame, run after the force pass has finished with every
//! particle: drift with the current velocity, damp, then clamp back onto the
//! bounding sphere around the origin.

use super::params::SimParams;
use super::states::ParticleField;

/// Advance every particle by one fixed step of `params.dt`
///
/// Positions move with the velocity as it was *before* damping.
pub fn integrate(field: &mut ParticleField, params: &SimParams) {
    let dt = params.dt;
    let damping = params.damping;
    let max_distance = params.max_distance;
    let (positions, velocities, _) = field.buffers_mut();

    for (x, v) in positions.chunks_exact_mut(3).zip(velocities.chunks_exact_mut(3)) {
        // Drift: x_n+1 = x_n + dt * v_n
        for axis in 0..3 {
            x[axis] += v[axis] * dt;
        }

        // Damp: v_n+1 = d * v_n
        for axis in 0..3 {
            v[axis] *= damping;
        }

        // Clamp to the bounding sphere, keeping the direction
        let r = (x[0] * x[0] + x[1] * x[1] + x[2] * x[2]).sqrt();
        if r > max_distance {
            let scale = max_distance / r;
            for axis in 0..3 {
                x[axis] *= scale;
            }
        }
    }
}

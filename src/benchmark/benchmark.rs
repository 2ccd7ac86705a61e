use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::engine::step;
use crate::simulation::params::SimParams;
use crate::simulation::states::{NVec3, ParticleField};

/// Helper to build a spawned field of size `n` with a fixed seed
fn make_field(n: usize, params: &SimParams) -> ParticleField {
    let mut rng = StdRng::seed_from_u64(42);
    ParticleField::spawn(n, &params.spawn, &params.palette.idle, &mut rng)
}

/// Time the kernel for the slider's range of particle counts
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    let params = SimParams::default();
    // probe sitting in the middle of the spawn box, so some particles are in orbit
    let probe = NVec3::zeros();

    println!("N,step_ms,in_orbit");

    for n in (10_000..=200_000).step_by(10_000) {
        let mut field = make_field(n, &params);
        let steps = if n <= 50_000 { 20 } else { 5 };

        // Warm-up one step
        step(&mut field, &probe, &params);

        let t0 = Instant::now();
        let mut in_orbit = 0;
        for _ in 0..steps {
            in_orbit = step(&mut field, &probe, &params).in_orbit;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{}", n, ms, in_orbit);
    }
}

/// Time a full reallocation, what a particle count change costs
pub fn bench_respawn() {
    let params = SimParams::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut field = ParticleField::new(0);

    println!("N,respawn_ms");

    for n in [1_000, 10_000, 100_000, 200_000] {
        let t0 = Instant::now();
        field.respawn(n, &params.spawn, &params.palette.idle, &mut rng);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;
        println!("{},{:.6}", n, ms);
    }
}

use orbitfield::simulation::engine::{step, StepReport};
use orbitfield::simulation::params::{Knob, ParamChange, SimParams, SpawnVolume};
use orbitfield::simulation::probe::{ndc_from_pixels, CameraRig, Pointer};
use orbitfield::simulation::signal::OrbitGain;
use orbitfield::simulation::states::{FieldError, NVec2, NVec3, ParticleField};
use orbitfield::{run_headless, CloudParams, CloudVolume, GlobeOptions, GlobeScroll, GlobeUniforms, PlaneQueue};
use orbitfield::{scroll_fraction, Scenario, ScenarioConfig};

use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f32 = 1e-6;

/// Cursor demo constants: G = 2, R = 1, damping 0.99, dt = 0.016, M = 10
pub fn test_params() -> SimParams {
    SimParams {
        gravity: 2.0,
        influence_radius: 1.0,
        damping: 0.99,
        dt: 0.016,
        max_distance: 10.0,
        ..SimParams::default()
    }
}

/// Field holding one particle with the given state and a non-idle colour
pub fn single_particle(x: NVec3, v: NVec3) -> ParticleField {
    let mut field = ParticleField::new(1);
    field.set_position(0, x);
    field.set_velocity(0, v);
    field.set_color(0, NVec3::new(1.0, 0.0, 1.0));
    field
}

fn is_finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

fn small_scenario(count: usize) -> Scenario {
    let yaml = format!("parameters:\n  particle_count: {count}\nengine:\n  seed: 9\n");
    let cfg = ScenarioConfig::from_yaml_str(&yaml).expect("valid yaml");
    Scenario::build_scenario(&cfg)
}

// ==================================================================================
// Force pass tests
// ==================================================================================

#[test]
fn kernel_kicks_particle_into_orbit() {
    let p = test_params();
    let x0 = NVec3::new(0.5, 0.0, 0.0);
    let mut field = single_particle(x0, NVec3::zeros());

    let report = step(&mut field, &NVec3::zeros(), &p);
    let v = field.velocity(0);
    let x = field.position(0);

    assert_eq!(report, StepReport { in_orbit: 1, total: 1 });

    // orbital component engaged, radial component pulls toward the probe
    assert!(v.y > 0.0, "no orbital velocity: {:?}", v);
    assert!(v.x < 0.0, "not pulled toward probe: {:?}", v);

    // accel = G / r^2 * dt = 0.128; dv = (0, accel, 0) - d * accel / 2
    let v_pre = NVec3::new(-0.032, 0.128, 0.0);
    assert!((v - v_pre * p.damping).norm() < EPS, "velocity {:?}", v);

    // drift used the velocity from before damping
    assert!((x - (x0 + v_pre * p.dt)).norm() < EPS, "position {:?}", x);
}

#[test]
fn particles_outside_radius_feel_nothing() {
    let p = test_params();
    let v0 = NVec3::new(0.1, 0.2, -0.05);

    // well outside, and exactly on the boundary
    for x0 in [NVec3::new(2.0, 0.0, 0.0), NVec3::new(0.0, 1.0, 0.0)] {
        let mut field = single_particle(x0, v0);
        let report = step(&mut field, &NVec3::zeros(), &p);

        assert_eq!(report.in_orbit, 0);
        assert!((field.velocity(0) - v0 * p.damping).norm() < EPS);
        assert!((field.position(0) - (x0 + v0 * p.dt)).norm() < EPS);
        assert_eq!(field.color(0), p.palette.idle);
    }
}

#[test]
fn color_blends_with_distance() {
    let p = test_params();
    let probe = NVec3::new(0.2, -0.3, 0.0);

    for dist in [0.05_f32, 0.25, 0.5, 0.75, 0.95] {
        let mut field = single_particle(probe + NVec3::new(0.0, dist, 0.0), NVec3::zeros());
        step(&mut field, &probe, &p);

        let k = 1.0 - dist / p.influence_radius;
        let expected = p.palette.idle * (1.0 - k) + p.palette.highlight * k;
        let c = field.color(0);

        assert!((c - expected).norm() < 1e-5, "dist {dist}: {:?} vs {:?}", c, expected);
        assert!(c.iter().all(|x| (0.0..=1.0).contains(x)));
    }
}

#[test]
fn particle_on_probe_stays_finite() {
    let p = test_params();
    let probe = NVec3::new(1.0, 1.0, 0.0);
    let v0 = NVec3::new(0.01, 0.0, 0.0);
    let mut field = single_particle(probe, v0);

    let report = step(&mut field, &probe, &p);

    assert!(is_finite(&field.position(0)));
    assert!(is_finite(&field.velocity(0)));
    assert_eq!(report.in_orbit, 1);
    // no kick, only damping
    assert!((field.velocity(0) - v0 * p.damping).norm() < EPS);
    assert_eq!(field.color(0), p.palette.highlight);
}

#[test]
fn particle_straight_above_probe_only_falls_in() {
    let p = test_params();
    let mut field = single_particle(NVec3::new(0.0, 0.0, 0.5), NVec3::zeros());

    step(&mut field, &NVec3::zeros(), &p);
    let v = field.velocity(0);

    assert!(is_finite(&v));
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);
    assert!(v.z < 0.0);
}

// ==================================================================================
// Motion pass tests
// ==================================================================================

#[test]
fn damping_settles_particles_without_gravity() {
    let mut p = test_params();
    p.gravity = 0.0;

    let x0 = NVec3::new(0.5, 0.5, 0.0);
    let v0 = NVec3::new(1.0, -0.5, 0.25);
    let mut field = single_particle(x0, v0);
    // probe far away so nothing is in range
    let probe = NVec3::new(100.0, 0.0, 0.0);

    let mut last_speed = v0.norm();
    for _ in 0..3000 {
        step(&mut field, &probe, &p);
        let speed = field.velocity(0).norm();
        assert!(speed < last_speed, "speed went from {last_speed} to {speed}");
        last_speed = speed;
    }

    // geometric series: x -> x0 + v0 * dt / (1 - d)
    let limit = x0 + v0 * (p.dt / (1.0 - p.damping));
    assert!((field.position(0) - limit).norm() < 1e-3, "{:?} vs {:?}", field.position(0), limit);
}

#[test]
fn positions_stay_inside_bounding_sphere() {
    let mut p = test_params();
    p.max_distance = 3.0;
    p.gravity = 8.0;
    p.influence_radius = 2.0;

    let spawn = SpawnVolume {
        half_extents: NVec3::new(5.0, 5.0, 5.0),
        velocity_jitter: NVec3::new(50.0, 50.0, 50.0),
    };
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = ParticleField::spawn(2000, &spawn, &p.palette.idle, &mut rng);

    for frame in 0..50 {
        let t = frame as f32 * 0.1;
        let probe = NVec3::new(t.cos() * 2.0, t.sin() * 2.0, 0.0);
        step(&mut field, &probe, &p);

        for i in 0..field.len() {
            let r = field.position(i).norm();
            assert!(r <= p.max_distance * (1.0 + 1e-5), "particle {i} at {r} in frame {frame}");
        }
    }
}

#[test]
fn empty_field_is_a_no_op() {
    let mut field = ParticleField::new(0);
    let report = step(&mut field, &NVec3::zeros(), &test_params());

    assert_eq!(report, StepReport::default());
    assert_eq!(report.fraction(), 0.0);
}

// ==================================================================================
// Field tests
// ==================================================================================

#[test]
fn respawn_replaces_everything() {
    let p = test_params();
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = ParticleField::spawn(100, &p.spawn, &p.palette.idle, &mut rng);
    for i in 0..field.len() {
        field.set_velocity(i, NVec3::new(123.0, 123.0, 123.0));
    }

    field.respawn(250, &p.spawn, &p.palette.idle, &mut rng);

    assert_eq!(field.len(), 250);
    assert_eq!(field.positions().len(), 750);
    assert_eq!(field.velocities().len(), 750);
    assert_eq!(field.colors().len(), 750);
    assert!(field.velocities().iter().all(|v| *v != 123.0));

    for i in 0..field.len() {
        let x = field.position(i);
        let v = field.velocity(i);
        for axis in 0..3 {
            assert!(x[axis].abs() <= p.spawn.half_extents[axis]);
            assert!(v[axis].abs() <= p.spawn.velocity_jitter[axis]);
        }
        assert_eq!(field.color(i), p.palette.idle);
    }
}

#[test]
fn from_buffers_checks_lengths() {
    let ok = ParticleField::from_buffers(vec![0.0; 6], vec![0.0; 6], vec![0.0; 6]);
    assert_eq!(ok.map(|f| f.len()), Ok(2));

    let mismatch = ParticleField::from_buffers(vec![0.0; 6], vec![0.0; 3], vec![0.0; 6]);
    assert_eq!(
        mismatch,
        Err(FieldError::LengthMismatch {
            positions: 6,
            velocities: 3,
            colors: 6
        })
    );

    let ragged = ParticleField::from_buffers(vec![0.0; 4], vec![0.0; 4], vec![0.0; 4]);
    assert_eq!(ragged, Err(FieldError::NotTriples(4)));
}

// ==================================================================================
// Parameter tests
// ==================================================================================

#[test]
fn setter_clamps_and_reports() {
    let mut p = SimParams::default();

    assert_eq!(p.set(Knob::Gravity, 50.0), ParamChange::Updated);
    assert_eq!(p.gravity, 10.0);
    assert_eq!(p.set(Knob::Gravity, 10.0), ParamChange::Unchanged);
    assert_eq!(p.set(Knob::Gravity, f32::NAN), ParamChange::Unchanged);
    assert_eq!(p.gravity, 10.0);

    assert_eq!(p.set(Knob::InfluenceRadius, 0.0), ParamChange::Updated);
    assert_eq!(p.influence_radius, 0.1);

    assert_eq!(p.set(Knob::ParticleCount, 2500.4), ParamChange::Reallocate(2500));
    assert_eq!(p.set(Knob::ParticleCount, 2500.0), ParamChange::Unchanged);
    assert_eq!(p.set(Knob::ParticleCount, 1.0e9), ParamChange::Reallocate(200_000));
}

#[test]
fn scenario_respawns_on_count_change() {
    let mut scenario = small_scenario(1000);
    assert_eq!(scenario.field.len(), 1000);

    let change = scenario.set_param(Knob::ParticleCount, 3000.0);
    assert_eq!(change, ParamChange::Reallocate(3000));
    assert_eq!(scenario.field.len(), 3000);
    assert_eq!(scenario.field.colors().len(), 9000);

    let change = scenario.set_param(Knob::Gravity, 4.0);
    assert_eq!(change, ParamChange::Updated);
    assert_eq!(scenario.field.len(), 3000);
}

#[test]
fn headless_run_stays_finite() {
    let mut scenario = small_scenario(1000);
    let report = run_headless(&mut scenario, 120);

    assert_eq!(scenario.frame, 120);
    assert_eq!(report.total, 1000);
    assert!(scenario.field.positions().iter().all(|x| x.is_finite()));
    assert!(scenario.field.velocities().iter().all(|v| v.is_finite()));
}

// ==================================================================================
// Probe and signal tests
// ==================================================================================

#[test]
fn centre_pixel_probes_camera_target() {
    let rig = CameraRig::default();
    let ndc = ndc_from_pixels(400.0, 300.0, 800.0, 600.0).expect("non-empty viewport");

    assert!(ndc.norm() < EPS);
    assert!(rig.probe(&ndc, 5.0).norm() < 1e-5);
}

#[test]
fn top_edge_probe_follows_field_of_view() {
    let rig = CameraRig::default();
    let ndc = ndc_from_pixels(400.0, 0.0, 800.0, 600.0).expect("non-empty viewport");
    assert!((ndc - NVec2::new(0.0, 1.0)).norm() < EPS);

    let probe = rig.probe(&ndc, 5.0);
    let half = (75.0_f32 * 0.5).to_radians();

    assert!(probe.x.abs() < 1e-5);
    assert!((probe.y - 5.0 * half.sin()).abs() < 1e-4, "{:?}", probe);
    assert!((probe.z - (5.0 - 5.0 * half.cos())).abs() < 1e-4, "{:?}", probe);
    assert!(((probe - rig.eye).norm() - 5.0).abs() < 1e-4);
}

#[test]
fn pointer_ignores_empty_viewport() {
    assert!(ndc_from_pixels(10.0, 10.0, 0.0, 600.0).is_none());

    let mut pointer = Pointer::default();
    pointer.move_to_pixels(800.0, 600.0, 800.0, 600.0);
    assert!((pointer.ndc - NVec2::new(1.0, -1.0)).norm() < EPS);

    pointer.move_to_pixels(0.0, 0.0, 0.0, 0.0);
    assert!((pointer.ndc - NVec2::new(1.0, -1.0)).norm() < EPS);
}

#[test]
fn gain_follows_orbit_fraction() {
    let gain = OrbitGain::default();

    let none = StepReport { in_orbit: 0, total: 100 };
    let half = StepReport { in_orbit: 50, total: 100 };
    let all = StepReport { in_orbit: 100, total: 100 };

    assert!((gain.gain(&none) - 0.01).abs() < EPS);
    assert!((gain.gain(&half) - 0.505).abs() < EPS);
    assert!((gain.gain(&all) - 1.0).abs() < EPS);
    assert!((gain.gain(&StepReport::default()) - 0.01).abs() < EPS);
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn empty_config_takes_demo_defaults() {
    let cfg = ScenarioConfig::from_yaml_str("{}").expect("valid yaml");

    assert_eq!(cfg, ScenarioConfig::default());
    assert_eq!(cfg.sim_params(), SimParams::default());
    assert_eq!(cfg.camera_rig(), CameraRig::default());
    assert_eq!(cfg.probe_depth(), 5.0);
}

#[test]
fn config_values_are_clamped() {
    let yaml = "
parameters:
  gravity: 99.0
  particle_count: 5
  damping: 1.5
palette:
  idle: [0.0, 0.0, 0.0]
camera:
  probe_depth: 3.5
";
    let cfg = ScenarioConfig::from_yaml_str(yaml).expect("valid yaml");
    let p = cfg.sim_params();

    assert_eq!(p.gravity, 10.0);
    assert_eq!(p.particle_count, 1000);
    assert!(p.damping < 1.0);
    assert_eq!(p.palette.idle, NVec3::zeros());
    assert_eq!(p.influence_radius, 1.0);
    assert_eq!(cfg.probe_depth(), 3.5);
}

#[test]
fn bad_config_is_an_error() {
    assert!(ScenarioConfig::from_yaml_str("parameters:\n  gravity: lots\n").is_err());
    assert!(ScenarioConfig::load(std::path::Path::new("no/such/scenario.yaml")).is_err());
}

#[test]
fn bundled_scenarios_load() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["default.yaml", "strong_pull.yaml"] {
        let cfg = ScenarioConfig::load(&dir.join(name)).expect(name);
        assert!(cfg.sim_params().particle_count >= 1000);
    }
}

// ==================================================================================
// Effects tests
// ==================================================================================

#[test]
fn scroll_maps_onto_globe() {
    assert_eq!(scroll_fraction(500.0, 1000.0, 1000.0), 0.0);
    assert_eq!(scroll_fraction(-1.0, 3000.0, 1000.0), 0.0);
    assert_eq!(scroll_fraction(1999.0, 3000.0, 1000.0), 1.0);
    assert!((scroll_fraction(999.0, 3000.0, 1000.0) - 0.5).abs() < EPS);

    let s = GlobeScroll::from_fraction(0.5);
    assert_eq!(s.morph, 12.0);
    assert_eq!(s.zoom, 200.0);
    assert_eq!(s.alpha, 0.5);
    assert_eq!(s.camera_z, 100.0);
    assert_eq!(s.plane_z, -75.0);

    let mut options = GlobeOptions::default();
    options.apply_scroll(&s);
    assert_eq!(options.perlin.morph, 12.0);
    assert_eq!(options.orbit.zoom, 200.0);
}

#[test]
fn plane_queue_drops_oldest() {
    let mut planes = PlaneQueue::new(3);
    assert_eq!(planes.push(1), None);
    assert_eq!(planes.push(2), None);
    assert_eq!(planes.push(3), None);
    assert!(planes.is_full());

    assert_eq!(planes.push(4), Some(1));
    assert_eq!(planes.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
}

#[test]
fn globe_uniforms_scale_options() {
    let u = GlobeUniforms::derive(&GlobeOptions::default(), 2000.0, 0.25);

    assert!((u.time - 1.0).abs() < EPS);
    assert!((u.red - 0.45).abs() < EPS);
    assert!((u.blue - 0.3).abs() < EPS);
    assert!((u.black - 0.003).abs() < EPS);
    assert_eq!(u.chroma, 1.0);
    assert_eq!(u.point_size, 3.0);
    assert_eq!(u.alpha, 0.25);
}

#[test]
fn cloud_volume_fades_to_corners() {
    let size = 16;
    let cloud = CloudVolume::generate(size, 0.05, 11);

    assert_eq!(cloud.size(), size);
    assert_eq!(cloud.data().len(), size * size * size);
    assert_eq!(cloud, CloudVolume::generate(size, 0.05, 11));

    // fade^2 is ~0.018 in a corner, so at most 256 * 0.018
    assert!(cloud.density(0, 0, 0) <= 5);
    assert_eq!(cloud.density(3, 2, 1), cloud.data()[(size + 2) * size + 3]);
}

#[test]
fn cloud_params_clamp() {
    let p = CloudParams {
        threshold: -1.0,
        opacity: 2.0,
        range: 0.5,
        steps: 1000,
    }
    .clamped();

    assert_eq!(p, CloudParams { threshold: 0.0, opacity: 1.0, range: 0.5, steps: 200 });
}

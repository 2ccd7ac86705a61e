use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::NoFrustumCulling;
use bevy::window::PrimaryWindow;

use crate::simulation::params::Knob;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::ParticleField;

/// Tag for the single point-cloud entity
#[derive(Component)]
struct ParticleCloud;

/// Handle of the mesh the field is copied into every frame
#[derive(Resource)]
struct ParticleMesh(Handle<Mesh>);

/// Whether the influence ring around the probe is drawn
#[derive(Resource, Default)]
struct ProbeGuide(bool);

const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;

/// Frames between title bar refreshes
const TITLE_EVERY: u64 = 30;

/// Keys that nudge a knob by one slider step, and in which direction
const KNOB_KEYS: [(KeyCode, Knob, f32); 6] = [
    (KeyCode::ArrowUp, Knob::Gravity, 1.0),
    (KeyCode::ArrowDown, Knob::Gravity, -1.0),
    (KeyCode::ArrowRight, Knob::InfluenceRadius, 1.0),
    (KeyCode::ArrowLeft, Knob::InfluenceRadius, -1.0),
    (KeyCode::PageUp, Knob::ParticleCount, 1.0),
    (KeyCode::PageDown, Knob::ParticleCount, -1.0),
];

/// Open a window and play the scenario until it is closed
pub fn run_3d(scenario: Scenario) {
    log::info!("run_3d: starting viewer with {} particles", scenario.field.len());

    App::new()
        .insert_resource(scenario)
        .init_resource::<ProbeGuide>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "orbitfield".into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_3d)
        .add_systems(
            Update,
            (track_pointer, adjust_knobs, physics_step_3d, sync_particles_3d, draw_probe_guide, update_title).chain(),
        )
        .run();
}

/// Startup system: camera plus one point-list mesh holding every particle
fn setup_3d(mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    let rig = &scenario.camera;

    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)), // pure black
            ..Default::default()
        },
        projection: Projection::Perspective(PerspectiveProjection {
            fov: rig.fov_y_degrees.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..Default::default()
        }),
        transform: Transform::from_xyz(rig.eye.x, rig.eye.y, rig.eye.z)
            .looking_at(Vec3::new(rig.target.x, rig.target.y, rig.target.z), Vec3::new(rig.up.x, rig.up.y, rig.up.z)),
        ..Default::default()
    });

    let mesh = meshes.add(particle_mesh(&scenario.field));

    commands.spawn((
        PbrBundle {
            mesh: mesh.clone(),
            material: materials.add(StandardMaterial {
                base_color: Color::WHITE, // tinted by the per-vertex colours
                unlit: true,
                alpha_mode: AlphaMode::Add,
                ..Default::default()
            }),
            ..Default::default()
        },
        ParticleCloud,
        // bounds move every frame
        NoFrustumCulling,
    ));

    commands.insert_resource(ParticleMesh(mesh));
}

/// Copy the latest cursor or touch position into the scenario's pointer
fn track_pointer(windows: Query<&Window, With<PrimaryWindow>>, touches: Res<Touches>, mut scenario: ResMut<Scenario>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if height > 0.0 {
        scenario.camera.aspect = width / height;
    }

    let position = touches
        .iter()
        .next()
        .map(|touch| touch.position())
        .or_else(|| window.cursor_position());

    if let Some(p) = position {
        scenario.pointer.move_to_pixels(p.x, p.y, width, height);
    }
}

/// Keyboard stand-in for the slider panel
fn adjust_knobs(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>, mut guide: ResMut<ProbeGuide>) {
    for (key, knob, direction) in KNOB_KEYS {
        if keys.just_pressed(key) {
            let value = scenario.params.get(knob) + direction * knob.step();
            scenario.set_param(knob, value);
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        scenario.respawn();
    }
    if keys.just_pressed(KeyCode::KeyG) {
        guide.0 = !guide.0;
    }
}

/// Per-frame kernel step, before anything reads the buffers
fn physics_step_3d(mut scenario: ResMut<Scenario>) {
    let report = scenario.tick();
    if scenario.frame % 60 == 0 {
        log::debug!(
            "frame {}: {} / {} in orbit, gain {:.2}",
            scenario.frame,
            report.in_orbit,
            report.total,
            scenario.gain()
        );
    }
}

/// Push positions and colours into the mesh
fn sync_particles_3d(scenario: Res<Scenario>, handle: Res<ParticleMesh>, mut meshes: ResMut<Assets<Mesh>>) {
    let Some(mesh) = meshes.get_mut(&handle.0) else {
        return;
    };
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, position_attribute(&scenario.field));
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, color_attribute(&scenario.field));
}

fn draw_probe_guide(mut gizmos: Gizmos, scenario: Res<Scenario>, guide: Res<ProbeGuide>) {
    if !guide.0 {
        return;
    }
    let probe = scenario.probe();
    gizmos.circle(
        Vec3::new(probe.x, probe.y, probe.z),
        Dir3::Z,
        scenario.params.influence_radius,
        Color::srgb(0.8, 0.7, 0.7),
    );
}

fn update_title(mut windows: Query<&mut Window, With<PrimaryWindow>>, scenario: Res<Scenario>) {
    if scenario.frame % TITLE_EVERY != 0 {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    let p = &scenario.params;
    window.title = format!(
        "orbitfield | G {:.1} | R {:.1} | {} particles | {} in orbit | gain {:.2}",
        p.gravity,
        p.influence_radius,
        scenario.field.len(),
        scenario.last_report.in_orbit,
        scenario.gain()
    );
}

// =========================================================================================
// Field -> mesh attributes
// =========================================================================================

fn particle_mesh(field: &ParticleField) -> Mesh {
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, position_attribute(field))
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, color_attribute(field))
}

fn position_attribute(field: &ParticleField) -> Vec<[f32; 3]> {
    field.positions().chunks_exact(3).map(|x| [x[0], x[1], x[2]]).collect()
}

fn color_attribute(field: &ParticleField) -> Vec<[f32; 4]> {
    field.colors().chunks_exact(3).map(|c| [c[0], c[1], c[2], 1.0]).collect()
}

//! Host-side bundle that owns one running particle field
//!
//! Built from a [`ScenarioConfig`], a [`Scenario`] holds everything a frame
//! loop needs: parameters, field, pointer, camera and rng. Input handlers
//! write the pointer and call [`Scenario::set_param`] between frames; the
//! frame loop calls [`Scenario::tick`] exactly once per frame.
//!
//! In the viewer it is inserted into Bevy as a `Resource`.

use bevy::prelude::Resource;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::engine::{step, StepReport};
use crate::simulation::params::{Knob, ParamChange, SimParams};
use crate::simulation::probe::{CameraRig, Pointer};
use crate::simulation::signal::OrbitGain;
use crate::simulation::states::{NVec3, ParticleField};

#[derive(Resource)]
pub struct Scenario {
    pub params: SimParams,
    pub field: ParticleField,
    pub pointer: Pointer,
    pub camera: CameraRig,
    pub probe_depth: f32,
    pub gain: OrbitGain,
    pub frame: u64,
    pub last_report: StepReport,
    rng: StdRng,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Self {
        let params = cfg.sim_params();
        let mut rng = StdRng::seed_from_u64(cfg.engine.seed);
        let field = ParticleField::spawn(params.particle_count, &params.spawn, &params.palette.idle, &mut rng);

        info!(
            "scenario: {} particles, G = {}, R = {}, damping = {}, seed = {}",
            field.len(),
            params.gravity,
            params.influence_radius,
            params.damping,
            cfg.engine.seed
        );

        Self {
            params,
            field,
            pointer: Pointer::default(),
            camera: cfg.camera_rig(),
            probe_depth: cfg.probe_depth(),
            gain: cfg.orbit_gain(),
            frame: 0,
            last_report: StepReport::default(),
            rng,
        }
    }

    /// Where the pointer currently touches the simulation
    pub fn probe(&self) -> NVec3 {
        self.camera.probe(&self.pointer.ndc, self.probe_depth)
    }

    /// Run one frame: sample the probe once, then step the field
    pub fn tick(&mut self) -> StepReport {
        let probe = self.probe();
        let report = step(&mut self.field, &probe, &self.params);
        self.frame += 1;
        self.last_report = report;
        report
    }

    /// Current gain for the orbit signal
    pub fn gain(&self) -> f32 {
        self.gain.gain(&self.last_report)
    }

    /// The single runtime setter for knobs
    ///
    /// A particle count change respawns the whole field at the new size.
    pub fn set_param(&mut self, knob: Knob, value: f32) -> ParamChange {
        let change = self.params.set(knob, value);
        if let ParamChange::Reallocate(count) = change {
            info!("{} changed to {count}, respawning field", knob.label());
            self.respawn();
        }
        change
    }

    /// Replace every particle with a fresh one at the current count
    pub fn respawn(&mut self) {
        let params = &self.params;
        self.field
            .respawn(params.particle_count, &params.spawn, &params.palette.idle, &mut self.rng);
        self.last_report = StepReport::default();
    }
}

pub mod simulation;
pub mod configuration;
pub mod effects;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{ParticleField, FieldError, NVec2, NVec3};
pub use simulation::params::{SimParams, Knob, ParamChange, Palette, SpawnVolume};
pub use simulation::probe::{CameraRig, Pointer, Ray, ndc_from_pixels};
pub use simulation::engine::{step, StepReport};
pub use simulation::signal::OrbitGain;
pub use simulation::scenario::Scenario;
pub use simulation::headless::run_headless;

pub use configuration::config::{ScenarioConfig, ConfigError, EngineConfig, ParametersConfig};

pub use effects::scroll::{scroll_fraction, GlobeScroll, PlaneQueue};
pub use effects::globe::{GlobeOptions, GlobeUniforms, GlobeSpin};
pub use effects::cloud::{CloudVolume, CloudParams};

pub use visualization::cursor_vis3d::run_3d;

pub use benchmark::benchmark::{bench_step_curve, bench_respawn};

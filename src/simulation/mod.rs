pub mod states;
pub mod params;
pub mod probe;
pub mod forces;
pub mod integrator;
pub mod engine;
pub mod signal;
pub mod scenario;
pub mod headless;

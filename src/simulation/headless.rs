//! Windowless frame loop
//!
//! Plays a scenario for a fixed number of frames with the pointer sweeping a
//! circle around the middle of the screen, logging the orbit signal as it
//! goes. Handy for profiling and for checking a scenario file without a GPU.

use log::info;

use crate::simulation::engine::StepReport;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

/// Pointer sweep radius in NDC
const SWEEP_RADIUS: f32 = 0.3;
/// Radians per frame
const SWEEP_SPEED: f32 = 0.02;
/// Frames between log lines
const LOG_EVERY: u64 = 60;

pub fn run_headless(scenario: &mut Scenario, frames: u64) -> StepReport {
    info!("run_headless: {} frames with {} particles", frames, scenario.field.len());

    let mut report = StepReport::default();
    for _ in 0..frames {
        let angle = scenario.frame as f32 * SWEEP_SPEED;
        scenario.pointer.ndc = NVec2::new(angle.cos(), angle.sin()) * SWEEP_RADIUS;

        report = scenario.tick();

        if scenario.frame % LOG_EVERY == 0 {
            info!(
                "frame {:6}: {:6} / {} in orbit ({:5.1}%), gain {:.2}",
                scenario.frame,
                report.in_orbit,
                report.total,
                report.fraction() * 100.0,
                scenario.gain()
            );
        }
    }
    report
}

use orbitfield::{ScenarioConfig, Scenario};
use orbitfield::{run_3d, run_headless};
use orbitfield::{bench_step_curve, bench_respawn};

use clap::{Parser, ValueEnum};
use anyhow::{Context, Result};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    View,     // window + pointer
    Headless, // fixed number of frames, no window
    Bench,    // kernel timings as CSV
}

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "default.yaml")]
    file_name: String,

    #[arg(short, long, value_enum, default_value_t = Mode::View)]
    mode: Mode,

    /// Overrides `engine.frames` from the scenario
    #[arg(long)]
    frames: Option<u64>,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // the viewer brings its own logger
    if args.mode != Mode::View {
        TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    match args.mode {
        Mode::View => {
            let scenario = Scenario::build_scenario(&scenario_cfg);
            run_3d(scenario);
        }
        Mode::Headless => {
            let mut scenario = Scenario::build_scenario(&scenario_cfg);
            let frames = args.frames.unwrap_or(scenario_cfg.engine.frames);
            let report = run_headless(&mut scenario, frames);
            log::info!("done: {} / {} in orbit after {} frames", report.in_orbit, report.total, scenario.frame);
        }
        Mode::Bench => {
            bench_step_curve();
            bench_respawn();
        }
    }

    Ok(())
}

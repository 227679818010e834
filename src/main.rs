use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, info};

use flight_replay::io::telemetry;
use flight_replay::profile::VelocityProfile;
use flight_replay::sim::{run_model, run_replay, Config, Handoff, PlotFrame, PlotSink};

#[derive(Debug, Parser)]
#[command(name = "flight-replay", about = "Reconstruct and replay a flight profile from sparse telemetry")]
struct Args {
    /// Line-delimited JSON telemetry file
    #[arg(default_value = "data/data.json")]
    telemetry: PathBuf,

    /// Optional TOML file overriding simulation and mission parameters
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Drain a plot channel in the background, keeping the last frame and a
/// count for the end-of-run summary.
fn drain(
    name: &'static str,
    rx: std::sync::mpsc::Receiver<PlotFrame>,
) -> thread::JoinHandle<(usize, Option<PlotFrame>)> {
    thread::spawn(move || {
        let mut count = 0usize;
        let mut last = None;
        for frame in rx {
            debug!(
                "{}: t={:6.1} alt={:10.1} speed={:8.2}",
                name, frame.channels[1][0], frame.altitude(), frame.speed()
            );
            count += 1;
            last = Some(frame);
        }
        (count, last)
    })
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            Config::from_toml(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => Config::default(),
    };

    let raw = telemetry::load_profile(&args.telemetry, config.sim.time_step);
    info!(
        "telemetry loaded: {} velocity / {} altitude samples",
        raw.velocity().len(),
        raw.altitude().len()
    );

    let handoff: Arc<Handoff<VelocityProfile>> = Arc::new(Handoff::new());
    let (replay_sink, replay_rx) = PlotSink::channel();
    let (model_sink, model_rx) = PlotSink::channel();
    let replay_frames = drain("replay", replay_rx);
    let model_frames = drain("model", model_rx);

    // Pass 1: replay the telemetry and publish the velocity profile. The
    // handoff is released on every exit path so the model pass never blocks
    // forever.
    let replay_thread = {
        let handoff = Arc::clone(&handoff);
        let sim = config.sim.clone();
        let mission = config.mission.clone();
        thread::spawn(move || {
            let result = run_replay(&raw, &sim, &mission, &replay_sink);
            match result {
                Ok(profile) => {
                    handoff.release(profile);
                    Ok(())
                }
                Err(e) => {
                    handoff.release(VelocityProfile::new(sim.time_step));
                    Err(e)
                }
            }
        })
    };

    // Pass 2: fly the physical rocket along the recorded profile
    let model_thread = {
        let handoff = Arc::clone(&handoff);
        let sim = config.sim.clone();
        let mission = config.mission.clone();
        thread::spawn(move || {
            let profile = handoff.wait();
            run_model(&profile, &sim, &mission, &model_sink)
        })
    };

    let replay_result = replay_thread
        .join()
        .map_err(|_| anyhow!("replay thread panicked"))?;
    replay_result.context("flight profile reconstruction failed")?;
    let rocket = model_thread
        .join()
        .map_err(|_| anyhow!("model thread panicked"))?;

    let (replay_count, replay_last) = replay_frames
        .join()
        .map_err(|_| anyhow!("replay plot consumer panicked"))?;
    let (model_count, model_last) = model_frames
        .join()
        .map_err(|_| anyhow!("model plot consumer panicked"))?;

    println!();
    println!("  FLIGHT REPLAY SUMMARY");
    println!("  ──────────────────────────────────────────────────────");
    if let Some(frame) = replay_last {
        println!(
            "  Replay pass:   {:>5} ticks   alt={:>10.0} m   speed={:>8.1} m/s",
            replay_count,
            frame.altitude(),
            frame.speed()
        );
    }
    if let Some(frame) = model_last {
        println!(
            "  Model pass:    {:>5} ticks   alt={:>10.0} m   speed={:>8.1} m/s",
            model_count,
            frame.altitude(),
            frame.speed()
        );
    }
    println!(
        "  Rocket:        mass={:>8.0} kg   propellant={:>8.0} kg",
        rocket.mass(),
        rocket.propellant_mass()
    );
    println!();

    Ok(())
}

//! Touchwalk - headless demo driver
//!
//! Runs a scripted touchpad-walking session against simulated hardware and
//! logs what the locomotion controller does. Set `RUST_LOG=debug` to see
//! binding, recalibration and recovery details.

mod demo;

use std::path::PathBuf;

use clap::Parser;
use touchwalk_session::SessionConfig;

use crate::demo::DemoOptions;

#[derive(Parser, Debug)]
#[command(name = "touchwalk", about = "Scripted touchpad locomotion session")]
struct Args {
    /// TOML session config; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated session length in seconds
    #[arg(long, default_value_t = 12.0)]
    seconds: f32,

    /// Display refresh rate driving per-frame updates
    #[arg(long, default_value_t = 90.0)]
    frame_rate: f32,

    /// Number of handheld controllers to simulate
    #[arg(long, default_value_t = 2)]
    controllers: u32,

    /// Seconds before controller input components become available
    #[arg(long, default_value_t = 1.0)]
    controller_delay: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            SessionConfig::load(path)?
        }
        None => SessionConfig::default(),
    };

    let options = DemoOptions {
        seconds: args.seconds,
        frame_rate: args.frame_rate,
        controllers: args.controllers,
        controller_delay: args.controller_delay,
    };

    let summary = demo::run(config, &options)?;
    log::info!(
        "done: {} frames, {} fixed steps, {} controllers bound, {} recoveries, {} fades",
        summary.frames,
        summary.fixed_steps,
        summary.bound_controllers,
        summary.recoveries,
        summary.fades
    );
    log::info!("final body position: {:?}", summary.final_position);
    Ok(())
}

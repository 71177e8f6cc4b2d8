//! CPU Pong entry point
//!
//! Parses the command line, loads settings and runs either the terminal
//! frontend or a headless match.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use cpu_pong::autopilot::Autopilot;
use cpu_pong::clock::FixedStep;
use cpu_pong::input::{Controls, InputEvent, Key, KeyAction};
use cpu_pong::renderer::{Renderer, TerminalRenderer};
use cpu_pong::sim::GameEvent;
use cpu_pong::{Difficulty, Settings, Simulation};

#[derive(Parser)]
#[command(name = "cpu-pong")]
#[command(about = "Pong against a computer-controlled paddle", long_about = None)]
struct Cli {
    /// Opponent difficulty (easy, medium, hard)
    #[arg(long, value_parser = Difficulty::parse)]
    difficulty: Option<Difficulty>,

    /// Seed for serve angles and opponent aim
    #[arg(long)]
    seed: Option<u64>,

    /// Settings JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the autopilot play the left paddle
    #[arg(long, default_value = "false")]
    demo: bool,

    /// Run this many ticks without a terminal and print the final state as JSON
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Write log output to this file (interactive play logs nothing otherwise)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.headless.is_none())?;

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    settings.validate().context("invalid settings")?;

    let seed = cli.seed.unwrap_or_else(rand::random::<u64>);
    log::info!(
        "Starting match (difficulty: {}, seed: {})",
        settings.difficulty.as_str(),
        seed
    );
    let mut sim = Simulation::new(settings, seed);

    match cli.headless {
        Some(ticks) => run_headless(sim, ticks),
        None => {
            let mut renderer = TerminalRenderer::new();
            renderer.init().context("failed to set up terminal")?;
            let result = run_interactive(&mut renderer, &mut sim, cli.demo);
            renderer.cleanup().context("failed to restore terminal")?;
            log::info!("Final score {} - {}", sim.score_player(), sim.score_opponent());
            result
        }
    }
}

/// Where log records go
#[derive(Debug, PartialEq)]
enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// stderr shares the tty with the alternate screen
    Off,
}

fn log_target(log_file: Option<&Path>, interactive: bool) -> LogTarget<'_> {
    match log_file {
        Some(path) => LogTarget::File(path),
        None if interactive => LogTarget::Off,
        None => LogTarget::Stderr,
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    match log_target(log_file, interactive) {
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            env_logger::Builder::from_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        LogTarget::Stderr => env_logger::init(),
        LogTarget::Off => {}
    }
    Ok(())
}

fn run_headless(mut sim: Simulation, ticks: u64) -> Result<()> {
    let pilot = Autopilot::default();
    sim.dismiss_help();

    for _ in 0..ticks {
        let input = pilot.input(sim.state());
        sim.set_up_held(input.up_held);
        sim.set_down_held(input.down_held);
        sim.tick();
        if sim
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::Scored { .. }))
        {
            log::info!("Score {} - {}", sim.score_player(), sim.score_opponent());
        }
    }

    let json = serde_json::to_string_pretty(&sim.snapshot())?;
    println!("{json}");
    Ok(())
}

fn run_interactive(renderer: &mut impl Renderer, sim: &mut Simulation, demo: bool) -> Result<()> {
    let mut controls = Controls::new(renderer.reports_key_release());
    let mut clock = FixedStep::default();
    let pilot = Autopilot::default();
    let frame = Duration::from_secs_f32(clock.dt());
    let mut last = Instant::now();

    loop {
        // Drain input until the next frame is due
        let deadline = last + frame;
        loop {
            let now = Instant::now();
            let Some(event) = renderer.poll_input(deadline.saturating_duration_since(now))? else {
                break;
            };
            if let InputEvent::Key(Key::Quit, action) = event
                && action != KeyAction::Release
            {
                return Ok(());
            }
            for command in controls.handle(event, now) {
                sim.apply(command);
            }
            if Instant::now() >= deadline {
                break;
            }
        }
        for command in controls.expire(Instant::now()) {
            sim.apply(command);
        }

        let now = Instant::now();
        let ticks = clock.advance((now - last).as_secs_f32());
        last = now;

        for _ in 0..ticks {
            if demo {
                let input = pilot.input(sim.state());
                sim.set_up_held(input.up_held);
                sim.set_down_held(input.down_held);
            }
            sim.tick();
        }

        renderer.render(&sim.snapshot(), sim.settings())?;
    }
}

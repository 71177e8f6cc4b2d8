//! CPU Pong - player vs. computer on a rectangular field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, opponent controller, match state)
//! - `settings`: Tunables, difficulty presets and JSON loading
//! - `clock`: Fixed-timestep accumulator for the frontend loop
//! - `autopilot`: Synthesised paddle input for demo/headless play
//! - `input`: Key events to simulation commands
//! - `renderer`: Terminal frontend

pub mod autopilot;
pub mod clock;
pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{Difficulty, Settings};
pub use sim::{Command, Simulation, Snapshot};

/// Game configuration constants (defaults for `Settings`)
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between a side wall and the outer face of its paddle
    pub const PADDLE_MARGIN: f32 = 40.0;
    /// Player paddle speed (units per tick)
    pub const PLAYER_SPEED: f32 = 10.0;

    /// Ball defaults (speeds in units per tick)
    pub const BALL_SIZE: f32 = 14.0;
    pub const BALL_SPEED_START: f32 = 6.0;
    pub const BALL_SPEED_MAX: f32 = 14.0;
    /// Speed added on every paddle hit
    pub const BALL_SPEED_STEP: f32 = 0.6;
    /// Deflection angle at the paddle tip (degrees)
    pub const MAX_DEFLECTION_DEG: f32 = 50.0;

    /// Serve angle window (degrees)
    pub const SERVE_ANGLE_MAX_DEG: f32 = 45.0;
    pub const SERVE_ANGLE_MIN_DEG: f32 = 10.0;

    /// Opponent max step per recompute, per difficulty
    pub const OPPONENT_MAX_SPEED_EASY: f32 = 10.0;
    pub const OPPONENT_MAX_SPEED_MEDIUM: f32 = 15.5;
    pub const OPPONENT_MAX_SPEED_HARD: f32 = 20.0;
    /// 0..1, higher means twitchier
    pub const OPPONENT_SMOOTHING: f32 = 0.3;
    /// Ticks between opponent recomputes
    pub const OPPONENT_REACTION_FRAMES: u32 = 6;
    /// Upper bound on aiming error (units)
    pub const OPPONENT_ERROR_CAP: f32 = 60.0;
    /// Horizontal distance per unit of aiming error
    pub const OPPONENT_ERROR_DIVISOR: f32 = 12.0;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through `RandomSource`
//! - No rendering, terminal or clock dependencies

pub mod collision;
pub mod opponent;
pub mod rng;
pub mod simulation;
pub mod state;
pub mod tick;

pub use collision::{PaddleHit, Rebound, Rect, paddle_rebound};
pub use opponent::OpponentController;
pub use rng::{GameRng, RandomSource, ScriptedRandom};
pub use simulation::{Command, Simulation};
pub use state::{
    Ball, GameEvent, InputState, MatchPhase, MatchState, Paddle, Side, SimulationState, Snapshot,
};
pub use tick::tick;

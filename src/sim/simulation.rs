//! Owning wrapper around the simulation state and its random source

use glam::Vec2;

use super::rng::{GameRng, RandomSource};
use super::state::{GameEvent, SimulationState, Snapshot};
use super::tick::tick;
use crate::settings::Settings;

/// Discrete commands from the input collaborator, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetUpHeld(bool),
    SetDownHeld(bool),
    TogglePause,
    Reset,
    ToggleHelp,
    DismissHelp,
}

/// A running match
#[derive(Debug, Clone)]
pub struct Simulation<R: RandomSource = GameRng> {
    state: SimulationState,
    rng: R,
}

impl Simulation<GameRng> {
    /// New match with a seeded PCG random source
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, GameRng::new(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// New match drawing randomness from `rng`
    pub fn with_rng(settings: Settings, mut rng: R) -> Self {
        let state = SimulationState::new(settings, &mut rng);
        Self { state, rng }
    }

    /// Advance one fixed timestep
    pub fn tick(&mut self) {
        tick(&mut self.state, &mut self.rng);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetUpHeld(held) => self.set_up_held(held),
            Command::SetDownHeld(held) => self.set_down_held(held),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
            Command::ToggleHelp => self.toggle_help(),
            Command::DismissHelp => self.dismiss_help(),
        }
    }

    pub fn set_up_held(&mut self, held: bool) {
        self.state.input.up_held = held;
    }

    pub fn set_down_held(&mut self, held: bool) {
        self.state.input.down_held = held;
    }

    pub fn toggle_pause(&mut self) {
        self.state.match_state.toggle_pause();
        log::debug!(
            "Pause toggled: {}",
            if self.is_paused() { "paused" } else { "running" }
        );
    }

    pub fn reset(&mut self) {
        self.state.reset(&mut self.rng);
    }

    pub fn toggle_help(&mut self) {
        self.state.match_state.toggle_help();
    }

    pub fn dismiss_help(&mut self) {
        self.state.match_state.dismiss_help();
    }

    // === Read accessors ===

    pub fn player_y(&self) -> f32 {
        self.state.player.y
    }

    pub fn opponent_y(&self) -> f32 {
        self.state.opponent.y
    }

    /// Top-left corner of the ball
    pub fn ball_pos(&self) -> Vec2 {
        self.state.ball.pos
    }

    pub fn score_player(&self) -> u32 {
        self.state.match_state.score_player
    }

    pub fn score_opponent(&self) -> u32 {
        self.state.match_state.score_opponent
    }

    pub fn is_paused(&self) -> bool {
        !self.state.match_state.is_running()
    }

    pub fn show_help(&self) -> bool {
        self.state.match_state.show_help
    }

    /// Events of the most recent tick (or of construction/reset before the first tick)
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct state access for test setups
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}

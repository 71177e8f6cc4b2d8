//! Game state and core simulation types
//!
//! Everything a tick mutates lives in `SimulationState`, owned by one `Simulation`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::opponent::OpponentController;
use super::rng::RandomSource;
use crate::consts::{SERVE_ANGLE_MAX_DEG, SERVE_ANGLE_MIN_DEG};
use crate::settings::Settings;

/// Field side. The player defends the left, the opponent the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// Running state of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Running,
    Paused,
}

/// Things that happened during the most recent tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball put back in play from the center
    Served { toward_player: bool },
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball struck a paddle and left at `speed`
    PaddleHit { side: Side, speed: f32 },
    /// `side` won the point
    Scored { side: Side },
}

/// A paddle (top-left anchored)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Fixed horizontal position (left edge)
    pub x: f32,
    /// Top edge, always within `[0, field_height - height]`
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centered paddle for `side`
    pub fn new(side: Side, settings: &Settings) -> Self {
        let x = match side {
            Side::Player => settings.player_x(),
            Side::Opponent => settings.opponent_x(),
        };
        Self {
            side,
            x,
            y: settings.paddle_center_y(),
            width: settings.paddle_width,
            height: settings.paddle_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move vertically, then clamp into the field
    pub fn move_by(&mut self, dy: f32, settings: &Settings) {
        self.y = settings.clamp_paddle_y(self.y + dy);
    }

    pub fn recenter(&mut self, settings: &Settings) {
        self.y = settings.paddle_center_y();
    }
}

/// The ball (top-left anchored square)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    /// Ball at field center, not moving
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Self::center_pos(settings),
            vel: Vec2::ZERO,
            size: settings.ball_size,
        }
    }

    fn center_pos(settings: &Settings) -> Vec2 {
        Vec2::new(
            (settings.field_width - settings.ball_size) / 2.0,
            (settings.field_height - settings.ball_size) / 2.0,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Put the ball back at center with a fresh trajectory.
    ///
    /// The launch angle is drawn from (-45°, 45°) and redrawn while it falls
    /// inside (-10°, 10°), so the ball never starts nearly flat. With
    /// `toward_player` the ball always heads left, otherwise a coin decides.
    /// Returns the launch angle in radians (before the vertical coin flip).
    pub fn serve(
        &mut self,
        settings: &Settings,
        rng: &mut dyn RandomSource,
        toward_player: bool,
    ) -> f32 {
        self.pos = Self::center_pos(settings);
        self.size = settings.ball_size;

        let max = SERVE_ANGLE_MAX_DEG.to_radians();
        let min = SERVE_ANGLE_MIN_DEG.to_radians();
        let mut angle = rng.next_unit() * 2.0 * max - max;
        while angle.abs() < min {
            angle = rng.next_unit() * 2.0 * max - max;
        }

        let dir_x = if toward_player || rng.next_bool() {
            -1.0
        } else {
            1.0
        };
        let dir_y = if rng.next_bool() { 1.0 } else { -1.0 };

        let speed = settings.ball_speed_start;
        self.vel = Vec2::new(angle.cos() * speed * dir_x, angle.sin() * speed * dir_y);
        log::trace!(
            "Serve: angle={:.1}° vel=({:.2}, {:.2})",
            angle.to_degrees(),
            self.vel.x,
            self.vel.y
        );
        angle
    }
}

/// Held movement keys, set by the frontend and read every running tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up_held: bool,
    pub down_held: bool,
}

/// Scores, phase and overlay flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub score_player: u32,
    pub score_opponent: u32,
    pub phase: MatchPhase,
    pub show_help: bool,
    /// Executed physics ticks
    pub frame_count: u64,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            score_player: 0,
            score_opponent: 0,
            phase: MatchPhase::Running,
            show_help: true,
            frame_count: 0,
        }
    }
}

impl MatchState {
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    /// Flip Running/Paused; always hides the help overlay
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            MatchPhase::Running => MatchPhase::Paused,
            MatchPhase::Paused => MatchPhase::Running,
        };
        self.show_help = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }

    pub fn award_point(&mut self, side: Side) {
        match side {
            Side::Player => self.score_player += 1,
            Side::Opponent => self.score_opponent += 1,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub settings: Settings,
    pub player: Paddle,
    pub opponent: Paddle,
    pub ball: Ball,
    pub opponent_ai: OpponentController,
    pub match_state: MatchState,
    pub input: InputState,
    /// Events of the most recent tick
    pub events: Vec<GameEvent>,
}

impl SimulationState {
    /// Fresh match: centered paddles, ball served toward the player
    pub fn new(settings: Settings, rng: &mut dyn RandomSource) -> Self {
        let mut state = Self {
            player: Paddle::new(Side::Player, &settings),
            opponent: Paddle::new(Side::Opponent, &settings),
            ball: Ball::new(&settings),
            opponent_ai: OpponentController::new(&settings),
            match_state: MatchState::default(),
            input: InputState::default(),
            events: Vec::new(),
            settings,
        };
        state.serve(rng, true);
        state
    }

    /// Re-serve the ball and record it
    pub fn serve(&mut self, rng: &mut dyn RandomSource, toward_player: bool) {
        self.ball.serve(&self.settings, rng, toward_player);
        self.events.push(GameEvent::Served { toward_player });
    }

    /// Zero scores, recenter, serve toward the player, run with help shown.
    /// Held keys are left as they are.
    pub fn reset(&mut self, rng: &mut dyn RandomSource) {
        self.match_state.score_player = 0;
        self.match_state.score_opponent = 0;
        self.player.recenter(&self.settings);
        self.opponent.recenter(&self.settings);
        self.opponent_ai.reset();
        self.serve(rng, true);
        self.match_state.phase = MatchPhase::Running;
        self.match_state.show_help = true;
        log::debug!("Match reset");
    }

    /// Copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_y: self.player.y,
            opponent_y: self.opponent.y,
            ball: self.ball.pos,
            score_player: self.match_state.score_player,
            score_opponent: self.match_state.score_opponent,
            paused: !self.match_state.is_running(),
            show_help: self.match_state.show_help,
            frame_count: self.match_state.frame_count,
        }
    }
}

/// Read-only view handed to renderers after each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub player_y: f32,
    pub opponent_y: f32,
    /// Top-left corner of the ball
    pub ball: Vec2,
    pub score_player: u32,
    pub score_opponent: u32,
    pub paused: bool,
    pub show_help: bool,
    pub frame_count: u64,
}

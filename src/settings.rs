//! Game settings and tuning
//!
//! Read-only: settings come from defaults, an optional JSON file and CLI overrides.
//! Nothing here is ever written back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Opponent difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parser for CLI arguments
    pub fn parse(s: &str) -> Result<Self, SettingsError> {
        Self::from_str(s).ok_or_else(|| SettingsError::UnknownDifficulty(s.to_string()))
    }

    /// Largest opponent paddle step per recompute
    pub fn opponent_max_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => OPPONENT_MAX_SPEED_EASY,
            Difficulty::Medium => OPPONENT_MAX_SPEED_MEDIUM,
            Difficulty::Hard => OPPONENT_MAX_SPEED_HARD,
        }
    }
}

/// All tunables of a match. Distances in field units, speeds in units per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from a side wall to its paddle
    pub paddle_margin: f32,
    pub player_speed: f32,

    // === Ball ===
    pub ball_size: f32,
    pub ball_speed_start: f32,
    pub ball_speed_max: f32,
    pub ball_speed_step: f32,
    /// Deflection at the paddle tip, in degrees
    pub max_deflection_deg: f32,

    // === Opponent ===
    pub difficulty: Difficulty,
    /// Fraction of the remaining distance covered per recompute (0, 1]
    pub opponent_smoothing: f32,
    pub opponent_reaction_frames: u32,
    pub opponent_error_cap: f32,
    pub opponent_error_divisor: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            player_speed: PLAYER_SPEED,

            ball_size: BALL_SIZE,
            ball_speed_start: BALL_SPEED_START,
            ball_speed_max: BALL_SPEED_MAX,
            ball_speed_step: BALL_SPEED_STEP,
            max_deflection_deg: MAX_DEFLECTION_DEG,

            difficulty: Difficulty::Medium,
            opponent_smoothing: OPPONENT_SMOOTHING,
            opponent_reaction_frames: OPPONENT_REACTION_FRAMES,
            opponent_error_cap: OPPONENT_ERROR_CAP,
            opponent_error_divisor: OPPONENT_ERROR_DIVISOR,
        }
    }
}

impl Settings {
    /// Default settings with a difficulty preset applied
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.difficulty = difficulty;
        settings
    }

    /// Parse and validate settings from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings the simulation cannot honour
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("player_speed", self.player_speed),
            ("ball_size", self.ball_size),
            ("ball_speed_start", self.ball_speed_start),
            ("ball_speed_max", self.ball_speed_max),
            ("opponent_error_divisor", self.opponent_error_divisor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        for (field, value) in [
            ("paddle_margin", self.paddle_margin),
            ("ball_speed_step", self.ball_speed_step),
            ("max_deflection_deg", self.max_deflection_deg),
            ("opponent_error_cap", self.opponent_error_cap),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::invalid(field, format!("must be >= 0, got {value}")));
            }
        }

        if self.paddle_height > self.field_height {
            return Err(SettingsError::invalid(
                "paddle_height",
                "paddle taller than the field",
            ));
        }
        if self.ball_size >= self.field_height || self.ball_size >= self.field_width {
            return Err(SettingsError::invalid("ball_size", "ball larger than the field"));
        }
        if 2.0 * (self.paddle_margin + self.paddle_width) >= self.field_width {
            return Err(SettingsError::invalid(
                "paddle_margin",
                "paddles overlap across the field",
            ));
        }
        // Hit offsets reach past the paddle tip by half a ball, and the rebound
        // must still leave away from the paddle
        let worst_deflection = self.max_deflection_deg * (1.0 + self.ball_size / self.paddle_height);
        if worst_deflection >= 90.0 {
            return Err(SettingsError::invalid(
                "max_deflection_deg",
                format!("tip hits would leave at {worst_deflection:.1} degrees, must stay below 90"),
            ));
        }
        // A faster ball could step over a paddle without ever overlapping it
        if self.ball_speed_max >= self.paddle_width + self.ball_size {
            return Err(SettingsError::invalid(
                "ball_speed_max",
                format!(
                    "{} must stay below paddle_width + ball_size ({})",
                    self.ball_speed_max,
                    self.paddle_width + self.ball_size
                ),
            ));
        }
        if self.ball_speed_max < self.ball_speed_start {
            return Err(SettingsError::invalid(
                "ball_speed_max",
                format!(
                    "{} is below ball_speed_start {}",
                    self.ball_speed_max, self.ball_speed_start
                ),
            ));
        }
        if !(self.opponent_smoothing > 0.0 && self.opponent_smoothing <= 1.0) {
            return Err(SettingsError::invalid(
                "opponent_smoothing",
                format!("must be in (0, 1], got {}", self.opponent_smoothing),
            ));
        }
        if self.opponent_reaction_frames == 0 {
            return Err(SettingsError::invalid(
                "opponent_reaction_frames",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// X of the player (left) paddle
    pub fn player_x(&self) -> f32 {
        self.paddle_margin
    }

    /// X of the opponent (right) paddle
    pub fn opponent_x(&self) -> f32 {
        self.field_width - self.paddle_margin - self.paddle_width
    }

    /// Largest valid paddle top edge
    pub fn paddle_max_y(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    /// Vertically centred paddle top edge
    pub fn paddle_center_y(&self) -> f32 {
        self.paddle_max_y() / 2.0
    }

    /// Clamp a paddle top edge to the field
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.paddle_max_y())
    }

    pub fn opponent_max_speed(&self) -> f32 {
        self.difficulty.opponent_max_speed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.player_x(), 40.0);
        assert_eq!(settings.opponent_x(), 848.0);
        assert_eq!(settings.paddle_center_y(), 250.0);
    }

    #[test]
    fn test_clamp_paddle_y() {
        let settings = Settings::default();
        assert_eq!(settings.clamp_paddle_y(-5.0), 0.0);
        assert_eq!(settings.clamp_paddle_y(1000.0), 500.0);
        assert_eq!(settings.clamp_paddle_y(123.0), 123.0);
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert!(matches!(
            Difficulty::parse("nightmare"),
            Err(SettingsError::UnknownDifficulty(_))
        ));

        assert!(Difficulty::Easy.opponent_max_speed() < Difficulty::Medium.opponent_max_speed());
        assert!(Difficulty::Medium.opponent_max_speed() < Difficulty::Hard.opponent_max_speed());
        assert_eq!(
            Settings::from_difficulty(Difficulty::Hard).opponent_max_speed(),
            20.0
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            Settings::from_json_str(r#"{ "difficulty": "hard", "paddle_height": 80 }"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.paddle_height, 80.0);
        assert_eq!(settings.field_width, FIELD_WIDTH);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            Settings::from_json_str("{ not json"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "ball_speed_start": 20, "ball_speed_max": 10 }"#),
            Err(SettingsError::Invalid {
                field: "ball_speed_max",
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "opponent_smoothing": 1.5 }"#),
            Err(SettingsError::Invalid {
                field: "opponent_smoothing",
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "opponent_reaction_frames": 0 }"#),
            Err(SettingsError::Invalid { .. })
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "paddle_height": 700 }"#),
            Err(SettingsError::Invalid {
                field: "paddle_height",
                ..
            })
        ));
    }

    #[test]
    fn test_tip_deflection_must_stay_below_right_angle() {
        assert!(Settings::from_json_str(r#"{ "max_deflection_deg": 75 }"#).is_ok());
        for json in [
            r#"{ "max_deflection_deg": 80 }"#,
            r#"{ "max_deflection_deg": 90 }"#,
            r#"{ "max_deflection_deg": 120 }"#,
        ] {
            assert!(matches!(
                Settings::from_json_str(json),
                Err(SettingsError::Invalid {
                    field: "max_deflection_deg",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_ball_cannot_outrun_paddle_thickness() {
        // 14 per tick would skip a 2-wide paddle with a 4-wide ball
        assert!(matches!(
            Settings::from_json_str(
                r#"{ "paddle_width": 2, "ball_size": 4, "ball_speed_start": 10, "ball_speed_max": 14 }"#
            ),
            Err(SettingsError::Invalid {
                field: "ball_speed_max",
                ..
            })
        ));
        assert!(
            Settings::from_json_str(
                r#"{ "paddle_width": 2, "ball_size": 4, "ball_speed_start": 5, "ball_speed_max": 5.5 }"#
            )
            .is_ok()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load("/definitely/not/here/settings.json");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}

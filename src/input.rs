//! Keyboard/pointer events to simulation commands
//!
//! Movement keys are held state. Terminals that report key release drive the
//! held flags directly. Others only send repeated presses, so a hold expires
//! when the repeats stop.

use std::time::{Duration, Instant};

use crate::sim::Command;

/// First press of a movement key holds it at least this long (covers the
/// terminal's initial auto-repeat delay)
pub const INITIAL_HOLD: Duration = Duration::from_millis(250);
/// Each auto-repeat extends the hold by this much
pub const REPEAT_HOLD: Duration = Duration::from_millis(100);

/// Logical keys, after the frontend's key mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Pause,
    Reset,
    Help,
    /// Acknowledge (dismisses the help overlay)
    Confirm,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key, KeyAction),
    /// Pointer click anywhere
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hold {
    Released,
    /// Held until an explicit release
    Held,
    /// Held until the deadline passes without another repeat
    Until(Instant),
}

impl Hold {
    fn is_held(&self) -> bool {
        *self != Hold::Released
    }

    fn expired(&self, now: Instant) -> bool {
        matches!(self, Hold::Until(deadline) if now >= *deadline)
    }
}

/// Tracks held movement keys and turns events into commands
#[derive(Debug, Clone)]
pub struct Controls {
    /// Whether the frontend delivers `KeyAction::Release`
    reports_release: bool,
    up: Hold,
    down: Hold,
}

impl Controls {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            up: Hold::Released,
            down: Hold::Released,
        }
    }

    /// Commands for one input event. `Key::Quit` maps to nothing; the frontend
    /// loop handles it.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Vec<Command> {
        match event {
            InputEvent::Click => vec![Command::DismissHelp],
            InputEvent::Key(key, action) => match key {
                Key::Up => self.movement(true, action, now),
                Key::Down => self.movement(false, action, now),
                _ if action == KeyAction::Release => Vec::new(),
                Key::Pause => vec![Command::TogglePause],
                Key::Reset => vec![Command::Reset],
                Key::Help => vec![Command::ToggleHelp],
                Key::Confirm => vec![Command::DismissHelp],
                Key::Quit => Vec::new(),
            },
        }
    }

    fn movement(&mut self, up: bool, action: KeyAction, now: Instant) -> Vec<Command> {
        let reports_release = self.reports_release;
        let hold = if up { &mut self.up } else { &mut self.down };
        let command = |held| {
            if up {
                Command::SetUpHeld(held)
            } else {
                Command::SetDownHeld(held)
            }
        };

        match action {
            KeyAction::Release => {
                let was_held = hold.is_held();
                *hold = Hold::Released;
                if was_held { vec![command(false)] } else { Vec::new() }
            }
            KeyAction::Press | KeyAction::Repeat => {
                let was_held = hold.is_held();
                *hold = if reports_release {
                    Hold::Held
                } else {
                    let extend = if was_held { REPEAT_HOLD } else { INITIAL_HOLD };
                    let deadline = now + extend;
                    match *hold {
                        Hold::Until(until) => Hold::Until(until.max(deadline)),
                        _ => Hold::Until(deadline),
                    }
                };
                if was_held { Vec::new() } else { vec![command(true)] }
            }
        }
    }

    /// Release holds whose repeats have stopped
    pub fn expire(&mut self, now: Instant) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.up.expired(now) {
            self.up = Hold::Released;
            commands.push(Command::SetUpHeld(false));
        }
        if self.down.expired(now) {
            self.down = Hold::Released;
            commands.push(Command::SetDownHeld(false));
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key(key, KeyAction::Press)
    }

    #[test]
    fn test_command_keys() {
        let mut controls = Controls::new(true);
        let now = Instant::now();
        assert_eq!(controls.handle(press(Key::Pause), now), vec![Command::TogglePause]);
        assert_eq!(controls.handle(press(Key::Reset), now), vec![Command::Reset]);
        assert_eq!(controls.handle(press(Key::Help), now), vec![Command::ToggleHelp]);
        assert_eq!(controls.handle(press(Key::Confirm), now), vec![Command::DismissHelp]);
        assert_eq!(controls.handle(InputEvent::Click, now), vec![Command::DismissHelp]);
        assert!(controls.handle(press(Key::Quit), now).is_empty());
        assert!(controls
            .handle(InputEvent::Key(Key::Pause, KeyAction::Release), now)
            .is_empty());
    }

    #[test]
    fn test_press_release() {
        let mut controls = Controls::new(true);
        let now = Instant::now();
        assert_eq!(controls.handle(press(Key::Up), now), vec![Command::SetUpHeld(true)]);
        assert!(controls
            .handle(InputEvent::Key(Key::Up, KeyAction::Repeat), now)
            .is_empty());
        // Never expires when releases are reported
        assert!(controls.expire(now + Duration::from_secs(60)).is_empty());
        assert_eq!(
            controls.handle(InputEvent::Key(Key::Up, KeyAction::Release), now),
            vec![Command::SetUpHeld(false)]
        );
        assert!(controls
            .handle(InputEvent::Key(Key::Up, KeyAction::Release), now)
            .is_empty());
    }

    #[test]
    fn test_hold_expires_without_release() {
        let mut controls = Controls::new(false);
        let t0 = Instant::now();
        assert_eq!(controls.handle(press(Key::Down), t0), vec![Command::SetDownHeld(true)]);
        assert!(controls.expire(t0 + INITIAL_HOLD / 2).is_empty());

        // Auto-repeat keeps it alive
        let t1 = t0 + INITIAL_HOLD - Duration::from_millis(10);
        assert!(controls.handle(press(Key::Down), t1).is_empty());
        assert!(controls.expire(t0 + INITIAL_HOLD).is_empty());

        assert_eq!(
            controls.expire(t1 + REPEAT_HOLD + INITIAL_HOLD),
            vec![Command::SetDownHeld(false)]
        );
    }

    #[test]
    fn test_up_and_down_independent() {
        let mut controls = Controls::new(false);
        let t0 = Instant::now();
        controls.handle(press(Key::Up), t0);
        controls.handle(press(Key::Down), t0 + INITIAL_HOLD);
        assert_eq!(controls.expire(t0 + INITIAL_HOLD), vec![Command::SetUpHeld(false)]);
        assert_eq!(
            controls.expire(t0 + INITIAL_HOLD * 2),
            vec![Command::SetDownHeld(false)]
        );
    }
}

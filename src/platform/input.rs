//! Keyboard state tracking
//!
//! Held keys (movement, jump) are level-sensed; the sim derives its own
//! edges from them. Reset and quit are one-shot intents latched on key
//! press and cleared once consumed.

use crate::sim::TickInput;

/// Accumulated keyboard state between sim ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    jump: bool,
    reset: bool,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one keyboard event.
    /// Returns true when the key is one the game uses, so the caller can
    /// suppress the browser default.
    pub fn key_event(&mut self, key: &str, down: bool) -> bool {
        match key {
            "a" | "A" | "ArrowLeft" => {
                self.left = down;
                true
            }
            "d" | "D" | "ArrowRight" => {
                self.right = down;
                true
            }
            "w" | "W" | "ArrowUp" | " " => {
                self.jump = down;
                true
            }
            "r" | "R" => {
                if down {
                    self.reset = true;
                }
                true
            }
            "Escape" => {
                if down {
                    self.quit = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Snapshot the current state as one tick's input
    pub fn poll(&self) -> TickInput {
        TickInput {
            move_left: self.left,
            move_right: self.right,
            jump: self.jump,
            reset: self.reset,
            quit: self.quit,
        }
    }

    /// Drop the one-shot intents after a tick has seen them
    pub fn clear_one_shots(&mut self) {
        self.reset = false;
        self.quit = false;
    }

    /// Release everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_are_level_sensed() {
        let mut input = InputState::new();
        assert!(input.key_event("a", true));
        assert!(input.poll().move_left);
        assert!(input.key_event("a", false));
        assert!(!input.poll().move_left);

        assert!(input.key_event("ArrowRight", true));
        assert!(input.poll().move_right);
    }

    #[test]
    fn test_jump_keys() {
        let mut input = InputState::new();
        for key in ["w", "W", "ArrowUp", " "] {
            input.key_event(key, true);
            assert!(input.poll().jump, "{key:?} should press jump");
            input.key_event(key, false);
            assert!(!input.poll().jump);
        }
    }

    #[test]
    fn test_reset_is_one_shot() {
        let mut input = InputState::new();
        input.key_event("r", true);
        assert!(input.poll().reset);

        input.clear_one_shots();
        assert!(!input.poll().reset);

        // Key release alone never rearms it
        input.key_event("r", false);
        assert!(!input.poll().reset);
    }

    #[test]
    fn test_quit_is_one_shot() {
        let mut input = InputState::new();
        input.key_event("Escape", true);
        assert!(input.poll().quit);
        input.clear_one_shots();
        assert!(!input.poll().quit);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_event("q", true));
        assert!(!input.key_event("Enter", true));
        let t = input.poll();
        assert!(!t.move_left && !t.move_right && !t.jump && !t.reset && !t.quit);
    }

    #[test]
    fn test_release_all_drops_held_keys() {
        let mut input = InputState::new();
        input.key_event("d", true);
        input.key_event("w", true);
        input.release_all();
        let t = input.poll();
        assert!(!t.move_right && !t.jump);
    }
}

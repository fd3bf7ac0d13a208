use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current input state for the window.
///
/// Holds "is down" information only; per-frame edge detection is not needed
/// by the vehicle model, which re-derives its axes from held keys each tick.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // On focus loss, clear the "down" set. Avoids stuck keys
                    // when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_roundtrip() {
        let mut state = InputState::default();

        state.apply_event(InputEvent::Key { key: Key::W, state: KeyState::Pressed, repeat: false });
        assert!(state.key_down(Key::W));

        state.apply_event(InputEvent::Key { key: Key::W, state: KeyState::Released, repeat: false });
        assert!(!state.key_down(Key::W));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        state.apply_event(InputEvent::Key { key: Key::A, state: KeyState::Pressed, repeat: false });
        state.apply_event(InputEvent::Key { key: Key::Space, state: KeyState::Pressed, repeat: false });

        state.apply_event(InputEvent::Focused(false));

        assert!(state.keys_down.is_empty());
        assert!(!state.focused);
    }
}

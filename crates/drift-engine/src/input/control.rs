use super::state::InputState;
use super::types::Key;

/// Held-key snapshot consumed by the vehicle controller.
///
/// This is a plain value so the controller stays testable without a window:
/// tests construct it directly, the sandbox derives it from [`InputState`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ControlInput {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

impl ControlInput {
    /// Derives the control snapshot from the standard WASD + Space binding.
    pub fn from_keys(state: &InputState) -> Self {
        Self {
            forward: state.key_down(Key::W) || state.key_down(Key::ArrowUp),
            reverse: state.key_down(Key::S) || state.key_down(Key::ArrowDown),
            left: state.key_down(Key::A) || state.key_down(Key::ArrowLeft),
            right: state.key_down(Key::D) || state.key_down(Key::ArrowRight),
            boost: state.key_down(Key::Space),
        }
    }
}

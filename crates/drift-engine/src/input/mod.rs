//! Platform-agnostic keyboard input.
//!
//! The window runtime translates winit events into [`InputEvent`]s; the
//! current held-key state lives in [`InputState`]. Gameplay code reads a
//! [`ControlInput`] snapshot instead of raw keys.

mod control;
mod state;
mod types;

pub use control::ControlInput;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};

//! Window + run loop.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};

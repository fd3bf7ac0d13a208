//! drift engine crate.
//!
//! A minimal real-time 2D scene renderer over wgpu plus the top-down vehicle
//! motion model that drives it. The platform pieces (window, GPU device,
//! input, timing) live here as well so binaries stay thin.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod camera;
pub mod scene;
pub mod render;
pub mod vehicle;

mod error;

pub use error::{InvalidMeshData, ShaderError, ShaderStage, TextureLoadError};

//! GPU-side rendering: pipeline, asset upload, and the frame renderer.
//!
//! The split mirrors the CPU scene layer: `scene` holds validated data and
//! transforms, this module turns them into buffers, bind groups and draws.

mod assets;
mod ctx;
mod mesh;
mod pipeline;
mod renderer;
mod texture;

pub use assets::Assets;
pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::GpuMesh;
pub use pipeline::ScenePipeline;
pub use renderer::Renderer;
pub use texture::{GpuTexture, TextureData};

//! Scene graph types.
//!
//! Responsibilities:
//! - store CPU-side mesh geometry and validate it before GPU upload
//! - pair geometry handles with 2D world transforms (`SceneObject`)
//! - keep a deterministic, insertion-ordered object list (`SceneManager`)
//!
//! Nothing in this module touches the GPU, which keeps transform and
//! ordering semantics testable without a device.

mod manager;
mod mesh;
mod object;

pub use manager::{ObjectHandle, SceneManager};
pub use mesh::{MeshData, Vertex};
pub use object::SceneObject;

/// Stable index of a texture in the asset store.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub(crate) u32);

/// Stable index of a mesh in the asset store.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshHandle(pub(crate) u32);

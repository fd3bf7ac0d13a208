use std::path::Path;

use crate::error::{InvalidMeshData, TextureLoadError};
use crate::scene::{MeshData, MeshHandle, TextureHandle, Vertex};

use super::{GpuMesh, GpuTexture, ScenePipeline, TextureData};

/// Owned store of uploaded textures and meshes, addressed by handle.
///
/// Like the scene list this is an append-only arena: handles stay valid for
/// the store's lifetime and there is no unload path. Asset lifetime is
/// whole-scene lifetime here.
#[derive(Default)]
pub struct Assets {
    textures: Vec<GpuTexture>,
    meshes: Vec<GpuMesh>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an image file, uploads it with its mip chain, and returns its
    /// handle. Nothing is stored when decoding fails.
    pub fn load_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &ScenePipeline,
        path: &Path,
        flip_vertically: bool,
    ) -> Result<TextureHandle, TextureLoadError> {
        let data = TextureData::load(path, flip_vertically)?;
        Ok(self.add_texture(GpuTexture::upload(device, queue, &data, pipeline)))
    }

    /// Uploads already-decoded texture data. Used for procedural textures.
    pub fn add_texture_data(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &ScenePipeline,
        data: &TextureData,
    ) -> TextureHandle {
        self.add_texture(GpuTexture::upload(device, queue, data, pipeline))
    }

    fn add_texture(&mut self, texture: GpuTexture) -> TextureHandle {
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(texture);
        handle
    }

    /// Validates the geometry, uploads it, and returns the mesh handle.
    pub fn create_mesh(
        &mut self,
        device: &wgpu::Device,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        texture: TextureHandle,
    ) -> Result<MeshHandle, InvalidMeshData> {
        let data = MeshData::new(vertices, indices, texture)?;
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(GpuMesh::upload(device, &data));
        Ok(handle)
    }

    #[inline]
    pub fn texture(&self, handle: TextureHandle) -> &GpuTexture {
        &self.textures[handle.0 as usize]
    }

    #[inline]
    pub fn mesh(&self, handle: MeshHandle) -> &GpuMesh {
        &self.meshes[handle.0 as usize]
    }
}

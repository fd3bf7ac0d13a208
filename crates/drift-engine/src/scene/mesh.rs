use bytemuck::{Pod, Zeroable};

use crate::error::InvalidMeshData;

use super::TextureHandle;

/// One mesh vertex: object-local position and texture coordinate.
///
/// Only X/Y are meaningful for the 2D scene; Z is the constant render-plane
/// depth each mesh is authored at.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// Validated CPU-side geometry for one mesh, plus the texture it samples.
///
/// Geometry is immutable once constructed; there is no update API. The
/// texture reference is a stable arena handle, so it cannot dangle as long
/// as the owning asset store is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    texture: TextureHandle,
}

impl MeshData {
    /// Builds mesh data, validating that every index references an existing
    /// vertex. The first out-of-range index is reported.
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        texture: TextureHandle,
    ) -> Result<Self, InvalidMeshData> {
        let vertex_count = vertices.len();
        for &index in &indices {
            if index as usize >= vertex_count {
                return Err(InvalidMeshData { index, vertex_count });
            }
        }

        Ok(Self {
            vertices,
            indices,
            texture,
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<Vertex> {
        vec![
            Vertex::new([-1.0, -1.0, 0.0], [0.0, 0.0]),
            Vertex::new([1.0, -1.0, 0.0], [1.0, 0.0]),
            Vertex::new([1.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([-1.0, 1.0, 0.0], [0.0, 1.0]),
        ]
    }

    const TEX: TextureHandle = TextureHandle(0);

    #[test]
    fn index_count_matches_indices_len() {
        let mesh = MeshData::new(quad_vertices(), vec![0, 1, 2, 0, 2, 3], TEX).unwrap();
        assert_eq!(mesh.index_count(), 6);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = MeshData::new(quad_vertices(), vec![0, 1, 4], TEX).unwrap_err();
        assert_eq!(err.index, 4);
        assert_eq!(err.vertex_count, 4);
    }

    #[test]
    fn first_offending_index_is_reported() {
        let err = MeshData::new(quad_vertices(), vec![0, 9, 12], TEX).unwrap_err();
        assert_eq!(err.index, 9);
    }

    #[test]
    fn empty_index_list_is_valid() {
        let mesh = MeshData::new(quad_vertices(), vec![], TEX).unwrap();
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn boundary_index_is_valid() {
        // Highest valid index for 4 vertices is 3.
        assert!(MeshData::new(quad_vertices(), vec![3], TEX).is_ok());
    }
}

use std::fmt;
use std::path::PathBuf;

/// Shader stage names used in diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Pipeline construction failure.
///
/// `Compile` is a per-stage WGSL validation failure; `Link` is a failure to
/// assemble the two stages into a render pipeline (entry point or interface
/// mismatch). Both carry the backend diagnostic text.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, detail: String },
    Link { detail: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, detail } => {
                write!(f, "shader compilation failed ({stage} stage): {detail}")
            }
            ShaderError::Link { detail } => {
                write!(f, "shader pipeline linking failed: {detail}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Image decode failure during texture loading.
///
/// Raised before any GPU allocation; a failed load leaves nothing behind.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureLoadError {
    pub path: PathBuf,
    pub detail: String,
}

impl TextureLoadError {
    pub(crate) fn new(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self { path: path.into(), detail: detail.into() }
    }
}

impl fmt::Display for TextureLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load texture {}: {}", self.path.display(), self.detail)
    }
}

impl std::error::Error for TextureLoadError {}

/// An index buffer entry referencing a vertex that does not exist.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InvalidMeshData {
    /// The first out-of-range index encountered.
    pub index: u32,
    /// Number of vertices the mesh actually has.
    pub vertex_count: usize,
}

impl fmt::Display for InvalidMeshData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mesh index {} out of range for {} vertices",
            self.index, self.vertex_count
        )
    }
}

impl std::error::Error for InvalidMeshData {}

use std::path::Path;

use crate::error::TextureLoadError;

use super::ScenePipeline;

/// Decoded RGBA8 image plus its full mip chain, CPU-side.
///
/// Decoding, the optional vertical flip and mip generation all happen before
/// any GPU work, so a failed load leaves no GPU state behind.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    width: u32,
    height: u32,
    /// Level 0 is the full image; each further level halves both dimensions
    /// (floor, min 1) down to 1×1.
    levels: Vec<Vec<u8>>,
}

impl TextureData {
    /// Loads and decodes an image file to RGBA8.
    ///
    /// `flip_vertically` reorders rows so the first row of texel data is the
    /// bottom of the image, matching meshes authored with V growing upward.
    /// Most sprite assets want this on.
    pub fn load(path: &Path, flip_vertically: bool) -> Result<Self, TextureLoadError> {
        let image = image::open(path).map_err(|e| TextureLoadError::new(path, e.to_string()))?;

        let mut rgba = image.into_rgba8();
        if flip_vertically {
            image::imageops::flip_vertical_in_place(&mut rgba);
        }

        let (width, height) = rgba.dimensions();
        let levels = build_mip_chain(rgba.into_raw(), width, height);

        Ok(Self {
            width,
            height,
            levels,
        })
    }

    /// Builds texture data from raw RGBA8 pixels, mainly for tests and
    /// procedural textures. `pixels` must hold exactly `width * height * 4`
    /// bytes.
    pub fn from_rgba8(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            levels: build_mip_chain(pixels, width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn mip_level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    #[inline]
    pub fn level(&self, mip: u32) -> &[u8] {
        &self.levels[mip as usize]
    }
}

/// GPU texture with its sampler, packaged as the bind group the scene
/// pipeline's group 2 expects.
pub struct GpuTexture {
    bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    /// Uploads all mip levels and creates the sampling bind group.
    ///
    /// Sampling is repeat wrap on both axes with linear minification,
    /// magnification and mip interpolation (trilinear).
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
        pipeline: &ScenePipeline,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: data.width(),
            height: data.height(),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("drift scene texture"),
            size,
            mip_level_count: data.mip_level_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let mut level_width = data.width();
        let mut level_height = data.height();
        for mip in 0..data.mip_level_count() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                data.level(mip),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level_width),
                    rows_per_image: Some(level_height),
                },
                wgpu::Extent3d {
                    width: level_width,
                    height: level_height,
                    depth_or_array_layers: 1,
                },
            );
            level_width = (level_width / 2).max(1);
            level_height = (level_height / 2).max(1);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("drift scene sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("drift texture bind group"),
            layout: pipeline.texture_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self { bind_group }
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Generates the mip chain by successive 2×2 box reduction down to 1×1.
///
/// Odd dimensions round down; source texels past the edge clamp to the last
/// row/column so every level still averages four samples.
fn build_mip_chain(base: Vec<u8>, width: u32, height: u32) -> Vec<Vec<u8>> {
    let mut levels = vec![base];
    let (mut w, mut h) = (width, height);

    while w > 1 || h > 1 {
        let next_w = (w / 2).max(1);
        let next_h = (h / 2).max(1);
        let prev = levels.last().map(Vec::as_slice).unwrap_or(&[]);
        let mut next = vec![0u8; (next_w * next_h * 4) as usize];

        for y in 0..next_h {
            for x in 0..next_w {
                let sy0 = (2 * y).min(h - 1);
                let sy1 = (2 * y + 1).min(h - 1);
                let sx0 = (2 * x).min(w - 1);
                let sx1 = (2 * x + 1).min(w - 1);

                for c in 0..4 {
                    let sum = texel(prev, w, sx0, sy0, c) as u32
                        + texel(prev, w, sx1, sy0, c) as u32
                        + texel(prev, w, sx0, sy1, c) as u32
                        + texel(prev, w, sx1, sy1, c) as u32;
                    next[((y * next_w + x) * 4 + c) as usize] = (sum / 4) as u8;
                }
            }
        }

        levels.push(next);
        w = next_w;
        h = next_h;
    }

    levels
}

#[inline]
fn texel(pixels: &[u8], width: u32, x: u32, y: u32, channel: u32) -> u8 {
    pixels[((y * width + x) * 4 + channel) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> TextureData {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgba);
        }
        TextureData::from_rgba8(pixels, width, height)
    }

    // ── mip chain shape ───────────────────────────────────────────────────

    #[test]
    fn chain_halves_down_to_one_by_one() {
        let tex = solid(8, 8, [10, 20, 30, 255]);
        // 8, 4, 2, 1
        assert_eq!(tex.mip_level_count(), 4);
        assert_eq!(tex.level(3).len(), 4);
    }

    #[test]
    fn non_square_chain_floors_each_axis() {
        let tex = solid(8, 2, [0, 0, 0, 255]);
        // (8,2) -> (4,1) -> (2,1) -> (1,1)
        assert_eq!(tex.mip_level_count(), 4);
        assert_eq!(tex.level(1).len(), 4 * 1 * 4);
    }

    #[test]
    fn one_by_one_has_a_single_level() {
        let tex = solid(1, 1, [255, 0, 0, 255]);
        assert_eq!(tex.mip_level_count(), 1);
    }

    // ── reduction values ──────────────────────────────────────────────────

    #[test]
    fn solid_color_survives_reduction() {
        let tex = solid(4, 4, [100, 150, 200, 255]);
        for mip in 0..tex.mip_level_count() {
            assert_eq!(&tex.level(mip)[..4], &[100, 150, 200, 255]);
        }
    }

    #[test]
    fn checkerboard_averages_to_midpoint() {
        // 2×2 black/white checker reduces to a single grey texel.
        let pixels = vec![
            0, 0, 0, 255, 255, 255, 255, 255, //
            255, 255, 255, 255, 0, 0, 0, 255,
        ];
        let tex = TextureData::from_rgba8(pixels, 2, 2);
        assert_eq!(tex.mip_level_count(), 2);
        assert_eq!(&tex.level(1)[..4], &[127, 127, 127, 255]);
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn missing_file_reports_its_path() {
        let err = TextureData::load(Path::new("definitely/not/here.png"), true).unwrap_err();
        assert!(err.path.ends_with("here.png"));
    }
}

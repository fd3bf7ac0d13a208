use crate::camera::Camera;
use crate::error::ShaderError;
use crate::scene::SceneManager;

use super::pipeline::{CameraUniform, ModelUniform, MODEL_STRIDE};
use super::{Assets, RenderCtx, RenderTarget, ScenePipeline};

/// Frame renderer: owns the pipeline, the camera and the scene list, and
/// issues one indexed draw per object in insertion order.
///
/// Meshes and textures live in a caller-owned [`Assets`] store so scene
/// setup code controls asset lifetime while the renderer stays focused on
/// per-frame work.
pub struct Renderer {
    pipeline: ScenePipeline,
    camera: Camera,
    scene: SceneManager,

    camera_ubo: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    model_ubo: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    model_capacity: usize,
}

impl Renderer {
    const INITIAL_MODEL_CAPACITY: usize = 64;

    /// Builds the renderer with the built-in scene shaders.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: f32,
        height: f32,
    ) -> Result<Self, ShaderError> {
        let pipeline = ScenePipeline::new(
            device,
            surface_format,
            include_str!("shaders/scene.vert.wgsl"),
            include_str!("shaders/scene.frag.wgsl"),
        )?;

        let camera_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("drift camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("drift camera bind group"),
            layout: pipeline.camera_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        let (model_ubo, model_bind_group) =
            create_model_buffer(device, &pipeline, Self::INITIAL_MODEL_CAPACITY);

        Ok(Self {
            pipeline,
            camera: Camera::new(width, height),
            scene: SceneManager::new(),
            camera_ubo,
            camera_bind_group,
            model_ubo,
            model_bind_group,
            model_capacity: Self::INITIAL_MODEL_CAPACITY,
        })
    }

    #[inline]
    pub fn pipeline(&self) -> &ScenePipeline {
        &self.pipeline
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    pub fn scene(&self) -> &SceneManager {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut SceneManager {
        &mut self.scene
    }

    /// Split borrow for callers that drive both at once (vehicle sync +
    /// camera follow).
    #[inline]
    pub fn scene_and_camera_mut(&mut self) -> (&mut SceneManager, &mut Camera) {
        (&mut self.scene, &mut self.camera)
    }

    /// Draws the whole scene into `target`.
    ///
    /// The camera viewport tracks the drawable size (even for an empty
    /// scene), uniforms are written, then objects are drawn in insertion
    /// order. Objects whose mesh has no indices are skipped.
    pub fn render_frame(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        assets: &Assets,
    ) {
        self.camera.set_size(ctx.width as f32, ctx.height as f32);

        if self.scene.is_empty() {
            return;
        }

        self.write_camera_uniform(ctx);
        self.ensure_model_capacity(ctx, self.scene.len());
        self.write_model_uniforms(ctx);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("drift scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(self.pipeline.pipeline());
        rpass.set_bind_group(0, &self.camera_bind_group, &[]);

        for (i, object) in self.scene.iter().enumerate() {
            let mesh = assets.mesh(object.mesh());
            if mesh.index_count() == 0 {
                continue;
            }

            let offset = (i as u64 * MODEL_STRIDE) as u32;
            rpass.set_bind_group(1, &self.model_bind_group, &[offset]);
            rpass.set_bind_group(2, assets.texture(mesh.texture()).bind_group(), &[]);
            rpass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
            rpass.set_index_buffer(mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count(), 0, 0..1);
        }
    }

    fn write_camera_uniform(&self, ctx: &RenderCtx<'_>) {
        let u = CameraUniform {
            projection: self.camera.projection_matrix().to_cols_array_2d(),
            view: self.camera.view_matrix().to_cols_array_2d(),
        };
        ctx.queue.write_buffer(&self.camera_ubo, 0, bytemuck::bytes_of(&u));
    }

    /// Packs every object's model matrix at its dynamic-offset slot and
    /// uploads them in one write.
    fn write_model_uniforms(&self, ctx: &RenderCtx<'_>) {
        let mut staging = vec![0u8; self.scene.len() * MODEL_STRIDE as usize];
        for (i, object) in self.scene.iter().enumerate() {
            let u = ModelUniform {
                model: object.model_matrix().to_cols_array_2d(),
            };
            let start = i * MODEL_STRIDE as usize;
            let end = start + std::mem::size_of::<ModelUniform>();
            staging[start..end].copy_from_slice(bytemuck::bytes_of(&u));
        }
        ctx.queue.write_buffer(&self.model_ubo, 0, &staging);
    }

    fn ensure_model_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.model_capacity {
            return;
        }

        let new_cap = required
            .next_power_of_two()
            .max(Self::INITIAL_MODEL_CAPACITY);
        let (ubo, bind_group) = create_model_buffer(ctx.device, &self.pipeline, new_cap);

        self.model_ubo = ubo;
        self.model_bind_group = bind_group;
        self.model_capacity = new_cap;
    }
}

fn create_model_buffer(
    device: &wgpu::Device,
    pipeline: &ScenePipeline,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let ubo = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("drift model ubo"),
        size: capacity as u64 * MODEL_STRIDE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    // The binding window is one block wide; the dynamic offset slides it.
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("drift model bind group"),
        layout: pipeline.model_layout(),
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &ubo,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniform>() as u64),
            }),
        }],
    });

    (ubo, bind_group)
}

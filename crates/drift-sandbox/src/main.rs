//! Drivable-car sandbox: a small scene (ground, a couple of obstacles, the
//! car) rendered by `drift-engine`, with WASD/arrow driving, Space boost and
//! +/- camera zoom.

use std::path::Path;

use anyhow::Result;
use glam::Vec2;

use drift_engine::camera::Camera;
use drift_engine::core::{App, AppControl, FrameCtx};
use drift_engine::device::GpuInit;
use drift_engine::input::{ControlInput, Key};
use drift_engine::logging::{LoggingConfig, init_logging};
use drift_engine::render::{Assets, Renderer, ScenePipeline, TextureData};
use drift_engine::scene::{SceneObject, TextureHandle, Vertex};
use drift_engine::vehicle::{VehicleController, VehicleTuning};
use drift_engine::window::{Runtime, RuntimeConfig};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Zoom changes per second while a zoom key is held.
const ZOOM_RATE: f32 = 1.5;
const ZOOM_MIN: f32 = 0.2;
const ZOOM_MAX: f32 = 5.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "drift sandbox".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), Sandbox::default())
}

#[derive(Default)]
struct Sandbox {
    world: Option<World>,
}

/// Everything that needs a GPU device to exist; built lazily on the first
/// frame since the device lives behind the runtime.
struct World {
    renderer: Renderer,
    assets: Assets,
    vehicle: VehicleController,
}

impl App for Sandbox {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input.key_down(Key::Escape) {
            return AppControl::Exit;
        }

        if self.world.is_none() {
            match World::create(ctx) {
                Ok(world) => self.world = Some(world),
                Err(e) => {
                    log::error!("scene setup failed: {e:#}");
                    return AppControl::Exit;
                }
            }
        }
        let Some(world) = self.world.as_mut() else {
            return AppControl::Exit;
        };

        let dt = ctx.time.dt;

        let input = ControlInput::from_keys(ctx.input);
        world.vehicle.apply_input(&input, dt);
        let (scene, camera) = world.renderer.scene_and_camera_mut();
        world.vehicle.update(dt, scene, camera);

        apply_zoom_keys(camera, ctx, dt);

        let (renderer, assets) = (&mut world.renderer, &world.assets);
        ctx.render(CLEAR_COLOR, |rctx, target| {
            renderer.render_frame(rctx, target, assets);
        })
    }
}

fn apply_zoom_keys(camera: &mut Camera, ctx: &FrameCtx<'_, '_>, dt: f32) {
    let mut zoom = camera.zoom();
    if ctx.input.key_down(Key::Equal) {
        zoom *= 1.0 + ZOOM_RATE * dt;
    }
    if ctx.input.key_down(Key::Minus) {
        zoom /= 1.0 + ZOOM_RATE * dt;
    }
    camera.set_zoom(zoom.clamp(ZOOM_MIN, ZOOM_MAX));
}

impl World {
    fn create(ctx: &FrameCtx<'_, '_>) -> Result<Self> {
        let device = ctx.gpu.device();
        let size = ctx.gpu.size();

        let mut renderer = Renderer::new(
            device,
            ctx.gpu.surface_format(),
            size.width as f32,
            size.height as f32,
        )?;
        let mut assets = Assets::new();

        let car_texture = texture_or_fallback(
            &mut assets,
            ctx,
            renderer.pipeline(),
            concat!(env!("CARGO_MANIFEST_DIR"), "/assets/car.png"),
            [200, 40, 40, 255],
        );
        let ground_texture = texture_or_fallback(
            &mut assets,
            ctx,
            renderer.pipeline(),
            concat!(env!("CARGO_MANIFEST_DIR"), "/assets/asphalt.png"),
            [60, 60, 65, 255],
        );
        let crate_texture = texture_or_fallback(
            &mut assets,
            ctx,
            renderer.pipeline(),
            concat!(env!("CARGO_MANIFEST_DIR"), "/assets/crate.png"),
            [150, 110, 60, 255],
        );

        // Ground first so everything else paints over it. UVs run past 1 to
        // tile the texture across the field.
        let ground_mesh = assets.create_mesh(
            device,
            vec![
                Vertex::new([-4000.0, -4000.0, 0.0], [0.0, 0.0]),
                Vertex::new([4000.0, -4000.0, 0.0], [32.0, 0.0]),
                Vertex::new([4000.0, 4000.0, 0.0], [32.0, 32.0]),
                Vertex::new([-4000.0, 4000.0, 0.0], [0.0, 32.0]),
            ],
            vec![0, 1, 2, 0, 2, 3],
            ground_texture,
        )?;

        let crate_mesh = assets.create_mesh(
            device,
            vec![
                Vertex::new([-50.0, -50.0, 0.0], [0.0, 0.0]),
                Vertex::new([50.0, -50.0, 0.0], [1.0, 0.0]),
                Vertex::new([50.0, 50.0, 0.0], [1.0, 1.0]),
                Vertex::new([-50.0, 50.0, 0.0], [0.0, 1.0]),
            ],
            vec![0, 1, 2, 0, 2, 3],
            crate_texture,
        )?;

        let car_mesh = assets.create_mesh(
            device,
            car_vertices(),
            vec![
                0, 1, 2, //
                0, 2, 3, //
                5, 0, 3, //
                5, 3, 4, //
                1, 6, 7, //
                1, 7, 2, //
            ],
            car_texture,
        )?;

        let scene = renderer.scene_mut();
        scene.add_object(SceneObject::new(ground_mesh, Vec2::ZERO));
        scene.add_object(SceneObject::new(crate_mesh, Vec2::new(300.0, 150.0)).with_rotation(25.0));
        scene.add_object(
            SceneObject::new(crate_mesh, Vec2::new(-250.0, -400.0))
                .with_scale(Vec2::new(2.0, 1.0)),
        );
        let car = scene.add_object(SceneObject::new(car_mesh, Vec2::ZERO));

        let mut vehicle = VehicleController::new(VehicleTuning::default());
        vehicle.bind_sprite(car);

        log::info!("scene ready: {} objects", renderer.scene().len());

        Ok(Self {
            renderer,
            assets,
            vehicle,
        })
    }
}

/// Loads a texture file, falling back to a flat color when the file is
/// missing so the sandbox still runs from a bare checkout.
fn texture_or_fallback(
    assets: &mut Assets,
    ctx: &FrameCtx<'_, '_>,
    pipeline: &ScenePipeline,
    path: &str,
    fallback_rgba: [u8; 4],
) -> TextureHandle {
    let device = ctx.gpu.device();
    let queue = ctx.gpu.queue();

    match assets.load_texture(device, queue, pipeline, Path::new(path), true) {
        Ok(handle) => handle,
        Err(e) => {
            log::warn!("{e}; using flat color");
            let data = TextureData::from_rgba8(fallback_rgba.to_vec(), 1, 1);
            assets.add_texture_data(device, queue, pipeline, &data)
        }
    }
}

/// The car polygon: a rectangle hull with tapered nose and tail, nose along
/// +X. UVs map the middle half of the texture onto the hull and the ends
/// onto the tapers.
fn car_vertices() -> Vec<Vertex> {
    let half_len = 40.0;
    let half_width = 30.0;
    let half_tip_width = 20.0;
    let tip_len = 20.0;

    vec![
        Vertex::new([-half_len, -half_width, 0.0], [0.25, 0.0]),
        Vertex::new([half_len, -half_width, 0.0], [0.75, 0.0]),
        Vertex::new([half_len, half_width, 0.0], [0.75, 1.0]),
        Vertex::new([-half_len, half_width, 0.0], [0.25, 1.0]),
        Vertex::new([-half_len - tip_len, half_tip_width, 0.0], [0.0, 1.0]),
        Vertex::new([-half_len - tip_len, -half_tip_width, 0.0], [0.0, 0.0]),
        Vertex::new([half_len + tip_len, -half_tip_width, 0.0], [1.0, 0.0]),
        Vertex::new([half_len + tip_len, half_tip_width, 0.0], [1.0, 1.0]),
    ]
}

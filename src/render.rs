use crate::constants::*;
use crate::dom;
use decor_core::{
    AmbientField, AmbientFrame, DecorativeField, FieldError, FieldRenderer, FieldResult,
    MountDevice, SpriteCloud, SpriteCloudFrame, Viewport, AMBIENT_LENS, CLOUD_FOG_DENSITY, CLOUD_LENS,
};
use glam::Mat4;
use std::rc::Rc;
use web_sys as web;

mod grid;
mod helpers;
mod points;
mod sprites;

use grid::{create_grid_resources, GridResources, GridUniforms};
use points::{create_point_pipeline, draw_layer, PointInstance, PointLayer, PointPipeline, PointUniforms};
use sprites::{create_sprite_resources, CloudUniforms, SpriteInstance, SpriteResources};

// ===================== Device (shared by remounts of one handle) =====================

pub struct GpuDevice {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuDevice {
    pub async fn acquire() -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("decor_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }

}

impl MountDevice for GpuDevice {
    fn destroy(&self) {
        self.device.destroy();
    }
}

// ===================== Per-mount canvas surface =====================

/// Largest surface side the device accepts.
fn max_side(device: &wgpu::Device) -> u32 {
    device.limits().max_texture_dimension_2d
}

struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl CanvasSurface {
    fn new(
        gpu: &GpuDevice,
        canvas: web::HtmlCanvasElement,
        viewport: Viewport,
    ) -> anyhow::Result<Self> {
        let surface = gpu
            .instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter_caps = surface.get_capabilities(&gpu.adapter);
        let format = adapter_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| adapter_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if adapter_caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            adapter_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let viewport = viewport.fit_within(max_side(&gpu.device));
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: viewport.width,
            height: viewport.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);
        Ok(Self {
            canvas,
            surface,
            config,
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.config.width, self.config.height)
    }

    /// Reconfigure when the canvas backing store changed size.
    fn follow_canvas(&mut self, device: &wgpu::Device) {
        let width = self.canvas.width();
        let height = self.canvas.height();
        if width == 0 || height == 0 {
            return;
        }
        let fitted = Viewport::new(width, height).fit_within(max_side(device));
        if fitted != self.viewport() {
            self.config.width = fitted.width;
            self.config.height = fitted.height;
            self.surface.configure(device, &self.config);
        }
    }

    /// Next swapchain texture, or `None` when this frame should be skipped.
    fn acquire(&mut self, device: &wgpu::Device) -> FieldResult<Option<wgpu::SurfaceTexture>> {
        match self.surface.get_current_texture() {
            Ok(t) => Ok(Some(t)),
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.surface.configure(device, &self.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => Ok(None),
            Err(e) => {
                log::error!("[gpu] surface error: {:?}", e);
                Err(FieldError::SurfaceLost)
            }
        }
    }

    fn detach(&self) {
        dom::detach(&self.canvas);
    }
}

fn mount_surface(
    gpu: &GpuDevice,
    host: &web::HtmlElement,
    size_css: Option<(f64, f64)>,
) -> FieldResult<CanvasSurface> {
    let (canvas, viewport) = dom::create_canvas(host, size_css)
        .map_err(|e| FieldError::SurfaceUnavailable(e.to_string()))?;
    CanvasSurface::new(gpu, canvas.clone(), viewport).map_err(|e| {
        dom::detach(&canvas);
        FieldError::SurfaceUnavailable(e.to_string())
    })
}

// ===================== Sprite cloud =====================

struct CloudGpu {
    surface: CanvasSurface,
    res: SpriteResources,
}

pub struct SpriteCloudRenderer {
    gpu: Rc<GpuDevice>,
    state: Option<CloudGpu>,
    scratch: Vec<SpriteInstance>,
}

impl SpriteCloudRenderer {
    pub fn new(
        gpu: Rc<GpuDevice>,
        host: &web::HtmlElement,
        size_css: (f64, f64),
        cloud: &SpriteCloud,
    ) -> FieldResult<Self> {
        let surface = mount_surface(&gpu, host, Some(size_css))?;
        let res = create_sprite_resources(
            &gpu.device,
            &gpu.queue,
            surface.config.format,
            cloud.element_count(),
        );
        log::info!(
            "[cloud] surface {}x{} with {} sprites",
            surface.config.width,
            surface.config.height,
            cloud.element_count()
        );
        Ok(Self {
            gpu,
            state: Some(CloudGpu { surface, res }),
            scratch: Vec::with_capacity(cloud.element_count()),
        })
    }
}

impl FieldRenderer<SpriteCloudFrame> for SpriteCloudRenderer {
    fn render(&mut self, frame: &SpriteCloudFrame) -> FieldResult<()> {
        let Some(st) = self.state.as_mut() else {
            return Ok(());
        };
        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        st.surface.follow_canvas(device);

        let camera = CLOUD_LENS.camera(frame.eye, st.surface.viewport());
        let (right, up) = camera.billboard_axes();
        let u = CloudUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            group: Mat4::from_quat(frame.group_rotation).to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
            eye_fog: camera.eye.extend(CLOUD_FOG_DENSITY).to_array(),
            fog_color: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], 1.0],
        };
        queue.write_buffer(&st.res.uniform_buffer, 0, bytemuck::bytes_of(&u));

        self.scratch.clear();
        self.scratch.extend(frame.nodes.iter().map(|n| SpriteInstance {
            pos_scale: n.position.extend(n.scale).to_array(),
            tint: [1.0, 1.0, 1.0, n.opacity],
        }));
        if !self.scratch.is_empty() {
            queue.write_buffer(
                &st.res.instance_buffer,
                0,
                bytemuck::cast_slice(&self.scratch),
            );
        }

        let Some(target) = st.surface.acquire(device)? else {
            return Ok(());
        };
        let view = target
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("cloud_encoder"),
        });
        {
            let mut rpass = helpers::begin_clear_pass(&mut encoder, "cloud_pass", &view);
            if !self.scratch.is_empty() {
                rpass.set_pipeline(&st.res.pipeline);
                rpass.set_bind_group(0, &st.res.bind_group, &[]);
                rpass.set_vertex_buffer(0, st.res.instance_buffer.slice(..));
                rpass.draw(0..6, 0..self.scratch.len() as u32);
            }
        }
        queue.submit(Some(encoder.finish()));
        target.present();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(st) = self.state.take() {
            st.res.destroy();
            st.surface.detach();
            log::debug!("[cloud] released gpu resources");
        }
    }
}

// ===================== Ambient field =====================

struct AmbientGpu {
    surface: CanvasSurface,
    points: PointPipeline,
    particles: PointLayer,
    stars: PointLayer,
    grid: GridResources,
}

impl AmbientGpu {
    fn destroy(&self) {
        self.particles.destroy();
        self.stars.destroy();
        self.grid.destroy();
    }
}

pub struct AmbientRenderer {
    gpu: Rc<GpuDevice>,
    state: Option<AmbientGpu>,
    scratch: Vec<PointInstance>,
}

impl AmbientRenderer {
    pub fn new(
        gpu: Rc<GpuDevice>,
        host: &web::HtmlElement,
        field: &AmbientField,
    ) -> FieldResult<Self> {
        let surface = mount_surface(&gpu, host, None)?;
        let format = surface.config.format;
        let points = create_point_pipeline(&gpu.device, format);
        let particles = points.create_layer(&gpu.device, "particles", field.element_count());

        // Stars never move in local space: upload once
        let mut stars = points.create_layer(&gpu.device, "stars", field.stars().len());
        let star_instances: Vec<PointInstance> = field
            .stars()
            .iter()
            .map(|s| PointInstance {
                pos_size: s.position.extend(s.size).to_array(),
                color: [s.color[0], s.color[1], s.color[2], 1.0],
            })
            .collect();
        if !star_instances.is_empty() {
            gpu.queue.write_buffer(
                &stars.instance_buffer,
                0,
                bytemuck::cast_slice(&star_instances),
            );
        }
        stars.count = star_instances.len() as u32;

        let grid = create_grid_resources(&gpu.device, format, &field.config().grid);
        log::info!(
            "[ambient] surface {}x{} particles={} stars={}",
            surface.config.width,
            surface.config.height,
            field.element_count(),
            stars.count
        );
        Ok(Self {
            gpu,
            state: Some(AmbientGpu {
                surface,
                points,
                particles,
                stars,
                grid,
            }),
            scratch: Vec::with_capacity(field.element_count()),
        })
    }
}

impl FieldRenderer<AmbientFrame> for AmbientRenderer {
    fn render(&mut self, frame: &AmbientFrame) -> FieldResult<()> {
        let Some(st) = self.state.as_mut() else {
            return Ok(());
        };
        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        st.surface.follow_canvas(device);

        let vp = st.surface.viewport();
        let camera = AMBIENT_LENS.camera(frame.eye, vp);
        let view_proj = camera.view_proj().to_cols_array_2d();
        let view = camera.view_matrix().to_cols_array_2d();
        let (w, h) = (vp.width as f32, vp.height as f32);

        self.scratch.clear();
        self.scratch.extend(frame.points.iter().map(|p| PointInstance {
            pos_size: p.extend(frame.point_size).to_array(),
            color: [1.0; 4],
        }));
        if !self.scratch.is_empty() {
            queue.write_buffer(
                &st.particles.instance_buffer,
                0,
                bytemuck::cast_slice(&self.scratch),
            );
        }
        st.particles.count = self.scratch.len() as u32;
        let particle_u = PointUniforms {
            view_proj,
            view,
            model: Mat4::from_quat(frame.particle_rotation).to_cols_array_2d(),
            viewport_time: [w, h, 0.0, POINT_MODE_PARTICLE],
            tint: [
                PARTICLE_COLOR[0],
                PARTICLE_COLOR[1],
                PARTICLE_COLOR[2],
                PARTICLE_OPACITY,
            ],
        };
        queue.write_buffer(&st.particles.uniform_buffer, 0, bytemuck::bytes_of(&particle_u));

        let star_u = PointUniforms {
            view_proj,
            view,
            model: Mat4::IDENTITY.to_cols_array_2d(),
            viewport_time: [w, h, frame.star_time, POINT_MODE_STAR],
            tint: [1.0; 4],
        };
        queue.write_buffer(&st.stars.uniform_buffer, 0, bytemuck::bytes_of(&star_u));

        let grid_u = GridUniforms {
            view_proj,
            model: frame.grid_model.to_cols_array_2d(),
            color: [GRID_COLOR[0], GRID_COLOR[1], GRID_COLOR[2], GRID_OPACITY],
        };
        queue.write_buffer(&st.grid.uniform_buffer, 0, bytemuck::bytes_of(&grid_u));

        let Some(target) = st.surface.acquire(device)? else {
            return Ok(());
        };
        let target_view = target
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("ambient_encoder"),
        });
        {
            let mut rpass = helpers::begin_clear_pass(&mut encoder, "ambient_pass", &target_view);
            draw_layer(&mut rpass, &st.points, &st.stars);
            rpass.set_pipeline(&st.grid.pipeline);
            rpass.set_bind_group(0, &st.grid.bind_group, &[]);
            rpass.set_vertex_buffer(0, st.grid.vertex_buffer.slice(..));
            rpass.draw(0..st.grid.vertex_count, 0..1);
            draw_layer(&mut rpass, &st.points, &st.particles);
        }
        queue.submit(Some(encoder.finish()));
        target.present();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(st) = self.state.take() {
            st.destroy();
            st.surface.detach();
            log::debug!("[ambient] released gpu resources");
        }
    }
}

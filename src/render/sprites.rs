use super::helpers;
use decor_core::{puff_texture, PUFF_TEXTURE_SIZE};
use wgpu;

const PUFF_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CloudUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) group: [[f32; 4]; 4],
    pub(crate) cam_right: [f32; 4],
    pub(crate) cam_up: [f32; 4],
    pub(crate) eye_fog: [f32; 4],
    pub(crate) fog_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteInstance {
    pub(crate) pos_scale: [f32; 4],
    pub(crate) tint: [f32; 4],
}

const SPRITE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

/// Pipeline, puff material and per-sprite buffer for one cloud.
pub(crate) struct SpriteResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    puff_tex: wgpu::Texture,
}

impl SpriteResources {
    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.instance_buffer.destroy();
        self.puff_tex.destroy();
    }
}

pub(crate) fn create_sprite_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    color_format: wgpu::TextureFormat,
    capacity: usize,
) -> SpriteResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("sprites_shader"),
        source: wgpu::ShaderSource::Wgsl(decor_core::SPRITES_WGSL.into()),
    });

    // Puff material, generated once on the CPU
    let puff = puff_texture(PUFF_TEXTURE_SIZE);
    let (puff_tex, puff_view) = helpers::create_color_texture_device(
        device,
        "puff_tex",
        puff.size,
        puff.size,
        PUFF_FORMAT,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &puff_tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &puff.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * puff.size),
            rows_per_image: Some(puff.size),
        },
        wgpu::Extent3d {
            width: puff.size,
            height: puff.size,
            depth_or_array_layers: 1,
        },
    );
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("puff_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("sprites_bgl"),
        entries: &[
            helpers::uniform_layout_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let uniform_buffer = helpers::uniform_buffer(
        device,
        "sprites_uniforms",
        std::mem::size_of::<CloudUniforms>(),
    );
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sprites_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&puff_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("sprites_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_overlay_pipeline(
        device,
        &pl,
        helpers::PipelineSpec {
            label: "sprites_pipeline",
            shader: &shader,
            vs_entry: "vs_sprite",
            fs_entry: "fs_sprite",
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &SPRITE_ATTRS,
            }],
            topology: wgpu::PrimitiveTopology::TriangleList,
        },
        color_format,
    );
    let instance_buffer = helpers::instance_buffer(
        device,
        "sprite_instances",
        std::mem::size_of::<SpriteInstance>(),
        capacity,
    );

    SpriteResources {
        pipeline,
        uniform_buffer,
        instance_buffer,
        bind_group,
        puff_tex,
    }
}

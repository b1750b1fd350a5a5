use super::helpers;
use decor_core::GridConfig;
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GridUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
}

pub(crate) struct GridResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) vertex_count: u32,
}

impl GridResources {
    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.vertex_buffer.destroy();
    }
}

const GRID_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub(crate) fn create_grid_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    grid: &GridConfig,
) -> GridResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("grid_shader"),
        source: wgpu::ShaderSource::Wgsl(decor_core::GRID_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("grid_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("grid_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_overlay_pipeline(
        device,
        &pl,
        helpers::PipelineSpec {
            label: "grid_pipeline",
            shader: &shader,
            vs_entry: "vs_grid",
            fs_entry: "fs_grid",
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &GRID_ATTRS,
            }],
            topology: wgpu::PrimitiveTopology::LineList,
        },
        color_format,
    );
    let vertices = grid.line_vertices();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("grid_vb"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let uniform_buffer =
        helpers::uniform_buffer(device, "grid_uniforms", std::mem::size_of::<GridUniforms>());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("grid_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    GridResources {
        pipeline,
        uniform_buffer,
        vertex_buffer,
        bind_group,
        vertex_count: vertices.len() as u32,
    }
}

use super::helpers;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) view: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) viewport_time: [f32; 4],
    pub(crate) tint: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointInstance {
    pub(crate) pos_size: [f32; 4],
    pub(crate) color: [f32; 4],
}

const POINT_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

/// Shared pipeline for particles and stars; each layer has its own buffers.
pub(crate) struct PointPipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
}

pub(crate) struct PointLayer {
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) count: u32,
}

impl PointLayer {
    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
        self.instance_buffer.destroy();
    }
}

pub(crate) fn create_point_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> PointPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(decor_core::POINTS_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("points_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_overlay_pipeline(
        device,
        &pl,
        helpers::PipelineSpec {
            label: "points_pipeline",
            shader: &shader,
            vs_entry: "vs_point",
            fs_entry: "fs_point",
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POINT_ATTRS,
            }],
            topology: wgpu::PrimitiveTopology::TriangleList,
        },
        color_format,
    );
    PointPipeline { pipeline, bgl }
}

impl PointPipeline {
    pub(crate) fn create_layer(
        &self,
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
    ) -> PointLayer {
        let uniform_buffer =
            helpers::uniform_buffer(device, label, std::mem::size_of::<PointUniforms>());
        let instance_buffer = helpers::instance_buffer(
            device,
            label,
            std::mem::size_of::<PointInstance>(),
            capacity,
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        PointLayer {
            uniform_buffer,
            instance_buffer,
            bind_group,
            count: 0,
        }
    }
}

pub(crate) fn draw_layer<'p>(
    rpass: &mut wgpu::RenderPass<'p>,
    pipeline: &PointPipeline,
    layer: &PointLayer,
) {
    if layer.count == 0 {
        return;
    }
    rpass.set_pipeline(&pipeline.pipeline);
    rpass.set_bind_group(0, &layer.bind_group, &[]);
    rpass.set_vertex_buffer(0, layer.instance_buffer.slice(..));
    rpass.draw(0..6, 0..layer.count);
}

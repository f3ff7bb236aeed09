//! Vertex, index, and uniform buffer wrappers.
//!
//! All buffers are created with their contents up front; uniform buffers can
//! additionally be overwritten through the queue.

use crate::context::GpuContext;
use bytemuck::{Pod, Zeroable};
use std::marker::PhantomData;

fn upload(
    ctx: &GpuContext,
    contents: &[u8],
    usage: wgpu::BufferUsages,
    label: Option<&str>,
) -> wgpu::Buffer {
    use wgpu::util::DeviceExt;
    ctx.device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label,
            contents,
            usage,
        })
}

/// Vertex data resident on the GPU.
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl VertexBuffer {
    pub fn new<V: Pod + Zeroable>(ctx: &GpuContext, vertices: &[V], label: Option<&str>) -> Self {
        Self {
            buffer: upload(
                ctx,
                bytemuck::cast_slice(vertices),
                wgpu::BufferUsages::VERTEX,
                label,
            ),
            count: vertices.len() as u32,
        }
    }

    /// Number of vertices.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

/// Index data resident on the GPU, tagged with its element width.
pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
    format: wgpu::IndexFormat,
}

impl IndexBuffer {
    pub fn new_u16(ctx: &GpuContext, indices: &[u16], label: Option<&str>) -> Self {
        Self {
            buffer: upload(
                ctx,
                bytemuck::cast_slice(indices),
                wgpu::BufferUsages::INDEX,
                label,
            ),
            count: indices.len() as u32,
            format: wgpu::IndexFormat::Uint16,
        }
    }

    pub fn new_u32(ctx: &GpuContext, indices: &[u32], label: Option<&str>) -> Self {
        Self {
            buffer: upload(
                ctx,
                bytemuck::cast_slice(indices),
                wgpu::BufferUsages::INDEX,
                label,
            ),
            count: indices.len() as u32,
            format: wgpu::IndexFormat::Uint32,
        }
    }

    /// Number of indices.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn format(&self) -> wgpu::IndexFormat {
        self.format
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

/// Uniform block of type `T` bundled with its bind group.
///
/// The layout binds a single uniform buffer visible to both the vertex and
/// fragment stages, which is all the built-in materials need.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: Pod + Zeroable> UniformBuffer<T> {
    pub fn new(ctx: &GpuContext, data: &T, binding: u32, label: Option<&str>) -> Self {
        let buffer = upload(
            ctx,
            bytemuck::bytes_of(data),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            label,
        );

        let layout_label = label.map(|l| format!("{l} layout"));
        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: layout_label.as_deref(),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let group_label = label.map(|l| format!("{l} bind group"));
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: group_label.as_deref(),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
            _marker: PhantomData,
        }
    }

    /// Replace the buffer contents with `data`.
    pub fn update(&self, ctx: &GpuContext, data: &T) {
        ctx.queue
            .write_buffer(&self.buffer, 0, bytemuck::bytes_of(data));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

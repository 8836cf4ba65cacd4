//! wgpu render pipeline for one linked shader program.
//!
//! Builds a full-screen triangle pipeline from the program's two compiled
//! stages. The uniform block reflected at link time becomes a single
//! buffer at group 0, binding 0.

use std::num::NonZeroU64;

use super::device::WgpuDevice;
use super::target::{RenderTarget, TARGET_FORMAT};
use super::types::GpuError;
use crate::shader::reflect::{CompiledStage, ProgramLayout, UNIFORM_BINDING, UNIFORM_GROUP};

/// Pipeline, uniform buffer and bind group for one program.
pub struct ProgramPipeline {
    pipeline: wgpu::RenderPipeline,
    uniforms: Option<(wgpu::Buffer, wgpu::BindGroup)>,
}

impl ProgramPipeline {
    /// Create the pipeline, capturing wgpu validation errors instead of
    /// letting them reach the device's uncaptured-error handler.
    pub fn new(
        gpu: &WgpuDevice,
        vertex: &CompiledStage,
        fragment: &CompiledStage,
        layout: &ProgramLayout,
    ) -> Result<Self, GpuError> {
        let device = &gpu.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("folio vertex shader"),
            source: wgpu::ShaderSource::Wgsl(vertex.source.as_str().into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("folio fragment shader"),
            source: wgpu::ShaderSource::Wgsl(fragment.source.as_str().into()),
        });

        let mut bind_group_layouts = Vec::new();
        let mut uniforms = None;
        if let Some(size) = NonZeroU64::new(u64::from(layout.uniform_size)) {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("folio uniforms"),
                size: size.get(),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("folio uniform layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: UNIFORM_BINDING,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(size),
                    },
                    count: None,
                }],
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("folio uniform bind group"),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: UNIFORM_BINDING,
                    resource: buffer.as_entire_binding(),
                }],
            });
            bind_group_layouts.push(bind_group_layout);
            uniforms = Some((buffer, bind_group));
        }
        let layout_refs: Vec<&wgpu::BindGroupLayout> = bind_group_layouts.iter().collect();

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("folio pipeline layout"),
            bind_group_layouts: &layout_refs,
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("folio background pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(layout.vertex_entry.as_str()),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(layout.fragment_entry.as_str()),
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(GpuError::Pipeline(error.to_string()));
        }
        Ok(Self { pipeline, uniforms })
    }

    /// Upload `uniform_data`, draw a full-screen triangle into `target` and
    /// queue the readback copy.
    pub fn render(&self, gpu: &WgpuDevice, target: &RenderTarget, uniform_data: &[u8]) {
        if let Some((buffer, _)) = &self.uniforms {
            gpu.queue.write_buffer(buffer, 0, uniform_data);
        }

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("folio frame encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("folio background pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            if let Some((_, bind_group)) = &self.uniforms {
                pass.set_bind_group(UNIFORM_GROUP, bind_group, &[]);
            }
            pass.draw(0..3, 0..1);
        }
        target.copy_to_readback(&mut encoder);
        gpu.queue.submit(Some(encoder.finish()));
    }
}

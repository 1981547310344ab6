use std::sync::Arc;

use wgpu::*;
use winit::window::Window;

use crate::config::Variant;
use crate::controller::{DrawCall, FrameUniforms};
use crate::error::LaunchError;
use crate::utils::{MeshBuffer, Vertex};
use crate::view::GpuContext;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Uniform buffer holding the model/view/projection matrices and its bind group
pub struct UniformResources {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

/// What happened when a frame was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// Surface was lost or outdated and has been reconfigured; frame dropped.
    Reconfigured,
    /// Transient acquire failure; frame dropped.
    Skipped,
    /// Out of memory; the loop should stop.
    Fatal,
}

pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d { width: width.max(1), height: height.max(1), depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
    (depth_texture, depth_view)
}

pub fn create_uniform_resources(device: &wgpu::Device) -> UniformResources {
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("mvp_buffer"),
        size: std::mem::size_of::<FrameUniforms>() as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("mvp_bind_group_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("mvp_bind_group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry { binding: 0, resource: uniform_buffer.as_entire_binding() }],
    });

    UniformResources { uniform_buffer, bind_group_layout, bind_group }
}

/// One pipeline per variant: line or triangle topology, depth test on, no culling
pub fn create_cube_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    bind_group_layout: &wgpu::BindGroupLayout,
    topology: wgpu::PrimitiveTopology,
    fragment_entry: &str,
) -> wgpu::RenderPipeline {
    let shader_src = include_str!("shaders/cube.wgsl");
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("cube_shader"),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("cube_pipeline_layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    tracing::debug!(?topology, fragment_entry, "creating cube pipeline");

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("cube_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(fragment_entry),
            targets: &[Some(wgpu::ColorTargetState { format, blend: Some(wgpu::BlendState::REPLACE), write_mask: wgpu::ColorWrites::ALL })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
        multiview: None,
        cache: None,
    })
}

///////////////////////////////////////////////////////////////////////////////

/// Everything needed to draw the cube into one window
pub struct RenderState {
    pub window: Arc<Window>,
    pub surface: Surface<'static>,
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
    pub config: SurfaceConfiguration,

    pub pipeline: RenderPipeline,
    pub mesh: MeshBuffer,
    pub uniforms: UniformResources,
    pub depth_texture: Texture,
    pub depth_view: TextureView,
    pub clear_color: Color,
}

impl RenderState {
    /// Create the surface, device and static resources for `window`.
    /// The mesh is uploaded here and never touched again.
    pub async fn new(window: Arc<Window>, variant: Variant) -> Result<Self, LaunchError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let gpu = GpuContext::new_native(&instance, surface, size.width, size.height).await?;

        let (depth_texture, depth_view) =
            create_depth_texture(&gpu.device, gpu.config.width, gpu.config.height);
        let uniforms = create_uniform_resources(&gpu.device);

        let mesh = variant.mesh();
        let pipeline = create_cube_pipeline(
            &gpu.device,
            gpu.format,
            &uniforms.bind_group_layout,
            mesh.mode.topology(),
            variant.fragment_entry(),
        );
        let mesh = mesh.upload(&gpu.device);

        Ok(Self {
            window,
            surface: gpu.surface,
            device: gpu.device,
            queue: gpu.queue,
            config: gpu.config,
            pipeline,
            mesh,
            uniforms,
            depth_texture,
            depth_view,
            clear_color: variant.clear_color(),
        })
    }

    /// Match the surface and depth buffer to a new window size.
    /// The projection keeps its fixed aspect.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let (depth_texture, depth_view) = create_depth_texture(&self.device, new_size.width, new_size.height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    /// Clear, upload matrices, issue the draw and present
    pub fn draw_frame(&mut self, uniforms: &FrameUniforms, draw: &DrawCall) -> FrameOutcome {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return FrameOutcome::Reconfigured;
            }
            Err(SurfaceError::OutOfMemory) => {
                tracing::error!("surface out of memory");
                return FrameOutcome::Fatal;
            }
            Err(e) => {
                tracing::warn!("skipping frame: {e:?}");
                return FrameOutcome::Skipped;
            }
        };

        self.queue.write_buffer(&self.uniforms.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("encoder"),
        });

        {
            let mut rp = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rp.set_pipeline(&self.pipeline);
            rp.set_bind_group(0, &self.uniforms.bind_group, &[]);
            rp.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
            rp.set_index_buffer(self.mesh.index_buffer.slice(..), IndexFormat::Uint32);
            rp.draw_indexed(0..draw.index_count.min(self.mesh.index_count), 0, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();

        FrameOutcome::Presented
    }
}

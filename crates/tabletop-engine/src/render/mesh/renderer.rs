use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::device::DEPTH_FORMAT;
use crate::render::{RenderCtx, RenderTarget, TextureData};
use crate::scene::{DrawList, MeshId, TextureId};

use super::{MeshData, Vertex};

/// Textured, depth-tested mesh renderer.
///
/// Meshes and textures are registered up front (no device required) and uploaded
/// lazily on the first `render` call. Each draw in the `DrawList` gets its own
/// slot in a dynamic-offset uniform buffer holding the projection and model-view
/// matrices.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    draw_bgl: Option<wgpu::BindGroupLayout>,
    texture_bgl: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    draw_ubo: Option<wgpu::Buffer>,
    draw_bind_group: Option<wgpu::BindGroup>,
    draw_capacity: usize,
    draw_stride: u64,

    meshes: Vec<MeshSlot>,
    textures: Vec<TextureSlot>,

    warned_unknown_handle: bool,
}

struct MeshSlot {
    data: MeshData,
    gpu: Option<GpuMesh>,
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

struct TextureSlot {
    data: TextureData,
    bind_group: Option<wgpu::BindGroup>,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniform {
    projection: [[f32; 4]; 4],
    model_view: [[f32; 4]; 4],
}

impl DrawUniform {
    fn new(projection: Mat4, model_view: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            model_view: model_view.to_cols_array_2d(),
        }
    }
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mesh. Upload happens on the next `render`.
    pub fn add_mesh(&mut self, data: MeshData) -> MeshId {
        debug_assert!(data.is_well_formed(), "mesh '{}' has dangling indices", data.label);
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(MeshSlot { data, gpu: None });
        id
    }

    /// Registers a texture. Upload happens on the next `render`.
    pub fn add_texture(&mut self, data: TextureData) -> TextureId {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(TextureSlot {
            data,
            bind_group: None,
        });
        id
    }

    /// Renders every draw in `draw_list` into `target`, in insertion order.
    ///
    /// Draws referencing unknown meshes or textures are skipped (one-time warning).
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);
        self.ensure_meshes(ctx);
        self.ensure_textures(ctx);

        if draw_list.is_empty() {
            return;
        }

        self.ensure_draw_capacity(ctx, draw_list.len());

        let Some(ubo) = self.draw_ubo.as_ref() else { return };

        // Pack one uniform per draw at `draw_stride` spacing.
        let stride = self.draw_stride as usize;
        let mut staging = vec![0u8; stride * draw_list.len()];
        for (i, draw) in draw_list.items().iter().enumerate() {
            let u = DrawUniform::new(draw_list.projection(), draw.model_view);
            let bytes = bytemuck::bytes_of(&u);
            staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        ctx.queue.write_buffer(ubo, 0, &staging);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(draw_bind_group) = self.draw_bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tabletop mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);

        let mut skipped = false;
        for (i, draw) in draw_list.items().iter().enumerate() {
            let mesh = self
                .meshes
                .get(draw.mesh.0 as usize)
                .and_then(|m| m.gpu.as_ref());
            let texture = self
                .textures
                .get(draw.texture.0 as usize)
                .and_then(|t| t.bind_group.as_ref());

            let (Some(mesh), Some(texture)) = (mesh, texture) else {
                skipped = true;
                continue;
            };

            let offset = (i as u64 * self.draw_stride) as u32;
            rpass.set_bind_group(0, draw_bind_group, &[offset]);
            rpass.set_bind_group(1, texture, &[]);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
        drop(rpass);

        if skipped && !self.warned_unknown_handle {
            log::warn!("MeshRenderer: draw referenced an unknown mesh or texture; skipped");
            self.warned_unknown_handle = true;
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tabletop mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let draw_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tabletop mesh draw bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<DrawUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let texture_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tabletop mesh texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tabletop mesh pipeline layout"),
            bind_group_layouts: &[&draw_bgl, &texture_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tabletop mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Cube faces are not wound consistently; rely on the depth test.
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
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.draw_bgl = Some(draw_bgl);
        self.texture_bgl = Some(texture_bgl);

        // Bind groups were created against the old layouts.
        self.draw_ubo = None;
        self.draw_bind_group = None;
        self.draw_capacity = 0;
        for slot in &mut self.textures {
            slot.bind_group = None;
        }
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tabletop mesh sampler"),
            address_mode_u: wgpu::AddressMode::MirrorRepeat,
            address_mode_v: wgpu::AddressMode::MirrorRepeat,
            address_mode_w: wgpu::AddressMode::MirrorRepeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>) {
        for slot in self.meshes.iter_mut().filter(|s| s.gpu.is_none()) {
            let data = &slot.data;
            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(data.label),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

            // Index buffers must be a multiple of 4 bytes; pad odd u16 counts.
            let mut indices = data.indices.clone();
            if indices.len() % 2 == 1 {
                indices.push(0);
            }
            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(data.label),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            log::debug!(
                "uploaded mesh '{}' ({} vertices, {} indices)",
                data.label,
                data.vertices.len(),
                data.indices.len()
            );

            slot.gpu = Some(GpuMesh {
                vbo,
                ibo,
                index_count: data.indices.len() as u32,
            });
        }
    }

    fn ensure_textures(&mut self, ctx: &RenderCtx<'_>) {
        let Some(bgl) = self.texture_bgl.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        for slot in self.textures.iter_mut().filter(|s| s.bind_group.is_none()) {
            let data = &slot.data;
            let size = wgpu::Extent3d {
                width: data.width,
                height: data.height,
                depth_or_array_layers: 1,
            };

            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some(data.label.as_str()),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &data.rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * data.width),
                    rows_per_image: Some(data.height),
                },
                size,
            );

            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(data.label.as_str()),
                layout: bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            });

            log::debug!("uploaded texture '{}' ({}x{})", data.label, data.width, data.height);
            slot.bind_group = Some(bind_group);
        }
    }

    fn ensure_draw_capacity(&mut self, ctx: &RenderCtx<'_>, required_draws: usize) {
        if required_draws <= self.draw_capacity && self.draw_bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.draw_bgl.as_ref() else { return };

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = uniform_stride(std::mem::size_of::<DrawUniform>() as u64, alignment);
        let new_cap = required_draws.next_power_of_two().max(16);

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tabletop mesh draw ubo"),
            size: stride * new_cap as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tabletop mesh draw bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniform>() as u64),
                }),
            }],
        });

        self.draw_ubo = Some(ubo);
        self.draw_bind_group = Some(bind_group);
        self.draw_capacity = new_cap;
        self.draw_stride = stride;
    }
}

/// Rounds `size` up to the next multiple of `alignment` (a power of two).
fn uniform_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

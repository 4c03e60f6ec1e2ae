use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use orrery_transform::Matrix4;

use crate::mesh::{MeshVertex, SphereMesh};
use crate::render::{RenderCtx, RenderTarget};

/// One sphere to draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereInstance {
    /// Column-major model-view matrix, typically `MatrixStack::current_matrix()`.
    pub model_view: Matrix4,
    /// Linear RGB albedo.
    pub color: [f32; 3],
    /// 0 = lit by the light, 1 = self-lit (the sun).
    pub emissive: f32,
}

impl SphereInstance {
    /// View-space z of the instance origin (more negative is farther away).
    #[inline]
    pub fn view_depth(&self) -> f32 {
        self.model_view[14]
    }
}

/// Sorts instances back to front.
///
/// The renderer has no depth buffer; with back faces culled, painting convex
/// bodies farthest-first gives the correct occlusion as long as they do not
/// intersect.
pub fn painter_order(instances: &mut [SphereInstance]) {
    instances.sort_by(|a, b| a.view_depth().total_cmp(&b.view_depth()));
}

/// Renderer for instanced, lit spheres sharing one mesh.
#[derive(Default)]
pub struct SphereRenderer {
    segments: u32,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    mesh_vbo: Option<wgpu::Buffer>,
    mesh_ibo: Option<wgpu::Buffer>,
    index_count: u32,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl SphereRenderer {
    /// `segments` is the tessellation of the shared unit sphere.
    pub fn new(segments: u32) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    /// Draws `instances` with the given projection and view-space light position.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        projection: &Matrix4,
        light_pos: [f32; 3],
        instances: &[SphereInstance],
    ) {
        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_mesh(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, instances.len());

        let mut sorted = instances.to_vec();
        painter_order(&mut sorted);
        let raw: Vec<InstanceRaw> = sorted.iter().map(InstanceRaw::from).collect();

        let Some(camera_ubo) = self.camera_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            camera_ubo,
            0,
            bytemuck::bytes_of(&CameraUniform {
                projection: *projection,
                light_pos: [light_pos[0], light_pos[1], light_pos[2], 1.0],
            }),
        );

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&raw));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(mesh_vbo) = self.mesh_vbo.as_ref() else { return };
        let Some(mesh_ibo) = self.mesh_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("orrery sphere pass"),
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

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, mesh_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(mesh_ibo.slice(..), wgpu::IndexFormat::Uint32);
        // Instances rasterize in buffer order, which is back to front.
        rpass.draw_indexed(0..self.index_count, 0, 0..raw.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery sphere shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sphere.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("orrery sphere bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<CameraUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("orrery sphere pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("orrery sphere pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout(), InstanceRaw::layout()],
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
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery sphere camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery sphere bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_mesh(&mut self, ctx: &RenderCtx<'_>) {
        if self.mesh_vbo.is_some() && self.mesh_ibo.is_some() {
            return;
        }

        let mesh = SphereMesh::new(1.0, self.segments);
        self.mesh_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery sphere vbo"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.mesh_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery sphere ibo"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.index_count = mesh.indices.len() as u32;
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(16);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery sphere instance vbo"),
            size: (new_cap * std::mem::size_of::<InstanceRaw>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform layout (80 bytes): projection mat4, then the light position.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    projection: [f32; 16],
    light_pos: [f32; 4],
}

/// Instance layout (80 bytes):
///
///  offset  0  model_view  [f32; 16]  loc 3..=6 (one column each)
///  offset 64  color       [f32; 3]   loc 7
///  offset 76  emissive    f32        loc 8
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InstanceRaw {
    model_view: [f32; 16],
    color: [f32; 3],
    emissive: f32,
}

impl From<&SphereInstance> for InstanceRaw {
    fn from(inst: &SphereInstance) -> Self {
        Self {
            model_view: inst.model_view,
            color: inst.color,
            emissive: inst.emissive,
        }
    }
}

impl InstanceRaw {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        3 => Float32x4, // model_view column 0
        4 => Float32x4, // column 1
        5 => Float32x4, // column 2
        6 => Float32x4, // column 3
        7 => Float32x3, // color
        8 => Float32    // emissive
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use ::wgpu::util::DeviceExt;
    use gpu::RenderFrame;
    use gpu::geometry::{LineVertex, MeshVertex, unit_sphere_mesh};
    use gpu::matrix::Mat4;
    use gpu::renderer::SphereInstance;
    use std::borrow::Cow;
    use wasm_bindgen::prelude::*;

    #[derive(Debug)]
    pub struct WgpuContext {
        pub _instance: &'static ::wgpu::Instance,
        pub surface: ::wgpu::Surface<'static>,
        pub device: ::wgpu::Device,
        pub queue: ::wgpu::Queue,
        pub config: ::wgpu::SurfaceConfiguration,
        pub line_pipeline: ::wgpu::RenderPipeline,
        pub sphere_pipeline: ::wgpu::RenderPipeline,
        pub uniform_buffer: ::wgpu::Buffer,
        pub uniform_bind_group: ::wgpu::BindGroup,
        pub mesh_vertex_buffer: ::wgpu::Buffer,
        pub mesh_index_buffer: ::wgpu::Buffer,
        pub mesh_index_count: u32,
        pub line_buffer: DynamicBuffer,
        pub instance_buffer: DynamicBuffer,
    }

    /// Vertex buffer that is rewritten every frame and grows on demand.
    #[derive(Debug)]
    pub struct DynamicBuffer {
        label: &'static str,
        buffer: ::wgpu::Buffer,
        capacity: u64,
    }

    impl DynamicBuffer {
        fn new(device: &::wgpu::Device, label: &'static str, capacity: u64) -> Self {
            let capacity = capacity.max(256);
            Self {
                label,
                buffer: Self::allocate(device, label, capacity),
                capacity,
            }
        }

        fn allocate(device: &::wgpu::Device, label: &'static str, size: u64) -> ::wgpu::Buffer {
            device.create_buffer(&::wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: ::wgpu::BufferUsages::VERTEX | ::wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        }

        fn write(&mut self, device: &::wgpu::Device, queue: &::wgpu::Queue, bytes: &[u8]) {
            let needed = bytes.len() as u64;
            if needed > self.capacity {
                self.capacity = needed.next_power_of_two();
                self.buffer = Self::allocate(device, self.label, self.capacity);
            }
            if !bytes.is_empty() {
                queue.write_buffer(&self.buffer, 0, bytes);
            }
        }
    }

    const LINE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec4<f32>) -> VsOut {
    return VsOut(globals.view_proj * vec4<f32>(position, 1.0), color);
}

@fragment
fn fs_main(fs_in: VsOut) -> @location(0) vec4<f32> {
    return fs_in.color;
}
"#;

    const SPHERE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) center: vec3<f32>,
    @location(2) radius: f32,
    @location(3) color: vec4<f32>,
) -> VsOut {
    let world = center + position * radius;
    return VsOut(globals.view_proj * vec4<f32>(world, 1.0), color);
}

@fragment
fn fs_main(fs_in: VsOut) -> @location(0) vec4<f32> {
    return fs_in.color;
}
"#;

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Globals {
        view_proj: Mat4,
    }

    fn alpha_target(format: ::wgpu::TextureFormat) -> [Option<::wgpu::ColorTargetState>; 1] {
        [Some(::wgpu::ColorTargetState {
            format,
            blend: Some(::wgpu::BlendState::ALPHA_BLENDING),
            write_mask: ::wgpu::ColorWrites::ALL,
        })]
    }

    fn primitive(topology: ::wgpu::PrimitiveTopology) -> ::wgpu::PrimitiveState {
        ::wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: ::wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: ::wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }

    pub async fn init_wgpu_from_canvas(
        canvas: web_sys::HtmlCanvasElement,
    ) -> Result<WgpuContext, JsValue> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        // `wgpu::Surface` must not outlive its `wgpu::Instance`; the instance is
        // leaked for the lifetime of the page.
        let instance: &'static ::wgpu::Instance = Box::leak(Box::new(::wgpu::Instance::new(
            &::wgpu::InstanceDescriptor {
                backends: ::wgpu::Backends::BROWSER_WEBGPU | ::wgpu::Backends::GL,
                ..Default::default()
            },
        )));

        let surface = instance
            .create_surface(::wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| JsValue::from_str(&format!("surface error: {e}")))?;

        let adapter = instance
            .request_adapter(&::wgpu::RequestAdapterOptions {
                power_preference: ::wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter error: {e}")))?;

        let (device, queue) = adapter
            .request_device(&::wgpu::DeviceDescriptor {
                label: Some("radiant-wgpu-device"),
                required_features: ::wgpu::Features::empty(),
                required_limits: ::wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("device error: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| JsValue::from_str("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(::wgpu::CompositeAlphaMode::Auto);

        let config = ::wgpu::SurfaceConfiguration {
            usage: ::wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            desired_maximum_frame_latency: 2,
            present_mode: ::wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let line_shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("radiant-line-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(LINE_SHADER)),
        });
        let sphere_shader = device.create_shader_module(::wgpu::ShaderModuleDescriptor {
            label: Some("radiant-sphere-shader"),
            source: ::wgpu::ShaderSource::Wgsl(Cow::Borrowed(SPHERE_SHADER)),
        });

        let uniform_buffer = device.create_buffer(&::wgpu::BufferDescriptor {
            label: Some("radiant-globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: ::wgpu::BufferUsages::UNIFORM | ::wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&::wgpu::BindGroupLayoutDescriptor {
                label: Some("radiant-globals-bgl"),
                entries: &[::wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ::wgpu::ShaderStages::VERTEX,
                    ty: ::wgpu::BindingType::Buffer {
                        ty: ::wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&::wgpu::BindGroupDescriptor {
            label: Some("radiant-globals-bg"),
            layout: &uniform_bind_group_layout,
            entries: &[::wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&::wgpu::PipelineLayoutDescriptor {
            label: Some("radiant-pipeline-layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            immediate_size: 0,
        });

        let line_targets = alpha_target(config.format);
        let line_pipeline = device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some("radiant-line-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: ::wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[::wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as ::wgpu::BufferAddress,
                    step_mode: ::wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        ::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x4,
                            offset: 16,
                            shader_location: 1,
                        },
                    ],
                }],
            },
            fragment: Some(::wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &line_targets,
            }),
            primitive: primitive(::wgpu::PrimitiveTopology::LineList),
            depth_stencil: None,
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sphere_targets = alpha_target(config.format);
        let sphere_pipeline = device.create_render_pipeline(&::wgpu::RenderPipelineDescriptor {
            label: Some("radiant-sphere-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: ::wgpu::VertexState {
                module: &sphere_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    ::wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<MeshVertex>() as ::wgpu::BufferAddress,
                        step_mode: ::wgpu::VertexStepMode::Vertex,
                        attributes: &[::wgpu::VertexAttribute {
                            format: ::wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        }],
                    },
                    ::wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<SphereInstance>()
                            as ::wgpu::BufferAddress,
                        step_mode: ::wgpu::VertexStepMode::Instance,
                        attributes: &[
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32x3,
                                offset: 0,
                                shader_location: 1,
                            },
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32,
                                offset: 12,
                                shader_location: 2,
                            },
                            ::wgpu::VertexAttribute {
                                format: ::wgpu::VertexFormat::Float32x4,
                                offset: 16,
                                shader_location: 3,
                            },
                        ],
                    },
                ],
            },
            fragment: Some(::wgpu::FragmentState {
                module: &sphere_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &sphere_targets,
            }),
            primitive: primitive(::wgpu::PrimitiveTopology::TriangleList),
            depth_stencil: None,
            multisample: ::wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let (vertices, indices) = unit_sphere_mesh(16, 16);
        let mesh_vertex_buffer = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
            label: Some("radiant-sphere-vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: ::wgpu::BufferUsages::VERTEX,
        });
        let mesh_index_buffer = device.create_buffer_init(&::wgpu::util::BufferInitDescriptor {
            label: Some("radiant-sphere-indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: ::wgpu::BufferUsages::INDEX,
        });

        let line_buffer = DynamicBuffer::new(&device, "radiant-line-vertices", 1 << 16);
        let instance_buffer = DynamicBuffer::new(&device, "radiant-sphere-instances", 1 << 12);

        // Initialize uniforms so the first render doesn't read uninitialized memory.
        let globals = Globals {
            view_proj: gpu::matrix::MAT4_IDENTITY,
        };
        queue.write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&globals));

        Ok(WgpuContext {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            line_pipeline,
            sphere_pipeline,
            uniform_buffer,
            uniform_bind_group,
            mesh_vertex_buffer,
            mesh_index_buffer,
            mesh_index_count: indices.len() as u32,
            line_buffer,
            instance_buffer,
        })
    }

    pub fn render_frame(ctx: &mut WgpuContext, frame: &RenderFrame) -> Result<(), JsValue> {
        let lines = frame.line_vertices();
        let instances = frame.sphere_instances();
        ctx.line_buffer
            .write(&ctx.device, &ctx.queue, bytemuck::cast_slice(&lines));
        ctx.instance_buffer
            .write(&ctx.device, &ctx.queue, bytemuck::cast_slice(&instances));

        let globals = Globals {
            view_proj: frame.view_proj,
        };
        ctx.queue
            .write_buffer(&ctx.uniform_buffer, 0, bytemuck::bytes_of(&globals));

        let surface_texture = ctx
            .surface
            .get_current_texture()
            .map_err(|e| JsValue::from_str(&format!("surface acquire failed: {e}")))?;
        let view = surface_texture
            .texture
            .create_view(&::wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&::wgpu::CommandEncoderDescriptor {
                label: Some("radiant-encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&::wgpu::RenderPassDescriptor {
                label: Some("radiant-pass"),
                color_attachments: &[Some(::wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: ::wgpu::Operations {
                        load: ::wgpu::LoadOp::Clear(::wgpu::Color::TRANSPARENT),
                        store: ::wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rpass.set_bind_group(0, &ctx.uniform_bind_group, &[]);

            if !lines.is_empty() {
                rpass.set_pipeline(&ctx.line_pipeline);
                rpass.set_vertex_buffer(0, ctx.line_buffer.buffer.slice(..));
                rpass.draw(0..lines.len() as u32, 0..1);
            }

            if !instances.is_empty() {
                rpass.set_pipeline(&ctx.sphere_pipeline);
                rpass.set_vertex_buffer(0, ctx.mesh_vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, ctx.instance_buffer.buffer.slice(..));
                rpass.set_index_buffer(
                    ctx.mesh_index_buffer.slice(..),
                    ::wgpu::IndexFormat::Uint16,
                );
                rpass.draw_indexed(0..ctx.mesh_index_count, 0, 0..instances.len() as u32);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use gpu::RenderFrame;
    use wasm_bindgen::prelude::JsValue;

    #[derive(Debug, Default)]
    pub struct WgpuContext;

    pub async fn init_wgpu_from_canvas(
        _canvas: web_sys::HtmlCanvasElement,
    ) -> Result<WgpuContext, JsValue> {
        Err(JsValue::from_str(
            "wgpu initialization is only available on wasm32 targets",
        ))
    }

    pub fn render_frame(_ctx: &mut WgpuContext, _frame: &RenderFrame) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "wgpu rendering is only available on wasm32 targets",
        ))
    }
}

pub use imp::{WgpuContext, init_wgpu_from_canvas, render_frame};

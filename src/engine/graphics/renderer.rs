use std::borrow::Cow;
use std::sync::Arc;

use image::RgbaImage;
use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::graphics::draw::DrawList;
use crate::engine::graphics::scaling::RenderScaling;
use crate::engine::graphics::texture::{Texture, TextureId};
use crate::engine::graphics::vertex::Vertex;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// One pipeline per combination of the blending toggle and per-call depth testing.
struct Pipelines {
    blend_depth: wgpu::RenderPipeline,
    blend_flat: wgpu::RenderPipeline,
    opaque_depth: wgpu::RenderPipeline,
    opaque_flat: wgpu::RenderPipeline,
}

impl Pipelines {
    fn select(&self, blending: bool, depth_test: bool) -> &wgpu::RenderPipeline {
        match (blending, depth_test) {
            (true, true) => &self.blend_depth,
            (true, false) => &self.blend_flat,
            (false, true) => &self.opaque_depth,
            (false, false) => &self.opaque_flat,
        }
    }
}

pub struct Renderer {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    surface: wgpu::Surface<'static>,
    texture_layout: wgpu::BindGroupLayout,
    pipelines: Pipelines,
    depth_texture: wgpu::Texture,
    default_texture: Texture,
    textures: Vec<Texture>,
    scaling: RenderScaling,
    blending: bool,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, vsync: bool) -> EngineResult<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(EngineError::NoAdapter)?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("shader.wgsl"))),
        });

        let texture_layout = Texture::bind_group_layout(&device);
        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&texture_layout],
            push_constant_ranges: &[],
        });

        let build = |label: &str, blend: wgpu::BlendState, depth_test: bool| {
            create_pipeline(&device, &render_pipeline_layout, &shader, config.format, label, blend, depth_test)
        };
        let pipelines = Pipelines {
            blend_depth: build("Blend Depth Pipeline", wgpu::BlendState::ALPHA_BLENDING, true),
            blend_flat: build("Blend Flat Pipeline", wgpu::BlendState::ALPHA_BLENDING, false),
            opaque_depth: build("Opaque Depth Pipeline", wgpu::BlendState::REPLACE, true),
            opaque_flat: build("Opaque Flat Pipeline", wgpu::BlendState::REPLACE, false),
        };

        let depth_texture = create_depth_texture(&device, config.width, config.height);
        let default_texture = Texture::create_default(&device, &queue, &texture_layout);

        Ok(Self {
            scaling: RenderScaling::new(config.width, config.height, true),
            device,
            queue,
            config,
            surface,
            texture_layout,
            pipelines,
            depth_texture,
            default_texture,
            textures: Vec::new(),
            blending: true,
        })
    }

    pub fn register_texture(&mut self, image: &RgbaImage, label: &str, filter: wgpu::FilterMode) -> TextureId {
        let texture = Texture::from_image(&self.device, &self.queue, &self.texture_layout, image, label, filter);
        debug!("Registered texture {} ({}x{}) as #{}", label, texture.width, texture.height, self.textures.len());
        self.textures.push(texture);
        self.textures.len() - 1
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.reconfigure();
        }
    }

    /// Re-applies the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = create_depth_texture(&self.device, self.config.width, self.config.height);
        self.scaling = RenderScaling::new(self.config.width, self.config.height, true);
    }

    pub fn set_vsync(&mut self, vsync: bool) {
        self.config.present_mode = present_mode(vsync);
        self.surface.configure(&self.device, &self.config);
    }

    pub fn set_blending(&mut self, blending: bool) {
        self.blending = blending;
    }

    pub fn scaling(&self) -> RenderScaling {
        self.scaling
    }

    pub fn render(&self, draw: &DrawList) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = self.depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        let vertex_buffer = (!draw.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Vertex Buffer"),
                contents: bytemuck::cast_slice(draw.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let [r, g, b, a] = draw.clear_color();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(vertex_buffer) = &vertex_buffer {
                let (x, y, width, height) = self.scaling.viewport();
                render_pass.set_viewport(x, y, width, height, 0.0, 1.0);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));

                for call in draw.calls() {
                    let scissor = match &call.clip {
                        Some(clip) => match self.scaling.scissor(clip) {
                            Some(scissor) => scissor,
                            None => continue,
                        },
                        None => (0, 0, self.config.width, self.config.height),
                    };
                    let texture = call
                        .texture
                        .and_then(|id| self.textures.get(id))
                        .unwrap_or(&self.default_texture);

                    render_pass.set_pipeline(self.pipelines.select(self.blending, call.depth_test));
                    render_pass.set_bind_group(0, &texture.bind_group, &[]);
                    render_pass.set_scissor_rect(scissor.0, scissor.1, scissor.2, scissor.3);
                    render_pass.draw(call.first_vertex..call.first_vertex + call.vertex_count, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    label: &str,
    blend: wgpu::BlendState,
    depth_test: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_test,
            depth_compare: if depth_test {
                wgpu::CompareFunction::Less
            } else {
                wgpu::CompareFunction::Always
            },
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        label: Some("Depth Texture"),
        view_formats: &[],
    })
}

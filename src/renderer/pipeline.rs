//! WebGPU render pipeline setup
//!
//! Draws one triangle list per frame. Vertices stay in canvas pixels; the
//! shader maps them to clip space with the `Viewport` uniform, so the same
//! scene fills the canvas at any device pixel ratio.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::vertex::Vertex;
use crate::colors;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Vertices the buffer starts with; a busy frame is a few hundred
const INITIAL_VERTEX_CAPACITY: usize = 1024;

/// Logical canvas size as seen by the vertex shader (16-byte aligned)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewportUniform {
    pub size: [f32; 2],
    _pad: [f32; 2],
}

impl ViewportUniform {
    pub fn canvas() -> Self {
        Self {
            size: [CANVAS_WIDTH, CANVAS_HEIGHT],
            _pad: [0.0; 2],
        }
    }
}

/// Buffer capacity (in vertices) that fits `needed`, growing by doubling
pub fn grown_capacity(current: usize, needed: usize) -> usize {
    let mut capacity = current.max(INITIAL_VERTEX_CAPACITY);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

/// Device limits: the WebGL2 baseline, with texture size raised to what the adapter allows
pub fn device_limits(adapter_limits: &wgpu::Limits) -> wgpu::Limits {
    wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter_limits.clone())
}

/// Backing-store size of the logical canvas at `dpr`, with neither side above `max_dim`
pub fn surface_size(dpr: f64, max_dim: u32) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let largest = CANVAS_WIDTH.max(CANVAS_HEIGHT) as f64;
    let scale = dpr.min(max_dim as f64 / largest);
    let width = (CANVAS_WIDTH as f64 * scale).floor() as u32;
    let height = (CANVAS_HEIGHT as f64 * scale).floor() as u32;
    (width.max(1), height.max(1))
}

fn clear_color() -> wgpu::Color {
    let [r, g, b, a] = colors::SKY;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    viewport_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    /// Vertices the current buffer can hold
    vertex_capacity: usize,
    /// Backing surface size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("santa-posts-device"),
                required_features: wgpu::Features::empty(),
                required_limits: device_limits(&adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        // Palette colors are sRGB values already, a linear target keeps them as authored
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let viewport_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("viewport_uniform"),
            contents: bytemuck::bytes_of(&ViewportUniform::canvas()),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let viewport_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("viewport_layout"),
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
        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("viewport_bind_group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
        });

        let pipeline = create_pipeline(&device, config.format, &viewport_layout);
        let vertex_capacity = grown_capacity(0, 0);
        let vertex_buffer = create_vertex_buffer(&device, vertex_capacity);

        log::info!("Surface configured: {}x{} {:?}", width, height, surface_format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            viewport_bind_group,
            vertex_buffer,
            vertex_capacity,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload the frame's vertices (canvas pixels) and draw them
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = grown_capacity(self.vertex_capacity, vertices.len());
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        self.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.viewport_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..vertices.len() as u32, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("vertex_buffer"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Alpha-blended triangle list, no depth
fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    viewport_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_pipeline_layout"),
        bind_group_layouts: &[viewport_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_uniform_layout() {
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
        assert_eq!(ViewportUniform::canvas().size, [CANVAS_WIDTH, CANVAS_HEIGHT]);
    }

    #[test]
    fn test_surface_size_follows_dpr() {
        assert_eq!(surface_size(1.0, 2048), (800, 600));
        assert_eq!(surface_size(2.0, 2048), (1600, 1200));
        assert_eq!(surface_size(1.5, 8192), (1200, 900));
    }

    #[test]
    fn test_surface_size_clamped_to_texture_limit() {
        let max_dim = wgpu::Limits::downlevel_webgl2_defaults().max_texture_dimension_2d;
        for dpr in [2.625, 3.0, 4.0] {
            let (w, h) = surface_size(dpr, max_dim);
            assert!(w <= max_dim && h <= max_dim, "dpr {dpr}: {w}x{h}");
        }
        assert_eq!(surface_size(3.0, 2048), (2048, 1536));
    }

    #[test]
    fn test_surface_size_bad_dpr() {
        assert_eq!(surface_size(0.0, 2048), (800, 600));
        assert_eq!(surface_size(f64::NAN, 2048), (800, 600));
    }

    #[test]
    fn test_device_limits_raise_texture_size() {
        let webgl2 = wgpu::Limits::downlevel_webgl2_defaults();
        assert_eq!(device_limits(&webgl2).max_texture_dimension_2d, 2048);
        let desktop = wgpu::Limits::default();
        assert_eq!(
            device_limits(&desktop).max_texture_dimension_2d,
            desktop.max_texture_dimension_2d
        );
    }

    #[test]
    fn test_grown_capacity() {
        assert_eq!(grown_capacity(0, 0), INITIAL_VERTEX_CAPACITY);
        assert_eq!(grown_capacity(1024, 1000), 1024);
        assert_eq!(grown_capacity(1024, 1025), 2048);
        assert_eq!(grown_capacity(1024, 5000), 8192);
    }
}

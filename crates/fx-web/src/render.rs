mod helpers;

use fx_core::{BlendMode, Camera, CloudStyle, PointCloud, PointInstance};
use glam::Mat4;
use helpers::{blend_state, make_pipeline, uniform_bind_group, uniform_layout};
use web_sys as web;
use wgpu::util::DeviceExt;

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const LINE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LayerUniforms {
    proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    tint: [f32; 4],
    params: [f32; 4],
}

impl LayerUniforms {
    pub fn new(camera: &Camera, model: Mat4, tint: [f32; 3], opacity: f32, size: f32) -> Self {
        Self {
            proj: camera.projection_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            tint: [tint[0], tint[1], tint[2], opacity],
            params: [size, 0.0, 0.0, 0.0],
        }
    }

    pub fn for_cloud(camera: &Camera, model: Mat4, style: &CloudStyle) -> Self {
        Self::new(camera, model, [1.0; 3], style.opacity, style.base_size)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// GPU side of one point cloud: instance buffer plus its own uniforms.
pub struct PointLayer {
    blend: BlendMode,
    instances: wgpu::Buffer,
    count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    scratch: Vec<PointInstance>,
}

pub struct LineLayer {
    vertices: wgpu::Buffer,
    count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub enum Draw<'l> {
    Points(&'l PointLayer),
    Lines(&'l LineLayer),
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    layer_bgl: wgpu::BindGroupLayout,
    shader: wgpu::ShaderModule,
    layout: wgpu::PipelineLayout,
    /// Sprite pipelines, built on first use per blend mode.
    sprites: Vec<(BlendMode, wgpu::RenderPipeline)>,
    line_pipeline: wgpu::RenderPipeline,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The canvases sit over page content, so keep them transparent.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(fx_core::POINTS_WGSL.into()),
        });
        let layer_bgl = uniform_layout(&device);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&layer_bgl],
            push_constant_ranges: &[],
        });
        let line_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRS,
        };
        let line_pipeline = make_pipeline(
            &device,
            "arc_lines",
            &layout,
            &shader,
            "vs_line",
            "fs_line",
            std::slice::from_ref(&line_layout),
            wgpu::PrimitiveTopology::LineStrip,
            format,
            blend_state(fx_core::ARC_BLEND),
        );

        log::info!("[gpu] surface {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            layer_bgl,
            shader,
            layout,
            sprites: Vec::new(),
            line_pipeline,
            width,
            height,
        })
    }

    fn ensure_sprite_pipeline(&mut self, mode: BlendMode) {
        if self.sprites.iter().any(|(m, _)| *m == mode) {
            return;
        }
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        };
        let pipeline = make_pipeline(
            &self.device,
            &format!("sprite_{:?}", mode),
            &self.layout,
            &self.shader,
            "vs_sprite",
            "fs_sprite",
            std::slice::from_ref(&instance_layout),
            wgpu::PrimitiveTopology::TriangleStrip,
            self.config.format,
            blend_state(mode),
        );
        self.sprites.push((mode, pipeline));
    }

    pub fn point_layer(&mut self, label: &str, cloud: &PointCloud) -> PointLayer {
        self.ensure_sprite_pipeline(cloud.style.blend);
        let mut scratch = Vec::with_capacity(cloud.len());
        cloud.write_instances(&mut scratch);
        let instances = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&scratch),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        let (uniforms, bind_group) = uniform_bind_group(
            &self.device,
            &self.layer_bgl,
            label,
            std::mem::size_of::<LayerUniforms>() as u64,
        );
        PointLayer {
            blend: cloud.style.blend,
            instances,
            count: cloud.len() as u32,
            uniforms,
            bind_group,
            scratch,
        }
    }

    pub fn line_layer(&self, label: &str, vertices: &[LineVertex]) -> LineLayer {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let (uniforms, bind_group) = uniform_bind_group(
            &self.device,
            &self.layer_bgl,
            label,
            std::mem::size_of::<LayerUniforms>() as u64,
        );
        LineLayer {
            vertices: buffer,
            count: vertices.len() as u32,
            uniforms,
            bind_group,
        }
    }

    /// Re-uploads instances only when the simulation touched the cloud.
    pub fn upload_points(&self, layer: &mut PointLayer, cloud: &mut PointCloud) -> bool {
        if !cloud.take_dirty() {
            return false;
        }
        layer.scratch.clear();
        cloud.write_instances(&mut layer.scratch);
        let n = layer.scratch.len().min(layer.count as usize);
        self.queue.write_buffer(
            &layer.instances,
            0,
            bytemuck::cast_slice(&layer.scratch[..n]),
        );
        true
    }

    pub fn set_point_uniforms(&self, layer: &PointLayer, u: &LayerUniforms) {
        self.queue
            .write_buffer(&layer.uniforms, 0, bytemuck::bytes_of(u));
    }

    pub fn set_line_uniforms(&self, layer: &LineLayer, u: &LayerUniforms) {
        self.queue
            .write_buffer(&layer.uniforms, 0, bytemuck::bytes_of(u));
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, draws: &[Draw<'_>]) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            for draw in draws {
                match draw {
                    Draw::Points(layer) => {
                        let Some((_, pipeline)) =
                            self.sprites.iter().find(|(m, _)| *m == layer.blend)
                        else {
                            continue;
                        };
                        rpass.set_pipeline(pipeline);
                        rpass.set_bind_group(0, &layer.bind_group, &[]);
                        rpass.set_vertex_buffer(0, layer.instances.slice(..));
                        rpass.draw(0..4, 0..layer.count);
                    }
                    Draw::Lines(layer) => {
                        rpass.set_pipeline(&self.line_pipeline);
                        rpass.set_bind_group(0, &layer.bind_group, &[]);
                        rpass.set_vertex_buffer(0, layer.vertices.slice(..));
                        rpass.draw(0..layer.count, 0..1);
                    }
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

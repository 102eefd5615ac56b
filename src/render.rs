use crate::passes::{CaptureId, PassStep, RefractionController, RenderOutput, ScenePasses};
use crate::scene::SceneContext;
use crate::uniforms::{CameraUniforms, ObjectUniforms, RefractionUniforms};
use crate::viewport::Viewport;
use web_sys as web;

mod helpers;
mod objects;
mod pipelines;
mod targets;
use objects::GpuObject;
use pipelines::Materials;
use targets::RenderTargets;

// Color of the glass object block; the shader ignores it.
const GLASS_TINT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    materials: Materials,
    linear_sampler: wgpu::Sampler,

    camera_buffer: wgpu::Buffer,
    camera_bg: wgpu::BindGroup,
    refraction_buffer: wgpu::Buffer,
    refraction: RefractionUniforms,
    // Glass group 2, one per capture it can sample
    bg_glass_back: wgpu::BindGroup,
    bg_glass_front: wgpu::BindGroup,

    backdrop: GpuObject,
    glass: GpuObject,
    text: Option<GpuObject>,
    text_revision: u32,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        scene: &SceneContext,
        viewport: &Viewport,
    ) -> anyhow::Result<Self> {
        let (width, height) = viewport.physical_size();

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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        device.on_uncaptured_error(Box::new(|err: wgpu::Error| {
            log::error!("[gpu] uncaptured error: {}", err);
        }));

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
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
        log::info!(
            "[gpu] surface {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        // Captures share the surface format so one pipeline set serves every pass
        let targets = RenderTargets::new(&device, width, height, format);
        let materials = pipelines::create_materials(&device, format).await;
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let camera_buffer = helpers::uniform_buffer::<CameraUniforms>(&device, "camera_ub");
        let camera_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &materials.camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let refraction = RefractionUniforms::default().with_resolution(viewport.resolution());
        let refraction_buffer =
            helpers::uniform_buffer::<RefractionUniforms>(&device, "refraction_ub");
        queue.write_buffer(&refraction_buffer, 0, bytemuck::bytes_of(&refraction));
        let (bg_glass_back, bg_glass_front) = glass_bind_groups(
            &device,
            &materials.glass_bgl,
            &refraction_buffer,
            &targets,
            &linear_sampler,
        );

        let backdrop = GpuObject::new(
            &device,
            &materials.object_bgl,
            "backdrop",
            &scene.backdrop.mesh,
        );
        let glass = GpuObject::new(&device, &materials.object_bgl, "glass", &scene.glass_mesh);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            materials,
            linear_sampler,
            camera_buffer,
            camera_bg,
            refraction_buffer,
            refraction,
            bg_glass_back,
            bg_glass_front,
            backdrop,
            glass,
            text: None,
            text_revision: 0,
            width,
            height,
        })
    }

    /// Apply a new viewport: surface, captures and the resolution uniform.
    pub fn resize_if_needed(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.physical_size();
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        // Recreate offscreen render targets and dependent bind groups
        self.targets.recreate(&self.device, width, height);
        self.refraction = self.refraction.with_resolution(viewport.resolution());
        self.queue
            .write_buffer(&self.refraction_buffer, 0, bytemuck::bytes_of(&self.refraction));
        (self.bg_glass_back, self.bg_glass_front) = glass_bind_groups(
            &self.device,
            &self.materials.glass_bgl,
            &self.refraction_buffer,
            &self.targets,
            &self.linear_sampler,
        );
        let (w, h) = self.targets.back.size();
        log::debug!("[gpu] resized captures to {}x{}", w, h);
    }

    /// Reconfigure the surface after it was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        scene: &SceneContext,
        refraction: &mut RefractionController,
    ) -> Result<(), wgpu::SurfaceError> {
        self.sync_text(scene);
        self.write_uniforms(scene);

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
            let mut passes = FramePasses {
                gpu: self,
                encoder: &mut encoder,
                screen_view: &view,
            };
            refraction.run_frame(&mut passes);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Free the offscreen targets. The state must not render afterwards.
    pub fn release(&self) {
        self.targets.release();
        self.camera_buffer.destroy();
        self.refraction_buffer.destroy();
        log::info!("[gpu] render targets released");
    }

    fn sync_text(&mut self, scene: &SceneContext) {
        if scene.text_revision() == self.text_revision {
            return;
        }
        self.text_revision = scene.text_revision();
        self.text = scene.text.as_ref().map(|text| {
            log::info!(
                "[gpu] uploading text mesh ({} triangles)",
                text.mesh.triangle_count()
            );
            GpuObject::new(
                &self.device,
                &self.materials.object_bgl,
                "text",
                &text.mesh,
            )
        });
    }

    fn write_uniforms(&self, scene: &SceneContext) {
        let camera = CameraUniforms::new(scene.camera.view_projection(), scene.camera.eye);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera));
        self.backdrop.write(
            &self.queue,
            &ObjectUniforms::new(scene.backdrop.transform.matrix(), scene.backdrop.color),
        );
        if let (Some(gpu_text), Some(text)) = (&self.text, &scene.text) {
            gpu_text.write(
                &self.queue,
                &ObjectUniforms::new(text.transform.matrix(), text.color),
            );
        }
        self.glass.write(
            &self.queue,
            &ObjectUniforms::new(scene.glass.matrix(), GLASS_TINT),
        );
    }

    fn glass_bind_group(&self, id: CaptureId) -> &wgpu::BindGroup {
        match id {
            CaptureId::Back => &self.bg_glass_back,
            CaptureId::Front => &self.bg_glass_front,
        }
    }
}

fn glass_bind_groups(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    refraction_buffer: &wgpu::Buffer,
    targets: &RenderTargets,
    sampler: &wgpu::Sampler,
) -> (wgpu::BindGroup, wgpu::BindGroup) {
    let make = |label: &str, id: CaptureId| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: refraction_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&targets.get(id).view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    };
    (
        make("bg_glass_back", CaptureId::Back),
        make("bg_glass_front", CaptureId::Front),
    )
}

/// One frame's command encoder, driven by the refraction controller.
struct FramePasses<'f, 'a> {
    gpu: &'f GpuState<'a>,
    encoder: &'f mut wgpu::CommandEncoder,
    screen_view: &'f wgpu::TextureView,
}

impl ScenePasses for FramePasses<'_, '_> {
    fn render_pass(&mut self, step: &PassStep) {
        let gpu = self.gpu;
        let color = match step.output {
            RenderOutput::Capture(id) => &gpu.targets.get(id).view,
            RenderOutput::Screen => self.screen_view,
        };
        let mut rpass = targets::begin_scene_pass(
            self.encoder,
            step.label(),
            color,
            &gpu.targets.depth_view,
        );
        rpass.set_bind_group(0, &gpu.camera_bg, &[]);

        rpass.set_pipeline(&gpu.materials.basic);
        gpu.backdrop.draw(&mut rpass);
        if let Some(text) = &gpu.text {
            text.draw(&mut rpass);
        }

        if !step.facing.is_visible() {
            return;
        }
        let Some(pipeline) = gpu
            .materials
            .glass
            .as_ref()
            .and_then(|g| g.for_facing(step.facing))
        else {
            return;
        };
        let Some(input) = step.input else {
            log::warn!("[gpu] {} has no background capture; glass skipped", step.label());
            return;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(2, gpu.glass_bind_group(input), &[]);
        gpu.glass.draw(&mut rpass);
    }
}

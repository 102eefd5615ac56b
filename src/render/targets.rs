use super::helpers;
use crate::passes::CaptureId;

/// One offscreen color buffer the glass can sample.
///
/// Contents are transient: every frame clears and redraws it.
pub(crate) struct CaptureTarget {
    label: &'static str,
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl CaptureTarget {
    pub(crate) fn new(
        device: &wgpu::Device,
        label: &'static str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let (texture, view) = helpers::create_color_texture(
            device,
            label,
            width,
            height,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        Self {
            label,
            texture,
            view,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Reallocate at a new size. Previous contents are discarded.
    pub(crate) fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let format = self.texture.format();
        self.texture.destroy();
        *self = Self::new(device, self.label, width, height, format);
    }

    #[inline]
    pub(crate) fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub(crate) fn release(&self) {
        self.texture.destroy();
    }
}

/// Begin a pass drawing into `color` with the shared depth buffer. The
/// returned pass is the binding: draws go to `color` until it is dropped.
pub(crate) fn begin_scene_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    label: &str,
    color: &wgpu::TextureView,
    depth: &wgpu::TextureView,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Discard,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}

/// Back and front captures plus the depth buffer shared by every pass.
///
/// All three always have the surface's physical size.
pub(crate) struct RenderTargets {
    pub(crate) back: CaptureTarget,
    pub(crate) front: CaptureTarget,
    depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        Self {
            back: CaptureTarget::new(device, "capture_back", width, height, format),
            front: CaptureTarget::new(device, "capture_front", width, height, format),
            depth_tex,
            depth_view,
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: CaptureId) -> &CaptureTarget {
        match id {
            CaptureId::Back => &self.back,
            CaptureId::Front => &self.front,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.back.resize(device, width, height);
        self.front.resize(device, width, height);
        self.depth_tex.destroy();
        (self.depth_tex, self.depth_view) = helpers::create_depth_texture(device, width, height);
    }

    pub(crate) fn release(&self) {
        self.back.release();
        self.front.release();
        self.depth_tex.destroy();
    }
}

use super::helpers;
use crate::passes::MeshFacing;

const BASIC_WGSL: &str = include_str!("../../shaders/basic.wgsl");
const GLASS_WGSL: &str = include_str!("../../shaders/glass.wgsl");

/// Bind group layouts and pipelines for the two materials.
pub(crate) struct Materials {
    pub(crate) camera_bgl: wgpu::BindGroupLayout,
    pub(crate) object_bgl: wgpu::BindGroupLayout,
    pub(crate) glass_bgl: wgpu::BindGroupLayout,
    pub(crate) basic: wgpu::RenderPipeline,
    /// `None` when the glass shader failed to compile or validate.
    pub(crate) glass: Option<GlassPipelines>,
}

/// The glass drawn with back faces only (capture) or front faces only.
pub(crate) struct GlassPipelines {
    back: wgpu::RenderPipeline,
    front: wgpu::RenderPipeline,
}

impl GlassPipelines {
    pub(crate) fn for_facing(&self, facing: MeshFacing) -> Option<&wgpu::RenderPipeline> {
        match facing {
            MeshFacing::Hidden => None,
            MeshFacing::Back => Some(&self.back),
            MeshFacing::Front => Some(&self.front),
        }
    }
}

pub(crate) async fn create_materials(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> Materials {
    let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("camera_bgl"),
        entries: &[helpers::uniform_layout_entry(0)],
    });
    let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("object_bgl"),
        entries: &[helpers::uniform_layout_entry(0)],
    });
    let glass_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glass_bgl"),
        entries: &[
            helpers::uniform_layout_entry(0),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    let basic_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("basic_shader"),
        source: wgpu::ShaderSource::Wgsl(BASIC_WGSL.into()),
    });
    let basic_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("basic_pl"),
        bind_group_layouts: &[&camera_bgl, &object_bgl],
        push_constant_ranges: &[],
    });
    // Backdrop is double sided; text is closed, so no culling either way.
    let basic = helpers::make_mesh_pipeline(
        device,
        "basic_pipeline",
        &basic_layout,
        &basic_shader,
        color_format,
        None,
    );

    let glass = create_glass_pipelines(device, &camera_bgl, &object_bgl, &glass_bgl, color_format).await;

    Materials {
        camera_bgl,
        object_bgl,
        glass_bgl,
        basic,
        glass,
    }
}

async fn create_glass_pipelines(
    device: &wgpu::Device,
    camera_bgl: &wgpu::BindGroupLayout,
    object_bgl: &wgpu::BindGroupLayout,
    glass_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> Option<GlassPipelines> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("glass_shader"),
        source: wgpu::ShaderSource::Wgsl(GLASS_WGSL.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("glass_pl"),
        bind_group_layouts: &[camera_bgl, object_bgl, glass_bgl],
        push_constant_ranges: &[],
    });
    // Culling front faces leaves the back faces, and vice versa.
    let back = helpers::make_mesh_pipeline(
        device,
        "glass_back_pipeline",
        &layout,
        &shader,
        color_format,
        Some(wgpu::Face::Front),
    );
    let front = helpers::make_mesh_pipeline(
        device,
        "glass_front_pipeline",
        &layout,
        &shader,
        color_format,
        Some(wgpu::Face::Back),
    );
    match device.pop_error_scope().await {
        Some(err) => {
            log::error!("[glass] shader compilation failed, glass disabled: {}", err);
            None
        }
        None => {
            log::info!("[glass] shader compiled");
            Some(GlassPipelines { back, front })
        }
    }
}

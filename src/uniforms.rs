use crate::constants::*;
use glam::{Mat4, Vec3};

/// Refraction parameters of the glass shader.
///
/// Layout mirrors `struct Refraction` in `shaders/glass.wgsl` (80 bytes):
/// three vec4-sized rows of scalars, the light vector padded to 16 bytes,
/// then the resolution padded to 16 bytes. The background texture is not part
/// of this block; see [`crate::passes::TextureSlot`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RefractionUniforms {
    pub ior_r: f32,
    pub ior_y: f32,
    pub ior_g: f32,
    pub ior_c: f32,
    pub ior_b: f32,
    pub ior_p: f32,
    pub saturation: f32,
    pub chromatic_aberration: f32,
    pub refract_power: f32,
    pub fresnel_power: f32,
    pub shininess: f32,
    pub diffuseness: f32,
    pub light: [f32; 3],
    pub _pad0: f32,
    pub resolution: [f32; 2],
    pub _pad1: [f32; 2],
}

impl Default for RefractionUniforms {
    fn default() -> Self {
        Self {
            ior_r: IOR_RED,
            ior_y: IOR_YELLOW,
            ior_g: IOR_GREEN,
            ior_c: IOR_CYAN,
            ior_b: IOR_BLUE,
            ior_p: IOR_VIOLET,
            saturation: SATURATION,
            chromatic_aberration: CHROMATIC_ABERRATION,
            refract_power: REFRACT_POWER,
            fresnel_power: FRESNEL_POWER,
            shininess: SHININESS,
            diffuseness: DIFFUSENESS,
            light: LIGHT_VECTOR,
            _pad0: 0.0,
            resolution: [1.0, 1.0],
            _pad1: [0.0, 0.0],
        }
    }
}

impl RefractionUniforms {
    pub fn with_resolution(mut self, resolution: [f32; 2]) -> Self {
        self.resolution = resolution;
        self
    }

    /// Indices of refraction in band order R, Y, G, C, B, P.
    #[inline]
    pub fn iors(&self) -> [f32; 6] {
        [
            self.ior_r, self.ior_y, self.ior_g, self.ior_c, self.ior_b, self.ior_p,
        ]
    }

    #[inline]
    pub fn light_vector(&self) -> Vec3 {
        Vec3::from_array(self.light)
    }
}

/// Shared per-frame camera block (group 0).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniforms {
    pub fn new(view_proj: Mat4, eye: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
        }
    }
}

/// Per-object block (group 1): model matrix and flat color.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }
}

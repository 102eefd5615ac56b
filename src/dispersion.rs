// CPU evaluation of the glass fragment shader.
//
// Mirrors `fs_main` in `shaders/glass.wgsl` step for step so the numeric
// pipeline can be checked on the host. Keep both in sync.

use crate::constants::DISPERSION_SAMPLES;
use crate::uniforms::RefractionUniforms;
use glam::{Vec2, Vec3, Vec4};

const LUMA: Vec3 = Vec3::new(0.2125, 0.7154, 0.0721);

// Sample spread multipliers per band, order R, Y, G, C, B, P.
const BAND_SPREAD: [f32; 6] = [1.0, 1.0, 2.0, 2.5, 3.0, 1.0];

/// GLSL/WGSL `refract`.
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Vec3 {
    let n_dot_i = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - n_dot_i * n_dot_i);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * incident - (eta * n_dot_i + k.sqrt()) * normal
    }
}

pub fn saturate(rgb: Vec3, adjustment: f32) -> Vec3 {
    let intensity = Vec3::splat(rgb.dot(LUMA));
    intensity.lerp(rgb, adjustment)
}

pub fn fresnel(eye: Vec3, normal: Vec3, power: f32) -> f32 {
    let facing = eye.dot(normal).abs();
    (1.0 - facing).max(0.0).powf(power)
}

pub fn specular(normal: Vec3, eye: Vec3, light: Vec3, shininess: f32, diffuseness: f32) -> f32 {
    let light_dir = (-light).normalize_or_zero();
    let half = (eye + light_dir).normalize_or_zero();
    let n_dot_l = normal.dot(light_dir);
    let n_dot_h = normal.dot(half);
    let k_diffuse = n_dot_l.max(0.0);
    let k_specular = (n_dot_h * n_dot_h).max(0.0).powf(shininess);
    k_specular + k_diffuse * diffuseness
}

/// Shade one fragment. `sample` reads the background capture at a uv with a
/// top-left origin; `frag_coord` is in physical pixels.
pub fn shade<F>(
    sample: F,
    frag_coord: Vec2,
    normal: Vec3,
    eye: Vec3,
    u: &RefractionUniforms,
) -> Vec4
where
    F: Fn(Vec2) -> Vec3,
{
    let resolution = Vec2::from_array(u.resolution).max(Vec2::ONE);
    let uv = frag_coord / resolution;
    let dirs = u.iors().map(|ior| refract(eye, normal, 1.0 / ior));
    let at = |band: usize, spread: f32| -> Vec3 {
        let d = dirs[band];
        sample(uv + Vec2::new(d.x, -d.y) * spread * u.chromatic_aberration)
    };

    let samples = DISPERSION_SAMPLES as f32;
    let mut color = Vec3::ZERO;
    for i in 0..DISPERSION_SAMPLES {
        let slide = i as f32 / samples * 0.1;
        let spread = |band: usize| u.refract_power + slide * BAND_SPREAD[band];

        let r = at(0, spread(0)).x * 0.5;
        let ys = at(1, spread(1));
        let y = (ys.x * 2.0 + ys.y * 2.0 - ys.z) / 6.0;
        let g = at(2, spread(2)).y * 0.5;
        let cs = at(3, spread(3));
        let c = (cs.y * 2.0 + cs.z * 2.0 - cs.x) / 6.0;
        let b = at(4, spread(4)).z * 0.5;
        let ps = at(5, spread(5));
        let p = (ps.z * 2.0 + ps.x * 2.0 - ps.y) / 6.0;

        let mixed = Vec3::new(
            r + (2.0 * p + 2.0 * y - c) / 3.0,
            g + (2.0 * y + 2.0 * c - p) / 3.0,
            b + (2.0 * c + 2.0 * p - y) / 3.0,
        );
        color = saturate(color + mixed, u.saturation);
    }
    color /= samples;

    color += Vec3::splat(specular(
        normal,
        eye,
        u.light_vector(),
        u.shininess,
        u.diffuseness,
    ));
    color += Vec3::splat(fresnel(eye, normal, u.fresnel_power));

    color.extend(1.0)
}

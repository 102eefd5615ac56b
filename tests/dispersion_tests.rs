// Host-side tests for the CPU mirror of the glass shader and uniform layouts.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod uniforms {
    include!("../src/uniforms.rs");
}
mod dispersion {
    include!("../src/dispersion.rs");
}

use dispersion::*;
use glam::{Mat4, Vec2, Vec3};
use uniforms::*;

#[test]
fn uniform_blocks_match_wgsl_sizes() {
    assert_eq!(std::mem::size_of::<RefractionUniforms>(), 80);
    assert_eq!(std::mem::size_of::<CameraUniforms>(), 80);
    assert_eq!(std::mem::size_of::<ObjectUniforms>(), 80);
}

#[test]
fn default_refraction_parameters() {
    let u = RefractionUniforms::default().with_resolution([1920.0, 1080.0]);
    assert_eq!(u.iors(), [1.15, 1.16, 1.18, 1.22, 1.22, 1.22]);
    assert_eq!(u.saturation, 1.01);
    assert_eq!(u.chromatic_aberration, 0.14);
    assert_eq!(u.refract_power, 0.35);
    assert_eq!(u.fresnel_power, 9.0);
    assert_eq!(u.shininess, 25.0);
    assert_eq!(u.diffuseness, 0.2);
    assert_eq!(u.light_vector(), Vec3::new(-1.0, 1.0, 1.0));
    assert_eq!(u.resolution, [1920.0, 1080.0]);
}

#[test]
fn camera_block_carries_eye_as_point() {
    let c = CameraUniforms::new(Mat4::IDENTITY, Vec3::new(0.0, 0.0, 33.6));
    assert_eq!(c.eye, [0.0, 0.0, 33.6, 1.0]);
    assert_eq!(c.view_proj, Mat4::IDENTITY.to_cols_array_2d());
}

#[test]
fn refract_passes_straight_through_at_normal_incidence() {
    let d = refract(Vec3::NEG_Z, Vec3::Z, 1.0 / 1.15);
    assert!((d - Vec3::NEG_Z).length() < 1e-6);
}

#[test]
fn refract_returns_zero_on_total_internal_reflection() {
    let grazing = Vec3::new(1.0, 0.0, -0.05).normalize();
    assert_eq!(refract(grazing, Vec3::Z, 1.5), Vec3::ZERO);
}

#[test]
fn fresnel_vanishes_head_on_and_peaks_at_grazing() {
    assert!(fresnel(Vec3::Z, Vec3::Z, 9.0).abs() < 1e-6);
    assert!((fresnel(Vec3::X, Vec3::Z, 9.0) - 1.0).abs() < 1e-6);
}

#[test]
fn saturation_of_one_is_identity() {
    let rgb = Vec3::new(0.2, 0.5, 0.9);
    assert!((saturate(rgb, 1.0) - rgb).length() < 1e-6);
    let grey = saturate(rgb, 0.0);
    assert!((grey.x - grey.y).abs() < 1e-6 && (grey.y - grey.z).abs() < 1e-6);
}

#[test]
fn output_alpha_is_always_one() {
    let u = RefractionUniforms::default().with_resolution([800.0, 600.0]);
    let samplers: [&dyn Fn(Vec2) -> Vec3; 3] = [
        &|_| Vec3::ZERO,
        &|_| Vec3::ONE,
        &|uv| Vec3::new(uv.x.fract().abs(), uv.y.fract().abs(), 0.5),
    ];
    let normals = [Vec3::Z, Vec3::new(0.3, -0.4, 0.866).normalize(), Vec3::X];
    let eyes = [Vec3::NEG_Z, Vec3::new(0.1, 0.2, -0.97).normalize()];
    for sample in samplers {
        for n in normals {
            for e in eyes {
                for frag in [Vec2::ZERO, Vec2::new(400.0, 300.0), Vec2::new(799.0, 599.0)] {
                    let c = shade(sample, frag, n, e, &u);
                    assert_eq!(c.w, 1.0);
                    assert!(c.truncate().is_finite());
                }
            }
        }
    }
}

#[test]
fn refraction_offset_flips_vertical_axis() {
    // Background bright only in the top half (uv.y < 0.5).
    let sample = |uv: Vec2| if uv.y < 0.5 { Vec3::ONE } else { Vec3::ZERO };
    let u = RefractionUniforms::default().with_resolution([100.0, 100.0]);
    let eye = Vec3::new(0.0, 0.6, -0.8);
    let bright = shade(sample, Vec2::new(50.0, 50.5), Vec3::Z, eye, &u);
    let dark = shade(sample, Vec2::new(50.0, 50.5), Vec3::Z, Vec3::new(0.0, -0.6, -0.8), &u);
    // An upward view ray bends toward the top of the capture.
    assert!(bright.x > dark.x);
}

// Host-side tests for the perspective camera and damped orbit controls.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}

use camera::*;
use glam::{Vec2, Vec3};

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::new(1000.0 / 800.0)
}

#[test]
fn camera_starts_on_the_z_axis() {
    let cam = camera();
    assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 33.6));
    assert_eq!(cam.target, Vec3::ZERO);
    // The origin projects to the center of clip space.
    let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
    assert!((clip.x / clip.w).abs() < 1e-6);
    assert!((clip.y / clip.w).abs() < 1e-6);
}

#[test]
fn invalid_aspect_is_ignored() {
    let mut cam = camera();
    cam.set_aspect(0.0);
    cam.set_aspect(f32::NAN);
    assert!((cam.aspect - 1.25).abs() < 1e-6);
    cam.set_aspect(2.0);
    assert_eq!(cam.aspect, 2.0);
}

#[test]
fn idle_controls_leave_camera_in_place() {
    let mut cam = camera();
    let mut controls = OrbitControls::default();
    assert!(!controls.update(&mut cam));
    assert!((cam.eye - Vec3::new(0.0, 0.0, 33.6)).length() < 1e-4);
}

#[test]
fn rotation_glides_with_damping() {
    let mut cam = camera();
    let mut controls = OrbitControls::default();
    controls.begin_drag(DragMode::Rotate, Vec2::new(500.0, 400.0));
    controls.drag_to(Vec2::new(600.0, 400.0), 800.0);
    controls.end_drag();

    let e0 = cam.eye;
    assert!(controls.update(&mut cam));
    let e1 = cam.eye;
    assert!(controls.update(&mut cam));
    let e2 = cam.eye;

    let first = (e1 - e0).length();
    let second = (e2 - e1).length();
    assert!(first > 0.0);
    assert!(second < first, "motion should decay: {first} then {second}");
    assert!((second / first - 0.95).abs() < 0.01);
    // Orbiting keeps the distance to the target.
    assert!((e2.length() - 33.6).abs() < 1e-3);
}

#[test]
fn wheel_up_dollies_in_by_zoom_step() {
    let mut cam = camera();
    let mut controls = OrbitControls::default();
    controls.wheel(-120.0);
    controls.update(&mut cam);
    assert!((cam.eye.length() - 33.6 * 0.95).abs() < 1e-3);

    controls.wheel(120.0);
    controls.update(&mut cam);
    assert!((cam.eye.length() - 33.6).abs() < 1e-3);
}

#[test]
fn polar_angle_is_clamped() {
    let mut cam = camera();
    let mut controls = OrbitControls::default();
    controls.damping = 0.0;
    controls.begin_drag(DragMode::Rotate, Vec2::ZERO);
    controls.drag_to(Vec2::new(0.0, 10_000.0), 100.0);
    controls.update(&mut cam);
    assert!(cam.eye.is_finite());
    assert!(cam.eye.y > 0.0 && cam.eye.y < 33.6 + 1e-3);
}

#[test]
fn pan_moves_target_with_camera() {
    let mut cam = camera();
    let mut controls = OrbitControls::default();
    controls.damping = 0.0;
    controls.begin_drag(DragMode::Pan, Vec2::ZERO);
    controls.drag_to(Vec2::new(100.0, 0.0), 800.0);
    controls.update(&mut cam);

    assert!(controls.target().x < 0.0, "dragging right moves the scene right");
    assert!((cam.eye.x - controls.target().x).abs() < 1e-4);
    assert_eq!(cam.target, controls.target());
}

#[test]
fn drag_without_begin_is_ignored() {
    let mut cam = camera();
    let mut controls = OrbitControls::default();
    controls.drag_to(Vec2::new(100.0, 100.0), 800.0);
    assert!(!controls.is_dragging());
    assert!(!controls.update(&mut cam));
}

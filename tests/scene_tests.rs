// Host-side tests for scene setup, text placement and configuration.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}
mod config {
    include!("../src/config.rs");
}
mod font {
    include!("../src/font.rs");
}
mod geometry {
    include!("../src/geometry.rs");
}
mod interaction {
    include!("../src/interaction.rs");
}
mod scene {
    include!("../src/scene.rs");
}
mod text {
    include!("../src/text.rs");
}
mod viewport {
    include!("../src/viewport.rs");
}

use config::SceneConfig;
use geometry::{box_mesh, MeshData};
use glam::{Vec2, Vec3};
use interaction::InteractionState;
use scene::*;
use viewport::Viewport;

fn scene() -> SceneContext {
    SceneContext::new(&Viewport::new(1000.0, 800.0, 1.0))
}

#[test]
fn scene_starts_with_backdrop_and_glass_only() {
    let s = scene();
    assert!(s.text.is_none());
    assert_eq!(s.text_revision(), 0);
    assert_eq!(s.backdrop.transform.translation, Vec3::new(-5.1, 0.0, -5.0));
    let bb = s.backdrop.mesh.bounding_box().expect("backdrop bounds");
    assert_eq!(bb.size(), Vec3::new(20.0, 15.0, 0.0));
    assert_eq!(s.glass.scale, Vec3::splat(3.0));
    assert_eq!(s.glass_mesh.triangle_count(), 12);
    assert!((s.camera.aspect - 1.25).abs() < 1e-6);
}

#[test]
fn box_faces_wind_outward() {
    let mesh = box_mesh(2.0, 2.0, 2.0);
    assert_eq!(mesh.vertices.len(), 24);
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
        let n = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(n.dot(centroid) > 0.0);
    }
}

#[test]
fn empty_text_mesh_leaves_scene_without_text() {
    let mut s = scene();
    assert!(!s.set_text_mesh(MeshData::default()));
    assert!(s.text.is_none());
    assert_eq!(s.text_revision(), 0);

    // Frames keep advancing regardless.
    let mut interaction = InteractionState::default();
    s.advance(0.0, &mut interaction);
    s.advance(1.0 / 60.0, &mut interaction);
    assert!(s.glass.rotation.y > 0.0);
}

#[test]
fn text_is_centered_in_xy_and_pushed_behind_glass() {
    let mut s = scene();
    let mesh = box_mesh(10.0, 4.0, 5.1);
    assert!(s.set_text_mesh(mesh));
    let text = s.text.as_ref().expect("text installed");
    assert_eq!(text.transform.translation, Vec3::new(-5.0, -2.0, -2.5));
    assert_eq!(text.color, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(s.text_revision(), 1);
}

#[test]
fn glass_follows_spin_with_time_zero_increments() {
    let mut s = scene();
    let mut interaction = InteractionState::default();
    s.advance(0.0, &mut interaction);
    let r = s.glass.rotation;
    assert!((r.x - 0.004).abs() < 1e-6);
    assert!((r.y - 0.01).abs() < 1e-6);
    assert!((r.z - 0.003).abs() < 1e-6);
    assert_eq!(s.spin.rotation, r);
}

#[test]
fn pointer_influence_reaches_the_glass() {
    let mut calm = scene();
    let mut pushed = scene();
    let mut idle = InteractionState::default();
    let mut moved = InteractionState::default();
    moved.pointer_moved(Vec2::new(100.0, 100.0), Vec2::new(1000.0, 800.0));
    moved.pointer_moved(Vec2::new(300.0, 100.0), Vec2::new(1000.0, 800.0));

    calm.advance(0.0, &mut idle);
    pushed.advance(0.0, &mut moved);
    assert!(pushed.glass.rotation.y > calm.glass.rotation.y);
    assert!((pushed.glass.rotation.x - calm.glass.rotation.x).abs() < 1e-6);
}

#[test]
fn resize_updates_camera_aspect() {
    let mut s = scene();
    s.resize(&Viewport::new(1600.0, 900.0, 2.0));
    assert!((s.camera.aspect - 16.0 / 9.0).abs() < 1e-5);
}

#[test]
fn transform_matrix_applies_scale_rotation_translation() {
    let t = Transform {
        translation: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        scale: Vec3::splat(2.0),
    };
    let p = t.matrix().transform_point3(Vec3::X);
    assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5);
}

#[test]
fn config_defaults_describe_the_scene() {
    let c = SceneConfig::default();
    assert_eq!(c.canvas_id, "three-canvas");
    assert_eq!(c.text, "cerebral");
    assert!(c.font_url.ends_with("helvetiker_regular.typeface.json"));
    assert_eq!(c.text_params.size, 5.0);
    assert_eq!(c.text_params.depth, 5.1);
    assert_eq!(c.text_params.curve_segments, 12);
    assert!(!c.text_params.bevel_enabled);
}

#[test]
fn config_overrides_ignore_blank_values() {
    let c = SceneConfig::default().with_overrides(Some("glass".into()), Some("  ".into()));
    assert_eq!(c.text, "glass");
    assert!(c.font_url.ends_with("helvetiker_regular.typeface.json"));

    let c = SceneConfig::default().with_overrides(Some("   ".into()), Some(" /fonts/a.json ".into()));
    assert_eq!(c.text, "cerebral");
    assert_eq!(c.font_url, "/fonts/a.json");
}

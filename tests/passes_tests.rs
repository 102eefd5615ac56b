// Host-side tests for refraction pass ordering.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod passes {
    include!("../src/passes.rs");
}

use passes::*;

#[derive(Default)]
struct Recorder {
    steps: Vec<PassStep>,
}

impl ScenePasses for Recorder {
    fn render_pass(&mut self, step: &PassStep) {
        self.steps.push(*step);
    }
}

#[test]
fn frame_runs_three_passes_in_order() {
    let mut controller = RefractionController::default();
    let mut rec = Recorder::default();
    controller.run_frame(&mut rec);

    let facings: Vec<MeshFacing> = rec.steps.iter().map(|s| s.facing).collect();
    assert_eq!(
        facings,
        vec![MeshFacing::Hidden, MeshFacing::Back, MeshFacing::Front]
    );
    let outputs: Vec<RenderOutput> = rec.steps.iter().map(|s| s.output).collect();
    assert_eq!(
        outputs,
        vec![
            RenderOutput::Capture(CaptureId::Back),
            RenderOutput::Capture(CaptureId::Front),
            RenderOutput::Screen,
        ]
    );
}

#[test]
fn visible_passes_sample_the_previous_capture() {
    let mut controller = RefractionController::default();
    let mut rec = Recorder::default();
    controller.run_frame(&mut rec);

    let inputs: Vec<Option<CaptureId>> = rec.steps.iter().map(|s| s.input).collect();
    assert_eq!(
        inputs,
        vec![None, Some(CaptureId::Back), Some(CaptureId::Front)]
    );
    for step in &rec.steps {
        if let RenderOutput::Capture(target) = step.output {
            assert_ne!(step.input, Some(target), "{} samples its own target", step.label());
        }
    }
}

#[test]
fn controller_ends_frame_front_facing_with_front_published() {
    let mut controller = RefractionController::default();
    assert_eq!(controller.slot().read(), None);
    let mut rec = Recorder::default();
    controller.run_frame(&mut rec);
    controller.run_frame(&mut rec);

    assert_eq!(controller.facing(), MeshFacing::Front);
    assert_eq!(controller.slot().read(), Some(CaptureId::Front));
    assert_eq!(rec.steps.len(), 6);
    // Second frame starts hidden again even though the slot is still filled.
    assert_eq!(rec.steps[3].facing, MeshFacing::Hidden);
    assert_eq!(rec.steps[3].input, None);
}

#[test]
fn slot_returns_latest_publish() {
    let mut slot = TextureSlot::default();
    slot.publish(CaptureId::Back);
    slot.publish(CaptureId::Front);
    assert_eq!(slot.read(), Some(CaptureId::Front));
}

#[test]
fn pass_labels_name_their_targets() {
    let labels: Vec<&str> = [
        RenderOutput::Capture(CaptureId::Back),
        RenderOutput::Capture(CaptureId::Front),
        RenderOutput::Screen,
    ]
    .into_iter()
    .map(|output| {
        PassStep {
            output,
            facing: MeshFacing::Hidden,
            input: None,
        }
        .label()
    })
    .collect();
    assert_eq!(
        labels,
        vec!["capture_back_pass", "capture_front_pass", "composite_pass"]
    );
    assert!(!MeshFacing::Hidden.is_visible());
    assert!(MeshFacing::Back.is_visible());
}

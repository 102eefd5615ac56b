use crate::constants::*;
use glam::{Vec2, Vec3};

/// Smoothed pointer-velocity influence.
///
/// Pointer events add normalized deltas; the frame loop decays the sum once
/// per animation callback. The decay is tied to callback frequency, so the
/// settle time scales with the display refresh rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionState {
    influence: Vec2,
    last_pointer: Option<Vec2>,
}

impl InteractionState {
    #[inline]
    pub fn influence(&self) -> Vec2 {
        self.influence
    }

    #[inline]
    pub fn last_pointer(&self) -> Option<Vec2> {
        self.last_pointer
    }

    /// Feed a pointer position in CSS pixels. `viewport` is the CSS size used
    /// to normalize the delta. The first event only records the position.
    pub fn pointer_moved(&mut self, pos: Vec2, viewport: Vec2) {
        let Some(last) = self.last_pointer.replace(pos) else {
            return;
        };
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        let delta = pos - last;
        self.influence += delta / viewport * POINTER_INFLUENCE_GAIN;
    }

    #[inline]
    pub fn decay(&mut self) {
        self.influence *= INFLUENCE_DECAY;
    }
}

/// Oscillating angular rates (unscaled) at `t` seconds since start.
#[inline]
pub fn axis_rates(t: f32) -> Vec3 {
    Vec3::new(
        X_RATE_BASE + (t * X_RATE_FREQ).sin() * X_RATE_SWING,
        Y_RATE_BASE + (t * Y_RATE_FREQ).cos() * Y_RATE_SWING,
        Z_RATE_BASE + (t * Z_RATE_FREQ).sin() * Z_RATE_SWING,
    )
}

/// Per-frame rotation increment. Pointer x drives yaw, pointer y drives pitch.
#[inline]
pub fn rotation_step(t: f32, influence: Vec2) -> Vec3 {
    let rates = axis_rates(t) * ROTATION_RATE_SCALE;
    Vec3::new(
        rates.x + influence.y * INFLUENCE_ROTATION_GAIN,
        rates.y + influence.x * INFLUENCE_ROTATION_GAIN,
        rates.z,
    )
}

/// Accumulated Euler (XYZ) rotation of the glass wrapper.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spin {
    pub rotation: Vec3,
}

impl Spin {
    /// One animation callback: decay the influence, then integrate.
    pub fn advance(&mut self, t: f32, interaction: &mut InteractionState) -> Vec3 {
        interaction.decay();
        let step = rotation_step(t, interaction.influence());
        self.rotation += step;
        step
    }
}

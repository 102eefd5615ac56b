use crate::constants::*;
use glam::{Mat4, Vec2, Vec3};

const POLAR_EPS: f32 = 1e-6;

/// Perspective camera looking at `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            fov_y_deg: CAMERA_FOV_DEG,
            aspect: aspect.max(1e-6),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            eye: CAMERA_EYE,
            target: Vec3::ZERO,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Damped orbit controller around a target point.
///
/// Input handlers only accumulate deltas; [`OrbitControls::update`] applies
/// them to the camera once per frame. With damping enabled each update
/// applies `damping` of the pending motion and keeps the rest for later
/// frames, which gives the glide after release.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub damping: f32,
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    target: Vec3,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
    pending_pan_px: Vec2,
    drag: Option<(DragMode, Vec2)>,
    viewport_height: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            damping: ORBIT_DAMPING,
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            target: Vec3::ZERO,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            pending_pan_px: Vec2::ZERO,
            drag: None,
            viewport_height: 1.0,
        }
    }
}

impl OrbitControls {
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, mode: DragMode, pos: Vec2) {
        let allowed = match mode {
            DragMode::Rotate => self.enable_rotate,
            DragMode::Pan => self.enable_pan,
        };
        if allowed {
            self.drag = Some((mode, pos));
        }
    }

    /// Pointer moved while a drag is active. `viewport_height` is in the same
    /// pixel space as `pos`.
    pub fn drag_to(&mut self, pos: Vec2, viewport_height: f32) {
        let Some((mode, last)) = self.drag else {
            return;
        };
        let h = viewport_height.max(1.0);
        self.viewport_height = h;
        let delta = pos - last;
        match mode {
            DragMode::Rotate => {
                self.delta_theta -= std::f32::consts::TAU * delta.x / h * ORBIT_ROTATE_SPEED;
                self.delta_phi -= std::f32::consts::TAU * delta.y / h * ORBIT_ROTATE_SPEED;
            }
            DragMode::Pan => {
                self.pending_pan_px += delta * ORBIT_PAN_SPEED;
            }
        }
        self.drag = Some((mode, pos));
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Wheel input; negative `delta_y` (scroll up) moves the camera closer.
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.enable_zoom || delta_y == 0.0 {
            return;
        }
        if delta_y < 0.0 {
            self.scale *= ORBIT_ZOOM_STEP;
        } else {
            self.scale /= ORBIT_ZOOM_STEP;
        }
    }

    /// Apply pending motion to `camera`. Returns whether the eye moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.eye;
        let offset = camera.eye - self.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        if self.pending_pan_px != Vec2::ZERO {
            self.pan_offset += self.pan_world_offset(camera, radius);
            self.pending_pan_px = Vec2::ZERO;
        }

        let damped = self.damping > 0.0;
        let k = if damped { self.damping } else { 1.0 };
        theta += self.delta_theta * k;
        phi += self.delta_phi * k;
        phi = phi.clamp(POLAR_EPS, std::f32::consts::PI - POLAR_EPS);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * k;

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.eye = self.target + offset;
        camera.target = self.target;

        if damped {
            self.delta_theta *= 1.0 - self.damping;
            self.delta_phi *= 1.0 - self.damping;
            self.pan_offset *= 1.0 - self.damping;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        (camera.eye - before).length_squared() > 1e-8
    }

    // Screen-space pan converted to world units at the target's depth.
    fn pan_world_offset(&self, camera: &PerspectiveCamera, radius: f32) -> Vec3 {
        let forward = (camera.target - camera.eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        let target_distance = radius * (camera.fov_y_deg.to_radians() * 0.5).tan();
        let h = self.viewport_height.max(1.0);
        let dx = 2.0 * self.pending_pan_px.x * target_distance / h;
        let dy = 2.0 * self.pending_pan_px.y * target_distance / h;
        -right * dx + up * dy
    }
}

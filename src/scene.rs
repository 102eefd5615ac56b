use crate::camera::PerspectiveCamera;
use crate::constants::*;
use crate::geometry::{box_mesh, plane_mesh, MeshData};
use crate::interaction::{InteractionState, Spin};
use crate::text::centering_offset;
use crate::viewport::Viewport;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Translation, Euler XYZ rotation and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.translation,
        )
    }
}

/// An unlit, flat-colored object.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub mesh: MeshData,
    pub transform: Transform,
    pub color: [f32; 4],
}

/// Everything the frame loop animates and draws.
///
/// Created once at scene start and owned by the frame driver; the glass is
/// always present, the text arrives later (or never) from the font loader.
pub struct SceneContext {
    pub camera: PerspectiveCamera,
    pub backdrop: SceneObject,
    pub text: Option<SceneObject>,
    pub glass_mesh: MeshData,
    pub glass: Transform,
    pub spin: Spin,
    text_revision: u32,
}

impl SceneContext {
    pub fn new(viewport: &Viewport) -> Self {
        let backdrop = SceneObject {
            mesh: plane_mesh(BACKDROP_SIZE[0], BACKDROP_SIZE[1]),
            transform: Transform {
                translation: BACKDROP_POSITION,
                ..Transform::default()
            },
            color: BACKDROP_COLOR,
        };
        Self {
            camera: PerspectiveCamera::new(viewport.aspect()),
            backdrop,
            text: None,
            glass_mesh: box_mesh(GLASS_BOX_SIZE, GLASS_BOX_SIZE, GLASS_BOX_SIZE),
            glass: Transform {
                scale: Vec3::splat(GLASS_WRAPPER_SCALE),
                ..Transform::default()
            },
            spin: Spin::default(),
            text_revision: 0,
        }
    }

    pub fn resize(&mut self, viewport: &Viewport) {
        self.camera.set_aspect(viewport.aspect());
    }

    /// Install the text mesh. An empty mesh leaves the scene without text.
    /// Returns whether text was added.
    pub fn set_text_mesh(&mut self, mesh: MeshData) -> bool {
        let Some(bb) = mesh.bounding_box().filter(|_| !mesh.is_empty()) else {
            log::warn!("[scene] text geometry is empty; continuing without text");
            return false;
        };
        let size = bb.size();
        log::debug!(
            "[scene] text bbox min=({:.2},{:.2},{:.2}) max=({:.2},{:.2},{:.2}) size=({:.2},{:.2},{:.2})",
            bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z, size.x, size.y, size.z
        );
        let offset = centering_offset(&mesh);
        self.text = Some(SceneObject {
            mesh,
            transform: Transform {
                translation: Vec3::new(offset.x, offset.y, TEXT_Z),
                ..Transform::default()
            },
            color: TEXT_COLOR,
        });
        self.text_revision = self.text_revision.wrapping_add(1);
        log::info!("[scene] text added to scene");
        true
    }

    /// Bumped whenever the text mesh changes so GPU buffers can follow.
    #[inline]
    pub fn text_revision(&self) -> u32 {
        self.text_revision
    }

    /// Per-frame animation at `t` seconds since start.
    pub fn advance(&mut self, t: f32, interaction: &mut InteractionState) {
        self.spin.advance(t, interaction);
        self.glass.rotation = self.spin.rotation;
    }
}

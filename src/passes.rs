/// Which capture buffer a pass writes or the glass samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptureId {
    Back,
    Front,
}

/// Where a pass draws. `Screen` is the default target (no capture bound).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutput {
    Capture(CaptureId),
    Screen,
}

/// Visibility and face orientation of the glass during one sub-pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshFacing {
    Hidden,
    Back,
    Front,
}

impl MeshFacing {
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, MeshFacing::Hidden)
    }
}

/// One sub-pass of the refraction frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassStep {
    pub output: RenderOutput,
    pub facing: MeshFacing,
    /// Capture the glass samples as its background, read from the slot.
    pub input: Option<CaptureId>,
}

impl PassStep {
    pub fn label(&self) -> &'static str {
        match self.output {
            RenderOutput::Capture(CaptureId::Back) => "capture_back_pass",
            RenderOutput::Capture(CaptureId::Front) => "capture_front_pass",
            RenderOutput::Screen => "composite_pass",
        }
    }
}

/// Single-slot mailbox for the glass background texture.
///
/// Each capture pass publishes the buffer it produced; the next visible glass
/// pass reads it. Publishing must happen before the reading pass is issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureSlot {
    current: Option<CaptureId>,
}

impl TextureSlot {
    #[inline]
    pub fn publish(&mut self, id: CaptureId) {
        self.current = Some(id);
    }

    #[inline]
    pub fn read(&self) -> Option<CaptureId> {
        self.current
    }
}

/// Something that can draw the scene for a given sub-pass.
pub trait ScenePasses {
    fn render_pass(&mut self, step: &PassStep);
}

/// Orders the three sub-passes of a frame.
///
/// 1. glass hidden, scene into the back capture
/// 2. back capture published, glass back faces, scene into the front capture
/// 3. front capture published, glass front faces, scene on screen
///
/// The order is load-bearing: skipping the hidden pass makes the glass refract
/// itself, and swapping 2 and 3 samples a stale capture.
#[derive(Clone, Copy, Debug)]
pub struct RefractionController {
    slot: TextureSlot,
    facing: MeshFacing,
}

impl Default for RefractionController {
    fn default() -> Self {
        Self {
            slot: TextureSlot::default(),
            facing: MeshFacing::Front,
        }
    }
}

impl RefractionController {
    #[inline]
    pub fn facing(&self) -> MeshFacing {
        self.facing
    }

    #[inline]
    pub fn slot(&self) -> TextureSlot {
        self.slot
    }

    pub fn run_frame<P: ScenePasses + ?Sized>(&mut self, passes: &mut P) {
        self.facing = MeshFacing::Hidden;
        passes.render_pass(&PassStep {
            output: RenderOutput::Capture(CaptureId::Back),
            facing: self.facing,
            input: None,
        });

        self.slot.publish(CaptureId::Back);
        self.facing = MeshFacing::Back;
        passes.render_pass(&PassStep {
            output: RenderOutput::Capture(CaptureId::Front),
            facing: self.facing,
            input: self.slot.read(),
        });

        self.slot.publish(CaptureId::Front);
        self.facing = MeshFacing::Front;
        passes.render_pass(&PassStep {
            output: RenderOutput::Screen,
            facing: self.facing,
            input: self.slot.read(),
        });
    }
}

use crate::constants::MAX_PIXEL_RATIO;

/// Host viewport in CSS pixels plus the raw device pixel ratio.
///
/// Everything that allocates pixels (surface, capture targets, depth buffer)
/// derives its size from here so they can never disagree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            device_pixel_ratio,
        }
    }

    /// Device pixel ratio capped at [`MAX_PIXEL_RATIO`]. Non-finite or
    /// non-positive ratios fall back to 1.
    #[inline]
    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Backing-store size in physical pixels, never smaller than 1x1.
    #[inline]
    pub fn physical_size(&self) -> (u32, u32) {
        let pr = self.pixel_ratio();
        let w = (self.width * pr).floor() as u32;
        let h = (self.height * pr).floor() as u32;
        (w.max(1), h.max(1))
    }

    /// Value of the shader's resolution uniform.
    #[inline]
    pub fn resolution(&self) -> [f32; 2] {
        let (w, h) = self.physical_size();
        [w as f32, h as f32]
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        (self.width / self.height.max(1.0)) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

use crate::constants::*;
use crate::text::TextGeometryParams;

/// Page-level configuration. Defaults reproduce the original scene; the host
/// canvas can override the text and font URL through data attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub canvas_id: String,
    pub font_url: String,
    pub text: String,
    pub text_params: TextGeometryParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_id: CANVAS_ID.to_string(),
            font_url: FONT_URL.to_string(),
            text: TEXT_CONTENT.to_string(),
            text_params: TextGeometryParams {
                size: TEXT_SIZE,
                depth: TEXT_DEPTH,
                curve_segments: TEXT_CURVE_SEGMENTS,
                bevel_enabled: false,
                ..TextGeometryParams::default()
            },
        }
    }
}

impl SceneConfig {
    /// Apply `data-*` overrides. Blank values are ignored.
    pub fn with_overrides(mut self, text: Option<String>, font_url: Option<String>) -> Self {
        if let Some(t) = text.filter(|t| !t.trim().is_empty()) {
            self.text = t;
        }
        if let Some(u) = font_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.font_url = u;
        }
        self
    }
}

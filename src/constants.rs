use glam::Vec3;

/// Scene and interaction tuning constants.
///
/// These keep the fixed numeric character of the effect in one place. The
/// refraction values are visual calibration, not tunable behavior.

// Host element
pub const CANVAS_ID: &str = "three-canvas";

// Device pixel ratio cap shared by the surface and both capture targets
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 33.6);

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // dolly scale per wheel notch
pub const ORBIT_MIN_DISTANCE: f32 = 0.0;
pub const ORBIT_MAX_DISTANCE: f32 = f32::INFINITY;

// Mouse influence
pub const INFLUENCE_DECAY: f32 = 0.98; // per animation callback, must stay in (0, 1)
pub const POINTER_INFLUENCE_GAIN: f32 = 2.0;
pub const INFLUENCE_ROTATION_GAIN: f32 = 0.05;

// Rotation oscillators: rate = base + wave(t * freq) * swing
pub const ROTATION_RATE_SCALE: f32 = 0.02;
pub const X_RATE_BASE: f32 = 0.2;
pub const X_RATE_SWING: f32 = 0.15;
pub const X_RATE_FREQ: f32 = 0.1;
pub const Y_RATE_BASE: f32 = 0.3;
pub const Y_RATE_SWING: f32 = 0.2;
pub const Y_RATE_FREQ: f32 = 0.08;
pub const Z_RATE_BASE: f32 = 0.15;
pub const Z_RATE_SWING: f32 = 0.1;
pub const Z_RATE_FREQ: f32 = 0.12;

// Refraction defaults (indices of refraction per spectral band)
pub const IOR_RED: f32 = 1.15;
pub const IOR_YELLOW: f32 = 1.16;
pub const IOR_GREEN: f32 = 1.18;
pub const IOR_CYAN: f32 = 1.22;
pub const IOR_BLUE: f32 = 1.22;
pub const IOR_VIOLET: f32 = 1.22;
pub const SATURATION: f32 = 1.01;
pub const CHROMATIC_ABERRATION: f32 = 0.14;
pub const REFRACT_POWER: f32 = 0.35;
pub const FRESNEL_POWER: f32 = 9.0;
pub const SHININESS: f32 = 25.0;
pub const DIFFUSENESS: f32 = 0.2;
pub const LIGHT_VECTOR: [f32; 3] = [-1.0, 1.0, 1.0];

// Dispersion loop length; must match LOOP in shaders/glass.wgsl
pub const DISPERSION_SAMPLES: u32 = 16;

// Backdrop plane
pub const BACKDROP_SIZE: [f32; 2] = [20.0, 15.0];
pub const BACKDROP_POSITION: Vec3 = Vec3::new(-5.1, 0.0, -5.0);
pub const BACKDROP_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// Glass box
pub const GLASS_BOX_SIZE: f32 = 2.0;
pub const GLASS_WRAPPER_SCALE: f32 = 3.0;

// Text
pub const FONT_URL: &str = "https://threejs.org/examples/fonts/helvetiker_regular.typeface.json";
pub const TEXT_CONTENT: &str = "cerebral";
pub const TEXT_SIZE: f32 = 5.0;
pub const TEXT_DEPTH: f32 = 5.1;
pub const TEXT_CURVE_SEGMENTS: u32 = 12;
pub const TEXT_Z: f32 = -2.5; // between backdrop (-5.0) and glass (0.0)
pub const TEXT_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

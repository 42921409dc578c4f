/// Build-time configuration for the profile scene.
///
/// Everything here is fixed at compile time; the interaction tuning values
/// were carried over from the original empirically-tuned settings.
// Profile to display
pub const GITHUB_USERNAME: &str = "Reemkaleem";
pub const MAX_REPOS_DISPLAY: usize = 6;
pub const MAX_TAGS_DISPLAY: usize = 6;

// Feature toggles
pub const ENABLE_PARTICLES: bool = true;
pub const ENABLE_REPO_PANELS: bool = true;
pub const ENABLE_SKILL_BADGES: bool = true;
pub const ENABLE_SHADING: bool = true;

// Palette
pub const COLOR_PRIMARY: [f32; 3] = [0.0, 0.83, 1.0];
pub const COLOR_SECONDARY: [f32; 3] = [0.48, 0.17, 0.75];
pub const COLOR_ACCENT: [f32; 3] = [1.0, 0.0, 0.43];
pub const COLOR_GOLD: [f32; 3] = [1.0, 0.84, 0.0];
pub const COLOR_CARD_FRONT: [f32; 3] = [0.12, 0.16, 0.23];
pub const COLOR_CARD_BACK: [f32; 3] = [0.06, 0.09, 0.16];
pub const FOG_COLOR: [f32; 3] = [0.039, 0.055, 0.153];
pub const FOG_DENSITY: f32 = 0.015;

// Camera
pub const CAMERA_Z_DEFAULT: f32 = 8.0;
pub const CAMERA_Z_MIN: f32 = 4.0;
pub const CAMERA_Z_MAX: f32 = 15.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Card motion
pub const AUTO_ROTATE_SPEED: f32 = 0.003; // radians per tick when idle
pub const DRAG_ROTATE_GAIN: f32 = 0.01; // radians per pixel dragged
pub const ROTATION_EASE_ALPHA: f32 = 0.1;

// Proximity / interaction tuning
pub const PROXIMITY_THRESHOLD: f32 = 6.5; // world units from the viewer
pub const NEAR_DEBOUNCE_MS: f64 = 150.0; // settle time for a candidate change
pub const HIDE_FADE_MS: f64 = 300.0; // overlay close animation window
pub const CLICK_DRAG_EPSILON_PX: f32 = 4.0; // below this a pointer-up is a click

// Emphasis easing (fixed per-tick factor; tick-rate dependent on purpose)
pub const EMPHASIS_ALPHA: f32 = 0.12;
pub const ACTIVE_GLOW_BOOST: f32 = 2.5;
pub const ACTIVE_SCALE: f32 = 1.15;

// Screen-space card hover (profile overlay affordance)
pub const CARD_HOVER_RADIUS_FRAC: f32 = 0.25; // of min(canvas w, h)
pub const CARD_HOVER_EXIT_FACTOR: f32 = 1.5; // leave radius is enter * this
pub const CARD_HOVER_SETTLE_MS: f64 = 100.0;

// Particle field
pub const PARTICLE_COUNT: usize = 2000;
pub const PARTICLE_BOUND: f32 = 50.0; // half-extent; drift wraps past it
pub const PARTICLE_DRIFT_GAIN: f32 = 0.1;

// Repository panel orbit
pub const PANEL_ORBIT_RADIUS: f32 = 12.0;
pub const PANEL_ORBIT_SPEED: f32 = 0.0005; // radians per tick
pub const PANEL_BOB_AMPLITUDE: f32 = 0.5;
pub const PANEL_BREATHE_AMPLITUDE: f32 = 0.05;

// Skill badge float
pub const BADGE_FLOAT_RANGE: f32 = 0.3;
pub const BADGE_SPIN_SPEED: f32 = 0.01; // radians per tick

// Resting glow per item kind
pub const CARD_BASE_GLOW: f32 = 0.1;
pub const PANEL_BASE_GLOW: f32 = 0.2;
pub const BADGE_BASE_GLOW: f32 = 0.3;

// Static skill column: name, color, anchor height
pub const SKILLS: &[(&str, [f32; 3], f32)] = &[
    ("JavaScript", [0.97, 0.87, 0.12], 6.0),
    ("Python", [0.22, 0.46, 0.67], 5.0),
    ("React", [0.38, 0.85, 0.98], 4.0),
    ("Node.js", [0.20, 0.60, 0.20], 3.0),
    ("Three.js", [0.85, 0.85, 0.85], 2.0),
];

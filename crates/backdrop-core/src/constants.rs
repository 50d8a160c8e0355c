// Shared motion tuning constants used by the engine and both surfaces.

// Frame pacing
pub const BRANCH_FPS_HIGH: u32 = 30;
pub const BRANCH_FPS_LOW: u32 = 24;
pub const PARTICLE_FPS_HIGH: u32 = 60;
pub const PARTICLE_FPS_LOW: u32 = 30;
pub const FRAME_EPSILON_MS: f64 = 1e-3; // float noise in accumulated timestamps
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after a long gap (hidden tab)
pub const LOW_POWER_MAX_CORES: u32 = 4;

// Smoothing rates (fraction of remaining distance per executed tick)
pub const THEME_LERP: f32 = 0.06;
pub const SCROLL_LERP: f32 = 0.08;
pub const POINTER_LERP: f32 = 0.06;
pub const OPACITY_LERP: f32 = 0.06;

// Device pixel ratio bounds per variant
pub const BRANCH_DPR_MAX: f32 = 1.4;
pub const PARTICLE_DPR_MAX: f32 = 2.0;

// Branch field
pub const TREES_HIGH: usize = 5;
pub const TREES_LOW: usize = 3;
pub const BRANCHES_HIGH: usize = 3;
pub const BRANCHES_LOW: usize = 2;
pub const SUB_BRANCHES: usize = 2;
pub const MAX_SEGMENTS: usize = 64;
pub const FIELD_ALPHA: f32 = 0.08; // ambient ceiling, never a focal element
pub const TRUNK_THICKNESS: f32 = 0.008;
pub const BRANCH_THICKNESS: f32 = 0.004;
pub const SUB_THICKNESS: f32 = 0.002;

// Branch palette (light, dark)
pub const BRANCH_COLOR_LIGHT: [f32; 3] = [0.85, 0.9, 0.95];
pub const BRANCH_COLOR_DARK: [f32; 3] = [0.15, 0.25, 0.4];
pub const GLOW_COLOR_LIGHT: [f32; 3] = [0.9, 0.95, 1.0];
pub const GLOW_COLOR_DARK: [f32; 3] = [0.3, 0.5, 0.8];

// Pair phase schedule (seconds)
pub const CYCLE_DURATION: f32 = 5.2;
pub const SPLIT_DURATION: f32 = 0.4;
pub const SPIRAL_DURATION: f32 = 3.5;
pub const COLLISION_DURATION: f32 = 0.3;
pub const MAX_ORBIT_RADIUS: f32 = 0.8;
pub const COLLISION_START_RADIUS: f32 = 0.05;

// Pair motion
pub const SPEED_WOBBLE_AMOUNT: f32 = 0.08;
pub const EMISSIVE_BASE: f32 = 0.9;
pub const EMISSIVE_SPIRAL_GAIN: f32 = 3.6;
pub const EMISSIVE_POP: f32 = 7.0;
pub const BURST_COUNT_HIGH: usize = 90;
pub const BURST_COUNT_LOW: usize = 48;
pub const BURST_START_RADIUS: f32 = 0.05;
pub const BURST_SPREAD: f32 = 0.9;
pub const SPAWN_SPREAD: f32 = 2.0;
pub const SPAWN_DEPTH_SPREAD: f32 = 0.35;
pub const CLICK_SPAWN_SCALE: f32 = 1.5;

// Camera for the particle variant
pub const CAMERA_Z: f32 = 2.0;
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Starfield
pub const STAR_COUNT: usize = 250;
pub const STAR_NDC_SPREAD: f32 = 1.15;
pub const STAR_DEPTH_MIN: f32 = 0.4;
pub const STAR_DEPTH_SPAN: f32 = 0.55;

// Text scramble
pub const SCRAMBLE_CHARS: &str = "etaoinshrdlucm";
pub const SCRAMBLE_DURATION_MS: u32 = 450;
pub const SCRAMBLE_FPS: u32 = 60;
pub const SCRAMBLE_REFRESH_CHANCE: f32 = 0.15;
pub const SCRAMBLE_FADE_FROM: f32 = 0.5;

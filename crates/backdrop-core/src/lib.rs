pub mod camera;
pub mod clock;
pub mod component;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod noise;
pub mod orbit;
pub mod palette;
pub mod pool;
pub mod quality;
pub mod scene;
pub mod scramble;
pub mod smoother;
pub mod starfield;
pub mod viewport;

pub static BRANCHES_WGSL: &str = include_str!("../shaders/branches.wgsl");

pub use camera::*;
pub use clock::*;
pub use component::*;
pub use config::MotionConfig;
pub use error::*;
pub use field::{BranchField, BranchFrame, BranchSegment, BranchUniforms};
pub use lifecycle::*;
pub use orbit::*;
pub use palette::*;
pub use pool::*;
pub use quality::*;
pub use scene::*;
pub use scramble::*;
pub use smoother::*;
pub use starfield::*;
pub use viewport::*;

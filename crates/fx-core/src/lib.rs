pub mod camera;
pub mod cloud;
pub mod constants;
pub mod deform;
pub mod dock;
pub mod easing;
pub mod error;
pub mod globe;
pub mod hero;
pub mod input;
pub mod morph;
pub mod pointer;
pub mod reveal;

pub use camera::*;
pub use cloud::*;
pub use constants::*;
pub use deform::*;
pub use dock::*;
pub use easing::*;
pub use error::{FxError, FxResult};
pub use globe::*;
pub use hero::*;
pub use input::*;
pub use morph::*;
pub use pointer::*;
pub use reveal::*;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

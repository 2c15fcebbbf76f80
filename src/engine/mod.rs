//! Engine module containing graphics, input, audio, timing and window management.

pub mod audio;
pub mod config;
pub mod error;
pub mod graphics;
pub mod input;
pub mod render2d;
pub mod timing;
pub mod window;

/// Width of the fixed internal frame every demo draws into.
pub const INTERNAL_RES_X: f32 = 640.0;
/// Height of the fixed internal frame every demo draws into.
pub const INTERNAL_RES_Y: f32 = 480.0;

// Re-export commonly used types
pub use error::{EngineError, EngineResult};
pub use graphics::{DrawList, Renderer};

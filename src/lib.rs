//! GameSystem demo: twelve small rendering demonstrations on winit and wgpu.

pub mod engine;
pub mod game;

pub use game::{App, DemoKind};

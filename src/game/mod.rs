//! The demo application: assets, the twelve demos, their shared state and the window shell.

pub mod app;
pub mod assets;
pub mod demo;
pub mod demos;
pub mod state;

pub use app::App;
pub use demo::DemoKind;

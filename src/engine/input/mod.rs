//! Input handling module
//! Keyboard, mouse and controller state, plus the bindings that turn keys and
//! buttons into demo controls and application commands.

pub mod bindings;
pub mod controller;
pub mod handler;

pub use bindings::{Command, Control};
pub use controller::{Controller, PadButton};
pub use handler::InputHandler;

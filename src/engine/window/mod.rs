//! Window creation, resizing and fullscreen switching.

pub mod manager;

pub use manager::{WindowManager, WINDOW_TITLE};

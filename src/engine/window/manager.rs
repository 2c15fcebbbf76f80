//! Window management implementation.

use std::sync::Arc;

use log::{debug, info, warn};
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window};

use crate::engine::error::EngineResult;

pub const WINDOW_TITLE: &str = "GameSystem Demo";

#[derive(Default)]
pub struct WindowManager {
    window: Option<Arc<Window>>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the window with the cursor hidden over its client area.
    pub fn create_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        width: u32,
        height: u32,
        windowed: bool,
    ) -> EngineResult<Arc<Window>> {
        let mut attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(width, height));
        if !windowed {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = Arc::new(event_loop.create_window(attributes)?);
        window.set_cursor_visible(false);

        let size = window.inner_size();
        info!("Created {}x{} window (windowed: {})", size.width, size.height, windowed);
        self.window = Some(window.clone());
        Ok(window)
    }

    /// Asks for a new client area size; the actual size arrives with the next resize event.
    pub fn request_resolution(&mut self, width: u32, height: u32) {
        let Some(window) = &self.window else {
            return;
        };
        if window.fullscreen().is_some() {
            window.set_fullscreen(None);
        }
        match window.request_inner_size(LogicalSize::new(width, height)) {
            Some(size) => debug!("Resized immediately to {}x{}", size.width, size.height),
            None => debug!("Requested {}x{}", width, height),
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        let Some(window) = &self.window else {
            warn!("No window to switch to fullscreen");
            return;
        };
        if window.fullscreen().is_some() {
            window.set_fullscreen(None);
            info!("Switched to windowed mode");
        } else {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            info!("Switched to fullscreen mode");
        }
    }

    pub fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

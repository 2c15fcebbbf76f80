use rand::rngs::StdRng;

use crate::engine::audio::SoundPlayer;
use crate::engine::input::{Control, InputHandler};

/// Everything a demo may look at or use during one frame.
pub struct FrameContext<'a> {
    pub input: &'a InputHandler,
    pub audio: &'a mut dyn SoundPlayer,
    pub rng: &'a mut StdRng,
    /// Milliseconds the previous frame took.
    pub frame_ms: f32,
    pub fps: f32,
    pub paused: bool,
    pub lighting: bool,
    quit: bool,
}

impl<'a> FrameContext<'a> {
    pub fn new(input: &'a InputHandler, audio: &'a mut dyn SoundPlayer, rng: &'a mut StdRng, frame_ms: f32) -> Self {
        Self {
            input,
            audio,
            rng,
            frame_ms,
            fps: 0.0,
            paused: false,
            lighting: false,
            quit: false,
        }
    }

    /// The single control acting this frame.
    pub fn control(&self) -> Option<Control> {
        self.input.held()
    }

    /// How many actions are due this frame at `actions_per_second`.
    pub fn action_interval(&self, actions_per_second: f32) -> f32 {
        self.frame_ms / 1000.0 * actions_per_second
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

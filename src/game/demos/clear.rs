use crate::engine::graphics::draw::{Color, DrawList};
use crate::game::demos::{Demo, FrameContext};

pub const CLEAR_COLOR: Color = [0.0, 0.0, 1.0, 0.0];
pub const PAUSED_COLOR: Color = [1.0, 0.0, 0.0, 0.0];

/// Clears the screen and nothing else.
pub struct ClearDemo;

impl Demo for ClearDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        draw.clear(if ctx.paused { PAUSED_COLOR } else { CLEAR_COLOR });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::testing::RecordingPlayer;
    use crate::engine::input::InputHandler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn clears_blue_or_red_when_paused() {
        let input = InputHandler::new();
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);

        ClearDemo.frame(&mut ctx, &mut draw);
        assert_eq!(draw.clear_color(), CLEAR_COLOR);
        assert!(draw.is_empty());

        ctx.paused = true;
        ClearDemo.frame(&mut ctx, &mut draw);
        assert_eq!(draw.clear_color(), PAUSED_COLOR);
    }
}

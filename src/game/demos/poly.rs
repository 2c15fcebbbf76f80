use glam::{Mat4, Vec3};

use crate::engine::graphics::draw::{DrawList, Point3};
use crate::game::demos::clear::PAUSED_COLOR;
use crate::game::demos::{Demo, FrameContext};

/// A plain white triangle and square side by side.
pub struct PolyDemo;

impl Demo for PolyDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        if ctx.paused {
            draw.clear(PAUSED_COLOR);
            return;
        }
        draw.clear([0.0, 0.0, 0.0, 0.0]);

        draw.set_model(Mat4::from_translation(Vec3::new(-1.5, 0.0, -6.0)));
        draw.triangle([
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
        ]);

        draw.set_model(Mat4::from_translation(Vec3::new(1.5, 0.0, -6.0)));
        draw.quad([
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(-1.0, -1.0, 0.0),
        ]);
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
    fn draws_white_triangle_and_quad() {
        let input = InputHandler::new();
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);

        PolyDemo.frame(&mut ctx, &mut draw);
        assert_eq!(draw.vertices().len(), 3 + 6);
        assert!(draw.vertices().iter().all(|v| v.color == [1.0, 1.0, 1.0, 1.0]));
        // Triangle on the left half, quad on the right.
        assert!(draw.vertices()[0].position[0] < 0.0);
        assert!(draw.vertices()[3].position[0] > 0.0);

        ctx.paused = true;
        PolyDemo.frame(&mut ctx, &mut draw);
        assert!(draw.is_empty());
        assert_eq!(draw.clear_color(), PAUSED_COLOR);
    }
}

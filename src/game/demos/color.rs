use glam::{Mat4, Vec3};

use crate::engine::graphics::draw::{DrawList, Point3};
use crate::game::demos::clear::PAUSED_COLOR;
use crate::game::demos::{Demo, FrameContext};

/// Colors blended across a triangle, one flat color on the square.
pub struct ColorDemo;

/// Triangle with a red top, green left and blue right corner.
pub fn smooth_triangle() -> [Point3; 3] {
    [
        Point3::new(0.0, 1.0, 0.0).rgb(1.0, 0.0, 0.0),
        Point3::new(-1.0, -1.0, 0.0).rgb(0.0, 1.0, 0.0),
        Point3::new(1.0, -1.0, 0.0).rgb(0.0, 0.0, 1.0),
    ]
}

/// Unit square in the light blue used by the flat-shaded demos.
pub fn flat_square() -> [Point3; 4] {
    [
        Point3::new(-1.0, 1.0, 0.0).rgb(0.5, 0.5, 1.0),
        Point3::new(1.0, 1.0, 0.0).rgb(0.5, 0.5, 1.0),
        Point3::new(1.0, -1.0, 0.0).rgb(0.5, 0.5, 1.0),
        Point3::new(-1.0, -1.0, 0.0).rgb(0.5, 0.5, 1.0),
    ]
}

impl Demo for ColorDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        if ctx.paused {
            draw.clear(PAUSED_COLOR);
            return;
        }
        draw.clear([0.0, 0.0, 0.0, 0.0]);

        draw.set_model(Mat4::from_translation(Vec3::new(-1.5, 0.0, -6.0)));
        draw.triangle(smooth_triangle());

        draw.set_model(Mat4::from_translation(Vec3::new(1.5, 0.0, -6.0)));
        draw.quad(flat_square());
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
    fn corners_carry_their_colors() {
        let input = InputHandler::new();
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);

        ColorDemo.frame(&mut ctx, &mut draw);
        let v = draw.vertices();
        assert_eq!(v[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(v[1].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(v[2].color, [0.0, 0.0, 1.0, 1.0]);
        assert!(v[3..].iter().all(|v| v.color == [0.5, 0.5, 1.0, 1.0]));
    }
}

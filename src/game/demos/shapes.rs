use glam::{Mat4, Vec3};

use crate::engine::graphics::draw::{Color, DrawList, Point3};
use crate::game::demos::rotate::{QUAD_SPIN, TRIANGLE_SPIN};
use crate::game::demos::{Demo, FrameContext};

const RED: Color = [1.0, 0.0, 0.0, 0.5];
const GREEN: Color = [0.0, 1.0, 0.0, 0.5];
const BLUE: Color = [0.0, 0.0, 1.0, 0.5];

/// Four sides of a pyramid: apex red, base corners alternating green and blue.
fn pyramid() -> [[Point3; 3]; 4] {
    let apex = Point3::new(0.0, 1.0, 0.0).color(RED);
    let front_left = Point3::new(-1.0, -1.0, 1.0);
    let front_right = Point3::new(1.0, -1.0, 1.0);
    let back_right = Point3::new(1.0, -1.0, -1.0);
    let back_left = Point3::new(-1.0, -1.0, -1.0);
    [
        [apex, front_left.color(GREEN), front_right.color(BLUE)],
        [apex, front_right.color(BLUE), back_right.color(GREEN)],
        [apex, back_right.color(GREEN), back_left.color(BLUE)],
        [apex, back_left.color(BLUE), front_left.color(GREEN)],
    ]
}

/// Cube faces, each in its own half-transparent color.
fn cube() -> [([f32; 3], [[f32; 3]; 4]); 6] {
    [
        ([0.0, 1.0, 0.0], [[1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]),
        ([1.0, 0.5, 0.0], [[1.0, -1.0, 1.0], [-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0]]),
        ([1.0, 0.0, 0.0], [[1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]]),
        ([1.0, 1.0, 0.0], [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]]),
        ([0.0, 0.0, 1.0], [[-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0]]),
        ([1.0, 0.0, 1.0], [[1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0]]),
    ]
}

/// A spinning pyramid and a cube tumbling about its diagonal, both see-through.
#[derive(Debug, Default)]
pub struct ShapesDemo {
    pyramid_angle: f32,
    cube_angle: f32,
}

impl Demo for ShapesDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        draw.clear([0.0, 0.0, 0.0, 0.0]);
        draw.set_depth_test(true);

        draw.set_model(
            Mat4::from_translation(Vec3::new(-1.5, 0.0, -6.0)) * Mat4::from_rotation_y(self.pyramid_angle.to_radians()),
        );
        for side in pyramid() {
            draw.triangle(side);
        }

        draw.set_model(
            Mat4::from_translation(Vec3::new(1.5, 0.0, -7.0))
                * Mat4::from_axis_angle(Vec3::ONE.normalize(), self.cube_angle.to_radians()),
        );
        for ([r, g, b], corners) in cube() {
            draw.quad(corners.map(|[x, y, z]| Point3::new(x, y, z).color([r, g, b, 0.5])));
        }

        if !ctx.paused {
            self.pyramid_angle += TRIANGLE_SPIN;
            self.cube_angle += QUAD_SPIN;
        }
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
    fn draws_half_transparent_pyramid_and_cube() {
        let input = InputHandler::new();
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);
        let mut demo = ShapesDemo::default();

        demo.frame(&mut ctx, &mut draw);
        assert_eq!(draw.vertices().len(), 4 * 3 + 6 * 6);
        assert!(draw.vertices().iter().all(|v| v.color[3] == 0.5));
        assert_eq!(draw.calls().len(), 1);
    }

    #[test]
    fn pyramid_apex_is_shared() {
        let sides = pyramid();
        assert!(sides.iter().all(|side| side[0].position == Vec3::Y));
    }
}

use glam::{Mat4, Vec3};

use crate::engine::graphics::DrawList;
use crate::game::demos::color::{flat_square, smooth_triangle};
use crate::game::demos::{Demo, FrameContext};

pub const TRIANGLE_SPIN: f32 = 0.8;
pub const QUAD_SPIN: f32 = -0.75;

/// The color demo's shapes spinning, the triangle about Y and the square about X.
#[derive(Debug, Default)]
pub struct RotateDemo {
    triangle_angle: f32,
    quad_angle: f32,
}

impl Demo for RotateDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        draw.clear([0.0, 0.0, 0.0, 0.0]);
        draw.set_depth_test(true);

        draw.set_model(
            Mat4::from_translation(Vec3::new(-1.5, 0.0, -6.0)) * Mat4::from_rotation_y(self.triangle_angle.to_radians()),
        );
        draw.triangle(smooth_triangle());

        draw.set_model(
            Mat4::from_translation(Vec3::new(1.5, 0.0, -6.0)) * Mat4::from_rotation_x(self.quad_angle.to_radians()),
        );
        draw.quad(flat_square());

        if !ctx.paused {
            self.triangle_angle += TRIANGLE_SPIN;
            self.quad_angle += QUAD_SPIN;
        }
    }
}

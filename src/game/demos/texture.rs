use glam::{Mat4, Vec3};

use crate::engine::graphics::draw::{DrawList, Point3};
use crate::engine::graphics::TextureId;
use crate::engine::input::Control;
use crate::game::assets::Assets;
use crate::game::demos::{Demo, FrameContext};

const SPEED_STEP: f32 = 0.05;
const MAX_SPEED: f32 = 10.0;
const DEPTH_STEP: f32 = 0.05;
const MIN_DEPTH: f32 = -100.0;
const START_DEPTH: f32 = -5.0;

/// Normal followed by the corners of one cube face as (x, y, z, u, v).
type Face = ([f32; 3], [[f32; 5]; 4]);

const FACES: [Face; 6] = [
    ([0.0, 0.0, 1.0], [
        [-1.0, -1.0, 1.0, 0.0, 0.0],
        [1.0, -1.0, 1.0, 1.0, 0.0],
        [1.0, 1.0, 1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0, 0.0, 1.0],
    ]),
    ([0.0, 0.0, -1.0], [
        [-1.0, -1.0, -1.0, 1.0, 0.0],
        [-1.0, 1.0, -1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0, 0.0, 1.0],
        [1.0, -1.0, -1.0, 0.0, 0.0],
    ]),
    ([0.0, 1.0, 0.0], [
        [-1.0, 1.0, -1.0, 0.0, 1.0],
        [-1.0, 1.0, 1.0, 0.0, 0.0],
        [1.0, 1.0, 1.0, 1.0, 0.0],
        [1.0, 1.0, -1.0, 1.0, 1.0],
    ]),
    ([0.0, -1.0, 0.0], [
        [-1.0, -1.0, -1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0, 0.0, 1.0],
        [1.0, -1.0, 1.0, 0.0, 0.0],
        [-1.0, -1.0, 1.0, 1.0, 0.0],
    ]),
    ([1.0, 0.0, 0.0], [
        [1.0, -1.0, -1.0, 1.0, 0.0],
        [1.0, 1.0, -1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 0.0, 1.0],
        [1.0, -1.0, 1.0, 0.0, 0.0],
    ]),
    ([-1.0, 0.0, 0.0], [
        [-1.0, -1.0, -1.0, 0.0, 0.0],
        [-1.0, -1.0, 1.0, 1.0, 0.0],
        [-1.0, 1.0, 1.0, 1.0, 1.0],
        [-1.0, 1.0, -1.0, 0.0, 1.0],
    ]),
];

/// Textured crate the viewer spins and pushes around; honours the lighting toggle.
#[derive(Debug)]
pub struct TextureDemo {
    texture: Option<TextureId>,
    rotate_x: f32,
    rotate_y: f32,
    speed_x: f32,
    speed_y: f32,
    depth: f32,
}

impl TextureDemo {
    pub fn new(assets: &Assets) -> Self {
        Self {
            texture: assets.crate_face.id,
            rotate_x: 0.0,
            rotate_y: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
            depth: START_DEPTH,
        }
    }

    fn handle(&mut self, control: Control) {
        match control {
            Control::Left if self.speed_y > -MAX_SPEED => self.speed_y -= SPEED_STEP,
            Control::Right if self.speed_y < MAX_SPEED => self.speed_y += SPEED_STEP,
            Control::Up if self.speed_x > -MAX_SPEED => self.speed_x -= SPEED_STEP,
            Control::Down if self.speed_x < MAX_SPEED => self.speed_x += SPEED_STEP,
            Control::PageDown if self.depth > MIN_DEPTH => self.depth -= DEPTH_STEP,
            Control::PageUp if self.depth < 0.0 => self.depth += DEPTH_STEP,
            Control::Home => {
                self.rotate_x = 0.0;
                self.rotate_y = 0.0;
                self.speed_x = 0.0;
                self.speed_y = 0.0;
                self.depth = START_DEPTH;
            }
            _ => {}
        }
    }
}

impl Demo for TextureDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        if !ctx.paused {
            if let Some(control) = ctx.control() {
                self.handle(control);
            }
        }

        draw.clear([0.0, 0.0, 0.0, 0.0]);
        draw.set_depth_test(true);
        draw.set_lighting(ctx.lighting);
        draw.bind_texture(self.texture);
        draw.set_model(
            Mat4::from_translation(Vec3::new(0.0, 0.0, self.depth))
                * Mat4::from_rotation_x(self.rotate_x.to_radians())
                * Mat4::from_rotation_y(self.rotate_y.to_radians()),
        );
        for (normal, corners) in FACES {
            draw.set_normal(Vec3::from_array(normal));
            draw.quad(corners.map(|[x, y, z, u, v]| Point3::new(x, y, z).uv(u, 1.0 - v)));
        }
        draw.bind_texture(None);
        draw.set_lighting(false);

        if !ctx.paused {
            self.rotate_x += self.speed_x;
            self.rotate_y += self.speed_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::testing::RecordingPlayer;
    use crate::engine::input::InputHandler;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use winit::keyboard::KeyCode;

    fn run(demo: &mut TextureDemo, input: &InputHandler, frames: usize) -> DrawList {
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(input, &mut audio, &mut rng, 16.0);
        for _ in 0..frames {
            demo.frame(&mut ctx, &mut draw);
        }
        draw
    }

    #[test]
    fn arrows_change_spin_speed() {
        let mut demo = TextureDemo::new(&Assets::untextured());
        let mut input = InputHandler::new();
        input.handle_keyboard_input_event(KeyCode::ArrowRight, true, false);
        run(&mut demo, &input, 4);
        assert_relative_eq!(demo.speed_y, 0.2, epsilon = 1e-6);
        assert_relative_eq!(demo.rotate_y, 0.05 + 0.1 + 0.15 + 0.2, epsilon = 1e-5);
    }

    #[test]
    fn depth_stays_in_front_of_the_viewer() {
        let mut demo = TextureDemo::new(&Assets::untextured());
        let mut input = InputHandler::new();
        input.handle_keyboard_input_event(KeyCode::PageUp, true, false);
        run(&mut demo, &input, 200);
        assert!(demo.depth <= DEPTH_STEP);
        assert!(demo.depth > -DEPTH_STEP);

        input.release_all();
        input.handle_keyboard_input_event(KeyCode::Home, true, false);
        run(&mut demo, &input, 1);
        assert_eq!(demo.depth, START_DEPTH);
    }

    #[test]
    fn cube_is_textured_with_six_faces() {
        let assets = Assets::untextured();
        let mut demo = TextureDemo::new(&assets);
        let draw = run(&mut demo, &InputHandler::new(), 1);
        assert_eq!(draw.vertices().len(), 36);
        assert_eq!(draw.calls()[0].texture, assets.crate_face.id);
    }
}

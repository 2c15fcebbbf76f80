use crate::engine::graphics::DrawList;
use crate::engine::input::Control;
use crate::engine::render2d::{BitmapFont, ParticleSystem, MAX_PARTICLES};
use crate::game::assets::Assets;
use crate::game::demos::common::{draw_fps, draw_paused, draw_title, draw_top_right, Transparency};
use crate::game::demos::{Demo, FrameContext};

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const DEFAULT_PARTICLES: usize = 100;
const DEFAULT_ADD_SCALE: f32 = 0.1;
const ADD_SCALE_STEP: f32 = 0.001;
/// Particle updates per second of real time.
const UPDATES_PER_SECOND: f32 = 60.0;

/// A fountain of coloured sparks whose size and count can be changed live.
pub struct ParticleDemo {
    particles: ParticleSystem,
    small_font: BitmapFont,
    large_font: BitmapFont,
    add_scale: f32,
    transparency: Transparency,
}

impl ParticleDemo {
    pub fn new(assets: &Assets) -> Self {
        let texture = assets.particle;
        Self {
            particles: ParticleSystem::new(texture.id, texture.width, texture.height, DEFAULT_PARTICLES),
            small_font: assets.small_font.clone(),
            large_font: assets.large_font.clone(),
            add_scale: DEFAULT_ADD_SCALE,
            transparency: Transparency::default(),
        }
    }

    fn set_count(&mut self, count: usize) {
        self.particles.set_count(count);
        self.particles.activate();
    }

    fn handle(&mut self, control: Control) {
        if self.transparency.handle(control) {
            return;
        }
        let count = self.particles.count();
        match control {
            Control::Right => self.set_count((count + 1).min(MAX_PARTICLES)),
            Control::Left => self.set_count(count.saturating_sub(1)),
            Control::Down => self.add_scale = (self.add_scale - ADD_SCALE_STEP).max(0.0),
            Control::Up => self.add_scale = (self.add_scale + ADD_SCALE_STEP).min(DEFAULT_ADD_SCALE),
            Control::Home => {
                self.set_count(DEFAULT_PARTICLES);
                self.add_scale = DEFAULT_ADD_SCALE;
                self.transparency.reset();
            }
            _ => {}
        }
    }
}

impl Demo for ParticleDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        draw.clear(CLEAR_COLOR);
        draw.begin_2d();
        if ctx.paused {
            self.particles.render(draw);
            draw_paused(draw, &mut self.small_font);
            return;
        }

        if let Some(control) = ctx.control() {
            self.handle(control);
        }

        let alpha = self.transparency.alpha();
        let interval = ctx.action_interval(UPDATES_PER_SECOND);
        self.particles.update(&mut *ctx.rng, interval, self.add_scale, alpha);
        self.particles.render(draw);

        draw_fps(draw, &self.small_font, ctx.fps);
        draw_top_right(draw, &self.small_font, &format!("{:04}", self.particles.count()));
        draw_title(draw, &mut self.large_font, "PARTICLES", alpha);
    }

    fn activate(&mut self) {
        self.particles.activate();
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

    fn run(demo: &mut ParticleDemo, key: Option<KeyCode>, frames: usize) -> DrawList {
        let mut input = InputHandler::new();
        if let Some(key) = key {
            input.handle_keyboard_input_event(key, true, false);
        }
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);
        for _ in 0..frames {
            demo.frame(&mut ctx, &mut draw);
        }
        draw
    }

    #[test]
    fn arrows_change_the_particle_count() {
        let mut demo = ParticleDemo::new(&Assets::untextured());
        run(&mut demo, Some(KeyCode::ArrowRight), 3);
        assert_eq!(demo.particles.count(), DEFAULT_PARTICLES + 3);
        run(&mut demo, Some(KeyCode::ArrowLeft), 200);
        assert_eq!(demo.particles.count(), 0);
    }

    #[test]
    fn growth_rate_stays_in_range() {
        let mut demo = ParticleDemo::new(&Assets::untextured());
        run(&mut demo, Some(KeyCode::ArrowUp), 5);
        assert_relative_eq!(demo.add_scale, DEFAULT_ADD_SCALE);
        run(&mut demo, Some(KeyCode::ArrowDown), 150);
        assert_eq!(demo.add_scale, 0.0);
        run(&mut demo, Some(KeyCode::Home), 1);
        assert_eq!(demo.add_scale, DEFAULT_ADD_SCALE);
        assert_eq!(demo.particles.count(), DEFAULT_PARTICLES);
    }

    #[test]
    fn every_particle_is_drawn() {
        let mut demo = ParticleDemo::new(&Assets::untextured());
        let draw = run(&mut demo, None, 2);
        // Particles plus at least the frame rate, count and title text.
        assert!(draw.vertices().len() > DEFAULT_PARTICLES * 6);
    }

    #[test]
    fn paused_particles_do_not_move() {
        let mut demo = ParticleDemo::new(&Assets::untextured());
        run(&mut demo, None, 3);
        let before: Vec<_> = demo.particles.particles().to_vec();

        let input = InputHandler::new();
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);
        ctx.paused = true;
        demo.frame(&mut ctx, &mut draw);
        assert_eq!(demo.particles.particles(), before.as_slice());
    }
}

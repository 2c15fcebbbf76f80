//! Fountain of sprites thrown out from just below the screen centre.

use rand::Rng;

use crate::engine::graphics::draw::{Color, DrawList, UvRect};
use crate::engine::graphics::texture::TextureId;
use crate::engine::render2d::rect::Rect;
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};

pub const MAX_PARTICLES: usize = 1000;

const SPAWN_X: f32 = INTERNAL_RES_X / 2.0;
const SPAWN_Y: f32 = INTERNAL_RES_Y / 2.0 - 35.0;
const FIRST_RUN_RATE: i32 = 10;
const FIRST_RUN_SCALE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub color: Color,
    /// Pixels per action-interval step on each axis.
    pub rate_x: i32,
    pub rate_y: i32,
    pub move_left: bool,
    pub move_up: bool,
    add_x: f32,
    add_y: f32,
}

impl Particle {
    fn step(accumulator: &mut f32, position: &mut f32, increment: f32, forward: bool) {
        *accumulator += increment;
        while *accumulator >= 1.0 {
            *position += if forward { 1.0 } else { -1.0 };
            *accumulator -= 1.0;
        }
    }
}

pub struct ParticleSystem {
    texture: Option<TextureId>,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    count: usize,
    first_run: bool,
}

impl ParticleSystem {
    pub fn new(texture: Option<TextureId>, width: f32, height: f32, count: usize) -> Self {
        Self {
            texture,
            width,
            height,
            particles: vec![Particle::default(); MAX_PARTICLES],
            count: count.min(MAX_PARTICLES),
            first_run: true,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count.min(MAX_PARTICLES);
    }

    /// Re-runs the first-run initialisation on the next update.
    pub fn activate(&mut self) {
        self.first_run = true;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles[..self.count]
    }

    /// Advances every active particle by `interval` (the 60-per-second action interval),
    /// grows it by `interval * add_scale` and respawns it once it leaves the screen.
    pub fn update<R: Rng>(&mut self, rng: &mut R, interval: f32, add_scale: f32, alpha: f32) {
        let (width, height) = (self.width, self.height);
        if self.first_run {
            for particle in &mut self.particles[..self.count] {
                particle.rate_x = FIRST_RUN_RATE;
                particle.rate_y = FIRST_RUN_RATE;
                if rng.gen_bool(0.5) {
                    particle.move_left = !particle.move_left;
                }
                if rng.gen_bool(0.5) {
                    particle.move_up = !particle.move_up;
                }
                particle.scale = FIRST_RUN_SCALE;
                particle.x = SPAWN_X;
                particle.y = SPAWN_Y;
                particle.color = [0.0; 4];
            }
            self.first_run = false;
        }

        for particle in &mut self.particles[..self.count] {
            let left = particle.move_left;
            let up = particle.move_up;
            Particle::step(&mut particle.add_x, &mut particle.x, interval * particle.rate_x as f32, !left);
            Particle::step(&mut particle.add_y, &mut particle.y, interval * particle.rate_y as f32, up);

            particle.scale = (particle.scale + interval * add_scale).max(1.0);

            let off_screen = particle.x >= INTERNAL_RES_X
                || particle.x <= -(width * particle.scale)
                || particle.y >= INTERNAL_RES_Y
                || particle.y <= -(height * particle.scale);
            if off_screen {
                respawn(particle, rng, alpha);
            }
        }
    }

    pub fn render(&self, draw: &mut DrawList) {
        draw.bind_texture(self.texture);
        for particle in self.particles() {
            let rect = Rect::from_origin_size(
                particle.x,
                particle.y,
                self.width * particle.scale,
                self.height * particle.scale,
            );
            draw.sprite_quad(rect, UvRect::FULL, 0.0, particle.color);
        }
    }
}

fn respawn<R: Rng>(particle: &mut Particle, rng: &mut R, alpha: f32) {
    particle.rate_x = rng.gen_range(2..=10);
    particle.rate_y = rng.gen_range(2..=10);
    if rng.gen_bool(0.5) {
        particle.move_left = !particle.move_left;
    }
    if rng.gen_bool(0.5) {
        particle.move_up = !particle.move_up;
    }
    particle.scale = 0.1 + rng.gen_range(0..=10) as f32 / 5.0;

    let offset = (100 - 10 * particle.rate_y) as f32;
    particle.x = if particle.move_left { SPAWN_X - offset } else { SPAWN_X + offset };
    particle.y = SPAWN_Y;

    let mut channel = || rng.gen_range(1..=100) as f32 / 100.0;
    particle.color = [channel(), channel(), channel(), alpha];
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn count_is_capped() {
        let mut system = ParticleSystem::new(None, 8.0, 8.0, 5000);
        assert_eq!(system.count(), MAX_PARTICLES);
        system.set_count(0);
        assert!(system.particles().is_empty());
    }

    #[test]
    fn first_run_places_invisible_particles_at_spawn_point() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut system = ParticleSystem::new(None, 8.0, 8.0, 50);
        system.update(&mut rng, 0.0, 0.1, 1.0);
        for particle in system.particles() {
            assert_eq!((particle.x, particle.y), (320.0, 205.0));
            assert_eq!(particle.rate_x, 10);
            assert_eq!(particle.color, [0.0; 4]);
            // Scale is clamped up to at least 1 during the update.
            assert_eq!(particle.scale, 1.0);
        }
    }

    #[test]
    fn movement_steps_whole_pixels() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut system = ParticleSystem::new(None, 8.0, 8.0, 1);
        system.update(&mut rng, 0.0, 0.0, 1.0);
        let start = system.particles()[0];
        // 0.05 * 10 = half a pixel per update.
        system.update(&mut rng, 0.05, 0.0, 1.0);
        assert_eq!(system.particles()[0].x, start.x);
        system.update(&mut rng, 0.05, 0.0, 1.0);
        let moved = system.particles()[0];
        let expected_x = if start.move_left { start.x - 1.0 } else { start.x + 1.0 };
        let expected_y = if start.move_up { start.y + 1.0 } else { start.y - 1.0 };
        assert_eq!((moved.x, moved.y), (expected_x, expected_y));
    }

    #[test]
    fn leaving_the_screen_respawns_with_new_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut system = ParticleSystem::new(None, 8.0, 8.0, 20);
        system.update(&mut rng, 0.0, 0.0, 1.0);
        // One very long frame carries every particle off screen.
        system.update(&mut rng, 100.0, 0.0, 0.5);
        for particle in system.particles() {
            assert!((2..=10).contains(&particle.rate_x));
            assert!((2..=10).contains(&particle.rate_y));
            assert_eq!(particle.y, 205.0);
            let offset = (100 - 10 * particle.rate_y) as f32;
            let expected_x = if particle.move_left { 320.0 - offset } else { 320.0 + offset };
            assert_eq!(particle.x, expected_x);
            assert_eq!(particle.color[3], 0.5);
            assert!(particle.color[..3].iter().all(|c| (0.01..=1.0).contains(c)));
            let k = (particle.scale - 0.1) * 5.0;
            assert!((0.0..=10.0 + 1e-4).contains(&k));
        }
    }

    #[test]
    fn activate_reruns_first_run() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut system = ParticleSystem::new(None, 8.0, 8.0, 3);
        system.update(&mut rng, 100.0, 0.0, 1.0);
        system.activate();
        system.update(&mut rng, 0.0, 0.0, 1.0);
        assert!(system.particles().iter().all(|p| p.x == 320.0 && p.color == [0.0; 4]));
    }

    #[test]
    fn render_emits_one_quad_per_active_particle() {
        let mut system = ParticleSystem::new(Some(9), 8.0, 8.0, 4);
        let mut draw = DrawList::new();
        draw.begin_2d();
        system.render(&mut draw);
        assert_eq!(draw.vertices().len(), 24);
        system.set_count(2);
        draw.clear([0.0; 4]);
        draw.begin_2d();
        system.render(&mut draw);
        assert_eq!(draw.vertices().len(), 12);
    }
}

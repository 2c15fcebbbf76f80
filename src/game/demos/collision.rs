use rand::Rng;

use crate::engine::audio::Sample;
use crate::engine::graphics::DrawList;
use crate::engine::input::Control;
use crate::engine::render2d::{BitmapFont, Sprite, SpriteSheet};
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};
use crate::game::assets::Assets;
use crate::game::demos::clear::{CLEAR_COLOR, PAUSED_COLOR};
use crate::game::demos::common::{draw_fps, draw_paused, draw_title, screen_rect, Transparency};
use crate::game::demos::{Demo, FrameContext};

pub const MAXIMUM_SPRITES: usize = 5;

const SHEET_FRAMES: u32 = 24;
const SHEET_COLUMNS: u32 = 8;
const SPRITE_SIZE: f32 = 64.0;

/// Percentage of each rectangle that must overlap before two asteroids collide.
const COLLISION_TOLERANCE: f32 = 60.0;
/// Frames a collided asteroid stays tinted and ignores further hits.
const TINT_FRAMES: u32 = 15;
const WALL_IMPACT_VOLUME: u8 = 100;
const TINT: [f32; 3] = [1.0, 0.5, 0.5];

#[derive(Debug, Clone)]
struct Asteroid {
    sheet: SpriteSheet,
    velocity: f32,
    rotation_speed: f32,
    move_right: bool,
    move_up: bool,
    frames_since_tint: u32,
    collided: bool,
}

impl Asteroid {
    fn random<R: Rng>(sheet: &SpriteSheet, rng: &mut R) -> Self {
        let mut sheet = sheet.clone();
        let x = rng.gen_range(0..(INTERNAL_RES_X - SPRITE_SIZE) as u32) as f32;
        let y = rng.gen_range(0..(INTERNAL_RES_Y - SPRITE_SIZE) as u32) as f32;
        sheet.sprite.set_dest(x, y);
        Self {
            sheet,
            velocity: rng.gen_range(1..=3) as f32,
            rotation_speed: rng.gen_range(1..=10) as f32,
            move_right: rng.gen(),
            move_up: rng.gen(),
            frames_since_tint: 0,
            collided: false,
        }
    }

    /// Tints the asteroid and ignores further hits for the next `TINT_FRAMES` frames.
    fn latch(&mut self, alpha: f32) {
        self.collided = true;
        self.frames_since_tint = 0;
        self.sheet.sprite.set_color([TINT[0], TINT[1], TINT[2], alpha]);
    }

    fn spin(&mut self) {
        let sprite = &mut self.sheet.sprite;
        sprite.add_rotation(self.rotation_speed);
        if sprite.rotation() >= 360.0 {
            sprite.set_rotation(self.rotation_speed);
        }
    }
}

/// Small asteroids bouncing off the walls and off each other.
pub struct CollisionDemo {
    background: Sprite,
    asteroids: Vec<Asteroid>,
    small_font: BitmapFont,
    large_font: BitmapFont,
    transparency: Transparency,
}

impl CollisionDemo {
    pub fn new<R: Rng>(assets: &Assets, rng: &mut R) -> Self {
        let bg = assets.background;
        let small = assets.asteroid_small;
        let sheet = SpriteSheet::new(
            small.id,
            small.width,
            small.height,
            SHEET_FRAMES,
            SHEET_COLUMNS,
            SPRITE_SIZE,
            SPRITE_SIZE,
        );
        Self {
            background: Sprite::new(bg.id, bg.width, bg.height),
            asteroids: (0..MAXIMUM_SPRITES).map(|_| Asteroid::random(&sheet, rng)).collect(),
            small_font: assets.small_font.clone(),
            large_font: assets.large_font.clone(),
            transparency: Transparency::default(),
        }
    }

    /// Sends asteroid `index` and the first asteroid it hits in opposite directions.
    /// Both are latched until their tint wears off, so the pair handles the hit once.
    fn collide(&mut self, index: usize, ctx: &mut FrameContext, alpha: f32) {
        if self.asteroids[index].collided {
            return;
        }
        let own_rect = self.asteroids[index].sheet.dest_rect();
        let hit = (0..self.asteroids.len()).find(|&other| {
            other != index
                && own_rect.overlaps_with_tolerance(&self.asteroids[other].sheet.dest_rect(), COLLISION_TOLERANCE)
        });
        let Some(other) = hit else {
            return;
        };

        let own = &mut self.asteroids[index];
        own.move_right = !own.move_right;
        own.move_up = !own.move_up;
        let (right, up) = (own.move_right, own.move_up);
        own.latch(alpha);

        let other = &mut self.asteroids[other];
        other.move_right = !right;
        other.move_up = !up;
        other.latch(alpha);
        ctx.audio.play_sample(Sample::Collide);
    }

    fn step(&mut self, index: usize, ctx: &mut FrameContext, alpha: f32) {
        let asteroid = &mut self.asteroids[index];
        asteroid.frames_since_tint += 1;
        if asteroid.frames_since_tint >= TINT_FRAMES {
            asteroid.sheet.sprite.set_color([1.0, 1.0, 1.0, alpha]);
            asteroid.frames_since_tint = 0;
            asteroid.collided = false;
        }
        asteroid.sheet.sprite.set_alpha(alpha);
        asteroid.spin();

        self.collide(index, ctx, alpha);

        let asteroid = &mut self.asteroids[index];
        let sprite = &mut asteroid.sheet.sprite;
        if sprite.dest_x() >= INTERNAL_RES_X - sprite.width() {
            asteroid.move_right = false;
            ctx.audio.play_sample_with_volume(Sample::Impact, WALL_IMPACT_VOLUME);
        } else if sprite.dest_x() <= 0.0 {
            asteroid.move_right = true;
            ctx.audio.play_sample_with_volume(Sample::Impact, WALL_IMPACT_VOLUME);
        }
        sprite.add_dest_x(if asteroid.move_right { asteroid.velocity } else { -asteroid.velocity });

        if sprite.dest_y() >= INTERNAL_RES_Y - sprite.height() {
            asteroid.move_up = false;
            ctx.audio.play_sample_with_volume(Sample::Impact, WALL_IMPACT_VOLUME);
        } else if sprite.dest_y() <= 0.0 {
            asteroid.move_up = true;
            ctx.audio.play_sample_with_volume(Sample::Impact, WALL_IMPACT_VOLUME);
        }
        sprite.add_dest_y(if asteroid.move_up { asteroid.velocity } else { -asteroid.velocity });
    }

    fn draw_background(&mut self, draw: &mut DrawList) {
        self.background.set_scroll(0.0, 0.0);
        self.background.render_tiles(draw, screen_rect());
    }
}

impl Demo for CollisionDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        if ctx.paused {
            draw.clear(PAUSED_COLOR);
            draw.begin_2d();
            self.background.center_in(INTERNAL_RES_X, INTERNAL_RES_Y);
            self.draw_background(draw);
            for asteroid in &self.asteroids {
                asteroid.sheet.render(draw);
            }
            draw_paused(draw, &mut self.small_font);
            return;
        }

        draw.clear(CLEAR_COLOR);
        draw.begin_2d();
        match ctx.control() {
            Some(Control::Home) => self.transparency.reset(),
            Some(control) => {
                self.transparency.handle(control);
            }
            None => {}
        }
        let alpha = self.transparency.alpha();

        self.background.set_scale(1.0);
        self.background.set_alpha(alpha);
        self.draw_background(draw);

        for index in 0..self.asteroids.len() {
            self.step(index, ctx, alpha);
            let sheet = &mut self.asteroids[index].sheet;
            sheet.render(draw);
            sheet.add_frame(1);
        }

        draw_fps(draw, &self.small_font, ctx.fps);
        draw_title(draw, &mut self.large_font, "COLLISION", alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::testing::RecordingPlayer;
    use crate::engine::input::InputHandler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn demo_with(positions: &[(f32, f32)]) -> CollisionDemo {
        let mut rng = StdRng::seed_from_u64(7);
        let mut demo = CollisionDemo::new(&Assets::untextured(), &mut rng);
        demo.asteroids.truncate(positions.len());
        for (asteroid, &(x, y)) in demo.asteroids.iter_mut().zip(positions) {
            asteroid.sheet.sprite.set_dest(x, y);
            asteroid.velocity = 2.0;
            asteroid.move_right = true;
            asteroid.move_up = true;
        }
        demo
    }

    fn run(demo: &mut CollisionDemo, frames: usize) -> RecordingPlayer {
        let input = InputHandler::new();
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);
        for _ in 0..frames {
            demo.frame(&mut ctx, &mut draw);
        }
        audio
    }

    #[test]
    fn asteroids_start_inside_the_screen() {
        let mut rng = StdRng::seed_from_u64(3);
        let demo = CollisionDemo::new(&Assets::untextured(), &mut rng);
        assert_eq!(demo.asteroids.len(), MAXIMUM_SPRITES);
        for asteroid in &demo.asteroids {
            let rect = asteroid.sheet.dest_rect();
            assert!(rect.left >= 0.0 && rect.right <= INTERNAL_RES_X);
            assert!(rect.bottom >= 0.0 && rect.top <= INTERNAL_RES_Y);
            assert!((1.0..=3.0).contains(&asteroid.velocity));
            assert!((1.0..=10.0).contains(&asteroid.rotation_speed));
        }
    }

    #[test]
    fn walls_turn_asteroids_around_with_impact() {
        let mut demo = demo_with(&[(INTERNAL_RES_X - SPRITE_SIZE, 100.0)]);
        let audio = run(&mut demo, 1);
        let asteroid = &demo.asteroids[0];
        assert!(!asteroid.move_right);
        assert_eq!(asteroid.sheet.sprite.dest_x(), INTERNAL_RES_X - SPRITE_SIZE - 2.0);
        assert_eq!(audio.played, vec![(Sample::Impact, WALL_IMPACT_VOLUME)]);
    }

    #[test]
    fn colliding_asteroids_bounce_apart() {
        let mut demo = demo_with(&[(200.0, 200.0), (210.0, 200.0)]);
        let gap_before = demo.asteroids[1].sheet.sprite.dest_x() - demo.asteroids[0].sheet.sprite.dest_x();
        let audio = run(&mut demo, 2);
        let gap_after = demo.asteroids[1].sheet.sprite.dest_x() - demo.asteroids[0].sheet.sprite.dest_x();
        assert!(gap_after > gap_before, "gap went from {} to {}", gap_before, gap_after);
        assert!(!demo.asteroids[0].move_right && !demo.asteroids[0].move_up);
        assert!(demo.asteroids[1].move_right && demo.asteroids[1].move_up);

        let collisions = audio.played.iter().filter(|(sample, _)| *sample == Sample::Collide).count();
        assert_eq!(collisions, 1);
        for asteroid in &demo.asteroids {
            assert!(asteroid.collided);
            assert_eq!(asteroid.sheet.sprite.color(), [1.0, 0.5, 0.5, 1.0]);
        }
    }

    #[test]
    fn tint_wears_off() {
        let mut demo = demo_with(&[(200.0, 200.0), (400.0, 100.0)]);
        demo.asteroids[0].collided = true;
        demo.asteroids[0].sheet.sprite.set_color([1.0, 0.5, 0.5, 1.0]);
        run(&mut demo, TINT_FRAMES as usize);
        assert!(!demo.asteroids[0].collided);
        assert_eq!(demo.asteroids[0].sheet.sprite.color(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn rotation_wraps_after_a_full_turn() {
        let mut demo = demo_with(&[(200.0, 200.0)]);
        demo.asteroids[0].rotation_speed = 10.0;
        run(&mut demo, 36);
        assert_eq!(demo.asteroids[0].sheet.sprite.rotation(), 10.0);
    }
}

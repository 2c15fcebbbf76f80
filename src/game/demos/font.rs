use crate::engine::audio::Sample;
use crate::engine::graphics::DrawList;
use crate::engine::input::Control;
use crate::engine::render2d::{BitmapFont, Sprite, SpriteSheet};
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};
use crate::game::assets::Assets;
use crate::game::demos::clear::{CLEAR_COLOR, PAUSED_COLOR};
use crate::game::demos::common::{draw_fps, draw_paused, draw_title, screen_rect, Transparency};
use crate::game::demos::{Demo, FrameContext};

const ROTATION_STEP: f32 = 0.1;
const MAX_ROTATION_SPEED: f32 = 10.0;
const SCALE_STEP: f32 = 0.05;
const SPEED: f32 = 2.0;

const ASTEROID_FRAMES: u32 = 25;
const ASTEROID_COLUMNS: u32 = 5;
const ASTEROID_SIZE: f32 = 96.0;

/// An animated asteroid bouncing around the screen, with the frame rate and a title
/// drawn in bitmap fonts.
pub struct FontDemo {
    background: Sprite,
    asteroid: SpriteSheet,
    small_font: BitmapFont,
    large_font: BitmapFont,
    rotation_speed: f32,
    transparency: Transparency,
    move_right: bool,
    move_up: bool,
}

impl FontDemo {
    pub fn new(assets: &Assets) -> Self {
        let bg = assets.background;
        let sheet = assets.asteroid_large;
        Self {
            background: Sprite::new(bg.id, bg.width, bg.height),
            asteroid: SpriteSheet::new(
                sheet.id,
                sheet.width,
                sheet.height,
                ASTEROID_FRAMES,
                ASTEROID_COLUMNS,
                ASTEROID_SIZE,
                ASTEROID_SIZE,
            ),
            small_font: assets.small_font.clone(),
            large_font: assets.large_font.clone(),
            rotation_speed: 0.0,
            transparency: Transparency::default(),
            move_right: true,
            move_up: true,
        }
    }

    fn handle(&mut self, control: Control) {
        if self.transparency.handle(control) {
            return;
        }
        let sprite = &mut self.asteroid.sprite;
        match control {
            Control::Left if self.rotation_speed < MAX_ROTATION_SPEED => self.rotation_speed += ROTATION_STEP,
            Control::Right if self.rotation_speed > -MAX_ROTATION_SPEED => self.rotation_speed -= ROTATION_STEP,
            Control::Up => sprite.add_scale(SCALE_STEP),
            Control::Down => sprite.add_scale(-SCALE_STEP),
            Control::Home => {
                sprite.set_scale(1.0);
                sprite.set_rotation(0.0);
                self.rotation_speed = 0.0;
                self.transparency.reset();
            }
            _ => {}
        }
    }

    /// Moves the asteroid one step and turns it around at the screen edges.
    fn bounce(&mut self, ctx: &mut FrameContext) {
        let sprite = &mut self.asteroid.sprite;
        sprite.add_dest_x(if self.move_right { SPEED } else { -SPEED });
        sprite.add_dest_y(if self.move_up { SPEED } else { -SPEED });

        let rect = self.asteroid.dest_rect();
        if rect.left <= 0.0 {
            self.move_right = true;
            ctx.audio.play_sample(Sample::Impact);
        }
        if rect.right >= INTERNAL_RES_X {
            self.move_right = false;
            ctx.audio.play_sample(Sample::Impact);
        }
        if rect.bottom <= 0.0 {
            self.move_up = true;
            ctx.audio.play_sample(Sample::Impact);
        }
        if rect.top >= INTERNAL_RES_Y {
            self.move_up = false;
            ctx.audio.play_sample(Sample::Impact);
        }
    }

    fn draw_background(&mut self, draw: &mut DrawList) {
        self.background.set_scroll(0.0, 0.0);
        self.background.render_tiles(draw, screen_rect());
    }
}

impl Demo for FontDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        if ctx.paused {
            draw.clear(PAUSED_COLOR);
            draw.begin_2d();
            self.background.center_in(INTERNAL_RES_X, INTERNAL_RES_Y);
            self.draw_background(draw);
            self.asteroid.render(draw);
            draw_paused(draw, &mut self.small_font);
            return;
        }

        draw.clear(CLEAR_COLOR);
        draw.begin_2d();
        if let Some(control) = ctx.control() {
            self.handle(control);
        }

        let alpha = self.transparency.alpha();
        self.background.set_scale(1.0);
        self.background.set_alpha(alpha);
        self.draw_background(draw);

        self.asteroid.sprite.set_alpha(alpha);
        self.asteroid.sprite.add_rotation(self.rotation_speed);
        self.bounce(ctx);
        self.asteroid.render(draw);
        self.asteroid.add_frame(1);

        draw_fps(draw, &self.small_font, ctx.fps);
        draw_title(draw, &mut self.large_font, "FONTS", alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::testing::RecordingPlayer;
    use crate::engine::input::InputHandler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(demo: &mut FontDemo, frames: usize, paused: bool) -> (DrawList, RecordingPlayer) {
        let input = InputHandler::new();
        let mut audio = RecordingPlayer::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut draw = DrawList::new();
        let mut ctx = FrameContext::new(&input, &mut audio, &mut rng, 16.0);
        ctx.paused = paused;
        for _ in 0..frames {
            demo.frame(&mut ctx, &mut draw);
        }
        (draw, audio)
    }

    #[test]
    fn asteroid_moves_diagonally_and_animates() {
        let mut demo = FontDemo::new(&Assets::untextured());
        run(&mut demo, 10, false);
        assert_eq!(demo.asteroid.sprite.dest_x(), 20.0);
        assert_eq!(demo.asteroid.sprite.dest_y(), 20.0);
        assert_eq!(demo.asteroid.frame(), 10);
    }

    #[test]
    fn bounces_off_the_top_with_an_impact() {
        let mut demo = FontDemo::new(&Assets::untextured());
        // Top edge reached when y + 96 >= 480.
        let (_, audio) = run(&mut demo, 192, false);
        assert!(!demo.move_up);
        assert!(demo.move_right);
        assert_eq!(audio.played, vec![(Sample::Impact, 255)]);
    }

    #[test]
    fn paused_frame_holds_position_and_shows_paused() {
        let mut demo = FontDemo::new(&Assets::untextured());
        run(&mut demo, 5, false);
        let (draw, audio) = run(&mut demo, 5, true);
        assert_eq!(demo.asteroid.sprite.dest_x(), 10.0);
        assert!(audio.played.is_empty());
        // Background, asteroid and six glyphs.
        assert_eq!(draw.vertices().len(), 6 * 8);
    }
}

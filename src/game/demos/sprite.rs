use crate::engine::graphics::DrawList;
use crate::engine::input::Control;
use crate::engine::render2d::Sprite;
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};
use crate::game::assets::Assets;
use crate::game::demos::clear::{CLEAR_COLOR, PAUSED_COLOR};
use crate::game::demos::common::{screen_rect, Transparency};
use crate::game::demos::{Demo, FrameContext};

const ROTATION_STEP: f32 = 0.1;
const MAX_ROTATION_SPEED: f32 = 10.0;
const SCALE_STEP: f32 = 0.02;
const MIN_BACKGROUND_SCALE: f32 = 0.2;
const SCROLL: (f32, f32) = (-1.5, 0.5);

/// Scrolling tiled background behind a rotating, scalable portrait.
pub struct SpriteDemo {
    background: Sprite,
    portrait: Sprite,
    rotation_speed: f32,
    transparency: Transparency,
}

impl SpriteDemo {
    pub fn new(assets: &Assets) -> Self {
        let bg = assets.background;
        let portrait = assets.portrait;
        Self {
            background: Sprite::new(bg.id, bg.width, bg.height),
            portrait: Sprite::new(portrait.id, portrait.width, portrait.height),
            rotation_speed: 0.0,
            transparency: Transparency::default(),
        }
    }

    fn handle(&mut self, control: Control) {
        if self.transparency.handle(control) {
            return;
        }
        match control {
            Control::Left if self.rotation_speed < MAX_ROTATION_SPEED => self.rotation_speed += ROTATION_STEP,
            Control::Right if self.rotation_speed > -MAX_ROTATION_SPEED => self.rotation_speed -= ROTATION_STEP,
            Control::Up => {
                self.portrait.add_scale(SCALE_STEP);
                self.background.add_scale(SCALE_STEP);
            }
            Control::Down => {
                self.portrait.add_scale(-SCALE_STEP);
                if self.background.scale_x() > MIN_BACKGROUND_SCALE {
                    self.background.add_scale(-SCALE_STEP);
                }
            }
            Control::Home => {
                self.portrait.set_scale(1.0);
                self.portrait.set_rotation(0.0);
                self.background.set_scale(1.0);
                self.rotation_speed = 0.0;
                self.transparency.reset();
            }
            _ => {}
        }
    }
}

impl Demo for SpriteDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        if ctx.paused {
            draw.clear(PAUSED_COLOR);
            draw.begin_2d();
            self.background.center_in(INTERNAL_RES_X, INTERNAL_RES_Y);
            self.background.render_tiles(draw, screen_rect());
            self.portrait.center_in(INTERNAL_RES_X, INTERNAL_RES_Y);
            self.portrait.render(draw);
            return;
        }

        draw.clear(CLEAR_COLOR);
        if let Some(control) = ctx.control() {
            self.handle(control);
        }

        draw.begin_2d();
        let alpha = self.transparency.alpha();
        self.background.set_alpha(alpha);
        self.background.add_scroll(SCROLL.0, SCROLL.1);
        self.background.render_tiles(draw, screen_rect());

        self.portrait.set_alpha(alpha);
        self.portrait.add_rotation(self.rotation_speed);
        self.portrait.center_in(INTERNAL_RES_X, INTERNAL_RES_Y);
        self.portrait.render(draw);
    }
}

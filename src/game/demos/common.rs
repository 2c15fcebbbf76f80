//! Small pieces several demos share: the transparency control and the text overlays.

use crate::engine::graphics::draw::{DrawList, WHITE};
use crate::engine::input::Control;
use crate::engine::render2d::{BitmapFont, Rect};
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};

pub const TRANSPARENCY_STEP: f32 = 0.05;

/// Margin between overlay text and the screen edge.
pub const TEXT_MARGIN: f32 = 16.0;

pub fn screen_rect() -> Rect {
    Rect::new(0.0, 0.0, INTERNAL_RES_X, INTERNAL_RES_Y)
}

/// Alpha applied to a demo's sprites, stepped with PageUp / PageDown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transparency(f32);

impl Default for Transparency {
    fn default() -> Self {
        Transparency(1.0)
    }
}

impl Transparency {
    pub fn alpha(self) -> f32 {
        self.0
    }

    pub fn raise(&mut self) {
        if self.0 < 1.0 {
            self.0 = (self.0 + TRANSPARENCY_STEP).min(1.0);
        }
    }

    pub fn lower(&mut self) {
        if self.0 > 0.0 {
            self.0 = (self.0 - TRANSPARENCY_STEP).max(0.0);
        }
    }

    pub fn reset(&mut self) {
        self.0 = 1.0;
    }

    /// Applies PageUp / PageDown; returns whether `control` was one of them.
    pub fn handle(&mut self, control: Control) -> bool {
        match control {
            Control::PageUp => self.raise(),
            Control::PageDown => self.lower(),
            _ => return false,
        }
        true
    }
}

/// Current frame rate in the top-left corner.
pub fn draw_fps(draw: &mut DrawList, font: &BitmapFont, fps: f32) {
    let text = format!("{:.2}", fps);
    font.draw(draw, &text, TEXT_MARGIN, INTERNAL_RES_Y - font.text_height() - TEXT_MARGIN);
}

/// Demo title centred along the bottom edge.
pub fn draw_title(draw: &mut DrawList, font: &mut BitmapFont, title: &str, alpha: f32) {
    font.set_alpha(alpha);
    let x = ((INTERNAL_RES_X - font.text_width(title)) / 2.0).trunc();
    font.draw(draw, title, x, TEXT_MARGIN);
}

/// Text right-aligned in the top-right corner.
pub fn draw_top_right(draw: &mut DrawList, font: &BitmapFont, text: &str) {
    let x = INTERNAL_RES_X - font.text_width(text) - TEXT_MARGIN;
    font.draw(draw, text, x, INTERNAL_RES_Y - font.text_height() - TEXT_MARGIN);
}

/// Opaque "PAUSED" in the middle of the screen.
pub fn draw_paused(draw: &mut DrawList, font: &mut BitmapFont) {
    let text = "PAUSED";
    font.set_color(WHITE);
    let x = ((INTERNAL_RES_X - font.text_width(text)) / 2.0).trunc();
    let y = ((INTERNAL_RES_Y - font.text_height()) / 2.0).trunc();
    font.draw(draw, text, x, y);
}

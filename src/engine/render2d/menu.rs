use crate::engine::graphics::draw::{Color, DrawList, UvRect, WHITE};
use crate::engine::graphics::texture::TextureId;
use crate::engine::render2d::font::BitmapFont;
use crate::engine::render2d::rect::Rect;

const PADDING: f32 = 16.0;
const HIGHLIGHT_ALPHA: f32 = 0.35;

/// Vertical list of options with an optional title, drawn over a stretched panel image.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    panel: Option<TextureId>,
    font: BitmapFont,
    title: String,
    options: Vec<String>,
    highlight: usize,
    x: f32,
    y: f32,
    color: Color,
}

impl Menu {
    pub fn new(panel: Option<TextureId>, font: BitmapFont) -> Self {
        Self {
            panel,
            font,
            title: String::new(),
            options: Vec::new(),
            highlight: 0,
            x: 0.0,
            y: 0.0,
            color: WHITE,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add_option(&mut self, text: &str) {
        self.options.push(text.to_owned());
    }

    pub fn set_option(&mut self, index: usize, text: &str) {
        if let Some(option) = self.options.get_mut(index) {
            *option = text.to_owned();
        }
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn set_highlight(&mut self, index: usize) {
        if index < self.options.len() {
            self.highlight = index;
        }
    }

    pub fn highlight_next(&mut self) {
        if !self.options.is_empty() {
            self.highlight = (self.highlight + 1) % self.options.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if !self.options.is_empty() {
            self.highlight = (self.highlight + self.options.len() - 1) % self.options.len();
        }
    }

    pub fn set_dest(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.color[3] = alpha;
    }

    fn title_lines(&self) -> usize {
        if self.title.is_empty() {
            0
        } else {
            2
        }
    }

    pub fn width(&self) -> f32 {
        let widest = self
            .options
            .iter()
            .map(|option| self.font.text_width(option))
            .fold(self.font.text_width(&self.title), f32::max);
        widest + PADDING * 2.0
    }

    pub fn height(&self) -> f32 {
        (self.title_lines() + self.options.len()) as f32 * self.font.text_height() + PADDING * 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.width(), self.height())
    }

    /// Screen area of option `index`, spanning the inner width of the menu.
    pub fn option_rect(&self, index: usize) -> Rect {
        let line_height = self.font.text_height();
        let top = self.y + self.height() - PADDING - (self.title_lines() + index) as f32 * line_height;
        Rect::new(self.x + PADDING, top - line_height, self.x + self.width() - PADDING, top)
    }

    pub fn highlight_rect(&self) -> Rect {
        self.option_rect(self.highlight)
    }

    /// Index of the option under `(x, y)`, if any.
    pub fn option_at(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.options.len()).find(|&index| self.option_rect(index).contains(x, y))
    }

    pub fn render(&self, draw: &mut DrawList) {
        draw.bind_texture(self.panel);
        draw.sprite_quad(self.rect(), UvRect::FULL, 0.0, self.color);

        if !self.options.is_empty() {
            let [r, g, b, a] = self.color;
            draw.bind_texture(None);
            draw.sprite_quad(self.highlight_rect(), UvRect::FULL, 0.0, [r, g, b, a * HIGHLIGHT_ALPHA]);
        }

        let mut font = self.font.clone();
        font.set_alpha(self.color[3]);
        let line_height = font.text_height();
        let mut top = self.y + self.height() - PADDING;
        if !self.title.is_empty() {
            let title_x = self.x + (self.width() - font.text_width(&self.title)) / 2.0;
            font.draw(draw, &self.title, title_x, top - line_height);
            top -= line_height * self.title_lines() as f32;
        }
        for option in &self.options {
            font.draw(draw, option, self.x + PADDING, top - line_height);
            top -= line_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_menu() -> Menu {
        let font = BitmapFont::new(Some(1), 256.0, 64.0, 16, 16.0, 16.0, ' ', 64);
        let mut menu = Menu::new(Some(0), font);
        menu.set_title("  MAIN MENU  ");
        menu.add_option("Disable Title");
        menu.add_option("Disable Sound");
        menu.add_option("Quit         ");
        menu
    }

    #[test]
    fn size_accounts_for_title_and_padding() {
        let mut menu = main_menu();
        assert_eq!(menu.width(), 13.0 * 16.0 + 32.0);
        assert_eq!(menu.height(), 5.0 * 16.0 + 32.0);
        menu.set_title("");
        assert_eq!(menu.height(), 3.0 * 16.0 + 32.0);
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let mut menu = main_menu();
        menu.highlight_prev();
        assert_eq!(menu.highlight(), 2);
        menu.highlight_next();
        assert_eq!(menu.highlight(), 0);
        menu.set_highlight(7);
        assert_eq!(menu.highlight(), 0);
    }

    #[test]
    fn option_rects_stack_downwards_for_hit_testing() {
        let mut menu = main_menu();
        menu.set_dest(200.0, 184.0);
        let first = menu.option_rect(0);
        let second = menu.option_rect(1);
        assert_eq!(first.bottom, second.top);
        assert!(first.top > second.top);
        let (cx, cy) = second.center();
        assert_eq!(menu.option_at(cx, cy), Some(1));
        assert_eq!(menu.option_at(0.0, 0.0), None);
    }

    #[test]
    fn set_option_replaces_label() {
        let mut menu = main_menu();
        menu.set_option(0, "Enable Title ");
        assert_eq!(menu.option(0), Some("Enable Title "));
        menu.set_option(9, "ignored");
        assert_eq!(menu.option_count(), 3);
    }
}

use crate::engine::graphics::draw::{Color, DrawList, UvRect, WHITE};
use crate::engine::graphics::texture::TextureId;
use crate::engine::render2d::rect::Rect;

/// Fixed-cell font read from a glyph atlas laid out in rows of `columns` glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapFont {
    texture: Option<TextureId>,
    atlas_width: f32,
    atlas_height: f32,
    cell_width: f32,
    cell_height: f32,
    columns: u32,
    first_glyph: char,
    glyph_count: u32,
    color: Color,
}

impl BitmapFont {
    pub fn new(
        texture: Option<TextureId>,
        atlas_width: f32,
        atlas_height: f32,
        columns: u32,
        cell_width: f32,
        cell_height: f32,
        first_glyph: char,
        glyph_count: u32,
    ) -> Self {
        Self {
            texture,
            atlas_width,
            atlas_height,
            cell_width,
            cell_height,
            columns: columns.max(1),
            first_glyph,
            glyph_count,
            color: WHITE,
        }
    }

    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.cell_width
    }

    pub fn text_height(&self) -> f32 {
        self.cell_height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.color[3] = alpha;
    }

    fn has_lowercase(&self) -> bool {
        (self.first_glyph as u32 + self.glyph_count) > 'a' as u32
    }

    /// Atlas index of `c`, folding lower case onto upper case when the atlas stops short of it.
    pub fn glyph_index(&self, c: char) -> Option<u32> {
        let c = if self.has_lowercase() { c } else { c.to_ascii_uppercase() };
        let index = (c as u32).checked_sub(self.first_glyph as u32)?;
        (index < self.glyph_count).then_some(index)
    }

    fn glyph_uv(&self, index: u32) -> UvRect {
        let column = (index % self.columns) as f32;
        let row = (index / self.columns) as f32;
        UvRect::new(
            column * self.cell_width / self.atlas_width,
            row * self.cell_height / self.atlas_height,
            (column + 1.0) * self.cell_width / self.atlas_width,
            (row + 1.0) * self.cell_height / self.atlas_height,
        )
    }

    /// Draws `text` with its bottom-left corner at `(x, y)`. Unknown characters leave a gap.
    pub fn draw(&self, draw: &mut DrawList, text: &str, x: f32, y: f32) {
        draw.bind_texture(self.texture);
        for (i, c) in text.chars().enumerate() {
            if c == ' ' {
                continue;
            }
            if let Some(index) = self.glyph_index(c) {
                let left = x + i as f32 * self.cell_width;
                let cell = Rect::from_origin_size(left, y, self.cell_width, self.cell_height);
                draw.sprite_quad(cell, self.glyph_uv(index), 0.0, self.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> BitmapFont {
        BitmapFont::new(Some(4), 256.0, 64.0, 16, 16.0, 16.0, ' ', 64)
    }

    #[test]
    fn measures_by_cell() {
        let font = font();
        assert_eq!(font.text_width("60.00"), 80.0);
        assert_eq!(font.text_width(""), 0.0);
        assert_eq!(font.text_height(), 16.0);
    }

    #[test]
    fn lower_case_folds_to_upper_case() {
        let font = font();
        assert_eq!(font.glyph_index('a'), font.glyph_index('A'));
        assert_eq!(font.glyph_index('A'), Some(33));
        assert_eq!(font.glyph_index('~'), None);
        assert_eq!(font.glyph_index('\u{1F600}'), None);
    }

    #[test]
    fn draw_skips_spaces_and_places_glyphs_left_to_right() {
        let font = font();
        let mut draw = DrawList::new();
        draw.begin_2d();
        font.draw(&mut draw, "A B", 0.0, 0.0);
        assert_eq!(draw.vertices().len(), 12);
        assert_eq!(draw.calls().len(), 1);
        assert_eq!(draw.calls()[0].texture, Some(4));
    }
}

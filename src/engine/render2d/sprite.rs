use crate::engine::graphics::draw::{Color, DrawList, UvRect, WHITE};
use crate::engine::graphics::texture::TextureId;
use crate::engine::render2d::rect::Rect;

/// A textured rectangle placed in internal screen space by its bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    texture: Option<TextureId>,
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    scale_x: f32,
    scale_y: f32,
    rotation: f32,
    color: Color,
    scroll_x: f32,
    scroll_y: f32,
}

impl Sprite {
    pub fn new(texture: Option<TextureId>, width: f32, height: f32) -> Self {
        Self {
            texture,
            width,
            height,
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            color: WHITE,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn dest_x(&self) -> f32 {
        self.x
    }

    pub fn dest_y(&self) -> f32 {
        self.y
    }

    pub fn set_dest(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn add_dest_x(&mut self, dx: f32) {
        self.x += dx;
    }

    pub fn add_dest_y(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Places the sprite so its scaled size is centred in a `width x height` area at the origin.
    pub fn center_in(&mut self, width: f32, height: f32) {
        self.x = ((width - self.scaled_width()) / 2.0).trunc();
        self.y = ((height - self.scaled_height()) / 2.0).trunc();
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale_x = scale;
        self.scale_y = scale;
    }

    pub fn add_scale(&mut self, delta: f32) {
        self.scale_x += delta;
        self.scale_y += delta;
    }

    pub fn scaled_width(&self) -> f32 {
        self.width * self.scale_x
    }

    pub fn scaled_height(&self) -> f32 {
        self.height * self.scale_y
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    pub fn add_rotation(&mut self, degrees: f32) {
        self.rotation += degrees;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Changes only the alpha of the modulate color.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.color[3] = alpha;
    }

    pub fn scroll(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Scroll offsets are kept within one scaled tile.
    pub fn add_scroll(&mut self, dx: f32, dy: f32) {
        let (w, h) = (self.scaled_width(), self.scaled_height());
        self.scroll_x += dx;
        self.scroll_y += dy;
        if w > 0.0 {
            self.scroll_x = self.scroll_x.rem_euclid(w);
        }
        if h > 0.0 {
            self.scroll_y = self.scroll_y.rem_euclid(h);
        }
    }

    pub fn dest_rect(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.scaled_width(), self.scaled_height())
    }

    pub fn render(&self, draw: &mut DrawList) {
        self.render_region(draw, UvRect::FULL);
    }

    pub(crate) fn render_region(&self, draw: &mut DrawList, uv: UvRect) {
        draw.bind_texture(self.texture);
        draw.sprite_quad(self.dest_rect(), uv, self.rotation, self.color);
    }

    /// Repeats the image over `screen`, anchored at the sprite position plus scroll.
    pub fn render_tiles(&self, draw: &mut DrawList, screen: Rect) {
        let (tile_w, tile_h) = (self.scaled_width(), self.scaled_height());
        if tile_w <= 0.0 || tile_h <= 0.0 {
            return;
        }
        let origin_x = self.x + self.scroll_x;
        let top = self.y + self.scroll_y + tile_h;
        let uv = UvRect::new(
            (screen.left - origin_x) / tile_w,
            (top - screen.top) / tile_h,
            (screen.right - origin_x) / tile_w,
            (top - screen.bottom) / tile_h,
        );
        draw.bind_texture(self.texture);
        draw.sprite_quad(screen, uv, 0.0, self.color);
    }
}

/// A sprite whose image is a grid of equally sized animation frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub sprite: Sprite,
    sheet_width: f32,
    sheet_height: f32,
    columns: u32,
    frame_count: u32,
    frame: u32,
}

impl SpriteSheet {
    pub fn new(
        texture: Option<TextureId>,
        sheet_width: f32,
        sheet_height: f32,
        frame_count: u32,
        columns: u32,
        frame_width: f32,
        frame_height: f32,
    ) -> Self {
        Self {
            sprite: Sprite::new(texture, frame_width, frame_height),
            sheet_width,
            sheet_height,
            columns: columns.max(1),
            frame_count: frame_count.max(1),
            frame: 0,
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame % self.frame_count;
    }

    pub fn add_frame(&mut self, frames: u32) {
        self.frame = (self.frame + frames) % self.frame_count;
    }

    pub fn frame_width(&self) -> f32 {
        self.sprite.width()
    }

    pub fn frame_height(&self) -> f32 {
        self.sprite.height()
    }

    pub fn dest_rect(&self) -> Rect {
        self.sprite.dest_rect()
    }

    pub fn frame_uv(&self) -> UvRect {
        let column = (self.frame % self.columns) as f32;
        let row = (self.frame / self.columns) as f32;
        let (w, h) = (self.frame_width(), self.frame_height());
        UvRect::new(
            column * w / self.sheet_width,
            row * h / self.sheet_height,
            (column + 1.0) * w / self.sheet_width,
            (row + 1.0) * h / self.sheet_height,
        )
    }

    pub fn render(&self, draw: &mut DrawList) {
        self.sprite.render_region(draw, self.frame_uv());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dest_rect_follows_scale() {
        let mut sprite = Sprite::new(Some(1), 128.0, 64.0);
        sprite.set_dest(10.0, 20.0);
        sprite.set_scale(0.5);
        assert_eq!(sprite.dest_rect(), Rect::new(10.0, 20.0, 74.0, 52.0));
        sprite.center_in(640.0, 480.0);
        assert_eq!((sprite.dest_x(), sprite.dest_y()), (288.0, 224.0));
    }

    #[test]
    fn scroll_wraps_within_a_tile() {
        let mut sprite = Sprite::new(None, 64.0, 64.0);
        for _ in 0..100 {
            sprite.add_scroll(-1.5, 0.5);
        }
        let (x, y) = sprite.scroll();
        assert!((0.0..64.0).contains(&x));
        assert_relative_eq!(x, (-150.0f32).rem_euclid(64.0));
        assert_relative_eq!(y, 50.0);
    }

    #[test]
    fn tiles_cover_screen_with_repeating_uvs() {
        let sprite = Sprite::new(Some(2), 64.0, 64.0);
        let mut draw = DrawList::new();
        draw.begin_2d();
        sprite.render_tiles(&mut draw, Rect::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(draw.vertices().len(), 6);
        // Ten tiles across; the screen top sits six and a half tiles above the first one.
        let bottom_left = draw.vertices()[0];
        assert_relative_eq!(bottom_left.tex_coords[0], 0.0);
        assert_relative_eq!(bottom_left.tex_coords[1], 1.0);
        let top_right = draw.vertices()[2];
        assert_relative_eq!(top_right.tex_coords[0], 10.0);
        assert_relative_eq!(top_right.tex_coords[1], -6.5);
    }

    #[test]
    fn frames_wrap_and_map_to_grid_cells() {
        let mut sheet = SpriteSheet::new(Some(0), 512.0, 256.0, 24, 8, 64.0, 64.0);
        sheet.add_frame(23);
        assert_eq!(sheet.frame(), 23);
        sheet.add_frame(1);
        assert_eq!(sheet.frame(), 0);

        sheet.set_frame(9);
        let uv = sheet.frame_uv();
        assert_relative_eq!(uv.u0, 0.125);
        assert_relative_eq!(uv.v0, 0.25);
        assert_relative_eq!(uv.u1, 0.25);
        assert_relative_eq!(uv.v1, 0.5);
    }
}

//! Scrolling tile map drawn inside a clip box.
//!
//! Row 0 of the map is its top row. The map's top-left corner sits at the clip box's
//! top-left corner shifted by the scroll offset (`map_x` to the right, `map_y` upwards).

use log::debug;

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::graphics::draw::{Color, DrawList, UvRect, WHITE};
use crate::engine::graphics::texture::TextureId;
use crate::engine::render2d::rect::Rect;

pub type TileId = i32;

#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    texture: Option<TextureId>,
    tileset_width: f32,
    tileset_height: f32,
    tileset_columns: u32,
    tile_count: u32,
    tile_width: f32,
    tile_height: f32,
    rows: usize,
    cols: usize,
    tiles: Vec<TileId>,
    clip: Rect,
    map_x: f32,
    map_y: f32,
    wrap_x: bool,
    wrap_y: bool,
    clear_tile: Option<TileId>,
    color: Color,
}

impl TileMap {
    pub fn new(
        texture: Option<TextureId>,
        tileset_width: f32,
        tileset_height: f32,
        tile_count: u32,
        tileset_columns: u32,
        tile_width: f32,
        tile_height: f32,
    ) -> Self {
        Self {
            texture,
            tileset_width,
            tileset_height,
            tileset_columns: tileset_columns.max(1),
            tile_count,
            tile_width,
            tile_height,
            rows: 0,
            cols: 0,
            tiles: Vec::new(),
            clip: Rect::default(),
            map_x: 0.0,
            map_y: 0.0,
            wrap_x: false,
            wrap_y: false,
            clear_tile: None,
            color: WHITE,
        }
    }

    /// Parses `rows * cols` whitespace separated tile ids.
    pub fn parse(text: &str, rows: usize, cols: usize) -> EngineResult<Vec<TileId>> {
        let tiles = text
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<TileId>()
                    .map_err(|e| EngineError::Map(format!("invalid tile id {:?}: {}", token, e)))
            })
            .collect::<EngineResult<Vec<_>>>()?;
        if tiles.len() != rows * cols {
            return Err(EngineError::Map(format!(
                "expected {} tiles for a {}x{} map, found {}",
                rows * cols,
                rows,
                cols,
                tiles.len()
            )));
        }
        Ok(tiles)
    }

    pub fn load(&mut self, text: &str, rows: usize, cols: usize) -> EngineResult<()> {
        self.tiles = Self::parse(text, rows, cols)?;
        self.rows = rows;
        self.cols = cols;
        debug!("Loaded {}x{} tile map", rows, cols);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<TileId> {
        if row < self.rows && col < self.cols {
            self.tiles.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn set_clip_box(&mut self, clip: Rect) {
        self.clip = clip;
    }

    pub fn clip_box(&self) -> Rect {
        self.clip
    }

    pub fn map_x(&self) -> f32 {
        self.map_x
    }

    pub fn map_y(&self) -> f32 {
        self.map_y
    }

    pub fn set_map_x(&mut self, x: f32) {
        self.map_x = x;
        self.normalize();
    }

    pub fn set_map_y(&mut self, y: f32) {
        self.map_y = y;
        self.normalize();
    }

    pub fn scroll_x(&mut self, dx: f32) {
        self.set_map_x(self.map_x + dx);
    }

    pub fn scroll_y(&mut self, dy: f32) {
        self.set_map_y(self.map_y + dy);
    }

    pub fn set_wrap_x(&mut self, wrap: bool) {
        self.wrap_x = wrap;
    }

    pub fn set_wrap_y(&mut self, wrap: bool) {
        self.wrap_y = wrap;
    }

    /// Tiles with this id are not drawn.
    pub fn set_clear_tile_id(&mut self, id: TileId) {
        self.clear_tile = Some(id);
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.color[3] = alpha;
    }

    pub fn replace_tile_id(&mut self, old: TileId, new: TileId) {
        for tile in self.tiles.iter_mut().filter(|tile| **tile == old) {
            *tile = new;
        }
    }

    /// True when any map cell under `rect` holds `id`.
    pub fn is_on_tile(&self, rect: &Rect, id: TileId) -> bool {
        let (first_row, last_row, first_col, last_col) = self.cell_span(rect);
        (first_row..=last_row).any(|row| {
            (first_col..=last_col).any(|col| {
                self.cell(row, col).is_some_and(|tile| tile == id)
            })
        })
    }

    pub fn render(&self, draw: &mut DrawList) {
        if self.tiles.is_empty() {
            return;
        }
        let (origin_x, top) = self.origin();
        let (first_row, last_row, first_col, last_col) = self.cell_span(&self.clip);

        draw.set_clip(Some(self.clip));
        draw.bind_texture(self.texture);
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let Some(tile) = self.cell(row, col) else {
                    continue;
                };
                if Some(tile) == self.clear_tile {
                    continue;
                }
                let Some(uv) = self.tile_uv(tile) else {
                    continue;
                };
                let cell = Rect::from_origin_size(
                    origin_x + col as f32 * self.tile_width,
                    top - (row + 1) as f32 * self.tile_height,
                    self.tile_width,
                    self.tile_height,
                );
                draw.sprite_quad(cell, uv, 0.0, self.color);
            }
        }
        draw.set_clip(None);
    }

    fn map_width(&self) -> f32 {
        self.cols as f32 * self.tile_width
    }

    fn map_height(&self) -> f32 {
        self.rows as f32 * self.tile_height
    }

    fn normalize(&mut self) {
        if self.wrap_x && self.map_width() > 0.0 {
            self.map_x = self.map_x.rem_euclid(self.map_width());
        }
        if self.wrap_y && self.map_height() > 0.0 {
            self.map_y = self.map_y.rem_euclid(self.map_height());
        }
    }

    fn origin(&self) -> (f32, f32) {
        (self.clip.left + self.map_x, self.clip.top + self.map_y)
    }

    /// Unwrapped row and column ranges touched by `rect`; edges that only touch a cell
    /// boundary do not include the neighbouring cell.
    fn cell_span(&self, rect: &Rect) -> (i64, i64, i64, i64) {
        let (origin_x, top) = self.origin();
        let first_col = ((rect.left - origin_x) / self.tile_width).floor() as i64;
        let last_col = ((rect.right - origin_x) / self.tile_width).ceil() as i64 - 1;
        let first_row = ((top - rect.top) / self.tile_height).floor() as i64;
        let last_row = ((top - rect.bottom) / self.tile_height).ceil() as i64 - 1;
        (first_row, last_row, first_col, last_col)
    }

    fn cell(&self, row: i64, col: i64) -> Option<TileId> {
        let row = wrap_index(row, self.rows, self.wrap_y)?;
        let col = wrap_index(col, self.cols, self.wrap_x)?;
        self.tile(row, col)
    }

    fn tile_uv(&self, tile: TileId) -> Option<UvRect> {
        let tile = u32::try_from(tile).ok().filter(|&t| t < self.tile_count)?;
        let column = (tile % self.tileset_columns) as f32;
        let row = (tile / self.tileset_columns) as f32;
        Some(UvRect::new(
            column * self.tile_width / self.tileset_width,
            row * self.tile_height / self.tileset_height,
            (column + 1.0) * self.tile_width / self.tileset_width,
            (row + 1.0) * self.tile_height / self.tileset_height,
        ))
    }
}

fn wrap_index(index: i64, len: usize, wrap: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if wrap {
        Some(index.rem_euclid(len as i64) as usize)
    } else {
        usize::try_from(index).ok().filter(|&i| i < len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = "
        0 0 0 0
        0 1 1 0
        0 1 10 0
        0 0 0 0
    ";

    fn small_map() -> TileMap {
        let mut map = TileMap::new(Some(0), 256.0, 256.0, 64, 8, 32.0, 32.0);
        map.load(SMALL_MAP, 4, 4).unwrap();
        map.set_clip_box(Rect::new(0.0, 0.0, 128.0, 128.0));
        map
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(TileMap::parse("1 2 3", 2, 2).is_err());
        assert!(TileMap::parse("1 2 x 4", 2, 2).is_err());
        assert_eq!(TileMap::parse("1 2\n3 4", 2, 2).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn is_on_tile_uses_cells_under_rect() {
        let map = small_map();
        // Cell (1, 1) spans x 32..64, y 64..96.
        assert!(!map.is_on_tile(&Rect::new(36.0, 68.0, 60.0, 92.0), 0));
        assert!(map.is_on_tile(&Rect::new(28.0, 68.0, 60.0, 92.0), 0));
        // Touching the boundary of a wall cell is not standing on it.
        assert!(!map.is_on_tile(&Rect::new(32.0, 64.0, 64.0, 96.0), 0));
        assert!(map.is_on_tile(&Rect::new(70.0, 36.0, 90.0, 60.0), 10));
    }

    #[test]
    fn scrolling_moves_cells_and_wraps() {
        let mut map = small_map();
        map.set_wrap_x(true);
        map.set_wrap_y(true);
        map.scroll_x(-32.0);
        assert_eq!(map.map_x(), 96.0);
        // After scrolling left by one tile, column 2 sits under x 32..64.
        assert!(map.is_on_tile(&Rect::new(36.0, 36.0, 60.0, 60.0), 10));
        map.scroll_y(-128.0);
        assert_eq!(map.map_y(), 0.0);
    }

    #[test]
    fn without_wrap_outside_cells_are_empty() {
        let mut map = small_map();
        map.scroll_x(64.0);
        assert!(!map.is_on_tile(&Rect::new(4.0, 4.0, 20.0, 20.0), 0));
    }

    #[test]
    fn replace_and_clear_tiles() {
        let mut map = small_map();
        map.replace_tile_id(1, 2);
        assert_eq!(map.tile(1, 1), Some(2));
        assert_eq!(map.tile(2, 2), Some(10));

        map.set_clear_tile_id(0);
        let mut draw = DrawList::new();
        draw.begin_2d();
        map.render(&mut draw);
        // Only the four inner cells are drawn, all clipped to the clip box.
        assert_eq!(draw.vertices().len(), 4 * 6);
        assert_eq!(draw.calls()[0].clip, Some(map.clip_box()));
    }
}

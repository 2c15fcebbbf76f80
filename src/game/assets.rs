//! Loads every image, font and map the demos use, substituting generated
//! stand-ins for anything missing from the asset directory.

use std::path::Path;

use image::RgbaImage;
use log::{info, warn};

use crate::engine::error::EngineResult;
use crate::engine::graphics::procedural::{self, FONT_FIRST_GLYPH, FONT_GLYPH_COUNT};
use crate::engine::graphics::TextureId;
use crate::engine::render2d::BitmapFont;

pub const MAP_FILE: &str = "map.txt";
pub const MAP_ROWS: usize = 15;
pub const MAP_COLS: usize = 20;

/// Map used when `map.txt` is missing. 0 walls, 1 grass, 2 water, 8 open sky,
/// 9 path and 10 the exit.
pub const DEFAULT_MAP: &str = "\
0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0
0 1 1 1 1 9 1 1 1 2 2 2 1 1 1 1 9 1 1 0
0 1 8 8 1 9 1 1 2 2 2 2 2 1 1 1 9 1 1 0
0 1 8 8 1 9 9 9 9 9 9 9 9 9 9 9 9 1 1 0
0 1 1 1 1 9 1 1 1 1 1 1 1 1 1 1 9 1 1 0
0 9 9 9 9 9 1 0 0 0 0 1 1 2 2 1 9 1 1 0
0 9 1 1 1 1 1 0 1 1 0 1 1 2 2 1 9 1 1 0
0 9 1 2 2 1 1 0 1 1 0 1 1 1 1 1 9 1 1 0
0 9 1 2 2 1 1 1 1 1 1 1 1 1 1 1 9 9 9 0
0 9 1 1 1 1 1 1 1 8 8 1 1 0 0 1 1 1 9 0
0 9 9 9 9 9 9 9 1 8 8 1 1 0 0 1 1 1 9 0
0 1 1 1 1 1 1 9 1 1 1 1 1 1 1 1 1 1 9 0
0 1 2 2 2 1 1 9 9 9 9 9 9 9 9 9 9 9 9 0
0 1 2 2 2 1 1 1 1 1 1 1 1 1 1 1 1 1 10 0
0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0
";

/// A registered texture and the size of its image in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureInfo {
    pub id: Option<TextureId>,
    pub width: f32,
    pub height: f32,
    /// True when the image was generated rather than read from disk.
    pub generated: bool,
}

/// How a texture should be sampled when it is magnified or minified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filtering {
    Smooth,
    Pixelated,
}

pub struct Assets {
    pub crate_face: TextureInfo,
    pub background: TextureInfo,
    pub portrait: TextureInfo,
    pub asteroid_large: TextureInfo,
    pub asteroid_small: TextureInfo,
    pub ground: TextureInfo,
    pub clouds: TextureInfo,
    pub menu_panel: TextureInfo,
    pub tiles: TextureInfo,
    pub player: TextureInfo,
    pub particle: TextureInfo,
    pub small_font: BitmapFont,
    pub large_font: BitmapFont,
    pub menu_font: BitmapFont,
    pub map_text: String,
}

fn load_image(asset_dir: &Path, file: &str) -> EngineResult<RgbaImage> {
    let image = image::open(asset_dir.join(file))?;
    Ok(image.to_rgba8())
}

impl Assets {
    /// Loads every asset, handing each image to `register` to become a texture.
    pub fn build(
        asset_dir: &Path,
        mut register: impl FnMut(&str, &RgbaImage, Filtering) -> TextureId,
    ) -> Self {
        let mut texture = |file: &str, filtering: Filtering, fallback: &dyn Fn() -> RgbaImage| {
            let (image, generated) = match load_image(asset_dir, file) {
                Ok(image) => (image, false),
                Err(e) => {
                    warn!("Using generated {} ({})", file, e);
                    (fallback(), true)
                }
            };
            let id = register(file, &image, filtering);
            TextureInfo {
                id: Some(id),
                width: image.width() as f32,
                height: image.height() as f32,
                generated,
            }
        };

        let crate_face = texture("crate.tga", Filtering::Smooth, &|| procedural::crate_face(128));
        let background = texture("backgrnd.tga", Filtering::Smooth, &|| {
            procedural::checkerboard(128, 32, [60, 90, 160], [40, 60, 120])
        });
        let portrait = texture("portrait.tga", Filtering::Smooth, &|| procedural::portrait(128));
        let asteroid_large = texture("asteroid_l.tga", Filtering::Smooth, &|| procedural::asteroid_sheet(96, 96, 5, 25));
        let asteroid_small = texture("asteroid_s.tga", Filtering::Pixelated, &|| procedural::asteroid_sheet(64, 64, 8, 24));
        let ground = texture("ground.tga", Filtering::Smooth, &|| procedural::ground(128));
        let clouds = texture("clouds.tga", Filtering::Smooth, &|| procedural::clouds(128));
        let menu_panel = texture("menu.tga", Filtering::Smooth, &|| procedural::menu_panel(64));
        let tiles = texture("map.tga", Filtering::Pixelated, &|| procedural::tile_set(32, 8, 64));
        let player = texture("player.tga", Filtering::Pixelated, &|| procedural::player_sheet(32, 4));
        let particle = texture("particle.tga", Filtering::Smooth, &|| procedural::particle(32));

        let small_atlas = texture("font_s.tga", Filtering::Pixelated, &|| procedural::font_atlas(16, 16));
        let large_atlas = texture("font_l.tga", Filtering::Pixelated, &|| procedural::font_atlas(32, 10));
        let menu_atlas = texture("menu_font.tga", Filtering::Pixelated, &|| procedural::font_atlas(16, 16));

        let map_text = match std::fs::read_to_string(asset_dir.join(MAP_FILE)) {
            Ok(text) => text,
            Err(e) => {
                warn!("Using built-in map ({})", e);
                DEFAULT_MAP.to_string()
            }
        };

        info!("Assets ready from {}", asset_dir.display());
        Self {
            crate_face,
            background,
            portrait,
            asteroid_large,
            asteroid_small,
            ground,
            clouds,
            menu_panel,
            tiles,
            player,
            particle,
            small_font: font(small_atlas, 16, 16.0),
            large_font: font(large_atlas, 10, 32.0),
            menu_font: font(menu_atlas, 16, 16.0),
            map_text,
        }
    }

    /// Generated assets without textures, for exercising demos off the GPU.
    #[cfg(test)]
    pub fn untextured() -> Self {
        let mut next = 0;
        Self::build(Path::new("no-such-asset-dir"), |_, _, _| {
            next += 1;
            next
        })
    }
}

/// Font over a square-celled atlas with `columns` glyphs per row.
fn font(atlas: TextureInfo, columns: u32, cell: f32) -> BitmapFont {
    let glyph_count = if atlas.generated {
        FONT_GLYPH_COUNT
    } else {
        columns * (atlas.height / cell).floor().max(1.0) as u32
    };
    BitmapFont::new(
        atlas.id,
        atlas.width,
        atlas.height,
        columns,
        cell,
        cell,
        FONT_FIRST_GLYPH,
        glyph_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::render2d::TileMap;

    #[test]
    fn missing_files_fall_back_to_generated_images() {
        let mut labels = Vec::new();
        let assets = Assets::build(Path::new("no-such-asset-dir"), |label, image, _| {
            labels.push((label.to_string(), image.dimensions()));
            labels.len() - 1
        });
        assert_eq!(labels.len(), 14);
        assert!(labels.contains(&("asteroid_l.tga".to_string(), (480, 480))));
        assert_eq!(assets.tiles.width, 256.0);
        assert_eq!(assets.player.height, 32.0);
        assert_eq!(assets.map_text, DEFAULT_MAP);
    }

    #[test]
    fn fonts_use_their_cell_sizes() {
        let assets = Assets::untextured();
        assert_eq!(assets.small_font.text_height(), 16.0);
        assert_eq!(assets.large_font.text_width("FONTS"), 160.0);
        assert!(assets.large_font.glyph_index('S').is_some());
        assert!(assets.menu_font.glyph_index('#').is_some());
    }

    #[test]
    fn default_map_parses_and_has_an_exit() {
        let tiles = TileMap::parse(DEFAULT_MAP, MAP_ROWS, MAP_COLS).unwrap();
        assert_eq!(tiles.iter().filter(|&&tile| tile == 10).count(), 1);
        // The player starts on the path near the left edge.
        assert_ne!(tiles[5 * MAP_COLS + 1], 0);
        assert_ne!(tiles[6 * MAP_COLS + 1], 0);
    }
}

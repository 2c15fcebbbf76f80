//! A player walking a scrolling, animated tile map under a cloudy sky.

use log::{error, warn};

use crate::engine::audio::Sample;
use crate::engine::graphics::{DrawList, Point3, TextureId};
use crate::engine::input::Control;
use crate::engine::render2d::{BitmapFont, Rect, SpriteSheet, TileId, TileMap};
use crate::game::assets::{Assets, DEFAULT_MAP, MAP_COLS, MAP_ROWS};
use crate::game::demos::common::{draw_fps, draw_paused, draw_title, Transparency};
use crate::game::demos::{Demo, FrameContext};

const CLEAR_COLOR: [f32; 4] = [0.3, 0.0, 0.0, 1.0];
const PAUSED_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

const CLIP_BOX: Rect = Rect::new(160.0, 120.0, 480.0, 360.0);
const TILE_COUNT: u32 = 64;
const TILE_COLUMNS: u32 = 8;
const TILE_SIZE: f32 = 32.0;
const CLEAR_TILE: TileId = 8;
const WALL_TILE: TileId = 0;
const EXIT_TILE: TileId = 10;

/// First and last tile of the water animation.
const ANIMATED_FIRST: TileId = 2;
const ANIMATED_LAST: TileId = 7;
const ANIMATION_DELAY: u32 = 5;

const PLAYER_FRAMES: u32 = 4;
const FRAME_UP: u32 = 0;
const FRAME_RIGHT: u32 = 1;
const FRAME_DOWN: u32 = 2;
const FRAME_LEFT: u32 = 3;

const MOVE_DISTANCE: f32 = 4.0;
const HITBOX_PERCENT: f32 = 75.0;
const EXIT_HITBOX_PERCENT: f32 = 50.0;
const SKY_SPEED: f32 = 0.00005;

pub struct MapDemo {
    clouds: Option<TextureId>,
    map: TileMap,
    player: SpriteSheet,
    small_font: BitmapFont,
    large_font: BitmapFont,
    transparency: Transparency,
    sky_roll: f32,
    old_tile: TileId,
    new_tile: TileId,
    animation_frames: u32,
}

impl MapDemo {
    pub fn new(assets: &Assets) -> Self {
        let tiles = assets.tiles;
        let mut map = TileMap::new(
            tiles.id,
            tiles.width,
            tiles.height,
            TILE_COUNT,
            TILE_COLUMNS,
            TILE_SIZE,
            TILE_SIZE,
        );
        let loaded = map.load(&assets.map_text, MAP_ROWS, MAP_COLS).or_else(|e| {
            warn!("Falling back to the built-in map: {}", e);
            map.load(DEFAULT_MAP, MAP_ROWS, MAP_COLS)
        });
        if let Err(e) = loaded {
            error!("No map to show: {}", e);
        }
        map.set_clip_box(CLIP_BOX);
        map.set_wrap_x(true);
        map.set_wrap_y(true);
        map.set_clear_tile_id(CLEAR_TILE);

        let sheet = assets.player;
        let player = SpriteSheet::new(
            sheet.id,
            sheet.width,
            sheet.height,
            PLAYER_FRAMES,
            PLAYER_FRAMES,
            TILE_SIZE,
            TILE_SIZE,
        );

        let mut demo = Self {
            clouds: assets.clouds.id,
            map,
            player,
            small_font: assets.small_font.clone(),
            large_font: assets.large_font.clone(),
            transparency: Transparency::default(),
            sky_roll: 0.0,
            old_tile: ANIMATED_FIRST,
            new_tile: ANIMATED_FIRST,
            animation_frames: 0,
        };
        demo.reset_position();
        demo
    }

    fn reset_position(&mut self) {
        self.map.set_map_x(0.0);
        self.map.set_map_y(0.0);
        let clip = self.map.clip_box();
        self.player
            .sprite
            .set_dest(clip.left + self.map.tile_width(), clip.bottom + self.map.tile_height());
    }

    /// Two mirrored cloud layers drifting at different speeds behind the map.
    fn draw_sky(&self, draw: &mut DrawList) {
        let uv = |p: Point3, u: f32, v: f32| p.uv(u, 1.0 - v);
        let top_right = Point3::new(8.0, 6.0, -5.0);
        let top_left = Point3::new(-8.0, 6.0, -5.0);
        let bottom_left = Point3::new(-8.0, -3.0, -5.0);
        let bottom_right = Point3::new(8.0, -3.0, -5.0);

        draw.bind_texture(self.clouds);
        draw.set_normal(glam::Vec3::Z);
        let roll = self.sky_roll / 0.5;
        draw.quad([
            uv(top_right, 1.0, 1.0 - roll),
            uv(top_left, 1.0, -roll),
            uv(bottom_left, 0.0, -roll),
            uv(bottom_right, 0.0, 1.0 - roll),
        ]);
        let roll = self.sky_roll;
        draw.quad([
            uv(top_right, 0.0, 1.0 - roll),
            uv(top_left, 0.0, -roll),
            uv(bottom_left, 1.0, -roll),
            uv(bottom_right, 1.0, 1.0 - roll),
        ]);
        draw.bind_texture(None);
    }

    fn roll_sky(&mut self, frame_ms: f32) {
        self.sky_roll -= frame_ms * SKY_SPEED;
        while self.sky_roll <= -1.0 {
            self.sky_roll += 1.0;
        }
    }

    /// Scrolls the map by `(dx, dy)` unless that would put `hitbox` over a wall.
    fn try_scroll(&mut self, dx: f32, dy: f32, hitbox: &Rect) {
        self.map.scroll_x(dx);
        self.map.scroll_y(dy);
        if self.map.is_on_tile(hitbox, WALL_TILE) {
            self.map.scroll_x(-dx);
            self.map.scroll_y(-dy);
        }
    }

    /// Moves the player by `(dx, dy)` unless the moved hitbox would be over a wall.
    fn try_move(&mut self, dx: f32, dy: f32, hitbox: &mut Rect) {
        let moved = hitbox.translate(dx, dy);
        if !self.map.is_on_tile(&moved, WALL_TILE) {
            self.player.sprite.add_dest_x(dx);
            self.player.sprite.add_dest_y(dy);
            *hitbox = moved;
        }
    }

    /// The player walks freely in the lower-left half of the clip box and pushes the map
    /// beyond it.
    fn walk(&mut self, control: Control, hitbox: &mut Rect) {
        let clip = self.map.clip_box();
        let sprite = &self.player.sprite;
        let below_centre = sprite.dest_y() + self.player.frame_height() / 2.0 < clip.bottom + clip.height() / 2.0;
        let left_of_centre = sprite.dest_x() + self.player.frame_width() / 2.0 < clip.left + clip.width() / 2.0;

        match control {
            Control::Up => {
                if below_centre {
                    self.try_move(0.0, MOVE_DISTANCE, hitbox);
                } else {
                    self.try_scroll(0.0, -MOVE_DISTANCE, hitbox);
                }
                self.player.set_frame(FRAME_UP);
            }
            Control::Down => {
                if below_centre {
                    self.try_scroll(0.0, MOVE_DISTANCE, hitbox);
                } else {
                    self.try_move(0.0, -MOVE_DISTANCE, hitbox);
                }
                self.player.set_frame(FRAME_DOWN);
            }
            Control::Left => {
                if left_of_centre {
                    self.try_scroll(MOVE_DISTANCE, 0.0, hitbox);
                } else {
                    self.try_move(-MOVE_DISTANCE, 0.0, hitbox);
                }
                self.player.set_frame(FRAME_LEFT);
            }
            Control::Right => {
                if left_of_centre {
                    self.try_move(MOVE_DISTANCE, 0.0, hitbox);
                } else {
                    self.try_scroll(-MOVE_DISTANCE, 0.0, hitbox);
                }
                self.player.set_frame(FRAME_RIGHT);
            }
            Control::Home => {
                self.transparency.reset();
                self.reset_position();
            }
            other => {
                self.transparency.handle(other);
            }
        }
    }

    /// Cycles the water tiles every few frames.
    fn animate_tiles(&mut self) {
        let due = self.animation_frames >= ANIMATION_DELAY;
        self.animation_frames += 1;
        if !due {
            return;
        }
        self.map.replace_tile_id(self.old_tile, self.new_tile);
        self.old_tile = self.new_tile;
        self.new_tile += 1;
        if self.new_tile > ANIMATED_LAST {
            self.new_tile = ANIMATED_FIRST;
        }
        self.animation_frames = 0;
    }
}

impl Demo for MapDemo {
    fn frame(&mut self, ctx: &mut FrameContext, draw: &mut DrawList) {
        if ctx.paused {
            draw.clear(PAUSED_COLOR);
            draw.begin_2d();
            self.map.render(draw);
            self.player.render(draw);
            draw_paused(draw, &mut self.small_font);
            return;
        }

        draw.clear(CLEAR_COLOR);
        self.roll_sky(ctx.frame_ms);
        self.draw_sky(draw);

        let mut hitbox = self.player.dest_rect().scaled_percent(HITBOX_PERCENT);
        if let Some(control) = ctx.control() {
            self.walk(control, &mut hitbox);
        }

        draw.begin_2d();
        let alpha = self.transparency.alpha();
        self.map.set_alpha(alpha);
        self.map.render(draw);
        self.animate_tiles();

        self.player.sprite.set_alpha(alpha);
        self.player.render(draw);

        if self.map.is_on_tile(&hitbox.scaled_percent(EXIT_HITBOX_PERCENT), EXIT_TILE) {
            self.reset_position();
            ctx.audio.play_sample(Sample::Resize);
        }

        draw_fps(draw, &self.small_font, ctx.fps);
        draw_title(draw, &mut self.large_font, "MAPS", alpha);
    }
}

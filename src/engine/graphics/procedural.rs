//! Generated stand-ins for the image assets, used when a file under the asset
//! directory is missing or cannot be decoded.

use image::{Rgba, RgbaImage};

/// First character stored in a generated font atlas.
pub const FONT_FIRST_GLYPH: char = ' ';
/// Number of glyphs in a generated font atlas (`' '..='_'`).
pub const FONT_GLYPH_COUNT: u32 = 64;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// 5x7 glyphs from `' '` to `'_'`, one byte per row, bit 4 is the leftmost pixel.
const GLYPHS: [[u8; 7]; FONT_GLYPH_COUNT as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04], // !
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00], // "
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A], // #
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04], // $
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // %
    [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D], // &
    [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00], // '
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // (
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // )
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00], // *
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // +
    [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08], // ,
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C], // .
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00], // /
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00], // :
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08], // ;
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // <
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // =
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // >
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // ?
    [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E], // @
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // [
    [0x00, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00], // backslash
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // ]
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // ^
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // _
];

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = (x + width).min(image.width());
    let y_end = (y + height).min(image.height());
    for py in y..y_end {
        for px in x..x_end {
            image.put_pixel(px, py, color);
        }
    }
}

fn shade(color: [u8; 3], factor: f32) -> Rgba<u8> {
    let [r, g, b] = color.map(|c| (c as f32 * factor).clamp(0.0, 255.0) as u8);
    Rgba([r, g, b, 255])
}

/// Wooden crate face: planks with a darker frame and a diagonal brace.
pub fn crate_face(size: u32) -> RgbaImage {
    let wood = [170, 120, 60];
    let border = (size / 10).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        let on_frame = x < border || y < border || x >= size - border || y >= size - border;
        let on_brace = x.abs_diff(y) < border / 2 + 1;
        if on_frame || on_brace {
            shade(wood, 0.55)
        } else {
            let plank = (y / (size / 4).max(1)) % 2;
            shade(wood, if plank == 0 { 1.0 } else { 0.85 })
        }
    })
}

/// Two-tone checkerboard used for the tiled background.
pub fn checkerboard(size: u32, cell: u32, light: [u8; 3], dark: [u8; 3]) -> RgbaImage {
    let cell = cell.max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            shade(light, 1.0)
        } else {
            shade(dark, 1.0)
        }
    })
}

/// Round, shaded badge with a transparent surround.
pub fn portrait(size: u32) -> RgbaImage {
    let center = size as f32 / 2.0;
    let radius = center - 1.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > radius {
            return TRANSPARENT;
        }
        let eye_y = center * 0.7;
        let eye_dx = center * 0.35;
        let eye = ((dx.abs() - eye_dx).powi(2) + (y as f32 - eye_y).powi(2)).sqrt() < size as f32 * 0.07;
        let mouth = (y as f32 - center * 1.3).abs() < size as f32 * 0.03 && dx.abs() < center * 0.4;
        if eye || mouth {
            Rgba([40, 20, 20, 255])
        } else {
            shade([240, 200, 80], 1.0 - 0.4 * distance / radius)
        }
    })
}

/// Sprite sheet of a tumbling rock; each frame turns the crater a little further.
pub fn asteroid_sheet(frame_width: u32, frame_height: u32, columns: u32, frames: u32) -> RgbaImage {
    let columns = columns.max(1);
    let rows = frames.div_ceil(columns);
    let mut sheet = RgbaImage::from_pixel(frame_width * columns, frame_height * rows, TRANSPARENT);
    let radius = frame_width.min(frame_height) as f32 * 0.45;
    for frame in 0..frames {
        let origin_x = (frame % columns) * frame_width;
        let origin_y = (frame / columns) * frame_height;
        let angle = frame as f32 / frames as f32 * std::f32::consts::TAU;
        let crater = (angle.cos() * radius * 0.5, angle.sin() * radius * 0.5);
        for y in 0..frame_height {
            for x in 0..frame_width {
                let dx = x as f32 + 0.5 - frame_width as f32 / 2.0;
                let dy = y as f32 + 0.5 - frame_height as f32 / 2.0;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                let in_crater = (dx - crater.0).powi(2) + (dy - crater.1).powi(2) < (radius * 0.3).powi(2);
                let light = 1.0 - 0.35 * (dx + dy) / (2.0 * radius);
                let pixel = shade([130, 115, 100], if in_crater { light * 0.6 } else { light });
                sheet.put_pixel(origin_x + x, origin_y + y, pixel);
            }
        }
    }
    sheet
}

/// Grass field with darker furrows; tiled across the menu ground plane.
pub fn ground(size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        let furrow = (y / 4) % 4 == 0;
        let speck = (x * 7 + y * 13) % 17 == 0;
        match (furrow, speck) {
            (_, true) => shade([90, 150, 60], 1.2),
            (true, false) => shade([60, 110, 40], 1.0),
            _ => shade([80, 140, 50], 1.0),
        }
    })
}

/// Sky blue with soft white puffs.
pub fn clouds(size: u32) -> RgbaImage {
    let s = size as f32;
    let puffs = [(0.25, 0.3, 0.18), (0.7, 0.25, 0.14), (0.55, 0.7, 0.2), (0.15, 0.8, 0.12)];
    RgbaImage::from_fn(size, size, |x, y| {
        let (fx, fy) = (x as f32 / s, y as f32 / s);
        let cover = puffs
            .iter()
            .map(|&(cx, cy, r): &(f32, f32, f32)| {
                let d = ((fx - cx).powi(2) + (fy - cy).powi(2)).sqrt();
                (1.0 - d / r).max(0.0)
            })
            .fold(0.0f32, f32::max)
            .min(1.0);
        let sky = [90.0, 140.0, 220.0];
        let [r, g, b] = sky.map(|c| (c + (255.0 - c) * cover) as u8);
        Rgba([r, g, b, 255])
    })
}

/// Translucent panel with a light border drawn behind menus.
pub fn menu_panel(size: u32) -> RgbaImage {
    let border = (size / 16).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if x < border || y < border || x >= size - border || y >= size - border {
            Rgba([200, 200, 255, 255])
        } else {
            Rgba([20, 20, 60, 190])
        }
    })
}

/// Tile set laid out `columns` tiles per row. Tile 0 is a wall, 1 grass, 2..=7 the
/// water animation, 8 empty, 9 path and 10 the exit marker.
pub fn tile_set(tile_size: u32, columns: u32, tiles: u32) -> RgbaImage {
    let columns = columns.max(1);
    let rows = tiles.div_ceil(columns);
    let mut image = RgbaImage::from_pixel(tile_size * columns, tile_size * rows, TRANSPARENT);
    for id in 0..tiles {
        let origin_x = (id % columns) * tile_size;
        let origin_y = (id / columns) * tile_size;
        for y in 0..tile_size {
            for x in 0..tile_size {
                let pixel = match id {
                    0 => {
                        let mortar = y % 8 == 0 || (x + if (y / 8) % 2 == 0 { 0 } else { 8 }) % 16 == 0;
                        if mortar { shade([90, 90, 90], 1.0) } else { shade([150, 80, 60], 1.0) }
                    }
                    1 => shade([70, 150, 60], if (x + y) % 9 == 0 { 1.2 } else { 1.0 }),
                    2..=7 => {
                        let phase = id - 2;
                        let wave = (y + x / 4 + phase * 2) % 8 < 2;
                        shade([40, 90, 200], if wave { 1.3 } else { 1.0 })
                    }
                    8 => TRANSPARENT,
                    9 => shade([180, 160, 110], if (x * 3 + y) % 11 == 0 { 0.8 } else { 1.0 }),
                    10 => {
                        let edge = x < 3 || y < 3 || x >= tile_size - 3 || y >= tile_size - 3;
                        if edge { shade([240, 220, 40], 1.0) } else { shade([240, 120, 20], 1.0) }
                    }
                    _ => shade([(id * 37 % 256) as u8, (id * 91 % 256) as u8, (id * 53 % 256) as u8], 1.0),
                };
                image.put_pixel(origin_x + x, origin_y + y, pixel);
            }
        }
    }
    image
}

/// Player sheet: one arrow per frame pointing up, right, down and left.
pub fn player_sheet(frame_size: u32, frames: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(frame_size * frames, frame_size, TRANSPARENT);
    let half = frame_size as f32 / 2.0;
    for frame in 0..frames {
        for y in 0..frame_size {
            for x in 0..frame_size {
                let dx = x as f32 + 0.5 - half;
                let dy = y as f32 + 0.5 - half;
                // Rotate into the "pointing up" frame of reference.
                let (ax, ay) = match frame % 4 {
                    0 => (dx, dy),
                    1 => (dy, -dx),
                    2 => (-dx, -dy),
                    _ => (-dy, dx),
                };
                let inside = ay > -half * 0.85 && ay < half * 0.85 && ax.abs() < (ay + half * 0.85) * 0.45;
                if inside {
                    image.put_pixel(frame * frame_size + x, y, shade([230, 230, 255], 1.0 - 0.3 * (ay + half) / frame_size as f32));
                }
            }
        }
    }
    image
}

/// Soft round white dot; particles tint it with their own color.
pub fn particle(size: u32) -> RgbaImage {
    let center = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let falloff = (1.0 - (dx * dx + dy * dy).sqrt() / center).max(0.0);
        Rgba([255, 255, 255, (falloff * 255.0) as u8])
    })
}

/// Font atlas of `cell x cell` glyphs, `columns` per row, starting at [`FONT_FIRST_GLYPH`].
pub fn font_atlas(cell: u32, columns: u32) -> RgbaImage {
    let columns = columns.max(1);
    let rows = FONT_GLYPH_COUNT.div_ceil(columns);
    let mut image = RgbaImage::from_pixel(cell * columns, cell * rows, TRANSPARENT);
    let scale = (cell / (GLYPH_HEIGHT + 1)).max(1);
    let pad_x = cell.saturating_sub(GLYPH_WIDTH * scale) / 2;
    let pad_y = cell.saturating_sub(GLYPH_HEIGHT * scale) / 2;

    for (index, glyph) in GLYPHS.iter().enumerate() {
        let index = index as u32;
        let origin_x = (index % columns) * cell + pad_x;
        let origin_y = (index / columns) * cell + pad_y;
        for (row, bits) in glyph.iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (0x10 >> column) != 0 {
                    fill_rect(
                        &mut image,
                        origin_x + column * scale,
                        origin_y + row as u32 * scale,
                        scale,
                        scale,
                        Rgba([255, 255, 255, 255]),
                    );
                }
            }
        }
    }
    image
}

//! Maps the fixed internal resolution onto whatever size the window has.

use crate::engine::render2d::rect::Rect;
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderScaling {
    pub window_width: u32,
    pub window_height: u32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Letterbox offsets in window pixels.
    pub offset_x: f32,
    pub offset_y: f32,
}

impl RenderScaling {
    pub fn new(width: u32, height: u32, keep_aspect: bool) -> Self {
        let identity = Self {
            window_width: width,
            window_height: height,
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        if width as f32 == INTERNAL_RES_X && height as f32 == INTERNAL_RES_Y {
            return identity;
        }

        let aspect = INTERNAL_RES_X / INTERNAL_RES_Y;
        let (w, h) = (width as f32, height as f32);
        let (mut aspect_width, mut aspect_height) = (w, h);
        let (mut offset_x, mut offset_y) = (0.0, 0.0);

        if keep_aspect {
            if INTERNAL_RES_X >= INTERNAL_RES_Y {
                aspect_height = aspect_width / aspect;
                offset_y = (h - aspect_height) / 2.0;
                if aspect_height > h {
                    aspect_height = h;
                    aspect_width = aspect_height * aspect;
                    offset_x = (w - aspect_width) / 2.0;
                    offset_y = 0.0;
                }
            } else {
                aspect_width = aspect_height * aspect;
                offset_x = (w - aspect_width) / 2.0;
                if aspect_width > w {
                    aspect_width = w;
                    aspect_height = aspect_width / aspect;
                    offset_x = 0.0;
                    offset_y = (h - aspect_height) / 2.0;
                }
            }
        }

        Self {
            scale_x: aspect_width / INTERNAL_RES_X,
            scale_y: aspect_height / INTERNAL_RES_Y,
            offset_x,
            offset_y,
            ..identity
        }
    }

    /// Viewport in window pixels as `(x, y, width, height)` with a top-left origin.
    pub fn viewport(&self) -> (f32, f32, f32, f32) {
        (
            self.offset_x,
            self.offset_y,
            INTERNAL_RES_X * self.scale_x,
            INTERNAL_RES_Y * self.scale_y,
        )
    }

    /// Window cursor position (Y down) to internal coordinates (Y up).
    pub fn to_internal(&self, window_x: f64, window_y: f64) -> (f32, f32) {
        let x = (window_x as f32 - self.offset_x) / self.scale_x;
        let y = (window_y as f32 - self.offset_y) / self.scale_y;
        (x, INTERNAL_RES_Y - y - 1.0)
    }

    /// Internal-space rectangle to a scissor rectangle `(x, y, width, height)` in window
    /// pixels, clamped to the window. `None` when nothing of it is visible.
    pub fn scissor(&self, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
        let left = (self.offset_x + rect.left * self.scale_x).max(0.0);
        let right = (self.offset_x + rect.right * self.scale_x).min(self.window_width as f32);
        let top = (self.offset_y + (INTERNAL_RES_Y - rect.top) * self.scale_y).max(0.0);
        let bottom = (self.offset_y + (INTERNAL_RES_Y - rect.bottom) * self.scale_y).min(self.window_height as f32);
        if right <= left || bottom <= top {
            return None;
        }
        let x = left.round() as u32;
        let y = top.round() as u32;
        let width = (right.round() as u32).saturating_sub(x);
        let height = (bottom.round() as u32).saturating_sub(y);
        if width == 0 || height == 0 {
            return None;
        }
        Some((x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn internal_resolution_is_identity() {
        let scaling = RenderScaling::new(640, 480, true);
        assert_eq!(scaling.scale_x, 1.0);
        assert_eq!(scaling.offset_x, 0.0);
        assert_eq!(scaling.viewport(), (0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn same_aspect_scales_uniformly() {
        let scaling = RenderScaling::new(1024, 768, true);
        assert_relative_eq!(scaling.scale_x, 1.6);
        assert_relative_eq!(scaling.scale_y, 1.6);
        assert_eq!((scaling.offset_x, scaling.offset_y), (0.0, 0.0));
    }

    #[test]
    fn wide_window_is_pillarboxed() {
        let scaling = RenderScaling::new(1280, 480, true);
        assert_relative_eq!(scaling.scale_x, 1.0);
        assert_relative_eq!(scaling.scale_y, 1.0);
        assert_relative_eq!(scaling.offset_x, 320.0);
        assert_relative_eq!(scaling.offset_y, 0.0);
    }

    #[test]
    fn tall_window_is_letterboxed() {
        let scaling = RenderScaling::new(640, 960, true);
        assert_relative_eq!(scaling.scale_y, 1.0);
        assert_relative_eq!(scaling.offset_y, 240.0);
    }

    #[test]
    fn stretch_without_aspect() {
        let scaling = RenderScaling::new(1280, 480, false);
        assert_relative_eq!(scaling.scale_x, 2.0);
        assert_relative_eq!(scaling.scale_y, 1.0);
    }

    #[test]
    fn cursor_maps_to_flipped_internal_space() {
        let scaling = RenderScaling::new(1280, 960, true);
        let (x, y) = scaling.to_internal(640.0, 0.0);
        assert_relative_eq!(x, 320.0);
        assert_relative_eq!(y, 479.0);
    }

    #[test]
    fn scissor_follows_letterbox() {
        let scaling = RenderScaling::new(1280, 480, true);
        let scissor = scaling.scissor(&Rect::new(160.0, 120.0, 480.0, 360.0)).unwrap();
        assert_eq!(scissor, (480, 120, 320, 240));
        assert!(scaling.scissor(&Rect::new(1000.0, 0.0, 1100.0, 10.0)).is_none());
    }
}

//! Axis-aligned rectangles in internal screen space (origin bottom-left, Y up).

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Rect {
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self { left, bottom, right, top }
    }

    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) * 0.5, (self.bottom + self.top) * 0.5)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.bottom + dy, self.right + dx, self.top + dy)
    }

    /// Inclusive point test.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }

    /// Shrinks (or grows) the rectangle about its centre to `percent` of its size.
    pub fn scaled_percent(&self, percent: f32) -> Self {
        let factor = percent / 100.0;
        let (cx, cy) = self.center();
        let half_w = self.width() * factor * 0.5;
        let half_h = self.height() * factor * 0.5;
        Self::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    /// Strict overlap; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.bottom < other.top
            && other.bottom < self.top
    }

    /// True iff both rectangles, scaled to `percent` of their size, intersect.
    pub fn overlaps_with_tolerance(&self, other: &Rect, percent: f32) -> bool {
        self.scaled_percent(percent).intersects(&other.scaled_percent(percent))
    }
}

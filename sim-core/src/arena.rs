use glam::Vec2;

/// Fixed rectangular arena with its origin at the top-left corner.
///
/// Positions live in `[0, width] × [0, height]`; `y` grows downward, as on
/// a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// X coordinate of the vertical line splitting the arena in half.
    pub fn midline_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Returns `true` if a circle of `radius` at `pos` lies fully inside.
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= radius
            && pos.x <= self.width - radius
            && pos.y >= radius
            && pos.y <= self.height - radius
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(500.0, 500.0)
    }
}

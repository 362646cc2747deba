/// Padding added once to the right and bottom of the widget bounds.
pub const CANVAS_MARGIN: i64 = 20;

/// Running bottom-right corner of every extracted widget box.
///
/// The extent only grows: folding in a box can raise either maximum but never lower it. The
/// origin is always part of the canvas, so a display whose widgets all sit at negative
/// coordinates still yields a `CANVAS_MARGIN`-sized canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasExtent {
    max_x: i64,
    max_y: i64,
}

impl CanvasExtent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(&mut self, x: i64, y: i64, width: i64, height: i64) {
        self.max_x = self.max_x.max(x.saturating_add(width));
        self.max_y = self.max_y.max(y.saturating_add(height));
    }

    pub fn max_x(&self) -> i64 {
        self.max_x
    }

    pub fn max_y(&self) -> i64 {
        self.max_y
    }

    /// Canvas width including the margin.
    pub fn width(&self) -> i64 {
        self.max_x.saturating_add(CANVAS_MARGIN)
    }

    /// Canvas height including the margin.
    pub fn height(&self) -> i64 {
        self.max_y.saturating_add(CANVAS_MARGIN)
    }
}

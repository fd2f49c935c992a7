use serde::{Deserialize, Serialize};

/// RGB colour triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// How a logical pixel is rendered on the physical canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceStyle {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub spacing: u32,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            pixel_width: 6,
            pixel_height: 9,
            spacing: 1,
            background: Rgb::new(164, 197, 63),
            foreground: Rgb::new(59, 75, 20),
        }
    }
}

/// Fixed size and style of a pixel surface, decided once at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Width in logical pixels
    pub width: i32,
    /// Height in logical pixels
    pub height: i32,
    pub style: SurfaceStyle,
}

impl SurfaceConfig {
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Axis-aligned rectangle in logical pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Overlap of two rectangles, `None` when they do not touch
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = Rect::new(x, y, self.right().min(other.right()) - x, self.bottom().min(other.bottom()) - y);
        (!r.is_empty()).then_some(r)
    }
}

/// A pixel-addressable drawing surface.
///
/// Implementations clip writes that fall outside `config().bounds()`.
pub trait Surface {
    fn with_config(config: SurfaceConfig) -> Self
    where
        Self: Sized;

    fn config(&self) -> &SurfaceConfig;

    /// Light a single logical pixel
    fn fill_pixel(&mut self, x: i32, y: i32);

    /// Reset a rectangle of logical pixels to the background
    fn clear_rect(&mut self, rect: Rect);
}

/// One primitive issued against a [`RecordingSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOp {
    Fill { x: i32, y: i32 },
    Clear(Rect),
}

/// Surface that only records what was asked of it
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    config: SurfaceConfig,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn fills(&self) -> Vec<(i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Fill { x, y } => Some((*x, *y)),
                SurfaceOp::Clear(_) => None,
            })
            .collect()
    }

    pub fn clears(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Clear(r) => Some(*r),
                SurfaceOp::Fill { .. } => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn with_config(config: SurfaceConfig) -> Self {
        Self { config, ops: Vec::new() }
    }

    fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    fn fill_pixel(&mut self, x: i32, y: i32) {
        if self.config.bounds().contains(x, y) {
            self.ops.push(SurfaceOp::Fill { x, y });
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        if let Some(r) = rect.intersect(&self.config.bounds()) {
            self.ops.push(SurfaceOp::Clear(r));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: i32, height: i32) -> SurfaceConfig {
        SurfaceConfig { width, height, style: SurfaceStyle::default() }
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(&Rect::new(8, -2, 5, 4)), Some(Rect::new(8, 0, 2, 2)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 5, 5)), None);
        assert_eq!(a.intersect(&Rect::new(-3, 4, 3, 1)), None);
    }

    #[test]
    fn test_recording_surface_clips() {
        let mut surface = RecordingSurface::with_config(config(4, 4));
        surface.fill_pixel(1, 1);
        surface.fill_pixel(4, 0);
        surface.fill_pixel(-1, 2);
        surface.clear_rect(Rect::new(2, 2, 10, 10));
        surface.clear_rect(Rect::new(5, 5, 1, 1));

        assert_eq!(
            surface.ops(),
            &[SurfaceOp::Fill { x: 1, y: 1 }, SurfaceOp::Clear(Rect::new(2, 2, 2, 2))]
        );
    }

    #[test]
    fn test_style_defaults_from_partial_json() {
        let style: SurfaceStyle = serde_json::from_str(r#"{"spacing": 2}"#).unwrap();
        assert_eq!(style.spacing, 2);
        assert_eq!(style.pixel_width, 6);
        assert_eq!(style.foreground, Rgb::new(59, 75, 20));
    }
}

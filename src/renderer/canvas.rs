//! Software framebuffer surface
//!
//! Each logical pixel is a `pixel_width x pixel_height` block on the
//! canvas, with `spacing` canvas pixels between neighbours and a one
//! pixel margin on the left. Alongside the RGB buffer the canvas keeps
//! the logical lit map, which is what terminal views and tests read.

use super::surface::{Rect, Rgb, Surface, SurfaceConfig};

#[derive(Debug, Clone)]
pub struct PixelCanvas {
    config: SurfaceConfig,
    lit: Vec<bool>,
    pixels: Vec<Rgb>,
    canvas_width: u32,
    canvas_height: u32,
}

impl PixelCanvas {
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Canvas pixels in row-major order
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.lit[i])
    }

    pub fn lit_count(&self) -> usize {
        self.lit.iter().filter(|&&l| l).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.config
            .bounds()
            .contains(x, y)
            .then(|| (y * self.config.width + x) as usize)
    }

    fn step(&self) -> (u32, u32) {
        let style = &self.config.style;
        (style.pixel_width + style.spacing, style.pixel_height + style.spacing)
    }

    fn paint(&mut self, x0: u32, y0: u32, w: u32, h: u32, color: Rgb) {
        let x1 = (x0 + w).min(self.canvas_width);
        let y1 = (y0 + h).min(self.canvas_height);
        for y in y0..y1 {
            let row = (y * self.canvas_width) as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    /// Encode the canvas as a PNG image
    #[cfg(feature = "png")]
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.canvas_width, self.canvas_height, |x, y| {
            let c = self.pixels[(y * self.canvas_width + x) as usize];
            image::Rgb([c.r, c.g, c.b])
        })
    }
}

impl Surface for PixelCanvas {
    fn with_config(config: SurfaceConfig) -> Self {
        let (sx, sy) = (
            config.style.pixel_width + config.style.spacing,
            config.style.pixel_height + config.style.spacing,
        );
        let canvas_width = config.width.max(0) as u32 * sx + 1;
        let canvas_height = config.height.max(0) as u32 * sy;
        Self {
            lit: vec![false; (config.width.max(0) * config.height.max(0)) as usize],
            pixels: vec![config.style.background; (canvas_width * canvas_height) as usize],
            canvas_width,
            canvas_height,
            config,
        }
    }

    fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    fn fill_pixel(&mut self, x: i32, y: i32) {
        let Some(i) = self.index(x, y) else { return };
        self.lit[i] = true;
        let (sx, sy) = self.step();
        let style = self.config.style;
        self.paint(x as u32 * sx + 1, y as u32 * sy, style.pixel_width, style.pixel_height, style.foreground);
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some(r) = rect.intersect(&self.config.bounds()) else { return };
        for y in r.y..r.bottom() {
            let row = (y * self.config.width) as usize;
            self.lit[row + r.x as usize..row + r.right() as usize].fill(false);
        }
        let (sx, sy) = self.step();
        let background = self.config.style.background;
        self.paint(r.x as u32 * sx + 1, r.y as u32 * sy, r.width as u32 * sx, r.height as u32 * sy, background);
    }
}

use tracing::trace;

use crate::error::{Error, Result};
use super::field::FieldGeometry;
use super::glyphs;
use super::panel::PanelGeometry;
use super::sprite::{Shape, Sprite};
use super::surface::{Rect, Surface, SurfaceConfig, SurfaceStyle};

/// Default height of the HUD strip above the field, in pixels
pub const DEFAULT_PANEL_HEIGHT: i32 = 8;

/// Field pixels per board cell, on each axis
pub const BLOCK_PIXELS: i32 = 2;

/// Geometry of every coordinate space, fixed at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub surface: SurfaceConfig,
    pub field: FieldGeometry,
    pub panel: PanelGeometry,
    pub panel_height: i32,
}

impl Layout {
    /// Size the surface for a board of `field_width x field_height` cells.
    ///
    /// The field sits inside a one pixel border below the panel strip.
    pub fn compute(field_width: u16, field_height: u16, panel_height: i32, style: SurfaceStyle) -> Result<Self> {
        if field_width == 0 || field_height == 0 {
            return Err(Error::InvalidFieldSize { width: field_width, height: field_height });
        }
        let x_max = field_width as i32 * BLOCK_PIXELS;
        let y_max = field_height as i32 * BLOCK_PIXELS;
        let width = x_max + 2;
        let panel = PanelGeometry::fit(width, Shape::DIGIT);

        let min = panel.min_strip_height();
        let height = Some(panel_height)
            .filter(|&h| h >= min)
            .and_then(|h| h.checked_add(y_max + 2))
            .ok_or(Error::InvalidPanelHeight { height: panel_height, min })?;

        Ok(Self {
            surface: SurfaceConfig { width, height, style },
            field: FieldGeometry {
                x_max,
                y_max,
                x_offset: 1,
                y_offset: panel_height + 1,
            },
            panel,
            panel_height,
        })
    }
}

/// Redraw controller over one surface.
///
/// Every sprite draw first clears the sprite's old footprint, including
/// any part of it that wrapped to the opposite side of the field.
pub struct Scene<S> {
    surface: S,
    layout: Layout,
}

impl<S: Surface> Scene<S> {
    /// Create the surface for a board and paint the static frame
    pub fn setup(field_width: u16, field_height: u16, panel_height: i32, style: SurfaceStyle) -> Result<Self> {
        let layout = Layout::compute(field_width, field_height, panel_height, style)?;
        let mut scene = Self {
            surface: S::with_config(layout.surface),
            layout,
        };
        scene.draw_frame();
        Ok(scene)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn field(&self) -> &FieldGeometry {
        &self.layout.field
    }

    pub fn panel(&self) -> &PanelGeometry {
        &self.layout.panel
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn draw_frame(&mut self) {
        let Layout { surface, panel_height, .. } = self.layout;
        let border = Rect::new(0, panel_height, surface.width, surface.height - panel_height);
        for x in border.x..border.right() {
            self.surface.fill_pixel(x, border.y);
            self.surface.fill_pixel(x, border.bottom() - 1);
        }
        for y in border.y..border.bottom() {
            self.surface.fill_pixel(border.x, y);
            self.surface.fill_pixel(border.right() - 1, y);
        }
        for x in 0..surface.width {
            self.surface.fill_pixel(x, panel_height - 2);
        }
    }

    // ---- Field ----

    /// Clear a field block and, when it wraps, its mirrored pieces
    pub fn clear_field_footprint(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let field = self.layout.field;
        let footprint = field.footprint(x, y, width, height);
        if footprint.wraps() {
            trace!(x, y, width, height, "clearing wrapped footprint");
        }
        for rect in footprint.rects() {
            if let Some(r) = field.to_surface(rect) {
                self.surface.clear_rect(r);
            }
        }
    }

    /// Replace whatever was at `(x, y)` with `sprite`. A blank sprite only clears.
    pub fn field_sprite(&mut self, sprite: Sprite, x: i32, y: i32) {
        self.clear_field_footprint(x, y, sprite.width() as i32, sprite.height() as i32);
        let field = self.layout.field;
        for (dx, dy) in sprite.pixels() {
            let (px, py) = field.translate(x + dx, y + dy);
            self.surface.fill_pixel(px, py);
        }
    }

    pub fn field_sprite_2x4(&mut self, bits: u8, x: i32, y: i32) -> Result<()> {
        self.field_sprite(Sprite::with_shape(bits as u32, Shape::VERTICAL)?, x, y);
        Ok(())
    }

    pub fn field_sprite_4x2(&mut self, bits: u8, x: i32, y: i32) -> Result<()> {
        self.field_sprite(Sprite::with_shape(bits as u32, Shape::HORIZONTAL)?, x, y);
        Ok(())
    }

    pub fn field_sprite_3x3(&mut self, bits: u16, x: i32, y: i32) -> Result<()> {
        self.field_sprite(Sprite::with_shape(bits as u32, Shape::ITEM)?, x, y);
        Ok(())
    }

    pub fn field_sprite_8x4(&mut self, bits: u32, x: i32, y: i32) -> Result<()> {
        self.field_sprite(Sprite::with_shape(bits, Shape::GLYPH)?, x, y);
        Ok(())
    }

    /// Wipe the whole field interior, leaving frame and panel alone
    pub fn clear_field(&mut self) {
        self.surface.clear_rect(self.layout.field.bounds());
    }

    // ---- Panel ----

    /// Draw into a panel block, replacing its previous content
    pub fn panel_sprite(&mut self, sprite: Sprite, index: i32) -> Result<()> {
        let (x, y) = self.layout.panel.block_to_pixel(index)?;
        self.panel_sprite_at_pixel(sprite, x, y);
        Ok(())
    }

    pub fn panel_sprite_3x5(&mut self, bits: u16, index: i32) -> Result<()> {
        self.panel_sprite(Sprite::with_shape(bits as u32, Shape::DIGIT)?, index)
    }

    /// Draw at a free pixel offset in the panel; negative `x` counts from the right edge
    pub fn panel_sprite_at(&mut self, sprite: Sprite, x: i32, y: i32) {
        let (x, y) = self.layout.panel.offset_to_pixel(x, y);
        self.panel_sprite_at_pixel(sprite, x, y);
    }

    pub fn panel_sprite_8x4_at(&mut self, bits: u32, x: i32, y: i32) -> Result<()> {
        self.panel_sprite_at(Sprite::with_shape(bits, Shape::GLYPH)?, x, y);
        Ok(())
    }

    pub fn clear_panel_block(&mut self, index: i32) -> Result<()> {
        let (x, y) = self.layout.panel.block_to_pixel(index)?;
        let block = self.layout.panel.block;
        self.surface.clear_rect(Rect::new(x, y, block.width as i32, block.height as i32));
        Ok(())
    }

    fn panel_sprite_at_pixel(&mut self, sprite: Sprite, x: i32, y: i32) {
        self.surface.clear_rect(Rect::new(x, y, sprite.width() as i32, sprite.height() as i32));
        for (dx, dy) in sprite.pixels() {
            self.surface.fill_pixel(x + dx, y + dy);
        }
    }

    /// Render the lowest `digits` decimal digits of `n` into consecutive blocks from `index`
    pub fn draw_number(&mut self, n: u32, digits: usize, index: i32) -> Result<()> {
        for (k, d) in glyphs::decimal_digits(n, digits).into_iter().enumerate() {
            self.panel_sprite(glyphs::digit(d)?, index + k as i32)?;
        }
        Ok(())
    }

    pub fn clear_number(&mut self, digits: usize, index: i32) -> Result<()> {
        for k in 0..digits {
            self.clear_panel_block(index + k as i32)?;
        }
        Ok(())
    }
}

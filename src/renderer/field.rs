//! Field coordinate space
//!
//! The field is a torus of `x_max * y_max` pixels (two per board cell on
//! each axis). Field coordinates are normalized into the half-open range
//! `[0, max)` on each axis, then translated by the field offset into
//! surface space.
//!
//! A footprint that runs past the far edge is visible on both sides of
//! the field, so clearing it takes one rectangle per visible piece:
//! the primary one at the normalized origin plus a mirror shifted by
//! `-x_max` and/or `-y_max` for every axis it crosses.

use super::surface::Rect;

/// Wrap a single axis coordinate into `[0, max)`.
///
/// Callers only ever step one position past an edge, but any value is
/// accepted. `max` must be positive.
pub fn reflect(n: i32, max: i32) -> i32 {
    n.rem_euclid(max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGeometry {
    pub x_max: i32,
    pub y_max: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl FieldGeometry {
    pub fn reflect(&self, x: i32, y: i32) -> (i32, i32) {
        (reflect(x, self.x_max), reflect(y, self.y_max))
    }

    /// Field coordinates to surface coordinates
    pub fn translate(&self, x: i32, y: i32) -> (i32, i32) {
        let (x, y) = self.reflect(x, y);
        (x + self.x_offset, y + self.y_offset)
    }

    /// The field interior in surface coordinates
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x_offset, self.y_offset, self.x_max, self.y_max)
    }

    /// Every field-space rectangle covered by a `width x height` block at `(x, y)`
    pub fn footprint(&self, x: i32, y: i32, width: i32, height: i32) -> Footprint {
        let (rx, ry) = self.reflect(x, y);
        let primary = Rect::new(rx, ry, width, height);
        let crosses_x = primary.right() > self.x_max;
        let crosses_y = primary.bottom() > self.y_max;

        Footprint {
            primary,
            x_mirror: crosses_x.then(|| primary.translate(-self.x_max, 0)),
            y_mirror: crosses_y.then(|| primary.translate(0, -self.y_max)),
            corner: (crosses_x && crosses_y).then(|| primary.translate(-self.x_max, -self.y_max)),
        }
    }

    /// A field-space rectangle in surface coordinates, clipped to the field interior
    pub fn to_surface(&self, rect: Rect) -> Option<Rect> {
        rect.translate(self.x_offset, self.y_offset)
            .intersect(&self.bounds())
    }
}

/// The rectangles a sprite block occupies on the torus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub primary: Rect,
    pub x_mirror: Option<Rect>,
    pub y_mirror: Option<Rect>,
    pub corner: Option<Rect>,
}

impl Footprint {
    pub fn wraps(&self) -> bool {
        self.x_mirror.is_some() || self.y_mirror.is_some()
    }

    pub fn rects(&self) -> impl Iterator<Item = Rect> {
        std::iter::once(self.primary)
            .chain(self.x_mirror)
            .chain(self.y_mirror)
            .chain(self.corner)
    }
}

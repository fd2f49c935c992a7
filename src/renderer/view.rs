//! Terminal view of a [`PixelCanvas`], two logical rows per cell

use ratatui::buffer::Buffer;
use ratatui::layout::Rect as Area;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use super::canvas::PixelCanvas;
use super::surface::{Rgb, Surface};

pub struct CanvasView<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Area, buf: &mut Buffer) {
        let config = self.canvas.config();
        let style = Style::default()
            .fg(color(config.style.foreground))
            .bg(color(config.style.background));
        let rows = area.height.min(((config.height + 1) / 2) as u16);
        let cols = area.width.min(config.width as u16);

        for row in 0..rows {
            let y = row as i32 * 2;
            for col in 0..cols {
                let x = col as i32;
                let symbol = match (self.canvas.is_lit(x, y), self.canvas.is_lit(x, y + 1)) {
                    (true, true) => "█",
                    (true, false) => "▀",
                    (false, true) => "▄",
                    (false, false) => " ",
                };
                buf[(area.x + col, area.y + row)].set_symbol(symbol).set_style(style);
            }
        }
    }
}

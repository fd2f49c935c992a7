pub mod surface;
pub mod sprite;
pub mod field;
pub mod panel;
pub mod glyphs;
pub mod scene;
pub mod canvas;
#[cfg(feature = "tui")]
pub mod view;

pub use surface::{Rect, Rgb, Surface, SurfaceConfig, SurfaceStyle, RecordingSurface, SurfaceOp};
pub use sprite::{Sprite, Shape, Pixels, decode};
pub use field::{FieldGeometry, Footprint, reflect};
pub use panel::PanelGeometry;
pub use scene::{Scene, Layout, DEFAULT_PANEL_HEIGHT, BLOCK_PIXELS};
pub use canvas::PixelCanvas;
#[cfg(feature = "tui")]
pub use view::CanvasView;

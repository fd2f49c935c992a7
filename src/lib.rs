//! Snake Client
//!
//! Presentation layer for a multiplayer wrap-around snake game: renders
//! bit-packed sprites onto a toroidal field and a HUD panel, and speaks
//! the tagged binary frame protocol over a WebSocket.

pub mod codec;
pub mod error;
pub mod protocol;
pub mod renderer;
pub mod client;

pub use error::{Error, Result};
pub use codec::{Command, FrameTag, InboundFrame, ProtocolVersion};
pub use protocol::{
    Connection, ConnectionState, Dispatch,
    Transport, TransportEvent, ChannelTransport, WsBridge,
};
pub use renderer::{
    Scene, Layout, Surface, SurfaceStyle, Sprite, Shape,
    FieldGeometry, PanelGeometry, PixelCanvas, RecordingSurface,
};
pub use client::{
    ClientConfig, Session, SessionInputs, SessionEvent,
    Engine, HeadlessEngine, Ticker, map_input,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid sprite geometry: {width}x{height}")]
    InvalidSpriteGeometry { width: u8, height: u8 },

    #[error("invalid field size: {width}x{height} cells")]
    InvalidFieldSize { width: u16, height: u16 },

    #[error("panel height {height} out of range (minimum {min})")]
    InvalidPanelHeight { height: i32, min: i32 },

    #[error("panel block {index} out of range (panel is {width} blocks wide)")]
    PanelIndexOutOfRange { index: i32, width: i32 },

    #[error("empty command frame")]
    EmptyCommand,

    #[error("invalid command byte: {0}")]
    InvalidCommand(u8),

    #[error("connection is {0:?}, not open")]
    NotOpen(crate::protocol::ConnectionState),

    #[error("transport closed")]
    TransportClosed,

    #[error("websocket error: {0}")]
    WebSocket(String),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Self {
        Error::WebSocket(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

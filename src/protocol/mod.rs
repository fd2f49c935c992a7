pub mod transport;
pub mod connection;

pub use transport::{Transport, TransportEvent, ChannelTransport, WsBridge};
pub use connection::{Connection, ConnectionState, ConnectionStats, Dispatch};

use std::thread::JoinHandle;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::Message;

use crate::error::{Error, Result};

/// How long the bridge blocks on a read before servicing outbound frames
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outbound half of a message-oriented duplex stream.
///
/// One `send` is one transport message; there is no length prefix.
pub trait Transport {
    fn send(&mut self, frame: Bytes) -> Result<()>;
}

/// What the inbound half of a transport reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Message(Bytes),
    Closed,
    Failed(String),
}

/// Transport that queues frames on a tokio channel
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: UnboundedSender<Bytes>,
}

impl ChannelTransport {
    pub fn new(tx: UnboundedSender<Bytes>) -> Self {
        Self { tx }
    }

    /// A transport and the receiver its frames arrive on
    pub fn pair() -> (Self, UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, frame: Bytes) -> Result<()> {
        self.tx.send(frame).map_err(|_| Error::TransportClosed)
    }
}

/// A WebSocket client running on its own thread.
///
/// The thread owns the socket: it writes frames queued through
/// `transport` and reports everything it reads on `events`.
pub struct WsBridge {
    pub transport: ChannelTransport,
    pub events: UnboundedReceiver<TransportEvent>,
    pub handle: JoinHandle<()>,
}

impl WsBridge {
    pub fn spawn(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let (transport, outbound) = ChannelTransport::pair();
        let (events_tx, events) = mpsc::unbounded_channel();
        let handle = std::thread::Builder::new()
            .name("ws-bridge".into())
            .spawn(move || run_bridge(&url, outbound, events_tx))?;
        Ok(Self { transport, events, handle })
    }
}

fn run_bridge(url: &str, mut outbound: UnboundedReceiver<Bytes>, events: UnboundedSender<TransportEvent>) {
    let mut socket = match tungstenite::connect(url) {
        Ok((socket, _response)) => socket,
        Err(e) => {
            let _ = events.send(TransportEvent::Failed(e.to_string()));
            return;
        }
    };
    if let MaybeTlsStream::Plain(stream) = socket.get_mut() {
        if let Err(e) = stream.set_read_timeout(Some(POLL_INTERVAL)) {
            let _ = events.send(TransportEvent::Failed(e.to_string()));
            return;
        }
    }
    info!(url, "websocket connected");
    let _ = events.send(TransportEvent::Opened);

    loop {
        loop {
            match outbound.try_recv() {
                Ok(frame) => {
                    if let Err(e) = socket.send(Message::binary(frame)) {
                        let _ = events.send(TransportEvent::Failed(e.to_string()));
                        return;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("session dropped, closing websocket");
                    let _ = socket.close(None);
                    let _ = socket.flush();
                    let _ = events.send(TransportEvent::Closed);
                    return;
                }
            }
        }

        match socket.read() {
            Ok(Message::Binary(data)) => {
                if events.send(TransportEvent::Message(data)).is_err() {
                    let _ = socket.close(None);
                    return;
                }
            }
            Ok(Message::Close(frame)) => {
                debug!(?frame, "websocket closed by peer");
                let _ = events.send(TransportEvent::Closed);
                return;
            }
            // Text is not part of the protocol; ping replies are queued by tungstenite
            Ok(_) => {}
            Err(tungstenite::Error::Io(e))
                if matches!(e.kind(), std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut) => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                let _ = events.send(TransportEvent::Closed);
                return;
            }
            Err(e) => {
                let _ = events.send(TransportEvent::Failed(e.to_string()));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_transport_delivers_frames() {
        let (mut transport, mut rx) = ChannelTransport::pair();
        transport.send(Bytes::from_static(&[1, 2])).unwrap();
        transport.send(Bytes::from_static(&[3])).unwrap();
        assert_eq!(rx.try_recv().unwrap(), &[1u8, 2][..]);
        assert_eq!(rx.try_recv().unwrap(), &[3u8][..]);
    }

    #[test]
    fn test_channel_transport_reports_closed_peer() {
        let (mut transport, rx) = ChannelTransport::pair();
        drop(rx);
        assert!(matches!(transport.send(Bytes::new()), Err(Error::TransportClosed)));
    }

    #[test]
    fn test_bridge_reports_failed_handshake() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
        });

        let mut bridge = WsBridge::spawn(format!("ws://{addr}/game_data")).unwrap();
        bridge.handle.join().unwrap();
        server.join().unwrap();
        assert!(matches!(bridge.events.try_recv(), Ok(TransportEvent::Failed(_))));
    }

    #[test]
    fn test_bridge_round_trip() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut ws = tungstenite::accept(stream).unwrap();
            ws.send(Message::binary(vec![3u8, 7])).unwrap();
            let reply = ws.read().unwrap();
            ws.close(None).unwrap();
            while ws.read().is_ok() {}
            reply
        });

        let mut bridge = WsBridge::spawn(format!("ws://{addr}/game_data")).unwrap();
        assert_eq!(bridge.events.blocking_recv(), Some(TransportEvent::Opened));
        assert_eq!(
            bridge.events.blocking_recv(),
            Some(TransportEvent::Message(Bytes::from_static(&[3, 7])))
        );
        bridge.transport.send(Bytes::from_static(&[5, 7])).unwrap();

        assert_eq!(server.join().unwrap(), Message::binary(vec![5u8, 7]));
        assert_eq!(bridge.events.blocking_recv(), Some(TransportEvent::Closed));
    }
}

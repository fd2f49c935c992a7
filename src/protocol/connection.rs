use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::codec::{Command, InboundFrame, ProtocolVersion};
use crate::error::{Error, Result};
use crate::protocol::transport::Transport;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    /// Transport closed; terminal, no reconnection
    Closed,
    /// Transport failed; terminal for this session
    Error,
}

impl ConnectionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Error)
    }
}

/// An inbound frame the connection hands on to the simulation side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    State(Bytes),
    Identity(Bytes),
}

/// Per-connection counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStats {
    pub frames_received: u64,
    pub unknown_frames: u64,
    pub probes_echoed: u64,
    pub commands_sent: u64,
    pub commands_dropped: u64,
}

/// Client side of the game connection.
///
/// Owns the outbound transport and tracks the lifecycle; keepalive probes
/// are answered here and never reach the simulation.
pub struct Connection<T> {
    transport: T,
    state: ConnectionState,
    version: ProtocolVersion,
    stats: ConnectionStats,
}

impl<T: Transport> Connection<T> {
    pub fn new(transport: T, version: ProtocolVersion) -> Self {
        Self {
            transport,
            state: ConnectionState::Connecting,
            version,
            stats: ConnectionStats::default(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn stats(&self) -> ConnectionStats {
        self.stats
    }

    fn transition(&mut self, to: ConnectionState) {
        if self.state != to {
            info!(from = ?self.state, ?to, "connection state changed");
            self.state = to;
        }
    }

    /// Transport handshake completed
    pub fn on_open(&mut self) {
        if self.state == ConnectionState::Connecting {
            self.transition(ConnectionState::Open);
        }
    }

    pub fn on_close(&mut self) {
        if !self.state.is_terminal() {
            self.transition(ConnectionState::Closed);
        }
    }

    pub fn on_error(&mut self, reason: &str) {
        if !self.state.is_terminal() {
            warn!(reason, "transport failed");
            self.transition(ConnectionState::Error);
        }
    }

    /// Route one inbound frame by its tag
    pub fn on_message(&mut self, frame: Bytes) -> Option<Dispatch> {
        if !self.is_open() {
            debug!(state = ?self.state, len = frame.len(), "frame outside open connection ignored");
            return None;
        }
        self.stats.frames_received += 1;

        match InboundFrame::parse(frame) {
            InboundFrame::StateUpdate(payload) => {
                debug!(len = payload.len(), "state update");
                Some(Dispatch::State(payload))
            }
            InboundFrame::IdentityAssign(payload) => {
                debug!(len = payload.len(), "identity assigned");
                Some(Dispatch::Identity(payload))
            }
            InboundFrame::KeepaliveProbe(payload) => {
                if self.try_send(&Command::KeepaliveEcho(payload)).is_ok() {
                    self.stats.probes_echoed += 1;
                }
                None
            }
            InboundFrame::Unknown { tag } => {
                warn!(tag, "unknown frame tag ignored");
                self.stats.unknown_frames += 1;
                None
            }
            InboundFrame::Empty => None,
        }
    }

    /// Send a command if the connection is open, otherwise drop it.
    ///
    /// Returns whether the command went out.
    pub fn send_command(&mut self, command: Command) -> bool {
        match self.try_send(&command) {
            Ok(()) => {
                self.stats.commands_sent += 1;
                true
            }
            Err(e) => {
                debug!(?command, error = %e, "command dropped");
                self.stats.commands_dropped += 1;
                false
            }
        }
    }

    fn try_send(&mut self, command: &Command) -> Result<()> {
        if !self.is_open() {
            return Err(Error::NotOpen(self.state));
        }
        if let Err(e) = self.transport.send(command.encode(self.version)) {
            self.on_error(&e.to_string());
            return Err(e);
        }
        Ok(())
    }
}

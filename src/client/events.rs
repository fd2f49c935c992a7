use crate::codec::Command;
use crate::protocol::ConnectionState;

/// Things a session reports while it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Transport handshake completed
    Connected,

    /// Identity frame accepted by the engine
    IdentityAssigned,

    /// The engine rejected a payload or failed to draw; the last frame stays
    EngineFailed {
        reason: String,
    },

    /// Command not sent because the connection was not open
    CommandDropped {
        command: Command,
    },

    /// Connection reached a terminal state
    Disconnected {
        state: ConnectionState,
    },
}

/// Event handler trait
pub trait EventHandler {
    fn on_event(&mut self, event: SessionEvent);
}

/// Simple event collector
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<SessionEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventHandler for EventCollector {
    fn on_event(&mut self, event: SessionEvent) {
        self.events.push(event);
    }
}

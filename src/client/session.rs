use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, trace, warn};

use crate::client::engine::Engine;
use crate::client::events::{EventCollector, EventHandler, SessionEvent};
use crate::codec::Command;
use crate::error::Error;
use crate::protocol::{Connection, ConnectionState, Dispatch, Transport, TransportEvent};
use crate::renderer::{Scene, Surface};

type FrameHook<S> = Box<dyn FnMut(&S) + Send>;

/// Everything a running session listens to
pub struct SessionInputs {
    pub events: UnboundedReceiver<TransportEvent>,
    pub commands: UnboundedReceiver<Command>,
    pub ticks: Option<UnboundedReceiver<u64>>,
}

/// Active game session.
///
/// Owns the connection, the scene and the engine. Every handler runs to
/// completion, so no redraw is ever observed half done.
pub struct Session<T, S, E> {
    connection: Connection<T>,
    scene: Scene<S>,
    engine: E,
    events: EventCollector,
    frames: u64,
    on_frame: Option<FrameHook<S>>,
}

impl<T: Transport, S: Surface, E: Engine> Session<T, S, E> {
    pub fn new(connection: Connection<T>, scene: Scene<S>, engine: E) -> Self {
        Self {
            connection,
            scene,
            engine,
            events: EventCollector::new(),
            frames: 0,
            on_frame: None,
        }
    }

    /// Called with the surface after every completed redraw
    pub fn on_frame(mut self, hook: impl FnMut(&S) + Send + 'static) -> Self {
        self.on_frame = Some(Box::new(hook));
        self
    }

    pub fn connection(&self) -> &Connection<T> {
        &self.connection
    }

    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn scene(&self) -> &Scene<S> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene<S> {
        &mut self.scene
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of redraws so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drain pending events
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    pub fn handle_event(&mut self, event: TransportEvent) {
        let before = self.connection.state();
        match event {
            TransportEvent::Opened => self.connection.on_open(),
            TransportEvent::Message(frame) => {
                if let Some(dispatch) = self.connection.on_message(frame) {
                    self.dispatch(dispatch);
                }
            }
            TransportEvent::Closed => self.connection.on_close(),
            TransportEvent::Failed(reason) => self.connection.on_error(&reason),
        }
        self.track_state(before);
    }

    /// Send a command; dropped unless the connection is open
    pub fn send_command(&mut self, command: Command) -> bool {
        let before = self.connection.state();
        let sent = self.connection.send_command(command.clone());
        if !sent {
            self.events.on_event(SessionEvent::CommandDropped { command });
        }
        self.track_state(before);
        sent
    }

    pub fn handle_tick(&mut self, tick: u64) {
        trace!(tick, "advance");
        if self.engine.advance() {
            self.redraw();
        }
    }

    /// Service transport events, local commands and ticks until the
    /// connection closes or fails. Returns the terminal state.
    pub async fn run(&mut self, mut inputs: SessionInputs) -> ConnectionState {
        let mut commands_open = true;
        let mut ticks_open = inputs.ticks.is_some();

        while !self.connection.state().is_terminal() {
            tokio::select! {
                // inbound first, then input, then the local clock
                biased;

                event = inputs.events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => self.handle_event(TransportEvent::Closed),
                },
                command = inputs.commands.recv(), if commands_open => match command {
                    Some(command) => {
                        self.send_command(command);
                    }
                    None => commands_open = false,
                },
                tick = next_tick(&mut inputs.ticks), if ticks_open => match tick {
                    Some(tick) => self.handle_tick(tick),
                    None => ticks_open = false,
                },
            }
        }

        let state = self.connection.state();
        info!(?state, frames = self.frames, stats = ?self.connection.stats(), "session ended");
        state
    }

    fn dispatch(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::State(payload) => match self.engine.decode_state(&payload) {
                Ok(()) => self.redraw(),
                Err(e) => self.engine_failed(e),
            },
            Dispatch::Identity(payload) => match self.engine.set_identity(&payload) {
                Ok(()) => {
                    self.events.on_event(SessionEvent::IdentityAssigned);
                    self.redraw();
                }
                Err(e) => self.engine_failed(e),
            },
        }
    }

    fn redraw(&mut self) {
        self.scene.clear_field();
        if let Err(e) = self.engine.redraw(&mut self.scene) {
            self.engine_failed(e);
        }
        self.frames += 1;
        trace!(frame = self.frames, "redraw");
        if let Some(hook) = self.on_frame.as_mut() {
            hook(self.scene.surface());
        }
    }

    fn engine_failed(&mut self, error: Error) {
        warn!(error = %error, "engine error");
        self.events.on_event(SessionEvent::EngineFailed { reason: error.to_string() });
    }

    fn track_state(&mut self, before: ConnectionState) {
        let after = self.connection.state();
        if before == after {
            return;
        }
        if after == ConnectionState::Open {
            self.events.on_event(SessionEvent::Connected);
        } else if after.is_terminal() {
            self.events.on_event(SessionEvent::Disconnected { state: after });
        }
    }
}

async fn next_tick(ticks: &mut Option<UnboundedReceiver<u64>>) -> Option<u64> {
    match ticks {
        Some(rx) => rx.recv().await,
        None => None,
    }
}

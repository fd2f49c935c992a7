//! Boundary to the simulation engine
//!
//! The client never interprets state bytes itself; it hands them to an
//! [`Engine`] and asks it to redraw through the scene.

use bincode::Options;
use bytes::Bytes;
use tracing::debug;

use crate::error::{Error, Result};
use crate::renderer::{Scene, Surface};

pub trait Engine {
    /// Install a state snapshot for subsequent redraws
    fn decode_state(&mut self, bytes: &[u8]) -> Result<()>;

    /// Record which entity in the shared state is ours
    fn set_identity(&mut self, bytes: &[u8]) -> Result<()>;

    /// Render the installed state. The field has already been cleared.
    fn redraw<S: Surface>(&mut self, scene: &mut Scene<S>) -> Result<()>;

    /// Step a client-side simulation by one tick; returns whether a redraw is due
    fn advance(&mut self) -> bool {
        false
    }
}

const IDENTITY_DIGITS: usize = 2;
const COUNTER_DIGITS: usize = 2;

/// Stand-in engine that keeps the last snapshot opaque.
///
/// The HUD shows the assigned identity on the left and the number of
/// snapshots received on the right.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    snapshot: Option<Bytes>,
    snapshots: u32,
    identity: Option<u16>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&Bytes> {
        self.snapshot.as_ref()
    }

    pub fn snapshots(&self) -> u32 {
        self.snapshots
    }

    pub fn identity(&self) -> Option<u16> {
        self.identity
    }
}

impl Engine for HeadlessEngine {
    fn decode_state(&mut self, bytes: &[u8]) -> Result<()> {
        self.snapshot = Some(Bytes::copy_from_slice(bytes));
        self.snapshots = self.snapshots.wrapping_add(1);
        Ok(())
    }

    fn set_identity(&mut self, bytes: &[u8]) -> Result<()> {
        // varint: ids below 251 are a single byte
        let id: u16 = bincode::DefaultOptions::new()
            .with_varint_encoding()
            .deserialize(bytes)
            .map_err(|e| Error::Engine(format!("identity: {e}")))?;
        debug!(id, "identity decoded");
        self.identity = Some(id);
        Ok(())
    }

    fn redraw<S: Surface>(&mut self, scene: &mut Scene<S>) -> Result<()> {
        match self.identity {
            Some(id) => scene.draw_number(id as u32, IDENTITY_DIGITS, 0)?,
            None => scene.clear_number(IDENTITY_DIGITS, 0)?,
        }
        scene.draw_number(self.snapshots, COUNTER_DIGITS, -(COUNTER_DIGITS as i32))
    }
}

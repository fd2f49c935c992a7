//! Inbound frames
//!
//! One transport message is one frame. Byte 0 is the tag, the rest is an
//! opaque payload handed on untouched:
//!
//! | tag | payload                                   |
//! |-----|-------------------------------------------|
//! | 1   | simulation state snapshot                 |
//! | 2   | identity of this client's entity          |
//! | 3   | keepalive probe, echoed back as tag 5     |

use bytes::{BufMut, Bytes, BytesMut};

/// Server to client frame tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameTag {
    StateUpdate = 1,
    IdentityAssign = 2,
    KeepaliveProbe = 3,
}

impl FrameTag {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::StateUpdate),
            2 => Some(Self::IdentityAssign),
            3 => Some(Self::KeepaliveProbe),
            _ => None,
        }
    }
}

/// A parsed server frame; payloads share the received buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    StateUpdate(Bytes),
    IdentityAssign(Bytes),
    KeepaliveProbe(Bytes),
    /// Tag this client does not know; ignored
    Unknown { tag: u8 },
    Empty,
}

impl InboundFrame {
    pub fn parse(frame: Bytes) -> Self {
        let Some(&tag) = frame.first() else {
            return Self::Empty;
        };
        let payload = frame.slice(1..);
        match FrameTag::from_u8(tag) {
            Some(FrameTag::StateUpdate) => Self::StateUpdate(payload),
            Some(FrameTag::IdentityAssign) => Self::IdentityAssign(payload),
            Some(FrameTag::KeepaliveProbe) => Self::KeepaliveProbe(payload),
            None => Self::Unknown { tag },
        }
    }
}

/// Build a tagged frame, as the server does
pub fn tagged(tag: u8, payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(1 + payload.len());
    buf.put_u8(tag);
    buf.put_slice(payload);
    buf.freeze()
}

//! Outbound commands
//!
//! Command bytes live in their own numbering space, separate from the
//! inbound frame tags. Two versions of the direction encoding exist:
//!
//! - `V1`: the direction byte (0 left, 1 up, 2 right, 3 down) is the whole message
//! - `V2`: the direction byte follows a `4` discriminator
//!
//! Quit (`6`) and the keepalive echo (`5` + probe payload) are the same in both.

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DIRECTION_PREFIX: u8 = 4;
const KEEPALIVE_ECHO: u8 = 5;
const QUIT: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    #[default]
    V1,
    V2,
}

impl FromStr for ProtocolVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            other => Err(Error::Config(format!("unknown protocol version: {other}"))),
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Left,
    Up,
    Right,
    Down,
    Quit,
    /// Reply to a keepalive probe, carrying the probe's payload
    KeepaliveEcho(Bytes),
}

impl Command {
    fn from_direction_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Left),
            1 => Some(Self::Up),
            2 => Some(Self::Right),
            3 => Some(Self::Down),
            _ => None,
        }
    }

    /// Wire bytes for this command; one call is one transport message
    pub fn encode(&self, version: ProtocolVersion) -> Bytes {
        match self {
            Self::Left => encode_direction(0, version),
            Self::Up => encode_direction(1, version),
            Self::Right => encode_direction(2, version),
            Self::Down => encode_direction(3, version),
            Self::Quit => Bytes::from_static(&[QUIT]),
            Self::KeepaliveEcho(payload) => {
                let mut buf = BytesMut::with_capacity(1 + payload.len());
                buf.put_u8(KEEPALIVE_ECHO);
                buf.put_slice(payload);
                buf.freeze()
            }
        }
    }

    /// Server-side decoding of a client message
    pub fn decode(frame: &[u8], version: ProtocolVersion) -> Result<Self> {
        let (&first, rest) = frame.split_first().ok_or(Error::EmptyCommand)?;
        match (first, version) {
            (KEEPALIVE_ECHO, _) => Ok(Self::KeepaliveEcho(Bytes::copy_from_slice(rest))),
            (QUIT, _) => Ok(Self::Quit),
            (DIRECTION_PREFIX, ProtocolVersion::V2) => {
                let &d = rest.first().ok_or(Error::EmptyCommand)?;
                Self::from_direction_byte(d).ok_or(Error::InvalidCommand(d))
            }
            (b, ProtocolVersion::V1) => Self::from_direction_byte(b).ok_or(Error::InvalidCommand(b)),
            (b, ProtocolVersion::V2) => Err(Error::InvalidCommand(b)),
        }
    }
}

fn encode_direction(d: u8, version: ProtocolVersion) -> Bytes {
    match version {
        ProtocolVersion::V1 => Bytes::copy_from_slice(&[d]),
        ProtocolVersion::V2 => Bytes::copy_from_slice(&[DIRECTION_PREFIX, d]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTIONS: [Command; 4] = [Command::Left, Command::Up, Command::Right, Command::Down];

    #[test]
    fn test_v1_directions_are_single_bytes() {
        let encoded: Vec<Bytes> = DIRECTIONS.iter().map(|c| c.encode(ProtocolVersion::V1)).collect();
        let expected: Vec<Bytes> = (0u8..4).map(|d| Bytes::copy_from_slice(&[d])).collect();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_v2_directions_prefixed() {
        assert_eq!(Command::Down.encode(ProtocolVersion::V2), &[4u8, 3][..]);
        assert_eq!(Command::Left.encode(ProtocolVersion::V2), &[4u8, 0][..]);
    }

    #[test]
    fn test_quit_and_echo() {
        for v in [ProtocolVersion::V1, ProtocolVersion::V2] {
            assert_eq!(Command::Quit.encode(v), &[6u8][..]);
            let echo = Command::KeepaliveEcho(Bytes::from_static(b"tick"));
            assert_eq!(echo.encode(v), &b"\x05tick"[..]);
        }
    }

    #[test]
    fn test_decode_matches_version() {
        for v in [ProtocolVersion::V1, ProtocolVersion::V2] {
            for cmd in DIRECTIONS {
                assert_eq!(Command::decode(&cmd.encode(v), v).unwrap(), cmd);
            }
        }
        // a V2 frame is not a V1 direction
        assert!(matches!(Command::decode(&[4, 1], ProtocolVersion::V1), Err(Error::InvalidCommand(4))));
        assert!(matches!(Command::decode(&[1], ProtocolVersion::V2), Err(Error::InvalidCommand(1))));
        assert!(matches!(Command::decode(&[4], ProtocolVersion::V2), Err(Error::EmptyCommand)));
        assert!(matches!(Command::decode(&[], ProtocolVersion::V1), Err(Error::EmptyCommand)));
    }

    #[test]
    fn test_only_directions_depend_on_version() {
        for cmd in [Command::Quit, Command::KeepaliveEcho(Bytes::from_static(b"x"))] {
            assert_eq!(cmd.encode(ProtocolVersion::V1), cmd.encode(ProtocolVersion::V2));
        }
        for cmd in DIRECTIONS {
            let v1 = cmd.encode(ProtocolVersion::V1);
            let v2 = cmd.encode(ProtocolVersion::V2);
            assert_eq!(v2, [&[DIRECTION_PREFIX][..], &v1[..]].concat());
        }
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!("V2".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V2);
        assert_eq!("1".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V1);
        assert!("v3".parse::<ProtocolVersion>().is_err());
        let v: ProtocolVersion = serde_json::from_str("\"v2\"").unwrap();
        assert_eq!(v, ProtocolVersion::V2);
    }
}

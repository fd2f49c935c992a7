pub mod frame;
pub mod command;

pub use frame::{FrameTag, InboundFrame, tagged};
pub use command::{Command, ProtocolVersion};

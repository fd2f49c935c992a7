pub mod config;
pub mod engine;
pub mod events;
pub mod input;
pub mod session;
pub mod ticker;

pub use config::ClientConfig;
pub use engine::{Engine, HeadlessEngine};
pub use events::{SessionEvent, EventHandler, EventCollector};
pub use input::{map_input, BINDINGS};
pub use session::{Session, SessionInputs};
pub use ticker::Ticker;

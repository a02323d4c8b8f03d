//! deck-bridge - One-way command channel to the audio host
//!
//! Features:
//! - Colon-delimited command grammar, formatted on the panel side and
//!   parsed on the host side
//! - Host bindings hidden behind a single `HostBridge::deliver` contract
//! - Fire-and-forget: nothing is awaited, acknowledged or retried

pub mod bridge;
pub mod command;
pub mod error;
pub mod threshold;

pub use bridge::{
    BridgeKind, CommandChannel, HostBridge, HostEnvelope, InvokeBridge, MessageHandlerBridge,
    RecordingBridge, SliderBinding,
};
pub use command::{Command, MenuAction};
pub use error::CommandError;
pub use threshold::Threshold;

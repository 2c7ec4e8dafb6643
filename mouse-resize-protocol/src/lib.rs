//! mouse-resize-protocol: remote-control request definitions
//!
//! This crate defines the requests mouse-resize sends to the terminal it runs
//! in, the command registry that builds them from command-line style
//! arguments, and the in-band framing used to carry them.

pub mod codec;
pub mod commands;
pub mod messages;
pub mod types;

// Re-export main types at crate root
pub use codec::{CodecError, RemoteControlCodec};
pub use commands::{
    command_for_name, parse_subcommand_cli, CommandError, CommandSpec, RemoteCommand,
    ResizeWindowArgs, RESIZE_WINDOW,
};
pub use messages::{RemoteResponse, ResizeWindowPayload, SendEnvelope};
pub use types::Axis;

/// Remote-control protocol version sent with every request
///
/// The terminal rejects requests that claim a newer version than its own,
/// so this stays at the oldest version that understands `resize-window`.
pub const PROTOCOL_VERSION: [u32; 3] = [0, 14, 2];

//! Remote command registry and request builder
//!
//! Commands are described with command-line style arguments
//! (`resize-window --self --increment=-4 --axis=vertical`) and parsed with
//! clap into typed arguments, which then produce the JSON payload for a
//! [`SendEnvelope`].

use clap::{Args, Parser, Subcommand};

use crate::messages::{ResizeWindowPayload, SendEnvelope};
use crate::types::Axis;

/// Errors raised while resolving or building a remote command
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown remote command: {0}")]
    UnknownCommand(String),

    #[error("expected arguments for {expected}, got {got:?}")]
    NameMismatch { expected: &'static str, got: Option<String> },

    #[error("invalid arguments for {command}: {message}")]
    InvalidArguments { command: &'static str, message: String },

    #[error("failed to build payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A remote command known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Wire name, also the first element of its argument list
    pub name: &'static str,
}

/// Resize the specified windows in the current layout
pub const RESIZE_WINDOW: CommandSpec = CommandSpec {
    name: "resize-window",
};

/// All commands this client knows how to build
pub const COMMANDS: &[CommandSpec] = &[RESIZE_WINDOW];

/// Resolve a command by name; underscores are accepted in place of dashes
pub fn command_for_name(name: &str) -> Result<CommandSpec, CommandError> {
    let normalized = name.replace('_', "-");
    COMMANDS
        .iter()
        .find(|spec| spec.name == normalized)
        .copied()
        .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))
}

#[derive(Parser, Debug)]
#[command(name = "remote", no_binary_name = true, disable_help_subcommand = true)]
struct RemoteCli {
    #[command(subcommand)]
    command: RemoteCommand,
}

/// A parsed remote command
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum RemoteCommand {
    #[command(name = "resize-window")]
    ResizeWindow(ResizeWindowArgs),
}

/// Arguments of `resize-window`
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ResizeWindowArgs {
    /// Resize the window this command is run in
    #[arg(long = "self")]
    pub self_window: bool,

    /// Number of cells to change the size by, negative to shrink
    #[arg(long, short = 'i', default_value_t = 2, allow_negative_numbers = true)]
    pub increment: i32,

    /// Axis along which to resize
    #[arg(long, short = 'a', value_enum, default_value_t = Axis::Horizontal)]
    pub axis: Axis,

    /// Window to resize, defaults to the active window
    #[arg(long = "match", short = 'm')]
    pub match_spec: Option<String>,
}

impl RemoteCommand {
    /// Wire name of the command
    pub fn name(&self) -> &'static str {
        match self {
            RemoteCommand::ResizeWindow(_) => RESIZE_WINDOW.name,
        }
    }

    /// Convert the parsed arguments into the payload the terminal expects
    pub fn message_to_terminal(&self) -> Result<serde_json::Value, CommandError> {
        match self {
            RemoteCommand::ResizeWindow(args) => {
                let payload = ResizeWindowPayload {
                    match_spec: args.match_spec.clone(),
                    self_window: args.self_window,
                    increment: args.increment,
                    axis: args.axis,
                };
                Ok(serde_json::to_value(payload)?)
            }
        }
    }

    /// Wrap the payload in a versioned envelope
    pub fn to_envelope(&self) -> Result<SendEnvelope, CommandError> {
        Ok(SendEnvelope::new(self.name(), self.message_to_terminal()?))
    }
}

/// Parse a command-line style argument list for `spec`
///
/// The first element must be the command name, as in
/// `["resize-window", "--self", "--increment=2", "--axis=horizontal"]`.
pub fn parse_subcommand_cli<I, S>(spec: CommandSpec, args: I) -> Result<RemoteCommand, CommandError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args: Vec<String> = args.into_iter().map(Into::into).collect();

    let names_spec = args
        .first()
        .map(|first| command_for_name(first).map(|c| c == spec).unwrap_or(false))
        .unwrap_or(false);
    if !names_spec {
        return Err(CommandError::NameMismatch {
            expected: spec.name,
            got: args.first().cloned(),
        });
    }
    args[0] = spec.name.to_string();

    RemoteCli::try_parse_from(args)
        .map(|cli| cli.command)
        .map_err(|e| CommandError::InvalidArguments {
            command: spec.name,
            message: e.to_string().trim().to_string(),
        })
}

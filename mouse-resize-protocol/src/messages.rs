//! Remote-control message types
//!
//! Every request is wrapped in a [`SendEnvelope`] before it is framed and
//! written to the terminal. The terminal answers with a [`RemoteResponse`]
//! unless the envelope asked for no response.

use serde::{Deserialize, Serialize};

use crate::types::Axis;
use crate::PROTOCOL_VERSION;

/// Payload of a `resize-window` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeWindowPayload {
    /// Window match expression, `None` for the active window
    #[serde(rename = "match")]
    pub match_spec: Option<String>,
    /// Resize the window the request was sent from
    #[serde(rename = "self")]
    pub self_window: bool,
    /// Number of cells to grow (positive) or shrink (negative) by
    pub increment: i32,
    pub axis: Axis,
}

/// Versioned envelope around a command payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendEnvelope {
    /// Command name, e.g. `resize-window`
    pub cmd: String,
    /// Protocol version as `[major, minor, patch]`
    pub version: [u32; 3],
    pub payload: serde_json::Value,
    /// When false the terminal replies with a [`RemoteResponse`]
    pub no_response: bool,
}

impl SendEnvelope {
    /// Create an envelope that asks for a response
    pub fn new(cmd: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            cmd: cmd.into(),
            version: PROTOCOL_VERSION,
            payload,
            no_response: false,
        }
    }
}

/// Reply from the terminal to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Traceback from the terminal side, only present on failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tb: Option<String>,
}

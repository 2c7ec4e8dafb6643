//! Remote-control framing
//!
//! Requests and responses travel in-band on the terminal's own byte stream,
//! wrapped in a DCS string: `ESC P @kitty-cmd <json> ESC \`. Responses are
//! interleaved with other terminal input, so the input decoder splits frames
//! off with [`take_frame`] and hands their bodies to [`parse_response`].

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::messages::{RemoteResponse, SendEnvelope};

/// Device Control String introducer
pub const DCS_START: &[u8] = b"\x1bP";

/// Marks a DCS string as a remote-control message
pub const COMMAND_PREFIX: &[u8] = b"@kitty-cmd";

/// String terminator closing the DCS
pub const STRING_TERMINATOR: &[u8] = b"\x1b\\";

/// Maximum frame size (1 MB)
const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Remote-control codec error
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },
}

/// Encodes [`SendEnvelope`]s into DCS frames
#[derive(Debug, Default)]
pub struct RemoteControlCodec;

impl RemoteControlCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<SendEnvelope> for RemoteControlCodec {
    type Error = CodecError;

    fn encode(&mut self, item: SendEnvelope, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_envelope(&item, dst)
    }
}

fn encode_envelope(envelope: &SendEnvelope, dst: &mut BytesMut) -> Result<(), CodecError> {
    let data = serde_json::to_vec(envelope)?;

    let size = DCS_START.len() + COMMAND_PREFIX.len() + data.len() + STRING_TERMINATOR.len();
    if size > MAX_FRAME_SIZE {
        return Err(CodecError::FrameTooLarge {
            size,
            max: MAX_FRAME_SIZE,
        });
    }

    dst.reserve(size);
    dst.put_slice(DCS_START);
    dst.put_slice(COMMAND_PREFIX);
    dst.put_slice(&data);
    dst.put_slice(STRING_TERMINATOR);
    Ok(())
}

/// Split one DCS frame off the front of `src`
///
/// `src` must start with [`DCS_START`]. Returns the bytes between the
/// introducer and the terminator, or `None` if the terminator has not
/// arrived yet.
pub fn take_frame(src: &mut BytesMut) -> Result<Option<BytesMut>, CodecError> {
    debug_assert!(src.starts_with(DCS_START));

    let Some(end) = find(&src[DCS_START.len()..], STRING_TERMINATOR) else {
        if src.len() > MAX_FRAME_SIZE {
            return Err(CodecError::FrameTooLarge {
                size: src.len(),
                max: MAX_FRAME_SIZE,
            });
        }
        return Ok(None);
    };

    src.advance(DCS_START.len());
    let body = src.split_to(end);
    src.advance(STRING_TERMINATOR.len());
    Ok(Some(body))
}

/// Parse a DCS body as a remote-control response
///
/// Returns `None` for DCS strings that are not remote-control messages.
pub fn parse_response(body: &[u8]) -> Result<Option<RemoteResponse>, CodecError> {
    match body.strip_prefix(COMMAND_PREFIX) {
        Some(json) => Ok(Some(serde_json::from_slice(json)?)),
        None => Ok(None),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

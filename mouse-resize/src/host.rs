//! Output side of the session: remote-control requests and the screen
//!
//! The handler only talks to these traits, so the terminal can be swapped
//! for a recording host in tests.

use std::io::Write;

use bytes::BytesMut;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::Print,
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use tokio_util::codec::Encoder;

use mouse_resize_protocol::{RemoteControlCodec, SendEnvelope};
use mouse_resize_utils::{ResizeError, Result};

/// Delivers remote-control requests to the terminal
pub trait CommandSink {
    fn send(&mut self, envelope: SendEnvelope) -> Result<()>;
}

/// Minimal screen primitives used for the instruction display
pub trait Screen {
    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    /// Replace the whole screen with `lines` in one atomic update
    fn draw(&mut self, lines: &[String]) -> Result<()>;
}

/// Host that writes both requests and screen updates to one terminal stream
pub struct TerminalHost<W: Write> {
    out: W,
    codec: RemoteControlCodec,
    buf: BytesMut,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            codec: RemoteControlCodec::new(),
            buf: BytesMut::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> CommandSink for TerminalHost<W> {
    fn send(&mut self, envelope: SendEnvelope) -> Result<()> {
        self.buf.clear();
        self.codec
            .encode(envelope, &mut self.buf)
            .map_err(|e| ResizeError::protocol(format!("Failed to encode request: {}", e)))?;
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Screen for TerminalHost<W> {
    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(self.out, Show)?;
        } else {
            queue!(self.out, Hide)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn draw(&mut self, lines: &[String]) -> Result<()> {
        queue!(self.out, BeginSynchronizedUpdate, Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(self.out, MoveTo(0, row), Print(line))?;
        }
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }
}

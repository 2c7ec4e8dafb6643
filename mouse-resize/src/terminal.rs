//! Terminal initialization and cleanup
//!
//! Provides safe terminal mode management using crossterm.

use std::fmt;
use std::io;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    Command,
};

use mouse_resize_utils::Result;

/// Report every mouse motion, with or without buttons held, in SGR encoding
///
/// With `pixels` set the terminal reports positions in pixels (SGR-pixels)
/// instead of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnableMouseTracking {
    pub pixels: bool,
}

impl Command for EnableMouseTracking {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        // normal, button-event and any-event tracking, SGR encoding
        f.write_str("\x1b[?1000h\x1b[?1002h\x1b[?1003h\x1b[?1006h")?;
        if self.pixels {
            f.write_str("\x1b[?1016h")?;
        }
        Ok(())
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Undo [`EnableMouseTracking`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisableMouseTracking {
    pub pixels: bool,
}

impl Command for DisableMouseTracking {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        if self.pixels {
            f.write_str("\x1b[?1016l")?;
        }
        f.write_str("\x1b[?1006l\x1b[?1003l\x1b[?1002l\x1b[?1000l")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Puts the terminal into raw mode with full mouse tracking for as long as
/// it is alive
pub struct TerminalGuard {
    pixels: bool,
}

impl TerminalGuard {
    /// Enter raw mode, the alternate screen and mouse tracking
    pub fn enter(pixels: bool) -> Result<Self> {
        enable_raw_mode()?;

        // From here on the terminal is restored on drop, even if setup fails
        let guard = Self { pixels };
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseTracking { pixels }
        )?;

        tracing::debug!(pixels, "terminal ready");
        Ok(guard)
    }

    fn restore(pixels: bool) -> Result<()> {
        execute!(
            io::stdout(),
            DisableMouseTracking { pixels },
            Show,
            LeaveAlternateScreen
        )?;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = Self::restore(self.pixels) {
            tracing::error!("Failed to restore terminal: {}", e);
        }
    }
}

//! Terminal input events
//!
//! Raw bytes from the terminal are turned into [`InputEvent`]s by
//! [`InputDecoder`]. Mouse reports arrive in SGR encoding, in pixel units
//! when the cell size is known and in cell units otherwise.

mod decoder;

pub use decoder::InputDecoder;

use mouse_resize_protocol::RemoteResponse;

/// A decoded input event
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Mouse(MouseEvent),
    /// Printable text typed by the user
    Text(String),
    /// Ctrl+C, or SIGINT delivered to the process
    Interrupt,
    /// Ctrl+D, or end of the input stream
    EndOfTransmission,
    /// Reply from the terminal to a remote-control request
    RemoteResponse(RemoteResponse),
}

/// Kind of mouse event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Press,
    Move,
    Release,
}

/// Mouse button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
}

impl MouseButton {
    fn bit(self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 1 << 1,
            MouseButton::Right => 1 << 2,
            MouseButton::WheelUp => 1 << 3,
            MouseButton::WheelDown => 1 << 4,
            MouseButton::WheelLeft => 1 << 5,
            MouseButton::WheelRight => 1 << 6,
        }
    }
}

/// Set of mouse buttons active for an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub fn with(self, button: MouseButton) -> Self {
        ButtonSet(self.0 | button.bit())
    }

    pub fn contains(&self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }
}

impl From<MouseButton> for ButtonSet {
    fn from(button: MouseButton) -> Self {
        ButtonSet::EMPTY.with(button)
    }
}

/// Position in the character grid, zero based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A single mouse report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: EventType,
    pub buttons: ButtonSet,
    pub pixel_x: u32,
    pub pixel_y: u32,
    pub cell_x: u16,
    pub cell_y: u16,
}

impl MouseEvent {
    pub fn cell(&self) -> Cell {
        Cell::new(self.cell_x, self.cell_y)
    }
}

/// Size of one character cell in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub width: u16,
    pub height: u16,
}

impl CellGeometry {
    /// Derive the cell size from the window size in cells and pixels
    ///
    /// Terminals that do not report pixel sizes give zeros, in which case
    /// there is no geometry.
    pub fn from_window_size(columns: u16, rows: u16, width: u16, height: u16) -> Option<Self> {
        if columns == 0 || rows == 0 {
            return None;
        }
        let geometry = Self {
            width: width / columns,
            height: height / rows,
        };
        (geometry.width > 0 && geometry.height > 0).then_some(geometry)
    }

    /// Ask the terminal for its current size
    pub fn query() -> Option<Self> {
        match crossterm::terminal::window_size() {
            Ok(size) => Self::from_window_size(size.columns, size.rows, size.width, size.height),
            Err(e) => {
                tracing::debug!("window size unavailable: {}", e);
                None
            }
        }
    }
}

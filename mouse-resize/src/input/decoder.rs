//! Byte stream decoder for terminal input

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;

use mouse_resize_protocol::codec::{parse_response, take_frame};

use super::{ButtonSet, CellGeometry, EventType, InputEvent, MouseButton, MouseEvent};

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const CTRL_D: u8 = 0x04;
const BEL: u8 = 0x07;

/// Longest escape sequence we buffer before giving up on it
const MAX_SEQUENCE_LEN: usize = 256;

/// SGR button code bits
const MOTION_BIT: u32 = 32;
const WHEEL_BIT: u32 = 64;

/// Decodes raw terminal input into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputDecoder {
    /// Set when mouse reports are in pixels (SGR-pixels mode)
    geometry: Option<CellGeometry>,
}

impl InputDecoder {
    pub fn new(geometry: Option<CellGeometry>) -> Self {
        Self { geometry }
    }

    /// Whether the terminal should be asked for pixel mouse reports
    pub fn pixel_mode(&self) -> bool {
        self.geometry.is_some()
    }

    fn decode_csi(&self, src: &mut BytesMut) -> Option<Option<InputEvent>> {
        // CSI parameters and intermediates, then a final byte in 0x40..=0x7e
        let Some(end) = src[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
            if src.len() > MAX_SEQUENCE_LEN {
                tracing::debug!("dropping unterminated CSI sequence");
                src.clear();
                return Some(None);
            }
            return None;
        };

        let seq = src.split_to(end + 3);
        let final_byte = seq[seq.len() - 1];
        if seq.get(2) == Some(&b'<') && matches!(final_byte, b'M' | b'm') {
            let params = &seq[3..seq.len() - 1];
            return Some(self.parse_sgr_mouse(params, final_byte).map(InputEvent::Mouse));
        }

        tracing::trace!("ignoring CSI sequence {:?}", String::from_utf8_lossy(&seq[1..]));
        Some(None)
    }

    fn parse_sgr_mouse(&self, params: &[u8], final_byte: u8) -> Option<MouseEvent> {
        let params = std::str::from_utf8(params).ok()?;
        let mut fields = params.split(';').map(|f| f.parse::<u32>());
        let (Some(Ok(code)), Some(Ok(x)), Some(Ok(y)), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            tracing::debug!("malformed SGR mouse report: {}", params);
            return None;
        };

        let kind = if final_byte == b'm' {
            EventType::Release
        } else if code & MOTION_BIT != 0 {
            EventType::Move
        } else {
            EventType::Press
        };

        let button = if code & WHEEL_BIT != 0 {
            match code & 3 {
                0 => Some(MouseButton::WheelUp),
                1 => Some(MouseButton::WheelDown),
                2 => Some(MouseButton::WheelLeft),
                _ => Some(MouseButton::WheelRight),
            }
        } else {
            match code & 3 {
                0 => Some(MouseButton::Left),
                1 => Some(MouseButton::Middle),
                2 => Some(MouseButton::Right),
                _ => None,
            }
        };
        let buttons = button.map(ButtonSet::from).unwrap_or(ButtonSet::EMPTY);

        // Reports are one based in both modes
        let (x, y) = (x.saturating_sub(1), y.saturating_sub(1));
        let (pixel_x, pixel_y, cell_x, cell_y) = match self.geometry {
            Some(cell) => (
                x,
                y,
                x / u32::from(cell.width),
                y / u32::from(cell.height),
            ),
            None => (0, 0, x, y),
        };

        Some(MouseEvent {
            kind,
            buttons,
            pixel_x,
            pixel_y,
            cell_x: clamp_cell(cell_x),
            cell_y: clamp_cell(cell_y),
        })
    }
}

impl Decoder for InputDecoder {
    type Item = InputEvent;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let Some(&first) = src.first() else {
                return Ok(None);
            };

            match first {
                CTRL_C => {
                    src.advance(1);
                    return Ok(Some(InputEvent::Interrupt));
                }
                CTRL_D => {
                    src.advance(1);
                    return Ok(Some(InputEvent::EndOfTransmission));
                }
                ESC => {
                    let Some(&second) = src.get(1) else {
                        return Ok(None);
                    };
                    match second {
                        b'[' => match self.decode_csi(src) {
                            Some(Some(event)) => return Ok(Some(event)),
                            Some(None) => continue,
                            None => return Ok(None),
                        },
                        b'P' => {
                            let body = match take_frame(src) {
                                Ok(Some(body)) => body,
                                Ok(None) => return Ok(None),
                                Err(e) => {
                                    tracing::warn!("dropping DCS input: {}", e);
                                    src.clear();
                                    continue;
                                }
                            };
                            match parse_response(&body) {
                                Ok(Some(response)) => {
                                    return Ok(Some(InputEvent::RemoteResponse(response)))
                                }
                                Ok(None) => continue,
                                Err(e) => {
                                    tracing::warn!("malformed remote-control response: {}", e);
                                    continue;
                                }
                            }
                        }
                        b']' | b'_' | b'^' | b'X' => {
                            // OSC, APC, PM and SOS strings end in BEL or ST
                            let end = src[2..].iter().enumerate().find_map(|(i, &b)| match b {
                                BEL => Some(i + 3),
                                ESC if src.get(i + 3) == Some(&b'\\') => Some(i + 4),
                                _ => None,
                            });
                            match end {
                                Some(end) => src.advance(end),
                                None if src.len() > MAX_SEQUENCE_LEN => src.clear(),
                                None => return Ok(None),
                            }
                        }
                        // SS3 keys (F1-F4 and keypad in legacy mode)
                        b'O' => {
                            if src.len() < 3 {
                                return Ok(None);
                            }
                            src.advance(3);
                        }
                        // Only the first of two escapes is dropped, the second
                        // may start a sequence
                        ESC => src.advance(1),
                        // Alt+key and other two byte escapes
                        _ => src.advance(2),
                    }
                }
                b if b < 0x20 || b == 0x7f => {
                    src.advance(1);
                }
                _ => {
                    let end = src
                        .iter()
                        .position(|&b| b < 0x20 || b == 0x7f)
                        .unwrap_or(src.len());
                    let take = match std::str::from_utf8(&src[..end]) {
                        Ok(_) => end,
                        // Incomplete UTF-8 at the end of the buffer, wait for the rest
                        Err(e) if e.error_len().is_none() && end == src.len() => e.valid_up_to(),
                        Err(_) => end,
                    };
                    if take == 0 {
                        return Ok(None);
                    }
                    let chunk = src.split_to(take);
                    return Ok(Some(InputEvent::Text(
                        String::from_utf8_lossy(&chunk).into_owned(),
                    )));
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(event) => Ok(Some(event)),
            None => {
                if !src.is_empty() {
                    tracing::debug!("discarding {} bytes of partial input at EOF", src.len());
                    src.clear();
                }
                Ok(None)
            }
        }
    }
}

fn clamp_cell(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

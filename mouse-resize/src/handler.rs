//! Mouse-driven window resizing
//!
//! [`MouseResize`] watches mouse motion and turns every change of the cell
//! under the pointer into `resize-window` requests for the window it runs in.
//! A right button release ends the session.

use mouse_resize_protocol::{
    command_for_name, parse_subcommand_cli, Axis, RemoteResponse, RESIZE_WINDOW,
};
use mouse_resize_utils::{ResizeError, Result};

use crate::cli::ResizeOptions;
use crate::host::{CommandSink, Screen};
use crate::input::{Cell, EventType, MouseButton, MouseEvent};

/// What the event loop should do after a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    /// Stop the loop and exit with this code
    Quit(i32),
}

/// Callbacks invoked by the event loop, one per event kind
pub trait Handler {
    /// Called once before the first event
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once after the loop stops
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_mouse_event(&mut self, _ev: MouseEvent) -> Result<LoopAction> {
        Ok(LoopAction::Continue)
    }

    fn on_text(&mut self, _text: &str) -> Result<LoopAction> {
        Ok(LoopAction::Continue)
    }

    fn on_remote_response(&mut self, _response: RemoteResponse) -> Result<LoopAction> {
        Ok(LoopAction::Continue)
    }

    fn on_interrupt(&mut self) -> Result<LoopAction> {
        Ok(LoopAction::Quit(0))
    }

    fn on_eot(&mut self) -> Result<LoopAction> {
        Ok(LoopAction::Quit(0))
    }
}

const INSTRUCTIONS: [&str; 3] = [
    "Resizing window",
    "Move the mouse to resize the window",
    "Release the right mouse button to stop resizing",
];

/// Resize handler; `H` is the terminal-side capability it sends through
pub struct MouseResize<H> {
    opts: ResizeOptions,
    host: H,
    current_mouse_event: Option<MouseEvent>,
    previous_cell: Option<Cell>,
    current_cell: Option<Cell>,
}

impl<H: CommandSink + Screen> MouseResize<H> {
    pub fn new(opts: ResizeOptions, host: H) -> Self {
        Self {
            opts,
            host,
            current_mouse_event: None,
            previous_cell: None,
            current_cell: None,
        }
    }

    fn on_mouse_move(&mut self, ev: &MouseEvent) -> Result<()> {
        let current = ev.cell();
        self.current_cell = Some(current);

        let Some(previous) = self.previous_cell else {
            self.previous_cell = Some(current);
            return Ok(());
        };

        let mut redraw_pending = false;

        let horizontal = i32::from(current.x) - i32::from(previous.x);
        if horizontal != 0 {
            self.do_window_resize(Axis::Horizontal, horizontal < 0, horizontal.unsigned_abs())?;
            redraw_pending = true;
        }

        let vertical = i32::from(current.y) - i32::from(previous.y);
        if vertical != 0 {
            self.do_window_resize(Axis::Vertical, vertical < 0, vertical.unsigned_abs())?;
            redraw_pending = true;
        }

        if redraw_pending {
            self.draw_screen()?;
        }

        self.previous_cell = Some(current);
        Ok(())
    }

    /// Send one `resize-window` request for this window
    ///
    /// The increment is the configured step for `axis` times `multiplier`,
    /// negated when shrinking. Reset requests carry no increment.
    fn do_window_resize(&mut self, axis: Axis, is_decrease: bool, multiplier: u32) -> Result<()> {
        let step = match axis {
            Axis::Horizontal => self.opts.horizontal_increment,
            Axis::Vertical => self.opts.vertical_increment,
            Axis::Reset => 0,
        };
        let multiplier = i32::try_from(multiplier).unwrap_or(i32::MAX);
        let mut increment = step.saturating_mul(multiplier);
        if is_decrease {
            increment = increment.saturating_neg();
        }

        let resize_window = command_for_name(RESIZE_WINDOW.name)
            .map_err(|e| ResizeError::invalid_command(e.to_string()))?;
        let cmdline = vec![
            resize_window.name.to_string(),
            "--self".to_string(),
            format!("--increment={}", increment),
            format!("--axis={}", axis),
        ];
        let command = parse_subcommand_cli(resize_window, cmdline)
            .map_err(|e| ResizeError::invalid_command(e.to_string()))?;
        let envelope = command
            .to_envelope()
            .map_err(|e| ResizeError::protocol(e.to_string()))?;

        tracing::debug!(%axis, increment, "sending resize request");
        self.host.send(envelope)
    }

    /// Lines of the instruction screen, plus debug info once the mouse moved
    pub fn screen_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = INSTRUCTIONS.iter().map(|l| l.to_string()).collect();

        if let Some(ev) = &self.current_mouse_event {
            lines.push("Debug info:".to_string());
            lines.push(format!("Position: {}, {}", ev.pixel_x, ev.pixel_y));
            lines.push(format!("Previous Cell: {}", format_cell(self.previous_cell)));
            lines.push(format!("Current Cell:  {}", format_cell(self.current_cell)));
        }

        lines
    }

    fn draw_screen(&mut self) -> Result<()> {
        let lines = self.screen_lines();
        self.host.draw(&lines)
    }

    #[cfg(test)]
    pub(crate) fn host(&self) -> &H {
        &self.host
    }
}

impl<H: CommandSink + Screen> Handler for MouseResize<H> {
    fn initialize(&mut self) -> Result<()> {
        self.host.set_cursor_visible(false)?;
        self.draw_screen()
    }

    fn finalize(&mut self) -> Result<()> {
        self.host.set_cursor_visible(true)
    }

    fn on_mouse_event(&mut self, ev: MouseEvent) -> Result<LoopAction> {
        self.current_mouse_event = Some(ev);

        match ev.kind {
            EventType::Press => Ok(LoopAction::Continue),
            EventType::Release => {
                if ev.buttons.contains(MouseButton::Right) {
                    tracing::info!("right button released, done resizing");
                    Ok(LoopAction::Quit(0))
                } else {
                    Ok(LoopAction::Continue)
                }
            }
            EventType::Move => {
                self.on_mouse_move(&ev)?;
                Ok(LoopAction::Continue)
            }
        }
    }

    fn on_text(&mut self, text: &str) -> Result<LoopAction> {
        for _ in text.chars().filter(|c| c.eq_ignore_ascii_case(&'r')) {
            self.do_window_resize(Axis::Reset, false, 1)?;
            self.draw_screen()?;
        }
        Ok(LoopAction::Continue)
    }

    fn on_remote_response(&mut self, response: RemoteResponse) -> Result<LoopAction> {
        if response.ok {
            tracing::debug!("resize request acknowledged");
        } else {
            tracing::warn!(
                "terminal rejected resize request: {}",
                response.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(LoopAction::Continue)
    }
}

fn format_cell(cell: Option<Cell>) -> String {
    match cell {
        Some(cell) => format!("{}, {}", cell.x, cell.y),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonSet;
    use mouse_resize_protocol::SendEnvelope;

    #[derive(Default)]
    struct RecordingHost {
        sent: Vec<SendEnvelope>,
        frames: Vec<Vec<String>>,
        cursor_visible: Option<bool>,
    }

    impl CommandSink for RecordingHost {
        fn send(&mut self, envelope: SendEnvelope) -> Result<()> {
            self.sent.push(envelope);
            Ok(())
        }
    }

    impl Screen for RecordingHost {
        fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
            self.cursor_visible = Some(visible);
            Ok(())
        }

        fn draw(&mut self, lines: &[String]) -> Result<()> {
            self.frames.push(lines.to_vec());
            Ok(())
        }
    }

    fn opts(horizontal: i32, vertical: i32) -> ResizeOptions {
        ResizeOptions {
            horizontal_increment: horizontal,
            vertical_increment: vertical,
        }
    }

    fn handler(horizontal: i32, vertical: i32) -> MouseResize<RecordingHost> {
        MouseResize::new(opts(horizontal, vertical), RecordingHost::default())
    }

    fn event(kind: EventType, buttons: ButtonSet, x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind,
            buttons,
            pixel_x: u32::from(x) * 10,
            pixel_y: u32::from(y) * 20,
            cell_x: x,
            cell_y: y,
        }
    }

    fn move_to(x: u16, y: u16) -> MouseEvent {
        event(EventType::Move, ButtonSet::EMPTY, x, y)
    }

    fn axis_and_increment(envelope: &SendEnvelope) -> (String, i64) {
        (
            envelope.payload["axis"].as_str().unwrap().to_string(),
            envelope.payload["increment"].as_i64().unwrap(),
        )
    }

    #[test]
    fn test_initialize_hides_cursor_and_draws() {
        let mut h = handler(2, 2);
        h.initialize().unwrap();

        assert_eq!(h.host().cursor_visible, Some(false));
        assert_eq!(h.host().frames.len(), 1);
        assert_eq!(h.host().frames[0], INSTRUCTIONS.map(String::from).to_vec());

        h.finalize().unwrap();
        assert_eq!(h.host().cursor_visible, Some(true));
    }

    #[test]
    fn test_first_move_only_records_cell() {
        let mut h = handler(2, 2);
        let action = h.on_mouse_event(move_to(5, 5)).unwrap();

        assert_eq!(action, LoopAction::Continue);
        assert!(h.host().sent.is_empty());
        assert!(h.host().frames.is_empty());
        assert_eq!(h.previous_cell, Some(Cell::new(5, 5)));
    }

    #[test]
    fn test_horizontal_growth() {
        let mut h = handler(2, 2);
        h.on_mouse_event(move_to(5, 5)).unwrap();
        h.on_mouse_event(move_to(8, 5)).unwrap();

        let sent = &h.host().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(axis_and_increment(&sent[0]), ("horizontal".to_string(), 6));
        assert_eq!(sent[0].cmd, "resize-window");
        assert_eq!(sent[0].payload["self"], true);
        assert!(!sent[0].no_response);
        assert_eq!(h.host().frames.len(), 1);
    }

    #[test]
    fn test_vertical_shrink() {
        let mut h = handler(2, 3);
        h.on_mouse_event(move_to(5, 5)).unwrap();
        h.on_mouse_event(move_to(5, 2)).unwrap();

        let sent = &h.host().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(axis_and_increment(&sent[0]), ("vertical".to_string(), -9));
    }

    #[test]
    fn test_diagonal_move_sends_both_axes() {
        let mut h = handler(2, 3);
        h.on_mouse_event(move_to(5, 5)).unwrap();
        h.on_mouse_event(move_to(4, 7)).unwrap();

        let sent = &h.host().sent;
        assert_eq!(sent.len(), 2);
        assert_eq!(axis_and_increment(&sent[0]), ("horizontal".to_string(), -2));
        assert_eq!(axis_and_increment(&sent[1]), ("vertical".to_string(), 6));
        // one redraw for the whole move
        assert_eq!(h.host().frames.len(), 1);
    }

    #[test]
    fn test_no_change_no_command_no_redraw() {
        let mut h = handler(2, 2);
        h.on_mouse_event(move_to(5, 5)).unwrap();
        h.on_mouse_event(move_to(5, 5)).unwrap();

        assert!(h.host().sent.is_empty());
        assert!(h.host().frames.is_empty());
    }

    #[test]
    fn test_deltas_are_relative_to_last_move() {
        let mut h = handler(1, 1);
        for x in [10, 11, 13, 12] {
            h.on_mouse_event(move_to(x, 0)).unwrap();
        }

        let increments: Vec<i64> = h.host().sent.iter().map(|e| axis_and_increment(e).1).collect();
        assert_eq!(increments, vec![1, 2, -1]);
        assert_eq!(h.previous_cell, Some(Cell::new(12, 0)));
    }

    #[test]
    fn test_press_mid_drag_is_ignored() {
        let mut h = handler(2, 2);
        h.on_mouse_event(move_to(5, 5)).unwrap();

        let press = event(EventType::Press, MouseButton::Left.into(), 9, 9);
        let action = h.on_mouse_event(press).unwrap();

        assert_eq!(action, LoopAction::Continue);
        assert_eq!(h.previous_cell, Some(Cell::new(5, 5)));
        assert!(h.host().sent.is_empty());
    }

    #[test]
    fn test_right_release_quits() {
        let mut h = handler(2, 2);
        h.on_mouse_event(move_to(5, 5)).unwrap();

        let release = event(EventType::Release, MouseButton::Right.into(), 5, 5);
        assert_eq!(h.on_mouse_event(release).unwrap(), LoopAction::Quit(0));
    }

    #[test]
    fn test_other_release_ignored() {
        let mut h = handler(2, 2);
        for button in [MouseButton::Left, MouseButton::Middle] {
            let release = event(EventType::Release, button.into(), 1, 1);
            assert_eq!(h.on_mouse_event(release).unwrap(), LoopAction::Continue);
        }
        assert!(h.host().sent.is_empty());
    }

    #[test]
    fn test_interrupt_and_eot_quit_in_any_state() {
        let mut h = handler(2, 2);
        assert_eq!(h.on_interrupt().unwrap(), LoopAction::Quit(0));

        h.on_mouse_event(move_to(1, 1)).unwrap();
        assert_eq!(h.on_interrupt().unwrap(), LoopAction::Quit(0));
        assert_eq!(h.on_eot().unwrap(), LoopAction::Quit(0));
    }

    #[test]
    fn test_reset_key() {
        let mut h = handler(2, 2);
        h.on_text("xR").unwrap();

        let sent = &h.host().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(axis_and_increment(&sent[0]), ("reset".to_string(), 0));
        assert_eq!(h.host().frames.len(), 1);

        h.on_text("q").unwrap();
        assert_eq!(h.host().sent.len(), 1);
    }

    #[test]
    fn test_failed_response_changes_nothing() {
        let mut h = handler(2, 2);
        h.on_mouse_event(move_to(3, 3)).unwrap();

        let response = RemoteResponse {
            ok: false,
            data: None,
            error: Some("No matching windows".into()),
            tb: None,
        };
        assert_eq!(h.on_remote_response(response).unwrap(), LoopAction::Continue);
        assert_eq!(h.previous_cell, Some(Cell::new(3, 3)));
        assert!(h.host().sent.is_empty());
    }

    #[test]
    fn test_debug_block_shows_tracked_cells() {
        let mut h = handler(2, 2);
        h.on_mouse_event(move_to(5, 5)).unwrap();
        h.on_mouse_event(move_to(8, 6)).unwrap();

        let frame = &h.host().frames[0];
        assert_eq!(frame.len(), 7);
        assert_eq!(frame[3], "Debug info:");
        assert_eq!(frame[4], "Position: 80, 120");
        assert_eq!(frame[5], "Previous Cell: 5, 5");
        assert_eq!(frame[6], "Current Cell:  8, 6");
    }

    #[test]
    fn test_screen_lines_before_any_move() {
        let h = handler(2, 2);
        let lines = h.screen_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Release the right mouse button to stop resizing");
    }

    #[test]
    fn test_large_delta_saturates() {
        let mut h = handler(i32::MAX, 2);
        h.on_mouse_event(move_to(0, 0)).unwrap();
        h.on_mouse_event(move_to(u16::MAX, 0)).unwrap();

        assert_eq!(axis_and_increment(&h.host().sent[0]).1, i64::from(i32::MAX));
    }
}

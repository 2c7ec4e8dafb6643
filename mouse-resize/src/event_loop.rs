//! Session event loop
//!
//! Reads terminal input, decodes it and hands each event to the handler in
//! arrival order. Everything runs on the current thread.

use std::future::Future;
use std::io;

use futures::{Stream, StreamExt};
use tokio_util::codec::FramedRead;

use mouse_resize_utils::Result;

use crate::cli::ResizeOptions;
use crate::handler::{Handler, LoopAction, MouseResize};
use crate::host::TerminalHost;
use crate::input::{CellGeometry, InputDecoder, InputEvent};
use crate::terminal::TerminalGuard;

/// Run an interactive resize session and return the exit code
pub async fn run(opts: ResizeOptions) -> Result<i32> {
    let geometry = CellGeometry::query();
    let decoder = InputDecoder::new(geometry);
    tracing::info!(?opts, pixel_mode = decoder.pixel_mode(), "starting resize session");

    let _guard = TerminalGuard::enter(decoder.pixel_mode())?;

    let mut handler = MouseResize::new(opts, TerminalHost::new(io::stdout()));
    let mut events = FramedRead::new(tokio::io::stdin(), decoder);

    run_loop(&mut handler, &mut events, tokio::signal::ctrl_c()).await
}

/// Drive `handler` with `events` until it asks to quit
///
/// End of the stream counts as end-of-transmission and completion of
/// `interrupt` (SIGINT in a real session) as an interrupt, delivered once.
/// `finalize` runs on every exit path.
pub async fn run_loop<H, S, I>(handler: &mut H, events: &mut S, interrupt: I) -> Result<i32>
where
    H: Handler,
    S: Stream<Item = io::Result<InputEvent>> + Unpin,
    I: Future<Output = io::Result<()>>,
{
    handler.initialize()?;

    // One SIGINT listener for the whole session
    tokio::pin!(interrupt);
    let mut interrupted = false;

    let result = loop {
        let event = tokio::select! {
            next = events.next() => match next {
                Some(Ok(event)) => event,
                Some(Err(e)) => break Err(e.into()),
                None => InputEvent::EndOfTransmission,
            },
            signal = &mut interrupt, if !interrupted => {
                interrupted = true;
                match signal {
                    Ok(()) => InputEvent::Interrupt,
                    Err(e) => {
                        tracing::warn!("cannot listen for SIGINT: {}", e);
                        continue;
                    }
                }
            }
        };

        match dispatch(handler, event) {
            Ok(LoopAction::Continue) => {}
            Ok(LoopAction::Quit(code)) => break Ok(code),
            Err(e) => break Err(e),
        }
    };

    let finalized = handler.finalize();
    let code = result?;
    finalized?;

    tracing::info!(code, "resize session finished");
    Ok(code)
}

/// Route one event to the matching handler callback
pub fn dispatch<H: Handler>(handler: &mut H, event: InputEvent) -> Result<LoopAction> {
    match event {
        InputEvent::Mouse(ev) => handler.on_mouse_event(ev),
        InputEvent::Text(text) => handler.on_text(&text),
        InputEvent::Interrupt => handler.on_interrupt(),
        InputEvent::EndOfTransmission => handler.on_eot(),
        InputEvent::RemoteResponse(response) => handler.on_remote_response(response),
    }
}

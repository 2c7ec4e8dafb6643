//! mouse-resize: resize the current terminal window with the mouse
//!
//! Tracks mouse motion over the window and sends `resize-window`
//! remote-control requests to the terminal for every cell the pointer
//! crosses. Releasing the right mouse button ends the session.

use clap::Parser;

use mouse_resize_utils::{init_logging_with_config, LogConfig};

mod cli;
mod event_loop;
mod handler;
mod host;
mod input;
mod terminal;

use cli::{report_parse_error, ResizeOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command-line arguments first (before terminal setup)
    let opts = match ResizeOptions::try_parse() {
        Ok(opts) => opts,
        Err(e) => std::process::exit(report_parse_error(e)),
    };

    // Log to file, the screen belongs to the resize display
    if let Err(e) = init_logging_with_config(LogConfig::interactive()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    tracing::debug!("CLI args: {:?}", opts);

    let exit_code = match event_loop::run(opts).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("mouse-resize error: {}", e);
            // Terminal is restored by now, so stderr is visible again
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

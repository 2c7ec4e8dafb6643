//! Command-line options
//!
//! Uses clap for argument parsing with derive macros.

use std::io::{self, BufRead, IsTerminal, Write};

use clap::Parser;

/// Resize the current window
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mouse-resize", version, about, long_about = None)]
pub struct ResizeOptions {
    /// The base horizontal increment
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    pub horizontal_increment: i32,

    /// The base vertical increment
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    pub vertical_increment: i32,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            horizontal_increment: 2,
            vertical_increment: 2,
        }
    }
}

/// Report a failed parse and return the exit code to use
///
/// Help and version output go to stdout with code 0. Real errors go to
/// stderr; when attached to a terminal we also wait for Enter, since the
/// window running us may close as soon as we exit.
pub fn report_parse_error(err: clap::Error) -> i32 {
    let code = err.exit_code();
    if code == 0 {
        let _ = err.print();
        return 0;
    }

    eprintln!("{}", err.render().to_string().trim_end());

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Press Enter to quit");
        let _ = io::stderr().flush();
        let _ = stdin.lock().read_line(&mut String::new());
    }

    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let opts = ResizeOptions::try_parse_from(["mouse-resize"]).unwrap();
        assert_eq!(opts, ResizeOptions::default());
        assert_eq!(opts.horizontal_increment, 2);
        assert_eq!(opts.vertical_increment, 2);
    }

    #[test]
    fn test_increments() {
        let opts = ResizeOptions::try_parse_from([
            "mouse-resize",
            "--horizontal-increment=4",
            "--vertical-increment",
            "3",
        ])
        .unwrap();
        assert_eq!(opts.horizontal_increment, 4);
        assert_eq!(opts.vertical_increment, 3);
    }

    #[test]
    fn test_invalid_increment_is_error() {
        let err = ResizeOptions::try_parse_from(["mouse-resize", "--horizontal-increment=wide"])
            .unwrap_err();
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let err = ResizeOptions::try_parse_from(["mouse-resize", "--diagonal-increment=1"])
            .unwrap_err();
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_help_exit_code_is_zero() {
        let err = ResizeOptions::try_parse_from(["mouse-resize", "--help"]).unwrap_err();
        assert_eq!(err.exit_code(), 0);
    }
}

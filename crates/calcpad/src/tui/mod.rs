//! Terminal frontend
//!
//! Crossterm key events are mapped to [`AppAction`]s, applied to a
//! [`CalculatorApp`] and drawn as a plain-text frame.

mod app;
mod input;
mod ui;

pub use app::CalculatorApp;
pub use input::{AppAction, InputHandler};
pub use ui::{draw, frame_width, render_lines, HELP, TITLE};

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use tracing::info;

use crate::core::DisplayFormat;

/// Runs the interactive keypad until the user quits.
///
/// The terminal is restored even when the loop fails.
pub fn run(format: DisplayFormat) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();

    let result = execute!(stdout, EnterAlternateScreen, Hide)
        .and_then(|()| run_app(&mut stdout, CalculatorApp::with_format(format)));

    restore(&mut stdout, result, disable_raw_mode)
}

/// Runs both restore steps whatever happened, then reports the first error
fn restore<W: Write>(
    out: &mut W,
    result: io::Result<()>,
    disable_raw: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let left = execute!(out, Show, LeaveAlternateScreen);
    let raw = disable_raw();
    result.and(left).and(raw)
}

fn run_app<W: Write>(out: &mut W, mut app: CalculatorApp) -> io::Result<()> {
    let handler = InputHandler::new();
    info!("terminal keypad started");

    loop {
        draw(out, &app)?;

        if let Event::Key(key) = event::read()? {
            if app.handle_action(handler.handle_key(key)) {
                break;
            }
        }
    }

    info!(current = %app.display().current, "terminal keypad closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct BrokenTerminal;

    impl Write for BrokenTerminal {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }
    }

    #[test]
    fn test_restore_disables_raw_mode_when_leaving_screen_fails() {
        let disabled = Cell::new(false);
        let result = restore(&mut BrokenTerminal, Ok(()), || {
            disabled.set(true);
            Ok(())
        });
        assert!(disabled.get());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_restore_reports_loop_error_first() {
        let disabled = Cell::new(false);
        let failed = Err(io::Error::new(io::ErrorKind::Interrupted, "loop failed"));
        let result = restore(&mut BrokenTerminal, failed, || {
            disabled.set(true);
            Err(io::Error::other("raw mode"))
        });
        assert!(disabled.get());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::Interrupted);
    }

    #[test]
    fn test_restore_writes_leave_sequence() {
        let mut out = Vec::new();
        restore(&mut out, Ok(()), || Ok(())).unwrap();
        assert!(!out.is_empty());
    }
}

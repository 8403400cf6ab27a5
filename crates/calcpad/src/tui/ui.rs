//! Frame rendering
//!
//! The frame is built as plain lines first so it can be asserted on in tests,
//! then queued to the terminal with crossterm.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use super::app::CalculatorApp;

/// Title line
pub const TITLE: &str = "calcpad";

/// Key help line
pub const HELP: &str = "q quit  Esc clear  Enter =  Bksp del";

/// Width of one keypad cell, brackets included
const CELL_WIDTH: usize = 5;

/// Width of the keypad and display area
#[must_use]
pub fn frame_width(app: &CalculatorApp) -> usize {
    let (_, cols) = app.keypad().dimensions();
    cols * CELL_WIDTH + cols.saturating_sub(1)
}

/// Right-aligns `text` in `width` columns, keeping its tail when too long
fn right_align(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        text.chars().skip(len - width).collect()
    } else {
        format!("{text:>width$}")
    }
}

fn render_cell(label: &str, highlighted: bool) -> String {
    if highlighted {
        format!("<{label:^3}>")
    } else {
        format!("[{label:^3}]")
    }
}

/// Renders the frame: title, history, current value, rule, keypad rows, help
#[must_use]
pub fn render_lines(app: &CalculatorApp) -> Vec<String> {
    let width = frame_width(app);
    let display = app.display();
    let (rows, _) = app.keypad().dimensions();

    let mut lines = Vec::with_capacity(rows + 5);
    lines.push(TITLE.to_string());
    lines.push(right_align(display.history.trim_end(), width));
    lines.push(right_align(&display.current, width));
    lines.push("-".repeat(width));

    for row in 0..rows {
        let cells: Vec<String> = app
            .keypad()
            .row(row)
            .map(|button| {
                let highlighted = app.highlighted() == Some(button.id.as_str());
                render_cell(&button.label(), highlighted)
            })
            .collect();
        lines.push(cells.join(" "));
    }

    lines.push(HELP.to_string());
    lines
}

/// Queues the frame to `out` and flushes it
pub fn draw<W: Write>(out: &mut W, app: &CalculatorApp) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (i, line) in render_lines(app).iter().enumerate() {
        queue!(out, MoveTo(0, i as u16))?;
        // The current value line stands out
        if i == 2 {
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print(line),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(line))?;
        }
    }
    out.flush()
}

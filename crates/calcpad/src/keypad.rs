//! Keypad layout shared by the terminal and browser frontends
//!
//! Layout:
//! ```text
//! [ AC ] [ DEL ] [ % ] [ / ]
//! [ 7  ] [ 8   ] [ 9 ] [ * ]
//! [ 4  ] [ 5   ] [ 6 ] [ - ]
//! [ 1  ] [ 2   ] [ 3 ] [ + ]
//! [ 0  ] [ .   ] [ = ]
//! ```

use serde::Serialize;

use crate::core::Operation;
use crate::input::InputEvent;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeypadButton {
    /// The event this button produces
    pub event: InputEvent,
    /// Stable element ID
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a new button, deriving its element ID from the event
    #[must_use]
    pub fn new(event: InputEvent, row: usize, col: usize) -> Self {
        let id = match event {
            InputEvent::Digit(d) => format!("btn-{d}"),
            InputEvent::Decimal => "btn-decimal".to_string(),
            InputEvent::Operator(op) => format!("btn-{}", op_name(op)),
            InputEvent::Compute => "btn-equals".to_string(),
            InputEvent::DeleteLast => "btn-delete".to_string(),
            InputEvent::Clear => "btn-clear".to_string(),
        };
        Self { event, id, row, col }
    }

    /// Button label
    #[must_use]
    pub fn label(&self) -> String {
        self.event.label()
    }
}

const fn op_name(op: Operation) -> &'static str {
    match op {
        Operation::Add => "plus",
        Operation::Subtract => "minus",
        Operation::Multiply => "times",
        Operation::Divide => "divide",
        Operation::Modulo => "mod",
    }
}

/// The 5x4 calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use InputEvent::{Clear, Compute, Decimal, DeleteLast, Digit, Operator};

        let buttons = vec![
            // Row 0: AC DEL % /
            KeypadButton::new(Clear, 0, 0),
            KeypadButton::new(DeleteLast, 0, 1),
            KeypadButton::new(Operator(Operation::Modulo), 0, 2),
            KeypadButton::new(Operator(Operation::Divide), 0, 3),
            // Row 1: 7 8 9 *
            KeypadButton::new(Digit(7), 1, 0),
            KeypadButton::new(Digit(8), 1, 1),
            KeypadButton::new(Digit(9), 1, 2),
            KeypadButton::new(Operator(Operation::Multiply), 1, 3),
            // Row 2: 4 5 6 -
            KeypadButton::new(Digit(4), 2, 0),
            KeypadButton::new(Digit(5), 2, 1),
            KeypadButton::new(Digit(6), 2, 2),
            KeypadButton::new(Operator(Operation::Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButton::new(Digit(1), 3, 0),
            KeypadButton::new(Digit(2), 3, 1),
            KeypadButton::new(Digit(3), 3, 2),
            KeypadButton::new(Operator(Operation::Add), 3, 3),
            // Row 4: 0 . =
            KeypadButton::new(Digit(0), 4, 0),
            KeypadButton::new(Decimal, 4, 1),
            KeypadButton::new(Compute, 4, 2),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// All buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Buttons of one row
    pub fn row(&self, row: usize) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter().filter(move |b| b.row == row)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button a keyboard key corresponds to
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&KeypadButton> {
        let event = InputEvent::from_key(key)?;
        self.find_by_event(event)
    }

    /// Finds the button producing an event
    #[must_use]
    pub fn find_by_event(&self, event: InputEvent) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.event == event)
    }

    /// Processes a button click and returns its event
    #[must_use]
    pub fn handle_click(&self, id: &str) -> Option<InputEvent> {
        self.find_by_id(id).map(|b| b.event)
    }
}

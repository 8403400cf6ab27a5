//! Browser bindings
//!
//! The page owns the markup; it forwards button clicks (by element ID) and
//! `keydown` keys here and renders the two returned display strings.

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::controller::Calculator;
use crate::core::DisplayFormat;

/// Browser calculator - the WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    calculator: Calculator,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a new browser calculator
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            calculator: Calculator::new(),
        }
    }

    /// Create a calculator with a custom thousands separator
    pub fn with_separator(separator: &str) -> Self {
        console_error_panic_hook::set_once();
        Self {
            calculator: Calculator::with_format(
                DisplayFormat::new().with_group_separator(separator),
            ),
        }
    }

    /// Handle a keypad button click by element ID; false for unknown IDs
    pub fn handle_button(&mut self, button_id: &str) -> bool {
        self.calculator.press_button(button_id)
    }

    /// Handle a `keydown` key; false when the key is not mapped and the page
    /// should not prevent its default action
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.calculator.press_key(key)
    }

    /// Text for the current operand element
    #[wasm_bindgen(getter)]
    pub fn current(&self) -> String {
        self.calculator.display().current.clone()
    }

    /// Text for the expression history element
    #[wasm_bindgen(getter)]
    pub fn history(&self) -> String {
        self.calculator.display().history.clone()
    }

    /// Reset the calculator
    pub fn clear(&mut self) {
        self.calculator.reset();
    }

    /// Display as JSON (`{"current": ..., "history": ...}`)
    pub fn display_json(&self) -> String {
        serde_json::to_string(self.calculator.display()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Element IDs of all keypad buttons in row-major order
    pub fn button_ids(&self) -> Vec<String> {
        self.calculator
            .keypad()
            .buttons()
            .iter()
            .map(|b| b.id.clone())
            .collect()
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"calcpad initialized".into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_calculator_new() {
        let calc = BrowserCalculator::new();
        assert_eq!(calc.current(), "0");
        assert_eq!(calc.history(), "");
    }

    #[test]
    fn test_handle_button() {
        let mut calc = BrowserCalculator::new();
        assert!(calc.handle_button("btn-5"));
        assert!(calc.handle_button("btn-plus"));
        assert!(calc.handle_button("btn-3"));
        assert_eq!(calc.current(), "3");
        assert_eq!(calc.history(), "5 + ");
        assert!(!calc.handle_button("btn-open-paren"));
    }

    #[test]
    fn test_handle_key() {
        let mut calc = BrowserCalculator::new();
        for key in ["7", "*", "6", "Enter"] {
            assert!(calc.handle_key(key));
        }
        assert_eq!(calc.current(), "42");
        assert!(!calc.handle_key("Tab"));
    }

    #[test]
    fn test_clear() {
        let mut calc = BrowserCalculator::new();
        calc.handle_key("9");
        calc.clear();
        assert_eq!(calc.current(), "0");
    }

    #[test]
    fn test_with_separator() {
        let mut calc = BrowserCalculator::with_separator(" ");
        for key in ["1", "0", "0", "0"] {
            calc.handle_key(key);
        }
        assert_eq!(calc.current(), "1 000");
    }

    #[test]
    fn test_display_json() {
        let calc = BrowserCalculator::new();
        assert_eq!(calc.display_json(), r#"{"current":"0","history":""}"#);
    }

    #[test]
    fn test_button_ids() {
        let ids = BrowserCalculator::new().button_ids();
        assert_eq!(ids.len(), 19);
        assert_eq!(ids[0], "btn-clear");
    }
}

//! # Cash Tender Keypad
//!
//! Buffer behind the on-screen numeric keypad used to enter cash received.
//!
//! ```text
//! ┌───┬───┬───┐
//! │ 7 │ 8 │ 9 │      press(Digit(4)) ─► "4"
//! ├───┼───┼───┤      press(Digit(0)) ─► "40"
//! │ 4 │ 5 │ 6 │      press(Digit(0)) ─► "400"
//! ├───┼───┼───┤      press(Point)    ─► "400."
//! │ 1 │ 2 │ 3 │      press(Point)    ─► "400."   (one point only)
//! ├───┼───┼───┤      press(Digit(5)) ─► "400.5"
//! │ 0 │ . │ ← │      press(Digit(0)) ─► "400.50"
//! ├───┴───┴───┤      press(Digit(1)) ─► "400.50" (two decimals max)
//! │     C     │
//! └───────────┘
//! ```
//!
//! The buffer only ever holds text that [`Money::parse`] accepts (or an empty
//! string), so whatever the keypad produces can go straight to checkout.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// A key on the cash keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum KeypadKey {
    /// Digit 0-9. Larger values are ignored.
    Digit(u8),
    Point,
    Backspace,
    Clear,
}

impl KeypadKey {
    /// Maps a keypad button label (`"0"`-`"9"`, `"."`, `"←"`, `"C"`) to a key.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "." => Some(KeypadKey::Point),
            "←" => Some(KeypadKey::Backspace),
            "C" => Some(KeypadKey::Clear),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_digit(10).map(|d| KeypadKey::Digit(d as u8)),
                    _ => None,
                }
            }
        }
    }
}

/// Cash typed on the keypad, kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashInput {
    buffer: String,
}

impl CashInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a key press. Returns `false` when the key was rejected.
    pub fn press(&mut self, key: KeypadKey) -> bool {
        match key {
            KeypadKey::Digit(d) if d <= 9 => {
                if self.decimals().map_or(false, |n| n >= 2) {
                    return false;
                }
                let digit = char::from(b'0' + d);
                if self.buffer == "0" {
                    self.buffer.clear();
                }
                self.buffer.push(digit);
                true
            }
            KeypadKey::Digit(_) => false,
            KeypadKey::Point => {
                if self.buffer.contains('.') {
                    return false;
                }
                if self.buffer.is_empty() {
                    self.buffer.push('0');
                }
                self.buffer.push('.');
                true
            }
            KeypadKey::Backspace => self.buffer.pop().is_some(),
            KeypadKey::Clear => {
                let changed = !self.buffer.is_empty();
                self.buffer.clear();
                changed
            }
        }
    }

    /// Number of digits after the point, if a point was typed.
    fn decimals(&self) -> Option<usize> {
        self.buffer.split_once('.').map(|(_, frac)| frac.len())
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Parsed amount; `Required` while nothing has been typed.
    pub fn amount(&self) -> Result<Money, ValidationError> {
        Money::parse("cash", &self.buffer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(labels: &[&str]) -> CashInput {
        let mut input = CashInput::new();
        for label in labels {
            input.press(KeypadKey::from_label(label).unwrap());
        }
        input
    }

    #[test]
    fn test_digits_build_amount() {
        let input = type_keys(&["4", "0", "0"]);
        assert_eq!(input.as_str(), "400");
        assert_eq!(input.amount().unwrap().cents(), 40000);
    }

    #[test]
    fn test_single_point_and_two_decimals() {
        let mut input = type_keys(&["1", "3", ".", "6"]);
        assert!(!input.press(KeypadKey::Point));
        assert!(input.press(KeypadKey::Digit(0)));
        assert!(!input.press(KeypadKey::Digit(5)));
        assert_eq!(input.as_str(), "13.60");
        assert_eq!(input.amount().unwrap().cents(), 1360);
    }

    #[test]
    fn test_leading_point_gets_zero() {
        let input = type_keys(&[".", "5"]);
        assert_eq!(input.as_str(), "0.5");
        assert_eq!(input.amount().unwrap().cents(), 50);
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let input = type_keys(&["0", "0", "7"]);
        assert_eq!(input.as_str(), "7");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut input = type_keys(&["5", ".", "2"]);
        assert!(input.press(KeypadKey::Backspace));
        assert_eq!(input.as_str(), "5.");
        // a trailing point still parses
        assert_eq!(input.amount().unwrap().cents(), 500);

        assert!(input.press(KeypadKey::Digit(2)));
        assert!(input.press(KeypadKey::Clear));
        assert!(input.is_empty());
        assert!(!input.press(KeypadKey::Backspace));
        assert!(!input.press(KeypadKey::Clear));
        assert!(matches!(input.amount(), Err(ValidationError::Required { .. })));
    }

    #[test]
    fn test_out_of_range_digit_rejected() {
        let mut input = CashInput::new();
        assert!(!input.press(KeypadKey::Digit(10)));
        assert!(input.is_empty());
    }

    #[test]
    fn test_from_label() {
        assert_eq!(KeypadKey::from_label("7"), Some(KeypadKey::Digit(7)));
        assert_eq!(KeypadKey::from_label("."), Some(KeypadKey::Point));
        assert_eq!(KeypadKey::from_label("←"), Some(KeypadKey::Backspace));
        assert_eq!(KeypadKey::from_label("C"), Some(KeypadKey::Clear));
        assert_eq!(KeypadKey::from_label("12"), None);
        assert_eq!(KeypadKey::from_label("x"), None);
    }
}

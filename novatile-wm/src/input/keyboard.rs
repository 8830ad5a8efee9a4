//! Keyboard events.

use super::Modifiers;

/// Linux input scan code of the Tab key.
pub const KEY_TAB: u32 = 15;
/// Linux input scan code of the key left of `1` (grave/tilde).
pub const KEY_GRAVE: u32 = 41;
pub const KEY_F4: u32 = 62;
pub const KEY_F11: u32 = 87;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardAction {
    Down,
    Up,
    Repeat,
}

/// A key changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub action: KeyboardAction,
    pub scan_code: u32,
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    pub fn new(action: KeyboardAction, scan_code: u32, modifiers: Modifiers) -> Self {
        Self {
            action,
            scan_code,
            modifiers,
        }
    }

    /// A key press.
    pub fn key_down(scan_code: u32, modifiers: Modifiers) -> Self {
        Self::new(KeyboardAction::Down, scan_code, modifiers)
    }
}

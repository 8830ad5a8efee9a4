//! Pointer events.

use bitflags::bitflags;
use novatile_core::Point;

use super::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    ButtonDown,
    ButtonUp,
    Enter,
    Leave,
    Motion,
}

bitflags! {
    /// Buttons held after the event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u32 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
        const TERTIARY = 1 << 2;
        const BACK = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::empty()
    }
}

/// The pointer moved or a button changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub action: PointerAction,
    /// Position in the global display layout.
    pub position: Point,
    pub buttons: PointerButtons,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(action: PointerAction, position: Point, buttons: PointerButtons, modifiers: Modifiers) -> Self {
        Self {
            action,
            position,
            buttons,
            modifiers,
        }
    }

    /// A button press; `buttons` includes the pressed button.
    pub fn button_down(position: Point, buttons: PointerButtons, modifiers: Modifiers) -> Self {
        Self::new(PointerAction::ButtonDown, position, buttons, modifiers)
    }

    pub fn button_up(position: Point, buttons: PointerButtons, modifiers: Modifiers) -> Self {
        Self::new(PointerAction::ButtonUp, position, buttons, modifiers)
    }

    pub fn motion(position: Point, buttons: PointerButtons, modifiers: Modifiers) -> Self {
        Self::new(PointerAction::Motion, position, buttons, modifiers)
    }
}

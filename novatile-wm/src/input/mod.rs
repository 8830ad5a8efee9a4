//! Input events as the window management policy sees them.
//!
//! The event set is closed: keyboard, pointer and touch. [`InputEvent`] wraps them so a
//! policy can route any event with a single `match`.

pub mod keyboard;
pub mod pointer;
pub mod touch;

use bitflags::bitflags;

pub use keyboard::{KeyboardAction, KeyboardEvent};
pub use pointer::{PointerAction, PointerButtons, PointerEvent};
pub use touch::{TouchAction, TouchEvent, TouchPoint};

bitflags! {
    /// Modifier keys held while an event happened.
    ///
    /// Each modifier has a generic bit plus left and right variants. Input sources set
    /// the generic bit together with the side that is pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const ALT = 1 << 0;
        const ALT_LEFT = 1 << 1;
        const ALT_RIGHT = 1 << 2;
        const SHIFT = 1 << 3;
        const SHIFT_LEFT = 1 << 4;
        const SHIFT_RIGHT = 1 << 5;
        const SYM = 1 << 6;
        const FUNCTION = 1 << 7;
        const CTRL = 1 << 8;
        const CTRL_LEFT = 1 << 9;
        const CTRL_RIGHT = 1 << 10;
        const META = 1 << 11;
        const META_LEFT = 1 << 12;
        const META_RIGHT = 1 << 13;
        const CAPS_LOCK = 1 << 14;
        const NUM_LOCK = 1 << 15;
        const SCROLL_LOCK = 1 << 16;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// The modifiers shortcuts are matched against. Side bits and lock keys are ignored.
pub const MODIFIER_MASK: Modifiers = Modifiers::ALT
    .union(Modifiers::SHIFT)
    .union(Modifiers::SYM)
    .union(Modifiers::CTRL)
    .union(Modifiers::META);

impl Modifiers {
    /// `self` restricted to [`MODIFIER_MASK`].
    pub fn for_routing(self) -> Modifiers {
        self & MODIFIER_MASK
    }
}

/// Any event delivered to the window management policy.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Keyboard(KeyboardEvent),
    Pointer(PointerEvent),
    Touch(TouchEvent),
}

impl From<KeyboardEvent> for InputEvent {
    fn from(event: KeyboardEvent) -> Self {
        InputEvent::Keyboard(event)
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        InputEvent::Touch(event)
    }
}

//! Window management policies.
//!
//! A policy reacts to topology changes, surface lifecycle events and input. The
//! [`WindowManager`](crate::WindowManager) calls it with exclusive access to the tools,
//! one event at a time.

mod tiling;

pub use tiling::TilingWindowManagerPolicy;

use novatile_core::Rectangles;

use crate::data_types::{SessionId, SurfaceCreationParameters, SurfaceId, SurfaceSpecification, SurfaceState};
use crate::input::{InputEvent, KeyboardEvent, PointerEvent, TouchEvent};
use crate::tools::WindowManagerTools;

pub trait WindowManagementPolicy<T: WindowManagerTools> {
    /// A session was added or removed.
    fn handle_session_info_updated(&mut self, tools: &mut T, displays: &Rectangles);

    /// A display was added or removed.
    fn handle_displays_updated(&mut self, tools: &mut T, displays: &Rectangles);

    /// Decides where a requested surface goes, before it exists.
    fn handle_place_new_surface(
        &mut self,
        tools: &mut T,
        session: SessionId,
        request: &SurfaceCreationParameters,
    ) -> SurfaceCreationParameters;

    fn handle_new_surface(&mut self, tools: &mut T, session: SessionId, surface: SurfaceId);

    /// The surface posted its first frame.
    fn handle_surface_ready(&mut self, tools: &mut T, session: SessionId, surface: SurfaceId);

    fn handle_modify_surface(
        &mut self,
        tools: &mut T,
        session: SessionId,
        surface: SurfaceId,
        modifications: &SurfaceSpecification,
    );

    fn handle_delete_surface(&mut self, tools: &mut T, session: SessionId, surface: SurfaceId);

    /// Returns the state the surface ends up in.
    fn handle_set_state(&mut self, tools: &mut T, surface: SurfaceId, state: SurfaceState) -> SurfaceState;

    fn handle_raise_surface(&mut self, tools: &mut T, session: SessionId, surface: SurfaceId);

    fn handle_keyboard_event(&mut self, tools: &mut T, event: &KeyboardEvent) -> bool;
    fn handle_touch_event(&mut self, tools: &mut T, event: &TouchEvent) -> bool;
    fn handle_pointer_event(&mut self, tools: &mut T, event: &PointerEvent) -> bool;

    /// Routes `event` to the matching handler. Returns `true` if it was consumed.
    fn handle_input_event(&mut self, tools: &mut T, event: &InputEvent) -> bool {
        match event {
            InputEvent::Keyboard(event) => self.handle_keyboard_event(tools, event),
            InputEvent::Touch(event) => self.handle_touch_event(tools, event),
            InputEvent::Pointer(event) => self.handle_pointer_event(tools, event),
        }
    }
}

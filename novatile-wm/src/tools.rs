//! The collaborator interfaces a window management policy drives.
//!
//! A policy never stores surfaces or renders anything. It reads geometry and
//! bookkeeping through these traits and issues move/resize/focus commands back.
//! [`BasicWindowManager`](crate::BasicWindowManager) is the in-memory implementation.
//!
//! Lookups by id take ids the implementation handed out itself. An id that no longer
//! resolves is a broken invariant and implementations treat it as fatal.

use novatile_core::{Point, Size};

use crate::data_types::{SessionId, SessionInfo, SurfaceId, SurfaceInfo, SurfaceState};

/// Operations on sessions and surfaces owned by the display server.
pub trait SurfaceProvider {
    fn top_left(&self, surface: SurfaceId) -> Point;
    fn size(&self, surface: SurfaceId) -> Size;
    fn move_to(&mut self, surface: SurfaceId, top_left: Point);
    fn resize(&mut self, surface: SurfaceId, size: Size);

    /// Whether `point`, in global coordinates, hits the surface's input area.
    fn input_area_contains(&self, surface: SurfaceId, point: Point) -> bool;

    fn rename(&mut self, surface: SurfaceId, name: &str);

    /// Asks the client to close the surface. The surface stays until the client destroys it.
    fn request_client_surface_close(&mut self, surface: SurfaceId);

    /// Sets the state attribute the client sees.
    fn configure_state(&mut self, surface: SurfaceId, state: SurfaceState);

    /// The surface that stands for the session, if it has any.
    fn default_surface(&self, session: SessionId) -> Option<SurfaceId>;

    /// The session's surface after `surface`, wrapping around.
    fn surface_after(&self, session: SessionId, surface: SurfaceId) -> Option<SurfaceId>;

    fn destroy_surface(&mut self, session: SessionId, surface: SurfaceId);

    /// Asks the session's process to exit.
    fn terminate_session(&mut self, session: SessionId);
}

/// Everything a window management policy needs from the window manager.
pub trait WindowManagerTools: SurfaceProvider {
    /// The topmost surface whose input area contains `cursor`.
    fn surface_at(&self, cursor: Point) -> Option<SurfaceId>;

    fn info_for_session(&self, session: SessionId) -> &SessionInfo;
    fn info_for_session_mut(&mut self, session: SessionId) -> &mut SessionInfo;
    fn info_for_surface(&self, surface: SurfaceId) -> &SurfaceInfo;
    fn info_for_surface_mut(&mut self, surface: SurfaceId) -> &mut SurfaceInfo;

    /// Session ids in iteration order of the session info map.
    fn session_ids(&self) -> Vec<SessionId>;

    /// The first session, in map order, whose info satisfies `predicate`.
    fn find_session(&self, predicate: &dyn Fn(&SessionInfo) -> bool) -> Option<SessionId>;

    fn focused_session(&self) -> Option<SessionId>;
    fn focused_surface(&self) -> Option<SurfaceId>;

    /// Moves focus to the next session that has a surface, wrapping around.
    fn focus_next_session(&mut self);

    fn set_focus_to(&mut self, session: Option<SessionId>, surface: Option<SurfaceId>);

    /// Raises `root` and all its descendants to the top, keeping their relative order.
    fn raise_tree(&mut self, root: SurfaceId);
}

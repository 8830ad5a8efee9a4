// novatile-wm/src/error.rs

use thiserror::Error;

use crate::data_types::{SessionId, SurfaceId};
use novatile_core::Rectangle;

/// Errors reported to the embedder of a [`WindowManager`](crate::WindowManager).
///
/// Only ids passed in from outside are checked this way. Absence conditions during
/// input routing (no session under the cursor, nothing focusable) are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowManagerError {
    /// The session id is not (or no longer) known to the window manager.
    #[error("Unknown session: {0}")]
    UnknownSession(SessionId),

    /// The surface id is not (or no longer) known to the window manager.
    #[error("Unknown surface: {0}")]
    UnknownSurface(SurfaceId),

    /// No display with this area has been added.
    #[error("Unknown display: {0}")]
    UnknownDisplay(Rectangle),
}

//! # novatile Window Management
//!
//! Decides where client surfaces go and who has input focus. Each session owns one
//! tile of the display layout; the [`TilingWindowManagerPolicy`] keeps every surface
//! inside its session's tile while routing keyboard, pointer and touch input.
//!
//! The policy only talks to the [`WindowManagerTools`] trait. [`BasicWindowManager`] is
//! the in-memory implementation, and [`WindowManager`] ties both together behind an API
//! that validates ids coming from the embedding display server.
//!
//! ```
//! use novatile_core::{Rectangle, Size};
//! use novatile_wm::{SurfaceCreationParameters, TilingWindowManager};
//!
//! let mut wm = TilingWindowManager::default();
//! wm.add_display(Rectangle::from_xywh(0, 0, 1920, 1080));
//! let editor = wm.add_session("editor", None);
//! let terminal = wm.add_session("terminal", None);
//!
//! assert_eq!(wm.tile(editor).unwrap(), Rectangle::from_xywh(0, 0, 960, 1080));
//! assert_eq!(wm.tile(terminal).unwrap(), Rectangle::from_xywh(960, 0, 960, 1080));
//!
//! let window = wm
//!     .add_surface(terminal, SurfaceCreationParameters::new(Size::new(2000, 500)))
//!     .unwrap();
//! assert_eq!(wm.surface_geometry(window).unwrap(), Rectangle::from_xywh(960, 0, 960, 500));
//! ```

pub mod basic;
pub mod data_types;
pub mod error;
pub mod input;
pub mod manager;
pub mod policy;
pub mod scene;
pub mod tools;

pub use basic::{BasicWindowManager, Session};
pub use data_types::{
    EdgeAttachment, SessionId, SessionInfo, SessionInfoMap, SurfaceCreationParameters, SurfaceId, SurfaceInfo,
    SurfaceInfoMap, SurfaceSpecification, SurfaceState, SurfaceType,
};
pub use error::WindowManagerError;
pub use input::{InputEvent, Modifiers, MODIFIER_MASK};
pub use manager::{TilingWindowManager, WindowManager};
pub use policy::{TilingWindowManagerPolicy, WindowManagementPolicy};
pub use tools::{SurfaceProvider, WindowManagerTools};

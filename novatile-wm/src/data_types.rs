// novatile-wm/src/data_types.rs

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use novatile_core::{Point, Rectangle, Size};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a client session.
///
/// Ids are handed out in increasing order, so a map keyed by `SessionId` iterates in
/// the order sessions were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a new, unique `SessionId`.
    pub fn new_unique() -> Self {
        SessionId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Unique identifier for a surface. Ordered by creation like [`SessionId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Creates a new, unique `SurfaceId`.
    pub fn new_unique() -> Self {
        SurfaceId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// The role a client gave a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceType {
    /// An ordinary application window.
    #[default]
    Normal,
    /// A tool palette or similar helper window.
    Utility,
    /// A dialog, usually with a parent.
    Dialog,
    /// Drawn over everything else, never focused.
    Overlay,
    /// Client-managed placement.
    Freestyle,
    /// A menu or popup attached to its parent.
    Popover,
    /// A window that belongs to another, e.g. a toolbox.
    Satellite,
    /// A tooltip.
    Tip,
    /// An on-screen keyboard.
    InputMethod,
}

/// Visual state of a surface.
///
/// Tiling only acts on `Restored` and the three maximized states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceState {
    Unknown,
    #[default]
    Restored,
    Minimized,
    Maximized,
    VertMaximized,
    Fullscreen,
    HorizMaximized,
    Hidden,
}

impl SurfaceState {
    /// Returns `true` for the states the tiling policy can move a surface into.
    pub fn is_tiling_state(self) -> bool {
        matches!(
            self,
            SurfaceState::Restored
                | SurfaceState::Maximized
                | SurfaceState::VertMaximized
                | SurfaceState::HorizMaximized
        )
    }
}

bitflags! {
    /// Which edges of an anchor rectangle a child surface may attach to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EdgeAttachment: u32 {
        /// Left or right edge.
        const VERTICAL = 1 << 0;
        /// Top or bottom edge.
        const HORIZONTAL = 1 << 1;
        const ANY = Self::VERTICAL.bits() | Self::HORIZONTAL.bits();
    }
}

/// What the window manager records about a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionInfo {
    /// Surfaces of the session in creation order.
    pub surfaces: Vec<SurfaceId>,
    /// The area of the display layout the session owns.
    pub tile: Rectangle,
}

/// What the window manager records about a surface.
///
/// Parent, children and session are plain ids; the [`SurfaceInfoMap`] is the only owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub session: SessionId,
    pub surface_type: SurfaceType,
    pub state: SurfaceState,
    /// Geometry the surface had when it last left [`SurfaceState::Restored`].
    pub restore_rect: Rectangle,
    pub parent: Option<SurfaceId>,
    pub children: Vec<SurfaceId>,
    /// Set until the surface posts its first frame; the surface is then made active.
    pub pending_focus: bool,
}

impl SurfaceInfo {
    pub fn new(session: SessionId, parameters: &SurfaceCreationParameters) -> Self {
        Self {
            session,
            surface_type: parameters.surface_type,
            state: parameters.state,
            restore_rect: Rectangle::new(parameters.top_left, parameters.size),
            parent: parameters.parent,
            children: Vec::new(),
            pending_focus: false,
        }
    }

    /// Whether the surface may receive input focus.
    pub fn can_be_active(&self) -> bool {
        matches!(
            self.surface_type,
            SurfaceType::Normal
                | SurfaceType::Utility
                | SurfaceType::Dialog
                | SurfaceType::Freestyle
                | SurfaceType::Satellite
        )
    }
}

pub type SessionInfoMap = BTreeMap<SessionId, SessionInfo>;
pub type SurfaceInfoMap = BTreeMap<SurfaceId, SurfaceInfo>;

/// A client's request for a new surface. Placement may rewrite position and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceCreationParameters {
    pub name: String,
    pub size: Size,
    pub top_left: Point,
    pub parent: Option<SurfaceId>,
    /// Anchor rectangle for menus and tooltips, relative to the parent.
    pub aux_rect: Option<Rectangle>,
    pub edge_attachment: Option<EdgeAttachment>,
    pub surface_type: SurfaceType,
    pub state: SurfaceState,
}

impl SurfaceCreationParameters {
    pub fn new(size: Size) -> Self {
        Self {
            name: String::new(),
            size,
            top_left: Point::ORIGIN,
            parent: None,
            aux_rect: None,
            edge_attachment: None,
            surface_type: SurfaceType::Normal,
            state: SurfaceState::Restored,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at(mut self, top_left: Point) -> Self {
        self.top_left = top_left;
        self
    }

    pub fn of_type(mut self, surface_type: SurfaceType) -> Self {
        self.surface_type = surface_type;
        self
    }

    pub fn with_parent(mut self, parent: SurfaceId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attaches the surface to `aux_rect` (parent-relative) on one of `edges`.
    pub fn attached_to(mut self, aux_rect: Rectangle, edges: EdgeAttachment) -> Self {
        self.aux_rect = Some(aux_rect);
        self.edge_attachment = Some(edges);
        self
    }

    pub fn with_state(mut self, state: SurfaceState) -> Self {
        self.state = state;
        self
    }
}

/// Changes a client asks for on an existing surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceSpecification {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn ids_increase() {
        let a = SurfaceId::new_unique();
        let b = SurfaceId::new_unique();
        assert!(a < b);
        let s = SessionId::new_unique();
        let t = SessionId::new_unique();
        assert!(s < t);
    }

    #[rstest]
    #[case(SurfaceType::Normal, true)]
    #[case(SurfaceType::Utility, true)]
    #[case(SurfaceType::Dialog, true)]
    #[case(SurfaceType::Overlay, false)]
    #[case(SurfaceType::Freestyle, true)]
    #[case(SurfaceType::Popover, false)]
    #[case(SurfaceType::Satellite, true)]
    #[case(SurfaceType::Tip, false)]
    #[case(SurfaceType::InputMethod, false)]
    fn focus_capability(#[case] surface_type: SurfaceType, #[case] expected: bool) {
        let params = SurfaceCreationParameters::new(Size::new(10, 10)).of_type(surface_type);
        let info = SurfaceInfo::new(SessionId::new_unique(), &params);
        assert_eq!(info.can_be_active(), expected);
    }

    #[test]
    fn builder_sets_every_field() {
        let parent = SurfaceId::new_unique();
        let aux = Rectangle::from_xywh(5, 5, 20, 10);
        let params = SurfaceCreationParameters::new(Size::new(100, 50))
            .with_name("menu")
            .at(Point::new(3, 4))
            .of_type(SurfaceType::Popover)
            .with_parent(parent)
            .attached_to(aux, EdgeAttachment::HORIZONTAL)
            .with_state(SurfaceState::Maximized);

        assert_eq!(params.name, "menu");
        assert_eq!(params.top_left, Point::new(3, 4));
        assert_eq!(params.parent, Some(parent));
        assert_eq!(params.aux_rect, Some(aux));
        assert_eq!(params.edge_attachment, Some(EdgeAttachment::HORIZONTAL));
        assert_eq!(params.state, SurfaceState::Maximized);
    }

    #[test]
    fn any_attachment_covers_both_axes() {
        assert!(EdgeAttachment::ANY.contains(EdgeAttachment::VERTICAL));
        assert!(EdgeAttachment::ANY.contains(EdgeAttachment::HORIZONTAL));
    }

    #[test]
    fn only_four_states_are_tiling_states() {
        assert!(SurfaceState::HorizMaximized.is_tiling_state());
        assert!(!SurfaceState::Fullscreen.is_tiling_state());
        assert!(!SurfaceState::Minimized.is_tiling_state());
    }
}

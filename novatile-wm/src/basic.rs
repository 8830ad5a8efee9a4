// novatile-wm/src/basic.rs

use std::collections::BTreeMap;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use novatile_core::{fatal_error, Point, Rectangle, Size};
use tracing::{debug, info, warn};

use crate::data_types::{
    SessionId, SessionInfo, SessionInfoMap, SurfaceCreationParameters, SurfaceId, SurfaceInfo,
    SurfaceInfoMap, SurfaceState,
};
use crate::scene::{SceneSurface, SurfaceStack};
use crate::tools::{SurfaceProvider, WindowManagerTools};

/// A connected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    /// Process to signal on termination, if the session has one.
    pub process_id: Option<i32>,
}

/// In-memory window manager state: sessions, surfaces, stacking and focus.
///
/// Implements [`WindowManagerTools`] for a policy. It does not decide anything on its
/// own; every geometry change comes from the policy or the embedder.
#[derive(Debug, Default)]
pub struct BasicWindowManager {
    sessions: BTreeMap<SessionId, Session>,
    session_info: SessionInfoMap,
    surface_info: SurfaceInfoMap,
    scene: SurfaceStack,
    focused_session: Option<SessionId>,
    focused_surface: Option<SurfaceId>,
    terminated_sessions: Vec<SessionId>,
}

impl BasicWindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_session(&mut self, name: impl Into<String>, process_id: Option<i32>) -> SessionId {
        let id = SessionId::new_unique();
        let session = Session {
            name: name.into(),
            process_id,
        };
        info!("Session {} ({}) connected", id, session.name);
        self.sessions.insert(id, session);
        self.session_info.insert(id, SessionInfo::default());
        id
    }

    /// Forgets a session. Its surfaces must already be destroyed.
    pub fn remove_session(&mut self, session: SessionId) -> Option<Session> {
        self.session_info.remove(&session);
        let removed = self.sessions.remove(&session)?;
        if self.focused_session == Some(session) {
            self.focused_session = None;
            self.focused_surface = None;
        }
        info!("Session {} ({}) disconnected", session, removed.name);
        Some(removed)
    }

    /// Creates the surface described by already-placed `parameters`.
    pub fn create_surface(&mut self, session: SessionId, parameters: &SurfaceCreationParameters) -> SurfaceId {
        let id = SurfaceId::new_unique();
        let mut surface = SceneSurface::new(session, parameters.name.clone(), parameters.top_left, parameters.size);
        surface.state = parameters.state;
        self.scene.add(id, surface);
        self.surface_info.insert(id, SurfaceInfo::new(session, parameters));
        debug!(
            "Created {} for {} at {} size {}",
            id, session, parameters.top_left, parameters.size
        );
        id
    }

    pub fn set_input_region(&mut self, surface: SurfaceId, region: Option<Vec<Rectangle>>) {
        self.scene_surface_mut(surface).input_region = region;
    }

    pub fn has_session(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    pub fn has_surface(&self, surface: SurfaceId) -> bool {
        self.surface_info.contains_key(&surface)
    }

    pub fn session(&self, session: SessionId) -> Option<&Session> {
        self.sessions.get(&session)
    }

    pub fn session_info(&self) -> &SessionInfoMap {
        &self.session_info
    }

    pub fn surface_info(&self) -> &SurfaceInfoMap {
        &self.surface_info
    }

    pub fn scene_surface(&self, surface: SurfaceId) -> Option<&SceneSurface> {
        self.scene.get(surface)
    }

    /// Bottom to top.
    pub fn stacking_order(&self) -> &[SurfaceId] {
        self.scene.stacking_order()
    }

    /// Sessions asked to terminate, oldest first.
    pub fn terminated_sessions(&self) -> &[SessionId] {
        &self.terminated_sessions
    }

    fn scene_surface_ref(&self, surface: SurfaceId) -> &SceneSurface {
        self.scene
            .get(surface)
            .unwrap_or_else(|| fatal_error!("{} is not in the scene", surface))
    }

    fn scene_surface_mut(&mut self, surface: SurfaceId) -> &mut SceneSurface {
        self.scene
            .get_mut(surface)
            .unwrap_or_else(|| fatal_error!("{} is not in the scene", surface))
    }

    fn collect_tree(&self, root: SurfaceId, into: &mut Vec<SurfaceId>) {
        into.push(root);
        if let Some(info) = self.surface_info.get(&root) {
            for child in &info.children {
                self.collect_tree(*child, into);
            }
        }
    }

    /// `surface` if it can take focus, otherwise its nearest ancestor that can.
    fn focus_target(&self, surface: SurfaceId) -> Option<SurfaceId> {
        let mut current = Some(surface);
        while let Some(id) = current {
            let info = self.surface_info.get(&id)?;
            if info.can_be_active() {
                return Some(id);
            }
            current = info.parent;
        }
        None
    }

    /// The focus target of the oldest surface in `session` that has one.
    fn best_focus_surface(&self, session: SessionId) -> Option<SurfaceId> {
        let mut surfaces = self.session_info.get(&session)?.surfaces.clone();
        surfaces.sort();
        surfaces.into_iter().find_map(|surface| self.focus_target(surface))
    }
}

impl SurfaceProvider for BasicWindowManager {
    fn top_left(&self, surface: SurfaceId) -> Point {
        self.scene_surface_ref(surface).top_left
    }

    fn size(&self, surface: SurfaceId) -> Size {
        self.scene_surface_ref(surface).size
    }

    fn move_to(&mut self, surface: SurfaceId, top_left: Point) {
        self.scene_surface_mut(surface).top_left = top_left;
    }

    fn resize(&mut self, surface: SurfaceId, size: Size) {
        self.scene_surface_mut(surface).size = size;
    }

    fn input_area_contains(&self, surface: SurfaceId, point: Point) -> bool {
        self.scene_surface_ref(surface).input_area_contains(point)
    }

    fn rename(&mut self, surface: SurfaceId, name: &str) {
        self.scene_surface_mut(surface).name = name.to_string();
    }

    fn request_client_surface_close(&mut self, surface: SurfaceId) {
        info!("Requesting client close of {}", surface);
        self.scene_surface_mut(surface).close_requested = true;
    }

    fn configure_state(&mut self, surface: SurfaceId, state: SurfaceState) {
        self.scene_surface_mut(surface).state = state;
    }

    fn default_surface(&self, session: SessionId) -> Option<SurfaceId> {
        self.session_info.get(&session)?.surfaces.iter().min().copied()
    }

    fn surface_after(&self, session: SessionId, surface: SurfaceId) -> Option<SurfaceId> {
        let mut surfaces = self.session_info.get(&session)?.surfaces.clone();
        surfaces.sort();
        let index = surfaces.iter().position(|s| *s == surface)?;
        surfaces.get((index + 1) % surfaces.len()).copied()
    }

    fn destroy_surface(&mut self, session: SessionId, surface: SurfaceId) {
        self.scene.remove(surface);
        if let Some(info) = self.surface_info.remove(&surface) {
            for child in info.children {
                if let Some(child_info) = self.surface_info.get_mut(&child) {
                    child_info.parent = None;
                }
            }
        }
        if self.focused_surface == Some(surface) {
            self.focused_surface = if self.focused_session == Some(session) {
                self.best_focus_surface(session)
            } else {
                None
            };
        }
        debug!("Destroyed {} of {}", surface, session);
    }

    fn terminate_session(&mut self, session: SessionId) {
        self.terminated_sessions.push(session);
        let Some(process_id) = self.sessions.get(&session).and_then(|s| s.process_id) else {
            info!("Terminate requested for {}, which has no process", session);
            return;
        };
        info!("Sending SIGTERM to {} (pid {})", session, process_id);
        if let Err(e) = kill(Pid::from_raw(process_id), Signal::SIGTERM) {
            warn!("Failed to signal pid {} of {}: {}", process_id, session, e);
        }
    }
}

impl WindowManagerTools for BasicWindowManager {
    fn surface_at(&self, cursor: Point) -> Option<SurfaceId> {
        self.scene.surface_at(cursor)
    }

    fn info_for_session(&self, session: SessionId) -> &SessionInfo {
        self.session_info
            .get(&session)
            .unwrap_or_else(|| fatal_error!("no info for {}", session))
    }

    fn info_for_session_mut(&mut self, session: SessionId) -> &mut SessionInfo {
        self.session_info
            .get_mut(&session)
            .unwrap_or_else(|| fatal_error!("no info for {}", session))
    }

    fn info_for_surface(&self, surface: SurfaceId) -> &SurfaceInfo {
        self.surface_info
            .get(&surface)
            .unwrap_or_else(|| fatal_error!("no info for {}", surface))
    }

    fn info_for_surface_mut(&mut self, surface: SurfaceId) -> &mut SurfaceInfo {
        self.surface_info
            .get_mut(&surface)
            .unwrap_or_else(|| fatal_error!("no info for {}", surface))
    }

    fn session_ids(&self) -> Vec<SessionId> {
        self.session_info.keys().copied().collect()
    }

    fn find_session(&self, predicate: &dyn Fn(&SessionInfo) -> bool) -> Option<SessionId> {
        self.session_info
            .iter()
            .find(|(_, info)| predicate(info))
            .map(|(id, _)| *id)
    }

    fn focused_session(&self) -> Option<SessionId> {
        self.focused_session
    }

    fn focused_surface(&self) -> Option<SurfaceId> {
        self.focused_surface
    }

    fn focus_next_session(&mut self) {
        let ids = self.session_ids();
        let start = self
            .focused_session
            .and_then(|current| ids.iter().position(|id| *id == current))
            .map_or(0, |index| index + 1);

        let next = (0..ids.len())
            .map(|offset| ids[(start + offset) % ids.len()])
            .find_map(|id| self.best_focus_surface(id).map(|surface| (id, surface)));

        match next {
            Some((session, surface)) => {
                debug!("Focus moves to {} ({})", session, surface);
                self.set_focus_to(Some(session), Some(surface));
            }
            None => self.set_focus_to(None, None),
        }
    }

    fn set_focus_to(&mut self, session: Option<SessionId>, surface: Option<SurfaceId>) {
        self.focused_session = session;
        self.focused_surface = surface;
    }

    fn raise_tree(&mut self, root: SurfaceId) {
        let mut tree = Vec::new();
        self.collect_tree(root, &mut tree);
        self.scene.raise(&tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::SurfaceType;
    use pretty_assertions::assert_eq;

    fn params() -> SurfaceCreationParameters {
        SurfaceCreationParameters::new(Size::new(100, 100))
    }

    fn add_child(wm: &mut BasicWindowManager, session: SessionId, parent: SurfaceId) -> SurfaceId {
        let child = wm.create_surface(session, &params().with_parent(parent));
        wm.info_for_surface_mut(parent).children.push(child);
        wm.info_for_session_mut(session).surfaces.push(child);
        child
    }

    fn add_root(wm: &mut BasicWindowManager, session: SessionId) -> SurfaceId {
        let surface = wm.create_surface(session, &params());
        wm.info_for_session_mut(session).surfaces.push(surface);
        surface
    }

    fn add_overlay(wm: &mut BasicWindowManager, session: SessionId) -> SurfaceId {
        let surface = wm.create_surface(session, &params().of_type(SurfaceType::Overlay));
        wm.info_for_session_mut(session).surfaces.push(surface);
        surface
    }

    #[test]
    fn focus_next_session_skips_empty_sessions_and_wraps() {
        let mut wm = BasicWindowManager::new();
        let a = wm.add_session("a", None);
        let _empty = wm.add_session("empty", None);
        let c = wm.add_session("c", None);
        let a_surface = add_root(&mut wm, a);
        let c_surface = add_root(&mut wm, c);

        wm.set_focus_to(Some(a), Some(a_surface));
        wm.focus_next_session();
        assert_eq!(wm.focused_session(), Some(c));
        assert_eq!(wm.focused_surface(), Some(c_surface));

        wm.focus_next_session();
        assert_eq!(wm.focused_session(), Some(a));
    }

    #[test]
    fn focus_next_session_only_lands_on_focusable_surfaces() {
        let mut wm = BasicWindowManager::new();
        let a = wm.add_session("a", None);
        let overlays_only = wm.add_session("overlays", None);
        let b = wm.add_session("b", None);
        let a_surface = add_root(&mut wm, a);
        add_overlay(&mut wm, overlays_only);
        add_overlay(&mut wm, b);
        let b_surface = add_root(&mut wm, b);

        wm.set_focus_to(Some(a), Some(a_surface));
        wm.focus_next_session();
        assert_eq!(wm.focused_session(), Some(b));
        assert_eq!(wm.focused_surface(), Some(b_surface));
    }

    #[test]
    fn non_focusable_child_resolves_to_its_parent() {
        let mut wm = BasicWindowManager::new();
        let s = wm.add_session("s", None);
        let parent = add_root(&mut wm, s);
        let tip = wm.create_surface(s, &params().of_type(SurfaceType::Tip).with_parent(parent));
        wm.info_for_surface_mut(parent).children.push(tip);

        assert_eq!(wm.focus_target(tip), Some(parent));
        assert_eq!(wm.best_focus_surface(s), Some(parent));
    }

    #[test]
    fn focus_next_session_without_candidates_clears_focus() {
        let mut wm = BasicWindowManager::new();
        let a = wm.add_session("a", None);
        wm.set_focus_to(Some(a), None);
        wm.focus_next_session();
        assert_eq!(wm.focused_session(), None);
        assert_eq!(wm.focused_surface(), None);
    }

    #[test]
    fn raise_tree_lifts_descendants() {
        let mut wm = BasicWindowManager::new();
        let s = wm.add_session("s", None);
        let parent = add_root(&mut wm, s);
        let child = add_child(&mut wm, s, parent);
        let other = add_root(&mut wm, s);
        let grandchild = add_child(&mut wm, s, child);

        wm.raise_tree(parent);
        assert_eq!(wm.stacking_order(), &[other, parent, child, grandchild]);
    }

    #[test]
    fn surface_after_wraps() {
        let mut wm = BasicWindowManager::new();
        let s = wm.add_session("s", None);
        let first = add_root(&mut wm, s);
        let second = add_root(&mut wm, s);
        assert_eq!(wm.surface_after(s, first), Some(second));
        assert_eq!(wm.surface_after(s, second), Some(first));
        assert_eq!(wm.default_surface(s), Some(first));
    }

    #[test]
    fn destroying_focused_surface_falls_back_to_default() {
        let mut wm = BasicWindowManager::new();
        let s = wm.add_session("s", None);
        let first = add_root(&mut wm, s);
        let second = add_root(&mut wm, s);
        wm.set_focus_to(Some(s), Some(second));

        wm.info_for_session_mut(s).surfaces.retain(|id| *id != second);
        wm.destroy_surface(s, second);
        assert_eq!(wm.focused_surface(), Some(first));
        assert!(!wm.has_surface(second));
    }

    #[test]
    fn destroying_focused_surface_skips_non_focusable_fallbacks() {
        let mut wm = BasicWindowManager::new();
        let s = wm.add_session("s", None);
        let overlay = add_overlay(&mut wm, s);
        let first = add_root(&mut wm, s);
        let second = add_root(&mut wm, s);
        wm.set_focus_to(Some(s), Some(second));

        wm.info_for_session_mut(s).surfaces.retain(|id| *id != second);
        wm.destroy_surface(s, second);
        assert_eq!(wm.default_surface(s), Some(overlay));
        assert_eq!(wm.focused_surface(), Some(first));

        wm.set_focus_to(Some(s), Some(first));
        wm.info_for_session_mut(s).surfaces.retain(|id| *id != first);
        wm.destroy_surface(s, first);
        assert_eq!(wm.focused_session(), Some(s));
        assert_eq!(wm.focused_surface(), None);
    }

    #[test]
    fn destroying_parent_orphans_children() {
        let mut wm = BasicWindowManager::new();
        let s = wm.add_session("s", None);
        let parent = add_root(&mut wm, s);
        let child = add_child(&mut wm, s, parent);

        wm.destroy_surface(s, parent);
        assert_eq!(wm.info_for_surface(child).parent, None);
    }

    #[test]
    fn terminate_without_process_is_recorded() {
        let mut wm = BasicWindowManager::new();
        let s = wm.add_session("s", None);
        wm.terminate_session(s);
        assert_eq!(wm.terminated_sessions(), &[s]);
    }

    #[test]
    fn find_session_uses_map_order() {
        let mut wm = BasicWindowManager::new();
        let a = wm.add_session("a", None);
        let b = wm.add_session("b", None);
        wm.info_for_session_mut(b).tile = Rectangle::from_xywh(0, 0, 10, 10);
        assert_eq!(wm.find_session(&|info| info.tile.is_empty()), Some(a));
        assert_eq!(wm.find_session(&|info| !info.tile.is_empty()), Some(b));
    }
}

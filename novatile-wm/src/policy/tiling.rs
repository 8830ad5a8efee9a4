//! A tiling policy: every session owns one vertical strip of the display layout.
//!
//! Surfaces are placed, moved and resized only within their session's tile. Input
//! shortcuts switch focus between sessions and surfaces and toggle maximized states;
//! Alt plus pointer motion (or a two or three finger touch) resizes or drags the
//! surface under the cursor.

use novatile_core::{Displacement, Point, Rectangle, Rectangles, Size, WindowManagementConfig};
use tracing::{debug, info, trace};

use super::WindowManagementPolicy;
use crate::data_types::{
    EdgeAttachment, SessionId, SurfaceCreationParameters, SurfaceId, SurfaceSpecification, SurfaceState,
};
use crate::input::keyboard::{KEY_F11, KEY_F4, KEY_GRAVE, KEY_TAB};
use crate::input::{
    KeyboardAction, KeyboardEvent, Modifiers, PointerAction, PointerButtons, PointerEvent, TouchAction,
    TouchEvent,
};
use crate::tools::WindowManagerTools;

#[derive(Debug, Clone)]
pub struct TilingWindowManagerPolicy {
    /// Cursor position of the previous pointer or touch event.
    old_cursor: Point,
    dialog_vertical_bias_divisor: i32,
}

impl Default for TilingWindowManagerPolicy {
    fn default() -> Self {
        Self::new(&WindowManagementConfig::default())
    }
}

impl TilingWindowManagerPolicy {
    pub fn new(config: &WindowManagementConfig) -> Self {
        Self {
            old_cursor: Point::ORIGIN,
            dialog_vertical_bias_divisor: config.dialog_vertical_bias_divisor.max(1),
        }
    }

    pub fn old_cursor(&self) -> Point {
        self.old_cursor
    }

    fn session_under<T: WindowManagerTools>(tools: &T, position: Point) -> Option<SessionId> {
        tools.find_session(&|info| info.tile.contains(position))
    }

    fn click<T: WindowManagerTools>(&mut self, tools: &mut T, cursor: Point) {
        let session = Self::session_under(tools, cursor);
        let surface = tools.surface_at(cursor);
        Self::select_active_surface(tools, session, surface);
    }

    /// Splits the bounding rectangle of `displays` into one full-height strip per session.
    fn update_tiles<T: WindowManagerTools>(tools: &mut T, displays: &Rectangles) {
        let sessions = tools.session_ids();
        if sessions.is_empty() || displays.is_empty() {
            return;
        }

        let bounds = displays.bounding_rectangle();
        let count = sessions.len() as i64;
        let total_width = bounds.size.width as i64;

        for (index, session) in sessions.into_iter().enumerate() {
            let index = index as i64;
            let x = (total_width * index) / count;
            let dx = (total_width * (index + 1)) / count - x;
            let new_tile = Rectangle::new(
                bounds.top_left + Displacement::new(x as i32, 0),
                Size::new(dx as i32, bounds.size.height),
            );

            let old_tile = tools.info_for_session(session).tile;
            if old_tile == new_tile {
                continue;
            }
            Self::update_surfaces(tools, session, &old_tile, &new_tile);
            tools.info_for_session_mut(session).tile = new_tile;
            debug!("{} now tiles {} (was {})", session, new_tile, old_tile);
        }
    }

    fn update_surfaces<T: WindowManagerTools>(
        tools: &mut T,
        session: SessionId,
        old_tile: &Rectangle,
        new_tile: &Rectangle,
    ) {
        let displacement = new_tile.top_left - old_tile.top_left;
        let surfaces = tools.info_for_session(session).surfaces.clone();

        for surface in surfaces {
            let old_pos = tools.top_left(surface);
            tools.move_to(surface, old_pos + displacement);
            Self::fit_to_new_tile(tools, surface, old_tile, new_tile);
        }
    }

    /// Shrinks the requested size so the surface ends inside `tile`, down to zero.
    fn clip_to_tile(parameters: &mut SurfaceCreationParameters, tile: &Rectangle) {
        let displacement = parameters.top_left - tile.top_left;

        let width = (tile.size.width - displacement.dx).min(parameters.size.width).max(0);
        let height = (tile.size.height - displacement.dy).min(parameters.size.height).max(0);

        parameters.size = Size::new(width, height);
    }

    fn fit_to_new_tile<T: WindowManagerTools>(
        tools: &mut T,
        surface: SurfaceId,
        old_tile: &Rectangle,
        new_tile: &Rectangle,
    ) {
        let displacement = tools.top_left(surface) - new_tile.top_left;

        // Only an axis that filled the old tile follows the tile's size.
        let old_size = tools.size(surface);
        let scaled_width = if old_size.width == old_tile.size.width {
            new_tile.size.width
        } else {
            old_size.width
        };
        let scaled_height = if old_size.height == old_tile.size.height {
            new_tile.size.height
        } else {
            old_size.height
        };

        let width = (new_tile.size.width - displacement.dx).min(scaled_width).max(0);
        let height = (new_tile.size.height - displacement.dy).min(scaled_height).max(0);

        tools.resize(surface, Size::new(width, height));
    }

    fn drag<T: WindowManagerTools>(&mut self, tools: &mut T, cursor: Point) {
        let Some(session) = Self::session_under(tools, cursor) else {
            return;
        };
        if Self::session_under(tools, self.old_cursor) != Some(session) {
            trace!("Drag crossed tiles; ignored");
            return;
        }
        let target = tools.surface_at(self.old_cursor);
        if let Some(surface) = Self::select_active_surface(tools, Some(session), target) {
            let tile = tools.info_for_session(session).tile;
            Self::drag_surface(tools, surface, cursor, self.old_cursor, &tile);
        }
    }

    fn resize<T: WindowManagerTools>(&mut self, tools: &mut T, cursor: Point) {
        let Some(session) = Self::session_under(tools, cursor) else {
            return;
        };
        if Self::session_under(tools, self.old_cursor) != Some(session) {
            trace!("Resize crossed tiles; ignored");
            return;
        }
        let target = tools.surface_at(self.old_cursor);
        if let Some(surface) = Self::select_active_surface(tools, Some(session), target) {
            let tile = tools.info_for_session(session).tile;
            Self::resize_surface(tools, surface, cursor, self.old_cursor, &tile);
        }
    }

    /// Moves `surface` and its children by `to - from`, each kept within `bounds`.
    fn drag_surface<T: WindowManagerTools>(
        tools: &mut T,
        surface: SurfaceId,
        to: Point,
        from: Point,
        bounds: &Rectangle,
    ) {
        if !tools.input_area_contains(surface, from) {
            debug!("Drag of {} did not start on its input area", surface);
            return;
        }

        let movement = to - from;
        Self::constrained_move(tools, surface, movement, bounds);

        let children = tools.info_for_surface(surface).children.clone();
        for child in children {
            Self::constrained_move(tools, child, movement, bounds);
        }
    }

    /// Clamps each axis of `movement` that heads toward a bound so the surface does not
    /// cross it, then moves the surface.
    fn constrained_move<T: WindowManagerTools>(
        tools: &mut T,
        surface: SurfaceId,
        mut movement: Displacement,
        bounds: &Rectangle,
    ) {
        let top_left = tools.top_left(surface);
        let bottom_right = top_left + tools.size(surface).as_displacement();

        if movement.dx < 0 {
            movement.dx = movement.dx.max((bounds.top_left - top_left).dx);
        }
        if movement.dy < 0 {
            movement.dy = movement.dy.max((bounds.top_left - top_left).dy);
        }
        if movement.dx > 0 {
            movement.dx = movement.dx.min((bounds.bottom_right() - bottom_right).dx);
        }
        if movement.dy > 0 {
            movement.dy = movement.dy.min((bounds.bottom_right() - bottom_right).dy);
        }

        tools.move_to(surface, top_left + movement);
    }

    /// Scales the surface by how far the cursor moved away from its top-left corner.
    fn resize_surface<T: WindowManagerTools>(
        tools: &mut T,
        surface: SurfaceId,
        cursor: Point,
        old_cursor: Point,
        bounds: &Rectangle,
    ) {
        if !tools.input_area_contains(surface, old_cursor) {
            debug!("Resize of {} did not start on its input area", surface);
            return;
        }

        let top_left = tools.top_left(surface);
        let old_displacement = old_cursor - top_left;
        let new_displacement = cursor - top_left;

        let scale_x = new_displacement.dx as f32 / (old_displacement.dx as f32).max(1.0);
        let scale_y = new_displacement.dy as f32 / (old_displacement.dy as f32).max(1.0);

        if scale_x <= 0.0 || scale_y <= 0.0 {
            debug!("Resize of {} to scale ({}, {}) rejected", surface, scale_x, scale_y);
            return;
        }

        let old_size = tools.size(surface);
        let limits = (bounds.bottom_right() - top_left).as_size();
        let new_size = Size::new(
            ((scale_x * old_size.width as f32) as i32).min(limits.width),
            ((scale_y * old_size.height as f32) as i32).min(limits.height),
        );

        tools.resize(surface, new_size);
    }

    /// Focuses and raises `surface`, or its nearest focusable ancestor.
    ///
    /// `None` clears focus. A surface with no focusable ancestor leaves `session` focused
    /// without a surface. Returns the surface that was selected.
    fn select_active_surface<T: WindowManagerTools>(
        tools: &mut T,
        session: Option<SessionId>,
        surface: Option<SurfaceId>,
    ) -> Option<SurfaceId> {
        let Some(surface) = surface else {
            tools.set_focus_to(None, None);
            return None;
        };

        let info = tools.info_for_surface(surface);
        let (can_be_active, parent) = (info.can_be_active(), info.parent);
        if can_be_active {
            tools.set_focus_to(session, Some(surface));
            tools.raise_tree(surface);
            debug!("Focused {}", surface);
            return Some(surface);
        }

        match parent {
            Some(parent) => Self::select_active_surface(tools, session, Some(parent)),
            None => {
                tools.set_focus_to(session, None);
                None
            }
        }
    }

    fn set_state<T: WindowManagerTools>(&mut self, tools: &mut T, surface: SurfaceId, value: SurfaceState) -> SurfaceState {
        let info = tools.info_for_surface(surface);
        let (current, session) = (info.state, info.session);
        if !value.is_tiling_state() {
            return current;
        }

        if current == SurfaceState::Restored && value != SurfaceState::Restored {
            let restore_rect = Rectangle::new(tools.top_left(surface), tools.size(surface));
            tools.info_for_surface_mut(surface).restore_rect = restore_rect;
        }

        if current == value {
            return current;
        }

        let tile = tools.info_for_session(session).tile;
        let restore = tools.info_for_surface(surface).restore_rect;

        let (size, top_left) = match value {
            SurfaceState::Maximized => (tile.size, tile.top_left),
            SurfaceState::HorizMaximized => (
                Size::new(tile.size.width, restore.size.height),
                Point::new(tile.top_left.x, restore.top_left.y),
            ),
            SurfaceState::VertMaximized => (
                Size::new(restore.size.width, tile.size.height),
                Point::new(restore.top_left.x, tile.top_left.y),
            ),
            _ => (restore.size, restore.top_left),
        };

        tools.resize(surface, size);
        let from = tools.top_left(surface);
        Self::drag_surface(tools, surface, top_left, from, &tile);

        tools.info_for_surface_mut(surface).state = value;
        debug!("{} is now {:?}", surface, value);
        value
    }

    /// Moves the focused session's default surface into `state`, or back to restored if
    /// it is already there.
    fn toggle<T: WindowManagerTools>(&mut self, tools: &mut T, state: SurfaceState) {
        let Some(session) = tools.focused_session() else {
            return;
        };
        let Some(surface) = tools.default_surface(session) else {
            return;
        };

        let target = if tools.info_for_surface(surface).state == state {
            SurfaceState::Restored
        } else {
            state
        };
        let value = self.set_state(tools, surface, target);
        tools.configure_state(surface, value);
    }
}

impl<T: WindowManagerTools> WindowManagementPolicy<T> for TilingWindowManagerPolicy {
    fn handle_session_info_updated(&mut self, tools: &mut T, displays: &Rectangles) {
        Self::update_tiles(tools, displays);
    }

    fn handle_displays_updated(&mut self, tools: &mut T, displays: &Rectangles) {
        info!("Display layout changed to {}", displays.bounding_rectangle());
        Self::update_tiles(tools, displays);
    }

    fn handle_place_new_surface(
        &mut self,
        tools: &mut T,
        session: SessionId,
        request: &SurfaceCreationParameters,
    ) -> SurfaceCreationParameters {
        let mut parameters = request.clone();

        let tile = tools.info_for_session(session).tile;
        parameters.top_left = parameters.top_left + (tile.top_left - Point::ORIGIN);

        if let Some(parent) = parameters.parent {
            let width = parameters.size.width;
            let height = parameters.size.height;
            let parent_top_left = tools.top_left(parent);

            match (parameters.aux_rect, parameters.edge_attachment) {
                (Some(aux_rect), Some(edge_attachment)) => {
                    let offset = parent_top_left - Point::ORIGIN;
                    let top_left = aux_rect.top_left + offset;
                    let top_right = aux_rect.top_right() + offset;
                    let bot_left = aux_rect.bottom_left() + offset;

                    if edge_attachment.contains(EdgeAttachment::VERTICAL) {
                        if tile.contains(top_right + Displacement::new(width, height)) {
                            parameters.top_left = top_right;
                        } else if tile.contains(top_left + Displacement::new(-width, height)) {
                            parameters.top_left = top_left + Displacement::new(-width, 0);
                        }
                    }

                    if edge_attachment.contains(EdgeAttachment::HORIZONTAL) {
                        if tile.contains(bot_left + Displacement::new(width, height)) {
                            parameters.top_left = bot_left;
                        } else if tile.contains(top_left + Displacement::new(width, -height)) {
                            parameters.top_left = top_left + Displacement::new(0, -height);
                        }
                    }
                }
                _ => {
                    let parent_size = tools.size(parent);
                    let centred = parent_top_left
                        + (parent_size.as_displacement() - parameters.size.as_displacement()).scaled(0.5)
                        - Displacement::new(0, (parent_size.height - height) / self.dialog_vertical_bias_divisor);
                    parameters.top_left = centred;
                }
            }
        }

        Self::clip_to_tile(&mut parameters, &tile);
        trace!("Placed new surface of {} at {} size {}", session, parameters.top_left, parameters.size);
        parameters
    }

    fn handle_new_surface(&mut self, tools: &mut T, session: SessionId, surface: SurfaceId) {
        tools.info_for_session_mut(session).surfaces.push(surface);

        let info = tools.info_for_surface(surface);
        let (parent, can_be_active) = (info.parent, info.can_be_active());
        if let Some(parent) = parent {
            tools.info_for_surface_mut(parent).children.push(surface);
        }
        if can_be_active {
            tools.info_for_surface_mut(surface).pending_focus = true;
        }
    }

    fn handle_surface_ready(&mut self, tools: &mut T, session: SessionId, surface: SurfaceId) {
        let info = tools.info_for_surface_mut(surface);
        if !info.pending_focus {
            return;
        }
        info.pending_focus = false;
        Self::select_active_surface(tools, Some(session), Some(surface));
    }

    fn handle_modify_surface(
        &mut self,
        tools: &mut T,
        _session: SessionId,
        surface: SurfaceId,
        modifications: &SurfaceSpecification,
    ) {
        if let Some(name) = &modifications.name {
            tools.rename(surface, name);
        }
    }

    fn handle_delete_surface(&mut self, tools: &mut T, session: SessionId, surface: SurfaceId) {
        let parent = tools.info_for_surface(surface).parent;
        if let Some(parent) = parent {
            let siblings = &mut tools.info_for_surface_mut(parent).children;
            if let Some(index) = siblings.iter().position(|s| *s == surface) {
                siblings.remove(index);
            }
        }

        let surfaces = &mut tools.info_for_session_mut(session).surfaces;
        if let Some(index) = surfaces.iter().position(|s| *s == surface) {
            surfaces.remove(index);
        }

        tools.destroy_surface(session, surface);

        if tools.info_for_session(session).surfaces.is_empty() && tools.focused_session() == Some(session) {
            tools.focus_next_session();
            let (next_session, next_surface) = (tools.focused_session(), tools.focused_surface());
            Self::select_active_surface(tools, next_session, next_surface);
        }
    }

    fn handle_set_state(&mut self, tools: &mut T, surface: SurfaceId, state: SurfaceState) -> SurfaceState {
        self.set_state(tools, surface, state)
    }

    fn handle_raise_surface(&mut self, tools: &mut T, session: SessionId, surface: SurfaceId) {
        Self::select_active_surface(tools, Some(session), Some(surface));
    }

    fn handle_keyboard_event(&mut self, tools: &mut T, event: &KeyboardEvent) -> bool {
        if event.action != KeyboardAction::Down {
            return false;
        }
        let modifiers = event.modifiers.for_routing();

        match event.scan_code {
            KEY_F11 => {
                let state = if modifiers == Modifiers::ALT {
                    SurfaceState::Maximized
                } else if modifiers == Modifiers::SHIFT {
                    SurfaceState::VertMaximized
                } else if modifiers == Modifiers::CTRL {
                    SurfaceState::HorizMaximized
                } else {
                    return false;
                };
                self.toggle(tools, state);
                true
            }
            KEY_F4 => {
                let Some(session) = tools.focused_session() else {
                    return false;
                };
                if modifiers == Modifiers::ALT {
                    tools.terminate_session(session);
                    true
                } else if modifiers == Modifiers::CTRL {
                    match tools.focused_surface().or_else(|| tools.default_surface(session)) {
                        Some(surface) => {
                            tools.request_client_surface_close(surface);
                            true
                        }
                        None => false,
                    }
                } else {
                    false
                }
            }
            KEY_TAB if modifiers == Modifiers::ALT => {
                tools.focus_next_session();
                let (session, surface) = (tools.focused_session(), tools.focused_surface());
                Self::select_active_surface(tools, session, surface);
                true
            }
            KEY_GRAVE if modifiers == Modifiers::ALT => {
                if let (Some(prev), Some(app)) = (tools.focused_surface(), tools.focused_session()) {
                    if let Some(surface) = tools.surface_after(app, prev) {
                        Self::select_active_surface(tools, Some(app), Some(surface));
                    }
                }
                true
            }
            _ => false,
        }
    }

    fn handle_touch_event(&mut self, tools: &mut T, event: &TouchEvent) -> bool {
        let Some(cursor) = event.centroid() else {
            return false;
        };

        let mut is_drag = true;
        for point in &event.points {
            match point.action {
                TouchAction::Up => return false,
                TouchAction::Down => is_drag = false,
                TouchAction::Change => {}
            }
        }

        let mut consumes_event = false;
        if is_drag {
            match event.points.len() {
                2 => {
                    self.resize(tools, cursor);
                    consumes_event = true;
                }
                3 => {
                    self.drag(tools, cursor);
                    consumes_event = true;
                }
                _ => {}
            }
        }

        self.old_cursor = cursor;
        consumes_event
    }

    fn handle_pointer_event(&mut self, tools: &mut T, event: &PointerEvent) -> bool {
        let modifiers = event.modifiers.for_routing();
        let cursor = event.position;
        let mut consumes_event = false;

        match event.action {
            PointerAction::ButtonDown if event.buttons.contains(PointerButtons::PRIMARY) => {
                self.click(tools, cursor);
            }
            PointerAction::Motion if modifiers == Modifiers::ALT => {
                if event.buttons.contains(PointerButtons::PRIMARY) {
                    self.drag(tools, cursor);
                    consumes_event = true;
                } else if event.buttons.contains(PointerButtons::TERTIARY) {
                    self.resize(tools, cursor);
                    consumes_event = true;
                }
            }
            _ => {}
        }

        self.old_cursor = cursor;
        consumes_event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::BasicWindowManager;
    use crate::data_types::SurfaceType;
    use crate::tools::SurfaceProvider;
    use pretty_assertions::assert_eq;

    /// One session whose tile is `tile`, without going through the facade.
    fn session_with_tile(tile: Rectangle) -> (BasicWindowManager, SessionId) {
        let mut tools = BasicWindowManager::new();
        let session = tools.add_session("test", None);
        tools.info_for_session_mut(session).tile = tile;
        (tools, session)
    }

    fn surface_at(
        tools: &mut BasicWindowManager,
        policy: &mut TilingWindowManagerPolicy,
        session: SessionId,
        parameters: SurfaceCreationParameters,
    ) -> SurfaceId {
        let surface = tools.create_surface(session, &parameters);
        policy.handle_new_surface(tools, session, surface);
        surface
    }

    #[test]
    fn drag_is_clamped_to_tile() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 200, 200));
        let mut policy = TilingWindowManagerPolicy::default();
        let surface = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(100, 100)).at(Point::new(150, 150)),
        );

        let from = Point::new(160, 160);
        TilingWindowManagerPolicy::drag_surface(
            &mut tools,
            surface,
            from + Displacement::new(100, 100),
            from,
            &Rectangle::from_xywh(0, 0, 200, 200),
        );
        assert_eq!(tools.top_left(surface), Point::new(100, 100));
    }

    #[test]
    fn constrained_move_only_limits_the_crossing_axis() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 200, 200));
        let mut policy = TilingWindowManagerPolicy::default();
        let surface = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(50, 50)).at(Point::new(10, 100)),
        );

        TilingWindowManagerPolicy::constrained_move(
            &mut tools,
            surface,
            Displacement::new(-40, 20),
            &Rectangle::from_xywh(0, 0, 200, 200),
        );
        assert_eq!(tools.top_left(surface), Point::new(0, 120));
    }

    #[test]
    fn drag_moves_children_by_the_same_displacement() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 400, 400));
        let mut policy = TilingWindowManagerPolicy::default();
        let parent = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(100, 100)).at(Point::new(50, 50)),
        );
        let child = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(20, 20))
                .at(Point::new(60, 60))
                .with_parent(parent),
        );

        TilingWindowManagerPolicy::drag_surface(
            &mut tools,
            parent,
            Point::new(80, 90),
            Point::new(60, 60),
            &Rectangle::from_xywh(0, 0, 400, 400),
        );
        assert_eq!(tools.top_left(parent), Point::new(70, 80));
        assert_eq!(tools.top_left(child), Point::new(80, 90));
    }

    #[test]
    fn clip_never_grows() {
        let tile = Rectangle::from_xywh(100, 0, 300, 300);
        let mut parameters = SurfaceCreationParameters::new(Size::new(250, 50)).at(Point::new(200, 280));
        TilingWindowManagerPolicy::clip_to_tile(&mut parameters, &tile);
        assert_eq!(parameters.size, Size::new(200, 20));

        let mut small = SurfaceCreationParameters::new(Size::new(10, 10)).at(Point::new(100, 0));
        TilingWindowManagerPolicy::clip_to_tile(&mut small, &tile);
        assert_eq!(small.size, Size::new(10, 10));
    }

    #[test]
    fn clip_past_the_tile_edge_is_empty() {
        let tile = Rectangle::from_xywh(500, 0, 500, 400);
        let mut parameters = SurfaceCreationParameters::new(Size::new(50, 50)).at(Point::new(1200, 450));
        TilingWindowManagerPolicy::clip_to_tile(&mut parameters, &tile);
        assert_eq!(parameters.size, Size::new(0, 0));
    }

    #[test]
    fn fit_past_the_new_tile_edge_is_empty() {
        let old_tile = Rectangle::from_xywh(0, 0, 1000, 400);
        let new_tile = Rectangle::from_xywh(0, 0, 500, 400);
        let (mut tools, session) = session_with_tile(old_tile);
        let mut policy = TilingWindowManagerPolicy::default();
        let surface = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(50, 50)).at(Point::new(900, 0)),
        );

        TilingWindowManagerPolicy::fit_to_new_tile(&mut tools, surface, &old_tile, &new_tile);
        assert_eq!(tools.size(surface), Size::new(0, 50));
    }

    #[test]
    fn fit_scales_only_filled_axes() {
        let old_tile = Rectangle::from_xywh(0, 0, 400, 300);
        let new_tile = Rectangle::from_xywh(0, 0, 200, 300);
        let (mut tools, session) = session_with_tile(old_tile);
        let mut policy = TilingWindowManagerPolicy::default();
        let full_width = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(400, 100)),
        );
        let narrow = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(150, 300)).at(Point::new(100, 0)),
        );

        TilingWindowManagerPolicy::fit_to_new_tile(&mut tools, full_width, &old_tile, &new_tile);
        TilingWindowManagerPolicy::fit_to_new_tile(&mut tools, narrow, &old_tile, &new_tile);
        assert_eq!(tools.size(full_width), Size::new(200, 100));
        assert_eq!(tools.size(narrow), Size::new(100, 300));
    }

    #[test]
    fn resize_with_non_positive_scale_is_ignored() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 500, 500));
        let mut policy = TilingWindowManagerPolicy::default();
        let surface = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(100, 100)).at(Point::new(100, 100)),
        );

        TilingWindowManagerPolicy::resize_surface(
            &mut tools,
            surface,
            Point::new(90, 150),
            Point::new(150, 150),
            &Rectangle::from_xywh(0, 0, 500, 500),
        );
        assert_eq!(tools.size(surface), Size::new(100, 100));
    }

    #[test]
    fn resize_scales_and_clamps_to_bounds() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 300, 300));
        let mut policy = TilingWindowManagerPolicy::default();
        let surface = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(100, 100)).at(Point::new(100, 100)),
        );

        TilingWindowManagerPolicy::resize_surface(
            &mut tools,
            surface,
            Point::new(200, 300),
            Point::new(150, 150),
            &Rectangle::from_xywh(0, 0, 300, 300),
        );
        assert_eq!(tools.size(surface), Size::new(200, 200));
    }

    #[test]
    fn non_focusable_child_delegates_to_parent() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 500, 500));
        let mut policy = TilingWindowManagerPolicy::default();
        let parent = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(100, 100)),
        );
        let other = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(100, 100)),
        );
        let tip = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(10, 10))
                .of_type(SurfaceType::Tip)
                .with_parent(parent),
        );

        let selected = TilingWindowManagerPolicy::select_active_surface(&mut tools, Some(session), Some(tip));
        assert_eq!(selected, Some(parent));
        assert_eq!(tools.focused_surface(), Some(parent));
        assert_eq!(tools.stacking_order(), &[other, parent, tip]);
    }

    #[test]
    fn orphan_non_focusable_selects_nothing() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 500, 500));
        let mut policy = TilingWindowManagerPolicy::default();
        let overlay = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(10, 10)).of_type(SurfaceType::Overlay),
        );

        let normal = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(10, 10)),
        );
        tools.set_focus_to(Some(session), Some(normal));

        assert_eq!(
            TilingWindowManagerPolicy::select_active_surface(&mut tools, Some(session), Some(overlay)),
            None
        );
        assert_eq!(tools.focused_session(), Some(session));
        assert_eq!(tools.focused_surface(), None);
    }

    #[test]
    fn new_focusable_surface_waits_for_first_frame() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 500, 500));
        let mut policy = TilingWindowManagerPolicy::default();
        let surface = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(100, 100)),
        );
        assert!(tools.info_for_surface(surface).pending_focus);
        assert_eq!(tools.focused_surface(), None);

        policy.handle_surface_ready(&mut tools, session, surface);
        assert!(!tools.info_for_surface(surface).pending_focus);
        assert_eq!(tools.focused_surface(), Some(surface));
        assert_eq!(tools.focused_session(), Some(session));
    }

    #[test]
    fn unsupported_state_leaves_surface_alone() {
        let (mut tools, session) = session_with_tile(Rectangle::from_xywh(0, 0, 500, 500));
        let mut policy = TilingWindowManagerPolicy::default();
        let surface = surface_at(
            &mut tools,
            &mut policy,
            session,
            SurfaceCreationParameters::new(Size::new(100, 100)),
        );

        let result = policy.handle_set_state(&mut tools, surface, SurfaceState::Fullscreen);
        assert_eq!(result, SurfaceState::Restored);
        assert_eq!(tools.size(surface), Size::new(100, 100));
    }
}

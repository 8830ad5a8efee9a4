// novatile-wm/src/scene.rs

use std::collections::BTreeMap;

use novatile_core::{Point, Rectangle, Size};

use crate::data_types::{SessionId, SurfaceId, SurfaceState};

/// A surface as the scene knows it: where it is and what the client was told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSurface {
    pub session: SessionId,
    pub name: String,
    pub top_left: Point,
    pub size: Size,
    /// Input region in surface-local coordinates. `None` means the whole surface.
    pub input_region: Option<Vec<Rectangle>>,
    /// State attribute last configured on the surface.
    pub state: SurfaceState,
    pub close_requested: bool,
}

impl SceneSurface {
    pub fn new(session: SessionId, name: impl Into<String>, top_left: Point, size: Size) -> Self {
        Self {
            session,
            name: name.into(),
            top_left,
            size,
            input_region: None,
            state: SurfaceState::Restored,
            close_requested: false,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.top_left, self.size)
    }

    /// Hit test in global coordinates.
    pub fn input_area_contains(&self, point: Point) -> bool {
        match &self.input_region {
            None => self.bounds().contains(point),
            Some(region) => {
                let local = Point::new(point.x - self.top_left.x, point.y - self.top_left.y);
                region.iter().any(|rect| rect.contains(local))
            }
        }
    }
}

/// Surfaces plus their stacking order, bottom to top.
#[derive(Debug, Clone, Default)]
pub struct SurfaceStack {
    surfaces: BTreeMap<SurfaceId, SceneSurface>,
    stacking_order: Vec<SurfaceId>,
}

impl SurfaceStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a surface on top of the stack.
    pub fn add(&mut self, id: SurfaceId, surface: SceneSurface) {
        self.surfaces.insert(id, surface);
        self.stacking_order.retain(|s| *s != id);
        self.stacking_order.push(id);
    }

    pub fn remove(&mut self, id: SurfaceId) -> Option<SceneSurface> {
        self.stacking_order.retain(|s| *s != id);
        self.surfaces.remove(&id)
    }

    pub fn get(&self, id: SurfaceId) -> Option<&SceneSurface> {
        self.surfaces.get(&id)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut SceneSurface> {
        self.surfaces.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Bottom to top.
    pub fn stacking_order(&self) -> &[SurfaceId] {
        &self.stacking_order
    }

    /// The topmost surface whose input area contains `point`.
    pub fn surface_at(&self, point: Point) -> Option<SurfaceId> {
        self.stacking_order
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.surfaces
                    .get(id)
                    .map_or(false, |surface| surface.input_area_contains(point))
            })
    }

    /// Moves every surface in `ids` to the top. Their order relative to each other is
    /// their current stacking order; ids not in the stack are ignored.
    pub fn raise(&mut self, ids: &[SurfaceId]) {
        let (raised, mut rest): (Vec<SurfaceId>, Vec<SurfaceId>) = self
            .stacking_order
            .iter()
            .copied()
            .partition(|id| ids.contains(id));
        rest.extend(raised);
        self.stacking_order = rest;
    }
}

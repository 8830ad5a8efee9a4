// novatile-wm/src/manager.rs

use novatile_core::{Rectangle, Rectangles, WindowManagementConfig};
use tracing::{debug, info};

use crate::basic::BasicWindowManager;
use crate::data_types::{
    SessionId, SurfaceCreationParameters, SurfaceId, SurfaceSpecification, SurfaceState,
};
use crate::error::WindowManagerError;
use crate::input::InputEvent;
use crate::policy::{TilingWindowManagerPolicy, WindowManagementPolicy};
use crate::tools::{SurfaceProvider, WindowManagerTools};

/// A window manager running the tiling policy.
pub type TilingWindowManager = WindowManager<TilingWindowManagerPolicy>;

/// Entry point for the embedding display server.
///
/// Owns the window manager state and a policy, validates ids coming from outside and
/// forwards every event to the policy.
#[derive(Debug)]
pub struct WindowManager<P> {
    tools: BasicWindowManager,
    policy: P,
    displays: Rectangles,
}

impl<P: Default> Default for WindowManager<P> {
    fn default() -> Self {
        Self {
            tools: BasicWindowManager::new(),
            policy: P::default(),
            displays: Rectangles::new(),
        }
    }
}

impl WindowManager<TilingWindowManagerPolicy> {
    pub fn tiling(config: &WindowManagementConfig) -> Self {
        Self::new(TilingWindowManagerPolicy::new(config))
    }
}

impl<P: WindowManagementPolicy<BasicWindowManager>> WindowManager<P> {
    pub fn new(policy: P) -> Self {
        Self {
            tools: BasicWindowManager::new(),
            policy,
            displays: Rectangles::new(),
        }
    }

    pub fn add_session(&mut self, name: impl Into<String>, process_id: Option<i32>) -> SessionId {
        let session = self.tools.add_session(name, process_id);
        self.policy.handle_session_info_updated(&mut self.tools, &self.displays);
        session
    }

    /// Destroys the session's surfaces, newest first, then forgets the session.
    pub fn remove_session(&mut self, session: SessionId) -> Result<(), WindowManagerError> {
        self.check_session(session)?;

        let surfaces = self.tools.info_for_session(session).surfaces.clone();
        for surface in surfaces.into_iter().rev() {
            if self.tools.has_surface(surface) {
                self.policy.handle_delete_surface(&mut self.tools, session, surface);
            }
        }

        self.tools.remove_session(session);
        self.policy.handle_session_info_updated(&mut self.tools, &self.displays);
        Ok(())
    }

    pub fn add_display(&mut self, area: Rectangle) {
        info!("Adding display {}", area);
        self.displays.add(area);
        self.policy.handle_displays_updated(&mut self.tools, &self.displays);
    }

    pub fn remove_display(&mut self, area: Rectangle) -> Result<(), WindowManagerError> {
        if !self.displays.remove(&area) {
            return Err(WindowManagerError::UnknownDisplay(area));
        }
        info!("Removed display {}", area);
        self.policy.handle_displays_updated(&mut self.tools, &self.displays);
        Ok(())
    }

    /// Places, creates and registers a surface for `session`.
    pub fn add_surface(
        &mut self,
        session: SessionId,
        request: SurfaceCreationParameters,
    ) -> Result<SurfaceId, WindowManagerError> {
        self.check_session(session)?;
        if let Some(parent) = request.parent {
            self.check_surface(parent)?;
        }

        let placed = self.policy.handle_place_new_surface(&mut self.tools, session, &request);
        let surface = self.tools.create_surface(session, &placed);
        self.policy.handle_new_surface(&mut self.tools, session, surface);
        Ok(surface)
    }

    /// Reports that `surface` posted its first frame.
    pub fn surface_ready(&mut self, surface: SurfaceId) -> Result<(), WindowManagerError> {
        let session = self.session_of(surface)?;
        self.policy.handle_surface_ready(&mut self.tools, session, surface);
        Ok(())
    }

    pub fn modify_surface(
        &mut self,
        surface: SurfaceId,
        modifications: &SurfaceSpecification,
    ) -> Result<(), WindowManagerError> {
        let session = self.session_of(surface)?;
        self.policy
            .handle_modify_surface(&mut self.tools, session, surface, modifications);
        Ok(())
    }

    pub fn remove_surface(&mut self, surface: SurfaceId) -> Result<(), WindowManagerError> {
        let session = self.session_of(surface)?;
        self.policy.handle_delete_surface(&mut self.tools, session, surface);
        Ok(())
    }

    /// Asks the policy for `state` and configures the outcome on the surface.
    pub fn set_surface_state(
        &mut self,
        surface: SurfaceId,
        state: SurfaceState,
    ) -> Result<SurfaceState, WindowManagerError> {
        self.check_surface(surface)?;
        let value = self.policy.handle_set_state(&mut self.tools, surface, state);
        self.tools.configure_state(surface, value);
        debug!("{} requested {:?}, got {:?}", surface, state, value);
        Ok(value)
    }

    pub fn raise_surface(&mut self, surface: SurfaceId) -> Result<(), WindowManagerError> {
        let session = self.session_of(surface)?;
        self.policy.handle_raise_surface(&mut self.tools, session, surface);
        Ok(())
    }

    /// Sets the surface-local input region; `None` makes the whole surface hit-testable.
    pub fn set_input_region(
        &mut self,
        surface: SurfaceId,
        region: Option<Vec<Rectangle>>,
    ) -> Result<(), WindowManagerError> {
        self.check_surface(surface)?;
        self.tools.set_input_region(surface, region);
        Ok(())
    }

    /// Returns `true` if the policy consumed the event.
    pub fn handle_input_event(&mut self, event: &InputEvent) -> bool {
        self.policy.handle_input_event(&mut self.tools, event)
    }

    pub fn tools(&self) -> &BasicWindowManager {
        &self.tools
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn displays(&self) -> &Rectangles {
        &self.displays
    }

    pub fn tile(&self, session: SessionId) -> Result<Rectangle, WindowManagerError> {
        self.check_session(session)?;
        Ok(self.tools.info_for_session(session).tile)
    }

    /// Position and size of the surface.
    pub fn surface_geometry(&self, surface: SurfaceId) -> Result<Rectangle, WindowManagerError> {
        self.check_surface(surface)?;
        Ok(Rectangle::new(self.tools.top_left(surface), self.tools.size(surface)))
    }

    pub fn surface_state(&self, surface: SurfaceId) -> Result<SurfaceState, WindowManagerError> {
        self.check_surface(surface)?;
        Ok(self.tools.info_for_surface(surface).state)
    }

    pub fn focused_session(&self) -> Option<SessionId> {
        self.tools.focused_session()
    }

    pub fn focused_surface(&self) -> Option<SurfaceId> {
        self.tools.focused_surface()
    }

    fn check_session(&self, session: SessionId) -> Result<(), WindowManagerError> {
        if self.tools.has_session(session) {
            Ok(())
        } else {
            Err(WindowManagerError::UnknownSession(session))
        }
    }

    fn check_surface(&self, surface: SurfaceId) -> Result<(), WindowManagerError> {
        if self.tools.has_surface(surface) {
            Ok(())
        } else {
            Err(WindowManagerError::UnknownSurface(surface))
        }
    }

    fn session_of(&self, surface: SurfaceId) -> Result<SessionId, WindowManagerError> {
        self.tools
            .surface_info()
            .get(&surface)
            .map(|info| info.session)
            .ok_or(WindowManagerError::UnknownSurface(surface))
    }
}

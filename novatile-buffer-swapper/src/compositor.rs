//! The compositor side of the buffer handoff.
//!
//! On every refresh the [`Compositor`] walks its renderables, grabs the newest frame of
//! each one that is visible on the display, hands it to the [`Renderer`], releases it
//! and finally tells the [`Display`] to present the result.

use std::sync::Arc;

use novatile_core::Rectangle;
use tracing::{debug, trace};

use crate::buffer::Buffer;
use crate::swapper::BufferSwapper;
use crate::temporary::TemporaryCompositorBuffer;

/// Draws a buffer into the current output frame.
pub trait Renderer {
    fn render(&mut self, buffer: &Buffer, placement: Rectangle);
}

/// An output the compositor draws onto.
pub trait Display {
    /// The area of the global layout this display shows.
    fn view_area(&self) -> Rectangle;

    /// Presents everything rendered since the previous update.
    fn post_update(&mut self);
}

/// A client buffer stream placed somewhere in the global layout.
#[derive(Clone)]
pub struct Renderable {
    pub placement: Rectangle,
    pub stream: Arc<dyn BufferSwapper>,
}

impl Renderable {
    pub fn new(placement: Rectangle, stream: Arc<dyn BufferSwapper>) -> Self {
        Self { placement, stream }
    }
}

impl std::fmt::Debug for Renderable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderable")
            .field("placement", &self.placement)
            .finish_non_exhaustive()
    }
}

pub struct Compositor<R: Renderer> {
    renderer: R,
    renderables: Vec<Renderable>,
}

impl<R: Renderer> Compositor<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            renderables: Vec::new(),
        }
    }

    /// Adds a renderable on top of the existing ones.
    pub fn add_renderable(&mut self, renderable: Renderable) {
        debug!("Adding renderable at {}", renderable.placement);
        self.renderables.push(renderable);
    }

    /// Removes every renderable backed by `stream`. Returns how many were removed.
    pub fn remove_renderables(&mut self, stream: &Arc<dyn BufferSwapper>) -> usize {
        let before = self.renderables.len();
        self.renderables
            .retain(|renderable| !Arc::ptr_eq(&renderable.stream, stream));
        before - self.renderables.len()
    }

    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Draws one frame onto `display`, bottom to top, and posts it.
    ///
    /// Renderables that do not overlap the display's view area are not grabbed.
    /// Returns the number of renderables drawn.
    pub fn render(&mut self, display: &mut dyn Display) -> usize {
        let view_area = display.view_area();
        let mut drawn = 0;
        for renderable in &self.renderables {
            if !renderable.placement.overlaps(&view_area) {
                continue;
            }
            let buffer = TemporaryCompositorBuffer::new(renderable.stream.as_ref());
            trace!("Rendering {} at {}", buffer.id(), renderable.placement);
            self.renderer.render(&buffer, renderable.placement);
            drawn += 1;
        }
        display.post_update();
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferId, BufferProperties, HeadlessAllocator, PixelFormat};
    use crate::swapper::BufferSwapperDouble;
    use novatile_core::Size;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingRenderer {
        drawn: Vec<(BufferId, Rectangle)>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, buffer: &Buffer, placement: Rectangle) {
            self.drawn.push((buffer.id(), placement));
        }
    }

    struct TestDisplay {
        area: Rectangle,
        updates: usize,
    }

    impl Display for TestDisplay {
        fn view_area(&self) -> Rectangle {
            self.area
        }

        fn post_update(&mut self) {
            self.updates += 1;
        }
    }

    fn stream() -> Arc<BufferSwapperDouble> {
        Arc::new(
            BufferSwapperDouble::with_allocator(
                &HeadlessAllocator,
                &BufferProperties::new(Size::new(100, 100), PixelFormat::Argb8888),
            )
            .unwrap(),
        )
    }

    #[test]
    fn draws_visible_renderables_and_posts() {
        let visible = stream();
        let hidden = stream();
        let mut compositor = Compositor::new(RecordingRenderer::default());
        compositor.add_renderable(Renderable::new(Rectangle::from_xywh(10, 10, 100, 100), visible.clone()));
        compositor.add_renderable(Renderable::new(Rectangle::from_xywh(2000, 0, 100, 100), hidden.clone()));

        let rendered = visible.dequeue_free_buffer().id();
        visible.queue_finished_buffer();

        let mut display = TestDisplay {
            area: Rectangle::from_xywh(0, 0, 1920, 1080),
            updates: 0,
        };
        assert_eq!(compositor.render(&mut display), 1);
        assert_eq!(display.updates, 1);
        assert_eq!(
            compositor.renderer().drawn,
            vec![(rendered, Rectangle::from_xywh(10, 10, 100, 100))]
        );

        assert!(!visible.grabbed_state().holds_buffer());
        assert!(!hidden.grabbed_state().holds_buffer());
    }

    #[test]
    fn posts_even_when_nothing_is_drawn() {
        let mut compositor = Compositor::new(RecordingRenderer::default());
        let mut display = TestDisplay {
            area: Rectangle::from_xywh(0, 0, 640, 480),
            updates: 0,
        };
        assert_eq!(compositor.render(&mut display), 0);
        assert_eq!(display.updates, 1);
    }

    #[test]
    fn remove_renderables_by_stream() {
        let a: Arc<dyn BufferSwapper> = stream();
        let b: Arc<dyn BufferSwapper> = stream();
        let mut compositor = Compositor::new(RecordingRenderer::default());
        compositor.add_renderable(Renderable::new(Rectangle::from_xywh(0, 0, 10, 10), a.clone()));
        compositor.add_renderable(Renderable::new(Rectangle::from_xywh(5, 5, 10, 10), b.clone()));
        compositor.add_renderable(Renderable::new(Rectangle::from_xywh(9, 9, 10, 10), a.clone()));

        assert_eq!(compositor.remove_renderables(&a), 2);
        assert_eq!(compositor.renderables().len(), 1);
        assert_eq!(compositor.remove_renderables(&a), 0);
    }
}

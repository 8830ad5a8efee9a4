//! Renderer and display backends that draw nothing and only count and log.

use novatile_buffer_swapper::{Buffer, Display, Renderer};
use novatile_core::Rectangle;
use tracing::{debug, trace};

/// Logs every draw call instead of touching pixels.
#[derive(Debug, Default)]
pub struct LoggingRenderer {
    draws: u64,
}

impl LoggingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl Renderer for LoggingRenderer {
    fn render(&mut self, buffer: &Buffer, placement: Rectangle) {
        self.draws += 1;
        trace!(
            "Drawing {} ({}, {:?}) at {}",
            buffer.id(),
            buffer.size(),
            buffer.pixel_format(),
            placement
        );
    }
}

/// An output area with no backing device.
#[derive(Debug)]
pub struct HeadlessDisplay {
    area: Rectangle,
    frames_posted: u64,
}

impl HeadlessDisplay {
    pub fn new(area: Rectangle) -> Self {
        Self { area, frames_posted: 0 }
    }

    pub fn frames_posted(&self) -> u64 {
        self.frames_posted
    }
}

impl Display for HeadlessDisplay {
    fn view_area(&self) -> Rectangle {
        self.area
    }

    fn post_update(&mut self) {
        self.frames_posted += 1;
        if self.frames_posted % 60 == 0 {
            debug!("Display {} posted {} frames", self.area, self.frames_posted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novatile_buffer_swapper::{BufferSwapper, BufferSwapperDouble, Compositor, PixelFormat, Renderable};
    use novatile_core::Size;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn stream() -> Arc<dyn BufferSwapper> {
        let buffer = || Arc::new(Buffer::new(Size::new(4, 4), 16, PixelFormat::Argb8888).unwrap());
        Arc::new(BufferSwapperDouble::new(buffer(), buffer()))
    }

    #[test]
    fn counts_draws_and_posted_frames() {
        let mut compositor = Compositor::new(LoggingRenderer::new());
        compositor.add_renderable(Renderable::new(Rectangle::from_xywh(0, 0, 4, 4), stream()));
        compositor.add_renderable(Renderable::new(Rectangle::from_xywh(50, 50, 4, 4), stream()));

        let mut display = HeadlessDisplay::new(Rectangle::from_xywh(0, 0, 10, 10));
        assert_eq!(compositor.render(&mut display), 1);
        assert_eq!(compositor.render(&mut display), 1);

        assert_eq!(compositor.renderer().draws(), 2);
        assert_eq!(display.frames_posted(), 2);
    }
}

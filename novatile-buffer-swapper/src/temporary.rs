//! Scoped access to a swapper's buffers.
//!
//! Each guard performs the acquiring half of a swapper operation when it is created
//! and the releasing half when it is dropped, so early returns cannot leave a role
//! holding a buffer.

use std::ops::Deref;
use std::sync::Arc;

use crate::buffer::Buffer;
use crate::swapper::BufferSwapper;

/// The compositor's view of the newest frame. Ungrabs on drop.
pub struct TemporaryCompositorBuffer<'a> {
    swapper: &'a dyn BufferSwapper,
    buffer: Arc<Buffer>,
}

impl<'a> TemporaryCompositorBuffer<'a> {
    pub fn new(swapper: &'a dyn BufferSwapper) -> Self {
        let buffer = swapper.grab_last_posted();
        Self { swapper, buffer }
    }

    pub fn buffer(&self) -> &Arc<Buffer> {
        &self.buffer
    }
}

impl Deref for TemporaryCompositorBuffer<'_> {
    type Target = Buffer;

    fn deref(&self) -> &Buffer {
        &self.buffer
    }
}

impl Drop for TemporaryCompositorBuffer<'_> {
    fn drop(&mut self) {
        self.swapper.ungrab();
    }
}

/// A buffer the client is rendering into. Queued on drop.
pub struct TemporaryClientBuffer<'a> {
    swapper: &'a dyn BufferSwapper,
    buffer: Arc<Buffer>,
}

impl<'a> TemporaryClientBuffer<'a> {
    pub fn new(swapper: &'a dyn BufferSwapper) -> Self {
        let buffer = swapper.dequeue_free_buffer();
        Self { swapper, buffer }
    }

    pub fn buffer(&self) -> &Arc<Buffer> {
        &self.buffer
    }
}

impl Deref for TemporaryClientBuffer<'_> {
    type Target = Buffer;

    fn deref(&self) -> &Buffer {
        &self.buffer
    }
}

impl Drop for TemporaryClientBuffer<'_> {
    fn drop(&mut self) {
        self.swapper.queue_finished_buffer();
    }
}

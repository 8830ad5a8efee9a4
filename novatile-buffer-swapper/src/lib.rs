//! # novatile Buffer Swapper
//!
//! This crate owns the handoff of rendered frames between a client and the
//! compositor. A client renders into the buffer it dequeued and queues it when done;
//! on every display refresh the compositor grabs the most recently queued buffer,
//! draws it and ungrabs it again.
//!
//! - [`buffer`]: buffer descriptors, pixel formats and the allocator seam.
//! - [`swapper`]: the [`BufferSwapper`] trait and the lock-free two-buffer
//!   [`BufferSwapperDouble`].
//! - [`temporary`]: RAII guards that pair dequeue/queue and grab/ungrab.
//! - [`compositor`]: the per-refresh drawing loop over a set of buffer streams.

pub mod buffer;
pub mod compositor;
pub mod error;
pub mod swapper;
pub mod temporary;

// Re-export key types for convenience.
pub use buffer::{Buffer, BufferAllocator, BufferId, BufferProperties, HeadlessAllocator, PixelFormat};
pub use compositor::{Compositor, Display, Renderable, Renderer};
pub use error::BufferError;
pub use swapper::{BufferSwapper, BufferSwapperDouble, RoleState};
pub use temporary::{TemporaryClientBuffer, TemporaryCompositorBuffer};

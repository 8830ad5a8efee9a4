//! Buffer descriptors and the allocator seam.
//!
//! A [`Buffer`] is an opaque handle to pixel memory owned by some graphics backend.
//! This crate never touches the pixels; it only tracks which party may use a buffer.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use novatile_core::Size;
use tracing::debug;

use crate::error::BufferError;

/// Unique identifier for a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

impl BufferId {
    /// Creates a new, process-wide unique `BufferId`.
    pub fn new_unique() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        BufferId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer#{}", self.0)
    }
}

/// Pixel layouts understood by the compositor.
///
/// Names follow the DRM fourcc convention: the first channel is the most
/// significant byte of a little-endian pixel word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 32-bit, alpha first.
    Argb8888,
    /// 32-bit, alpha ignored.
    Xrgb8888,
    /// 32-bit, alpha first, red and blue swapped.
    Abgr8888,
    /// 32-bit, alpha ignored, red and blue swapped.
    Xbgr8888,
    /// 24-bit packed.
    Bgr888,
    /// 16-bit packed.
    Rgb565,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Argb8888
            | PixelFormat::Xrgb8888
            | PixelFormat::Abgr8888
            | PixelFormat::Xbgr8888 => 4,
            PixelFormat::Bgr888 => 3,
            PixelFormat::Rgb565 => 2,
        }
    }
}

/// What a client asks the allocator for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferProperties {
    pub size: Size,
    pub format: PixelFormat,
}

impl BufferProperties {
    pub fn new(size: Size, format: PixelFormat) -> Self {
        Self { size, format }
    }
}

/// An allocated buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct Buffer {
    id: BufferId,
    size: Size,
    stride: u32,
    format: PixelFormat,
}

impl Buffer {
    /// Describes an already allocated buffer, validating its layout.
    pub fn new(size: Size, stride: u32, format: PixelFormat) -> Result<Self, BufferError> {
        if size.is_empty() {
            return Err(BufferError::InvalidDimensions(size));
        }
        let minimum = size.width as u32 * format.bytes_per_pixel();
        if stride < minimum {
            return Err(BufferError::InvalidStride { stride, minimum });
        }
        Ok(Self {
            id: BufferId::new_unique(),
            size,
            stride,
            format,
        })
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Bytes per row.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }
}

/// Produces the buffers a swapper exchanges.
///
/// Implemented by the graphics platform; the swapper only ever asks for two.
pub trait BufferAllocator: Send + Sync {
    fn alloc_buffer(&self, properties: &BufferProperties) -> Result<Arc<Buffer>, BufferError>;
}

/// Allocator producing descriptor-only buffers with tightly packed rows.
///
/// Used by the headless driver and in tests, where no pixel memory is needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessAllocator;

impl BufferAllocator for HeadlessAllocator {
    fn alloc_buffer(&self, properties: &BufferProperties) -> Result<Arc<Buffer>, BufferError> {
        if properties.size.is_empty() {
            return Err(BufferError::InvalidDimensions(properties.size));
        }
        let stride = properties.size.width as u32 * properties.format.bytes_per_pixel();
        let buffer = Buffer::new(properties.size, stride, properties.format)?;
        debug!(
            "Allocated {} {} {:?} stride {}",
            buffer.id(),
            buffer.size(),
            buffer.pixel_format(),
            buffer.stride()
        );
        Ok(Arc::new(buffer))
    }
}

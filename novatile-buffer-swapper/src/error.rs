//! Errors raised while allocating buffers.

use novatile_core::Size;
use thiserror::Error;

/// Reasons a buffer allocation request is refused.
///
/// The swapper itself never fails; only producing the buffers it exchanges can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height is not positive.
    #[error("Invalid buffer dimensions: {0}")]
    InvalidDimensions(Size),

    /// The row stride cannot hold a full row of pixels.
    #[error("Invalid stride {stride}: at least {minimum} bytes per row are required")]
    InvalidStride { stride: u32, minimum: u32 },

    /// The allocator backend could not provide the buffer.
    #[error("Buffer allocation failed: {0}")]
    AllocationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            BufferError::InvalidDimensions(Size::new(0, 10)).to_string(),
            "Invalid buffer dimensions: 0x10"
        );
        assert_eq!(
            BufferError::InvalidStride { stride: 10, minimum: 40 }.to_string(),
            "Invalid stride 10: at least 40 bytes per row are required"
        );
    }
}

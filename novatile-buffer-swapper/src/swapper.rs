//! Lock-free exchange of buffers between one client and the compositor.
//!
//! Two roles use a swapper concurrently: the client, which dequeues a buffer, renders
//! into it and queues it, and the compositor, which grabs the last queued buffer for
//! scanout and ungrabs it afterwards. Neither role ever waits for the other.
//!
//! [`BufferSwapperDouble`] ping-pongs between two buffers. Each role is a single
//! atomic holding a [`RoleState`]: either the buffer the role currently holds, or an
//! `Invalid*` marker that already determines which buffer the role resolves to next.
//! Every operation is one pure state transition applied with a compare-exchange loop.
//!
//! Every queue flips the compositor role to the other half of the cycle, so the
//! client role and the compositor role always sit in opposite halves:
//!
//! | queues so far | client role      | compositor role  |
//! |---------------|------------------|------------------|
//! | even          | `Invalid0`/`BufA`| `Invalid1`/`BufB`|
//! | odd           | `Invalid1`/`BufB`| `Invalid0`/`BufA`|
//!
//! and therefore never name the same buffer.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use novatile_core::fatal_error;
use tracing::trace;

use crate::buffer::{Buffer, BufferAllocator, BufferProperties};
use crate::error::BufferError;

/// The exchange point between a rendering client and the compositor.
pub trait BufferSwapper: Send + Sync {
    /// Returns the buffer the client may now render into.
    fn dequeue_free_buffer(&self) -> Arc<Buffer>;

    /// Hands the dequeued buffer over as the newest finished frame.
    fn queue_finished_buffer(&self);

    /// Returns the newest finished frame for display. Never waits.
    fn grab_last_posted(&self) -> Arc<Buffer>;

    /// Releases the buffer returned by the last [`grab_last_posted`](Self::grab_last_posted).
    fn ungrab(&self);
}

/// Value of a role atomic.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleState {
    /// Holding nothing; resolves to buffer A next.
    Invalid0 = 0,
    /// Holding nothing; resolves to buffer B next.
    Invalid1 = 1,
    /// Holding buffer A.
    BufA = 2,
    /// Holding buffer B.
    BufB = 3,
}

impl RoleState {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(RoleState::Invalid0),
            1 => Some(RoleState::Invalid1),
            2 => Some(RoleState::BufA),
            3 => Some(RoleState::BufB),
            _ => None,
        }
    }

    /// Returns `true` if the role currently holds a buffer.
    pub fn holds_buffer(self) -> bool {
        matches!(self, RoleState::BufA | RoleState::BufB)
    }
}

fn client_to_dequeued(state: RoleState) -> Option<RoleState> {
    match state {
        RoleState::Invalid0 => Some(RoleState::BufA),
        RoleState::Invalid1 => Some(RoleState::BufB),
        _ => None,
    }
}

fn client_to_queued(state: RoleState) -> Option<RoleState> {
    match state {
        RoleState::BufA => Some(RoleState::Invalid1),
        RoleState::BufB => Some(RoleState::Invalid0),
        _ => None,
    }
}

fn compositor_change_toggle_pattern(state: RoleState) -> Option<RoleState> {
    Some(match state {
        RoleState::Invalid0 => RoleState::Invalid1,
        RoleState::Invalid1 => RoleState::Invalid0,
        RoleState::BufA => RoleState::BufB,
        RoleState::BufB => RoleState::BufA,
    })
}

fn compositor_to_grabbed(state: RoleState) -> Option<RoleState> {
    match state {
        RoleState::Invalid0 => Some(RoleState::BufA),
        RoleState::Invalid1 => Some(RoleState::BufB),
        _ => None,
    }
}

fn compositor_to_ungrabbed(state: RoleState) -> Option<RoleState> {
    match state {
        RoleState::BufA => Some(RoleState::Invalid0),
        RoleState::BufB => Some(RoleState::Invalid1),
        _ => None,
    }
}

/// Applies `next` to `role` with a compare-exchange retry loop and returns the new state.
fn transition(
    role: &AtomicU8,
    operation: &'static str,
    next: fn(RoleState) -> Option<RoleState>,
) -> RoleState {
    let mut current = role.load(Ordering::Acquire);
    loop {
        let Some(next_state) = RoleState::from_raw(current).and_then(next) else {
            fatal_error!(
                "buffer swapper: {} reached from unrecognized role state {:?}",
                operation,
                RoleState::from_raw(current).ok_or(current)
            );
        };
        match role.compare_exchange_weak(current, next_state as u8, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => return next_state,
            Err(actual) => current = actual,
        }
    }
}

/// Non-blocking double-buffered [`BufferSwapper`].
#[derive(Debug)]
pub struct BufferSwapperDouble {
    buf_a: Arc<Buffer>,
    buf_b: Arc<Buffer>,
    dequeued: AtomicU8,
    grabbed: AtomicU8,
}

impl BufferSwapperDouble {
    /// Creates a swapper over two distinct buffers.
    ///
    /// The client's first dequeue yields `a`; a grab before any queue yields `b`.
    pub fn new(a: Arc<Buffer>, b: Arc<Buffer>) -> Self {
        if a.id() == b.id() {
            fatal_error!("buffer swapper needs two distinct buffers, got {} twice", a.id());
        }
        Self {
            buf_a: a,
            buf_b: b,
            dequeued: AtomicU8::new(RoleState::Invalid0 as u8),
            grabbed: AtomicU8::new(RoleState::Invalid1 as u8),
        }
    }

    /// Allocates both buffers with `properties` and creates the swapper.
    pub fn with_allocator(
        allocator: &dyn BufferAllocator,
        properties: &BufferProperties,
    ) -> Result<Self, BufferError> {
        let a = allocator.alloc_buffer(properties)?;
        let b = allocator.alloc_buffer(properties)?;
        Ok(Self::new(a, b))
    }

    /// Current value of the client role.
    pub fn dequeued_state(&self) -> RoleState {
        self.load(&self.dequeued)
    }

    /// Current value of the compositor role.
    pub fn grabbed_state(&self) -> RoleState {
        self.load(&self.grabbed)
    }

    /// Both buffers, A first.
    pub fn buffers(&self) -> [&Arc<Buffer>; 2] {
        [&self.buf_a, &self.buf_b]
    }

    fn load(&self, role: &AtomicU8) -> RoleState {
        let raw = role.load(Ordering::Acquire);
        RoleState::from_raw(raw)
            .unwrap_or_else(|| fatal_error!("buffer swapper: role holds unknown value {}", raw))
    }

    fn buffer_for(&self, state: RoleState) -> Arc<Buffer> {
        match state {
            RoleState::BufA => Arc::clone(&self.buf_a),
            RoleState::BufB => Arc::clone(&self.buf_b),
            other => fatal_error!("buffer swapper: role in {:?} holds no buffer", other),
        }
    }
}

impl BufferSwapper for BufferSwapperDouble {
    fn dequeue_free_buffer(&self) -> Arc<Buffer> {
        let state = transition(&self.dequeued, "dequeue_free_buffer", client_to_dequeued);
        let buffer = self.buffer_for(state);
        trace!("client dequeued {}", buffer.id());
        buffer
    }

    fn queue_finished_buffer(&self) {
        transition(&self.dequeued, "queue_finished_buffer", client_to_queued);
        let grabbed = transition(&self.grabbed, "queue_finished_buffer", compositor_change_toggle_pattern);
        trace!("client queued; compositor role now {:?}", grabbed);
    }

    fn grab_last_posted(&self) -> Arc<Buffer> {
        let state = transition(&self.grabbed, "grab_last_posted", compositor_to_grabbed);
        let buffer = self.buffer_for(state);
        trace!("compositor grabbed {}", buffer.id());
        buffer
    }

    fn ungrab(&self) {
        transition(&self.grabbed, "ungrab", compositor_to_ungrabbed);
        trace!("compositor ungrabbed");
    }
}

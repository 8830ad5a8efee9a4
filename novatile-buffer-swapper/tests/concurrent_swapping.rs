use std::sync::Arc;
use std::thread;

use novatile_buffer_swapper::{
    BufferProperties, BufferSwapper, BufferSwapperDouble, HeadlessAllocator, PixelFormat,
    TemporaryClientBuffer, TemporaryCompositorBuffer,
};
use novatile_core::Size;
use pretty_assertions::assert_eq;

const ITERATIONS: usize = 100_000;

fn swapper() -> Arc<BufferSwapperDouble> {
    Arc::new(
        BufferSwapperDouble::with_allocator(
            &HeadlessAllocator,
            &BufferProperties::new(Size::new(320, 240), PixelFormat::Xrgb8888),
        )
        .unwrap(),
    )
}

#[test]
fn client_and_compositor_run_without_waiting_for_each_other() {
    let swapper = swapper();
    let ids = swapper.buffers().map(|buffer| buffer.id());

    let client = {
        let swapper = Arc::clone(&swapper);
        thread::spawn(move || {
            for _ in 0..ITERATIONS {
                let buffer = swapper.dequeue_free_buffer();
                assert!(ids.contains(&buffer.id()));
                swapper.queue_finished_buffer();
            }
        })
    };

    let compositor = {
        let swapper = Arc::clone(&swapper);
        thread::spawn(move || {
            for _ in 0..ITERATIONS {
                let buffer = swapper.grab_last_posted();
                assert!(ids.contains(&buffer.id()));
                swapper.ungrab();
            }
        })
    };

    client.join().unwrap();
    compositor.join().unwrap();

    assert!(!swapper.dequeued_state().holds_buffer());
    assert!(!swapper.grabbed_state().holds_buffer());

    let last = swapper.dequeue_free_buffer().id();
    swapper.queue_finished_buffer();
    assert_eq!(swapper.grab_last_posted().id(), last);
    swapper.ungrab();
}

#[test]
fn guards_under_contention() {
    let swapper = swapper();

    let client = {
        let swapper = Arc::clone(&swapper);
        thread::spawn(move || {
            for _ in 0..ITERATIONS {
                let _frame = TemporaryClientBuffer::new(&*swapper);
            }
        })
    };

    let compositor = {
        let swapper = Arc::clone(&swapper);
        thread::spawn(move || {
            let mut grabs = 0;
            for _ in 0..ITERATIONS {
                let frame = TemporaryCompositorBuffer::new(&*swapper);
                assert_eq!(frame.size(), Size::new(320, 240));
                grabs += 1;
            }
            grabs
        })
    };

    client.join().unwrap();
    assert_eq!(compositor.join().unwrap(), ITERATIONS);
}

//! Headless novatile driver.
//!
//! Starts a tiling window manager on the configured display layout, connects one
//! simulated client per session through a double-buffered stream and runs the
//! compositor for a fixed number of frames. Halfway through, it cycles focus and
//! maximizes the focused surface so the retiled layout shows up in the log.

mod headless;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use novatile_buffer_swapper::{
    BufferProperties, BufferSwapper, BufferSwapperDouble, Compositor, HeadlessAllocator, PixelFormat, Renderable,
    TemporaryClientBuffer,
};
use novatile_core::{init_logging, init_minimal_logging, ConfigLoader, Size};
use novatile_wm::input::keyboard::{KEY_F11, KEY_TAB};
use novatile_wm::input::KeyboardEvent;
use novatile_wm::{Modifiers, SessionId, SurfaceCreationParameters, SurfaceId, TilingWindowManager};
use tracing::{debug, info, trace, warn};

use crate::headless::{HeadlessDisplay, LoggingRenderer};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const CLIENT_SURFACE_SIZE: Size = Size::new(640, 480);

struct Client {
    session: SessionId,
    surface: SurfaceId,
    stream: Arc<dyn BufferSwapper>,
}

fn main() -> Result<()> {
    init_minimal_logging();
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    init_logging(&config.logging, true).context("Failed to initialize logging")?;

    info!("Starting novatile headless compositor...");
    let headless = &config.headless;

    let mut wm = TilingWindowManager::tiling(&config.window_management);
    let mut displays = Vec::with_capacity(headless.displays.len());
    for display in &headless.displays {
        wm.add_display(display.area());
        displays.push(HeadlessDisplay::new(display.area()));
    }

    let allocator = HeadlessAllocator;
    let properties = BufferProperties::new(CLIENT_SURFACE_SIZE, PixelFormat::Xrgb8888);
    let mut clients = Vec::new();
    for index in 0..headless.sessions {
        let name = format!("client-{}", index);
        let session = wm.add_session(name.as_str(), None);
        let surface = wm.add_surface(
            session,
            SurfaceCreationParameters::new(CLIENT_SURFACE_SIZE).with_name(name.as_str()),
        )?;
        let swapper = BufferSwapperDouble::with_allocator(&allocator, &properties)
            .with_context(|| format!("Failed to allocate buffers for {}", name))?;
        clients.push(Client {
            session,
            surface,
            stream: Arc::new(swapper),
        });
    }

    let (ready_tx, ready_rx) = mpsc::channel();
    let mut workers = Vec::with_capacity(clients.len());
    for client in &clients {
        workers.push(spawn_client(client, headless.frames, ready_tx.clone())?);
    }
    drop(ready_tx);

    let mut compositor = Compositor::new(LoggingRenderer::new());
    for frame in 0..headless.frames {
        mark_ready(&mut wm, &ready_rx)?;
        if frame == headless.frames / 2 {
            send_shortcuts(&mut wm);
        }
        sync_placements(&mut compositor, &wm, &clients)?;
        for display in displays.iter_mut() {
            compositor.render(display);
        }
        thread::sleep(FRAME_INTERVAL);
    }

    for worker in workers {
        worker.join().map_err(|_| anyhow!("A client thread panicked"))?;
    }
    mark_ready(&mut wm, &ready_rx)?;

    log_layout(&wm, &clients)?;
    info!(
        "Drew {} buffers over {} frames on {} displays",
        compositor.renderer().draws(),
        headless.frames,
        displays.len()
    );
    info!("novatile shutting down.");
    Ok(())
}

/// Runs a client that draws `frames` frames and reports its first one on `ready`.
fn spawn_client(client: &Client, frames: u32, ready: Sender<SurfaceId>) -> Result<JoinHandle<()>> {
    let surface = client.surface;
    let stream = Arc::clone(&client.stream);
    thread::Builder::new()
        .name(format!("{}", surface))
        .spawn(move || {
            for frame in 0..frames {
                {
                    let buffer = TemporaryClientBuffer::new(&*stream);
                    trace!("{} drew frame {} into {}", surface, frame, buffer.id());
                }
                if frame == 0 && ready.send(surface).is_err() {
                    warn!("Compositor went away before {} was ready", surface);
                    return;
                }
                thread::sleep(FRAME_INTERVAL);
            }
        })
        .context("Failed to spawn client thread")
}

fn mark_ready(wm: &mut TilingWindowManager, ready: &Receiver<SurfaceId>) -> Result<()> {
    while let Ok(surface) = ready.try_recv() {
        debug!("{} posted its first frame", surface);
        wm.surface_ready(surface)?;
    }
    Ok(())
}

fn send_shortcuts(wm: &mut TilingWindowManager) {
    for (name, scan_code) in [("Alt+Tab", KEY_TAB), ("Alt+F11", KEY_F11)] {
        let consumed = wm.handle_input_event(&KeyboardEvent::key_down(scan_code, Modifiers::ALT).into());
        info!(
            "{} consumed: {}, focus now {:?}/{:?}",
            name,
            consumed,
            wm.focused_session(),
            wm.focused_surface()
        );
    }
}

/// Points every client's renderable at its surface's current geometry.
fn sync_placements(
    compositor: &mut Compositor<LoggingRenderer>,
    wm: &TilingWindowManager,
    clients: &[Client],
) -> Result<()> {
    for client in clients {
        compositor.remove_renderables(&client.stream);
        let placement = wm.surface_geometry(client.surface)?;
        compositor.add_renderable(Renderable::new(placement, Arc::clone(&client.stream)));
    }
    Ok(())
}

fn log_layout(wm: &TilingWindowManager, clients: &[Client]) -> Result<()> {
    for client in clients {
        info!(
            "{}: tile {}, {} at {} ({:?})",
            client.session,
            wm.tile(client.session)?,
            client.surface,
            wm.surface_geometry(client.surface)?,
            wm.surface_state(client.surface)?
        );
    }
    Ok(())
}

//! A single winit-backed window with a size-constraining controller, a
//! logging listener and persisted geometry.
//!
//! Run with `cargo run -p casement --example winit_window`.

use std::sync::Arc;

use casement::prelude::*;
use casement::window::{
    restore_saved_frame, FrameAutosaver, TomlFrameStore, WindowRouter, WinitWindowService,
};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

struct MinSizeController {
    min: Size,
}

impl WindowController for MinSizeController {
    fn constraint_size(&self, _window: &Window, size: Size) -> Size {
        size.clamp(self.min, None)
    }

    fn on_closed(&self, _window: &Window) {
        tracing::info!("main window closed");
    }
}

struct Tracer;

impl WindowListener for Tracer {
    fn on_size_changed(&self, _window: &Window, size: Size) {
        tracing::info!(width = size.width, height = size.height, "resized");
    }

    fn on_position_changed(&self, _window: &Window, position: Point) {
        tracing::info!(x = position.x, y = position.y, "moved");
    }
}

#[derive(Default)]
struct App {
    window: Option<Arc<Window>>,
    tracer: Option<Arc<Tracer>>,
    autosaver: Option<Arc<FrameAutosaver>>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let store = match TomlFrameStore::in_config_dir("casement-demo") {
            Ok(store) => Some(Arc::new(store)),
            Err(err) => {
                tracing::warn!(%err, "frame autosave disabled");
                None
            }
        };

        let mut config = WindowConfig::new("Casement")
            .with_size(640.0, 480.0)
            .with_min_size(320.0, 240.0)
            .with_auto_save_frame("main");
        if let Some(store) = &store {
            config = restore_saved_frame(config, store.as_ref());
        }
        let config = config.with_visible(true);

        let controller = Arc::new(MinSizeController {
            min: Size::new(320.0, 240.0),
        });
        let service = WinitWindowService::new(event_loop);
        let window = match Window::create(&service, &config, Some(controller)) {
            Ok(window) => window,
            Err(err) => {
                tracing::error!(%err, "could not create window");
                event_loop.exit();
                return;
            }
        };

        let tracer = Arc::new(Tracer);
        window.register_window_listener(&tracer);
        self.autosaver = store.and_then(|store| FrameAutosaver::attach(&window, store));
        self.tracer = Some(tracer);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let router = WindowRouter::instance();
        router.route_window_event(id, &event);
        if router.is_empty() {
            self.window = None;
            event_loop.exit();
        }
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let event_loop = EventLoop::new()?;
    let mut app = App::default();
    event_loop.run_app(&mut app)?;
    Ok(())
}

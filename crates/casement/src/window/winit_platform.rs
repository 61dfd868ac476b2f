//! winit-backed platform window service.
//!
//! [`WinitWindowService`] creates winit windows from inside the event loop and
//! registers them with the global [`WindowRouter`]. The application forwards
//! winit window events to [`WindowRouter::route_window_event`], which turns
//! them into [`WindowDelegate`] callbacks.
//!
//! # Usage
//!
//! ```ignore
//! use casement::window::{Window, WindowConfig, WindowRouter, WinitWindowService};
//!
//! impl ApplicationHandler for App {
//!     fn resumed(&mut self, event_loop: &ActiveEventLoop) {
//!         let service = WinitWindowService::new(event_loop);
//!         self.window = Window::create(&service, &WindowConfig::new("Main"), None).ok();
//!     }
//!
//!     fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
//!         WindowRouter::instance().route_window_event(id, &event);
//!         if WindowRouter::instance().is_empty() {
//!             event_loop.exit();
//!         }
//!     }
//! }
//! ```
//!
//! winit has no hook that runs before a resize is committed, so the router
//! applies [`WindowDelegate::constraint_size`] when the resize is reported:
//! if the delegate adjusts the size, the adjusted size is requested from the
//! window and reported to the delegate. A size is reported once, however many
//! times winit delivers it.
//!
//! [`WindowStyle::CENTERED`] windows without an explicit position are centered
//! on their monitor at creation. [`WindowStyle::MOVABLE_BY_BACKGROUND`]
//! windows start a system drag on a left press that reaches the router.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};

use casement_core::logging::targets;
use casement_core::{Point, Size};
use parking_lot::{Mutex, RwLock};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window as WinitWindow, WindowId};

use super::platform::{PlatformType, PlatformWindow, PlatformWindowService, WindowDelegate};
use super::window_config::{WindowConfig, WindowStyle};
use crate::error::PlatformError;

/// Global router instance.
static WINDOW_ROUTER: OnceLock<WindowRouter> = OnceLock::new();

/// Creates winit windows.
///
/// Must be used from inside the event loop (typically in `resumed()`).
pub struct WinitWindowService<'a> {
    event_loop: &'a ActiveEventLoop,
}

impl<'a> WinitWindowService<'a> {
    /// Create a service for the running event loop.
    pub fn new(event_loop: &'a ActiveEventLoop) -> Self {
        Self { event_loop }
    }
}

impl PlatformWindowService for WinitWindowService<'_> {
    fn create_window(
        &self,
        config: &WindowConfig,
        delegate: Weak<dyn WindowDelegate>,
    ) -> Result<Arc<dyn PlatformWindow>, PlatformError> {
        let window = self
            .event_loop
            .create_window(config.to_window_attributes())
            .map_err(|err| PlatformError::CreationFailed(err.to_string()))?;

        let style = config.effective_style();
        if style.contains(WindowStyle::CENTERED) && config.position().is_none() {
            center_on_monitor(&window);
        }

        let platform = Arc::new(WinitPlatformWindow {
            window,
            delegate,
            style,
            reported_size: ResizeFilter::default(),
        });
        WindowRouter::instance().register(&platform);
        tracing::debug!(target: targets::PLATFORM, id = ?platform.id(), "winit window created");
        Ok(platform)
    }
}

fn center_on_monitor(window: &WinitWindow) {
    let Some(monitor) = window.current_monitor() else {
        tracing::debug!(target: targets::PLATFORM, "no monitor to center on");
        return;
    };
    let position = centered_position(monitor.position(), monitor.size(), window.outer_size());
    window.set_outer_position(position);
}

/// Top-left corner that centers `window` inside a monitor, in physical pixels.
fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |outer: u32, inner: u32| (i64::from(outer) - i64::from(inner)) / 2;
    let x = i64::from(monitor_origin.x) + offset(monitor_size.width, window.width);
    let y = i64::from(monitor_origin.y) + offset(monitor_size.height, window.height);
    PhysicalPosition::new(saturate(x), saturate(y))
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Last size reported to the delegate.
///
/// winit may report an applied size both from `request_inner_size` and
/// through a later `Resized` event.
#[derive(Debug, Default)]
struct ResizeFilter {
    last: Mutex<Option<Size>>,
}

impl ResizeFilter {
    /// Record `size`; `false` if it was already the last reported size.
    fn accept(&self, size: Size) -> bool {
        let mut last = self.last.lock();
        if *last == Some(size) {
            return false;
        }
        *last = Some(size);
        true
    }
}

/// A winit window driving a [`WindowDelegate`].
pub struct WinitPlatformWindow {
    window: WinitWindow,
    delegate: Weak<dyn WindowDelegate>,
    style: WindowStyle,
    reported_size: ResizeFilter,
}

impl WinitPlatformWindow {
    /// The winit window id.
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// The underlying winit window.
    pub fn winit_window(&self) -> &WinitWindow {
        &self.window
    }

    fn delegate(&self) -> Option<Arc<dyn WindowDelegate>> {
        self.delegate.upgrade()
    }

    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    fn handle_resized(&self, physical: PhysicalSize<u32>) {
        let Some(delegate) = self.delegate() else {
            return;
        };
        let logical: LogicalSize<f64> = physical.to_logical(self.scale_factor());
        let reported = Size::new(logical.width, logical.height);
        let constrained = delegate.constraint_size(reported);
        if constrained != reported {
            tracing::trace!(target: targets::PLATFORM, ?reported, ?constrained, "applying size constraint");
            let _ = self
                .window
                .request_inner_size(LogicalSize::new(constrained.width, constrained.height));
        }
        if !self.reported_size.accept(constrained) {
            tracing::trace!(target: targets::PLATFORM, size = ?constrained, "size already reported");
            return;
        }
        delegate.on_size_changed(constrained);
    }

    /// Start a system move for windows dragged by their background.
    fn handle_background_press(&self) -> bool {
        if !self.style.contains(WindowStyle::MOVABLE_BY_BACKGROUND) {
            return false;
        }
        if let Err(err) = self.window.drag_window() {
            tracing::debug!(target: targets::PLATFORM, %err, "background drag unavailable");
        }
        true
    }

    fn handle_moved(&self, physical: PhysicalPosition<i32>) {
        if let Some(delegate) = self.delegate() {
            let logical: LogicalPosition<f64> = physical.to_logical(self.scale_factor());
            delegate.on_position_changed(Point::new(logical.x, logical.y));
        }
    }

    /// Run the close request through the delegate's veto.
    fn request_close(&self) {
        let Some(delegate) = self.delegate() else {
            return;
        };
        if !delegate.can_close() {
            tracing::debug!(target: targets::PLATFORM, id = ?self.id(), "close vetoed");
            return;
        }
        self.window.set_visible(false);
        WindowRouter::instance().unregister(self.id());
        delegate.on_closed();
    }
}

impl PlatformWindow for WinitPlatformWindow {
    fn size(&self) -> Size {
        let logical: LogicalSize<f64> = self.window.inner_size().to_logical(self.scale_factor());
        Size::new(logical.width, logical.height)
    }

    fn position(&self) -> Point {
        match self.window.outer_position() {
            Ok(physical) => {
                let logical: LogicalPosition<f64> = physical.to_logical(self.scale_factor());
                Point::new(logical.x, logical.y)
            }
            Err(_) => {
                tracing::trace!(target: targets::PLATFORM, "window position unavailable");
                Point::ZERO
            }
        }
    }

    fn set_size(&self, size: Size) {
        let size = match self.delegate() {
            Some(delegate) => delegate.constraint_size(size),
            None => size,
        };
        if let Some(applied) = self
            .window
            .request_inner_size(LogicalSize::new(size.width, size.height))
        {
            self.handle_resized(applied);
        }
    }

    fn set_position(&self, position: Point) {
        self.window
            .set_outer_position(LogicalPosition::new(position.x, position.y));
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    fn show(&self) {
        self.window.set_visible(true);
        if let Some(delegate) = self.delegate() {
            delegate.on_show();
        }
    }

    fn hide(&self) {
        self.window.set_visible(false);
        if let Some(delegate) = self.delegate() {
            delegate.on_hide();
        }
    }

    fn close(&self) {
        self.request_close();
    }

    fn platform_handle(&self) -> Option<RawWindowHandle> {
        match self.window.window_handle() {
            Ok(handle) => Some(handle.as_raw()),
            Err(err) => {
                tracing::warn!(target: targets::PLATFORM, %err, "native window handle unavailable");
                None
            }
        }
    }

    fn platform_type(&self) -> PlatformType {
        self.platform_handle()
            .map_or(PlatformType::Other, |handle| PlatformType::from_raw(&handle))
    }
}

impl std::fmt::Debug for WinitPlatformWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitPlatformWindow")
            .field("id", &self.id())
            .finish()
    }
}

/// Routes winit window events to the platform windows that own them.
///
/// Holds platform windows weakly; a window leaves the router when it closes
/// or when winit reports it destroyed.
pub struct WindowRouter {
    windows: RwLock<HashMap<WindowId, Weak<WinitPlatformWindow>>>,
}

impl WindowRouter {
    fn new() -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Get the global router instance.
    pub fn instance() -> &'static WindowRouter {
        WINDOW_ROUTER.get_or_init(WindowRouter::new)
    }

    fn register(&self, window: &Arc<WinitPlatformWindow>) {
        self.windows
            .write()
            .insert(window.id(), Arc::downgrade(window));
    }

    fn unregister(&self, id: WindowId) -> bool {
        self.windows.write().remove(&id).is_some()
    }

    fn get(&self, id: WindowId) -> Option<Arc<WinitPlatformWindow>> {
        self.windows.read().get(&id).and_then(Weak::upgrade)
    }

    /// Check if a window is routed.
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.read().contains_key(&id)
    }

    /// Number of routed windows.
    pub fn count(&self) -> usize {
        self.windows.read().len()
    }

    /// Check if no windows are routed.
    pub fn is_empty(&self) -> bool {
        self.windows.read().is_empty()
    }

    /// Dispatch one winit window event.
    ///
    /// Returns `true` if the event was consumed.
    pub fn route_window_event(&self, window_id: WindowId, event: &WindowEvent) -> bool {
        let Some(window) = self.get(window_id) else {
            return false;
        };

        match event {
            WindowEvent::Resized(size) => {
                window.handle_resized(*size);
                true
            }
            WindowEvent::Moved(position) => {
                window.handle_moved(*position);
                true
            }
            WindowEvent::CloseRequested => {
                window.request_close();
                true
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => window.handle_background_press(),
            WindowEvent::Destroyed => {
                self.unregister(window_id);
                true
            }
            _ => false,
        }
    }
}

impl Default for WindowRouter {
    fn default() -> Self {
        Self::new()
    }
}

//! Recording test doubles shared by the integration tests.
//!
//! Every double appends to one shared event log so tests can assert on the
//! relative order of calls across the platform, listeners, controller and
//! content view.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use casement::prelude::*;
use casement::window::PlatformType;
use parking_lot::Mutex;
use raw_window_handle::{RawWindowHandle, WebWindowHandle};

/// Shared, ordered event log.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }

    /// Count events equal to `event`.
    pub fn count(&self, event: &str) -> usize {
        self.0.lock().iter().filter(|e| e.as_str() == event).count()
    }

    /// Index of the first event equal to `event`.
    pub fn position(&self, event: &str) -> Option<usize> {
        self.0.lock().iter().position(|e| e == event)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

// =============================================================================
// Platform
// =============================================================================

pub struct MockService {
    log: EventLog,
    fail: bool,
    last: Mutex<Option<Arc<MockPlatformWindow>>>,
}

impl MockService {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            fail: false,
            last: Mutex::new(None),
        }
    }

    pub fn failing(log: &EventLog) -> Self {
        Self {
            fail: true,
            ..Self::new(log)
        }
    }

    /// The most recently created platform window.
    ///
    /// The service lets go of it on this call, so the window stays the only
    /// owner of its platform window.
    pub fn take_platform_window(&self) -> Arc<MockPlatformWindow> {
        self.last.lock().take().expect("no platform window created")
    }
}

impl PlatformWindowService for MockService {
    fn create_window(
        &self,
        config: &WindowConfig,
        delegate: Weak<dyn WindowDelegate>,
    ) -> std::result::Result<Arc<dyn PlatformWindow>, PlatformError> {
        self.log.push("platform.create");
        if self.fail {
            return Err(PlatformError::CreationFailed("mock refused".to_string()));
        }
        let window = Arc::new(MockPlatformWindow {
            log: self.log.clone(),
            delegate,
            size: Mutex::new(config.size().unwrap_or(Size::new(100.0, 100.0))),
            position: Mutex::new(config.position().unwrap_or_default()),
            title: Mutex::new(config.title().to_string()),
            visible: AtomicBool::new(config.is_visible()),
        });
        *self.last.lock() = Some(Arc::clone(&window));
        Ok(window)
    }
}

pub struct MockPlatformWindow {
    log: EventLog,
    delegate: Weak<dyn WindowDelegate>,
    size: Mutex<Size>,
    position: Mutex<Point>,
    title: Mutex<String>,
    visible: AtomicBool,
}

impl MockPlatformWindow {
    fn delegate(&self) -> Option<Arc<dyn WindowDelegate>> {
        self.delegate.upgrade()
    }

    /// A resize originating from the user dragging the window edge.
    pub fn user_resize(&self, size: Size) {
        let Some(delegate) = self.delegate() else {
            return;
        };
        let size = delegate.constraint_size(size);
        *self.size.lock() = size;
        delegate.on_size_changed(size);
    }

    /// A move originating from the user dragging the title bar.
    pub fn user_move(&self, position: Point) {
        let Some(delegate) = self.delegate() else {
            return;
        };
        *self.position.lock() = position;
        delegate.on_position_changed(position);
    }

    /// A close originating from the close button.
    pub fn user_close(&self) {
        let Some(delegate) = self.delegate() else {
            return;
        };
        if delegate.can_close() {
            delegate.on_closed();
        } else {
            self.log.push("platform.close_vetoed");
        }
    }

    pub fn title(&self) -> String {
        self.title.lock().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn delegate_alive(&self) -> bool {
        self.delegate.strong_count() > 0
    }
}

impl PlatformWindow for MockPlatformWindow {
    fn size(&self) -> Size {
        *self.size.lock()
    }

    fn position(&self) -> Point {
        *self.position.lock()
    }

    fn set_size(&self, size: Size) {
        self.log.push("platform.set_size");
        self.user_resize(size);
    }

    fn set_position(&self, position: Point) {
        self.log.push("platform.set_position");
        self.user_move(position);
    }

    fn set_title(&self, title: &str) {
        self.log.push(format!("platform.set_title {title}"));
        *self.title.lock() = title.to_string();
    }

    fn show(&self) {
        self.log.push("platform.show");
        self.visible.store(true, Ordering::SeqCst);
        if let Some(delegate) = self.delegate() {
            delegate.on_show();
        }
    }

    fn hide(&self) {
        self.log.push("platform.hide");
        self.visible.store(false, Ordering::SeqCst);
        if let Some(delegate) = self.delegate() {
            delegate.on_hide();
        }
    }

    fn close(&self) {
        self.log.push("platform.close");
        self.user_close();
    }

    fn platform_handle(&self) -> Option<RawWindowHandle> {
        Some(RawWindowHandle::Web(WebWindowHandle::new(1)))
    }

    fn platform_type(&self) -> PlatformType {
        PlatformType::Web
    }
}

impl Drop for MockPlatformWindow {
    fn drop(&mut self) {
        self.log.push("platform.released");
    }
}

// =============================================================================
// Content view
// =============================================================================

pub struct MockView {
    name: &'static str,
    log: EventLog,
}

impl MockView {
    pub fn boxed(name: &'static str, log: &EventLog) -> Box<dyn ContentView> {
        Box::new(Self {
            name,
            log: log.clone(),
        })
    }
}

impl ContentView for MockView {
    fn open(&self, _parent: RawWindowHandle, platform_type: PlatformType) {
        self.log
            .push(format!("view:{}.open {:?}", self.name, platform_type));
    }

    fn close(&self) {
        self.log.push(format!("view:{}.close", self.name));
    }

    fn set_size(&self, size: Size) {
        self.log
            .push(format!("view:{}.set_size {}x{}", self.name, size.width, size.height));
    }

    fn prepare_release(&self) {
        self.log.push(format!("view:{}.prepare_release", self.name));
    }
}

impl Drop for MockView {
    fn drop(&mut self) {
        self.log.push(format!("view:{}.dropped", self.name));
    }
}

// =============================================================================
// Listeners
// =============================================================================

type Hook = Box<dyn FnMut(&Window, &str) + Send>;

/// Listener that logs every notification and optionally runs a hook after it.
pub struct RecordingListener {
    name: &'static str,
    log: EventLog,
    hook: Mutex<Option<Hook>>,
    pub id: Mutex<Option<ListenerId>>,
}

impl RecordingListener {
    pub fn new(name: &'static str, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            name,
            log: log.clone(),
            hook: Mutex::new(None),
            id: Mutex::new(None),
        })
    }

    /// Register with a live `window`, remembering the id.
    pub fn register(self: &Arc<Self>, window: &Window) -> ListenerId {
        self.try_register(window).expect("window is live")
    }

    /// Register with `window` if it still accepts listeners.
    pub fn try_register(self: &Arc<Self>, window: &Window) -> Option<ListenerId> {
        let id = window.register_window_listener(self)?;
        *self.id.lock() = Some(id);
        Some(id)
    }

    /// Run `hook` after each notification; it receives the event name.
    pub fn set_hook(&self, hook: impl FnMut(&Window, &str) + Send + 'static) {
        *self.hook.lock() = Some(Box::new(hook));
    }

    fn record(&self, window: &Window, event: &str) {
        self.log.push(format!("listener:{}.{}", self.name, event));
        // Take the hook out so it may re-enter this listener.
        let hook = self.hook.lock().take();
        if let Some(mut hook) = hook {
            hook(window, event);
            let mut slot = self.hook.lock();
            if slot.is_none() {
                *slot = Some(hook);
            }
        }
    }
}

impl WindowListener for RecordingListener {
    fn on_size_changed(&self, window: &Window, _size: Size) {
        self.record(window, "size_changed");
    }

    fn on_position_changed(&self, window: &Window, _position: Point) {
        self.record(window, "position_changed");
    }

    fn on_show(&self, window: &Window) {
        self.record(window, "show");
    }

    fn on_hide(&self, window: &Window) {
        self.record(window, "hide");
    }

    fn on_closed(&self, window: &Window) {
        self.record(window, "closed");
    }
}

// =============================================================================
// Controllers
// =============================================================================

/// Controller that logs every notification.
pub struct RecordingController {
    log: EventLog,
    allow_close: AtomicBool,
    min_size: Option<Size>,
    pub capability_checks: AtomicUsize,
}

impl RecordingController {
    pub fn new(log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            log: log.clone(),
            allow_close: AtomicBool::new(true),
            min_size: None,
            capability_checks: AtomicUsize::new(0),
        })
    }

    pub fn with_min_size(log: &EventLog, min_size: Size) -> Arc<Self> {
        Arc::new(Self {
            log: log.clone(),
            allow_close: AtomicBool::new(true),
            min_size: Some(min_size),
            capability_checks: AtomicUsize::new(0),
        })
    }

    pub fn set_allow_close(&self, allow: bool) {
        self.allow_close.store(allow, Ordering::SeqCst);
    }
}

impl WindowController for RecordingController {
    fn constraint_size(&self, _window: &Window, size: Size) -> Size {
        match self.min_size {
            Some(min) => size.clamp(min, None),
            None => size,
        }
    }

    fn on_size_changed(&self, _window: &Window, size: Size) {
        self.log
            .push(format!("controller.size_changed {}x{}", size.width, size.height));
    }

    fn on_position_changed(&self, _window: &Window, _position: Point) {
        self.log.push("controller.position_changed");
    }

    fn on_show(&self, _window: &Window) {
        self.log.push("controller.show");
    }

    fn on_hide(&self, _window: &Window) {
        self.log.push("controller.hide");
    }

    fn on_closed(&self, _window: &Window) {
        self.log.push("controller.closed");
    }

    fn can_close(&self, _window: &Window) -> bool {
        self.allow_close.load(Ordering::SeqCst)
    }

    fn command_handler(&self) -> Option<&dyn CommandHandler> {
        self.capability_checks.fetch_add(1, Ordering::SeqCst);
        None
    }
}

/// Controller exposing the command capability for the `Edit` group.
pub struct EditController {
    pub handled: Mutex<Vec<Command>>,
}

impl EditController {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            handled: Mutex::new(Vec::new()),
        })
    }
}

impl WindowController for EditController {
    fn command_handler(&self) -> Option<&dyn CommandHandler> {
        Some(self)
    }
}

impl CommandHandler for EditController {
    fn can_handle_command(&self, command: &Command) -> bool {
        command.group() == "Edit"
    }

    fn handle_command(&self, command: &Command) -> bool {
        if !self.can_handle_command(command) {
            return false;
        }
        self.handled.lock().push(command.clone());
        true
    }
}

// =============================================================================
// Setup
// =============================================================================

/// Drives a platform window from the test without owning it.
///
/// Each call holds a strong reference only while the platform is calling
/// back, the way a native window stays alive while dispatching its events.
pub struct PlatformProbe(Weak<MockPlatformWindow>);

impl PlatformProbe {
    fn get(&self) -> Arc<MockPlatformWindow> {
        self.0.upgrade().expect("platform window already released")
    }

    pub fn user_resize(&self, size: Size) {
        self.get().user_resize(size);
    }

    pub fn user_move(&self, position: Point) {
        self.get().user_move(position);
    }

    pub fn user_close(&self) {
        self.get().user_close();
    }

    pub fn title(&self) -> String {
        self.get().title()
    }

    pub fn is_visible(&self) -> bool {
        self.get().is_visible()
    }

    /// Whether the platform window still exists.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Whether the window it reports to still exists.
    pub fn delegate_alive(&self) -> bool {
        self.0.upgrade().is_some_and(|platform| platform.delegate_alive())
    }
}

/// A live window with the given controller, plus a probe for its platform
/// window. The event log is cleared after creation.
pub fn live_window(
    log: &EventLog,
    config: &WindowConfig,
    controller: Option<Arc<dyn WindowController>>,
) -> (Arc<Window>, PlatformProbe) {
    init_tracing();
    let service = MockService::new(log);
    let window = Window::create(&service, config, controller).expect("mock creation succeeds");
    let platform = Arc::downgrade(&service.take_platform_window());
    log.clear();
    (window, PlatformProbe(platform))
}

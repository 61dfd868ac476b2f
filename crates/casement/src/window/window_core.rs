//! The window object.
//!
//! [`Window`] ties together a platform window, an optional controller, an
//! attached content view and a set of listeners. Application code calls into
//! it to change the window; the platform calls back into it (as a
//! [`WindowDelegate`]) when the window changes underneath the application.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──create──▶ Live ──on_closed──▶ Closing ──▶ Closed
//! ```
//!
//! Creation is the only fallible step; a failed creation produces no window.
//! The close sequence notifies every listener (unregistering each one as it
//! goes), then the controller, then releases the content view and finally the
//! platform window. Once closed, a window is inert: proxy calls are logged and
//! ignored, getters return `None`. Listener registration and content view
//! changes are refused as soon as the close sequence starts.
//!
//! # Re-entrancy
//!
//! Listeners, the controller, the content view and the platform may all call
//! back into the window from inside a notification, including closing it or
//! unregistering listeners. No internal lock is held while any of them runs.

use std::sync::{Arc, Weak};

use casement_core::logging::targets;
use casement_core::{ListenerId, ListenerList, Point, Size, ThreadAffinity};
use parking_lot::Mutex;

use super::content_view::{ContentView, WindowListener};
use super::controller::{Command, ControllerSlot, WindowController};
use super::platform::{PlatformWindow, PlatformWindowService, WindowDelegate};
use super::window_config::WindowConfig;
use crate::error::Result;

/// Lifecycle phase of a [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowPhase {
    /// Constructed, platform window not created yet.
    Uninitialized,
    /// Platform window present; every operation is valid.
    Live,
    /// The close notification fan-out is running.
    Closing,
    /// Terminal. The platform window and content view have been released.
    Closed,
}

/// A window driven by a platform window service.
///
/// Created with [`Window::create`], which returns the window in an [`Arc`].
/// The platform service holds only a weak reference back to it.
///
/// # Example
///
/// ```ignore
/// use casement::window::{Window, WindowConfig};
///
/// let window = Window::create(&service, &WindowConfig::new("Main"), None)?;
/// window.set_title("Untitled");
/// window.show();
/// ```
pub struct Window {
    this: Weak<Window>,
    affinity: ThreadAffinity,
    controller: ControllerSlot,
    platform_window: Mutex<Option<Arc<dyn PlatformWindow>>>,
    content_view: Mutex<Option<Arc<dyn ContentView>>>,
    auto_save_frame_name: Option<String>,
    listeners: ListenerList<dyn WindowListener>,
    phase: Mutex<WindowPhase>,
}

/// Keeps a window alive for the duration of its close sequence.
struct CloseGuard(Option<Arc<Window>>);

impl Drop for CloseGuard {
    fn drop(&mut self) {
        tracing::trace!(
            target: targets::WINDOW,
            strong_refs = self.0.as_ref().map(Arc::strong_count),
            "close sequence finished"
        );
    }
}

impl Window {
    /// Create a window through `service`.
    ///
    /// The window registers itself as the platform window's delegate. The
    /// controller is recorded, and so is the autosave name when `config`
    /// requests persisted geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WindowCreation`](crate::Error::WindowCreation) if the
    /// platform cannot create the window. No window is produced in that case.
    pub fn create(
        service: &dyn PlatformWindowService,
        config: &WindowConfig,
        controller: Option<Arc<dyn WindowController>>,
    ) -> Result<Arc<Self>> {
        let auto_save_frame_name = config
            .does_auto_save_frame()
            .then(|| config.auto_save_frame_name().map(str::to_owned))
            .flatten();

        let window = Arc::new_cyclic(|this| Self {
            this: this.clone(),
            affinity: ThreadAffinity::current(),
            controller: ControllerSlot::new(controller),
            platform_window: Mutex::new(None),
            content_view: Mutex::new(None),
            auto_save_frame_name,
            listeners: ListenerList::new(),
            phase: Mutex::new(WindowPhase::Uninitialized),
        });

        let delegate: Weak<dyn WindowDelegate> = window.this.clone();
        let platform_window = service.create_window(config, delegate).map_err(|err| {
            tracing::debug!(target: targets::WINDOW, title = config.title(), %err, "window creation failed");
            err
        })?;

        *window.platform_window.lock() = Some(platform_window);
        *window.phase.lock() = WindowPhase::Live;
        tracing::debug!(
            target: targets::WINDOW,
            title = config.title(),
            window_type = %config.window_type(),
            auto_save = window.auto_save_frame_name.as_deref(),
            "window created"
        );
        Ok(window)
    }

    /// The controller supplied at creation, if any.
    pub fn controller(&self) -> Option<&Arc<dyn WindowController>> {
        self.controller.get()
    }

    /// The key under which this window's frame is persisted, if requested.
    pub fn auto_save_frame_name(&self) -> Option<&str> {
        self.auto_save_frame_name.as_deref()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> WindowPhase {
        *self.phase.lock()
    }

    /// Check if the close sequence has completed.
    pub fn is_closed(&self) -> bool {
        self.phase() == WindowPhase::Closed
    }

    /// Check if a content view is attached.
    pub fn has_content_view(&self) -> bool {
        self.content_view.lock().is_some()
    }

    // =========================================================================
    // Geometry and visibility
    // =========================================================================

    /// Content size, or `None` once the window is closed.
    pub fn size(&self) -> Option<Size> {
        self.platform("size").map(|platform| platform.size())
    }

    /// Window position, or `None` once the window is closed.
    pub fn position(&self) -> Option<Point> {
        self.platform("position").map(|platform| platform.position())
    }

    /// Request a new content size.
    ///
    /// The platform runs the request through [`constraint_size`] and reports
    /// the result with [`on_size_changed`].
    ///
    /// [`constraint_size`]: WindowDelegate::constraint_size
    /// [`on_size_changed`]: WindowDelegate::on_size_changed
    pub fn set_size(&self, size: Size) {
        if let Some(platform) = self.platform("set_size") {
            platform.set_size(size);
        }
    }

    /// Request a new position.
    pub fn set_position(&self, position: Point) {
        if let Some(platform) = self.platform("set_position") {
            platform.set_position(position);
        }
    }

    /// Set the window title.
    pub fn set_title(&self, title: &str) {
        if let Some(platform) = self.platform("set_title") {
            platform.set_title(title);
        }
    }

    /// Show the window.
    pub fn show(&self) {
        if let Some(platform) = self.platform("show") {
            platform.show();
        }
    }

    /// Hide the window.
    pub fn hide(&self) {
        if let Some(platform) = self.platform("hide") {
            platform.hide();
        }
    }

    /// Ask the platform to close the window.
    ///
    /// The platform consults [`can_close`](WindowDelegate::can_close) and runs
    /// the close sequence if it is allowed.
    pub fn close(&self) {
        if let Some(platform) = self.platform("close") {
            platform.close();
        }
    }

    /// Replace the content view.
    ///
    /// The current view, if any, is closed before `view` is stored and opened
    /// on the native window. Passing `None` only detaches. A view installed
    /// from inside the old view's `close` is closed as well, so at most one
    /// view is ever attached. Once the window starts closing, `view` is
    /// dropped without being opened.
    pub fn set_content_view(&self, view: Option<Box<dyn ContentView>>) {
        let Some(platform) = self.live_platform("set_content_view") else {
            return;
        };

        while let Some(previous) = self.take_content_view() {
            tracing::trace!(target: targets::WINDOW, "detaching content view");
            previous.close();
        }

        let Some(view) = view else {
            return;
        };
        if self.phase() != WindowPhase::Live {
            tracing::warn!(
                target: targets::WINDOW,
                phase = ?self.phase(),
                "window closed while detaching; new content view dropped"
            );
            return;
        }
        let view: Arc<dyn ContentView> = Arc::from(view);
        *self.content_view.lock() = Some(Arc::clone(&view));

        match platform.platform_handle() {
            Some(handle) => {
                tracing::trace!(target: targets::WINDOW, "attaching content view");
                view.open(handle, platform.platform_type());
            }
            None => {
                tracing::warn!(
                    target: targets::WINDOW,
                    "platform window has no native handle; content view stays detached"
                );
            }
        }
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a lifecycle listener.
    ///
    /// The window keeps only a weak reference; the caller owns the listener.
    /// Registering the same listener twice notifies it twice.
    ///
    /// Returns `None` once the close sequence has started: a closing window
    /// sends no further notifications.
    pub fn register_window_listener<L>(&self, listener: &Arc<L>) -> Option<ListenerId>
    where
        L: WindowListener + 'static,
    {
        self.affinity.debug_assert_same_thread();
        let phase = self.phase();
        if phase != WindowPhase::Live {
            tracing::warn!(target: targets::WINDOW, ?phase, "ignoring listener registration on a closing window");
            return None;
        }
        let listener: Weak<dyn WindowListener> = Arc::downgrade(listener) as Weak<dyn WindowListener>;
        Some(self.listeners.add(listener))
    }

    /// Unregister a listener. Safe to call from inside a notification.
    ///
    /// Returns `true` if the listener was registered.
    pub fn unregister_window_listener(&self, id: ListenerId) -> bool {
        self.affinity.debug_assert_same_thread();
        self.listeners.remove(id)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Whether the controller can handle `command`.
    ///
    /// `false` when there is no controller or it has no command capability.
    pub fn can_handle_command(&self, command: &Command) -> bool {
        self.affinity.debug_assert_same_thread();
        match self.controller.effective().command_handler() {
            Some(handler) => handler.can_handle_command(command),
            None => {
                tracing::trace!(target: targets::WINDOW, %command, "no command handler");
                false
            }
        }
    }

    /// Let the controller handle `command`.
    ///
    /// Returns `false` when there is no controller, it has no command
    /// capability, or it did not handle the command.
    pub fn handle_command(&self, command: &Command) -> bool {
        self.affinity.debug_assert_same_thread();
        match self.controller.effective().command_handler() {
            Some(handler) => handler.handle_command(command),
            None => {
                tracing::trace!(target: targets::WINDOW, %command, "no command handler");
                false
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// A strong reference to the platform window for the duration of one call.
    ///
    /// The lock is released before the caller uses the handle, so platform
    /// callbacks may re-enter the window.
    fn platform(&self, operation: &'static str) -> Option<Arc<dyn PlatformWindow>> {
        self.affinity.debug_assert_same_thread();
        let platform = self.platform_window.lock().clone();
        if platform.is_none() {
            tracing::warn!(
                target: targets::WINDOW,
                operation,
                phase = ?self.phase(),
                "ignoring operation on a window without a platform window"
            );
        }
        platform
    }

    /// Like [`platform`](Self::platform), but also refuses once the close
    /// sequence has started.
    fn live_platform(&self, operation: &'static str) -> Option<Arc<dyn PlatformWindow>> {
        let platform = self.platform(operation)?;
        let phase = self.phase();
        if phase != WindowPhase::Live {
            tracing::warn!(target: targets::WINDOW, operation, ?phase, "ignoring operation on a closing window");
            return None;
        }
        Some(platform)
    }

    fn content_view(&self) -> Option<Arc<dyn ContentView>> {
        self.content_view.lock().clone()
    }

    fn take_content_view(&self) -> Option<Arc<dyn ContentView>> {
        self.content_view.lock().take()
    }
}

impl WindowDelegate for Window {
    fn constraint_size(&self, size: Size) -> Size {
        self.controller.effective().constraint_size(self, size)
    }

    #[tracing::instrument(skip(self), target = "casement::window", level = "trace")]
    fn on_size_changed(&self, size: Size) {
        self.listeners
            .for_each(|_, listener| listener.on_size_changed(self, size));
        self.controller.effective().on_size_changed(self, size);
        if let Some(view) = self.content_view() {
            view.set_size(size);
        }
    }

    #[tracing::instrument(skip(self), target = "casement::window", level = "trace")]
    fn on_position_changed(&self, position: Point) {
        self.listeners
            .for_each(|_, listener| listener.on_position_changed(self, position));
        self.controller.effective().on_position_changed(self, position);
    }

    #[tracing::instrument(skip(self), target = "casement::window", level = "trace")]
    fn on_show(&self) {
        self.listeners.for_each(|_, listener| listener.on_show(self));
        self.controller.effective().on_show(self);
    }

    #[tracing::instrument(skip(self), target = "casement::window", level = "trace")]
    fn on_hide(&self) {
        self.listeners.for_each(|_, listener| listener.on_hide(self));
        self.controller.effective().on_hide(self);
    }

    fn can_close(&self) -> bool {
        self.controller.effective().can_close(self)
    }

    #[tracing::instrument(skip(self), target = "casement::window", level = "debug")]
    fn on_closed(&self) {
        {
            let mut phase = self.phase.lock();
            if *phase != WindowPhase::Live {
                tracing::trace!(target: targets::WINDOW, phase = ?*phase, "close already handled");
                return;
            }
            *phase = WindowPhase::Closing;
        }
        let _guard = CloseGuard(self.this.upgrade());

        self.listeners.for_each(|id, listener| {
            listener.on_closed(self);
            self.listeners.remove(id);
        });

        self.controller.effective().on_closed(self);

        if let Some(view) = self.take_content_view() {
            view.prepare_release();
            view.close();
        }

        let platform = self.platform_window.lock().take();
        drop(platform);
        *self.phase.lock() = WindowPhase::Closed;
        tracing::debug!(target: targets::WINDOW, "window closed");
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        tracing::trace!(target: targets::WINDOW, phase = ?*self.phase.get_mut(), "window dropped");
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("phase", &self.phase())
            .field("controller", &self.controller)
            .field("auto_save_frame_name", &self.auto_save_frame_name)
            .field("listeners", &self.listeners.len())
            .field("has_content_view", &self.has_content_view())
            .finish()
    }
}

//! Content views and window listeners.
//!
//! These are the two kinds of collaborators a [`Window`] talks to besides its
//! controller: the single drawable surface it owns, and any number of
//! observers it does not own.

use casement_core::{Point, Size};
use raw_window_handle::RawWindowHandle;

use super::platform::PlatformType;
use super::window_core::Window;

/// The drawable surface attached to a window.
///
/// A window owns at most one content view. Attaching a new one closes the
/// previous view before the new one is opened.
pub trait ContentView: Send + Sync {
    /// Attach to the native window.
    fn open(&self, parent: RawWindowHandle, platform_type: PlatformType);

    /// Detach from the native window.
    fn close(&self);

    /// Match the window's new content size.
    fn set_size(&self, size: Size);

    /// Settle deferred work before the window releases the view for good.
    ///
    /// Called once during the close sequence, before [`close`](Self::close).
    fn prepare_release(&self) {}
}

/// Observer of a window's lifecycle.
///
/// Listeners are registered with [`Window::register_window_listener`] and are
/// held weakly. All methods default to doing nothing.
///
/// A listener receives `on_closed` at most once: the window unregisters each
/// listener right after notifying it of the close.
pub trait WindowListener: Send + Sync {
    /// The window's content size changed.
    fn on_size_changed(&self, _window: &Window, _size: Size) {}

    /// The window moved.
    fn on_position_changed(&self, _window: &Window, _position: Point) {}

    /// The window became visible.
    fn on_show(&self, _window: &Window) {}

    /// The window was hidden.
    fn on_hide(&self, _window: &Window) {}

    /// The window closed.
    fn on_closed(&self, _window: &Window) {}
}

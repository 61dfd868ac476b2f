//! Platform window service interface.
//!
//! A platform window service creates native windows and reports what happens
//! to them. Application code never talks to it directly: [`Window`] forwards
//! geometry and visibility requests down to a [`PlatformWindow`], and the
//! platform calls back up through [`WindowDelegate`] when the user or the OS
//! resizes, moves, shows, hides or closes the window.
//!
//! Calls in both directions are synchronous and happen on the UI thread. A
//! platform window may invoke delegate callbacks from inside one of its own
//! methods (for example `set_size` calling `constraint_size` and then
//! `on_size_changed`).
//!
//! [`Window`]: super::Window

use std::sync::{Arc, Weak};

use casement_core::{Point, Size};
use raw_window_handle::RawWindowHandle;

use super::window_config::WindowConfig;
use crate::error::PlatformError;

/// Creates platform windows.
pub trait PlatformWindowService {
    /// Create a native window for `config`.
    ///
    /// `delegate` receives every platform-originated callback for the new
    /// window. The service must hold it weakly.
    fn create_window(
        &self,
        config: &WindowConfig,
        delegate: Weak<dyn WindowDelegate>,
    ) -> Result<Arc<dyn PlatformWindow>, PlatformError>;
}

/// A live native window.
pub trait PlatformWindow: Send + Sync {
    /// Content size in logical pixels.
    fn size(&self) -> Size;
    /// Window position in logical screen coordinates.
    fn position(&self) -> Point;
    /// Request a new content size.
    fn set_size(&self, size: Size);
    /// Request a new position.
    fn set_position(&self, position: Point);
    /// Set the title shown by the window manager.
    fn set_title(&self, title: &str);
    /// Make the window visible.
    fn show(&self);
    /// Hide the window.
    fn hide(&self);
    /// Ask the window to close.
    ///
    /// The platform consults [`WindowDelegate::can_close`] and, when allowed,
    /// finishes with [`WindowDelegate::on_closed`].
    fn close(&self);
    /// Native handle a content view attaches to.
    fn platform_handle(&self) -> Option<RawWindowHandle>;
    /// Kind of native handle returned by [`platform_handle`](Self::platform_handle).
    fn platform_type(&self) -> PlatformType;
}

/// Callbacks a platform window delivers to its owner.
pub trait WindowDelegate: Send + Sync {
    /// Adjust a candidate size before the platform commits it.
    ///
    /// May be called repeatedly during an interactive resize and must not
    /// have side effects.
    fn constraint_size(&self, size: Size) -> Size;
    /// The content size changed.
    fn on_size_changed(&self, size: Size);
    /// The window moved.
    fn on_position_changed(&self, position: Point);
    /// The window became visible.
    fn on_show(&self);
    /// The window was hidden.
    fn on_hide(&self);
    /// Whether a close request may proceed. Must not have side effects.
    fn can_close(&self) -> bool;
    /// The platform has committed to closing the window.
    fn on_closed(&self);
}

/// Kind of native window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformType {
    /// Win32 `HWND`.
    Win32,
    /// AppKit `NSView`.
    AppKit,
    /// UIKit `UIView`.
    UiKit,
    /// Xlib window.
    Xlib,
    /// XCB window.
    Xcb,
    /// Wayland surface.
    Wayland,
    /// Web canvas or element.
    Web,
    /// Any other platform, or no native handle.
    Other,
}

impl PlatformType {
    /// Classify a raw window handle.
    pub fn from_raw(handle: &RawWindowHandle) -> Self {
        match handle {
            RawWindowHandle::Win32(_) | RawWindowHandle::WinRt(_) => Self::Win32,
            RawWindowHandle::AppKit(_) => Self::AppKit,
            RawWindowHandle::UiKit(_) => Self::UiKit,
            RawWindowHandle::Xlib(_) => Self::Xlib,
            RawWindowHandle::Xcb(_) => Self::Xcb,
            RawWindowHandle::Wayland(_) => Self::Wayland,
            RawWindowHandle::Web(_)
            | RawWindowHandle::WebCanvas(_)
            | RawWindowHandle::WebOffscreenCanvas(_) => Self::Web,
            _ => Self::Other,
        }
    }
}

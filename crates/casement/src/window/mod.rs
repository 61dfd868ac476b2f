//! Window lifecycle and delegation.
//!
//! This module provides [`Window`], which sits between three parties:
//!
//! - the **platform window service** that owns the native window and reports
//!   what the user and the OS do to it ([`PlatformWindowService`],
//!   [`PlatformWindow`], [`WindowDelegate`]),
//! - the application's **controller**, which can constrain sizes, veto
//!   closing and handle commands ([`WindowController`], [`CommandHandler`]),
//! - any number of **listeners** observing the window ([`WindowListener`]).
//!
//! A window also owns at most one [`ContentView`], resized whenever the
//! window is.
//!
//! # Notification Order
//!
//! For every platform event, listeners are notified first, then the
//! controller. A size change resizes the content view last.
//!
//! ```ignore
//! use casement::window::{Window, WindowConfig, WindowListener};
//!
//! struct Logger;
//!
//! impl WindowListener for Logger {
//!     fn on_size_changed(&self, _window: &Window, size: Size) {
//!         println!("resized to {}x{}", size.width, size.height);
//!     }
//! }
//!
//! let window = Window::create(&service, &WindowConfig::new("Main"), None)?;
//! let logger = Arc::new(Logger);
//! window.register_window_listener(&logger);
//! ```
//!
//! # Platforms
//!
//! [`WinitWindowService`] creates windows through winit. Other backends
//! implement [`PlatformWindowService`] directly.

mod autosave;
mod content_view;
mod controller;
mod platform;
mod window_config;
mod window_core;
mod window_type;
mod winit_platform;

pub use autosave::{
    restore_saved_frame, FrameAutosaver, FrameStore, SavedFrame, TomlFrameStore,
    FRAME_STORE_FILE_NAME,
};
pub use content_view::{ContentView, WindowListener};
pub use controller::{Command, CommandHandler, DefaultController, WindowController};
pub use platform::{PlatformType, PlatformWindow, PlatformWindowService, WindowDelegate};
pub use window_config::{ConfigFlags, WindowConfig, WindowStyle};
pub use window_core::{Window, WindowPhase};
pub use window_type::WindowType;
pub use winit_platform::{WindowRouter, WinitPlatformWindow, WinitWindowService};

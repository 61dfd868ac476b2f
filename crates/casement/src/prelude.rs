//! Common imports for Casement applications.
//!
//! ```
//! use casement::prelude::*;
//!
//! let config = WindowConfig::new("Main").with_size(640.0, 480.0);
//! assert_eq!(config.size(), Some(Size::new(640.0, 480.0)));
//! ```

pub use casement_core::{ListenerId, Point, Size};

pub use crate::error::{Error, PlatformError, Result};
pub use crate::window::{
    Command, CommandHandler, ContentView, PlatformWindow, PlatformWindowService, Window,
    WindowConfig, WindowController, WindowDelegate, WindowListener, WindowPhase, WindowType,
};

//! Casement: the window lifecycle and delegation layer.
//!
//! Casement owns the relationship between an application-supplied window
//! controller, a platform-native window, a set of listeners and an attached
//! content view. It decides *when* each of them is called and keeps the
//! window alive and consistent while they call back into it.
//!
//! # Modules
//!
//! - [`window`]: the [`Window`](window::Window) object, its collaborator
//!   traits, configuration, frame autosave and the winit backend
//! - [`error`]: error types
//! - [`prelude`]: common imports
//!
//! Geometry, listener lists and thread checks come from [`casement_core`].

pub mod error;
pub mod prelude;
pub mod window;

pub use casement_core;
pub use error::{Error, PlatformError, Result};

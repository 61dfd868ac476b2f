//! Core systems for Casement.
//!
//! This crate provides the foundations the window layer is built on:
//!
//! - **Geometry**: Logical [`Point`] and [`Size`] values exchanged with the
//!   platform window service
//! - **Listener Lists**: A non-owning multicast registry that tolerates
//!   removal from inside its own notification fan-out
//! - **Thread Affinity**: Debug checks that UI objects stay on the thread
//!   that created them
//! - **Logging**: Stable `tracing` target names for filtering
//!
//! # Listener Example
//!
//! ```
//! use std::sync::Arc;
//! use casement_core::ListenerList;
//!
//! trait Observer: Send + Sync {
//!     fn notify(&self, value: i32);
//! }
//!
//! struct Printer;
//!
//! impl Observer for Printer {
//!     fn notify(&self, value: i32) {
//!         println!("got {value}");
//!     }
//! }
//!
//! let list: ListenerList<dyn Observer> = ListenerList::new();
//! let printer: Arc<dyn Observer> = Arc::new(Printer);
//! let id = list.add(Arc::downgrade(&printer));
//!
//! list.for_each(|_, observer| observer.notify(7));
//! assert!(list.remove(id));
//! ```

mod geometry;
pub mod listener;
pub mod logging;
pub mod thread_check;

pub use geometry::{Point, Size};
pub use listener::{ListenerId, ListenerList};
pub use thread_check::ThreadAffinity;

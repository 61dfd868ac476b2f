//! Thread affinity verification.
//!
//! Window objects are driven from a single UI thread: the platform service and
//! the window layer share that thread and no internal locking is designed to
//! arbitrate between threads. [`ThreadAffinity`] records the creating thread
//! and lets an object assert that later calls arrive on the same one.
//!
//! ```
//! use casement_core::ThreadAffinity;
//!
//! struct Panel {
//!     affinity: ThreadAffinity,
//! }
//!
//! impl Panel {
//!     fn update(&self) {
//!         self.affinity.debug_assert_same_thread();
//!     }
//! }
//!
//! let panel = Panel { affinity: ThreadAffinity::current() };
//! panel.update();
//! ```

use std::thread::ThreadId;

/// Thread affinity tracker for objects bound to one thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a tracker bound to the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the bound thread.
    ///
    /// This always runs (debug and release builds).
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            self.panic_wrong_thread();
        }
    }

    /// Debug-only assertion that we are on the bound thread.
    ///
    /// This is a no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        panic!(
            "thread affinity violation: object bound to thread {:?} was accessed from \
             thread \"{current_name}\" ({:?}); window objects must only be used from \
             the UI thread that created them",
            self.thread_id,
            current.id(),
        );
    }
}

//! Logging facilities for Casement.
//!
//! Casement uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`], so a directive such as
//! `casement::window=debug,casement_core=warn` selects a single subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Listener registry target.
    pub const LISTENER: &str = "casement_core::listener";
    /// Window lifecycle target.
    pub const WINDOW: &str = "casement::window";
    /// Platform window service target.
    pub const PLATFORM: &str = "casement::platform";
    /// Frame persistence target.
    pub const AUTOSAVE: &str = "casement::autosave";
}

//! Window controllers and command handling.
//!
//! A [`WindowController`] customizes one window: it may constrain sizes, veto
//! closing, react to lifecycle events and, optionally, handle commands. Every
//! method has a default, so a controller implements only what it needs.
//!
//! Command handling is a separate capability. A controller exposes it by
//! returning itself from [`WindowController::command_handler`]:
//!
//! ```
//! use casement::window::{Command, CommandHandler, WindowController};
//!
//! struct Editor;
//!
//! impl WindowController for Editor {
//!     fn command_handler(&self) -> Option<&dyn CommandHandler> {
//!         Some(self)
//!     }
//! }
//!
//! impl CommandHandler for Editor {
//!     fn can_handle_command(&self, command: &Command) -> bool {
//!         command.group() == "Edit"
//!     }
//!
//!     fn handle_command(&self, command: &Command) -> bool {
//!         self.can_handle_command(command)
//!     }
//! }
//!
//! let editor = Editor;
//! let undo = Command::new("Edit", "Undo");
//! assert!(editor.command_handler().is_some_and(|h| h.can_handle_command(&undo)));
//! ```

use std::sync::Arc;

use casement_core::{Point, Size};

use super::window_core::Window;

/// A named command, identified by group and name (for example `Edit`/`Undo`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    group: String,
    name: String,
}

impl Command {
    /// Create a command.
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// The command group.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.group, self.name)
    }
}

/// Optional command-handling capability of a controller.
pub trait CommandHandler {
    /// Whether `command` can currently be executed.
    fn can_handle_command(&self, command: &Command) -> bool;
    /// Execute `command`. Returns `true` if it was handled.
    fn handle_command(&self, command: &Command) -> bool;
}

/// Application-supplied window behavior.
///
/// The defaults are the behavior of a window without a controller: sizes
/// pass through unchanged, closing is allowed, notifications are ignored and
/// no command handling is offered.
pub trait WindowController: Send + Sync {
    /// Adjust a size the platform is about to apply. Must not have side effects.
    fn constraint_size(&self, _window: &Window, size: Size) -> Size {
        size
    }

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

    /// Whether the window may close. Must not have side effects.
    fn can_close(&self, _window: &Window) -> bool {
        true
    }

    /// The command-handling capability, if this controller has one.
    fn command_handler(&self) -> Option<&dyn CommandHandler> {
        None
    }
}

/// The controller used when none was supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultController;

impl WindowController for DefaultController {}

static DEFAULT_CONTROLLER: DefaultController = DefaultController;

/// A window's controller, or the default behavior when there is none.
pub(crate) struct ControllerSlot {
    controller: Option<Arc<dyn WindowController>>,
}

impl ControllerSlot {
    pub(crate) fn new(controller: Option<Arc<dyn WindowController>>) -> Self {
        Self { controller }
    }

    /// The supplied controller, if any.
    pub(crate) fn get(&self) -> Option<&Arc<dyn WindowController>> {
        self.controller.as_ref()
    }

    /// The controller to delegate to, falling back to [`DefaultController`].
    pub(crate) fn effective(&self) -> &dyn WindowController {
        match &self.controller {
            Some(controller) => controller.as_ref(),
            None => &DEFAULT_CONTROLLER,
        }
    }
}

impl std::fmt::Debug for ControllerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerSlot")
            .field("present", &self.controller.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Handler;

    impl WindowController for Handler {
        fn command_handler(&self) -> Option<&dyn CommandHandler> {
            Some(self)
        }
    }

    impl CommandHandler for Handler {
        fn can_handle_command(&self, command: &Command) -> bool {
            command.name() == "Open"
        }

        fn handle_command(&self, command: &Command) -> bool {
            self.can_handle_command(command)
        }
    }

    #[test]
    fn test_command_accessors() {
        let command = Command::new("File", "Open");
        assert_eq!(command.group(), "File");
        assert_eq!(command.name(), "Open");
        assert_eq!(command.to_string(), "File/Open");
    }

    #[test]
    fn test_default_controller_has_no_command_capability() {
        assert!(DefaultController.command_handler().is_none());
    }

    #[test]
    fn test_empty_slot_falls_back_to_default() {
        let slot = ControllerSlot::new(None);
        assert!(slot.get().is_none());
        assert!(slot.effective().command_handler().is_none());
    }

    #[test]
    fn test_slot_exposes_capability() {
        let slot = ControllerSlot::new(Some(Arc::new(Handler)));
        assert!(slot.get().is_some());
        let handler = slot.effective().command_handler().unwrap();
        assert!(handler.can_handle_command(&Command::new("File", "Open")));
        assert!(!handler.handle_command(&Command::new("File", "Close")));
    }
}

//! Window type definitions.
//!
//! Different window types receive different treatment by the platform's
//! window manager and start from different default styles.

use winit::window::WindowLevel;

use super::window_config::WindowStyle;

/// The type of window, which affects its default style and stacking.
///
/// # Example
///
/// ```
/// use casement::window::{WindowStyle, WindowType};
///
/// assert!(WindowType::Normal.default_style().contains(WindowStyle::SIZABLE));
/// assert!(!WindowType::Popup.default_style().contains(WindowStyle::BORDER));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowType {
    /// A normal top-level document window.
    #[default]
    Normal,

    /// A dialog window: titled and closable, not resizable.
    Dialog,

    /// A tool window (palette, inspector) that floats above normal windows.
    Tool,

    /// A popup window (menu, dropdown, tooltip) without decorations.
    Popup,

    /// A splash screen: undecorated, centered, on top.
    Splash,
}

impl WindowType {
    /// Get the default style for this window type.
    pub fn default_style(&self) -> WindowStyle {
        match self {
            WindowType::Normal => WindowStyle::DEFAULT,
            WindowType::Dialog => WindowStyle::DIALOG,
            WindowType::Tool => WindowStyle::TOOL,
            WindowType::Popup => WindowStyle::TRANSPARENT,
            WindowType::Splash => WindowStyle::CENTERED,
        }
    }

    /// Check if this window type should stay on top by default.
    pub fn stays_on_top(&self) -> bool {
        matches!(self, WindowType::Tool | WindowType::Popup | WindowType::Splash)
    }

    /// The winit window level used for this type.
    pub fn window_level(&self) -> WindowLevel {
        if self.stays_on_top() {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        }
    }

    /// Get a human-readable name for this window type.
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Normal => "Normal",
            WindowType::Dialog => "Dialog",
            WindowType::Tool => "Tool",
            WindowType::Popup => "Popup",
            WindowType::Splash => "Splash",
        }
    }
}

impl std::fmt::Display for WindowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

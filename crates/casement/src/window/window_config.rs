//! Window configuration and builder.
//!
//! This module provides `WindowConfig`, a builder describing the window a
//! platform service should create, together with the [`WindowStyle`] and
//! [`ConfigFlags`] bit sets it carries.

use bitflags::bitflags;
use casement_core::{Point, Size};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::{Window as WinitWindow, WindowAttributes, WindowButtons};

use super::window_type::WindowType;

bitflags! {
    /// Visual and interaction style of a window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u16 {
        /// Title bar and border.
        const BORDER = 1 << 0;
        /// Close button.
        const CLOSABLE = 1 << 1;
        /// User resizable.
        const SIZABLE = 1 << 2;
        /// Transparent background.
        const TRANSPARENT = 1 << 3;
        /// Can be dragged by its background.
        const MOVABLE_BY_BACKGROUND = 1 << 4;
        /// Centered on screen when first shown.
        const CENTERED = 1 << 5;

        /// Style of a normal document window.
        const DEFAULT = Self::BORDER.bits() | Self::CLOSABLE.bits() | Self::SIZABLE.bits();
        /// Style of a dialog window.
        const DIALOG = Self::BORDER.bits() | Self::CLOSABLE.bits() | Self::CENTERED.bits();
        /// Style of a tool window.
        const TOOL = Self::BORDER.bits() | Self::CLOSABLE.bits();
    }
}

bitflags! {
    /// Behavioral flags of a window configuration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConfigFlags: u8 {
        /// Persist the window frame under the configured autosave name.
        const AUTO_SAVE_FRAME = 1 << 0;
    }
}

/// Configuration for creating a window.
///
/// # Example
///
/// ```
/// use casement::window::{WindowConfig, WindowType};
///
/// let config = WindowConfig::new("Inspector")
///     .with_type(WindowType::Tool)
///     .with_size(320.0, 480.0)
///     .with_auto_save_frame("inspector");
///
/// assert!(config.does_auto_save_frame());
/// assert_eq!(config.auto_save_frame_name(), Some("inspector"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Window title.
    title: String,
    /// Window type.
    window_type: WindowType,
    /// Explicit style (overrides the type default if set).
    style: Option<WindowStyle>,
    /// Behavioral flags.
    flags: ConfigFlags,
    /// Initial content size in logical pixels.
    size: Option<Size>,
    /// Minimum content size.
    min_size: Option<Size>,
    /// Maximum content size.
    max_size: Option<Size>,
    /// Initial window position.
    position: Option<Point>,
    /// Whether the window is visible on creation.
    visible: bool,
    /// Key under which the frame is persisted.
    auto_save_frame_name: Option<String>,
}

impl WindowConfig {
    /// Create a new window configuration with the given title.
    ///
    /// The window type defaults to `WindowType::Normal` and the window starts
    /// hidden until [`Window::show`](super::Window::show) is called.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window_type: WindowType::Normal,
            style: None,
            flags: ConfigFlags::empty(),
            size: None,
            min_size: None,
            max_size: None,
            position: None,
            visible: false,
            auto_save_frame_name: None,
        }
    }

    /// Set the window type.
    pub fn with_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    /// Set an explicit style, overriding the window type default.
    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the behavioral flags.
    pub fn with_flags(mut self, flags: ConfigFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the initial content size in logical pixels.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Set the minimum content size in logical pixels.
    pub fn with_min_size(mut self, width: f64, height: f64) -> Self {
        self.min_size = Some(Size::new(width, height));
        self
    }

    /// Set the maximum content size in logical pixels.
    pub fn with_max_size(mut self, width: f64, height: f64) -> Self {
        self.max_size = Some(Size::new(width, height));
        self
    }

    /// Set the initial window position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    /// Set whether the window is visible when created.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Persist the window frame under `name`.
    ///
    /// Sets [`ConfigFlags::AUTO_SAVE_FRAME`] and records the key.
    pub fn with_auto_save_frame(mut self, name: impl Into<String>) -> Self {
        self.flags |= ConfigFlags::AUTO_SAVE_FRAME;
        self.auto_save_frame_name = Some(name.into());
        self
    }

    /// Get the window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the window type.
    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Get the effective style.
    ///
    /// If an explicit style is set, returns it. Otherwise, returns the
    /// default style for the window type.
    pub fn effective_style(&self) -> WindowStyle {
        self.style
            .unwrap_or_else(|| self.window_type.default_style())
    }

    /// Get the behavioral flags.
    pub fn flags(&self) -> ConfigFlags {
        self.flags
    }

    /// Get the initial size, if set.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Get the minimum size, if set.
    pub fn min_size(&self) -> Option<Size> {
        self.min_size
    }

    /// Get the maximum size, if set.
    pub fn max_size(&self) -> Option<Size> {
        self.max_size
    }

    /// Get the initial position, if set.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Check if the window is visible on creation.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check if the configuration requests persisted geometry.
    ///
    /// True only when the flag is set and a non-empty name is present.
    pub fn does_auto_save_frame(&self) -> bool {
        self.flags.contains(ConfigFlags::AUTO_SAVE_FRAME)
            && self
                .auto_save_frame_name
                .as_deref()
                .is_some_and(|name| !name.is_empty())
    }

    /// Get the autosave key, if one was configured.
    pub fn auto_save_frame_name(&self) -> Option<&str> {
        self.auto_save_frame_name.as_deref()
    }

    /// Convert to winit `WindowAttributes`.
    pub fn to_window_attributes(&self) -> WindowAttributes {
        let style = self.effective_style();
        let mut attrs = WinitWindow::default_attributes()
            .with_title(&self.title)
            .with_visible(self.visible)
            .with_decorations(style.contains(WindowStyle::BORDER))
            .with_resizable(style.contains(WindowStyle::SIZABLE))
            .with_transparent(style.contains(WindowStyle::TRANSPARENT))
            .with_window_level(self.window_type.window_level());

        let mut buttons = WindowButtons::MINIMIZE;
        if style.contains(WindowStyle::CLOSABLE) {
            buttons |= WindowButtons::CLOSE;
        }
        if style.contains(WindowStyle::SIZABLE) {
            buttons |= WindowButtons::MAXIMIZE;
        }
        attrs = attrs.with_enabled_buttons(buttons);

        if let Some(size) = self.size {
            attrs = attrs.with_inner_size(LogicalSize::new(size.width, size.height));
        }
        if let Some(size) = self.min_size {
            attrs = attrs.with_min_inner_size(LogicalSize::new(size.width, size.height));
        }
        if let Some(size) = self.max_size {
            attrs = attrs.with_max_inner_size(LogicalSize::new(size.width, size.height));
        }
        if let Some(position) = self.position {
            attrs = attrs.with_position(LogicalPosition::new(position.x, position.y));
        }

        attrs
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("")
    }
}

//! Frame persistence keyed by a window's autosave name.
//!
//! A window created from a configuration with
//! [`with_auto_save_frame`](super::WindowConfig::with_auto_save_frame) records
//! an autosave name. This module stores and restores frames under that name:
//!
//! - [`FrameStore`]: where frames live
//! - [`TomlFrameStore`]: a TOML file, by default in the user's config directory
//! - [`FrameAutosaver`]: a window listener that tracks the frame and saves it
//!   when the window closes
//! - [`restore_saved_frame`]: apply a saved frame to a configuration before
//!   the window is created
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use casement::window::{restore_saved_frame, FrameAutosaver, TomlFrameStore, Window, WindowConfig};
//!
//! let store = Arc::new(TomlFrameStore::in_config_dir("my-app")?);
//! let config = restore_saved_frame(WindowConfig::new("Main").with_auto_save_frame("main"), store.as_ref());
//! let window = Window::create(&service, &config, None)?;
//!
//! // Keep the autosaver alive as long as the window.
//! let autosaver = FrameAutosaver::attach(&window, store);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use casement_core::logging::targets;
use casement_core::{ListenerId, Point, Size};
use directories::ProjectDirs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::content_view::WindowListener;
use super::window_config::WindowConfig;
use super::window_core::Window;
use crate::error::{Error, Result};

/// File name used by [`TomlFrameStore::in_config_dir`].
pub const FRAME_STORE_FILE_NAME: &str = "window-frames.toml";

/// A persisted window frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedFrame {
    pub position: Point,
    pub size: Size,
}

impl SavedFrame {
    /// Create a saved frame.
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }
}

/// Storage for window frames, keyed by autosave name.
pub trait FrameStore: Send + Sync {
    /// Load the frame saved under `name`.
    fn load(&self, name: &str) -> Option<SavedFrame>;

    /// Save `frame` under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame could not be persisted.
    fn save(&self, name: &str, frame: SavedFrame) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FrameFile {
    #[serde(default)]
    frames: BTreeMap<String, SavedFrame>,
}

/// A [`FrameStore`] backed by a TOML file.
///
/// The whole file is rewritten on every save.
#[derive(Debug)]
pub struct TomlFrameStore {
    path: PathBuf,
    frames: Mutex<BTreeMap<String, SavedFrame>>,
}

impl TomlFrameStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let frames = match std::fs::read_to_string(&path) {
            Ok(text) => {
                let file: FrameFile = toml::from_str(&text).map_err(|source| Error::FrameStoreParse {
                    path: path.clone(),
                    source,
                })?;
                file.frames
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(Error::frame_store_io(path, err)),
        };
        tracing::debug!(target: targets::AUTOSAVE, path = %path.display(), count = frames.len(), "frame store opened");
        Ok(Self {
            path,
            frames: Mutex::new(frames),
        })
    }

    /// Open the store in the configuration directory of `application`.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration directory can be determined or
    /// the existing file is unreadable.
    pub fn in_config_dir(application: &str) -> Result<Self> {
        let dirs = ProjectDirs::from("", "", application)
            .ok_or_else(|| Error::NoConfigDirectory(application.to_string()))?;
        Self::open(dirs.config_dir().join(FRAME_STORE_FILE_NAME))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names with a saved frame.
    pub fn names(&self) -> Vec<String> {
        self.frames.lock().keys().cloned().collect()
    }

    fn write(&self, frames: &BTreeMap<String, SavedFrame>) -> Result<()> {
        let file = FrameFile {
            frames: frames.clone(),
        };
        let text = toml::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| Error::frame_store_io(parent, err))?;
        }
        std::fs::write(&self.path, text).map_err(|err| Error::frame_store_io(&self.path, err))
    }
}

impl FrameStore for TomlFrameStore {
    fn load(&self, name: &str) -> Option<SavedFrame> {
        self.frames.lock().get(name).copied()
    }

    fn save(&self, name: &str, frame: SavedFrame) -> Result<()> {
        let mut frames = self.frames.lock();
        frames.insert(name.to_string(), frame);
        self.write(&frames)?;
        tracing::trace!(target: targets::AUTOSAVE, name, ?frame, "frame saved");
        Ok(())
    }
}

/// Apply the frame saved for `config`'s autosave name, if any.
///
/// Configurations that do not request persisted geometry are returned
/// unchanged.
pub fn restore_saved_frame(config: WindowConfig, store: &dyn FrameStore) -> WindowConfig {
    if !config.does_auto_save_frame() {
        return config;
    }
    let Some(frame) = config.auto_save_frame_name().and_then(|name| store.load(name)) else {
        return config;
    };
    tracing::debug!(target: targets::AUTOSAVE, name = config.auto_save_frame_name(), ?frame, "restoring frame");

    let mut config = config.with_position(frame.position.x, frame.position.y);
    if !frame.size.is_empty() {
        config = config.with_size(frame.size.width, frame.size.height);
    }
    config
}

/// Window listener that saves the window frame when the window closes.
pub struct FrameAutosaver {
    name: String,
    store: Arc<dyn FrameStore>,
    frame: Mutex<SavedFrame>,
    listener_id: Mutex<Option<ListenerId>>,
}

impl FrameAutosaver {
    /// Start tracking `window`'s frame.
    ///
    /// Returns `None` if the window has no autosave name or is already
    /// closing. The caller must keep the returned autosaver alive for as long
    /// as the window should be tracked; the window holds it only weakly.
    pub fn attach(window: &Window, store: Arc<dyn FrameStore>) -> Option<Arc<Self>> {
        let name = window.auto_save_frame_name()?.to_string();
        let frame = SavedFrame::new(
            window.position().unwrap_or_default(),
            window.size().unwrap_or_default(),
        );
        let autosaver = Arc::new(Self {
            name,
            store,
            frame: Mutex::new(frame),
            listener_id: Mutex::new(None),
        });
        let id = window.register_window_listener(&autosaver)?;
        *autosaver.listener_id.lock() = Some(id);
        Some(autosaver)
    }

    /// The autosave name frames are stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The most recently observed frame.
    pub fn frame(&self) -> SavedFrame {
        *self.frame.lock()
    }

    /// Stop tracking without saving.
    pub fn detach(&self, window: &Window) {
        if let Some(id) = self.listener_id.lock().take() {
            window.unregister_window_listener(id);
        }
    }
}

impl WindowListener for FrameAutosaver {
    fn on_size_changed(&self, _window: &Window, size: Size) {
        self.frame.lock().size = size;
    }

    fn on_position_changed(&self, _window: &Window, position: Point) {
        self.frame.lock().position = position;
    }

    fn on_closed(&self, _window: &Window) {
        self.listener_id.lock().take();
        let frame = self.frame();
        if let Err(err) = self.store.save(&self.name, frame) {
            tracing::warn!(target: targets::AUTOSAVE, name = %self.name, %err, "failed to save window frame");
        }
    }
}

impl std::fmt::Debug for FrameAutosaver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameAutosaver")
            .field("name", &self.name)
            .field("frame", &self.frame())
            .finish()
    }
}

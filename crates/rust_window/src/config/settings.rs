use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::backend::WindowHints;
use crate::input::InputCategory;
use crate::window::{WindowDescriptor, DEFAULT_CLASS_NAME};

/// Window and logging settings for an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Title bar text
    pub title: String,
    /// X11 class name
    pub class_name: String,
    /// Content-area width in screen coordinates
    pub width: i32,
    /// Content-area height in screen coordinates
    pub height: i32,
    /// Start full screen on the primary monitor
    pub full_screen: bool,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Input categories to arm after creation
    pub armed_inputs: Vec<InputCategory>,
    /// Creation hints
    pub hints: WindowHints,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Rust Window".to_string(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            width: 1280,
            height: 720,
            full_screen: false,
            log_level: "info".to_string(),
            armed_inputs: InputCategory::ALL.to_vec(),
            hints: WindowHints::default(),
        }
    }
}

impl Config for WindowSettings {}

impl WindowSettings {
    /// Title bar text
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Content-area size in screen coordinates
    #[must_use]
    pub const fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Start full screen on the primary monitor
    #[must_use]
    pub const fn with_full_screen(mut self, full_screen: bool) -> Self {
        self.full_screen = full_screen;
        self
    }

    /// Fallback log filter
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Input categories to arm after creation
    #[must_use]
    pub fn with_armed_inputs(mut self, categories: impl IntoIterator<Item = InputCategory>) -> Self {
        self.armed_inputs = categories.into_iter().collect();
        self
    }

    /// Creation hints
    #[must_use]
    pub fn with_hints(mut self, hints: WindowHints) -> Self {
        self.hints = hints;
        self
    }

    /// Check values that deserialize fine but cannot create a window
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 1 || self.height < 1 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be at least 1x1",
                self.width, self.height
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level is empty".to_string()));
        }
        Ok(())
    }

    /// Windowed creation parameters
    ///
    /// [`full_screen`](Self::full_screen) is not applied here; the monitor
    /// has to come from a live context.
    pub fn descriptor(&self) -> WindowDescriptor<'static> {
        WindowDescriptor::new(self.width, self.height, self.title.clone())
            .with_class_name(self.class_name.clone())
            .with_hints(self.hints.clone())
    }
}

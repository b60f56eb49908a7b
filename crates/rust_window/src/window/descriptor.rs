use crate::backend::WindowHints;

use super::{Monitor, Window};

/// Class name used when none is given
pub const DEFAULT_CLASS_NAME: &str = "rust_window";

/// Parameters for [`Window::create`]
///
/// Width and height are in screen coordinates, they are handed to the
/// backend unconverted.
#[derive(Debug, Clone)]
pub struct WindowDescriptor<'a> {
    /// Content-area width
    pub width: i32,
    /// Content-area height
    pub height: i32,
    /// Title bar text, also used as the X11 instance name
    pub title: String,
    /// X11 class name
    pub class_name: String,
    /// Monitor to create the window full-screen on
    pub monitor: Option<&'a Monitor>,
    /// Window whose context objects are shared
    pub share: Option<&'a Window>,
    /// Creation hints
    pub hints: WindowHints,
}

impl<'a> WindowDescriptor<'a> {
    /// Windowed descriptor with the default hints
    pub fn new(width: i32, height: i32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            monitor: None,
            share: None,
            hints: WindowHints::default(),
        }
    }

    /// X11 class name
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Create full screen on `monitor`
    #[must_use]
    pub fn with_full_screen(mut self, monitor: &'a Monitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Share the OpenGL context of `window`
    #[must_use]
    pub fn with_share(mut self, window: &'a Window) -> Self {
        self.share = Some(window);
        self
    }

    /// Hints applied before creation
    #[must_use]
    pub fn with_hints(mut self, hints: WindowHints) -> Self {
        self.hints = hints;
        self
    }
}

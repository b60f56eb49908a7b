//! Window creation hints
//!
//! Hints are plain configuration: a list of integer-valued and a list of
//! string-valued `(key, value)` pairs. [`WindowHints::apply`] hands each pair
//! to the backend right before a window is created.

use serde::{Deserialize, Serialize};

use super::WindowBackend;

/// Hint value meaning "no preference"
pub const DONT_CARE: i32 = -1;
/// Boolean hint value for enabled
pub const HINT_TRUE: i32 = 1;
/// Boolean hint value for disabled
pub const HINT_FALSE: i32 = 0;

/// Client API value requesting no context (Vulkan rendering)
pub const CLIENT_API_NONE: i32 = 0;
/// Client API value requesting an OpenGL context
pub const CLIENT_API_OPENGL: i32 = 0x0003_0001;
/// Client API value requesting an OpenGL ES context
pub const CLIENT_API_OPENGL_ES: i32 = 0x0003_0002;

/// Integer-valued creation hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntHint {
    /// User-resizable window
    Resizable,
    /// Initially visible
    Visible,
    /// Title bar and border
    Decorated,
    /// Focused on creation
    Focused,
    /// Minimize full-screen windows on focus loss
    AutoIconify,
    /// Always on top
    Floating,
    /// Initially maximized
    Maximized,
    /// Center the cursor on full-screen creation
    CenterCursor,
    /// Transparent framebuffer
    TransparentFramebuffer,
    /// Focus when shown
    FocusOnShow,
    /// Resize content area by the monitor content scale
    ScaleToMonitor,
    /// Red channel bits
    RedBits,
    /// Green channel bits
    GreenBits,
    /// Blue channel bits
    BlueBits,
    /// Alpha channel bits
    AlphaBits,
    /// Depth buffer bits
    DepthBits,
    /// Stencil buffer bits
    StencilBits,
    /// Auxiliary buffers
    AuxBuffers,
    /// Stereoscopic rendering
    Stereo,
    /// Multisample count
    Samples,
    /// sRGB-capable framebuffer
    SrgbCapable,
    /// Double buffering
    DoubleBuffer,
    /// Full-screen refresh rate
    RefreshRate,
    /// Client API, see [`CLIENT_API_NONE`]
    ClientApi,
    /// Client API major version
    ContextVersionMajor,
    /// Client API minor version
    ContextVersionMinor,
    /// Full-resolution framebuffer on Retina displays
    CocoaRetinaFramebuffer,
}

/// String-valued creation hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringHint {
    /// `WM_CLASS` class name on X11
    X11ClassName,
    /// `WM_CLASS` instance name on X11
    X11InstanceName,
    /// Frame autosave name on macOS
    CocoaFrameName,
}

/// Creation hint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowHints {
    /// Integer hints, applied in order
    #[serde(default)]
    pub int_hints: Vec<(IntHint, i32)>,
    /// String hints, applied in order
    #[serde(default)]
    pub string_hints: Vec<(StringHint, String)>,
}

impl WindowHints {
    /// Hints with no entries (backend defaults apply)
    pub const fn empty() -> Self {
        Self {
            int_hints: Vec::new(),
            string_hints: Vec::new(),
        }
    }

    /// Set an integer hint, replacing an earlier value for the same key
    #[must_use]
    pub fn with_int(mut self, hint: IntHint, value: i32) -> Self {
        if let Some(entry) = self.int_hints.iter_mut().find(|(key, _)| *key == hint) {
            entry.1 = value;
        } else {
            self.int_hints.push((hint, value));
        }
        self
    }

    /// Set a boolean integer hint
    #[must_use]
    pub fn with_flag(self, hint: IntHint, enabled: bool) -> Self {
        self.with_int(hint, if enabled { HINT_TRUE } else { HINT_FALSE })
    }

    /// Set a string hint, replacing an earlier value for the same key
    #[must_use]
    pub fn with_string(mut self, hint: StringHint, value: impl Into<String>) -> Self {
        let value = value.into();
        if let Some(entry) = self.string_hints.iter_mut().find(|(key, _)| *key == hint) {
            entry.1 = value;
        } else {
            self.string_hints.push((hint, value));
        }
        self
    }

    /// Current value of an integer hint
    pub fn int(&self, hint: IntHint) -> Option<i32> {
        self.int_hints
            .iter()
            .find_map(|(key, value)| (*key == hint).then_some(*value))
    }

    /// Current value of a string hint
    pub fn string(&self, hint: StringHint) -> Option<&str> {
        self.string_hints
            .iter()
            .find_map(|(key, value)| (*key == hint).then_some(value.as_str()))
    }

    /// Hand every hint to the backend
    pub fn apply(&self, backend: &mut dyn WindowBackend) {
        for (hint, value) in &self.int_hints {
            backend.set_int_hint(*hint, *value);
        }
        for (hint, value) in &self.string_hints {
            backend.set_string_hint(*hint, value);
        }
        log::trace!(
            "Applied {} integer and {} string window hints",
            self.int_hints.len(),
            self.string_hints.len()
        );
    }
}

impl Default for WindowHints {
    /// Standard hint set: decorated, resizable, focused window with an 8-bit
    /// RGBA, 24-bit depth, 8-bit stencil double-buffered framebuffer and no
    /// client API context (the window is rendered to with Vulkan).
    fn default() -> Self {
        let hints = Self::empty()
            .with_flag(IntHint::Resizable, true)
            .with_flag(IntHint::Visible, true)
            .with_flag(IntHint::Decorated, true)
            .with_flag(IntHint::Focused, true)
            .with_flag(IntHint::AutoIconify, false)
            .with_flag(IntHint::Floating, false)
            .with_flag(IntHint::Maximized, false)
            .with_flag(IntHint::CenterCursor, false)
            .with_flag(IntHint::TransparentFramebuffer, false)
            .with_flag(IntHint::FocusOnShow, true)
            .with_flag(IntHint::ScaleToMonitor, false)
            .with_int(IntHint::RedBits, 8)
            .with_int(IntHint::GreenBits, 8)
            .with_int(IntHint::BlueBits, 8)
            .with_int(IntHint::AlphaBits, 8)
            .with_int(IntHint::DepthBits, 24)
            .with_int(IntHint::StencilBits, 8)
            .with_int(IntHint::AuxBuffers, DONT_CARE)
            .with_flag(IntHint::Stereo, false)
            .with_int(IntHint::Samples, DONT_CARE)
            .with_flag(IntHint::SrgbCapable, false)
            .with_flag(IntHint::DoubleBuffer, true)
            .with_int(IntHint::RefreshRate, DONT_CARE)
            .with_int(IntHint::ClientApi, CLIENT_API_NONE);

        if cfg!(target_os = "macos") {
            hints.with_flag(IntHint::CocoaRetinaFramebuffer, true)
        } else {
            hints
        }
    }
}

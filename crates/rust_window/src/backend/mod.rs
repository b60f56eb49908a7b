//! Native windowing backends
//!
//! This module defines the contract between [`Window`](crate::Window) and the
//! native windowing system. The backend owns the process-wide state (glfw
//! initialization, callback registration, monitor list) and every native
//! window; windows refer to their native counterpart through a
//! [`NativeHandle`].
//!
//! # Unit System
//!
//! Every position and size crossing this trait is in logical screen
//! coordinates. Conversion from the physical pixels the public window API
//! speaks happens before the backend is called.
//!
//! # Backends
//!
//! - **`HeadlessBackend`**: In-memory implementation for tests and CI
//! - **`GlfwBackend`**: Native glfw implementation (feature `glfw`)

pub mod headless;
pub mod hints;

#[cfg(feature = "glfw")]
pub mod glfw_backend;

use ash::vk;
use serde::{Deserialize, Serialize};

use crate::foundation::geometry::{Area, Coordinate};
use crate::input::{InputCategory, InputEventRecord};

pub use headless::{HeadlessBackend, HeadlessMonitor, HeadlessWindow};
pub use hints::{IntHint, StringHint, WindowHints, DONT_CARE, HINT_FALSE, HINT_TRUE};

#[cfg(feature = "glfw")]
pub use glfw_backend::GlfwBackend;

slotmap::new_key_type! {
    /// Opaque identifier of a native window owned by a backend
    pub struct NativeHandle;
}

/// Identifier of a connected monitor (index into the backend's monitor list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorHandle(pub usize);

/// A monitor video mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoMode {
    /// Horizontal resolution in screen coordinates
    pub width: u32,
    /// Vertical resolution in screen coordinates
    pub height: u32,
    /// Refresh rate in Hz
    pub refresh_rate: u32,
}

/// Decoded RGBA8 icon image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

/// Boolean window properties that can be queried (and some of them set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAttribute {
    /// Has a title bar and border
    Decorated,
    /// Can be resized by the user
    Resizable,
    /// Always on top of other windows
    Floating,
    /// Minimizes when a full-screen window loses focus
    AutoIconify,
    /// Takes input focus when shown
    FocusOnShow,
    /// Cursor is over the content area
    Hovered,
    /// Window is shown
    Visible,
    /// Window has input focus
    Focused,
    /// Window is minimized
    Iconified,
    /// Window is maximized
    Maximized,
    /// Framebuffer is transparent
    TransparentFramebuffer,
}

impl WindowAttribute {
    /// Whether the attribute can be changed after creation
    pub const fn is_settable(self) -> bool {
        matches!(
            self,
            Self::Decorated | Self::Resizable | Self::Floating | Self::AutoIconify | Self::FocusOnShow
        )
    }
}

/// Parameters of a native window creation call
#[derive(Debug, Clone, Copy)]
pub struct NativeWindowDesc<'a> {
    /// Width in screen coordinates
    pub width: i32,
    /// Height in screen coordinates
    pub height: i32,
    /// Title bar text
    pub title: &'a str,
    /// Monitor to create the window full-screen on
    pub monitor: Option<MonitorHandle>,
    /// Window whose context objects are shared with the new window
    pub share: Option<NativeHandle>,
}

/// Contract every native windowing backend implements
///
/// All geometry is in logical screen coordinates. Methods taking a
/// [`NativeHandle`] may assume the handle was returned by
/// [`create_window`](Self::create_window) and not yet destroyed; unknown
/// handles are ignored and queries return neutral defaults.
///
/// # Thread Safety
/// Backends are driven from the main thread only, glfw requires it.
pub trait WindowBackend {
    /// Set an integer window hint for the next window creation
    fn set_int_hint(&mut self, hint: IntHint, value: i32);

    /// Set a string window hint for the next window creation
    fn set_string_hint(&mut self, hint: StringHint, value: &str);

    /// Create a native window using the current hints
    fn create_window(&mut self, desc: &NativeWindowDesc<'_>) -> Option<NativeHandle>;

    /// Destroy a native window
    fn destroy_window(&mut self, handle: NativeHandle);

    /// Start delivering one input category for a window
    fn register_input(&mut self, handle: NativeHandle, category: InputCategory);

    /// Process pending native events, delivering input for registered categories
    ///
    /// Events for one window and category reach `sink` in the order they
    /// occurred.
    fn poll_events(&mut self, sink: &mut dyn FnMut(NativeHandle, InputEventRecord));

    /// Window position in screen coordinates
    fn window_position(&self, handle: NativeHandle) -> Coordinate<i32>;

    /// Move a window
    fn set_window_position(&mut self, handle: NativeHandle, position: Coordinate<i32>);

    /// Content-area size in screen coordinates
    fn window_size(&self, handle: NativeHandle) -> Area<i32>;

    /// Resize the content area
    fn set_window_size(&mut self, handle: NativeHandle, size: Area<i32>);

    /// Framebuffer size in pixels
    fn framebuffer_size(&self, handle: NativeHandle) -> Area<i32>;

    /// Ratio between physical pixels and screen coordinates on each axis
    fn content_scale(&self, handle: NativeHandle) -> Coordinate<f32>;

    /// Size limits, `None` meaning "don't care"
    fn set_size_limits(
        &mut self,
        handle: NativeHandle,
        minimum: Option<Area<i32>>,
        maximum: Option<Area<i32>>,
    );

    /// Lock the content-area aspect ratio
    fn set_aspect_ratio(&mut self, handle: NativeHandle, numerator: u32, denominator: u32);

    /// Place a window on a monitor (full-screen) or back on the desktop (`None`)
    fn set_window_monitor(
        &mut self,
        handle: NativeHandle,
        monitor: Option<MonitorHandle>,
        position: Coordinate<i32>,
        size: Area<i32>,
        refresh_rate: Option<u32>,
    );

    /// Query a boolean window property
    fn window_attribute(&self, handle: NativeHandle, attribute: WindowAttribute) -> bool;

    /// Change a boolean window property
    fn set_window_attribute(&mut self, handle: NativeHandle, attribute: WindowAttribute, value: bool);

    /// The primary monitor, if any monitor is connected
    fn primary_monitor(&mut self) -> Option<MonitorHandle>;

    /// Every connected monitor
    fn monitors(&mut self) -> Vec<MonitorHandle>;

    /// Current video mode of a monitor
    fn video_mode(&mut self, monitor: MonitorHandle) -> Option<VideoMode>;

    /// Minimize
    fn iconify(&mut self, handle: NativeHandle);

    /// Maximize
    fn maximize(&mut self, handle: NativeHandle);

    /// Undo minimize or maximize
    fn restore(&mut self, handle: NativeHandle);

    /// Make visible
    fn show(&mut self, handle: NativeHandle);

    /// Make invisible
    fn hide(&mut self, handle: NativeHandle);

    /// Bring to front and take input focus
    fn focus(&mut self, handle: NativeHandle);

    /// Ask the user's attention without stealing focus
    fn request_attention(&mut self, handle: NativeHandle);

    /// Whole-window opacity in `[0, 1]`
    fn set_opacity(&mut self, handle: NativeHandle, opacity: f32);

    /// Title bar text
    fn set_title(&mut self, handle: NativeHandle, title: &str);

    /// Candidate icon images, the system picks the closest size
    fn set_icon(&mut self, handle: NativeHandle, images: &[IconImage]);

    /// Whether the user asked to close the window
    fn should_close(&self, handle: NativeHandle) -> bool;

    /// Set or clear the close flag
    fn set_should_close(&mut self, handle: NativeHandle, value: bool);

    /// Swap front and back buffers of a client-API context
    fn swap_buffers(&mut self, handle: NativeHandle);

    /// Create a Vulkan surface for a window
    fn create_surface(
        &mut self,
        handle: NativeHandle,
        instance: vk::Instance,
    ) -> Result<vk::SurfaceKHR, vk::Result>;

    /// Get access to the concrete type for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

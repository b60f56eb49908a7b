//! # Rust Window
//!
//! Desktop window layer sitting on top of a native windowing backend (glfw)
//! and a Vulkan surface-creation call.
//!
//! ## Features
//!
//! - **Buffered Input**: Backend callbacks are recorded into per-category
//!   buffers that the application drains once per frame
//! - **Display Modes**: Windowed, full-screen, minimized and maximized
//!   transitions with full-screen geometry restoration
//! - **DPI Aware**: Every public geometry call speaks physical pixels, the
//!   backend always receives logical screen coordinates
//! - **Fail Soft**: Precondition violations go through an error hook and
//!   never abort the process
//! - **Headless Backend**: Run and test everything without a display
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_window::prelude::*;
//!
//! let context = WindowContext::new(HeadlessBackend::new());
//! let mut window = context
//!     .create_window(&WindowDescriptor::new(800, 600, "Hello"))
//!     .expect("window creation");
//! window.arm(InputCategory::Key).expect("window is created");
//!
//! while !window.should_close() {
//!     window.clear_input_buffers();
//!     context.poll_events();
//!     for key in window.key_events() {
//!         println!("key {} action {}", key.key, key.action);
//!     }
//!     # break;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod backend;
pub mod window;

pub use window::{
    DisplayMode, Monitor, Window, WindowContext, WindowDescriptor, WindowError, WindowGeometry,
    WindowResult,
};

/// Common imports for window users
pub mod prelude {
    pub use crate::{
        backend::{HeadlessBackend, IntHint, StringHint, WindowAttribute, WindowBackend, WindowHints},
        config::{Config, ConfigError, WindowSettings},
        foundation::geometry::{Area, Coordinate},
        input::{
            CharacterEvent, CursorEnterEvent, CursorPositionEvent, FileDropEvent, InputCategory,
            InputEvent, InputEventRecord, KeyEvent, Modifiers, MouseButtonEvent, ScrollEvent,
        },
        DisplayMode, Monitor, Window, WindowContext, WindowDescriptor, WindowError, WindowResult,
    };

    #[cfg(feature = "glfw")]
    pub use crate::backend::GlfwBackend;
}

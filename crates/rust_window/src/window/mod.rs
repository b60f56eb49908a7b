//! Windows and the context they share
//!
//! # Units
//!
//! Public geometry is in physical pixels unless the method name says
//! `screen_coordinates`. Creation dimensions are the exception: they are
//! screen coordinates, because the content scale is only known once the
//! window exists.

mod context;
mod descriptor;
mod display_mode;
mod dpi;
mod error;
mod handle;
mod icon;
mod input;
mod monitor;

#[cfg(test)]
mod tests;

pub use context::WindowContext;
pub use descriptor::{WindowDescriptor, DEFAULT_CLASS_NAME};
pub use display_mode::{DisplayMode, WindowGeometry};
pub use dpi::{pixel_to_screen, screen_to_pixel};
pub use error::{WindowError, WindowResult};
pub use handle::Window;
pub use icon::load_icon;
pub use monitor::Monitor;

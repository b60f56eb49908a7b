//! Display-mode transitions
//!
//! ```text
//!              create                 full_screen
//! NotCreated ---------> Windowed <----------------> FullScreen
//!                        ^    ^   exit_full_screen      |
//!                restore |    | restore                 | minimize
//!                        v    v                         v
//!                  Maximized  Minimized <---------------+
//! ```
//!
//! Entering full screen snapshots the windowed geometry in screen
//! coordinates; leaving it restores the snapshot. A window minimized while on
//! a monitor is still attached to it, so restoring it detaches it as well.

use serde::{Deserialize, Serialize};

use crate::backend::NativeHandle;
use crate::foundation::geometry::{Area, Coordinate};

use super::{Monitor, Window, WindowError, WindowResult};

/// Display state of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// No native window exists
    #[default]
    NotCreated,
    /// Normal desktop window
    Windowed,
    /// Exclusive full screen on a monitor
    FullScreen,
    /// Iconified
    Minimized,
    /// Maximized on the desktop
    Maximized,
}

/// Window position and size in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowGeometry {
    /// Top-left corner of the content area
    pub position: Coordinate<i32>,
    /// Content-area size
    pub size: Area<i32>,
}

impl Window {
    /// Move the window full screen onto `monitor`, using its current video mode
    ///
    /// Does nothing when already full screen.
    pub fn full_screen(&mut self, monitor: &Monitor) -> WindowResult<()> {
        let handle = self.assert_created()?;
        let Some(monitor) = monitor.handle() else {
            return Err(self.report(WindowError::ParentNotCreated));
        };
        if self.mode == DisplayMode::FullScreen {
            return Ok(());
        }

        let video_mode = self.context.backend_mut().video_mode(monitor);
        let Some(video_mode) = video_mode else {
            return Err(self.report(WindowError::ParentNotCreated));
        };
        let (Ok(width), Ok(height)) = (i32::try_from(video_mode.width), i32::try_from(video_mode.height)) else {
            return Err(self.report(WindowError::ParentNotCreated));
        };

        // A minimized full-screen window keeps the geometry it had before
        if self.attached_monitor.is_none() {
            self.geometry = self.logical_geometry(handle);
        }
        self.context.backend_mut().set_window_monitor(
            handle,
            Some(monitor),
            Coordinate::new(0, 0),
            Area::new(width, height),
            Some(video_mode.refresh_rate),
        );
        self.mode = DisplayMode::FullScreen;
        self.attached_monitor = Some(monitor);

        log::info!(
            "Window '{}' full screen at {}x{} @ {} Hz",
            self.title(),
            width,
            height,
            video_mode.refresh_rate
        );
        Ok(())
    }

    /// Leave full screen, restoring the geometry saved when entering it
    ///
    /// Does nothing unless full screen.
    pub fn exit_full_screen(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        if self.mode != DisplayMode::FullScreen {
            return Ok(());
        }

        let geometry = self.geometry;
        self.detach_monitor(handle, geometry.position, geometry.size);
        self.mode = DisplayMode::Windowed;
        Ok(())
    }

    /// Leave full screen to an explicit geometry in physical pixels
    ///
    /// Does nothing unless full screen.
    pub fn exit_full_screen_to(&mut self, position: Coordinate<i32>, size: Area<i32>) -> WindowResult<()> {
        let handle = self.assert_created()?;
        if self.mode != DisplayMode::FullScreen {
            return Ok(());
        }

        let position = self.to_screen(handle, position);
        let size = self.area_to_screen(handle, size);
        self.detach_monitor(handle, position, size);
        self.mode = DisplayMode::Windowed;
        Ok(())
    }

    /// Iconify the window
    pub fn minimize(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().iconify(handle);
        self.mode = DisplayMode::Minimized;
        Ok(())
    }

    /// Maximize the window
    ///
    /// Does nothing while full screen.
    pub fn maximize(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        if self.mode == DisplayMode::FullScreen {
            return Ok(());
        }

        if self.attached_monitor.is_some() {
            let geometry = self.geometry;
            self.detach_monitor(handle, geometry.position, geometry.size);
        }
        self.context.backend_mut().maximize(handle);
        self.mode = DisplayMode::Maximized;
        Ok(())
    }

    /// Return to a normal desktop window
    ///
    /// From full screen this also runs [`exit_full_screen`](Self::exit_full_screen).
    pub fn restore(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().restore(handle);
        if self.mode == DisplayMode::FullScreen {
            return self.exit_full_screen();
        }

        if self.attached_monitor.is_some() {
            let geometry = self.geometry;
            self.detach_monitor(handle, geometry.position, geometry.size);
        }
        self.mode = DisplayMode::Windowed;
        Ok(())
    }

    pub(super) fn logical_geometry(&self, handle: NativeHandle) -> WindowGeometry {
        let backend = self.context.backend();
        WindowGeometry {
            position: backend.window_position(handle),
            size: backend.window_size(handle),
        }
    }

    fn detach_monitor(&mut self, handle: NativeHandle, position: Coordinate<i32>, size: Area<i32>) {
        self.context
            .backend_mut()
            .set_window_monitor(handle, None, position, size, None);
        self.attached_monitor = None;
        log::debug!("Window '{}' windowed at {:?} {:?}", self.title(), position, size);
    }
}

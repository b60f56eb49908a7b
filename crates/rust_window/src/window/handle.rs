//! Window lifecycle and native property access
//!
//! A [`Window`] starts out not created. [`Window::create`] asks the backend
//! for a native window; from then on the window owns that native handle until
//! [`Window::destroy`] or drop releases it. Every operation except creation
//! requires a created window. Violations go through the context's error
//! callback and either return the error or, for queries, a sentinel value.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ash::vk;

use crate::backend::{MonitorHandle, NativeHandle, NativeWindowDesc, StringHint, WindowAttribute};
use crate::input::InputBuffers;

use super::{DisplayMode, WindowContext, WindowDescriptor, WindowError, WindowGeometry, WindowResult};

/// A desktop window
///
/// Owns its native handle, display mode, full-screen restore geometry,
/// graphics surface and input buffers. Not `Send`.
pub struct Window {
    pub(super) context: WindowContext,
    pub(super) handle: Option<NativeHandle>,
    pub(super) mode: DisplayMode,
    pub(super) attached_monitor: Option<MonitorHandle>,
    pub(super) geometry: WindowGeometry,
    pub(super) surface: Option<vk::SurfaceKHR>,
    pub(super) inputs: Rc<RefCell<InputBuffers>>,
    title: String,
}

impl Window {
    /// A window that is not created yet
    pub fn new(context: &WindowContext) -> Self {
        Self {
            context: context.clone(),
            handle: None,
            mode: DisplayMode::NotCreated,
            attached_monitor: None,
            geometry: WindowGeometry::default(),
            surface: None,
            inputs: Rc::new(RefCell::new(InputBuffers::new())),
            title: String::new(),
        }
    }

    /// Create the native window
    ///
    /// The window becomes [`DisplayMode::FullScreen`] when the descriptor
    /// names a monitor, [`DisplayMode::Windowed`] otherwise. Every input
    /// category starts disarmed.
    pub fn create(&mut self, descriptor: &WindowDescriptor<'_>) -> WindowResult<()> {
        let monitor = match descriptor.monitor {
            Some(monitor) => Some(monitor.handle().ok_or_else(|| self.report(WindowError::ParentNotCreated))?),
            None => None,
        };
        let share = match descriptor.share {
            Some(window) => Some(window.handle.ok_or_else(|| self.report(WindowError::ParentNotCreated))?),
            None => None,
        };
        if self.handle.is_some() {
            return Err(self.report(WindowError::AlreadyCreated));
        }
        if descriptor.width < 1 || descriptor.height < 1 {
            return Err(self.report(WindowError::InvalidDimensions));
        }

        let created = {
            let mut backend = self.context.backend_mut();
            descriptor.hints.apply(&mut *backend);
            backend.set_string_hint(StringHint::X11ClassName, &descriptor.class_name);
            backend.set_string_hint(StringHint::X11InstanceName, &descriptor.title);
            backend.create_window(&NativeWindowDesc {
                width: descriptor.width,
                height: descriptor.height,
                title: &descriptor.title,
                monitor,
                share,
            })
        };
        let handle = created.ok_or_else(|| self.report(WindowError::CreationFailed))?;

        self.handle = Some(handle);
        self.mode = if monitor.is_some() {
            DisplayMode::FullScreen
        } else {
            DisplayMode::Windowed
        };
        self.attached_monitor = monitor;
        self.title.clone_from(&descriptor.title);
        self.inputs.borrow_mut().disarm_all();
        self.context.register(handle, &self.inputs);
        self.geometry = self.logical_geometry(handle);

        log::info!(
            "Created window '{}' ({}x{}, {:?})",
            self.title,
            descriptor.width,
            descriptor.height,
            self.mode
        );
        Ok(())
    }

    /// Release the native window and its surface
    ///
    /// Safe to call any number of times. The surface handle is forgotten, not
    /// destroyed: it belongs to the Vulkan instance that created it.
    pub fn destroy(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.context.unregister(handle);
        if let Some(surface) = self.surface.take() {
            log::debug!("Releasing surface {:?} of window '{}'", surface, self.title);
        }
        self.context.backend_mut().destroy_window(handle);
        self.inputs.borrow_mut().disarm_all();
        self.mode = DisplayMode::NotCreated;
        self.attached_monitor = None;

        log::info!("Destroyed window '{}'", self.title);
    }

    /// Whether the native window exists
    pub const fn is_created(&self) -> bool {
        self.handle.is_some()
    }

    /// Native handle, `None` when not created
    pub const fn native_handle(&self) -> Option<NativeHandle> {
        self.handle
    }

    /// The context the window was created from
    pub const fn context(&self) -> &WindowContext {
        &self.context
    }

    /// Current display mode
    pub const fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Geometry restored when leaving full screen, in screen coordinates
    pub const fn saved_geometry(&self) -> WindowGeometry {
        self.geometry
    }

    /// Last title set
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the title bar text
    pub fn set_title(&mut self, title: impl Into<String>) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.title = title.into();
        self.context.backend_mut().set_title(handle, &self.title);
        Ok(())
    }

    /// Query a boolean property, `false` when not created
    pub fn attribute(&self, attribute: WindowAttribute) -> bool {
        self.assert_created()
            .is_ok_and(|handle| self.context.backend().window_attribute(handle, attribute))
    }

    /// Change a boolean property
    ///
    /// Read-only attributes are ignored by the backend with a warning.
    pub fn set_attribute(&mut self, attribute: WindowAttribute, value: bool) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context
            .backend_mut()
            .set_window_attribute(handle, attribute, value);
        Ok(())
    }

    /// Whether the window has borders and a title bar
    pub fn is_decorated(&self) -> bool {
        self.attribute(WindowAttribute::Decorated)
    }

    /// Whether the user can resize the window
    pub fn is_resizable(&self) -> bool {
        self.attribute(WindowAttribute::Resizable)
    }

    /// Whether the window stays above other windows
    pub fn is_floating(&self) -> bool {
        self.attribute(WindowAttribute::Floating)
    }

    /// Whether the window has input focus
    pub fn is_focused(&self) -> bool {
        self.attribute(WindowAttribute::Focused)
    }

    /// Whether the cursor is over the content area
    pub fn is_hovered(&self) -> bool {
        self.attribute(WindowAttribute::Hovered)
    }

    /// Whether the window is shown
    pub fn is_visible(&self) -> bool {
        self.attribute(WindowAttribute::Visible)
    }

    /// Add or remove borders and the title bar
    pub fn set_decorated(&mut self, decorated: bool) -> WindowResult<()> {
        self.set_attribute(WindowAttribute::Decorated, decorated)
    }

    /// Allow or forbid user resizing
    pub fn set_resizable(&mut self, resizable: bool) -> WindowResult<()> {
        self.set_attribute(WindowAttribute::Resizable, resizable)
    }

    /// Keep the window above other windows
    pub fn set_floating(&mut self, floating: bool) -> WindowResult<()> {
        self.set_attribute(WindowAttribute::Floating, floating)
    }

    /// Make the window visible
    pub fn show(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().show(handle);
        Ok(())
    }

    /// Hide the window
    pub fn hide(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().hide(handle);
        Ok(())
    }

    /// Bring to front and take input focus
    pub fn focus(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().focus(handle);
        Ok(())
    }

    /// Flash the task bar entry or similar, without taking focus
    pub fn request_attention(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().request_attention(handle);
        Ok(())
    }

    /// Whole-window opacity, clamped to `[0, 1]`
    pub fn set_opacity(&mut self, opacity: f32) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context
            .backend_mut()
            .set_opacity(handle, opacity.clamp(0.0, 1.0));
        Ok(())
    }

    /// Lock the content-area aspect ratio
    pub fn set_aspect_ratio(&mut self, numerator: u32, denominator: u32) -> WindowResult<()> {
        let handle = self.assert_created()?;
        if numerator == 0 || denominator == 0 {
            return Err(self.report(WindowError::InvalidDimensions));
        }
        self.context
            .backend_mut()
            .set_aspect_ratio(handle, numerator, denominator);
        Ok(())
    }

    /// Whether the user asked to close the window, `false` when not created
    pub fn should_close(&self) -> bool {
        self.assert_created()
            .is_ok_and(|handle| self.context.backend().should_close(handle))
    }

    /// Flag the window for closing
    pub fn close(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().set_should_close(handle, true);
        Ok(())
    }

    /// Clear a pending close request
    pub fn cancel_close(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().set_should_close(handle, false);
        Ok(())
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) -> WindowResult<()> {
        let handle = self.assert_created()?;
        self.context.backend_mut().swap_buffers(handle);
        Ok(())
    }

    /// Create the Vulkan surface of this window
    ///
    /// A window has at most one surface. The caller destroys it with the
    /// surface extension of `instance` before destroying the instance.
    pub fn create_surface(&mut self, instance: vk::Instance) -> WindowResult<vk::SurfaceKHR> {
        let handle = self.assert_created()?;
        if self.surface.is_some() {
            return Err(self.report(WindowError::SurfaceAlreadyCreated));
        }

        let result = self.context.backend_mut().create_surface(handle, instance);
        let surface = result
            .map_err(|error| self.report(WindowError::SurfaceCreationFailed(format!("{error:?}"))))?;

        log::debug!("Created surface {:?} for window '{}'", surface, self.title);
        self.surface = Some(surface);
        Ok(surface)
    }

    /// The surface created by [`create_surface`](Self::create_surface)
    pub const fn surface(&self) -> Option<vk::SurfaceKHR> {
        self.surface
    }

    pub(super) fn report(&self, error: WindowError) -> WindowError {
        self.context.report(error)
    }

    pub(super) fn assert_created(&self) -> WindowResult<NativeHandle> {
        self.handle.ok_or_else(|| self.report(WindowError::NotCreated))
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title)
            .field("handle", &self.handle)
            .field("mode", &self.mode)
            .field("geometry", &self.geometry)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

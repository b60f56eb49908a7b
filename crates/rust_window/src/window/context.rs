//! Shared windowing context
//!
//! The context owns everything that is process-wide rather than per window:
//! the backend, the registry that maps native handles back to the input
//! buffers of the window that owns them, and the error callback. Windows keep
//! a clone of the context, so it outlives every window created from it.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::backend::{NativeHandle, VideoMode, WindowBackend};
use crate::input::InputBuffers;

use super::{Monitor, Window, WindowDescriptor, WindowError, WindowResult};

type ErrorCallback = Box<dyn FnMut(u32, &str)>;

struct ContextShared {
    backend: RefCell<Box<dyn WindowBackend>>,
    registry: RefCell<HashMap<NativeHandle, Weak<RefCell<InputBuffers>>>>,
    error_callback: RefCell<ErrorCallback>,
}

/// Handle to a windowing backend shared by every window created from it
///
/// Cloning is cheap and yields another handle to the same backend.
/// Not `Send`: the backend must be driven from the thread that created it.
#[derive(Clone)]
pub struct WindowContext {
    shared: Rc<ContextShared>,
}

fn log_error(code: u32, message: &str) {
    log::error!("Window error 0x{:08X}: {}", code, message);
}

impl WindowContext {
    /// Wrap a backend
    pub fn new(backend: impl WindowBackend + 'static) -> Self {
        Self {
            shared: Rc::new(ContextShared {
                backend: RefCell::new(Box::new(backend)),
                registry: RefCell::new(HashMap::new()),
                error_callback: RefCell::new(Box::new(log_error)),
            }),
        }
    }

    /// Initialize glfw and wrap it
    #[cfg(feature = "glfw")]
    pub fn glfw() -> WindowResult<Self> {
        crate::backend::GlfwBackend::init().map(Self::new)
    }

    /// Replace the error callback
    ///
    /// The callback receives the stable error code and the error message of
    /// every precondition violation. The default callback logs at error level.
    pub fn set_error_callback(&self, callback: impl FnMut(u32, &str) + 'static) {
        *self.shared.error_callback.borrow_mut() = Box::new(callback);
    }

    /// Hand an error to the error callback and give it back to the caller
    pub fn report(&self, error: WindowError) -> WindowError {
        let message = error.to_string();
        match self.shared.error_callback.try_borrow_mut() {
            Ok(mut callback) => callback(error.code(), &message),
            // Raised from inside the callback itself
            Err(_) => log_error(error.code(), &message),
        }
        error
    }

    /// Process pending native events
    ///
    /// Input for registered windows is recorded into their buffers. Returns
    /// the number of records stored.
    pub fn poll_events(&self) -> usize {
        let registry = self.shared.registry.borrow();
        let mut stored = 0;

        self.shared
            .backend
            .borrow_mut()
            .poll_events(&mut |handle, record| {
                let Some(buffers) = registry.get(&handle).and_then(Weak::upgrade) else {
                    log::trace!("Input for unknown window {:?} discarded", handle);
                    return;
                };
                if buffers.borrow_mut().record(record) {
                    stored += 1;
                }
            });

        stored
    }

    /// Create a window
    ///
    /// Errors are also reported through the error callback.
    pub fn create_window(&self, descriptor: &WindowDescriptor<'_>) -> WindowResult<Window> {
        let mut window = Window::new(self);
        window.create(descriptor)?;
        Ok(window)
    }

    /// The primary monitor, uninitialized when no monitor is connected
    pub fn primary_monitor(&self) -> Monitor {
        Monitor::from_handle(self.backend_mut().primary_monitor())
    }

    /// Every connected monitor
    pub fn monitors(&self) -> Vec<Monitor> {
        self.backend_mut()
            .monitors()
            .into_iter()
            .map(|handle| Monitor::from_handle(Some(handle)))
            .collect()
    }

    /// Current video mode of a monitor
    pub fn video_mode(&self, monitor: &Monitor) -> Option<VideoMode> {
        let handle = monitor.handle()?;
        self.backend_mut().video_mode(handle)
    }

    /// Borrow the backend
    ///
    /// # Panics
    /// Panics if the backend is mutably borrowed.
    pub fn backend(&self) -> Ref<'_, dyn WindowBackend> {
        Ref::map(self.shared.backend.borrow(), |backend| &**backend)
    }

    /// Mutably borrow the backend
    ///
    /// # Panics
    /// Panics if the backend is already borrowed.
    pub fn backend_mut(&self) -> RefMut<'_, dyn WindowBackend> {
        RefMut::map(self.shared.backend.borrow_mut(), |backend| &mut **backend)
    }

    /// Borrow the backend as its concrete type
    pub fn backend_as<B: WindowBackend + 'static>(&self) -> Option<Ref<'_, B>> {
        Ref::filter_map(self.backend(), |backend| backend.as_any().downcast_ref::<B>()).ok()
    }

    /// Mutably borrow the backend as its concrete type
    pub fn backend_as_mut<B: WindowBackend + 'static>(&self) -> Option<RefMut<'_, B>> {
        RefMut::filter_map(self.backend_mut(), |backend| {
            backend.as_any_mut().downcast_mut::<B>()
        })
        .ok()
    }

    /// Number of windows receiving input
    pub fn registered_windows(&self) -> usize {
        self.shared.registry.borrow().len()
    }

    pub(crate) fn register(&self, handle: NativeHandle, buffers: &Rc<RefCell<InputBuffers>>) {
        self.shared
            .registry
            .borrow_mut()
            .insert(handle, Rc::downgrade(buffers));
    }

    pub(crate) fn unregister(&self, handle: NativeHandle) {
        self.shared.registry.borrow_mut().remove(&handle);
    }
}

impl fmt::Debug for WindowContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowContext")
            .field("registered_windows", &self.registered_windows())
            .finish_non_exhaustive()
    }
}

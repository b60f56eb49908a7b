use crate::backend::MonitorHandle;

/// A connected monitor, or an uninitialized placeholder
///
/// Obtained from [`WindowContext::primary_monitor`](super::WindowContext::primary_monitor)
/// or [`WindowContext::monitors`](super::WindowContext::monitors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Monitor {
    handle: Option<MonitorHandle>,
}

impl Monitor {
    /// A monitor that refers to nothing
    pub const fn uninitialized() -> Self {
        Self { handle: None }
    }

    pub(crate) const fn from_handle(handle: Option<MonitorHandle>) -> Self {
        Self { handle }
    }

    /// Whether the monitor refers to a connected output
    pub const fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    /// Backend handle of the monitor
    pub const fn handle(&self) -> Option<MonitorHandle> {
        self.handle
    }
}

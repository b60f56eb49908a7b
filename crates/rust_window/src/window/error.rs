use thiserror::Error;

/// Window management errors
///
/// Every variant carries a stable numeric code that is handed to the
/// context's error callback together with the display message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The platform window system could not start
    #[error("Window system initialization failed")]
    InitializationFailed,

    /// `create` called on a live window
    #[error("Window has already been created")]
    AlreadyCreated,

    /// Width or height below 1
    #[error("Window width and height must be at least 1")]
    InvalidDimensions,

    /// Operation needs a created window
    #[error("Window has not been created")]
    NotCreated,

    /// Monitor or share window is missing or unusable
    #[error("Parent resource has not been created")]
    ParentNotCreated,

    /// A Vulkan surface already exists for the window
    #[error("Window surface has already been created")]
    SurfaceAlreadyCreated,

    /// The backend refused to create the window
    #[error("Native window creation failed")]
    CreationFailed,

    /// Icon file could not be decoded or has the wrong pixel count
    #[error("Icon could not be loaded: {0}")]
    IconLoadFailed(String),

    /// Vulkan surface creation returned an error
    #[error("Window surface creation failed: {0}")]
    SurfaceCreationFailed(String),
}

impl WindowError {
    /// Stable numeric code passed to the error callback
    pub const fn code(&self) -> u32 {
        match self {
            Self::InitializationFailed => 0x0001_0001,
            Self::AlreadyCreated => 0x0001_1001,
            Self::InvalidDimensions => 0x0001_1002,
            Self::NotCreated => 0x0001_1003,
            Self::ParentNotCreated => 0x0001_1004,
            Self::SurfaceAlreadyCreated => 0x0001_1005,
            Self::CreationFailed => 0x0001_1006,
            Self::IconLoadFailed(_) => 0x0001_1007,
            Self::SurfaceCreationFailed(_) => 0x0001_1008,
        }
    }
}

/// Result of a window operation
pub type WindowResult<T> = Result<T, WindowError>;

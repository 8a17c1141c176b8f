use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Crop error: {0}")]
    CropError(String),

    #[error("Media store error: {0}")]
    MediaError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`WorkflowError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl WorkflowError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create a validation error.
    validation => ValidationError,
    /// Create a crop error.
    crop => CropError,
    /// Create a media store error.
    media => MediaError,
    /// Create a session error.
    session => SessionError,
}

impl From<serde_json::Error> for WorkflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::SessionError(e.to_string())
    }
}

impl From<serde_yml::Error> for WorkflowError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<image::ImageError> for WorkflowError {
    fn from(e: image::ImageError) -> Self {
        Self::CropError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;

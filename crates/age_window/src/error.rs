//! Error types for the windowing core
//!
//! Nothing in this crate retries on failure; every error is returned to the
//! caller, which decides whether to abort, retry or tear the window down.

use thiserror::Error;

use crate::foundation::collections::WindowId;

/// Failure reported by a native backend operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct BackendError {
    /// Name of the native operation that failed
    pub operation: &'static str,
    /// Platform-supplied description
    pub message: String,
}

impl BackendError {
    /// Create a backend error for the named operation
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Window management errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Window class registration was rejected; no window can be created
    #[error("platform initialization failed: {0}")]
    PlatformInit(#[source] BackendError),

    /// Native window, pixel format or context setup failed
    #[error("window creation failed: {0}")]
    WindowCreate(#[source] BackendError),

    /// Attaching the rendering context or resolving functions failed
    #[error("rendering context error: {0}")]
    Context(String),

    /// Presenting the back buffer failed
    #[error("present failed: {0}")]
    Present(#[source] BackendError),

    /// The id does not name a live window
    #[error("window {0:?} does not exist or was destroyed")]
    UnknownWindow(WindowId),
}

/// Result alias used throughout the crate
pub type WindowResult<T> = Result<T, WindowError>;

//! Window management subsystem
//!
//! # Module Organization
//!
//! - **`state`**: per-window state machine (visibility, fullscreen, bounds, close)
//! - **`handle`**: [`WindowMut`], the mutable view handed to applications and callbacks
//! - **`events`**: [`EventDispatchTable`] callback slots and modifier masks

pub mod events;
pub mod handle;
pub mod state;

pub use events::{EventDispatchTable, EventKind, ModifierState};
pub use handle::WindowMut;
pub use state::{SavedLayout, WindowState};

use crate::core::config::ContextConfig;

/// Construction parameters of a native window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDesc {
    /// Title bar text
    pub title: String,
    /// Left edge, monitor-relative
    pub x: i32,
    /// Top edge, monitor-relative
    pub y: i32,
    /// Client-area width hint
    pub width: u32,
    /// Client-area height hint
    pub height: u32,
    /// Rendering context to create alongside the window
    pub context: ContextConfig,
}

impl WindowDesc {
    /// Describe a window with the default rendering context
    pub fn new(title: &str, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            title: title.to_string(),
            x,
            y,
            width,
            height,
            context: ContextConfig::default(),
        }
    }

    /// Set the rendering context configuration
    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }
}

//! # age_window
//!
//! Windowing and event-dispatch core of the age engine.
//!
//! ## Features
//!
//! - **Platform event source**: one-time native registration and a per-window
//!   poll-then-fetch event pump
//! - **Window state machine**: visibility, fullscreen with saved-layout
//!   restore, bounds and close requests
//! - **Event dispatch tables**: optional per-window callbacks for mouse,
//!   keyboard, text and close events
//! - **Context binding**: make-current, function-pointer resolution and
//!   buffer presentation over a single current-context register
//! - **Backends**: a deterministic in-memory backend for tests and a GLFW
//!   backend behind the `glfw` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use age_window::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     let mut platform = Platform::initialize(MockBackend::new())?;
//!     let window = platform.create_window("age", 100, 100, 800, 600)?;
//!
//!     platform
//!         .events(window)?
//!         .on_key_down(|window, key, _alt| {
//!             if key == 27 {
//!                 window.close();
//!             }
//!         })
//!         .on_close(|_| log::info!("closing"));
//!
//!     platform.window_mut(window)?.set_visible(true);
//!     platform.make_current(window)?;
//!
//!     while !platform.should_close(window) {
//!         platform.pump_events(window)?;
//!         platform.swap_buffers(window)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod foundation;
pub mod platform;
pub mod window;

#[cfg(test)]
mod tests;

pub use context::{ContextRegister, GraphicsDevice, NullDevice, ProcTable};
pub use error::{BackendError, WindowError, WindowResult};
pub use foundation::collections::WindowId;
pub use foundation::geometry::{Margins, Rect};
pub use platform::Platform;

/// Common imports for windowing users
pub mod prelude {
    #[cfg(feature = "glfw")]
    pub use crate::platform::glfw::GlfwBackend;
    pub use crate::{
        context::{GraphicsDevice, NullDevice, ProcTable},
        core::config::{ApplicationConfig, Config, ContextConfig, PlatformConfig, WindowConfig},
        error::{WindowError, WindowResult},
        foundation::{collections::WindowId, geometry::Rect},
        platform::{
            backend::{NativeBackend, NativeEvent, WindowStyle},
            mock::MockBackend,
            Platform,
        },
        window::{EventDispatchTable, EventKind, ModifierState, WindowDesc, WindowMut},
    };
}

//! Mutable window handle
//!
//! [`WindowMut`] pairs a window's state with the native backend so the state
//! machine can issue native calls. Application code gets one from
//! [`Platform::window_mut`](crate::Platform::window_mut), and callbacks get
//! one as their first argument during the event pump.

use crate::foundation::collections::WindowId;
use crate::foundation::geometry::Rect;
use crate::platform::backend::{NativeBackend, NativeHandle};

use super::state::{SavedLayout, WindowState};

/// Borrowed, mutable view of one live window
pub struct WindowMut<'a> {
    id: WindowId,
    backend: &'a mut dyn NativeBackend,
    state: &'a mut WindowState,
}

impl<'a> WindowMut<'a> {
    pub(crate) fn new(id: WindowId, backend: &'a mut dyn NativeBackend, state: &'a mut WindowState) -> Self {
        Self { id, backend, state }
    }

    /// Id of this window
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Native handle of this window
    pub fn handle(&self) -> NativeHandle {
        self.state.handle()
    }

    /// Read-only window state
    pub fn state(&self) -> &WindowState {
        self.state
    }

    /// Enter or leave fullscreen; no-op if unchanged
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.state.set_fullscreen(self.backend, fullscreen);
    }

    /// Whether the window is fullscreen
    pub fn is_fullscreen(&self) -> bool {
        self.state.is_fullscreen()
    }

    /// Show or hide the window; no-op if unchanged
    pub fn set_visible(&mut self, visible: bool) {
        self.state.set_visible(self.backend, visible);
    }

    /// Whether the window is shown
    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Outer window rectangle
    pub fn bounds(&self) -> Rect {
        self.state.bounds(&*self.backend)
    }

    /// Drawable client-area rectangle
    pub fn inner_bounds(&self) -> Rect {
        self.state.inner_bounds(&*self.backend)
    }

    /// Move and resize the window
    ///
    /// While fullscreen this only changes the rectangle restored on exit.
    pub fn set_bounds(&mut self, rect: Rect) {
        self.state.set_bounds(self.backend, rect);
    }

    /// Layout restored by the next fullscreen exit
    pub fn saved_layout(&self) -> SavedLayout {
        self.state.saved_layout()
    }

    /// Title bar text
    pub fn title(&self) -> &str {
        self.state.title()
    }

    /// Change the title bar text
    pub fn set_title(&mut self, title: &str) {
        self.state.set_title(self.backend, title);
    }

    /// Ask the platform to close the window
    ///
    /// `should_close` turns true once the resulting close message is pumped.
    pub fn close(&mut self) {
        self.state.close(self.backend);
    }

    /// Whether a close was requested
    pub fn should_close(&self) -> bool {
        self.state.should_close()
    }
}

impl std::fmt::Debug for WindowMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowMut").field("id", &self.id).field("state", &self.state).finish()
    }
}

//! Per-window state machine
//!
//! A window is in one of {Normal, Fullscreen} × {Visible, Hidden} ×
//! {Open, CloseRequested}. The flags live here; geometry and style always
//! live in the native window and are read back through the backend.
//!
//! Fullscreen relies on a [`SavedLayout`] snapshot. It is taken when the
//! window is created, when entering fullscreen, and on every windowed
//! `set_bounds`. Leaving fullscreen restores exactly what it holds. While
//! fullscreen, `set_bounds` edits the snapshot instead of the live window.

use crate::error::{WindowError, WindowResult};
use crate::foundation::geometry::Rect;
use crate::platform::backend::{NativeBackend, NativeHandle, NativeWindow, WindowStyle};

use super::WindowDesc;

/// Layout to restore when leaving fullscreen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedLayout {
    /// Style bits before fullscreen
    pub style: WindowStyle,
    /// Outer rectangle before fullscreen
    pub rect: Rect,
    /// Whether the window was maximized
    pub maximized: bool,
}

impl SavedLayout {
    fn capture(backend: &dyn NativeBackend, handle: NativeHandle) -> Self {
        Self {
            style: backend.style(handle),
            rect: backend.outer_rect(handle),
            maximized: backend.is_maximized(handle),
        }
    }
}

/// Mutable state of one window
#[derive(Debug)]
pub struct WindowState {
    title: String,
    native: NativeWindow,
    visible: bool,
    fullscreen: bool,
    close_requested: bool,
    saved: SavedLayout,
    functions_resolved: bool,
}

impl WindowState {
    /// Create the native window; starts Normal, Hidden and Open
    pub(crate) fn create(backend: &mut dyn NativeBackend, desc: &WindowDesc) -> WindowResult<Self> {
        let native = backend.create_window(desc).map_err(WindowError::WindowCreate)?;

        // The first fullscreen transition needs a restore point even if
        // set_bounds is never called.
        let saved = SavedLayout::capture(backend, native.handle);

        Ok(Self {
            title: desc.title.clone(),
            native,
            visible: false,
            fullscreen: false,
            close_requested: false,
            saved,
            functions_resolved: false,
        })
    }

    /// Title bar text
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Native objects backing the window
    pub fn native(&self) -> &NativeWindow {
        &self.native
    }

    /// Native window handle
    pub fn handle(&self) -> NativeHandle {
        self.native.handle
    }

    /// Whether the window is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the window is fullscreen
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Whether a close was requested by the platform
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Layout restored by the next fullscreen exit
    pub fn saved_layout(&self) -> SavedLayout {
        self.saved
    }

    pub(crate) fn mark_close_requested(&mut self) {
        if !self.close_requested {
            log::debug!("Window {:?} close requested", self.native.handle);
        }
        self.close_requested = true;
    }

    pub(crate) fn functions_resolved(&self) -> bool {
        self.functions_resolved
    }

    pub(crate) fn set_functions_resolved(&mut self, resolved: bool) {
        self.functions_resolved = resolved;
    }

    pub(crate) fn set_fullscreen(&mut self, backend: &mut dyn NativeBackend, fullscreen: bool) {
        if self.fullscreen == fullscreen {
            return;
        }

        let handle = self.native.handle;
        if fullscreen {
            // Chosen now, not at creation, so a window dragged to another
            // monitor goes fullscreen there.
            let monitor = backend.monitor_rect(handle);

            // The saved rect is the normal one, so un-maximize before capturing.
            let maximized = backend.is_maximized(handle);
            if maximized {
                backend.set_maximized(handle, false);
            }
            self.saved = SavedLayout {
                maximized,
                ..SavedLayout::capture(backend, handle)
            };

            backend.set_style(handle, (self.saved.style - WindowStyle::DECORATION) | WindowStyle::TOPMOST);
            backend.set_outer_rect(handle, monitor);

            log::debug!("Window {handle:?} entered fullscreen on monitor {monitor:?}");
        } else {
            backend.set_style(handle, self.saved.style);
            backend.set_outer_rect(handle, self.saved.rect);
            if self.saved.maximized {
                backend.set_maximized(handle, true);
            }

            log::debug!("Window {handle:?} left fullscreen, restored {:?}", self.saved);
        }

        self.fullscreen = fullscreen;
    }

    pub(crate) fn set_visible(&mut self, backend: &mut dyn NativeBackend, visible: bool) {
        if self.visible == visible {
            return;
        }
        backend.set_visible(self.native.handle, visible);
        self.visible = visible;
    }

    pub(crate) fn bounds(&self, backend: &dyn NativeBackend) -> Rect {
        backend.outer_rect(self.native.handle)
    }

    pub(crate) fn inner_bounds(&self, backend: &dyn NativeBackend) -> Rect {
        backend.client_rect(self.native.handle)
    }

    pub(crate) fn set_bounds(&mut self, backend: &mut dyn NativeBackend, rect: Rect) {
        let handle = self.native.handle;

        if self.fullscreen {
            // Live geometry stays on the monitor until fullscreen is left.
            self.saved.rect = rect;
            self.saved.maximized = false;
            log::debug!("Window {handle:?} is fullscreen, deferred bounds {rect:?}");
            return;
        }

        if backend.is_maximized(handle) {
            backend.set_maximized(handle, false);
        }
        backend.set_outer_rect(handle, rect);

        self.saved = SavedLayout {
            style: backend.style(handle),
            rect,
            maximized: false,
        };
    }

    pub(crate) fn set_title(&mut self, backend: &mut dyn NativeBackend, title: &str) {
        backend.set_title(self.native.handle, title);
        self.title = title.to_string();
    }

    pub(crate) fn close(&self, backend: &mut dyn NativeBackend) {
        backend.request_close(self.native.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockBackend;

    fn create(backend: &mut MockBackend) -> WindowState {
        backend.register_window_class().unwrap();
        WindowState::create(backend, &WindowDesc::new("state", 100, 100, 800, 600)).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let mut backend = MockBackend::new();
        let state = create(&mut backend);

        assert!(!state.is_visible());
        assert!(!state.is_fullscreen());
        assert!(!state.should_close());
        assert_eq!(state.title(), "state");
    }

    #[test]
    fn test_initial_snapshot_matches_window() {
        let mut backend = MockBackend::new();
        let state = create(&mut backend);

        let saved = state.saved_layout();
        assert_eq!(saved.rect, state.bounds(&backend));
        assert!(saved.style.contains(WindowStyle::DECORATED));
        assert!(!saved.maximized);
    }

    #[test]
    fn test_fullscreen_strips_decoration() {
        let mut backend = MockBackend::new();
        let mut state = create(&mut backend);

        state.set_fullscreen(&mut backend, true);
        let style = backend.style(state.handle());
        assert!(!style.contains(WindowStyle::DECORATED));
        assert!(!style.contains(WindowStyle::RESIZABLE));
        assert!(style.contains(WindowStyle::TOPMOST));

        state.set_fullscreen(&mut backend, false);
        let style = backend.style(state.handle());
        assert!(style.contains(WindowStyle::DECORATED));
        assert!(!style.contains(WindowStyle::TOPMOST));
    }

    #[test]
    fn test_fullscreen_unchanged_is_noop() {
        let mut backend = MockBackend::new();
        let mut state = create(&mut backend);

        let before = backend.call_count("set_style");
        state.set_fullscreen(&mut backend, false);
        assert_eq!(backend.call_count("set_style"), before);
    }

    #[test]
    fn test_windowed_set_bounds_clears_maximized() {
        let mut backend = MockBackend::new();
        let mut state = create(&mut backend);
        backend.set_maximized(state.handle(), true);

        let rect = Rect::new(10, 20, 640, 480);
        state.set_bounds(&mut backend, rect);

        assert!(!backend.is_maximized(state.handle()));
        assert_eq!(state.saved_layout().rect, rect);
        assert!(!state.saved_layout().maximized);
    }

    #[test]
    fn test_fullscreen_saves_normal_rect_of_maximized_window() {
        let mut backend = MockBackend::new();
        let mut state = create(&mut backend);
        let normal = state.bounds(&backend);
        backend.set_maximized(state.handle(), true);

        state.set_fullscreen(&mut backend, true);
        assert_eq!(state.saved_layout().rect, normal);
        assert!(state.saved_layout().maximized);

        state.set_fullscreen(&mut backend, false);
        assert!(backend.is_maximized(state.handle()));

        backend.set_maximized(state.handle(), false);
        assert_eq!(state.bounds(&backend), normal);
    }

    #[test]
    fn test_close_only_posts_request() {
        let mut backend = MockBackend::new();
        let state = create(&mut backend);

        state.close(&mut backend);
        assert!(!state.should_close());
        assert_eq!(backend.call_count("request_close"), 1);
    }
}

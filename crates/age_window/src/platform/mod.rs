//! Platform layer: window registry and event pump
//!
//! [`Platform`] is the single process-scoped object of this crate. It owns
//! the native backend, every window created through it, the handle-to-window
//! registry used to route native messages, and the current-context register
//! (see [`crate::context`]). Nothing is kept in free-standing globals; tests
//! construct a platform over [`mock::MockBackend`] and real applications over
//! a native backend such as `GlfwBackend`.
//!
//! # Threading
//! The platform is single-threaded. Callbacks run synchronously on the
//! thread calling [`Platform::pump_events`], and a backend that is not
//! `Send` keeps the whole platform on its creating thread. Making contexts
//! current on more than one thread is unsupported.

pub mod backend;
#[cfg(feature = "glfw")]
pub mod glfw;
pub mod mock;

use std::collections::HashMap;

use crate::context::{ContextRegister, GraphicsDevice, NullDevice};
use crate::core::config::WindowConfig;
use crate::error::{WindowError, WindowResult};
use crate::foundation::collections::{WindowId, WindowMap};
use crate::window::{EventDispatchTable, EventKind, WindowDesc, WindowMut, WindowState};

use backend::{MessageStatus, NativeBackend, NativeHandle, NativeMessage};

/// State and callbacks of one registered window
#[derive(Debug)]
pub(crate) struct WindowEntry {
    pub(crate) state: WindowState,
    pub(crate) events: EventDispatchTable,
}

/// Owner of the native backend and of every window
pub struct Platform<B: NativeBackend> {
    pub(crate) backend: B,
    pub(crate) windows: WindowMap<WindowEntry>,
    pub(crate) registry: HashMap<NativeHandle, WindowId>,
    pub(crate) context: ContextRegister,
    pub(crate) device: Box<dyn GraphicsDevice>,
}

impl<B: NativeBackend> Platform<B> {
    /// Register the native window class and take ownership of the backend
    ///
    /// Registration happens exactly once per platform. Failure is fatal for
    /// windowing: without a platform no window can be created.
    pub fn initialize(mut backend: B) -> WindowResult<Self> {
        backend.register_window_class().map_err(|e| {
            log::error!("Window class registration failed: {e}");
            WindowError::PlatformInit(e)
        })?;

        log::info!("Platform initialized");

        Ok(Self {
            backend,
            windows: WindowMap::with_key(),
            registry: HashMap::new(),
            context: ContextRegister::default(),
            device: Box::new(NullDevice),
        })
    }

    /// Use `device` for function-pointer resolution on first make-current
    pub fn with_device(mut self, device: impl GraphicsDevice + 'static) -> Self {
        self.device = Box::new(device);
        self
    }

    /// Create a hidden window with a rendering context
    ///
    /// `width`/`height` are a client-area hint.
    pub fn create_window(&mut self, title: &str, x: i32, y: i32, width: u32, height: u32) -> WindowResult<WindowId> {
        self.create_window_with(&WindowDesc::new(title, x, y, width, height))
    }

    /// Create a hidden window from a full description
    pub fn create_window_with(&mut self, desc: &WindowDesc) -> WindowResult<WindowId> {
        let state = WindowState::create(&mut self.backend, desc).map_err(|e| {
            log::warn!("Failed to create window '{}': {e}", desc.title);
            e
        })?;

        let handle = state.handle();
        let id = self.windows.insert(WindowEntry {
            state,
            events: EventDispatchTable::new(),
        });
        self.registry.insert(handle, id);

        log::info!(
            "Created window '{}' {:?} ({handle:?}) at ({}, {}) {}x{}",
            desc.title,
            id,
            desc.x,
            desc.y,
            desc.width,
            desc.height
        );
        Ok(id)
    }

    /// Create a window and apply the configured visibility and fullscreen state
    pub fn create_window_from_config(&mut self, config: &WindowConfig) -> WindowResult<WindowId> {
        let id = self.create_window_with(&config.desc())?;
        let mut window = self.window_mut(id)?;
        window.set_fullscreen(config.fullscreen);
        window.set_visible(config.visible);
        Ok(id)
    }

    /// Destroy a window and release its native resources
    ///
    /// If the window holds the current context, the context is detached from
    /// the thread first; then the rendering context, the device context and
    /// finally the native window are released.
    pub fn destroy_window(&mut self, id: WindowId) -> WindowResult<()> {
        let entry = self.windows.remove(id).ok_or(WindowError::UnknownWindow(id))?;
        let native = *entry.state.native();

        if self.context.is_current(id) {
            self.context.clear();
            if let Err(e) = self.backend.make_current(None) {
                log::warn!("Failed to detach context of window {id:?}: {e}");
            }
        }

        self.backend.release_render_context(&native);
        self.backend.release_device_context(&native);
        self.backend.destroy_window(native.handle);
        self.registry.remove(&native.handle);

        log::info!("Destroyed window '{}' {id:?}", entry.state.title());
        Ok(())
    }

    /// Mutable handle to a live window
    pub fn window_mut(&mut self, id: WindowId) -> WindowResult<WindowMut<'_>> {
        let entry = self.windows.get_mut(id).ok_or(WindowError::UnknownWindow(id))?;
        Ok(WindowMut::new(id, &mut self.backend, &mut entry.state))
    }

    /// Read-only state of a live window
    pub fn window(&self, id: WindowId) -> WindowResult<&WindowState> {
        self.windows
            .get(id)
            .map(|entry| &entry.state)
            .ok_or(WindowError::UnknownWindow(id))
    }

    /// Callback table of a live window
    pub fn events(&mut self, id: WindowId) -> WindowResult<&mut EventDispatchTable> {
        self.windows
            .get_mut(id)
            .map(|entry| &mut entry.events)
            .ok_or(WindowError::UnknownWindow(id))
    }

    /// Whether a close was requested for the window
    ///
    /// Destroyed windows report true so poll loops terminate.
    pub fn should_close(&self, id: WindowId) -> bool {
        self.window(id).map_or(true, WindowState::should_close)
    }

    /// Whether `id` names a live window
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(id)
    }

    /// Window registered for a native handle
    pub fn window_for_handle(&self, handle: NativeHandle) -> Option<WindowId> {
        self.registry.get(&handle).copied()
    }

    /// Ids of all live windows
    pub fn window_ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.keys()
    }

    /// The native backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The native backend, mutably
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Drain and dispatch every pending native message for a window
    ///
    /// Polls before each fetch, so an empty queue returns immediately and a
    /// fetch only happens for a message known to be pending. Callbacks run
    /// synchronously and may mutate the window. A quit or failure status from
    /// the native loop sets the close-requested flag, as does a Close or
    /// Destroy message, which also invokes the Close callback.
    ///
    /// Returns the number of messages processed.
    pub fn pump_events(&mut self, id: WindowId) -> WindowResult<usize> {
        let handle = self.window(id)?.handle();
        let mut processed = 0;

        while self.backend.peek_message(handle) {
            processed += 1;
            match self.backend.get_message(handle) {
                MessageStatus::Message(message) => {
                    self.backend.translate_message(&message);
                    self.route(&message);
                    self.backend.dispatch_message(&message);
                }
                MessageStatus::Quit => {
                    log::debug!("Message loop for {id:?} reported quit");
                    self.mark_close_requested(id);
                }
                MessageStatus::Failed(e) => {
                    log::warn!("Message loop for {id:?} failed: {e}");
                    self.mark_close_requested(id);
                }
            }

            // The queue must not outlive the window it belongs to.
            if !self.windows.contains_key(id) {
                break;
            }
        }

        Ok(processed)
    }

    fn mark_close_requested(&mut self, id: WindowId) {
        if let Some(entry) = self.windows.get_mut(id) {
            entry.state.mark_close_requested();
        }
    }

    /// Send a message to the dispatch table of the window owning its handle
    fn route(&mut self, message: &NativeMessage) {
        let Some(&id) = self.registry.get(&message.window) else {
            log::trace!("No window registered for {:?}, default handling only", message.window);
            return;
        };
        let Some(entry) = self.windows.get_mut(id) else {
            return;
        };

        let kind = EventKind::of(&message.event);
        if kind == Some(EventKind::Close) {
            entry.state.mark_close_requested();
        }

        let WindowEntry { state, events } = entry;
        let mut window = WindowMut::new(id, &mut self.backend, state);
        if events.dispatch(&mut window, &message.event) {
            log::trace!("Dispatched {kind:?} to {id:?}");
        }
    }
}

impl<B: NativeBackend> Drop for Platform<B> {
    fn drop(&mut self) {
        let ids: Vec<WindowId> = self.windows.keys().collect();
        for id in ids {
            // Ids come from the live map, so destruction cannot fail.
            let _ = self.destroy_window(id);
        }
    }
}

impl<B: NativeBackend> std::fmt::Debug for Platform<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("windows", &self.windows.len())
            .field("current", &self.context.current())
            .finish_non_exhaustive()
    }
}

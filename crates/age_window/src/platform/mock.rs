//! In-memory native backend for tests
//!
//! [`MockBackend`] models just enough of a native windowing system to drive
//! the state machine and the event pump deterministically: windows with a
//! style, an outer rectangle and a maximized flag, a fixed decoration frame,
//! a configurable monitor layout, per-window message queues, and a single
//! current-context slot. Every mutating call is counted and appended to an
//! ordered log so tests can assert on exactly which native calls happened.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::ptr;

use crate::error::BackendError;
use crate::foundation::geometry::{Margins, Rect};
use crate::window::WindowDesc;

use super::backend::{
    DeviceContext, MessageStatus, NativeBackend, NativeEvent, NativeHandle, NativeMessage, NativeWindow,
    ProcAddress, RenderContext, WindowStyle,
};

/// One recorded native call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockCall {
    /// Operation name, matching the [`NativeBackend`] method
    pub operation: &'static str,
    /// Window the call targeted, if any
    pub handle: Option<NativeHandle>,
}

/// Simulated native window
#[derive(Debug, Clone)]
pub struct MockWindow {
    /// Title bar text
    pub title: String,
    /// Style bits, including VISIBLE
    pub style: WindowStyle,
    /// Outer rectangle
    pub outer: Rect,
    /// Maximized flag
    pub maximized: bool,
    restore_rect: Rect,
    queue: VecDeque<MessageStatus>,
    device_context_live: bool,
    render_context_live: bool,
}

/// Deterministic [`NativeBackend`] with call counters and injectable failures
#[derive(Debug)]
pub struct MockBackend {
    windows: BTreeMap<NativeHandle, MockWindow>,
    next_id: u64,
    monitors: Vec<Rect>,
    margins: Margins,
    class_registered: bool,
    current: Option<NativeHandle>,
    calls: HashMap<&'static str, usize>,
    log: Vec<MockCall>,
    fail_registration: bool,
    fail_window_creation: bool,
    fail_make_current: bool,
    fail_swap_buffers: bool,
    missing_procs: HashSet<String>,
}

impl MockBackend {
    /// Frame used for decorated windows: 8px borders and a 31px title bar
    pub const DEFAULT_MARGINS: Margins = Margins::new(8, 31, 8, 8);

    /// Single 1920x1080 monitor at the origin
    pub const DEFAULT_MONITOR: Rect = Rect::new(0, 0, 1920, 1080);

    /// Create a backend with one monitor and no windows
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_id: 1,
            monitors: vec![Self::DEFAULT_MONITOR],
            margins: Self::DEFAULT_MARGINS,
            class_registered: false,
            current: None,
            calls: HashMap::new(),
            log: Vec::new(),
            fail_registration: false,
            fail_window_creation: false,
            fail_make_current: false,
            fail_swap_buffers: false,
            missing_procs: HashSet::new(),
        }
    }

    /// Replace the monitor layout; the first monitor is the primary one
    pub fn with_monitors(mut self, monitors: Vec<Rect>) -> Self {
        assert!(!monitors.is_empty(), "at least one monitor is required");
        self.monitors = monitors;
        self
    }

    /// Make `register_window_class` fail
    pub fn with_failing_registration(mut self) -> Self {
        self.fail_registration = true;
        self
    }

    /// Make every `create_window` fail
    pub fn set_fail_window_creation(&mut self, fail: bool) {
        self.fail_window_creation = fail;
    }

    /// Make every `make_current(Some(..))` fail
    pub fn set_fail_make_current(&mut self, fail: bool) {
        self.fail_make_current = fail;
    }

    /// Make every `swap_buffers` fail
    pub fn set_fail_swap_buffers(&mut self, fail: bool) {
        self.fail_swap_buffers = fail;
    }

    /// Make `proc_address` return null for `name`
    pub fn set_missing_proc(&mut self, name: &str, missing: bool) {
        if missing {
            self.missing_procs.insert(name.to_string());
        } else {
            self.missing_procs.remove(name);
        }
    }

    /// Queue an event for `handle`, as if the OS had posted it
    pub fn push_event(&mut self, handle: NativeHandle, event: NativeEvent) {
        self.push_status(handle, MessageStatus::Message(NativeMessage::new(handle, event)));
    }

    /// Queue an arbitrary fetch result on the queue read for `handle`
    pub fn push_status(&mut self, handle: NativeHandle, status: MessageStatus) {
        if let Some(window) = self.windows.get_mut(&handle) {
            window.queue.push_back(status);
        }
    }

    /// Move or resize a window without going through the core, as a user
    /// dragging it would
    pub fn move_window(&mut self, handle: NativeHandle, rect: Rect) {
        if let Some(window) = self.windows.get_mut(&handle) {
            window.outer = rect;
        }
    }

    /// Simulated window, if it still exists
    pub fn window(&self, handle: NativeHandle) -> Option<&MockWindow> {
        self.windows.get(&handle)
    }

    /// Number of live native windows
    pub fn live_windows(&self) -> usize {
        self.windows.len()
    }

    /// Whether `register_window_class` succeeded
    pub fn is_class_registered(&self) -> bool {
        self.class_registered
    }

    /// Window whose context is attached to the (single simulated) thread
    pub fn current_context(&self) -> Option<NativeHandle> {
        self.current
    }

    /// Number of calls made to `operation`
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.get(operation).copied().unwrap_or(0)
    }

    /// Every recorded call, oldest first
    pub fn calls(&self) -> &[MockCall] {
        &self.log
    }

    /// Recorded calls that targeted `handle`, oldest first
    pub fn calls_for(&self, handle: NativeHandle) -> Vec<&'static str> {
        self.log
            .iter()
            .filter(|call| call.handle == Some(handle))
            .map(|call| call.operation)
            .collect()
    }

    /// Forget all recorded calls
    pub fn reset_calls(&mut self) {
        self.calls.clear();
        self.log.clear();
    }

    fn record(&mut self, operation: &'static str, handle: Option<NativeHandle>) {
        *self.calls.entry(operation).or_insert(0) += 1;
        self.log.push(MockCall { operation, handle });
    }

    fn frame(&self, style: WindowStyle) -> Margins {
        if style.contains(WindowStyle::DECORATED) {
            self.margins
        } else {
            Margins::NONE
        }
    }

    fn primary_monitor(&self) -> Rect {
        self.monitors.first().copied().unwrap_or(Self::DEFAULT_MONITOR)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeBackend for MockBackend {
    fn register_window_class(&mut self) -> Result<(), BackendError> {
        self.record("register_window_class", None);
        if self.fail_registration {
            return Err(BackendError::new("RegisterClass", "window class rejected"));
        }
        if self.class_registered {
            return Err(BackendError::new("RegisterClass", "class already exists"));
        }
        self.class_registered = true;
        Ok(())
    }

    fn create_window(&mut self, desc: &WindowDesc) -> Result<NativeWindow, BackendError> {
        self.record("create_window", None);
        if !self.class_registered {
            return Err(BackendError::new("CreateWindow", "window class not registered"));
        }
        if self.fail_window_creation {
            return Err(BackendError::new("CreateWindow", "pixel format not supported"));
        }

        let id = self.next_id;
        self.next_id += 1;
        let handle = NativeHandle(id);

        let style = WindowStyle::WINDOWED;
        let frame = self.frame(style);
        let outer = Rect::new(
            desc.x,
            desc.y,
            desc.width.saturating_add(frame.horizontal()),
            desc.height.saturating_add(frame.vertical()),
        );

        self.windows.insert(
            handle,
            MockWindow {
                title: desc.title.clone(),
                style,
                outer,
                maximized: false,
                restore_rect: outer,
                queue: VecDeque::new(),
                device_context_live: true,
                render_context_live: true,
            },
        );

        Ok(NativeWindow {
            handle,
            device_context: DeviceContext(id),
            render_context: RenderContext(id),
        })
    }

    fn release_render_context(&mut self, window: &NativeWindow) {
        self.record("release_render_context", Some(window.handle));
        if let Some(mock) = self.windows.get_mut(&window.handle) {
            mock.render_context_live = false;
        }
    }

    fn release_device_context(&mut self, window: &NativeWindow) {
        self.record("release_device_context", Some(window.handle));
        if let Some(mock) = self.windows.get_mut(&window.handle) {
            mock.device_context_live = false;
        }
    }

    fn destroy_window(&mut self, handle: NativeHandle) {
        self.record("destroy_window", Some(handle));
        if let Some(mock) = self.windows.remove(&handle) {
            debug_assert!(
                !mock.render_context_live && !mock.device_context_live,
                "native window destroyed before its contexts were released"
            );
        }
    }

    fn set_visible(&mut self, handle: NativeHandle, visible: bool) {
        self.record("set_visible", Some(handle));
        if let Some(window) = self.windows.get_mut(&handle) {
            window.style.set(WindowStyle::VISIBLE, visible);
        }
    }

    fn style(&self, handle: NativeHandle) -> WindowStyle {
        self.windows.get(&handle).map_or(WindowStyle::empty(), |window| window.style)
    }

    fn set_style(&mut self, handle: NativeHandle, style: WindowStyle) {
        self.record("set_style", Some(handle));
        if let Some(window) = self.windows.get_mut(&handle) {
            let visible = window.style & WindowStyle::VISIBLE;
            window.style = (style - WindowStyle::VISIBLE) | visible;
        }
    }

    fn outer_rect(&self, handle: NativeHandle) -> Rect {
        self.windows.get(&handle).map_or_else(Rect::default, |window| window.outer)
    }

    fn client_rect(&self, handle: NativeHandle) -> Rect {
        self.windows
            .get(&handle)
            .map_or_else(Rect::default, |window| window.outer.shrink(self.frame(window.style)))
    }

    fn set_outer_rect(&mut self, handle: NativeHandle, rect: Rect) {
        self.record("set_outer_rect", Some(handle));
        if let Some(window) = self.windows.get_mut(&handle) {
            window.outer = rect;
        }
    }

    fn is_maximized(&self, handle: NativeHandle) -> bool {
        self.windows.get(&handle).is_some_and(|window| window.maximized)
    }

    fn set_maximized(&mut self, handle: NativeHandle, maximized: bool) {
        self.record("set_maximized", Some(handle));
        let monitor = self.monitor_for(handle);
        if let Some(window) = self.windows.get_mut(&handle) {
            if maximized && !window.maximized {
                window.restore_rect = window.outer;
                window.outer = monitor;
            } else if !maximized && window.maximized {
                window.outer = window.restore_rect;
            }
            window.maximized = maximized;
        }
    }

    fn monitor_rect(&mut self, handle: NativeHandle) -> Rect {
        self.record("monitor_rect", Some(handle));
        self.monitor_for(handle)
    }

    fn set_title(&mut self, handle: NativeHandle, title: &str) {
        self.record("set_title", Some(handle));
        if let Some(window) = self.windows.get_mut(&handle) {
            window.title = title.to_string();
        }
    }

    fn request_close(&mut self, handle: NativeHandle) {
        self.record("request_close", Some(handle));
        self.push_event(handle, NativeEvent::Close);
    }

    fn peek_message(&mut self, handle: NativeHandle) -> bool {
        self.record("peek_message", Some(handle));
        self.windows.get(&handle).is_some_and(|window| !window.queue.is_empty())
    }

    fn get_message(&mut self, handle: NativeHandle) -> MessageStatus {
        self.record("get_message", Some(handle));
        self.windows
            .get_mut(&handle)
            .and_then(|window| window.queue.pop_front())
            .unwrap_or_else(|| MessageStatus::Failed(BackendError::new("GetMessage", "queue is empty")))
    }

    fn translate_message(&mut self, message: &NativeMessage) {
        self.record("translate_message", Some(message.window));
    }

    fn dispatch_message(&mut self, message: &NativeMessage) {
        self.record("dispatch_message", Some(message.window));
    }

    fn make_current(&mut self, window: Option<&NativeWindow>) -> Result<(), BackendError> {
        self.record("make_current", window.map(|w| w.handle));
        match window {
            Some(_) if self.fail_make_current => Err(BackendError::new("MakeCurrent", "context lost")),
            Some(w) if !self.windows.contains_key(&w.handle) => {
                Err(BackendError::new("MakeCurrent", "invalid window handle"))
            }
            Some(w) => {
                self.current = Some(w.handle);
                Ok(())
            }
            None => {
                self.current = None;
                Ok(())
            }
        }
    }

    fn proc_address(&mut self, window: &NativeWindow, name: &str) -> ProcAddress {
        self.record("proc_address", Some(window.handle));
        if self.missing_procs.contains(name) || self.current != Some(window.handle) {
            return ptr::null();
        }
        // Any stable non-null value will do; nothing ever calls through it.
        let fake = 0x1000 + name.len() * 0x10;
        fake as ProcAddress
    }

    fn swap_buffers(&mut self, window: &NativeWindow) -> Result<(), BackendError> {
        self.record("swap_buffers", Some(window.handle));
        if self.fail_swap_buffers {
            return Err(BackendError::new("SwapBuffers", "device lost"));
        }
        if !self.windows.contains_key(&window.handle) {
            return Err(BackendError::new("SwapBuffers", "invalid window handle"));
        }
        Ok(())
    }
}

impl MockBackend {
    /// Monitor with the largest overlap, falling back to the primary monitor
    fn monitor_for(&self, handle: NativeHandle) -> Rect {
        let Some(window) = self.windows.get(&handle) else {
            return self.primary_monitor();
        };

        self.monitors
            .iter()
            .copied()
            .map(|monitor| (monitor.overlap_area(&window.outer), monitor))
            .filter(|(area, _)| *area > 0)
            .max_by_key(|(area, _)| *area)
            .map_or_else(|| self.primary_monitor(), |(_, monitor)| monitor)
    }
}

//! Backend-agnostic native windowing trait
//!
//! This module defines the narrow interface every native windowing system
//! must provide. Window state management and the event pump are written
//! purely against [`NativeBackend`], so they run unchanged on top of GLFW, a
//! raw OS API, or the in-memory [`MockBackend`](super::mock::MockBackend)
//! used by the tests.
//!
//! # Thread Safety
//! Nothing here requires `Send`. Native windows and rendering contexts
//! generally belong to the thread that created them, and the platform layer
//! is single-threaded by construction.

use std::ffi::c_void;

use crate::error::BackendError;
use crate::foundation::geometry::Rect;
use crate::window::events::ModifierState;
use crate::window::WindowDesc;

/// Opaque native window identity, used to route messages to their window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(pub u64);

/// Opaque native device context (drawing surface) of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceContext(pub u64);

/// Opaque native rendering context bound to a device context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderContext(pub u64);

/// Address of a graphics API entry point as reported by the native layer
pub type ProcAddress = *const c_void;

/// The native objects that make up one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeWindow {
    /// Window handle
    pub handle: NativeHandle,
    /// Device context the rendering context draws into
    pub device_context: DeviceContext,
    /// Rendering context created for the device context
    pub render_context: RenderContext,
}

bitflags::bitflags! {
    /// Platform-neutral window style bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        /// Title bar and border
        const DECORATED = 0x1;
        /// User-resizable frame
        const RESIZABLE = 0x2;
        /// Stays above non-topmost windows
        const TOPMOST = 0x4;
        /// Currently shown
        const VISIBLE = 0x8;
    }
}

impl WindowStyle {
    /// Style of a regular overlapped window
    pub const WINDOWED: Self = Self::DECORATED.union(Self::RESIZABLE);

    /// Style bits stripped when entering fullscreen
    pub const DECORATION: Self = Self::DECORATED.union(Self::RESIZABLE);
}

/// Input and lifecycle events a native backend reports for a window
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// Cursor moved inside the client area
    MouseMove {
        /// Client-area x
        x: i32,
        /// Client-area y
        y: i32,
        /// Held modifiers and buttons
        mode: ModifierState,
    },
    /// Wheel scrolled
    MouseScroll {
        /// Client-area x
        x: i32,
        /// Client-area y
        y: i32,
        /// Wheel delta, 120 per notch
        delta: i32,
        /// Held modifiers and buttons
        mode: ModifierState,
    },
    /// Mouse button pressed
    MouseButtonDown {
        /// Client-area x
        x: i32,
        /// Client-area y
        y: i32,
        /// Button index, 0 is the primary button
        button: u32,
        /// Held modifiers and buttons
        mode: ModifierState,
    },
    /// Mouse button released
    MouseButtonUp {
        /// Client-area x
        x: i32,
        /// Client-area y
        y: i32,
        /// Button index, 0 is the primary button
        button: u32,
        /// Held modifiers and buttons
        mode: ModifierState,
    },
    /// Key pressed or auto-repeated
    KeyDown {
        /// Native virtual key code
        key_code: i32,
        /// Alt was held
        alt: bool,
    },
    /// Key released
    KeyUp {
        /// Native virtual key code
        key_code: i32,
        /// Alt was held
        alt: bool,
    },
    /// Text input produced by key translation
    CharPrint {
        /// Unicode scalar value
        char_code: u32,
        /// Alt was held
        alt: bool,
    },
    /// The user or the application asked the window to close
    Close,
    /// The native window is being destroyed
    Destroy,
    /// Any message the core does not route, by native message id
    Other(u32),
}

/// One message retrieved from the native queue
#[derive(Debug, Clone, PartialEq)]
pub struct NativeMessage {
    /// Window the message is addressed to
    pub window: NativeHandle,
    /// Decoded event
    pub event: NativeEvent,
}

impl NativeMessage {
    /// Create a message for the given window
    pub fn new(window: NativeHandle, event: NativeEvent) -> Self {
        Self { window, event }
    }
}

/// Outcome of fetching one message
#[derive(Debug, Clone, PartialEq)]
pub enum MessageStatus {
    /// A message was retrieved
    Message(NativeMessage),
    /// The message loop reported a quit request
    Quit,
    /// The message loop reported an error
    Failed(BackendError),
}

/// Internal trait for native windowing implementations
///
/// Handles passed in are always ones this backend returned from
/// [`create_window`](NativeBackend::create_window) and has not yet destroyed;
/// the platform layer guarantees this with its window registry.
pub trait NativeBackend {
    /// Register the window class (or perform equivalent one-time setup)
    fn register_window_class(&mut self) -> Result<(), BackendError>;

    /// Create a hidden native window together with its device and rendering
    /// contexts
    ///
    /// `desc.width`/`desc.height` describe the client area.
    fn create_window(&mut self, desc: &WindowDesc) -> Result<NativeWindow, BackendError>;

    /// Release the rendering context of a window
    fn release_render_context(&mut self, window: &NativeWindow);

    /// Release the device context of a window
    fn release_device_context(&mut self, window: &NativeWindow);

    /// Destroy the native window itself
    fn destroy_window(&mut self, handle: NativeHandle);

    /// Show or hide the window
    fn set_visible(&mut self, handle: NativeHandle, visible: bool);

    /// Current style bits
    fn style(&self, handle: NativeHandle) -> WindowStyle;

    /// Replace the style bits (VISIBLE is ignored, use `set_visible`)
    fn set_style(&mut self, handle: NativeHandle, style: WindowStyle);

    /// Outer window rectangle including decorations
    fn outer_rect(&self, handle: NativeHandle) -> Rect;

    /// Client-area rectangle in screen coordinates
    fn client_rect(&self, handle: NativeHandle) -> Rect;

    /// Move and resize the outer window rectangle
    fn set_outer_rect(&mut self, handle: NativeHandle, rect: Rect);

    /// Whether the window is maximized
    fn is_maximized(&self, handle: NativeHandle) -> bool;

    /// Maximize or restore the window
    fn set_maximized(&mut self, handle: NativeHandle, maximized: bool);

    /// Full area of the monitor the window currently occupies
    fn monitor_rect(&mut self, handle: NativeHandle) -> Rect;

    /// Change the title bar text
    fn set_title(&mut self, handle: NativeHandle, title: &str);

    /// Ask the native layer to close the window; the resulting Close/Destroy
    /// message arrives through the message queue
    fn request_close(&mut self, handle: NativeHandle);

    /// Non-blocking check for a pending message addressed to `handle`
    fn peek_message(&mut self, handle: NativeHandle) -> bool;

    /// Retrieve the next message for `handle`
    ///
    /// Only called after `peek_message` returned true, so it must not block.
    fn get_message(&mut self, handle: NativeHandle) -> MessageStatus;

    /// Generate text input messages from key messages
    fn translate_message(&mut self, message: &NativeMessage);

    /// Run the native default handler for a message
    fn dispatch_message(&mut self, message: &NativeMessage);

    /// Attach a window's rendering context to the calling thread, or detach
    /// any context when `None`
    fn make_current(&mut self, window: Option<&NativeWindow>) -> Result<(), BackendError>;

    /// Look up a graphics API entry point through the window's context
    ///
    /// Returns a null pointer for unknown names.
    fn proc_address(&mut self, window: &NativeWindow, name: &str) -> ProcAddress;

    /// Present the back buffer of the window
    fn swap_buffers(&mut self, window: &NativeWindow) -> Result<(), BackendError>;
}

//! Per-window event callbacks
//!
//! An [`EventDispatchTable`] holds one optional callback per [`EventKind`].
//! Unset slots are legal and the matching events are silently ignored.
//! Callbacks run synchronously from
//! [`Platform::pump_events`](crate::Platform::pump_events) and receive the
//! window they belong to, so they may toggle fullscreen, hide the window or
//! request a close while the pump is running.

use super::handle::WindowMut;
use crate::platform::backend::NativeEvent;

bitflags::bitflags! {
    /// Modifier keys and mouse buttons held while an event was generated
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierState: u32 {
        /// Primary mouse button
        const LEFT_BUTTON = 0x01;
        /// Secondary mouse button
        const RIGHT_BUTTON = 0x02;
        /// Shift key
        const SHIFT = 0x04;
        /// Control key
        const CONTROL = 0x08;
        /// Middle mouse button
        const MIDDLE_BUTTON = 0x10;
        /// Alt key
        const ALT = 0x20;
        /// Super / Windows / Command key
        const SUPER = 0x40;
    }
}

impl ModifierState {
    /// Held-button bit for a mouse button index, if it has one
    pub fn for_button(button: u32) -> Self {
        match button {
            0 => Self::LEFT_BUTTON,
            1 => Self::RIGHT_BUTTON,
            2 => Self::MIDDLE_BUTTON,
            _ => Self::empty(),
        }
    }
}

/// Event kinds that can carry a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Cursor moved
    MouseMove,
    /// Wheel scrolled
    MouseScroll,
    /// Mouse button pressed
    MouseButtonDown,
    /// Mouse button released
    MouseButtonUp,
    /// Key pressed
    KeyDown,
    /// Key released
    KeyUp,
    /// Text input
    CharPrint,
    /// Close or destroy
    Close,
}

impl EventKind {
    /// Every kind, in dispatch-table order
    pub const ALL: [Self; 8] = [
        Self::MouseMove,
        Self::MouseScroll,
        Self::MouseButtonDown,
        Self::MouseButtonUp,
        Self::KeyDown,
        Self::KeyUp,
        Self::CharPrint,
        Self::Close,
    ];

    /// Kind of a native event, `None` for events without a slot
    pub fn of(event: &NativeEvent) -> Option<Self> {
        match event {
            NativeEvent::MouseMove { .. } => Some(Self::MouseMove),
            NativeEvent::MouseScroll { .. } => Some(Self::MouseScroll),
            NativeEvent::MouseButtonDown { .. } => Some(Self::MouseButtonDown),
            NativeEvent::MouseButtonUp { .. } => Some(Self::MouseButtonUp),
            NativeEvent::KeyDown { .. } => Some(Self::KeyDown),
            NativeEvent::KeyUp { .. } => Some(Self::KeyUp),
            NativeEvent::CharPrint { .. } => Some(Self::CharPrint),
            NativeEvent::Close | NativeEvent::Destroy => Some(Self::Close),
            NativeEvent::Other(_) => None,
        }
    }
}

/// `(window, x, y, mode)`
pub type MouseMoveFn = Box<dyn FnMut(&mut WindowMut<'_>, i32, i32, ModifierState)>;
/// `(window, x, y, delta, mode)`
pub type MouseScrollFn = Box<dyn FnMut(&mut WindowMut<'_>, i32, i32, i32, ModifierState)>;
/// `(window, x, y, button_index, mode)`
pub type MouseButtonFn = Box<dyn FnMut(&mut WindowMut<'_>, i32, i32, u32, ModifierState)>;
/// `(window, key_code, is_alt_chord)`
pub type KeyFn = Box<dyn FnMut(&mut WindowMut<'_>, i32, bool)>;
/// `(window, char_code, is_alt_chord)`
pub type CharFn = Box<dyn FnMut(&mut WindowMut<'_>, u32, bool)>;
/// `(window)`
pub type CloseFn = Box<dyn FnMut(&mut WindowMut<'_>)>;

/// Optional callbacks for one window
#[derive(Default)]
pub struct EventDispatchTable {
    mouse_move: Option<MouseMoveFn>,
    mouse_scroll: Option<MouseScrollFn>,
    mouse_button_down: Option<MouseButtonFn>,
    mouse_button_up: Option<MouseButtonFn>,
    key_down: Option<KeyFn>,
    key_up: Option<KeyFn>,
    char_print: Option<CharFn>,
    close: Option<CloseFn>,
}

impl EventDispatchTable {
    /// Create a table with every slot unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mouse-move callback
    pub fn on_mouse_move(&mut self, f: impl FnMut(&mut WindowMut<'_>, i32, i32, ModifierState) + 'static) -> &mut Self {
        self.mouse_move = Some(Box::new(f));
        self
    }

    /// Set the mouse-scroll callback
    pub fn on_mouse_scroll(
        &mut self,
        f: impl FnMut(&mut WindowMut<'_>, i32, i32, i32, ModifierState) + 'static,
    ) -> &mut Self {
        self.mouse_scroll = Some(Box::new(f));
        self
    }

    /// Set the mouse-button-down callback
    pub fn on_mouse_button_down(
        &mut self,
        f: impl FnMut(&mut WindowMut<'_>, i32, i32, u32, ModifierState) + 'static,
    ) -> &mut Self {
        self.mouse_button_down = Some(Box::new(f));
        self
    }

    /// Set the mouse-button-up callback
    pub fn on_mouse_button_up(
        &mut self,
        f: impl FnMut(&mut WindowMut<'_>, i32, i32, u32, ModifierState) + 'static,
    ) -> &mut Self {
        self.mouse_button_up = Some(Box::new(f));
        self
    }

    /// Set the key-down callback
    pub fn on_key_down(&mut self, f: impl FnMut(&mut WindowMut<'_>, i32, bool) + 'static) -> &mut Self {
        self.key_down = Some(Box::new(f));
        self
    }

    /// Set the key-up callback
    pub fn on_key_up(&mut self, f: impl FnMut(&mut WindowMut<'_>, i32, bool) + 'static) -> &mut Self {
        self.key_up = Some(Box::new(f));
        self
    }

    /// Set the text-input callback
    pub fn on_char_print(&mut self, f: impl FnMut(&mut WindowMut<'_>, u32, bool) + 'static) -> &mut Self {
        self.char_print = Some(Box::new(f));
        self
    }

    /// Set the close callback
    pub fn on_close(&mut self, f: impl FnMut(&mut WindowMut<'_>) + 'static) -> &mut Self {
        self.close = Some(Box::new(f));
        self
    }

    /// Unset the callback for `kind`
    pub fn clear(&mut self, kind: EventKind) -> &mut Self {
        match kind {
            EventKind::MouseMove => self.mouse_move = None,
            EventKind::MouseScroll => self.mouse_scroll = None,
            EventKind::MouseButtonDown => self.mouse_button_down = None,
            EventKind::MouseButtonUp => self.mouse_button_up = None,
            EventKind::KeyDown => self.key_down = None,
            EventKind::KeyUp => self.key_up = None,
            EventKind::CharPrint => self.char_print = None,
            EventKind::Close => self.close = None,
        }
        self
    }

    /// Unset every callback
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Whether a callback is registered for `kind`
    pub fn is_set(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::MouseMove => self.mouse_move.is_some(),
            EventKind::MouseScroll => self.mouse_scroll.is_some(),
            EventKind::MouseButtonDown => self.mouse_button_down.is_some(),
            EventKind::MouseButtonUp => self.mouse_button_up.is_some(),
            EventKind::KeyDown => self.key_down.is_some(),
            EventKind::KeyUp => self.key_up.is_some(),
            EventKind::CharPrint => self.char_print.is_some(),
            EventKind::Close => self.close.is_some(),
        }
    }

    /// Invoke the callback matching `event`, if one is set
    ///
    /// Returns whether a callback ran.
    pub(crate) fn dispatch(&mut self, window: &mut WindowMut<'_>, event: &NativeEvent) -> bool {
        match *event {
            NativeEvent::MouseMove { x, y, mode } => invoke(&mut self.mouse_move, |f| f(window, x, y, mode)),
            NativeEvent::MouseScroll { x, y, delta, mode } => {
                invoke(&mut self.mouse_scroll, |f| f(window, x, y, delta, mode))
            }
            NativeEvent::MouseButtonDown { x, y, button, mode } => {
                invoke(&mut self.mouse_button_down, |f| f(window, x, y, button, mode))
            }
            NativeEvent::MouseButtonUp { x, y, button, mode } => {
                invoke(&mut self.mouse_button_up, |f| f(window, x, y, button, mode))
            }
            NativeEvent::KeyDown { key_code, alt } => invoke(&mut self.key_down, |f| f(window, key_code, alt)),
            NativeEvent::KeyUp { key_code, alt } => invoke(&mut self.key_up, |f| f(window, key_code, alt)),
            NativeEvent::CharPrint { char_code, alt } => {
                invoke(&mut self.char_print, |f| f(window, char_code, alt))
            }
            NativeEvent::Close | NativeEvent::Destroy => invoke(&mut self.close, |f| f(window)),
            NativeEvent::Other(_) => false,
        }
    }
}

impl std::fmt::Debug for EventDispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set: Vec<EventKind> = EventKind::ALL.into_iter().filter(|kind| self.is_set(*kind)).collect();
        f.debug_struct("EventDispatchTable").field("set", &set).finish()
    }
}

fn invoke<F: ?Sized>(slot: &mut Option<Box<F>>, call: impl FnOnce(&mut F)) -> bool {
    match slot {
        Some(callback) => {
            call(callback.as_mut());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = EventDispatchTable::new();
        assert!(EventKind::ALL.iter().all(|kind| !table.is_set(*kind)));
    }

    #[test]
    fn test_set_and_clear() {
        let mut table = EventDispatchTable::new();
        table.on_key_down(|_, _, _| {}).on_close(|_| {});
        assert!(table.is_set(EventKind::KeyDown));
        assert!(table.is_set(EventKind::Close));
        assert!(!table.is_set(EventKind::KeyUp));

        table.clear(EventKind::KeyDown);
        assert!(!table.is_set(EventKind::KeyDown));
        assert!(table.is_set(EventKind::Close));

        table.clear_all();
        assert!(!table.is_set(EventKind::Close));
    }

    #[test]
    fn test_close_and_destroy_share_a_slot() {
        assert_eq!(EventKind::of(&NativeEvent::Close), Some(EventKind::Close));
        assert_eq!(EventKind::of(&NativeEvent::Destroy), Some(EventKind::Close));
        assert_eq!(EventKind::of(&NativeEvent::Other(0x0F)), None);
    }

    #[test]
    fn test_button_bits() {
        assert_eq!(ModifierState::for_button(0), ModifierState::LEFT_BUTTON);
        assert_eq!(ModifierState::for_button(2), ModifierState::MIDDLE_BUTTON);
        assert!(ModifierState::for_button(7).is_empty());
    }
}

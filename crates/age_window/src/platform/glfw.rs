//! GLFW-based native backend
//!
//! Implements [`NativeBackend`] on top of the `glfw` crate with one OpenGL
//! context per window. GLFW owns the window class and the message queue, so
//! "registering the class" initializes the library, and the per-window
//! message queue is filled from GLFW's event receiver on every poll.
//!
//! GLFW ties the device context and the rendering context to the window
//! object itself; the separate release steps only make sure the context is
//! no longer current before the window is dropped.

use std::collections::{HashMap, VecDeque};

use glfw::{Action, Context, Modifiers, WindowEvent, WindowHint};

use crate::error::BackendError;
use crate::foundation::geometry::Rect;
use crate::window::events::ModifierState;
use crate::window::WindowDesc;

use super::backend::{
    DeviceContext, MessageStatus, NativeBackend, NativeEvent, NativeHandle, NativeMessage, NativeWindow,
    ProcAddress, RenderContext, WindowStyle,
};

/// Mouse wheel units per notch, matching the Win32 convention
const WHEEL_DELTA: f64 = 120.0;

struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    pending: VecDeque<NativeMessage>,
    mode: ModifierState,
    cursor: (i32, i32),
}

/// GLFW window backend with OpenGL contexts
pub struct GlfwBackend {
    glfw: Option<glfw::Glfw>,
    windows: HashMap<NativeHandle, GlfwWindow>,
    next_id: u64,
}

impl GlfwBackend {
    /// Create an uninitialized backend; GLFW starts on class registration
    pub fn new() -> Self {
        Self {
            glfw: None,
            windows: HashMap::new(),
            next_id: 1,
        }
    }

    fn glfw_mut(&mut self, operation: &'static str) -> Result<&mut glfw::Glfw, BackendError> {
        self.glfw
            .as_mut()
            .ok_or_else(|| BackendError::new(operation, "GLFW is not initialized"))
    }

    /// Move everything GLFW has queued into the per-window pending queues
    fn collect_events(&mut self) {
        let Some(glfw) = self.glfw.as_mut() else {
            return;
        };
        glfw.poll_events();

        for (&handle, slot) in &mut self.windows {
            let received: Vec<WindowEvent> = glfw::flush_messages(&slot.events).map(|(_, event)| event).collect();
            for event in received {
                if let Some(event) = slot.convert(event) {
                    slot.pending.push_back(NativeMessage::new(handle, event));
                }
            }
        }
    }
}

impl Default for GlfwBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GlfwWindow {
    /// Translate a GLFW event, tracking held modifiers, buttons and the cursor
    fn convert(&mut self, event: WindowEvent) -> Option<NativeEvent> {
        match event {
            WindowEvent::CursorPos(x, y) => {
                self.cursor = (x as i32, y as i32);
                Some(NativeEvent::MouseMove {
                    x: self.cursor.0,
                    y: self.cursor.1,
                    mode: self.mode,
                })
            }
            WindowEvent::Scroll(_, dy) => Some(NativeEvent::MouseScroll {
                x: self.cursor.0,
                y: self.cursor.1,
                delta: (dy * WHEEL_DELTA).round() as i32,
                mode: self.mode,
            }),
            WindowEvent::MouseButton(button, action, mods) => {
                let index = button as i32 as u32;
                self.update_modifiers(mods);
                let (x, y) = self.cursor;
                match action {
                    Action::Press => {
                        self.mode |= ModifierState::for_button(index);
                        Some(NativeEvent::MouseButtonDown {
                            x,
                            y,
                            button: index,
                            mode: self.mode,
                        })
                    }
                    Action::Release => {
                        self.mode -= ModifierState::for_button(index);
                        Some(NativeEvent::MouseButtonUp {
                            x,
                            y,
                            button: index,
                            mode: self.mode,
                        })
                    }
                    Action::Repeat => None,
                }
            }
            WindowEvent::Key(key, _, action, mods) => {
                self.update_modifiers(mods);
                let key_code = key as i32;
                let alt = mods.contains(Modifiers::Alt);
                match action {
                    Action::Press | Action::Repeat => Some(NativeEvent::KeyDown { key_code, alt }),
                    Action::Release => Some(NativeEvent::KeyUp { key_code, alt }),
                }
            }
            WindowEvent::Char(c) => Some(NativeEvent::CharPrint {
                char_code: u32::from(c),
                alt: self.mode.contains(ModifierState::ALT),
            }),
            WindowEvent::Close => Some(NativeEvent::Close),
            _ => None,
        }
    }

    fn update_modifiers(&mut self, mods: Modifiers) {
        self.mode.set(ModifierState::SHIFT, mods.contains(Modifiers::Shift));
        self.mode.set(ModifierState::CONTROL, mods.contains(Modifiers::Control));
        self.mode.set(ModifierState::ALT, mods.contains(Modifiers::Alt));
        self.mode.set(ModifierState::SUPER, mods.contains(Modifiers::Super));
    }

    fn frame(&self) -> (i32, i32, i32, i32) {
        if self.window.is_decorated() {
            self.window.get_frame_size()
        } else {
            (0, 0, 0, 0)
        }
    }
}

fn to_u32(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl NativeBackend for GlfwBackend {
    fn register_window_class(&mut self) -> Result<(), BackendError> {
        if self.glfw.is_some() {
            return Ok(());
        }
        let glfw = glfw::init(glfw::fail_on_errors).map_err(|e| BackendError::new("glfwInit", format!("{e:?}")))?;
        log::info!("GLFW {} initialized", glfw::get_version_string());
        self.glfw = Some(glfw);
        Ok(())
    }

    fn create_window(&mut self, desc: &WindowDesc) -> Result<NativeWindow, BackendError> {
        let glfw = self.glfw_mut("glfwCreateWindow")?;

        let (major, minor) = desc.context.version;
        glfw.default_window_hints();
        glfw.window_hint(WindowHint::Visible(false));
        glfw.window_hint(WindowHint::ContextVersion(major, minor));
        if (major, minor) >= (3, 2) {
            let profile = if desc.context.core_profile {
                glfw::OpenGlProfileHint::Core
            } else {
                glfw::OpenGlProfileHint::Compat
            };
            glfw.window_hint(WindowHint::OpenGlProfile(profile));
            glfw.window_hint(WindowHint::OpenGlForwardCompat(
                desc.context.core_profile && cfg!(target_os = "macos"),
            ));
        }
        glfw.window_hint(WindowHint::OpenGlDebugContext(desc.context.debug));

        let (mut window, events) = glfw
            .create_window(desc.width, desc.height, &desc.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                BackendError::new("glfwCreateWindow", format!("no context for OpenGL {major}.{minor}"))
            })?;

        window.set_pos(desc.x, desc.y);
        window.set_key_polling(true);
        window.set_char_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);
        window.set_close_polling(true);

        let id = self.next_id;
        self.next_id += 1;
        let handle = NativeHandle(id);

        self.windows.insert(
            handle,
            GlfwWindow {
                window,
                events,
                pending: VecDeque::new(),
                mode: ModifierState::empty(),
                cursor: (0, 0),
            },
        );

        Ok(NativeWindow {
            handle,
            device_context: DeviceContext(id),
            render_context: RenderContext(id),
        })
    }

    fn release_render_context(&mut self, window: &NativeWindow) {
        if let Some(slot) = self.windows.get(&window.handle) {
            if slot.window.is_current() {
                glfw::make_context_current(None);
            }
        }
        log::trace!("Released rendering context of {:?}", window.handle);
    }

    fn release_device_context(&mut self, window: &NativeWindow) {
        log::trace!("Released device context of {:?}", window.handle);
    }

    fn destroy_window(&mut self, handle: NativeHandle) {
        // Dropping the PWindow destroys the native window.
        self.windows.remove(&handle);
    }

    fn set_visible(&mut self, handle: NativeHandle, visible: bool) {
        if let Some(slot) = self.windows.get_mut(&handle) {
            if visible {
                slot.window.show();
            } else {
                slot.window.hide();
            }
        }
    }

    fn style(&self, handle: NativeHandle) -> WindowStyle {
        let Some(slot) = self.windows.get(&handle) else {
            return WindowStyle::empty();
        };
        let mut style = WindowStyle::empty();
        style.set(WindowStyle::DECORATED, slot.window.is_decorated());
        style.set(WindowStyle::RESIZABLE, slot.window.is_resizable());
        style.set(WindowStyle::TOPMOST, slot.window.is_floating());
        style.set(WindowStyle::VISIBLE, slot.window.is_visible());
        style
    }

    fn set_style(&mut self, handle: NativeHandle, style: WindowStyle) {
        if let Some(slot) = self.windows.get_mut(&handle) {
            slot.window.set_decorated(style.contains(WindowStyle::DECORATED));
            slot.window.set_resizable(style.contains(WindowStyle::RESIZABLE));
            slot.window.set_floating(style.contains(WindowStyle::TOPMOST));
        }
    }

    fn outer_rect(&self, handle: NativeHandle) -> Rect {
        let Some(slot) = self.windows.get(&handle) else {
            return Rect::default();
        };
        let (x, y) = slot.window.get_pos();
        let (width, height) = slot.window.get_size();
        let (left, top, right, bottom) = slot.frame();
        Rect::new(x - left, y - top, to_u32(width + left + right), to_u32(height + top + bottom))
    }

    fn client_rect(&self, handle: NativeHandle) -> Rect {
        let Some(slot) = self.windows.get(&handle) else {
            return Rect::default();
        };
        let (x, y) = slot.window.get_pos();
        let (width, height) = slot.window.get_size();
        Rect::new(x, y, to_u32(width), to_u32(height))
    }

    fn set_outer_rect(&mut self, handle: NativeHandle, rect: Rect) {
        let Some(slot) = self.windows.get_mut(&handle) else {
            return;
        };
        let (left, top, right, bottom) = slot.frame();
        slot.window.set_pos(rect.x + left, rect.y + top);
        slot.window.set_size(
            (to_i32(rect.width) - left - right).max(1),
            (to_i32(rect.height) - top - bottom).max(1),
        );
    }

    fn is_maximized(&self, handle: NativeHandle) -> bool {
        self.windows.get(&handle).is_some_and(|slot| slot.window.is_maximized())
    }

    fn set_maximized(&mut self, handle: NativeHandle, maximized: bool) {
        if let Some(slot) = self.windows.get_mut(&handle) {
            if maximized {
                slot.window.maximize();
            } else {
                slot.window.restore();
            }
        }
    }

    fn monitor_rect(&mut self, handle: NativeHandle) -> Rect {
        let window_rect = self.outer_rect(handle);
        let Some(glfw) = self.glfw.as_mut() else {
            return window_rect;
        };

        // GLFW has no MonitorFromWindow; pick the monitor with the largest
        // overlap, falling back to the primary one.
        glfw.with_connected_monitors(|_, monitors| {
            let rects: Vec<Rect> = monitors
                .iter()
                .filter_map(|monitor| {
                    let (x, y) = monitor.get_pos();
                    monitor
                        .get_video_mode()
                        .map(|mode| Rect::new(x, y, mode.width, mode.height))
                })
                .collect();

            rects
                .iter()
                .copied()
                .max_by_key(|rect| rect.overlap_area(&window_rect))
                .filter(|rect| rect.overlap_area(&window_rect) > 0)
                .or_else(|| rects.first().copied())
                .unwrap_or(window_rect)
        })
    }

    fn set_title(&mut self, handle: NativeHandle, title: &str) {
        if let Some(slot) = self.windows.get_mut(&handle) {
            slot.window.set_title(title);
        }
    }

    fn request_close(&mut self, handle: NativeHandle) {
        if let Some(slot) = self.windows.get_mut(&handle) {
            slot.window.set_should_close(true);
            slot.pending.push_back(NativeMessage::new(handle, NativeEvent::Close));
        }
    }

    fn peek_message(&mut self, handle: NativeHandle) -> bool {
        let has_pending = |backend: &Self| backend.windows.get(&handle).is_some_and(|slot| !slot.pending.is_empty());
        if !has_pending(self) {
            self.collect_events();
        }
        has_pending(self)
    }

    fn get_message(&mut self, handle: NativeHandle) -> MessageStatus {
        match self.windows.get_mut(&handle) {
            Some(slot) => slot.pending.pop_front().map_or_else(
                || MessageStatus::Failed(BackendError::new("GetMessage", "no pending message")),
                MessageStatus::Message,
            ),
            None => MessageStatus::Quit,
        }
    }

    fn translate_message(&mut self, message: &NativeMessage) {
        // GLFW already reports text input as separate Char events.
        log::trace!("{:?}: {:?}", message.window, message.event);
    }

    fn dispatch_message(&mut self, _message: &NativeMessage) {}

    fn make_current(&mut self, window: Option<&NativeWindow>) -> Result<(), BackendError> {
        let Some(window) = window else {
            glfw::make_context_current(None);
            return Ok(());
        };
        let slot = self
            .windows
            .get_mut(&window.handle)
            .ok_or_else(|| BackendError::new("glfwMakeContextCurrent", "unknown window"))?;
        slot.window.make_current();
        if slot.window.is_current() {
            Ok(())
        } else {
            Err(BackendError::new("glfwMakeContextCurrent", "context did not become current"))
        }
    }

    fn proc_address(&mut self, window: &NativeWindow, name: &str) -> ProcAddress {
        self.windows
            .get_mut(&window.handle)
            .map_or(std::ptr::null(), |slot| slot.window.get_proc_address(name))
    }

    fn swap_buffers(&mut self, window: &NativeWindow) -> Result<(), BackendError> {
        let slot = self
            .windows
            .get_mut(&window.handle)
            .ok_or_else(|| BackendError::new("glfwSwapBuffers", "unknown window"))?;
        slot.window.swap_buffers();
        Ok(())
    }
}

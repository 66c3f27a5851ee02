//! Rendering context binding
//!
//! Each window owns one native rendering context. At most one of them is
//! current at a time, tracked by the [`ContextRegister`] of the owning
//! [`Platform`]. The register is a single global fact rather than a
//! thread-local one; callers that touch contexts from several threads must
//! coordinate externally, and doing so is unsupported.
//!
//! The graphics API behind the context is an external collaborator. The
//! only thing the windowing core asks of it is to resolve its function
//! pointers once per context, through the [`GraphicsDevice`] trait.

use std::collections::HashMap;

use crate::error::{WindowError, WindowResult};
use crate::foundation::collections::WindowId;
use crate::platform::backend::{NativeBackend, ProcAddress};
use crate::platform::Platform;

/// Which window's rendering context is current
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContextRegister {
    current: Option<WindowId>,
}

impl ContextRegister {
    /// Window holding the current context
    pub fn current(&self) -> Option<WindowId> {
        self.current
    }

    /// Whether `id` holds the current context
    pub fn is_current(&self, id: WindowId) -> bool {
        self.current == Some(id)
    }

    pub(crate) fn set(&mut self, id: WindowId) {
        self.current = Some(id);
    }

    pub(crate) fn clear(&mut self) {
        self.current = None;
    }
}

/// Graphics API entry-point loader
///
/// Called once per rendering context, right after it first becomes current.
pub trait GraphicsDevice {
    /// Resolve the API's function pointers through `loader`
    ///
    /// `loader` returns `None` for names the context does not export.
    fn resolve_functions(&mut self, loader: &mut dyn FnMut(&str) -> Option<ProcAddress>) -> Result<(), String>;
}

/// Device that needs no function pointers
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDevice;

impl GraphicsDevice for NullDevice {
    fn resolve_functions(&mut self, _loader: &mut dyn FnMut(&str) -> Option<ProcAddress>) -> Result<(), String> {
        Ok(())
    }
}

/// Device that resolves a fixed list of required entry points
///
/// Resolution fails if any name is missing. The table describes the context
/// that resolved most recently; each resolution starts from an empty table.
#[derive(Debug, Default, Clone)]
pub struct ProcTable {
    required: Vec<String>,
    resolved: HashMap<String, ProcAddress>,
}

impl ProcTable {
    /// Table requiring every name in `names`
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: names.into_iter().map(Into::into).collect(),
            resolved: HashMap::new(),
        }
    }

    /// Address resolved for `name`
    pub fn get(&self, name: &str) -> Option<ProcAddress> {
        self.resolved.get(name).copied()
    }

    /// Number of resolved entry points
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Whether nothing has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

impl GraphicsDevice for ProcTable {
    fn resolve_functions(&mut self, loader: &mut dyn FnMut(&str) -> Option<ProcAddress>) -> Result<(), String> {
        self.resolved.clear();
        let mut missing = Vec::new();
        for name in &self.required {
            match loader(name) {
                Some(address) => {
                    self.resolved.insert(name.clone(), address);
                }
                None => missing.push(name.as_str()),
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("missing entry points: {}", missing.join(", ")))
        }
    }
}

impl<B: NativeBackend> Platform<B> {
    /// Make the window's rendering context current on the calling thread
    ///
    /// Already current is a no-op success. Otherwise the context is attached,
    /// the register updated, and the graphics device resolves its functions
    /// if this context has not done so successfully before. An attach
    /// failure leaves the register untouched; a resolution failure leaves the
    /// context attached and is retried on the next attach.
    pub fn make_current(&mut self, id: WindowId) -> WindowResult<()> {
        if self.context.is_current(id) {
            return Ok(());
        }

        let entry = self.windows.get_mut(id).ok_or(WindowError::UnknownWindow(id))?;
        let native = *entry.state.native();

        self.backend.make_current(Some(&native)).map_err(|e| {
            log::warn!("Failed to make context of {id:?} current: {e}");
            WindowError::Context(e.to_string())
        })?;
        self.context.set(id);
        log::debug!("Context of {id:?} is now current");

        if !entry.state.functions_resolved() {
            let backend = &mut self.backend;
            let mut loader = |name: &str| {
                let address = backend.proc_address(&native, name);
                (!address.is_null()).then_some(address)
            };

            self.device.resolve_functions(&mut loader).map_err(|e| {
                log::warn!("Function resolution for {id:?} failed: {e}");
                WindowError::Context(e)
            })?;

            entry.state.set_functions_resolved(true);
            log::debug!("Resolved graphics functions for {id:?}");
        }

        Ok(())
    }

    /// Detach whatever context is current from the calling thread
    pub fn clear_current(&mut self) -> WindowResult<()> {
        self.backend
            .make_current(None)
            .map_err(|e| WindowError::Context(e.to_string()))?;
        self.context.clear();
        Ok(())
    }

    /// Window whose context is current
    pub fn current_window(&self) -> Option<WindowId> {
        self.context.current()
    }

    /// Present the window's back buffer
    pub fn swap_buffers(&mut self, id: WindowId) -> WindowResult<()> {
        let native = *self.window(id)?.native();
        self.backend.swap_buffers(&native).map_err(|e| {
            log::warn!("Present failed for {id:?}: {e}");
            WindowError::Present(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_register_set_and_clear() {
        let mut ids: slotmap::SlotMap<WindowId, ()> = slotmap::SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let mut register = ContextRegister::default();
        assert_eq!(register.current(), None);

        register.set(a);
        assert!(register.is_current(a));
        assert!(!register.is_current(b));

        register.clear();
        assert_eq!(register.current(), None);
    }

    #[test]
    fn test_proc_table_reports_missing() {
        let mut table = ProcTable::new(["glClear", "glViewport"]);
        let mut loader = |name: &str| (name == "glClear").then_some(0x10usize as ProcAddress);

        let err = table.resolve_functions(&mut loader).unwrap_err();
        assert_eq!(err, "missing entry points: glViewport");
        assert!(table.get("glClear").is_some());
        assert!(table.get("glViewport").is_none());
    }

    #[test]
    fn test_proc_table_forgets_previous_context() {
        let mut table = ProcTable::new(["glClear", "glViewport"]);
        let mut first = |_: &str| Some(0x10usize as ProcAddress);
        table.resolve_functions(&mut first).unwrap();
        assert_eq!(table.len(), 2);

        let mut second = |name: &str| (name == "glClear").then_some(0x20usize as ProcAddress);
        assert!(table.resolve_functions(&mut second).is_err());
        assert_eq!(table.get("glClear"), Some(0x20usize as ProcAddress));
        assert!(table.get("glViewport").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_null_device_ignores_loader() {
        let mut calls = 0;
        let mut loader = |_: &str| {
            calls += 1;
            Some(ptr::null::<std::ffi::c_void>())
        };
        assert!(NullDevice.resolve_functions(&mut loader).is_ok());
        assert_eq!(calls, 0);
    }
}

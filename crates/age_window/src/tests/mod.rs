//! Scenario tests driving the platform through [`MockBackend`]

mod context_tests;
mod window_tests;

use std::cell::Cell;
use std::rc::Rc;

use crate::context::GraphicsDevice;
use crate::foundation::collections::WindowId;
use crate::foundation::logging;
use crate::platform::backend::{NativeHandle, ProcAddress};
use crate::platform::mock::MockBackend;
use crate::platform::Platform;

pub(crate) fn platform() -> Platform<MockBackend> {
    platform_over(MockBackend::new())
}

pub(crate) fn platform_over(backend: MockBackend) -> Platform<MockBackend> {
    logging::init_for_tests();
    Platform::initialize(backend).unwrap()
}

/// Platform with one hidden 800x600 window at (100, 100)
pub(crate) fn platform_with_window() -> (Platform<MockBackend>, WindowId) {
    let mut platform = platform();
    let id = platform.create_window("test", 100, 100, 800, 600).unwrap();
    (platform, id)
}

pub(crate) fn handle_of(platform: &Platform<MockBackend>, id: WindowId) -> NativeHandle {
    platform.window(id).unwrap().handle()
}

/// Shared counter for observing callbacks from outside the dispatch table
pub(crate) fn counter() -> Rc<Cell<u32>> {
    Rc::new(Cell::new(0))
}

/// Device that counts resolution attempts and requires a fixed set of names
pub(crate) struct CountingDevice {
    pub(crate) names: Vec<&'static str>,
    pub(crate) attempts: Rc<Cell<u32>>,
}

impl GraphicsDevice for CountingDevice {
    fn resolve_functions(&mut self, loader: &mut dyn FnMut(&str) -> Option<ProcAddress>) -> Result<(), String> {
        self.attempts.set(self.attempts.get() + 1);
        let missing: Vec<&str> = self.names.iter().copied().filter(|name| loader(name).is_none()).collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("unresolved: {}", missing.join(", ")))
        }
    }
}

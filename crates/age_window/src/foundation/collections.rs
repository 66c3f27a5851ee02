//! Handle-keyed collections used for window bookkeeping

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable identifier of a window owned by a [`Platform`](crate::Platform)
    ///
    /// Ids are never reused while the platform lives, so a stale id held by
    /// application code is detected instead of aliasing a newer window.
    pub struct WindowId;
}

/// Slot map keyed by [`WindowId`]
pub type WindowMap<T> = SlotMap<WindowId, T>;

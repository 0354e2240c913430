//! Opaque handles for host-owned UI resources.
//!
//! The host windowing layer owns the actual widgets and menus; choosers only
//! ever see these handles. Widget handles are generational slotmap keys, so a
//! handle kept across a close/reopen cycle never aliases the new widget: the
//! raw index may be reused but the generation will not match.

use slotmap::{KeyData, new_key_type};

new_key_type! {
    /// Identifier of a host widget.
    ///
    /// Generational: comparing a stale handle against a live one is always
    /// `false`, even if the host reused the underlying slot.
    pub struct WidgetId;
}

impl WidgetId {
    /// Converts the handle to a raw `u64` for logging or host ABIs.
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Reconstructs a handle from a raw `u64` previously produced by
    /// [`as_raw`](Self::as_raw).
    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

/// Identifier of a popup menu while the host is assembling it.
///
/// Only meaningful for the duration of one popup-construction callback; hosts
/// are free to reuse values afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupMenuId(u64);

impl PopupMenuId {
    /// Wraps a raw host menu handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host menu handle.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

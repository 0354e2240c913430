//! Script-watchdog suspension.
//!
//! Hosts that embed a scripting runtime usually run a watchdog that interrupts
//! scripts after a while. A modal chooser blocks the calling script for as
//! long as the user cares to browse, which the watchdog would misread as a
//! hang. [`TimeoutSuspension`] scopes the fix: disable the watchdog on entry,
//! restore the previous setting exactly once on drop, unwinding included.

use crate::logging::targets;

/// Snapshot of a host's script-timeout setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutValue(u64);

impl TimeoutValue {
    /// The watchdog is off.
    pub const DISABLED: TimeoutValue = TimeoutValue(0);

    /// Wraps a raw host timeout value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host timeout value.
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// Whether this setting disables the watchdog.
    pub const fn is_disabled(self) -> bool {
        self.0 == TimeoutValue::DISABLED.0
    }
}

/// Access to the host's script watchdog.
///
/// Hosts without a watchdog can rely on the default no-op methods.
pub trait ScriptTimeout {
    /// Disables the watchdog and returns the setting that was in effect.
    fn suspend_timeout(&self) -> TimeoutValue {
        TimeoutValue::DISABLED
    }

    /// Restores a setting previously returned by
    /// [`suspend_timeout`](Self::suspend_timeout).
    fn restore_timeout(&self, _previous: TimeoutValue) {}
}

/// Guard that keeps the script watchdog suspended for its lifetime.
///
/// The previous setting is captured on construction and restored on drop.
/// Drop glue runs on unwind too, so the watchdog comes back even when the
/// guarded call panics or errors out.
pub struct TimeoutSuspension<'a, H: ScriptTimeout + ?Sized> {
    host: &'a H,
    previous: TimeoutValue,
}

impl<'a, H: ScriptTimeout + ?Sized> TimeoutSuspension<'a, H> {
    /// Suspends the watchdog until the returned guard is dropped.
    pub fn new(host: &'a H) -> Self {
        let previous = host.suspend_timeout();
        tracing::trace!(
            target: targets::TIMEOUT,
            previous = previous.as_raw(),
            "script timeout suspended"
        );
        Self { host, previous }
    }

    /// The setting that will be restored on drop.
    pub fn previous(&self) -> TimeoutValue {
        self.previous
    }
}

impl<H: ScriptTimeout + ?Sized> Drop for TimeoutSuspension<'_, H> {
    fn drop(&mut self) {
        self.host.restore_timeout(self.previous);
        tracing::trace!(
            target: targets::TIMEOUT,
            restored = self.previous.as_raw(),
            "script timeout restored"
        );
    }
}

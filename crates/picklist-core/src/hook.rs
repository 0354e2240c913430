//! Host-wide popup hook registry.
//!
//! Hosts announce context-menu construction through a single broadcast point:
//! every registered [`PopupHook`] is told which widget the menu belongs to and
//! which menu is being assembled. Listeners that only care about one widget
//! (choosers do) filter on the widget handle themselves.
//!
//! Registration returns a [`HookId`]; dropping interest is an explicit
//! [`unregister`](PopupHookRegistry::unregister). Like widget handles, hook
//! ids are generational, so unregistering twice is a harmless no-op.

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};
use static_assertions::assert_impl_all;

use crate::handle::{PopupMenuId, WidgetId};
use crate::logging::targets;

new_key_type! {
    /// Identifier of one hook registration.
    pub struct HookId;
}

/// Receiver for popup-construction events.
///
/// Implementations must be cheap and re-entrant safe: the registry invokes
/// hooks outside its own lock, so a hook may register or unregister other
/// hooks while running.
pub trait PopupHook: Send + Sync {
    /// Called while the host assembles the context menu `menu` for `widget`.
    fn populating_popup(&self, widget: WidgetId, menu: PopupMenuId);
}

/// Registry of live popup hooks.
///
/// Delivery order is unspecified. Hooks registered during a delivery are not
/// seen by that delivery.
pub struct PopupHookRegistry {
    hooks: Mutex<SlotMap<HookId, Arc<dyn PopupHook>>>,
}

impl PopupHookRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            hooks: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Registers a hook and returns its id.
    pub fn register(&self, hook: Arc<dyn PopupHook>) -> HookId {
        let id = self.hooks.lock().insert(hook);
        tracing::trace!(target: targets::HOOK, hook = ?id, "popup hook registered");
        id
    }

    /// Removes a hook registration.
    ///
    /// Returns `false` if the id was already unregistered.
    pub fn unregister(&self, id: HookId) -> bool {
        let removed = self.hooks.lock().remove(id).is_some();
        if removed {
            tracing::trace!(target: targets::HOOK, hook = ?id, "popup hook unregistered");
        }
        removed
    }

    /// Broadcasts a popup-construction event to every registered hook.
    pub fn deliver(&self, widget: WidgetId, menu: PopupMenuId) {
        // Snapshot under the lock, invoke outside it.
        let hooks: Vec<Arc<dyn PopupHook>> = self.hooks.lock().values().cloned().collect();
        for hook in hooks {
            hook.populating_popup(widget, menu);
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.hooks.lock().len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.lock().is_empty()
    }
}

impl Default for PopupHookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PopupHookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupHookRegistry")
            .field("hooks", &self.len())
            .finish()
    }
}

assert_impl_all!(PopupHookRegistry: Send, Sync);

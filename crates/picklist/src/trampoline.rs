//! Popup-menu event routing for a single chooser.
//!
//! The host broadcasts popup construction to every registered hook; each
//! chooser narrows that firehose down to its own widget. The trampoline holds
//! only a weak reference to its session: the session owns the registration
//! (through [`HookGuard`]), and a strong reference here would form a cycle
//! that kept both alive past close.

use std::sync::{Arc, Weak};

use picklist_core::{HookId, PopupHook, PopupMenuId, WidgetId};

use crate::host::WindowHost;
use crate::session::ChooserSession;

/// Routes host-wide popup events to one chooser session.
pub(crate) struct PopupTrampoline {
    session: Weak<ChooserSession>,
}

impl PopupTrampoline {
    pub(crate) fn new(session: &Arc<ChooserSession>) -> Arc<Self> {
        Arc::new(Self {
            session: Arc::downgrade(session),
        })
    }
}

impl PopupHook for PopupTrampoline {
    fn populating_popup(&self, widget: WidgetId, menu: PopupMenuId) {
        let Some(session) = self.session.upgrade() else {
            tracing::trace!(
                target: "picklist::trampoline",
                widget = widget.as_raw(),
                "popup event for a dropped session"
            );
            return;
        };
        // Events for other widgets are someone else's; a session whose widget
        // is already detached matches nothing.
        if session.widget() == Some(widget) {
            session.notify_popup(widget, menu);
        }
    }
}

/// Owns one popup hook registration and unregisters it exactly once.
pub(crate) struct HookGuard {
    host: Arc<dyn WindowHost>,
    id: Option<HookId>,
}

impl HookGuard {
    /// Registers a trampoline for `session` with the host.
    pub(crate) fn install(host: Arc<dyn WindowHost>, session: &Arc<ChooserSession>) -> Self {
        let id = host.register_popup_hook(PopupTrampoline::new(session));
        tracing::trace!(
            target: "picklist::trampoline",
            hook = ?id,
            title = session.spec().title(),
            "popup trampoline installed"
        );
        Self {
            host,
            id: Some(id),
        }
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.host.unregister_popup_hook(id);
            tracing::trace!(
                target: "picklist::trampoline",
                hook = ?id,
                "popup trampoline removed"
            );
        }
    }
}

//! The windowing services a chooser consumes.
//!
//! Everything a chooser knows about its surroundings goes through
//! [`WindowHost`]. A host owns the real widgets, runs modal loops, keeps the
//! registry of open non-modal choosers, and broadcasts popup-menu
//! construction. The crate ships no host; applications implement one over
//! their UI layer, and tests implement headless ones.

use std::sync::Arc;

use picklist_core::{HookId, HostResult, PopupHook, ScriptTimeout, WidgetId};

use crate::session::ChooserSession;

/// Reply from [`WindowHost::open_or_activate`].
///
/// The first three variants answer a modal open, the last two a non-modal
/// one. Replying across modes is a protocol violation the controller reports
/// as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenReply {
    /// Modal: the user accepted the given row.
    Chosen(usize),
    /// Modal: the user dismissed the dialog without choosing.
    NoSelection,
    /// Modal: the chooser had no rows, nothing was displayed.
    Empty,
    /// Non-modal: the chooser window is open (or an existing one was brought
    /// to the front under the force-default flag).
    Opened,
    /// Non-modal: a live chooser with the same identity already exists.
    AlreadyExists,
}

/// Backing object for a chooser embedded in a host form.
///
/// Host form systems that composite child controls get one of these from
/// [`WindowHost::create_embedded_backing`]; its concrete type is the host's
/// business.
pub trait EmbeddedBacking: Send {
    /// The embedded widget this object backs.
    fn widget(&self) -> WidgetId;
}

/// A host windowing backend.
///
/// # Contract
///
/// For `open_or_activate` the host must:
///
/// - call [`ChooserSession::initialize`] before the first populate;
/// - call [`ChooserSession::attach_widget`] as soon as the widget exists;
/// - populate from [`ChooserSession::row_count`] and
///   [`ChooserSession::render_row`];
/// - for a modal session (flags contain
///   [`MODAL`](crate::flags::ChooserFlags::MODAL)), block until the user
///   picks or dismisses and reply [`Chosen`](OpenReply::Chosen),
///   [`NoSelection`](OpenReply::NoSelection), or [`Empty`](OpenReply::Empty)
///   when there were no rows to show;
/// - for a non-modal session, dedup on [`ChooserSession::identity`] against
///   its table of open choosers and reply [`Opened`](OpenReply::Opened) or
///   [`AlreadyExists`](OpenReply::AlreadyExists) without blocking;
/// - call [`ChooserSession::notify_closed`] when the widget goes away.
///
/// Hosts without a script watchdog inherit the no-op [`ScriptTimeout`]
/// methods.
pub trait WindowHost: ScriptTimeout + Send + Sync {
    /// Opens a chooser, or for a non-modal duplicate refuses or reactivates.
    fn open_or_activate(&self, session: &Arc<ChooserSession>) -> HostResult<OpenReply>;

    /// Brings an open chooser window to the front.
    fn activate(&self, widget: WidgetId) -> HostResult<()>;

    /// Repopulates an open chooser from its session.
    fn refresh(&self, widget: WidgetId) -> HostResult<()>;

    /// Closes a chooser widget. Closing an already-gone widget is a no-op.
    fn close(&self, widget: WidgetId);

    /// Creates an embedded chooser widget inside the current form.
    fn create_embedded(&self, session: &Arc<ChooserSession>) -> HostResult<WidgetId>;

    /// Creates an embedded chooser wrapped in the host's backing object.
    fn create_embedded_backing(
        &self,
        session: &Arc<ChooserSession>,
    ) -> HostResult<Box<dyn EmbeddedBacking>>;

    /// Registers a receiver for popup-menu construction events.
    fn register_popup_hook(&self, hook: Arc<dyn PopupHook>) -> HookId;

    /// Removes a popup hook registration.
    fn unregister_popup_hook(&self, hook: HookId);
}

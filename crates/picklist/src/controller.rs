//! Chooser lifecycle: show, embed, activate, refresh, close.
//!
//! A [`ChooserController`] drives one chooser through one display cycle:
//!
//! ```text
//! Unshown ──show_modal()──────────────▶ Closed
//! Unshown ──show()───▶ NonModalActive ──close()──▶ Closed
//! Unshown ──embed()──▶ Embedded
//! Unshown ──close()───────────────────▶ Closed
//! ```
//!
//! Controllers are single-shot: create one per showing. Modal display blocks
//! inside [`show_modal`](ChooserController::show_modal) and tears down before
//! returning; non-modal display stays live until [`close`] or until the host
//! reports the widget gone; embedded display belongs to the containing form
//! and [`close`] leaves it alone.
//!
//! [`close`]: ChooserController::close

use std::sync::Arc;

use picklist_core::{HostError, ModalOutcome, NonModalOutcome, TimeoutSuspension, WidgetId};
use static_assertions::assert_impl_all;

use crate::error::ChooserError;
use crate::flags::ChooserFlags;
use crate::host::{EmbeddedBacking, OpenReply, WindowHost};
use crate::model::ChooserModel;
use crate::session::ChooserSession;
use crate::spec::ChooserSpec;
use crate::trampoline::HookGuard;

/// Lifecycle state of a [`ChooserController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Created, not yet displayed.
    #[default]
    Unshown,
    /// Blocking inside the host's modal loop.
    ModalActive,
    /// A non-modal window is open.
    NonModalActive,
    /// An embedded widget exists inside a host form.
    Embedded,
    /// Torn down; the controller is spent.
    Closed,
}

/// Drives one chooser through its display lifecycle.
pub struct ChooserController {
    spec: Arc<ChooserSpec>,
    model: Arc<dyn ChooserModel>,
    host: Arc<dyn WindowHost>,
    session: Option<Arc<ChooserSession>>,
    state: ControllerState,
}

impl ChooserController {
    /// Creates a controller for one showing of `spec` over `model`.
    pub fn new(spec: ChooserSpec, model: Arc<dyn ChooserModel>, host: Arc<dyn WindowHost>) -> Self {
        Self {
            spec: Arc::new(spec),
            model,
            host,
            session: None,
            state: ControllerState::Unshown,
        }
    }

    /// The chooser description this controller displays.
    pub fn spec(&self) -> &ChooserSpec {
        &self.spec
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The live session, once there is one.
    pub fn session(&self) -> Option<&Arc<ChooserSession>> {
        self.session.as_ref()
    }

    /// The live widget handle, if any.
    pub fn widget(&self) -> Option<WidgetId> {
        self.session.as_ref().and_then(|session| session.widget())
    }

    /// Shows the chooser modally and blocks until the user picks or
    /// dismisses.
    ///
    /// The host's script watchdog is suspended for the duration and restored
    /// exactly once, host failures included. The chooser is torn down before
    /// this returns, whatever the outcome.
    pub fn show_modal(&mut self) -> Result<ModalOutcome, ChooserError> {
        self.ensure_showable()?;
        let session = self.open_session(self.spec.flags().with(ChooserFlags::MODAL));
        self.state = ControllerState::ModalActive;
        tracing::debug!(
            target: "picklist::controller",
            title = self.spec.title(),
            "opening modal chooser"
        );

        let reply = {
            let _watchdog = TimeoutSuspension::new(self.host.as_ref());
            self.host.open_or_activate(&session)
        };

        // Modal choosers never outlive the host call.
        self.teardown(&session);
        self.state = ControllerState::Closed;

        match reply? {
            OpenReply::Chosen(row) => Ok(ModalOutcome::Chosen(row)),
            OpenReply::NoSelection => Ok(ModalOutcome::NoSelection),
            OpenReply::Empty => Ok(ModalOutcome::Empty),
            OpenReply::Opened | OpenReply::AlreadyExists => {
                Err(self.protocol_violation("non-modal reply to a modal open"))
            }
        }
    }

    /// Shows the chooser as a non-modal window and returns immediately.
    ///
    /// If a live chooser with the same identity is already open the host
    /// refuses with [`NonModalOutcome::AlreadyExists`], unless the spec
    /// carries [`ChooserFlags::FORCE_DEFAULT`], in which case the host brings
    /// the existing window to the front and this returns
    /// [`NonModalOutcome::Opened`]. Either way this controller keeps no
    /// resources when its own window never opened.
    pub fn show(&mut self) -> Result<NonModalOutcome, ChooserError> {
        self.ensure_showable()?;
        let session = self.open_session(self.spec.flags().without(ChooserFlags::MODAL));
        tracing::debug!(
            target: "picklist::controller",
            title = self.spec.title(),
            "opening non-modal chooser"
        );

        match self.host.open_or_activate(&session) {
            Ok(OpenReply::Opened) => {
                if session.widget().is_some() {
                    self.session = Some(session);
                    self.state = ControllerState::NonModalActive;
                } else {
                    // The host reactivated an existing window for us; this
                    // controller owns no widget and must not keep a hook.
                    session.release_hook();
                    self.state = ControllerState::Closed;
                }
                Ok(NonModalOutcome::Opened)
            }
            Ok(OpenReply::AlreadyExists) => {
                session.release_hook();
                self.state = ControllerState::Closed;
                Ok(NonModalOutcome::AlreadyExists)
            }
            Ok(OpenReply::Chosen(_) | OpenReply::NoSelection | OpenReply::Empty) => {
                session.release_hook();
                self.state = ControllerState::Closed;
                Err(self.protocol_violation("modal reply to a non-modal open"))
            }
            Err(err) => {
                session.release_hook();
                self.state = ControllerState::Closed;
                Err(err.into())
            }
        }
    }

    /// Creates the embedded widget and returns its handle.
    ///
    /// Only valid for specs built with
    /// [`embedded`](crate::spec::ChooserSpecBuilder::embedded). No popup hook
    /// or timeout machinery is involved; the containing form owns the widget.
    pub fn embed(&mut self) -> Result<WidgetId, ChooserError> {
        self.ensure_embeddable()?;
        let session = ChooserSession::new(self.spec.clone(), self.model.clone(), self.spec.flags());

        match self.host.create_embedded(&session) {
            Ok(widget) => {
                session.attach_widget(widget);
                self.session = Some(session);
                self.state = ControllerState::Embedded;
                Ok(widget)
            }
            Err(err) => {
                self.state = ControllerState::Closed;
                Err(err.into())
            }
        }
    }

    /// Creates the embedded widget wrapped in the host's backing object.
    ///
    /// The raw-handle variant is [`embed`](Self::embed).
    pub fn embed_backing(&mut self) -> Result<Box<dyn EmbeddedBacking>, ChooserError> {
        self.ensure_embeddable()?;
        let session = ChooserSession::new(self.spec.clone(), self.model.clone(), self.spec.flags());

        match self.host.create_embedded_backing(&session) {
            Ok(backing) => {
                session.attach_widget(backing.widget());
                self.session = Some(session);
                self.state = ControllerState::Embedded;
                Ok(backing)
            }
            Err(err) => {
                self.state = ControllerState::Closed;
                Err(err.into())
            }
        }
    }

    /// Brings the open chooser window to the front.
    pub fn activate(&self) -> Result<(), ChooserError> {
        let widget = self.widget().ok_or(ChooserError::NotOpen)?;
        Ok(self.host.activate(widget)?)
    }

    /// Asks the host to repopulate the open chooser from its model.
    pub fn refresh(&self) -> Result<(), ChooserError> {
        let widget = self.widget().ok_or(ChooserError::NotOpen)?;
        Ok(self.host.refresh(widget)?)
    }

    /// Closes the chooser window.
    ///
    /// A no-op on an unshown, already-closed, or embedded controller (the
    /// containing form owns embedded widgets). The popup hook is torn down
    /// here, synchronously, whether or not the host gets around to reporting
    /// the widget closed.
    pub fn close(&mut self) {
        match self.state {
            ControllerState::Unshown => {
                self.state = ControllerState::Closed;
            }
            ControllerState::Closed | ControllerState::Embedded => {}
            ControllerState::ModalActive | ControllerState::NonModalActive => {
                if let Some(session) = self.session.take() {
                    self.teardown(&session);
                }
                self.state = ControllerState::Closed;
            }
        }
    }

    fn ensure_showable(&self) -> Result<(), ChooserError> {
        if self.state != ControllerState::Unshown {
            return Err(ChooserError::AlreadyShown);
        }
        if self.spec.is_embedded() {
            return Err(ChooserError::ModeMismatch(
                "embedded chooser cannot be shown as a window",
            ));
        }
        if let Some(attr) = self.spec.missing_mandatory_attr() {
            return Err(ChooserError::MissingAttribute(attr));
        }
        Ok(())
    }

    fn ensure_embeddable(&self) -> Result<(), ChooserError> {
        if self.state != ControllerState::Unshown {
            return Err(ChooserError::AlreadyShown);
        }
        if !self.spec.is_embedded() {
            return Err(ChooserError::ModeMismatch(
                "windowed chooser cannot be embedded",
            ));
        }
        if let Some(attr) = self.spec.missing_mandatory_attr() {
            return Err(ChooserError::MissingAttribute(attr));
        }
        Ok(())
    }

    fn open_session(&self, flags: ChooserFlags) -> Arc<ChooserSession> {
        let session = ChooserSession::new(self.spec.clone(), self.model.clone(), flags);
        session.install_hook(HookGuard::install(self.host.clone(), &session));
        session
    }

    /// Hook first, widget second, close notification last: the hook must be
    /// gone before the widget so it can never fire against a dead chooser.
    fn teardown(&self, session: &Arc<ChooserSession>) {
        session.release_hook();
        if let Some(widget) = session.widget() {
            self.host.close(widget);
        }
        session.notify_closed();
    }

    fn protocol_violation(&self, msg: &'static str) -> ChooserError {
        tracing::error!(
            target: "picklist::controller",
            title = self.spec.title(),
            msg,
            "host protocol violation"
        );
        ChooserError::Host(HostError::Protocol(msg.to_string()))
    }
}

impl std::fmt::Debug for ChooserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChooserController")
            .field("title", &self.spec.title())
            .field("state", &self.state)
            .field("widget", &self.widget())
            .finish()
    }
}

assert_impl_all!(ChooserController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use picklist_core::{HookId, HostResult, PopupHook, ScriptTimeout};

    /// Host double for paths that must fail before any host call.
    struct UnreachableHost;

    impl ScriptTimeout for UnreachableHost {}

    impl WindowHost for UnreachableHost {
        fn open_or_activate(&self, _session: &Arc<ChooserSession>) -> HostResult<OpenReply> {
            unreachable!("the host must not be reached")
        }

        fn activate(&self, _widget: WidgetId) -> HostResult<()> {
            unreachable!("the host must not be reached")
        }

        fn refresh(&self, _widget: WidgetId) -> HostResult<()> {
            unreachable!("the host must not be reached")
        }

        fn close(&self, _widget: WidgetId) {
            unreachable!("the host must not be reached")
        }

        fn create_embedded(&self, _session: &Arc<ChooserSession>) -> HostResult<WidgetId> {
            unreachable!("the host must not be reached")
        }

        fn create_embedded_backing(
            &self,
            _session: &Arc<ChooserSession>,
        ) -> HostResult<Box<dyn EmbeddedBacking>> {
            unreachable!("the host must not be reached")
        }

        fn register_popup_hook(&self, _hook: Arc<dyn PopupHook>) -> HookId {
            unreachable!("the host must not be reached")
        }

        fn unregister_popup_hook(&self, _hook: HookId) {
            unreachable!("the host must not be reached")
        }
    }

    struct EmptyModel;

    impl ChooserModel for EmptyModel {
        fn row_count(&self) -> usize {
            0
        }

        fn render_row(&self, _index: usize) -> Vec<String> {
            Vec::new()
        }
    }

    fn controller(spec: ChooserSpec) -> ChooserController {
        ChooserController::new(spec, Arc::new(EmptyModel), Arc::new(UnreachableHost))
    }

    #[test]
    fn test_show_without_title_never_reaches_host() {
        let spec = ChooserSpec::builder("")
            .with_column(Column::new("Name", 16))
            .build()
            .unwrap();
        let mut controller = controller(spec);

        let err = controller.show_modal().unwrap_err();
        assert_eq!(err, ChooserError::MissingAttribute("title"));
        assert_eq!(err.raw_code(), Some(picklist_core::codes::NO_ATTR));
        assert_eq!(controller.state(), ControllerState::Unshown);
    }

    #[test]
    fn test_show_without_columns_never_reaches_host() {
        let mut controller = controller(ChooserSpec::builder("t").build().unwrap());

        let err = controller.show().unwrap_err();
        assert_eq!(err, ChooserError::MissingAttribute("columns"));
    }

    #[test]
    fn test_show_rejects_embedded_spec() {
        let spec = ChooserSpec::builder("t")
            .with_column(Column::new("Name", 16))
            .embedded()
            .build()
            .unwrap();
        let mut controller = controller(spec);

        let err = controller.show_modal().unwrap_err();
        assert!(matches!(err, ChooserError::ModeMismatch(_)));
        assert_eq!(err.raw_code(), Some(picklist_core::codes::NO_ATTR));
    }

    #[test]
    fn test_embed_rejects_windowed_spec() {
        let spec = ChooserSpec::builder("t")
            .with_column(Column::new("Name", 16))
            .build()
            .unwrap();
        let mut controller = controller(spec);

        let err = controller.embed().unwrap_err();
        assert!(matches!(err, ChooserError::ModeMismatch(_)));
        assert_eq!(err.raw_code(), Some(picklist_core::codes::NO_ATTR));
    }

    #[test]
    fn test_activate_and_refresh_require_a_widget() {
        let spec = ChooserSpec::builder("t")
            .with_column(Column::new("Name", 16))
            .build()
            .unwrap();
        let controller = controller(spec);

        assert_eq!(controller.activate().unwrap_err(), ChooserError::NotOpen);
        assert_eq!(controller.refresh().unwrap_err(), ChooserError::NotOpen);
    }

    #[test]
    fn test_close_before_show_is_a_noop() {
        let spec = ChooserSpec::builder("t")
            .with_column(Column::new("Name", 16))
            .build()
            .unwrap();
        let mut controller = controller(spec);

        controller.close();
        assert_eq!(controller.state(), ControllerState::Closed);

        // And again: closing twice is a no-op the second time.
        controller.close();
        assert_eq!(controller.state(), ControllerState::Closed);
    }

    #[test]
    fn test_spent_controller_refuses_another_show() {
        let spec = ChooserSpec::builder("t")
            .with_column(Column::new("Name", 16))
            .build()
            .unwrap();
        let mut controller = controller(spec);
        controller.close();

        assert_eq!(
            controller.show_modal().unwrap_err(),
            ChooserError::AlreadyShown
        );
    }
}

//! Live chooser state shared between controller, host, and popup trampoline.
//!
//! A [`ChooserSession`] exists from the moment a chooser is shown (or
//! embedded) until its widget is gone. It is the single object the host talks
//! to: it answers content queries, carries the widget handle, owns the popup
//! hook registration, and dispatches row operations to the model.
//!
//! Dispatch is capability gated. The effective capability set is fixed at
//! session creation (declared by the model, minus the spec's `forbidden`
//! override) and an operation whose bit is unset never reaches the model: the
//! session drops it, logs, and in debug builds panics, because a host that
//! offered the affordance anyway is broken.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use picklist_core::{PopupMenuId, RowUpdate, UpdateOutcome, WidgetId};
use static_assertions::assert_impl_all;

use crate::capability::Capabilities;
use crate::flags::ChooserFlags;
use crate::model::{ChooserModel, IconId, RowAttributes};
use crate::spec::{ChooserIdentity, ChooserSpec, DefaultSelection};
use crate::trampoline::HookGuard;

/// Row operations a host can offer affordances for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowOp {
    /// Insert a row at the cursor.
    Insert,
    /// Delete the selected rows.
    Delete,
    /// Edit the row under the cursor.
    Edit,
    /// Activate the selected rows.
    Enter,
    /// Recompute the content.
    Refresh,
}

/// Shared state of one displayed chooser.
///
/// Created by the controller, handed to the host by `Arc`, and referenced
/// weakly by the popup trampoline. All methods take `&self`; interior state
/// is the widget handle and the hook guard, both behind mutexes.
pub struct ChooserSession {
    spec: Arc<ChooserSpec>,
    model: Arc<dyn ChooserModel>,
    flags: ChooserFlags,
    capabilities: Capabilities,
    widget: Mutex<Option<WidgetId>>,
    hook: Mutex<Option<HookGuard>>,
    closed: AtomicBool,
}

impl ChooserSession {
    pub(crate) fn new(
        spec: Arc<ChooserSpec>,
        model: Arc<dyn ChooserModel>,
        flags: ChooserFlags,
    ) -> Arc<Self> {
        let capabilities = model.capabilities().restrict(spec.forbidden());
        tracing::debug!(
            target: "picklist::session",
            title = spec.title(),
            flags = flags.bits(),
            capabilities = capabilities.bits(),
            "chooser session created"
        );
        Arc::new(Self {
            spec,
            model,
            flags,
            capabilities,
            widget: Mutex::new(None),
            hook: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    /// The immutable chooser description.
    pub fn spec(&self) -> &ChooserSpec {
        &self.spec
    }

    /// Effective behavior flags for this showing.
    ///
    /// May differ from the spec's flags in the modal bit, which the show mode
    /// forces.
    pub fn flags(&self) -> ChooserFlags {
        self.flags
    }

    /// Effective capabilities: declared by the model, minus the spec's
    /// `forbidden` override.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Whether this session displays modally.
    pub fn is_modal(&self) -> bool {
        self.flags.contains(ChooserFlags::MODAL)
    }

    /// Identity key for non-modal deduplication.
    pub fn identity(&self) -> ChooserIdentity {
        self.spec.identity()
    }

    /// The live widget handle, if one is attached.
    pub fn widget(&self) -> Option<WidgetId> {
        *self.widget.lock()
    }

    /// Called by the host as soon as the widget exists.
    pub fn attach_widget(&self, widget: WidgetId) {
        tracing::trace!(
            target: "picklist::session",
            title = self.spec.title(),
            widget = widget.as_raw(),
            "widget attached"
        );
        *self.widget.lock() = Some(widget);
    }

    pub(crate) fn install_hook(&self, guard: HookGuard) {
        *self.hook.lock() = Some(guard);
    }

    /// Drops the popup hook registration, unregistering it from the host.
    ///
    /// Idempotent; the guard is taken at most once.
    pub(crate) fn release_hook(&self) {
        drop(self.hook.lock().take());
    }

    // ==== Content queries (host pull side) ====

    /// Runs the model's one-time setup, once, if declared.
    pub fn initialize(&self) {
        if self.capabilities.contains(Capabilities::INIT) {
            self.model.on_init();
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.model.row_count()
    }

    /// Cell text for one row.
    pub fn render_row(&self, index: usize) -> Vec<String> {
        self.model.render_row(index)
    }

    /// Icon for one row; `None` when the model declares no icons.
    pub fn icon(&self, index: usize) -> Option<IconId> {
        if self.capabilities.contains(Capabilities::ICON) {
            self.model.icon(index)
        } else {
            None
        }
    }

    /// Display attributes for one row; `None` when the model declares none.
    pub fn attributes(&self, index: usize) -> Option<RowAttributes> {
        if self.capabilities.contains(Capabilities::ROW_ATTRS) {
            self.model.attributes(index)
        } else {
            None
        }
    }

    /// Rows to select when the widget first populates.
    ///
    /// The spec's default selection, clamped against the current row count.
    pub fn initial_selection(&self) -> Vec<usize> {
        let requested = match self.spec.default_selection() {
            DefaultSelection::Single(None) => Vec::new(),
            DefaultSelection::Single(Some(index)) => vec![*index],
            DefaultSelection::Multi(rows) => rows.clone(),
        };
        self.normalize_selection(requested)
    }

    // ==== Row operations (host event side) ====

    /// Whether the host should offer the affordance for `op`.
    ///
    /// True only when the model implements the operation *and* the flags ask
    /// for the affordance. Activation needs no flag; a declared `enter` is
    /// always reachable by double-click.
    pub fn allows(&self, op: RowOp) -> bool {
        match op {
            RowOp::Insert => {
                self.capabilities.contains(Capabilities::INSERT)
                    && self.flags.contains(ChooserFlags::CAN_INSERT)
            }
            RowOp::Delete => {
                self.capabilities.contains(Capabilities::DELETE)
                    && self.flags.contains(ChooserFlags::CAN_DELETE)
            }
            RowOp::Edit => {
                self.capabilities.contains(Capabilities::EDIT)
                    && self.flags.contains(ChooserFlags::CAN_EDIT)
            }
            RowOp::Enter => self.capabilities.contains(Capabilities::ENTER),
            RowOp::Refresh => {
                self.capabilities.contains(Capabilities::REFRESH)
                    && self.flags.contains(ChooserFlags::CAN_REFRESH)
            }
        }
    }

    /// Dispatches an insert request.
    pub fn insert(&self, at: Option<usize>) -> UpdateOutcome {
        if !self.capabilities.contains(Capabilities::INSERT) {
            self.capability_violation("insert");
            return UpdateOutcome::NothingChanged;
        }
        self.model.insert(at)
    }

    /// Dispatches a delete request; the returned selection is clamped
    /// against the post-delete row count.
    pub fn delete(&self, rows: &[usize]) -> RowUpdate {
        if !self.capabilities.contains(Capabilities::DELETE) {
            self.capability_violation("delete");
            return RowUpdate::unchanged();
        }
        let update = self.model.delete(rows);
        self.normalize(update)
    }

    /// Dispatches an edit request.
    pub fn edit(&self, index: usize) -> UpdateOutcome {
        if !self.capabilities.contains(Capabilities::EDIT) {
            self.capability_violation("edit");
            return UpdateOutcome::NothingChanged;
        }
        self.model.edit(index)
    }

    /// Dispatches a row activation.
    pub fn enter(&self, rows: &[usize]) -> UpdateOutcome {
        if !self.capabilities.contains(Capabilities::ENTER) {
            self.capability_violation("enter");
            return UpdateOutcome::NothingChanged;
        }
        self.model.enter(rows)
    }

    /// Dispatches a refresh request; the returned selection is clamped
    /// against the post-refresh row count.
    pub fn refresh(&self, rows: &[usize]) -> RowUpdate {
        if !self.capabilities.contains(Capabilities::REFRESH) {
            self.capability_violation("refresh");
            return RowUpdate {
                outcome: UpdateOutcome::NothingChanged,
                selection: rows.to_vec(),
            };
        }
        let update = self.model.refresh(rows);
        self.normalize(update)
    }

    /// Reports a selection change.
    pub fn selection_changed(&self, rows: &[usize]) {
        if !self.capabilities.contains(Capabilities::SELECTION) {
            self.capability_violation("selection_changed");
            return;
        }
        self.model.selection_changed(rows);
    }

    /// Forwards a popup-construction event for this chooser's widget.
    ///
    /// Silently dropped when the model declares no popup interest; the
    /// trampoline forwards unconditionally and the filtering happens here.
    pub fn notify_popup(&self, widget: WidgetId, menu: PopupMenuId) {
        if self.capabilities.contains(Capabilities::POPUP) {
            self.model.on_popup(widget, menu);
        }
    }

    /// Called by the host when the widget is gone.
    ///
    /// Releases the popup hook, detaches the widget handle, and delivers the
    /// close notification to the model. Runs once; later calls are no-ops.
    pub fn notify_closed(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::debug!(
            target: "picklist::session",
            title = self.spec.title(),
            "chooser closed"
        );
        self.release_hook();
        *self.widget.lock() = None;
        if self.capabilities.contains(Capabilities::CLOSE) {
            self.model.on_close();
        }
    }

    fn normalize(&self, update: RowUpdate) -> RowUpdate {
        RowUpdate {
            outcome: update.outcome,
            selection: self.normalize_selection(update.selection),
        }
    }

    /// Clamps every index against the current row count, deduplicating while
    /// preserving order. An empty table always yields an empty selection.
    fn normalize_selection(&self, selection: Vec<usize>) -> Vec<usize> {
        let count = self.model.row_count();
        if count == 0 {
            return Vec::new();
        }
        let mut normalized = Vec::with_capacity(selection.len());
        for index in selection {
            let clamped = index.min(count - 1);
            if !normalized.contains(&clamped) {
                normalized.push(clamped);
            }
        }
        normalized
    }

    #[cold]
    fn capability_violation(&self, op: &'static str) {
        tracing::error!(
            target: "picklist::session",
            title = self.spec.title(),
            op,
            "row operation dispatched without a declared capability"
        );
        if cfg!(debug_assertions) {
            panic!(
                "chooser `{}`: `{op}` dispatched without a declared capability",
                self.spec.title()
            );
        }
    }
}

impl std::fmt::Debug for ChooserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChooserSession")
            .field("title", &self.spec.title())
            .field("flags", &self.flags)
            .field("capabilities", &self.capabilities)
            .field("widget", &self.widget())
            .finish()
    }
}

assert_impl_all!(ChooserSession: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use std::sync::Mutex as StdMutex;

    struct ScriptedModel {
        rows: StdMutex<Vec<String>>,
        capabilities: Capabilities,
        deletes: StdMutex<Vec<Vec<usize>>>,
        closes: StdMutex<usize>,
        inits: StdMutex<usize>,
    }

    impl ScriptedModel {
        fn new(rows: &[&str], capabilities: Capabilities) -> Arc<Self> {
            Arc::new(Self {
                rows: StdMutex::new(rows.iter().map(|r| r.to_string()).collect()),
                capabilities,
                deletes: StdMutex::new(Vec::new()),
                closes: StdMutex::new(0),
                inits: StdMutex::new(0),
            })
        }
    }

    impl ChooserModel for ScriptedModel {
        fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn render_row(&self, index: usize) -> Vec<String> {
            vec![self.rows.lock().unwrap()[index].clone()]
        }

        fn capabilities(&self) -> Capabilities {
            self.capabilities
        }

        fn on_init(&self) {
            *self.inits.lock().unwrap() += 1;
        }

        fn delete(&self, rows: &[usize]) -> RowUpdate {
            self.deletes.lock().unwrap().push(rows.to_vec());
            let mut table = self.rows.lock().unwrap();
            for &row in rows.iter().rev() {
                if row < table.len() {
                    table.remove(row);
                }
            }
            let count = table.len();
            drop(table);
            let cursor = rows.first().copied().unwrap_or(0);
            RowUpdate::all_changed(crate::model::adjust_selection(cursor, count))
        }

        fn on_close(&self) {
            *self.closes.lock().unwrap() += 1;
        }
    }

    fn spec(forbidden: Capabilities) -> Arc<ChooserSpec> {
        Arc::new(
            ChooserSpec::builder("Session under test")
                .with_column(Column::new("Name", 16))
                .with_forbidden(forbidden)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_effective_capabilities_apply_forbidden() {
        let model = ScriptedModel::new(&["a"], Capabilities::DELETE | Capabilities::CLOSE);
        let session = ChooserSession::new(
            spec(Capabilities::CLOSE),
            model,
            ChooserFlags::CAN_DELETE,
        );

        assert!(session.capabilities().contains(Capabilities::DELETE));
        assert!(!session.capabilities().contains(Capabilities::CLOSE));
    }

    #[test]
    fn test_delete_clamps_surviving_selection() {
        let model = ScriptedModel::new(&["a", "b", "c", "d", "e"], Capabilities::DELETE);
        let session = ChooserSession::new(
            spec(Capabilities::NONE),
            model.clone(),
            ChooserFlags::CAN_DELETE,
        );

        // Deleting the last of five rows: cursor clamps to the new last row.
        let update = session.delete(&[4]);
        assert_eq!(update.outcome, UpdateOutcome::AllChanged);
        assert_eq!(update.selection, vec![3]);
        assert_eq!(model.deletes.lock().unwrap().as_slice(), &[vec![4]]);
    }

    #[test]
    fn test_delete_to_empty_clears_selection() {
        let model = ScriptedModel::new(&["only"], Capabilities::DELETE);
        let session = ChooserSession::new(
            spec(Capabilities::NONE),
            model,
            ChooserFlags::CAN_DELETE,
        );

        let update = session.delete(&[0]);
        assert_eq!(update.selection, Vec::<usize>::new());
    }

    #[test]
    fn test_quiet_gates_skip_the_model() {
        let model = ScriptedModel::new(&["a"], Capabilities::NONE);
        let session = ChooserSession::new(spec(Capabilities::NONE), model, ChooserFlags::NONE);

        // Pull accessors and notifications are dropped quietly.
        assert_eq!(session.icon(0), None);
        assert_eq!(session.attributes(0), None);
        session.initialize();
        session.notify_popup(
            WidgetId::from_raw(1),
            PopupMenuId::new(1),
        );
    }

    #[test]
    fn test_initialize_runs_when_declared() {
        let model = ScriptedModel::new(&["a"], Capabilities::INIT);
        let session = ChooserSession::new(spec(Capabilities::NONE), model.clone(), ChooserFlags::NONE);

        session.initialize();
        assert_eq!(*model.inits.lock().unwrap(), 1);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "without a declared capability")]
    fn test_undeclared_row_operation_is_fatal_in_debug() {
        let model = ScriptedModel::new(&["a"], Capabilities::NONE);
        let session = ChooserSession::new(
            spec(Capabilities::NONE),
            model,
            ChooserFlags::CAN_DELETE,
        );
        session.delete(&[0]);
    }

    #[test]
    fn test_allows_combines_capability_and_flag() {
        let model = ScriptedModel::new(&["a"], Capabilities::DELETE | Capabilities::ENTER);

        // Capability without the flag: no affordance.
        let session = ChooserSession::new(spec(Capabilities::NONE), model.clone(), ChooserFlags::NONE);
        assert!(!session.allows(RowOp::Delete));
        // Activation needs no flag.
        assert!(session.allows(RowOp::Enter));

        // Capability plus flag: affordance on.
        let session = ChooserSession::new(spec(Capabilities::NONE), model, ChooserFlags::CAN_DELETE);
        assert!(session.allows(RowOp::Delete));

        // Flag without the capability: no affordance.
        let session = ChooserSession::new(
            spec(Capabilities::NONE),
            ScriptedModel::new(&["a"], Capabilities::NONE),
            ChooserFlags::CAN_DELETE | ChooserFlags::CAN_INSERT,
        );
        assert!(!session.allows(RowOp::Delete));
        assert!(!session.allows(RowOp::Insert));
    }

    #[test]
    fn test_initial_selection_clamps_default() {
        let model = ScriptedModel::new(&["a", "b"], Capabilities::NONE);
        let spec = Arc::new(
            ChooserSpec::builder("t")
                .with_column(Column::new("Name", 16))
                .with_default(DefaultSelection::Single(Some(7)))
                .build()
                .unwrap(),
        );
        let session = ChooserSession::new(spec, model, ChooserFlags::NONE);
        assert_eq!(session.initial_selection(), vec![1]);
    }

    #[test]
    fn test_initial_selection_none_is_empty() {
        let model = ScriptedModel::new(&["a", "b"], Capabilities::NONE);
        let spec = Arc::new(
            ChooserSpec::builder("t")
                .with_column(Column::new("Name", 16))
                .with_default(DefaultSelection::Single(None))
                .build()
                .unwrap(),
        );
        let session = ChooserSession::new(spec, model, ChooserFlags::NONE);
        assert_eq!(session.initial_selection(), Vec::<usize>::new());
    }

    #[test]
    fn test_notify_closed_runs_once() {
        let model = ScriptedModel::new(&["a"], Capabilities::CLOSE);
        let session = ChooserSession::new(spec(Capabilities::NONE), model.clone(), ChooserFlags::NONE);
        session.attach_widget(WidgetId::from_raw(3));

        session.notify_closed();
        session.notify_closed();

        assert_eq!(*model.closes.lock().unwrap(), 1);
        assert_eq!(session.widget(), None);
    }
}

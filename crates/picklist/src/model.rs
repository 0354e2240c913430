//! The chooser data-source contract.
//!
//! A [`ChooserModel`] owns the rows a chooser displays. Two methods are
//! required; everything else is optional and must be advertised through
//! [`capabilities`](ChooserModel::capabilities) before the session will call
//! it. The default bodies are inert placeholders for models that do not
//! declare the matching bit.

use std::ops::{BitAnd, BitOr, BitOrAssign};

use picklist_core::{PopupMenuId, RowUpdate, UpdateOutcome, WidgetId};

use crate::capability::Capabilities;

/// Index of an icon in the host's icon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(u32);

impl IconId {
    /// Wraps a raw host icon index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw host icon index.
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

/// Text emphasis flags for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowStyle(u8);

impl RowStyle {
    /// No emphasis.
    pub const NONE: RowStyle = RowStyle(0);
    /// Bold text.
    pub const BOLD: RowStyle = RowStyle(1 << 0);
    /// Italic text.
    pub const ITALIC: RowStyle = RowStyle(1 << 1);
    /// Underlined text.
    pub const UNDERLINE: RowStyle = RowStyle(1 << 2);
    /// Struck-through text.
    pub const STRIKE: RowStyle = RowStyle(1 << 3);
    /// Grayed-out text.
    pub const GRAY: RowStyle = RowStyle(1 << 4);

    /// Check if this set contains every style in `styles`.
    pub const fn contains(self, styles: RowStyle) -> bool {
        (self.0 & styles.0) == styles.0
    }

    /// Check if this set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for RowStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        RowStyle(self.0 | rhs.0)
    }
}

impl BitOrAssign for RowStyle {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for RowStyle {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        RowStyle(self.0 & rhs.0)
    }
}

/// Display attributes for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowAttributes {
    /// Background color as `0xRRGGBB`, or `None` for the host default.
    pub background: Option<u32>,
    /// Text emphasis.
    pub style: RowStyle,
}

/// The data source behind a chooser.
///
/// # Implementation Requirements
///
/// At minimum, you must implement:
/// - [`row_count`](ChooserModel::row_count) - Number of rows
/// - [`render_row`](ChooserModel::render_row) - Cell text for one row
///
/// Every other method is optional. Implement it *and* declare the matching
/// [`Capabilities`] bit in [`capabilities`](ChooserModel::capabilities); an
/// undeclared override is never called.
///
/// # Example
///
/// ```
/// use picklist::{Capabilities, ChooserModel};
///
/// struct Bookmarks {
///     entries: Vec<(String, u64)>,
/// }
///
/// impl ChooserModel for Bookmarks {
///     fn row_count(&self) -> usize {
///         self.entries.len()
///     }
///
///     fn render_row(&self, index: usize) -> Vec<String> {
///         let (name, address) = &self.entries[index];
///         vec![name.clone(), format!("{:08X}", address)]
///     }
///
///     fn capabilities(&self) -> Capabilities {
///         Capabilities::NONE
///     }
/// }
/// ```
pub trait ChooserModel: Send + Sync {
    /// Number of rows currently in the source.
    fn row_count(&self) -> usize;

    /// Cell text for one row, one string per column.
    ///
    /// Extra cells beyond the spec's column count are ignored; missing cells
    /// render empty.
    fn render_row(&self, index: usize) -> Vec<String>;

    /// Which optional operations this source implements.
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// One-time setup before the widget first populates.
    ///
    /// Only called when [`Capabilities::INIT`] is declared.
    fn on_init(&self) {}

    /// Icon for one row, or `None` for the chooser default.
    ///
    /// Only called when [`Capabilities::ICON`] is declared.
    fn icon(&self, _index: usize) -> Option<IconId> {
        None
    }

    /// Display attributes for one row.
    ///
    /// Only called when [`Capabilities::ROW_ATTRS`] is declared.
    fn attributes(&self, _index: usize) -> Option<RowAttributes> {
        None
    }

    /// The user asked to insert a row at the cursor position.
    ///
    /// `at` is `None` when the chooser is empty and has no cursor. Only
    /// called when [`Capabilities::INSERT`] is declared.
    fn insert(&self, _at: Option<usize>) -> UpdateOutcome {
        UpdateOutcome::NothingChanged
    }

    /// The user asked to delete the given rows.
    ///
    /// Returns what changed and the selection that survives the deletion; see
    /// [`adjust_last_item`](ChooserModel::adjust_last_item) for the usual
    /// cursor arithmetic. Only called when [`Capabilities::DELETE`] is
    /// declared.
    fn delete(&self, _rows: &[usize]) -> RowUpdate {
        RowUpdate::unchanged()
    }

    /// The user asked to edit one row.
    ///
    /// Only called when [`Capabilities::EDIT`] is declared.
    fn edit(&self, _index: usize) -> UpdateOutcome {
        UpdateOutcome::NothingChanged
    }

    /// The user activated the given rows (double-click or Enter) in a
    /// non-modal chooser.
    ///
    /// Only called when [`Capabilities::ENTER`] is declared.
    fn enter(&self, _rows: &[usize]) -> UpdateOutcome {
        UpdateOutcome::NothingChanged
    }

    /// The user asked to recompute the content.
    ///
    /// `rows` is the selection at the time of the request; return the
    /// selection to restore afterwards. Only called when
    /// [`Capabilities::REFRESH`] is declared.
    fn refresh(&self, rows: &[usize]) -> RowUpdate {
        RowUpdate {
            outcome: UpdateOutcome::NothingChanged,
            selection: rows.to_vec(),
        }
    }

    /// The selection moved to the given rows.
    ///
    /// Only called when [`Capabilities::SELECTION`] is declared.
    fn selection_changed(&self, _rows: &[usize]) {}

    /// The widget closed.
    ///
    /// Only called when [`Capabilities::CLOSE`] is declared.
    fn on_close(&self) {}

    /// A context menu is being assembled for this chooser's widget.
    ///
    /// Only called when [`Capabilities::POPUP`] is declared.
    fn on_popup(&self, _widget: WidgetId, _menu: PopupMenuId) {}

    /// Cursor position that survives deleting the row at `index`.
    ///
    /// Call after the deletion, when [`row_count`](ChooserModel::row_count)
    /// already reports the new size: an index past the end clamps to the new
    /// last row, and an empty table yields an empty selection.
    fn adjust_last_item(&self, index: usize) -> Vec<usize> {
        adjust_selection(index, self.row_count())
    }
}

/// Clamps a cursor `index` against a table of `count` rows.
///
/// This is the arithmetic behind
/// [`ChooserModel::adjust_last_item`]: deleting the last row moves the cursor
/// to the new last row, and emptying the table clears it.
pub fn adjust_selection(index: usize, count: usize) -> Vec<usize> {
    if count == 0 {
        Vec::new()
    } else if index >= count {
        vec![count - 1]
    } else {
        vec![index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_adjust_selection_clamps_to_last_row() {
        // Five rows, row 4 deleted: four remain, cursor lands on row 3.
        assert_eq!(adjust_selection(4, 4), vec![3]);
        // Cursor well past the end still clamps.
        assert_eq!(adjust_selection(10, 4), vec![3]);
        // Cursor still in range stays put.
        assert_eq!(adjust_selection(1, 4), vec![1]);
    }

    #[test]
    fn test_adjust_selection_empty_table_clears_cursor() {
        assert_eq!(adjust_selection(0, 0), Vec::<usize>::new());
    }

    struct ShrinkingModel {
        rows: Mutex<Vec<String>>,
    }

    impl ChooserModel for ShrinkingModel {
        fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn render_row(&self, index: usize) -> Vec<String> {
            vec![self.rows.lock().unwrap()[index].clone()]
        }
    }

    #[test]
    fn test_adjust_last_item_uses_current_count() {
        let model = ShrinkingModel {
            rows: Mutex::new(vec!["a".into(), "b".into(), "c".into()]),
        };

        // Delete the last row, then ask where the cursor goes.
        model.rows.lock().unwrap().pop();
        assert_eq!(model.adjust_last_item(2), vec![1]);

        // Empty the table entirely.
        model.rows.lock().unwrap().clear();
        assert_eq!(model.adjust_last_item(0), Vec::<usize>::new());
    }

    #[test]
    fn test_default_bodies_are_inert() {
        let model = ShrinkingModel {
            rows: Mutex::new(vec!["a".into()]),
        };

        assert_eq!(model.capabilities(), Capabilities::NONE);
        assert_eq!(model.insert(Some(0)), UpdateOutcome::NothingChanged);
        assert_eq!(model.delete(&[0]), RowUpdate::unchanged());
        assert_eq!(model.edit(0), UpdateOutcome::NothingChanged);
        assert_eq!(model.enter(&[0]), UpdateOutcome::NothingChanged);
        assert_eq!(model.icon(0), None);
        assert_eq!(model.attributes(0), None);

        let refreshed = model.refresh(&[0]);
        assert_eq!(refreshed.outcome, UpdateOutcome::NothingChanged);
        assert_eq!(refreshed.selection, vec![0]);
    }

    #[test]
    fn test_row_style_combines() {
        let style = RowStyle::BOLD | RowStyle::GRAY;
        assert!(style.contains(RowStyle::BOLD));
        assert!(style.contains(RowStyle::GRAY));
        assert!(!style.contains(RowStyle::ITALIC));
        assert!(RowStyle::NONE.is_empty());
    }
}

//! Status codes and typed operation outcomes.
//!
//! The host ABI speaks in small signed integers; everything above it speaks in
//! the enums defined here. The raw values in [`codes`] exist at the seam only,
//! for hosts bridging to C-style chooser protocols and for log output.

/// Raw status codes of the legacy chooser protocol.
pub mod codes {
    /// Show finished without a selected row.
    pub const NO_SELECTION: i32 = -1;
    /// Show refused to display an empty chooser.
    pub const EMPTY_CHOOSER: i32 = -2;
    /// A non-modal chooser with the same identity is already open.
    pub const ALREADY_EXISTS: i32 = -3;
    /// A mandatory chooser attribute is missing.
    pub const NO_ATTR: i32 = -4;

    /// Row mutation left the table as it was.
    pub const NOTHING_CHANGED: i32 = 0;
    /// Row mutation invalidated the whole table.
    pub const ALL_CHANGED: i32 = 1;
    /// Row mutation only moved the selection.
    pub const SELECTION_CHANGED: i32 = 2;
}

/// How much of a chooser's content a row mutation invalidated.
///
/// Hosts use this to decide between repainting nothing, the selection, or the
/// whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UpdateOutcome {
    /// Nothing changed; skip the repaint.
    #[default]
    NothingChanged,
    /// Row content changed; repopulate the table.
    AllChanged,
    /// Only the selection moved.
    SelectionChanged,
}

impl UpdateOutcome {
    /// Raw protocol code for this outcome.
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::NothingChanged => codes::NOTHING_CHANGED,
            Self::AllChanged => codes::ALL_CHANGED,
            Self::SelectionChanged => codes::SELECTION_CHANGED,
        }
    }

    /// Parses a raw protocol code.
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            codes::NOTHING_CHANGED => Some(Self::NothingChanged),
            codes::ALL_CHANGED => Some(Self::AllChanged),
            codes::SELECTION_CHANGED => Some(Self::SelectionChanged),
            _ => None,
        }
    }
}

/// Outcome of a row mutation together with the selection that survives it.
///
/// The selection is expressed in row indices valid *after* the mutation. An
/// empty selection means the host should leave no row selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowUpdate {
    /// What the host must repaint.
    pub outcome: UpdateOutcome,
    /// Rows to select once the repaint is done.
    pub selection: Vec<usize>,
}

impl RowUpdate {
    /// Mutation was refused or had no effect.
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Table content changed; select `selection` afterwards.
    pub fn all_changed(selection: Vec<usize>) -> Self {
        Self {
            outcome: UpdateOutcome::AllChanged,
            selection,
        }
    }

    /// Only the selection moved.
    pub fn selection_changed(selection: Vec<usize>) -> Self {
        Self {
            outcome: UpdateOutcome::SelectionChanged,
            selection,
        }
    }
}

/// Result of a modal show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalOutcome {
    /// The user accepted the given row.
    Chosen(usize),
    /// The user dismissed the dialog without choosing.
    NoSelection,
    /// The chooser had no rows to offer.
    Empty,
}

impl ModalOutcome {
    /// Raw protocol code for this outcome.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Chosen(row) => row as i32,
            Self::NoSelection => codes::NO_SELECTION,
            Self::Empty => codes::EMPTY_CHOOSER,
        }
    }

    /// Parses a raw protocol code.
    ///
    /// Non-negative values are row indices; only the two modal sentinels are
    /// accepted as negatives.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            codes::NO_SELECTION => Some(Self::NoSelection),
            codes::EMPTY_CHOOSER => Some(Self::Empty),
            row if row >= 0 => Some(Self::Chosen(row as usize)),
            _ => None,
        }
    }
}

/// Result of a non-modal show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonModalOutcome {
    /// The chooser window is now open (or was brought to the front).
    Opened,
    /// A live chooser with the same identity already exists; nothing opened.
    AlreadyExists,
}

impl NonModalOutcome {
    /// Raw protocol code for this outcome.
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Opened => 0,
            Self::AlreadyExists => codes::ALREADY_EXISTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_outcome_raw_codes() {
        assert_eq!(UpdateOutcome::NothingChanged.as_raw(), 0);
        assert_eq!(UpdateOutcome::AllChanged.as_raw(), 1);
        assert_eq!(UpdateOutcome::SelectionChanged.as_raw(), 2);

        for outcome in [
            UpdateOutcome::NothingChanged,
            UpdateOutcome::AllChanged,
            UpdateOutcome::SelectionChanged,
        ] {
            assert_eq!(UpdateOutcome::from_raw(outcome.as_raw()), Some(outcome));
        }
        assert_eq!(UpdateOutcome::from_raw(-1), None);
        assert_eq!(UpdateOutcome::from_raw(3), None);
    }

    #[test]
    fn test_update_outcome_default_is_nothing_changed() {
        assert_eq!(UpdateOutcome::default(), UpdateOutcome::NothingChanged);
        assert_eq!(RowUpdate::unchanged().outcome, UpdateOutcome::NothingChanged);
        assert!(RowUpdate::unchanged().selection.is_empty());
    }

    #[test]
    fn test_modal_outcome_raw_codes() {
        assert_eq!(ModalOutcome::Chosen(5).as_raw(), 5);
        assert_eq!(ModalOutcome::NoSelection.as_raw(), codes::NO_SELECTION);
        assert_eq!(ModalOutcome::Empty.as_raw(), codes::EMPTY_CHOOSER);

        assert_eq!(ModalOutcome::from_raw(0), Some(ModalOutcome::Chosen(0)));
        assert_eq!(ModalOutcome::from_raw(-1), Some(ModalOutcome::NoSelection));
        assert_eq!(ModalOutcome::from_raw(-2), Some(ModalOutcome::Empty));
        assert_eq!(ModalOutcome::from_raw(-3), None);
    }

    #[test]
    fn test_non_modal_outcome_raw_codes() {
        assert_eq!(NonModalOutcome::Opened.as_raw(), 0);
        assert_eq!(
            NonModalOutcome::AlreadyExists.as_raw(),
            codes::ALREADY_EXISTS
        );
    }

    #[test]
    fn test_row_update_constructors() {
        let update = RowUpdate::all_changed(vec![3]);
        assert_eq!(update.outcome, UpdateOutcome::AllChanged);
        assert_eq!(update.selection, vec![3]);

        let update = RowUpdate::selection_changed(vec![0, 2]);
        assert_eq!(update.outcome, UpdateOutcome::SelectionChanged);
        assert_eq!(update.selection, vec![0, 2]);
    }
}

//! Chooser descriptions.
//!
//! A [`ChooserSpec`] is the immutable half of a chooser: everything about it
//! that is known before any row exists. Content and behavior live in the
//! [`ChooserModel`](crate::model::ChooserModel); display belongs to the host.
//!
//! Specs are built through [`ChooserSpec::builder`], which enforces the
//! internal consistency rules (selection shape vs the multi-select flag,
//! embedded vs modal vs window placement) at construction time.
//!
//! # Example
//!
//! ```
//! use picklist::{ChooserFlags, ChooserSpec, Column, ColumnFormat};
//!
//! let spec = ChooserSpec::builder("Open segments")
//!     .with_column(Column::new("Name", 16))
//!     .with_column(Column::new("Start", 12).with_format(ColumnFormat::Hex))
//!     .with_flags(ChooserFlags::CAN_REFRESH)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(spec.columns().len(), 2);
//! assert!(!spec.is_embedded());
//! ```

use std::fmt;
use std::fmt::Write as FmtWrite;

use crate::capability::Capabilities;
use crate::column::Column;
use crate::error::SpecError;
use crate::flags::ChooserFlags;
use crate::model::IconId;

/// Rows selected when the chooser first appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSelection {
    /// Cursor position for a single-selection chooser; `None` starts without
    /// a selected row.
    Single(Option<usize>),
    /// Initially selected rows of a multi-selection chooser; may be empty.
    Multi(Vec<usize>),
}

/// Window placement hint in character cells.
///
/// Hosts are free to ignore it; text-mode hosts honor it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left column.
    pub x1: i32,
    /// Top row.
    pub y1: i32,
    /// Right column.
    pub x2: i32,
    /// Bottom row.
    pub y2: i32,
}

/// Size of an embedded chooser inside its containing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedSize {
    /// Width in character cells.
    pub width: u32,
    /// Height in rows.
    pub height: u32,
}

/// Stable identity of a chooser within one process.
///
/// Two non-modal choosers with equal identities are "the same chooser" for
/// deduplication: the host refuses to open the second while the first lives.
/// Modality is deliberately excluded, so a modal and a non-modal showing of
/// the same spec still collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChooserIdentity(String);

impl ChooserIdentity {
    /// The identity as a string key, suitable for host-side maps.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChooserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable description of a chooser.
///
/// Built once via [`ChooserSpec::builder`] and shared by reference from then
/// on; nothing about a spec changes after construction.
#[derive(Debug, Clone)]
pub struct ChooserSpec {
    title: String,
    columns: Vec<Column>,
    flags: ChooserFlags,
    default_selection: DefaultSelection,
    forbidden: Capabilities,
    placement: Option<Placement>,
    embedded: bool,
    embed_size: Option<EmbedSize>,
    popup_names: Option<Vec<String>>,
    icon: Option<IconId>,
}

impl ChooserSpec {
    /// Starts building a spec with the given window title.
    pub fn builder(title: impl Into<String>) -> ChooserSpecBuilder {
        ChooserSpecBuilder::new(title)
    }

    /// Window (or embedded pane) title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Table columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Behavior flags.
    pub fn flags(&self) -> ChooserFlags {
        self.flags
    }

    /// Rows selected when the chooser first appears.
    pub fn default_selection(&self) -> &DefaultSelection {
        &self.default_selection
    }

    /// Capabilities force-disabled regardless of what the model declares.
    pub fn forbidden(&self) -> Capabilities {
        self.forbidden
    }

    /// Window placement hint.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Whether this chooser lives inside a host form instead of its own
    /// window.
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Requested size of an embedded chooser.
    pub fn embed_size(&self) -> Option<EmbedSize> {
        self.embed_size
    }

    /// Labels for extra context-menu entries, in host menu order.
    pub fn popup_names(&self) -> Option<&[String]> {
        self.popup_names.as_deref()
    }

    /// Window icon.
    pub fn icon(&self) -> Option<IconId> {
        self.icon
    }

    /// Identity used for non-modal deduplication.
    ///
    /// Derived from the title, the column signature, and the flags with
    /// [`MODAL`](ChooserFlags::MODAL) masked out. Stable for the lifetime of
    /// the process, not across runs.
    pub fn identity(&self) -> ChooserIdentity {
        let mut key = String::with_capacity(self.title.len() + 16 * self.columns.len());
        key.push_str(&self.title);
        let _ = write!(
            key,
            "|{:08x}",
            self.flags.without(ChooserFlags::MODAL).bits()
        );
        for col in &self.columns {
            let _ = write!(key, "|{}:{}:{}", col.label, col.format.as_str(), col.width);
        }
        ChooserIdentity(key)
    }

    /// Name of the first mandatory attribute that is missing, if any.
    pub(crate) fn missing_mandatory_attr(&self) -> Option<&'static str> {
        if self.title.is_empty() {
            Some("title")
        } else if self.columns.is_empty() {
            Some("columns")
        } else {
            None
        }
    }
}

/// Builder for [`ChooserSpec`].
///
/// [`build`](Self::build) checks the consistency rules; a spec that exists is
/// internally consistent. Whether mandatory attributes like the title are
/// non-empty is checked later, when the chooser is shown.
#[derive(Debug)]
pub struct ChooserSpecBuilder {
    title: String,
    columns: Vec<Column>,
    flags: ChooserFlags,
    default_selection: Option<DefaultSelection>,
    forbidden: Capabilities,
    placement: Option<Placement>,
    embedded: bool,
    embed_size: Option<EmbedSize>,
    popup_names: Option<Vec<String>>,
    icon: Option<IconId>,
}

impl ChooserSpecBuilder {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
            flags: ChooserFlags::NONE,
            default_selection: None,
            forbidden: Capabilities::NONE,
            placement: None,
            embedded: false,
            embed_size: None,
            popup_names: None,
            icon: None,
        }
    }

    /// Appends one column.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Replaces the column list.
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the behavior flags.
    pub fn with_flags(mut self, flags: ChooserFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the initial selection.
    ///
    /// Defaults to the first row: `Single(Some(0))`, or `Multi(vec![0])`
    /// under [`ChooserFlags::MULTI`].
    pub fn with_default(mut self, selection: DefaultSelection) -> Self {
        self.default_selection = Some(selection);
        self
    }

    /// Force-disables capabilities the model may declare.
    pub fn with_forbidden(mut self, forbidden: Capabilities) -> Self {
        self.forbidden = forbidden;
        self
    }

    /// Sets the window placement hint.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Marks this chooser as embedded in a host form.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Sets the size of an embedded chooser.
    pub fn with_embed_size(mut self, size: EmbedSize) -> Self {
        self.embed_size = Some(size);
        self
    }

    /// Adds labels for extra context-menu entries.
    pub fn with_popup_names(mut self, names: Vec<String>) -> Self {
        self.popup_names = Some(names);
        self
    }

    /// Sets the window icon.
    pub fn with_icon(mut self, icon: IconId) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Validates and builds the spec.
    pub fn build(self) -> Result<ChooserSpec, SpecError> {
        let multi = self.flags.contains(ChooserFlags::MULTI);
        let default_selection = match self.default_selection {
            Some(selection) => {
                match (&selection, multi) {
                    (DefaultSelection::Single(_), true) | (DefaultSelection::Multi(_), false) => {
                        return Err(SpecError::SelectionShapeMismatch);
                    }
                    _ => {}
                }
                selection
            }
            None if multi => DefaultSelection::Multi(vec![0]),
            None => DefaultSelection::Single(Some(0)),
        };

        if self.embedded {
            if self.flags.contains(ChooserFlags::MODAL) {
                return Err(SpecError::EmbeddedModalConflict);
            }
            if self.placement.is_some() {
                return Err(SpecError::PlacementForEmbedded);
            }
        } else if self.embed_size.is_some() {
            return Err(SpecError::EmbedSizeWithoutEmbedded);
        }

        Ok(ChooserSpec {
            title: self.title,
            columns: self.columns,
            flags: self.flags,
            default_selection,
            forbidden: self.forbidden,
            placement: self.placement,
            embedded: self.embedded,
            embed_size: self.embed_size,
            popup_names: self.popup_names,
            icon: self.icon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnFormat;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Name", 16),
            Column::new("Address", 12).with_format(ColumnFormat::Hex),
        ]
    }

    #[test]
    fn test_default_selection_follows_multi_flag() {
        let single = ChooserSpec::builder("t")
            .with_columns(columns())
            .build()
            .unwrap();
        assert_eq!(
            single.default_selection(),
            &DefaultSelection::Single(Some(0))
        );

        let multi = ChooserSpec::builder("t")
            .with_columns(columns())
            .with_flags(ChooserFlags::MULTI)
            .build()
            .unwrap();
        assert_eq!(multi.default_selection(), &DefaultSelection::Multi(vec![0]));
    }

    #[test]
    fn test_selection_shape_must_match_multi_flag() {
        let err = ChooserSpec::builder("t")
            .with_columns(columns())
            .with_flags(ChooserFlags::MULTI)
            .with_default(DefaultSelection::Single(Some(2)))
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::SelectionShapeMismatch);

        let err = ChooserSpec::builder("t")
            .with_columns(columns())
            .with_default(DefaultSelection::Multi(vec![0, 1]))
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::SelectionShapeMismatch);
    }

    #[test]
    fn test_explicit_none_selection_is_allowed() {
        let spec = ChooserSpec::builder("t")
            .with_columns(columns())
            .with_default(DefaultSelection::Single(None))
            .build()
            .unwrap();
        assert_eq!(spec.default_selection(), &DefaultSelection::Single(None));

        let spec = ChooserSpec::builder("t")
            .with_columns(columns())
            .with_flags(ChooserFlags::MULTI)
            .with_default(DefaultSelection::Multi(Vec::new()))
            .build()
            .unwrap();
        assert_eq!(
            spec.default_selection(),
            &DefaultSelection::Multi(Vec::new())
        );
    }

    #[test]
    fn test_embedded_excludes_modal_and_placement() {
        let err = ChooserSpec::builder("t")
            .with_columns(columns())
            .with_flags(ChooserFlags::MODAL)
            .embedded()
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::EmbeddedModalConflict);

        let err = ChooserSpec::builder("t")
            .with_columns(columns())
            .embedded()
            .with_placement(Placement {
                x1: 0,
                y1: 0,
                x2: 80,
                y2: 25,
            })
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::PlacementForEmbedded);
    }

    #[test]
    fn test_embed_size_requires_embedded() {
        let err = ChooserSpec::builder("t")
            .with_columns(columns())
            .with_embed_size(EmbedSize {
                width: 40,
                height: 10,
            })
            .build()
            .unwrap_err();
        assert_eq!(err, SpecError::EmbedSizeWithoutEmbedded);

        let spec = ChooserSpec::builder("t")
            .with_columns(columns())
            .embedded()
            .with_embed_size(EmbedSize {
                width: 40,
                height: 10,
            })
            .build()
            .unwrap();
        assert!(spec.is_embedded());
        assert_eq!(
            spec.embed_size(),
            Some(EmbedSize {
                width: 40,
                height: 10,
            })
        );
    }

    #[test]
    fn test_identity_ignores_modal_flag() {
        let windowed = ChooserSpec::builder("Segments")
            .with_columns(columns())
            .build()
            .unwrap();
        let modal = ChooserSpec::builder("Segments")
            .with_columns(columns())
            .with_flags(ChooserFlags::MODAL)
            .build()
            .unwrap();

        assert_eq!(windowed.identity(), modal.identity());
    }

    #[test]
    fn test_identity_tracks_title_columns_and_flags() {
        let base = ChooserSpec::builder("Segments")
            .with_columns(columns())
            .build()
            .unwrap();

        let renamed = ChooserSpec::builder("Functions")
            .with_columns(columns())
            .build()
            .unwrap();
        assert_ne!(base.identity(), renamed.identity());

        let reshaped = ChooserSpec::builder("Segments")
            .with_column(Column::new("Name", 16))
            .build()
            .unwrap();
        assert_ne!(base.identity(), reshaped.identity());

        let reflagged = ChooserSpec::builder("Segments")
            .with_columns(columns())
            .with_flags(ChooserFlags::MULTI)
            .build()
            .unwrap();
        assert_ne!(base.identity(), reflagged.identity());
    }

    #[test]
    fn test_missing_mandatory_attrs() {
        let untitled = ChooserSpec::builder("")
            .with_columns(columns())
            .build()
            .unwrap();
        assert_eq!(untitled.missing_mandatory_attr(), Some("title"));

        let columnless = ChooserSpec::builder("t").build().unwrap();
        assert_eq!(columnless.missing_mandatory_attr(), Some("columns"));

        let complete = ChooserSpec::builder("t")
            .with_columns(columns())
            .build()
            .unwrap();
        assert_eq!(complete.missing_mandatory_attr(), None);
    }
}

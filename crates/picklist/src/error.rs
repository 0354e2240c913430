//! Error types for the chooser crate.

use picklist_core::{HostError, codes};
use thiserror::Error;

/// Inconsistencies caught while building a
/// [`ChooserSpec`](crate::spec::ChooserSpec).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecError {
    /// The default selection shape does not match the multi-select flag.
    #[error("default selection shape does not match the multi-select flag")]
    SelectionShapeMismatch,

    /// Embedded choosers cannot be modal.
    #[error("embedded choosers cannot carry the modal flag")]
    EmbeddedModalConflict,

    /// An embed size only makes sense for embedded choosers.
    #[error("embed size given for a non-embedded chooser")]
    EmbedSizeWithoutEmbedded,

    /// Embedded choosers are placed by their containing form.
    #[error("window placement given for an embedded chooser")]
    PlacementForEmbedded,
}

/// Errors surfaced by controller operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChooserError {
    /// A mandatory chooser attribute is missing or empty.
    #[error("mandatory chooser attribute `{0}` is missing or empty")]
    MissingAttribute(&'static str),

    /// The operation requires the opposite embedded/windowed mode.
    #[error("{0}")]
    ModeMismatch(&'static str),

    /// This controller already ran its one show or embed cycle.
    #[error("chooser controller has already been shown")]
    AlreadyShown,

    /// There is no live widget behind this controller.
    #[error("chooser has no live widget")]
    NotOpen,

    /// Spec construction failed.
    #[error("invalid chooser spec: {0}")]
    InvalidSpec(#[from] SpecError),

    /// The host failed; its error is carried unchanged.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

impl ChooserError {
    /// Status code of the legacy chooser protocol, for hosts bridging to
    /// C-style callers.
    ///
    /// Host failures have no protocol code and yield `None`; they were always
    /// exceptions, never sentinels.
    pub fn raw_code(&self) -> Option<i32> {
        match self {
            Self::MissingAttribute(_)
            | Self::ModeMismatch(_)
            | Self::NotOpen
            | Self::InvalidSpec(_) => Some(codes::NO_ATTR),
            Self::AlreadyShown => Some(codes::ALREADY_EXISTS),
            Self::Host(_) => None,
        }
    }
}

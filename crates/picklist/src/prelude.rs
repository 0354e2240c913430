//! Prelude module for Picklist.
//!
//! This module re-exports the most commonly used types for convenient
//! importing:
//!
//! ```
//! use picklist::prelude::*;
//! ```
//!
//! This provides access to:
//! - Spec building (`ChooserSpec`, `Column`, `ChooserFlags`)
//! - The data-source contract (`ChooserModel`, `Capabilities`)
//! - The display lifecycle (`ChooserController`, outcome types)
//! - The host seam (`WindowHost`, `ChooserSession`, handles)

// ============================================================================
// Spec Building
// ============================================================================

pub use crate::column::{Column, ColumnFormat};
pub use crate::flags::{ChooserFlags, QuickFilterMode};
pub use crate::spec::{ChooserSpec, DefaultSelection, EmbedSize, Placement};

// ============================================================================
// Data Source
// ============================================================================

pub use crate::capability::Capabilities;
pub use crate::model::{ChooserModel, IconId, RowAttributes, RowStyle};

// ============================================================================
// Display Lifecycle
// ============================================================================

pub use crate::controller::{ChooserController, ControllerState};
pub use crate::error::{ChooserError, SpecError};
pub use picklist_core::{ModalOutcome, NonModalOutcome, RowUpdate, UpdateOutcome};

// ============================================================================
// Host Seam
// ============================================================================

pub use crate::host::{EmbeddedBacking, OpenReply, WindowHost};
pub use crate::session::{ChooserSession, RowOp};
pub use picklist_core::{PopupMenuId, ScriptTimeout, WidgetId};

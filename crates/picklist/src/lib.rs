//! Picklist - embeddable list choosers over a pluggable window host.
//!
//! A chooser is a table the user picks rows from: modal ("pick one and
//! return"), non-modal (a live window that stays open), or embedded inside a
//! larger form. This crate implements everything about a chooser except the
//! pixels. Three pieces meet here:
//!
//! - [`ChooserSpec`] describes the chooser: title, columns, flags, defaults
//! - [`ChooserModel`] supplies the rows and handles row operations
//! - [`WindowHost`] is the windowing backend that actually displays it
//!
//! A [`ChooserController`] ties them together for one showing: modal
//! ([`show_modal`](ChooserController::show_modal)), non-modal
//! ([`show`](ChooserController::show)), or embedded
//! ([`embed`](ChooserController::embed)).
//!
//! # Example
//!
//! ```
//! use picklist::{ChooserFlags, ChooserModel, ChooserSpec, Column};
//!
//! struct Processes {
//!     rows: Vec<(u32, String)>,
//! }
//!
//! impl ChooserModel for Processes {
//!     fn row_count(&self) -> usize {
//!         self.rows.len()
//!     }
//!
//!     fn render_row(&self, index: usize) -> Vec<String> {
//!         let (pid, name) = &self.rows[index];
//!         vec![pid.to_string(), name.clone()]
//!     }
//! }
//!
//! let spec = ChooserSpec::builder("Attach to process")
//!     .with_column(Column::new("PID", 8))
//!     .with_column(Column::new("Name", 32))
//!     .with_flags(ChooserFlags::MODAL)
//!     .build()?;
//! # Ok::<(), picklist::SpecError>(())
//! ```
//!
//! Displaying it takes a [`WindowHost`] implementation; see the
//! `process_picker` example for a minimal terminal host.

pub mod capability;
pub mod column;
pub mod controller;
pub mod error;
pub mod flags;
pub mod host;
pub mod model;
pub mod prelude;
pub mod session;
pub mod spec;
mod trampoline;

pub use picklist_core::*;

pub use capability::Capabilities;
pub use column::{Column, ColumnFormat};
pub use controller::{ChooserController, ControllerState};
pub use error::{ChooserError, SpecError};
pub use flags::{ChooserFlags, QuickFilterMode};
pub use host::{EmbeddedBacking, OpenReply, WindowHost};
pub use model::{ChooserModel, IconId, RowAttributes, RowStyle, adjust_selection};
pub use session::{ChooserSession, RowOp};
pub use spec::{
    ChooserIdentity, ChooserSpec, ChooserSpecBuilder, DefaultSelection, EmbedSize, Placement,
};

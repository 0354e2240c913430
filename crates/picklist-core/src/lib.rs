//! Core host seam for Picklist.
//!
//! This crate provides the pieces shared between chooser widgets and the
//! window host that displays them:
//!
//! - **Handles**: Generational widget ids and popup menu ids
//! - **Popup Hooks**: Host-wide broadcast of context-menu construction
//! - **Status Codes**: The raw chooser protocol and its typed outcomes
//! - **Timeouts**: Scoped suspension of the host's script watchdog
//!
//! # Popup Hook Example
//!
//! ```
//! use std::sync::Arc;
//! use picklist_core::{PopupHook, PopupHookRegistry, PopupMenuId, WidgetId};
//!
//! struct MenuLogger;
//!
//! impl PopupHook for MenuLogger {
//!     fn populating_popup(&self, widget: WidgetId, menu: PopupMenuId) {
//!         println!("menu {:?} opening for widget {:?}", menu, widget);
//!     }
//! }
//!
//! let registry = PopupHookRegistry::new();
//! let id = registry.register(Arc::new(MenuLogger));
//!
//! // The host broadcasts while it assembles a context menu.
//! registry.deliver(WidgetId::from_raw(1), PopupMenuId::new(1));
//!
//! registry.unregister(id);
//! ```
//!
//! # Timeout Example
//!
//! ```
//! use picklist_core::{ScriptTimeout, TimeoutSuspension};
//!
//! struct Host;
//!
//! impl ScriptTimeout for Host {}
//!
//! let host = Host;
//! {
//!     let _guard = TimeoutSuspension::new(&host);
//!     // Block on a modal dialog while the watchdog is off...
//! }
//! // Dropping the guard restored the previous setting.
//! ```

pub mod error;
pub mod handle;
pub mod hook;
pub mod logging;
pub mod status;
pub mod timeout;

pub use error::{HostError, HostResult};
pub use handle::{PopupMenuId, WidgetId};
pub use hook::{HookId, PopupHook, PopupHookRegistry};
pub use status::{ModalOutcome, NonModalOutcome, RowUpdate, UpdateOutcome, codes};
pub use timeout::{ScriptTimeout, TimeoutSuspension, TimeoutValue};

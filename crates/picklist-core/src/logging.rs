//! Logging facilities for the Picklist core crate.
//!
//! Picklist uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core seam target.
    pub const CORE: &str = "picklist_core";
    /// Popup hook registry target.
    pub const HOOK: &str = "picklist_core::hook";
    /// Script-timeout suspension target.
    pub const TIMEOUT: &str = "picklist_core::timeout";
}

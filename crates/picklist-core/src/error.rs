//! Error types for the host seam.

use std::fmt;

/// Failures reported by a host windowing backend.
///
/// Hosts carry their own diagnostics as strings; the chooser layer never
/// inspects them beyond logging and propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Failed to create a widget or window.
    WidgetCreation(String),
    /// A host resource (icon table, handle space) is exhausted.
    ResourceExhausted(String),
    /// The host replied outside the protocol for the requested mode.
    Protocol(String),
    /// Any other host-side failure.
    Backend(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidgetCreation(msg) => {
                write!(f, "Failed to create widget: {msg}")
            }
            Self::ResourceExhausted(msg) => {
                write!(f, "Host resource exhausted: {msg}")
            }
            Self::Protocol(msg) => {
                write!(f, "Host protocol violation: {msg}")
            }
            Self::Backend(msg) => {
                write!(f, "Host backend error: {msg}")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// A specialized Result type for host operations.
pub type HostResult<T> = std::result::Result<T, HostError>;

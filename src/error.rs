//! Error types for inset-link.

use thiserror::Error;

/// Errors surfaced by bridge-backed operations.
///
/// Rejection of the underlying bridge call is the only failure signal —
/// there is no structured code taxonomy distinguishing native-layer
/// failure reasons, and no operation is retried.
#[derive(Error, Debug)]
pub enum InsetLinkError {
    /// The native layer rejected a create/delete/setListener/setMask call.
    #[error("Bridge rejected request: {0}")]
    BridgeRejected(String),

    /// The bridge dropped its event channel before acknowledging
    /// registration.
    #[error("Bridge channel closed: {0}")]
    ChannelClosed(String),
}

/// Result type for inset-link operations.
pub type Result<T> = std::result::Result<T, InsetLinkError>;

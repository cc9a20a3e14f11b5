//! The bridge channel contract consumed by this crate.
//!
//! The bridge is the boundary between subscription logic and the native
//! measurement layer. Transport mechanics (WebView RPC, JNI, FFI, a test
//! double) are an implementor concern; this crate only sees typed calls
//! and typed event streams.
//!
//! The native side's multi-fire success callback is rendered as a bounded
//! [`mpsc`] receiver; its at-most-once terminal error callback is the
//! `Result` of the call itself. A stream that closes after registration is
//! terminal silence, not an error.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::models::{BridgeEvent, InsetMask, InsetRect, SubscriptionConfig};

/// Whether the platform behind the bridge has a native inset concept.
///
/// Checked once when a subscription or facade binds its strategy; never
/// re-checked per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsetCapability {
    /// The platform measures insets natively and streams updates over the
    /// bridge.
    Native,
    /// No native inset concept. Subscriptions come up detached: locally
    /// identified, permanently at the zero rect, and freed without bridge
    /// interaction.
    Unsupported,
}

/// Event stream for one subscription: one `Init`, then zero-or-more
/// `Update`s, in native emission order.
pub type BridgeEventStream = mpsc::Receiver<BridgeEvent>;

/// Raw measurement stream for the legacy process-wide listener.
pub type InsetStream = mpsc::Receiver<InsetRect>;

/// Asynchronous request/response + push-event transport to the native
/// inset subsystem.
#[async_trait]
pub trait InsetBridge: Send + Sync {
    /// Platform capability. Must be stable for the lifetime of the bridge.
    fn capability(&self) -> InsetCapability;

    /// Register a new native inset observer.
    ///
    /// On success the returned stream carries the `Init` acknowledgement
    /// followed by update events until the observer is deleted. Rejection
    /// by the native layer is the `Err` of this call.
    async fn create(&self, config: SubscriptionConfig) -> Result<BridgeEventStream>;

    /// Tear down the native observer identified by `id`. Resolves when the
    /// native layer acknowledges; afterwards the observer's stream closes
    /// and no further updates are emitted for it.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Register the legacy process-wide listener. The stream carries raw
    /// measurements, the first of which doubles as the readiness
    /// acknowledgement.
    async fn set_listener(&self) -> Result<InsetStream>;

    /// Re-issue the legacy registration with a new mask. The re-measured
    /// insets are returned directly, without waiting for an event.
    async fn set_mask(&self, mask: InsetMask) -> Result<InsetRect>;
}

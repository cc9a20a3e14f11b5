//! # inset-link
//!
//! Client SDK for native display-inset subscriptions: system bars,
//! notches/cutouts, the on-screen keyboard, and gesture areas.
//!
//! The native measurement layer sits behind the [`InsetBridge`] trait, an
//! opaque asynchronous request/response + push-event transport. On top of
//! it this crate manages zero-to-many independently configured
//! [`InsetSubscription`]s — each with its own native registration,
//! last-known-value cache, and ordered listener fan-out — plus the
//! process-wide [`LegacyInsets`] facade kept for older hosts.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use inset_link::{
//!     InsetBridge, InsetListener, InsetMask, InsetSubscription, SubscriptionConfig,
//! };
//!
//! # async fn example(bridge: Arc<dyn InsetBridge>) -> inset_link::Result<()> {
//! let subscription = InsetSubscription::create(
//!     Arc::clone(&bridge),
//!     SubscriptionConfig::new().with_mask(InsetMask::DISPLAY_CUTOUT | InsetMask::IME),
//! )
//! .await?;
//!
//! // Fires once immediately with the cached value, then on every update.
//! let listener: InsetListener = Arc::new(|inset| {
//!     println!("top inset: {}", inset.top);
//! });
//! subscription.add_listener(Arc::clone(&listener));
//!
//! // Release the native observer when done.
//! subscription.free().await?;
//! # Ok(())
//! # }
//! ```

mod bridge;
mod error;
mod legacy;
mod models;
mod state;
mod subscription;

pub use bridge::{BridgeEventStream, InsetBridge, InsetCapability, InsetStream};
pub use error::{InsetLinkError, Result};
pub use legacy::LegacyInsets;
pub use models::{BridgeEvent, InsetMask, InsetRect, SubscriptionConfig};
pub use state::InsetListener;
pub use subscription::InsetSubscription;

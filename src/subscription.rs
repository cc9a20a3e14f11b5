//! Inset subscription lifecycle: `Pending → Ready → Freed`.
//!
//! A subscription couples one native-side registration to one inset cache
//! and one listener registry. The factory only returns instances that have
//! reached `Ready`; freeing consumes the instance, so `Freed` has no
//! further transitions by construction.

use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::bridge::{BridgeEventStream, InsetBridge, InsetCapability};
use crate::error::{InsetLinkError, Result};
use crate::models::{BridgeEvent, InsetRect, SubscriptionConfig};
use crate::state::{InsetListener, SharedState};

/// How the subscription is bound to the platform. Chosen once at creation
/// from the bridge capability; never re-examined per operation.
enum Binding {
    /// Registered with the native layer. The pump task drains the event
    /// channel until the bridge closes it.
    Native {
        bridge: Arc<dyn InsetBridge>,
        _pump: JoinHandle<()>,
    },
    /// No native inset concept on this platform. The identifier was
    /// synthesized locally and the cache stays at the zero rect forever.
    Detached,
}

/// One configured, independently lifecycled observer of inset changes.
///
/// It's valid to have multiple subscriptions with different
/// configurations; each has its own cache and listener list. Keeping the
/// instance count low is cheaper on the native side — share one
/// subscription between consumers where one configuration suffices.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use inset_link::{InsetBridge, InsetListener, InsetSubscription, SubscriptionConfig};
///
/// # async fn example(bridge: Arc<dyn InsetBridge>) -> inset_link::Result<()> {
/// let subscription = InsetSubscription::create(bridge, SubscriptionConfig::new()).await?;
///
/// let listener: InsetListener = Arc::new(|inset| {
///     println!("insets now {:?}", inset);
/// });
/// subscription.add_listener(Arc::clone(&listener));
///
/// // ... later, release the native observer:
/// subscription.free().await?;
/// # Ok(())
/// # }
/// ```
pub struct InsetSubscription {
    id: String,
    state: Arc<SharedState>,
    binding: Binding,
}

impl std::fmt::Debug for InsetSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsetSubscription").field("id", &self.id).finish()
    }
}

impl InsetSubscription {
    /// Register a new inset observer and wait for it to become ready.
    ///
    /// On platforms without a native inset concept the subscription comes
    /// up immediately with a locally synthesized identifier, no bridge
    /// call is made, and no update will ever arrive. Otherwise the config
    /// is sent over the bridge and this resolves once the native layer
    /// acknowledges the registration with the assigned identifier.
    ///
    /// Rejection by the native layer surfaces as the `Err` of this call;
    /// no instance is produced.
    pub async fn create(
        bridge: Arc<dyn InsetBridge>,
        config: SubscriptionConfig,
    ) -> Result<Self> {
        match bridge.capability() {
            InsetCapability::Unsupported => {
                let id = Uuid::new_v4().to_string();
                log::debug!("[CREATE] No native inset concept; detached subscription {}", id);
                Ok(Self {
                    id,
                    state: Arc::new(SharedState::new()),
                    binding: Binding::Detached,
                })
            }
            InsetCapability::Native => {
                let mut events = bridge.create(config).await?;

                // Exactly one init acknowledgement resolves the pending
                // registration. Updates are not part of the protocol
                // before init; drop anything else that shows up.
                let id = loop {
                    match events.recv().await {
                        Some(BridgeEvent::Init { data }) => break data,
                        Some(event) => {
                            log::debug!("[CREATE] Dropping pre-init event: {:?}", event);
                        }
                        None => {
                            return Err(InsetLinkError::ChannelClosed(
                                "event channel closed before init acknowledgement".to_string(),
                            ));
                        }
                    }
                };

                let state = Arc::new(SharedState::new());
                let pump = tokio::spawn(event_pump(events, id.clone(), Arc::clone(&state)));
                log::debug!("[CREATE] Subscription {} ready", id);

                Ok(Self {
                    id,
                    state,
                    binding: Binding::Native {
                        bridge,
                        _pump: pump,
                    },
                })
            }
        }
    }

    /// The identifier assigned by the native layer (or synthesized locally
    /// on platforms without native support).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The most recent measurement, or the zero rect if none has arrived.
    /// Synchronous; never suspends; always succeeds.
    pub fn get_inset(&self) -> InsetRect {
        self.state.current()
    }

    /// Deprecated alias for [`get_inset`](Self::get_inset).
    #[deprecated(note = "use `get_inset` instead")]
    pub fn get_insets(&self) -> InsetRect {
        log::warn!("get_insets() is deprecated, use get_inset() instead");
        self.get_inset()
    }

    /// Register a listener at the end of the registry and immediately
    /// invoke it once with the cached value.
    ///
    /// Note that updates may fire even when nothing actually changed.
    /// Registering the same `Arc` twice results in two invocations per
    /// update. Retain the `Arc` to remove the listener later. A panicking
    /// listener aborts the remaining fan-out for that event.
    pub fn add_listener(&self, listener: InsetListener) {
        self.state.add_listener_with_current(listener);
    }

    /// Remove the first registry entry matching `listener` by identity.
    /// No-op when it was never registered.
    pub fn remove_listener(&self, listener: &InsetListener) {
        self.state.remove_listener(listener);
    }

    /// Free the native resources associated with this subscription.
    ///
    /// Consumes the subscription: after freeing it cannot receive updates
    /// or be passed to further operations. Listener references retained by
    /// the caller should be dropped too. Equivalent to
    /// [`free_id`](Self::free_id) with [`id`](Self::id).
    pub async fn free(self) -> Result<()> {
        match self.binding {
            Binding::Detached => {
                log::debug!("[FREE] Detached subscription {} freed locally", self.id);
                Ok(())
            }
            Binding::Native { bridge, _pump } => {
                bridge.delete(&self.id).await?;
                log::debug!("[FREE] Subscription {} deleted", self.id);
                Ok(())
            }
        }
    }

    /// Free a subscription by its raw identifier.
    ///
    /// The id-based form of [`free`](Self::free), for callers that only
    /// retained the identifier. On platforms without a native inset
    /// concept this resolves immediately with no bridge interaction.
    pub async fn free_id(bridge: &dyn InsetBridge, id: &str) -> Result<()> {
        match bridge.capability() {
            InsetCapability::Unsupported => Ok(()),
            InsetCapability::Native => {
                bridge.delete(id).await?;
                log::debug!("[FREE] Subscription {} deleted", id);
                Ok(())
            }
        }
    }
}

/// Drains one subscription's event channel: matching updates replace the
/// cache and fan out to listeners in registration order; everything else
/// is dropped. Ends when the bridge closes the channel (native teardown).
async fn event_pump(mut events: BridgeEventStream, id: String, state: Arc<SharedState>) {
    while let Some(event) = events.recv().await {
        match event {
            BridgeEvent::Update { id: event_id, data } if event_id == id => {
                state.apply_update(data);
            }
            BridgeEvent::Update { id: event_id, .. } => {
                log::debug!(
                    "[PUMP] Dropping update for foreign subscription {} (expected {})",
                    event_id,
                    id
                );
            }
            BridgeEvent::Init { .. } => {
                log::debug!("[PUMP] Dropping duplicate init for subscription {}", id);
            }
        }
    }
    log::debug!("[PUMP] Event channel closed for subscription {}", id);
}

//! Legacy process-wide inset facade.
//!
//! Older hosts observed a single, implicitly shared inset feed instead of
//! per-consumer subscriptions. That surface survives here as an explicitly
//! constructed context object: the host builds one `LegacyInsets`, injects
//! it where needed, and wires its environment-ready signal to
//! initialization. There is no global instance.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::bridge::{InsetBridge, InsetCapability};
use crate::error::{InsetLinkError, Result};
use crate::models::{InsetMask, InsetRect};
use crate::state::{InsetListener, SharedState};

/// Process-wide single inset feed with the same cache + registry shape as
/// a subscription.
///
/// Construct once, share by reference. Initialization is idempotent:
/// repeated or concurrent [`init`](Self::init) calls (and a second
/// readiness trigger) share one underlying registration.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use inset_link::{InsetBridge, LegacyInsets};
///
/// # async fn example(bridge: Arc<dyn InsetBridge>) -> inset_link::Result<()> {
/// let insets = Arc::new(LegacyInsets::new(bridge));
/// insets.init().await?;
/// let current = insets.get_insets();
/// # Ok(())
/// # }
/// ```
pub struct LegacyInsets {
    bridge: Arc<dyn InsetBridge>,
    state: Arc<SharedState>,
    init_cell: OnceCell<()>,
}

impl LegacyInsets {
    /// Create an uninitialized facade over the given bridge.
    pub fn new(bridge: Arc<dyn InsetBridge>) -> Self {
        Self {
            bridge,
            state: Arc::new(SharedState::new()),
            init_cell: OnceCell::new(),
        }
    }

    /// Initialize the process-wide listener registration.
    ///
    /// Resolves once the first measurement has arrived (and been applied
    /// to the cache); on platforms without a native inset concept it
    /// resolves immediately. Idempotent: every caller awaits the same
    /// underlying initialization.
    pub async fn init(&self) -> Result<()> {
        self.init_cell
            .get_or_try_init(|| self.bootstrap())
            .await
            .map(|_| ())
    }

    async fn bootstrap(&self) -> Result<()> {
        match self.bridge.capability() {
            InsetCapability::Unsupported => {
                log::debug!("[LEGACY] No native inset concept; initialized empty");
                Ok(())
            }
            InsetCapability::Native => {
                let mut insets = self.bridge.set_listener().await?;

                // The first measurement doubles as the readiness
                // acknowledgement; the rest of the stream feeds the pump.
                match insets.recv().await {
                    Some(first) => {
                        self.state.apply_update(first);
                        log::debug!("[LEGACY] Initialized with {:?}", first);

                        let state = Arc::clone(&self.state);
                        tokio::spawn(async move {
                            while let Some(inset) = insets.recv().await {
                                state.apply_update(inset);
                            }
                            log::debug!("[LEGACY] Inset stream closed");
                        });
                        Ok(())
                    }
                    None => Err(InsetLinkError::ChannelClosed(
                        "inset stream closed before the first measurement".to_string(),
                    )),
                }
            }
        }
    }

    /// Wire an external environment-ready signal to auto-initialization.
    ///
    /// Spawns a task that awaits `ready`, then runs [`init`](Self::init).
    /// Safe to combine with explicit `init` calls; only one registration
    /// happens either way. Initialization failure is logged, not surfaced.
    pub fn init_on_ready(self: &Arc<Self>, ready: impl Future<Output = ()> + Send + 'static) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            ready.await;
            if let Err(e) = this.init().await {
                log::warn!("[LEGACY] Auto-initialization failed: {}", e);
            }
        });
    }

    /// Last emitted insets, or the zero rect before the first event.
    pub fn get_insets(&self) -> InsetRect {
        self.state.current()
    }

    /// Register a listener at the end of the registry.
    ///
    /// Unlike [`InsetSubscription::add_listener`], the cached value is not
    /// replayed; the listener first fires on the next native event.
    ///
    /// [`InsetSubscription::add_listener`]: crate::InsetSubscription::add_listener
    pub fn add_listener(&self, listener: InsetListener) {
        self.state.add_listener(listener);
    }

    /// Remove the first registry entry matching `listener` by identity.
    /// No-op when it was never registered.
    pub fn remove_listener(&self, listener: &InsetListener) {
        self.state.remove_listener(listener);
    }

    /// Re-issue the native registration with a new mask.
    ///
    /// The native layer re-measures immediately; the response replaces the
    /// cache and is returned without waiting for an event. Listeners are
    /// not notified. On platforms without a native inset concept this is a
    /// no-op returning the current cache.
    pub async fn set_mask(&self, mask: InsetMask) -> Result<InsetRect> {
        match self.bridge.capability() {
            InsetCapability::Unsupported => Ok(self.state.current()),
            InsetCapability::Native => {
                let inset = self.bridge.set_mask(mask).await?;
                self.state.replace(inset);
                log::debug!("[LEGACY] Mask {} applied, insets now {:?}", mask, inset);
                Ok(inset)
            }
        }
    }
}

//! Shared test harness: a scripted [`InsetBridge`] implementor plus small
//! async helpers.
//!
//! `MockBridge` plays the native layer: it records every call, assigns
//! identifiers, lets tests emit init/update events on demand, and
//! simulates native teardown by closing a subscription's event channel on
//! delete. Rejections are scripted per call.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use inset_link::{
    BridgeEvent, BridgeEventStream, InsetBridge, InsetCapability, InsetLinkError, InsetMask,
    InsetRect, InsetStream, Result, SubscriptionConfig,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
struct Inner {
    next_id: u32,
    next_create_id: Option<String>,
    create_calls: Vec<SubscriptionConfig>,
    delete_calls: Vec<String>,
    set_listener_calls: u32,
    set_mask_calls: Vec<InsetMask>,
    reject_create: Option<String>,
    reject_delete: Option<String>,
    reject_set_mask: Option<String>,
    drop_before_init: bool,
    subscriptions: HashMap<String, mpsc::Sender<BridgeEvent>>,
    legacy_tx: Option<mpsc::Sender<InsetRect>>,
    legacy_initial: Option<InsetRect>,
    set_mask_response: InsetRect,
}

/// Scripted stand-in for the native inset layer.
pub struct MockBridge {
    capability: InsetCapability,
    inner: Mutex<Inner>,
}

impl MockBridge {
    /// A bridge for a platform with native inset support.
    pub fn native() -> Arc<Self> {
        Arc::new(Self {
            capability: InsetCapability::Native,
            inner: Mutex::new(Inner::default()),
        })
    }

    /// A bridge for a platform with no native inset concept.
    pub fn unsupported() -> Arc<Self> {
        Arc::new(Self {
            capability: InsetCapability::Unsupported,
            inner: Mutex::new(Inner::default()),
        })
    }

    // ── scripting ────────────────────────────────────────────────────────

    /// Force the next create call to use `id` instead of a generated one.
    pub fn script_create_id(&self, id: &str) {
        self.inner.lock().next_create_id = Some(id.to_string());
    }

    /// Reject the next create call with `message`.
    pub fn reject_next_create(&self, message: &str) {
        self.inner.lock().reject_create = Some(message.to_string());
    }

    /// Reject the next delete call with `message`.
    pub fn reject_next_delete(&self, message: &str) {
        self.inner.lock().reject_delete = Some(message.to_string());
    }

    /// Reject the next setMask call with `message`.
    pub fn reject_next_set_mask(&self, message: &str) {
        self.inner.lock().reject_set_mask = Some(message.to_string());
    }

    /// Make the next create call return a channel that closes without ever
    /// acknowledging.
    pub fn drop_channel_before_init(&self) {
        self.inner.lock().drop_before_init = true;
    }

    /// Auto-emit `rect` as the first legacy measurement on setListener.
    pub fn script_legacy_initial(&self, rect: InsetRect) {
        self.inner.lock().legacy_initial = Some(rect);
    }

    /// Respond to setMask calls with `rect`.
    pub fn script_set_mask_response(&self, rect: InsetRect) {
        self.inner.lock().set_mask_response = rect;
    }

    // ── event emission ───────────────────────────────────────────────────

    /// Emit an update event on the subscription channel registered as
    /// `target`, tagged with `tagged_id` (usually the same; differs when a
    /// test wants a foreign-id event on the channel).
    pub async fn emit_update_tagged(&self, target: &str, tagged_id: &str, rect: InsetRect) {
        let tx = self
            .inner
            .lock()
            .subscriptions
            .get(target)
            .cloned()
            .unwrap_or_else(|| panic!("no active subscription {}", target));
        tx.send(BridgeEvent::Update {
            id: tagged_id.to_string(),
            data: rect,
        })
        .await
        .expect("subscription channel should be open");
    }

    /// Emit an update event for the subscription `id`.
    pub async fn emit_update(&self, id: &str, rect: InsetRect) {
        self.emit_update_tagged(id, id, rect).await;
    }

    /// Emit a measurement on the legacy listener stream.
    pub async fn emit_legacy(&self, rect: InsetRect) {
        let tx = self
            .inner
            .lock()
            .legacy_tx
            .clone()
            .expect("setListener should have been called");
        tx.send(rect).await.expect("legacy channel should be open");
    }

    // ── call log ─────────────────────────────────────────────────────────

    pub fn create_calls(&self) -> Vec<SubscriptionConfig> {
        self.inner.lock().create_calls.clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.inner.lock().delete_calls.clone()
    }

    pub fn set_listener_calls(&self) -> u32 {
        self.inner.lock().set_listener_calls
    }

    pub fn set_mask_calls(&self) -> Vec<InsetMask> {
        self.inner.lock().set_mask_calls.clone()
    }

    /// Whether the native side still holds an open channel for `id`.
    pub fn has_subscription(&self, id: &str) -> bool {
        self.inner.lock().subscriptions.contains_key(id)
    }
}

#[async_trait]
impl InsetBridge for MockBridge {
    fn capability(&self) -> InsetCapability {
        self.capability
    }

    async fn create(&self, config: SubscriptionConfig) -> Result<BridgeEventStream> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let id;
        {
            let mut inner = self.inner.lock();
            inner.create_calls.push(config);
            if let Some(message) = inner.reject_create.take() {
                return Err(InsetLinkError::BridgeRejected(message));
            }
            if inner.drop_before_init {
                inner.drop_before_init = false;
                return Ok(rx);
            }
            id = inner.next_create_id.take().unwrap_or_else(|| {
                inner.next_id += 1;
                format!("native-{}", inner.next_id)
            });
            inner.subscriptions.insert(id.clone(), tx.clone());
        }
        tx.send(BridgeEvent::Init { data: id })
            .await
            .expect("receiver should be alive during create");
        Ok(rx)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.delete_calls.push(id.to_string());
        if let Some(message) = inner.reject_delete.take() {
            return Err(InsetLinkError::BridgeRejected(message));
        }
        // Native teardown: dropping the sender closes the event channel.
        inner.subscriptions.remove(id);
        Ok(())
    }

    async fn set_listener(&self) -> Result<InsetStream> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let initial;
        {
            let mut inner = self.inner.lock();
            inner.set_listener_calls += 1;
            initial = inner.legacy_initial;
            inner.legacy_tx = Some(tx.clone());
        }
        if let Some(rect) = initial {
            tx.send(rect)
                .await
                .expect("receiver should be alive during setListener");
        }
        Ok(rx)
    }

    async fn set_mask(&self, mask: InsetMask) -> Result<InsetRect> {
        let mut inner = self.inner.lock();
        inner.set_mask_calls.push(mask);
        if let Some(message) = inner.reject_set_mask.take() {
            return Err(InsetLinkError::BridgeRejected(message));
        }
        Ok(inner.set_mask_response)
    }
}

// ── async helpers ────────────────────────────────────────────────────────

/// Poll `cond` until it holds, panicking after two seconds.
pub async fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !cond() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {}",
            what
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Give spawned pump tasks a chance to drain already-emitted events.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

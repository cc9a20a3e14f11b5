use serde::{Deserialize, Serialize};

use super::inset_rect::InsetRect;

/// Events carried by a subscription's bridge channel.
///
/// A single channel delivers both shapes: exactly one `Init` resolving the
/// pending registration, followed by zero-or-more `Update`s. The tagged
/// representation matches the bridge wire format
/// (`{"type":"init","data":"<id>"}` /
/// `{"type":"update","id":"<id>","data":{...}}`), so the demultiplexing
/// boundary is an exhaustive match rather than a tag-field sniff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// Registration acknowledgement carrying the natively assigned
    /// identifier.
    Init {
        /// The assigned subscription identifier.
        data: String,
    },

    /// A new inset measurement for the subscription tagged by `id`.
    Update {
        /// Identifier of the subscription this measurement belongs to.
        id: String,
        /// The measured insets, replacing the cached value wholesale.
        data: InsetRect,
    },
}

impl BridgeEvent {
    /// Parse a raw bridge payload.
    ///
    /// Payloads matching neither event shape yield `None` and are meant to
    /// be dropped by the caller without further reporting.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(event) => Some(event),
            Err(e) => {
                log::debug!("[BRIDGE] Dropping unrecognized event payload: {}", e);
                None
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use super::inset_mask::InsetMask;

/// Configuration sent to the native layer when registering an inset
/// observer.
///
/// Field names follow the bridge wire shape (`camelCase`). Missing fields
/// take defaults: the mask falls back to
/// `DISPLAY_CUTOUT | SYSTEM_BARS`, rounded corners are included.
///
/// # Example
///
/// ```rust
/// use inset_link::{InsetMask, SubscriptionConfig};
///
/// let config = SubscriptionConfig::new()
///     .with_mask(InsetMask::DISPLAY_CUTOUT | InsetMask::IME)
///     .with_rounded_corners(false);
///
/// assert_eq!(config.effective_mask(), InsetMask::DISPLAY_CUTOUT | InsetMask::IME);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionConfig {
    /// Inset categories to observe. `None` means the default mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<InsetMask>,

    /// Whether rounded-corner radii should be folded into the reported
    /// insets. Honored only where the platform supports measuring them.
    #[serde(default = "default_include_rounded_corners")]
    pub include_rounded_corners: bool,
}

fn default_include_rounded_corners() -> bool {
    true
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            mask: None,
            include_rounded_corners: true,
        }
    }
}

impl SubscriptionConfig {
    /// Create a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the inset categories to observe.
    pub fn with_mask(mut self, mask: InsetMask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Control whether rounded corners contribute to the insets.
    pub fn with_rounded_corners(mut self, include: bool) -> Self {
        self.include_rounded_corners = include;
        self
    }

    /// The mask this configuration resolves to, with the default applied.
    pub fn effective_mask(&self) -> InsetMask {
        self.mask.unwrap_or(InsetMask::DEFAULT)
    }
}

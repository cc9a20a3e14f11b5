use serde::{Deserialize, Serialize};

/// An immutable snapshot of the pixel margins obstructed by system UI on
/// each edge of the display.
///
/// Values are device-independent pixels. Native layers divide raw pixel
/// measurements by the display density before crossing the bridge, so
/// fractional values are normal. A rect is replaced wholesale on every
/// update, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InsetRect {
    /// Obstructed margin at the top edge.
    pub top: f64,
    /// Obstructed margin at the left edge.
    pub left: f64,
    /// Obstructed margin at the right edge.
    pub right: f64,
    /// Obstructed margin at the bottom edge.
    pub bottom: f64,
}

impl InsetRect {
    /// The all-zero rect. Every subscription cache starts here.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Create a rect from explicit edge values.
    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Whether every edge is zero (no update received yet, or nothing
    /// obstructs the display).
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

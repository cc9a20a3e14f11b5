use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitmask selecting which inset categories a subscription observes.
///
/// The bit values are internal to this SDK and deliberately decoupled from
/// any platform's native constants; bridge implementations translate them
/// at the boundary. Serialized as the raw `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsetMask(u32);

impl InsetMask {
    /// Caption bar (freeform/desktop window title area).
    pub const CAPTION_BAR: Self = Self(1);
    /// Display cutouts (notches, camera holes).
    pub const DISPLAY_CUTOUT: Self = Self(1 << 1);
    /// On-screen keyboard.
    pub const IME: Self = Self(1 << 2);
    /// Gesture areas the system always reserves.
    pub const MANDATORY_SYSTEM_GESTURES: Self = Self(1 << 3);
    /// Navigation bars.
    pub const NAVIGATION_BARS: Self = Self(1 << 4);
    /// Status bars.
    pub const STATUS_BARS: Self = Self(1 << 5);
    /// Status + navigation + caption bars combined.
    pub const SYSTEM_BARS: Self = Self(1 << 6);
    /// All system gesture areas.
    pub const SYSTEM_GESTURES: Self = Self(1 << 7);
    /// Areas where tappable system elements may overlap the app.
    pub const TAPPABLE_ELEMENT: Self = Self(1 << 8);

    /// Mask applied when a configuration leaves the mask unset.
    pub const DEFAULT: Self = Self(Self::DISPLAY_CUTOUT.0 | Self::SYSTEM_BARS.0);

    /// Mask with no categories selected.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reconstruct a mask from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Whether every category in `other` is also selected in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no category is selected.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for InsetMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for InsetMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for InsetMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for InsetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

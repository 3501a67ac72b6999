//! Display brightness levels

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A brightness level, checked against the range the panel supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Brightness(u8);

impl Brightness {
    /// Darkest level
    pub const MIN: Brightness = Brightness(0);
    /// Brightest level
    pub const MAX: Brightness = Brightness(11);

    /// Clamp `value` into the supported range instead of rejecting it.
    pub fn saturating_from(value: u8) -> Self {
        Brightness(value.min(Self::MAX.0))
    }

    /// Raw level as sent on the wire
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for Brightness {
    /// The rejected value
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX.0 {
            Err(value)
        } else {
            Ok(Brightness(value))
        }
    }
}

impl From<Brightness> for u8 {
    fn from(brightness: Brightness) -> Self {
        brightness.0
    }
}

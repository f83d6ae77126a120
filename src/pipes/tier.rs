#![warn(clippy::all, clippy::pedantic)]

use serde::{Deserialize, Serialize};

/// Visual and difficulty category of an obstacle unit.
///
/// Variants are declared easiest first; `rank` follows declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTier {
    #[default]
    Base,
    LightGreen,
    Orange,
    Red,
    Purple,
}

impl ColorTier {
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            ColorTier::Base => 0,
            ColorTier::LightGreen => 1,
            ColorTier::Orange => 2,
            ColorTier::Red => 3,
            ColorTier::Purple => 4,
        }
    }

    /// Extra vertical gap granted while a unit of this tier oscillates
    #[must_use]
    pub fn gap_bonus(self) -> f32 {
        match self {
            ColorTier::Base => 0.0,
            ColorTier::LightGreen => 30.0,
            ColorTier::Orange => 25.0,
            ColorTier::Red | ColorTier::Purple => 20.0,
        }
    }

    /// Half-period range of the oscillation in milliseconds, slowest tiers first
    #[must_use]
    pub fn duration_range_ms(self) -> (u32, u32) {
        match self {
            ColorTier::Base => (600, 1000),
            ColorTier::LightGreen => (1300, 2000),
            ColorTier::Orange => (1000, 1300),
            ColorTier::Red | ColorTier::Purple => (800, 1000),
        }
    }

    #[must_use]
    pub fn texture_key(self) -> &'static str {
        match self {
            ColorTier::Base => "pipe",
            ColorTier::LightGreen => "light-green-pipe",
            ColorTier::Orange => "orange-pipe",
            ColorTier::Red => "red-pipe",
            ColorTier::Purple => "purple-pipe",
        }
    }

    #[must_use]
    pub fn cap_texture_key(self) -> &'static str {
        match self {
            ColorTier::Base => "cap",
            ColorTier::LightGreen => "light-green-cap",
            ColorTier::Orange => "orange-cap",
            ColorTier::Red => "red-cap",
            ColorTier::Purple => "purple-cap",
        }
    }
}

/*!
 * Signal tiers
 * Discretised signal strength driving the bar icon and colour
 */

use serde::Serialize;

use crate::config::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    Poor,
    Disconnected,
}

impl Tier {
    /// Tier for a connected link. Unknown signal counts as good.
    pub fn from_signal(signal: Option<u8>) -> Self {
        match signal {
            None => Tier::Good,
            Some(percent) if percent >= 80 => Tier::Excellent,
            Some(percent) if percent >= 60 => Tier::Good,
            Some(percent) if percent >= 40 => Tier::Fair,
            Some(_) => Tier::Poor,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tier::Excellent => "󰤨",
            Tier::Good => "󰤥",
            Tier::Fair => "󰤢",
            Tier::Poor => "󰤟",
            Tier::Disconnected => "󰖪",
        }
    }

    pub fn color(self, palette: &Palette) -> &str {
        match self {
            Tier::Excellent => &palette.excellent,
            Tier::Good => &palette.good,
            Tier::Fair => &palette.fair,
            Tier::Poor => &palette.poor,
            Tier::Disconnected => &palette.disconnected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Fair => "fair",
            Tier::Poor => "poor",
            Tier::Disconnected => "disconnected",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an RSSI reading to a 0..=100 quality percentage.
pub fn dbm_to_percent(dbm: i32) -> u8 {
    dbm.saturating_add(100).saturating_mul(2).clamp(0, 100) as u8
}

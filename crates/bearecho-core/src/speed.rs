//! Tick intervals and the user-facing speed presets.

use std::{fmt, num::NonZeroU32, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Delay between two reveal ticks, in milliseconds. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TickInterval(NonZeroU32);

impl TickInterval {
    /// Create an interval from milliseconds, rejecting zero.
    pub fn from_millis(millis: u32) -> Result<Self> {
        NonZeroU32::new(millis)
            .map(Self)
            .ok_or(CoreError::InvalidSpeed(millis))
    }

    /// Interval in milliseconds.
    pub fn as_millis(self) -> u32 {
        self.0.get()
    }

    /// Interval as a `Duration`.
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0.get()))
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        SpeedPreset::Fast.interval()
    }
}

impl TryFrom<u32> for TickInterval {
    type Error = CoreError;

    fn try_from(millis: u32) -> Result<Self> {
        Self::from_millis(millis)
    }
}

impl From<TickInterval> for u32 {
    fn from(interval: TickInterval) -> Self {
        interval.as_millis()
    }
}

impl fmt::Display for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Fixed speeds offered by the animation control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    Slow,
    Normal,
    Fast,
    Turbo,
}

impl SpeedPreset {
    /// All presets, slowest first.
    pub const ALL: [SpeedPreset; 4] = [
        SpeedPreset::Slow,
        SpeedPreset::Normal,
        SpeedPreset::Fast,
        SpeedPreset::Turbo,
    ];

    /// Tick interval of this preset.
    pub fn interval(self) -> TickInterval {
        let millis = match self {
            SpeedPreset::Slow => 200,
            SpeedPreset::Normal => 150,
            SpeedPreset::Fast => 100,
            SpeedPreset::Turbo => 50,
        };
        // All preset values are non-zero literals.
        TickInterval(NonZeroU32::new(millis).unwrap_or(NonZeroU32::MIN))
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Fast => "Fast",
            SpeedPreset::Turbo => "Turbo",
        }
    }

    /// Preset with exactly this interval, if any.
    pub fn from_interval(interval: TickInterval) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.interval() == interval)
    }

    /// Preset whose interval is closest to `interval`. Ties go to the slower one.
    pub fn nearest(interval: TickInterval) -> Self {
        let target = interval.as_millis();
        Self::ALL
            .into_iter()
            .min_by_key(|p| p.interval().as_millis().abs_diff(target))
            .unwrap_or(SpeedPreset::Normal)
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

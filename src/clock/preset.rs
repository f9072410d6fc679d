//! Restart menu presets

use serde::{Deserialize, Serialize};

/// Total time choices offered when restarting a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePreset {
    ThirtyMinutes,
    FifteenMinutes,
    TenMinutes,
    FiveMinutes,
    OneMinute,
}

impl TimePreset {
    /// Menu order, longest first
    pub const ALL: [TimePreset; 5] = [
        TimePreset::ThirtyMinutes,
        TimePreset::FifteenMinutes,
        TimePreset::TenMinutes,
        TimePreset::FiveMinutes,
        TimePreset::OneMinute,
    ];

    pub fn minutes(self) -> u64 {
        match self {
            TimePreset::ThirtyMinutes => 30,
            TimePreset::FifteenMinutes => 15,
            TimePreset::TenMinutes => 10,
            TimePreset::FiveMinutes => 5,
            TimePreset::OneMinute => 1,
        }
    }

    /// Total time per side in seconds
    pub fn seconds(self) -> f64 {
        (self.minutes() * 60) as f64
    }

    pub fn label(self) -> &'static str {
        match self {
            TimePreset::ThirtyMinutes => "30 Minute",
            TimePreset::FifteenMinutes => "15 Minute",
            TimePreset::TenMinutes => "10 Minute",
            TimePreset::FiveMinutes => "5 Minutes",
            TimePreset::OneMinute => "1 Minute",
        }
    }

    /// Look up the preset for a minute count, if the menu offers one
    pub fn from_minutes(minutes: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.minutes() == minutes)
    }
}

impl Default for TimePreset {
    fn default() -> Self {
        TimePreset::TenMinutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_presets_by_minutes() {
        assert_eq!(TimePreset::from_minutes(5), Some(TimePreset::FiveMinutes));
        assert_eq!(TimePreset::from_minutes(30), Some(TimePreset::ThirtyMinutes));
        assert_eq!(TimePreset::from_minutes(7), None);
    }

    #[test]
    fn default_is_ten_minutes() {
        assert_eq!(TimePreset::default().seconds(), 600.0);
    }
}

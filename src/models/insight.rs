use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
}

impl Default for MoodTrend {
    fn default() -> Self {
        Self::Stable
    }
}

/// Counts of entries by mood band: low 1-3, medium 4-6, high 7-10.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodDistribution {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl MoodDistribution {
    pub fn record(&mut self, mood: i32) {
        match mood {
            m if m <= 3 => self.low += 1,
            m if m <= 6 => self.medium += 1,
            _ => self.high += 1,
        }
    }
}

/// Aggregate over a window of mood entries. Computed per request, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodInsight {
    pub total_entries: usize,
    pub average_mood: f64,
    pub average_energy: f64,
    pub average_stress: f64,
    pub average_sleep: f64,
    pub mood_trend: MoodTrend,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub mood_distribution: MoodDistribution,
}

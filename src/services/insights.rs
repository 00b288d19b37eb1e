//! Mood insight calculator.
//!
//! Pure aggregation over a window of [`MoodEntry`] rows. The caller supplies
//! `today`; nothing here reads the clock or touches storage.

use chrono::{Duration, NaiveDate};

use crate::models::insight::{MoodDistribution, MoodInsight, MoodTrend};
use crate::models::mood_entry::MoodEntry;

/// Days covered by `/api/mood/insights` when `days` is not given.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Number of most recent entries compared against the rest for the trend.
const TREND_RECENT_ENTRIES: usize = 3;

/// Minimum gap between recent and older means before a trend is reported.
const TREND_DEADBAND: f64 = 0.5;

/// Rounds to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
}

/// Average over the entries that actually carry the field.
fn average_present(values: impl Iterator<Item = Option<i32>>) -> f64 {
    let present: Vec<i32> = values.flatten().collect();
    round_one_decimal(mean(&present))
}

/// Compares the first three moods (most recent first) with the remainder.
pub fn mood_trend(moods: &[i32]) -> MoodTrend {
    let (recent, older) = moods.split_at(moods.len().min(TREND_RECENT_ENTRIES));
    let recent_mean = mean(recent);
    let older_mean = if older.is_empty() {
        recent_mean
    } else {
        mean(older)
    };

    if recent_mean > older_mean + TREND_DEADBAND {
        MoodTrend::Improving
    } else if recent_mean < older_mean - TREND_DEADBAND {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

/// Walks entries newest first, matching position `i` against `today - i`.
///
/// Returns `(current, longest)`. The current streak only grows while every
/// position from the start has matched; `longest` tracks the best run seen
/// during that same walk.
pub fn streaks(entries: &[MoodEntry], today: NaiveDate) -> (u32, u32) {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
    dates.sort_by(|a, b| b.cmp(a));

    let mut current = 0u32;
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut anchored = true;

    for (i, date) in dates.iter().enumerate() {
        let expected = today - Duration::days(i as i64);
        if *date == expected {
            run += 1;
            longest = longest.max(run);
            if anchored {
                current = i as u32 + 1;
            }
        } else {
            run = 0;
            anchored = false;
        }
    }

    (current, longest)
}

pub fn calculate_insights(entries: &[MoodEntry], today: NaiveDate) -> MoodInsight {
    if entries.is_empty() {
        return MoodInsight::default();
    }

    let moods: Vec<i32> = entries.iter().map(|e| e.mood).collect();

    let mut distribution = MoodDistribution::default();
    for &mood in &moods {
        distribution.record(mood);
    }

    let (current_streak, longest_streak) = streaks(entries, today);

    MoodInsight {
        total_entries: entries.len(),
        average_mood: round_one_decimal(mean(&moods)),
        average_energy: average_present(entries.iter().map(|e| e.energy)),
        average_stress: average_present(entries.iter().map(|e| e.stress)),
        average_sleep: average_present(entries.iter().map(|e| e.sleep)),
        mood_trend: mood_trend(&moods),
        current_streak,
        longest_streak,
        mood_distribution: distribution,
    }
}

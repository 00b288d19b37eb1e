//! Activity recommender.
//!
//! Picks today's activities from an immutable catalog using the caller's
//! recent average mood and what they completed during the past week.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::activity::{ActivityCompletion, ActivityDefinition, Difficulty, TodayActivity};
use crate::models::mood_entry::MoodEntry;
use crate::models::range::DateRange;
use crate::services::insights::round_one_decimal;

/// Activities shown in today's listing.
pub const TODAY_LIMIT: usize = 4;

/// Mood entries that feed the average, most recent first.
pub const RECENT_MOOD_ENTRIES: usize = 3;

/// Average assumed when the user has never logged a mood.
pub const COLD_START_MOOD: f64 = 5.0;

/// An activity completed within this many days is not suggested again.
pub const RECENCY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct ActivityRecommender {
    catalog: Arc<[ActivityDefinition]>,
}

impl ActivityRecommender {
    pub fn new(catalog: impl Into<Arc<[ActivityDefinition]>>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    pub fn contains(&self, activity_id: &str) -> bool {
        self.catalog.iter().any(|a| a.id == activity_id)
    }

    pub fn recency_window(today: NaiveDate) -> DateRange {
        DateRange::trailing_days(today, RECENCY_WINDOW_DAYS)
    }

    /// Mean mood of the first three entries, or the neutral midpoint when
    /// there are none.
    pub fn average_recent_mood(recent: &[MoodEntry]) -> f64 {
        let sample = &recent[..recent.len().min(RECENT_MOOD_ENTRIES)];
        if sample.is_empty() {
            return COLD_START_MOOD;
        }
        let sum: f64 = sample.iter().map(|e| f64::from(e.mood)).sum();
        round_one_decimal(sum / sample.len() as f64)
    }

    /// Catalog entries whose mood band holds `avg_mood` and which were not
    /// done recently, in catalog order.
    pub fn suitable(
        &self,
        avg_mood: f64,
        recently_completed: &HashSet<&str>,
    ) -> Vec<&ActivityDefinition> {
        self.catalog
            .iter()
            .filter(|a| a.mood_range.contains(avg_mood))
            .filter(|a| !recently_completed.contains(a.id.as_str()))
            .collect()
    }

    /// Up to four suitable activities, topped up with easy ones when short.
    ///
    /// The easy top-up ignores mood and recency and never repeats an
    /// activity that is already selected.
    pub fn select_for_today(
        &self,
        avg_mood: f64,
        recently_completed: &HashSet<&str>,
    ) -> Vec<&ActivityDefinition> {
        let mut selected = self.suitable(avg_mood, recently_completed);
        selected.truncate(TODAY_LIMIT);

        if selected.len() < TODAY_LIMIT {
            let easy: Vec<&ActivityDefinition> = self
                .catalog
                .iter()
                .filter(|a| a.difficulty == Difficulty::Easy)
                .filter(|a| !selected.iter().any(|s| s.id == a.id))
                .take(TODAY_LIMIT - selected.len())
                .collect();
            selected.extend(easy);
        }

        selected
    }

    pub fn todays_activities(
        &self,
        recent_entries: &[MoodEntry],
        completions: &[ActivityCompletion],
        today: NaiveDate,
    ) -> Vec<TodayActivity> {
        let avg_mood = Self::average_recent_mood(recent_entries);

        let window = Self::recency_window(today);
        let recently_completed: HashSet<&str> = completions
            .iter()
            .filter(|c| window.contains(c.date))
            .map(|c| c.activity_id.as_str())
            .collect();
        let completed_today: HashSet<&str> = completions
            .iter()
            .filter(|c| c.date == today)
            .map(|c| c.activity_id.as_str())
            .collect();

        tracing::debug!(
            avg_mood,
            recently_completed = recently_completed.len(),
            "Selecting today's activities"
        );

        self.select_for_today(avg_mood, &recently_completed)
            .into_iter()
            .map(|a| TodayActivity::from_definition(a, completed_today.contains(a.id.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::MoodRange;
    use crate::services::catalog::default_catalog;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn def(id: &str, difficulty: Difficulty, low: i32, high: i32) -> ActivityDefinition {
        ActivityDefinition {
            id: id.into(),
            title: id.to_uppercase(),
            description: String::new(),
            duration: "5 minutes".into(),
            category: "Test".into(),
            difficulty,
            mood_range: MoodRange(low, high),
        }
    }

    fn small_catalog() -> ActivityRecommender {
        ActivityRecommender::new(vec![
            def("a", Difficulty::Medium, 1, 4),
            def("b", Difficulty::Easy, 1, 10),
            def("c", Difficulty::Medium, 6, 10),
            def("d", Difficulty::Easy, 1, 10),
            def("e", Difficulty::Easy, 1, 10),
            def("f", Difficulty::Easy, 1, 10),
        ])
    }

    fn mood(days_ago: i64, mood: i32) -> MoodEntry {
        let now = Utc::now();
        MoodEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: today() - Duration::days(days_ago),
            mood,
            energy: None,
            stress: None,
            sleep: None,
            note: None,
            timestamp: now,
            created_at: now,
        }
    }

    fn done(activity_id: &str, days_ago: i64) -> ActivityCompletion {
        ActivityCompletion {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            activity_id: activity_id.into(),
            date: today() - Duration::days(days_ago),
            notes: String::new(),
            completed_at: Utc::now(),
        }
    }

    fn ids(selected: &[&ActivityDefinition]) -> Vec<String> {
        selected.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn cold_start_uses_neutral_mood() {
        assert_eq!(ActivityRecommender::average_recent_mood(&[]), COLD_START_MOOD);
    }

    #[test]
    fn average_uses_only_three_most_recent() {
        let recent = vec![mood(0, 8), mood(1, 7), mood(2, 7), mood(3, 1)];
        assert_eq!(ActivityRecommender::average_recent_mood(&recent), 7.3);
    }

    #[test]
    fn range_match_includes_unless_recently_completed() {
        let recommender = ActivityRecommender::new(vec![def("meditation", Difficulty::Medium, 1, 8)]);

        let none = HashSet::new();
        assert_eq!(ids(&recommender.suitable(5.0, &none)), vec!["meditation"]);

        let recent: HashSet<&str> = ["meditation"].into_iter().collect();
        assert!(recommender.suitable(5.0, &recent).is_empty());
    }

    #[test]
    fn takes_first_four_suitable_in_catalog_order() {
        let recommender = ActivityRecommender::new(default_catalog());
        let selected = recommender.select_for_today(5.0, &HashSet::new());
        assert_eq!(
            ids(&selected),
            vec!["breathing-exercise", "meditation", "body-scan", "walk-outside"]
        );
    }

    #[test]
    fn pads_with_easy_activities_without_duplicates() {
        let recommender = small_catalog();
        let recent: HashSet<&str> = ["b", "d"].into_iter().collect();

        let selected = recommender.select_for_today(8.0, &recent);
        assert_eq!(ids(&selected), vec!["c", "e", "f", "b"]);
    }

    #[test]
    fn falls_back_to_easy_when_nothing_is_suitable() {
        let recommender = small_catalog();
        let recent: HashSet<&str> = ["b", "c", "d", "e", "f"].into_iter().collect();

        let selected = recommender.select_for_today(8.0, &recent);
        assert_eq!(ids(&selected), vec!["b", "d", "e", "f"]);
    }

    #[test]
    fn marks_only_todays_completions() {
        let recommender = small_catalog();
        let completions = vec![done("b", 0), done("d", 3), done("f", 9)];

        let activities = recommender.todays_activities(&[mood(0, 8)], &completions, today());
        let summary: Vec<(String, bool)> = activities
            .iter()
            .map(|a| (a.id.clone(), a.completed))
            .collect();

        // b and d are recent; f was done 9 days ago so it is eligible again
        assert_eq!(
            summary,
            vec![
                ("c".to_string(), false),
                ("e".to_string(), false),
                ("f".to_string(), false),
                ("b".to_string(), true),
            ]
        );
    }

    #[test]
    fn never_returns_more_than_four() {
        let recommender = ActivityRecommender::new(default_catalog());
        for avg in [1.0, 2.5, 5.0, 7.3, 10.0] {
            assert!(recommender.select_for_today(avg, &HashSet::new()).len() <= TODAY_LIMIT);
        }
    }

    #[test]
    fn recommender_average_matches_insight_rounding() {
        let recent = vec![mood(0, 9), mood(1, 8), mood(2, 8)];
        let insight = crate::services::insights::calculate_insights(&recent, today());
        assert_eq!(
            ActivityRecommender::average_recent_mood(&recent),
            insight.average_mood
        );
    }
}

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use crate::models::activity::{ActivityDefinition, Difficulty, MoodRange};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Activity catalog is empty")]
    Empty,

    #[error("Duplicate activity id: {0}")]
    DuplicateId(String),

    #[error("Activity {id} has invalid mood range [{low}, {high}]")]
    InvalidRange { id: String, low: i32, high: i32 },
}

fn activity(
    id: &str,
    title: &str,
    description: &str,
    duration: &str,
    category: &str,
    difficulty: Difficulty,
    mood_range: (i32, i32),
) -> ActivityDefinition {
    ActivityDefinition {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        duration: duration.into(),
        category: category.into(),
        difficulty,
        mood_range: MoodRange(mood_range.0, mood_range.1),
    }
}

/// Built-in activity pool, in listing order.
pub fn default_catalog() -> Vec<ActivityDefinition> {
    use Difficulty::{Easy, Medium};

    vec![
        activity(
            "breathing-exercise",
            "5-Minute Breathing Exercise",
            "Practice deep breathing to reduce stress and anxiety",
            "5 minutes",
            "Mindfulness",
            Easy,
            (1, 10),
        ),
        activity(
            "meditation",
            "Guided Meditation",
            "Listen to a calming meditation session",
            "10 minutes",
            "Mindfulness",
            Medium,
            (1, 8),
        ),
        activity(
            "body-scan",
            "Body Scan Meditation",
            "Progressive relaxation from head to toe",
            "15 minutes",
            "Mindfulness",
            Medium,
            (1, 7),
        ),
        activity(
            "walk-outside",
            "Take a Walk Outside",
            "Get some fresh air and gentle movement",
            "15 minutes",
            "Physical",
            Easy,
            (3, 10),
        ),
        activity(
            "stretching",
            "Gentle Stretching",
            "Release tension with simple stretches",
            "10 minutes",
            "Physical",
            Easy,
            (1, 10),
        ),
        activity(
            "dance-break",
            "Dance Break",
            "Put on your favorite song and move your body",
            "5 minutes",
            "Physical",
            Easy,
            (4, 10),
        ),
        activity(
            "gratitude-journal",
            "Gratitude Journaling",
            "Write down three things you're grateful for today",
            "10 minutes",
            "Reflection",
            Easy,
            (1, 10),
        ),
        activity(
            "mood-reflection",
            "Mood Reflection",
            "Reflect on what influenced your mood today",
            "8 minutes",
            "Reflection",
            Easy,
            (1, 8),
        ),
        activity(
            "future-self",
            "Future Self Visualization",
            "Imagine your best self and what they would do",
            "12 minutes",
            "Reflection",
            Medium,
            (3, 10),
        ),
        activity(
            "doodle",
            "Free-form Doodling",
            "Let your creativity flow with simple drawing",
            "10 minutes",
            "Creative",
            Easy,
            (2, 10),
        ),
        activity(
            "music-listening",
            "Music Therapy",
            "Listen to music that matches or improves your mood",
            "15 minutes",
            "Creative",
            Easy,
            (1, 10),
        ),
        activity(
            "reach-out",
            "Reach Out to Someone",
            "Send a message to a friend or family member",
            "5 minutes",
            "Social",
            Easy,
            (1, 10),
        ),
        activity(
            "compliment-self",
            "Self-Compassion Practice",
            "Write yourself a kind and encouraging message",
            "8 minutes",
            "Social",
            Easy,
            (1, 8),
        ),
    ]
}

pub fn validate_catalog(catalog: &[ActivityDefinition]) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for def in catalog {
        if !seen.insert(def.id.as_str()) {
            return Err(CatalogError::DuplicateId(def.id.clone()));
        }
        let (low, high) = (def.mood_range.low(), def.mood_range.high());
        if low > high || !(1..=10).contains(&low) || !(1..=10).contains(&high) {
            return Err(CatalogError::InvalidRange {
                id: def.id.clone(),
                low,
                high,
            });
        }
    }
    Ok(())
}

/// Reads a JSON array of activity definitions, replacing the built-in pool.
pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<ActivityDefinition>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read activity catalog {}", path.display()))?;
    let catalog: Vec<ActivityDefinition> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid activity catalog {}", path.display()))?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

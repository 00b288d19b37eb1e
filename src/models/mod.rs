pub mod activity;
pub mod insight;
pub mod mood_entry;
pub mod range;

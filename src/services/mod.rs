pub mod catalog;
pub mod insights;
pub mod recommender;

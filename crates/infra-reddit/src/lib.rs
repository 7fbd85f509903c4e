// Pollwatch Infrastructure - Reddit Adapter
// Implements: SearchProvider

pub mod listing;
pub mod reddit_provider;

pub use reddit_provider::{RedditConfig, RedditSearchProvider};

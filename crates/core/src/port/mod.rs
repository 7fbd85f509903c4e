// Port Layer - Interfaces for external dependencies

pub mod item_sink;
pub mod search_provider;

// Re-exports
pub use item_sink::{ItemSink, StdoutSink};
pub use search_provider::{SearchError, SearchProvider};

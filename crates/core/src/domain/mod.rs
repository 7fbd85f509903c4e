// Domain Layer - Pure business logic and entities

pub mod command;
pub mod cursor;
pub mod error;
pub mod item;
pub mod job;

// Re-exports
pub use command::Command;
pub use error::DomainError;
pub use item::{Item, ItemId};
pub use job::{Job, JobId, JobSnapshot, JobSpec, SortMode};

// Application Layer - Scheduling engine and its moving parts

pub mod config;
pub mod engine;
pub mod registry;
pub mod serializer;
pub mod work_queue;
pub mod worker;

// Re-exports
pub use config::EngineConfig;
pub use engine::{Engine, EngineHandle};
pub use registry::JobRegistry;
pub use serializer::{CommandError, CommandSender, RequestSerializer, SubmitError};
pub use work_queue::WorkQueue;
pub use worker::{shutdown_channel, RoundOutcome, ShutdownSender, ShutdownToken, Worker};

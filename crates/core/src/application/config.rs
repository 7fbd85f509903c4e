// Engine Configuration

use serde::{Deserialize, Serialize};

use crate::application::worker::constants::{
    DEFAULT_COMMAND_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT,
};
use crate::error::{AppError, Result};

fn default_worker_count() -> usize {
    DEFAULT_WORKER_COUNT
}

fn default_command_queue_capacity() -> usize {
    DEFAULT_COMMAND_QUEUE_CAPACITY
}

/// Engine sizing. The work queue capacity is not configurable: it is always
/// one slot per job plus slack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    #[serde(default = "default_command_queue_capacity")]
    pub command_queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            command_queue_capacity: DEFAULT_COMMAND_QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(AppError::Config("worker_count must be at least 1".to_string()));
        }
        if self.command_queue_capacity == 0 {
            return Err(AppError::Config(
                "command_queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

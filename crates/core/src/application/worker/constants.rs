// Engine constants (no magic values)
use std::time::Duration;

/// Default number of concurrent polling lanes
pub const DEFAULT_WORKER_COUNT: usize = 2;

/// Default capacity of the control command queue
pub const DEFAULT_COMMAND_QUEUE_CAPACITY: usize = 3;

/// Extra work queue slots beyond one per job
pub const WORK_QUEUE_SLACK: usize = 1;

/// How long shutdown waits for workers to finish their current round
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

// Item Sink Port
// Destination of the fresh items found by a round

use crate::domain::{Item, Job};

/// Receives every fresh item, oldest first, as a round discovers them
pub trait ItemSink: Send + Sync {
    fn emit(&self, job: &Job, item: &Item);
}

/// Prints `query | title` followed by a blank line
pub struct StdoutSink;

impl ItemSink for StdoutSink {
    fn emit(&self, job: &Job, item: &Item) {
        println!("{} | {}\n", job.query(), item.title);
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::{ItemId, JobId};
    use std::sync::Mutex;

    /// Records every emission in order
    #[derive(Default)]
    pub struct RecordingSink {
        emitted: Mutex<Vec<(JobId, ItemId)>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn emitted(&self) -> Vec<(JobId, ItemId)> {
            self.emitted.lock().unwrap().clone()
        }

        /// Item ids emitted for one job, in emission order
        pub fn emitted_for(&self, job_id: JobId) -> Vec<ItemId> {
            self.emitted
                .lock()
                .unwrap()
                .iter()
                .filter(|(id, _)| *id == job_id)
                .map(|(_, item)| item.clone())
                .collect()
        }
    }

    impl ItemSink for RecordingSink {
        fn emit(&self, job: &Job, item: &Item) {
            self.emitted.lock().unwrap().push((job.id(), item.id.clone()));
        }
    }
}

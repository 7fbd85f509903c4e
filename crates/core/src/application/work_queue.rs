// Work Queue - bounded MPMC queue of jobs ready for one round

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::domain::Job;
use crate::error::{AppError, Result};

/// Bounded FIFO shared by the serializer (activation) and the workers
/// (self-requeue). Consumers take turns on the receiver.
///
/// Only trusted internal producers push here, so `push` waits for room
/// instead of signalling backpressure. Capacity is sized as jobs + 1, which
/// with at most one slot per job keeps pushes from ever waiting in practice.
#[derive(Clone)]
pub struct WorkQueue {
    tx: mpsc::Sender<Arc<Job>>,
    rx: Arc<Mutex<mpsc::Receiver<Arc<Job>>>>,
}

impl WorkQueue {
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Queue sized for `job_count` jobs plus one slot of slack
    pub fn for_jobs(job_count: usize) -> Self {
        Self::bounded(job_count + 1)
    }

    pub async fn push(&self, job: Arc<Job>) -> Result<()> {
        self.tx
            .send(job)
            .await
            .map_err(|e| AppError::InvalidState(format!("work queue closed (job {})", e.0.id())))
    }

    /// Wait for the next job; `None` once the queue is closed and drained
    pub async fn pop(&self) -> Option<Arc<Job>> {
        self.rx.lock().await.recv().await
    }

    /// Number of queued jobs
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

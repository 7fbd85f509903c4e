// Worker - one polling lane of the worker pool

pub mod constants;
mod shutdown;

pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::work_queue::WorkQueue;
use crate::domain::{cursor, Item, Job};
use crate::error::Result;
use crate::port::{ItemSink, SearchProvider};
use std::sync::Arc;
use tracing::{debug, error, info};

/// What a worker did with a job it pulled from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Job was deactivated while queued; no round ran
    Skipped,
    /// Round ran and the job went back onto the work queue
    Requeued,
    /// Round ran, then the job was found deactivated and left the queue
    Dropped,
}

/// Worker drains the shared work queue, one round at a time.
///
/// Self-requeue protocol: a job holds a lane only for one fetch-and-emit
/// round, then goes back to the tail of the queue while it stays active. A
/// fixed pool of N workers thereby becomes N continuously polling lanes
/// shared round-robin by the active jobs.
pub struct Worker {
    lane: usize,
    queue: WorkQueue,
    provider: Arc<dyn SearchProvider>,
    sink: Arc<dyn ItemSink>,
}

impl Worker {
    pub fn new(
        lane: usize,
        queue: WorkQueue,
        provider: Arc<dyn SearchProvider>,
        sink: Arc<dyn ItemSink>,
    ) -> Self {
        Self {
            lane,
            queue,
            provider,
            sink,
        }
    }

    /// Run worker loop until shutdown (or queue closure)
    pub async fn run(&self, mut shutdown: ShutdownToken) {
        info!(lane = self.lane, "Worker started");
        loop {
            if shutdown.is_shutdown() {
                info!(lane = self.lane, "Worker shutting down");
                break;
            }

            let job = tokio::select! {
                job = self.queue.pop() => match job {
                    Some(job) => job,
                    None => {
                        info!(lane = self.lane, "Work queue closed");
                        break;
                    }
                },
                _ = shutdown.wait() => {
                    info!(lane = self.lane, "Worker interrupted while idle");
                    break;
                }
            };

            match self.process(job).await {
                Ok(outcome) => debug!(lane = self.lane, ?outcome, "Round finished"),
                Err(e) => error!(lane = self.lane, error = %e, "Worker failed to reschedule job"),
            }
        }
        info!(lane = self.lane, "Worker stopped");
    }

    /// Handle one job pulled from the queue, applying the self-requeue protocol
    pub async fn process(&self, job: Arc<Job>) -> Result<RoundOutcome> {
        if !job.is_active() {
            job.clear_in_flight();
            info!(job_id = job.id(), "Job deactivated while queued, dropping it");
            return Ok(RoundOutcome::Skipped);
        }

        self.run_round(&job).await;

        if job.is_active() {
            let job_id = job.id();
            if let Err(e) = self.queue.push(Arc::clone(&job)).await {
                job.clear_in_flight();
                return Err(e);
            }
            debug!(job_id, "Job requeued");
            Ok(RoundOutcome::Requeued)
        } else {
            job.clear_in_flight();
            info!(job_id = job.id(), "Job deactivated, leaving the work queue");
            Ok(RoundOutcome::Dropped)
        }
    }

    /// One fetch-and-emit round; returns how many items were emitted
    pub async fn run_round(&self, job: &Job) -> usize {
        let batch = self.fetch(job).await;
        let current = job.cursor();
        let scan = cursor::scan(&batch, &current);

        for item in &scan.fresh {
            debug!(job_id = job.id(), item_id = %item.id, "Emitting item");
            self.sink.emit(job, item);
        }

        if let Some(next) = scan.next_cursor {
            debug!(job_id = job.id(), cursor = %next, "Cursor advanced");
            job.set_cursor(next);
        }

        scan.fresh.len()
    }

    /// Call the provider in its own task so a panicking adapter cannot take
    /// the lane down. Any failure yields an empty batch.
    async fn fetch(&self, job: &Job) -> Vec<Item> {
        let provider = Arc::clone(&self.provider);
        let query = job.query().to_string();
        let sort_mode = job.sort_mode();
        let window_size = job.window_size();

        let handle =
            tokio::spawn(async move { provider.search(&query, sort_mode, window_size).await });

        match handle.await {
            Ok(Ok(items)) => items,
            Ok(Err(e)) => {
                error!(job_id = job.id(), query = %job.query(), error = %e, "Search failed, round is empty");
                Vec::new()
            }
            Err(join_err) => {
                if join_err.is_panic() {
                    error!(job_id = job.id(), "Search panicked: {:?}", join_err);
                } else {
                    error!(job_id = job.id(), "Search cancelled: {:?}", join_err);
                }
                Vec::new()
            }
        }
    }
}

//! Request Serializer
//!
//! Single consumer of the control command queue. Every change to a job's
//! `active` flag, and every false -> true flip of `in_flight`, happens here,
//! one command at a time in arrival order.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::application::registry::JobRegistry;
use crate::application::work_queue::WorkQueue;
use crate::application::worker::ShutdownSender;
use crate::domain::{Command, Job, JobId, JobSnapshot};

/// Why a command was dropped (logged, never reported to the caller)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown job id {0}")]
    UnknownJob(JobId),

    #[error("job {0} is already active")]
    AlreadyActive(JobId),

    #[error("job {0} is inactive but still in flight")]
    StillInFlight(JobId),

    #[error("job {0} is already inactive")]
    AlreadyInactive(JobId),

    #[error("work queue closed")]
    WorkQueueClosed,
}

/// Why a command could not be queued (reported to the caller)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("command queue is full")]
    Full,

    #[error("command queue is closed")]
    Closed,
}

/// Message accepted by the serializer
#[derive(Debug)]
pub enum Request {
    Control(Command),
    Snapshot(oneshot::Sender<Vec<JobSnapshot>>),
}

/// Non-blocking producer side of the command queue
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<Request>,
}

impl CommandSender {
    /// Queue a control command without waiting for room
    pub fn submit(&self, command: Command) -> Result<(), SubmitError> {
        self.try_send(Request::Control(command))
    }

    /// Ask the serializer for a snapshot of every job.
    ///
    /// The request travels through the same FIFO as control commands, so the
    /// snapshot reflects every command accepted before it.
    pub async fn snapshot(&self) -> Result<Vec<JobSnapshot>, SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.try_send(Request::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| SubmitError::Closed)
    }

    fn try_send(&self, request: Request) -> Result<(), SubmitError> {
        self.tx.try_send(request).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SubmitError::Full,
            mpsc::error::TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

/// Create the bounded command queue
pub fn command_channel(capacity: usize) -> (CommandSender, mpsc::Receiver<Request>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (CommandSender { tx }, rx)
}

/// State machine applying commands to the registry and the work queue
pub struct RequestSerializer {
    registry: JobRegistry,
    queue: WorkQueue,
    requests: mpsc::Receiver<Request>,
    shutdown: ShutdownSender,
}

impl RequestSerializer {
    pub fn new(
        registry: JobRegistry,
        queue: WorkQueue,
        requests: mpsc::Receiver<Request>,
        shutdown: ShutdownSender,
    ) -> Self {
        Self {
            registry,
            queue,
            requests,
            shutdown,
        }
    }

    /// Drain the command queue until Exit (or until every sender is gone).
    /// The registry is torn down when this returns.
    pub async fn run(mut self) {
        info!(jobs = self.registry.len(), "Request serializer started");
        while let Some(request) = self.requests.recv().await {
            match request {
                Request::Control(Command::Exit) => {
                    info!("Exit requested, shutting down");
                    self.shutdown.shutdown();
                    break;
                }
                Request::Control(command) => {
                    if let Err(e) = self.apply(command).await {
                        warn!(%command, reason = %e, "Ignoring command");
                    }
                }
                Request::Snapshot(reply) => {
                    let _ = reply.send(self.registry.snapshot());
                }
            }
        }
        info!("Request serializer stopped");
    }

    /// Apply one Activate/Deactivate command
    pub async fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Activate(id) => self.activate(id).await,
            Command::Deactivate(id) => self.deactivate(id),
            Command::Exit => {
                self.shutdown.shutdown();
                Ok(())
            }
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    async fn activate(&mut self, id: JobId) -> Result<(), CommandError> {
        let job = self.lookup(id)?;
        if job.is_active() {
            return Err(CommandError::AlreadyActive(id));
        }
        // still draining out of the queue after a deactivate; reactivating
        // now would give the job a second slot
        if job.is_in_flight() {
            return Err(CommandError::StillInFlight(id));
        }

        job.set_active(true);
        job.mark_in_flight();
        if self.queue.push(Arc::clone(&job)).await.is_err() {
            job.clear_in_flight();
            job.set_active(false);
            return Err(CommandError::WorkQueueClosed);
        }
        info!(job_id = id, "Job activated");
        Ok(())
    }

    fn deactivate(&mut self, id: JobId) -> Result<(), CommandError> {
        let job = self.lookup(id)?;
        if !job.is_active() {
            return Err(CommandError::AlreadyInactive(id));
        }

        job.set_active(false);
        info!(job_id = id, "Job deactivated");
        Ok(())
    }

    fn lookup(&self, id: JobId) -> Result<Arc<Job>, CommandError> {
        self.registry
            .get(id)
            .cloned()
            .ok_or(CommandError::UnknownJob(id))
    }
}

//! Engine - process-wide lifecycle of the scheduler
//!
//! `Engine::start` wires the registry, work queue, worker pool and request
//! serializer together and seeds every configured job. The returned
//! `EngineHandle` is the only way in: a command sender for the control plane
//! and the shutdown token the process waits on.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{info, warn};

use crate::application::config::EngineConfig;
use crate::application::registry::JobRegistry;
use crate::application::serializer::{command_channel, CommandSender, RequestSerializer};
use crate::application::work_queue::WorkQueue;
use crate::application::worker::constants::WORK_QUEUE_SLACK;
use crate::application::worker::{shutdown_channel, ShutdownSender, ShutdownToken, Worker};
use crate::domain::JobSpec;
use crate::error::{AppError, Result};
use crate::port::{ItemSink, SearchProvider};

/// Scheduler engine (composition of the core components)
pub struct Engine {
    config: EngineConfig,
    provider: Arc<dyn SearchProvider>,
    sink: Arc<dyn ItemSink>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        provider: Arc<dyn SearchProvider>,
        sink: Arc<dyn ItemSink>,
    ) -> Self {
        Self {
            config,
            provider,
            sink,
        }
    }

    /// Start workers and serializer, then hand every job to the work queue
    pub async fn start(self, specs: Vec<JobSpec>) -> Result<EngineHandle> {
        self.config.validate()?;
        let registry = JobRegistry::from_specs(specs)?;
        if registry.is_empty() {
            return Err(AppError::Config("at least one job is required".to_string()));
        }

        let queue = WorkQueue::bounded(registry.len() + WORK_QUEUE_SLACK);
        let (shutdown_tx, shutdown_rx) = shutdown_channel();

        let mut workers = JoinSet::new();
        for lane in 0..self.config.worker_count {
            let worker = Worker::new(
                lane,
                queue.clone(),
                Arc::clone(&self.provider),
                Arc::clone(&self.sink),
            );
            let token = shutdown_rx.clone();
            workers.spawn(async move { worker.run(token).await });
        }

        for job in registry.jobs() {
            job.mark_in_flight();
            queue.push(Arc::clone(job)).await?;
        }

        info!(
            jobs = registry.len(),
            workers = self.config.worker_count,
            command_queue_capacity = self.config.command_queue_capacity,
            "Engine started"
        );

        let (commands, requests) = command_channel(self.config.command_queue_capacity);
        let serializer = RequestSerializer::new(registry, queue.clone(), requests, shutdown_tx.clone());
        let serializer = tokio::spawn(serializer.run());

        Ok(EngineHandle {
            commands,
            shutdown: shutdown_tx,
            token: shutdown_rx,
            queue,
            workers,
            serializer,
        })
    }
}

/// Running engine
pub struct EngineHandle {
    commands: CommandSender,
    shutdown: ShutdownSender,
    token: ShutdownToken,
    queue: WorkQueue,
    workers: JoinSet<()>,
    serializer: JoinHandle<()>,
}

impl EngineHandle {
    /// Producer side of the command queue, for the control plane
    pub fn commands(&self) -> CommandSender {
        self.commands.clone()
    }

    pub fn shutdown_token(&self) -> ShutdownToken {
        self.token.clone()
    }

    pub fn work_queue(&self) -> &WorkQueue {
        &self.queue
    }

    /// Trigger the same cooperative shutdown as an Exit command
    pub fn request_shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Block until Exit (or `request_shutdown`) is observed
    pub async fn wait_for_exit(&self) {
        let mut token = self.token.clone();
        token.wait().await;
    }

    /// Give workers `grace` to finish their current round, then abort the rest.
    /// In-flight searches are not cancelled before the grace period runs out.
    pub async fn join(mut self, grace: Duration) {
        self.shutdown.shutdown();

        let drained = tokio::time::timeout(grace, async {
            while self.workers.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            warn!(
                remaining = self.workers.len(),
                "Workers still busy after grace period, aborting"
            );
            self.workers.abort_all();
        }
        self.serializer.abort();
        info!("Engine stopped");
    }
}

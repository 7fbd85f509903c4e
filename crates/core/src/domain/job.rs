// Job Domain Model

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::error::{DomainError, Result};

/// Job ID (assigned positionally from the configured job list)
pub type JobId = i64;

/// Sort order requested from the search provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Relevance,
    Hot,
    Top,
    #[default]
    New,
    Comments,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::Hot => "hot",
            SortMode::Top => "top",
            SortMode::New => "new",
            SortMode::Comments => "comments",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_window_size() -> u32 {
    3
}

/// Immutable task parameters of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub query: String,
    #[serde(default)]
    pub sort_mode: SortMode,
    #[serde(default = "default_window_size")]
    pub window_size: u32,
}

impl JobSpec {
    pub fn new(query: impl Into<String>, sort_mode: SortMode, window_size: u32) -> Self {
        Self {
            query: query.into(),
            sort_mode,
            window_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(DomainError::InvalidJobSpec("query is empty".to_string()));
        }
        if self.window_size == 0 {
            return Err(DomainError::InvalidJobSpec(format!(
                "window_size must be at least 1 (query: {})",
                self.query
            )));
        }
        Ok(())
    }
}

/// Job Entity
///
/// Mutable fields follow a single-writer discipline:
/// - `active` is written only by the request serializer
/// - `cursor` is written only by the worker that currently owns the job
/// - `in_flight` goes false -> true only in the serializer (or at seeding),
///   and true -> false only in a worker
#[derive(Debug)]
pub struct Job {
    id: JobId,
    spec: JobSpec,
    cursor: Mutex<String>,
    active: AtomicBool,
    in_flight: AtomicBool,
}

impl Job {
    /// Create a job in its startup state: active, idle, no cursor
    pub fn new(id: JobId, spec: JobSpec) -> Self {
        Self {
            id,
            spec,
            cursor: Mutex::new(String::new()),
            active: AtomicBool::new(true),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn spec(&self) -> &JobSpec {
        &self.spec
    }

    pub fn query(&self) -> &str {
        &self.spec.query
    }

    pub fn sort_mode(&self) -> SortMode {
        self.spec.sort_mode
    }

    pub fn window_size(&self) -> u32 {
        self.spec.window_size
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Current cursor (empty string = no prior cursor)
    pub fn cursor(&self) -> String {
        self.cursor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub(crate) fn mark_in_flight(&self) {
        self.in_flight.store(true, Ordering::SeqCst);
    }

    pub(crate) fn clear_in_flight(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }

    pub(crate) fn set_cursor(&self, cursor: impl Into<String>) {
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner) = cursor.into();
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            id: self.id,
            query: self.spec.query.clone(),
            sort_mode: self.spec.sort_mode,
            window_size: self.spec.window_size,
            cursor: self.cursor(),
            active: self.is_active(),
            in_flight: self.is_in_flight(),
        }
    }
}

/// Point-in-time view of a job, served by the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: JobId,
    pub query: String,
    pub sort_mode: SortMode,
    pub window_size: u32,
    pub cursor: String,
    pub active: bool,
    pub in_flight: bool,
}

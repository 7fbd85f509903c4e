// Control Command Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};
use crate::domain::JobId;

/// Control-plane instruction consumed by the request serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "job_id", rename_all = "snake_case")]
pub enum Command {
    Exit,
    Activate(JobId),
    Deactivate(JobId),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Exit => write!(f, "EXIT"),
            Command::Activate(id) => write!(f, "ACTIVATE({})", id),
            Command::Deactivate(id) => write!(f, "DEACTIVATE({})", id),
        }
    }
}

/// Parse a job id taken from a request path segment
pub fn parse_job_id(raw: &str) -> Result<JobId> {
    raw.parse::<JobId>()
        .map_err(|_| DomainError::InvalidJobId(raw.to_string()))
}

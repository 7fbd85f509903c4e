//! Control Plane Response Types

use pollwatch_core::domain::JobSnapshot;
use serde::{Deserialize, Serialize};

/// GET /jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobSnapshot>,
}

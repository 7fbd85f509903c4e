//! Control Plane Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pollwatch_core::application::CommandSender;
use pollwatch_core::domain::command::parse_job_id;
use pollwatch_core::domain::{Command, JobId};
use tracing::{debug, warn};

use crate::error::ControlError;
use crate::types::JobsResponse;

fn submit(commands: &CommandSender, command: Command) -> Result<StatusCode, ControlError> {
    match commands.submit(command) {
        Ok(()) => {
            debug!(%command, "Command queued");
            Ok(StatusCode::ACCEPTED)
        }
        Err(e) => {
            warn!(%command, error = %e, "Command dropped");
            Err(e.into())
        }
    }
}

/// The whole path tail after the verb must be an integer; `1/2` is rejected
fn job_id(raw: &str) -> Result<JobId, ControlError> {
    parse_job_id(raw).map_err(|_| ControlError::InvalidJobId(raw.to_string()))
}

/// POST /exit
pub async fn exit(State(commands): State<CommandSender>) -> Result<StatusCode, ControlError> {
    submit(&commands, Command::Exit)
}

/// POST /activate/{*job_id}
pub async fn activate(
    State(commands): State<CommandSender>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ControlError> {
    let id = job_id(&raw_id)?;
    submit(&commands, Command::Activate(id))
}

/// POST /deactivate/{*job_id}
pub async fn deactivate(
    State(commands): State<CommandSender>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ControlError> {
    let id = job_id(&raw_id)?;
    submit(&commands, Command::Deactivate(id))
}

/// POST /activate/ and /deactivate/ with no id
pub async fn missing_job_id() -> ControlError {
    ControlError::InvalidJobId(String::new())
}

/// GET /jobs
pub async fn list_jobs(
    State(commands): State<CommandSender>,
) -> Result<Json<JobsResponse>, ControlError> {
    let jobs = commands.snapshot().await?;
    Ok(Json(JobsResponse { jobs }))
}

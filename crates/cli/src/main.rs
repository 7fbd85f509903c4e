//! Pollwatch CLI - control client for the Pollwatch daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pollwatch_core::domain::{JobId, JobSnapshot};
use reqwest::StatusCode;
use serde::Deserialize;
use tabled::{Table, Tabled};

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "pollwatch")]
#[command(about = "Pollwatch control CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control plane base URL
    #[arg(long, env = "POLLWATCH_URL", default_value = DEFAULT_URL)]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resume polling a job
    Activate {
        /// Job ID
        job_id: JobId,
    },

    /// Stop polling a job after its current round
    Deactivate {
        /// Job ID
        job_id: JobId,
    },

    /// Ask the daemon to exit
    Exit,

    /// Show every job and its scheduling state
    Status,
}

#[derive(Deserialize)]
struct JobsResponse {
    jobs: Vec<JobSnapshot>,
}

#[derive(Tabled)]
struct JobRow {
    id: JobId,
    query: String,
    sort: String,
    window: u32,
    active: String,
    in_flight: String,
    cursor: String,
}

impl From<JobSnapshot> for JobRow {
    fn from(job: JobSnapshot) -> Self {
        Self {
            id: job.id,
            query: job.query,
            sort: job.sort_mode.to_string(),
            window: job.window_size,
            active: yes_no(job.active),
            in_flight: yes_no(job.in_flight),
            cursor: if job.cursor.is_empty() {
                "-".to_string()
            } else {
                job.cursor
            },
        }
    }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}

async fn post(base_url: &str, path: &str) -> Result<StatusCode> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), path);
    let response = reqwest::Client::new()
        .post(&url)
        .send()
        .await
        .context("Failed to connect to daemon")?;
    Ok(response.status())
}

fn report(status: StatusCode, accepted: String) -> Result<()> {
    match status {
        StatusCode::ACCEPTED => {
            println!("{}", format!("✓ {}", accepted).green().bold());
            Ok(())
        }
        StatusCode::BAD_REQUEST => anyhow::bail!("invalid job id"),
        StatusCode::SERVICE_UNAVAILABLE => {
            anyhow::bail!("server busy (command queue full or shutting down), retry later")
        }
        other => anyhow::bail!("unexpected response: {}", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Activate { job_id } => {
            let status = post(&cli.url, &format!("/activate/{}", job_id)).await?;
            report(status, format!("Activation of job {} queued", job_id))?;
        }

        Commands::Deactivate { job_id } => {
            let status = post(&cli.url, &format!("/deactivate/{}", job_id)).await?;
            report(status, format!("Deactivation of job {} queued", job_id))?;
        }

        Commands::Exit => {
            let status = post(&cli.url, "/exit").await?;
            report(status, "Exit queued".to_string())?;
        }

        Commands::Status => {
            println!("{}", "Pollwatch Status".cyan().bold());
            println!();

            let url = format!("{}/jobs", cli.url.trim_end_matches('/'));
            let response = reqwest::get(&url)
                .await
                .context("Failed to connect to daemon")?;

            if response.status() == StatusCode::SERVICE_UNAVAILABLE {
                println!("  {} {}", "Status:".bold(), "BUSY".yellow());
                return Ok(());
            }

            let jobs: JobsResponse = response
                .error_for_status()?
                .json()
                .await
                .context("Failed to parse response")?;

            println!("  {} {}", "URL:".bold(), cli.url);
            println!("  {} {}", "Status:".bold(), "ONLINE".green());
            println!();

            let rows: Vec<JobRow> = jobs.jobs.into_iter().map(JobRow::from).collect();
            println!("{}", Table::new(rows));
        }
    }

    Ok(())
}

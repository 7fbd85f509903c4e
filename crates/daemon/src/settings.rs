//! Daemon settings
//!
//! Layered with the `config` crate: an optional TOML file, then `POLLWATCH_*`
//! environment variables on top.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

use pollwatch_api_http::HttpServerConfig;
use pollwatch_core::application::worker::constants::{
    DEFAULT_COMMAND_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT,
};
use pollwatch_core::application::EngineConfig;
use pollwatch_core::domain::{JobSpec, SortMode};
use pollwatch_infra_reddit::RedditConfig;

pub const DEFAULT_CONFIG_PATH: &str = "~/.pollwatch/config.toml";
const ENV_PREFIX: &str = "POLLWATCH";

/// Queries polled when the configuration names no jobs
const DEFAULT_QUERIES: [&str; 3] = ["bolsonaro", "trump", "nicolás maduro"];
const DEFAULT_WINDOW_SIZE: u32 = 3;

fn default_listen_host() -> String {
    HttpServerConfig::default().host
}

fn default_listen_port() -> u16 {
    HttpServerConfig::default().port
}

fn default_worker_count() -> usize {
    DEFAULT_WORKER_COUNT
}

fn default_command_queue_capacity() -> usize {
    DEFAULT_COMMAND_QUEUE_CAPACITY
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_listen_host")]
    pub listen_host: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    #[serde(default = "default_command_queue_capacity")]
    pub command_queue_capacity: usize,
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
    #[serde(default)]
    pub reddit_base_url: Option<String>,
    #[serde(default)]
    pub reddit_user_agent: Option<String>,
    #[serde(default)]
    pub reddit_min_interval_ms: Option<u64>,
}

impl Settings {
    /// Load from `path` (missing file is fine) and the environment
    pub fn load(path: &str) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::from_config(builder.build().context("Failed to read configuration sources")?)
    }

    fn from_config(config: Config) -> Result<Self> {
        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            worker_count: self.worker_count,
            command_queue_capacity: self.command_queue_capacity,
        }
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.listen_host.clone(),
            port: self.listen_port,
        }
    }

    pub fn reddit_config(&self) -> RedditConfig {
        let mut config = RedditConfig::default();
        if let Some(base_url) = &self.reddit_base_url {
            config.base_url = base_url.clone();
        }
        if let Some(user_agent) = &self.reddit_user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(ms) = self.reddit_min_interval_ms {
            config.min_request_interval = Duration::from_millis(ms);
        }
        config
    }

    /// Configured jobs, or the built-in list when none are configured
    pub fn job_specs(&self) -> Vec<JobSpec> {
        if !self.jobs.is_empty() {
            return self.jobs.clone();
        }
        DEFAULT_QUERIES
            .iter()
            .map(|query| JobSpec::new(*query, SortMode::New, DEFAULT_WINDOW_SIZE))
            .collect()
    }
}

/// Resolve the settings file path (`POLLWATCH_CONFIG`, `~` expanded)
pub fn config_path() -> String {
    let raw = std::env::var("POLLWATCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    shellexpand::tilde(&raw).into_owned()
}

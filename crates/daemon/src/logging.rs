//! Logging setup
//!
//! `POLLWATCH_LOG_FORMAT=json` switches to structured JSON lines; anything
//! else gets the pretty formatter. `RUST_LOG` overrides the default filter.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str =
    "pollwatch_daemon=info,pollwatch_core=info,pollwatch_api_http=info,pollwatch_infra_reddit=info";

pub fn init_logging() -> Result<()> {
    let log_format = std::env::var("POLLWATCH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()?;
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .try_init()?;
        }
    }

    Ok(())
}

// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid job spec: {0}")]
    InvalidJobSpec(String),

    #[error("Invalid job id: {0}")]
    InvalidJobId(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

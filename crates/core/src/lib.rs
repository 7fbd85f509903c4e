// Pollwatch Core - Domain Logic, Ports & Scheduling Engine
// NO infrastructure dependencies (hexagonal architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

//! HTTP Control Plane
//!
//! Translates control requests into engine commands. Handlers never wait
//! for a command to be applied: 202 means "queued", 503 means the command
//! queue was full and the command was dropped.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{make_router, HttpServer, HttpServerConfig};

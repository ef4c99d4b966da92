//! Job status and source summary service

mod service;
mod types;

pub use service::{StatusService, StatusServiceImpl};
pub use types::JobStatus;

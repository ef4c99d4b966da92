//! Result retrieval service

mod service;
mod types;

pub use service::{CaughtService, CaughtServiceImpl};
pub use types::{Caught, CaughtPayload};

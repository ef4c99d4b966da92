//! Fixed-position search service

mod service;
mod types;

pub use service::{FixedService, FixedServiceImpl};
pub use types::{FixedTargetQuery, IntersectionType};

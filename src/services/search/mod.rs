//! Moving-target search service

mod service;
mod types;

pub use service::{SearchService, SearchServiceImpl};
pub use types::{MovingTargetQuery, SearchResponse};

#[cfg(test)]
mod tests;

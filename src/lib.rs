//! # CATCH API Client
//!
//! Async Rust client for the CATCH survey-search service, a tool for
//! finding comets and asteroids in NEO and time-domain survey data hosted
//! by the Planetary Data System's Small Bodies Node
//! (<https://catch.astro.umd.edu/>).
//!
//! ## Features
//!
//! - Moving-target and fixed-position searches
//! - Asynchronous job tracking over the server-sent-event stream, with
//!   both historical stream protocols (structured prefix/status records
//!   and bare job-ID echoes)
//! - Result retrieval, job status, and source database summaries
//! - Both historical endpoint layouts (`/catch` and `/query/moving`)
//! - JSON output everywhere; table output behind the `table` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catch_client::{create_client, CatchConfig, MovingTargetQuery, SearchService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_client(CatchConfig::default())?;
//!
//!     let response = client
//!         .search()
//!         .query(&MovingTargetQuery::new("65P"))
//!         .await?;
//!
//!     // Waits on the event stream if the job was queued, then fetches
//!     // the results URL.
//!     let caught = client.watcher().await_completion(&response).await?;
//!     println!("found {} observations", caught.count);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - Main client interface and factory functions
//! - `config` - Configuration, endpoint layouts, stream protocol versions
//! - `transport` - HTTP transport layer and raw byte streaming
//! - `error` - Error types and taxonomy
//! - `jobid` - Job UUID validation
//! - `services` - Per-route services and the job-completion watcher
//! - `output` - JSON and optional table rendering
//! - `observability` - Logging setup

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod jobid;
pub mod observability;
pub mod output;
pub mod services;
pub mod transport;

// Development/testing modules
#[cfg(test)]
pub mod mocks;

// Re-exports for convenience
pub use client::{create_client, create_client_from_env, CatchClient};
pub use config::{ApiLayout, CatchConfig, StreamProtocolVersion};
pub use error::{CatchError, CatchResult};
pub use jobid::JobId;
pub use output::Format;
pub use transport::{HttpTransport, ReqwestTransport};

// Service re-exports
pub use services::caught::{Caught, CaughtPayload, CaughtService, CaughtServiceImpl};
pub use services::fixed::{FixedService, FixedServiceImpl, FixedTargetQuery, IntersectionType};
pub use services::search::{MovingTargetQuery, SearchResponse, SearchService, SearchServiceImpl};
pub use services::status::{JobStatus, StatusService, StatusServiceImpl};
pub use services::stream::{
    protocol_for, BareJobIdProtocol, EventStream, JobState, JobUpdate, JobWatcher,
    PrefixStatusProtocol, ProgressObserver, StderrProgress, StreamProtocol,
};

/// The default CATCH API base URL
pub const DEFAULT_BASE_URL: &str = "https://catch-api.astro.umd.edu";

/// The default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// The default read timeout for plain requests in seconds
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 120;

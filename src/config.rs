//! Configuration for the CATCH client

use crate::error::{CatchError, CatchResult};
use std::time::Duration;

/// Configuration for the CATCH client
#[derive(Debug, Clone)]
pub struct CatchConfig {
    /// Base URL for the API (default: https://catch-api.astro.umd.edu)
    pub base_url: String,

    /// Connection timeout (default: 30 seconds)
    pub connect_timeout: Duration,

    /// Read timeout for plain requests (default: 120 seconds).
    ///
    /// Never applied to the event stream, which must be allowed to idle
    /// between server pushes.
    pub read_timeout: Duration,

    /// Endpoint layout to use (default: [`ApiLayout::V3`])
    pub layout: ApiLayout,

    /// Stream message protocol (default: [`StreamProtocolVersion::PrefixStatus`])
    pub stream_protocol: StreamProtocolVersion,
}

impl Default for CatchConfig {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(crate::DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(crate::DEFAULT_READ_TIMEOUT_SECS),
            layout: ApiLayout::V3,
            stream_protocol: StreamProtocolVersion::PrefixStatus,
        }
    }
}

impl CatchConfig {
    /// Create a configuration with the default base URL
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables
    pub fn from_env() -> CatchResult<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("CATCH_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(secs) = std::env::var("CATCH_CONNECT_TIMEOUT") {
            let secs = secs.parse::<u64>().map_err(|_| {
                CatchError::Configuration("CATCH_CONNECT_TIMEOUT must be an integer".to_string())
            })?;
            config.connect_timeout = Duration::from_secs(secs);
        }

        if let Ok(secs) = std::env::var("CATCH_READ_TIMEOUT") {
            let secs = secs.parse::<u64>().map_err(|_| {
                CatchError::Configuration("CATCH_READ_TIMEOUT must be an integer".to_string())
            })?;
            config.read_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout for plain requests
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the endpoint layout
    pub fn with_layout(mut self, layout: ApiLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the stream message protocol
    pub fn with_stream_protocol(mut self, protocol: StreamProtocolVersion) -> Self {
        self.stream_protocol = protocol;
        self
    }
}

/// The two historical CATCH endpoint layouts.
///
/// Only the moving-target search route differs; stream, caught, status,
/// and fixed routes are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiLayout {
    /// Current layout: search at `/catch`
    V3,
    /// Legacy layout: search at `/query/moving`
    V2Moving,
}

impl ApiLayout {
    /// Route for a moving-target search
    pub fn search_path(&self) -> &'static str {
        match self {
            ApiLayout::V3 => "catch",
            ApiLayout::V2Moving => "query/moving",
        }
    }

    /// Route for a fixed-position search
    pub fn fixed_path(&self) -> &'static str {
        "fixed"
    }

    /// Route for the server-sent event stream
    pub fn stream_path(&self) -> &'static str {
        "stream"
    }

    /// Route for retrieving results of a completed job
    pub fn caught_path(&self, job_id_hex: &str) -> String {
        format!("caught/{}", job_id_hex)
    }

    /// Route for a job status lookup
    pub fn status_path(&self, job_id_hex: &str) -> String {
        format!("status/{}", job_id_hex)
    }

    /// Route for the source database summary
    pub fn sources_path(&self) -> &'static str {
        "status/sources"
    }
}

/// Which shape of stream message the server emits.
///
/// The two API generations are incompatible: one publishes structured
/// progress records keyed by a job-ID prefix, the other echoes the full
/// job ID once the job is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamProtocolVersion {
    /// Structured `{job_prefix, status, text}` records; terminal when
    /// `status` is `success` or `error`
    PrefixStatus,
    /// Bare job-ID echo; terminal on the first exact match
    BareJobId,
}

//! Stream message protocols.
//!
//! Two incompatible message shapes exist across CATCH API generations:
//! structured `{job_prefix, status, text}` records, and a bare echo of
//! the full job ID once a job is ready. Each is a [`StreamProtocol`]
//! implementation so the watcher stays protocol-agnostic.

use crate::config::StreamProtocolVersion;
use crate::jobid::PREFIX_LEN;
use serde_json::Value;
use std::sync::Arc;

/// Reported execution state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Waiting in the server-side queue
    Queued,
    /// Search in progress
    Running,
    /// Search finished successfully
    Success,
    /// Search failed server-side
    Error,
}

impl JobState {
    /// Parse a stream `status` field; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "queued" => Some(JobState::Queued),
            "running" => Some(JobState::Running),
            "success" => Some(JobState::Success),
            "error" => Some(JobState::Error),
            _ => None,
        }
    }

    /// Whether this state ends the job
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Success | JobState::Error)
    }
}

/// A stream message that concerns the tracked job
#[derive(Debug, Clone, PartialEq)]
pub struct JobUpdate {
    /// Reported state, when the message carried a recognizable one
    pub state: Option<JobState>,
    /// Human-readable progress text to surface to the observer
    pub text: Option<String>,
}

impl JobUpdate {
    /// Whether the watcher should stop listening after this update
    pub fn is_terminal(&self) -> bool {
        self.state.map(|s| s.is_terminal()).unwrap_or(false)
    }
}

/// Interpretation of raw stream payloads for one tracked job.
///
/// `interpret` returns `None` for anything that should be consumed and
/// ignored: keep-alives, malformed entries, and other jobs' messages.
/// It never fails; a shared feed must tolerate arbitrary payloads.
pub trait StreamProtocol: Send + Sync {
    /// Classify a single event payload against the tracked job ID
    /// (as reported by the search response)
    fn interpret(&self, payload: &str, job_id: &str) -> Option<JobUpdate>;
}

/// Structured prefix/status protocol (current API).
///
/// Messages are JSON objects whose `job_prefix` holds the first 8 hex
/// characters of the job UUID; `status` is one of `queued`, `running`,
/// `success`, `error`, with `success`/`error` terminal.
pub struct PrefixStatusProtocol;

impl StreamProtocol for PrefixStatusProtocol {
    fn interpret(&self, payload: &str, job_id: &str) -> Option<JobUpdate> {
        // non-JSON payloads are keep-alives
        let value: Value = serde_json::from_str(payload).ok()?;

        // so are JSON scalars and arrays
        let object = value.as_object()?;

        let prefix: String = job_id.chars().take(PREFIX_LEN).collect();
        if object.get("job_prefix").and_then(Value::as_str) != Some(prefix.as_str()) {
            return None;
        }

        let state = object
            .get("status")
            .and_then(Value::as_str)
            .and_then(JobState::parse);
        let text = object
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(JobUpdate { state, text })
    }
}

/// Bare job-ID echo protocol (legacy API).
///
/// The server publishes the full job ID, by itself, when the job is
/// ready. A match carries no distinct success or error signal: the match
/// itself means the results can be fetched.
pub struct BareJobIdProtocol;

impl StreamProtocol for BareJobIdProtocol {
    fn interpret(&self, payload: &str, job_id: &str) -> Option<JobUpdate> {
        if payload.trim() == job_id {
            Some(JobUpdate {
                state: Some(JobState::Success),
                text: None,
            })
        } else {
            None
        }
    }
}

/// Select the protocol implementation for a configured version
pub fn protocol_for(version: StreamProtocolVersion) -> Arc<dyn StreamProtocol> {
    match version {
        StreamProtocolVersion::PrefixStatus => Arc::new(PrefixStatusProtocol),
        StreamProtocolVersion::BareJobId => Arc::new(BareJobIdProtocol),
    }
}

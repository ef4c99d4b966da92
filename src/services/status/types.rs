//! Types for the status routes

use serde::Deserialize;
use serde_json::Value;

/// Status of a previously submitted job.
///
/// Parameters and per-source status rows are kept untyped: the server
/// adds fields between API versions and the client only displays them.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatus {
    /// Job UUID (hex form, as stored server-side)
    #[serde(default)]
    pub job_id: Option<String>,

    /// Search parameters the job was submitted with
    /// (`target`, `padding`, `uncertainty_ellipse`, ...)
    #[serde(default)]
    pub parameters: Option<Value>,

    /// Per-source execution status rows
    #[serde(default)]
    pub status: Option<Value>,
}

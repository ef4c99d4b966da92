//! Types for result retrieval

use crate::error::{CatchError, CatchResult};
use serde::Deserialize;
use serde_json::Value;

/// Raw result payload as returned by `/caught/{id}` or a results URL.
///
/// Either `data` is present, or the server substituted an error `message`.
/// Observation records are kept as untyped JSON: their columns vary per
/// survey source and the client only forwards them to output.
#[derive(Debug, Clone, Deserialize)]
pub struct CaughtPayload {
    /// Number of observations found
    #[serde(default)]
    pub count: u64,

    /// Ordered observation records, one JSON object per observation
    #[serde(default)]
    pub data: Option<Vec<Value>>,

    /// Server error message when `data` is absent
    #[serde(default)]
    pub message: Option<String>,
}

impl CaughtPayload {
    /// Convert into final results.
    ///
    /// Fails with [`CatchError::SearchFailed`] carrying the server message
    /// (or `"unknown error"`) when no `data` field exists. A present but
    /// empty `data` is a successful search that found nothing.
    pub fn into_results(self) -> CatchResult<Caught> {
        match self.data {
            Some(data) => Ok(Caught {
                count: self.count,
                data,
            }),
            None => Err(CatchError::search_failed(self.message)),
        }
    }
}

/// Successful search results
#[derive(Debug, Clone)]
pub struct Caught {
    /// Number of observations found; zero means "nothing found"
    pub count: u64,
    /// Ordered observation records
    pub data: Vec<Value>,
}

impl Caught {
    /// Whether the search completed without finding anything
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

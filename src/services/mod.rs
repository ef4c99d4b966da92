//! Service implementations for the CATCH API routes.
//!
//! Each route family gets a trait (for mocking) and a transport-backed
//! implementation:
//!
//! - `search` - moving-target searches (`/catch` or `/query/moving`)
//! - `fixed` - fixed-position searches (`/fixed`)
//! - `caught` - result retrieval (`/caught/{id}` and results URLs)
//! - `status` - job status and source summaries (`/status/...`)
//! - `stream` - SSE subscription, message protocols, and the job watcher

pub mod caught;
pub mod fixed;
pub mod search;
pub mod status;
pub mod stream;

use crate::error::{CatchError, CatchResult};
use url::Url;

/// Join a relative route onto the base URL, preserving any path prefix
/// the base already carries (e.g. `https://catch.astro.umd.edu/api`).
pub(crate) fn join_route(base: &Url, route: &str) -> CatchResult<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| CatchError::Configuration("Base URL cannot be a base".to_string()))?;
        segments.pop_if_empty();
        for segment in route.split('/') {
            segments.push(segment);
        }
    }
    Ok(url)
}

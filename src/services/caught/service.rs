//! Result retrieval service implementation

use super::types::CaughtPayload;
use crate::config::ApiLayout;
use crate::error::{CatchError, CatchResult};
use crate::jobid::JobId;
use crate::services::join_route;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use http::{HeaderMap, Method};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Caught service trait for testability
#[async_trait]
pub trait CaughtService: Send + Sync {
    /// Retrieve results for a completed job by its ID
    async fn caught(&self, job_id: &JobId) -> CatchResult<CaughtPayload>;

    /// Fetch a result payload from an absolute results URL, as handed out
    /// by a search response
    async fn fetch_results(&self, results_url: &str) -> CatchResult<CaughtPayload>;
}

/// Implementation of the caught service
pub struct CaughtServiceImpl {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    layout: ApiLayout,
}

impl CaughtServiceImpl {
    /// Create a new caught service
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: Url, layout: ApiLayout) -> Self {
        Self {
            transport,
            base_url,
            layout,
        }
    }

    async fn get_payload(&self, url: String) -> CatchResult<CaughtPayload> {
        debug!(url = %url, "fetching results");

        let response = self
            .transport
            .execute(Method::GET, url, HeaderMap::new())
            .await?;

        if response.status == 200 {
            let payload = serde_json::from_slice::<CaughtPayload>(&response.body)?;
            Ok(payload)
        } else {
            Err(CatchError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            })
        }
    }
}

#[async_trait]
impl CaughtService for CaughtServiceImpl {
    async fn caught(&self, job_id: &JobId) -> CatchResult<CaughtPayload> {
        let route = self.layout.caught_path(&job_id.as_simple());
        let url = join_route(&self.base_url, &route)?;
        self.get_payload(url.to_string()).await
    }

    async fn fetch_results(&self, results_url: &str) -> CatchResult<CaughtPayload> {
        // Results URLs arrive absolute from the search response
        let url = Url::parse(results_url)?;
        self.get_payload(url.to_string()).await
    }
}

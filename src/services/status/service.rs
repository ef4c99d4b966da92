//! Status service implementation

use super::types::JobStatus;
use crate::config::ApiLayout;
use crate::error::{CatchError, CatchResult};
use crate::jobid::JobId;
use crate::services::join_route;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use http::{HeaderMap, Method};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Status service trait for testability
#[async_trait]
pub trait StatusService: Send + Sync {
    /// Retrieve the status of a job
    async fn job(&self, job_id: &JobId) -> CatchResult<JobStatus>;

    /// Retrieve the source database summary.
    ///
    /// Also backs source discovery: each summary row names an allowed
    /// data source.
    async fn sources(&self) -> CatchResult<Value>;
}

/// Implementation of the status service
pub struct StatusServiceImpl {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    layout: ApiLayout,
}

impl StatusServiceImpl {
    /// Create a new status service
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: Url, layout: ApiLayout) -> Self {
        Self {
            transport,
            base_url,
            layout,
        }
    }

    async fn get(&self, route: &str) -> CatchResult<Vec<u8>> {
        let url = join_route(&self.base_url, route)?;
        debug!(url = %url, "fetching status");

        let response = self
            .transport
            .execute(Method::GET, url.to_string(), HeaderMap::new())
            .await?;

        if response.status == 200 {
            Ok(response.body)
        } else {
            Err(CatchError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            })
        }
    }
}

#[async_trait]
impl StatusService for StatusServiceImpl {
    async fn job(&self, job_id: &JobId) -> CatchResult<JobStatus> {
        let route = self.layout.status_path(&job_id.as_simple());
        let body = self.get(&route).await?;
        let status = serde_json::from_slice::<JobStatus>(&body)?;
        Ok(status)
    }

    async fn sources(&self) -> CatchResult<Value> {
        let body = self.get(self.layout.sources_path()).await?;
        let summary = serde_json::from_slice::<Value>(&body)?;
        Ok(summary)
    }
}

//! Fixed-position search service implementation

use super::types::FixedTargetQuery;
use crate::config::ApiLayout;
use crate::error::{CatchError, CatchResult};
use crate::services::caught::CaughtPayload;
use crate::services::join_route;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use http::{HeaderMap, Method};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Fixed-position search service trait for testability
#[async_trait]
pub trait FixedService: Send + Sync {
    /// Run a fixed-position search.
    ///
    /// This endpoint is synchronous: results come back directly, with no
    /// job to await.
    async fn query(&self, query: &FixedTargetQuery) -> CatchResult<CaughtPayload>;
}

/// Implementation of the fixed-position search service
pub struct FixedServiceImpl {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    layout: ApiLayout,
}

impl FixedServiceImpl {
    /// Create a new fixed-position search service
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: Url, layout: ApiLayout) -> Self {
        Self {
            transport,
            base_url,
            layout,
        }
    }

    fn build_url(&self, query: &FixedTargetQuery) -> CatchResult<Url> {
        let mut url = join_route(&self.base_url, self.layout.fixed_path())?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("ra", &query.ra);
            pairs.append_pair("dec", &query.dec);

            for source in &query.sources {
                pairs.append_pair("sources", source);
            }

            if let Some(radius) = query.radius {
                pairs.append_pair("radius", &radius.to_string());
            }

            if let Some(intersection_type) = query.intersection_type {
                pairs.append_pair("intersection_type", intersection_type.as_str());
            }

            if let Some(start_date) = &query.start_date {
                pairs.append_pair("start_date", start_date);
            }

            if let Some(stop_date) = &query.stop_date {
                pairs.append_pair("stop_date", stop_date);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl FixedService for FixedServiceImpl {
    async fn query(&self, query: &FixedTargetQuery) -> CatchResult<CaughtPayload> {
        if query.ra.is_empty() || query.dec.is_empty() {
            return Err(CatchError::Configuration(
                "Both RA and Dec are required".to_string(),
            ));
        }

        let url = self.build_url(query)?;
        debug!(ra = %query.ra, dec = %query.dec, url = %url, "submitting fixed-position search");

        let response = self
            .transport
            .execute(Method::GET, url.to_string(), HeaderMap::new())
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

//! Moving-target search service implementation

use super::types::{MovingTargetQuery, SearchResponse};
use crate::config::ApiLayout;
use crate::error::{CatchError, CatchResult};
use crate::services::join_route;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use http::{HeaderMap, Method};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Search service trait for testability
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Submit a moving-target search.
    ///
    /// The server either answers from cache (`queued == false`) or
    /// enqueues a job whose completion must be awaited on the event
    /// stream before the `results` URL yields data.
    async fn query(&self, query: &MovingTargetQuery) -> CatchResult<SearchResponse>;
}

/// Implementation of the search service
pub struct SearchServiceImpl {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    layout: ApiLayout,
}

impl SearchServiceImpl {
    /// Create a new search service
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: Url, layout: ApiLayout) -> Self {
        Self {
            transport,
            base_url,
            layout,
        }
    }

    fn build_url(&self, query: &MovingTargetQuery) -> CatchResult<Url> {
        let mut url = join_route(&self.base_url, self.layout.search_path())?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("target", &query.target);
            pairs.append_pair("cached", if query.cached { "true" } else { "false" });

            for source in &query.sources {
                pairs.append_pair("sources", source);
            }

            if let Some(start_date) = &query.start_date {
                pairs.append_pair("start_date", start_date);
            }

            if let Some(stop_date) = &query.stop_date {
                pairs.append_pair("stop_date", stop_date);
            }

            if let Some(padding) = query.padding {
                pairs.append_pair("padding", &padding.to_string());
            }

            if query.uncertainty_ellipse {
                pairs.append_pair("uncertainty_ellipse", "true");
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl SearchService for SearchServiceImpl {
    async fn query(&self, query: &MovingTargetQuery) -> CatchResult<SearchResponse> {
        if query.target.is_empty() {
            return Err(CatchError::Configuration(
                "Target designation is required".to_string(),
            ));
        }

        let url = self.build_url(query)?;
        debug!(target = %query.target, url = %url, "submitting moving-target search");

        let response = self
            .transport
            .execute(Method::GET, url.to_string(), HeaderMap::new())
            .await?;

        if response.status == 200 {
            let search = serde_json::from_slice::<SearchResponse>(&response.body)?;
            Ok(search)
        } else {
            Err(CatchError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            })
        }
    }
}

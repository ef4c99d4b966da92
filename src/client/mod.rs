//! Client interface for the CATCH API.

use crate::config::CatchConfig;
use crate::error::CatchResult;
use crate::services::caught::CaughtServiceImpl;
use crate::services::fixed::FixedServiceImpl;
use crate::services::join_route;
use crate::services::search::SearchServiceImpl;
use crate::services::status::StatusServiceImpl;
use crate::services::stream::{protocol_for, EventStream, JobWatcher};
use crate::transport::{HttpTransport, ReqwestTransport};
use http::{HeaderMap, Method};
use std::sync::Arc;
use url::Url;

/// The CATCH API client.
///
/// Owns the transport and hands out per-route services sharing it.
pub struct CatchClient {
    config: Arc<CatchConfig>,
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
}

impl CatchClient {
    /// Create a new client from configuration
    pub fn new(config: CatchConfig) -> CatchResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let transport = Arc::new(ReqwestTransport::new(
            config.connect_timeout,
            config.read_timeout,
        )?) as Arc<dyn HttpTransport>;

        Ok(Self {
            config: Arc::new(config),
            transport,
            base_url,
        })
    }

    /// Create a client with a custom transport (for testing)
    #[cfg(test)]
    pub fn with_transport(config: CatchConfig, transport: Arc<dyn HttpTransport>) -> CatchResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            config: Arc::new(config),
            transport,
            base_url,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &CatchConfig {
        &self.config
    }

    /// Moving-target search service
    pub fn search(&self) -> SearchServiceImpl {
        SearchServiceImpl::new(
            self.transport.clone(),
            self.base_url.clone(),
            self.config.layout,
        )
    }

    /// Fixed-position search service
    pub fn fixed(&self) -> FixedServiceImpl {
        FixedServiceImpl::new(
            self.transport.clone(),
            self.base_url.clone(),
            self.config.layout,
        )
    }

    /// Result retrieval service
    pub fn caught(&self) -> CaughtServiceImpl {
        CaughtServiceImpl::new(
            self.transport.clone(),
            self.base_url.clone(),
            self.config.layout,
        )
    }

    /// Job status and source summary service
    pub fn status(&self) -> StatusServiceImpl {
        StatusServiceImpl::new(
            self.transport.clone(),
            self.base_url.clone(),
            self.config.layout,
        )
    }

    /// Job-completion watcher for the configured stream protocol
    pub fn watcher(&self) -> JobWatcher {
        JobWatcher::new(
            self.transport.clone(),
            Arc::new(self.caught()),
            self.base_url.clone(),
            self.config.layout,
            protocol_for(self.config.stream_protocol),
        )
    }

    /// Subscribe to the raw notification stream.
    ///
    /// Yields one payload per event for as long as the server keeps the
    /// connection open; dropping the stream closes it.
    pub async fn subscribe_stream(&self) -> CatchResult<EventStream> {
        let url = join_route(&self.base_url, self.config.layout.stream_path())?;
        let bytes = self
            .transport
            .execute_stream(Method::GET, url.to_string(), HeaderMap::new())
            .await?;
        Ok(EventStream::new(bytes))
    }
}

/// Create a new CATCH client from configuration
pub fn create_client(config: CatchConfig) -> CatchResult<CatchClient> {
    CatchClient::new(config)
}

/// Create a new CATCH client from environment variables
pub fn create_client_from_env() -> CatchResult<CatchClient> {
    let config = CatchConfig::from_env()?;
    create_client(config)
}

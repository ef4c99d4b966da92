//! HTTP transport layer

use crate::error::{CatchError, CatchResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use http::HeaderMap;
use reqwest::Client;
use std::time::Duration;

/// A boxed stream of raw response bytes
pub type ByteStream = Box<dyn Stream<Item = CatchResult<Bytes>> + Send + Unpin>;

/// HTTP transport abstraction for testability
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute an HTTP request and buffer the full response
    async fn execute(
        &self,
        method: http::Method,
        url: String,
        headers: HeaderMap,
    ) -> CatchResult<HttpResponse>;

    /// Open a long-lived streaming HTTP request.
    ///
    /// Unlike [`execute`](HttpTransport::execute), no read deadline is
    /// applied: the event stream may idle arbitrarily long between pushes.
    async fn execute_stream(
        &self,
        method: http::Method,
        url: String,
        headers: HeaderMap,
    ) -> CatchResult<ByteStream>;
}

/// HTTP response
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Buffered response body
    pub body: Vec<u8>,
}

/// Reqwest-based HTTP transport implementation
pub struct ReqwestTransport {
    client: Client,
    read_timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport with the given connect and read timeouts.
    ///
    /// The connect timeout is set on the client; the read timeout is
    /// applied per plain request so streaming requests are unaffected.
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> CatchResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| {
                CatchError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            read_timeout,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        method: http::Method,
        url: String,
        headers: HeaderMap,
    ) -> CatchResult<HttpResponse> {
        let mut request = self
            .client
            .request(
                reqwest::Method::from_bytes(method.as_str().as_bytes())
                    .map_err(|e| CatchError::Internal(format!("Invalid method: {}", e)))?,
                &url,
            )
            .timeout(self.read_timeout);

        for (name, value) in headers.iter() {
            request = request.header(name.as_str(), value.as_bytes());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let response_headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body: body.to_vec(),
        })
    }

    async fn execute_stream(
        &self,
        method: http::Method,
        url: String,
        headers: HeaderMap,
    ) -> CatchResult<ByteStream> {
        let mut request = self.client.request(
            reqwest::Method::from_bytes(method.as_str().as_bytes())
                .map_err(|e| CatchError::Internal(format!("Invalid method: {}", e)))?,
            &url,
        );

        for (name, value) in headers.iter() {
            request = request.header(name.as_str(), value.as_bytes());
        }

        let response = request
            .send()
            .await
            .map_err(|e| CatchError::StreamUnavailable(e.to_string()))?;
        let status = response.status().as_u16();

        if status != 200 {
            let body = response.bytes().await.unwrap_or_default();
            return Err(CatchError::StreamUnavailable(format!(
                "HTTP {}: {}",
                status,
                String::from_utf8_lossy(&body)
            )));
        }

        let stream = response.bytes_stream();
        let mapped = futures::stream::StreamExt::map(stream, |result| {
            result.map_err(|e| CatchError::StreamUnavailable(e.to_string()))
        });

        Ok(Box::new(Box::pin(mapped)))
    }
}

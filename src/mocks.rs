//! Mock transport for testing.
//!
//! Service and watcher tests share this transport double instead of a live
//! server: queued responses are replayed in order, and every request is
//! recorded so tests can assert on URLs and call counts.

use crate::error::{CatchError, CatchResult};
use crate::transport::{ByteStream, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Recorded request: method and full URL
pub type RecordedRequest = (Method, String);

/// Mock HTTP transport replaying queued responses
pub struct MockTransport {
    responses: Mutex<VecDeque<CatchResult<HttpResponse>>>,
    stream_chunks: Mutex<VecDeque<Vec<CatchResult<Bytes>>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    stream_requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create an empty mock transport
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            stream_chunks: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            stream_requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain response with the given status and body
    pub fn push_response(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }));
    }

    /// Queue a 200 response with a JSON body
    pub fn push_json(&self, body: serde_json::Value) {
        self.push_response(200, &body.to_string());
    }

    /// Queue a transport-level error
    pub fn push_error(&self, error: CatchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Queue a stream subscription made of the given SSE wire chunks
    pub fn push_stream(&self, chunks: Vec<&str>) {
        self.stream_chunks.lock().unwrap().push_back(
            chunks
                .into_iter()
                .map(|c| Ok(Bytes::from(c.as_bytes().to_vec())))
                .collect(),
        );
    }

    /// Queue a stream subscription that yields the given items verbatim
    pub fn push_stream_items(&self, items: Vec<CatchResult<Bytes>>) {
        self.stream_chunks.lock().unwrap().push_back(items);
    }

    /// All plain requests made so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of stream subscriptions opened so far
    pub fn stream_subscription_count(&self) -> usize {
        self.stream_requests.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(
        &self,
        method: Method,
        url: String,
        _headers: HeaderMap,
    ) -> CatchResult<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), url.clone()));

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(CatchError::Internal(format!(
                    "No mock response configured for {}",
                    url
                )))
            })
    }

    async fn execute_stream(
        &self,
        _method: Method,
        url: String,
        _headers: HeaderMap,
    ) -> CatchResult<ByteStream> {
        self.stream_requests.lock().unwrap().push(url.clone());

        let chunks = self
            .stream_chunks
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| {
                CatchError::StreamUnavailable(format!("No mock stream configured for {}", url))
            })?;

        Ok(Box::new(Box::pin(futures::stream::iter(chunks))))
    }
}

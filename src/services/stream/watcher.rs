//! Job-completion watcher.
//!
//! Drives a queued search to its results: subscribe to the shared event
//! stream, consume messages until the tracked job reaches a terminal
//! state, then fetch the results URL handed out by the search response.

use super::events::EventStream;
use super::protocol::StreamProtocol;
use crate::config::ApiLayout;
use crate::error::{CatchError, CatchResult};
use crate::services::caught::{Caught, CaughtService};
use crate::services::join_route;
use crate::services::search::SearchResponse;
use crate::transport::HttpTransport;
use futures::StreamExt;
use http::{HeaderMap, Method};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Receives human-readable progress text while a job is awaited.
///
/// Diagnostic only; never part of the returned results.
pub trait ProgressObserver: Send + Sync {
    /// Called once per matching, non-ignored stream message with text
    fn on_progress(&self, text: &str);
}

/// Observer that prints progress to standard error
pub struct StderrProgress;

impl ProgressObserver for StderrProgress {
    fn on_progress(&self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Watches the event stream for one job and retrieves its results.
///
/// Single attempt: a dropped stream surfaces as
/// [`CatchError::StreamUnavailable`] and the caller decides whether to
/// resubmit the search. Dropping the watcher mid-wait closes the
/// subscription without fetching results.
pub struct JobWatcher {
    transport: Arc<dyn HttpTransport>,
    caught: Arc<dyn CaughtService>,
    base_url: Url,
    layout: ApiLayout,
    protocol: Arc<dyn StreamProtocol>,
    observer: Arc<dyn ProgressObserver>,
}

impl JobWatcher {
    /// Create a watcher; progress goes to standard error by default
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        caught: Arc<dyn CaughtService>,
        base_url: Url,
        layout: ApiLayout,
        protocol: Arc<dyn StreamProtocol>,
    ) -> Self {
        Self {
            transport,
            caught,
            base_url,
            layout,
            protocol,
            observer: Arc::new(StderrProgress),
        }
    }

    /// Replace the progress observer
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Wait for the search's job to finish and return its results.
    ///
    /// A response without a `results` URL fails immediately with
    /// [`CatchError::SearchFailed`]. A cached response (`queued == false`)
    /// skips the stream entirely and fetches results at once.
    pub async fn await_completion(&self, search: &SearchResponse) -> CatchResult<Caught> {
        let results_url = search
            .results
            .as_deref()
            .ok_or_else(|| CatchError::search_failed(search.message.clone()))?;

        if search.queued {
            self.watch(&search.job_id).await?;
        } else {
            debug!(job_id = %search.job_id, "results cached, skipping stream");
        }

        let payload = self.caught.fetch_results(results_url).await?;
        payload.into_results()
    }

    /// Consume the shared stream until the job's first terminal message.
    async fn watch(&self, job_id: &str) -> CatchResult<()> {
        let url = join_route(&self.base_url, self.layout.stream_path())?;

        let bytes = self
            .transport
            .execute_stream(Method::GET, url.to_string(), HeaderMap::new())
            .await?;
        let mut events = EventStream::new(bytes);

        info!(job_id, "connected to event stream");

        while let Some(payload) = events.next().await {
            let payload = payload?;

            if payload.is_empty() {
                continue;
            }

            let Some(update) = self.protocol.interpret(&payload, job_id) else {
                continue;
            };

            if let Some(text) = &update.text {
                self.observer.on_progress(text);
            }

            if update.is_terminal() {
                debug!(job_id, state = ?update.state, "job finished");
                return Ok(());
            }
        }

        Err(CatchError::StreamUnavailable(format!(
            "stream ended before job {} finished",
            job_id
        )))
    }
}

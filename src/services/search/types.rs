//! Types for the moving-target search route

use serde::Deserialize;

/// Parameters for a moving-target search.
///
/// Immutable once sent; build with [`MovingTargetQuery::new`] and the
/// `with_*` methods.
#[derive(Debug, Clone)]
pub struct MovingTargetQuery {
    /// Moving target designation, e.g. `65P`
    pub target: String,
    /// Restrict the search to these data sources (repeated query parameter)
    pub sources: Vec<String>,
    /// Only observations taken after this date (YYYY-MM-DD, UTC)
    pub start_date: Option<String>,
    /// Only observations taken before this date (YYYY-MM-DD, UTC)
    pub stop_date: Option<String>,
    /// Ephemeris padding in arcminutes
    pub padding: Option<f64>,
    /// Search using the ephemeris uncertainty ellipse
    pub uncertainty_ellipse: bool,
    /// Allow cached results; `false` forces a new search
    pub cached: bool,
}

impl MovingTargetQuery {
    /// Create a query for the given target with defaults (cached allowed,
    /// all sources, no date range)
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            sources: Vec::new(),
            start_date: None,
            stop_date: None,
            padding: None,
            uncertainty_ellipse: false,
            cached: true,
        }
    }

    /// Add a data source to search
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Set the start date (YYYY-MM-DD, UTC)
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Set the stop date (YYYY-MM-DD, UTC)
    pub fn with_stop_date(mut self, date: impl Into<String>) -> Self {
        self.stop_date = Some(date.into());
        self
    }

    /// Set the ephemeris padding in arcminutes
    pub fn with_padding(mut self, arcmin: f64) -> Self {
        self.padding = Some(arcmin);
        self
    }

    /// Search using the ephemeris uncertainty ellipse
    pub fn with_uncertainty_ellipse(mut self) -> Self {
        self.uncertainty_ellipse = true;
        self
    }

    /// Bypass cached results and force a new search
    pub fn force(mut self) -> Self {
        self.cached = false;
        self
    }
}

/// Response to a moving-target search request.
///
/// Fields are permissive: the server omits some of them depending on
/// whether the search was cached, queued, or rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Job UUID assigned by the server (hyphenated form)
    #[serde(default)]
    pub job_id: String,

    /// Whether the search was queued for execution rather than served
    /// from cache
    #[serde(default)]
    pub queued: bool,

    /// URL from which to fetch results once the job has finished.
    /// Absence indicates the request was rejected.
    #[serde(default)]
    pub results: Option<String>,

    /// Human-readable server message
    #[serde(default)]
    pub message: Option<String>,

    /// Whether the server-side job queue is full
    #[serde(default)]
    pub queue_full: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = MovingTargetQuery::new("65P")
            .with_source("neat_palomar_tricam")
            .with_padding(1.5)
            .force();

        assert_eq!(query.target, "65P");
        assert_eq!(query.sources, vec!["neat_palomar_tricam"]);
        assert_eq!(query.padding, Some(1.5));
        assert!(!query.cached);
        assert!(!query.uncertainty_ellipse);
    }

    #[test]
    fn test_search_response_permissive_decode() {
        // A rejected request carries only a message
        let response: SearchResponse =
            serde_json::from_str(r#"{"message": "invalid target"}"#).unwrap();
        assert!(!response.queued);
        assert!(response.results.is_none());
        assert_eq!(response.message.as_deref(), Some("invalid target"));
    }

    #[test]
    fn test_search_response_full_decode() {
        let body = r#"{
            "job_id": "abcdef01-0000-4000-8000-000000000000",
            "queued": true,
            "queue_full": false,
            "message": "enqueued",
            "results": "https://catch-api.astro.umd.edu/caught/abcdef01"
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.queued);
        assert_eq!(response.queue_full, Some(false));
        assert!(response.results.is_some());
    }
}

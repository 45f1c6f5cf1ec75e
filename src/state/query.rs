// Query result state.
// Tracks the in-flight flag, the last good snapshot, and the last fetch error.

use chrono::{DateTime, Utc};

/// State of a polled query. Prior data survives refreshes and failed fetches.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    data: Option<T>,
    loading: bool,
    last_error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            last_error: None,
            last_updated: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Mark a fetch as started.
    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    /// Store a fresh result.
    pub fn set_loaded(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.last_error = None;
        self.last_updated = Some(Utc::now());
    }

    /// Record a failed fetch, keeping whatever data we had.
    pub fn set_error(&mut self, error: String) {
        self.loading = false;
        self.last_error = Some(error);
    }
}

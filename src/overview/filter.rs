// Visibility and search filters over repository buckets.

use std::collections::HashSet;

use super::address::RepoAddress;
use super::buckets::RepoBucket;

/// Keep only buckets whose repository is currently visible. Order is preserved.
pub fn filter_visible(buckets: Vec<RepoBucket>, visible: &[RepoAddress]) -> Vec<RepoBucket> {
    let visible_keys: HashSet<String> = visible.iter().map(RepoAddress::as_key).collect();

    buckets
        .into_iter()
        .filter(|bucket| visible_keys.contains(&bucket.repo_address.as_key()))
        .collect()
}

/// Normalized search box value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm {
    normalized: String,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self {
            normalized: raw.trim().to_lowercase(),
        }
    }

    /// True when the term filters nothing.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Case-insensitive substring match. The empty term matches every name.
    pub fn matches(&self, name: &str) -> bool {
        self.is_empty() || name.to_lowercase().contains(&self.normalized)
    }
}

/// Keep jobs matching the search term and drop buckets left without jobs.
pub fn filter_by_search(buckets: Vec<RepoBucket>, term: &SearchTerm) -> Vec<RepoBucket> {
    buckets
        .into_iter()
        .map(|bucket| RepoBucket {
            jobs: bucket
                .jobs
                .into_iter()
                .filter(|job| term.matches(&job.name))
                .collect(),
            ..bucket
        })
        .filter(|bucket| !bucket.jobs.is_empty())
        .collect()
}

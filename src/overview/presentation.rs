// Presentation selector.
// Picks the overview content from fetch status and filter results.

use super::buckets::RepoBucket;
use super::filter::SearchTerm;

pub const LOADING_MESSAGE: &str = "Loading jobs…";
pub const NO_JOBS_MESSAGE: &str = "No jobs were found in this workspace.";

/// What the jobs overview shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewContent {
    /// First fetch still in flight.
    Loading,
    /// Nothing to list and no search active.
    EmptyNoSearch,
    /// Nothing matches the search; keeps the raw search text for display.
    EmptyWithSearch { search: String },
    /// Filtered buckets, each with at least one job.
    Populated(Vec<RepoBucket>),
}

impl OverviewContent {
    /// Select the content. Re-derivable from its inputs; holds no state between calls.
    pub fn select(
        loading: bool,
        has_data: bool,
        filtered: Vec<RepoBucket>,
        raw_search: &str,
    ) -> Self {
        if loading && !has_data {
            return OverviewContent::Loading;
        }

        if filtered.is_empty() {
            if SearchTerm::new(raw_search).is_empty() {
                return OverviewContent::EmptyNoSearch;
            }
            return OverviewContent::EmptyWithSearch {
                search: raw_search.to_string(),
            };
        }

        OverviewContent::Populated(filtered)
    }

    /// Title line for non-table states.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            OverviewContent::Loading => None,
            OverviewContent::EmptyNoSearch => Some("No jobs"),
            OverviewContent::EmptyWithSearch { .. } => Some("No matching jobs"),
            OverviewContent::Populated(_) => None,
        }
    }

    /// User-facing message for non-table states.
    pub fn message(&self) -> Option<String> {
        match self {
            OverviewContent::Loading => Some(LOADING_MESSAGE.to_string()),
            OverviewContent::EmptyNoSearch => Some(NO_JOBS_MESSAGE.to_string()),
            OverviewContent::EmptyWithSearch { search } => Some(format!(
                "No jobs matching '{}' were found in this workspace.",
                search
            )),
            OverviewContent::Populated(_) => None,
        }
    }

    pub fn buckets(&self) -> &[RepoBucket] {
        match self {
            OverviewContent::Populated(buckets) => buckets,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overview::address::RepoAddress;
    use crate::overview::buckets::JobSummary;

    fn one_bucket() -> Vec<RepoBucket> {
        vec![RepoBucket {
            repo_address: RepoAddress::new("R1", "L1"),
            jobs: vec![JobSummary {
                name: "job_a".to_string(),
                is_job: true,
            }],
        }]
    }

    #[test]
    fn test_loading_only_without_prior_data() {
        assert_eq!(
            OverviewContent::select(true, false, Vec::new(), ""),
            OverviewContent::Loading
        );
        // A refresh with data already present keeps showing the data.
        assert!(matches!(
            OverviewContent::select(true, true, one_bucket(), ""),
            OverviewContent::Populated(_)
        ));
    }

    #[test]
    fn test_loading_wins_over_search() {
        assert_eq!(
            OverviewContent::select(true, false, Vec::new(), "abc"),
            OverviewContent::Loading
        );
    }

    #[test]
    fn test_failed_fetch_shows_empty() {
        assert_eq!(
            OverviewContent::select(false, false, Vec::new(), ""),
            OverviewContent::EmptyNoSearch
        );
    }

    #[test]
    fn test_whitespace_search_counts_as_no_search() {
        assert_eq!(
            OverviewContent::select(false, true, Vec::new(), "   "),
            OverviewContent::EmptyNoSearch
        );
    }

    #[test]
    fn test_search_echoed_verbatim() {
        let content = OverviewContent::select(false, true, Vec::new(), " Foo ");
        assert_eq!(content.title(), Some("No matching jobs"));
        assert_eq!(
            content.message().unwrap(),
            "No jobs matching ' Foo ' were found in this workspace."
        );
    }

    #[test]
    fn test_populated_has_no_message() {
        let content = OverviewContent::select(false, true, one_bucket(), "job");
        assert_eq!(content.message(), None);
        assert_eq!(content.buckets().len(), 1);
    }
}

// Jobs overview pipeline.
// Turns a workspace snapshot into filtered repository buckets and picks what to show.

pub mod address;
pub mod buckets;
pub mod filter;
pub mod presentation;

pub use address::RepoAddress;
pub use buckets::{JobSummary, RepoBucket, all_repo_addresses, build_buckets};
pub use filter::{SearchTerm, filter_by_search, filter_visible};
pub use presentation::OverviewContent;

use crate::graphql::WorkspaceOrError;

/// Run the full pipeline: bucket, keep visible repositories, apply the search box.
pub fn derive_overview(
    snapshot: Option<&WorkspaceOrError>,
    visible: &[RepoAddress],
    search: &str,
) -> Vec<RepoBucket> {
    let buckets = build_buckets(snapshot);
    let visible_buckets = filter_visible(buckets, visible);
    filter_by_search(visible_buckets, &SearchTerm::new(search))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn r1() -> Vec<RepoAddress> {
        vec![RepoAddress::new("R1", "L1")]
    }

    fn names(buckets: &[RepoBucket]) -> Vec<Vec<&str>> {
        buckets
            .iter()
            .map(|b| b.jobs.iter().map(|j| j.name.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_scenario_a_populated() {
        let snapshot = scenario_a();
        let buckets = derive_overview(Some(&snapshot), &r1(), "");
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].repo_address, RepoAddress::new("R1", "L1"));
        assert_eq!(names(&buckets), vec![vec!["job_a", "job_b"]]);

        let content = OverviewContent::select(false, true, buckets, "");
        assert!(matches!(content, OverviewContent::Populated(ref b) if b.len() == 1));
    }

    #[test]
    fn test_scenario_b_no_jobs() {
        let snapshot = workspace(vec![location("L1", vec![repo("R1", &[])])]);
        let buckets = derive_overview(Some(&snapshot), &r1(), "");
        let content = OverviewContent::select(false, true, buckets, "");
        assert_eq!(content, OverviewContent::EmptyNoSearch);
        assert_eq!(
            content.message().as_deref(),
            Some("No jobs were found in this workspace.")
        );
    }

    #[test]
    fn test_scenario_c_search_is_case_insensitive() {
        let snapshot = scenario_a();
        // Substring match: "job_a" contains a "b" too.
        let buckets = derive_overview(Some(&snapshot), &r1(), "B");
        assert_eq!(names(&buckets), vec![vec!["job_a", "job_b"]]);

        let buckets = derive_overview(Some(&snapshot), &r1(), "_B");
        assert_eq!(names(&buckets), vec![vec!["job_b"]]);
    }

    #[test]
    fn test_scenario_d_search_without_matches() {
        let snapshot = scenario_a();
        let buckets = derive_overview(Some(&snapshot), &r1(), "zzz");
        assert!(buckets.is_empty());

        let content = OverviewContent::select(false, true, buckets, "zzz");
        assert_eq!(
            content,
            OverviewContent::EmptyWithSearch {
                search: "zzz".to_string()
            }
        );
        assert!(content.message().unwrap().contains("zzz"));
    }

    #[test]
    fn test_scenario_e_failed_location_is_dropped() {
        let with_failure = workspace(vec![
            location("L1", vec![repo("R1", &["job_a", "job_b"])]),
            failed_location("L2"),
        ]);
        let baseline = scenario_a();

        assert_eq!(
            derive_overview(Some(&with_failure), &r1(), ""),
            derive_overview(Some(&baseline), &r1(), "")
        );
    }

    #[test]
    fn test_hidden_repository_is_filtered_out() {
        let snapshot = scenario_a();
        let buckets = derive_overview(Some(&snapshot), &[], "");
        assert!(buckets.is_empty());
    }
}

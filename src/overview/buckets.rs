// Bucket builder.
// Groups the jobs of every loaded location by repository address.

use crate::graphql::{LocationOrLoadError, Pipeline, RepositoryLocation, WorkspaceOrError};

use super::address::RepoAddress;

/// Name prefix of the implicit asset-group jobs the backend generates.
const HIDDEN_ASSET_GROUP_JOB_PREFIX: &str = "__ASSET_JOB";

/// A job as listed in the overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub name: String,
    pub is_job: bool,
}

impl From<&Pipeline> for JobSummary {
    fn from(pipeline: &Pipeline) -> Self {
        Self {
            name: pipeline.name.clone(),
            is_job: pipeline.is_job,
        }
    }
}

/// The listed jobs of one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoBucket {
    pub repo_address: RepoAddress,
    pub jobs: Vec<JobSummary>,
}

/// Whether a job is an internal asset-group job that users never see.
pub fn is_hidden_asset_group_job(name: &str) -> bool {
    name.starts_with(HIDDEN_ASSET_GROUP_JOB_PREFIX)
}

/// Loaded locations of a snapshot. Workspace errors and failed locations yield nothing.
fn loaded_locations(
    snapshot: Option<&WorkspaceOrError>,
) -> impl Iterator<Item = &RepositoryLocation> {
    let entries = match snapshot {
        Some(WorkspaceOrError::Workspace(workspace)) => workspace.location_entries.as_slice(),
        Some(WorkspaceOrError::PythonError(_)) | None => &[],
    };

    entries
        .iter()
        .filter_map(|entry| match &entry.location_or_load_error {
            Some(LocationOrLoadError::RepositoryLocation(location)) => Some(location),
            Some(LocationOrLoadError::PythonError(_)) | None => None,
        })
}

/// Build sorted repository buckets from a snapshot.
pub fn build_buckets(snapshot: Option<&WorkspaceOrError>) -> Vec<RepoBucket> {
    let mut buckets: Vec<RepoBucket> = loaded_locations(snapshot)
        .flat_map(|location| {
            location.repositories.iter().filter_map(|repo| {
                let jobs: Vec<JobSummary> = repo
                    .pipelines
                    .iter()
                    .filter(|pipeline| !is_hidden_asset_group_job(&pipeline.name))
                    .map(JobSummary::from)
                    .collect();

                if jobs.is_empty() {
                    return None;
                }

                Some(RepoBucket {
                    repo_address: RepoAddress::new(&repo.name, &location.name),
                    jobs,
                })
            })
        })
        .collect();

    buckets.sort_by(|a, b| a.repo_address.display_cmp(&b.repo_address));
    buckets
}

/// Every repository of every loaded location, sorted for display.
///
/// Unlike [`build_buckets`] this keeps repositories that have no listed jobs,
/// since they can still be toggled in the repository filter.
pub fn all_repo_addresses(snapshot: Option<&WorkspaceOrError>) -> Vec<RepoAddress> {
    let mut addresses: Vec<RepoAddress> = loaded_locations(snapshot)
        .flat_map(|location| {
            location
                .repositories
                .iter()
                .map(|repo| RepoAddress::new(&repo.name, &location.name))
        })
        .collect();

    addresses.sort_by(|a, b| a.display_cmp(b));
    addresses.dedup();
    addresses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::{PythonError, Repository};
    use crate::overview::fixtures::*;

    #[test]
    fn test_absent_snapshot_is_empty() {
        assert!(build_buckets(None).is_empty());
    }

    #[test]
    fn test_workspace_error_is_empty() {
        let snapshot = WorkspaceOrError::PythonError(PythonError {
            message: "boom".to_string(),
            stack: Vec::new(),
        });
        assert!(build_buckets(Some(&snapshot)).is_empty());
        assert!(all_repo_addresses(Some(&snapshot)).is_empty());
    }

    #[test]
    fn test_failed_locations_do_not_suppress_siblings() {
        let mut missing = failed_location("L0");
        missing.location_or_load_error = None;
        let snapshot = workspace(vec![
            failed_location("L2"),
            location("L1", vec![repo("R1", &["job_a"])]),
            missing,
            location("L3", vec![repo("R3", &["job_c"])]),
            failed_location("L4"),
        ]);

        let buckets = build_buckets(Some(&snapshot));
        let keys: Vec<String> = buckets.iter().map(|b| b.repo_address.as_key()).collect();
        assert_eq!(keys, vec!["R1@L1", "R3@L3"]);
    }

    #[test]
    fn test_hidden_asset_group_jobs_are_removed() {
        let snapshot = workspace(vec![location(
            "L1",
            vec![repo("R1", &["__ASSET_JOB", "__ASSET_JOB_0", "daily", "my__ASSET_JOB"])],
        )]);

        let buckets = build_buckets(Some(&snapshot));
        let names: Vec<&str> = buckets[0].jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["daily", "my__ASSET_JOB"]);
        assert!(
            buckets
                .iter()
                .flat_map(|b| &b.jobs)
                .all(|j| !is_hidden_asset_group_job(&j.name))
        );
    }

    #[test]
    fn test_repo_of_only_hidden_jobs_has_no_bucket() {
        let snapshot = workspace(vec![location(
            "L1",
            vec![
                repo("assets_only", &["__ASSET_JOB", "__ASSET_JOB_1"]),
                repo("R1", &["job_a"]),
            ],
        )]);

        let buckets = build_buckets(Some(&snapshot));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].repo_address, RepoAddress::new("R1", "L1"));

        // Still selectable in the repository filter.
        let all = all_repo_addresses(Some(&snapshot));
        assert!(all.contains(&RepoAddress::new("assets_only", "L1")));
    }

    #[test]
    fn test_buckets_sorted_by_location_then_repo() {
        let snapshot = workspace(vec![
            location("beta", vec![repo("b_repo", &["x"]), repo("a_repo", &["y"])]),
            location("Alpha", vec![repo("z_repo", &["z"])]),
        ]);

        let keys: Vec<String> = build_buckets(Some(&snapshot))
            .iter()
            .map(|b| b.repo_address.as_key())
            .collect();
        assert_eq!(keys, vec!["z_repo@Alpha", "a_repo@beta", "b_repo@beta"]);
    }

    #[test]
    fn test_job_flags_and_order_preserved() {
        let snapshot = workspace(vec![location(
            "L1",
            vec![Repository {
                id: "r".to_string(),
                name: "R1".to_string(),
                pipelines: vec![pipeline("legacy", false), pipeline("modern", true)],
            }],
        )]);

        let buckets = build_buckets(Some(&snapshot));
        assert_eq!(
            buckets[0].jobs,
            vec![
                JobSummary {
                    name: "legacy".to_string(),
                    is_job: false
                },
                JobSummary {
                    name: "modern".to_string(),
                    is_job: true
                },
            ]
        );
    }
}
